//! Presentation changes applied to a located window.
//!
//! Three independent steps run in a fixed order: extended style, opacity,
//! capture cloak. Each is attempted regardless of how the previous ones
//! went, and each outcome is reported separately.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VeilError;
use crate::platform::{CloakMethod, PlatformError, PlatformResult, StyleFlag, WindowSystem};
use crate::{WindowHandle, log_debug, log_info, log_warn};

/// Which extended-style bits are ORed into the window.
///
/// Every mode sets the layered bit, which is what makes an alpha value
/// take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleMode {
    /// Layered only.
    Layered,
    /// Layered, without a compositor redirection surface.
    #[default]
    NoRedirection,
    /// Layered and transparent to mouse input.
    PassThrough,
}

impl StyleMode {
    pub fn flags(self) -> &'static [StyleFlag] {
        match self {
            Self::Layered => &[StyleFlag::Layered],
            Self::NoRedirection => &[StyleFlag::Layered, StyleFlag::NoRedirectionBitmap],
            Self::PassThrough => &[StyleFlag::Layered, StyleFlag::PassThroughInput],
        }
    }

    /// Combined platform bitmask for this mode.
    pub fn mask(self, system: &impl WindowSystem) -> u32 {
        self.flags()
            .iter()
            .fold(0, |mask, &flag| mask | system.style_bit(flag))
    }
}

/// What to do to the window once it has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationOptions {
    pub style: StyleMode,
    /// 0 is fully transparent, 255 fully opaque.
    pub opacity: u8,
    /// Whether to exclude the window from capture.
    pub cloak: bool,
    pub cloak_method: CloakMethod,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            style: StyleMode::NoRedirection,
            opacity: u8::MAX,
            cloak: true,
            cloak_method: CloakMethod::Dwm,
        }
    }
}

/// Result of one presentation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// The step was not requested.
    Skipped,
    Failed(VeilError),
}

impl StepOutcome {
    fn from_result(result: PlatformResult<()>, wrap: fn(PlatformError) -> VeilError) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(e) => Self::Failed(wrap(e)),
        }
    }

    /// `true` unless the step was attempted and failed.
    pub fn succeeded(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&VeilError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Applied | Self::Skipped => None,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("ok"),
            Self::Skipped => f.write_str("skipped"),
            Self::Failed(_) => f.write_str("failed"),
        }
    }
}

/// Per-step outcomes of [`apply_presentation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub style: StepOutcome,
    pub opacity: StepOutcome,
    pub cloak: StepOutcome,
}

impl MutationReport {
    /// Success flags for the style, opacity, and cloak steps, in that order.
    pub fn flags(&self) -> [bool; 3] {
        [
            self.style.succeeded(),
            self.opacity.succeeded(),
            self.cloak.succeeded(),
        ]
    }

    pub fn all_succeeded(&self) -> bool {
        self.flags().iter().all(|ok| *ok)
    }

    /// Errors from the steps that failed, in step order.
    pub fn failures(&self) -> impl Iterator<Item = &VeilError> {
        [&self.style, &self.opacity, &self.cloak]
            .into_iter()
            .filter_map(StepOutcome::error)
    }
}

impl fmt::Display for MutationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "style: {}, opacity: {}, cloak: {}",
            self.style, self.opacity, self.cloak
        )
    }
}

/// Applies style, opacity, and cloak changes to `window`.
///
/// A failing step never stops the ones after it. The style step is a
/// plain read-modify-write: a concurrent writer to the same window's
/// style can be overwritten.
pub fn apply_presentation(
    system: &impl WindowSystem,
    window: WindowHandle,
    options: &PresentationOptions,
) -> MutationReport {
    let style = StepOutcome::from_result(
        add_style_bits(system, window, options.style),
        VeilError::StyleMutationFailed,
    );
    trace_step("style", &style);

    log_debug!("setting alpha {} on {window}", options.opacity);
    let opacity = StepOutcome::from_result(
        system.set_alpha(window, options.opacity),
        VeilError::OpacityMutationFailed,
    );
    trace_step("opacity", &opacity);

    let cloak = if options.cloak {
        log_debug!("cloaking {window} via {}", options.cloak_method.name());
        StepOutcome::from_result(
            system.set_cloak(window, options.cloak_method, true),
            VeilError::CloakMutationFailed,
        )
    } else {
        StepOutcome::Skipped
    };
    trace_step("cloak", &cloak);

    MutationReport {
        style,
        opacity,
        cloak,
    }
}

fn add_style_bits(
    system: &impl WindowSystem,
    window: WindowHandle,
    mode: StyleMode,
) -> PlatformResult<()> {
    let current = system.ex_style(window)?;
    let updated = current | mode.mask(system);
    log_debug!("ex-style of {window}: 0x{current:08X} -> 0x{updated:08X}");
    system.set_ex_style(window, updated)
}

fn trace_step(name: &str, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Failed(e) => log_warn!("{name} step failed: {e}"),
        StepOutcome::Applied | StepOutcome::Skipped => log_info!("{name} step {outcome}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{
        FakeDesktop, Failures, HANDLE, LAYERED, NO_REDIRECTION, PASS_THROUGH, PRE_EXISTING,
        access_denied,
    };

    fn options(style: StyleMode, opacity: u8) -> PresentationOptions {
        PresentationOptions {
            style,
            opacity,
            ..Default::default()
        }
    }

    #[test]
    fn opaque_without_pass_through_is_layered_but_takes_input() {
        // Arrange
        let desktop = FakeDesktop::new("Target");

        // Act
        let report = apply_presentation(&desktop, HANDLE, &options(StyleMode::NoRedirection, 255));

        // Assert
        assert!(report.all_succeeded());
        let style = desktop.ex_style.get();
        assert_ne!(style & LAYERED, 0);
        assert_ne!(style & NO_REDIRECTION, 0);
        assert_eq!(style & PASS_THROUGH, 0);
        assert_eq!(desktop.alpha.get(), Some(255));
    }

    #[test]
    fn pass_through_sets_both_bits_and_alpha() {
        // Arrange
        let desktop = FakeDesktop::new("Target");

        // Act
        let report = apply_presentation(&desktop, HANDLE, &options(StyleMode::PassThrough, 190));

        // Assert
        assert!(report.all_succeeded());
        assert_eq!(desktop.alpha(HANDLE), Ok(Some(190)));
        let style = desktop.ex_style.get();
        assert_eq!(style & (LAYERED | PASS_THROUGH), LAYERED | PASS_THROUGH);
        assert_eq!(style & NO_REDIRECTION, 0);
    }

    #[test]
    fn existing_style_bits_are_preserved() {
        // Arrange
        let desktop = FakeDesktop::new("Target");

        // Act
        apply_presentation(&desktop, HANDLE, &options(StyleMode::Layered, 180));

        // Assert
        assert_eq!(desktop.ex_style.get(), PRE_EXISTING | LAYERED);
    }

    #[test]
    fn style_failure_does_not_block_later_steps() {
        // Arrange
        let desktop = FakeDesktop::new("Target").failing(Failures {
            set_style: Some(access_denied()),
            ..Default::default()
        });

        // Act
        let report = apply_presentation(&desktop, HANDLE, &PresentationOptions::default());

        // Assert
        assert_eq!(
            report.style,
            StepOutcome::Failed(VeilError::StyleMutationFailed(access_denied()))
        );
        assert_eq!(report.opacity, StepOutcome::Applied);
        assert_eq!(report.cloak, StepOutcome::Applied);
        assert_eq!(report.flags(), [false, true, true]);
        assert!(desktop.called("set_alpha"));
        assert!(desktop.called("set_cloak"));
    }

    #[test]
    fn style_read_failure_skips_the_write() {
        // Arrange
        let desktop = FakeDesktop::new("Target").failing(Failures {
            get_style: Some(access_denied()),
            ..Default::default()
        });

        // Act
        let report = apply_presentation(&desktop, HANDLE, &PresentationOptions::default());

        // Assert
        assert!(!report.style.succeeded());
        assert!(!desktop.called("set_ex_style"));
        assert_eq!(desktop.ex_style.get(), PRE_EXISTING);
        assert!(report.opacity.succeeded());
    }

    #[test]
    fn report_lists_every_failed_step() {
        // Arrange
        let desktop = FakeDesktop::new("Target").failing(Failures {
            alpha: Some(access_denied()),
            cloak: Some(access_denied()),
            ..Default::default()
        });

        // Act
        let report = apply_presentation(&desktop, HANDLE, &PresentationOptions::default());

        // Assert
        let failures: Vec<_> = report.failures().cloned().collect();
        assert_eq!(
            failures,
            vec![
                VeilError::OpacityMutationFailed(access_denied()),
                VeilError::CloakMutationFailed(access_denied()),
            ]
        );
        assert_eq!(report.flags(), [true, false, false]);
        assert_eq!(
            report.to_string(),
            "style: ok, opacity: failed, cloak: failed"
        );
    }

    #[test]
    fn cloak_reads_back_and_window_is_still_found() {
        // Arrange
        let desktop = FakeDesktop::new("Target");

        // Act
        let report = apply_presentation(&desktop, HANDLE, &PresentationOptions::default());

        // Assert
        assert_eq!(report.cloak, StepOutcome::Applied);
        assert_eq!(desktop.is_cloaked(HANDLE, CloakMethod::Dwm), Ok(true));
        assert_eq!(desktop.find_window("Target"), Ok(Some(HANDLE)));
    }

    #[test]
    fn display_affinity_cloak_uses_its_own_attribute() {
        // Arrange
        let desktop = FakeDesktop::new("Target");
        let opts = PresentationOptions {
            cloak_method: CloakMethod::DisplayAffinity,
            ..Default::default()
        };

        // Act
        apply_presentation(&desktop, HANDLE, &opts);

        // Assert
        assert_eq!(desktop.is_cloaked(HANDLE, CloakMethod::DisplayAffinity), Ok(true));
        assert_eq!(desktop.is_cloaked(HANDLE, CloakMethod::Dwm), Ok(false));
    }

    #[test]
    fn cloak_disabled_is_skipped() {
        // Arrange
        let desktop = FakeDesktop::new("Target");
        let opts = PresentationOptions {
            cloak: false,
            ..Default::default()
        };

        // Act
        let report = apply_presentation(&desktop, HANDLE, &opts);

        // Assert
        assert_eq!(report.cloak, StepOutcome::Skipped);
        assert!(report.all_succeeded());
        assert!(!desktop.called("set_cloak"));
    }

    #[test]
    fn stale_handle_fails_every_step() {
        // Arrange
        let desktop = FakeDesktop::new("Target");
        let stale = WindowHandle::from_raw(0xDEAD);

        // Act
        let report = apply_presentation(&desktop, stale, &PresentationOptions::default());

        // Assert
        assert_eq!(report.flags(), [false, false, false]);
    }
}
