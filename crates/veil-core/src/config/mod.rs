mod loader;
pub mod template;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::locate::LocatePolicy;
use crate::log::LogConfig;
use crate::platform::CloakMethod;
use crate::present::{PresentationOptions, StyleMode};

pub use loader::{config_dir, config_path, load, load_from};

/// Longest pause allowed between locate attempts.
const MAX_RETRY_DELAY_MS: u64 = 60_000;
const MAX_ATTEMPTS: u32 = 1_000;

/// Top-level configuration for Veil.
///
/// Loaded from `~/.config/veil/config.toml`. Missing sections fall back
/// to defaults thanks to `#[serde(default)]`. Command-line flags are
/// applied on top of the loaded values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keep the process alive after applying, until Ctrl+C.
    pub hold: bool,
    /// Which window to act on.
    pub target: TargetConfig,
    /// Lookup retry settings.
    pub locate: LocateConfig,
    /// Style, opacity, and cloak settings.
    pub presentation: PresentationConfig,
    /// Diagnostic logging.
    pub logging: LogConfig,
}

/// The window to act on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Exact window title. No wildcard or substring matching.
    pub title: String,
    /// When set, refuse to touch a window owned by any other process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_pid: Option<u32>,
}

/// Locate retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Total lookups before giving up (1 to 1000).
    pub max_attempts: u32,
    /// Pause between lookups in milliseconds.
    pub retry_delay_ms: u64,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// "layered", "no-redirection", or "pass-through".
    pub style: StyleMode,
    /// Shorthand for `style = "pass-through"`; wins over `style` when set.
    pub pass_through_input: bool,
    /// Window alpha, 0 (invisible) to 255 (opaque).
    pub opacity: u8,
    /// Whether to exclude the window from capture.
    pub cloak: bool,
    /// "dwm" or "display-affinity".
    pub cloak_method: CloakMethod,
}

/// The recorded behavior variants, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// No-redirection style, opaque, cloaked.
    A,
    /// Same as `A` with per-step tracing.
    B,
    /// Click-through at ~75% opacity, cloaked, with patient lookup.
    C,
    /// Layered only at ~70% opacity, cloaked.
    D,
}

impl Default for LocateConfig {
    fn default() -> Self {
        let policy = LocatePolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            retry_delay_ms: policy.retry_delay.as_millis() as u64,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        let options = PresentationOptions::default();
        Self {
            style: options.style,
            pass_through_input: false,
            opacity: options.opacity,
            cloak: options.cloak,
            cloak_method: options.cloak_method,
        }
    }
}

impl LocateConfig {
    pub fn policy(&self) -> LocatePolicy {
        LocatePolicy {
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

impl PresentationConfig {
    /// Style mode after applying the `pass_through_input` shorthand.
    pub fn style_mode(&self) -> StyleMode {
        if self.pass_through_input {
            StyleMode::PassThrough
        } else {
            self.style
        }
    }

    pub fn options(&self) -> PresentationOptions {
        PresentationOptions {
            style: self.style_mode(),
            opacity: self.opacity,
            cloak: self.cloak,
            cloak_method: self.cloak_method,
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Attempts are kept within 1..=1000 and retry delays are capped at a
    /// minute so a typo cannot hang the run.
    pub fn validate(&mut self) {
        self.locate.max_attempts = self.locate.max_attempts.clamp(1, MAX_ATTEMPTS);
        self.locate.retry_delay_ms = self.locate.retry_delay_ms.min(MAX_RETRY_DELAY_MS);
    }

    /// Checks that the configuration names something to act on.
    pub fn check(&self) -> Result<(), String> {
        if self.target.title.is_empty() {
            return Err("no target title configured (set target.title or pass --title)".into());
        }
        if self.target.title.contains('\0') {
            return Err("target title must not contain a NUL character".into());
        }
        Ok(())
    }

    /// Overwrites presentation (and, for `C`, lookup) settings with a preset.
    pub fn apply_preset(&mut self, preset: Preset) {
        let p = &mut self.presentation;
        p.cloak = true;
        p.pass_through_input = false;
        match preset {
            Preset::A | Preset::B => {
                p.style = StyleMode::NoRedirection;
                p.opacity = 255;
            }
            Preset::C => {
                p.style = StyleMode::PassThrough;
                p.opacity = 190;
                self.locate = LocateConfig::default();
            }
            Preset::D => {
                p.style = StyleMode::Layered;
                p.opacity = 180;
            }
        }
        if preset == Preset::B {
            self.logging.console = true;
            self.logging.level = "debug".into();
        }
    }
}
