//! The whole acquisition-and-mutation sequence for one run.

use crate::config::Config;
use crate::error::VeilError;
use crate::locate::locate;
use crate::platform::{Sleep, WindowSystem};
use crate::present::{MutationReport, apply_presentation};
use crate::{WindowHandle, log_info, log_warn};

/// What a completed run did.
///
/// Completion means the window was found and the mutation steps were
/// attempted; individual steps may still have failed, see `report`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub handle: WindowHandle,
    /// Owning process, when it could be determined.
    pub owner_pid: Option<u32>,
    /// Lookups it took to find the window.
    pub attempts: u32,
    pub report: MutationReport,
}

pub type RunResult = Result<RunOutcome, VeilError>;

/// Locates the configured window and applies the configured presentation.
///
/// Fails without touching any window when the config names no title,
/// when the window cannot be found, or when it belongs to a process
/// other than `target.expected_pid`.
pub fn run(system: &impl WindowSystem, sleeper: &impl Sleep, config: &Config) -> RunResult {
    config.check().map_err(VeilError::Config)?;

    let title = &config.target.title;
    let located = locate(system, sleeper, title, &config.locate.policy())?;
    let owner_pid = check_owner(system, located.handle, config.target.expected_pid)?;

    let options = config.presentation.options();
    log_info!(
        "applying style={:?} opacity={} cloak={} ({}) to {}",
        options.style,
        options.opacity,
        options.cloak,
        options.cloak_method.name(),
        located.handle
    );
    let report = apply_presentation(system, located.handle, &options);

    Ok(RunOutcome {
        handle: located.handle,
        owner_pid,
        attempts: located.attempts,
        report,
    })
}

/// Looks up the owning process and enforces `expected` when given.
///
/// Without an expectation the PID is informational only, so a failed
/// query is logged and ignored.
fn check_owner(
    system: &impl WindowSystem,
    window: WindowHandle,
    expected: Option<u32>,
) -> Result<Option<u32>, VeilError> {
    match (system.owner_process(window), expected) {
        (Ok(actual), Some(expected)) if actual != expected => {
            Err(VeilError::OwnerMismatch { expected, actual })
        }
        (Ok(actual), _) => {
            log_info!("{window} is owned by PID {actual}");
            Ok(Some(actual))
        }
        (Err(e), Some(_)) => Err(VeilError::OwnerQueryFailed(e)),
        (Err(e), None) => {
            log_warn!("could not query owner of {window}: {e}");
            Ok(None)
        }
    }
}
