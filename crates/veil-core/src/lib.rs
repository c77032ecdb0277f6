pub mod config;
pub mod error;
pub mod inspect;
pub mod locate;
pub mod log;
pub mod platform;
pub mod present;
pub mod run;
pub mod window;

#[cfg(test)]
mod fake;

pub use config::Config;
pub use error::VeilError;
pub use inspect::{WindowState, inspect};
pub use locate::{LocatePolicy, Located, locate};
pub use platform::{CloakMethod, PlatformError, Sleep, StyleFlag, ThreadSleep, WindowSystem};
pub use present::{MutationReport, PresentationOptions, StepOutcome, StyleMode, apply_presentation};
pub use run::{RunOutcome, RunResult, run};
pub use window::{WindowHandle, WindowInfo};
