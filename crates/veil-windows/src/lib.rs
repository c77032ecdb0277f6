/// Ctrl+C handling for `apply --hold`.
#[cfg(windows)]
pub mod ctrl_c;

/// `WindowSystem` implementation on Win32, DWM, and layered-window APIs.
#[cfg(windows)]
pub mod desktop;

/// Win32 top-level window enumeration.
#[cfg(windows)]
pub mod enumerate;

#[cfg(windows)]
pub use ctrl_c::wait_for_ctrl_c;
#[cfg(windows)]
pub use desktop::Desktop;
#[cfg(windows)]
pub use enumerate::enumerate_windows;

#[cfg(not(windows))]
mod unsupported;

#[cfg(not(windows))]
pub use unsupported::{Desktop, enumerate_windows, wait_for_ctrl_c};
