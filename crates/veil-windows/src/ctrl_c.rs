//! Ctrl+C handling using `SetConsoleCtrlHandler`.
//!
//! Used by `veil apply --hold` to keep the process alive until the user
//! stops it.

use std::sync::OnceLock;
use std::sync::mpsc::{self, Sender};

use veil_core::PlatformError;
use windows::Win32::System::Console::{
    CTRL_BREAK_EVENT, CTRL_C_EVENT, CTRL_CLOSE_EVENT, SetConsoleCtrlHandler,
};

/// Global sender, written once by `wait_for_ctrl_c`, read by the callback.
static SENDER: OnceLock<Sender<()>> = OnceLock::new();

/// Blocks the calling thread until Ctrl+C, Ctrl+Break, or console close.
pub fn wait_for_ctrl_c() -> Result<(), PlatformError> {
    let (tx, rx) = mpsc::channel();
    if SENDER.set(tx).is_err() {
        return Err(PlatformError::new(0, "Ctrl+C handler already registered"));
    }

    // SAFETY: `handler` is a plain extern fn that only touches SENDER.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }
        .map_err(|e| PlatformError::new(e.code().0, e.message()))?;

    rx.recv()
        .map_err(|_| PlatformError::new(0, "Ctrl+C channel closed"))
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    let handled = matches!(ctrl_type, CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT);
    if handled && let Some(tx) = SENDER.get() {
        let _ = tx.send(());
    }
    windows::core::BOOL(i32::from(handled))
}
