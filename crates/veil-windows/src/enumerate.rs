use veil_core::{PlatformError, WindowHandle, WindowInfo};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
};
use windows::core::BOOL;

use crate::desktop::owner_pid;

/// Enumerates all visible top-level windows that have a title.
///
/// This calls the Win32 `EnumWindows` API, which iterates over every top-level
/// window and invokes a callback for each one. Cloaked windows are still
/// listed: cloaking hides a window from capture, not from the window manager.
pub fn enumerate_windows() -> Result<Vec<WindowInfo>, PlatformError> {
    let mut windows: Vec<WindowInfo> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<WindowInfo> to collect results. This is
    // safe because EnumWindows runs synchronously, so the Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )
    }
    .map_err(|e| PlatformError::new(e.code().0, e.message()))?;

    Ok(windows)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec<WindowInfo>, cast from enumerate_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<WindowInfo>) };

    // SAFETY: IsWindowVisible is a simple query on a handle the OS just gave us.
    if unsafe { IsWindowVisible(hwnd) }.as_bool() {
        let title = window_title(hwnd);
        if !title.is_empty() {
            windows.push(WindowInfo {
                handle: WindowHandle::from_raw(hwnd.0 as usize),
                title,
                pid: owner_pid(hwnd),
            });
        }
    }

    BOOL(1) // TRUE: continue enumerating
}

fn window_title(hwnd: HWND) -> String {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW are safe to call
    // with a valid HWND. They read window text without modifying state.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}
