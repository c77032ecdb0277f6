use std::ffi::c_void;
use std::mem;

use veil_core::WindowHandle;
use veil_core::platform::{CloakMethod, PlatformError, PlatformResult, StyleFlag, WindowSystem};

use windows::Win32::Foundation::{COLORREF, GetLastError, HWND, SetLastError, WIN32_ERROR};
use windows::Win32::Graphics::Dwm::{
    DWMWA_CLOAK, DWMWA_CLOAKED, DwmGetWindowAttribute, DwmSetWindowAttribute,
};
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowW, GWL_EXSTYLE, GetLayeredWindowAttributes, GetWindowDisplayAffinity,
    GetWindowLongPtrW, GetWindowThreadProcessId, LAYERED_WINDOW_ATTRIBUTES_FLAGS, LWA_ALPHA,
    SetLayeredWindowAttributes, SetWindowDisplayAffinity, SetWindowLongPtrW,
    WDA_EXCLUDEFROMCAPTURE, WDA_NONE, WS_EX_LAYERED, WS_EX_NOREDIRECTIONBITMAP, WS_EX_TRANSPARENT,
};
use windows::core::{HRESULT, PCWSTR};

/// The interactive Windows desktop.
///
/// Handles refer to windows owned by other processes. Any of them can be
/// destroyed between calls, so every call checks for failure and reports
/// the Win32 error instead of assuming the handle is still valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Desktop;

fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

fn from_windows(e: windows::core::Error) -> PlatformError {
    PlatformError::new(e.code().0, e.message())
}

fn from_win32(code: WIN32_ERROR) -> PlatformError {
    from_windows(windows::core::Error::from(code.to_hresult()))
}

/// Clears the thread's last-error value.
///
/// `GetWindowLongPtrW` and `SetWindowLongPtrW` return 0 both for failure
/// and for a legitimate zero value, so the last error is the only way to
/// tell the two apart.
fn clear_last_error() {
    // SAFETY: SetLastError only writes thread-local state.
    unsafe { SetLastError(WIN32_ERROR(0)) };
}

/// Returns the thread's last error if a zero-returning call actually failed.
fn zero_result_error() -> Option<PlatformError> {
    // SAFETY: GetLastError only reads thread-local state.
    let code = unsafe { GetLastError() };
    (code.0 != 0).then(|| from_win32(code))
}

impl WindowSystem for Desktop {
    fn find_window(&self, title: &str) -> PlatformResult<Option<WindowHandle>> {
        let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();

        clear_last_error();
        // SAFETY: `wide` is NUL-terminated and outlives the call. A null
        // class name matches windows of any class.
        match unsafe { FindWindowW(PCWSTR::null(), PCWSTR(wide.as_ptr())) } {
            Ok(h) if !h.is_invalid() => Ok(Some(WindowHandle::from_raw(h.0 as usize))),
            Ok(_) => Ok(None),
            // A miss leaves the last error at zero; anything else is a real failure.
            Err(e) if e.code() == HRESULT(0) => Ok(None),
            Err(e) => Err(from_windows(e)),
        }
    }

    fn ex_style(&self, window: WindowHandle) -> PlatformResult<u32> {
        clear_last_error();
        // SAFETY: GetWindowLongPtrW only reads window data; an invalid
        // HWND makes it fail with ERROR_INVALID_WINDOW_HANDLE.
        let style = unsafe { GetWindowLongPtrW(hwnd(window), GWL_EXSTYLE) };
        if style == 0
            && let Some(e) = zero_result_error()
        {
            return Err(e);
        }
        Ok(style as u32)
    }

    fn set_ex_style(&self, window: WindowHandle, style: u32) -> PlatformResult<()> {
        clear_last_error();
        // SAFETY: GWL_EXSTYLE holds plain flags; no pointers are stored.
        let previous = unsafe { SetWindowLongPtrW(hwnd(window), GWL_EXSTYLE, style as isize) };
        if previous == 0
            && let Some(e) = zero_result_error()
        {
            return Err(e);
        }
        Ok(())
    }

    fn style_bit(&self, flag: StyleFlag) -> u32 {
        match flag {
            StyleFlag::Layered => WS_EX_LAYERED.0,
            StyleFlag::PassThroughInput => WS_EX_TRANSPARENT.0,
            StyleFlag::NoRedirectionBitmap => WS_EX_NOREDIRECTIONBITMAP.0,
        }
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> PlatformResult<()> {
        // SAFETY: Only meaningful on a layered window; on any other
        // window the call fails and we report that.
        unsafe { SetLayeredWindowAttributes(hwnd(window), COLORREF(0), alpha, LWA_ALPHA) }
            .map_err(from_windows)
    }

    fn alpha(&self, window: WindowHandle) -> PlatformResult<Option<u8>> {
        let mut alpha = 0u8;
        let mut flags = LAYERED_WINDOW_ATTRIBUTES_FLAGS(0);
        // SAFETY: Both out-pointers refer to live locals.
        unsafe {
            GetLayeredWindowAttributes(hwnd(window), None, Some(&mut alpha), Some(&mut flags))
        }
        .map_err(from_windows)?;
        Ok((flags.0 & LWA_ALPHA.0 != 0).then_some(alpha))
    }

    fn set_cloak(
        &self,
        window: WindowHandle,
        method: CloakMethod,
        cloaked: bool,
    ) -> PlatformResult<()> {
        match method {
            CloakMethod::Dwm => {
                let value = u32::from(cloaked);
                // SAFETY: DWMWA_CLOAK takes a 4-byte BOOL; `value` outlives the call.
                unsafe {
                    DwmSetWindowAttribute(
                        hwnd(window),
                        DWMWA_CLOAK,
                        &value as *const u32 as *const c_void,
                        mem::size_of::<u32>() as u32,
                    )
                }
                .map_err(from_windows)
            }
            CloakMethod::DisplayAffinity => {
                let affinity = if cloaked {
                    WDA_EXCLUDEFROMCAPTURE
                } else {
                    WDA_NONE
                };
                // SAFETY: Plain attribute write on a window handle.
                unsafe { SetWindowDisplayAffinity(hwnd(window), affinity) }.map_err(from_windows)
            }
        }
    }

    fn is_cloaked(&self, window: WindowHandle, method: CloakMethod) -> PlatformResult<bool> {
        match method {
            CloakMethod::Dwm => {
                let mut value = 0u32;
                // SAFETY: DWMWA_CLOAKED writes a 4-byte reason mask into `value`.
                unsafe {
                    DwmGetWindowAttribute(
                        hwnd(window),
                        DWMWA_CLOAKED,
                        &mut value as *mut u32 as *mut c_void,
                        mem::size_of::<u32>() as u32,
                    )
                }
                .map_err(from_windows)?;
                Ok(value != 0)
            }
            CloakMethod::DisplayAffinity => {
                let mut affinity = 0u32;
                // SAFETY: `affinity` outlives the call.
                unsafe { GetWindowDisplayAffinity(hwnd(window), &mut affinity) }
                    .map_err(from_windows)?;
                Ok(affinity == WDA_EXCLUDEFROMCAPTURE.0)
            }
        }
    }

    fn owner_process(&self, window: WindowHandle) -> PlatformResult<u32> {
        owner_pid(hwnd(window)).ok_or_else(|| {
            zero_result_error().unwrap_or_else(|| PlatformError::new(0, "window has no owner"))
        })
    }
}

/// Returns the ID of the process that created `hwnd`, if it still exists.
pub(crate) fn owner_pid(hwnd: HWND) -> Option<u32> {
    let mut pid = 0u32;
    clear_last_error();
    // SAFETY: GetWindowThreadProcessId writes the PID into `pid` and
    // returns 0 for an invalid handle.
    let thread = unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    (thread != 0 && pid != 0).then_some(pid)
}
