//! Stand-in backend for hosts without the Win32 windowing API.
//!
//! Every call fails with [`PlatformError::unsupported`], so `veil apply`
//! ends with "window not found" and exit code 1.

use veil_core::platform::{CloakMethod, PlatformResult, StyleFlag, WindowSystem};
use veil_core::{PlatformError, WindowHandle, WindowInfo};

#[derive(Debug, Clone, Copy, Default)]
pub struct Desktop;

impl WindowSystem for Desktop {
    fn find_window(&self, _title: &str) -> PlatformResult<Option<WindowHandle>> {
        Err(PlatformError::unsupported())
    }

    fn ex_style(&self, _window: WindowHandle) -> PlatformResult<u32> {
        Err(PlatformError::unsupported())
    }

    fn set_ex_style(&self, _window: WindowHandle, _style: u32) -> PlatformResult<()> {
        Err(PlatformError::unsupported())
    }

    fn style_bit(&self, _flag: StyleFlag) -> u32 {
        0
    }

    fn set_alpha(&self, _window: WindowHandle, _alpha: u8) -> PlatformResult<()> {
        Err(PlatformError::unsupported())
    }

    fn alpha(&self, _window: WindowHandle) -> PlatformResult<Option<u8>> {
        Err(PlatformError::unsupported())
    }

    fn set_cloak(
        &self,
        _window: WindowHandle,
        _method: CloakMethod,
        _cloaked: bool,
    ) -> PlatformResult<()> {
        Err(PlatformError::unsupported())
    }

    fn is_cloaked(&self, _window: WindowHandle, _method: CloakMethod) -> PlatformResult<bool> {
        Err(PlatformError::unsupported())
    }

    fn owner_process(&self, _window: WindowHandle) -> PlatformResult<u32> {
        Err(PlatformError::unsupported())
    }
}

pub fn enumerate_windows() -> Result<Vec<WindowInfo>, PlatformError> {
    Err(PlatformError::unsupported())
}

pub fn wait_for_ctrl_c() -> Result<(), PlatformError> {
    Err(PlatformError::unsupported())
}
