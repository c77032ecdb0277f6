//! The narrow set of windowing-system calls the core depends on.
//!
//! Each platform crate (e.g. `veil-windows`) implements [`WindowSystem`]
//! for its desktop. Attribute IDs and style bit values live behind this
//! trait so the locate and mutate logic can run against a fake desktop.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::WindowHandle;

/// A failed OS call, with the status code the platform reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// Platform status code (an `HRESULT` on Windows).
    pub code: i32,
    pub message: String,
}

impl PlatformError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The error every call returns on hosts without a supported windowing API.
    pub fn unsupported() -> Self {
        Self::new(0, "window management is not supported on this platform")
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.trim_end();
        if self.code == 0 {
            write!(f, "{message}")
        } else {
            write!(f, "{message} (0x{:08X})", self.code as u32)
        }
    }
}

impl std::error::Error for PlatformError {}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// An extended-style bit, named by what it does.
///
/// Platforms translate these to their own bitmask values through
/// [`WindowSystem::style_bit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    /// Window is composited with a separate alpha-blended surface.
    Layered,
    /// Pointer input falls through to whatever is underneath.
    PassThroughInput,
    /// The compositor does not keep an offscreen redirection surface.
    NoRedirectionBitmap,
}

impl StyleFlag {
    pub const ALL: [StyleFlag; 3] = [
        StyleFlag::Layered,
        StyleFlag::PassThroughInput,
        StyleFlag::NoRedirectionBitmap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Layered => "layered",
            Self::PassThroughInput => "pass-through",
            Self::NoRedirectionBitmap => "no-redirection",
        }
    }
}

/// How a window is removed from screen capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloakMethod {
    /// The compositor cloak attribute.
    #[default]
    Dwm,
    /// Exclude-from-capture display affinity. The window stays on screen
    /// but capture APIs see nothing where it is.
    DisplayAffinity,
}

impl CloakMethod {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dwm => "dwm",
            Self::DisplayAffinity => "display-affinity",
        }
    }
}

/// Windowing-system operations on windows owned by other processes.
///
/// Every method that takes a [`WindowHandle`] must treat it as possibly
/// stale and report failure instead of panicking.
pub trait WindowSystem {
    /// Finds a top-level window whose title is exactly `title`.
    ///
    /// Returns `Ok(None)` when no such window exists right now.
    fn find_window(&self, title: &str) -> PlatformResult<Option<WindowHandle>>;

    /// Reads the extended-style bitmask.
    fn ex_style(&self, window: WindowHandle) -> PlatformResult<u32>;

    /// Overwrites the extended-style bitmask.
    fn set_ex_style(&self, window: WindowHandle, style: u32) -> PlatformResult<()>;

    /// Returns this platform's bit value for `flag`.
    fn style_bit(&self, flag: StyleFlag) -> u32;

    /// Sets the window-wide alpha (0 transparent, 255 opaque).
    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> PlatformResult<()>;

    /// Reads the window-wide alpha, or `None` if no alpha is in effect.
    fn alpha(&self, window: WindowHandle) -> PlatformResult<Option<u8>>;

    /// Turns capture exclusion on or off.
    fn set_cloak(&self, window: WindowHandle, method: CloakMethod, cloaked: bool)
    -> PlatformResult<()>;

    /// Reports whether capture exclusion is in effect.
    fn is_cloaked(&self, window: WindowHandle, method: CloakMethod) -> PlatformResult<bool>;

    /// Returns the ID of the process that owns the window.
    fn owner_process(&self, window: WindowHandle) -> PlatformResult<u32>;
}

/// Blocking pause between locate attempts.
pub trait Sleep {
    fn sleep(&self, duration: Duration);
}

/// [`Sleep`] backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
