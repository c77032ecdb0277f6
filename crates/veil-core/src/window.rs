use std::fmt;
use std::str::FromStr;

/// An opaque reference to a top-level window owned by another process.
///
/// The OS owns the window, not us. A handle is only a snapshot taken at
/// lookup time: the owning process may destroy the window at any moment,
/// so every call made through a handle can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// Wraps a raw pointer-sized handle value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl FromStr for WindowHandle {
    type Err = String;

    /// Parses a handle written as decimal or as hex with a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            usize::from_str_radix(hex, 16)
        } else {
            s.parse()
        };
        raw.map(Self)
            .map_err(|e| format!("invalid window handle \"{s}\": {e}"))
    }
}

/// A titled top-level window as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    /// Owning process, when the OS would tell us.
    pub pid: Option<u32>,
}
