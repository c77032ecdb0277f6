use std::fmt;

use crate::WindowHandle;
use crate::platform::{CloakMethod, StyleFlag, WindowSystem};

/// A best-effort snapshot of a window's presentation attributes.
///
/// Each field is `None` when the corresponding query failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub handle: WindowHandle,
    pub ex_style: Option<u32>,
    /// Style flags present in `ex_style`.
    pub flags: Vec<StyleFlag>,
    /// `Some(None)` means the query worked but no alpha is in effect.
    pub alpha: Option<Option<u8>>,
    pub cloak_method: CloakMethod,
    pub cloaked: Option<bool>,
    pub owner_pid: Option<u32>,
}

/// Reads back what [`apply_presentation`](crate::present::apply_presentation) sets.
pub fn inspect(
    system: &impl WindowSystem,
    window: WindowHandle,
    cloak_method: CloakMethod,
) -> WindowState {
    let ex_style = system.ex_style(window).ok();
    let flags = ex_style
        .map(|style| {
            StyleFlag::ALL
                .into_iter()
                .filter(|&flag| style & system.style_bit(flag) != 0)
                .collect()
        })
        .unwrap_or_default();

    WindowState {
        handle: window,
        ex_style,
        flags,
        alpha: system.alpha(window).ok(),
        cloak_method,
        cloaked: system.is_cloaked(window, cloak_method).ok(),
        owner_pid: system.owner_process(window).ok(),
    }
}

impl WindowState {
    pub fn has(&self, flag: StyleFlag) -> bool {
        self.flags.contains(&flag)
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "handle    {}", self.handle)?;
        match self.owner_pid {
            Some(pid) => writeln!(f, "owner     PID {pid}")?,
            None => writeln!(f, "owner     unknown")?,
        }
        match self.ex_style {
            Some(style) => {
                let names: Vec<_> = self.flags.iter().map(|flag| flag.name()).collect();
                let names = if names.is_empty() {
                    "none".to_string()
                } else {
                    names.join(", ")
                };
                writeln!(f, "ex-style  0x{style:08X} ({names})")?;
            }
            None => writeln!(f, "ex-style  unreadable")?,
        }
        match self.alpha {
            Some(Some(alpha)) => writeln!(f, "opacity   {alpha}")?,
            Some(None) => writeln!(f, "opacity   not set")?,
            None => writeln!(f, "opacity   unreadable")?,
        }
        let cloaked = match self.cloaked {
            Some(true) => "yes",
            Some(false) => "no",
            None => "unreadable",
        };
        write!(f, "cloaked   {cloaked} ({})", self.cloak_method.name())
    }
}
