//! Command-line spellings of core enums.

use clap::ValueEnum;

use veil_core::config::Preset;
use veil_core::{CloakMethod, StyleMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    /// Layered only
    Layered,
    /// Layered without a compositor redirection surface
    NoRedirection,
    /// Layered and transparent to mouse input
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CloakArg {
    /// Compositor cloak attribute
    Dwm,
    /// Exclude-from-capture display affinity
    DisplayAffinity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// No-redirection, opaque, cloaked
    A,
    /// Like `a`, with per-step tracing on stderr
    B,
    /// Click-through at 190 alpha, cloaked, 10 lookups 500 ms apart
    C,
    /// Layered only at 180 alpha, cloaked
    D,
}

impl From<StyleArg> for StyleMode {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Layered => StyleMode::Layered,
            StyleArg::NoRedirection => StyleMode::NoRedirection,
            StyleArg::PassThrough => StyleMode::PassThrough,
        }
    }
}

impl From<CloakArg> for CloakMethod {
    fn from(arg: CloakArg) -> Self {
        match arg {
            CloakArg::Dwm => CloakMethod::Dwm,
            CloakArg::DisplayAffinity => CloakMethod::DisplayAffinity,
        }
    }
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::A => Preset::A,
            PresetArg::B => Preset::B,
            PresetArg::C => Preset::C,
            PresetArg::D => Preset::D,
        }
    }
}
