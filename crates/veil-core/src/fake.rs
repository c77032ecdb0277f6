//! In-memory desktop used by the unit tests.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::WindowHandle;
use crate::platform::{CloakMethod, PlatformError, PlatformResult, Sleep, StyleFlag, WindowSystem};

// Deliberately different from any real platform's values.
pub(crate) const LAYERED: u32 = 0x01;
pub(crate) const PASS_THROUGH: u32 = 0x02;
pub(crate) const NO_REDIRECTION: u32 = 0x04;
pub(crate) const PRE_EXISTING: u32 = 0x100;

pub(crate) const HANDLE: WindowHandle = WindowHandle::from_raw(0x2A);
pub(crate) const OWNER_PID: u32 = 4321;

/// Which calls should fail, and with what.
#[derive(Default)]
pub(crate) struct Failures {
    pub find: Option<PlatformError>,
    pub get_style: Option<PlatformError>,
    pub set_style: Option<PlatformError>,
    pub alpha: Option<PlatformError>,
    pub cloak: Option<PlatformError>,
    pub owner: Option<PlatformError>,
}

/// A desktop holding one window titled `title`.
///
/// The window only becomes findable once `hidden_for` lookups have
/// already been made, which simulates a target still starting up.
pub(crate) struct FakeDesktop {
    pub title: String,
    pub hidden_for: u32,
    pub fail: Failures,
    pub lookups: Cell<u32>,
    pub ex_style: Cell<u32>,
    pub alpha: Cell<Option<u8>>,
    pub dwm_cloaked: Cell<bool>,
    pub affinity_excluded: Cell<bool>,
    pub calls: RefCell<Vec<&'static str>>,
}

impl FakeDesktop {
    pub(crate) fn new(title: &str) -> Self {
        Self {
            title: title.into(),
            hidden_for: 0,
            fail: Failures::default(),
            lookups: Cell::new(0),
            ex_style: Cell::new(PRE_EXISTING),
            alpha: Cell::new(None),
            dwm_cloaked: Cell::new(false),
            affinity_excluded: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A desktop where no window ever matches.
    pub(crate) fn empty() -> Self {
        Self {
            hidden_for: u32::MAX,
            ..Self::new("")
        }
    }

    pub(crate) fn hidden_for(mut self, lookups: u32) -> Self {
        self.hidden_for = lookups;
        self
    }

    pub(crate) fn failing(mut self, fail: Failures) -> Self {
        self.fail = fail;
        self
    }

    pub(crate) fn called(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|c| *c == name)
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }

    fn check(&self, window: WindowHandle) -> PlatformResult<()> {
        if window == HANDLE {
            Ok(())
        } else {
            Err(PlatformError::new(1400, "Invalid window handle."))
        }
    }

    fn fail_with(err: &Option<PlatformError>) -> PlatformResult<()> {
        match err {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl WindowSystem for FakeDesktop {
    fn find_window(&self, title: &str) -> PlatformResult<Option<WindowHandle>> {
        self.record("find_window");
        let seen = self.lookups.get();
        self.lookups.set(seen + 1);
        Self::fail_with(&self.fail.find)?;
        if seen >= self.hidden_for && title == self.title {
            Ok(Some(HANDLE))
        } else {
            Ok(None)
        }
    }

    fn ex_style(&self, window: WindowHandle) -> PlatformResult<u32> {
        self.record("ex_style");
        self.check(window)?;
        Self::fail_with(&self.fail.get_style)?;
        Ok(self.ex_style.get())
    }

    fn set_ex_style(&self, window: WindowHandle, style: u32) -> PlatformResult<()> {
        self.record("set_ex_style");
        self.check(window)?;
        Self::fail_with(&self.fail.set_style)?;
        self.ex_style.set(style);
        Ok(())
    }

    fn style_bit(&self, flag: StyleFlag) -> u32 {
        match flag {
            StyleFlag::Layered => LAYERED,
            StyleFlag::PassThroughInput => PASS_THROUGH,
            StyleFlag::NoRedirectionBitmap => NO_REDIRECTION,
        }
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> PlatformResult<()> {
        self.record("set_alpha");
        self.check(window)?;
        Self::fail_with(&self.fail.alpha)?;
        self.alpha.set(Some(alpha));
        Ok(())
    }

    fn alpha(&self, window: WindowHandle) -> PlatformResult<Option<u8>> {
        self.check(window)?;
        Ok(self.alpha.get())
    }

    fn set_cloak(
        &self,
        window: WindowHandle,
        method: CloakMethod,
        cloaked: bool,
    ) -> PlatformResult<()> {
        self.record("set_cloak");
        self.check(window)?;
        Self::fail_with(&self.fail.cloak)?;
        match method {
            CloakMethod::Dwm => self.dwm_cloaked.set(cloaked),
            CloakMethod::DisplayAffinity => self.affinity_excluded.set(cloaked),
        }
        Ok(())
    }

    fn is_cloaked(&self, window: WindowHandle, method: CloakMethod) -> PlatformResult<bool> {
        self.check(window)?;
        Ok(match method {
            CloakMethod::Dwm => self.dwm_cloaked.get(),
            CloakMethod::DisplayAffinity => self.affinity_excluded.get(),
        })
    }

    fn owner_process(&self, window: WindowHandle) -> PlatformResult<u32> {
        self.record("owner_process");
        self.check(window)?;
        Self::fail_with(&self.fail.owner)?;
        Ok(OWNER_PID)
    }
}

/// Records every requested pause instead of sleeping.
#[derive(Default)]
pub(crate) struct RecordingSleep {
    pub pauses: RefCell<Vec<Duration>>,
}

impl RecordingSleep {
    pub(crate) fn count(&self) -> usize {
        self.pauses.borrow().len()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}

pub(crate) fn access_denied() -> PlatformError {
    PlatformError::new(0x8007_0005_u32 as i32, "Access is denied.")
}
