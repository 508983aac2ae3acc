//! Scripted control surfaces for exercising probe logic without touching
//! the live kernel.

use std::cell::RefCell;
use std::rc::Rc;

use coremode_sys::seccomp::{SECCOMP_MODE_CORE, SECCOMP_MODE_DISABLED};
use rustix::io::Errno;

use crate::surface::ControlSurface;

/// Mode word plus counters, shared by every surface scripted over it.
#[derive(Debug)]
pub struct FakeKernel {
    pub mode: i32,
    pub enters: usize,
}

impl FakeKernel {
    pub fn disabled() -> Rc<RefCell<FakeKernel>> {
        Self::at_mode(SECCOMP_MODE_DISABLED)
    }

    pub fn at_mode(mode: i32) -> Rc<RefCell<FakeKernel>> {
        Rc::new(RefCell::new(FakeKernel { mode, enters: 0 }))
    }
}

/// A [`ControlSurface`] whose behaviour is scripted per test. The default is
/// a conformant kernel: every request is honoured and read-back agrees.
pub struct ScriptedSurface {
    kernel: Rc<RefCell<FakeKernel>>,
    name: &'static str,
    suffix: &'static str,
    /// Refuse `enter_core` with this errno, leaving the mode unchanged.
    pub enter_error: Option<Errno>,
    /// Refuse `leave_core` with this errno, leaving the mode unchanged.
    pub leave_error: Option<Errno>,
    /// Refuse every `enter_core` after the first with this errno.
    pub fail_reenter: Option<Errno>,
    /// Fail `query` with this errno.
    pub fail_query: Option<Errno>,
    /// Accept `enter_core` without actually changing the mode.
    pub lie_on_enter: bool,
}

impl ScriptedSurface {
    pub fn prctl(kernel: &Rc<RefCell<FakeKernel>>) -> ScriptedSurface {
        Self::with_names(kernel, "prctl", "")
    }

    pub fn syscall(kernel: &Rc<RefCell<FakeKernel>>) -> ScriptedSurface {
        Self::with_names(kernel, "syscall", " via syscall")
    }

    fn with_names(
        kernel: &Rc<RefCell<FakeKernel>>,
        name: &'static str,
        suffix: &'static str,
    ) -> ScriptedSurface {
        ScriptedSurface {
            kernel: Rc::clone(kernel),
            name,
            suffix,
            enter_error: None,
            leave_error: None,
            fail_reenter: None,
            fail_query: None,
            lie_on_enter: false,
        }
    }
}

impl ControlSurface for ScriptedSurface {
    fn name(&self) -> &'static str {
        self.name
    }

    fn suffix(&self) -> &'static str {
        self.suffix
    }

    fn query(&mut self) -> Result<i32, Errno> {
        if let Some(errno) = self.fail_query {
            return Err(errno);
        }
        Ok(self.kernel.borrow().mode)
    }

    fn enter_core(&mut self) -> Result<(), Errno> {
        if let Some(errno) = self.enter_error {
            return Err(errno);
        }
        let mut kernel = self.kernel.borrow_mut();
        if let Some(errno) = self.fail_reenter {
            if kernel.enters > 0 {
                return Err(errno);
            }
        }
        kernel.enters += 1;
        if !self.lie_on_enter {
            kernel.mode = SECCOMP_MODE_CORE;
        }
        Ok(())
    }

    fn leave_core(&mut self) -> Result<(), Errno> {
        if let Some(errno) = self.leave_error {
            return Err(errno);
        }
        self.kernel.borrow_mut().mode = SECCOMP_MODE_DISABLED;
        Ok(())
    }
}
