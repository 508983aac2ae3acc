//! The two control surfaces for the seccomp mode.
//!
//! `prctl(2)` and `seccomp(2)` are supposed to be equivalent ways of
//! entering core mode; probing them through one trait keeps the probes
//! identical so any difference in outcome is the kernel's, not the
//! harness's. Only prctl can query the mode or return to disabled, so both
//! surfaces read back and restore through it.

use coremode_sys::seccomp;
use rustix::io::Errno;

/// One kernel entry point for querying and changing the seccomp mode.
pub trait ControlSurface {
    /// Surface name for diagnostics.
    fn name(&self) -> &'static str;

    /// Suffix appended to narration lines, `" via syscall"` style.
    fn suffix(&self) -> &'static str;

    /// Reads the current mode.
    fn query(&mut self) -> Result<i32, Errno>;

    /// Requests entry into core mode.
    fn enter_core(&mut self) -> Result<(), Errno>;

    /// Requests return to disabled.
    fn leave_core(&mut self) -> Result<(), Errno>;
}

/// The general process-control channel: `prctl(PR_SET_SECCOMP)`.
#[derive(Debug, Default)]
pub struct PrctlSurface;

impl ControlSurface for PrctlSurface {
    fn name(&self) -> &'static str {
        "prctl"
    }

    fn suffix(&self) -> &'static str {
        ""
    }

    fn query(&mut self) -> Result<i32, Errno> {
        seccomp::current_mode()
    }

    fn enter_core(&mut self) -> Result<(), Errno> {
        seccomp::set_mode(seccomp::SECCOMP_MODE_CORE)
    }

    fn leave_core(&mut self) -> Result<(), Errno> {
        seccomp::set_mode(seccomp::SECCOMP_MODE_DISABLED)
    }
}

/// The dedicated syscall: `seccomp(SECCOMP_SET_MODE_CORE, 0, NULL)`.
#[derive(Debug, Default)]
pub struct SeccompSyscallSurface;

impl ControlSurface for SeccompSyscallSurface {
    fn name(&self) -> &'static str {
        "syscall"
    }

    fn suffix(&self) -> &'static str {
        " via syscall"
    }

    fn query(&mut self) -> Result<i32, Errno> {
        seccomp::current_mode()
    }

    fn enter_core(&mut self) -> Result<(), Errno> {
        seccomp::seccomp_set_mode_core()
    }

    fn leave_core(&mut self) -> Result<(), Errno> {
        seccomp::set_mode(seccomp::SECCOMP_MODE_DISABLED)
    }
}
