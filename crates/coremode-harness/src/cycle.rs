//! Enable, disable, re-enable cycle over one control surface.
//!
//! Catches the two regressions a single transition probe cannot: core mode
//! that turns out to be one-way, and core mode that cannot be re-entered
//! after a clean disable. Every step is judged by read-back; the attempt's
//! own return value only feeds diagnostics.

use std::io::Write;

use coremode_sys::seccomp::{SECCOMP_MODE_CORE, SECCOMP_MODE_DISABLED};
use rustix::io::Errno;

use crate::classify::is_unsupported;
use crate::outcome::{SkipReason, TransitionFault};
use crate::report::Reporter;
use crate::surface::ControlSurface;
use crate::transition::{preflight, raw_mode};

/// The three cycle steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    Enable,
    Disable,
    Reenable,
}

/// How the cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All three steps verified. The thread is left in core mode.
    Completed,
    /// Step one was refused because the kernel lacks core mode.
    Unsupported(Errno),
    /// A step that had to hold did not; the cycle stopped there.
    Halted {
        step: CycleStep,
        fault: TransitionFault,
    },
    /// The starting mode ruled the cycle out.
    Skipped(SkipReason),
}

impl CycleOutcome {
    /// True if the kernel accepted at least one mode change.
    pub fn performed_transition(&self) -> bool {
        match self {
            Self::Completed => true,
            Self::Halted { step, fault } => {
                !(*step == CycleStep::Enable && matches!(fault, TransitionFault::Rejected(_)))
            }
            Self::Unsupported(_) | Self::Skipped(_) => false,
        }
    }
}

/// Drives DISABLED -> CORE -> DISABLED -> CORE, verifying after each step.
///
/// On full success the thread is deliberately left in core mode: the bypass
/// probe that follows needs the mode active, and it dies with the process
/// anyway.
pub fn run_cycle<W: Write>(
    surface: &mut dyn ControlSurface,
    report: &mut Reporter<W>,
    prior_transition: bool,
) -> CycleOutcome {
    if let Err(reason) = preflight(surface, report, prior_transition) {
        return CycleOutcome::Skipped(reason);
    }

    // Step one: enter core mode.
    if let Err(errno) = surface.enter_core() {
        let residue = raw_mode(&surface.query());
        tracing::debug!(errno = errno.raw_os_error(), mode = residue, "enable refused");
        if is_unsupported(errno) {
            report.expected(&format!(
                "Core mode not supported (errno={})",
                errno.raw_os_error()
            ));
            return CycleOutcome::Unsupported(errno);
        }
        let fault = TransitionFault::Rejected(errno);
        report.error(&fault.to_string());
        return CycleOutcome::Halted {
            step: CycleStep::Enable,
            fault,
        };
    }
    if let Some(fault) = verify(surface, SECCOMP_MODE_CORE) {
        report.error(&fault.to_string());
        return CycleOutcome::Halted {
            step: CycleStep::Enable,
            fault,
        };
    }
    report.success("Core mode enabled");

    // Step two: back to disabled. A mode that sticks here is one-way, the
    // regression this cycle exists to catch.
    if let Err(errno) = surface.leave_core() {
        tracing::debug!(errno = errno.raw_os_error(), "disable request refused");
    }
    if let Some(fault) = verify(surface, SECCOMP_MODE_DISABLED) {
        report.error(&fault.to_string());
        report.line("Core mode is one-way on this kernel");
        return CycleOutcome::Halted {
            step: CycleStep::Disable,
            fault,
        };
    }
    report.success("Core mode disabled");

    // Step three: enter again from the mode step two restored.
    if let Err(errno) = surface.enter_core() {
        tracing::debug!(errno = errno.raw_os_error(), "re-enable request refused");
    }
    if let Some(fault) = verify(surface, SECCOMP_MODE_CORE) {
        report.error(&fault.to_string());
        report.line("Core mode re-entry failed after disable");
        return CycleOutcome::Halted {
            step: CycleStep::Reenable,
            fault,
        };
    }
    report.success("Core mode re-enabled");

    CycleOutcome::Completed
}

/// Read-back check for one step. `None` when the queried mode matches the
/// step's target.
fn verify(surface: &mut dyn ControlSurface, target: i32) -> Option<TransitionFault> {
    match surface.query() {
        Ok(mode) if mode == target => None,
        readback => Some(TransitionFault::Mismatch {
            expected: target,
            got: raw_mode(&readback),
        }),
    }
}
