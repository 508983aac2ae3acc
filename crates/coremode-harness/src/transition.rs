//! Core-mode transition probes over one control surface.
//!
//! Discipline per probe: query, attempt, query again, classify. When the
//! transition verified, the thread is returned to disabled so the next probe
//! starts from the documented initial state. The kernel is the only source
//! of truth here; the mode is re-queried at every decision point, never
//! carried over from an earlier probe.

use std::io::Write;

use coremode_sys::seccomp::{SECCOMP_MODE_CORE, SECCOMP_MODE_DISABLED};
use rustix::io::Errno;

use crate::classify::{MODE_QUERY_FAILED, classify_set_attempt};
use crate::mode::SeccompMode;
use crate::outcome::{SkipReason, TransitionFault, TransitionOutcome};
use crate::report::Reporter;
use crate::surface::ControlSurface;

/// Queries the surface, narrates the observed mode, and decides whether a
/// transition may be attempted. `prior_transition` only words the skip: it
/// distinguishes confinement this run left behind from confinement that was
/// already there when the harness started.
pub(crate) fn preflight<W: Write>(
    surface: &mut dyn ControlSurface,
    report: &mut Reporter<W>,
    prior_transition: bool,
) -> Result<(), SkipReason> {
    let queried = surface.query();
    report.line(&format!("Current seccomp mode: {}", raw_mode(&queried)));
    let reason = match queried {
        Err(errno) => SkipReason::QueryFailed(errno),
        Ok(SECCOMP_MODE_DISABLED) => return Ok(()),
        Ok(mode) if prior_transition => SkipReason::ResidualMode(SeccompMode::from_raw(mode)),
        Ok(mode) => SkipReason::AlreadyConfined(SeccompMode::from_raw(mode)),
    };
    tracing::debug!(surface = surface.name(), reason = %reason, "transition ruled out");
    report.skip(&reason.to_string());
    Err(reason)
}

pub(crate) fn raw_mode(queried: &Result<i32, Errno>) -> i32 {
    match queried {
        Ok(mode) => *mode,
        Err(_) => MODE_QUERY_FAILED,
    }
}

/// Probes DISABLED -> CORE through `surface`, narrating as it goes.
///
/// A verified entry is followed by a restore to disabled; a restore that
/// leaves some other mode behind is narrated as an error, and later probes
/// will see the residue in their own pre-query.
pub fn probe_core_transition<W: Write>(
    surface: &mut dyn ControlSurface,
    report: &mut Reporter<W>,
    prior_transition: bool,
) -> TransitionOutcome {
    if let Err(reason) = preflight(surface, report, prior_transition) {
        return TransitionOutcome::Skipped(reason);
    }

    let attempt = surface.enter_core();
    let readback = surface.query();
    let outcome = classify_set_attempt(attempt, readback, SECCOMP_MODE_CORE);

    match &outcome {
        TransitionOutcome::Success => {
            report.success(&format!("Core mode enabled{}", surface.suffix()));
            report.success(&format!("Core mode verified{}", surface.suffix()));
            restore_disabled(surface, report);
        }
        TransitionOutcome::ExpectedUnsupported(errno) => {
            report.expected(&format!(
                "Core mode not supported{} (errno={})",
                surface.suffix(),
                errno.raw_os_error()
            ));
        }
        TransitionOutcome::UnexpectedFailure(fault) => {
            report.error(&fault.to_string());
        }
        // classify_set_attempt never skips; the preflight above already did.
        TransitionOutcome::Skipped(reason) => {
            report.skip(&reason.to_string());
        }
    }
    outcome
}

/// Returns the thread to disabled after a verified entry. Judged by
/// read-back like every other transition in the harness.
fn restore_disabled<W: Write>(surface: &mut dyn ControlSurface, report: &mut Reporter<W>) {
    if let Err(errno) = surface.leave_core() {
        tracing::debug!(
            surface = surface.name(),
            errno = errno.raw_os_error(),
            "disable request refused"
        );
    }
    match surface.query() {
        Ok(SECCOMP_MODE_DISABLED) => {
            tracing::debug!(surface = surface.name(), "returned to disabled");
        }
        readback => {
            let fault = TransitionFault::Mismatch {
                expected: SECCOMP_MODE_DISABLED,
                got: raw_mode(&readback),
            };
            report.error(&fault.to_string());
        }
    }
}
