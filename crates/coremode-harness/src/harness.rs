//! Suite orchestration.
//!
//! Probe order is fixed: prctl transition, syscall transition, the
//! enable/disable/re-enable cycle, then the bypass demonstration. Each probe
//! re-queries the mode itself, so a mode left behind by an earlier failure
//! surfaces as that probe's own skip instead of a cascade of errors.

use std::io::Write;

use coremode_sys::kernel;

use crate::bypass::run_bypass_probe;
use crate::cycle::run_cycle;
use crate::gate;
use crate::outcome::{TransitionFault, TransitionOutcome};
use crate::report::Reporter;
use crate::surface::{ControlSurface, PrctlSurface, SeccompSyscallSurface};
use crate::transition::probe_core_transition;

/// Runs the whole suite against the live kernel, narrating into `report`.
pub fn run<W: Write>(report: &mut Reporter<W>) {
    let release = kernel::release();
    let mut primary = PrctlSurface;
    let mut secondary = SeccompSyscallSurface;
    run_with(&mut primary, &mut secondary, release.as_deref(), report);
}

/// Drives the suite over the given surfaces.
///
/// The prctl surface is the primary: it carries the cycle and the bypass
/// probe, while the syscall surface only gets the single transition probe.
/// Both surfaces must talk to the same thread for the residual-mode
/// bookkeeping to hold.
pub fn run_with<W: Write>(
    primary: &mut dyn ControlSurface,
    secondary: &mut dyn ControlSurface,
    kernel: Option<&str>,
    report: &mut Reporter<W>,
) {
    report.suite_header(kernel);
    gate::raise_no_new_privs(report);

    report.section("Testing SECCOMP_MODE_CORE via prctl...");
    let primary_outcome = probe_core_transition(primary, report, false);

    report.section("Testing SECCOMP_SET_MODE_CORE via syscall...");
    let prior = primary_outcome.performed_transition();
    let secondary_outcome = probe_core_transition(secondary, report, prior);

    if let Some(message) = divergence(&primary_outcome, &secondary_outcome) {
        report.divergence(&message);
    }

    report.section("Testing enable/disable/re-enable cycle via prctl...");
    let prior = prior || secondary_outcome.performed_transition();
    run_cycle(primary, report, prior);

    report.section("Testing that security checks are bypassed in core mode...");
    run_bypass_probe(primary, report);

    report.footer();
}

/// Compares what the two surfaces proved about kernel support. `None` when
/// they agree, or when either probe skipped and nothing was learned.
fn divergence(primary: &TransitionOutcome, secondary: &TransitionOutcome) -> Option<String> {
    match (primary, secondary) {
        (
            TransitionOutcome::Success,
            TransitionOutcome::ExpectedUnsupported(errno)
            | TransitionOutcome::UnexpectedFailure(TransitionFault::Rejected(errno)),
        ) => Some(format!(
            "Core mode accepted via prctl but rejected via syscall (errno={})",
            errno.raw_os_error()
        )),
        (
            TransitionOutcome::ExpectedUnsupported(errno)
            | TransitionOutcome::UnexpectedFailure(TransitionFault::Rejected(errno)),
            TransitionOutcome::Success,
        ) => Some(format!(
            "Core mode accepted via syscall but rejected via prctl (errno={})",
            errno.raw_os_error()
        )),
        _ => None,
    }
}
