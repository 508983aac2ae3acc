//! Pure classification of a transition attempt plus its read-back.
//!
//! No syscalls happen here: the probes feed in what the control surface
//! returned and narrate whatever comes out.

use rustix::io::Errno;

use crate::outcome::{TransitionFault, TransitionOutcome};

/// Raw mode value reported when the mode query itself failed, mirroring the
/// -1 a failed `prctl(PR_GET_SECCOMP)` returns to C callers.
pub const MODE_QUERY_FAILED: i32 = -1;

/// True for rejections that mean the kernel simply does not know core mode:
/// `EINVAL` for an unrecognized mode value or operation number, `ENOSYS` for
/// kernels without the `seccomp(2)` syscall at all.
pub fn is_unsupported(errno: Errno) -> bool {
    errno == Errno::INVAL || errno == Errno::NOSYS
}

/// Classifies one SET attempt against the read-back that followed it.
///
/// The read-back, not the attempt's return value, decides success: an
/// accepted request whose queried mode disagrees with `target` is a fault in
/// the feature, never a silent success.
pub fn classify_set_attempt(
    attempt: Result<(), Errno>,
    readback: Result<i32, Errno>,
    target: i32,
) -> TransitionOutcome {
    match attempt {
        Err(errno) if is_unsupported(errno) => TransitionOutcome::ExpectedUnsupported(errno),
        Err(errno) => TransitionOutcome::UnexpectedFailure(TransitionFault::Rejected(errno)),
        Ok(()) => match readback {
            Ok(mode) if mode == target => TransitionOutcome::Success,
            Ok(mode) => TransitionOutcome::UnexpectedFailure(TransitionFault::Mismatch {
                expected: target,
                got: mode,
            }),
            Err(_) => TransitionOutcome::UnexpectedFailure(TransitionFault::Mismatch {
                expected: target,
                got: MODE_QUERY_FAILED,
            }),
        },
    }
}
