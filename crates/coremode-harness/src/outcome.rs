//! Outcome classification for mode transition probes.
//!
//! Every control-surface attempt ends in exactly one of these shapes, and
//! the narration for the failure shapes comes from their `Display` impls so
//! every probe reports a given defect with the same words.

use rustix::io::Errno;
use thiserror::Error;

use crate::mode::SeccompMode;

/// How a single core-mode transition probe ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The kernel accepted the request and read-back confirmed core mode.
    Success,
    /// The kernel does not implement core mode.
    ExpectedUnsupported(Errno),
    /// A failure that points at the feature rather than the environment.
    UnexpectedFailure(TransitionFault),
    /// Precondition not met; no transition was attempted.
    Skipped(SkipReason),
}

impl TransitionOutcome {
    /// True if the kernel accepted a mode-changing request during the probe,
    /// meaning a later non-zero mode may be this run's own doing.
    pub fn performed_transition(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::UnexpectedFailure(TransitionFault::Mismatch { .. })
        )
    }
}

/// Faults that count against the feature under test.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionFault {
    /// The kernel refused the request with an errno that does not mean
    /// "mode value unknown".
    #[error("Core mode transition failed (errno={})", .0.raw_os_error())]
    Rejected(Errno),
    /// The request was accepted but read-back disagreed with the target.
    /// `got` is the raw queried mode, or the negative sentinel when the
    /// query itself failed.
    #[error("Expected mode {expected}, got {got}")]
    Mismatch { expected: i32, got: i32 },
}

/// Why a probe declined to attempt its transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkipReason {
    /// The mode query itself failed.
    #[error("Seccomp mode unavailable (errno={})", .0.raw_os_error())]
    QueryFailed(Errno),
    /// Confinement was already active before this run touched anything.
    #[error("Seccomp already enabled")]
    AlreadyConfined(SeccompMode),
    /// A mode set earlier in this run could not be cleared again.
    #[error("Mode {} left by an earlier probe", .0.as_raw())]
    ResidualMode(SeccompMode),
}
