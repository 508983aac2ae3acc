//! Decoded confinement modes.

use std::fmt;

use coremode_sys::seccomp::{
    SECCOMP_MODE_CORE, SECCOMP_MODE_DISABLED, SECCOMP_MODE_FILTER, SECCOMP_MODE_STRICT,
};

/// A seccomp mode as reported by `prctl(PR_GET_SECCOMP)`.
///
/// The kernel owns the authoritative value; this type only decodes what a
/// query returned. Values this harness does not know are carried through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeccompMode {
    Disabled,
    Strict,
    Filter,
    Core,
    Other(i32),
}

impl SeccompMode {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            SECCOMP_MODE_DISABLED => Self::Disabled,
            SECCOMP_MODE_STRICT => Self::Strict,
            SECCOMP_MODE_FILTER => Self::Filter,
            SECCOMP_MODE_CORE => Self::Core,
            other => Self::Other(other),
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Self::Disabled => SECCOMP_MODE_DISABLED,
            Self::Strict => SECCOMP_MODE_STRICT,
            Self::Filter => SECCOMP_MODE_FILTER,
            Self::Core => SECCOMP_MODE_CORE,
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for SeccompMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Strict => write!(f, "strict"),
            Self::Filter => write!(f, "filter"),
            Self::Core => write!(f, "core"),
            Self::Other(other) => write!(f, "mode {other}"),
        }
    }
}
