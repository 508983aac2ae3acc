//! Kernel-conformance harness for the seccomp core-mode surfaces.
//!
//! The harness drives the two userspace entry points for
//! `SECCOMP_MODE_CORE`, `prctl(PR_SET_SECCOMP)` and
//! `seccomp(SECCOMP_SET_MODE_CORE)`, against the running kernel and
//! narrates what it finds. Rejection by a kernel without core mode is an
//! expected result, not a failure. On a kernel that claims support the
//! harness checks that the requested mode reads back and survives an
//! enable/disable/re-enable cycle, and that a confined thread can still
//! obtain executable memory.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bypass`] | RWX mapping demonstration under core mode |
//! | [`classify`] | Attempt plus read-back to outcome |
//! | [`cycle`] | Enable, disable, re-enable verification |
//! | [`gate`] | `no_new_privs`, raised before any probe |
//! | [`harness`] | Probe ordering and divergence detection |
//! | [`mode`] | Decoded seccomp mode values |
//! | [`outcome`] | Outcome and fault types |
//! | [`report`] | Narration sink and tally |
//! | [`surface`] | The two control surfaces |
//! | [`transition`] | Single enter-verify-restore probes |
//!
//! All narration goes through [`report::Reporter`]; diagnostics that are
//! not part of the narration contract go to `tracing` at debug level.

pub mod bypass;
pub mod classify;
pub mod cycle;
pub mod gate;
pub mod harness;
pub mod mode;
pub mod outcome;
pub mod report;
pub mod surface;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_util;

pub use harness::{run, run_with};
pub use report::{Reporter, Tally};
