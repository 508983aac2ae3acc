//! Low-level Linux wrappers for the seccomp mode control plane.
//!
//! This crate provides thin wrappers around the two kernel entry points that
//! manipulate a thread's seccomp mode: `prctl(2)` with `PR_GET_SECCOMP` /
//! `PR_SET_SECCOMP`, and the `seccomp(2)` syscall. Mode 3 (core) and its
//! `seccomp(2)` operation are not exposed by rustix or libc, so those calls
//! go through raw `libc::prctl` and `libc::syscall`. For standard syscalls
//! (memory mapping, uname), use rustix.
//!
//! ## Modules
//!
//! - **seccomp** - Mode query and mode transitions via `prctl(2)` and `seccomp(2)`
//! - **mman** - Owned anonymous memory mappings for executable-memory probes
//! - **kernel** - Kernel release string for context reporting
//!
//! # Safety
//!
//! This crate contains raw syscall wrappers. Casts between integer types
//! are unavoidable when interfacing with the kernel ABI.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod kernel;
pub mod mman;
pub mod seccomp;

#[inline]
pub fn last_errno() -> rustix::io::Errno {
    // SAFETY: __errno_location always returns valid thread-local pointer.
    rustix::io::Errno::from_raw_os_error(unsafe { *libc::__errno_location() })
}
