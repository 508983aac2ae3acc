//! Seccomp mode control plane.
//!
//! The kernel exposes two entry points for changing a thread's seccomp mode:
//!
//! | Surface | Call | Notes |
//! |---------|------|-------|
//! | prctl | `prctl(PR_SET_SECCOMP, mode, NULL)` | Also the only query path (`PR_GET_SECCOMP`) |
//! | seccomp | `seccomp(SECCOMP_SET_MODE_CORE, 0, NULL)` | One operation per mode, no query, no disable |
//!
//! Modes 0 (disabled), 1 (strict) and 2 (filter) are long-standing kernel
//! ABI; strict and filter are one-way. Mode 3 (core) is the revocable mode
//! probed by this workspace. Kernels that do not implement it reject both
//! entry points with `EINVAL`, exactly as they reject any unknown mode.
//!
//! No wrapper for entering strict or filter mode is provided here: either
//! would confine the calling process with no way back.

use rustix::io::Errno;

use crate::last_errno;

/// Seccomp is not in use.
pub const SECCOMP_MODE_DISABLED: i32 = 0;
/// Legacy read/write/exit/sigreturn confinement. One-way.
pub const SECCOMP_MODE_STRICT: i32 = 1;
/// BPF filter confinement. One-way.
pub const SECCOMP_MODE_FILTER: i32 = 2;
/// Revocable core confinement.
pub const SECCOMP_MODE_CORE: i32 = 3;

/// `seccomp(2)` operation that enters core mode.
pub const SECCOMP_SET_MODE_CORE: u32 = 4;

/// Reads the calling thread's seccomp mode via `prctl(PR_GET_SECCOMP)`.
///
/// # Errors
///
/// Returns `Errno` if the kernel rejects the query (seccomp compiled out).
pub fn current_mode() -> Result<i32, Errno> {
    // SAFETY: PR_GET_SECCOMP reads thread state and takes no pointers.
    let ret = unsafe { libc::prctl(libc::PR_GET_SECCOMP, 0, 0, 0, 0) };
    if ret < 0 { Err(last_errno()) } else { Ok(ret) }
}

/// Sets the calling thread's seccomp mode via `prctl(PR_SET_SECCOMP)` with
/// no auxiliary argument.
///
/// Meaningful values are [`SECCOMP_MODE_DISABLED`] and [`SECCOMP_MODE_CORE`];
/// the one-way modes take an argument this wrapper does not pass and would
/// leave the process confined for good.
///
/// # Errors
///
/// Returns `Errno` if the kernel rejects the transition. `EINVAL` means the
/// mode value is unknown to this kernel.
pub fn set_mode(mode: i32) -> Result<(), Errno> {
    // SAFETY: PR_SET_SECCOMP with a null argument pointer; the kernel
    // validates the mode value and touches no user memory.
    let ret = unsafe { libc::prctl(libc::PR_SET_SECCOMP, mode as libc::c_ulong, 0, 0, 0) };
    if ret != 0 { Err(last_errno()) } else { Ok(()) }
}

/// Enters core mode via the `seccomp(2)` syscall.
///
/// Unlike prctl, `seccomp(2)` has no query operation and no operation that
/// returns to disabled; read-back and restore always go through
/// [`current_mode`] and [`set_mode`].
///
/// # Errors
///
/// Returns `Errno` if the kernel rejects the operation. `EINVAL` means the
/// operation number is unknown to this kernel.
pub fn seccomp_set_mode_core() -> Result<(), Errno> {
    // SAFETY: SECCOMP_SET_MODE_CORE takes no argument; the pointer is null
    // and the kernel touches no user memory.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_seccomp,
            SECCOMP_SET_MODE_CORE,
            0u32,
            std::ptr::null::<libc::c_void>(),
        )
    };
    if ret != 0 { Err(last_errno()) } else { Ok(()) }
}

/// Raises `PR_SET_NO_NEW_PRIVS` for the calling thread.
///
/// Set-once: raising it again is accepted, lowering it is impossible.
///
/// # Errors
///
/// Returns `Errno` if the kernel rejects the prctl.
pub fn set_no_new_privs() -> Result<(), Errno> {
    // SAFETY: PR_SET_NO_NEW_PRIVS takes no pointers.
    let ret = unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) };
    if ret != 0 { Err(last_errno()) } else { Ok(()) }
}

/// Reads the calling thread's no-new-privs bit.
///
/// # Errors
///
/// Returns `Errno` if the kernel rejects the prctl.
pub fn no_new_privs() -> Result<bool, Errno> {
    // SAFETY: PR_GET_NO_NEW_PRIVS reads thread state and takes no pointers.
    let ret = unsafe { libc::prctl(libc::PR_GET_NO_NEW_PRIVS, 0, 0, 0, 0) };
    if ret < 0 { Err(last_errno()) } else { Ok(ret != 0) }
}

/// Returns true if seccomp is available.
pub fn seccomp_available() -> bool {
    unsafe { libc::prctl(libc::PR_GET_SECCOMP, 0, 0, 0, 0) >= 0 }
}
