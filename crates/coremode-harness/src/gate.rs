//! Privilege gate: raise no-new-privs before the first transition.
//!
//! Some kernels require the bit before an unprivileged seccomp transition,
//! some do not. Failure here is advisory: the harness narrates it and keeps
//! going, letting the transition probes show whether it mattered.

use std::io::Write;

use coremode_sys::seccomp;

use crate::report::Reporter;

/// Raises `PR_SET_NO_NEW_PRIVS` for this thread. Returns whether the kernel
/// accepted it. Set-once, so a repeat raise is a no-op; the bit outlives the
/// harness either way.
pub fn raise_no_new_privs<W: Write>(report: &mut Reporter<W>) -> bool {
    match seccomp::set_no_new_privs() {
        Ok(()) => {
            report.line("no_new_privs raised");
            true
        }
        Err(errno) => {
            report.line(&format!(
                "no_new_privs not raised (errno={}), continuing",
                errno.raw_os_error()
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raising_narrates_and_succeeds() {
        let mut report = Reporter::new(Vec::new());
        assert!(raise_no_new_privs(&mut report));
        let out = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(out, "no_new_privs raised\n");
    }
}
