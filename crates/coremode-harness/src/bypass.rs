//! Demonstrates that core mode does not police memory protections.
//!
//! A confined thread asks for writable-and-executable anonymous memory and
//! then narrows it to read-execute. Under an enforcing seccomp mode, or a
//! hardened allocator policy, one of those requests would be refused; under
//! core mode both must sail through. The probe only runs while the mode is
//! actually CORE, confirmed by a fresh query, and the mapping is released
//! exactly once no matter where the probe stops.

use std::io::Write;

use coremode_sys::mman::{AnonMapping, MprotectFlags, ProtFlags, page_size};
use coremode_sys::seccomp::SECCOMP_MODE_CORE;
use rustix::io::Errno;

use crate::report::Reporter;
use crate::surface::ControlSurface;
use crate::transition::raw_mode;

/// Which memory request failed, when one did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassStage {
    Map,
    Narrow,
}

/// How the bypass probe ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BypassOutcome {
    /// Executable anonymous memory was granted and narrowed while confined.
    Permitted,
    /// The environment refused a memory request. Proves nothing about core
    /// mode either way.
    Inconclusive { stage: BypassStage, errno: Errno },
    /// Core mode was not active, so there was nothing to demonstrate.
    Skipped { mode: i32 },
}

/// Runs the bypass demonstration if, and only if, the thread is currently
/// in core mode.
pub fn run_bypass_probe<W: Write>(
    surface: &mut dyn ControlSurface,
    report: &mut Reporter<W>,
) -> BypassOutcome {
    let mode = raw_mode(&surface.query());
    if mode != SECCOMP_MODE_CORE {
        report.skip(&format!("Core mode not active (mode {mode})"));
        return BypassOutcome::Skipped { mode };
    }

    let len = page_size();
    let rwx = ProtFlags::READ | ProtFlags::WRITE | ProtFlags::EXEC;
    let mut mapping = match AnonMapping::new(len, rwx) {
        Ok(mapping) => mapping,
        Err(errno) => {
            report.inconclusive(&format!(
                "RWX mapping refused (errno={})",
                errno.raw_os_error()
            ));
            return BypassOutcome::Inconclusive {
                stage: BypassStage::Map,
                errno,
            };
        }
    };
    report.success(&format!("RWX mapping created ({len} bytes)"));

    if let Err(errno) = mapping.protect(MprotectFlags::READ | MprotectFlags::EXEC) {
        report.inconclusive(&format!(
            "RX narrowing refused (errno={})",
            errno.raw_os_error()
        ));
        return BypassOutcome::Inconclusive {
            stage: BypassStage::Narrow,
            errno,
        };
    }
    report.success("Mapping narrowed to RX");
    report.line("Security bypass test: executable memory permitted in core mode");

    BypassOutcome::Permitted
}
