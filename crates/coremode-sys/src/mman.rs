//! Owned anonymous memory mappings.
//!
//! rustix does the actual mapping work; this module adds ownership so a
//! probe region is always unmapped exactly once, whichever way the probe
//! ends.

use std::ffi::c_void;

use rustix::io::Errno;
use rustix::mm;

pub use rustix::mm::{MprotectFlags, ProtFlags};
pub use rustix::param::page_size;

/// An anonymous private mapping owned by this value.
///
/// The region is unmapped when the value is dropped.
#[derive(Debug)]
pub struct AnonMapping {
    addr: *mut c_void,
    len: usize,
}

impl AnonMapping {
    /// Maps `len` bytes of anonymous private memory with protection `prot`.
    ///
    /// # Errors
    ///
    /// Returns `Errno` if the kernel refuses the mapping, including when the
    /// requested protection is denied by policy (W^X enforcement, for
    /// example).
    pub fn new(len: usize, prot: ProtFlags) -> Result<Self, Errno> {
        // SAFETY: null hint requests a fresh mapping; no existing memory is
        // affected and the returned region is owned by the value built here.
        let addr =
            unsafe { mm::mmap_anonymous(std::ptr::null_mut(), len, prot, mm::MapFlags::PRIVATE) }?;
        Ok(Self { addr, len })
    }

    /// Changes the protection of the whole region.
    ///
    /// # Errors
    ///
    /// Returns `Errno` if the kernel refuses the protection change.
    pub fn protect(&mut self, prot: MprotectFlags) -> Result<(), Errno> {
        // SAFETY: addr and len describe the mapping owned by self.
        unsafe { mm::mprotect(self.addr, self.len, prot) }
    }

    /// Base address of the region.
    pub fn addr(&self) -> *mut c_void {
        self.addr
    }

    /// Size of the region in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the region is empty (never the case for a live mapping).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for AnonMapping {
    fn drop(&mut self) {
        // SAFETY: addr and len came from mmap_anonymous and this is the only
        // unmap of the region.
        let _ = unsafe { mm::munmap(self.addr, self.len) };
    }
}
