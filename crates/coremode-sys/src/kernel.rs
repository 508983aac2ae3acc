//! Kernel identification.

use rustix::system::uname;

/// Returns the running kernel's release string (`uname -r`).
///
/// `None` means the release is not valid UTF-8, which no stock kernel
/// produces.
pub fn release() -> Option<String> {
    uname().release().to_str().ok().map(str::to_owned)
}
