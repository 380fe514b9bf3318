use crate::error::{HostkitError, Result};
use nix::unistd::Uid;

pub fn is_root() -> bool {
    Uid::effective().is_root()
}

/// Fail with [`HostkitError::NotRoot`] unless running with euid 0.
pub fn require_root() -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(HostkitError::NotRoot)
    }
}
