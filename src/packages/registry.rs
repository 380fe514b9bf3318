//! Backend selection.

use crate::exec::CommandRunner;
use crate::packages::apt::AptManager;
use crate::packages::dnf::DnfManager;
use crate::packages::traits::SystemPackageManager;
use crate::utils::fs::FileSystem;
use std::fmt;
use std::sync::Arc;

/// OS package manager families the tool can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFamily {
    /// Debian, Ubuntu
    Apt,
    /// RHEL, Rocky, AlmaLinux, CentOS, Fedora, Amazon Linux
    Dnf,
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageFamily::Apt => write!(f, "apt"),
            PackageFamily::Dnf => write!(f, "dnf"),
        }
    }
}

pub fn create_manager(
    family: PackageFamily,
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
) -> Box<dyn SystemPackageManager> {
    match family {
        PackageFamily::Apt => Box::new(AptManager::new(runner, fs)),
        PackageFamily::Dnf => Box::new(DnfManager::new(runner, fs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::RecordingRunner;
    use crate::utils::fs::OsFileSystem;

    #[test]
    fn family_selects_backend() {
        let runner: Arc<dyn CommandRunner> = Arc::new(RecordingRunner::new());
        let fs: Arc<dyn FileSystem> = Arc::new(OsFileSystem);

        let apt = create_manager(PackageFamily::Apt, runner.clone(), fs.clone());
        let dnf = create_manager(PackageFamily::Dnf, runner, fs);

        assert_eq!(apt.bin(), "apt-get");
        assert_eq!(dnf.bin(), "dnf");
        assert_eq!(PackageFamily::Dnf.to_string(), "dnf");
    }
}
