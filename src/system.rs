//! Host detection and the package manager bound to it.
//!
//! The backend is chosen once, from `/etc/os-release`, and never changes
//! for the lifetime of the process.

pub mod os_release;

use crate::error::{HostkitError, Result};
use crate::exec::CommandRunner;
use crate::packages::{PackageFamily, SystemPackageManager, create_manager};
use crate::utils::fs::FileSystem;
use os_release::OsRelease;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Supported distribution vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Ubuntu,
    Debian,
    Rhel,
    Rocky,
    Almalinux,
    Centos,
    Fedora,
    Amazon,
}

impl Vendor {
    /// Map an os-release `ID` (or `ID_LIKE` entry) to a vendor.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "ubuntu" => Some(Self::Ubuntu),
            "debian" => Some(Self::Debian),
            "rhel" | "redhat" => Some(Self::Rhel),
            "rocky" => Some(Self::Rocky),
            "almalinux" => Some(Self::Almalinux),
            "centos" => Some(Self::Centos),
            "fedora" => Some(Self::Fedora),
            "amzn" => Some(Self::Amazon),
            _ => None,
        }
    }

    pub fn family(&self) -> PackageFamily {
        match self {
            Self::Ubuntu | Self::Debian => PackageFamily::Apt,
            Self::Rhel
            | Self::Rocky
            | Self::Almalinux
            | Self::Centos
            | Self::Fedora
            | Self::Amazon => PackageFamily::Dnf,
        }
    }

    /// Pick the vendor from `ID`, falling back to `ID_LIKE` in order.
    pub fn detect(release: &OsRelease) -> Result<Self> {
        std::iter::once(&release.id)
            .chain(release.id_like.iter())
            .find_map(|id| Self::from_id(id))
            .ok_or_else(|| HostkitError::UnsupportedDistribution(release.describe()))
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ubuntu => "ubuntu",
            Self::Debian => "debian",
            Self::Rhel => "rhel",
            Self::Rocky => "rocky",
            Self::Almalinux => "almalinux",
            Self::Centos => "centos",
            Self::Fedora => "fedora",
            Self::Amazon => "amzn",
        };
        write!(f, "{}", name)
    }
}

/// Architecture as the backend's archives name it (`amd64` vs `x86_64`).
pub fn package_arch(family: PackageFamily, arch: &str) -> String {
    match (family, arch) {
        (PackageFamily::Apt, "x86_64") => "amd64".to_string(),
        (PackageFamily::Apt, "aarch64") => "arm64".to_string(),
        _ => arch.to_string(),
    }
}

/// The detected host plus its package manager.
pub struct LocalSystem {
    pub vendor: Vendor,
    pub version: String,
    pub arch: String,
    package_manager: Box<dyn SystemPackageManager>,
}

impl LocalSystem {
    /// Detect the running host from [`OS_RELEASE_PATH`].
    pub fn detect(runner: Arc<dyn CommandRunner>, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let release = os_release::read(fs.as_ref(), Path::new(OS_RELEASE_PATH))?;
        Self::from_os_release(&release, std::env::consts::ARCH, runner, fs)
    }

    pub fn from_os_release(
        release: &OsRelease,
        arch: &str,
        runner: Arc<dyn CommandRunner>,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let vendor = Vendor::detect(release)?;
        Ok(Self {
            vendor,
            version: release.version_id.clone(),
            arch: arch.to_string(),
            package_manager: create_manager(vendor.family(), runner, fs),
        })
    }

    pub fn package_manager(&self) -> &dyn SystemPackageManager {
        self.package_manager.as_ref()
    }

    pub fn family(&self) -> PackageFamily {
        self.vendor.family()
    }

    pub fn package_arch(&self) -> String {
        package_arch(self.family(), &self.arch)
    }

    pub fn summary(&self) -> SystemSummary {
        let bin = self.package_manager.bin().to_string();
        SystemSummary {
            vendor: self.vendor,
            version: self.version.clone(),
            arch: self.arch.clone(),
            package_arch: self.package_arch(),
            family: self.family(),
            bin_available: which::which(&bin).is_ok(),
            bin,
            package_extension: self.package_manager.package_extension().to_string(),
        }
    }
}

/// What `syspkg info` reports.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    pub vendor: Vendor,
    pub version: String,
    pub arch: String,
    pub package_arch: String,
    pub family: PackageFamily,
    pub bin: String,
    pub bin_available: bool,
    pub package_extension: String,
}

#[cfg(test)]
mod tests;
