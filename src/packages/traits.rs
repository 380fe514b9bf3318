use crate::error::Result;
use crate::packages::list::PackageList;

/// Uniform front for the host's OS package manager.
///
/// Installers call these operations without knowing whether apt or dnf
/// sits underneath. Every call is synchronous and stateless.
pub trait SystemPackageManager: Send + Sync {
    /// Install repository packages in one batched command, then each local
    /// archive with its own command.
    fn install(&self, list: &PackageList) -> Result<()>;

    /// Remove repository packages. Local archives are ignored.
    fn remove(&self, list: &PackageList) -> Result<()>;

    /// Refresh repository metadata
    fn update(&self) -> Result<()>;

    /// Upgrade installed packages. `full_upgrade` additionally runs a
    /// distribution upgrade where the backend has one.
    fn upgrade(&self, full_upgrade: bool) -> Result<()>;

    /// Clear caches and orphaned dependencies. Every step is attempted;
    /// the first failure is returned.
    fn clean(&self) -> Result<()>;

    /// Executable name, e.g. `apt-get`.
    fn bin(&self) -> &str;

    /// Native archive suffix including the dot, e.g. `.deb`.
    fn package_extension(&self) -> &str;
}
