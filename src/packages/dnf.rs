//! RHEL/Rocky/Alma/Fedora backend driven by `dnf`.

use crate::error::Result;
use crate::exec::CommandRunner;
use crate::packages::list::PackageList;
use crate::packages::table::{BackendCore, CommandTable, keep_first};
use crate::packages::traits::SystemPackageManager;
use crate::ui;
use crate::utils::fs::FileSystem;
use std::sync::Arc;

pub static DNF_TABLE: CommandTable = CommandTable {
    bin: "dnf",
    package_extension: ".rpm",
    install: &["install", "-y", "-q"],
    upgrade: &["upgrade", "-y", "-q"],
    remove: &["remove", "-y", "-q"],
    autoremove: &["autoremove", "-y", "-q"],
    clean: &["clean", "all"],
    env: &[],
};

pub struct DnfManager {
    core: BackendCore,
}

impl DnfManager {
    pub fn new(runner: Arc<dyn CommandRunner>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            core: BackendCore {
                table: &DNF_TABLE,
                runner,
                fs,
            },
        }
    }
}

impl SystemPackageManager for DnfManager {
    fn install(&self, list: &PackageList) -> Result<()> {
        self.core.install(list)
    }

    fn remove(&self, list: &PackageList) -> Result<()> {
        self.core.remove(list)
    }

    /// dnf refreshes metadata on demand, there is nothing to do.
    fn update(&self) -> Result<()> {
        Ok(())
    }

    /// dnf has no dist-upgrade; `full_upgrade` is accepted and ignored.
    fn upgrade(&self, _full_upgrade: bool) -> Result<()> {
        ui::info("Upgrading packages with dnf");
        self.core.upgrade()
    }

    fn clean(&self) -> Result<()> {
        ui::info("Cleaning dnf caches");
        let mut first = None;
        keep_first(&mut first, self.core.clean_cache());
        keep_first(&mut first, self.core.autoremove());
        first.map_or(Ok(()), Err)
    }

    fn bin(&self) -> &str {
        self.core.table.bin
    }

    fn package_extension(&self) -> &str {
        self.core.table.package_extension
    }
}
