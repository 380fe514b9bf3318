//! Debian/Ubuntu backend driven by `apt-get`.

use crate::error::{HostkitError, Result};
use crate::exec::CommandRunner;
use crate::packages::list::PackageList;
use crate::packages::table::{BackendCore, CommandTable, keep_first};
use crate::packages::traits::SystemPackageManager;
use crate::ui;
use crate::utils::fs::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub static APT_TABLE: CommandTable = CommandTable {
    bin: "apt-get",
    package_extension: ".deb",
    install: &["install", "-y", "-q"],
    upgrade: &["upgrade", "-y", "-q"],
    remove: &["remove", "-y", "-q"],
    autoremove: &["autoremove", "-y", "-q"],
    clean: &["clean", "-q"],
    env: &["DEBIAN_FRONTEND=noninteractive"],
};

const UPDATE_ARGS: &[&str] = &["update", "-q"];
const DIST_UPGRADE_ARGS: &[&str] = &["dist-upgrade", "-y", "-q"];

/// Where apt keeps downloaded repository metadata.
pub const APT_LISTS_DIR: &str = "/var/lib/apt/lists";

pub struct AptManager {
    core: BackendCore,
    lists_dir: PathBuf,
}

impl AptManager {
    pub fn new(runner: Arc<dyn CommandRunner>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            core: BackendCore {
                table: &APT_TABLE,
                runner,
                fs,
            },
            lists_dir: PathBuf::from(APT_LISTS_DIR),
        }
    }

    /// Use a different metadata cache directory (tests, chroots).
    pub fn with_lists_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lists_dir = dir.into();
        self
    }

    fn remove_lists_dir(&self) -> Result<()> {
        let dir: &Path = &self.lists_dir;
        let io_err = |source: std::io::Error| {
            HostkitError::Io {
                path: dir.to_path_buf(),
                source,
            }
            .context("failed to remove apt metadata cache")
        };

        if !self.core.fs.is_path_exist(dir).map_err(io_err)? {
            return Ok(());
        }
        ui::detail(&format!("removing {}", dir.display()));
        self.core.fs.remove_dir_all(dir).map_err(io_err)
    }
}

impl SystemPackageManager for AptManager {
    fn install(&self, list: &PackageList) -> Result<()> {
        self.core.install(list)
    }

    fn remove(&self, list: &PackageList) -> Result<()> {
        self.core.remove(list)
    }

    fn update(&self) -> Result<()> {
        ui::info("Updating apt package lists");
        self.core
            .run(UPDATE_ARGS)
            .map_err(|e| e.context("apt-get update failed"))
    }

    fn upgrade(&self, full_upgrade: bool) -> Result<()> {
        ui::info("Upgrading packages with apt-get");
        self.core.upgrade()?;

        if full_upgrade {
            self.core
                .run(DIST_UPGRADE_ARGS)
                .map_err(|e| e.context("apt-get dist-upgrade failed"))?;
        }
        Ok(())
    }

    fn clean(&self) -> Result<()> {
        ui::info("Cleaning apt caches");
        let mut first = None;
        keep_first(&mut first, self.core.clean_cache());
        keep_first(&mut first, self.core.autoremove());
        keep_first(&mut first, self.remove_lists_dir());
        first.map_or(Ok(()), Err)
    }

    fn bin(&self) -> &str {
        self.core.table.bin
    }

    fn package_extension(&self) -> &str {
        self.core.table.package_extension
    }
}
