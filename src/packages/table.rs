//! Fixed argument tables and the command plumbing shared by backends.

use crate::error::{HostkitError, Result};
use crate::exec::{CommandRunner, CommandSpec};
use crate::packages::list::PackageList;
use crate::ui;
use crate::utils::fs::FileSystem;
use std::path::Path;
use std::sync::Arc;

/// Arguments every supported backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTable {
    pub bin: &'static str,
    pub package_extension: &'static str,
    pub install: &'static [&'static str],
    pub upgrade: &'static [&'static str],
    pub remove: &'static [&'static str],
    pub autoremove: &'static [&'static str],
    pub clean: &'static [&'static str],
    /// `KEY=VALUE` pairs added to every command.
    pub env: &'static [&'static str],
}

/// Runner, filesystem and table bundled for one backend.
pub(crate) struct BackendCore {
    pub(crate) table: &'static CommandTable,
    pub(crate) runner: Arc<dyn CommandRunner>,
    pub(crate) fs: Arc<dyn FileSystem>,
}

impl BackendCore {
    pub(crate) fn command<I, S>(&self, args: &[&str], extra: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(self.table.bin)
            .args(args.iter().copied())
            .args(extra)
            .env_vars(self.table.env.iter().copied())
            .inherit_env(true)
    }

    pub(crate) fn run(&self, args: &[&str]) -> Result<()> {
        self.runner.run(&self.command(args, std::iter::empty::<String>()))
    }

    pub(crate) fn install(&self, list: &PackageList) -> Result<()> {
        let bin = self.table.bin;
        let names = list
            .packages(self.fs.as_ref())
            .map_err(|e| e.context(format!("failed to install packages with {}", bin)))?;

        if !names.is_empty() {
            ui::info(&format!("Installing {} package(s) with {}", names.len(), bin));
            let spec = self.command(self.table.install, names.iter().cloned());
            self.runner.run(&spec).map_err(|e| {
                e.context(format!(
                    "failed to install packages [{}] with {}",
                    names.join(", "),
                    bin
                ))
            })?;
        }

        for archive in &list.local_packages {
            self.install_local(archive)?;
        }

        Ok(())
    }

    fn install_local(&self, archive: &Path) -> Result<()> {
        let bin = self.table.bin;
        let context = || {
            format!(
                "failed to install local package {} with {}",
                archive.display(),
                bin
            )
        };

        let exists = self
            .fs
            .is_path_exist(archive)
            .map_err(|source| HostkitError::Io {
                path: archive.to_path_buf(),
                source,
            })
            .map_err(|e| e.context(context()))?;
        if !exists {
            return Err(HostkitError::LocalPackageNotFound {
                path: archive.to_path_buf(),
            }
            .context(context()));
        }

        ui::info(&format!("Installing local package {}", archive.display()));
        let spec = self.command(
            self.table.install,
            [archive.to_string_lossy().into_owned()],
        );
        self.runner.run(&spec).map_err(|e| e.context(context()))
    }

    pub(crate) fn remove(&self, list: &PackageList) -> Result<()> {
        let bin = self.table.bin;
        let names = list
            .packages(self.fs.as_ref())
            .map_err(|e| e.context(format!("failed to remove packages with {}", bin)))?;
        if names.is_empty() {
            return Ok(());
        }

        ui::info(&format!("Removing {} package(s) with {}", names.len(), bin));
        let spec = self.command(self.table.remove, names.iter().cloned());
        self.runner.run(&spec).map_err(|e| {
            e.context(format!(
                "failed to remove packages [{}] with {}",
                names.join(", "),
                bin
            ))
        })
    }

    pub(crate) fn upgrade(&self) -> Result<()> {
        self.run(self.table.upgrade)
            .map_err(|e| e.context(format!("{} upgrade failed", self.table.bin)))
    }

    pub(crate) fn clean_cache(&self) -> Result<()> {
        self.run(self.table.clean)
            .map_err(|e| e.context(format!("{} clean failed", self.table.bin)))
    }

    pub(crate) fn autoremove(&self) -> Result<()> {
        self.run(self.table.autoremove)
            .map_err(|e| e.context(format!("{} autoremove failed", self.table.bin)))
    }
}

/// Keep the first error while letting later steps run.
pub(crate) fn keep_first(first: &mut Option<HostkitError>, step: Result<()>) {
    if let Err(e) = step {
        if first.is_none() {
            *first = Some(e);
        } else {
            ui::warning(&e.to_string());
        }
    }
}
