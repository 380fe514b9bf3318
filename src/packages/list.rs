//! Declarative description of one install/remove request.

use crate::error::{HostkitError, Result};
use crate::utils::fs::FileSystem;
use std::io::BufRead;
use std::path::PathBuf;

/// Packages to install or remove.
///
/// Repository names (`packages` plus the lines of `package_list_files`)
/// and local archives (`local_packages`) are two independent install
/// paths; [`PackageList::packages`] never returns local archives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageList {
    pub packages: Vec<String>,
    /// Files holding one package name per line.
    pub package_list_files: Vec<PathBuf>,
    /// Pre-downloaded `.deb`/`.rpm` archives.
    pub local_packages: Vec<PathBuf>,
}

impl PackageList {
    pub fn from_packages<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_package_list_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.package_list_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_local_packages<I, P>(mut self, archives: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.local_packages.extend(archives.into_iter().map(Into::into));
        self
    }

    /// True when there is nothing to resolve and nothing to install locally.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.package_list_files.is_empty()
            && self.local_packages.is_empty()
    }

    /// Every line of every list file, in file order then line order.
    ///
    /// Lines are taken verbatim: no trimming, blank lines become empty names.
    pub fn packages_from_list_files(&self, fs: &dyn FileSystem) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for path in &self.package_list_files {
            let reader = fs
                .open(path)
                .map_err(|source| HostkitError::PackageListFile {
                    path: path.clone(),
                    source,
                })?;

            for line in reader.lines() {
                let line = line.map_err(|source| HostkitError::PackageListFile {
                    path: path.clone(),
                    source,
                })?;
                names.push(line);
            }
        }

        Ok(names)
    }

    /// Direct names followed by the names read from list files.
    pub fn packages(&self, fs: &dyn FileSystem) -> Result<Vec<String>> {
        let mut names = self.packages.clone();
        names.extend(self.packages_from_list_files(fs)?);
        Ok(names)
    }
}

#[cfg(test)]
mod tests;
