//! # OS package managers
//!
//! Higher-level installers talk to the host package manager through the
//! [`SystemPackageManager`] trait and never care whether apt or dnf runs
//! underneath.
//!
//! ## Backends
//!
//! - **apt** (`apt.rs`): Debian and Ubuntu, `apt-get` with
//!   `DEBIAN_FRONTEND=noninteractive`
//! - **dnf** (`dnf.rs`): RHEL-family and Fedora
//!
//! Each backend owns a fixed [`CommandTable`] and is built with an injected
//! [`CommandRunner`](crate::exec::CommandRunner) and
//! [`FileSystem`](crate::utils::fs::FileSystem).
//!
//! ## Requests
//!
//! A [`PackageList`] carries direct names, files of names and local
//! archives. Names are installed in one batched command; local archives
//! are installed one command each, in order, stopping at the first failure.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hostkit::exec::SystemRunner;
//! use hostkit::packages::{create_manager, PackageFamily, PackageList};
//! use hostkit::utils::fs::OsFileSystem;
//! use std::sync::Arc;
//!
//! let runner = Arc::new(SystemRunner::from_signals()?);
//! let manager = create_manager(PackageFamily::Apt, runner, Arc::new(OsFileSystem));
//! manager.install(&PackageList::from_packages(["ca-certificates"]))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod apt;
pub mod dnf;
pub mod list;
pub mod registry;
pub mod table;
pub mod traits;

pub use list::PackageList;
pub use registry::{PackageFamily, create_manager};
pub use table::CommandTable;
pub use traits::SystemPackageManager;
