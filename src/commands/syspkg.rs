//! `hostkit syspkg` subcommands.
//!
//! Each handler takes the already-selected package manager so it can be
//! driven by a recording runner in tests.

use crate::cli::args::SyspkgCommand;
use crate::error::Result;
use crate::packages::{PackageList, SystemPackageManager};
use crate::system::LocalSystem;
use crate::ui as output;

/// Route one subcommand to its handler.
pub fn run(command: &SyspkgCommand, system: &LocalSystem) -> Result<()> {
    let manager = system.package_manager();

    match command {
        SyspkgCommand::Update => update(manager),
        SyspkgCommand::Upgrade { dist } => upgrade(manager, *dist),
        SyspkgCommand::Install {
            packages,
            packages_files,
            local_packages,
        } => {
            let list = PackageList::from_packages(packages.iter().cloned())
                .with_package_list_files(packages_files.iter().cloned())
                .with_local_packages(local_packages.iter().cloned());
            install(manager, &list)
        }
        SyspkgCommand::Uninstall { packages } => {
            uninstall(manager, &PackageList::from_packages(packages.iter().cloned()))
        }
        SyspkgCommand::Clean => clean(manager),
        SyspkgCommand::Info { json } => info(system, *json),
    }
}

pub fn update(manager: &dyn SystemPackageManager) -> Result<()> {
    manager.update()?;
    output::success("Package metadata updated");
    Ok(())
}

/// Update then upgrade; clean always runs afterwards.
pub fn upgrade(manager: &dyn SystemPackageManager, dist: bool) -> Result<()> {
    with_deferred_clean(manager, || {
        manager.update()?;
        manager.upgrade(dist)
    })?;
    output::success("System packages upgraded");
    Ok(())
}

/// Update then install; clean always runs afterwards.
pub fn install(manager: &dyn SystemPackageManager, list: &PackageList) -> Result<()> {
    with_deferred_clean(manager, || {
        manager.update()?;
        manager.install(list)
    })?;
    output::success("Packages installed");
    Ok(())
}

pub fn uninstall(manager: &dyn SystemPackageManager, list: &PackageList) -> Result<()> {
    manager.remove(list)?;
    output::success("Packages removed");
    Ok(())
}

pub fn clean(manager: &dyn SystemPackageManager) -> Result<()> {
    manager.clean()?;
    output::success("Package caches cleaned");
    Ok(())
}

pub fn info(system: &LocalSystem, json: bool) -> Result<()> {
    let summary = system.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::header("System");
    output::keyval("Vendor", &summary.vendor.to_string());
    output::keyval("Version", &summary.version);
    output::keyval("Architecture", &summary.arch);
    output::header("Package manager");
    output::keyval("Family", &summary.family.to_string());
    output::keyval("Binary", &summary.bin);
    output::keyval(
        "Available",
        if summary.bin_available { "yes" } else { "no" },
    );
    output::keyval("Archive", &summary.package_extension);
    output::keyval("Archive arch", &summary.package_arch);
    Ok(())
}

/// Run `body`, then `clean` no matter what.
///
/// The body's error wins; a cleanup failure is returned only when the
/// body succeeded, otherwise it is reported as a warning.
pub fn with_deferred_clean<F>(manager: &dyn SystemPackageManager, body: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let result = body();
    let cleaned = manager.clean();

    match (result, cleaned) {
        (Err(e), Err(clean_err)) => {
            output::warning(&format!("Cleanup also failed: {}", clean_err));
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), cleaned) => cleaned,
    }
}
