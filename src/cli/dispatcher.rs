//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command, SyspkgCommand};
use crate::commands;
use crate::error::{HostkitError, Result};
use crate::exec::SystemRunner;
use crate::privilege;
use crate::system::LocalSystem;
use crate::utils::fs::OsFileSystem;
use std::sync::Arc;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Command::Syspkg { command } => handle_syspkg_command(command),
        Command::Completions { shell } => commands::completions::run(*shell),
    }
}

fn handle_syspkg_command(command: &SyspkgCommand) -> Result<()> {
    if command.requires_root() {
        privilege::require_root()?;
    }

    let runner = Arc::new(SystemRunner::from_signals()?);
    let system = LocalSystem::detect(runner, Arc::new(OsFileSystem))?;

    commands::syspkg::run(command, &system)
        .map_err(|e| e.context(format!("syspkg {}", subcommand_name(command))))
}

fn subcommand_name(command: &SyspkgCommand) -> &'static str {
    match command {
        SyspkgCommand::Update => "update",
        SyspkgCommand::Upgrade { .. } => "upgrade",
        SyspkgCommand::Install { .. } => "install",
        SyspkgCommand::Uninstall { .. } => "uninstall",
        SyspkgCommand::Clean => "clean",
        SyspkgCommand::Info { .. } => "info",
    }
}

/// Exit code for an error that reached the CLI boundary.
pub fn exit_code(err: &HostkitError) -> i32 {
    if err.is_cancelled() { 130 } else { 1 }
}
