use crate::ui::ColorMode;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hostkit",
    about = "Provision development tool-chains on Linux hosts",
    long_about = "Provision development tool-chains on Linux hosts through the native apt or dnf package manager",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output (echo every command before it runs)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorMode>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage OS packages with the system package manager
    Syspkg {
        #[command(subcommand)]
        command: SyspkgCommand,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SyspkgCommand {
    /// Refresh repository metadata
    Update,

    /// Upgrade installed packages
    Upgrade {
        /// Also run a distribution upgrade (apt only)
        #[arg(long)]
        dist: bool,
    },

    /// Install packages
    Install {
        /// Package to install (repeatable)
        #[arg(short = 'p', long = "package", value_name = "NAME")]
        packages: Vec<String>,

        /// File with one package name per line (repeatable)
        #[arg(short = 'f', long = "packages-file", value_name = "PATH")]
        packages_files: Vec<PathBuf>,

        /// Local .deb/.rpm archive to install (repeatable)
        #[arg(short = 'l', long = "local-package", value_name = "PATH")]
        local_packages: Vec<PathBuf>,
    },

    /// Remove packages
    Uninstall {
        /// Package to remove (repeatable)
        #[arg(short = 'p', long = "package", value_name = "NAME")]
        packages: Vec<String>,
    },

    /// Clean package caches and remove orphaned dependencies
    Clean,

    /// Show the detected system and package manager
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl SyspkgCommand {
    /// Every subcommand that changes the system needs root.
    pub fn requires_root(&self) -> bool {
        !matches!(self, SyspkgCommand::Info { .. })
    }
}
