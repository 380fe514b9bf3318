pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod packages;
pub mod privilege;
pub mod system;
pub mod ui;
pub mod utils;

use clap::Parser;
use config::Settings;
use std::process::exit;

/// Run hostkit CLI entrypoint.
pub fn run_cli() {
    // 1. Parse args first so --help and --version never depend on settings
    let args = cli::args::Cli::parse();

    // 2. Settings file, then flags on top
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            ui::error(&format!("{}", e));
            exit(1);
        }
    };
    ui::init_colors(args.global.color.unwrap_or(settings.color));
    ui::set_quiet(args.global.quiet || settings.quiet);
    ui::set_verbose(args.global.verbose || settings.verbose);

    // 3. Run
    if let Err(e) = cli::dispatcher::dispatch(&args) {
        if ui::is_interrupted() {
            ui::warning("Operation cancelled by signal.");
        }
        ui::error(&format!("{}", e));
        exit(cli::dispatcher::exit_code(&e));
    }
}
