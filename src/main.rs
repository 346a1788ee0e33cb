mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logging;
mod output;
mod pricing;
mod repl;
mod share;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use config::Config;
use logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = match cli.config.as_deref() {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::load(),
    };
    let cli = cli.with_config(&config);

    match app::run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
