//! `classmap` command-line entry point.
//!
//! # Responsibility
//! - Load `.env`, parse flags and start logging.
//! - Run one regrouping pipeline and map its outcome to an exit code.

mod config;

use clap::Parser;
use classmap_core::{init_logging, run_pipeline, LogDiagnostics};
use config::{AppConfig, CliArgs};
use log::debug;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing `.env` file is not an error; flags and process env still apply.
    let dotenv_path = dotenv::dotenv().ok();
    let args = CliArgs::parse();

    let config = match AppConfig::resolve(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("classmap: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("classmap: {err}");
        return ExitCode::FAILURE;
    }
    if let Some(path) = dotenv_path {
        debug!("event=dotenv_load module=cli status=ok path={}", path.display());
    }

    // Failures are already logged and mirrored to stderr by the logger.
    let outcome = run_pipeline(&config.input, &config.output, &mut LogDiagnostics);
    // The logger handle lives in a static and is never dropped.
    log::logger().flush();

    match outcome {
        Ok(report) => {
            println!(
                "wrote {} ({} attributes, {} classes skipped)",
                config.output.display(),
                report.records,
                report.classes_skipped
            );
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
