//! Tagsmith CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use tagsmith_cli::{Args, error_adapter::to_reports};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Tagsmith");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = tagsmith_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        for report in to_reports(&err) {
            let mut rendered = String::new();
            reporter
                .render_report(&mut rendered, report.as_ref())
                .expect("Writing to String buffer is infallible");

            match report.severity() {
                Some(miette::Severity::Warning) => warn!("{rendered}"),
                _ => error!("{rendered}"),
            }
        }

        process::exit(1);
    }

    info!("Expansion complete");
}
