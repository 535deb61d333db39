//! Geomap - Command-line tool for previewing and converting terrain maps

use std::process::ExitCode;

use geomap::cli;

fn main() -> ExitCode {
    // WARN by default, override with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run()
}
