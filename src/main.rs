//! cardsheet - Validate card images and lay them out on printable A4 sheets.

use clap::Parser;
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cardsheet::cli::Cli;
use cardsheet::error::CardSheetError;
use cardsheet::output::OutputFormatter;
use cardsheet::sheet::build_sheet;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<(), CardSheetError> {
    cli.validate()?;
    let config = cli.load_config()?;

    let formatter = OutputFormatter::from_config(&config);
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", cardsheet::NAME, cardsheet::VERSION));
    }

    build_sheet(&config, &formatter)?;
    Ok(())
}
