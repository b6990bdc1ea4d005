//! ipnotes - annotate IPv4 addresses and rewrite them in text streams.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ipnotes::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity; diagnostics go to stderr
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.action_count() == 0 {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    ipnotes::commands::run(&cli)
}
