//! Report printing.

use anyhow::Result;
use std::io::Write;

use crate::cli::Cli;
use crate::config::Config;
use crate::report::{dump_current, dump_history, dump_tags, search, summary, SummaryOptions};
use crate::store::Store;

pub use crate::report::overview;

/// Print the reports selected on the command line, in a fixed order.
pub fn run<W: Write + ?Sized>(out: &mut W, cli: &Cli, store: &Store, config: &Config) -> Result<()> {
    if cli.output_dict {
        print(out, dump_current(store))?;
    }
    if cli.output_history {
        print(out, dump_history(store))?;
    }
    if cli.output_tags {
        print(out, dump_tags(store))?;
    }
    if let Some(needle) = &cli.search {
        print(out, search(store, needle))?;
    }
    if cli.summary {
        let options = SummaryOptions {
            tag_width: config.summary_tag_width,
            top: config.summary_top,
        };
        print(out, summary(store, super::mode(cli), options))?;
    }
    Ok(())
}

pub fn print<W: Write + ?Sized>(out: &mut W, lines: Vec<String>) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
