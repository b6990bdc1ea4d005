//! Interactive substitution command: stdin to stdout.

use anyhow::Result;
use std::io;

use crate::store::Store;
use crate::substitute::substitute_stream;

/// Annotate addresses in stdin until end of input.
pub fn run(store: &Store) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    match substitute_stream(stdin.lock(), stdout.lock(), store) {
        Ok(_) => Ok(()),
        // Downstream closed the pipe (e.g. `| head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}
