//! Yes/no confirmation for destructive operations.
//!
//! [`Confirmation`] is a small state machine fed one response at a time;
//! [`confirm`] drives it from any [`ConfirmSource`], re-prompting until a
//! recognised answer arrives. End of input cancels.

use std::io::{self, BufRead, Write};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitingInput,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
pub struct Confirmation {
    state: ConfirmState,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmation {
    pub fn new() -> Self {
        Self {
            state: ConfirmState::AwaitingInput,
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    /// Feed one response. Once decided, further input is ignored.
    pub fn feed(&mut self, response: &str) -> ConfirmState {
        if self.state == ConfirmState::AwaitingInput {
            self.state = match response.trim().to_lowercase().as_str() {
                "yes" => ConfirmState::Confirmed,
                "no" => ConfirmState::Cancelled,
                _ => ConfirmState::AwaitingInput,
            };
        }
        self.state
    }

    /// Input ended before a decision.
    pub fn close(&mut self) -> ConfirmState {
        if self.state == ConfirmState::AwaitingInput {
            self.state = ConfirmState::Cancelled;
        }
        self.state
    }
}

/// Where confirmation responses come from.
#[cfg_attr(test, automock)]
pub trait ConfirmSource {
    /// Next response, or `None` at end of input.
    fn next_response(&mut self) -> io::Result<Option<String>>;
}

/// Responses read line by line from a reader, typically stdin.
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> ConfirmSource for LineSource<R> {
    fn next_response(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Ask `prompt` until the source answers yes or no.
///
/// Prompts and re-prompts are written to `out`. Returns `true` only on yes.
pub fn confirm<S, W>(source: &mut S, out: &mut W, prompt: &str) -> io::Result<bool>
where
    S: ConfirmSource + ?Sized,
    W: Write + ?Sized,
{
    let mut confirmation = Confirmation::new();

    loop {
        write!(out, "{prompt} (yes/no): ")?;
        out.flush()?;

        let state = match source.next_response()? {
            Some(response) => confirmation.feed(&response),
            None => {
                writeln!(out)?;
                confirmation.close()
            }
        };

        match state {
            ConfirmState::Confirmed => return Ok(true),
            ConfirmState::Cancelled => {
                writeln!(out, "Cancelled.")?;
                return Ok(false);
            }
            ConfirmState::AwaitingInput => {
                writeln!(out, "Invalid input, please answer 'yes' or 'no'.")?;
            }
        }
    }
}
