//! In-place annotation of IPv4 literals in a text stream.
//!
//! Each line is scanned for IPv4 literals left to right. An annotated
//! address `a.b.c.d` becomes `a.b.c.d [tokens]`; everything else,
//! including bytes that are not valid UTF-8, is copied through unchanged.

use regex::bytes::Captures;
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::store::Store;
use crate::validation::ipv4_pattern;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstituteReport {
    pub lines: usize,
    pub replaced: usize,
}

/// Annotate every known address in one line.
///
/// Returns the input unchanged (borrowed) when nothing matched.
pub fn annotate_line<'a>(line: &'a [u8], store: &Store) -> Cow<'a, [u8]> {
    annotate_line_counted(line, store, &mut 0)
}

fn annotate_line_counted<'a>(line: &'a [u8], store: &Store, replaced: &mut usize) -> Cow<'a, [u8]> {
    ipv4_pattern().replace_all(line, |caps: &Captures<'_>| {
        let matched = &caps[0];
        let annotation = std::str::from_utf8(matched)
            .ok()
            .and_then(|text| store.annotation_of(text).map(|a| (text, a)));
        match annotation {
            Some((text, annotation)) => {
                *replaced += 1;
                format!("{text} [{annotation}]").into_bytes()
            }
            None => matched.to_vec(),
        }
    })
}

/// Copy `input` to `output` line by line, annotating addresses.
///
/// Output is flushed after every line so interactive pipes stay in step.
/// Runs until `input` reaches end of file.
pub fn substitute_stream<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    store: &Store,
) -> io::Result<SubstituteReport> {
    let mut report = SubstituteReport::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        report.lines += 1;

        let annotated = annotate_line_counted(&line, store, &mut report.replaced);
        output.write_all(&annotated)?;
        output.flush()?;
    }

    debug!(
        "Substituted {} addresses across {} lines",
        report.replaced, report.lines
    );
    Ok(report)
}
