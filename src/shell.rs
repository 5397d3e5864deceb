//! Line-oriented read-eval-print loop used by the `mathline` binary.

use crate::ast::Evaluator;
use log::debug;
use std::io::{self, BufRead, Write};

pub const DEFAULT_PROMPT: &str = ">> ";

/// Typing this line on its own ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// Reads lines from `input` until `exit` or end of input, writing one result
/// or `error: <message>` line per evaluated expression.
///
/// Only I/O failures are returned; evaluation errors are printed and the loop
/// continues.
pub fn run<R, W>(evaluator: &Evaluator, input: R, mut output: W, prompt: &str) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                debug!("End of input");
                writeln!(output)?;
                return Ok(());
            }
        };

        let line = line.trim_end_matches('\r');
        if line == EXIT_COMMAND {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match evaluator.evaluate_expression(line) {
            Ok(value) => writeln!(output, "{}", value)?,
            Err(err) => writeln!(output, "error: {}", err)?,
        }
    }
}
