//! Command Shell
//!
//! Reads command lines, executes them, and writes one message per line.
//! A failed command prints `Error: ...` and the loop carries on.

use std::io::{BufRead, Write};

use crate::engine::Engine;
use crate::error::Result;
use crate::protocol::parse_command;

/// Lines that end the session
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Line-oriented front end over an [`Engine`]
pub struct Shell<'a> {
    engine: &'a Engine,
}

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub executed: usize,
    pub failed: usize,
}

impl<'a> Shell<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Run one line, returning the text to show the operator
    ///
    /// `None` for blank lines. Errors are rendered, never propagated.
    pub fn execute_line(&self, line: &str) -> Option<std::result::Result<String, String>> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(e) => return Some(Err(format!("Error: {}", e))),
        };

        tracing::trace!(?command, "executing");

        Some(match self.engine.execute(command) {
            Ok(response) => Ok(response.to_string()),
            Err(e) => Err(format!("Error: {}", e)),
        })
    }

    /// Process `input` until EOF or an exit command
    ///
    /// Only I/O failures on `input`/`output` end the loop early.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<SessionStats> {
        let mut stats = SessionStats::default();

        for line in input.lines() {
            let line = line?;
            if EXIT_COMMANDS.contains(&line.trim()) {
                break;
            }

            match self.execute_line(&line) {
                None => {}
                Some(Ok(message)) => {
                    stats.executed += 1;
                    writeln!(output, "{}", message)?;
                }
                Some(Err(message)) => {
                    stats.failed += 1;
                    writeln!(output, "{}", message)?;
                }
            }
            output.flush()?;
        }

        Ok(stats)
    }
}
