// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replay of pre-recorded dialog turns against the tool's readline
//! contract.

use crate::host::{Completer, ReadLineError, Sink};
use retrace_transcript::escape;
use retrace_transcript::DialogTurn;

/// Literal input that terminates the dialog with end-of-stream instead of
/// delivering a line.
pub const EOF_SENTINEL: &str = "^D";

/// Stateful simulator of an interactive read-eval-print dialog.
///
/// Each `read_line` consumes the next turn: the prompt and the turn's
/// display expression are echoed into captured stdout, and the de-escaped
/// input is delivered as the read line. A turn whose input ends in a tab
/// is a completion request; one equal to [`EOF_SENTINEL`] ends the dialog.
pub struct DialogPlayer {
    turns: Vec<DialogTurn>,
    pos: usize,
    env: Vec<String>,
}

impl DialogPlayer {
    pub fn new(turns: Vec<DialogTurn>) -> Self {
        Self {
            turns,
            pos: 0,
            env: Vec::new(),
        }
    }

    /// Environment assignments from every turn consumed so far. Overrides
    /// persist forward within the invocation.
    pub fn env(&self) -> &[String] {
        &self.env
    }

    pub(crate) fn read_line(
        &mut self,
        prompt: &str,
        stdout: &Sink,
        complete: &mut Completer,
    ) -> Result<String, ReadLineError> {
        stdout.lock().extend_from_slice(prompt.as_bytes());

        let Some(turn) = self.turns.get(self.pos) else {
            return Err(ReadLineError::Eof);
        };
        let raw = turn.input.clone();
        let expr = turn.expr.clone();
        let line = escape::decode_to_string(&raw);
        self.env.extend(turn.env.iter().cloned());
        self.pos += 1;

        if let Some(partial) = line.strip_suffix('\t') {
            // Completion request: echo the raw input, ask the tool for
            // candidates at the cursor, echo each candidate, and answer
            // this read with an empty line.
            echo_line(stdout, &raw);
            let cursor = partial.len();
            let completion = complete(partial, cursor);
            // TODO: render the shared-prefix hint once a consumer exists
            for candidate in &completion.candidates {
                echo_line(stdout, candidate);
            }
            return Ok(String::new());
        }

        echo_line(stdout, &expr);

        if line == EOF_SENTINEL {
            return Err(ReadLineError::Eof);
        }
        Ok(line)
    }
}

fn echo_line(stdout: &Sink, text: &str) {
    let mut out = stdout.lock();
    out.extend_from_slice(text.as_bytes());
    out.push(b'\n');
}

#[cfg(test)]
#[path = "dialog_tests.rs"]
mod tests;
