// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript data model and golden serialization.

use std::path::PathBuf;

/// A documentation line, preserved verbatim and never executed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comment {
    pub line_nr: usize,
    /// Text after the leading `#`.
    pub text: String,
}

/// A named virtual file available to every invocation that follows it.
///
/// Empty `data` means the fixture resolves to a real file next to the
/// transcript on disk instead of in-memory bytes, which lets large or
/// binary fixtures live as sibling files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fixture {
    pub line_nr: usize,
    pub name: String,
    pub data: Vec<u8>,
}

/// One prompt/input/output round of a simulated interactive session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogTurn {
    /// The expression in its original display form (not de-escaped).
    pub expr: String,
    /// Environment assignments parsed from this turn's input line. They
    /// take effect starting with this turn and persist forward within the
    /// invocation.
    pub env: Vec<String>,
    /// The input substring to de-escape and deliver as the read line.
    pub input: String,
    /// Prompt text expected immediately before the echoed expression.
    pub expected_prompt: String,
    /// Output expected to follow the echoed expression.
    pub expected_stdout: String,
}

/// One command run recorded in a transcript, with its expectations and,
/// after replay, its captured actuals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub line_nr: usize,
    /// Raw command line after the `$` marker.
    pub command: String,
    /// Leading `KEY=VALUE` assignments from the command line.
    pub env: Vec<String>,
    /// Positional arguments from the command line.
    pub args: Vec<String>,
    /// Literal stdin bytes; empty means terminal-attached.
    pub stdin: String,
    pub expected_stdout: String,
    pub expected_stderr: String,
    pub expected_exit_code: i32,
    pub turns: Vec<DialogTurn>,

    pub actual_stdout: String,
    pub actual_stderr: String,
    pub actual_exit_code: i32,
}

impl Invocation {
    /// The stdout this invocation is expected to produce.
    ///
    /// With dialog turns the expectation is stored per turn, so it is
    /// reconstructed by concatenating each turn's prompt, echoed
    /// expression and expected output in order.
    pub fn expected_stdout_text(&self) -> String {
        if self.turns.is_empty() {
            return self.expected_stdout.clone();
        }

        let mut out = String::new();
        for turn in &self.turns {
            out.push_str(&turn.expected_prompt);
            out.push_str(&turn.expr);
            out.push('\n');
            out.push_str(&turn.expected_stdout);
        }
        out
    }
}

/// A typed transcript part, ordered by originating line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Comment(Comment),
    Fixture(Fixture),
    Invocation(Invocation),
}

impl Part {
    /// The 1-based transcript line this part originates from.
    pub fn line_nr(&self) -> usize {
        match self {
            Part::Comment(c) => c.line_nr,
            Part::Fixture(f) => f.line_nr,
            Part::Invocation(i) => i.line_nr,
        }
    }
}

/// One test-script file containing ordered parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    pub path: PathBuf,
    pub parts: Vec<Part>,
    /// Whether at least one invocation was actually run; rewriting is only
    /// permitted when true.
    pub was_replayed: bool,
}

impl Transcript {
    /// Look up a fixture by name. Fixtures are visible to every invocation
    /// in the transcript, with no scoping by section.
    pub fn fixture(&self, name: &str) -> Option<&Fixture> {
        self.parts.iter().find_map(|part| match part {
            Part::Fixture(f) if f.name == name => Some(f),
            _ => None,
        })
    }

    /// Serialize the transcript back to text with expectations replaced by
    /// captured actuals.
    ///
    /// Invocations render their actual stdout (a `\` continuation marker
    /// is appended when it is non-empty without a trailing newline), an
    /// `exitcode:` line only when nonzero, and stdin/stderr blocks only
    /// when non-empty. Comments and fixtures render in original form.
    pub fn to_actual(&self) -> String {
        let mut ordered: Vec<&Part> = self.parts.iter().collect();
        ordered.sort_by_key(|part| part.line_nr());

        let mut out = String::new();
        for part in ordered {
            match part {
                Part::Comment(c) => {
                    out.push('#');
                    out.push_str(&c.text);
                    out.push('\n');
                }
                Part::Fixture(f) => {
                    out.push_str(&f.name);
                    out.push_str(":\n");
                    out.push_str(&String::from_utf8_lossy(&f.data));
                }
                Part::Invocation(inv) => {
                    out.push('$');
                    out.push_str(&inv.command);
                    out.push('\n');
                    if !inv.actual_stdout.is_empty() {
                        out.push_str(&inv.actual_stdout);
                        if !inv.actual_stdout.ends_with('\n') {
                            out.push_str("\\\n");
                        }
                    }
                    if inv.actual_exit_code != 0 {
                        out.push_str(&format!("exitcode: {}\n", inv.actual_exit_code));
                    }
                    if !inv.stdin.is_empty() {
                        out.push_str("stdin:\n");
                        out.push_str(&inv.stdin);
                    }
                    if !inv.actual_stderr.is_empty() {
                        out.push_str("stderr:\n");
                        out.push_str(&inv.actual_stderr);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
