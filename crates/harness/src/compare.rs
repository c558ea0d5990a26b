// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field-by-field comparison of captured output against golden
//! expectations.

use retrace_transcript::Invocation;
use serde::{Deserialize, Serialize};
use similar::TextDiff;
use std::fmt;

/// Process-wide operating mode, chosen once at startup and passed down
/// explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Compare captured output against the transcript's expectations.
    #[default]
    Verify,
    /// Regenerate the transcript from captured output instead of
    /// comparing.
    Rewrite,
}

impl Mode {
    /// `WRITE_ACTUAL` non-empty in the process environment selects
    /// rewrite mode.
    pub fn from_env() -> Self {
        Self::from_write_actual(std::env::var("WRITE_ACTUAL").ok().as_deref())
    }

    fn from_write_actual(value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => Mode::Rewrite,
            _ => Mode::Verify,
        }
    }
}

/// One divergent field: its name and the expected and actual values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} differs", self.field)?;
        let diff = TextDiff::from_lines(&self.expected, &self.actual);
        write!(f, "{}", diff.unified_diff().header("expected", "actual"))
    }
}

/// Compare a replayed invocation's actuals against its expectations.
///
/// Every divergent field is reported, not just the first. The stdout
/// expectation comes from [`Invocation::expected_stdout_text`], which
/// reconstructs per-turn expectations for dialog invocations.
pub fn compare(invocation: &Invocation) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    check(
        &mut mismatches,
        "exitcode",
        &invocation.expected_exit_code.to_string(),
        &invocation.actual_exit_code.to_string(),
    );
    check(
        &mut mismatches,
        "stdout",
        &invocation.expected_stdout_text(),
        &invocation.actual_stdout,
    );
    check(
        &mut mismatches,
        "stderr",
        &invocation.expected_stderr,
        &invocation.actual_stderr,
    );
    mismatches
}

fn check(out: &mut Vec<Mismatch>, field: &str, expected: &str, actual: &str) {
    if expected != actual {
        out.push(Mismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
