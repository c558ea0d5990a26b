// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file replay orchestration.
//!
//! Transcripts are replayed one at a time and their invocations in file
//! order, each against a fresh [`Session`]. Discovery of transcript files
//! is the caller's concern; this module takes explicit paths or text.

use crate::compare::{compare, Mismatch, Mode};
use crate::host::Tool;
use crate::session::Session;
use retrace_transcript::{parse, Part, Transcript};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Harness-level failures. A failing tool exit code is not one of these;
/// it is captured and compared like any other field.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to write transcript {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] retrace_transcript::ParseError),

    /// The tool could not run at all (misconfiguration, not a test
    /// failure).
    #[error("tool failed to run: {0}")]
    Tool(#[source] anyhow::Error),
}

/// Comparison outcome for one replayed invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationReport {
    pub line_nr: usize,
    pub command: String,
    /// Empty when every field matched, and always empty in rewrite mode.
    pub mismatches: Vec<Mismatch>,
}

/// Comparison outcome for one transcript file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub invocations: Vec<InvocationReport>,
}

impl FileReport {
    pub fn is_match(&self) -> bool {
        self.invocations.iter().all(|inv| inv.mismatches.is_empty())
    }
}

/// Replay every invocation of an already-parsed transcript, writing
/// captured actuals back into the model.
pub fn replay_transcript(
    transcript: &mut Transcript,
    tool: &mut dyn Tool,
    mode: Mode,
) -> Result<FileReport, ReplayError> {
    let mut invocations = Vec::new();

    for idx in 0..transcript.parts.len() {
        let outcome = {
            let Part::Invocation(inv) = &transcript.parts[idx] else {
                continue;
            };
            let mut session = Session::new(transcript, inv);
            let result = session.run(tool);
            result.map(|code| (code, session.captured_stdout(), session.captured_stderr()))
        };
        let (code, stdout, stderr) = outcome.map_err(ReplayError::Tool)?;

        if let Part::Invocation(inv) = &mut transcript.parts[idx] {
            inv.actual_exit_code = code;
            inv.actual_stdout = stdout;
            inv.actual_stderr = stderr;
            transcript.was_replayed = true;

            let mismatches: Vec<Mismatch> = match mode {
                Mode::Rewrite => Vec::new(),
                Mode::Verify => compare(inv),
            };
            invocations.push(InvocationReport {
                line_nr: inv.line_nr,
                command: inv.command.clone(),
                mismatches,
            });
        }
    }

    Ok(FileReport {
        path: transcript.path.clone(),
        invocations,
    })
}

/// Parse and replay transcript text. `dir` anchors on-disk fixture
/// resolution; the transcript is returned alongside the report so callers
/// can inspect captured actuals or serialize with
/// [`Transcript::to_actual`].
pub fn replay_str(
    text: &str,
    dir: &Path,
    tool: &mut dyn Tool,
    mode: Mode,
) -> Result<(Transcript, FileReport), ReplayError> {
    let mut transcript = parse(text)?;
    transcript.path = dir.join("inline.retrace");
    let report = replay_transcript(&mut transcript, tool, mode)?;
    Ok((transcript, report))
}

/// Read, replay and (in rewrite mode) regenerate one transcript file.
///
/// The file is only rewritten when at least one invocation actually ran.
pub fn replay_file(path: &Path, tool: &mut dyn Tool, mode: Mode) -> Result<FileReport, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut transcript = parse(&text)?;
    transcript.path = path.to_path_buf();
    let report = replay_transcript(&mut transcript, tool, mode)?;

    if mode == Mode::Rewrite && transcript.was_replayed {
        std::fs::write(path, transcript.to_actual()).map_err(|source| ReplayError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(report)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
