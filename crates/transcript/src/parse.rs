// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript model builder: section stream in, [`Transcript`] out.

use crate::model::{Comment, DialogTurn, Fixture, Invocation, Part, Transcript};
use crate::section;
use crate::token;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Static regex for lines that start a new section: invocation headers,
/// `stdin:`/`stderr:`/`exitcode:` lines, comments, fixture paths, and
/// dialog-prompt lines.
///
/// The prompt alternative is heuristic (any line whose text before a `>`
/// avoids `<`, `:` and `|`); first matching alternative wins.
// TODO: survey existing transcripts for body lines that collide with the
// prompt alternative, then replace it with an explicit prompt marker.
static BOUNDARY_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\$ .*$|^stdin:$|^stderr:$|^exitcode:.*$|^#.*$|^/.*:|^[^<:|]*>.*$").ok()
});

const PROMPT_END: char = '>';

/// Errors from building a transcript model. All of these are
/// static-content bugs in the transcript file and abort its parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("section boundary pattern failed to compile")]
    BoundaryPattern,

    #[error("{line}: unrecognized section {header:?}")]
    UnrecognizedSection { line: usize, header: String },

    #[error("{line}: {header:?} section before any command invocation")]
    SectionOutsideInvocation { line: usize, header: String },
}

/// Parse transcript text into a [`Transcript`].
///
/// The returned transcript has an empty `path`; callers that read from
/// disk fill it in so fixture resolution can fall back to sibling files.
pub fn parse(text: &str) -> Result<Transcript, ParseError> {
    let boundary = BOUNDARY_REGEX.as_ref().ok_or(ParseError::BoundaryPattern)?;

    let mut parts: Vec<Part> = Vec::new();
    let mut current: Option<Invocation> = None;

    for sec in section::split(boundary, text) {
        let line = sec.line_nr;
        let header = sec.header;
        let body = sec.body;

        if let Some(comment) = header.strip_prefix('#') {
            parts.push(Part::Comment(Comment {
                line_nr: line,
                text: comment.to_string(),
            }));
        } else if header.starts_with('/') {
            // Header keeps its trailing path delimiter; strip it for the name.
            let name = header[..header.len() - 1].to_string();
            parts.push(Part::Fixture(Fixture {
                line_nr: line,
                name,
                data: body.into_bytes(),
            }));
        } else if let Some(command) = header.strip_prefix('$') {
            if let Some(done) = current.take() {
                parts.push(Part::Invocation(done));
            }
            // A trailing continuation marker means the expected stdout
            // intentionally has no trailing newline.
            let expected_stdout = body.strip_suffix("\\\n").unwrap_or(&body).to_string();
            let (env, args) = token::parse_command(command);
            current = Some(Invocation {
                line_nr: line,
                command: command.to_string(),
                env,
                args,
                expected_stdout,
                ..Invocation::default()
            });
        } else if let Some(code) = header.strip_prefix("exitcode:") {
            let inv = current_mut(&mut current, line, &header)?;
            inv.expected_exit_code = code.trim().parse().unwrap_or(0);
        } else if header.starts_with("stdin") {
            current_mut(&mut current, line, &header)?.stdin = body;
        } else if header.starts_with("stderr") {
            current_mut(&mut current, line, &header)?.expected_stderr = body;
        } else if let Some(i) = header.rfind(PROMPT_END) {
            let inv = current_mut(&mut current, line, &header)?;
            let expected_prompt = format!("{}{} ", &header[..i], PROMPT_END);
            let expr = header[i + 1..].trim().to_string();
            let (env, input) = token::parse_input(&expr);
            inv.turns.push(DialogTurn {
                expr,
                env,
                input,
                expected_prompt,
                expected_stdout: body,
            });
        } else {
            return Err(ParseError::UnrecognizedSection { line, header });
        }
    }

    if let Some(done) = current.take() {
        parts.push(Part::Invocation(done));
    }

    Ok(Transcript {
        parts,
        ..Transcript::default()
    })
}

fn current_mut<'a>(
    current: &'a mut Option<Invocation>,
    line: usize,
    header: &str,
) -> Result<&'a mut Invocation, ParseError> {
    current.as_mut().ok_or_else(|| ParseError::SectionOutsideInvocation {
        line,
        header: header.to_string(),
    })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
