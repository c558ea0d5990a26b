// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical splitting of transcript text into boundary-delimited sections.

use regex::Regex;

/// A contiguous transcript fragment: the matched boundary text and every
/// following line up to (not including) the next boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    /// 1-based line number of the boundary line.
    pub line_nr: usize,
    /// The matched boundary text; empty for an implicit leading section.
    pub header: String,
    /// Body lines, newline-joined, newline-terminated.
    pub body: String,
}

/// Split `text` into sections using `boundary` to recognize lines that
/// start a new section.
///
/// Line numbers are counted across the whole input, blank lines included;
/// the empty fragment after a trailing newline is not a line. The very
/// first line always opens a section: when it does not match the boundary
/// pattern the section gets an empty header and the line lands in the
/// body, so concatenating every section's header line and body
/// reconstructs the input exactly.
pub fn split(boundary: &Regex, text: &str) -> Vec<Section> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }

    let mut sections: Vec<Section> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line_nr = idx + 1;
        if let Some(m) = boundary.find(line) {
            sections.push(Section {
                line_nr,
                header: m.as_str().to_string(),
                body: String::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.body.push_str(line);
            current.body.push('\n');
        } else {
            sections.push(Section {
                line_nr,
                header: String::new(),
                body: format!("{line}\n"),
            });
        }
    }

    sections
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
