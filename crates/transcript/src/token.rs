// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell-like tokenizing for invocation headers and dialog input lines.
//!
//! Invocation headers get full quote-aware splitting so arguments can
//! contain spaces. Dialog input lines only get their leading `KEY=VALUE`
//! assignments peeled off; the rest of the original string is preserved
//! verbatim, since a query expression must reach the tool exactly as
//! written.

use regex::Regex;
use std::sync::LazyLock;

/// Static regex for a `KEY=VALUE` environment assignment token.
static ASSIGN_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[A-Z_]+=").ok());

fn is_assignment(token: &str) -> bool {
    ASSIGN_REGEX.as_ref().is_some_and(|re| re.is_match(token))
}

/// Split `text` into tokens with shell-style quoting.
///
/// Whitespace separates tokens; single- and double-quoted spans group
/// verbatim (no escapes inside quotes); adjacent quoted and bare pieces
/// concatenate into one token. An unterminated quote runs to end of input.
pub fn split(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;

    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                in_token = true;
                for q in chars.by_ref() {
                    if q == c {
                        break;
                    }
                    current.push(q);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
}

/// Split an invocation command line into leading environment assignments
/// and the positional argument list.
///
/// Only a maximal leading run of tokens counts as assignments; a
/// `KEY=VALUE` token after the first positional argument stays an argument.
pub fn parse_command(command: &str) -> (Vec<String>, Vec<String>) {
    let tokens = split(command);
    let mut env = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if is_assignment(token) {
            env.push(token.clone());
            continue;
        }
        return (env, tokens[i..].to_vec());
    }
    (env, Vec::new())
}

/// Split a dialog input line into leading environment assignments and the
/// literal remainder of the string.
///
/// Unlike [`parse_command`] this is not quote-aware: assignments are plain
/// whitespace-delimited words, and the returned input is the original
/// substring after the last consumed assignment, spaces included.
pub fn parse_input(input: &str) -> (Vec<String>, String) {
    let mut env = Vec::new();
    let mut cut = 0;

    loop {
        let rest = &input[cut..];
        let skip = rest.len() - rest.trim_start().len();
        let word_start = cut + skip;
        let word_end = input[word_start..]
            .find(char::is_whitespace)
            .map_or(input.len(), |i| word_start + i);
        let word = &input[word_start..word_end];
        if word.is_empty() || !is_assignment(word) {
            break;
        }
        env.push(word.to_string());
        cut = word_end;
    }

    (env, input[cut..].to_string())
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
