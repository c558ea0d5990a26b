// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backslash-escape decoding for binary bytes embedded in transcript text.
//!
//! Transcripts are plain text, but dialog input sometimes has to carry raw
//! control or binary bytes. A small escape grammar covers that: `\n`, `\r`,
//! `\t`, `\b`, `\0b` followed by exactly 8 binary digits, and `\0x`
//! followed by exactly 2 hex digits. Anything else after a backslash passes
//! through untouched, so decoding is total and idempotent on escape-free
//! text.

use regex::Regex;
use std::sync::LazyLock;

/// Static regex for the recognized escape forms.
static ESCAPE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\\(?:t|b|n|r|0(?:b[01]{8}|x[0-9a-fA-F]{2}))").ok());

/// Decode recognized escapes in `text` to raw bytes.
///
/// Returns bytes rather than a `String` because `\0xNN` can produce
/// non-UTF-8 data. Unrecognized backslash sequences are left byte-identical.
pub fn decode(text: &str) -> Vec<u8> {
    let Some(re) = ESCAPE_REGEX.as_ref() else {
        return text.as_bytes().to_vec();
    };

    let mut out = Vec::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.extend_from_slice(text[last..m.start()].as_bytes());
        out.extend_from_slice(&decode_one(m.as_str()));
        last = m.end();
    }
    out.extend_from_slice(text[last..].as_bytes());
    out
}

/// Decode to a `String` for contexts that deliver text lines, replacing any
/// non-UTF-8 bytes with the replacement character.
pub fn decode_to_string(text: &str) -> String {
    String::from_utf8_lossy(&decode(text)).into_owned()
}

/// Encode raw bytes into the escape grammar that [`decode`] accepts.
///
/// Printable ASCII passes through as-is; `\n`, `\r`, `\t` and backspace use
/// their shortcut forms; the backslash itself and every other byte become
/// `\0xNN` so that `decode(encode(bytes))` recovers `bytes` exactly.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\n' => out.push_str(r"\n"),
            b'\r' => out.push_str(r"\r"),
            b'\t' => out.push_str(r"\t"),
            0x08 => out.push_str(r"\b"),
            b'\\' => out.push_str(r"\0x5c"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                out.push_str(r"\0x");
                out.push_str(&format!("{b:02x}"));
            }
        }
    }
    out
}

fn decode_one(escape: &str) -> Vec<u8> {
    match escape {
        r"\n" => vec![b'\n'],
        r"\r" => vec![b'\r'],
        r"\t" => vec![b'\t'],
        r"\b" => vec![0x08],
        _ if escape.starts_with(r"\0b") => radix_byte(&escape[3..], 2),
        _ if escape.starts_with(r"\0x") => radix_byte(&escape[3..], 16),
        other => other.as_bytes().to_vec(),
    }
}

// Best-effort: a payload the pattern matched but the radix parse rejects
// decodes to no bytes at all.
fn radix_byte(payload: &str, radix: u32) -> Vec<u8> {
    u8::from_str_radix(payload, radix)
        .map(|b| vec![b])
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
