// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript-driven replay testing for interactive command-line tools.
//!
//! A transcript file records command invocations, interactive dialog turns
//! and the output each is expected to produce. This crate replays every
//! invocation against a tool implementing the [`Tool`] trait, handing it a
//! [`Host`] with virtual stdin/stdout/stderr, environment, fixture files
//! and a readline-style dialog, then compares captured output against the
//! golden expectations per field. With [`Mode::Rewrite`] (selected by the
//! `WRITE_ACTUAL` environment variable) the transcript file is regenerated
//! from the captured actuals instead.
//!
//! Transcript parsing lives in the `retrace-transcript` crate, re-exported
//! here as [`transcript`].

pub mod compare;
pub mod dialog;
pub mod host;
pub mod runner;
pub mod session;

pub use compare::{compare, Mismatch, Mode};
pub use dialog::{DialogPlayer, EOF_SENTINEL};
pub use host::{
    Completer, Completion, FixtureFile, Host, ReadLineError, TermInput, TermOutput, Terminal, Tool,
    ToolError,
};
pub use runner::{replay_file, replay_str, replay_transcript, FileReport, InvocationReport, ReplayError};
pub use session::Session;

pub use retrace_transcript as transcript;
