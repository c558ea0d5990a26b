// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript parsing for retrace replay tests.
//!
//! A transcript file records one or more command invocations together with
//! the output they are expected to produce, including interactive
//! prompt/input/output rounds. This crate turns transcript text into a
//! [`Transcript`] model and renders a replayed model back to transcript
//! text for golden-file regeneration. Replaying the model against a tool
//! lives in the `retrace` crate.

pub mod escape;
pub mod model;
pub mod parse;
pub mod section;
pub mod token;

pub use model::{Comment, DialogTurn, Fixture, Invocation, Part, Transcript};
pub use parse::{parse, ParseError};
pub use section::Section;
