// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The capability surface the tool under test runs against.
//!
//! The tool never touches the real process environment: it reads and
//! writes through the views a [`Host`] hands out, resolves files through
//! [`Host::open`], and drives its interactive dialog through
//! [`Host::read_line`]. All calls are synchronous and may block the single
//! replay thread.

use parking_lot::Mutex;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use thiserror::Error;

/// Shared byte sink for captured output.
pub(crate) type Sink = Arc<Mutex<Vec<u8>>>;

/// Terminal metadata exposed by input and output views.
pub trait Terminal {
    /// Width and height in cells; zero when not attached.
    fn size(&self) -> (usize, usize);
    fn is_terminal(&self) -> bool;
}

/// Virtual standard input: a byte reader with terminal metadata.
pub struct TermInput {
    reader: Cursor<Vec<u8>>,
    width: usize,
    height: usize,
    terminal: bool,
}

impl TermInput {
    pub(crate) fn new(bytes: Vec<u8>, terminal: bool, width: usize, height: usize) -> Self {
        Self {
            reader: Cursor::new(bytes),
            width,
            height,
            terminal,
        }
    }
}

impl Read for TermInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Terminal for TermInput {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Virtual standard output or error: appends into a shared capture sink.
pub struct TermOutput {
    sink: Sink,
    width: usize,
    height: usize,
    terminal: bool,
}

impl TermOutput {
    pub(crate) fn new(sink: Sink, terminal: bool, width: usize, height: usize) -> Self {
        Self {
            sink,
            width,
            height,
            terminal,
        }
    }
}

impl Write for TermOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Terminal for TermOutput {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// An opened fixture: either in-memory bytes or a real file next to the
/// transcript, behind one reader with a name and size.
pub struct FixtureFile {
    name: String,
    size: u64,
    reader: Box<dyn Read>,
}

impl std::fmt::Debug for FixtureFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl FixtureFile {
    pub(crate) fn from_bytes(name: &str, data: Arc<[u8]>) -> Self {
        Self {
            name: base_name(name),
            size: data.len() as u64,
            reader: Box::new(Cursor::new(data)),
        }
    }

    /// Open the real sibling file backing a fixture with no inline data.
    /// Read-only, shared access: several invocations may read it during
    /// one run.
    pub(crate) fn from_disk(dir: &Path, name: &str) -> io::Result<Self> {
        let path = dir.join(name.trim_start_matches('/'));
        let file = std::fs::File::open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            name: base_name(name),
            size,
            reader: Box::new(file),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for FixtureFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

/// Result of the tool's tab-completion function.
pub struct Completion {
    /// Candidate completions, reported one per line.
    pub candidates: Vec<String>,
    /// Length of the prefix shared by all candidates. Currently unused by
    /// the dialog simulator.
    pub shared: usize,
}

/// Tab-completion callback supplied by the tool: partial line and cursor
/// position in, candidates out.
pub type Completer<'a> = dyn FnMut(&str, usize) -> Completion + 'a;

/// End-of-stream signal from [`Host::read_line`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadLineError {
    /// The scripted dialog has no more lines to deliver.
    #[error("end of input")]
    Eof,
}

/// Outcome of running the tool under test.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Process-exit-style outcome; captured as the actual exit code and
    /// compared normally, never a harness error.
    #[error("exit code {0}")]
    Exit(i32),

    /// The tool could not be constructed or run at all. Fatal for the
    /// harness.
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

/// Entry point of the tool under test.
///
/// Called once per invocation with the host views for that invocation.
/// The call blocks until the tool finishes; there is no timeout and no
/// retry.
pub trait Tool {
    fn run(&mut self, host: &mut dyn Host) -> Result<(), ToolError>;
}

/// The environment one invocation runs in.
///
/// View accessors return fresh views per call with terminal metadata
/// snapshotted from the live environment, so turn-level assignments (for
/// example a changed terminal width) become visible mid-dialog.
pub trait Host {
    /// Positional arguments from the invocation's command line.
    fn args(&self) -> &[String];

    /// Resolved `KEY=VALUE` environment: injected defaults, then
    /// invocation assignments, then dialog-turn assignments, with the last
    /// assignment of a key winning. Deterministically ordered.
    fn environ(&self) -> Vec<String>;

    fn config_dir(&self) -> io::Result<PathBuf>;

    fn stdin(&self) -> TermInput;

    fn stdout(&self) -> TermOutput;

    fn stderr(&self) -> TermOutput;

    /// Resolve a fixture by name. Unknown names surface to the tool as
    /// [`io::ErrorKind::NotFound`], not to the harness.
    fn open(&self, name: &str) -> io::Result<FixtureFile>;

    /// Read one line of interactive input, displaying `prompt` first.
    /// `complete` is invoked when the scripted input requests
    /// tab-completion.
    fn read_line(&mut self, prompt: &str, complete: &mut Completer)
        -> Result<String, ReadLineError>;

    /// Line-editing history; the replay host keeps none.
    fn history(&self) -> Vec<String> {
        Vec::new()
    }

    /// Cancellation signal. `None` means cancellation is unsupported,
    /// which is what the replay host reports.
    fn interrupt(&self) -> Option<Arc<AtomicBool>> {
        None
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
