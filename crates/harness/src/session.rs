// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation replay driver.
//!
//! A [`Session`] is the [`Host`] for exactly one invocation: it owns the
//! capture buffers, the merged environment, the fixture snapshot and the
//! dialog cursor. Sessions are built fresh per invocation and never
//! reused.

use crate::dialog::DialogPlayer;
use crate::host::{
    Completer, FixtureFile, Host, ReadLineError, Sink, TermInput, TermOutput, Tool, ToolError,
};
use parking_lot::Mutex;
use retrace_transcript::{Invocation, Part, Transcript};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Always-injected environment, overridable by invocation- or turn-level
/// assignments. Sizing keys pin the virtual terminal for reproducible
/// line-wrapping; the suppression pair keeps tool output stable.
const DEFAULT_ENV: [&str; 7] = [
    "_STDIN_WIDTH=135",
    "_STDIN_HEIGHT=25",
    "_STDOUT_WIDTH=135",
    "_STDOUT_HEIGHT=25",
    "_STDOUT_ISTERMINAL=1",
    "NO_COLOR=1",
    "NO_DECODE_PROGRESS=1",
];

struct SessionFixture {
    name: String,
    data: Arc<[u8]>,
}

/// Host implementation for one invocation of the tool under test.
pub struct Session {
    dir: PathBuf,
    args: Vec<String>,
    base_env: Vec<String>,
    stdin: String,
    fixtures: Vec<SessionFixture>,
    dialog: DialogPlayer,
    stdout: Sink,
    stderr: Sink,
}

impl Session {
    /// Build the host views for `invocation`. Fixture data is snapshotted
    /// from the whole transcript (fixtures are not scoped by section), and
    /// the transcript's directory is kept for on-disk fixture fallback.
    pub fn new(transcript: &Transcript, invocation: &Invocation) -> Self {
        let dir = transcript
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let fixtures = transcript
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Fixture(f) => Some(SessionFixture {
                    name: f.name.clone(),
                    data: Arc::from(f.data.as_slice()),
                }),
                _ => None,
            })
            .collect();

        Self {
            dir,
            args: invocation.args.clone(),
            base_env: invocation.env.clone(),
            stdin: invocation.stdin.clone(),
            fixtures,
            dialog: DialogPlayer::new(invocation.turns.clone()),
            stdout: Arc::new(Mutex::new(Vec::new())),
            stderr: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Run the tool to completion and return its exit code.
    ///
    /// A [`ToolError::Exit`] outcome becomes the exit code; a clean return
    /// is exit zero. [`ToolError::Fatal`] propagates: the harness could
    /// not run the tool at all. No retry, no timeout — a hang in the tool
    /// is a test-infrastructure failure, not something the driver
    /// recovers from.
    pub fn run(&mut self, tool: &mut dyn Tool) -> Result<i32, anyhow::Error> {
        match tool.run(self) {
            Ok(()) => Ok(0),
            Err(ToolError::Exit(code)) => Ok(code),
            Err(ToolError::Fatal(err)) => Err(err),
        }
    }

    /// Everything the tool wrote to stdout, prompts and echoes included.
    pub fn captured_stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout.lock()).into_owned()
    }

    pub fn captured_stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr.lock()).into_owned()
    }

    /// Resolve the layered environment, last assignment of a key winning.
    fn resolved_env(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        let layers = DEFAULT_ENV
            .iter()
            .map(|kv| (*kv).to_string())
            .chain(self.base_env.iter().cloned())
            .chain(self.dialog.env().iter().cloned());
        for kv in layers {
            if let Some((key, value)) = kv.split_once('=') {
                if !key.is_empty() {
                    map.insert(key.to_string(), value.to_string());
                }
            }
        }
        map
    }

    fn env_int(&self, name: &str) -> usize {
        self.resolved_env()
            .get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

impl Host for Session {
    fn args(&self) -> &[String] {
        &self.args
    }

    fn environ(&self) -> Vec<String> {
        self.resolved_env()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }

    fn config_dir(&self) -> io::Result<PathBuf> {
        Ok(PathBuf::from("/config"))
    }

    fn stdin(&self) -> TermInput {
        // Empty stdin means terminal-attached; that is how the tool
        // distinguishes interactive from piped input.
        TermInput::new(
            self.stdin.clone().into_bytes(),
            self.stdin.is_empty(),
            self.env_int("_STDIN_WIDTH"),
            self.env_int("_STDIN_HEIGHT"),
        )
    }

    fn stdout(&self) -> TermOutput {
        TermOutput::new(
            Arc::clone(&self.stdout),
            self.env_int("_STDOUT_ISTERMINAL") != 0,
            self.env_int("_STDOUT_WIDTH"),
            self.env_int("_STDOUT_HEIGHT"),
        )
    }

    fn stderr(&self) -> TermOutput {
        TermOutput::new(Arc::clone(&self.stderr), false, 0, 0)
    }

    fn open(&self, name: &str) -> io::Result<FixtureFile> {
        for fixture in &self.fixtures {
            if fixture.name != name {
                continue;
            }
            if fixture.data.is_empty() {
                // No inline data: the fixture is a real file next to the
                // transcript.
                return FixtureFile::from_disk(&self.dir, name);
            }
            return Ok(FixtureFile::from_bytes(name, Arc::clone(&fixture.data)));
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{name}: file not found"),
        ))
    }

    fn read_line(
        &mut self,
        prompt: &str,
        complete: &mut Completer,
    ) -> Result<String, ReadLineError> {
        let stdout = Arc::clone(&self.stdout);
        self.dialog.read_line(prompt, &stdout, complete)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
