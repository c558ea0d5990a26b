// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn term_input_reads_bytes_and_reports_metadata() {
    let mut input = TermInput::new(b"piped".to_vec(), false, 135, 25);
    let mut buf = String::new();
    input.read_to_string(&mut buf).unwrap();
    assert_eq!(buf, "piped");
    assert_eq!(input.size(), (135, 25));
    assert!(!input.is_terminal());
}

#[test]
fn term_input_empty_is_terminal_attached() {
    let input = TermInput::new(Vec::new(), true, 135, 25);
    assert!(input.is_terminal());
}

#[test]
fn term_output_appends_to_shared_sink() {
    let sink: Sink = Arc::new(Mutex::new(Vec::new()));
    let mut a = TermOutput::new(Arc::clone(&sink), true, 80, 25);
    let mut b = TermOutput::new(Arc::clone(&sink), true, 80, 25);
    a.write_all(b"one ").unwrap();
    b.write_all(b"two").unwrap();
    a.flush().unwrap();
    assert_eq!(&*sink.lock(), b"one two");
    assert_eq!(a.size(), (80, 25));
    assert!(a.is_terminal());
}

#[test]
fn fixture_file_from_bytes_exposes_name_and_size() {
    let data: Arc<[u8]> = Arc::from(&b"abc"[..]);
    let mut fixture = FixtureFile::from_bytes("/dir/file.bin", data);
    assert_eq!(fixture.name(), "file.bin");
    assert_eq!(fixture.size(), 3);
    let mut buf = Vec::new();
    fixture.read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"abc");
}

#[test]
fn fixture_file_from_disk_reads_sibling_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("blob.bin"), b"on disk").unwrap();
    let mut fixture = FixtureFile::from_disk(dir.path(), "/blob.bin").unwrap();
    assert_eq!(fixture.name(), "blob.bin");
    assert_eq!(fixture.size(), 7);
    let mut buf = Vec::new();
    fixture.read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"on disk");
}

#[test]
fn fixture_file_from_disk_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = FixtureFile::from_disk(dir.path(), "/nope.bin").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn read_line_eof_display() {
    assert_eq!(ReadLineError::Eof.to_string(), "end of input");
}

#[test]
fn tool_error_exit_carries_code() {
    assert_eq!(ToolError::Exit(2).to_string(), "exit code 2");
}
