use std::fs;
use std::process::Command;

use kmmatching::{solve_file, Error};
use tempfile::TempDir;

fn km() -> Command {
    Command::new(env!("CARGO_BIN_EXE_km"))
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn solves_input_file() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "unique.txt", "3\n7 6 1\n8 2 3\n4 9 6\n");

    let output = km().arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "20\n(1,2)\n(2,1)\n(3,3)\n");

    assert_eq!(solve_file(&path).unwrap().weight, 20);
}

#[test]
fn wrong_argument_count_exits_2() {
    let output = km().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage"));

    let output = km().args(["a.txt", "b.txt"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn malformed_input_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "short.txt", "3037000500 1 2");

    let output = km().arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    assert!(matches!(solve_file(&path), Err(Error::MissingWeight { .. })));
}

#[test]
fn missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.txt");

    let output = km().arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let err = solve_file(&path).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_invalid_input());
}
