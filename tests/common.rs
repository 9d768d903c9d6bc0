#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rlb() -> Command {
    cargo_bin_cmd!("rollbook")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollbook.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and register a small roster useful for many tests:
/// programs Yoga (id 1) and Painting (id 2); members Ada (id 1) and
/// Grace (id 2) in Yoga, Alan (id 3) in Painting.
pub fn seed_roster(db_path: &str) {
    // init DB (creates tables via migrations)
    rlb()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rlb()
        .args(["--db", db_path, "program", "add", "Yoga"])
        .assert()
        .success();

    rlb()
        .args(["--db", db_path, "program", "add", "Painting"])
        .assert()
        .success();

    rlb()
        .args([
            "--db",
            db_path,
            "member",
            "add",
            "Ada",
            "--program",
            "1",
            "--phone",
            "010-1111-2222",
            "--date",
            "2026-03-01",
        ])
        .assert()
        .success();

    rlb()
        .args([
            "--db", db_path, "member", "add", "Grace", "--program", "1", "--date", "2026-03-01",
        ])
        .assert()
        .success();

    rlb()
        .args([
            "--db", db_path, "member", "add", "Alan", "--program", "2", "--date", "2026-03-01",
        ])
        .assert()
        .success();
}

/// Seed the standard March 2026 marks on top of the roster:
/// Ada present and Grace absent on 2026-03-02.
pub fn seed_marks(db_path: &str) {
    rlb()
        .args(["--db", db_path, "mark", "2026-03-02", "1", "present"])
        .assert()
        .success();

    rlb()
        .args(["--db", db_path, "mark", "2026-03-02", "2", "absent"])
        .assert()
        .success();
}
