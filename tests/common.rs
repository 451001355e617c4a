#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn bb() -> Command {
    cargo_bin_cmd!("banban")
}

/// `banban --db <db> --test --today <today> <args...>`
pub fn bb_at(db_path: &str, today: &str) -> Command {
    let mut cmd = bb();
    cmd.args(["--db", db_path, "--test", "--today", today]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_banban.sqlite", name));
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

pub const TODAY: &str = "2025-06-15";

/// Initialize DB and add a small dataset useful for many tests:
///
/// - worker #1 김철수, 20,000/h, 3.3% withheld
/// - worker #2 이영희, 15,000/h
/// - client #1 한빛건설
/// - schedule #1 "한빛 현장" 2025-06-10, 1,000,000, client #1, category 행사,
///   assignment #1 (김철수, 09:00-17:00)
/// - schedule #2 "개인 일정" 2025-06-12, personal
/// - schedule #3 "축제 지원" 2025-06-20, 500,000, category 축제,
///   assignment #2 (이영희, 10:00-14:00, fuel 10,000)
pub fn init_db_with_data(db_path: &str) {
    bb().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    bb_at(db_path, TODAY)
        .args([
            "worker", "add", "김철수", "--phone", "010-1111-2222", "--account", "3333-01-1234567",
            "--wage", "20000", "--tax",
        ])
        .assert()
        .success();

    bb_at(db_path, TODAY)
        .args(["worker", "add", "이영희", "--wage", "15000"])
        .assert()
        .success();

    bb_at(db_path, TODAY)
        .args(["client", "add", "한빛건설", "--phone", "02-123-4567"])
        .assert()
        .success();

    bb_at(db_path, TODAY)
        .args([
            "schedule", "add", "한빛 현장", "--start", "2025-06-10", "--amount", "1000000",
            "--client", "1", "--category", "행사", "--worker", "1", "--in", "09:00", "--out",
            "17:00",
        ])
        .assert()
        .success();

    bb_at(db_path, TODAY)
        .args(["schedule", "add", "개인 일정", "--start", "2025-06-12", "--type", "p"])
        .assert()
        .success();

    bb_at(db_path, TODAY)
        .args([
            "schedule", "add", "축제 지원", "--start", "2025-06-20", "--amount", "500000",
            "--category", "축제", "--worker", "2", "--in", "10:00", "--out", "14:00", "--fuel",
            "10000",
        ])
        .assert()
        .success();
}
