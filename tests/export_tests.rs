mod common;
use common::{TODAY, bb_at, init_db_with_data, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_unpaid_csv() {
    let db_path = setup_test_db("export_unpaid_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_unpaid_csv", "csv");

    bb_at(&db_path, TODAY)
        .args([
            "export", "--report", "unpaid", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let header = content.lines().next().unwrap_or_default();
    assert!(header.starts_with("assignment_id,schedule_id,schedule_title"));
    assert!(header.contains("wage_paid"));
    assert!(content.contains("김철수"));
    assert!(content.contains("154720"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_export_category_json() {
    let db_path = setup_test_db("export_category_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_category_json", "json");

    bb_at(&db_path, TODAY)
        .args([
            "export", "--report", "category", "--format", "json", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["category"], "행사");
    assert_eq!(rows[0]["revenue"], 1_000_000);
    assert_eq!(rows[1]["category"], "축제");
}

#[test]
fn test_export_schedules_with_period() {
    let db_path = setup_test_db("export_schedules_period");
    init_db_with_data(&db_path);

    let out = temp_out("export_schedules_period", "csv");

    bb_at(&db_path, TODAY)
        .args([
            "export",
            "--report",
            "schedules",
            "--format",
            "csv",
            "--file",
            &out,
            "--period",
            "2025-06-01:2025-06-15",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("한빛 현장"));
    assert!(content.contains("845280"));
    assert!(!content.contains("축제 지원"));
    assert!(!content.contains("개인 일정"));
}

#[test]
fn test_export_trend_has_twelve_rows() {
    let db_path = setup_test_db("export_trend");
    init_db_with_data(&db_path);

    let out = temp_out("export_trend", "csv");

    bb_at(&db_path, TODAY)
        .args(["export", "--report", "trend", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 13);
    assert!(lines[1].starts_with("2024-07,"));
    assert!(lines[12].starts_with("2025-06,1500000,"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["export", "--report", "category", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_empty_report_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db_with_data(&db_path);

    let out = temp_out("export_empty", "csv");

    bb_at(&db_path, TODAY)
        .args([
            "export", "--report", "client", "--file", &out, "--period", "2020",
        ])
        .assert()
        .success()
        .stdout(contains("No rows"));

    assert!(!std::path::Path::new(&out).exists());
}
