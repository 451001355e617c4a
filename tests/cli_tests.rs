use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{TODAY, bb, bb_at, init_db_with_data, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    bb().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_worker_add_detects_bank() {
    let db_path = setup_test_db("cli_worker_bank");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["worker", "list"])
        .assert()
        .success()
        .stdout(contains("김철수").and(contains("카카오뱅크")))
        .stdout(contains("20,000원"));
}

#[test]
fn test_worker_edit_changes_wage() {
    let db_path = setup_test_db("cli_worker_edit");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["worker", "edit", "2", "--wage", "18000"])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["worker", "list"])
        .assert()
        .success()
        .stdout(contains("18,000원"));
}

#[test]
fn test_worker_add_requires_name() {
    let db_path = setup_test_db("cli_worker_name");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["worker", "add", "  ", "--wage", "10000"])
        .assert()
        .failure()
        .stderr(contains("worker name is required"));
}

#[test]
fn test_report_period_month() {
    let db_path = setup_test_db("cli_report_month");
    init_db_with_data(&db_path);

    // 1,000,000 + 500,000 revenue; 154,720 + 60,000 expense
    bb_at(&db_path, TODAY)
        .args(["report", "period", "--period", "month"])
        .assert()
        .success()
        .stdout(contains("1,500,000원"))
        .stdout(contains("214,720원"))
        .stdout(contains("1,285,280원"));
}

#[test]
fn test_report_period_custom_range_with_details() {
    let db_path = setup_test_db("cli_report_range");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args([
            "report",
            "period",
            "--period",
            "2025-06-01:2025-06-15",
            "--details",
        ])
        .assert()
        .success()
        .stdout(contains("845,280원"))
        .stdout(contains("한빛 현장"))
        .stdout(contains("축제 지원").not())
        .stdout(contains("개인 일정").not());
}

#[test]
fn test_report_period_rejects_bad_range() {
    let db_path = setup_test_db("cli_report_bad_range");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["report", "period", "--period", "2025-06:2025-05"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_report_category_shares() {
    let db_path = setup_test_db("cli_report_category");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["report", "category"])
        .assert()
        .success()
        .stdout(contains("행사").and(contains("66.7%")))
        .stdout(contains("축제").and(contains("33.3%")));
}

#[test]
fn test_report_client_explicit_and_title_fallback() {
    let db_path = setup_test_db("cli_report_client");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["report", "client"])
        .assert()
        .success()
        .stdout(contains("한빛건설"))
        .stdout(contains("축제").not());

    bb_at(&db_path, TODAY)
        .args(["report", "client", "--title-fallback"])
        .assert()
        .success()
        .stdout(contains("한빛건설"))
        .stdout(contains("축제"));
}

#[test]
fn test_report_trend_covers_twelve_months() {
    let db_path = setup_test_db("cli_report_trend");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["report", "trend"])
        .assert()
        .success()
        .stdout(contains("2024-07"))
        .stdout(contains("2025-06"))
        .stdout(contains("2024-06").not())
        .stdout(contains("2025-07").not());
}

#[test]
fn test_pay_removes_assignment_from_unpaid() {
    let db_path = setup_test_db("cli_pay_unpaid");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["report", "unpaid"])
        .assert()
        .success()
        .stdout(contains("김철수").and(contains("이영희")));

    bb_at(&db_path, TODAY)
        .args(["pay", "1"])
        .assert()
        .success()
        .stdout(contains("fully paid"));

    bb_at(&db_path, TODAY)
        .args(["report", "unpaid"])
        .assert()
        .success()
        .stdout(contains("이영희"))
        .stdout(contains("김철수").not());

    // Already paid: nothing is written again.
    bb_at(&db_path, TODAY)
        .args(["pay", "1", "--wage"])
        .assert()
        .success()
        .stdout(contains("Nothing to pay"));
}

#[test]
fn test_pay_wage_only_keeps_fuel_outstanding() {
    let db_path = setup_test_db("cli_pay_partial");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["pay", "2", "--wage"])
        .assert()
        .success()
        .stdout(contains("wage marked as paid"))
        .stdout(contains("fully paid").not());

    // total 70,000 still listed, 10,000 of it outstanding
    bb_at(&db_path, TODAY)
        .args(["report", "unpaid", "--details"])
        .assert()
        .success()
        .stdout(contains("70,000원"))
        .stdout(contains("10,000원"));
}

#[test]
fn test_pay_unknown_assignment() {
    let db_path = setup_test_db("cli_pay_unknown");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["pay", "99"])
        .assert()
        .failure()
        .stderr(contains("assignment #99 not found"));
}

#[test]
fn test_personal_schedule_cannot_take_workers() {
    let db_path = setup_test_db("cli_personal_workers");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args([
            "schedule", "add", "휴가", "--start", "2025-06-25", "--type", "p", "--worker", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));

    bb_at(&db_path, TODAY)
        .args(["schedule", "assign", "2", "1"])
        .assert()
        .failure()
        .stderr(contains("personal"));
}

#[test]
fn test_failed_schedule_add_leaves_no_orphan() {
    let db_path = setup_test_db("cli_schedule_orphan");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args([
            "schedule", "add", "유령 현장", "--start", "2025-06-21", "--amount", "300000",
            "--worker", "1", "--worker", "99",
        ])
        .assert()
        .failure()
        .stderr(contains("worker #99 not found"));

    bb_at(&db_path, TODAY)
        .args(["schedule", "list"])
        .assert()
        .success()
        .stdout(contains("유령 현장").not());
}

#[test]
fn test_schedule_uniform_periods_and_contract() {
    let db_path = setup_test_db("cli_schedule_uniform");
    init_db_with_data(&db_path);

    // Three days × 8h × 15,000 = 360,000
    bb_at(&db_path, TODAY)
        .args([
            "schedule", "add", "3일 행사", "--start", "2025-06-02", "--end", "2025-06-04",
            "--amount", "900000", "--worker", "2", "--in", "09:00", "--out", "18:00", "--break",
            "60", "--uniform", "--contract", "written",
        ])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["schedule", "list", "--period", "2025-06-02:2025-06-04", "--details"])
        .assert()
        .success()
        .stdout(contains("3일 행사"))
        .stdout(contains("24.0h"))
        .stdout(contains("360,000원"))
        .stdout(contains("pending"));
}

#[test]
fn test_schedule_add_wage_and_tax_override_worker_defaults() {
    let db_path = setup_test_db("cli_schedule_wage_tax");
    init_db_with_data(&db_path);

    // 이영희 defaults to 15,000/h without withholding.
    // 8h × 30,000 = 240,000, tax 7,920, net 232,080
    bb_at(&db_path, TODAY)
        .args([
            "schedule", "add", "야간 설치", "--start", "2025-06-05", "--amount", "500000",
            "--worker", "2", "--wage", "30000", "--tax", "true", "--in", "09:00", "--out",
            "17:00",
        ])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["schedule", "list", "--period", "2025-06-05", "--details"])
        .assert()
        .success()
        .stdout(contains("야간 설치"))
        .stdout(contains("30,000원"))
        .stdout(contains("240,000원"))
        .stdout(contains("7,920원"))
        .stdout(contains("232,080원"))
        .stdout(contains("15,000원").not());
}

#[test]
fn test_schedule_add_rejects_negative_wage_override() {
    let db_path = setup_test_db("cli_schedule_neg_wage");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args([
            "schedule", "add", "잘못된 시급", "--start", "2025-06-05", "--worker", "2",
            "--wage=-1",
        ])
        .assert()
        .failure()
        .stderr(contains("hourly wage"));

    bb_at(&db_path, TODAY)
        .args(["schedule", "list", "--period", "2025-06-05"])
        .assert()
        .success()
        .stdout(contains("잘못된 시급").not());
}

#[test]
fn test_schedule_period_and_contract_commands() {
    let db_path = setup_test_db("cli_schedule_period");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args([
            "schedule", "period", "1", "--date", "2025-06-11", "--in", "09:00", "--out", "13:00",
        ])
        .assert()
        .success()
        .stdout(contains("1 period(s) added"));

    bb_at(&db_path, TODAY)
        .args([
            "schedule", "contract", "1", "--type", "verbal", "--status", "active",
        ])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["schedule", "list", "--details"])
        .assert()
        .success()
        .stdout(contains("12.0h"))
        .stdout(contains("active"));
}

#[test]
fn test_client_contacts_single_primary() {
    let db_path = setup_test_db("cli_client_primary");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["client", "contact", "1", "박과장", "--primary"])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["client", "contact", "1", "최대리", "--primary"])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["client", "list"])
        .assert()
        .success()
        .stdout(contains("최대리"))
        .stdout(contains("박과장").not());

    bb_at(&db_path, TODAY)
        .args(["client", "primary", "1", "1"])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["client", "list"])
        .assert()
        .success()
        .stdout(contains("박과장"))
        .stdout(contains("최대리").not());
}

#[test]
fn test_client_add_requires_phone() {
    let db_path = setup_test_db("cli_client_phone");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["client", "add", "무명상사", "--phone", ""])
        .assert()
        .failure()
        .stderr(contains("client phone is required"));
}

#[test]
fn test_client_refresh_totals() {
    let db_path = setup_test_db("cli_client_refresh");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["client", "refresh", "1"])
        .assert()
        .success()
        .stdout(contains("1,000,000원"));
}

#[test]
fn test_category_add_normalizes_colour() {
    let db_path = setup_test_db("cli_category");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["category", "add", "행사", "--color", "#f0a"])
        .assert()
        .success();

    bb_at(&db_path, TODAY)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("#FF00AA"));

    bb_at(&db_path, TODAY)
        .args(["category", "add", "잘못", "--color", "blue"])
        .assert()
        .failure()
        .stderr(contains("Invalid colour"));
}

#[test]
fn test_log_records_mutations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_data(&db_path);

    bb_at(&db_path, TODAY)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("worker_add"))
        .stdout(contains("schedule_add"));

    bb_at(&db_path, TODAY)
        .args(["log", "--print", "--recent", "1"])
        .assert()
        .success()
        .stdout(contains("schedule_add"))
        .stdout(contains("worker_add").not());
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_data(&db_path);

    let out = common::temp_out("cli_backup", "sqlite");
    let zip = common::temp_out("cli_backup", "zip");

    bb_at(&db_path, TODAY)
        .args(["backup", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(std::path::Path::new(&out).exists());

    std::fs::remove_file(&out).ok();
    bb_at(&db_path, TODAY)
        .args(["backup", "--file", &out, "--compress", "--force"])
        .assert()
        .success();
    assert!(std::path::Path::new(&zip).exists());
    assert!(!std::path::Path::new(&out).exists());
}

/// The single archive entry, as (name, bytes).
fn read_archive(path: &str) -> (String, Vec<u8>) {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 1);

    let mut entry = archive.by_index(0).unwrap();
    let name = entry.name().to_string();
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut entry, &mut bytes).unwrap();
    (name, bytes)
}

#[test]
fn test_backup_to_zip_path_holds_the_database() {
    let db_path = setup_test_db("cli_backup_zipname");
    init_db_with_data(&db_path);
    let db_size = std::fs::metadata(&db_path).unwrap().len();

    let zip = common::temp_out("cli_backup_zipname", "zip");
    bb_at(&db_path, TODAY)
        .args(["backup", "--file", &zip, "--compress", "--force"])
        .assert()
        .success();

    let (name, bytes) = read_archive(&zip);
    assert_eq!(name, "cli_backup_zipname_banban.sqlite");
    assert_eq!(bytes.len() as u64, db_size);
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}

#[test]
fn test_compressed_backup_keeps_existing_file_at_dest() {
    let db_path = setup_test_db("cli_backup_keep");
    init_db_with_data(&db_path);

    let out = common::temp_out("cli_backup_keep", "sqlite");
    let zip = common::temp_out("cli_backup_keep", "zip");
    std::fs::write(&out, "precious user data").unwrap();

    bb_at(&db_path, TODAY)
        .args(["backup", "--file", &out, "--compress"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "precious user data");
    let (_, bytes) = read_archive(&zip);
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}

#[test]
fn test_backup_declined_overwrite_leaves_file() {
    let db_path = setup_test_db("cli_backup_decline");
    init_db_with_data(&db_path);

    let zip = common::temp_out("cli_backup_decline", "zip");
    std::fs::write(&zip, "older archive").unwrap();

    bb_at(&db_path, TODAY)
        .args(["backup", "--file", &zip, "--compress"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("nothing written"));

    assert_eq!(std::fs::read_to_string(&zip).unwrap(), "older archive");
}

#[test]
fn test_backup_onto_database_is_rejected() {
    let db_path = setup_test_db("cli_backup_self");
    init_db_with_data(&db_path);
    let before = std::fs::read(&db_path).unwrap();

    bb_at(&db_path, TODAY)
        .args(["backup", "--file", &db_path, "--force"])
        .assert()
        .failure()
        .stderr(contains("database itself"));

    assert_eq!(std::fs::read(&db_path).unwrap(), before);
}
