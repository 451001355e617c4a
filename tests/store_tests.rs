use banban::core::payment::mark_paid;
use banban::core::records::{
    AssignmentDraft, AssignmentTerms, PeriodTemplate, ScheduleDraft, add_contract, add_worker,
    save_schedule_draft,
};
use banban::db;
use banban::db::initialize::init_db;
use banban::db::log::recent_activities;
use banban::db::pool::DbPool;
use banban::errors::AppError;
use banban::models::{
    Client, ClientContact, Contract, ContractStatus, ContractType, PaymentKind, Schedule,
    ScheduleType, Worker,
};
use chrono::{NaiveDate, NaiveTime};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn fresh_pool() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool
}

fn draft(title: &str, worker_ids: &[i64]) -> ScheduleDraft {
    ScheduleDraft {
        schedule: Schedule {
            contract_amount: 500_000,
            ..Schedule::new(title, d("2025-06-02"), d("2025-06-04"))
        },
        assignments: worker_ids
            .iter()
            .map(|&worker_id| AssignmentDraft {
                worker_id,
                terms: AssignmentTerms {
                    uniform_time: true,
                    ..Default::default()
                },
                template: Some(PeriodTemplate {
                    start: t("09:00"),
                    end: t("17:00"),
                    break_minutes: 0,
                    overtime_hours: 0.0,
                }),
            })
            .collect(),
        contract: None,
    }
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = fresh_pool();
    init_db(&pool.conn).unwrap();
    init_db(&pool.conn).unwrap();

    let applied = recent_activities(&pool.conn, None)
        .unwrap()
        .into_iter()
        .filter(|a| a.operation == "migration_applied")
        .count();
    assert_eq!(applied, 1);
}

fn has_column(pool: &DbPool, table: &str, column: &str) -> bool {
    let mut stmt = pool
        .conn
        .prepare(&format!("PRAGMA table_info('{table}')"))
        .unwrap();
    let names: Vec<String> = stmt
        .query_map([], |row| row.get(1))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    names.iter().any(|n| n == column)
}

#[test]
fn test_legacy_assignment_table_gains_uniform_time() {
    let mut pool = DbPool::in_memory().unwrap();
    // Assignment table as written before "same hours every day" existed.
    pool.conn
        .execute_batch(
            r#"
            CREATE TABLE schedule_workers (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                schedule_id     INTEGER NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
                worker_id       INTEGER NOT NULL REFERENCES workers(id),
                hourly_wage     INTEGER,
                fuel_allowance  INTEGER NOT NULL DEFAULT 0,
                other_allowance INTEGER NOT NULL DEFAULT 0,
                tax_withheld    INTEGER NOT NULL DEFAULT 0,
                wage_paid       INTEGER NOT NULL DEFAULT 0,
                fuel_paid       INTEGER NOT NULL DEFAULT 0,
                other_paid      INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
        .unwrap();
    assert!(!has_column(&pool, "schedule_workers", "uniform_time"));

    init_db(&pool.conn).unwrap();
    init_db(&pool.conn).unwrap();

    assert!(has_column(&pool, "schedule_workers", "uniform_time"));
    let applied: Vec<String> = recent_activities(&pool.conn, None)
        .unwrap()
        .into_iter()
        .filter(|a| a.operation == "migration_applied")
        .map(|a| a.target)
        .collect();
    assert_eq!(applied, vec!["20250412_0003_add_uniform_time".to_string()]);

    // The upgraded table takes and returns the flag.
    let w = add_worker(&mut pool, &Worker::new("김철수", "", "", 10_000)).unwrap();
    let id = save_schedule_draft(&mut pool, &draft("이전 파일", &[w])).unwrap();
    let s = db::get_schedule(&pool.conn, id).unwrap();
    assert!(s.workers[0].uniform_time);
    assert_eq!(s.workers[0].periods.len(), 3);
}

#[test]
fn test_schedule_draft_creates_nested_rows() {
    let mut pool = fresh_pool();
    let w = add_worker(&mut pool, &Worker::new("김철수", "", "", 10_000)).unwrap();

    let id = save_schedule_draft(&mut pool, &draft("3일 행사", &[w])).unwrap();

    let s = db::get_schedule(&pool.conn, id).unwrap();
    assert_eq!(s.workers.len(), 1);
    assert_eq!(s.workers[0].worker_name, "김철수");
    assert_eq!(s.workers[0].periods.len(), 3);
    assert!(s.workers[0].uniform_time);
}

#[test]
fn test_schedule_draft_rolls_back_on_failure() {
    let mut pool = fresh_pool();
    let w = add_worker(&mut pool, &Worker::new("김철수", "", "", 10_000)).unwrap();

    let err = save_schedule_draft(&mut pool, &draft("유령", &[w, 999])).unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "worker", id: 999 }));

    assert!(db::get_all_schedules(&pool.conn).unwrap().is_empty());
    let orphans: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM schedule_workers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn test_personal_schedule_rejects_contract() {
    let mut pool = fresh_pool();
    let id = db::create_schedule(
        &pool.conn,
        &Schedule {
            schedule_type: ScheduleType::Personal,
            ..Schedule::new("휴가", d("2025-06-02"), d("2025-06-02"))
        },
    )
    .unwrap();

    let contract = Contract {
        id: 0,
        schedule_id: id,
        contract_type: ContractType::Written,
        contract_amount: 0,
        content: String::new(),
        status: ContractStatus::Pending,
    };
    assert!(matches!(
        add_contract(&mut pool, &contract),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_contract_is_replaced_per_schedule() {
    let mut pool = fresh_pool();
    let id = save_schedule_draft(&mut pool, &draft("현장", &[])).unwrap();

    let mut contract = Contract {
        id: 0,
        schedule_id: id,
        contract_type: ContractType::Verbal,
        contract_amount: 500_000,
        content: String::new(),
        status: ContractStatus::Pending,
    };
    let first = add_contract(&mut pool, &contract).unwrap();
    contract.status = ContractStatus::Completed;
    let second = add_contract(&mut pool, &contract).unwrap();

    assert_eq!(first, second);
    let s = db::get_schedule(&pool.conn, id).unwrap();
    assert_eq!(s.contract.unwrap().status, ContractStatus::Completed);
}

#[test]
fn test_malformed_period_loads_as_zero_hours() {
    let mut pool = fresh_pool();
    let w = add_worker(&mut pool, &Worker::new("김철수", "", "", 10_000)).unwrap();
    let id = save_schedule_draft(&mut pool, &draft("현장", &[w])).unwrap();
    let sw_id = db::get_schedule(&pool.conn, id).unwrap().workers[0].id;

    pool.conn
        .execute(
            "INSERT INTO work_periods (schedule_worker_id, work_date, start_time, end_time,
                                       break_minutes, overtime_hours)
             VALUES (?1, 'not a date', '25:99', NULL, 0, 0)",
            [sw_id],
        )
        .unwrap();

    let sw = db::get_schedule_worker(&pool.conn, sw_id).unwrap();
    assert_eq!(sw.periods.len(), 4);
    let bad = sw.periods.iter().find(|p| p.work_date.is_none()).unwrap();
    assert!(bad.start_time.is_none());
    assert_eq!(banban::core::calculator::assignment_pay(&sw).total_hours, 24.0);
}

#[test]
fn test_primary_contact_is_unique() {
    let pool = fresh_pool();
    let client_id = db::create_client(&pool.conn, &Client::new("한빛건설", "02-123-4567")).unwrap();

    let contact = |name: &str, primary: bool| ClientContact {
        client_id,
        name: name.to_string(),
        is_primary: primary,
        ..Default::default()
    };

    let a = db::add_client_contact(&pool.conn, &contact("박과장", true)).unwrap();
    let b = db::add_client_contact(&pool.conn, &contact("최대리", true)).unwrap();
    db::add_client_contact(&pool.conn, &contact("정사원", false)).unwrap();

    let client = db::get_client(&pool.conn, client_id).unwrap();
    assert_eq!(client.contacts.iter().filter(|c| c.is_primary).count(), 1);
    assert_eq!(client.primary_contact().unwrap().id, b);

    db::set_primary_contact(&pool.conn, client_id, a).unwrap();
    let client = db::get_client(&pool.conn, client_id).unwrap();
    assert_eq!(client.contacts.iter().filter(|c| c.is_primary).count(), 1);
    assert_eq!(client.primary_contact().unwrap().id, a);

    assert!(db::set_primary_contact(&pool.conn, client_id, 999).is_err());
}

#[test]
fn test_client_model_primary_contact() {
    let mut client = Client::new("한빛건설", "02-123-4567");
    client.add_contact(ClientContact {
        id: 1,
        is_primary: true,
        ..Default::default()
    });
    client.add_contact(ClientContact {
        id: 2,
        is_primary: true,
        ..Default::default()
    });
    assert_eq!(client.primary_contact().unwrap().id, 2);

    assert!(client.set_primary_contact(1));
    assert_eq!(client.contacts.iter().filter(|c| c.is_primary).count(), 1);
    assert!(!client.set_primary_contact(3));
    assert_eq!(client.primary_contact().unwrap().id, 1);
}

#[test]
fn test_payment_flags_round_trip_through_store() {
    let mut pool = fresh_pool();
    let mut worker = Worker::new("이영희", "", "", 15_000);
    worker.fuel_allowance = 10_000;
    let w = add_worker(&mut pool, &worker).unwrap();
    let id = save_schedule_draft(&mut pool, &draft("현장", &[w])).unwrap();
    let sw_id = db::get_schedule(&pool.conn, id).unwrap().workers[0].id;

    let mut sw = db::get_schedule_worker(&pool.conn, sw_id).unwrap();
    assert_eq!(sw.fuel_allowance, 10_000);

    mark_paid(&mut pool, &mut sw, &[PaymentKind::Fuel]).unwrap();

    let reloaded = db::get_schedule_worker(&pool.conn, sw_id).unwrap();
    assert!(reloaded.payment.fuel_paid);
    assert!(!reloaded.payment.wage_paid);
}

#[test]
fn test_client_requires_name_and_phone() {
    let pool = fresh_pool();
    assert!(matches!(
        db::create_client(&pool.conn, &Client::new("", "010")),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        db::create_client(&pool.conn, &Client::new("한빛", " ")),
        Err(AppError::Validation(_))
    ));
}
