use banban::core::calculator::pay::{period_hours, period_minutes};
use banban::core::calculator::{assignment_pay, assignment_total, calculate_pay, safe_ratio};
use banban::models::{ScheduleWorker, WorkPeriod};
use chrono::{NaiveDate, NaiveTime};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn period(start: &str, end: &str, break_minutes: i64) -> WorkPeriod {
    WorkPeriod::new(d("2025-06-10"), t(start), t(end), break_minutes)
}

#[test]
fn test_period_hours_subtracts_break() {
    assert_eq!(period_hours(&period("09:00", "18:00", 60)), 8.0);
    assert_eq!(period_minutes(&period("09:00", "12:30", 0)), 210);
}

#[test]
fn test_period_ending_before_start_is_zero() {
    assert_eq!(period_hours(&period("18:00", "09:00", 0)), 0.0);
}

#[test]
fn test_break_longer_than_period_is_zero() {
    assert_eq!(period_minutes(&period("09:00", "10:00", 90)), 0);
}

#[test]
fn test_incomplete_period_is_zero() {
    let p = WorkPeriod {
        work_date: None,
        ..period("09:00", "17:00", 0)
    };
    assert_eq!(period_minutes(&p), 0);

    let p = WorkPeriod {
        end_time: None,
        ..period("09:00", "17:00", 0)
    };
    assert_eq!(period_minutes(&p), 0);
}

#[test]
fn test_net_pay_with_withholding() {
    let pay = calculate_pay(20_000, &[period("09:00", "17:00", 0)], true);

    assert_eq!(pay.total_hours, 8.0);
    assert_eq!(pay.gross_pay, 160_000.0);
    assert!((pay.tax - 5_280.0).abs() < 1e-6);
    assert_eq!(pay.net_pay, 154_720);
}

#[test]
fn test_net_pay_without_withholding() {
    let pay = calculate_pay(20_000, &[period("09:00", "17:00", 0)], false);
    assert_eq!(pay.tax, 0.0);
    assert_eq!(pay.net_pay, 160_000);
}

#[test]
fn test_net_pay_is_rounded() {
    // 9,999 × 1.5h = 14,998.5 → tax 494.95 → 14,503.55 → 14,504
    let pay = calculate_pay(9_999, &[period("09:00", "10:30", 0)], true);
    assert_eq!(pay.net_pay, 14_504);
}

#[test]
fn test_multiple_periods_are_summed() {
    let periods = [period("09:00", "13:00", 0), period("14:00", "18:00", 30)];
    let pay = calculate_pay(10_000, &periods, false);
    assert_eq!(pay.total_minutes, 450);
    assert_eq!(pay.net_pay, 75_000);
}

#[test]
fn test_assignment_wage_override_and_total() {
    let sw = ScheduleWorker {
        worker_hourly_wage: 10_000,
        hourly_wage: Some(12_000),
        fuel_allowance: 20_000,
        other_allowance: 5_000,
        periods: vec![period("09:00", "14:00", 0)],
        ..Default::default()
    };

    assert_eq!(assignment_pay(&sw).net_pay, 60_000);
    assert_eq!(assignment_total(&sw), 85_000);
}

#[test]
fn test_safe_ratio_never_divides_by_zero() {
    assert_eq!(safe_ratio(10.0, 0.0), 0.0);
    assert_eq!(safe_ratio(f64::NAN, 2.0), 0.0);
    assert_eq!(safe_ratio(1.0, 4.0), 0.25);
}
