use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// One working day of an assignment.
///
/// Date and times are optional: rows with missing or unparsable values are
/// still loaded and simply count as zero hours.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkPeriod {
    pub id: i64,
    pub schedule_worker_id: i64,
    pub work_date: Option<NaiveDate>,  // ⇔ work_periods.work_date (TEXT "YYYY-MM-DD")
    pub start_time: Option<NaiveTime>, // ⇔ work_periods.start_time (TEXT "HH:MM")
    pub end_time: Option<NaiveTime>,   // ⇔ work_periods.end_time (TEXT "HH:MM")
    pub break_minutes: i64,
    pub overtime_hours: f64,
}

impl WorkPeriod {
    pub fn new(
        work_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        break_minutes: i64,
    ) -> Self {
        Self {
            id: 0,
            schedule_worker_id: 0,
            work_date: Some(work_date),
            start_time: Some(start_time),
            end_time: Some(end_time),
            break_minutes,
            overtime_hours: 0.0,
        }
    }

    /// Start and end as full timestamps, when all three fields are present.
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let date = self.work_date?;
        Some((date.and_time(self.start_time?), date.and_time(self.end_time?)))
    }

    pub fn date_str(&self) -> String {
        self.work_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn time_range_str(&self) -> String {
        let fmt = |t: Option<NaiveTime>| {
            t.map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string())
        };
        format!("{}-{}", fmt(self.start_time), fmt(self.end_time))
    }
}
