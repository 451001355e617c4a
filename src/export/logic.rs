use crate::core::aggregator::{
    ClientAttribution, by_category, by_client, by_schedule, monthly_trend, unpaid_entries,
};
use crate::core::report::{ReportData, resolve_period};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::UnpaidRow;
use crate::export::{ExportFormat, ReportKind};
use crate::models::Schedule;
use crate::ui::messages::warning;
use crate::utils::date::Clock;
use crate::utils::path::absolute_output_path;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub kind: ReportKind,
    pub format: ExportFormat,
    pub file: &'a str,
    /// `None`/`"all"`, `week`, `month`, `year`, or a range expression.
    /// Ignored by the trend export, which always covers twelve months.
    pub period: Option<&'a str>,
    pub attribution: ClientAttribution,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write the rows of one report. Returns the number of rows written;
    /// nothing is written when the report is empty.
    pub fn export(
        pool: &DbPool,
        clock: &dyn Clock,
        req: &ExportRequest<'_>,
    ) -> AppResult<usize> {
        let path = absolute_output_path(req.file)?;
        let bounds = resolve_period(req.period, clock)?;

        let data = ReportData::load(pool);
        let scoped: Vec<Schedule> = match bounds {
            Some((start, end)) => data.starting_within(start, end).into_iter().cloned().collect(),
            None => data.schedules.clone(),
        };

        let written = match req.kind {
            ReportKind::Schedules => {
                let (start, end) = bounds.unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
                write_rows(&by_schedule(&scoped, start, end), req, &path)?
            }
            ReportKind::Category => write_rows(&by_category(&scoped), req, &path)?,
            ReportKind::Client => write_rows(
                &by_client(&scoped, &data.clients, req.attribution),
                req,
                &path,
            )?,
            ReportKind::Trend => write_rows(&monthly_trend(&data.schedules, clock), req, &path)?,
            ReportKind::Unpaid => {
                let rows: Vec<UnpaidRow> = unpaid_entries(&scoped)
                    .into_iter()
                    .map(UnpaidRow::from)
                    .collect();
                write_rows(&rows, req, &path)?
            }
        };

        if written > 0 {
            ttlog_soft(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!(
                    "{} report as {} ({written} rows)",
                    req.kind.as_str(),
                    req.format.as_str()
                ),
            );
        }
        Ok(written)
    }
}

fn write_rows<T: Serialize>(rows: &[T], req: &ExportRequest<'_>, path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        warning(format!(
            "No rows in the {} report for the selected period.",
            req.kind.as_str()
        ));
        return Ok(0);
    }

    ensure_writable(path, req.force)?;

    match req.format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }
    Ok(rows.len())
}
