//! Console rendering of the aggregator views.

use crate::config::Config;
use crate::core::aggregator::{
    ClientAttribution, ReportPeriod, UnpaidGrouping, by_category, by_client, by_schedule,
    group_unpaid, monthly_trend, summarize_period, top_n, unpaid_entries,
};
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Client, PaymentKind, Schedule};
use crate::ui::messages::{error, header, info};
use crate::utils::colors::{colorize_amount, colorize_flag};
use crate::utils::date::Clock;
use crate::utils::formatting::{format_percent, format_won};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Everything the reports read. A failed load leaves the collection empty.
#[derive(Debug, Default)]
pub struct ReportData {
    pub schedules: Vec<Schedule>,
    pub clients: Vec<Client>,
}

impl ReportData {
    pub fn load(pool: &DbPool) -> Self {
        let schedules = db::get_all_schedules(&pool.conn).unwrap_or_else(|e| {
            error(format!("Failed to load schedules, showing an empty report: {e}"));
            Vec::new()
        });
        let clients = db::get_all_clients(&pool.conn).unwrap_or_else(|e| {
            error(format!("Failed to load clients: {e}"));
            Vec::new()
        });
        Self { schedules, clients }
    }

    /// Schedules starting inside `[start, end]`.
    pub fn starting_within(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Schedule> {
        self.schedules
            .iter()
            .filter(|s| s.start_date >= start && s.start_date <= end)
            .collect()
    }
}

/// Resolve an optional `--period` argument; `None` means every schedule.
pub fn resolve_period(
    period: Option<&str>,
    clock: &dyn Clock,
) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period {
        None => Ok(None),
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => Ok(Some(ReportPeriod::parse(p)?.bounds(clock)?)),
    }
}

fn scoped(data: &ReportData, bounds: Option<(NaiveDate, NaiveDate)>) -> Vec<&Schedule> {
    match bounds {
        Some((start, end)) => data.starting_within(start, end),
        None => data.schedules.iter().collect(),
    }
}

fn scope_label(bounds: Option<(NaiveDate, NaiveDate)>) -> String {
    match bounds {
        Some((start, end)) => format!("{start} → {end}"),
        None => "all schedules".to_string(),
    }
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn period(
        pool: &DbPool,
        cfg: &Config,
        clock: &dyn Clock,
        period: &ReportPeriod,
        details: bool,
    ) -> AppResult<()> {
        let (start, end) = period.bounds(clock)?;
        let data = ReportData::load(pool);
        let won = |v: i64| format_won(v, &cfg.currency_suffix);

        let summary = summarize_period(&data.schedules, start, end);

        header(format!("Revenue {start} → {end}"));
        println!("Schedules : {}", summary.schedule_count);
        println!("Revenue   : {}", won(summary.revenue));
        println!("Expense   : {}", won(summary.expense));
        println!(
            "Profit    : {}",
            colorize_amount(summary.profit, &won(summary.profit))
        );

        if !details {
            return Ok(());
        }

        let rows = by_schedule(&data.schedules, start, end);
        if rows.is_empty() {
            info("No business schedules in this period.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("Date"),
            Column::left("Title"),
            Column::left("Category"),
            Column::right("Workers"),
            Column::right("Revenue"),
            Column::right("Expense"),
            Column::right("Profit"),
        ]);
        for r in rows {
            table.add_row(vec![
                r.schedule_id.to_string(),
                r.start_date.to_string(),
                r.title,
                r.category,
                r.worker_count.to_string(),
                won(r.revenue),
                won(r.expense),
                colorize_amount(r.profit, &won(r.profit)),
            ]);
        }
        print!("\n{}", table.render());
        Ok(())
    }

    pub fn category(
        pool: &DbPool,
        cfg: &Config,
        bounds: Option<(NaiveDate, NaiveDate)>,
        top: Option<usize>,
    ) -> AppResult<()> {
        let data = ReportData::load(pool);
        let rows = top_n(by_category(scoped(&data, bounds)), top);

        header(format!("Revenue by category ({})", scope_label(bounds)));
        if rows.is_empty() {
            info("No business schedules to report.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("Category"),
            Column::right("Schedules"),
            Column::right("Revenue"),
            Column::right("Share"),
        ]);
        for r in rows {
            table.add_row(vec![
                r.category,
                r.schedule_count.to_string(),
                format_won(r.revenue, &cfg.currency_suffix),
                format_percent(r.percentage),
            ]);
        }
        print!("{}", table.render());
        Ok(())
    }

    pub fn client(
        pool: &DbPool,
        cfg: &Config,
        bounds: Option<(NaiveDate, NaiveDate)>,
        top: Option<usize>,
        attribution: ClientAttribution,
    ) -> AppResult<()> {
        let data = ReportData::load(pool);
        let rows = top_n(
            by_client(scoped(&data, bounds), &data.clients, attribution),
            top,
        );

        header(format!("Revenue by client ({})", scope_label(bounds)));
        if rows.is_empty() {
            info("No client revenue to report.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("Client"),
            Column::right("Schedules"),
            Column::right("Revenue"),
            Column::right("Average"),
        ]);
        for r in rows {
            table.add_row(vec![
                r.name,
                r.schedule_count.to_string(),
                format_won(r.revenue, &cfg.currency_suffix),
                format_won(r.average, &cfg.currency_suffix),
            ]);
        }
        print!("{}", table.render());
        Ok(())
    }

    pub fn trend(pool: &DbPool, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
        let data = ReportData::load(pool);
        let points = monthly_trend(&data.schedules, clock);
        let won = |v: i64| format_won(v, &cfg.currency_suffix);

        header("Monthly trend");
        let mut table = Table::new(vec![
            Column::left("Month"),
            Column::right("Revenue"),
            Column::right("Expense"),
            Column::right("Profit"),
        ]);
        for p in points {
            table.add_row(vec![
                p.month,
                won(p.revenue),
                won(p.expense),
                colorize_amount(p.profit, &won(p.profit)),
            ]);
        }
        print!("{}", table.render());
        Ok(())
    }

    pub fn unpaid(
        pool: &DbPool,
        cfg: &Config,
        grouping: UnpaidGrouping,
        details: bool,
    ) -> AppResult<()> {
        let data = ReportData::load(pool);
        let groups = group_unpaid(unpaid_entries(&data.schedules), grouping);
        let won = |v: i64| format_won(v, &cfg.currency_suffix);

        header("Unpaid wages");
        if groups.is_empty() {
            info("Everything is paid.");
            return Ok(());
        }

        let label = match grouping {
            UnpaidGrouping::ByWorker => "Worker",
            UnpaidGrouping::BySchedule => "Schedule",
        };
        let mut table = Table::new(vec![
            Column::left(label),
            Column::right("Assignments"),
            Column::right("Total"),
            Column::right("Outstanding"),
        ]);
        for g in &groups {
            table.add_row(vec![
                g.label.clone(),
                g.entries.len().to_string(),
                won(g.total_amount),
                won(g.outstanding),
            ]);
        }
        print!("{}", table.render());

        if !details {
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("Assignment"),
            Column::left("Date"),
            Column::left("Schedule"),
            Column::left("Worker"),
            Column::right("Net pay"),
            Column::left("Wage"),
            Column::left("Fuel"),
            Column::left("Other"),
            Column::right("Outstanding"),
        ]);
        for e in groups.iter().flat_map(|g| &g.entries) {
            let flag = |kind: PaymentKind, amount: i64| {
                colorize_flag(e.payment.get(kind), kind == PaymentKind::Wage || amount != 0)
            };
            table.add_row(vec![
                e.schedule_worker_id.to_string(),
                e.start_date.to_string(),
                e.schedule_title.clone(),
                e.worker_name.clone(),
                won(e.net_pay),
                flag(PaymentKind::Wage, e.net_pay),
                flag(PaymentKind::Fuel, e.fuel_allowance),
                flag(PaymentKind::Other, e.other_allowance),
                won(e.outstanding),
            ]);
        }
        println!();
        print!("{}", table.render());
        Ok(())
    }
}
