use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ReportCmd, UnpaidBy};
use crate::config::Config;
use crate::core::aggregator::{ClientAttribution, ReportPeriod, UnpaidGrouping};
use crate::core::report::{ReportLogic, resolve_period};
use crate::errors::AppResult;
use crate::utils::date::Clock;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Report { kind } = cmd else {
        return Ok(());
    };
    let pool = open_pool(cfg)?;
    // 0 shows every row
    let top = |t: &Option<usize>| match t.unwrap_or(cfg.top_n) {
        0 => None,
        n => Some(n),
    };

    match kind {
        ReportCmd::Period { period, details } => {
            let p = period.as_deref().unwrap_or(&cfg.default_period);
            ReportLogic::period(&pool, cfg, clock, &ReportPeriod::parse(p)?, *details)
        }
        ReportCmd::Category { period, top: t } => {
            let bounds = resolve_period(period.as_deref(), clock)?;
            ReportLogic::category(&pool, cfg, bounds, top(t))
        }
        ReportCmd::Client {
            period,
            top: t,
            title_fallback,
        } => {
            let bounds = resolve_period(period.as_deref(), clock)?;
            let attribution = if *title_fallback {
                ClientAttribution::TitleFallback
            } else {
                ClientAttribution::Explicit
            };
            ReportLogic::client(&pool, cfg, bounds, top(t), attribution)
        }
        ReportCmd::Trend => ReportLogic::trend(&pool, cfg, clock),
        ReportCmd::Unpaid { by, details } => {
            let grouping = match by {
                UnpaidBy::Worker => UnpaidGrouping::ByWorker,
                UnpaidBy::Schedule => UnpaidGrouping::BySchedule,
            };
            ReportLogic::unpaid(&pool, cfg, grouping, *details)
        }
    }
}
