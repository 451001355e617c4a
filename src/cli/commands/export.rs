use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator::ClientAttribution;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::utils::date::Clock;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        period,
        title_fallback,
        force,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let req = ExportRequest {
            kind: *report,
            format: *format,
            file,
            period: period.as_deref(),
            attribution: if *title_fallback {
                ClientAttribution::TitleFallback
            } else {
                ClientAttribution::Explicit
            },
            force: *force,
        };
        ExportLogic::export(&pool, clock, &req)?;
    }
    Ok(())
}
