use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ScheduleCmd};
use crate::config::Config;
use crate::core::calculator::pay::period_hours;
use crate::core::calculator::{assignment_pay, assignment_total};
use crate::core::records::{
    AssignmentDraft, AssignmentTerms, PeriodTemplate, ScheduleDraft, add_contract, add_periods,
    assign_worker, days_between, save_schedule_draft,
};
use crate::core::report::resolve_period;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::{Contract, ContractStatus, ContractType, PaymentKind, Schedule, ScheduleType};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_flag;
use crate::utils::date::{Clock, parse_date_strict};
use crate::utils::formatting::{format_hours, format_won};
use crate::utils::table::{Column, Table};
use crate::utils::time::{parse_optional_time, require_time};

fn contract_type(raw: &str) -> AppResult<ContractType> {
    ContractType::from_db_str(raw).ok_or_else(|| AppError::InvalidContractType(raw.to_string()))
}

fn contract_status(raw: &str) -> AppResult<ContractStatus> {
    ContractStatus::from_db_str(raw).ok_or_else(|| AppError::InvalidContractStatus(raw.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        ScheduleCmd::Add {
            title,
            start,
            end,
            schedule_type,
            category,
            client,
            amount,
            address,
            description,
            memo,
            workers,
            start_time,
            end_time,
            break_minutes,
            uniform,
            fuel,
            other,
            wage,
            tax,
            contract_type: ctype,
            contract_status: cstatus,
            contract_content,
        } => {
            let start_date = parse_date_strict(start)?;
            let end_date = match end {
                Some(e) => parse_date_strict(e)?,
                None => start_date,
            };
            let kind = ScheduleType::from_code(schedule_type)
                .ok_or_else(|| AppError::InvalidScheduleType(schedule_type.clone()))?;

            let schedule = Schedule {
                schedule_type: kind,
                category: category.trim().to_string(),
                client_id: *client,
                contract_amount: *amount,
                address: address.clone(),
                description: description.clone(),
                memo: memo.clone(),
                ..Schedule::new(title, start_date, end_date)
            };

            let template = match (
                parse_optional_time(start_time.as_deref())?,
                parse_optional_time(end_time.as_deref())?,
            ) {
                (Some(s), Some(e)) => Some(PeriodTemplate {
                    start: s,
                    end: e,
                    break_minutes: *break_minutes,
                    overtime_hours: 0.0,
                }),
                _ => None,
            };

            let terms = AssignmentTerms {
                hourly_wage: *wage,
                fuel_allowance: *fuel,
                other_allowance: *other,
                tax_withheld: *tax,
                uniform_time: *uniform,
            };
            let assignments = workers
                .iter()
                .map(|&worker_id| AssignmentDraft {
                    worker_id,
                    terms: terms.clone(),
                    template,
                })
                .collect();

            let contract = match ctype {
                Some(t) => Some(Contract {
                    id: 0,
                    schedule_id: 0,
                    contract_type: contract_type(t)?,
                    contract_amount: *amount,
                    content: contract_content.clone(),
                    status: contract_status(cstatus)?,
                }),
                None => None,
            };

            let draft = ScheduleDraft {
                schedule,
                assignments,
                contract,
            };
            let id = save_schedule_draft(&mut pool, &draft)?;
            success(format!(
                "Schedule #{id} '{}' created ({}, {} worker(s)).",
                draft.schedule.title,
                draft.schedule.date_range_str(),
                draft.assignments.len()
            ));
        }

        ScheduleCmd::List { period, details } => {
            let bounds = resolve_period(period.as_deref(), clock)?;
            let schedules: Vec<Schedule> = db::get_all_schedules(&pool.conn)?
                .into_iter()
                .filter(|s| match bounds {
                    Some((a, b)) => s.start_date >= a && s.start_date <= b,
                    None => true,
                })
                .collect();

            if schedules.is_empty() {
                info("No schedules found.");
                return Ok(());
            }

            print_schedules(&schedules, cfg);
            if *details {
                print_assignments(&schedules, cfg);
                print_periods(&schedules);
            }
        }

        ScheduleCmd::Assign {
            schedule,
            worker,
            wage,
            fuel,
            other,
            tax,
            uniform,
        } => {
            let terms = AssignmentTerms {
                hourly_wage: *wage,
                fuel_allowance: *fuel,
                other_allowance: *other,
                tax_withheld: *tax,
                uniform_time: *uniform,
            };
            let id = assign_worker(&mut pool, *schedule, *worker, &terms)?;
            success(format!(
                "Worker #{worker} assigned to schedule #{schedule} (assignment #{id})."
            ));
        }

        ScheduleCmd::Period {
            assignment,
            date,
            to,
            start_time,
            end_time,
            break_minutes,
            overtime,
        } => {
            let first = parse_date_strict(date)?;
            let last = match to {
                Some(d) => parse_date_strict(d)?,
                None => first,
            };
            if last < first {
                return Err(AppError::InvalidPeriod(format!("{first}:{last}")));
            }

            let template = PeriodTemplate {
                start: require_time(start_time)?,
                end: require_time(end_time)?,
                break_minutes: *break_minutes,
                overtime_hours: *overtime,
            };
            let ids = add_periods(&mut pool, *assignment, &days_between(first, last), &template)?;
            success(format!(
                "{} period(s) added to assignment #{assignment}.",
                ids.len()
            ));
        }

        ScheduleCmd::Contract {
            schedule,
            contract_type: ctype,
            amount,
            status,
            content,
        } => {
            let contract_amount = match amount {
                Some(a) => *a,
                None => db::get_schedule(&pool.conn, *schedule)?.contract_amount,
            };
            let contract = Contract {
                id: 0,
                schedule_id: *schedule,
                contract_type: contract_type(ctype)?,
                contract_amount,
                content: content.clone(),
                status: contract_status(status)?,
            };
            add_contract(&mut pool, &contract)?;
            success(format!(
                "Contract of schedule #{schedule} saved ({}, {}).",
                contract.contract_type.to_db_str(),
                contract.status.to_db_str()
            ));
        }
    }

    Ok(())
}

fn print_schedules(schedules: &[Schedule], cfg: &Config) {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Dates"),
        Column::left("Type"),
        Column::left("Title"),
        Column::left("Category"),
        Column::right("Client"),
        Column::right("Amount"),
        Column::right("Workers"),
        Column::left("Contract"),
    ]);

    for s in schedules {
        table.add_row(vec![
            s.id.to_string(),
            s.date_range_str(),
            s.schedule_type.to_db_str().to_string(),
            s.title.clone(),
            s.category.clone(),
            s.client_id.map(|c| format!("#{c}")).unwrap_or_default(),
            format_won(s.contract_amount, &cfg.currency_suffix),
            s.workers.len().to_string(),
            s.contract
                .as_ref()
                .map(|c| c.status.to_db_str().to_string())
                .unwrap_or_default(),
        ]);
    }
    print!("{}", table.render());
}

fn print_assignments(schedules: &[Schedule], cfg: &Config) {
    let won = |v: i64| format_won(v, &cfg.currency_suffix);

    let mut table = Table::new(vec![
        Column::right("Assignment"),
        Column::right("Schedule"),
        Column::left("Worker"),
        Column::right("Wage/h"),
        Column::right("Hours"),
        Column::right("Gross"),
        Column::right("Tax"),
        Column::right("Net"),
        Column::right("Total"),
        Column::left("Wage"),
        Column::left("Fuel"),
        Column::left("Other"),
    ]);

    for s in schedules {
        for sw in &s.workers {
            let pay = assignment_pay(sw);
            let flag = |k: PaymentKind| colorize_flag(sw.payment.get(k), sw.is_applicable(k));
            table.add_row(vec![
                sw.id.to_string(),
                format!("#{}", s.id),
                sw.worker_name.clone(),
                won(sw.effective_hourly_wage()),
                format_hours(pay.total_hours),
                won(pay.gross_pay.round() as i64),
                won(pay.tax.round() as i64),
                won(pay.net_pay),
                won(assignment_total(sw)),
                flag(PaymentKind::Wage),
                flag(PaymentKind::Fuel),
                flag(PaymentKind::Other),
            ]);
        }
    }

    if table.is_empty() {
        return;
    }
    println!();
    print!("{}", table.render());
}

fn print_periods(schedules: &[Schedule]) {
    let mut table = Table::new(vec![
        Column::right("Assignment"),
        Column::left("Worker"),
        Column::left("Date"),
        Column::left("Time"),
        Column::right("Break"),
        Column::right("Overtime"),
        Column::right("Hours"),
    ]);

    for sw in schedules.iter().flat_map(|s| &s.workers) {
        for p in &sw.periods {
            table.add_row(vec![
                sw.id.to_string(),
                sw.worker_name.clone(),
                p.date_str(),
                p.time_range_str(),
                format!("{}m", p.break_minutes),
                format_hours(p.overtime_hours),
                format_hours(period_hours(p)),
            ]);
        }
    }

    if table.is_empty() {
        return;
    }
    println!();
    print!("{}", table.render());
}
