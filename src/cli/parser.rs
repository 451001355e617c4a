use crate::export::{ExportFormat, ReportKind};
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for banban
/// Staffing ledger: workers, clients, schedules, payroll and revenue on SQLite
#[derive(Parser)]
#[command(
    name = "banban",
    version = env!("CARGO_PKG_VERSION"),
    about = "A staffing ledger CLI: schedules, worker pay and revenue reports using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin "today" (YYYY-MM-DD) for relative periods and the trend
    #[arg(global = true, long = "today", hide = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage workers
    Worker {
        #[command(subcommand)]
        action: WorkerCmd,
    },

    /// Manage clients and their contacts
    Client {
        #[command(subcommand)]
        action: ClientCmd,
    },

    /// Manage schedule categories
    Category {
        #[command(subcommand)]
        action: CategoryCmd,
    },

    /// Manage schedules, assignments, work periods and contracts
    Schedule {
        #[command(subcommand)]
        action: ScheduleCmd,
    },

    /// Mark parts of an assignment as paid (all parts when none is given)
    Pay {
        /// Assignment id (see `schedule list --details` or `report unpaid --details`)
        assignment: i64,

        #[arg(long, help = "Mark the wage as paid")]
        wage: bool,

        #[arg(long, help = "Mark the fuel allowance as paid")]
        fuel: bool,

        #[arg(long, help = "Mark the other allowance as paid")]
        other: bool,
    },

    /// Revenue, expense and payroll reports
    Report {
        #[command(subcommand)]
        kind: ReportCmd,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "recent", value_name = "N", help = "Only the last N rows")]
        recent: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export report rows to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "schedules")]
        report: ReportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "PERIOD",
            help = "week, month, year, YYYY, YYYY-MM, YYYY-MM-DD or a custom range (a:b)"
        )]
        period: Option<String>,

        #[arg(long = "title-fallback", help = "Attribute client-less schedules by title")]
        title_fallback: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerCmd {
    /// Register a worker
    Add {
        name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "", help = "Bank account; the bank is detected from it")]
        account: String,

        #[arg(long, help = "Hourly wage in won")]
        wage: i64,

        #[arg(long, default_value_t = 0, help = "Default fuel allowance per assignment")]
        fuel: i64,

        #[arg(long, default_value_t = 0, help = "Default other allowance per assignment")]
        other: i64,

        #[arg(long, help = "Withhold 3.3% tax by default")]
        tax: bool,

        #[arg(long, default_value = "")]
        memo: String,
    },

    /// List workers
    List,

    /// Change fields of a worker
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        wage: Option<i64>,

        #[arg(long)]
        fuel: Option<i64>,

        #[arg(long)]
        other: Option<i64>,

        #[arg(long, value_name = "true|false")]
        tax: Option<bool>,

        #[arg(long)]
        memo: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ClientCmd {
    /// Register a client
    Add {
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long = "business-number", default_value = "")]
        business_number: String,

        #[arg(long, default_value = "")]
        memo: String,
    },

    /// List clients with their primary contact
    List {
        #[arg(long, help = "Show every contact")]
        contacts: bool,
    },

    /// Change fields of a client
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long = "business-number")]
        business_number: Option<String>,

        #[arg(long)]
        memo: Option<String>,

        #[arg(long, help = "Amount the client still owes")]
        unpaid: Option<i64>,
    },

    /// Add a contact person to a client
    Contact {
        client: i64,

        name: String,

        #[arg(long, default_value = "")]
        position: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        memo: String,

        #[arg(long, help = "Make this the primary contact")]
        primary: bool,
    },

    /// Make a contact the client's primary contact
    Primary { client: i64, contact: i64 },

    /// Recompute total revenue from business schedules (every client if no id)
    Refresh { client: Option<i64> },
}

#[derive(Subcommand)]
pub enum CategoryCmd {
    /// Add a category (or change its colour)
    Add {
        name: String,

        #[arg(long, default_value = "#888888", help = "Colour as #RGB or #RRGGBB")]
        color: String,
    },

    /// List categories
    List,
}

#[derive(Subcommand)]
pub enum ScheduleCmd {
    /// Create a schedule, optionally with workers, periods and a contract
    Add {
        title: String,

        #[arg(long, value_name = "DATE")]
        start: String,

        #[arg(long, value_name = "DATE", help = "Last day (defaults to the start date)")]
        end: Option<String>,

        #[arg(long = "type", default_value = "b", help = "b = business, p = personal")]
        schedule_type: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, value_name = "ID")]
        client: Option<i64>,

        #[arg(long, default_value_t = 0, help = "Contract amount in won")]
        amount: i64,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        memo: String,

        #[arg(long = "worker", value_name = "ID", help = "Assign a worker (repeatable)")]
        workers: Vec<i64>,

        #[arg(long = "in", value_name = "HH:MM", requires = "end_time")]
        start_time: Option<String>,

        #[arg(long = "out", value_name = "HH:MM", requires = "start_time")]
        end_time: Option<String>,

        #[arg(long = "break", default_value_t = 0, help = "Break in minutes")]
        break_minutes: i64,

        #[arg(long, help = "Same hours on every day of the schedule")]
        uniform: bool,

        #[arg(long, help = "Fuel allowance for every assigned worker")]
        fuel: Option<i64>,

        #[arg(long, help = "Other allowance for every assigned worker")]
        other: Option<i64>,

        #[arg(long, help = "Hourly wage override for every assigned worker")]
        wage: Option<i64>,

        #[arg(long, value_name = "true|false", help = "Override 3.3% withholding for every assigned worker")]
        tax: Option<bool>,

        #[arg(long = "contract", value_name = "TYPE", help = "written, verbal or text")]
        contract_type: Option<String>,

        #[arg(long = "contract-status", default_value = "pending")]
        contract_status: String,

        #[arg(long = "contract-content", default_value = "")]
        contract_content: String,
    },

    /// List schedules
    List {
        #[arg(long, short, help = "week, month, year, or a range expression")]
        period: Option<String>,

        #[arg(long, help = "Show assignments, periods and pay")]
        details: bool,
    },

    /// Assign a worker to a business schedule
    Assign {
        schedule: i64,

        worker: i64,

        #[arg(long, help = "Hourly wage override")]
        wage: Option<i64>,

        #[arg(long)]
        fuel: Option<i64>,

        #[arg(long)]
        other: Option<i64>,

        #[arg(long, value_name = "true|false")]
        tax: Option<bool>,

        #[arg(long, help = "Same hours on every day of the schedule")]
        uniform: bool,
    },

    /// Add work periods to an assignment
    Period {
        assignment: i64,

        #[arg(long, value_name = "DATE")]
        date: String,

        #[arg(long, value_name = "DATE", help = "Repeat every day up to this date")]
        to: Option<String>,

        #[arg(long = "in", value_name = "HH:MM")]
        start_time: String,

        #[arg(long = "out", value_name = "HH:MM")]
        end_time: String,

        #[arg(long = "break", default_value_t = 0)]
        break_minutes: i64,

        #[arg(long, default_value_t = 0.0)]
        overtime: f64,
    },

    /// Attach (or replace) the contract of a business schedule
    Contract {
        schedule: i64,

        #[arg(long = "type", help = "written, verbal or text")]
        contract_type: String,

        #[arg(long, help = "Defaults to the schedule's contract amount")]
        amount: Option<i64>,

        #[arg(long, default_value = "pending")]
        status: String,

        #[arg(long, default_value = "")]
        content: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UnpaidBy {
    Worker,
    Schedule,
}

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Revenue, expense and profit for a period
    Period {
        #[arg(long, short, help = "week, month, year, or a range expression")]
        period: Option<String>,

        #[arg(long, help = "One row per schedule")]
        details: bool,
    },

    /// Revenue share per category
    Category {
        #[arg(long, short)]
        period: Option<String>,

        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Revenue per client
    Client {
        #[arg(long, short)]
        period: Option<String>,

        #[arg(long, value_name = "N")]
        top: Option<usize>,

        #[arg(long = "title-fallback", help = "Attribute client-less schedules by title")]
        title_fallback: bool,
    },

    /// Revenue, expense and profit for the last twelve months
    Trend,

    /// Assignments that are not fully paid
    Unpaid {
        #[arg(long, value_enum, default_value = "worker")]
        by: UnpaidBy,

        #[arg(long, help = "One row per assignment")]
        details: bool,
    },
}
