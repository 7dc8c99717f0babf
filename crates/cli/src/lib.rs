pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use marmor_core::config::{AppConfig, LoadOptions};
use marmor_core::export::DEFAULT_REPORT_NAME;

#[derive(Debug, Parser)]
#[command(
    name = "marmor",
    about = "Marmor sales performance operator CLI",
    long_about = "Track monthly sales, compute tiered commissions and bonuses, \
                  export reports and operate the audited deletion panel.",
    after_help = "Examples:\n  marmor register Ana --admitted 2021-03-15\n  \
                  marmor record Ana --month Jan --rochas 1000 --decorativos 0 --itens 3500\n  \
                  marmor report --month Jan\n  marmor export --output sales_report.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Create the database schema if it does not exist yet")]
    Init,
    #[command(about = "Register an employee (duplicate names warn and change nothing)")]
    Register {
        name: String,
        #[arg(long, help = "Admission date, YYYY-MM-DD")]
        admitted: String,
    },
    #[command(about = "Record a sale; path, commission and bonuses are computed on the spot")]
    Record {
        name: String,
        #[arg(long, help = "Reference month label (Jan..Dez)")]
        month: String,
        #[arg(long)]
        rochas: String,
        #[arg(long)]
        decorativos: String,
        #[arg(long)]
        itens: String,
    },
    #[command(about = "Aggregate totals by employee and path, best total first")]
    Report {
        #[arg(long, help = "Restrict to one reference month")]
        month: Option<String>,
    },
    #[command(about = "Sum one employee's totals, commissions and bonuses")]
    Summary { name: String },
    #[command(about = "Export the ledger as comma-delimited text")]
    Export {
        #[arg(long, help = "Restrict to one reference month")]
        month: Option<String>,
        #[arg(long, default_value = DEFAULT_REPORT_NAME)]
        output: PathBuf,
    },
    #[command(about = "Show the deletion history, newest first")]
    Audit,
    #[command(about = "Delete an employee and every sale they recorded (gated)")]
    DeleteEmployee {
        name: String,
        #[arg(long, help = "Deletion panel secret")]
        secret: String,
    },
    #[command(about = "Delete one employee's sales for a single month (gated)")]
    DeleteMonth {
        name: String,
        #[arg(long, help = "Reference month label (Jan..Dez)")]
        month: String,
        #[arg(long, help = "Deletion panel secret")]
        secret: String,
    },
    #[command(about = "Delete an employee's sales but keep the registration (gated)")]
    Reset {
        name: String,
        #[arg(long, help = "Deletion panel secret")]
        secret: String,
    },
}

pub fn run() -> ExitCode {
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        logging::init(&config.logging);
    }

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "dispatching");
    let result = match cli.command {
        Command::Init => commands::init::run(),
        Command::Register { name, admitted } => commands::register::run(name, admitted),
        Command::Record { name, month, rochas, decorativos, itens } => {
            commands::record::run(name, month, rochas, decorativos, itens)
        }
        Command::Report { month } => commands::report::run(month),
        Command::Summary { name } => commands::summary::run(name),
        Command::Export { month, output } => commands::export::run(month, output),
        Command::Audit => commands::audit::run(),
        Command::DeleteEmployee { name, secret } => commands::panel::delete_employee(name, secret),
        Command::DeleteMonth { name, month, secret } => {
            commands::panel::delete_month(name, month, secret)
        }
        Command::Reset { name, secret } => commands::panel::reset(name, secret),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
