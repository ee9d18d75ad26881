mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use verint_migrate_lib::{Config, OverflowPolicy};

use crate::commands::{run_passes, Pass, Report, Session};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "verint-migrate")]
#[command(about = "Extract Verint workforce-management configuration into a migration workbook")]
struct Cli {
    /// Workbook path; CSV files are written next to it
    #[arg(long, default_value = "output/verint_full_export.xlsx", global = true)]
    workbook: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx, global = true)]
    format: OutputFormat,

    /// Directory for raw listing responses
    #[arg(long, default_value = "json_dump", global = true)]
    dump_dir: PathBuf,

    /// Do not save raw listing responses
    #[arg(long, global = true)]
    no_dump: bool,

    /// Put nodes deeper than the last level column into that column instead of failing
    #[arg(long, global = true)]
    clamp_deep_levels: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Organizations, groups, employees, roles and access rights
    All,
    /// Organization hierarchy with direct skills, UDFs and job titles
    Organizations,
    /// Group hierarchy with rosters
    Groups,
    /// Employee details (runs the group pass first for memberships)
    Employees,
    /// Role definitions
    Roles,
    /// Per-employee role assignments
    AccessRights,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("verint_migrate=info".parse()?)
                .add_directive("verint_api=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let client = config.client()?;
    let policy = if cli.clamp_deep_levels {
        OverflowPolicy::Clamp
    } else {
        OverflowPolicy::Reject
    };
    let dump_dir = (!cli.no_dump).then(|| cli.dump_dir.clone());
    let mut session = Session::new(client, policy, dump_dir);
    let mut report = Report::default();

    let passes: &[Pass] = match cli.command {
        Commands::All => &Pass::ALL,
        Commands::Organizations => &[Pass::Organizations],
        Commands::Groups => &[Pass::Groups],
        Commands::Employees => &[Pass::Employees],
        Commands::Roles => &[Pass::Roles],
        Commands::AccessRights => &[Pass::AccessRights],
    };

    let outcome = run_passes(passes, &mut session, &mut report).await;
    if outcome.is_err() && report.sheets.is_empty() {
        return outcome;
    }
    if let Err(e) = &outcome {
        tracing::error!(
            "Extraction stopped: {:#}; writing the {} completed sheets",
            e,
            report.sheets.len()
        );
    }

    output::write_report(cli.format, &cli.workbook, &report.sheets)?;
    output::print_summary(&report.summary);

    outcome
}
