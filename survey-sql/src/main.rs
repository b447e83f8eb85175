//! CLI entry point for survey-sql

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use survey_sql::cli::{self, Commands};

/// Export survey shapefiles to SQL Server INSERT scripts
#[derive(Parser)]
#[command(name = "survey-sql")]
#[command(version)]
#[command(about = "Export survey shapefiles to SQL INSERT scripts for the bear monitoring database")]
#[command(long_about = "Converts GPS waypoint and survey unit shapefiles into SQL Server INSERT scripts.\n\nThe generated scripts open a transaction but never close it: review the output and run COMMIT or ROLLBACK by hand, or the database will be left in a locked state.")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Waypoints {
            path,
            survey_id,
            database,
            output,
            report,
        } => {
            cli::cmd_waypoints(
                &path,
                &survey_id,
                &database,
                output.as_deref(),
                report.as_deref(),
            )?;
        }
        Commands::SurveyUnits {
            path,
            survey_group_id,
            database,
            output,
            report,
        } => {
            cli::cmd_survey_units(
                &path,
                &survey_group_id,
                &database,
                output.as_deref(),
                report.as_deref(),
            )?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
