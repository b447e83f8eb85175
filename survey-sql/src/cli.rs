//! CLI command definitions and implementations
//!
//! Two commands, one per source dataset kind:
//! - `waypoints`: point shapefile of GPS waypoints → Locations INSERT script
//! - `survey-units`: polygon shapefile of survey units → SurveyUnits INSERT script

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{info, warn};

use crate::mapper;
use crate::report::ScriptReport;
use crate::script::{default_output_path, ScriptMeta, ScriptWriter, SharedVariable};

/// Default target database of the generated scripts
pub const DEFAULT_DATABASE: &str = "CompositionCountSurveys";

#[derive(Subcommand)]
pub enum Commands {
    /// Export GPS waypoints from a point shapefile to SQL INSERT queries
    Waypoints {
        /// Path to the waypoints shapefile (.shp)
        #[arg(short, long)]
        path: PathBuf,

        /// SurveyID of the Surveys record the waypoints belong to
        #[arg(short, long)]
        survey_id: String,

        /// Target database name
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: String,

        /// Output script path (default: <input>.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Export polygon survey units from a shapefile to SQL INSERT queries
    SurveyUnits {
        /// Path to the survey units shapefile (.shp)
        #[arg(short, long)]
        path: PathBuf,

        /// SurveyGroupID of the SurveyGroups record the units belong to
        #[arg(short = 'g', long)]
        survey_group_id: String,

        /// Target database name
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: String,

        /// Output script path (default: <input>.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// Runs the waypoints command
pub fn cmd_waypoints(
    path: &Path,
    survey_id: &str,
    database: &str,
    output: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<ScriptReport> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(path));

    info!(
        path = %path.display(),
        output = %output.display(),
        "Exporting waypoints"
    );

    let started_at = std::time::Instant::now();

    // Read everything before touching the output: a reader failure must not
    // leave an empty or partial script behind
    let waypoints = survey_shp::read_waypoints(path)
        .with_context(|| format!("Failed to read waypoints from {}", path.display()))?;

    let point_filename = file_basename(path);
    let variable = SharedVariable {
        name: mapper::SURVEY_ID_VAR.to_string(),
        value: survey_id.to_string(),
        comment: "SurveyID of the record in the Surveys table to which the waypoints below will be related".to_string(),
    };
    let meta = ScriptMeta {
        description: "Insert queries to transfer pilot waypoints to the ARCN bear monitoring database".to_string(),
        database: database.to_string(),
        source: path.to_path_buf(),
        subject: "waypoints".to_string(),
        variable: variable.clone(),
    };

    let mut report = ScriptReport::new(path, &output);
    report.records_read = waypoints.len();

    let mut script = ScriptWriter::create(&output, &meta)?;
    for waypoint in &waypoints {
        let sql = mapper::waypoint_insert(database, waypoint, &point_filename)?;
        script.write_statement(&sql)?;
        report.record_statement();
    }
    let written = script.finish(mapper::LOCATIONS_TABLE, &variable)?;

    report.set_duration(started_at.elapsed());
    report.finalize();

    println!("Done");
    println!("SQL insert query script available at {}", output.display());
    info!(statements = written, "Waypoint export complete");

    if let Some(report_file) = report_path {
        report.save_to_file(report_file)?;
    }

    Ok(report)
}

/// Runs the survey-units command
pub fn cmd_survey_units(
    path: &Path,
    survey_group_id: &str,
    database: &str,
    output: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<ScriptReport> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(path));

    info!(
        path = %path.display(),
        output = %output.display(),
        "Exporting survey units"
    );

    let started_at = std::time::Instant::now();

    let units = survey_shp::read_survey_units(path)
        .with_context(|| format!("Failed to read survey units from {}", path.display()))?;

    let variable = SharedVariable {
        name: mapper::SURVEY_GROUP_ID_VAR.to_string(),
        value: survey_group_id.to_string(),
        comment: "SurveyGroupID of the record in the SurveyGroups table to which the units below will be related".to_string(),
    };
    let meta = ScriptMeta {
        description: "Insert queries to transfer survey units to the ARCN bear monitoring database".to_string(),
        database: database.to_string(),
        source: path.to_path_buf(),
        subject: "survey units".to_string(),
        variable: variable.clone(),
    };

    let mut report = ScriptReport::new(path, &output);
    report.records_read = units.len();

    let mut script = ScriptWriter::create(&output, &meta)?;
    for (index, unit) in units.iter().enumerate() {
        match mapper::survey_unit_insert(database, unit) {
            Ok(sql) => {
                script.write_statement(&sql)?;
                report.record_statement();
            }
            Err(e) => {
                // Geometry that cannot be encoded skips the record, not the run
                warn!("Skipping unit {} ({}): {}", index, unit.unit, e);
                report.record_skip(&unit.unit, &e.to_string());
            }
        }
    }
    let written = script.finish(mapper::SURVEY_UNITS_TABLE, &variable)?;

    report.set_duration(started_at.elapsed());
    report.finalize();

    println!("Done");
    println!("SQL insert query script available at {}", output.display());
    info!(
        statements = written,
        skipped = report.records_skipped,
        "Survey unit export complete"
    );

    if !report.warnings.is_empty() {
        report.display();
    }

    if let Some(report_file) = report_path {
        report.save_to_file(report_file)?;
    }

    Ok(report)
}

/// Base name of the source file, stored in each waypoint row
fn file_basename(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
