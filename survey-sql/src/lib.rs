//! # survey-sql
//!
//! Export ARCN bear survey shapefiles to SQL Server INSERT scripts.
//!
//! ## Features
//!
//! - GPS waypoints (point shapefile) → Locations INSERT script
//! - Survey units (polygon shapefile) → SurveyUnits INSERT script
//! - Geography literals (`geography::STPointFromText` / `STPolyFromText`,
//!   SRID 4326) embedded in the statements
//! - Scripts wrapped in an intentionally open transaction: the operator
//!   reviews the output and runs COMMIT or ROLLBACK by hand
//!
//! The tool never connects to a database; it only writes text.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Waypoints to SQL
//! survey-sql waypoints --path ./waypoints.shp --survey-id 7A3B...
//!
//! # Survey units to SQL
//! survey-sql survey-units --path ./gaar_su.shp --survey-group-id D37F...
//! ```

pub mod cli;
pub mod geometry;
pub mod mapper;
pub mod report;
pub mod script;
pub mod sql;

pub use report::{ScriptReport, ScriptStatus};
