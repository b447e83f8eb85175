//! # survey-shp
//!
//! Readers for the shapefiles produced by the ARCN aerial bear surveys:
//! GPS waypoints (point features, attributes only) and survey units
//! (polygon features with geometry).
//!
//! ## Features
//!
//! - Typed records instead of dynamic field access: required fields are
//!   resolved by name and validated while reading
//! - `geo` types for interoperability with the Rust geospatial ecosystem
//! - Read-only: the source dataset is never modified
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let waypoints = survey_shp::read_waypoints(Path::new("waypoints.shp"))?;
//! for wp in &waypoints {
//!     println!("{}: {} {}", wp.ident, wp.longitude, wp.latitude);
//! }
//! ```

pub mod error;
pub mod reader;
pub mod types;

pub use error::ShpError;
pub use reader::{read_survey_units, read_waypoints, SURVEY_UNIT_FIELDS, WAYPOINT_FIELDS};
pub use types::{SurveyUnit, Waypoint};
