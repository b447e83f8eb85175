//! Maps typed shapefile records to INSERT statements
//!
//! The column lists mirror the target tables in the monitoring database and
//! must match them in name, order and count. The per-run survey identifier
//! is never embedded per row; every statement references the shared script
//! variable declared once in the header.

use anyhow::Result;
use survey_shp::{SurveyUnit, Waypoint};

use crate::geometry;
use crate::sql::{insert_statement, SqlValue};

/// Target table for waypoint rows
pub const LOCATIONS_TABLE: &str = "Locations";

/// Columns of the Locations table, in insert order
pub const LOCATIONS_COLUMNS: [&str; 10] = [
    "LocationName",
    "Type",
    "CaptureDate",
    "Altitude",
    "Temperature",
    "GPSModel",
    "PointFilename",
    "Notes",
    "Location",
    "SurveyID",
];

/// Target table for survey unit rows
pub const SURVEY_UNITS_TABLE: &str = "SurveyUnits";

/// Columns of the SurveyUnits table, in insert order
pub const SURVEY_UNITS_COLUMNS: [&str; 3] = ["Unit", "Feature", "SurveyGroupID"];

/// Type tag stored for every waypoint row
pub const WAYPOINT_TYPE: &str = "WAYPOINT";

/// Script variable relating waypoint rows to their Surveys record
pub const SURVEY_ID_VAR: &str = "SurveyID";

/// Script variable relating unit rows to their SurveyGroups record
pub const SURVEY_GROUP_ID_VAR: &str = "SurveyGroupID";

/// Builds the INSERT statement for one waypoint.
///
/// `point_filename` is the base name of the source shapefile, stored with
/// every row so the origin of a location can be traced later.
pub fn waypoint_insert(
    database: &str,
    waypoint: &Waypoint,
    point_filename: &str,
) -> Result<String> {
    let values = [
        SqlValue::Text(waypoint.ident.clone()),
        SqlValue::Text(WAYPOINT_TYPE.to_string()),
        SqlValue::Text(waypoint.capture_time.clone()),
        SqlValue::Number(waypoint.altitude),
        SqlValue::Number(waypoint.temperature),
        SqlValue::Text(waypoint.model.clone()),
        SqlValue::Text(point_filename.to_string()),
        SqlValue::Text(waypoint.comment.clone()),
        SqlValue::Expr(geometry::point_geography(
            waypoint.longitude,
            waypoint.latitude,
        )),
        SqlValue::Expr(format!("@{}", SURVEY_ID_VAR)),
    ];
    insert_statement(database, LOCATIONS_TABLE, &LOCATIONS_COLUMNS, &values)
}

/// Builds the INSERT statement for one survey unit.
///
/// # Errors
///
/// Fails when the unit's geometry cannot be encoded as a single POLYGON
/// (multi-part multipolygon).
pub fn survey_unit_insert(database: &str, unit: &SurveyUnit) -> Result<String> {
    let values = [
        SqlValue::Text(unit.unit.clone()),
        SqlValue::Expr(geometry::polygon_geography(&unit.geometry)?),
        SqlValue::Expr(format!("@{}", SURVEY_GROUP_ID_VAR)),
    ];
    insert_statement(database, SURVEY_UNITS_TABLE, &SURVEY_UNITS_COLUMNS, &values)
}
