//! Shapefile readers for waypoints and survey units
//!
//! Wraps the `shapefile` crate and converts its dynamically typed dbf rows
//! into statically typed records. Every required field is resolved by name
//! and validated while reading; a missing field or a value of the wrong dbf
//! type fails the whole read before any record is returned.

use std::path::Path;

use shapefile::dbase::{FieldValue, Record};
use shapefile::{Reader, Shape};
use tracing::debug;

use crate::error::ShpError;
use crate::types::{SurveyUnit, Waypoint};

/// Attribute fields required in a waypoint shapefile
pub const WAYPOINT_FIELDS: [&str; 8] = [
    "ident",
    "ltime",
    "altitude",
    "model",
    "temp",
    "comment",
    "Latitude",
    "Longitude",
];

/// Attribute fields required in a survey unit shapefile
pub const SURVEY_UNIT_FIELDS: [&str; 1] = ["UniqueID"];

/// Reads GPS waypoints from a point shapefile.
///
/// Records are returned in the dataset's native order. The shape records are
/// not used: coordinates come from the `Latitude`/`Longitude` attribute
/// columns (see [`Waypoint`]).
///
/// # Errors
///
/// Fails when the dataset is missing or unreadable, when a required field is
/// absent, or when `Latitude`/`Longitude` hold no value.
pub fn read_waypoints(path: &Path) -> Result<Vec<Waypoint>, ShpError> {
    let mut reader = Reader::from_path(path)?;
    let file = display_name(path);

    let mut waypoints = Vec::new();
    for (index, row) in reader.iter_shapes_and_records().enumerate() {
        let (_, record) = row?;
        waypoints.push(Waypoint {
            ident: text_field(&record, "ident", &file)?,
            capture_time: text_field(&record, "ltime", &file)?,
            altitude: numeric_field(&record, "altitude", &file)?,
            model: text_field(&record, "model", &file)?,
            temperature: numeric_field(&record, "temp", &file)?,
            comment: text_field(&record, "comment", &file)?,
            latitude: required_numeric_field(&record, "Latitude", index, &file)?,
            longitude: required_numeric_field(&record, "Longitude", index, &file)?,
        });
    }

    debug!(count = waypoints.len(), file = %file, "Read waypoints");
    Ok(waypoints)
}

/// Reads polygon survey units from a shapefile.
///
/// Each record carries its `UniqueID` attribute and the polygon geometry as a
/// `geo::MultiPolygon`. A record whose shape is not a polygon fails the read.
pub fn read_survey_units(path: &Path) -> Result<Vec<SurveyUnit>, ShpError> {
    let mut reader = Reader::from_path(path)?;
    let file = display_name(path);

    let mut units = Vec::new();
    for (index, row) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = row?;
        let geometry = match shape {
            Shape::Polygon(polygon) => geo::MultiPolygon::from(polygon),
            other => {
                return Err(ShpError::UnexpectedShape {
                    index,
                    file,
                    expected: "Polygon",
                    found: other.shapetype().to_string(),
                })
            }
        };

        units.push(SurveyUnit {
            unit: text_field(&record, "UniqueID", &file)?,
            geometry,
        });
    }

    debug!(count = units.len(), file = %file, "Read survey units");
    Ok(units)
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

fn field<'a>(record: &'a Record, name: &str, file: &str) -> Result<&'a FieldValue, ShpError> {
    record
        .get(name)
        .ok_or_else(|| ShpError::missing_field(name, file))
}

/// Text-valued field. Null renders as an empty string; dates are formatted
/// as ISO `YYYY-MM-DD`; numbers are accepted and rendered with their default
/// formatting (GPS download tools are inconsistent about dbf column types).
fn text_field(record: &Record, name: &str, file: &str) -> Result<String, ShpError> {
    match field(record, name, file)? {
        FieldValue::Character(Some(s)) => Ok(s.trim_end().to_string()),
        FieldValue::Character(None) => Ok(String::new()),
        FieldValue::Memo(s) => Ok(s.clone()),
        FieldValue::Date(Some(d)) => Ok(format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())),
        FieldValue::Date(None) => Ok(String::new()),
        FieldValue::Numeric(Some(n)) => Ok(n.to_string()),
        FieldValue::Numeric(None) => Ok(String::new()),
        FieldValue::Integer(n) => Ok(n.to_string()),
        other => Err(ShpError::field_type(name, file, "character", type_name(other))),
    }
}

/// Numeric field; null maps to `None`. Character columns are tolerated when
/// their content parses as a number.
fn numeric_field(record: &Record, name: &str, file: &str) -> Result<Option<f64>, ShpError> {
    match field(record, name, file)? {
        FieldValue::Numeric(v) => Ok(*v),
        FieldValue::Float(v) => Ok(v.map(f64::from)),
        FieldValue::Double(v) => Ok(Some(*v)),
        FieldValue::Integer(v) => Ok(Some(f64::from(*v))),
        FieldValue::Character(None) => Ok(None),
        FieldValue::Character(Some(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ShpError::field_type(name, file, "numeric", format!("'{}'", trimmed)))
        }
        other => Err(ShpError::field_type(name, file, "numeric", type_name(other))),
    }
}

/// Numeric field that must carry a value (coordinates)
fn required_numeric_field(
    record: &Record,
    name: &str,
    index: usize,
    file: &str,
) -> Result<f64, ShpError> {
    numeric_field(record, name, file)?.ok_or_else(|| ShpError::NullField {
        field: name.to_string(),
        index,
        file: file.to_string(),
    })
}

fn type_name(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Character(_) => "character",
        FieldValue::Numeric(_) => "numeric",
        FieldValue::Logical(_) => "logical",
        FieldValue::Date(_) => "date",
        FieldValue::Float(_) => "float",
        FieldValue::Integer(_) => "integer",
        FieldValue::Double(_) => "double",
        FieldValue::Currency(_) => "currency",
        FieldValue::DateTime(_) => "datetime",
        FieldValue::Memo(_) => "memo",
    }
}
