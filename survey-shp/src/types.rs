//! Record types produced by the shapefile readers

use geo::MultiPolygon;

/// A GPS waypoint read from a point shapefile
///
/// Coordinates come from the `Latitude`/`Longitude` attribute columns, not
/// from the shape record: the GPS download tools write both, and the
/// monitoring database keys off the attribute values.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Waypoint identifier (dbf field `ident`)
    pub ident: String,

    /// Capture timestamp as recorded by the GPS (dbf field `ltime`)
    pub capture_time: String,

    /// Altitude reading; `None` when the GPS recorded nothing (dbf field `altitude`)
    pub altitude: Option<f64>,

    /// GPS unit model (dbf field `model`)
    pub model: String,

    /// Temperature reading; `None` when absent (dbf field `temp`)
    pub temperature: Option<f64>,

    /// Free-text note entered by the pilot or observer (dbf field `comment`)
    pub comment: String,

    /// Latitude in decimal degrees, WGS84 (dbf field `Latitude`)
    pub latitude: f64,

    /// Longitude in decimal degrees, WGS84 (dbf field `Longitude`)
    pub longitude: f64,
}

/// A polygon survey unit read from a survey unit shapefile
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyUnit {
    /// Unit identifier (dbf field `UniqueID`)
    pub unit: String,

    /// Unit boundary. Shapefile polygons always come back as multipolygons;
    /// most units are single-part.
    pub geometry: MultiPolygon,
}
