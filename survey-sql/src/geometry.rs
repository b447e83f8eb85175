//! Geography constructor expressions for SQL Server
//!
//! Geometries are embedded in the generated INSERT statements as
//! `geography::STPointFromText` / `geography::STPolyFromText` calls with
//! SRID 4326 (WGS84). Polygon WKT is produced by geozero's WKT writer.

use anyhow::{bail, Context, Result};
use geo::{Geometry, MultiPolygon, Polygon};
use geozero::wkt::WktWriter;
use geozero::GeozeroGeometry;

/// Spatial reference identifier for all geography literals (WGS84)
pub const SRID: u32 = 4326;

/// `geography::STPointFromText` expression from lon/lat attribute values
pub fn point_geography(longitude: f64, latitude: f64) -> String {
    format!(
        "geography::STPointFromText('POINT({} {})', {})",
        longitude, latitude, SRID
    )
}

/// `geography::STPolyFromText` expression for a survey unit boundary.
///
/// SQL Server geography does not accept MULTIPOLYGON text in
/// `STPolyFromText`, so a single-part multipolygon is collapsed to its one
/// polygon before encoding. The collapse works on the geometry itself, not
/// on the WKT text, so the nesting depth always comes out right. A
/// multi-part geometry cannot be represented and is an error.
pub fn polygon_geography(geometry: &MultiPolygon) -> Result<String> {
    let polygon = collapse_multipolygon(geometry)?;
    let wkt = polygon_wkt(polygon)?;
    Ok(format!("geography::STPolyFromText('{}', {})", wkt, SRID))
}

/// Collapses a single-part multipolygon to its polygon
pub fn collapse_multipolygon(geometry: &MultiPolygon) -> Result<&Polygon> {
    match geometry.0.as_slice() {
        [polygon] => Ok(polygon),
        [] => bail!("Empty multipolygon"),
        parts => bail!(
            "Multipolygon with {} parts cannot be encoded as a single POLYGON",
            parts.len()
        ),
    }
}

/// WKT text for a polygon (no SRID prefix)
pub fn polygon_wkt(polygon: &Polygon) -> Result<String> {
    let mut buf: Vec<u8> = Vec::with_capacity(256);
    {
        let mut writer = WktWriter::new(&mut buf);
        Geometry::Polygon(polygon.clone())
            .process_geom(&mut writer)
            .context("Failed to encode polygon to WKT")?;
    }
    String::from_utf8(buf).context("WKT output was not valid UTF-8")
}
