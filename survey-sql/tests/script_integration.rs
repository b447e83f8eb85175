//! End-to-end tests: generated shapefile in, SQL script out

use std::path::{Path, PathBuf};

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};

use survey_sql::cli;
use survey_sql::script::default_output_path;
use survey_sql::ScriptStatus;

const DATABASE: &str = "CompositionCountSurveys";

fn field_name(name: &str) -> FieldName {
    FieldName::try_from(name).unwrap()
}

fn fixture_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

fn cleanup(shp_path: &Path) {
    for ext in ["shp", "shx", "dbf"] {
        std::fs::remove_file(shp_path.with_extension(ext)).ok();
    }
    std::fs::remove_file(default_output_path(shp_path)).ok();
}

fn character(value: &str) -> FieldValue {
    FieldValue::Character(Some(value.to_string()))
}

fn write_waypoint_fixture(path: &Path, rows: &[(&str, &str, Option<f64>, &str, f64, f64)]) {
    let table = TableWriterBuilder::new()
        .add_character_field(field_name("ident"), 50)
        .add_character_field(field_name("ltime"), 30)
        .add_numeric_field(field_name("altitude"), 10, 1)
        .add_character_field(field_name("model"), 30)
        .add_numeric_field(field_name("temp"), 10, 1)
        .add_character_field(field_name("comment"), 100)
        .add_numeric_field(field_name("Latitude"), 12, 6)
        .add_numeric_field(field_name("Longitude"), 12, 6);

    let mut writer = shapefile::Writer::from_path(path, table).unwrap();
    for (ident, ltime, altitude, comment, latitude, longitude) in rows {
        let mut record = Record::default();
        record.insert("ident".to_string(), character(ident));
        record.insert("ltime".to_string(), character(ltime));
        record.insert("altitude".to_string(), FieldValue::Numeric(*altitude));
        record.insert("model".to_string(), character("GPSMAP 296"));
        record.insert("temp".to_string(), FieldValue::Numeric(Some(-2.0)));
        record.insert("comment".to_string(), character(comment));
        record.insert("Latitude".to_string(), FieldValue::Numeric(Some(*latitude)));
        record.insert("Longitude".to_string(), FieldValue::Numeric(Some(*longitude)));
        writer
            .write_shape_and_record(&Point::new(*longitude, *latitude), &record)
            .unwrap();
    }
}

fn square(origin_x: f64, origin_y: f64) -> Polygon {
    // Clockwise, closed outer ring per the shapefile spec
    Polygon::new(PolygonRing::Outer(vec![
        Point::new(origin_x, origin_y),
        Point::new(origin_x, origin_y + 0.25),
        Point::new(origin_x + 0.25, origin_y + 0.25),
        Point::new(origin_x + 0.25, origin_y),
        Point::new(origin_x, origin_y),
    ]))
}

fn write_unit_fixture(path: &Path, units: &[(&str, f64, f64)]) {
    let table = TableWriterBuilder::new().add_character_field(field_name("UniqueID"), 50);
    let mut writer = shapefile::Writer::from_path(path, table).unwrap();
    for (unique_id, x, y) in units {
        let mut record = Record::default();
        record.insert("UniqueID".to_string(), character(unique_id));
        writer
            .write_shape_and_record(&square(*x, *y), &record)
            .unwrap();
    }
}

fn insert_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|l| l.starts_with("INSERT INTO"))
        .collect()
}

#[test]
fn test_waypoint_script_end_to_end() {
    let path = fixture_path("survey_sql_e2e_waypoints.shp");
    write_waypoint_fixture(
        &path,
        &[
            ("WP001", "2015-06-12 10:31:02", Some(457.5), "north ridge", 66.35, -158.1),
            ("WP002", "2015-06-12 10:48:55", None, "bear at O'Malley creek", 66.401, -158.23),
            ("WP003", "2015-06-12 11:02:17", Some(512.0), "", 66.45, -158.31),
        ],
    );

    let report = cli::cmd_waypoints(&path, "SURVEY-42", DATABASE, None, None).unwrap();

    let output = default_output_path(&path);
    assert!(output.exists());
    let content = std::fs::read_to_string(&output).unwrap();
    cleanup(&path);

    assert_eq!(report.status, ScriptStatus::Success);
    assert_eq!(report.records_read, 3);
    assert_eq!(report.statements_written, 3);

    // Exactly one header block, N statements, one footer block
    let inserts = insert_lines(&content);
    assert_eq!(inserts.len(), 3);
    assert_eq!(content.matches("BEGIN TRANSACTION").count(), 1);
    assert_eq!(content.matches("USE CompositionCountSurveys").count(), 1);
    assert_eq!(content.matches("SET QUOTED_IDENTIFIER ON").count(), 1);
    assert_eq!(
        content
            .matches("-- SELECT * FROM Locations WHERE SurveyID = @SurveyID;")
            .count(),
        1
    );

    // Shared variable declared once, referenced by every row
    assert_eq!(content.matches("DECLARE @SurveyID nvarchar(50)").count(), 1);
    assert_eq!(content.matches("SET @SurveyID = 'SURVEY-42'").count(), 1);
    for insert in &inserts {
        assert!(insert.ends_with(",@SurveyID)"));
        assert!(!insert.contains("'SURVEY-42'"), "id must not be re-quoted per row");
    }

    // Column list fixed in name, order and count
    for insert in &inserts {
        assert!(insert.contains(
            "[Locations]([LocationName],[Type],[CaptureDate],[Altitude],[Temperature],\
             [GPSModel],[PointFilename],[Notes],[Location],[SurveyID])VALUES("
        ));
    }

    // Constant type tag and traceable source file name
    assert!(inserts[0].contains("'WAYPOINT'"));
    assert!(inserts[0].contains("'survey_sql_e2e_waypoints.shp'"));

    // Null altitude renders as NULL
    assert!(inserts[1].contains(",NULL,"));

    // Embedded quote comes out escaped, statement stays well-formed
    assert!(inserts[1].contains("'bear at O''Malley creek'"));

    // Geometry literal round-trips lon/lat
    let coords = inserts[0]
        .split("STPointFromText('POINT(")
        .nth(1)
        .and_then(|s| s.split(')').next())
        .unwrap();
    let parts: Vec<f64> = coords.split(' ').map(|v| v.parse().unwrap()).collect();
    assert!((parts[0] - -158.1).abs() < 1e-6);
    assert!((parts[1] - 66.35).abs() < 1e-6);
    assert!(inserts[0].contains("', 4326)"));
}

#[test]
fn test_survey_unit_script_end_to_end() {
    let path = fixture_path("survey_sql_e2e_units.shp");
    write_unit_fixture(&path, &[("GAAR-001", -158.0, 66.0), ("GAAR-002", -157.5, 66.5)]);

    let report = cli::cmd_survey_units(&path, "D37FFF9F-6202", DATABASE, None, None).unwrap();

    let output = default_output_path(&path);
    let content = std::fs::read_to_string(&output).unwrap();
    cleanup(&path);

    assert_eq!(report.status, ScriptStatus::Success);
    assert_eq!(report.statements_written, 2);

    let inserts = insert_lines(&content);
    assert_eq!(inserts.len(), 2);

    for insert in &inserts {
        assert!(insert.contains("[SurveyUnits]([Unit],[Feature],[SurveyGroupID])VALUES("));
        // Structural multipolygon collapse: POLYGON((...)), no extra parens
        assert!(insert.contains("geography::STPolyFromText('POLYGON(("));
        assert!(!insert.contains("MULTIPOLYGON"));
        assert!(!insert.contains("((("));
        assert!(insert.ends_with(",@SurveyGroupID)"));
    }

    assert!(content.contains("DECLARE @SurveyGroupID nvarchar(50)"));
    assert!(content.contains("SET @SurveyGroupID = 'D37FFF9F-6202'"));
    assert!(content.contains("-- SELECT * FROM SurveyUnits WHERE SurveyGroupID = @SurveyGroupID;"));
}

#[test]
fn test_explicit_output_and_report() {
    let path = fixture_path("survey_sql_e2e_report.shp");
    write_waypoint_fixture(
        &path,
        &[("WP001", "2015-06-12 10:31:02", Some(457.5), "", 66.35, -158.1)],
    );

    let output = fixture_path("survey_sql_e2e_report_custom.sql");
    let report_file = fixture_path("survey_sql_e2e_report.json");

    cli::cmd_waypoints(&path, "SURVEY-42", DATABASE, Some(&output), Some(&report_file)).unwrap();

    assert!(output.exists());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_file).unwrap()).unwrap();
    assert_eq!(json["statements_written"], 1);
    assert_eq!(json["status"], "Success");

    cleanup(&path);
    std::fs::remove_file(&output).ok();
    std::fs::remove_file(&report_file).ok();
}

#[test]
fn test_missing_input_creates_no_output() {
    let path = fixture_path("survey_sql_e2e_does_not_exist.shp");
    let output = default_output_path(&path);
    std::fs::remove_file(&output).ok();

    assert!(cli::cmd_waypoints(&path, "SURVEY-42", DATABASE, None, None).is_err());
    assert!(cli::cmd_survey_units(&path, "GROUP-1", DATABASE, None, None).is_err());
    assert!(!output.exists());
}
