//! Error types for the survey-shp crate

use thiserror::Error;

/// Errors that can occur while reading a survey shapefile
#[derive(Debug, Error)]
pub enum ShpError {
    /// I/O error while opening the dataset
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the shapefile reader (missing .shp/.dbf, corrupt data)
    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// A required attribute field is absent from the dbf table
    #[error("Missing required field '{field}' in {file}")]
    MissingField { field: String, file: String },

    /// An attribute field holds a value of an unexpected dbf type
    #[error("Field '{field}' in {file} has unexpected type: expected {expected}, found {found}")]
    FieldType {
        field: String,
        file: String,
        expected: &'static str,
        found: String,
    },

    /// A field that must carry a value is null
    #[error("Field '{field}' is null in record {index} of {file}")]
    NullField {
        field: String,
        index: usize,
        file: String,
    },

    /// A feature's shape is not of the kind the reader expects
    #[error("Unexpected shape in record {index} of {file}: expected {expected}, found {found}")]
    UnexpectedShape {
        index: usize,
        file: String,
        expected: &'static str,
        found: String,
    },
}

impl ShpError {
    /// Creates a missing-field error with context
    pub fn missing_field(field: impl Into<String>, file: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            file: file.into(),
        }
    }

    /// Creates a field-type error with context
    pub fn field_type(
        field: impl Into<String>,
        file: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::FieldType {
            field: field.into(),
            file: file.into(),
            expected,
            found: found.into(),
        }
    }
}
