//! SQL script writer
//!
//! Writes the script header (generation metadata, `USE`, an open
//! `BEGIN TRANSACTION`, the shared variable declaration), one INSERT per
//! record, and the commit/rollback reminder footer. The transaction is left
//! open on purpose: either every row goes in or none do, and the operator
//! decides by running COMMIT or ROLLBACK after reviewing the script.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

/// Warning attached to BEGIN TRANSACTION and repeated in the footer
const TRANSACTION_WARNING: &str = "Do not forget to COMMIT or ROLLBACK the changes after executing or the database will be in a locked state";

/// Metadata written into the script header
#[derive(Debug, Clone)]
pub struct ScriptMeta {
    /// First comment line describing the script
    pub description: String,
    /// Target database for the USE statement
    pub database: String,
    /// Source dataset the records were read from
    pub source: PathBuf,
    /// What the generated rows are ("waypoints", "survey units")
    pub subject: String,
    /// Shared variable declared once and referenced by every INSERT
    pub variable: SharedVariable,
}

/// The per-run identifier declared once as a script variable instead of
/// being re-quoted into every row
#[derive(Debug, Clone)]
pub struct SharedVariable {
    /// Variable name without the leading '@' (e.g. "SurveyID")
    pub name: String,
    /// Value assigned at the top of the script
    pub value: String,
    /// Comment explaining which parent record the rows relate to
    pub comment: String,
}

impl SharedVariable {
    /// The `@Name` form used in statements
    pub fn reference(&self) -> String {
        format!("@{}", self.name)
    }
}

/// Writes a SQL script: header block, INSERT statements, reminder footer
pub struct ScriptWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    statements: usize,
}

impl ScriptWriter {
    /// Creates (or truncates) the output file and writes the header block
    pub fn create(path: &Path, meta: &ScriptMeta) -> Result<Self> {
        let file = File::create(path)
            .context(format!("Failed to create script file: {}", path.display()))?;

        let mut script = Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            statements: 0,
        };
        script.write_header(meta)?;
        Ok(script)
    }

    fn write_header(&mut self, meta: &ScriptMeta) -> Result<()> {
        let generated = Local::now().format("%c");
        let user = whoami::username_os().to_string_lossy().into_owned();

        writeln!(self.writer, "-- {}", meta.description)?;
        writeln!(self.writer, "-- File generated {} by {}", generated, user)?;
        writeln!(self.writer, "USE {} ", meta.database)?;
        writeln!(self.writer, "BEGIN TRANSACTION -- {} ", TRANSACTION_WARNING)?;
        writeln!(self.writer, "SET QUOTED_IDENTIFIER ON")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "\n-- insert the generated {} from {} {}",
            meta.subject,
            meta.source.display(),
            "-".repeat(59)
        )?;
        writeln!(
            self.writer,
            "DECLARE {} nvarchar(50) -- {}",
            meta.variable.reference(),
            meta.variable.comment
        )?;
        writeln!(
            self.writer,
            "SET {} = {}",
            meta.variable.reference(),
            crate::sql::quote(&meta.variable.value)
        )?;
        Ok(())
    }

    /// Appends one INSERT statement
    pub fn write_statement(&mut self, sql: &str) -> Result<()> {
        debug!(statement = sql, "Generated INSERT");
        writeln!(self.writer, "{}", sql)?;
        self.statements += 1;
        Ok(())
    }

    /// Number of statements written so far
    pub fn statements(&self) -> usize {
        self.statements
    }

    /// Writes the reminder footer and the commented-out verification SELECT,
    /// then flushes and closes the file. Returns the statement count.
    pub fn finish(mut self, table: &str, variable: &SharedVariable) -> Result<usize> {
        writeln!(self.writer, "-- {} ", TRANSACTION_WARNING)?;
        writeln!(
            self.writer,
            "-- Execute the query below after committing records to retrieve the inserted records"
        )?;
        writeln!(
            self.writer,
            "-- SET {} = {}",
            variable.reference(),
            crate::sql::quote(&variable.value)
        )?;
        writeln!(
            self.writer,
            "-- SELECT * FROM {} WHERE {} = {};",
            table,
            variable.name,
            variable.reference()
        )?;

        self.writer
            .flush()
            .context(format!("Failed to flush script file: {}", self.path.display()))?;
        Ok(self.statements)
    }
}

/// Default output path: the full input file name with ".sql" appended
/// (`waypoints.shp` becomes `waypoints.shp.sql`)
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".sql");
    PathBuf::from(name)
}
