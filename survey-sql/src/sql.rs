//! T-SQL literal rendering and INSERT statement assembly
//!
//! String values always go through [`quote`], which doubles embedded single
//! quotes. The generated script is reviewed and executed by a human, so the
//! statements must at least be well-formed for any field content.

use anyhow::{ensure, Result};

/// A value destined for one column of an INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// String literal, quoted and escaped
    Text(String),
    /// Numeric literal; `None` renders as NULL
    Number(Option<f64>),
    /// Raw SQL expression written as-is (geography constructor, @variable)
    Expr(String),
}

impl SqlValue {
    /// Renders the value as T-SQL literal text
    pub fn render(&self) -> String {
        match self {
            SqlValue::Text(s) => quote(s),
            SqlValue::Number(Some(n)) => n.to_string(),
            SqlValue::Number(None) => "NULL".to_string(),
            SqlValue::Expr(e) => e.clone(),
        }
    }
}

/// Quotes a string as a T-SQL literal, doubling embedded single quotes
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Builds a single-line INSERT statement with bracketed identifiers.
///
/// The column and value lists must have the same length; a mismatch is a
/// programming error in the mapper and is reported instead of producing a
/// truncated statement.
pub fn insert_statement(
    database: &str,
    table: &str,
    columns: &[&str],
    values: &[SqlValue],
) -> Result<String> {
    ensure!(
        columns.len() == values.len(),
        "Column/value arity mismatch for {}: {} columns, {} values",
        table,
        columns.len(),
        values.len()
    );

    let column_list = columns
        .iter()
        .map(|c| format!("[{}]", c))
        .collect::<Vec<_>>()
        .join(",");
    let value_list = values
        .iter()
        .map(SqlValue::render)
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!(
        "INSERT INTO [{}].[dbo].[{}]({})VALUES({})",
        database, table, column_list, value_list
    ))
}
