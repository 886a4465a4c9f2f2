//! Extracted tables and their headers.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ReadorderError};
use crate::core::format::TableFormatter;

/// A cell as delivered by the page parser (`None` for empty cells)
pub type Cell = Option<String>;

/// One table row
pub type Row = Vec<Cell>;

pub const TABLE_OPEN: &str = "<table_data>";
pub const TABLE_CLOSE: &str = "</table_data>";

/// A table's rows plus an optional explicit header.
///
/// Without an explicit header the first row acts as the header and
/// the remaining rows are data. A table continued across a page
/// break is built with [`Table::derived`]: it inherits the header of
/// its predecessor and every one of its own rows is data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
    header: Option<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, header: None }
    }

    /// Table with an explicit header; fails if any row's width
    /// differs from the header's.
    pub fn with_header(header: Row, rows: Vec<Row>) -> Result<Self> {
        let mut table = Self::new(rows);
        table.set_header(header)?;
        Ok(table)
    }

    /// Continuation of `previous` onto a new page
    pub fn derived(previous: &Table, rows: Vec<Row>) -> Result<Self> {
        match previous.effective_header() {
            Some(header) => Self::with_header(header.clone(), rows),
            None => Err(ReadorderError::Validation(
                "cannot derive a table from a predecessor without rows".to_string(),
            )),
        }
    }

    /// Assign `header` after checking it against every data row
    pub fn set_header(&mut self, header: Row) -> Result<()> {
        validate_widths(&header, &self.rows)?;
        self.header = Some(header);
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_explicit_header(&self) -> bool {
        self.header.is_some()
    }

    /// The explicit header, or the first row when there is none
    pub fn effective_header(&self) -> Option<&Row> {
        self.header.as_ref().or_else(|| self.rows.first())
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Row] {
        if self.header.is_some() {
            &self.rows
        } else {
            self.rows.get(1..).unwrap_or(&[])
        }
    }

    /// Check every data row against the effective header
    pub fn validate(&self) -> Result<()> {
        match self.effective_header() {
            Some(header) => validate_widths(header, self.data_rows()),
            None => Ok(()),
        }
    }

    /// Full table text as embedded in the linearized page
    pub fn render(&self, formatter: &dyn TableFormatter) -> String {
        let mut all = Vec::with_capacity(self.rows.len() + 1);
        if let Some(header) = &self.header {
            all.push(header.clone());
        }
        all.extend(self.rows.iter().cloned());
        wrap_table_text(&formatter.format(&all))
    }
}

pub(crate) fn wrap_table_text(body: &str) -> String {
    format!("{TABLE_OPEN}\n{body}\n{TABLE_CLOSE}")
}

fn validate_widths(header: &Row, rows: &[Row]) -> Result<()> {
    for (index, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(ReadorderError::Validation(format!(
                "header has {} cells but data row {} has {}",
                header.len(),
                index,
                row.len()
            )));
        }
    }
    Ok(())
}
