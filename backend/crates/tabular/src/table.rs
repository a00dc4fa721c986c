//! Rectangular table model and RFC 4180 rendering.
//!
//! A [`Table`] owns one header row and zero or more data rows. Arity is
//! checked at insertion so rendering can assume a rectangular shape. The
//! renderer delegates quoting and escaping to the `csv` crate, which only
//! quotes fields that need it (embedded delimiters, quotes, or newlines).

use crate::error::TabularError;

/// A rectangular table of string cells with a mandatory header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given header row.
    ///
    /// # Errors
    ///
    /// Returns [`TabularError::EmptyHeader`] if no column names are supplied.
    pub fn new<I, S>(headers: I) -> Result<Self, TabularError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if headers.is_empty() {
            return Err(TabularError::EmptyHeader);
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Appends one data row.
    ///
    /// # Errors
    ///
    /// Returns [`TabularError::ColumnArityMismatch`] if the cell count does
    /// not match the header's column count. The table is left unchanged on
    /// error.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<(), TabularError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if cells.len() != self.headers.len() {
            return Err(TabularError::ColumnArityMismatch {
                expected: self.headers.len(),
                found: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// The header row.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All data rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns declared by the header.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table, header first, as RFC 4180 delimited text.
    ///
    /// Records terminate with `\n`. Fields containing the delimiter, a
    /// double quote, or a line break are quoted; embedded quotes double.
    ///
    /// # Errors
    ///
    /// Returns [`TabularError::Render`] if the underlying writer fails.
    pub fn to_csv(&self) -> Result<String, TabularError> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        writer
            .write_record(&self.headers)
            .map_err(|error| render_error(error.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|error| render_error(error.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|error| render_error(error.to_string()))?;
        String::from_utf8(bytes).map_err(|error| render_error(error.to_string()))
    }
}

fn render_error(message: String) -> TabularError {
    TabularError::Render { message }
}
