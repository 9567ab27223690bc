/// A row of text cells. Rows within a sheet may differ in length.
pub type Row = Vec<String>;

/// A cell that received a value from the row above during fill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledCell<'a> {
    /// 0-based row index within the sheet
    pub row: usize,
    /// 0-based column index
    pub column: usize,
    /// The inherited value
    pub value: &'a str,
}

/// A named, ordered sequence of rows read from one workbook sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Row>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Create a sheet from 2D text data
    #[must_use]
    pub fn from_rows<T: Into<String>>(rows: Vec<Vec<T>>) -> Self {
        Sheet {
            name: "Sheet1".to_string(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sheet has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all rows
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get mutable access to the rows
    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Consume the sheet, returning its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    // ===== Fill-down =====

    /// Replace empty cells with the value directly above them.
    ///
    /// The first row is never modified. Returns the number of cells filled.
    pub fn fill_down(&mut self) -> usize {
        self.fill_down_with(|_| {})
    }

    /// Fill down, invoking `on_fill` for every cell that inherits a value.
    ///
    /// Values flow forward only: each row reads the already-filled row above
    /// it, so a value propagates through any run of empty cells. A cell whose
    /// column does not exist in the previous row stays empty.
    pub fn fill_down_with<F>(&mut self, mut on_fill: F) -> usize
    where
        F: FnMut(&FilledCell<'_>),
    {
        let mut filled = 0;

        for ri in 1..self.rows.len() {
            let (above, below) = self.rows.split_at_mut(ri);
            let prev = &above[ri - 1];
            let row = &mut below[0];

            for (ci, cell) in row.iter_mut().enumerate() {
                if !cell.is_empty() {
                    continue;
                }
                let Some(value) = prev.get(ci).filter(|v| !v.is_empty()) else {
                    continue;
                };

                cell.clone_from(value);
                filled += 1;
                on_fill(&FilledCell {
                    row: ri,
                    column: ci,
                    value,
                });
            }
        }

        filled
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
