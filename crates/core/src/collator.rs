//! Multi-file collation: read, fill down, template and concatenate.

use crate::config::CollateConfig;
use crate::error::{CollateError, Result};
use crate::events::{CollateEvent, EventSink};
use crate::scan::scan_dir;
use crate::template::{ColumnTemplates, JinjaEngine, TemplateEngine};
use colate_sheet::{write_rows, Row, Sheet};
use std::path::Path;

/// Rows accumulated from every input file, in processing order.
///
/// Rows keep whatever width they had; nothing is padded or aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputMatrix {
    rows: Vec<Row>,
}

impl OutputMatrix {
    /// Create an empty matrix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Append rows in order
    pub fn push_rows<I: IntoIterator<Item = Row>>(&mut self, rows: I) {
        self.rows.extend(rows);
    }

    /// All rows
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the matrix has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Narrowest and widest row, or `None` when empty
    #[must_use]
    pub fn width_range(&self) -> Option<(usize, usize)> {
        let min = self.rows.iter().map(Vec::len).min()?;
        let max = self.rows.iter().map(Vec::len).max()?;
        Some((min, max))
    }

    /// Consume the matrix, returning its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Outcome of a collation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collation {
    /// The merged rows
    pub matrix: OutputMatrix,
    /// Number of input files processed
    pub files: usize,
    /// Number of template evaluations that failed and were left empty
    pub template_failures: usize,
}

/// Drives the per-file pipeline over an ordered list of inputs.
pub struct Collator<'a, E: TemplateEngine = JinjaEngine> {
    config: &'a CollateConfig,
    templates: &'a ColumnTemplates<E>,
}

impl<'a, E: TemplateEngine> Collator<'a, E> {
    /// Create a collator for a configuration and compiled templates
    #[must_use]
    pub fn new(config: &'a CollateConfig, templates: &'a ColumnTemplates<E>) -> Self {
        Self { config, templates }
    }

    /// Process `files` in the given order.
    ///
    /// Each file's sheet is read with the configured offset and limit, filled
    /// down, and every row gets its template columns before being appended.
    /// Row numbers restart at 0 for every file.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be read; no rows are returned.
    pub fn collate<P: AsRef<Path>>(&self, files: &[P], sink: &mut dyn EventSink) -> Result<Collation> {
        let read_options = self.config.read_options();
        let mut collation = Collation::default();

        for path in files {
            let path = path.as_ref();
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| CollateError::InvalidFileName(path.to_path_buf()))?;

            sink.record(CollateEvent::FileStarted {
                file: file_name.clone(),
            });

            let mut sheet = Sheet::read(path, &self.config.sheet_name, &read_options)?;
            sink.record(CollateEvent::RowsRead {
                file: file_name.clone(),
                rows: sheet.row_count(),
            });

            sheet.fill_down_with(|cell| {
                sink.record(CollateEvent::CellFilled {
                    file: file_name.clone(),
                    row: cell.row,
                    column: cell.column,
                    value: cell.value.to_string(),
                });
            });

            let rows = sheet.into_rows();
            let row_count = rows.len();
            for (row_num, row) in rows.into_iter().enumerate() {
                let (row, failures) = self.templates.apply(
                    row,
                    &file_name,
                    row_num,
                    self.config.column_position,
                    sink,
                );
                collation.template_failures += failures;
                collation.matrix.push(row);
            }

            sink.record(CollateEvent::FileCompleted {
                file: file_name,
                rows: row_count,
            });
            collation.files += 1;
        }

        Ok(collation)
    }
}

/// Run the whole pipeline described by `config`.
///
/// Templates are compiled before any input is touched. The output workbook
/// is written only after every input file has been collated.
///
/// # Errors
///
/// Returns the first fatal error: a bad template list, an unreadable input
/// directory or file, a missing sheet, or an unwritable output.
pub fn run(config: &CollateConfig, sink: &mut dyn EventSink) -> Result<Collation> {
    let templates = ColumnTemplates::parse(&config.column_templates)?;

    let files = scan_dir(&config.input_dir, &config.file_pattern)?;
    sink.record(CollateEvent::FilesFound {
        files: files.clone(),
    });

    let collation = Collator::new(config, &templates).collate(&files, sink)?;

    write_rows(&config.output_path, &config.sheet_name, collation.matrix.rows())?;
    sink.record(CollateEvent::OutputWritten {
        path: config.output_path.clone(),
        rows: collation.matrix.len(),
    });

    Ok(collation)
}
