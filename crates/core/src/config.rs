//! Run configuration.

use colate_sheet::ReadOptions;
use std::path::{Path, PathBuf};

/// Default column template: the source file's base name.
pub const DEFAULT_COLUMN_TEMPLATES: &str = "{{ file_name }}";

/// Default input file pattern.
pub const DEFAULT_FILE_PATTERN: &str = "*.xlsx";

/// Settings for one collation run.
///
/// Built once before the pipeline starts and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollateConfig {
    /// Directory scanned for input workbooks
    pub input_dir: PathBuf,
    /// Path of the merged workbook
    pub output_path: PathBuf,
    /// Sheet read from every input, and the name of the output sheet
    pub sheet_name: String,
    /// 0-based row the data starts on in each input sheet
    pub row_start: usize,
    /// Maximum rows taken from each input sheet; `None` for no limit
    pub row_limit: Option<usize>,
    /// Comma-separated column templates
    pub column_templates: String,
    /// Index the generated columns are inserted at (0 = before all cells)
    pub column_position: usize,
    /// Case-insensitive glob selecting input files
    pub file_pattern: String,
}

impl Default for CollateConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_path: PathBuf::from("./output.xlsx"),
            sheet_name: "Sheet1".to_string(),
            row_start: 0,
            row_limit: None,
            column_templates: DEFAULT_COLUMN_TEMPLATES.to_string(),
            column_position: 0,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

impl CollateConfig {
    /// Set the input directory
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the output workbook path
    #[must_use]
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the sheet name
    #[must_use]
    pub fn with_sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = name.to_string();
        self
    }

    /// Set the 0-based starting row
    #[must_use]
    pub fn with_row_start(mut self, row_start: usize) -> Self {
        self.row_start = row_start;
        self
    }

    /// Set the per-file row limit (0 means unlimited)
    #[must_use]
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = (row_limit > 0).then_some(row_limit);
        self
    }

    /// Set the comma-separated column templates
    #[must_use]
    pub fn with_column_templates(mut self, templates: &str) -> Self {
        self.column_templates = templates.to_string();
        self
    }

    /// Set the index generated columns are inserted at
    #[must_use]
    pub fn with_column_position(mut self, position: usize) -> Self {
        self.column_position = position;
        self
    }

    /// Set the input file glob
    #[must_use]
    pub fn with_file_pattern(mut self, pattern: &str) -> Self {
        self.file_pattern = pattern.to_string();
        self
    }

    /// Sheet read options derived from the offset and limit
    #[must_use]
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            row_start: self.row_start,
            row_limit: self.row_limit,
        }
    }
}
