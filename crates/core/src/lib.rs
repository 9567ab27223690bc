//! # colate-core
//!
//! Collates one named sheet from many workbooks into a single table.
//!
//! For every input file, in file-name order:
//! 1. the sheet is read from the configured start row, up to the row limit
//! 2. empty cells are filled down from the row above
//! 3. column templates are evaluated per row and the results inserted at
//!    the configured position (the head by default)
//! 4. the rows are appended to the output matrix
//!
//! The finished matrix is written to a single-sheet workbook.
//!
//! ```no_run
//! use colate_core::{run, CollateConfig, TracingSink};
//!
//! let config = CollateConfig::default()
//!     .with_input_dir("reports")
//!     .with_sheet_name("Data")
//!     .with_row_start(1)
//!     .with_column_templates("{{ file_name }},{{ row_num }}");
//!
//! let collation = run(&config, &mut TracingSink).unwrap();
//! println!("{} rows from {} files", collation.matrix.len(), collation.files);
//! ```

/// Multi-file collation and the end-to-end run.
pub mod collator;
/// Run configuration.
pub mod config;
/// Error types and result aliases.
pub mod error;
/// Pipeline events and sinks.
pub mod events;
/// Input file discovery.
pub mod scan;
/// Column templates.
pub mod template;

pub use collator::{run, Collation, Collator, OutputMatrix};
pub use config::CollateConfig;
pub use error::{CollateError, Result, TemplateError};
pub use events::{CollateEvent, EventSink, TracingSink};
pub use scan::scan_dir;
pub use template::{split_template_list, ColumnTemplates, JinjaEngine, RowContext, TemplateEngine};

/// Re-export of the sheet crate.
pub use colate_sheet as sheet;
