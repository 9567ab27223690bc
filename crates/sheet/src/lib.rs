//! Sheet I/O for colate
//!
//! Reads one named sheet from a workbook as rows of text, normalizes blank
//! cells by filling them down from the row above, and writes a row matrix
//! back out as a single-sheet xlsx file.
//!
//! # Examples
//!
//! ## Filling blanks down
//!
//! ```
//! use colate_sheet::Sheet;
//!
//! let mut sheet = Sheet::from_rows(vec![
//!     vec!["Region", "Store"],
//!     vec!["North", "A"],
//!     vec!["", "B"],
//! ]);
//!
//! assert_eq!(sheet.fill_down(), 1);
//! assert_eq!(sheet.rows()[2][0], "North");
//! ```
//!
//! ## Reading with an offset
//!
//! ```no_run
//! use colate_sheet::{ReadOptions, Sheet};
//!
//! let options = ReadOptions::default().with_row_start(1).with_row_limit(100);
//! let sheet = Sheet::read("input.xlsx", "Sheet1", &options).unwrap();
//! ```
//!
//! All cell values are treated as text; no type inference is performed.

mod a1_notation;
mod error;
mod sheet;
mod xlsx;

pub use a1_notation::{column_index_to_letters, parse_a1, to_a1_notation};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
pub use sheet::{FilledCell, Row, Sheet};
pub use xlsx::{write_rows, ReadOptions};
