use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to open workbook {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("Sheet not found: '{sheet}' in {} (available: {available:?})", .path.display())]
    SheetNotFound {
        sheet: String,
        path: PathBuf,
        available: Vec<String>,
    },

    #[error("Failed to read sheet '{sheet}' from {}: {message}", .path.display())]
    Read {
        sheet: String,
        path: PathBuf,
        message: String,
    },

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Cell index overflow: row {row}, col {col}")]
    IndexOverflow { row: usize, col: usize },

    #[error("Failed to write cell {cell}: {message}")]
    CellWrite { cell: String, message: String },

    #[error("Failed to write workbook {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
