//! Error types for colate.

use colate_sheet::SheetError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for collation operations.
pub type Result<T> = std::result::Result<T, CollateError>;

/// Fatal errors that abort a collation run.
#[derive(Debug, Error)]
pub enum CollateError {
    /// The column template list is not a valid delimited record.
    #[error("Invalid column template list: {0}")]
    TemplateList(#[from] csv::Error),

    /// A column template failed to compile.
    #[error("Column template {index} ({source_text:?}) does not compile: {message}")]
    TemplateCompile {
        index: usize,
        source_text: String,
        message: String,
    },

    /// The input file pattern is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// The input directory could not be listed.
    #[error("Failed to scan directory {}: {source}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input path has no usable file name.
    #[error("Invalid input file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    /// Reading an input sheet or writing the output failed.
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl CollateError {
    /// Create a template compile error.
    pub fn template_compile(
        index: usize,
        source_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TemplateCompile {
            index,
            source_text: source_text.into(),
            message: message.into(),
        }
    }
}

/// A template compile or evaluation failure reported by a template engine.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    /// Create a template error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        Self::new(err.to_string())
    }
}
