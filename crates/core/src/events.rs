//! Pipeline events and the sinks that receive them.
//!
//! The collator reports what it does through an [`EventSink`] instead of
//! logging directly. [`TracingSink`] forwards events to `tracing`; a
//! `Vec<CollateEvent>` records them for inspection.

use std::path::PathBuf;

/// Something that happened during a collation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollateEvent {
    /// The input directory was scanned.
    FilesFound { files: Vec<PathBuf> },
    /// Processing of an input file began.
    FileStarted { file: String },
    /// A sheet was read (after offset and limit).
    RowsRead { file: String, rows: usize },
    /// An empty cell inherited the value above it.
    CellFilled {
        file: String,
        row: usize,
        column: usize,
        value: String,
    },
    /// A column template produced a value.
    TemplateEvaluated {
        file: String,
        row: usize,
        template: usize,
        value: String,
    },
    /// A column template failed; an empty value was used instead.
    TemplateFailed {
        file: String,
        row: usize,
        template: usize,
        error: String,
    },
    /// All rows of an input file were appended to the output.
    FileCompleted { file: String, rows: usize },
    /// The merged workbook was saved.
    OutputWritten { path: PathBuf, rows: usize },
}

impl CollateEvent {
    /// Whether the event reports a recovered failure.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, CollateEvent::TemplateFailed { .. })
    }
}

/// Receiver for [`CollateEvent`]s.
pub trait EventSink {
    /// Record one event.
    fn record(&mut self, event: CollateEvent);
}

impl EventSink for Vec<CollateEvent> {
    fn record(&mut self, event: CollateEvent) {
        self.push(event);
    }
}

/// Sink that emits every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: CollateEvent) {
        match event {
            CollateEvent::FilesFound { files } => {
                tracing::debug!(count = files.len(), files = ?files, "found input files");
            }
            CollateEvent::FileStarted { file } => {
                tracing::debug!(file = %file, "starting file");
            }
            CollateEvent::RowsRead { file, rows } => {
                tracing::debug!(file = %file, rows, "read rows");
            }
            CollateEvent::CellFilled {
                file,
                row,
                column,
                value,
            } => {
                tracing::debug!(
                    file = %file,
                    row,
                    column,
                    inherited = %value,
                    "inheriting empty cell value from previous row"
                );
            }
            CollateEvent::TemplateEvaluated {
                file,
                row,
                template,
                value,
            } => {
                tracing::trace!(file = %file, row, template, value = %value, "evaluated column template");
            }
            CollateEvent::TemplateFailed {
                file,
                row,
                template,
                error,
            } => {
                tracing::warn!(
                    file = %file,
                    row,
                    template,
                    error = %error,
                    "error executing column template"
                );
            }
            CollateEvent::FileCompleted { file, rows } => {
                tracing::debug!(file = %file, rows, "finished file");
            }
            CollateEvent::OutputWritten { path, rows } => {
                tracing::info!(path = %path.display(), rows, "wrote output");
            }
        }
    }
}
