//! Column templates: per-row values generated from file and row context.
//!
//! A template list is given as one comma-separated record (standard
//! delimited-text quoting applies, so a template containing a comma is
//! written `"{{ cells|join("","") }}"`). Every template is compiled once and
//! evaluated for every row of every file against a [`RowContext`].
//!
//! With the default [`JinjaEngine`] the variables available are:
//!
//! | Variable | Value |
//! |---|---|
//! | `cells` | the row's cells, indexable (`cells[0]`) |
//! | `file_name` | base name of the source file |
//! | `row_num` | 0-based row index after offset and limit |

use crate::error::{CollateError, Result, TemplateError};
use crate::events::{CollateEvent, EventSink};
use colate_sheet::Row;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::fmt;

/// Per-row data exposed to template evaluation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RowContext<'a> {
    /// Cells of the row, after fill-down
    pub cells: &'a [String],
    /// Base name of the originating file
    pub file_name: &'a str,
    /// 0-based index of the row within its file's sheet
    pub row_num: usize,
}

/// A text-substitution engine capable of compiling and evaluating templates.
pub trait TemplateEngine {
    /// Handle to a compiled template.
    type Compiled;

    /// Compile `source`, registering it under `name`.
    fn compile(&mut self, name: &str, source: &str) -> std::result::Result<Self::Compiled, TemplateError>;

    /// Evaluate a compiled template against one row.
    fn evaluate(
        &self,
        template: &Self::Compiled,
        ctx: &RowContext<'_>,
    ) -> std::result::Result<String, TemplateError>;
}

/// [`TemplateEngine`] backed by minijinja.
///
/// Undefined variables, attributes and out-of-range indexes are errors rather
/// than silently empty, so they surface as template failures.
#[derive(Debug)]
pub struct JinjaEngine {
    env: Environment<'static>,
}

impl JinjaEngine {
    /// Create an engine with strict undefined handling and no auto-escaping.
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaEngine {
    type Compiled = String;

    fn compile(&mut self, name: &str, source: &str) -> std::result::Result<String, TemplateError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(name.to_string())
    }

    fn evaluate(
        &self,
        template: &String,
        ctx: &RowContext<'_>,
    ) -> std::result::Result<String, TemplateError> {
        Ok(self.env.get_template(template)?.render(ctx)?)
    }
}

/// Split a comma-separated template list into individual template sources.
///
/// Only the first record is used. An empty list yields no templates.
///
/// # Errors
///
/// Returns error if the list is not valid delimited text.
pub fn split_template_list(list: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(list.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// The ordered list of compiled column templates for a run.
pub struct ColumnTemplates<E: TemplateEngine = JinjaEngine> {
    engine: E,
    compiled: Vec<E::Compiled>,
    sources: Vec<String>,
}

impl<E: TemplateEngine> fmt::Debug for ColumnTemplates<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnTemplates")
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

impl ColumnTemplates<JinjaEngine> {
    /// Parse and compile a comma-separated template list with [`JinjaEngine`].
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be split or any template fails to
    /// compile.
    pub fn parse(list: &str) -> Result<Self> {
        Self::compile_all(JinjaEngine::new(), split_template_list(list)?)
    }
}

impl<E: TemplateEngine> ColumnTemplates<E> {
    /// Compile every source with `engine`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first compile failure.
    pub fn compile_all(mut engine: E, sources: Vec<String>) -> Result<Self> {
        let mut compiled = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let template = engine
                .compile(&index.to_string(), source)
                .map_err(|e| CollateError::template_compile(index, source.as_str(), e.to_string()))?;
            compiled.push(template);
        }

        Ok(Self {
            engine,
            compiled,
            sources,
        })
    }

    /// Number of templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Check if there are no templates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Template sources, in order
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Evaluate every template against `ctx`.
    ///
    /// A template that fails yields an empty string and a
    /// [`CollateEvent::TemplateFailed`]. Returns the values in template
    /// order and the number of failures.
    pub fn render(&self, ctx: &RowContext<'_>, sink: &mut dyn EventSink) -> (Vec<String>, usize) {
        let mut failures = 0;
        let values = self
            .compiled
            .iter()
            .enumerate()
            .map(|(index, template)| match self.engine.evaluate(template, ctx) {
                Ok(value) => {
                    sink.record(CollateEvent::TemplateEvaluated {
                        file: ctx.file_name.to_string(),
                        row: ctx.row_num,
                        template: index,
                        value: value.clone(),
                    });
                    value
                }
                Err(err) => {
                    failures += 1;
                    sink.record(CollateEvent::TemplateFailed {
                        file: ctx.file_name.to_string(),
                        row: ctx.row_num,
                        template: index,
                        error: err.to_string(),
                    });
                    String::new()
                }
            })
            .collect();

        (values, failures)
    }

    /// Generate the template values for `row` and insert them at `position`.
    ///
    /// A position past the end of the row appends. Returns the new row and
    /// the number of failed templates.
    pub fn apply(
        &self,
        mut row: Row,
        file_name: &str,
        row_num: usize,
        position: usize,
        sink: &mut dyn EventSink,
    ) -> (Row, usize) {
        let ctx = RowContext {
            cells: &row,
            file_name,
            row_num,
        };
        let (values, failures) = self.render(&ctx, sink);

        let tail = row.split_off(position.min(row.len()));
        row.extend(values);
        row.extend(tail);
        (row, failures)
    }
}
