use crate::a1_notation::to_a1_notation;
use crate::error::{Result, SheetError};
use crate::sheet::{Row, Sheet};
use calamine::{open_workbook_auto, Data, Dimensions, Range, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::io::{Read, Seek};
use std::path::Path;

/// Options for reading a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// 0-based row the data starts on (rows above it are dropped)
    pub row_start: usize,
    /// Maximum number of rows to keep after the offset; `None` for no limit
    pub row_limit: Option<usize>,
}

impl ReadOptions {
    /// Set the 0-based starting row
    #[must_use]
    pub fn with_row_start(mut self, row_start: usize) -> Self {
        self.row_start = row_start;
        self
    }

    /// Set the row limit (0 means unlimited)
    #[must_use]
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = (row_limit > 0).then_some(row_limit);
        self
    }
}

/// Render a calamine cell as text
fn data_to_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
        // Excel serial date (days since 1899-12-30)
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => e.to_string(),
    }
}

/// The `<dimension>` an xlsx worksheet declares for itself.
///
/// Blank cells never reach a calamine range, so this is the only record of
/// trailing empty columns and rows. Other formats report `None`.
fn declared_dimensions<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_name: &str,
) -> Option<Dimensions> {
    match workbook {
        Sheets::Xlsx(xlsx) => xlsx
            .worksheet_cells_reader(sheet_name)
            .ok()
            .map(|reader| reader.dimensions()),
        _ => None,
    }
}

/// Convert a used range into a rectangular grid of rows anchored at A1.
///
/// Every row spans the full width of the sheet, so trailing blank cells
/// are kept as `""`. A declared dimension of just `A1` is what an empty
/// sheet carries and adds nothing.
fn range_to_rows(range: &Range<Data>, declared: Option<Dimensions>) -> Vec<Row> {
    let mut extent = range.end();
    if let Some(dims) = declared.filter(|dims| dims.end != (0, 0)) {
        extent = Some(extent.map_or(dims.end, |(row, col)| {
            (row.max(dims.end.0), col.max(dims.end.1))
        }));
    }
    let Some((last_row, last_col)) = extent else {
        return Vec::new();
    };

    let width = last_col as usize + 1;
    let mut rows: Vec<Row> = vec![vec![String::new(); width]; last_row as usize + 1];

    if let Some((start_row, start_col)) = range.start() {
        let cells = range.rows().zip(&mut rows[start_row as usize..]);
        for (values, row) in cells {
            for (value, cell) in values.iter().zip(&mut row[start_col as usize..]) {
                *cell = data_to_text(value);
            }
        }
    }

    rows
}

impl Sheet {
    /// Read one named sheet from a workbook (xlsx, xlsm, xlsb, xls or ods).
    ///
    /// Rows are anchored at A1 and all as wide as the sheet's used range,
    /// with blank cells read as `""`. Rows before `options.row_start` are
    /// dropped and at most `options.row_limit` rows are kept. An offset past
    /// the last row gives an empty sheet.
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be opened, the sheet does not
    /// exist, or its cells cannot be decoded.
    pub fn read<P: AsRef<Path>>(path: P, sheet_name: &str, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let available = workbook.sheet_names();
        if !available.iter().any(|name| name == sheet_name) {
            return Err(SheetError::SheetNotFound {
                sheet: sheet_name.to_string(),
                path: path.to_path_buf(),
                available,
            });
        }

        let declared = declared_dimensions(&mut workbook, sheet_name);
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| SheetError::Read {
                sheet: sheet_name.to_string(),
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut sheet = Sheet::with_name(sheet_name);
        *sheet.rows_mut() = range_to_rows(&range, declared)
            .into_iter()
            .skip(options.row_start)
            .take(options.row_limit.unwrap_or(usize::MAX))
            .collect();

        Ok(sheet)
    }

    /// Get sheet names from a workbook without loading data
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be opened.
    pub fn sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(workbook.sheet_names())
    }

    /// Save the sheet as a single-worksheet xlsx file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_rows(path, self.name(), self.rows())
    }
}

/// Write rows into a new xlsx workbook holding one worksheet named `sheet_name`.
///
/// Cells are written row-major as strings. Empty strings become blank
/// text-formatted cells so the sheet's extent covers them and
/// [`Sheet::read`] gives them back as `""`.
///
/// # Errors
///
/// Returns error if the sheet name is rejected, a cell lies outside Excel's
/// grid, or the file cannot be saved.
pub fn write_rows<P: AsRef<Path>>(path: P, sheet_name: &str, rows: &[Row]) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name(sheet_name)
        .map_err(|e| SheetError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let blank = Format::new().set_num_format("@");
    write_to_worksheet(worksheet, rows, &blank)?;

    workbook.save(path).map_err(|e| SheetError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

fn write_to_worksheet(worksheet: &mut Worksheet, rows: &[Row], blank: &Format) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (Ok(row_num), Ok(col_num)) = (u32::try_from(row_idx), u16::try_from(col_idx))
            else {
                return Err(SheetError::IndexOverflow {
                    row: row_idx,
                    col: col_idx,
                });
            };

            let written = if value.is_empty() {
                worksheet.write_blank(row_num, col_num, blank)
            } else {
                worksheet.write_string(row_num, col_num, value.as_str())
            };
            written.map_err(|e| SheetError::CellWrite {
                cell: to_a1_notation(row_idx, col_idx),
                message: e.to_string(),
            })?;
        }
    }

    Ok(())
}
