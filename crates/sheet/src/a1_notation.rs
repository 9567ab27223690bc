//! A1-style cell naming and parsing.

use crate::error::{Result, SheetError};

/// Convert a 0-based column index to spreadsheet column letters.
///
/// 0 = A, 25 = Z, 26 = AA, 701 = ZZ, 702 = AAA
#[must_use]
pub fn column_index_to_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert a 0-based (row, col) pair to 1-based A1 notation.
/// (0, 0) = "A1", (2, 1) = "B3"
#[must_use]
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}

/// Parse A1-style cell notation ("A1", "b3", "AA10") into 0-based
/// `(row, col)` indices.
///
/// # Errors
///
/// Returns `SheetError::InvalidCellNotation` when the column letters or the
/// row number are missing, the row is `0`, or anything follows the digits.
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    let invalid = || SheetError::InvalidCellNotation(notation.to_string());

    let split = notation
        .find(|c: char| c.is_ascii_digit())
        .filter(|&pos| pos > 0)
        .ok_or_else(invalid)?;
    let (letters, digits) = notation.split_at(split);

    let col = parse_column_letters(letters).ok_or_else(invalid)?;
    let row = match digits.parse::<usize>() {
        Ok(row) if row > 0 => row,
        _ => return Err(invalid()),
    };

    Ok((row - 1, col))
}

/// Column letters to a 0-based index; `None` for anything but ASCII letters.
fn parse_column_letters(letters: &str) -> Option<usize> {
    let col = letters.bytes().try_fold(0usize, |col, b| {
        let b = b.to_ascii_uppercase();
        if !b.is_ascii_uppercase() {
            return None;
        }
        col.checked_mul(26)?.checked_add(usize::from(b - b'A') + 1)
    })?;

    col.checked_sub(1)
}
