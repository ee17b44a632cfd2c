//! Header row detection for MEF report sheets
//!
//! The exported reports start with a few title and generation-info rows
//! before the real table. The first row with enough populated cells is taken
//! as the header. Rows are 0-based absolute sheet rows throughout.

use calamine::{Data, Range};

/// Only this many leading sheet rows are considered
pub const HEADER_SCAN_ROWS: u32 = 20;

/// Populated cells required for a row to count as the header
pub const MIN_HEADER_CELLS: usize = 3;

/// Cells that hold any value, including an empty string
pub fn count_populated(row: &[Data]) -> usize {
    row.iter().filter(|cell| !matches!(cell, Data::Empty)).count()
}

/// Absolute index of the header row, or 0 when no scanned row qualifies
///
/// There is no lookahead: a real header with fewer than
/// [`MIN_HEADER_CELLS`] populated cells is skipped over.
pub fn detect_header_row(range: &Range<Data>) -> u32 {
    let Some((first_row, _)) = range.start() else {
        return 0;
    };

    range
        .rows()
        .enumerate()
        .map(|(offset, row)| (first_row + offset as u32, row))
        .take_while(|(row_idx, _)| *row_idx < HEADER_SCAN_ROWS)
        .find(|(_, row)| count_populated(row) >= MIN_HEADER_CELLS)
        .map(|(row_idx, _)| row_idx)
        .unwrap_or(0)
}
