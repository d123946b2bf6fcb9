//! Pure cell-navigation algorithm.

use serde::Deserialize;
use serde::Serialize;

/// Row/column coordinate of one cell in the displayed view.
///
/// The row index addresses the currently displayed (possibly sorted) row
/// list, not the original collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    /// Row index in the displayed view.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl CellIndex {
    /// Convenience constructor.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Direction of a single navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Compute the next selected cell for one navigation step.
///
/// Semantics:
/// - `current == None` selects the first non-hidden cell of row 0.
/// - `Left`/`Right` step to the adjacent non-hidden column, skipping runs of
///   hidden columns. At the boundary, `wrap` moves to the last/first
///   non-hidden column of the previous/next row (row 0 and the last row are
///   adjacent); without `wrap` the position clamps at the boundary column.
/// - `Up`/`Down` move one row; at the boundary they wrap only when `wrap` is
///   set, otherwise stay in place.
///
/// Returns `None` only when the grid has no navigable cell at all (zero
/// rows, zero columns, or every column hidden). Never returns a hidden
/// column or an out-of-bounds coordinate.
pub fn next_cell(
    direction: Direction,
    current: Option<CellIndex>,
    row_count: usize,
    column_count: usize,
    wrap: bool,
    hidden_columns: &[usize],
) -> Option<CellIndex> {
    if row_count == 0 || column_count == 0 {
        return None;
    }
    let visible = |col: usize| !hidden_columns.contains(&col);
    let first_visible = (0..column_count).find(|&c| visible(c))?;
    let last_visible = (0..column_count).rev().find(|&c| visible(c))?;

    let Some(current) = current else {
        return Some(CellIndex::new(0, first_visible));
    };

    let row = current.row.min(row_count - 1);
    // Snap a stale position (e.g. the column was hidden after selection) to
    // the nearest visible column before stepping.
    let column = {
        let clamped = current
            .column
            .min(column_count - 1)
            .clamp(first_visible, last_visible);
        if visible(clamped) {
            clamped
        } else {
            (clamped..=last_visible)
                .find(|&c| visible(c))
                .unwrap_or(first_visible)
        }
    };

    match direction {
        Direction::Right => {
            if let Some(next) = (column + 1..column_count).find(|&c| visible(c)) {
                Some(CellIndex::new(row, next))
            } else if wrap {
                let next_row = if row + 1 < row_count { row + 1 } else { 0 };
                Some(CellIndex::new(next_row, first_visible))
            } else {
                Some(CellIndex::new(row, last_visible))
            }
        }
        Direction::Left => {
            if let Some(prev) = (0..column).rev().find(|&c| visible(c)) {
                Some(CellIndex::new(row, prev))
            } else if wrap {
                let prev_row = if row > 0 { row - 1 } else { row_count - 1 };
                Some(CellIndex::new(prev_row, last_visible))
            } else {
                Some(CellIndex::new(row, first_visible))
            }
        }
        Direction::Down => {
            let next_row = if row + 1 < row_count {
                row + 1
            } else if wrap {
                0
            } else {
                row
            };
            Some(CellIndex::new(next_row, column))
        }
        Direction::Up => {
            let prev_row = if row > 0 {
                row - 1
            } else if wrap {
                row_count - 1
            } else {
                row
            };
            Some(CellIndex::new(prev_row, column))
        }
    }
}
