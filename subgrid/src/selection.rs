//! Selection state: highlighted rows or a single highlighted cell.
//!
//! Row selection and cell selection are mutually exclusive. Every mutator
//! here re-establishes that invariant, so the reducer can apply them
//! blindly.

use std::collections::BTreeSet;

use crate::navigation::CellIndex;

/// Selection state of the grid.
///
/// Exactly one of `rows` / `cell` is populated at any time (or neither).
/// `anchor` remembers the last actively selected row for shift-click style
/// range extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Currently selected row indexes (displayed view).
    rows: BTreeSet<usize>,
    /// Anchor for range selection: the last row selected by a direct action.
    anchor: Option<usize>,
    /// Currently selected cell, if in cell-selection mode.
    cell: Option<CellIndex>,
    /// Whether the selected cell is in edit mode. Only meaningful while
    /// `cell` is set.
    editing: bool,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected row indexes in ascending order.
    pub fn rows(&self) -> Vec<usize> {
        self.rows.iter().copied().collect()
    }

    /// Number of selected rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if a row is selected.
    pub fn is_row_selected(&self, index: usize) -> bool {
        self.rows.contains(&index)
    }

    /// The anchor row for range extension, if any.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// The selected cell, if in cell-selection mode.
    pub fn cell(&self) -> Option<CellIndex> {
        self.cell
    }

    /// Whether the selected cell is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.cell.is_some() && self.editing
    }

    /// Check that nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cell.is_none()
    }

    /// Clear everything.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.anchor = None;
        self.cell = None;
        self.editing = false;
    }

    /// Select exactly one row, clearing any other selection.
    pub fn select_row(&mut self, index: usize) {
        self.exit_cell_mode();
        self.rows.clear();
        self.rows.insert(index);
        self.anchor = Some(index);
    }

    /// Toggle one row in or out of the selection.
    pub fn toggle_row(&mut self, index: usize) {
        self.exit_cell_mode();
        if !self.rows.remove(&index) {
            self.rows.insert(index);
        }
        self.anchor = Some(index);
    }

    /// Union an inclusive range into the selection; order-independent.
    ///
    /// The anchor is left untouched so repeated shift-selections extend from
    /// the same starting row.
    pub fn select_range(&mut self, from: usize, to: usize) {
        self.exit_cell_mode();
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        self.rows.extend(lo..=hi);
    }

    /// Select every row of an `n`-row grid.
    pub fn select_all(&mut self, row_count: usize) {
        self.exit_cell_mode();
        self.rows = (0..row_count).collect();
    }

    /// Whether all `n` rows are selected.
    pub fn all_selected(&self, row_count: usize) -> bool {
        row_count > 0 && self.rows.len() == row_count
    }

    /// Select a single cell, clearing row selection and leaving edit mode.
    pub fn select_cell(&mut self, cell: CellIndex) {
        self.rows.clear();
        self.anchor = None;
        self.cell = Some(cell);
        self.editing = false;
    }

    /// Mark the selected cell as editing. No-op without a selected cell.
    pub fn begin_editing(&mut self) {
        if self.cell.is_some() {
            self.editing = true;
        }
    }

    /// Leave edit mode, keeping the cell selected.
    pub fn end_editing(&mut self) {
        self.editing = false;
    }

    /// Drop row indexes at or beyond `row_count` and an out-of-bounds cell.
    ///
    /// Used when the data set shrinks underneath an existing selection.
    pub fn retain_in_bounds(&mut self, row_count: usize, column_count: usize) {
        self.rows.retain(|&i| i < row_count);
        if self.anchor.is_some_and(|a| a >= row_count) {
            self.anchor = None;
        }
        if self
            .cell
            .is_some_and(|c| c.row >= row_count || c.column >= column_count)
        {
            self.cell = None;
            self.editing = false;
        }
    }

    fn exit_cell_mode(&mut self) {
        self.cell = None;
        self.editing = false;
    }
}
