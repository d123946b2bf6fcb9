//! The grid state store: one snapshot type, one reducer.
//!
//! All state transitions happen in [`reduce`]: it takes the previous
//! snapshot and an action and returns a complete new snapshot plus the
//! lifecycle events the transition produced. Nothing here mutates in place,
//! so a reader holding the previous snapshot never observes a partial
//! update.

use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::column::Column;
use crate::config::GridConfig;
use crate::events::GridEvent;
use crate::navigation::CellIndex;
use crate::row::{IndexedRow, RowAccess, index_rows};
use crate::selection::Selection;
use crate::sort::{SortDirection, SortState, sort_rows};
use crate::validation::CellError;

/// One immutable snapshot of the whole grid.
#[derive(Debug, Clone)]
pub struct GridState<T: RowAccess> {
    /// Fully populated column descriptors.
    pub columns: Vec<Column<T>>,
    /// The displayed (possibly sorted) indexed view of the data.
    pub rows: Vec<IndexedRow<T>>,
    /// Row-or-cell selection.
    pub selection: Selection,
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// Engine configuration shared with callbacks.
    pub config: GridConfig,
    /// Last known validation errors per (row, column) cell.
    pub cell_errors: BTreeMap<(usize, usize), Vec<CellError>>,
}

impl<T: RowAccess> GridState<T> {
    /// Build the initial snapshot from configuration and source rows.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>, config: GridConfig) -> Self {
        Self {
            columns,
            rows: index_rows(rows),
            selection: Selection::new(),
            sort: None,
            config,
            cell_errors: BTreeMap::new(),
        }
    }

    /// Column indexes currently hidden from navigation.
    pub fn hidden_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether `cell` addresses a real cell of the current view.
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.row < self.rows.len() && cell.column < self.columns.len()
    }
}

/// Actions accepted by the reducer.
pub enum Action<T: RowAccess> {
    /// Replace the source collection; re-indexes and, if a sort is active,
    /// re-sorts. Clears nothing else.
    SetData(Vec<T>),
    /// Replace the column descriptors.
    SetColumns(Vec<Column<T>>),
    /// Replace the selection with exactly one row.
    SelectRow(usize),
    /// Add or remove one row from the selection.
    ToggleSelectedRow(usize),
    /// Select every row; no-op when everything is already selected.
    SelectAllRows,
    /// Select every row, or clear if everything is already selected.
    ToggleSelectAllRows,
    /// Union an inclusive range into the selection; order-independent.
    SelectRowRange { from: usize, to: usize },
    /// Clear all selection.
    ClearSelection,
    /// Select a single cell, leaving row selection and edit mode.
    SelectCell(CellIndex),
    /// Select a cell and mark it editing. Editability is the caller's
    /// responsibility to check first.
    EnterCellEditMode(CellIndex),
    /// Leave edit mode, keeping the cell selected.
    ExitCellEditMode,
    /// Sort by a column. `direction: None` applies header-click cycling:
    /// ascending, then descending, then cleared.
    SortColumn {
        column: usize,
        direction: Option<SortDirection>,
    },
    /// Remove rows by displayed index, re-indexing what remains.
    DeleteRows(Vec<usize>),
    /// Record a cell's validation errors (empty clears the entry).
    SetCellErrors {
        cell: CellIndex,
        errors: Vec<CellError>,
    },
}

impl<T: RowAccess> Action<T> {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetData(_) => "SetData",
            Action::SetColumns(_) => "SetColumns",
            Action::SelectRow(_) => "SelectRow",
            Action::ToggleSelectedRow(_) => "ToggleSelectedRow",
            Action::SelectAllRows => "SelectAllRows",
            Action::ToggleSelectAllRows => "ToggleSelectAllRows",
            Action::SelectRowRange { .. } => "SelectRowRange",
            Action::ClearSelection => "ClearSelection",
            Action::SelectCell(_) => "SelectCell",
            Action::EnterCellEditMode(_) => "EnterCellEditMode",
            Action::ExitCellEditMode => "ExitCellEditMode",
            Action::SortColumn { .. } => "SortColumn",
            Action::DeleteRows(_) => "DeleteRows",
            Action::SetCellErrors { .. } => "SetCellErrors",
        }
    }
}

/// Apply one action to the previous snapshot.
///
/// Total and non-throwing: out-of-bounds indexes degrade to no-ops, and the
/// returned snapshot is always fully formed.
pub fn reduce<T: RowAccess>(
    previous: &GridState<T>,
    action: Action<T>,
) -> (GridState<T>, Vec<GridEvent>) {
    log::debug!("dispatch {}", action.name());
    let mut state = previous.clone();
    let mut events = Vec::new();

    match action {
        Action::SetData(rows) => {
            state.rows = sort_rows(index_rows(rows), state.sort, &state.columns, &state.config);
            state
                .selection
                .retain_in_bounds(state.rows.len(), state.columns.len());
            state.cell_errors.clear();
        }

        Action::SetColumns(columns) => {
            // An active sort survives only if its column still exists and is
            // still sortable; otherwise display order reverts.
            let sort_still_valid = state
                .sort
                .is_some_and(|s| columns.get(s.column).is_some_and(|c| c.sortable));
            if !sort_still_valid {
                state.sort = None;
            }
            state.columns = columns;
            state.rows = sort_rows(
                std::mem::take(&mut state.rows),
                state.sort,
                &state.columns,
                &state.config,
            );
            state
                .selection
                .retain_in_bounds(state.rows.len(), state.columns.len());
            state.cell_errors.clear();
        }

        Action::SelectRow(index) => {
            if index < state.rows.len() {
                state.selection.select_row(index);
            }
        }

        Action::ToggleSelectedRow(index) => {
            if index < state.rows.len() {
                state.selection.toggle_row(index);
            }
        }

        Action::SelectAllRows => {
            if !state.selection.all_selected(state.rows.len()) && !state.rows.is_empty() {
                state.selection.select_all(state.rows.len());
            }
        }

        Action::ToggleSelectAllRows => {
            if state.selection.all_selected(state.rows.len()) {
                state.selection.clear();
            } else if !state.rows.is_empty() {
                state.selection.select_all(state.rows.len());
            }
        }

        Action::SelectRowRange { from, to } => {
            if !state.rows.is_empty() {
                let last = state.rows.len() - 1;
                state.selection.select_range(from.min(last), to.min(last));
            }
        }

        Action::ClearSelection => {
            state.selection.clear();
        }

        Action::SelectCell(cell) => {
            if state.contains(cell) {
                state.selection.select_cell(cell);
            }
        }

        Action::EnterCellEditMode(cell) => {
            if state.contains(cell) {
                state.selection.select_cell(cell);
                state.selection.begin_editing();
            }
        }

        Action::ExitCellEditMode => {
            state.selection.end_editing();
        }

        Action::SortColumn { column, direction } => {
            sort_column(&mut state, &mut events, column, direction);
        }

        Action::DeleteRows(indexes) => {
            delete_rows(&mut state, indexes);
        }

        Action::SetCellErrors { cell, errors } => {
            let key = (cell.row, cell.column);
            if errors.is_empty() {
                state.cell_errors.remove(&key);
            } else {
                state.cell_errors.insert(key, errors);
            }
        }
    }

    (state, events)
}

fn sort_column<T: RowAccess>(
    state: &mut GridState<T>,
    events: &mut Vec<GridEvent>,
    column: usize,
    direction: Option<SortDirection>,
) {
    let Some(descriptor) = state.columns.get(column) else {
        return;
    };
    if !descriptor.sortable {
        return;
    }

    let previous = state.sort.filter(|s| s.column == column).map(|s| s.direction);
    let new_sort = match direction {
        Some(direction) => Some(SortState { column, direction }),
        // Header-click cycling: ascending, descending, cleared.
        None => match previous {
            None => Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }),
            Some(SortDirection::Ascending) => Some(SortState {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortDirection::Descending) => None,
        },
    };

    let info = descriptor.info(column);
    state.sort = new_sort;
    state.rows = sort_rows(
        std::mem::take(&mut state.rows),
        state.sort,
        &state.columns,
        &state.config,
    );

    // The column's on_sort callback is not invoked here: a callback that
    // dispatches would have its write clobbered when this snapshot lands.
    // The grid handle notifies it after the swap.
    match new_sort {
        Some(sort) => events.push(GridEvent::SortChanged {
            at: SystemTime::now(),
            column: info,
            previous,
            direction: sort.direction,
        }),
        None => events.push(GridEvent::SortCleared {
            at: SystemTime::now(),
            column: info,
        }),
    }
}

fn delete_rows<T: RowAccess>(state: &mut GridState<T>, mut indexes: Vec<usize>) {
    indexes.retain(|&i| i < state.rows.len());
    indexes.sort_unstable();
    indexes.dedup();
    if indexes.is_empty() {
        return;
    }

    // Remove by displayed index, keeping display order for the survivors.
    let mut keep_flags = vec![true; state.rows.len()];
    for &i in &indexes {
        keep_flags[i] = false;
    }
    let remaining: Vec<IndexedRow<T>> = state
        .rows
        .drain(..)
        .zip(keep_flags.iter())
        .filter(|(_, keep)| **keep)
        .map(|(row, _)| row)
        .collect();

    // Re-rank original indexes so stable-sort tie-breaks and row numbering
    // stay consistent with the shrunken source collection.
    let mut old_originals: Vec<usize> = remaining.iter().map(|r| r.original_index).collect();
    old_originals.sort_unstable();
    state.rows = remaining
        .into_iter()
        .map(|mut row| {
            row.original_index = old_originals
                .binary_search(&row.original_index)
                .unwrap_or(0);
            row
        })
        .collect();

    // Remap surviving selection to the shifted display indexes.
    let shift_of = |index: usize| -> usize {
        index - indexes.iter().take_while(|&&d| d < index).count()
    };
    let surviving: Vec<usize> = state
        .selection
        .rows()
        .into_iter()
        .filter(|i| !indexes.contains(i))
        .map(shift_of)
        .collect();
    let cell = state.selection.cell().and_then(|c| {
        (!indexes.contains(&c.row)).then(|| CellIndex::new(shift_of(c.row), c.column))
    });
    let was_editing = state.selection.is_editing();

    state.selection.clear();
    for index in surviving {
        state.selection.toggle_row(index);
    }
    if let Some(cell) = cell {
        state.selection.select_cell(cell);
        if was_editing {
            state.selection.begin_editing();
        }
    }
    state.cell_errors.clear();
}
