//! The grid handle: live state pointer, imperative API, selection facade.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::column::{Column, ColumnInfo};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::events::{EventBus, GridEvent};
use crate::navigation::{CellIndex, Direction, next_cell};
use crate::row::{CellContext, RowAccess};
use crate::sort::{SortDirection, SortState};
use crate::state::{Action, GridState, reduce};
use crate::validation::{BoxFuture, CellError, ValidationOutcome};
use crate::value::CellValue;

/// Unique identifier for a grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// The imperative control surface of one data grid.
///
/// `Grid<T>` owns the single authoritative state snapshot behind an
/// `Arc<RwLock<_>>`. Clones share the same state and event bus, so a handle
/// given to the embedding application always dereferences the current
/// snapshot rather than a captured copy. Every mutation goes through
/// [`dispatch`](Grid::dispatch), which swaps in the reducer's new snapshot
/// and then delivers the resulting events.
#[derive(Debug)]
pub struct Grid<T: RowAccess> {
    id: GridId,
    inner: Arc<RwLock<GridState<T>>>,
    bus: EventBus,
}

impl<T: RowAccess> Clone for Grid<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            bus: self.bus.clone(),
        }
    }
}

impl<T: RowAccess> Grid<T> {
    /// Create a grid from column descriptors and source rows.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        Self::with_config(columns, rows, GridConfig::default())
    }

    /// Create a grid with explicit configuration.
    pub fn with_config(columns: Vec<Column<T>>, rows: Vec<T>, config: GridConfig) -> Self {
        Self {
            id: GridId::new(),
            inner: Arc::new(RwLock::new(GridState::new(columns, rows, config))),
            bus: EventBus::new(),
        }
    }

    /// The unique grid ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// The notification bus for this grid.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Apply one action through the reducer and deliver its events.
    ///
    /// The new snapshot is swapped in before column notifications and
    /// listeners run, and no lock is held while they do, so both may freely
    /// dispatch back into the grid without losing their writes.
    pub fn dispatch(&self, action: Action<T>) {
        let Some(previous) = self.inner.read().ok().map(|guard| guard.clone()) else {
            return;
        };
        let (next, events) = reduce(&previous, action);
        if let Ok(mut guard) = self.inner.write() {
            *guard = next;
        }
        for event in &events {
            self.notify_sort_callback(event);
            self.bus.publish(event);
        }
    }

    /// A clone of the current snapshot.
    pub fn snapshot(&self) -> Option<GridState<T>> {
        self.inner.read().ok().map(|guard| guard.clone())
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the source collection. An active sort is re-applied to the
    /// new data; selection and sort state are otherwise untouched.
    pub fn set_rows(&self, rows: Vec<T>) {
        self.dispatch(Action::SetData(rows));
    }

    /// Replace the column descriptors.
    pub fn set_columns(&self, columns: Vec<Column<T>>) {
        self.dispatch(Action::SetColumns(columns));
    }

    /// Number of rows in the displayed view.
    pub fn row_count(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.inner.read().map(|g| g.columns.len()).unwrap_or(0)
    }

    /// Get a row record by displayed index.
    pub fn row(&self, index: usize) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.get(index).map(|r| r.data.clone()))
    }

    /// Original (pre-sort) position of the row at a displayed index.
    pub fn original_index(&self, index: usize) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.get(index).map(|r| r.original_index))
    }

    /// Read one cell's value through the column getter.
    pub fn cell_value(&self, row: usize, column: usize) -> Option<CellValue> {
        self.inner.read().ok().and_then(|g| {
            let record = g.rows.get(row)?;
            let descriptor = g.columns.get(column)?;
            Some((descriptor.getter)(&record.data, &g.config))
        })
    }

    /// Read one cell formatted for display.
    pub fn formatted_cell(&self, row: usize, column: usize) -> Option<String> {
        self.inner.read().ok().and_then(|g| {
            let record = g.rows.get(row)?;
            let descriptor = g.columns.get(column)?;
            let value = (descriptor.getter)(&record.data, &g.config);
            Some((descriptor.formatter)(&value, &g.config))
        })
    }

    /// Delete the currently selected rows from the grid's indexed copy.
    ///
    /// The caller-owned source collection is not touched; this only shrinks
    /// the engine's view and re-indexes the survivors.
    pub fn delete_selected_rows(&self) {
        let selected = self
            .inner
            .read()
            .map(|g| g.selection.rows())
            .unwrap_or_default();
        if !selected.is_empty() {
            self.dispatch(Action::DeleteRows(selected));
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort by a column.
    ///
    /// `direction: None` applies header-click semantics: ascending first,
    /// then toggling to descending, then clearing the sort.
    pub fn sort_rows(
        &self,
        column: usize,
        direction: Option<SortDirection>,
    ) -> Result<(), GridError> {
        let sortable = self
            .inner
            .read()
            .ok()
            .and_then(|g| g.columns.get(column).map(|c| c.sortable));
        match sortable {
            None => Err(GridError::NotSortable { column }),
            Some(false) => Err(GridError::NotSortable { column }),
            Some(true) => {
                self.dispatch(Action::SortColumn { column, direction });
                Ok(())
            }
        }
    }

    /// The current sort state, or `None` when unsorted.
    pub fn current_sort(&self) -> Option<SortState> {
        self.inner.read().ok().and_then(|g| g.sort)
    }

    // -------------------------------------------------------------------------
    // Cell editing
    // -------------------------------------------------------------------------

    /// Whether the cell at (row, column) may enter edit mode.
    pub fn can_edit_cell(&self, row: usize, column: usize) -> bool {
        self.inner
            .read()
            .map(|g| {
                row < g.rows.len() && g.columns.get(column).is_some_and(|c| c.editable)
            })
            .unwrap_or(false)
    }

    /// Put a cell into edit mode.
    ///
    /// Fails with [`GridError::NotEditable`] when the column is not marked
    /// editable; callers should check [`can_edit_cell`](Grid::can_edit_cell)
    /// first.
    pub fn enter_cell_edit_mode(&self, row: usize, column: usize) -> Result<(), GridError> {
        let cell = CellIndex::new(row, column);
        let (in_bounds, editable, info) = {
            let Ok(guard) = self.inner.read() else {
                return Err(GridError::OutOfBounds { row, column });
            };
            (
                guard.contains(cell),
                guard.columns.get(column).is_some_and(|c| c.editable),
                guard.columns.get(column).map(|c| c.info(column)),
            )
        };
        if !in_bounds {
            return Err(GridError::OutOfBounds { row, column });
        }
        if !editable {
            return Err(GridError::NotEditable { row, column });
        }

        self.dispatch(Action::EnterCellEditMode(cell));
        if let Some(column) = info {
            self.bus.publish(&GridEvent::EditingStarted {
                at: SystemTime::now(),
                cell,
                column,
            });
        }
        Ok(())
    }

    /// Leave edit mode on the current cell.
    ///
    /// With `save = false` the cell is simply reselected as a normal cell.
    /// With `save = true` the cell's value is read through the column
    /// getter, validated, and committed through the column's save callback;
    /// on success the selection advances to the next cell downward, wrapping
    /// to the first row. A validation failure or a rejected save keeps the
    /// cell in edit mode.
    pub fn exit_cell_edit_mode(&self, save: bool) -> Result<(), GridError> {
        let Some(editing) = self.editing_context() else {
            return Err(GridError::NoSelectedCell);
        };

        if !save {
            self.dispatch(Action::ExitCellEditMode);
            self.bus.publish(&GridEvent::EditingExited {
                at: SystemTime::now(),
                cell: editing.cell,
                column: editing.info,
            });
            return Ok(());
        }

        if !self.run_sync_validation(&editing) {
            // Errors were published; the cell stays in edit mode.
            return Ok(());
        }

        let context = CellContext {
            row: editing.cell.row,
            original_index: editing.original_index,
            column: editing.cell.column,
        };
        if !(editing.on_save)(&editing.value, &context) {
            log::debug!(
                "save rejected for cell ({}, {}); staying in edit mode",
                editing.cell.row,
                editing.cell.column
            );
            return Ok(());
        }

        // Leave edit mode before announcing the save, so a listener observes
        // the post-save state like every other lifecycle event.
        self.dispatch(Action::ExitCellEditMode);
        self.bus.publish(&GridEvent::EditingSaved {
            at: SystemTime::now(),
            cell: editing.cell,
            column: editing.info.clone(),
            value: editing.value.clone(),
        });
        self.advance_after_save(editing.cell);
        Ok(())
    }

    /// Run a cell's async validation rules.
    ///
    /// Returns a future the caller drives on its own executor; the grid
    /// never blocks on it. When the future completes it reports through the
    /// event bus and updates the cell's recorded errors. A result that
    /// arrives after the user has navigated elsewhere is still delivered;
    /// deciding whether it is stale is the listener's call.
    pub fn validate_cell_async(
        &self,
        row: usize,
        column: usize,
    ) -> Option<BoxFuture<'static, ValidationOutcome>> {
        let (rules, value, info, field) = {
            let guard = self.inner.read().ok()?;
            let record = guard.rows.get(row)?;
            let descriptor = guard.columns.get(column)?;
            (
                descriptor.rules.clone()?,
                (descriptor.getter)(&record.data, &guard.config),
                descriptor.info(column),
                descriptor.field.clone(),
            )
        };
        let grid = self.clone();
        let cell = CellIndex::new(row, column);
        Some(Box::pin(async move {
            let outcome = rules.validate_async(value, &field).await;
            grid.record_validation(cell, info, &outcome);
            outcome
        }))
    }

    // -------------------------------------------------------------------------
    // Selection and navigation
    // -------------------------------------------------------------------------

    /// The selection facade: the only sanctioned way to mutate selection.
    pub fn selection(&self) -> SelectionApi<T> {
        SelectionApi { grid: self.clone() }
    }

    /// Move the selected cell one step.
    ///
    /// With no current cell selection this selects the first navigable cell.
    /// Wrapping behavior follows [`GridConfig::wrap_navigation`].
    pub fn move_selection(&self, direction: Direction) {
        let next = {
            let Ok(guard) = self.inner.read() else { return };
            next_cell(
                direction,
                guard.selection.cell(),
                guard.rows.len(),
                guard.columns.len(),
                guard.config.wrap_navigation,
                &guard.hidden_columns(),
            )
        };
        if let Some(cell) = next {
            self.dispatch(Action::SelectCell(cell));
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Invoke the sorted column's on_sort callback for a sort event.
    ///
    /// Runs after the transition has landed, with no lock held, so the
    /// callback observes the new sort state and may dispatch further
    /// actions.
    fn notify_sort_callback(&self, event: &GridEvent) {
        let index = match event {
            GridEvent::SortChanged { column, .. } | GridEvent::SortCleared { column, .. } => {
                column.index
            }
            _ => return,
        };
        let notification = {
            let Ok(guard) = self.inner.read() else { return };
            guard
                .columns
                .get(index)
                .and_then(|c| c.on_sort.clone())
                .map(|on_sort| (on_sort, guard.sort))
        };
        if let Some((on_sort, sort)) = notification {
            on_sort(sort);
        }
    }

    fn editing_context(&self) -> Option<EditingContext> {
        let guard = self.inner.read().ok()?;
        let cell = guard.selection.cell()?;
        if !guard.selection.is_editing() {
            return None;
        }
        let record = guard.rows.get(cell.row)?;
        let descriptor = guard.columns.get(cell.column)?;
        Some(EditingContext {
            cell,
            original_index: record.original_index,
            value: (descriptor.getter)(&record.data, &guard.config),
            info: descriptor.info(cell.column),
            field: descriptor.field.clone(),
            rules: descriptor.rules.clone(),
            on_save: Arc::clone(&descriptor.on_save),
            previous_errors: guard
                .cell_errors
                .get(&(cell.row, cell.column))
                .cloned()
                .unwrap_or_default(),
        })
    }

    /// Returns true when the value passed validation (or no rules exist).
    fn run_sync_validation(&self, editing: &EditingContext) -> bool {
        let Some(rules) = &editing.rules else {
            return true;
        };
        let outcome = rules.validate(&editing.value, &editing.field);
        self.publish_validation(
            editing.cell,
            editing.info.clone(),
            &outcome,
            &editing.previous_errors,
        );
        self.dispatch(Action::SetCellErrors {
            cell: editing.cell,
            errors: outcome.errors().to_vec(),
        });
        outcome.is_valid()
    }

    fn record_validation(&self, cell: CellIndex, info: ColumnInfo, outcome: &ValidationOutcome) {
        let previous = self
            .inner
            .read()
            .ok()
            .and_then(|g| g.cell_errors.get(&(cell.row, cell.column)).cloned())
            .unwrap_or_default();
        self.publish_validation(cell, info, outcome, &previous);
        self.dispatch(Action::SetCellErrors {
            cell,
            errors: outcome.errors().to_vec(),
        });
    }

    fn publish_validation(
        &self,
        cell: CellIndex,
        column: ColumnInfo,
        outcome: &ValidationOutcome,
        previous_errors: &[CellError],
    ) {
        let context = outcome.context();
        let at = SystemTime::now();
        match outcome {
            ValidationOutcome::Valid => {
                if !previous_errors.is_empty() {
                    self.bus.publish(&GridEvent::ValidationSucceeded {
                        at,
                        cell,
                        column: column.clone(),
                        context,
                    });
                    self.bus.publish(&GridEvent::ValidationChanged {
                        at,
                        cell,
                        column,
                        errors: Vec::new(),
                        context,
                    });
                }
            }
            ValidationOutcome::Invalid(errors) => {
                self.bus.publish(&GridEvent::ValidationFailed {
                    at,
                    cell,
                    column: column.clone(),
                    errors: errors.clone(),
                    context,
                });
                if previous_errors != errors.as_slice() {
                    self.bus.publish(&GridEvent::ValidationChanged {
                        at,
                        cell,
                        column,
                        errors: errors.clone(),
                        context,
                    });
                }
            }
        }
    }

    fn advance_after_save(&self, from: CellIndex) {
        let next = {
            let Ok(guard) = self.inner.read() else { return };
            next_cell(
                Direction::Down,
                Some(from),
                guard.rows.len(),
                guard.columns.len(),
                true,
                &guard.hidden_columns(),
            )
        };
        if let Some(cell) = next {
            self.dispatch(Action::SelectCell(cell));
        }
    }
}

/// Everything needed to commit one editing cell, captured from a single
/// snapshot read.
struct EditingContext {
    cell: CellIndex,
    original_index: usize,
    value: CellValue,
    info: ColumnInfo,
    field: String,
    rules: Option<Arc<crate::validation::CellRules>>,
    on_save: crate::column::SaveFn,
    previous_errors: Vec<CellError>,
}

/// Façade over row and cell selection.
///
/// All mutations funnel into the reducer, so the row-XOR-cell invariant
/// holds after every call.
#[derive(Debug, Clone)]
pub struct SelectionApi<T: RowAccess> {
    grid: Grid<T>,
}

impl<T: RowAccess> SelectionApi<T> {
    /// Replace the selection with exactly one row.
    pub fn select_row(&self, index: usize) {
        self.grid.dispatch(Action::SelectRow(index));
    }

    /// Toggle one row in or out of the selection.
    pub fn toggle_row(&self, index: usize) {
        self.grid.dispatch(Action::ToggleSelectedRow(index));
    }

    /// Union an inclusive range into the selection; order-independent.
    pub fn select_range(&self, from: usize, to: usize) {
        self.grid.dispatch(Action::SelectRowRange { from, to });
    }

    /// Extend the selection from the last actively selected row to `index`.
    ///
    /// This is the shift-click primitive. Without an anchor it selects only
    /// the target row.
    pub fn select_from_last_active(&self, index: usize) {
        let anchor = self
            .grid
            .inner
            .read()
            .ok()
            .and_then(|g| g.selection.anchor());
        match anchor {
            Some(from) => self.grid.dispatch(Action::SelectRowRange { from, to: index }),
            None => self.grid.dispatch(Action::SelectRow(index)),
        }
    }

    /// Select all rows; no-op when everything is already selected.
    pub fn select_all(&self) {
        self.grid.dispatch(Action::SelectAllRows);
    }

    /// Select all rows, or clear when everything is already selected.
    pub fn toggle_select_all(&self) {
        self.grid.dispatch(Action::ToggleSelectAllRows);
    }

    /// Clear all selection.
    pub fn clear(&self) {
        self.grid.dispatch(Action::ClearSelection);
    }

    /// Select a single cell, clearing any row selection.
    pub fn select_cell(&self, row: usize, column: usize) {
        self.grid
            .dispatch(Action::SelectCell(CellIndex::new(row, column)));
    }

    /// Selected row indexes in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.grid
            .inner
            .read()
            .map(|g| g.selection.rows())
            .unwrap_or_default()
    }

    /// The selected cell, if in cell-selection mode.
    pub fn selected_cell(&self) -> Option<CellIndex> {
        self.grid.inner.read().ok().and_then(|g| g.selection.cell())
    }

    /// The anchor row for range extension, if any.
    pub fn last_active_row(&self) -> Option<usize> {
        self.grid
            .inner
            .read()
            .ok()
            .and_then(|g| g.selection.anchor())
    }

    /// Whether the selected cell is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.grid
            .inner
            .read()
            .map(|g| g.selection.is_editing())
            .unwrap_or(false)
    }

    /// Check if a row is selected.
    pub fn is_row_selected(&self, index: usize) -> bool {
        self.grid
            .inner
            .read()
            .map(|g| g.selection.is_row_selected(index))
            .unwrap_or(false)
    }

    /// Check that nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.grid
            .inner
            .read()
            .map(|g| g.selection.is_empty())
            .unwrap_or(true)
    }
}
