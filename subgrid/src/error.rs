//! Error types for imperative grid operations.

/// Error type for grid API misuse.
///
/// These are programmer errors on the imperative surface: data-quality
/// problems are never raised here, they surface as validation events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The addressed cell's column is not editable.
    #[error("cell ({row}, {column}) is not editable")]
    NotEditable {
        /// Row index in the displayed view.
        row: usize,
        /// Column index.
        column: usize,
    },

    /// The addressed cell is outside the current grid bounds.
    #[error("cell ({row}, {column}) is out of bounds")]
    OutOfBounds {
        /// Row index in the displayed view.
        row: usize,
        /// Column index.
        column: usize,
    },

    /// No cell is selected, but the operation requires one.
    #[error("no cell is selected")]
    NoSelectedCell,

    /// The addressed column is not marked sortable.
    #[error("column {column} is not sortable")]
    NotSortable {
        /// Column index.
        column: usize,
    },
}
