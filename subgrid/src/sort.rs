//! Sort engine: stable, type-aware ordering of the indexed view.

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::config::GridConfig;
use crate::row::{IndexedRow, RowAccess};

/// Direction of an active column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The currently active sort: one column, one direction.
///
/// `None` at the grid level means unsorted, i.e. display order equals the
/// original collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Index of the sorted column.
    pub column: usize,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Produce a newly ordered view of the indexed rows.
///
/// With no active sort the rows come back in `original_index` order. With an
/// active sort the column's comparator is applied to the values its getter
/// produces; the comparator implements direction itself. `sort_by` is a
/// stable sort, so rows comparing equal keep their relative original order.
///
/// The input is consumed and returned rather than sorted in place: the state
/// store swaps in whole new snapshots, never mutates one.
pub fn sort_rows<T: RowAccess>(
    mut rows: Vec<IndexedRow<T>>,
    sort: Option<SortState>,
    columns: &[Column<T>],
    config: &GridConfig,
) -> Vec<IndexedRow<T>> {
    let Some(sort) = sort else {
        rows.sort_by_key(|row| row.original_index);
        return rows;
    };
    let Some(column) = columns.get(sort.column) else {
        return rows;
    };

    rows.sort_by(|a, b| {
        let va = (column.getter)(&a.data, config);
        let vb = (column.getter)(&b.data, config);
        (column.comparator)(&va, &vb, sort.direction, config)
    });
    rows
}
