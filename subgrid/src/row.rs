//! Row access contract and the indexed row wrapper.

use crate::value::CellValue;

/// Trait for records that can be displayed as rows in a grid.
///
/// The engine treats row data as opaque: the only way it reads a record is
/// through this accessor (or a column-level getter override). Implement it
/// to map field names to values.
///
/// # Example
///
/// ```
/// use subgrid::{CellValue, RowAccess};
///
/// #[derive(Clone)]
/// struct Person {
///     name: String,
///     age: f64,
/// }
///
/// impl RowAccess for Person {
///     fn cell(&self, field: &str) -> CellValue {
///         match field {
///             "name" => CellValue::from(self.name.as_str()),
///             "age" => CellValue::from(self.age),
///             _ => CellValue::Empty,
///         }
///     }
/// }
/// ```
pub trait RowAccess: Clone + Send + Sync + 'static {
    /// Read the value of one field.
    ///
    /// Unknown fields return [`CellValue::Empty`] rather than failing, so a
    /// partially configured grid degrades gracefully.
    fn cell(&self, field: &str) -> CellValue;
}

/// A row record paired with its position in the original, unsorted
/// collection.
///
/// `original_index` never changes across sort operations: it is the stable
/// tie-breaker for sorting and the value row-numbering UI displays.
#[derive(Debug, Clone)]
pub struct IndexedRow<T> {
    /// The caller-supplied record.
    pub data: T,
    /// Position in the unsorted source collection.
    pub original_index: usize,
}

/// Wrap a source collection, assigning original indexes in order.
pub fn index_rows<T>(rows: Vec<T>) -> Vec<IndexedRow<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(original_index, data)| IndexedRow {
            data,
            original_index,
        })
        .collect()
}

/// Per-cell context handed to save callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext {
    /// Row index in the displayed (possibly sorted) view.
    pub row: usize,
    /// Position of the row in the unsorted source collection.
    pub original_index: usize,
    /// Column index.
    pub column: usize,
}
