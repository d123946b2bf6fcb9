//! State engine for an "object set" data grid.
//!
//! `subgrid` is the non-visual half of a data-grid component: it owns the
//! indexed row view, the row/cell selection model, the sort engine, cell
//! edit-mode transitions, and the lifecycle event bus. Rendering, styling,
//! and the scalar input widgets that edit cell values are external
//! collaborators reached only through the callback contracts on
//! [`Column`].
//!
//! # Example
//!
//! ```
//! use subgrid::prelude::*;
//!
//! #[derive(Clone)]
//! struct Person {
//!     name: String,
//!     age: f64,
//! }
//!
//! impl RowAccess for Person {
//!     fn cell(&self, field: &str) -> CellValue {
//!         match field {
//!             "name" => CellValue::from(self.name.as_str()),
//!             "age" => CellValue::from(self.age),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! let columns = vec![
//!     Column::new("name", ColumnKind::Text).title("Name").editable().sortable(),
//!     Column::new("age", ColumnKind::Number).title("Age").sortable(),
//! ];
//! let people = vec![
//!     Person { name: "Ada".into(), age: 36.0 },
//!     Person { name: "Grace".into(), age: 45.0 },
//! ];
//!
//! let grid = Grid::new(columns, people);
//! grid.sort_rows(1, Some(SortDirection::Descending)).unwrap();
//! grid.selection().select_row(0);
//! assert_eq!(grid.row(0).unwrap().name, "Grace");
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod navigation;
pub mod row;
pub mod selection;
pub mod sort;
pub mod state;
pub mod validation;
pub mod value;

pub use column::{Column, ColumnInfo, ColumnKind};
pub use config::GridConfig;
pub use error::GridError;
pub use events::{EventBus, GridEvent, GridEventKind};
pub use grid::{Grid, GridId, SelectionApi};
pub use navigation::{CellIndex, Direction, next_cell};
pub use row::{CellContext, IndexedRow, RowAccess};
pub use sort::{SortDirection, SortState, sort_rows};
pub use state::{Action, GridState, reduce};
pub use value::CellValue;

pub mod prelude {
    //! Convenient imports for embedding applications.
    pub use crate::column::{Column, ColumnInfo, ColumnKind};
    pub use crate::config::GridConfig;
    pub use crate::error::GridError;
    pub use crate::events::{EventBus, GridEvent, GridEventKind};
    pub use crate::grid::{Grid, GridId, SelectionApi};
    pub use crate::navigation::{CellIndex, Direction};
    pub use crate::row::{CellContext, IndexedRow, RowAccess};
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::validation::{CellRules, ValidationContext, ValidationOutcome};
    pub use crate::value::CellValue;
}
