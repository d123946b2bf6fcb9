//! Cell validation for editable columns.
//!
//! Validation never blocks or throws: outcomes surface through the event
//! bus, and the offending cell simply stays in edit mode until the value is
//! fixed or the edit is cancelled.
//!
//! # Example
//!
//! ```ignore
//! use subgrid::validation::CellRules;
//!
//! let rules = CellRules::new()
//!     .required("Name is required")
//!     .min_length(3, "Name must be at least 3 characters");
//! let column = Column::new("name", ColumnKind::Text).editable().with_rules(rules);
//! ```

mod result;
mod rules;

pub use result::{CellError, ValidationContext, ValidationOutcome};
pub use rules::{BoxFuture, CellRules};
