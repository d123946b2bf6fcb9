//! Column descriptors and their kind-derived defaults.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::config::GridConfig;
use crate::row::{CellContext, RowAccess};
use crate::sort::{SortDirection, SortState};
use crate::validation::CellRules;
use crate::value::CellValue;

/// Caller-supplied value getter: reads one cell out of a row record.
pub type GetterFn<T> = Arc<dyn Fn(&T, &GridConfig) -> CellValue + Send + Sync>;

/// Caller-supplied display formatter for a cell value.
pub type FormatterFn = Arc<dyn Fn(&CellValue, &GridConfig) -> String + Send + Sync>;

/// Caller-supplied comparator. The comparator implements direction itself;
/// the sort engine never reverses its result.
pub type ComparatorFn =
    Arc<dyn Fn(&CellValue, &CellValue, SortDirection, &GridConfig) -> Ordering + Send + Sync>;

/// Caller-supplied save callback. Returns whether the save succeeded.
pub type SaveFn = Arc<dyn Fn(&CellValue, &CellContext) -> bool + Send + Sync>;

/// Caller-supplied notification for sort changes on this column.
pub type SortCallback = Arc<dyn Fn(Option<SortState>) + Send + Sync>;

/// The closed set of column kinds.
///
/// Each kind carries the default getter, formatter, and comparator used when
/// the caller does not override them, so a partially configured column still
/// reaches the state store fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Text cells; default ordering is case-insensitive with a
    /// case-sensitive fallback.
    #[default]
    Text,
    /// Numeric cells; missing and `NaN` values sort last in both directions.
    Number,
    /// Boolean cells; `false < true`.
    Bool,
}

/// Lightweight, clonable column identity carried in event payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column index at the time the event fired.
    pub index: usize,
    /// The field this column reads.
    pub field: String,
    /// Display title.
    pub title: String,
    /// Column kind.
    pub kind: ColumnKind,
}

/// A fully populated column descriptor.
///
/// Built through the fluent constructor methods; every callback slot is
/// resolved to a kind-derived default before the descriptor reaches the
/// state store, which assumes nothing is missing.
///
/// # Example
///
/// ```ignore
/// let columns = vec![
///     Column::new("name", ColumnKind::Text).title("Name").editable().sortable(),
///     Column::new("age", ColumnKind::Number).sortable(),
///     Column::new("notes", ColumnKind::Text).hidden(),
/// ];
/// ```
#[derive(Clone)]
pub struct Column<T> {
    /// Field name passed to the row accessor (dot-paths are the accessor's
    /// concern).
    pub field: String,
    /// Header title; defaults to the field name.
    pub title: String,
    /// Column kind.
    pub kind: ColumnKind,
    /// Whether cells in this column may enter edit mode.
    pub editable: bool,
    /// Whether this column responds to sort requests.
    pub sortable: bool,
    /// Whether this column is skipped by cell navigation.
    pub hidden: bool,
    /// Value getter (defaulted to the row accessor for `field`).
    pub getter: GetterFn<T>,
    /// Display formatter (defaulted to the value's `Display`).
    pub formatter: FormatterFn,
    /// Comparator (defaulted per kind).
    pub comparator: ComparatorFn,
    /// Save callback (defaulted to accept).
    pub on_save: SaveFn,
    /// Optional sort-change notification.
    pub on_sort: Option<SortCallback>,
    /// Optional validation rules run before a save is accepted.
    pub rules: Option<Arc<CellRules>>,
}

impl<T: RowAccess> Column<T> {
    /// Create a column reading `field` with kind-derived defaults.
    pub fn new(field: impl Into<String>, kind: ColumnKind) -> Self {
        let field = field.into();
        let getter_field = field.clone();
        Self {
            title: field.clone(),
            field,
            kind,
            editable: false,
            sortable: false,
            hidden: false,
            getter: Arc::new(move |row: &T, _cfg: &GridConfig| row.cell(&getter_field)),
            formatter: Arc::new(|value, _cfg| value.to_string()),
            comparator: default_comparator(),
            on_save: Arc::new(|_value, _ctx| true),
            on_sort: None,
            rules: None,
        }
    }

    /// Set the header title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Allow cells in this column to enter edit mode.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Make the column respond to sort requests.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Hide the column from cell navigation.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Override the value getter.
    pub fn with_getter(
        mut self,
        getter: impl Fn(&T, &GridConfig) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        self.getter = Arc::new(getter);
        self
    }

    /// Override the display formatter.
    pub fn with_formatter(
        mut self,
        formatter: impl Fn(&CellValue, &GridConfig) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Override the comparator.
    ///
    /// The comparator must be total over the column's kind and must apply
    /// `direction` itself.
    pub fn with_comparator(
        mut self,
        comparator: impl Fn(&CellValue, &CellValue, SortDirection, &GridConfig) -> Ordering
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.comparator = Arc::new(comparator);
        self
    }

    /// Set the save callback invoked when an edited cell is committed.
    pub fn with_on_save(
        mut self,
        on_save: impl Fn(&CellValue, &CellContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.on_save = Arc::new(on_save);
        self
    }

    /// Set a sort-change notification for this column.
    pub fn with_on_sort(mut self, on_sort: impl Fn(Option<SortState>) + Send + Sync + 'static) -> Self {
        self.on_sort = Some(Arc::new(on_sort));
        self
    }

    /// Attach validation rules checked before a save is accepted.
    pub fn with_rules(mut self, rules: CellRules) -> Self {
        self.rules = Some(Arc::new(rules));
        self
    }

    /// Event-payload identity for this column.
    pub fn info(&self, index: usize) -> ColumnInfo {
        ColumnInfo {
            index,
            field: self.field.clone(),
            title: self.title.clone(),
            kind: self.kind,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("editable", &self.editable)
            .field("sortable", &self.sortable)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// The default comparator shared by all kinds: directional comparison with
/// missing values sorted last.
fn default_comparator() -> ComparatorFn {
    Arc::new(|a, b, direction, _cfg| a.directional_cmp(b, direction))
}
