//! Grid-wide configuration shared with caller-supplied callbacks.

/// Configuration handed to getters, formatters, and comparators.
///
/// This is the "table config" at the callback boundary: engine-level knobs
/// that caller-supplied functions may want to consult. It stays small on
/// purpose; per-column behavior belongs on [`Column`](crate::Column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Whether keyboard navigation wraps to the adjacent row at a horizontal
    /// boundary, and from the last row back to the first vertically.
    pub wrap_navigation: bool,
    /// Whether the first displayed column shows original row numbers.
    ///
    /// Purely advisory for renderers; the engine itself only uses it to keep
    /// the option with the rest of the table config.
    pub show_row_numbers: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            wrap_navigation: true,
            show_row_numbers: false,
        }
    }
}
