//! Cell value union for dynamic grid data.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::sort::SortDirection;

/// A dynamic value read out of a row cell.
///
/// The engine never inspects row records directly; column getters produce
/// `CellValue`s, and everything downstream (formatting, comparison,
/// validation) operates on this closed union.
///
/// # Example
///
/// ```
/// use subgrid::CellValue;
///
/// let name = CellValue::from("Contoso");
/// let age = CellValue::from(42.0);
/// let active = CellValue::from(true);
/// let missing = CellValue::Empty;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing/empty value.
    Empty,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl CellValue {
    /// Check whether this value is absent for ordering purposes.
    ///
    /// `Empty` and `NaN` numbers sort last regardless of direction.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Get the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric content, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean content, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Natural ascending comparison between two values of the same kind.
    ///
    /// Text compares case-insensitively first, falling back to a
    /// case-sensitive comparison on ties so that ordering stays total.
    /// Numbers compare numerically, booleans as `false < true`. Mismatched
    /// kinds fall back to a fixed kind order so the comparison stays total.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => {
                let folded = a.to_lowercase().cmp(&b.to_lowercase());
                if folded == Ordering::Equal {
                    a.cmp(b)
                } else {
                    folded
                }
            }
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// Directional comparison used by the default column comparators.
    ///
    /// Missing values (`Empty`, `NaN`) sort last regardless of direction;
    /// everything else gets the natural ordering, reversed for descending.
    pub fn directional_cmp(&self, other: &CellValue, direction: SortDirection) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match direction {
                SortDirection::Ascending => self.natural_cmp(other),
                SortDirection::Descending => self.natural_cmp(other).reverse(),
            },
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
