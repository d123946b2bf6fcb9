//! Validation outcome types.

/// Information about a single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellError {
    /// Field the rule ran against.
    pub field: String,
    /// Error message.
    pub message: String,
}

/// Summary of a cell's error situation, carried on validation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationContext {
    /// Whether any errors exist on the cell.
    pub has_errors: bool,
    /// Number of errors on the cell.
    pub error_count: usize,
}

impl ValidationContext {
    /// Build a context from an error list.
    pub fn from_errors(errors: &[CellError]) -> Self {
        Self {
            has_errors: !errors.is_empty(),
            error_count: errors.len(),
        }
    }
}

/// Result of running a cell's rules against a value.
#[derive(Debug, Clone, Default)]
pub enum ValidationOutcome {
    /// All rules passed.
    #[default]
    Valid,
    /// One or more rules failed.
    Invalid(Vec<CellError>),
}

impl ValidationOutcome {
    /// Check if all rules passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any rule failed.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all errors.
    pub fn errors(&self) -> &[CellError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first error (if any).
    pub fn first_error(&self) -> Option<&CellError> {
        self.errors().first()
    }

    /// Summary context for event payloads.
    pub fn context(&self) -> ValidationContext {
        ValidationContext::from_errors(self.errors())
    }
}
