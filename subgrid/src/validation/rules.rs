//! Fluent rule builder for cell validation.

use std::future::Future;
use std::pin::Pin;

use crate::value::CellValue;

use super::result::{CellError, ValidationOutcome};

/// Type alias for boxed futures used in async validation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type alias for sync validation rule closures.
type SyncRule = Box<dyn Fn(&CellValue) -> Result<(), String> + Send + Sync>;

/// Type alias for async validation rule closures.
type AsyncRule = Box<dyn Fn(CellValue) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// An ordered set of validation rules for one column's cells.
///
/// Rules run in the order they were added; every failing rule contributes
/// one error. Async rules are fire-and-forget from the grid's point of view:
/// the engine never blocks an edit-mode transition on them, and a result
/// that arrives after the user has moved on is the caller's to ignore.
///
/// # Example
///
/// ```ignore
/// let rules = CellRules::new()
///     .required("Email is required")
///     .email("Invalid email format")
///     .rule_async(|v| async move { check_uniqueness(v).await }, "Email already in use");
/// ```
#[derive(Default)]
pub struct CellRules {
    sync_rules: Vec<SyncRule>,
    async_rules: Vec<AsyncRule>,
}

impl CellRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any async rules are attached.
    pub fn has_async_rules(&self) -> bool {
        !self.async_rules.is_empty()
    }

    /// Add a custom synchronous rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&CellValue) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.sync_rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Add a custom asynchronous rule.
    pub fn rule_async<F, Fut>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(CellValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let msg = msg.into();
        self.async_rules.push(Box::new(move |v| {
            let fut = f(v);
            let msg = msg.clone();
            Box::pin(async move { if fut.await { Ok(()) } else { Err(msg) } })
        }));
        self
    }

    // -------------------------------------------------------------------------
    // Built-in rules for text cells
    // -------------------------------------------------------------------------

    /// Require a non-empty text value.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| match v {
                CellValue::Empty => false,
                CellValue::Text(s) => !s.trim().is_empty(),
                _ => true,
            },
            msg,
        )
    }

    /// Require minimum length (in characters). Empty values pass; combine
    /// with `required` for non-empty.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| v.as_text().is_none_or(|s| s.chars().count() >= min),
            msg,
        )
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| v.as_text().is_none_or(|s| s.chars().count() <= max),
            msg,
        )
    }

    /// Require the text to match a regex pattern.
    pub fn pattern(self, pattern: &str, msg: impl Into<String>) -> Self {
        let re = regex::Regex::new(pattern).expect("Invalid regex pattern");
        self.rule(move |v| v.as_text().is_none_or(|s| re.is_match(s)), msg)
    }

    /// Require a valid email address. Empty is valid; use `required` for
    /// non-empty.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| {
                v.as_text()
                    .is_none_or(|s| s.is_empty() || email_address::EmailAddress::is_valid(s))
            },
            msg,
        )
    }

    /// Require the text to contain a substring.
    pub fn contains(self, substr: impl Into<String>, msg: impl Into<String>) -> Self {
        let substr = substr.into();
        self.rule(move |v| v.as_text().is_none_or(|s| s.contains(&substr)), msg)
    }

    // -------------------------------------------------------------------------
    // Built-in rules for numeric cells
    // -------------------------------------------------------------------------

    /// Require a minimum numeric value.
    pub fn min(self, min: f64, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.as_number().is_none_or(|n| n >= min), msg)
    }

    /// Require a maximum numeric value.
    pub fn max(self, max: f64, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.as_number().is_none_or(|n| n <= max), msg)
    }

    /// Require a whole number.
    pub fn integer(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| v.as_number().is_none_or(|n| n.fract() == 0.0 && n.is_finite()),
            msg,
        )
    }

    // -------------------------------------------------------------------------
    // Built-in rules for boolean cells
    // -------------------------------------------------------------------------

    /// Require the value to be `true`.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.as_bool().is_none_or(|b| b), msg)
    }

    // -------------------------------------------------------------------------
    // Execution
    // -------------------------------------------------------------------------

    /// Run all synchronous rules against a value.
    pub fn validate(&self, value: &CellValue, field: &str) -> ValidationOutcome {
        let mut errors = Vec::new();
        for rule in &self.sync_rules {
            if let Err(message) = rule(value) {
                errors.push(CellError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        if errors.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(errors)
        }
    }

    /// Run all rules including async ones.
    ///
    /// The caller drives the returned future on whatever executor it owns;
    /// the grid itself never awaits it.
    pub fn validate_async(&self, value: CellValue, field: &str) -> BoxFuture<'_, ValidationOutcome> {
        let field = field.to_string();
        let sync_outcome = self.validate(&value, &field);
        Box::pin(async move {
            let mut errors = sync_outcome.errors().to_vec();
            for rule in &self.async_rules {
                if let Err(message) = rule(value.clone()).await {
                    errors.push(CellError {
                        field: field.clone(),
                        message,
                    });
                }
            }
            if errors.is_empty() {
                ValidationOutcome::Valid
            } else {
                ValidationOutcome::Invalid(errors)
            }
        })
    }
}

impl std::fmt::Debug for CellRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellRules")
            .field("sync_rules", &self.sync_rules.len())
            .field("async_rules", &self.async_rules.len())
            .finish()
    }
}
