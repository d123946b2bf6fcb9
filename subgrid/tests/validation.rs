//! Tests for cell validation rules and their wiring into edit-mode saves.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use subgrid::prelude::*;
use subgrid::validation::CellError;

/// Drives a future to completion on the current thread. Sufficient for the
/// rule futures here, which never park on external wakeups.
fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = std::pin::pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(value) => return value,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

#[derive(Clone, Debug)]
struct Contact {
    email: String,
}

impl RowAccess for Contact {
    fn cell(&self, field: &str) -> CellValue {
        match field {
            "email" => CellValue::from(self.email.as_str()),
            _ => CellValue::Empty,
        }
    }
}

fn contacts() -> Vec<Contact> {
    vec![
        Contact { email: "ada@example.com".into() },
        Contact { email: "grace@example.com".into() },
    ]
}

#[test]
fn test_text_rules() {
    let rules = CellRules::new()
        .required("required")
        .min_length(3, "too short")
        .max_length(10, "too long")
        .email("bad email");

    assert!(rules.validate(&CellValue::Empty, "email").is_invalid());
    assert!(rules.validate(&CellValue::from("   "), "email").is_invalid());
    assert!(rules.validate(&CellValue::from("a@b.co"), "email").is_valid());

    let outcome = rules.validate(&CellValue::from("ab"), "email");
    let messages: Vec<&str> = outcome.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["too short", "bad email"]);
    assert_eq!(outcome.first_error().unwrap().field, "email");
}

#[test]
fn test_pattern_and_contains_rules() {
    let rules = CellRules::new()
        .pattern(r"^[a-z]+$", "lowercase only")
        .contains("x", "needs an x");

    assert!(rules.validate(&CellValue::from("xyz"), "code").is_valid());
    assert!(rules.validate(&CellValue::from("Xyz"), "code").is_invalid());
    assert!(rules.validate(&CellValue::from("abc"), "code").is_invalid());
    // Non-text values are not this rule's concern.
    assert!(rules.validate(&CellValue::from(4.0), "code").is_valid());
}

#[test]
fn test_numeric_and_bool_rules() {
    let rules = CellRules::new()
        .min(0.0, "negative")
        .max(100.0, "too large")
        .integer("not whole");

    assert!(rules.validate(&CellValue::from(42.0), "score").is_valid());
    assert!(rules.validate(&CellValue::from(-1.0), "score").is_invalid());
    assert!(rules.validate(&CellValue::from(100.5), "score").is_invalid());

    let rules = CellRules::new().checked("must accept");
    assert!(rules.validate(&CellValue::from(true), "tos").is_valid());
    assert!(rules.validate(&CellValue::from(false), "tos").is_invalid());
}

#[test]
fn test_validation_context_summarizes_errors() {
    let errors = vec![
        CellError { field: "email".into(), message: "a".into() },
        CellError { field: "email".into(), message: "b".into() },
    ];
    let context = ValidationContext::from_errors(&errors);
    assert!(context.has_errors);
    assert_eq!(context.error_count, 2);
    assert_eq!(ValidationContext::from_errors(&[]), ValidationContext::default());
}

fn kinds_of(recorded: &Arc<Mutex<Vec<GridEvent>>>) -> Vec<GridEventKind> {
    recorded.lock().unwrap().iter().map(GridEvent::kind).collect()
}

/// A grid whose "email" column reads from an external store, standing in for
/// the editor widget's live value.
fn editable_grid(store: Arc<Mutex<CellValue>>) -> Grid<Contact> {
    let columns = vec![
        Column::new("email", ColumnKind::Text)
            .editable()
            .with_getter(move |_row, _cfg| store.lock().unwrap().clone())
            .with_rules(CellRules::new().required("required").email("bad email")),
    ];
    Grid::new(columns, contacts())
}

#[test]
fn test_failing_save_keeps_editing_and_reports() {
    let store = Arc::new(Mutex::new(CellValue::from("not-an-email")));
    let grid = editable_grid(Arc::clone(&store));
    let recorded: Arc<Mutex<Vec<GridEvent>>> = Arc::default();
    let sink = Arc::clone(&recorded);
    grid.events().subscribe(move |e| sink.lock().unwrap().push(e.clone()));

    grid.enter_cell_edit_mode(0, 0).unwrap();
    grid.exit_cell_edit_mode(true).unwrap();

    assert!(grid.selection().is_editing());
    assert_eq!(
        kinds_of(&recorded),
        vec![
            GridEventKind::EditingStarted,
            GridEventKind::ValidationFailed,
            GridEventKind::ValidationChanged,
        ]
    );

    let errors = grid
        .snapshot()
        .unwrap()
        .cell_errors
        .get(&(0, 0))
        .cloned()
        .unwrap();
    assert_eq!(errors[0].message, "bad email");

    // Same errors again: failed fires, changed does not.
    grid.exit_cell_edit_mode(true).unwrap();
    assert_eq!(
        kinds_of(&recorded).last(),
        Some(&GridEventKind::ValidationFailed)
    );
}

#[test]
fn test_fixing_the_value_clears_errors_and_saves() {
    let store = Arc::new(Mutex::new(CellValue::from("broken")));
    let grid = editable_grid(Arc::clone(&store));
    let recorded: Arc<Mutex<Vec<GridEvent>>> = Arc::default();
    let sink = Arc::clone(&recorded);
    grid.events().subscribe(move |e| sink.lock().unwrap().push(e.clone()));

    grid.enter_cell_edit_mode(0, 0).unwrap();
    grid.exit_cell_edit_mode(true).unwrap();
    assert!(grid.selection().is_editing());

    *store.lock().unwrap() = CellValue::from("ada@example.com");
    grid.exit_cell_edit_mode(true).unwrap();

    assert_eq!(
        kinds_of(&recorded),
        vec![
            GridEventKind::EditingStarted,
            GridEventKind::ValidationFailed,
            GridEventKind::ValidationChanged,
            GridEventKind::ValidationSucceeded,
            GridEventKind::ValidationChanged,
            GridEventKind::EditingSaved,
        ]
    );

    match recorded.lock().unwrap().last().cloned() {
        Some(GridEvent::EditingSaved { value, .. }) => {
            assert_eq!(value, CellValue::from("ada@example.com"));
        }
        other => panic!("expected EditingSaved, got {other:?}"),
    }

    // Errors cleared, edit mode left, selection advanced down.
    assert!(grid.snapshot().unwrap().cell_errors.is_empty());
    assert!(!grid.selection().is_editing());
    assert_eq!(grid.selection().selected_cell(), Some(CellIndex::new(1, 0)));
}

#[test]
fn test_async_rules_extend_sync_outcome() {
    let rules = CellRules::new()
        .required("required")
        .rule_async(
            |value| async move { value.as_text().is_none_or(|s| s != "taken") },
            "already in use",
        );
    assert!(rules.has_async_rules());

    let outcome = block_on(rules.validate_async(CellValue::from("free"), "email"));
    assert!(outcome.is_valid());

    let outcome = block_on(rules.validate_async(CellValue::from("taken"), "email"));
    let messages: Vec<&str> = outcome.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["already in use"]);
}

#[test]
fn test_validate_cell_async_records_through_the_grid() {
    let columns = vec![
        Column::new("email", ColumnKind::Text).editable().with_rules(
            CellRules::new().rule_async(
                |value| async move { value.as_text().is_none_or(|s| !s.starts_with("grace")) },
                "already in use",
            ),
        ),
    ];
    let grid = Grid::new(columns, contacts());
    let recorded: Arc<Mutex<Vec<GridEvent>>> = Arc::default();
    let sink = Arc::clone(&recorded);
    grid.events().subscribe(move |e| sink.lock().unwrap().push(e.clone()));

    // Row 0 passes; no events, no recorded errors.
    let outcome = block_on(grid.validate_cell_async(0, 0).unwrap());
    assert!(outcome.is_valid());
    assert!(recorded.lock().unwrap().is_empty());

    // Row 1 fails; the completion reports and records.
    let outcome = block_on(grid.validate_cell_async(1, 0).unwrap());
    assert!(outcome.is_invalid());
    assert_eq!(
        kinds_of(&recorded),
        vec![GridEventKind::ValidationFailed, GridEventKind::ValidationChanged]
    );
    assert!(grid.snapshot().unwrap().cell_errors.contains_key(&(1, 0)));

    // A column without rules yields no future at all.
    let plain = Grid::new(vec![Column::new("email", ColumnKind::Text)], contacts());
    assert!(plain.validate_cell_async(0, 0).is_none());
}
