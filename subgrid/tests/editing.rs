//! Tests for edit-mode gating and the cell state machine.

use std::sync::{Arc, Mutex};

use subgrid::prelude::*;

#[derive(Clone, Debug)]
struct Person {
    name: String,
    age: f64,
}

impl RowAccess for Person {
    fn cell(&self, field: &str) -> CellValue {
        match field {
            "name" => CellValue::from(self.name.as_str()),
            "age" => CellValue::from(self.age),
            _ => CellValue::Empty,
        }
    }
}

fn people() -> Vec<Person> {
    vec![
        Person { name: "Ada".into(), age: 36.0 },
        Person { name: "Grace".into(), age: 45.0 },
        Person { name: "Edsger".into(), age: 72.0 },
    ]
}

#[test]
fn test_edit_mode_gating() {
    let columns = vec![
        Column::new("name", ColumnKind::Text).editable(),
        Column::new("age", ColumnKind::Number),
    ];
    let grid = Grid::new(columns, people());

    assert!(grid.can_edit_cell(0, 0));
    assert!(!grid.can_edit_cell(0, 1));

    assert!(grid.enter_cell_edit_mode(0, 0).is_ok());
    assert!(grid.selection().is_editing());

    assert_eq!(
        grid.enter_cell_edit_mode(0, 1),
        Err(GridError::NotEditable { row: 0, column: 1 })
    );
    assert_eq!(
        grid.enter_cell_edit_mode(9, 0),
        Err(GridError::OutOfBounds { row: 9, column: 0 })
    );
}

#[test]
fn test_editing_requires_a_selected_cell() {
    let columns = vec![Column::new("name", ColumnKind::Text).editable()];
    let grid = Grid::new(columns, people());

    assert_eq!(grid.exit_cell_edit_mode(true), Err(GridError::NoSelectedCell));

    // A selected-but-not-editing cell is not enough either.
    grid.selection().select_cell(0, 0);
    assert_eq!(grid.exit_cell_edit_mode(false), Err(GridError::NoSelectedCell));
}

#[test]
fn test_cancel_returns_to_selected() {
    let columns = vec![Column::new("name", ColumnKind::Text).editable()];
    let grid = Grid::new(columns, people());

    grid.enter_cell_edit_mode(1, 0).unwrap();
    grid.exit_cell_edit_mode(false).unwrap();

    // Editing always returns to selected, never to unselected.
    let selection = grid.selection();
    assert!(!selection.is_editing());
    assert_eq!(selection.selected_cell(), Some(CellIndex::new(1, 0)));
}

#[test]
fn test_save_invokes_callback_and_advances_down() {
    let saved: Arc<Mutex<Vec<(usize, CellValue)>>> = Arc::default();
    let sink = Arc::clone(&saved);
    let columns = vec![
        Column::new("name", ColumnKind::Text)
            .editable()
            .with_on_save(move |value, ctx| {
                sink.lock().unwrap().push((ctx.original_index, value.clone()));
                true
            }),
        Column::new("age", ColumnKind::Number),
    ];
    let grid = Grid::new(columns, people());

    grid.enter_cell_edit_mode(0, 0).unwrap();
    grid.exit_cell_edit_mode(true).unwrap();

    let saved = saved.lock().unwrap();
    assert_eq!(saved.as_slice(), &[(0, CellValue::from("Ada"))]);
    drop(saved);

    let selection = grid.selection();
    assert!(!selection.is_editing());
    assert_eq!(selection.selected_cell(), Some(CellIndex::new(1, 0)));
}

#[test]
fn test_save_on_last_row_wraps_to_first() {
    let columns = vec![Column::new("name", ColumnKind::Text).editable()];
    let grid = Grid::new(columns, people());

    grid.enter_cell_edit_mode(2, 0).unwrap();
    grid.exit_cell_edit_mode(true).unwrap();
    assert_eq!(grid.selection().selected_cell(), Some(CellIndex::new(0, 0)));
}

#[test]
fn test_rejected_save_keeps_cell_editing() {
    let columns = vec![
        Column::new("name", ColumnKind::Text)
            .editable()
            .with_on_save(|_value, _ctx| false),
    ];
    let grid = Grid::new(columns, people());

    grid.enter_cell_edit_mode(1, 0).unwrap();
    grid.exit_cell_edit_mode(true).unwrap();

    let selection = grid.selection();
    assert!(selection.is_editing());
    assert_eq!(selection.selected_cell(), Some(CellIndex::new(1, 0)));
}

#[test]
fn test_entering_edit_mode_clears_row_selection() {
    let columns = vec![Column::new("name", ColumnKind::Text).editable()];
    let grid = Grid::new(columns, people());

    grid.selection().select_range(0, 2);
    grid.enter_cell_edit_mode(1, 0).unwrap();

    let selection = grid.selection();
    assert!(selection.selected_rows().is_empty());
    assert_eq!(selection.selected_cell(), Some(CellIndex::new(1, 0)));
    assert!(selection.is_editing());
}

#[test]
fn test_reselecting_a_cell_exits_edit_mode() {
    let columns = vec![Column::new("name", ColumnKind::Text).editable()];
    let grid = Grid::new(columns, people());

    grid.enter_cell_edit_mode(0, 0).unwrap();
    grid.selection().select_cell(2, 0);
    assert!(!grid.selection().is_editing());
}
