//! Tests for the pure cell-navigation algorithm.

use subgrid::navigation::{CellIndex, Direction, next_cell};

#[test]
fn test_no_current_cell_selects_first_visible() {
    let cell = next_cell(Direction::Right, None, 3, 4, true, &[]);
    assert_eq!(cell, Some(CellIndex::new(0, 0)));

    // First column hidden: start at the first visible one.
    let cell = next_cell(Direction::Down, None, 3, 4, true, &[0]);
    assert_eq!(cell, Some(CellIndex::new(0, 1)));
}

#[test]
fn test_right_steps_and_skips_hidden_runs() {
    let current = Some(CellIndex::new(1, 0));
    // Columns 1 and 2 hidden: step lands on 3.
    let cell = next_cell(Direction::Right, current, 3, 5, false, &[1, 2]);
    assert_eq!(cell, Some(CellIndex::new(1, 3)));
}

#[test]
fn test_right_wraps_to_next_row() {
    let current = Some(CellIndex::new(0, 3));
    let cell = next_cell(Direction::Right, current, 3, 4, true, &[]);
    assert_eq!(cell, Some(CellIndex::new(1, 0)));

    // Last row wraps to row 0.
    let current = Some(CellIndex::new(2, 3));
    let cell = next_cell(Direction::Right, current, 3, 4, true, &[]);
    assert_eq!(cell, Some(CellIndex::new(0, 0)));
}

#[test]
fn test_right_clamps_without_wrap() {
    let current = Some(CellIndex::new(1, 3));
    let cell = next_cell(Direction::Right, current, 3, 4, false, &[]);
    assert_eq!(cell, Some(CellIndex::new(1, 3)));
}

#[test]
fn test_left_wraps_to_previous_row_last_visible() {
    let current = Some(CellIndex::new(1, 0));
    // Column 3 hidden: wrapping left lands on column 2 of the row above.
    let cell = next_cell(Direction::Left, current, 3, 4, true, &[3]);
    assert_eq!(cell, Some(CellIndex::new(0, 2)));

    // Row 0 wraps to the last row.
    let current = Some(CellIndex::new(0, 0));
    let cell = next_cell(Direction::Left, current, 3, 4, true, &[]);
    assert_eq!(cell, Some(CellIndex::new(2, 3)));
}

#[test]
fn test_vertical_boundaries() {
    let top = Some(CellIndex::new(0, 2));
    let bottom = Some(CellIndex::new(2, 2));

    // Without wrap the position stays in place.
    assert_eq!(
        next_cell(Direction::Up, top, 3, 4, false, &[]),
        Some(CellIndex::new(0, 2))
    );
    assert_eq!(
        next_cell(Direction::Down, bottom, 3, 4, false, &[]),
        Some(CellIndex::new(2, 2))
    );

    // With wrap the rows are adjacent.
    assert_eq!(
        next_cell(Direction::Up, top, 3, 4, true, &[]),
        Some(CellIndex::new(2, 2))
    );
    assert_eq!(
        next_cell(Direction::Down, bottom, 3, 4, true, &[]),
        Some(CellIndex::new(0, 2))
    );
}

#[test]
fn test_empty_grid_has_no_navigable_cell() {
    assert_eq!(next_cell(Direction::Down, None, 0, 4, true, &[]), None);
    assert_eq!(next_cell(Direction::Down, None, 3, 0, true, &[]), None);
    // Every column hidden counts as empty too.
    assert_eq!(next_cell(Direction::Down, None, 3, 2, true, &[0, 1]), None);
}

#[test]
fn test_never_returns_hidden_or_out_of_bounds() {
    let hidden = vec![0, 2];
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
    for direction in directions {
        for row in 0..4 {
            for column in 0..5 {
                for wrap in [false, true] {
                    let cell = next_cell(
                        direction,
                        Some(CellIndex::new(row, column)),
                        4,
                        5,
                        wrap,
                        &hidden,
                    )
                    .expect("grid has visible columns");
                    assert!(cell.row < 4, "row {} out of bounds", cell.row);
                    assert!(cell.column < 5, "column {} out of bounds", cell.column);
                    assert!(
                        !hidden.contains(&cell.column),
                        "returned hidden column {}",
                        cell.column
                    );
                }
            }
        }
    }
}

#[test]
fn test_stale_hidden_position_snaps_to_visible() {
    // The current column was hidden after it was selected.
    let current = Some(CellIndex::new(1, 2));
    let cell = next_cell(Direction::Down, current, 3, 5, false, &[2]);
    assert_eq!(cell, Some(CellIndex::new(2, 3)));
}
