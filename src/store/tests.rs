#![allow(clippy::unwrap_used)]

use super::address::column_letters;
use super::*;

fn sheet() -> SqliteWorksheet {
    SqliteWorksheet::open_in_memory("payments").unwrap()
}

fn cell(s: &str) -> CellRef {
    s.parse().unwrap()
}

// ── A1 addressing ─────────────────────────────────────────────

#[test]
fn test_parse_simple_cells() {
    assert_eq!(cell("A1"), CellRef::new(1, 1));
    assert_eq!(cell("E2"), CellRef::new(2, 5));
    assert_eq!(cell("d10"), CellRef::new(10, 4));
}

#[test]
fn test_parse_multi_letter_columns() {
    assert_eq!(cell("Z1").col, 26);
    assert_eq!(cell("AA1").col, 27);
    assert_eq!(cell("AZ3").col, 52);
}

#[test]
fn test_parse_invalid_cells() {
    assert!("".parse::<CellRef>().is_err());
    assert!("A0".parse::<CellRef>().is_err());
    assert!("12".parse::<CellRef>().is_err());
    assert!("A-1".parse::<CellRef>().is_err());
    assert!("ABCD1".parse::<CellRef>().is_err());
}

#[test]
fn test_cell_display_matches_parse() {
    for s in ["A1", "E2", "Z9", "AA27", "AZ100"] {
        assert_eq!(cell(s).to_string(), s);
    }
}

#[test]
fn test_column_letters() {
    assert_eq!(column_letters(1), "A");
    assert_eq!(column_letters(4), "D");
    assert_eq!(column_letters(26), "Z");
    assert_eq!(column_letters(28), "AB");
}

#[test]
fn test_parse_range() {
    let range: CellRange = "A5:D5".parse().unwrap();
    assert_eq!(range.start, CellRef::new(5, 1));
    assert_eq!(range.end, CellRef::new(5, 4));
    assert_eq!(range.rows(), 1);
    assert_eq!(range.cols(), 4);
    assert_eq!(range.to_string(), "A5:D5");
}

#[test]
fn test_range_normalizes_corners() {
    let range: CellRange = "D6:A5".parse().unwrap();
    assert_eq!(range.to_string(), "A5:D6");
}

#[test]
fn test_row_span() {
    assert_eq!(CellRange::row_span(3, 1, 4).to_string(), "A3:D3");
}

// ── Cells ─────────────────────────────────────────────────────

#[test]
fn test_empty_sheet() {
    let ws = sheet();
    assert_eq!(ws.title(), "payments");
    assert!(ws.get_all_values().unwrap().is_empty());
    assert_eq!(ws.acell(cell("A1")).unwrap(), None);
    assert_eq!(ws.find("anything").unwrap(), None);
}

#[test]
fn test_update_and_read_cell() {
    let mut ws = sheet();
    ws.update_acell(cell("E2"), "100000").unwrap();
    assert_eq!(ws.acell(cell("E2")).unwrap().as_deref(), Some("100000"));

    ws.update_acell(cell("E2"), "120000").unwrap();
    assert_eq!(ws.acell(cell("E2")).unwrap().as_deref(), Some("120000"));
}

#[test]
fn test_empty_value_clears_cell() {
    let mut ws = sheet();
    ws.update_acell(cell("B2"), "x").unwrap();
    ws.update_acell(cell("B2"), "").unwrap();
    assert_eq!(ws.acell(cell("B2")).unwrap(), None);
    assert!(ws.get_all_values().unwrap().is_empty());
}

#[test]
fn test_get_all_values_is_dense() {
    let mut ws = sheet();
    ws.update_acell(cell("A1"), "h1").unwrap();
    ws.update_acell(cell("C3"), "x").unwrap();

    let grid = ws.get_all_values().unwrap();
    assert_eq!(grid.len(), 3);
    assert!(grid.iter().all(|row| row.len() == 3));
    assert_eq!(grid[0], vec!["h1", "", ""]);
    assert_eq!(grid[1], vec!["", "", ""]);
    assert_eq!(grid[2], vec!["", "", "x"]);
}

#[test]
fn test_update_range_writes_row() {
    let mut ws = sheet();
    let range: CellRange = "A3:D3".parse().unwrap();
    ws.update_range(
        range,
        &[vec!["a".into(), "b".into(), "c".into(), "d".into()]],
    )
    .unwrap();
    let grid = ws.get_all_values().unwrap();
    assert_eq!(grid[2], vec!["a", "b", "c", "d"]);
}

#[test]
fn test_update_range_rejects_oversized_values() {
    let mut ws = sheet();
    let range: CellRange = "A3:B3".parse().unwrap();
    let err = ws
        .update_range(range, &[vec!["a".into(), "b".into(), "c".into()]])
        .unwrap_err();
    assert!(matches!(err, StoreError::RangeMismatch { cols: 3, .. }));
    assert!(ws.get_all_values().unwrap().is_empty());
}

#[test]
fn test_find_is_exact_and_row_major() {
    let mut ws = sheet();
    ws.update_acell(cell("B1"), "8000").unwrap();
    ws.update_acell(cell("A2"), "8000").unwrap();
    ws.update_acell(cell("A1"), "18000").unwrap();

    assert_eq!(ws.find("8000").unwrap(), Some(cell("B1")));
    assert_eq!(ws.find("800").unwrap(), None);
}

#[test]
fn test_worksheets_are_isolated_in_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let mut a = SqliteWorksheet::open(&path, "a").unwrap();
    a.update_acell(cell("A1"), "only in a").unwrap();
    drop(a);

    let b = SqliteWorksheet::open(&path, "b").unwrap();
    assert!(b.get_all_values().unwrap().is_empty());

    let a = SqliteWorksheet::open(&path, "a").unwrap();
    assert_eq!(a.acell(cell("A1")).unwrap().as_deref(), Some("only in a"));
}

#[test]
fn test_reopen_keeps_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let mut ws = SqliteWorksheet::open(&path, "payments").unwrap();
    ws.update_acell(cell("E2"), "100000").unwrap();
    drop(ws);

    let ws = SqliteWorksheet::open(&path, "payments").unwrap();
    assert_eq!(ws.acell(cell("E2")).unwrap().as_deref(), Some("100000"));
}
