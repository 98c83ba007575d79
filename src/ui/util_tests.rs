#![allow(clippy::unwrap_used)]

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("ライフ", 10), "ライフ");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_japanese() {
    assert_eq!(truncate("オーケーストア", 4), "オーケ…");
}

// ── compact_yen ───────────────────────────────────────────────

#[test]
fn test_compact_yen() {
    assert_eq!(compact_yen(0), "0");
    assert_eq!(compact_yen(999), "999");
    assert_eq!(compact_yen(92_000), "92k");
    assert_eq!(compact_yen(-15_500), "-15k");
    assert_eq!(compact_yen(1_250_000), "1.25M");
    assert_eq!(compact_yen(2_000_000), "2M");
}

// ── mask / progress_bar ───────────────────────────────────────

#[test]
fn test_mask_counts_chars() {
    assert_eq!(mask(""), "");
    assert_eq!(mask("abc"), "•••");
    assert_eq!(mask("合言葉"), "•••");
}

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
    assert_eq!(progress_bar(1.0, 4), "[████]");
    assert_eq!(progress_bar(3.0, 4), "[████]");
    assert_eq!(progress_bar(-1.0, 4), "[░░░░]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 7);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (9, 7));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_edges() {
    let (mut index, mut scroll) = (4, 2);
    scroll_to_bottom(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (9, 7));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 3);
    assert_eq!((index, scroll), (0, 0));
}
