#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;

fn entry(day: u32, category: Category, payee: &str, amount: Option<Yen>) -> MonthEntry {
    MonthEntry {
        row: 2 + day as usize,
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        category,
        payee: payee.into(),
        amount,
    }
}

fn sample() -> Vec<MonthEntry> {
    vec![
        entry(1, Category::Food, "storeA", Some(8000)),
        entry(3, Category::DailyGoods, "storeB", Some(2000)),
    ]
}

// ── compute_remaining ─────────────────────────────────────────

#[test]
fn test_remaining_example() {
    assert_eq!(compute_remaining(100_000, &sample()), 90_000);
}

#[test]
fn test_remaining_empty_month_is_goal() {
    assert_eq!(compute_remaining(100_000, &[]), 100_000);
}

#[test]
fn test_remaining_can_go_negative() {
    let rows = vec![entry(1, Category::Food, "x", Some(60_000)), entry(2, Category::Food, "y", Some(60_000))];
    assert_eq!(compute_remaining(100_000, &rows), -20_000);
}

#[test]
fn test_remaining_ignores_missing_amounts() {
    let mut rows = sample();
    rows.push(entry(4, Category::Other, "z", None));
    assert_eq!(compute_remaining(100_000, &rows), 90_000);
}

#[test]
fn test_remaining_saturates_instead_of_overflowing() {
    let rows = vec![
        entry(1, Category::Food, "x", Some(Yen::MAX)),
        entry(2, Category::Food, "y", Some(100)),
    ];
    assert_eq!(compute_remaining(100_000, &rows), 100_000 - Yen::MAX);
    let view = MonthlyView::build(100_000, rows);
    assert_eq!(view.running_balance[1], Some(100_000 - Yen::MAX));
    assert_eq!(view.by_category, vec![(Category::Food, Yen::MAX)]);
    assert_eq!(view.total_spent(), Yen::MAX);
}

// ── compute_running_balance ───────────────────────────────────

#[test]
fn test_running_balance_example() {
    assert_eq!(
        compute_running_balance(100_000, &sample()),
        vec![Some(92_000), Some(90_000)]
    );
}

#[test]
fn test_running_balance_empty() {
    assert!(compute_running_balance(100_000, &[]).is_empty());
}

#[test]
fn test_running_balance_non_increasing() {
    let rows: Vec<MonthEntry> = (1..=20)
        .map(|d| entry(d, Category::Food, "x", Some(i64::from(d) * 137)))
        .collect();
    let series: Vec<Yen> = compute_running_balance(50_000, &rows)
        .into_iter()
        .map(Option::unwrap)
        .collect();
    assert!(series.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_running_balance_orders_by_date_but_stays_aligned() {
    let rows = vec![
        entry(5, Category::Food, "late", Some(1000)),
        entry(2, Category::Food, "early", Some(3000)),
    ];
    // early first: 100000-3000, then late: 100000-4000
    assert_eq!(
        compute_running_balance(100_000, &rows),
        vec![Some(96_000), Some(97_000)]
    );
}

#[test]
fn test_running_balance_same_day_keeps_sheet_order() {
    let rows = vec![
        entry(2, Category::Food, "first", Some(100)),
        entry(2, Category::Food, "second", Some(200)),
    ];
    assert_eq!(
        compute_running_balance(1000, &rows),
        vec![Some(900), Some(700)]
    );
}

#[test]
fn test_running_balance_missing_amount_is_none() {
    let rows = vec![
        entry(1, Category::Food, "a", Some(1000)),
        entry(2, Category::Food, "b", None),
        entry(3, Category::Food, "c", Some(500)),
    ];
    assert_eq!(
        compute_running_balance(10_000, &rows),
        vec![Some(9000), None, Some(8500)]
    );
}

#[test]
fn test_last_running_balance_equals_remaining() {
    let rows = sample();
    let series = compute_running_balance(100_000, &rows);
    assert_eq!(series.last().copied().flatten(), Some(compute_remaining(100_000, &rows)));
}

// ── group_by_category ─────────────────────────────────────────

#[test]
fn test_group_by_category_sums() {
    let rows = vec![
        entry(1, Category::Food, "a", Some(1000)),
        entry(2, Category::Leisure, "b", Some(300)),
        entry(3, Category::Food, "c", Some(2000)),
    ];
    assert_eq!(
        group_by_category(&rows),
        vec![(Category::Food, 3000), (Category::Leisure, 300)]
    );
}

#[test]
fn test_group_by_category_totals_match_grand_total() {
    let rows = vec![
        entry(1, Category::Food, "a", Some(1234)),
        entry(2, Category::DailyGoods, "b", Some(999)),
        entry(3, Category::Leisure, "c", Some(45)),
        entry(4, Category::Other, "d", Some(10_000)),
        entry(5, Category::Food, "e", None),
        entry(6, Category::Other, "f", Some(1)),
    ];
    let grouped: Yen = group_by_category(&rows).iter().map(|(_, v)| v).sum();
    let total: Yen = rows.iter().map(MonthEntry::spent).sum();
    assert_eq!(grouped, total);
}

#[test]
fn test_group_by_category_keeps_category_with_only_missing_amounts() {
    let rows = vec![entry(1, Category::Other, "x", None)];
    assert_eq!(group_by_category(&rows), vec![(Category::Other, 0)]);
}

#[test]
fn test_group_by_category_empty() {
    assert!(group_by_category(&[]).is_empty());
}

// ── MonthlyView ───────────────────────────────────────────────

#[test]
fn test_monthly_view_build() {
    let view = MonthlyView::build(100_000, sample());
    assert_eq!(view.goal, 100_000);
    assert_eq!(view.remaining, 90_000);
    assert_eq!(view.total_spent(), 10_000);
    assert_eq!(view.running_balance, vec![Some(92_000), Some(90_000)]);
    assert_eq!(
        view.by_category,
        vec![(Category::Food, 8000), (Category::DailyGoods, 2000)]
    );
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn test_monthly_view_goal_change_recomputes() {
    let a = MonthlyView::build(100_000, sample());
    let b = MonthlyView::build(120_000, sample());
    assert_eq!(b.remaining - a.remaining, 20_000);
    assert_eq!(b.running_balance, vec![Some(112_000), Some(110_000)]);
}
