//! Month-to-date figures derived from the ledger rows. Nothing here is
//! stored; every view is rebuilt from the rows it is given.

use crate::models::{Category, MonthEntry, Yen};

/// Sums saturate at the `Yen` bounds instead of wrapping.
fn total(rows: &[MonthEntry]) -> Yen {
    rows.iter()
        .map(MonthEntry::spent)
        .fold(0, Yen::saturating_add)
}

pub(crate) fn compute_remaining(goal: Yen, rows: &[MonthEntry]) -> Yen {
    goal.saturating_sub(total(rows))
}

/// `goal - cumulative spend` after each row, walking the rows in date order.
/// Same-day rows keep their sheet order. The result is aligned with `rows`,
/// not with the date order. A row without an amount gets `None` and leaves
/// the running sum untouched.
pub(crate) fn compute_running_balance(goal: Yen, rows: &[MonthEntry]) -> Vec<Option<Yen>> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by_key(|&i| rows[i].date);

    let mut balances = vec![None; rows.len()];
    let mut running: Yen = 0;
    for i in order {
        if let Some(amount) = rows[i].amount {
            running = running.saturating_add(amount);
            balances[i] = Some(goal.saturating_sub(running));
        }
    }
    balances
}

/// Spend per category in `Category::all()` order. Categories without rows
/// are left out.
pub(crate) fn group_by_category(rows: &[MonthEntry]) -> Vec<(Category, Yen)> {
    Category::all()
        .iter()
        .filter_map(|cat| {
            let mut in_cat = rows.iter().filter(|r| r.category == *cat).peekable();
            in_cat.peek()?;
            Some((*cat, in_cat.map(MonthEntry::spent).fold(0, Yen::saturating_add)))
        })
        .collect()
}

/// Everything the dashboard and the history table show for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MonthlyView {
    pub(crate) goal: Yen,
    pub(crate) remaining: Yen,
    pub(crate) rows: Vec<MonthEntry>,
    pub(crate) running_balance: Vec<Option<Yen>>,
    pub(crate) by_category: Vec<(Category, Yen)>,
}

impl MonthlyView {
    pub(crate) fn build(goal: Yen, rows: Vec<MonthEntry>) -> Self {
        Self {
            goal,
            remaining: compute_remaining(goal, &rows),
            running_balance: compute_running_balance(goal, &rows),
            by_category: group_by_category(&rows),
            rows,
        }
    }

    pub(crate) fn total_spent(&self) -> Yen {
        self.goal.saturating_sub(self.remaining)
    }
}

#[cfg(test)]
mod tests;
