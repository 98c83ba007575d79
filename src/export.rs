use anyhow::{Context, Result};
use std::path::Path;

use crate::budget::MonthlyView;
use crate::ledger::format_date;

/// Writes the month's history (with the running balance column) as CSV.
/// Returns the number of data rows written.
pub(crate) fn write_month_csv(view: &MonthlyView, path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record(["date", "category", "payee", "amount", "balance"])?;
    for (entry, balance) in view.rows.iter().zip(&view.running_balance) {
        wtr.write_record([
            format_date(entry.date),
            entry.category.as_str().to_string(),
            entry.payee.clone(),
            entry.amount.map(|a| a.to_string()).unwrap_or_default(),
            balance.map(|b| b.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV file")?;
    tracing::info!(path = %path.display(), rows = view.rows.len(), "month exported");
    Ok(view.rows.len())
}

/// Expands a leading `~/` to `$HOME`.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
