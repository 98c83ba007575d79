//! Reads and appends payment rows in the ledger worksheet.
//!
//! Sheet layout:
//! - row 1: header (`日付 | 支払い項目 | 支払先 | 金額`), goal label in `E1`
//! - `E2`: monthly goal in yen
//! - row 3 onward: one payment per row in columns A–D

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::models::{format_yen, Category, MonthEntry, Payment, Yen};
use crate::store::{CellRange, CellRef, SqliteWorksheet, StoreError, Worksheet};

pub(crate) const HEADER: [&str; 4] = ["日付", "支払い項目", "支払先", "金額"];
pub(crate) const GOAL_LABEL: &str = "設定金額";
pub(crate) const GOAL_LABEL_CELL: CellRef = CellRef { row: 1, col: 5 };
pub(crate) const GOAL_CELL: CellRef = CellRef { row: 2, col: 5 };
pub(crate) const FIRST_DATA_ROW: usize = 3;
pub(crate) const DATE_FORMAT: &str = "%Y年%m月%d日";
pub(crate) const DEFAULT_GOAL: Yen = 100_000;

/// How `append_payment` decides that a payment is already recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// A data row holds the same date, category, payee and amount.
    #[default]
    ExactRow,
    /// Each of the four values appears somewhere in the sheet, not
    /// necessarily in the same row. Rejects payments that were never
    /// entered when their values are common.
    FieldWise,
}

/// Outcome of a successful append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Receipt {
    pub(crate) row: usize,
    pub(crate) payment: Payment,
}

impl Receipt {
    pub(crate) fn message(&self) -> String {
        format!(
            "[{}] {}: {} paid",
            self.payment.category.as_str(),
            self.payment.payee,
            format_yen(self.payment.amount)
        )
    }
}

pub(crate) struct Ledger<W: Worksheet> {
    sheet: W,
    duplicate_policy: DuplicatePolicy,
}

/// The ledger the binary runs against: a local SQLite-backed sheet.
pub(crate) type AppLedger = Ledger<SqliteWorksheet>;

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn cell_or_empty(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Amounts beyond this in either direction read as not a number.
pub(crate) const MAX_CELL_AMOUNT: Yen = 1_000_000_000_000;

/// Whole yen from an amount cell. Decimal cells (`"1200.0"`, `"8000.5"`)
/// are rounded to the nearest yen, half away from zero.
fn parse_amount(raw: &str) -> Option<Yen> {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<Yen>() {
        Ok(v) => v,
        Err(_) => {
            let f = trimmed.parse::<f64>().ok()?.round();
            if f.is_nan() || f.abs() > MAX_CELL_AMOUNT as f64 {
                return None;
            }
            f as Yen
        }
    };
    (-MAX_CELL_AMOUNT..=MAX_CELL_AMOUNT).contains(&value).then_some(value)
}

impl<W: Worksheet> Ledger<W> {
    pub(crate) fn new(sheet: W, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            sheet,
            duplicate_policy,
        }
    }

    #[cfg(test)]
    pub(crate) fn sheet(&self) -> &W {
        &self.sheet
    }

    /// Writes the header row and a default goal into a blank sheet.
    /// Returns `false` when the sheet already has content.
    pub(crate) fn init_layout(&mut self) -> Result<bool, LedgerError> {
        if !self.sheet.get_all_values()?.is_empty() {
            return Ok(false);
        }
        let header: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        self.sheet
            .update_range(CellRange::row_span(1, 1, HEADER.len()), &[header])?;
        self.sheet.update_acell(GOAL_LABEL_CELL, GOAL_LABEL)?;
        self.sheet
            .update_acell(GOAL_CELL, &DEFAULT_GOAL.to_string())?;
        tracing::info!(sheet = self.sheet.title(), "initialized ledger layout");
        Ok(true)
    }

    pub(crate) fn get_goal(&self) -> Result<Yen, LedgerError> {
        let raw = self.sheet.acell(GOAL_CELL)?;
        raw.as_deref()
            .and_then(|v| v.trim().parse::<Yen>().ok())
            .ok_or_else(|| {
                LedgerError::from(StoreError::NotAnInteger {
                    cell: GOAL_CELL.to_string(),
                    value: raw.clone(),
                })
            })
    }

    pub(crate) fn set_goal(&mut self, value: Yen) -> Result<(), LedgerError> {
        self.sheet.update_acell(GOAL_CELL, &value.to_string())?;
        tracing::info!(goal = value, "goal updated");
        Ok(())
    }

    pub(crate) fn append_payment(
        &mut self,
        date: NaiveDate,
        category: Category,
        payee: &str,
        amount: Yen,
    ) -> Result<Receipt, LedgerError> {
        let payment = Payment::new(date, category, payee, amount)?;
        let tuple = [
            format_date(payment.date),
            payment.category.as_str().to_string(),
            payment.payee.clone(),
            payment.amount.to_string(),
        ];

        let values = self.sheet.get_all_values()?;
        if self.is_duplicate(&values, &tuple)? {
            tracing::info!(date = %tuple[0], payee = %tuple[2], amount, "duplicate payment rejected");
            return Err(LedgerError::DuplicateEntry);
        }

        let row = (values.len() + 1).max(FIRST_DATA_ROW);
        self.sheet
            .update_range(CellRange::row_span(row, 1, tuple.len()), &[tuple.to_vec()])?;
        tracing::info!(row, category = payment.category.as_str(), amount, "payment appended");
        Ok(Receipt { row, payment })
    }

    fn is_duplicate(&self, values: &[Vec<String>], tuple: &[String; 4]) -> Result<bool, LedgerError> {
        match self.duplicate_policy {
            DuplicatePolicy::ExactRow => Ok(values
                .iter()
                .skip(FIRST_DATA_ROW - 1)
                .any(|row| (0..4).all(|i| cell_or_empty(row, i) == tuple[i]))),
            DuplicatePolicy::FieldWise => {
                for value in tuple {
                    if self.sheet.find(value)?.is_none() {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Rows dated in `today`'s year and month, in sheet order.
    pub(crate) fn read_current_month(&self, today: NaiveDate) -> Result<Vec<MonthEntry>, LedgerError> {
        let values = self.sheet.get_all_values()?;
        let mut entries = Vec::new();

        for (idx, row) in values.iter().enumerate().skip(FIRST_DATA_ROW - 1) {
            let row_number = idx + 1;
            let date_str = cell_or_empty(row, 0);
            let category_str = cell_or_empty(row, 1);
            let payee = cell_or_empty(row, 2);
            let amount_str = cell_or_empty(row, 3);

            if date_str.is_empty() && category_str.is_empty() && payee.is_empty() && amount_str.is_empty() {
                continue;
            }

            let date = match NaiveDate::parse_from_str(date_str, DATE_FORMAT) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(row = row_number, value = date_str, error = %e, "skipping row with unreadable date");
                    continue;
                }
            };
            if date.year() != today.year() || date.month() != today.month() {
                continue;
            }

            let category = Category::parse(category_str).unwrap_or_else(|| {
                tracing::warn!(row = row_number, value = category_str, "unknown category, counting as other");
                Category::Other
            });

            entries.push(MonthEntry {
                row: row_number,
                date,
                category,
                payee: payee.to_string(),
                amount: parse_amount(amount_str),
            });
        }

        tracing::debug!(month = %today.format("%Y-%m"), rows = entries.len(), "month loaded");
        Ok(entries)
    }
}
