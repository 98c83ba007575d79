use chrono::NaiveDate;

use super::Category;
use crate::errors::LedgerError;

/// Whole yen. The ledger never deals in fractional currency.
pub type Yen = i64;

/// One recorded payment, as appended to the ledger sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub date: NaiveDate,
    pub category: Category,
    pub payee: String,
    pub amount: Yen,
}

impl Payment {
    pub fn new(
        date: NaiveDate,
        category: Category,
        payee: impl Into<String>,
        amount: Yen,
    ) -> Result<Self, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(Self {
            date,
            category,
            payee: payee.into(),
            amount,
        })
    }
}

/// A ledger row read back for the monthly view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthEntry {
    /// 1-based row number in the sheet.
    pub row: usize,
    pub date: NaiveDate,
    pub category: Category,
    pub payee: String,
    /// `None` when the amount cell is not a usable number.
    pub amount: Option<Yen>,
}

impl MonthEntry {
    pub fn spent(&self) -> Yen {
        self.amount.unwrap_or(0)
    }
}

/// Yen with thousand separators, e.g. `-1234567` → `"-1,234,567 yen"`.
pub fn format_yen(val: Yen) -> String {
    let digits = val.unsigned_abs().to_string();
    let with_commas: String = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < 0 {
        format!("-{with_commas} yen")
    } else {
        format!("{with_commas} yen")
    }
}
