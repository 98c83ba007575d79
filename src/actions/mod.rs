//! User actions shared by the terminal UI and the CLI: input bounds, the
//! payment entry form, and the goal change rule.

use chrono::NaiveDate;

use crate::budget::MonthlyView;
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Receipt};
use crate::models::{format_yen, Category, PayeeOption, Yen};
use crate::store::Worksheet;

pub(crate) const MAN_YEN: Yen = 10_000;
pub(crate) const GOAL_MIN_MAN_YEN: i64 = 5;
pub(crate) const GOAL_MAX_MAN_YEN: i64 = 50;
pub(crate) const DEFAULT_GOAL_MAN_YEN: i64 = 10;
pub(crate) const AMOUNT_MIN: Yen = 1;
pub(crate) const AMOUNT_MAX: Yen = 50_000;
pub(crate) const DEFAULT_AMOUNT: Yen = 8_000;

pub(crate) fn validate_amount(amount: Yen) -> Result<(), LedgerError> {
    if (AMOUNT_MIN..=AMOUNT_MAX).contains(&amount) {
        Ok(())
    } else {
        Err(LedgerError::AmountOutOfRange {
            value: amount,
            min: AMOUNT_MIN,
            max: AMOUNT_MAX,
        })
    }
}

pub(crate) fn goal_from_man_yen(man_yen: i64) -> Result<Yen, LedgerError> {
    if (GOAL_MIN_MAN_YEN..=GOAL_MAX_MAN_YEN).contains(&man_yen) {
        Ok(man_yen * MAN_YEN)
    } else {
        Err(LedgerError::GoalOutOfRange {
            value: man_yen,
            min: GOAL_MIN_MAN_YEN,
            max: GOAL_MAX_MAN_YEN,
        })
    }
}

/// Whole number typed by the user; thousands separators are allowed.
pub(crate) fn parse_whole(raw: &str) -> Result<i64, LedgerError> {
    let raw = raw.trim();
    raw.replace(',', "")
        .parse()
        .map_err(|_| LedgerError::InvalidNumber(raw.to_string()))
}

/// Goal plus this month's rows, rebuilt from the sheet on every call.
pub(crate) fn load_month<W: Worksheet>(
    ledger: &Ledger<W>,
    today: NaiveDate,
) -> Result<MonthlyView, LedgerError> {
    let goal = ledger.get_goal()?;
    let rows = ledger.read_current_month(today)?;
    Ok(MonthlyView::build(goal, rows))
}

/// Records a payment dated `today`. The payee is checked before the sheet
/// is touched.
pub(crate) fn submit_payment<W: Worksheet>(
    ledger: &mut Ledger<W>,
    today: NaiveDate,
    category: Category,
    payee: &str,
    amount: Yen,
) -> Result<Receipt, LedgerError> {
    let payee = payee.trim();
    if payee.is_empty() {
        return Err(LedgerError::EmptyPayee);
    }
    validate_amount(amount)?;
    ledger.append_payment(today, category, payee, amount)
}

/// Sets the monthly goal from a man-yen input.
///
/// The new value is compared against the current *remaining* balance, not
/// the stored goal: entering the figure the dashboard shows is refused as
/// "unchanged".
pub(crate) fn change_goal<W: Worksheet>(
    ledger: &mut Ledger<W>,
    man_yen: i64,
    remaining: Yen,
) -> Result<String, LedgerError> {
    let goal = goal_from_man_yen(man_yen)?;
    if goal == remaining {
        return Err(LedgerError::UnchangedGoal(goal));
    }
    ledger.set_goal(goal)?;
    Ok(format!("Goal set to {}", format_yen(goal)))
}

/// State of the payment entry form: a category, a payee picked from that
/// category's list (or typed), and an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PaymentForm {
    pub(crate) category: Category,
    pub(crate) payee_index: usize,
    pub(crate) free_text: String,
    pub(crate) amount: Yen,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            category: Category::Food,
            payee_index: 0,
            free_text: String::new(),
            amount: DEFAULT_AMOUNT,
        }
    }
}

fn step(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (index as i64 + i64::from(delta)).rem_euclid(len) as usize
}

impl PaymentForm {
    pub(crate) fn payee_option(&self) -> PayeeOption {
        let options = self.category.payees();
        options
            .get(self.payee_index)
            .copied()
            .unwrap_or(PayeeOption::FreeText)
    }

    pub(crate) fn wants_free_text(&self) -> bool {
        self.payee_option() == PayeeOption::FreeText
    }

    /// The payee that would be recorded; empty when free text is selected
    /// and nothing was typed.
    pub(crate) fn payee(&self) -> String {
        match self.payee_option() {
            PayeeOption::Named(name) => name.to_string(),
            PayeeOption::FreeText => self.free_text.trim().to_string(),
        }
    }

    /// Switching category resets the payee choice to the first entry.
    pub(crate) fn cycle_category(&mut self, delta: i32) {
        let all = Category::all();
        let idx = all.iter().position(|c| *c == self.category).unwrap_or(0);
        self.category = all[step(idx, delta, all.len())];
        self.payee_index = 0;
    }

    pub(crate) fn cycle_payee(&mut self, delta: i32) {
        self.payee_index = step(self.payee_index, delta, self.category.payees().len());
    }

    pub(crate) fn adjust_amount(&mut self, delta: Yen) {
        self.amount = (self.amount + delta).clamp(AMOUNT_MIN, AMOUNT_MAX);
    }

    pub(crate) fn submit<W: Worksheet>(
        &self,
        ledger: &mut Ledger<W>,
        today: NaiveDate,
    ) -> Result<Receipt, LedgerError> {
        submit_payment(ledger, today, self.category, &self.payee(), self.amount)
    }
}
