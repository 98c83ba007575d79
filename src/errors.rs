use thiserror::Error;

use crate::models::Yen;
use crate::store::StoreError;

/// Failures a user action can end in. Every variant is shown inline to the
/// user; none of them ends the session.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Passphrase not accepted")]
    AuthenticationFailed,
    #[error("The same payment is already recorded")]
    DuplicateEntry,
    #[error("Payee is empty")]
    EmptyPayee,
    #[error("Goal unchanged: {0} yen matches the current remaining balance")]
    UnchangedGoal(Yen),
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Yen),
    #[error("Amount must be between {min} and {max} yen, got {value}")]
    AmountOutOfRange { value: Yen, min: Yen, max: Yen },
    #[error("Goal must be between {min} and {max} man-yen, got {value}")]
    GoalOutOfRange { value: i64, min: i64, max: i64 },
    #[error("Not a whole number: {0}")]
    InvalidNumber(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Store access failed: {0}")]
    StoreAccess(#[from] StoreError),
}
