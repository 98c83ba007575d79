mod category;
mod payment;

pub use category::{Category, PayeeOption};
pub use payment::{format_yen, MonthEntry, Payment, Yen};
