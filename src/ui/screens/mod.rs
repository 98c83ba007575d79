pub(crate) mod dashboard;
pub(crate) mod entry;
pub(crate) mod history;
pub(crate) mod login;
