use chrono::NaiveDate;

use crate::actions::{self, PaymentForm, DEFAULT_GOAL_MAN_YEN, GOAL_MAX_MAN_YEN, GOAL_MIN_MAN_YEN, MAN_YEN};
use crate::budget::MonthlyView;
use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::store::Worksheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    History,
    Entry,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::History, Self::Entry]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::History => write!(f, "History"),
            Self::Entry => write!(f, "New Payment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Passphrase,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Passphrase => write!(f, "LOCKED"),
        }
    }
}

/// Focusable rows of the payment entry form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryField {
    Category,
    Payee,
    FreeText,
    Amount,
    Submit,
}

impl EntryField {
    const ORDER: [EntryField; 5] = [
        Self::Category,
        Self::Payee,
        Self::FreeText,
        Self::Amount,
        Self::Submit,
    ];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Payee => "Payee",
            Self::FreeText => "Payee name",
            Self::Amount => "Amount",
            Self::Submit => "Submit",
        }
    }
}

/// What the `edit>` line is currently typing into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditTarget {
    FreeText,
    Amount,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Login gate
    pub(crate) session: Session,
    passphrase: String,
    pub(crate) passphrase_input: String,

    // Month figures
    pub(crate) today: NaiveDate,
    pub(crate) view: MonthlyView,
    pub(crate) goal_input: i64,

    // History
    pub(crate) history_index: usize,
    pub(crate) history_scroll: usize,

    // Entry form
    pub(crate) form: PaymentForm,
    pub(crate) entry_field: EntryField,
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) edit_buffer: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(passphrase: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Passphrase,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            session: Session::default(),
            passphrase: passphrase.into(),
            passphrase_input: String::new(),

            today,
            view: MonthlyView::default(),
            goal_input: DEFAULT_GOAL_MAN_YEN,

            history_index: 0,
            history_scroll: 0,

            form: PaymentForm::default(),
            entry_field: EntryField::Category,
            edit_target: None,
            edit_buffer: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn is_locked(&self) -> bool {
        !self.session.is_authenticated()
    }

    /// Checks the typed passphrase. The input is cleared either way.
    pub(crate) fn try_unlock(&mut self) -> Result<(), LedgerError> {
        let candidate = std::mem::take(&mut self.passphrase_input);
        self.session.authenticate(&candidate, &self.passphrase)?;
        self.input_mode = InputMode::Normal;
        Ok(())
    }

    pub(crate) fn lock(&mut self) {
        self.session = Session::Unauthenticated;
        self.passphrase_input.clear();
        self.input_mode = InputMode::Passphrase;
        self.show_help = false;
        self.set_status("Locked");
    }

    /// Re-reads goal and month rows from the sheet.
    pub(crate) fn refresh<W: Worksheet>(&mut self, ledger: &Ledger<W>) -> Result<(), LedgerError> {
        self.view = actions::load_month(ledger, self.today)?;
        self.goal_input = (self.view.goal / MAN_YEN).clamp(GOAL_MIN_MAN_YEN, GOAL_MAX_MAN_YEN);
        let len = self.view.rows.len();
        if self.history_index >= len {
            self.history_index = len.saturating_sub(1);
        }
        Ok(())
    }

    pub(crate) fn adjust_goal_input(&mut self, delta: i64) {
        self.goal_input = (self.goal_input + delta).clamp(GOAL_MIN_MAN_YEN, GOAL_MAX_MAN_YEN);
    }

    /// Sets the goal to `man_yen`. The unchanged-goal check runs against
    /// a remaining balance read from the sheet just now, not the cached view.
    pub(crate) fn apply_goal<W: Worksheet>(
        &mut self,
        ledger: &mut Ledger<W>,
        man_yen: i64,
    ) -> Result<String, LedgerError> {
        self.refresh(ledger)?;
        let msg = actions::change_goal(ledger, man_yen, self.view.remaining)?;
        self.refresh(ledger)?;
        Ok(msg)
    }

    /// Fields the form currently shows; the typed payee row only appears
    /// when the free-text option is picked.
    pub(crate) fn entry_fields(&self) -> Vec<EntryField> {
        EntryField::ORDER
            .into_iter()
            .filter(|f| *f != EntryField::FreeText || self.form.wants_free_text())
            .collect()
    }

    pub(crate) fn move_entry_field(&mut self, delta: i32) {
        let fields = self.entry_fields();
        let idx = fields.iter().position(|f| *f == self.entry_field).unwrap_or(0) as i32;
        let next = (idx + delta).clamp(0, fields.len() as i32 - 1) as usize;
        self.entry_field = fields[next];
    }

    pub(crate) fn begin_edit(&mut self, target: EditTarget) {
        self.edit_buffer = match target {
            EditTarget::FreeText => self.form.free_text.clone(),
            EditTarget::Amount => self.form.amount.to_string(),
        };
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    /// Writes the edit buffer back into the form.
    pub(crate) fn commit_edit(&mut self) -> Result<(), LedgerError> {
        let target = self.edit_target.take();
        self.input_mode = InputMode::Normal;
        let buffer = std::mem::take(&mut self.edit_buffer);
        match target {
            Some(EditTarget::FreeText) => self.form.free_text = buffer.trim().to_string(),
            Some(EditTarget::Amount) => {
                let amount = actions::parse_whole(&buffer)?;
                actions::validate_amount(amount)?;
                self.form.amount = amount;
            }
            None => {}
        }
        Ok(())
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Clears the form after a successful submit, keeping the category.
    pub(crate) fn reset_form(&mut self) {
        let category = self.form.category;
        self.form = PaymentForm {
            category,
            ..PaymentForm::default()
        };
        self.entry_field = EntryField::Category;
    }

    /// Shows an action failure in the status bar and logs it.
    pub(crate) fn report(&mut self, err: &LedgerError) {
        tracing::warn!(error = %err, "action failed");
        self.set_status(format!("Error: {err}"));
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
