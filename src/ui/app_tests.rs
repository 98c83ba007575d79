#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::app::*;
use super::commands::{handle_command, parse_quick_payment};
use crate::errors::LedgerError;
use crate::ledger::{AppLedger, DuplicatePolicy, Ledger};
use crate::models::Category;
use crate::store::SqliteWorksheet;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn ledger() -> AppLedger {
    let mut ledger = Ledger::new(
        SqliteWorksheet::open_in_memory("payments").unwrap(),
        DuplicatePolicy::ExactRow,
    );
    ledger.init_layout().unwrap();
    ledger
}

fn unlocked(ledger: &AppLedger) -> App {
    let mut app = App::new("secret", today());
    app.passphrase_input = "secret".into();
    app.try_unlock().unwrap();
    app.refresh(ledger).unwrap();
    app
}

// ── Login gate ────────────────────────────────────────────────

#[test]
fn test_app_starts_locked() {
    let app = App::new("secret", today());
    assert!(app.is_locked());
    assert_eq!(app.input_mode, InputMode::Passphrase);
}

#[test]
fn test_wrong_passphrase_keeps_gate() {
    let mut app = App::new("secret", today());
    app.passphrase_input = "guess".into();
    assert!(matches!(app.try_unlock(), Err(LedgerError::AuthenticationFailed)));
    assert!(app.is_locked());
    assert!(app.passphrase_input.is_empty());
    assert_eq!(app.input_mode, InputMode::Passphrase);
}

#[test]
fn test_unlock_then_lock() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);
    assert!(!app.is_locked());
    assert_eq!(app.input_mode, InputMode::Normal);

    app.lock();
    assert!(app.is_locked());
    assert_eq!(app.input_mode, InputMode::Passphrase);
}

// ── Month figures ─────────────────────────────────────────────

#[test]
fn test_refresh_loads_goal_and_rows() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    assert_eq!(app.view.goal, 100_000);
    assert_eq!(app.view.remaining, 100_000);
    assert_eq!(app.goal_input, 10);

    ledger
        .append_payment(today(), Category::Food, "ライフ", 8000)
        .unwrap();
    app.refresh(&ledger).unwrap();
    assert_eq!(app.view.rows.len(), 1);
    assert_eq!(app.view.remaining, 92_000);
}

#[test]
fn test_goal_input_clamped() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);
    app.adjust_goal_input(-100);
    assert_eq!(app.goal_input, 5);
    app.adjust_goal_input(100);
    assert_eq!(app.goal_input, 50);
}

// ── Entry form ────────────────────────────────────────────────

#[test]
fn test_free_text_field_only_when_selected() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);
    assert!(!app.entry_fields().contains(&EntryField::FreeText));

    app.form.category = Category::Other;
    app.form.payee_index = 0;
    assert!(app.entry_fields().contains(&EntryField::FreeText));
}

#[test]
fn test_move_entry_field_clamps() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);
    app.move_entry_field(-1);
    assert_eq!(app.entry_field, EntryField::Category);
    app.move_entry_field(1);
    assert_eq!(app.entry_field, EntryField::Payee);
    app.move_entry_field(10);
    assert_eq!(app.entry_field, EntryField::Submit);
}

#[test]
fn test_commit_amount_edit() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);

    app.begin_edit(EditTarget::Amount);
    assert_eq!(app.edit_buffer, "8000");
    app.edit_buffer = "12,000".into();
    app.commit_edit().unwrap();
    assert_eq!(app.form.amount, 12_000);
    assert_eq!(app.input_mode, InputMode::Normal);

    app.begin_edit(EditTarget::Amount);
    app.edit_buffer = "abc".into();
    assert!(matches!(app.commit_edit(), Err(LedgerError::InvalidNumber(_))));
    assert_eq!(app.form.amount, 12_000);

    app.begin_edit(EditTarget::Amount);
    app.edit_buffer = "60000".into();
    assert!(matches!(
        app.commit_edit(),
        Err(LedgerError::AmountOutOfRange { value: 60_000, .. })
    ));
    assert_eq!(app.form.amount, 12_000);
}

#[test]
fn test_commit_free_text_edit() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);
    app.form.category = Category::Other;
    app.begin_edit(EditTarget::FreeText);
    app.edit_buffer = "  本屋 ".into();
    app.commit_edit().unwrap();
    assert_eq!(app.form.payee(), "本屋");
}

#[test]
fn test_reset_form_keeps_category() {
    let ledger = ledger();
    let mut app = unlocked(&ledger);
    app.form.category = Category::Leisure;
    app.form.payee_index = 2;
    app.form.amount = 300;
    app.entry_field = EntryField::Submit;

    app.reset_form();
    assert_eq!(app.form.category, Category::Leisure);
    assert_eq!(app.form.payee_index, 0);
    assert_eq!(app.form.amount, 8_000);
    assert_eq!(app.entry_field, EntryField::Category);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn test_parse_quick_payment() {
    let (cat, payee, amount) = parse_quick_payment("食費 ライフ 8000").unwrap();
    assert_eq!(cat, Category::Food);
    assert_eq!(payee, "ライフ");
    assert_eq!(amount, 8000);

    let (cat, payee, amount) = parse_quick_payment("other corner shop 1,200").unwrap();
    assert_eq!(cat, Category::Other);
    assert_eq!(payee, "corner shop");
    assert_eq!(amount, 1200);
}

#[test]
fn test_parse_quick_payment_errors() {
    assert!(matches!(
        parse_quick_payment("rent 家賃 50000"),
        Err(LedgerError::UnknownCategory(c)) if c == "rent"
    ));
    assert!(matches!(
        parse_quick_payment("food ライフ"),
        Err(LedgerError::InvalidNumber(_))
    ));
}

#[test]
fn test_pay_command_records_and_refreshes() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("pay food ライフ 8000", &mut app, &mut ledger);
    assert_eq!(app.status_message, "[食費] ライフ: 8,000 yen paid");
    assert_eq!(app.view.remaining, 92_000);
}

#[test]
fn test_pay_command_duplicate_reported_inline() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("pay food ライフ 8000", &mut app, &mut ledger);
    handle_command("pay food ライフ 8000", &mut app, &mut ledger);
    assert_eq!(
        app.status_message,
        "Error: The same payment is already recorded"
    );
    assert_eq!(app.view.rows.len(), 1);
    assert!(app.running);
}

#[test]
fn test_pay_without_args_opens_form() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("p", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::Entry);
}

#[test]
fn test_goal_command() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("goal 12", &mut app, &mut ledger);
    assert_eq!(app.status_message, "Goal set to 120,000 yen");
    assert_eq!(app.view.goal, 120_000);
    assert_eq!(app.goal_input, 12);
}

#[test]
fn test_goal_command_equal_to_remaining() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("goal 10", &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Error: Goal unchanged"));
    assert_eq!(ledger.get_goal().unwrap(), 100_000);
}

#[test]
fn test_goal_command_out_of_range() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("goal 51", &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Error: Goal must be between"));
}

#[test]
fn test_goal_command_sees_payment_written_elsewhere() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    // Another writer records a payment after the view was loaded
    ledger
        .append_payment(today(), Category::Food, "ライフ", 50_000)
        .unwrap();
    assert_eq!(app.view.remaining, 100_000);

    handle_command("goal 5", &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Error: Goal unchanged: 50000"));
    assert_eq!(ledger.get_goal().unwrap(), 100_000);
    assert_eq!(app.view.remaining, 50_000);
}

#[test]
fn test_apply_goal_rereads_remaining() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    ledger
        .append_payment(today(), Category::Food, "ライフ", 50_000)
        .unwrap();

    assert!(matches!(
        app.apply_goal(&mut ledger, 5),
        Err(LedgerError::UnchangedGoal(50_000))
    ));
    assert_eq!(app.apply_goal(&mut ledger, 10).unwrap(), "Goal set to 100,000 yen");
    assert_eq!(app.view.remaining, 50_000);
}

#[test]
fn test_apply_goal_after_month_rollover() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    ledger
        .append_payment(today(), Category::Food, "ライフ", 50_000)
        .unwrap();
    app.refresh(&ledger).unwrap();
    assert_eq!(app.view.remaining, 50_000);

    // March's remaining no longer applies once the clock reaches April
    app.today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    assert_eq!(app.apply_goal(&mut ledger, 5).unwrap(), "Goal set to 50,000 yen");
    assert!(app.view.rows.is_empty());
    assert_eq!(app.view.remaining, 50_000);
}

#[test]
fn test_export_command_writes_file() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("pay food ライフ 8000", &mut app, &mut ledger);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("march.csv");
    handle_command(&format!("export {}", path.display()), &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Exported 1 payments"));
    assert!(path.exists());
}

#[test]
fn test_lock_and_quit_commands() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("lock", &mut app, &mut ledger);
    assert!(app.is_locked());

    handle_command("quit", &mut app, &mut ledger);
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests() {
    let mut ledger = ledger();
    let mut app = unlocked(&ledger);
    handle_command("histroy", &mut app, &mut ledger);
    assert_eq!(
        app.status_message,
        "Unknown command: :histroy. Did you mean :history?"
    );
}
