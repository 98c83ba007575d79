use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::ledger::AppLedger;
use crate::ui::app::{App, EditTarget, EntryField, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &mut AppLedger, config: &Config) -> Result<()> {
    let mut app = App::new(config.passphrase.clone(), config.today()?);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "terminal UI stopped");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut AppLedger,
    config: &Config,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.today = config.today()?;
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Passphrase => handle_passphrase_input(key, app, ledger),
                InputMode::Normal => handle_normal_input(key, app, ledger),
                InputMode::Command => handle_command_input(key, app, ledger),
                InputMode::Editing => handle_editing_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_passphrase_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) {
    match key.code {
        KeyCode::Enter => match app.try_unlock() {
            Ok(()) => {
                app.set_status("Unlocked");
                if let Err(e) = app.refresh(ledger) {
                    app.report(&e);
                }
            }
            Err(e) => app.set_status(e.to_string()),
        },
        KeyCode::Esc => app.running = false,
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.passphrase_input.clear();
        }
        KeyCode::Backspace => {
            app.passphrase_input.pop();
        }
        KeyCode::Char(c) => app.passphrase_input.push(c),
        _ => {}
    }
}

fn handle_normal_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::History),
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Entry),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, ledger, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev]);
        }
        _ => match app.screen {
            Screen::Dashboard => handle_dashboard_key(key, app, ledger),
            Screen::History => handle_history_key(key, app),
            Screen::Entry => handle_entry_key(key, app, ledger),
        },
    }
}

fn handle_dashboard_key(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) {
    match key.code {
        KeyCode::Char('+' | '=' | 'l') | KeyCode::Right | KeyCode::Up => app.adjust_goal_input(1),
        KeyCode::Char('-' | 'h') | KeyCode::Left | KeyCode::Down => app.adjust_goal_input(-1),
        KeyCode::Enter => {
            let man_yen = app.goal_input;
            match app.apply_goal(ledger, man_yen) {
                Ok(msg) => app.set_status(msg),
                Err(e) => {
                    app.report(&e);
                    app.goal_input = man_yen;
                }
            }
        }
        _ => {}
    }
}

fn handle_history_key(key: KeyEvent, app: &mut App) {
    let len = app.view.rows.len();
    let page = app.visible_rows;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.history_index, &mut app.history_scroll, len, page);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.history_index, &mut app.history_scroll);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_down(&mut app.history_index, &mut app.history_scroll, len, page);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_up(&mut app.history_index, &mut app.history_scroll);
            }
        }
        KeyCode::Char('g') | KeyCode::Home => {
            scroll_to_top(&mut app.history_index, &mut app.history_scroll);
        }
        KeyCode::Char('G') | KeyCode::End => {
            scroll_to_bottom(&mut app.history_index, &mut app.history_scroll, len, page);
        }
        _ => {}
    }
}

fn handle_entry_key(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) {
    let delta = match key.code {
        KeyCode::Char('l') | KeyCode::Right => 1,
        KeyCode::Char('h') | KeyCode::Left => -1,
        _ => 0,
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_entry_field(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_entry_field(-1),
        KeyCode::Char('l' | 'h') | KeyCode::Right | KeyCode::Left => match app.entry_field {
            EntryField::Category => app.form.cycle_category(delta),
            EntryField::Payee => app.form.cycle_payee(delta),
            EntryField::Amount => app.form.adjust_amount(i64::from(delta) * 100),
            EntryField::FreeText | EntryField::Submit => {}
        },
        KeyCode::Char('L') if app.entry_field == EntryField::Amount => app.form.adjust_amount(1_000),
        KeyCode::Char('H') if app.entry_field == EntryField::Amount => app.form.adjust_amount(-1_000),
        KeyCode::Enter => match app.entry_field {
            EntryField::Category | EntryField::Payee => app.move_entry_field(1),
            EntryField::FreeText => app.begin_edit(EditTarget::FreeText),
            EntryField::Amount => app.begin_edit(EditTarget::Amount),
            EntryField::Submit => submit_form(app, ledger),
        },
        _ => {}
    }
}

fn submit_form(app: &mut App, ledger: &mut AppLedger) {
    match app.form.submit(ledger, app.today) {
        Ok(receipt) => {
            app.set_status(receipt.message());
            app.reset_form();
            if let Err(e) = app.refresh(ledger) {
                app.report(&e);
            }
        }
        Err(e) => app.report(&e),
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_editing_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            if let Err(e) = app.commit_edit() {
                app.report(&e);
            }
        }
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.clear();
        }
        KeyCode::Char(c) => app.edit_buffer.push(c),
        _ => {}
    }
}

fn switch_screen(app: &mut App, ledger: &mut AppLedger, screen: Screen) {
    app.screen = screen;
    match app.refresh(ledger) {
        Ok(()) => app.set_status(format!("{screen}")),
        Err(e) => app.report(&e),
    }
}
