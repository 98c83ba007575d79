use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, EntryField, Screen};
use crate::actions;
use crate::errors::LedgerError;
use crate::export;
use crate::ledger::AppLedger;
use crate::models::{Category, Yen};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut AppLedger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Kakeibo", cmd_quit, r);
    register_command!("quit", "Quit Kakeibo", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("hist", "Go to payment History", cmd_history, r);
    register_command!("history", "Go to payment History", cmd_history, r);
    register_command!("p", "New payment (e.g. :p 食費 ライフ 8000)", cmd_pay, r);
    register_command!(
        "pay",
        "New payment; with args records it (e.g. :pay food ライフ 8000)",
        cmd_pay,
        r
    );
    register_command!("g", "Set monthly goal in man-yen (e.g. :g 12)", cmd_goal, r);
    register_command!(
        "goal",
        "Set monthly goal in man-yen (e.g. :goal 12)",
        cmd_goal,
        r
    );
    register_command!(
        "export",
        "Export this month to CSV (e.g. :export ~/march.csv)",
        cmd_export,
        r
    );
    register_command!("r", "Reload from the sheet", cmd_refresh, r);
    register_command!("refresh", "Reload from the sheet", cmd_refresh, r);
    register_command!("lock", "Lock the session", cmd_lock, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);

    r
});

/// Runs one `:` command. Failures end up in the status bar; the session
/// keeps going.
pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut AppLedger) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, ledger) {
            match e.downcast_ref::<LedgerError>() {
                Some(err) => app.report(err),
                None => {
                    tracing::error!(command = cmd_name, error = %format!("{e:#}"), "command failed");
                    app.set_status(format!("Error: {e:#}"));
                }
            }
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Splits `<category> <payee...> <amount>`. The payee may contain spaces.
pub(crate) fn parse_quick_payment(args: &str) -> Result<(Category, String, Yen), LedgerError> {
    let (category, rest) = args.trim().split_once(' ').unwrap_or((args.trim(), ""));
    let category =
        Category::parse(category).ok_or_else(|| LedgerError::UnknownCategory(category.to_string()))?;
    let (payee, amount) = rest.trim().rsplit_once(' ').unwrap_or(("", rest.trim()));
    let amount = actions::parse_whole(amount)?;
    Ok((category, payee.trim().to_string(), amount))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(ledger)?;
    Ok(())
}

fn cmd_history(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.screen = Screen::History;
    app.refresh(ledger)?;
    Ok(())
}

fn cmd_pay(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.screen = Screen::Entry;
        app.entry_field = EntryField::Category;
        return Ok(());
    }

    let (category, payee, amount) = parse_quick_payment(args)?;
    let receipt = actions::submit_payment(ledger, app.today, category, &payee, amount)?;
    app.refresh(ledger)?;
    app.set_status(receipt.message());
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Usage: :goal <man-yen> ({}-{})",
            actions::GOAL_MIN_MAN_YEN,
            actions::GOAL_MAX_MAN_YEN
        ));
        return Ok(());
    }

    let man_yen = actions::parse_whole(args)?;
    let msg = app.apply_goal(ledger, man_yen)?;
    app.set_status(msg);
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/kakeibo-{}.csv", app.today.format("%Y-%m"))
    } else {
        export::shellexpand(args)
    };

    app.refresh(ledger)?;
    let count = export::write_month_csv(&app.view, std::path::Path::new(&path))?;
    if count == 0 {
        app.set_status(format!("No payments this month; wrote header to {path}"));
    } else {
        app.set_status(format!("Exported {count} payments to {path}"));
    }
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.refresh(ledger)?;
    app.set_status(format!("Reloaded {} payments", app.view.rows.len()));
    Ok(())
}

fn cmd_lock(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.lock();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}
