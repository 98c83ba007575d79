use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::actions;
use crate::budget::MonthlyView;
use crate::config::{Config, ENV_PASSPHRASE};
use crate::export::{shellexpand, write_month_csv};
use crate::ledger::{format_date, AppLedger, DATE_FORMAT};
use crate::models::{format_yen, Category};
use crate::session::Session;

pub(crate) fn as_cli(args: &[String], ledger: &mut AppLedger, config: &Config) -> Result<()> {
    let mut rest: Vec<String> = args[2..].to_vec();
    let passphrase = take_flag(&mut rest, "--passphrase");

    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("kakeibo {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let candidate = passphrase
        .or_else(|| std::env::var(ENV_PASSPHRASE).ok())
        .unwrap_or_default();
    let mut session = Session::default();
    session.authenticate(&candidate, &config.passphrase)?;

    let today = config.today()?;
    match args[1].as_str() {
        "summary" | "s" => cli_summary(ledger, today),
        "history" => cli_history(ledger, today),
        "pay" => cli_pay(rest, ledger, today),
        "goal" => cli_goal(&rest, ledger, today),
        "export" => cli_export(&rest, ledger, today),
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Kakeibo: monthly household spending against a goal");
    println!();
    println!("Usage: kakeibo [command] [--passphrase <passphrase>]");
    println!();
    println!("Commands:");
    println!("  (none)                            Launch interactive TUI");
    println!("  summary                           Goal, remaining and spend by category");
    println!("  history                           This month's payments with running balance");
    println!("  pay <category> <payee> <amount>   Record a payment");
    println!("    --date <YYYY-MM-DD>             Date of the payment (default: today)");
    println!("  goal <man-yen>                    Set the monthly goal (5-50 man-yen)");
    println!("  export [path]                     Export this month to CSV");
    println!("  --help, -h                        Show this help");
    println!("  --version, -V                     Show version");
    println!();
    let categories: Vec<String> = Category::all()
        .iter()
        .map(|c| format!("{} ({c})", c.as_str()))
        .collect();
    println!("Categories: {}", categories.join(", "));
    println!("The passphrase may also come from {ENV_PASSPHRASE}.");
}

/// Removes `name <value>` from `args` and returns the value.
fn take_flag(args: &mut Vec<String>, name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    args.remove(pos);
    (pos < args.len()).then(|| args.remove(pos))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT))
        .with_context(|| format!("Invalid date: {raw}. Use YYYY-MM-DD"))
}

fn summary_lines(view: &MonthlyView, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("Kakeibo: {}", today.format("%Y-%m")),
        "─".repeat(40),
        format!("  Goal:       {}", format_yen(view.goal)),
        format!("  Spent:      {}", format_yen(view.total_spent())),
        format!("  Remaining:  {}", format_yen(view.remaining)),
        format!("  Payments:   {}", view.rows.len()),
    ];

    if !view.by_category.is_empty() {
        let total = view.total_spent();
        lines.push(String::new());
        lines.push("Spending by Category:".into());
        for (category, spent) in &view.by_category {
            let share = if total > 0 {
                *spent as f64 * 100.0 / total as f64
            } else {
                0.0
            };
            lines.push(format!(
                "  {:<8} {:>14}  {share:>3.0}%",
                category.as_str(),
                format_yen(*spent)
            ));
        }
    }
    lines
}

fn history_lines(view: &MonthlyView) -> Vec<String> {
    view.rows
        .iter()
        .zip(&view.running_balance)
        .map(|(entry, balance)| {
            format!(
                "{}  {:<6} {:<16} {:>12} {:>14}",
                format_date(entry.date),
                entry.category.as_str(),
                entry.payee,
                entry.amount.map_or_else(|| "-".to_string(), format_yen),
                balance.map_or_else(|| "-".to_string(), format_yen),
            )
        })
        .collect()
}

fn cli_summary(ledger: &AppLedger, today: NaiveDate) -> Result<()> {
    let view = actions::load_month(ledger, today)?;
    for line in summary_lines(&view, today) {
        println!("{line}");
    }
    Ok(())
}

fn cli_history(ledger: &AppLedger, today: NaiveDate) -> Result<()> {
    let view = actions::load_month(ledger, today)?;
    if view.rows.is_empty() {
        println!("No payments for {}", today.format("%Y-%m"));
        return Ok(());
    }
    for line in history_lines(&view) {
        println!("{line}");
    }
    Ok(())
}

fn cli_pay(mut args: Vec<String>, ledger: &mut AppLedger, today: NaiveDate) -> Result<()> {
    let date = match take_flag(&mut args, "--date") {
        Some(raw) => parse_date(&raw)?,
        None => today,
    };
    if args.len() < 3 {
        anyhow::bail!("Usage: kakeibo pay <category> <payee> <amount> [--date YYYY-MM-DD]");
    }

    let category = Category::parse(&args[0])
        .ok_or_else(|| crate::errors::LedgerError::UnknownCategory(args[0].clone()))?;
    let amount = actions::parse_whole(&args[args.len() - 1])?;
    let payee = args[1..args.len() - 1].join(" ");

    let receipt = actions::submit_payment(ledger, date, category, &payee, amount)?;
    println!("{} (row {})", receipt.message(), receipt.row);
    Ok(())
}

fn cli_goal(args: &[String], ledger: &mut AppLedger, today: NaiveDate) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!(
            "Usage: kakeibo goal <man-yen> ({}-{})",
            actions::GOAL_MIN_MAN_YEN,
            actions::GOAL_MAX_MAN_YEN
        );
    };
    let man_yen = actions::parse_whole(raw)?;
    let remaining = actions::load_month(ledger, today)?.remaining;
    println!("{}", actions::change_goal(ledger, man_yen, remaining)?);
    Ok(())
}

fn cli_export(args: &[String], ledger: &AppLedger, today: NaiveDate) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/kakeibo-{}.csv", today.format("%Y-%m"))
        });

    let view = actions::load_month(ledger, today)?;
    let count = write_month_csv(&view, std::path::Path::new(&output_path))?;
    if count == 0 {
        println!("No payments for {}; wrote header to {output_path}", today.format("%Y-%m"));
    } else {
        println!("Exported {count} payments to {output_path}");
    }
    Ok(())
}
