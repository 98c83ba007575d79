mod actions;
mod budget;
mod config;
mod errors;
mod export;
mod ledger;
mod logging;
mod models;
mod run;
mod session;
mod store;
mod ui;

use anyhow::{Context, Result};

use config::{AppDirs, Config};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let dirs = AppDirs::discover()?;
    logging::init(&dirs.data_dir)?;

    let config = Config::load(&dirs.config_file())?.with_env(|key| std::env::var(key).ok());
    let mut ledger = open_ledger(&config, &dirs)?;

    match args.len() {
        1 => run::as_tui(&mut ledger, &config),
        2.. => run::as_cli(&args, &mut ledger, &config),
        _ => {
            eprintln!("Usage: kakeibo [command]");
            Ok(())
        }
    }
}

fn open_ledger(config: &Config, dirs: &AppDirs) -> Result<ledger::AppLedger> {
    let path = config.sheet_path_in(&dirs.data_dir);
    let sheet = store::SqliteWorksheet::open(&path, &config.worksheet)
        .with_context(|| format!("Failed to open ledger sheet: {}", path.display()))?;
    let mut ledger = ledger::Ledger::new(sheet, config.duplicate_policy);
    if ledger.init_layout()? {
        tracing::info!(sheet = %path.display(), "initialized empty ledger sheet");
    }
    Ok(ledger)
}
