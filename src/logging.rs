use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub(crate) const ENV_LOG: &str = "KAKEIBO_LOG";

/// Sends tracing output to `kakeibo.log` in `dir`. The terminal belongs to
/// the UI, so nothing is written to stdout or stderr.
pub(crate) fn init(dir: &Path) -> Result<()> {
    let path = dir.join("kakeibo.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("kakeibo=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kakeibo starting");
    Ok(())
}
