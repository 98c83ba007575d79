use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ledger::DuplicatePolicy;

pub(crate) const ENV_PASSPHRASE: &str = "KAKEIBO_PASSPHRASE";
pub(crate) const ENV_SHEET: &str = "KAKEIBO_SHEET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Shared passphrase that unlocks the app. Empty means nobody gets in.
    pub(crate) passphrase: String,
    /// Ledger database; defaults to `kakeibo.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sheet_path: Option<PathBuf>,
    pub(crate) worksheet: String,
    /// Offset used to decide what "today" is.
    pub(crate) utc_offset_hours: i32,
    pub(crate) duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            passphrase: String::new(),
            sheet_path: None,
            worksheet: "金額表".into(),
            utc_offset_hours: 9,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Environment variables win over the file.
    pub(crate) fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(pass) = lookup(ENV_PASSPHRASE).filter(|v| !v.is_empty()) {
            self.passphrase = pass;
        }
        if let Some(sheet) = lookup(ENV_SHEET).filter(|v| !v.is_empty()) {
            self.sheet_path = Some(PathBuf::from(sheet));
        }
        self
    }

    pub(crate) fn sheet_path_in(&self, data_dir: &Path) -> PathBuf {
        self.sheet_path
            .clone()
            .unwrap_or_else(|| data_dir.join("kakeibo.db"))
    }

    fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .ok_or_else(|| anyhow::anyhow!("utc_offset_hours out of range: {}", self.utc_offset_hours))
    }

    pub(crate) fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.offset()?).date_naive())
    }
}

/// Platform directories for data (ledger, log) and config.
pub(crate) struct AppDirs {
    pub(crate) data_dir: PathBuf,
    pub(crate) config_dir: PathBuf,
}

impl AppDirs {
    pub(crate) fn discover() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "kakeibo", "Kakeibo")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let dirs = Self {
            data_dir: proj_dirs.data_dir().to_path_buf(),
            config_dir: proj_dirs.config_dir().to_path_buf(),
        };
        for dir in [&dirs.data_dir, &dirs.config_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(dirs)
    }

    pub(crate) fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}
