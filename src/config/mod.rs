use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    bills::DEFAULT_UPCOMING_LIMIT, errors::ConfigError, schedule::DEFAULT_MAX_CATCH_UP_DAYS,
};

const DEFAULT_DIR_NAME: &str = ".bucket_core";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "BUCKET_CORE_HOME";
const TMP_SUFFIX: &str = "tmp";

/// Upper bound for any stored day count: ten years.
pub const MAX_CONFIG_DAYS: u32 = 3660;

/// Tunables for the calculators. Every field falls back to its default when
/// missing from the stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Longest span a single catch-up may cover.
    #[serde(default = "CalculatorConfig::default_max_catch_up_days")]
    pub max_catch_up_days: u32,
    /// Trailing window, in days, for a giant's recent deposits.
    #[serde(default = "CalculatorConfig::default_payment_window_days")]
    pub payment_window_days: u32,
    #[serde(default = "CalculatorConfig::default_upcoming_bills_limit")]
    pub upcoming_bills_limit: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_catch_up_days: Self::default_max_catch_up_days(),
            payment_window_days: Self::default_payment_window_days(),
            upcoming_bills_limit: Self::default_upcoming_bills_limit(),
        }
    }
}

impl CalculatorConfig {
    fn default_max_catch_up_days() -> u32 {
        DEFAULT_MAX_CATCH_UP_DAYS
    }

    fn default_payment_window_days() -> u32 {
        7
    }

    fn default_upcoming_bills_limit() -> usize {
        DEFAULT_UPCOMING_LIMIT
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_catch_up_days == 0 {
            return Err(ConfigError::Invalid(
                "max_catch_up_days must be at least 1".into(),
            ));
        }
        if self.payment_window_days == 0 {
            return Err(ConfigError::Invalid(
                "payment_window_days must be at least 1".into(),
            ));
        }
        for (field, days) in [
            ("max_catch_up_days", self.max_catch_up_days),
            ("payment_window_days", self.payment_window_days),
        ] {
            if days > MAX_CONFIG_DAYS {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be at most {MAX_CONFIG_DAYS} (got {days})"
                )));
            }
        }
        Ok(())
    }
}

/// Loads and saves [`CalculatorConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `$BUCKET_CORE_HOME/config.json`, or
    /// `~/.bucket_core/config.json` when the variable is unset.
    pub fn new() -> Self {
        Self::with_path(app_data_dir().join(CONFIG_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored config, or the defaults when no file exists yet.
    pub fn load(&self) -> Result<CalculatorConfig, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(CalculatorConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: CalculatorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &CalculatorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
