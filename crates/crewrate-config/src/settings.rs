//! Layered settings for crewrate.
//!
//! [`Settings`] are resolved from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. `.crewrate/config.yaml`
//! 3. `CREWRATE_*` environment variables (`__` separates nested keys, so
//!    `CREWRATE_ESTIMATE__DEFAULT_MARKUP=25` sets `estimate.default-markup`)

use std::path::{Path, PathBuf};

use crewrate_core::ServiceType;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The merged configuration layers did not form valid settings.
    #[error("invalid configuration: {0}")]
    Extract(#[from] figment::Error),

    /// The `.crewrate/` directory was not found.
    #[error("no .crewrate directory found (run 'crewrate init' first)")]
    DirNotFound,

    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Name of the settings file inside `.crewrate/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

const ENV_PREFIX: &str = "CREWRATE_";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

fn default_fallback_rate() -> f64 {
    95.0
}

fn default_database() -> String {
    "rates.db".to_string()
}

fn default_markup() -> f64 {
    20.0
}

/// Estimate pricing section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EstimateSettings {
    /// Markup applied to material and equipment lines without their own.
    #[serde(default = "default_markup")]
    pub default_markup: f64,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        Self {
            default_markup: default_markup(),
        }
    }
}

/// The contents of `.crewrate/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Service used when a command is not given `--service`.
    #[serde(default)]
    pub default_service: ServiceType,

    /// Hourly rate billed when no rate has been computed for a service.
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: f64,

    /// Rate database path, relative to `.crewrate/` unless absolute.
    #[serde(default = "default_database")]
    pub database: String,

    /// Output JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub estimate: EstimateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_service: ServiceType::default(),
            fallback_rate: default_fallback_rate(),
            database: default_database(),
            json: false,
            estimate: EstimateSettings::default(),
        }
    }
}

impl Settings {
    /// Every settable key, in display order.
    pub const KEYS: &'static [&'static str] = &[
        "default-service",
        "fallback-rate",
        "database",
        "json",
        "estimate.default-markup",
    ];

    /// Rejects values no command can work with.
    pub fn validate(&self) -> Result<()> {
        check_amount("fallback-rate", self.fallback_rate)?;
        check_amount("estimate.default-markup", self.estimate.default_markup)?;
        if self.database.trim().is_empty() {
            return Err(invalid("database", "must not be empty"));
        }
        Ok(())
    }

    /// Resolves the database path against the `.crewrate/` directory.
    pub fn database_path(&self, crewrate_dir: &Path) -> PathBuf {
        let path = Path::new(&self.database);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            crewrate_dir.join(path)
        }
    }

    /// Returns the value of `key` as displayed by `config show`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "default-service" => self.default_service.to_string(),
            "fallback-rate" => self.fallback_rate.to_string(),
            "database" => self.database.clone(),
            "json" => self.json.to_string(),
            "estimate.default-markup" => self.estimate.default_markup.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// All keys with their current values.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect()
    }

    /// Parses `value` and assigns it to `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-service" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, "must not be empty"));
                }
                self.default_service = ServiceType::from(value);
            }
            "fallback-rate" => self.fallback_rate = parse_amount(key, value)?,
            "database" => self.database = value.to_string(),
            "json" => {
                self.json = value
                    .parse()
                    .map_err(|_| invalid(key, "expected true or false"))?;
            }
            "estimate.default-markup" => self.estimate.default_markup = parse_amount(key, value)?,
            _ => {
                return Err(invalid(
                    key,
                    format!("unknown key (expected one of: {})", Self::KEYS.join(", ")),
                ));
            }
        }
        self.validate()
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_amount(key: &str, value: &str) -> Result<f64> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid(key, format!("'{value}' is not a number")))?;
    check_amount(key, amount)?;
    Ok(amount)
}

fn check_amount(key: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(invalid(key, "must be a finite, non-negative number"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn figment(crewrate_dir: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(dir) = crewrate_dir {
        figment = figment.merge(Yaml::file(dir.join(CONFIG_FILE_NAME)));
    }
    figment.merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["dir"])
            .split("__")
            .map(|key| key.as_str().replace('_', "-").into()),
    )
}

/// Loads settings for the project in `crewrate_dir`, or defaults plus
/// environment when there is no project.
///
/// A missing or empty `config.yaml` contributes nothing.
pub fn load_settings(crewrate_dir: Option<&Path>) -> Result<Settings> {
    if let Some(dir) = crewrate_dir {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            // Surface YAML syntax errors with their line numbers.
            let content = std::fs::read_to_string(&path)?;
            if !content.trim().is_empty() {
                serde_yaml::from_str::<serde_yaml::Value>(&content)?;
            }
        }
    }

    let settings: Settings = figment(crewrate_dir).extract()?;
    settings.validate()?;
    Ok(settings)
}

/// Writes `settings` to `config.yaml` inside `crewrate_dir`.
pub fn save_settings(crewrate_dir: &Path, settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(crewrate_dir)?;
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(crewrate_dir.join(CONFIG_FILE_NAME), yaml)?;
    Ok(())
}
