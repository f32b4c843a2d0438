//! # Kiosk Configuration
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! ## Environment Variables
//! | Variable                 | Default                | Meaning                              |
//! |--------------------------|------------------------|--------------------------------------|
//! | `TORQUE_ASSET_ROOT`      | `.`                    | Directory image paths resolve under  |
//! | `TORQUE_CATALOG_PATH`    | platform config dir    | JSON catalog overriding the built-in |
//! | `TORQUE_PROBE_IMAGES`    | `true`                 | Check image files exist before use   |
//! | `TORQUE_LOAN_TERM`       | (unset → 60)           | Initial loan term input, months      |
//! | `TORQUE_INTEREST_RATE`   | (unset → 3)            | Initial interest rate input, %       |
//! | `TORQUE_DOWN_PAYMENT`    | (unset → 10)           | Initial down payment input, %        |
//!
//! When `TORQUE_CATALOG_PATH` is unset, `catalog.json` in the platform config
//! directory is used if present:
//! - **Linux**: `~/.config/torque-configurator/catalog.json`
//! - **macOS**: `~/Library/Application Support/com.torque.configurator/catalog.json`
//! - **Windows**: `%APPDATA%\torque\configurator\config\catalog.json`

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use torque_core::financing::RawLoanInputs;

/// Kiosk configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskConfig {
    /// Directory that catalog image paths are relative to.
    pub asset_root: PathBuf,

    /// Catalog file; `None` means the built-in catalog.
    pub catalog_path: Option<PathBuf>,

    /// When false every image is assumed to exist.
    pub probe_images: bool,

    /// Loan input values for the first render.
    pub initial_loan: RawLoanInputs,
}

impl Default for KioskConfig {
    fn default() -> Self {
        KioskConfig {
            asset_root: PathBuf::from("."),
            catalog_path: None,
            probe_images: true,
            initial_loan: RawLoanInputs::default(),
        }
    }
}

impl KioskConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = KioskConfig::from_vars(|key| env::var(key).ok())?;

        if config.catalog_path.is_none() {
            config.catalog_path = default_catalog_path().filter(|path| path.is_file());
        }

        Ok(config)
    }

    /// Builds a configuration from a variable lookup.
    ///
    /// Does not consult the platform config directory; `load` does that.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = KioskConfig::default();

        let probe_images = match lookup("TORQUE_PROBE_IMAGES") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidValue("TORQUE_PROBE_IMAGES".to_string()))?,
            None => defaults.probe_images,
        };

        Ok(KioskConfig {
            asset_root: lookup("TORQUE_ASSET_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_root),
            catalog_path: lookup("TORQUE_CATALOG_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            probe_images,
            initial_loan: RawLoanInputs {
                term_months: lookup("TORQUE_LOAN_TERM"),
                interest_rate: lookup("TORQUE_INTEREST_RATE"),
                down_payment_percentage: lookup("TORQUE_DOWN_PAYMENT"),
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `catalog.json` inside the platform config directory.
fn default_catalog_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "torque", "configurator")
        .map(|dirs| dirs.config_dir().join("catalog.json"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
