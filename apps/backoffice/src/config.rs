//! # Back-Office Configuration
//!
//! Company letterhead, money formatting and export location.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ESTATE_COMPANY_NAME="Nile Estates"                                 │
//! │     ESTATE_CURRENCY=EGP   ESTATE_TAX_RATE=14   ESTATE_EXPORT_DIR=./out │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/backoffice/backoffice.toml (Linux)                       │
//! │     ~/Library/Application Support/com.estate.backoffice/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # backoffice.toml
//! [company]
//! name = "Nile Estates"
//! address_lines = ["90 Corniche El Nil", "Cairo"]
//!
//! [finance]
//! currency = "EGP"
//! decimals = 2
//! default_tax_rate = 15.0
//!
//! [export]
//! output_dir = "exports"
//! ```

use std::path::PathBuf;

use estate_core::money::TaxRate;
use estate_core::DEFAULT_TAX_RATE_PERCENT;
use estate_export::Letterhead;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

const CONFIG_FILE: &str = "backoffice.toml";
const MAX_DECIMALS: usize = 6;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    #[serde(default = "default_company_name")]
    pub name: String,

    #[serde(default)]
    pub address_lines: Vec<String>,
}

fn default_company_name() -> String {
    "Estate Back Office".to_string()
}

impl Default for CompanyConfig {
    fn default() -> Self {
        CompanyConfig {
            name: default_company_name(),
            address_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceConfig {
    /// ISO code printed in front of amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_decimals")]
    pub decimals: usize,

    /// Percent applied to invoices created without an explicit rate.
    #[serde(default = "default_tax_rate")]
    pub default_tax_rate: f64,
}

fn default_currency() -> String {
    "EGP".to_string()
}

fn default_decimals() -> usize {
    2
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE_PERCENT
}

impl Default for FinanceConfig {
    fn default() -> Self {
        FinanceConfig {
            currency: default_currency(),
            decimals: default_decimals(),
            default_tax_rate: default_tax_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where report and document files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: default_output_dir(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub company: CompanyConfig,

    #[serde(default)]
    pub finance: FinanceConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.company.name.trim().is_empty() {
            return Err(AppError::config("company.name must not be empty"));
        }

        if self.finance.currency.trim().is_empty() {
            return Err(AppError::config("finance.currency must not be empty"));
        }

        if self.finance.decimals > MAX_DECIMALS {
            return Err(AppError::config(format!(
                "finance.decimals must be at most {}, got {}",
                MAX_DECIMALS, self.finance.decimals
            )));
        }

        self.tax_rate()?;

        if self.export.output_dir.as_os_str().is_empty() {
            return Err(AppError::config("export.output_dir must not be empty"));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `ESTATE_*` overrides from `lookup`. Unparseable values are
    /// ignored with a warning.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("ESTATE_COMPANY_NAME") {
            debug!(name = %name, "Overriding company name from environment");
            self.company.name = name;
        }

        if let Some(currency) = lookup("ESTATE_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.finance.currency = currency;
        }

        if let Some(rate) = lookup("ESTATE_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(rate) => self.finance.default_tax_rate = rate,
                Err(_) => warn!(value = %rate, "Ignoring unparseable ESTATE_TAX_RATE"),
            }
        }

        if let Some(dir) = lookup("ESTATE_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.output_dir = PathBuf::from(dir);
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "estate", "backoffice")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured default tax rate.
    pub fn tax_rate(&self) -> AppResult<TaxRate> {
        TaxRate::new(self.finance.default_tax_rate)
            .map_err(|e| AppError::config(format!("finance.default_tax_rate: {}", e)))
    }

    pub fn letterhead(&self) -> Letterhead {
        Letterhead {
            company_name: self.company.name.clone(),
            address_lines: self.company.address_lines.clone(),
            currency: self.finance.currency.clone(),
            decimals: self.finance.decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.finance.currency, "EGP");
        assert_eq!(config.finance.decimals, 2);
        assert_eq!(config.finance.default_tax_rate, 15.0);
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[company]
name = "Nile Estates"
address_lines = ["90 Corniche El Nil", "Cairo"]

[finance]
default_tax_rate = 14.0
"#,
        )
        .unwrap();

        assert_eq!(config.company.name, "Nile Estates");
        assert_eq!(config.company.address_lines.len(), 2);
        assert_eq!(config.finance.default_tax_rate, 14.0);
        assert_eq!(config.finance.currency, "EGP");
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[finance]\ncurrency = \"USD\"\ndecimals = 3\n").unwrap();

        let mut config: AppConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        config.apply_overrides(env(&[]));

        assert_eq!(config.finance.currency, "USD");
        assert_eq!(config.finance.decimals, 3);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig::default();
        config.finance.currency = "USD".to_string();

        config.apply_overrides(env(&[
            ("ESTATE_COMPANY_NAME", "Delta Homes"),
            ("ESTATE_CURRENCY", "EGP"),
            ("ESTATE_TAX_RATE", "14"),
            ("ESTATE_EXPORT_DIR", "/tmp/out"),
        ]));

        assert_eq!(config.company.name, "Delta Homes");
        assert_eq!(config.finance.currency, "EGP");
        assert_eq!(config.finance.default_tax_rate, 14.0);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_bad_tax_rate_override_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[("ESTATE_TAX_RATE", "fifteen")]));
        assert_eq!(config.finance.default_tax_rate, 15.0);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();

        config.finance.default_tax_rate = 120.0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.finance.default_tax_rate = 15.0;
        config.company.name = "  ".to_string();
        assert!(config.validate().is_err());

        config.company.name = "Nile Estates".to_string();
        config.finance.decimals = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[finance\ncurrency = ").unwrap();

        let result = AppConfig::load(Some(path));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_letterhead() {
        let mut config = AppConfig::default();
        config.company.name = "Nile Estates".to_string();
        let letterhead = config.letterhead();
        assert_eq!(letterhead.company_name, "Nile Estates");
        assert_eq!(letterhead.currency, "EGP");
        assert_eq!(letterhead.decimals, 2);
    }
}
