//! Runtime configuration read from the environment
//!
//! Binaries start from `RunConfig::from_env()` and let command-line flags
//! override individual fields.

use crate::catalog::{ProductLine, DEFAULT_CATALOG_PATH};
use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;

pub const CATALOG_PATH_VAR: &str = "UNDERWRITING_CATALOG_PATH";
pub const PRODUCT_LINE_VAR: &str = "UNDERWRITING_PRODUCT_LINE";

/// Product line assessed when none is configured
pub const DEFAULT_PRODUCT_LINE: ProductLine = ProductLine::Iul;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Directory holding the catalog CSV files
    pub catalog_path: PathBuf,
    pub product_line: ProductLine,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            product_line: DEFAULT_PRODUCT_LINE,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog_path = env::var(CATALOG_PATH_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let product_line = match env::var(PRODUCT_LINE_VAR) {
            Ok(value) if !value.trim().is_empty() => {
                value.parse::<ProductLine>().map_err(|_| ConfigError::InvalidProductLine {
                    var: PRODUCT_LINE_VAR,
                    value,
                })?
            }
            _ => DEFAULT_PRODUCT_LINE,
        };

        Ok(Self {
            catalog_path,
            product_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var(CATALOG_PATH_VAR);
        env::remove_var(PRODUCT_LINE_VAR);
    }

    #[test]
    fn test_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        assert_eq!(RunConfig::from_env(), Ok(RunConfig::default()));
    }

    #[test]
    fn test_reads_env_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(CATALOG_PATH_VAR, "/tmp/catalog");
        env::set_var(PRODUCT_LINE_VAR, "final expense");
        let config = RunConfig::from_env().expect("config loads");
        reset_env();
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/catalog"));
        assert_eq!(config.product_line, ProductLine::FinalExpense);
    }

    #[test]
    fn test_rejects_unknown_product_line() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(PRODUCT_LINE_VAR, "annuity");
        let result = RunConfig::from_env();
        reset_env();
        assert_eq!(
            result,
            Err(ConfigError::InvalidProductLine {
                var: PRODUCT_LINE_VAR,
                value: "annuity".to_string()
            })
        );
    }
}
