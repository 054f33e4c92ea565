use crate::pricing::{StorageTierTable, DEFAULT_MARKUP_PERCENTAGE};
use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let standard_tiers = match env::var_os("APP_STANDARD_TIER_TABLE") {
            Some(path) => load_tier_table(Path::new(&path))?,
            None => StorageTierTable::standard(),
        };
        let partner_tiers = match env::var_os("APP_PARTNER_TIER_TABLE") {
            Some(path) => load_tier_table(Path::new(&path))?,
            None => StorageTierTable::partner(),
        };

        let default_markup_percentage = match env::var("APP_DEFAULT_MARKUP_PCT") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(ConfigError::InvalidMarkup { value: raw })?,
            Err(_) => DEFAULT_MARKUP_PERCENTAGE,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            pricing: PricingConfig {
                standard_tiers,
                partner_tiers,
                default_markup_percentage,
            },
        })
    }
}

/// Tier tables and defaults handed to the pricing engine.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub standard_tiers: StorageTierTable,
    pub partner_tiers: StorageTierTable,
    pub default_markup_percentage: f64,
}

impl PricingConfig {
    pub fn tiers(&self, partner: bool) -> &StorageTierTable {
        if partner {
            &self.partner_tiers
        } else {
            &self.standard_tiers
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            standard_tiers: StorageTierTable::standard(),
            partner_tiers: StorageTierTable::partner(),
            default_markup_percentage: DEFAULT_MARKUP_PERCENTAGE,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn load_tier_table(path: &Path) -> Result<StorageTierTable, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::TierTableIo {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::TierTableFormat {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMarkup {
        value: String,
    },
    TierTableIo {
        path: PathBuf,
        source: std::io::Error,
    },
    TierTableFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMarkup { value } => {
                write!(f, "APP_DEFAULT_MARKUP_PCT must be a number, got '{value}'")
            }
            ConfigError::TierTableIo { path, .. } => {
                write!(f, "unable to read tier table {}", path.display())
            }
            ConfigError::TierTableFormat { path, source } => {
                write!(f, "invalid tier table {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidMarkup { .. } => None,
            ConfigError::TierTableIo { source, .. } => Some(source),
            ConfigError::TierTableFormat { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_STANDARD_TIER_TABLE");
        env::remove_var("APP_PARTNER_TIER_TABLE");
        env::remove_var("APP_DEFAULT_MARKUP_PCT");
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("gpu-quote-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("scratch file written");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.pricing.standard_tiers, StorageTierTable::standard());
        assert_eq!(config.pricing.tiers(true), &StorageTierTable::partner());
        assert_eq!(config.pricing.default_markup_percentage, 20.0);
    }

    #[test]
    fn rejects_non_numeric_markup() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEFAULT_MARKUP_PCT", "twenty");
        let err = AppConfig::load().expect_err("markup must be numeric");
        assert!(matches!(err, ConfigError::InvalidMarkup { .. }));
        reset_env();
    }

    #[test]
    fn tier_tables_can_be_overridden_from_json() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = scratch_file(
            "partner.json",
            r#"{
                "id": {"name": "partner", "version": 2},
                "tiers": [
                    {"label": "Flat", "sku": "FLAT", "min_tb": 1, "ceiling": {"kind": "unbounded"}, "cost_per_gb_month": 0.04}
                ]
            }"#,
        );
        env::set_var("APP_PARTNER_TIER_TABLE", &path);
        env::set_var("APP_ENV", "production");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.pricing.partner_tiers.id().version, 2);
        assert_eq!(config.pricing.partner_tiers.tiers().len(), 1);

        std::fs::remove_file(&path).ok();
        reset_env();
    }

    #[test]
    fn invalid_tier_table_is_reported_with_path() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = scratch_file(
            "gap.json",
            r#"{
                "id": {"name": "standard", "version": 9},
                "tiers": [
                    {"label": "A", "sku": "A", "min_tb": 1, "ceiling": {"kind": "inclusive", "tb": 10}, "cost_per_gb_month": 0.08},
                    {"label": "B", "sku": "B", "min_tb": 50, "ceiling": {"kind": "unbounded"}, "cost_per_gb_month": 0.05}
                ]
            }"#,
        );
        env::set_var("APP_STANDARD_TIER_TABLE", &path);

        let err = AppConfig::load().expect_err("gap is rejected");
        assert!(matches!(err, ConfigError::TierTableFormat { .. }));
        assert!(err.to_string().contains("fall between"));

        std::fs::remove_file(&path).ok();
        reset_env();
    }
}
