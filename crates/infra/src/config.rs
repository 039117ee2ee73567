//! Application configuration.
//!
//! Layers, lowest priority first: built-in defaults, an optional
//! `erpsuite.toml` file, then `ERPSUITE__*` environment variables
//! (`ERPSUITE__SERVER__PORT=9000` sets `server.port`). A `.env` file is
//! loaded into the environment first when present.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use erpsuite_core::money::DEFAULT_NB_DECIMAL_DIGITS;
pub use erpsuite_observability::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingConfig {
    pub nb_decimal_digits: u32,
    /// Company registered at startup and proposed on new moves.
    #[serde(default)]
    pub default_company: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub enabled: bool,
    /// Roles allowed to change budget keys. Empty means every role.
    pub authorized_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleConfig {
    /// Days after the order confirmation before loyalty points are acquired.
    pub loyalty_points_delay_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub accounting: AccountingConfig,
    pub budget: BudgetConfig,
    pub sale: SaleConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_loyalty_points_delay_days() -> u32 {
    15
}

fn default_jwt_secret() -> String {
    "dev-secret".to_string()
}

pub const ENV_PREFIX: &str = "ERPSUITE";
pub const CONFIG_FILE: &str = "erpsuite";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            auth: AuthConfig {
                jwt_secret: default_jwt_secret(),
            },
            logging: LoggingConfig::default(),
            accounting: AccountingConfig {
                nb_decimal_digits: DEFAULT_NB_DECIMAL_DIGITS,
                default_company: None,
                currency: default_currency(),
            },
            budget: BudgetConfig {
                enabled: true,
                authorized_roles: Vec::new(),
            },
            sale: SaleConfig {
                loyalty_points_delay_days: default_loyalty_points_delay_days(),
            },
        }
    }
}

impl AppConfig {
    /// Load from `.env`, `erpsuite.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load with an explicit file source on top of the defaults.
    pub fn load_from<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = AppConfig::default();
        let config = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("auth.jwt_secret", defaults.auth.jwt_secret)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", "json")?
            .set_default(
                "accounting.nb_decimal_digits",
                i64::from(defaults.accounting.nb_decimal_digits),
            )?
            .set_default("accounting.currency", defaults.accounting.currency)?
            .set_default("budget.enabled", defaults.budget.enabled)?
            .set_default("budget.authorized_roles", Vec::<String>::new())?
            .set_default(
                "sale.loyalty_points_delay_days",
                i64::from(defaults.sale.loyalty_points_delay_days),
            )?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("budget.authorized_roles")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must not be empty".into()));
        }
        if self.accounting.nb_decimal_digits > 10 {
            return Err(ConfigError::Invalid(
                "accounting.nb_decimal_digits must be at most 10".into(),
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_sources() {
        let config = AppConfig::load_from(config::File::from_str("", config::FileFormat::Toml)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.accounting.nb_decimal_digits, 2);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.budget.enabled);
        assert!(config.budget.authorized_roles.is_empty());
        assert_eq!(config.sale.loyalty_points_delay_days, 15);
    }

    #[test]
    fn file_overrides_defaults() {
        let toml = r#"
            [server]
            port = 9100

            [logging]
            format = "pretty"

            [accounting]
            default_company = "ACME"

            [budget]
            enabled = false
            authorized_roles = ["budget-manager"]

            [sale]
            loyalty_points_delay_days = 30
        "#;
        let config =
            AppConfig::load_from(config::File::from_str(toml, config::FileFormat::Toml)).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.accounting.default_company.as_deref(), Some("ACME"));
        assert_eq!(config.accounting.currency, "EUR");
        assert!(!config.budget.enabled);
        assert_eq!(config.budget.authorized_roles, vec!["budget-manager"]);
        assert_eq!(config.sale.loyalty_points_delay_days, 30);
        assert_eq!(config.bind_addr(), "0.0.0.0:9100");
    }

    #[test]
    fn blank_secret_is_rejected() {
        let toml = "[auth]\njwt_secret = \" \"";
        let err =
            AppConfig::load_from(config::File::from_str(toml, config::FileFormat::Toml)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
