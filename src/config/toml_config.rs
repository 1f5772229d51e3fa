use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::adapters::simulated::DEFAULT_DELAY_MS;
use crate::core::pricing::PricingPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SellerError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub pricing: PricingPolicy,
    #[serde(default)]
    pub submitter: SubmitterConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitterConfig {
    /// Order-intake URL; publishing is simulated when absent.
    pub endpoint: Option<String>,
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth_token: None,
            timeout_seconds: default_timeout_seconds(),
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_simulated_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of offerings replacing the demo catalog.
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SellerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SellerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SellerError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.pricing.validate()?;

        if let Some(endpoint) = &self.submitter.endpoint {
            validate_url("submitter.endpoint", endpoint)?;
        }
        validate_positive_number("submitter.timeout_seconds", self.submitter.timeout_seconds, 1)?;

        if let Some(seed_file) = &self.catalog.seed_file {
            validate_path("catalog.seed_file", seed_file)?;
        }

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_lowercase().as_str()) {
                return Err(SellerError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn is_simulated(&self) -> bool {
        self.submitter.endpoint.is_none()
    }
}

impl ConfigProvider for TomlConfig {
    fn pricing_policy(&self) -> PricingPolicy {
        self.pricing
    }

    fn submitter_endpoint(&self) -> Option<&str> {
        self.submitter.endpoint.as_deref()
    }

    fn catalog_seed_file(&self) -> Option<&str> {
        self.catalog.seed_file.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::FeeRounding;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.pricing, PricingPolicy::default());
        assert!(config.is_simulated());
        assert_eq!(config.submitter.simulated_delay_ms, 900);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[pricing]
fee_rate = 0.05
tax_rate = 0.18
fee_floor = 0
rounding = "half_even"

[submitter]
endpoint = "https://orders.example.com/v1/orders"
timeout_seconds = 5
simulated_delay_ms = 10

[catalog]
seed_file = "offerings.json"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pricing.fee_rate, 0.05);
        assert_eq!(config.pricing.fee_floor, 0.0);
        assert_eq!(config.pricing.rounding, FeeRounding::HalfEven);
        assert_eq!(
            config.submitter_endpoint(),
            Some("https://orders.example.com/v1/orders")
        );
        assert_eq!(config.catalog_seed_file(), Some("offerings.json"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.is_simulated());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_pricing_keeps_other_defaults() {
        let config = TomlConfig::from_toml_str("[pricing]\nfee_rate = 0.02\n").unwrap();
        assert_eq!(config.pricing.fee_rate, 0.02);
        assert_eq!(config.pricing.tax_rate, 0.18);
        assert_eq!(config.pricing.rounding, FeeRounding::HalfUp);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ENERGY_SELLER_TEST_TOKEN", "secret-123");

        let toml_content = r#"
[submitter]
endpoint = "https://orders.example.com"
auth_token = "${ENERGY_SELLER_TEST_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.submitter.auth_token.as_deref(), Some("secret-123"));

        std::env::remove_var("ENERGY_SELLER_TEST_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[submitter]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_rate = TomlConfig::from_toml_str("[pricing]\ntax_rate = 2.5\n").unwrap();
        assert!(bad_rate.validate().is_err());

        let nan_rate = TomlConfig::from_toml_str("[pricing]\nfee_rate = nan\n").unwrap();
        assert!(nan_rate.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());

        let zero_timeout =
            TomlConfig::from_toml_str("[submitter]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());

        assert!(TomlConfig::from_toml_str("[pricing]\nrounding = \"sideways\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\nseed_file = \"catalog/offerings.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog_seed_file(), Some("catalog/offerings.json"));
    }
}
