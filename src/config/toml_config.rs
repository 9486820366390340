use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{HomestayError, Result};
use crate::utils::validation::{
    validate_amount, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application settings. Every key is optional; an absent file means defaults.
///
/// ```toml
/// [ai]
/// endpoint = "https://generativelanguage.googleapis.com/v1beta"
/// model = "gemini-3-flash-preview"
/// api_key = "${GEMINI_API_KEY}"
/// timeout_seconds = 30
///
/// [booking]
/// default_nights = 5
/// cleaning_fee = 85
/// service_fee = 120
/// currency = "RM"
/// processing_delay_ms = 1500
/// success_linger_ms = 2000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub ai: AiConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    pub default_nights: Option<u32>,
    pub cleaning_fee: Option<f64>,
    pub service_fee: Option<f64>,
    pub currency: Option<String>,
    pub processing_delay_ms: Option<u64>,
    pub success_linger_ms: Option<u64>,
}

impl TomlConfig {
    /// Reads `path` when given, otherwise starts from defaults, then applies
    /// the API key environment fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_fallbacks();
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HomestayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HomestayError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_env_fallbacks(&mut self) {
        self.ai.api_key = pick_api_key(self.ai.api_key.take(), |name| std::env::var(name).ok());
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("ai.endpoint", self.ai_endpoint())?;
        validate_non_empty_string("ai.model", self.ai_model())?;
        validate_range("ai.timeout_seconds", self.ai_timeout().as_secs(), 1, 300)?;

        validate_positive_number("booking.default_nights", self.default_nights(), 1)?;
        validate_amount("booking.cleaning_fee", self.cleaning_fee())?;
        validate_amount("booking.service_fee", self.service_fee())?;
        validate_non_empty_string("booking.currency", self.currency())?;

        Ok(())
    }
}

/// A configured key wins unless it is blank or an unresolved `${...}` placeholder.
fn pick_api_key(
    configured: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let usable = |key: &str| {
        let key = key.trim();
        !key.is_empty() && !(key.starts_with("${") && key.ends_with('}'))
    };

    configured.filter(|k| usable(k)).or_else(|| {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .find(|k| usable(k))
    })
}

impl ConfigProvider for TomlConfig {
    fn ai_endpoint(&self) -> &str {
        self.ai.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn ai_model(&self) -> &str {
        self.ai.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn ai_api_key(&self) -> Option<&str> {
        self.ai.api_key.as_deref()
    }

    fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai.timeout_seconds.unwrap_or(30))
    }

    fn default_nights(&self) -> u32 {
        self.booking.default_nights.unwrap_or(5)
    }

    fn cleaning_fee(&self) -> f64 {
        self.booking.cleaning_fee.unwrap_or(85.0)
    }

    fn service_fee(&self) -> f64 {
        self.booking.service_fee.unwrap_or(120.0)
    }

    fn currency(&self) -> &str {
        self.booking.currency.as_deref().unwrap_or("RM")
    }

    fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.booking.processing_delay_ms.unwrap_or(1500))
    }

    fn success_linger(&self) -> Duration {
        Duration::from_millis(self.booking.success_linger_ms.unwrap_or(2000))
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
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.ai_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.ai_model(), "gemini-3-flash-preview");
        assert_eq!(config.default_nights(), 5);
        assert_eq!(config.cleaning_fee(), 85.0);
        assert_eq!(config.service_fee(), 120.0);
        assert_eq!(config.currency(), "RM");
        assert_eq!(config.processing_delay(), Duration::from_millis(1500));
        assert_eq!(config.success_linger(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[ai]
endpoint = "http://localhost:9000/v1beta"
model = "test-model"
api_key = "secret"
timeout_seconds = 10

[booking]
default_nights = 3
cleaning_fee = 50.0
service_fee = 0.0
currency = "USD"
processing_delay_ms = 0
success_linger_ms = 250
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.ai_model(), "test-model");
        assert_eq!(config.ai_api_key(), Some("secret"));
        assert_eq!(config.ai_timeout(), Duration::from_secs(10));
        assert_eq!(config.default_nights(), 3);
        assert_eq!(config.currency(), "USD");
        assert_eq!(config.processing_delay(), Duration::ZERO);
        assert_eq!(config.success_linger(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MYHOMESTAY_TEST_MODEL", "substituted-model");

        let config = TomlConfig::from_toml_str(
            r#"
[ai]
model = "${MYHOMESTAY_TEST_MODEL}"
"#,
        )
        .unwrap();
        assert_eq!(config.ai_model(), "substituted-model");

        std::env::remove_var("MYHOMESTAY_TEST_MODEL");
    }

    #[test]
    fn test_pick_api_key() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("from-env".to_string()),
            _ => None,
        };
        let no_env = |_: &str| None;

        assert_eq!(pick_api_key(Some("cfg".to_string()), env), Some("cfg".to_string()));
        assert_eq!(
            pick_api_key(Some("${GEMINI_API_KEY}".to_string()), env),
            Some("from-env".to_string())
        );
        assert_eq!(pick_api_key(Some("  ".to_string()), env), Some("from-env".to_string()));
        assert_eq!(pick_api_key(None, no_env), None);
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = TomlConfig::from_toml_str("[ai]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_endpoint.validate().is_err());

        let zero_nights =
            TomlConfig::from_toml_str("[booking]\ndefault_nights = 0\n").unwrap();
        assert!(zero_nights.validate().is_err());

        let negative_fee = TomlConfig::from_toml_str("[booking]\ncleaning_fee = -5.0\n").unwrap();
        assert!(negative_fee.validate().is_err());
    }

    #[test]
    fn test_non_finite_fees_are_rejected() {
        let nan_fee = TomlConfig::from_toml_str("[booking]\ncleaning_fee = nan\n").unwrap();
        assert!(nan_fee.cleaning_fee().is_nan());
        assert!(matches!(
            nan_fee.validate(),
            Err(HomestayError::InvalidConfigValueError { .. })
        ));

        let inf_fee = TomlConfig::from_toml_str("[booking]\nservice_fee = inf\n").unwrap();
        assert!(inf_fee.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[ai\nmodel = 1").unwrap_err();
        assert!(matches!(err, HomestayError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[booking]\ncurrency = \"SGD\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.currency(), "SGD");
    }
}
