use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct SousChefConfig {
    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Enables test mode (canned reply, no API call)
    #[serde(default)]
    pub dev_mode: bool,
    /// Affiliate tag appended to product search links; links are only inserted when set
    pub affiliate_tag: Option<String>,
    /// Request timeout in seconds, for both completions and URL import
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for the completion provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider name ("openai", "anthropic")
    #[serde(default = "default_provider")]
    pub name: String,
    /// Model identifier (e.g., "gpt-4o")
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for SousChefConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            dev_mode: false,
            affiliate_tag: None,
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

impl SousChefConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SOUS_CHEF__ prefix
    /// 2. sous-chef.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SOUS_CHEF__PROVIDER__API_KEY.
    /// The plain `DEV_MODE=true` variable also turns on dev mode.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = load_config()?;
        if std::env::var("DEV_MODE").is_ok_and(|v| v == "true") {
            config.dev_mode = true;
        }
        Ok(config)
    }
}

/// Load configuration from `sous-chef.toml` and `SOUS_CHEF__*` environment variables
pub fn load_config() -> Result<SousChefConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("sous-chef").required(false))
        // Use double underscore for nested: SOUS_CHEF__PROVIDER__API_KEY
        .add_source(
            Environment::with_prefix("SOUS_CHEF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_model(), "gpt-4o");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_max_tokens(), 2000);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_config_default() {
        let config = SousChefConfig::default();
        assert!(!config.dev_mode);
        assert!(config.affiliate_tag.is_none());
        assert_eq!(config.provider.name, "openai");
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                dev_mode = true
                affiliate_tag = "chef-20"

                [provider]
                name = "anthropic"
                model = "claude-sonnet-4-5"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: SousChefConfig = settings.try_deserialize().unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.affiliate_tag.as_deref(), Some("chef-20"));
        assert_eq!(config.provider.name, "anthropic");
        assert_eq!(config.provider.model, "claude-sonnet-4-5");
        assert_eq!(config.provider.temperature, 0.7);
        assert_eq!(config.timeout, 30);
    }
}
