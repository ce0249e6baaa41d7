use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
///
/// Holds the Spoonacular credentials and endpoint settings used by the
/// classifier and resolver clients. Loaded explicitly and passed into the
/// clients at construction rather than read from ambient globals.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Spoonacular API key
    ///
    /// Not validated up front: a missing or empty key makes the remote calls
    /// fail, which triggers the fallback paths instead of an error.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the Spoonacular API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; no timeout is applied when unset
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPELENS__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPELENS__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPELENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Create a configuration with just an API key, keeping defaults otherwise
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}
