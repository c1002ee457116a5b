use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TITLE: &str = "Hello, FastAPI and React /w Docker";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub app: AppConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout; the HTTP client default applies when unset.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub title: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::new_with_config("config/default")
    }

    pub fn new_with_config(config_path: &str) -> Result<Self, ConfigError> {
        Self::build(config_path, default_environment())
    }

    fn build(config_path: &str, environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("app.title", DEFAULT_TITLE)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }
}

// LOGIN_CLIENT__API__BASE_URL -> api.base_url
fn default_environment() -> Environment {
    Environment::with_prefix("LOGIN_CLIENT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
