//! Configuration loading and management

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "NL_SEARCH_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "0.0.0.0:8080")
    #[validate(length(min = 1))]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Completion service settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CompletionConfig {
    /// OpenAI-compatible chat completions URL
    #[validate(url)]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[validate(length(min = 1))]
    pub model: String,

    /// Inline API key; takes precedence over `api_key_env`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Per-request timeout
    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    #[validate(range(min = 1))]
    pub max_tokens: u32,

    /// Temperature for the filter-interpretation call
    #[validate(range(min = 0.0, max = 2.0))]
    pub interpret_temperature: f32,

    /// Temperature for the follow-up call
    #[validate(range(min = 0.0, max = 2.0))]
    pub followup_temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/v1/chat/completions".to_string(),
            model: "openai.gpt-oss-20b-1:0".to_string(),
            api_key: None,
            api_key_env: "NL_SEARCH_API_KEY".to_string(),
            timeout_secs: 60,
            max_tokens: 1024,
            interpret_temperature: 0.0,
            followup_temperature: 0.3,
        }
    }
}

impl CompletionConfig {
    /// Resolve the API key from the inline value or the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// A blank inline key falls through to the environment
    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let not_blank = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(not_blank)
            .or_else(|| lookup(&self.api_key_env).filter(not_blank))
    }
}

/// Order database settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    #[validate(range(min = 1))]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mysql://root@localhost:3306/orders".to_string(),
            max_connections: 5,
        }
    }
}

/// Search pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound for the best-effort follow-up call
    #[validate(range(min = 1))]
    pub followup_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            followup_timeout_ms: 15_000,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub completion: CompletionConfig,

    #[validate(nested)]
    pub database: DatabaseConfig,

    #[validate(nested)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Load from `NL_SEARCH_CONFIG` when set, defaults otherwise, then apply
    /// environment overrides
    pub fn from_env_or_default() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_yaml_file(&path)?
            }
            Err(_) => Self::default(),
        };
        config.apply_env_overrides();
        config.check()?;
        Ok(config)
    }

    /// Override selected values from the environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("NL_SEARCH_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(url) = lookup("NL_SEARCH_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(endpoint) = lookup("NL_SEARCH_COMPLETION_ENDPOINT") {
            self.completion.endpoint = endpoint;
        }
        if let Some(model) = lookup("NL_SEARCH_MODEL") {
            self.completion.model = model;
        }
    }

    /// Run field validation
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))
    }
}
