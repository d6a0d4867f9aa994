use config::{Config, ConfigError, File};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize, Clone)]
pub struct SakhiConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub history_limit: i64,
    pub facts_limit: i64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "llama3.3-70b".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            history_limit: 10,
            facts_limit: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// URL of the translation collaborator. Empty disables translation:
    /// every request degrades to the original text.
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8900,
        }
    }
}

/// Session verification wiring. With `static_token` set the server accepts
/// exactly that bearer for `static_user`; otherwise tokens are resolved
/// against the sessions table.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub static_token: Option<String>,
    #[serde(default)]
    pub static_user: Option<Uuid>,
}

impl SakhiConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_defaults_match_original_completion_params() {
        let cfg = AssistantConfig::default();
        assert_eq!(cfg.model, "llama3.3-70b");
        assert_eq!(cfg.max_tokens, 500);
        assert_eq!(cfg.history_limit, 10);
        assert_eq!(cfg.facts_limit, 5);
        assert!((cfg.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_http_defaults() {
        let cfg = HttpConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8900);
    }
}
