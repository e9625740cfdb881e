use std::env;

use crate::errors::ProviderError;

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Connection and sampling settings for an OpenAI compatible endpoint.
///
/// Fixed for the lifetime of the provider built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key: api_key.into(),
            model: OPENAI_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: None,
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<i32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Load configuration from `OPENAI_*` environment variables
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = get_env("OPENAI_API_KEY", true)?.ok_or_else(|| {
            ProviderError::Config("OpenAI API key should be present".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Some(host) = get_env("OPENAI_HOST", false)? {
            config.host = host;
        }
        if let Some(model) = get_env("OPENAI_MODEL", false)? {
            config.model = model;
        }
        if let Some(temperature) = get_env("OPENAI_TEMPERATURE", false)? {
            let parsed = temperature.parse::<f32>().map_err(|_| {
                ProviderError::Config(format!(
                    "OPENAI_TEMPERATURE must be a number, got '{}'",
                    temperature
                ))
            })?;
            config.temperature = Some(parsed);
        }

        Ok(config)
    }
}

/// Read an environment variable, treating empty values as unset
fn get_env(key: &str, required: bool) -> Result<Option<String>, ProviderError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(Some(value)),
        Ok(_) | Err(env::VarError::NotPresent) if !required => Ok(None),
        Ok(_) | Err(env::VarError::NotPresent) => Err(ProviderError::Config(format!(
            "Environment variable '{}' is required but not set.",
            key
        ))),
        Err(e) => Err(ProviderError::Config(format!("{}: {}", key, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clean_env() {
        for key in [
            "OPENAI_API_KEY",
            "OPENAI_HOST",
            "OPENAI_MODEL",
            "OPENAI_TEMPERATURE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults() {
        let config = OpenAiProviderConfig::new("test-key");

        assert_eq!(config.host, "https://api.openai.com");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.temperature, Some(0.1));
        assert_eq!(config.max_tokens, None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = OpenAiProviderConfig::new("test-key")
            .with_host("http://localhost:8080")
            .with_model("gpt-4o")
            .with_temperature(None)
            .with_max_tokens(Some(512));

        assert_eq!(config.host, "http://localhost:8080");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, None);
        assert_eq!(config.max_tokens, Some(512));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clean_env();
        env::set_var("OPENAI_API_KEY", "env-key");
        env::set_var("OPENAI_MODEL", "gpt-4o-mini");
        env::set_var("OPENAI_TEMPERATURE", "0.5");

        let config = OpenAiProviderConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.host, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, Some(0.5));

        clean_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clean_env();

        let err = OpenAiProviderConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_temperature() {
        clean_env();
        env::set_var("OPENAI_API_KEY", "env-key");
        env::set_var("OPENAI_TEMPERATURE", "warm");

        let err = OpenAiProviderConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENAI_TEMPERATURE"));

        clean_env();
    }
}
