use std::env;
use std::path::Path;

use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tourism::providers::configs::{DEFAULT_TEMPERATURE, OPENAI_HOST, OPENAI_MODEL};
use tourism::OpenAiProviderConfig;

/// Values given on the command line, which win over every other source
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    pub strict: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_key: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
    #[serde(default)]
    pub strict: bool,
}

impl Settings {
    /// Layer defaults, an optional TOML file, `TOURISM_*` variables and CLI overrides
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("host", default_host())?
            .set_default("model", default_model())?;

        // The conventional OpenAI variable is the weakest source for the key
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                builder = builder.set_default("api_key", api_key)?;
            }
        }

        if let Some(path) = file {
            builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .set_override_option("api_key", overrides.api_key.clone())?
            .set_override_option("host", overrides.host.clone())?
            .set_override_option("model", overrides.model.clone())?
            .set_override_option("temperature", overrides.temperature.map(f64::from))?
            .set_override_option("max_tokens", overrides.max_tokens.map(i64::from))?
            .set_override_option("strict", overrides.strict)?
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // "missing field `api_key`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }

    pub fn provider_config(&self) -> OpenAiProviderConfig {
        OpenAiProviderConfig::new(self.api_key.clone())
            .with_host(self.host.clone())
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

fn default_host() -> String {
    OPENAI_HOST.to_string()
}

fn default_model() -> String {
    OPENAI_MODEL.to_string()
}

fn default_temperature() -> Option<f32> {
    Some(DEFAULT_TEMPERATURE)
}
