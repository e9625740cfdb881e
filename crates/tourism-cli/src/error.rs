use thiserror::Error;

pub const ENV_PREFIX: &str = "TOURISM";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: set {env_var} (or OPENAI_API_KEY for the api key)")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a settings field to the environment variable that supplies it
pub fn to_env_var(field: &str) -> String {
    format!("{}_{}", ENV_PREFIX, field.to_uppercase())
}
