use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by a completion provider. None of these are retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Request failed ({status}): {body}")]
    Request { status: u16, body: String },

    #[error("Input message too long. Message: {0}")]
    ContextLengthExceeded(String),

    #[error("OpenAI API error: {0}")]
    Api(String),

    #[error("No message content in completion response")]
    EmptyResponse,

    #[error("Invalid provider configuration: {0}")]
    Config(String),
}

/// One of the two sequential completions that make up a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Itinerary,
    Coordinates,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Itinerary => "itinerary",
            Stage::Coordinates => "coordinates",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plan failed at a specific stage. No partial output survives.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("stage={stage}: {source}")]
    Provider {
        stage: Stage,
        #[source]
        source: ProviderError,
    },

    #[error("stage={stage}: failed to render prompt: {source}")]
    Prompt {
        stage: Stage,
        #[source]
        source: tera::Error,
    },

    #[error("stage=coordinates: response is not a valid coordinate set: {0}")]
    InvalidCoordinates(#[source] serde_json::Error),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Provider { stage, .. } | PipelineError::Prompt { stage, .. } => *stage,
            PipelineError::InvalidCoordinates(_) => Stage::Coordinates,
        }
    }

    /// The provider failure behind this error, if there is one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            PipelineError::Provider { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
