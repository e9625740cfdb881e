use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{PipelineError, PipelineResult, ProviderError};
use crate::models::coordinates::CoordinateSet;
use crate::prompt::{PromptTemplate, COORDINATES_PROMPT, ITINERARY_PROMPT};
use crate::providers::base::{Completion, Provider, Usage};
use crate::providers::configs::OpenAiProviderConfig;
use crate::providers::openai::OpenAiProvider;

/// Token usage for both stages of a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanUsage {
    pub itinerary: Usage,
    pub coordinates: Usage,
}

/// The outputs of a successful plan, exactly as the provider returned them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub itinerary: String,
    pub coordinates: String,
    #[serde(skip)]
    pub usage: PlanUsage,
}

impl Plan {
    /// Parse the coordinates text into its structured form
    pub fn coordinate_set(&self) -> Result<CoordinateSet, serde_json::Error> {
        CoordinateSet::parse(&self.coordinates)
    }
}

/// Agent turns a travel request into an itinerary, then into coordinates
pub struct Agent {
    provider: Box<dyn Provider>,
    strict_coordinates: bool,
}

impl Agent {
    /// Create a new Agent with the specified provider
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            strict_coordinates: false,
        }
    }

    /// Create an Agent backed by an OpenAI compatible endpoint
    pub fn from_config(config: OpenAiProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(Box::new(OpenAiProvider::new(config)?)))
    }

    /// Reject coordinates that do not parse as a [`CoordinateSet`]
    pub fn with_strict_coordinates(mut self, strict: bool) -> Self {
        self.strict_coordinates = strict;
        self
    }

    pub async fn plan(&self, request: &str) -> PipelineResult<Plan> {
        let itinerary = self.run_stage(&ITINERARY_PROMPT, request).await?;
        let coordinates = self.run_stage(&COORDINATES_PROMPT, &itinerary.text).await?;

        if self.strict_coordinates {
            CoordinateSet::parse(&coordinates.text).map_err(PipelineError::InvalidCoordinates)?;
        }

        Ok(Plan {
            itinerary: itinerary.text,
            coordinates: coordinates.text,
            usage: PlanUsage {
                itinerary: itinerary.usage,
                coordinates: coordinates.usage,
            },
        })
    }

    async fn run_stage(&self, template: &PromptTemplate, input: &str) -> PipelineResult<Completion> {
        let stage = template.stage;
        let prompt = template
            .render(input)
            .map_err(|source| PipelineError::Prompt { stage, source })?;

        info!(%stage, model = self.provider.model(), "requesting completion");
        let started = Instant::now();

        match self.provider.complete(prompt.system, &prompt.user).await {
            Ok(completion) => {
                info!(
                    %stage,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    chars = completion.text.len(),
                    "completion received"
                );
                debug!(
                    %stage,
                    input_tokens = ?completion.usage.input_tokens,
                    output_tokens = ?completion.usage.output_tokens,
                    total_tokens = ?completion.usage.total_tokens,
                    "token usage"
                );
                Ok(completion)
            }
            Err(source) => {
                warn!(%stage, error = %source, "completion failed");
                Err(PipelineError::Provider { stage, source })
            }
        }
    }
}
