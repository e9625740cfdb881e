use std::collections::HashMap;

use tera::Error as TeraError;

use crate::errors::Stage;
use crate::prompt_template::load_prompt;

/// Fixed instructions plus a user message with a single substitution slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub stage: Stage,
    pub system: &'static str,
    user: &'static str,
    slot: &'static str,
}

/// A prompt ready to be sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: &'static str,
    pub user: String,
}

/// Turns a free-text request into a bulleted itinerary.
pub const ITINERARY_PROMPT: PromptTemplate = PromptTemplate {
    stage: Stage::Itinerary,
    system: include_str!("prompts/itinerary.md"),
    user: "#### {{ request }}",
    slot: "request",
};

/// Turns an itinerary into a JSON coordinate set. Carries one worked example.
pub const COORDINATES_PROMPT: PromptTemplate = PromptTemplate {
    stage: Stage::Coordinates,
    system: include_str!("prompts/coordinates.md"),
    user: "#### {{ itinerary }}",
    slot: "itinerary",
};

impl PromptTemplate {
    /// Name of the placeholder filled by [`PromptTemplate::render`].
    pub fn slot(&self) -> &'static str {
        self.slot
    }

    pub fn render(&self, value: &str) -> Result<RenderedPrompt, TeraError> {
        let mut context = HashMap::new();
        context.insert(self.slot, value);

        Ok(RenderedPrompt {
            system: self.system,
            user: load_prompt(self.user, &context)?,
        })
    }
}

pub fn itinerary_prompt(request: &str) -> Result<RenderedPrompt, TeraError> {
    ITINERARY_PROMPT.render(request)
}

pub fn coordinates_prompt(itinerary: &str) -> Result<RenderedPrompt, TeraError> {
    COORDINATES_PROMPT.render(itinerary)
}
