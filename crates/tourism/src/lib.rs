//! Turn a free-text travel request into an itinerary and a set of map coordinates.
//!
//! An [`Agent`] asks an LLM for a bulleted itinerary, then asks it again to convert that
//! itinerary into JSON coordinates. Both outputs are returned as the provider produced them.
pub mod agent;
pub mod errors;
pub mod models;
pub mod prompt;
pub mod prompt_template;
pub mod providers;

pub use agent::{Agent, Plan, PlanUsage};
pub use errors::{PipelineError, ProviderError, Stage};
pub use models::coordinates::CoordinateSet;
pub use providers::configs::OpenAiProviderConfig;
