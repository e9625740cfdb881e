//! These models represent the objects passed between the agent and the LLM
//!
//! - messages are the chat turns sent to an OpenAI compatible completion endpoint
//! - coordinates describe the structured output of the second stage, for callers that
//!   want to parse it
pub mod coordinates;
pub mod message;
