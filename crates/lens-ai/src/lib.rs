//! Chat-completion client used by the reflection pipeline.
mod openai;
mod types;

pub use openai::{OpenAiClient, OpenAiConfig, DEFAULT_OPENAI_API_BASE};
pub use types::{AiError, ChatRequest, ChatResponse, LlmClient};
