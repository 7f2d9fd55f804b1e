use anyhow::Result;

use lens_ai::{ChatRequest, ChatResponse, LlmClient};
use lens_core::DateInput;
use lens_notion::NotionSerializer;

use crate::prompts;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub from: Option<DateInput>,
    pub to: Option<DateInput>,
    pub force: bool,
    pub summary_categories: Vec<String>,
    pub reflection_goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionOutput {
    pub summary: String,
    pub reflection: String,
}

/// Runs the two-step pipeline: serialize Notion contents once, then generate
/// the summary and the reflection from the same document.
pub struct Reflector {
    serializer: NotionSerializer,
    llm: Box<dyn LlmClient>,
    model: String,
}

impl Reflector {
    pub fn new(serializer: NotionSerializer, llm: Box<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            serializer,
            llm,
            model: model.into(),
        }
    }

    pub async fn generate(&self, options: GenerateOptions) -> Result<ReflectionOutput> {
        let contents = self
            .serializer
            .get_contents(options.from, options.to, options.force)
            .await?;

        let summary_prompt = prompts::summary_prompt(&options.summary_categories);
        let reflection_prompt = prompts::reflection_prompt(&options.reflection_goals);

        // The two completions run in sequence, never concurrently, to bound
        // peak token usage.
        tracing::info!("generating summary");
        let summary = self.ask(&summary_prompt, &contents).await?;
        tracing::info!(total_tokens = summary.total_tokens, "summary generated");

        tracing::info!("generating reflection");
        let reflection = self.ask(&reflection_prompt, &contents).await?;
        tracing::info!(total_tokens = reflection.total_tokens, "reflection generated");

        Ok(ReflectionOutput {
            summary: summary.text,
            reflection: reflection.text,
        })
    }

    async fn ask(&self, prompt: &str, content: &str) -> Result<ChatResponse> {
        let response = self
            .llm
            .complete(ChatRequest {
                model: self.model.clone(),
                temperature: 0.0,
                system_prompt: prompt.to_string(),
                user_content: content.to_string(),
            })
            .await?;
        Ok(response)
    }
}
