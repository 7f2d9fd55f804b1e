use std::path::Path;

use anyhow::{bail, Context, Result};

use lens_ai::{OpenAiClient, OpenAiConfig};
use lens_core::ContentCache;
use lens_notion::{NotionClient, NotionConfig, NotionSerializer};

use crate::cli_args::RunArgs;
use crate::env_command::{non_empty_env_var, ENV_NOTION_API_TOKEN, ENV_OPENAI_API_KEY};
use crate::prompt_config::PromptConfig;
use crate::reflector::{GenerateOptions, Reflector};

/// Runs the serialization pipeline and, unless `--dry-run` is set, the
/// summary + reflection passes.
pub async fn execute_run_command(args: RunArgs) -> Result<()> {
    let Some(notion_api_key) = non_empty_env_var(ENV_NOTION_API_TOKEN) else {
        bail!("{ENV_NOTION_API_TOKEN} is not set");
    };
    let Some(database_id) = args.database.clone() else {
        bail!(
            "database id is not set. Please set the environment variable NOTION_DATABASE_ID or use the --database option."
        );
    };

    let client = NotionClient::new(NotionConfig {
        api_base: args.notion_api_base.clone(),
        api_key: notion_api_key,
        request_timeout_ms: args.request_timeout_ms,
    })?;
    let serializer = NotionSerializer::new(client, database_id)
        .with_cache(ContentCache::new(args.cache_dir.clone()));

    if args.dry_run {
        let contents = serializer.get_contents(args.from, args.to, args.force).await?;
        return write_output(args.output.as_deref(), &contents);
    }

    let Some(openai_api_key) = non_empty_env_var(ENV_OPENAI_API_KEY) else {
        bail!("{ENV_OPENAI_API_KEY} is not set");
    };
    let prompt_config = PromptConfig::load_required(&args.prompt_config)?;

    let llm = OpenAiClient::new(OpenAiConfig {
        api_base: args.openai_api_base.clone(),
        api_key: openai_api_key,
        request_timeout_ms: args.request_timeout_ms,
    })?;
    let reflector = Reflector::new(serializer, Box::new(llm), args.model.clone());

    let output = reflector
        .generate(GenerateOptions {
            from: args.from,
            to: args.to,
            force: args.force,
            summary_categories: prompt_config.summary_categories,
            reflection_goals: prompt_config.reflection_goals,
        })
        .await?;

    let rendered = render_result(&output.summary, &output.reflection);
    write_output(args.output.as_deref(), &rendered)
}

fn render_result(summary: &str, reflection: &str) -> String {
    format!("# \u{2B50} Summary\n{summary}\n\n# \u{1F9EA} Reflection\n{reflection}")
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Output to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
