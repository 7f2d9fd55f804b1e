use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use lens_core::DateInput;

fn parse_date_arg(value: &str) -> Result<DateInput, String> {
    DateInput::parse(value).map_err(|error| error.to_string())
}

#[derive(Debug, Parser)]
#[command(
    name = "notion-lens",
    about = "Summarize and reflect on journal entries from a Notion database",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a summary and reflection based on Notion contents
    Run(RunArgs),
    /// Inspect or update the prompt configuration file
    Prompt(PromptArgs),
    /// Show the environment variables the tool needs
    Env(EnvArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(
        short = 'd',
        long = "database",
        env = "NOTION_DATABASE_ID",
        help = "Database id; falls back to the NOTION_DATABASE_ID environment variable"
    )]
    pub database: Option<String>,

    #[arg(
        short = 'f',
        long = "from",
        value_parser = parse_date_arg,
        help = "Start date (e.g. 2024-07-01); defaults to the first day of the current month"
    )]
    pub from: Option<DateInput>,

    #[arg(
        short = 't',
        long = "to",
        value_parser = parse_date_arg,
        help = "End date (e.g. 2024-07-31); defaults to the end of the start date's month"
    )]
    pub to: Option<DateInput>,

    #[arg(
        short = 'o',
        long = "output",
        help = "Output file path; standard output when omitted"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = false,
        help = "Fetch Notion contents without using the cache"
    )]
    pub force: bool,

    #[arg(
        long = "dry-run",
        default_value_t = false,
        help = "Print the serialized Notion contents without calling the model"
    )]
    pub dry_run: bool,

    #[arg(
        long,
        env = "LENS_MODEL",
        default_value = "chatgpt-4o-latest",
        help = "Chat model used for summary and reflection"
    )]
    pub model: String,

    #[arg(
        long = "notion-api-base",
        env = "LENS_NOTION_API_BASE",
        default_value = lens_notion::DEFAULT_NOTION_API_BASE,
        help = "Base URL for the Notion API"
    )]
    pub notion_api_base: String,

    #[arg(
        long = "openai-api-base",
        env = "LENS_OPENAI_API_BASE",
        default_value = lens_ai::DEFAULT_OPENAI_API_BASE,
        help = "Base URL for the OpenAI-compatible API"
    )]
    pub openai_api_base: String,

    #[arg(
        long = "cache-dir",
        env = "LENS_CACHE_DIR",
        default_value = ".cache",
        help = "Directory holding cached serialized contents"
    )]
    pub cache_dir: PathBuf,

    #[arg(
        long = "prompt-config",
        env = "LENS_PROMPT_CONFIG",
        default_value = "prompt/config.json",
        help = "Path of the prompt configuration file"
    )]
    pub prompt_config: PathBuf,

    #[arg(
        long = "request-timeout-ms",
        default_value_t = 60_000,
        help = "Per-request HTTP timeout in milliseconds"
    )]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Args)]
pub struct PromptArgs {
    #[arg(
        short = 'l',
        long,
        default_value_t = false,
        help = "Print the current prompt configuration"
    )]
    pub list: bool,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Summary categories to store (comma separated)"
    )]
    pub categories: Vec<String>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Reflection goals to store (comma separated)"
    )]
    pub goals: Vec<String>,

    #[arg(
        long = "prompt-config",
        env = "LENS_PROMPT_CONFIG",
        default_value = "prompt/config.json",
        help = "Path of the prompt configuration file"
    )]
    pub prompt_config: PathBuf,
}

#[derive(Debug, Args)]
pub struct EnvArgs {
    #[arg(
        short = 'l',
        long,
        default_value_t = false,
        help = "Print only the variable names"
    )]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn unit_run_arguments_parse_with_short_and_long_flags() {
        let cli = Cli::parse_from([
            "notion-lens",
            "run",
            "-d",
            "db-123",
            "--from",
            "2024-09-01",
            "-t",
            "2024-09-30",
            "--force",
            "--dry-run",
        ]);

        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.database.as_deref(), Some("db-123"));
        assert!(args.from.is_some());
        assert!(args.to.is_some());
        assert!(args.force);
        assert!(args.dry_run);
        assert_eq!(args.model, "chatgpt-4o-latest");
    }

    #[test]
    fn unit_invalid_date_argument_is_rejected() {
        let result = Cli::try_parse_from(["notion-lens", "run", "--from", "someday"]);
        assert!(result.is_err());
    }

    #[test]
    fn unit_prompt_lists_split_on_commas() {
        let cli = Cli::parse_from([
            "notion-lens",
            "prompt",
            "--categories",
            "Work, Private,Health",
            "--goals",
            "Sleep more",
        ]);

        let Command::Prompt(args) = cli.command else {
            panic!("expected prompt command");
        };
        assert_eq!(args.categories, vec!["Work", " Private", "Health"]);
        assert_eq!(args.goals, vec!["Sleep more"]);
    }
}
