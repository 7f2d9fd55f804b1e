use anyhow::Result;

use crate::cli_args::EnvArgs;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_NOTION_API_TOKEN: &str = "NOTION_API_TOKEN";
pub const ENV_NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";

const REQUIRED_VARS: [(&str, &str); 3] = [
    (ENV_OPENAI_API_KEY, "OpenAI API key (not needed for --dry-run)"),
    (ENV_NOTION_API_TOKEN, "Notion integration token"),
    (ENV_NOTION_DATABASE_ID, "Default database id (or pass --database)"),
];

/// Reads an environment variable, treating blank values as unset.
pub fn non_empty_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Prints the environment variables the tool reads. Values are never shown,
/// only whether each one is currently set.
pub fn execute_env_command(args: EnvArgs) -> Result<()> {
    for (name, description) in REQUIRED_VARS {
        if args.list {
            println!("{name}");
        } else {
            let state = if non_empty_env_var(name).is_some() {
                "set"
            } else {
                "unset"
            };
            println!("{name} ({state}): {description}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::non_empty_env_var;

    #[test]
    fn unit_blank_env_values_count_as_unset() {
        // Process-global env mutation stays inside this single test.
        std::env::set_var("LENS_TEST_BLANK_VAR", "   ");
        assert_eq!(non_empty_env_var("LENS_TEST_BLANK_VAR"), None);

        std::env::set_var("LENS_TEST_BLANK_VAR", "value");
        assert_eq!(
            non_empty_env_var("LENS_TEST_BLANK_VAR").as_deref(),
            Some("value")
        );
        std::env::remove_var("LENS_TEST_BLANK_VAR");
    }
}
