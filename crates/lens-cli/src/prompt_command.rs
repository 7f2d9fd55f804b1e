use anyhow::Result;

use crate::cli_args::PromptArgs;
use crate::prompt_config::PromptConfig;

fn cleaned(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Shows or updates the prompt configuration file.
pub fn execute_prompt_command(args: PromptArgs) -> Result<()> {
    if args.list {
        if args.prompt_config.exists() {
            let config = PromptConfig::load_required(&args.prompt_config)?;
            println!(
                "Current configuration:\n{}",
                serde_json::to_string_pretty(&config)?
            );
        } else {
            println!("{} does not exist.", args.prompt_config.display());
        }
        return Ok(());
    }

    let mut config = PromptConfig {
        summary_categories: cleaned(args.categories),
        reflection_goals: cleaned(args.goals),
    };
    config.fill_defaults();
    config.save(&args.prompt_config)?;
    println!("Wrote {}", args.prompt_config.display());
    Ok(())
}
