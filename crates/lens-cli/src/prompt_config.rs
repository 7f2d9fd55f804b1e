use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use lens_core::write_text_atomic;

pub const DEFAULT_SUMMARY_CATEGORIES: [&str; 3] = ["Work", "Private", "Health"];
pub const DEFAULT_REFLECTION_GOALS: [&str; 1] = ["Not decided"];

/// The categories and goals fed into the prompt templates, persisted as a
/// small JSON file so they survive between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    #[serde(default)]
    pub summary_categories: Vec<String>,
    #[serde(default)]
    pub reflection_goals: Vec<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            summary_categories: DEFAULT_SUMMARY_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
            reflection_goals: DEFAULT_REFLECTION_GOALS
                .iter()
                .map(|goal| goal.to_string())
                .collect(),
        }
    }
}

impl PromptConfig {
    /// Loads the configuration, failing with a setup hint when the file does
    /// not exist yet.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "prompt configuration file not found: {}\n\nPlease run the prompt command first.\n$ notion-lens prompt",
                path.display()
            );
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.fill_defaults();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(self).context("failed to serialize prompt configuration")?;
        rendered.push('\n');
        write_text_atomic(path, &rendered)
    }

    /// Empty lists fall back to the stock categories/goals.
    pub fn fill_defaults(&mut self) {
        let defaults = Self::default();
        if self.summary_categories.is_empty() {
            self.summary_categories = defaults.summary_categories;
        }
        if self.reflection_goals.is_empty() {
            self.reflection_goals = defaults.reflection_goals;
        }
    }
}
