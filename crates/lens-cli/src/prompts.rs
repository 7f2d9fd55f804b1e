fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// System prompt for the category summary pass.
pub fn summary_prompt(categories: &[String]) -> String {
    format!(
        "Summarize your daily events.
- Reflect concisely on the following categories.
{}
- Keep it to about 2000 characters
- Do not include specific dates
- Do not omit events as much as possible
- Leave proper nouns
- Follow the format below
## {{Category}}
- {{Content}}
",
        bullet_list(categories)
    )
}

/// System prompt for the goal-oriented reflection pass.
pub fn reflection_prompt(goals: &[String]) -> String {
    format!(
        "You are my mentor. Reflect on your daily records to turn the PDCA cycle.
- Reflect on each goal
- The goals are as follows
{}
- {{Evaluation}} is a 5-point evaluation, please use the following emojis: \u{1F62D}\u{1F61E}\u{1F610}\u{1F60A}\u{1F606}
- Keep it to about 2000 characters
- Do not include specific dates
- Leave proper nouns
- Follow the format below
## {{Goal}}:{{Evaluation}}
**Good points**
- **{{Item}}**: {{Content}}
**Points for improvement**
- **{{Item}}**: {{Content}}",
        bullet_list(goals)
    )
}
