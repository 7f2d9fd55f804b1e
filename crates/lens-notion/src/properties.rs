use serde::Deserialize;
use serde_json::Value;

use crate::client::NotionError;

#[derive(Debug, Clone, Deserialize)]
/// One run of Notion rich text; only the flattened plain text matters here.
pub struct RichTextItem {
    pub plain_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    pub start: String,
}

/// A typed Notion page property value.
///
/// The enum is closed on purpose: a property type this crate has never seen
/// fails deserialization instead of being silently dropped, so new Notion
/// types surface as explicit errors until a variant is added.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    Select { select: Option<SelectOption> },
    Status { status: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Date { date: Option<DateValue> },
    Checkbox { checkbox: bool },
    Rollup { rollup: Box<RollupValue> },
    Files,
    CreatedBy,
    CreatedTime,
    LastEditedBy,
    LastEditedTime,
    Formula,
    Button,
    UniqueId,
    Verification,
    People,
    Relation,
}

/// Rollup payloads either aggregate an array of property-shaped values or
/// wrap a single one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RollupValue {
    Array { array: Vec<PropertyValue> },
    Scalar(PropertyValue),
}

impl PropertyValue {
    /// Maps the property to its display text, or `None` when the property
    /// carries no value or its type is intentionally excluded from output.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Title { title } => Some(plain_text(title)),
            Self::RichText { rich_text } => Some(plain_text(rich_text)),
            Self::Number { number } => number.map(|value| format_number(value)),
            Self::Url { url } => url.clone(),
            Self::Email { email } => email.clone(),
            Self::PhoneNumber { phone_number } => phone_number.clone(),
            Self::Select { select } => select.as_ref().map(|option| option.name.clone()),
            Self::Status { status } => status.as_ref().map(|option| option.name.clone()),
            Self::MultiSelect { multi_select } => {
                if multi_select.is_empty() {
                    None
                } else {
                    Some(
                        multi_select
                            .iter()
                            .map(|option| option.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    )
                }
            }
            Self::Date { date } => date.as_ref().map(|value| value.start.clone()),
            Self::Checkbox { checkbox } => Some(if *checkbox { "Yes" } else { "No" }.to_string()),
            Self::Rollup { rollup } => rollup.render(),
            Self::Files
            | Self::CreatedBy
            | Self::CreatedTime
            | Self::LastEditedBy
            | Self::LastEditedTime
            | Self::Formula
            | Self::Button
            | Self::UniqueId
            | Self::Verification
            | Self::People
            | Self::Relation => None,
        }
    }
}

impl RollupValue {
    fn render(&self) -> Option<String> {
        match self {
            Self::Array { array } => {
                let rendered: Vec<String> =
                    array.iter().filter_map(PropertyValue::render).collect();
                if rendered.is_empty() {
                    None
                } else {
                    Some(rendered.join(", "))
                }
            }
            Self::Scalar(value) => value.render(),
        }
    }
}

fn plain_text(runs: &[RichTextItem]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}

fn format_number(value: f64) -> String {
    // 5.0 renders as "5", 5.5 as "5.5".
    format!("{value}")
}

/// Renders a page's property map to `"Name: value"` lines, dropping absent
/// values and sorting any line that starts with `Title` to the front. The
/// relative order of all other lines is left untouched.
pub fn render_property_lines(
    properties: &serde_json::Map<String, Value>,
) -> Result<Vec<String>, NotionError> {
    let mut lines = Vec::new();
    for (name, raw) in properties {
        let property: PropertyValue = serde_json::from_value(raw.clone())?;
        if let Some(value) = property.render() {
            lines.push(format!("{name}: {value}"));
        }
    }
    lines.sort_by(|a, b| {
        use std::cmp::Ordering;
        match (a.starts_with("Title"), b.starts_with("Title")) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    });
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_property_lines, PropertyValue};

    fn render(raw: serde_json::Value) -> Option<String> {
        let property: PropertyValue = serde_json::from_value(raw).expect("property parses");
        property.render()
    }

    #[test]
    fn unit_title_concatenates_rich_text_runs() {
        let rendered = render(json!({
            "type": "title",
            "title": [
                { "plain_text": "Hello" },
                { "plain_text": " World" }
            ]
        }));
        assert_eq!(rendered.as_deref(), Some("Hello World"));
    }

    #[test]
    fn unit_null_valued_properties_render_absent() {
        assert_eq!(render(json!({ "type": "select", "select": null })), None);
        assert_eq!(render(json!({ "type": "number", "number": null })), None);
        assert_eq!(render(json!({ "type": "url", "url": null })), None);
        assert_eq!(render(json!({ "type": "date", "date": null })), None);
        assert_eq!(
            render(json!({ "type": "multi_select", "multi_select": [] })),
            None
        );
    }

    #[test]
    fn unit_checkbox_renders_yes_or_no() {
        assert_eq!(
            render(json!({ "type": "checkbox", "checkbox": true })).as_deref(),
            Some("Yes")
        );
        assert_eq!(
            render(json!({ "type": "checkbox", "checkbox": false })).as_deref(),
            Some("No")
        );
    }

    #[test]
    fn unit_number_drops_trailing_zero_fraction() {
        assert_eq!(
            render(json!({ "type": "number", "number": 5.0 })).as_deref(),
            Some("5")
        );
        assert_eq!(
            render(json!({ "type": "number", "number": 5.5 })).as_deref(),
            Some("5.5")
        );
    }

    #[test]
    fn functional_multi_select_joins_option_names() {
        let rendered = render(json!({
            "type": "multi_select",
            "multi_select": [ { "name": "work" }, { "name": "health" } ]
        }));
        assert_eq!(rendered.as_deref(), Some("work, health"));
    }

    #[test]
    fn functional_rollup_array_drops_absent_elements() {
        let rendered = render(json!({
            "type": "rollup",
            "rollup": {
                "type": "array",
                "array": [
                    { "type": "select", "select": { "name": "kept" } },
                    { "type": "select", "select": null },
                    { "type": "number", "number": 3.0 }
                ]
            }
        }));
        assert_eq!(rendered.as_deref(), Some("kept, 3"));

        let all_absent = render(json!({
            "type": "rollup",
            "rollup": { "type": "array", "array": [ { "type": "select", "select": null } ] }
        }));
        assert_eq!(all_absent, None);
    }

    #[test]
    fn functional_rollup_scalar_renders_wrapped_value() {
        let rendered = render(json!({
            "type": "rollup",
            "rollup": { "type": "number", "number": 42.0 }
        }));
        assert_eq!(rendered.as_deref(), Some("42"));
    }

    #[test]
    fn unit_excluded_types_always_render_absent() {
        for raw in [
            json!({ "type": "files", "files": [] }),
            json!({ "type": "created_time", "created_time": "2024-01-01T00:00:00.000Z" }),
            json!({ "type": "people", "people": [] }),
            json!({ "type": "relation", "relation": [] }),
            json!({ "type": "formula", "formula": { "type": "string", "string": "x" } }),
        ] {
            assert_eq!(render(raw), None);
        }
    }

    #[test]
    fn regression_unknown_property_type_fails_to_parse() {
        let result: Result<PropertyValue, _> =
            serde_json::from_value(json!({ "type": "holographic", "holographic": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn functional_title_line_sorts_first_and_other_order_is_stable() {
        let properties = serde_json::from_value::<serde_json::Map<_, _>>(json!({
            "Mood": { "type": "select", "select": { "name": "calm" } },
            "Date": { "type": "date", "date": { "start": "2024-09-01" } },
            "Title": { "type": "title", "title": [ { "plain_text": "entry" } ] },
            "Done": { "type": "checkbox", "checkbox": true }
        }))
        .expect("property map parses");

        let lines = render_property_lines(&properties).expect("lines render");
        assert_eq!(
            lines,
            vec![
                "Title: entry".to_string(),
                "Mood: calm".to_string(),
                "Date: 2024-09-01".to_string(),
                "Done: Yes".to_string(),
            ]
        );
    }

    #[test]
    fn unit_absent_properties_leave_no_empty_lines() {
        let properties = serde_json::from_value::<serde_json::Map<_, _>>(json!({
            "Empty": { "type": "select", "select": null },
            "Kept": { "type": "rich_text", "rich_text": [ { "plain_text": "text" } ] }
        }))
        .expect("property map parses");

        let lines = render_property_lines(&properties).expect("lines render");
        assert_eq!(lines, vec!["Kept: text".to_string()]);
    }
}
