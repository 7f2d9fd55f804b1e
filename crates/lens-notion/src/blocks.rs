use serde::Deserialize;
use serde_json::Value;

/// One Notion content block, kept loosely typed.
///
/// Unlike page properties the block vocabulary is open here: an unknown block
/// type degrades to its rich text when it has any, and to nothing otherwise,
/// so new block types never break body rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(flatten)]
    payload: serde_json::Map<String, Value>,
}

impl Block {
    fn value(&self) -> Option<&Value> {
        self.payload.get(&self.block_type)
    }

    fn rich_text(&self) -> Option<String> {
        let runs = self.value()?.get("rich_text")?.as_array()?;
        Some(
            runs.iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect(),
        )
    }

    fn checked(&self) -> bool {
        self.value()
            .and_then(|value| value.get("checked"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn code_language(&self) -> &str {
        self.value()
            .and_then(|value| value.get("language"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    fn caption(&self) -> String {
        let runs = self
            .value()
            .and_then(|value| value.get("caption"))
            .and_then(Value::as_array);
        match runs {
            Some(runs) => runs
                .iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect(),
            None => String::new(),
        }
    }

    fn media_url(&self) -> Option<&str> {
        let value = self.value()?;
        if let Some(url) = value.get("url").and_then(Value::as_str) {
            return Some(url);
        }
        for source in ["external", "file"] {
            if let Some(url) = value
                .get(source)
                .and_then(|nested| nested.get("url"))
                .and_then(Value::as_str)
            {
                return Some(url);
            }
        }
        None
    }
}

/// Renders a page's blocks to markdown, one line per block, numbering
/// consecutive `numbered_list_item` runs.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut lines = Vec::with_capacity(blocks.len());
    let mut list_index = 0_usize;

    for block in blocks {
        if block.block_type == "numbered_list_item" {
            list_index += 1;
        } else {
            list_index = 0;
        }
        if let Some(line) = render_block(block, list_index) {
            lines.push(line);
        }
    }

    lines.join("\n")
}

fn render_block(block: &Block, list_index: usize) -> Option<String> {
    let text = block.rich_text().unwrap_or_default();
    match block.block_type.as_str() {
        "paragraph" => Some(text),
        "heading_1" => Some(format!("# {text}")),
        "heading_2" => Some(format!("## {text}")),
        "heading_3" => Some(format!("### {text}")),
        "bulleted_list_item" => Some(format!("- {text}")),
        "numbered_list_item" => Some(format!("{list_index}. {text}")),
        "to_do" => {
            let mark = if block.checked() { "x" } else { " " };
            Some(format!("- [{mark}] {text}"))
        }
        "quote" | "callout" => Some(format!("> {text}")),
        "code" => Some(format!("```{}\n{text}\n```", block.code_language())),
        "divider" => Some("---".to_string()),
        "image" => block
            .media_url()
            .map(|url| format!("![{}]({url})", block.caption())),
        "bookmark" | "embed" | "link_preview" => block
            .media_url()
            .map(|url| format!("[{}]({url})", block.caption())),
        _ => {
            let fallback = block.rich_text()?;
            if fallback.is_empty() {
                None
            } else {
                Some(fallback)
            }
        }
    }
}
