use std::sync::OnceLock;

use regex::Regex;

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("image pattern compiles"))
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[.*?\]\(.*?\)").expect("link pattern compiles"))
}

/// Strips token-heavy markup from a markdown body: fenced code blocks become
/// `[code]`, images `[image]`, links `[link]`.
///
/// Fences are collapsed first with a scanner rather than a multi-backtick
/// regex, so markup inside a fence is swallowed by the single `[code]`
/// placeholder instead of being rewritten twice, and adjacent fences on one
/// line cannot bleed into surrounding text. Images are collapsed before links
/// because every image literal also contains a link literal.
pub fn trim_links(text: &str) -> String {
    let trimmed = replace_code_fences(text);
    let trimmed = image_pattern().replace_all(&trimmed, "[image]");
    link_pattern().replace_all(&trimmed, "[link]").into_owned()
}

fn replace_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("```") {
        let after_open = &rest[start + 3..];
        // An unterminated fence is left untouched.
        let Some(end) = after_open.find("```") else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str("[code]");
        rest = &after_open[end + 3..];
    }
    out.push_str(rest);
    out
}
