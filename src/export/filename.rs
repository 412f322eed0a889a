use std::sync::OnceLock;

use regex::Regex;

const PREFIX: &str = "activity_";
const FALLBACK: &str = "untitled";
/// Whole file name in bytes, well under the usual 255-byte limit.
const MAX_NAME_BYTES: usize = 200;

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // path separators, characters Windows reserves, control and format (bidi) characters
    RE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\p{Cc}\p{Cf}]+"#).expect("valid regex"))
}

/// Longest prefix of `text` that fits in `max` bytes, cut on a char boundary.
fn truncate_bytes(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn sanitize_within(title: &str, max_bytes: usize) -> String {
    let replaced = unsafe_chars().replace_all(title, "_");
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c: char| c == '.' || c == '_' || c.is_whitespace());
    let trimmed = truncate_bytes(trimmed, max_bytes).trim_end();

    if trimmed.is_empty() {
        FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Turns a title into a name safe for a single path component.
pub fn sanitize_title(title: &str) -> String {
    sanitize_within(title, MAX_NAME_BYTES - PREFIX.len())
}

/// `activity_<title>.<extension>`, at most 200 bytes long.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let budget = MAX_NAME_BYTES.saturating_sub(PREFIX.len() + 1 + extension.len());
    format!("{}{}.{}", PREFIX, sanitize_within(title, budget), extension)
}
