//! Tooltip and card presentation for issues

use std::fmt::Write as _;

use crate::core::models::{AuditCard, EditorLink, Issue, Tooltip, TooltipSection};

/// Dev server endpoint opening a file in the user's editor
pub const OPEN_IN_EDITOR_ENDPOINT: &str = "/__open-in-editor";

/// Maximum tag name length shown on a card
const SELECTOR_NAME_MAX: usize = 8;

/// Shorten `value` to at most `max_length` characters, ending with `&hellip;`
#[must_use]
pub fn truncate(value: &str, max_length: usize) -> String {
    shortened(value, max_length).map_or_else(|| value.to_string(), |kept| format!("{kept}&hellip;"))
}

/// The first `max_length - 1` characters when `value` is longer than `max_length`
fn shortened(value: &str, max_length: usize) -> Option<&str> {
    if value.chars().count() <= max_length {
        return None;
    }
    let end = value
        .char_indices()
        .nth(max_length.saturating_sub(1))
        .map_or(value.len(), |(index, _)| index);
    Some(&value[..end])
}

/// Escape text for inclusion in HTML
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent-encode like `encodeURIComponent`
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
        {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}

/// Editor link for a `file[:line:column]` string
///
/// The path must be absolute and clean or the dev server silently ignores it.
#[must_use]
pub fn editor_link(file_with_position: &str) -> EditorLink {
    EditorLink {
        description: "Click to go to file".to_string(),
        href: format!(
            "{OPEN_IN_EDITOR_ENDPOINT}?file={}",
            encode_uri_component(file_with_position)
        ),
    }
}

/// Path shown to the user: relative to `root`, keeping the leading slash
#[must_use]
pub fn display_path<'a>(file: &'a str, root: &str) -> &'a str {
    let base = root.trim_end_matches('/');
    if base.is_empty() {
        return file;
    }
    file.strip_prefix(base).filter(|rest| rest.starts_with('/')).unwrap_or(file)
}

/// Tooltip for an issue highlight
#[must_use]
pub fn build_tooltip(issue: &Issue, root: &str) -> Tooltip {
    let mut sections = vec![
        TooltipSection {
            icon: Some("warning".to_string()),
            title: Some(escape_html(&issue.rule.title)),
            ..TooltipSection::default()
        },
        TooltipSection {
            content: Some(escape_html(&issue.rule.message)),
            ..TooltipSection::default()
        },
    ];

    if let Some(source) = &issue.source {
        let file_with_position = source.file_with_position();
        sections.push(TooltipSection {
            content: Some(display_path(&file_with_position, root).to_string()),
            action: Some(editor_link(&file_with_position)),
            ..TooltipSection::default()
        });
    }

    Tooltip { sections }
}

/// Lower-cased tag name, shortened before escaping so no entity is cut in half
fn selector_name(tag_name: &str) -> String {
    let tag = tag_name.to_lowercase();
    match shortened(&tag, SELECTOR_NAME_MAX) {
        Some(kept) => format!("{}&hellip;", escape_html(kept)),
        None => escape_html(&tag),
    }
}

/// Card listing an issue in the audit window
#[must_use]
pub fn build_card(issue: &Issue) -> AuditCard {
    AuditCard {
        code: issue.rule.code.clone(),
        selector_name: selector_name(&issue.tag_name),
        title: issue.rule.title.clone(),
        message: issue.rule.message.clone(),
        description: issue.rule.description.clone(),
    }
}
