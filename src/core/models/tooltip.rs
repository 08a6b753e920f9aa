//! Presentation data handed to the overlay layer

use serde::Serialize;

/// Action opening a source file in the user's editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorLink {
    /// Hint shown next to the link
    pub description: String,
    /// Dev server endpoint to request (fire-and-forget)
    pub href: String,
}

/// One section of a tooltip
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TooltipSection {
    /// Icon name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Escaped title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Escaped content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Click action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<EditorLink>,
}

/// Tooltip attached to an issue highlight
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Tooltip {
    /// Sections, top to bottom
    pub sections: Vec<TooltipSection>,
}

/// Entry of the audit list window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditCard {
    /// Rule code
    pub code: String,
    /// Truncated, escaped tag name of the element
    pub selector_name: String,
    /// Rule title
    pub title: String,
    /// Rule message (HTML)
    pub message: String,
    /// Optional description (HTML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
