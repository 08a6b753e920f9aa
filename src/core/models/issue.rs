//! Audit issues
//!
//! An issue binds one element to the first rule that matched it during a
//! pass. Issues are rebuilt wholesale on every pass.

use serde::Serialize;

use super::{Rect, ResolvedRule};
use crate::core::ports::NodeId;

/// Where in the project source an element was authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Absolute source file path
    pub file: String,
    /// `line:column`, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
}

impl SourceLocation {
    /// `file` or `file:loc`
    #[must_use]
    pub fn file_with_position(&self) -> String {
        match &self.loc {
            Some(loc) => format!("{}:{loc}", self.file),
            None => self.file.clone(),
        }
    }
}

/// One rule-to-element match that survived visibility filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// The audited element
    pub node: NodeId,
    /// Code of the category the rule was declared in
    pub category: String,
    /// Rule text resolved against the element
    pub rule: ResolvedRule,
    /// Lower-cased tag name of the element
    pub tag_name: String,
    /// Bounding rectangle when the issue was created
    pub rect: Rect,
    /// Whether the element or an ancestor is fixed-positioned
    pub is_fixed: bool,
    /// Source location, when the dev server annotated the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
}

/// Outcome of the latest audit pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuditState {
    /// No pass has completed yet
    #[default]
    NotRun,
    /// The last pass found nothing
    NoIssues,
    /// The last pass found issues
    Issues {
        /// Number of issues
        count: usize,
    },
}

impl AuditState {
    /// State for a completed pass with `count` issues
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::NoIssues
        } else {
            Self::Issues { count }
        }
    }

    /// Number of issues (zero unless issues were found)
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Issues { count } => count,
            Self::NotRun | Self::NoIssues => 0,
        }
    }
}

impl std::fmt::Display for AuditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRun => write!(f, "not run"),
            Self::NoIssues => write!(f, "no issues"),
            Self::Issues { count } => write!(f, "{count} issue(s)"),
        }
    }
}
