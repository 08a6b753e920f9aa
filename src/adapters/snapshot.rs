//! Page snapshot document
//!
//! Implements `Document` over a JSON capture of a rendered page: the element
//! tree with each element's layout box, computed style and image state, as
//! produced by the toolbar's capture script.
//!
//! ```json
//! {
//!   "url": "http://localhost:4321/",
//!   "viewport": { "width": 1280, "height": 720 },
//!   "root": {
//!     "tag": "body",
//!     "rect": { "x": 0, "y": 0, "width": 1280, "height": 2000 },
//!     "children": [
//!       { "tag": "img", "attributes": { "src": "/a.png" }, "complete": true }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{ComputedStyle, Display, Rect};
use crate::core::ports::{Document, NodeId};

/// Errors produced while reading a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read
    #[error("failed to read snapshot {}: {source}", path.display())]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON or has the wrong shape
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

const fn default_complete() -> bool {
    true
}

fn default_viewport() -> Rect {
    Rect::new(0.0, 0.0, 1280.0, 720.0)
}

/// One captured element
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotNode {
    /// Tag name
    pub tag: String,

    /// Attributes by name
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Text directly inside the element
    #[serde(default)]
    pub text: String,

    /// Layout box; absent when the element produced no box
    #[serde(default)]
    pub rect: Option<Rect>,

    /// Computed style
    #[serde(default)]
    pub style: ComputedStyle,

    /// Image finished loading (ignored for other elements)
    #[serde(default = "default_complete")]
    pub complete: bool,

    /// Child elements
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
}

/// A captured page
#[derive(Debug, Clone, Deserialize)]
pub struct PageSnapshot {
    /// Page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Visible viewport
    #[serde(default = "default_viewport")]
    pub viewport: Rect,

    /// Document element
    pub root: SnapshotNode,
}

#[derive(Debug)]
struct FlatNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    rect: Option<Rect>,
    style: ComputedStyle,
    complete: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    hidden: bool,
}

/// Snapshot flattened into an arena; node ids follow document order
#[derive(Debug)]
pub struct SnapshotDocument {
    url: Option<String>,
    viewport: Rect,
    nodes: Vec<FlatNode>,
}

impl SnapshotDocument {
    /// Build a document from a parsed snapshot
    #[must_use]
    pub fn new(snapshot: PageSnapshot) -> Self {
        let mut document = Self {
            url: snapshot.url,
            viewport: snapshot.viewport,
            nodes: Vec::new(),
        };
        document.push(snapshot.root, None, false);
        document
    }

    /// Parse a snapshot from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Build a snapshot from a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid snapshot.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        Ok(Self::new(serde_json::from_value(value)?))
    }

    /// Read a snapshot file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Page URL, if captured
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: SnapshotNode, parent: Option<NodeId>, parent_hidden: bool) -> NodeId {
        let id = self.nodes.len();
        let hidden = parent_hidden || node.style.display == Display::None;
        self.nodes.push(FlatNode {
            tag: node.tag.to_ascii_lowercase(),
            attributes: node
                .attributes
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            text: node.text,
            rect: node.rect,
            style: node.style,
            complete: node.complete,
            parent,
            children: Vec::new(),
            hidden,
        });

        for child in node.children {
            let child_id = self.push(child, Some(id), hidden);
            self.nodes[id].children.push(child_id);
        }
        id
    }
}

impl Document for SnapshotDocument {
    fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(0)
    }

    fn tag_name(&self, node: NodeId) -> &str {
        &self.nodes[node].tag
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node].attributes.get(name).map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node].children
    }

    fn own_text(&self, node: NodeId) -> &str {
        &self.nodes[node].text
    }

    fn layout_box(&self, node: NodeId) -> Option<Rect> {
        let node = &self.nodes[node];
        if node.hidden { None } else { node.rect }
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        self.nodes[node].style
    }

    fn image_complete(&self, node: NodeId) -> bool {
        let node = &self.nodes[node];
        node.tag != "img" || node.complete
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
