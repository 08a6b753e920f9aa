//! Document port
//!
//! Read-only view of a rendered page: the element tree plus the layout facts
//! (layout box, computed style, image loading state) the audit needs.

use std::fmt;

use crate::core::models::{ComputedStyle, Position, Rect};

/// Index of an element within its document
pub type NodeId = usize;

/// A rendered document the audit engine can query
///
/// Tag and attribute names are expected in lower case.
pub trait Document {
    /// The document element, if the document has any content
    fn root(&self) -> Option<NodeId>;

    /// Lower-cased tag name of an element
    fn tag_name(&self, node: NodeId) -> &str;

    /// Value of an attribute, if present
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Parent element
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Child elements in document order
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Text directly owned by the element (not its descendants)
    fn own_text(&self, node: NodeId) -> &str;

    /// Layout box, or `None` when the element is not rendered
    fn layout_box(&self, node: NodeId) -> Option<Rect>;

    /// Computed style of the element
    fn computed_style(&self, node: NodeId) -> ComputedStyle;

    /// Whether an image element finished loading; `true` for non-images
    fn image_complete(&self, node: NodeId) -> bool;

    /// The visible viewport
    fn viewport(&self) -> Rect;

    /// Concatenated text of the element and all of its descendants
    fn text_content(&self, node: NodeId) -> String {
        let mut text = self.own_text(node).to_string();
        for &child in self.children(node) {
            text.push_str(&self.text_content(child));
        }
        text
    }
}

/// A cheap handle to one element of a document
#[derive(Clone, Copy)]
pub struct Element<'a> {
    document: &'a dyn Document,
    node: NodeId,
}

impl<'a> Element<'a> {
    /// Create a handle for `node` in `document`
    #[must_use]
    pub const fn new(document: &'a dyn Document, node: NodeId) -> Self {
        Self { document, node }
    }

    /// The element's node id
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The owning document
    #[must_use]
    pub const fn document(&self) -> &'a dyn Document {
        self.document
    }

    /// Lower-cased tag name
    #[must_use]
    pub fn tag_name(&self) -> &'a str {
        self.document.tag_name(self.node)
    }

    /// Whether the element has the given tag name
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    /// Attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.document.attribute(self.node, name)
    }

    /// Whether the attribute is present
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Parent element
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.document.parent(self.node).map(|node| Self::new(self.document, node))
    }

    /// Child elements in document order
    pub fn children(self) -> impl Iterator<Item = Self> + 'a {
        let document = self.document;
        document.children(self.node).iter().map(move |&node| Self::new(document, node))
    }

    /// First child element
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.children().next()
    }

    /// Concatenated descendant text
    #[must_use]
    pub fn text_content(&self) -> String {
        self.document.text_content(self.node)
    }

    /// Layout box, `None` when not rendered
    #[must_use]
    pub fn layout_box(&self) -> Option<Rect> {
        self.document.layout_box(self.node)
    }

    /// Computed style
    #[must_use]
    pub fn style(&self) -> ComputedStyle {
        self.document.computed_style(self.node)
    }

    /// Whether an image finished loading
    #[must_use]
    pub fn image_complete(&self) -> bool {
        self.document.image_complete(self.node)
    }

    /// Whether this element or one of its ancestors is fixed-positioned
    #[must_use]
    pub fn is_fixed_positioned(&self) -> bool {
        let mut current = Some(*self);
        while let Some(element) = current {
            if element.style().position == Position::Fixed {
                return true;
            }
            current = element.parent();
        }
        false
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("node", &self.node)
            .field("tag", &self.tag_name())
            .finish()
    }
}
