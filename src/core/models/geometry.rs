//! Layout facts reported by a rendered document

use serde::{Deserialize, Serialize};

/// Bounding rectangle of an element, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    #[serde(default)]
    pub x: f64,
    /// Top edge
    #[serde(default)]
    pub y: f64,
    /// Width in CSS pixels
    #[serde(default)]
    pub width: f64,
    /// Height in CSS pixels
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Computed `display` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    /// `display: block`
    Block,
    /// `display: inline`
    #[default]
    Inline,
    /// `display: inline-block`
    InlineBlock,
    /// `display: flex`
    Flex,
    /// `display: grid`
    Grid,
    /// `display: contents`
    Contents,
    /// `display: none` - not rendered at all
    None,
    /// Any other value
    #[serde(other)]
    Other,
}

/// Computed `position` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// `position: static`
    #[default]
    Static,
    /// `position: relative`
    Relative,
    /// `position: absolute`
    Absolute,
    /// `position: fixed`
    Fixed,
    /// `position: sticky`
    Sticky,
}

/// The computed style properties the audit cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    /// Computed display
    #[serde(default)]
    pub display: Display,
    /// Computed position
    #[serde(default)]
    pub position: Position,
}
