//! Overlay port
//!
//! Creates the positioned markers highlighting audited elements. Rendering
//! and styling belong to the implementation; the core only creates,
//! positions, decorates and removes overlays.

use serde::Serialize;

use crate::core::models::{Rect, Tooltip};

/// Handle to one overlay created by an [`OverlayFactory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OverlayId(pub u64);

/// Factory for element highlights and their tooltips
#[cfg_attr(test, mockall::automock)]
pub trait OverlayFactory {
    /// Create a highlight covering `rect`, tagged with the rule code
    fn create(&mut self, rect: Rect, code: &str) -> OverlayId;

    /// Move an existing highlight
    fn position(&mut self, overlay: OverlayId, rect: Rect);

    /// Switch an existing highlight (and its tooltip) to fixed positioning
    fn set_fixed(&mut self, overlay: OverlayId);

    /// Attach a tooltip to an existing highlight
    fn attach_tooltip(&mut self, overlay: OverlayId, tooltip: &Tooltip);

    /// Release a highlight and its tooltip
    fn remove(&mut self, overlay: OverlayId);
}
