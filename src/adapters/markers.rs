//! In-memory overlay board
//!
//! Implements `OverlayFactory` by recording markers instead of drawing them.
//! The CLI serializes the board to show where highlights would appear.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::models::{Rect, Tooltip};
use crate::core::ports::{OverlayFactory, OverlayId};

/// A recorded highlight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Handle returned by the factory
    pub id: OverlayId,
    /// Rule code the highlight was created for
    pub code: String,
    /// Covered rectangle
    pub rect: Rect,
    /// Positioned relative to the viewport
    pub fixed: bool,
    /// Attached tooltip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

/// Overlay factory keeping its markers in memory
#[derive(Debug, Default)]
pub struct MarkerBoard {
    markers: BTreeMap<OverlayId, Marker>,
    next_id: u64,
}

impl MarkerBoard {
    /// Create an empty board
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live markers in creation order
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// A live marker
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    /// Number of live markers
    #[must_use]
    pub fn live(&self) -> usize {
        self.markers.len()
    }

    /// Number of markers ever created
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.next_id
    }
}

impl OverlayFactory for MarkerBoard {
    fn create(&mut self, rect: Rect, code: &str) -> OverlayId {
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.markers.insert(
            id,
            Marker {
                id,
                code: code.to_string(),
                rect,
                fixed: false,
                tooltip: None,
            },
        );
        id
    }

    fn position(&mut self, overlay: OverlayId, rect: Rect) {
        if let Some(marker) = self.markers.get_mut(&overlay) {
            marker.rect = rect;
        }
    }

    fn set_fixed(&mut self, overlay: OverlayId) {
        if let Some(marker) = self.markers.get_mut(&overlay) {
            marker.fixed = true;
        }
    }

    fn attach_tooltip(&mut self, overlay: OverlayId, tooltip: &Tooltip) {
        if let Some(marker) = self.markers.get_mut(&overlay) {
            marker.tooltip = Some(tooltip.clone());
        }
    }

    fn remove(&mut self, overlay: OverlayId) {
        self.markers.remove(&overlay);
    }
}
