//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (rendered pages, overlay UI, the filesystem,
//! database engines).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: Mock implementations for unit tests
//! - **Flexibility**: Swap implementations without changing business logic
//! - **Clarity**: Clear boundaries between layers

mod database;
mod document;
mod importer;
mod overlay;

pub use database::{DatabaseClient, DatabaseClientFactory, StoreLocator};
pub use document::{Document, Element, NodeId};
pub use importer::ImporterResolver;
#[cfg(test)]
pub use overlay::MockOverlayFactory;
pub use overlay::{OverlayFactory, OverlayId};
