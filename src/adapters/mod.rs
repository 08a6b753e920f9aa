//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - [`snapshot`] - JSON page snapshots as a `Document`
//! - [`markers`] - In-memory `OverlayFactory`
//! - [`importer`] - Filesystem `ImporterResolver`
//! - [`store`] - JSON schema store as a `DatabaseClientFactory`
//! - [`toml`] - Rule and table definition files
//! - `editor` - Open-in-editor requests (`editor` feature)

#[cfg(feature = "editor")]
pub mod editor;
pub mod importer;
pub mod markers;
pub mod snapshot;
pub mod store;
pub mod toml;

pub use importer::FsImporterResolver;
pub use markers::{Marker, MarkerBoard};
pub use snapshot::{PageSnapshot, SnapshotDocument, SnapshotError};
pub use store::{JsonSchemaClient, JsonSchemaStore, StoredSchema};
