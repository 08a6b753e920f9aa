//! Core domain logic for devbar
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Rule, Category, Issue, Selector, `ModuleKind`, tables)
//! - `services/` - Audit passes and virtual module resolution
//! - `ports/` - Trait definitions for documents, overlays, importers and database clients

pub mod models;
pub mod ports;
pub mod services;
