//! devbar - Dev toolbar page audits and database virtual modules for web
//! framework dev servers
//!
//! This library provides two independent engines:
//!
//! - the audit engine, which runs a catalog of DOM rules against a page
//!   document and reports accessibility and performance issues
//! - the virtual module plugin, which resolves and synthesizes the database
//!   client modules handed to the bundler, seeding the local store on demand

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata,
    clippy::future_not_send
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod rules;
