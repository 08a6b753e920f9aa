//! TOML-backed definitions
//!
//! - [`rules`] - Extra audit rules and categories
//! - [`tables`] - Table bindings for the database virtual modules

pub mod rules;
pub mod tables;

pub use rules::{RuleFile, apply_rule_file, extend_catalog, find_rule_files, load_rule_file};
pub use tables::{load_tables, parse_tables};
