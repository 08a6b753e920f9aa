//! Table definition files
//!
//! Table bindings declared in TOML, one top-level table per database table:
//!
//! ```toml
//! [Author.columns.id]
//! type = "number"
//! schema = { primaryKey = true }
//!
//! [Author.columns.name]
//! type = "text"
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::core::models::TableBindings;

/// Parse table bindings from TOML text
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or has the wrong shape.
pub fn parse_tables(content: &str) -> anyhow::Result<TableBindings> {
    Ok(toml::from_str(content)?)
}

/// Load table bindings; a missing file means no tables
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_tables(path: &Path) -> anyhow::Result<TableBindings> {
    if !path.exists() {
        return Ok(TableBindings::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tables file {}", path.display()))?;
    parse_tables(&content).with_context(|| format!("Failed to parse tables file {}", path.display()))
}
