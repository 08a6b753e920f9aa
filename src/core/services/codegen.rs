//! Source text of the virtual modules
//!
//! Every interpolated string goes through `serde_json` so it is a valid
//! JavaScript string literal. Table names become `export const` bindings and
//! must therefore be identifiers.

use std::fmt::Write as _;

use thiserror::Error;

use crate::core::models::TableBindings;

/// Errors produced while generating module source
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A value could not be serialized to JSON
    #[error("failed to serialize module value: {0}")]
    Json(#[from] serde_json::Error),

    /// A table name is not a JavaScript identifier
    #[error("table name '{0}' is not a valid identifier")]
    InvalidTableName(String),
}

/// Import specifiers of the database runtime package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeImports {
    /// Runtime entry (`<package>/runtime`)
    pub runtime: String,
    /// Runtime config entry (`<package>/runtime/config`)
    pub config: String,
}

impl RuntimeImports {
    /// Specifiers for a runtime package name
    #[must_use]
    pub fn for_package(package: &str) -> Self {
        Self {
            runtime: format!("{package}/runtime"),
            config: format!("{package}/runtime/config"),
        }
    }
}

impl Default for RuntimeImports {
    fn default() -> Self {
        Self::for_package("@astrojs/db")
    }
}

fn literal(value: &str) -> Result<String, CodegenError> {
    Ok(serde_json::to_string(value)?)
}

/// Module exposing a client for the local store at `db_url`
///
/// # Errors
///
/// Returns an error if a string cannot be encoded.
pub fn local_client_module(imports: &RuntimeImports, db_url: &str) -> Result<String, CodegenError> {
    Ok(format!(
        "import {{ createLocalDatabaseClient }} from {};\n\
         const dbUrl = {};\n\
         \n\
         export const db = createLocalDatabaseClient({{ dbUrl }});\n",
        literal(&imports.runtime)?,
        literal(db_url)?,
    ))
}

/// Module re-exporting the runtime config helpers; also the config line of
/// every public module
///
/// # Errors
///
/// Returns an error if a string cannot be encoded.
pub fn config_module(imports: &RuntimeImports) -> Result<String, CodegenError> {
    Ok(format!("export * from {}", literal(&imports.config)?))
}

/// Public module for local mode
///
/// `seed_globs` is non-empty only for the seeding variant; the seed files are
/// then imported eagerly so they run when the module is evaluated.
///
/// # Errors
///
/// Returns an error if a table name is not an identifier or a value cannot be
/// encoded.
pub fn local_public_module(
    imports: &RuntimeImports,
    local_client_id: &str,
    tables: &TableBindings,
    seed_globs: &[String],
) -> Result<String, CodegenError> {
    let mut source = format!(
        "import {{ asDrizzleTable }} from {};\n\
         import {{ db as _db }} from {};\n\
         \n\
         export const db = _db;\n\n",
        literal(&imports.runtime)?,
        literal(local_client_id)?,
    );
    if !seed_globs.is_empty() {
        let _ = writeln!(
            source,
            "import.meta.glob({}, {{ eager: true }});\n",
            serde_json::to_string(seed_globs)?
        );
    }
    let _ = writeln!(source, "{};\n", config_module(imports)?);
    source.push_str(&table_exports(tables)?);
    Ok(source)
}

/// Public module for managed mode
///
/// The remote URL can still be overridden at runtime through
/// `ASTRO_STUDIO_REMOTE_DB_URL`.
///
/// # Errors
///
/// Returns an error if a table name is not an identifier or a value cannot be
/// encoded.
pub fn managed_public_module(
    imports: &RuntimeImports,
    app_token: &str,
    remote_url: &str,
    tables: &TableBindings,
) -> Result<String, CodegenError> {
    let mut source = format!(
        "import {{ asDrizzleTable, createRemoteDatabaseClient }} from {};\n\
         \n\
         export const db = await createRemoteDatabaseClient({}, \
         import.meta.env.ASTRO_STUDIO_REMOTE_DB_URL ?? {});\n\
         \n\
         {};\n\n",
        literal(&imports.runtime)?,
        literal(app_token)?,
        literal(remote_url)?,
        config_module(imports)?,
    );
    source.push_str(&table_exports(tables)?);
    Ok(source)
}

/// One `export const` line per table, in name order
///
/// # Errors
///
/// Returns an error if a table name is not an identifier or a descriptor
/// cannot be encoded.
pub fn table_exports(tables: &TableBindings) -> Result<String, CodegenError> {
    let mut lines = Vec::with_capacity(tables.len());
    for (name, descriptor) in tables {
        if !is_identifier(name) {
            return Err(CodegenError::InvalidTableName(name.clone()));
        }
        lines.push(format!(
            "export const {name} = asDrizzleTable({}, {}, false)",
            literal(name)?,
            serde_json::to_string(descriptor)?
        ));
    }
    Ok(lines.join("\n"))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
