//! Table bindings
//!
//! Table name to schema descriptor mapping, supplied by the user's database
//! configuration. The plugin only stringifies descriptors into generated
//! source and hands them to the database client for schema recreation.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Table name to descriptor, ordered by name for deterministic output
pub type TableBindings = BTreeMap<String, TableDescriptor>;

/// Column types understood by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Text column
    Text,
    /// Numeric column
    Number,
    /// Boolean column
    Boolean,
    /// Date column
    Date,
    /// JSON column
    Json,
}

/// Per-column schema flags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    /// Column accepts nulls
    #[serde(default)]
    pub optional: bool,
    /// Column values are unique
    #[serde(default)]
    pub unique: bool,
    /// Column is the primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// `Table.column` this column references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

/// One column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column type
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Schema flags
    #[serde(default)]
    pub schema: ColumnSchema,
}

/// One index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Indexed columns
    pub on: Vec<String>,
    /// Unique index
    #[serde(default)]
    pub unique: bool,
}

/// Schema-like description of one table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Columns by name
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnDescriptor>,
    /// Indexes by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indexes: BTreeMap<String, IndexDescriptor>,
}

/// Table bindings read at load time rather than when the plugin is built
///
/// The database configuration can be reloaded while the dev server runs;
/// every load sees the latest bindings.
#[derive(Debug, Clone, Default)]
pub struct LateTables {
    inner: Arc<RwLock<TableBindings>>,
}

impl LateTables {
    /// Wrap an initial set of bindings
    #[must_use]
    pub fn new(tables: TableBindings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tables)),
        }
    }

    /// Snapshot of the current bindings
    #[must_use]
    pub fn get(&self) -> TableBindings {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the bindings
    pub fn set(&self, tables: TableBindings) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = tables;
    }
}
