//! Shared test fixtures and port mocks
//!
//! - snapshot builders for audit tests
//! - [`RecordingFactory`] - database client factory recording every call
//! - [`StaticImporters`] - importer resolver backed by a fixed table

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use devbar::adapters::SnapshotDocument;
use devbar::core::models::{
    BuildMode, ColumnDescriptor, ColumnSchema, ColumnType, LateTables, TableBindings,
    TableDescriptor,
};
use devbar::core::ports::{DatabaseClient, DatabaseClientFactory, ImporterResolver, StoreLocator};
use devbar::core::services::{ModuleLoader, PluginSettings, RecreationLocks};
use serde_json::{Value, json};

// =============================================================================
// Snapshots
// =============================================================================

/// A rendered element with a 10x10 box
pub fn rendered(tag: &str, attributes: Value) -> Value {
    json!({ "tag": tag, "attributes": attributes, "rect": { "x": 0, "y": 0, "width": 10, "height": 10 } })
}

/// A rendered element hidden with `display: none`
pub fn hidden(tag: &str, attributes: Value) -> Value {
    json!({
        "tag": tag,
        "attributes": attributes,
        "rect": { "width": 10, "height": 10 },
        "style": { "display": "none" }
    })
}

/// A `<body>` document containing `children`
pub fn page(children: Vec<Value>) -> SnapshotDocument {
    SnapshotDocument::from_value(json!({
        "root": { "tag": "body", "rect": { "width": 1280, "height": 2000 }, "children": children }
    }))
    .unwrap()
}

// =============================================================================
// Database
// =============================================================================

/// Calls observed by a [`RecordingFactory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Create(PathBuf),
    RecreateStart(Vec<String>),
    RecreateEnd,
}

/// Factory whose clients record calls and optionally fail
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    pub events: Arc<Mutex<Vec<Event>>>,
    pub fail: bool,
}

impl RecordingFactory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn recreations(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::RecreateStart(_)))
            .count()
    }
}

#[derive(Debug)]
pub struct RecordingClient {
    events: Arc<Mutex<Vec<Event>>>,
    fail: bool,
}

impl DatabaseClientFactory for RecordingFactory {
    type Client = RecordingClient;

    fn create_client(&self, locator: &StoreLocator) -> anyhow::Result<Self::Client> {
        self.events.lock().unwrap().push(Event::Create(locator.path.clone()));
        Ok(RecordingClient {
            events: Arc::clone(&self.events),
            fail: self.fail,
        })
    }
}

impl DatabaseClient for RecordingClient {
    async fn recreate_schema(&self, tables: &TableBindings) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::RecreateStart(tables.keys().cloned().collect()));
        // Give a concurrent load the chance to interleave
        tokio::time::sleep(Duration::from_millis(5)).await;
        if self.fail {
            anyhow::bail!("disk full");
        }
        self.events.lock().unwrap().push(Event::RecreateEnd);
        Ok(())
    }
}

// =============================================================================
// Importers
// =============================================================================

/// Importer resolver answering from a fixed table and counting lookups
#[derive(Debug, Default)]
pub struct StaticImporters {
    paths: HashMap<String, PathBuf>,
    pub lookups: Cell<usize>,
}

impl StaticImporters {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            paths: entries
                .iter()
                .map(|(importer, path)| ((*importer).to_string(), PathBuf::from(path)))
                .collect(),
            lookups: Cell::new(0),
        }
    }
}

impl ImporterResolver for StaticImporters {
    async fn canonicalize(&self, importer: &str) -> Option<PathBuf> {
        self.lookups.set(self.lookups.get() + 1);
        self.paths.get(importer).cloned()
    }
}

impl ImporterResolver for &StaticImporters {
    async fn canonicalize(&self, importer: &str) -> Option<PathBuf> {
        (**self).canonicalize(importer).await
    }
}

// =============================================================================
// Projects
// =============================================================================

/// Settings of the project at `/project`
pub fn settings(mode: BuildMode) -> PluginSettings {
    PluginSettings::new("/project", "/project/src", "/project/.astro/content.db", mode)
}

/// Managed build mode with a fixed token
pub fn managed() -> BuildMode {
    BuildMode::Managed {
        app_token: "token-123".to_string(),
    }
}

/// Bindings with an `Author` table
pub fn author_tables() -> TableBindings {
    let mut table = TableDescriptor::default();
    table.columns.insert(
        "id".to_string(),
        ColumnDescriptor {
            kind: ColumnType::Number,
            schema: ColumnSchema {
                primary_key: true,
                ..ColumnSchema::default()
            },
        },
    );
    TableBindings::from([("Author".to_string(), table)])
}

/// Loader for `/project` with its own lock table
pub fn loader(mode: BuildMode, factory: RecordingFactory) -> ModuleLoader<RecordingFactory> {
    ModuleLoader::with_locks(
        settings(mode),
        LateTables::new(author_tables()),
        factory,
        RecreationLocks::default(),
    )
}

/// Seed file path of `/project`
pub fn seed_file() -> &'static Path {
    Path::new("/project/db/seed.ts")
}
