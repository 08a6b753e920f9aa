//! Tests for module loading and schema recreation

use std::path::{Path, PathBuf};

use devbar::core::models::{BuildMode, LateTables, TableBindings, TableDescriptor};
use devbar::core::services::{LoadError, ModuleLoader, RecreationLocks};

use crate::common::{
    Event, RecordingFactory, author_tables, loader, managed, seed_file, settings,
};

fn store() -> PathBuf {
    PathBuf::from("/project/.astro/content.db")
}

fn seed_id() -> &'static str {
    seed_file().to_str().unwrap()
}

// =============================================================================
// SEED FILES
// =============================================================================

#[tokio::test]
async fn test_seed_file_recreates_tables_once_before_returning() {
    let factory = RecordingFactory::default();
    let loader = loader(BuildMode::Local, factory.clone());

    let source = loader.load(seed_id()).await.unwrap();

    assert_eq!(source, None);
    assert_eq!(
        factory.events(),
        [
            Event::Create(store()),
            Event::RecreateStart(vec!["Author".to_string()]),
            Event::RecreateEnd,
        ]
    );
}

#[tokio::test]
async fn test_every_seed_extension_triggers_recreation() {
    let factory = RecordingFactory::default();
    let loader = loader(BuildMode::Local, factory.clone());

    for name in ["seed.ts", "seed.js", "seed.mjs", "seed.mts"] {
        let id = Path::new("/project/db").join(name);
        loader.load(id.to_str().unwrap()).await.unwrap();
    }

    assert_eq!(factory.recreations(), 4);
}

#[tokio::test]
async fn test_other_files_are_left_to_the_bundler() {
    let factory = RecordingFactory::default();
    let loader = loader(BuildMode::Local, factory.clone());

    for id in ["/project/src/pages/index.astro", "/project/db/seed.json", "/other/db/seed.ts"] {
        assert_eq!(loader.load(id).await.unwrap(), None, "id {id}");
    }
    assert!(factory.events().is_empty());
}

#[tokio::test]
async fn test_failed_recreation_surfaces_store_path() {
    let loader = loader(BuildMode::Local, RecordingFactory::failing());

    let err = loader.load(seed_id()).await.unwrap_err();

    match err {
        LoadError::Recreation { path, source } => {
            assert_eq!(path, store());
            assert_eq!(source.to_string(), "disk full");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// VIRTUAL MODULES
// =============================================================================

#[tokio::test]
async fn test_virtual_modules_never_recreate() {
    let factory = RecordingFactory::default();
    let loader = loader(BuildMode::Local, factory.clone());

    for id in ["\0astro:local", "\0astro:db", "\0astro:db:seed"] {
        assert!(loader.load(id).await.unwrap().is_some(), "id {id:?}");
    }
    assert!(factory.events().is_empty());
}

#[tokio::test]
async fn test_local_client_points_at_store() {
    let loader = loader(BuildMode::Local, RecordingFactory::default());

    let source = loader.load("\0astro:local").await.unwrap().unwrap();

    assert!(source.contains("const dbUrl = \"file:///project/.astro/content.db\";"));
}

#[tokio::test]
async fn test_only_seed_variant_imports_seed_files() {
    let loader = loader(BuildMode::Local, RecordingFactory::default());

    let seeded = loader.load("\0astro:db:seed").await.unwrap().unwrap();
    let public = loader.load("\0astro:db").await.unwrap().unwrap();

    assert!(seeded.contains(
        r#"import.meta.glob(["/db/seed.ts","/db/seed.js","/db/seed.mjs","/db/seed.mts"], { eager: true });"#
    ));
    assert!(!public.contains("import.meta.glob"));
    for source in [&seeded, &public] {
        assert!(source.contains("import { db as _db } from \"astro:local\";"));
        assert!(source.contains("export const Author = asDrizzleTable(\"Author\""));
    }
}

#[tokio::test]
async fn test_managed_mode_uses_remote_client() {
    let loader = loader(managed(), RecordingFactory::default());

    let source = loader.load("\0astro:db:seed").await.unwrap().unwrap();

    assert!(source.contains("createRemoteDatabaseClient(\"token-123\""));
    assert!(source.contains("\"https://db.services.astro.build\""));
    assert!(!source.contains("import.meta.glob"));
    assert!(!source.contains("astro:local"));
}

#[tokio::test]
async fn test_invalid_table_name_fails_generation() {
    let tables = LateTables::new(TableBindings::from([("not-valid".to_string(), TableDescriptor::default())]));
    let loader = ModuleLoader::with_locks(
        settings(BuildMode::Local),
        tables,
        RecordingFactory::default(),
        RecreationLocks::default(),
    );

    assert!(matches!(loader.load("\0astro:db").await, Err(LoadError::Codegen(_))));
}

// =============================================================================
// LATE TABLES
// =============================================================================

#[tokio::test]
async fn test_loads_see_table_updates() {
    let factory = RecordingFactory::default();
    let tables = LateTables::new(author_tables());
    let loader = ModuleLoader::with_locks(
        settings(BuildMode::Local),
        tables.clone(),
        factory.clone(),
        RecreationLocks::default(),
    );

    tables.set(TableBindings::from([("Comment".to_string(), TableDescriptor::default())]));

    let source = loader.load("\0astro:db").await.unwrap().unwrap();
    assert!(source.contains("export const Comment"));
    assert!(!source.contains("export const Author"));

    loader.load(seed_id()).await.unwrap();
    assert!(factory.events().contains(&Event::RecreateStart(vec!["Comment".to_string()])));
}

// =============================================================================
// CONCURRENCY
// =============================================================================

fn assert_serialized(events: &[Event]) {
    let mut open = false;
    for event in events {
        match event {
            Event::RecreateStart(_) => {
                assert!(!open, "recreations overlapped: {events:?}");
                open = true;
            },
            Event::RecreateEnd => open = false,
            Event::Create(_) => {},
        }
    }
}

#[tokio::test]
async fn test_concurrent_seed_loads_are_serialized() {
    let factory = RecordingFactory::default();
    let loader = loader(BuildMode::Local, factory.clone());

    let (first, second) = tokio::join!(loader.load(seed_id()), loader.load(seed_id()));

    assert!(first.is_ok() && second.is_ok());
    assert_eq!(factory.recreations(), 2);
    assert_serialized(&factory.events());
}

#[tokio::test]
async fn test_loaders_sharing_locks_serialize_on_the_same_store() {
    let factory = RecordingFactory::default();
    let locks = RecreationLocks::default();
    let make = || {
        ModuleLoader::with_locks(
            settings(BuildMode::Local),
            LateTables::new(author_tables()),
            factory.clone(),
            locks.clone(),
        )
    };
    let (a, b) = (make(), make());

    let (first, second) = tokio::join!(a.recreate_tables(), b.recreate_tables());

    assert!(first.is_ok() && second.is_ok());
    assert_eq!(factory.events().len(), 6);
    assert_serialized(&factory.events());
}
