//! Tests for module resolution through the plugin

use devbar::core::models::{BuildMode, LateTables, ModuleKind, Resolution, VirtualIds};
use devbar::core::services::{ModuleResolver, VirtualModulePlugin};

use crate::common::{RecordingFactory, StaticImporters, loader, managed, settings};

fn resolver(mode: BuildMode, importers: &StaticImporters) -> ModuleResolver<&StaticImporters> {
    ModuleResolver::new(VirtualIds::default(), mode, "/project/src", importers)
}

// =============================================================================
// END-TO-END
// =============================================================================

#[tokio::test]
async fn test_page_importing_public_id_gets_seed_module() {
    let importers = StaticImporters::with(&[("./pages/index.astro", "/project/src/pages/index.astro")]);
    let plugin = VirtualModulePlugin::from_parts(
        resolver(BuildMode::Local, &importers),
        loader(BuildMode::Local, RecordingFactory::default()),
    );

    let resolved = plugin.resolve_id("astro:db", Some("./pages/index.astro")).await;

    assert_eq!(resolved.as_deref(), Some("\0astro:db:seed"));
    assert_eq!(plugin.name(), "astro:db");
}

#[tokio::test]
async fn test_unrelated_ids_are_left_to_other_plugins() {
    let importers = StaticImporters::default();
    let plugin = VirtualModulePlugin::from_parts(
        resolver(BuildMode::Local, &importers),
        loader(BuildMode::Local, RecordingFactory::default()),
    );

    assert_eq!(plugin.resolve_id("react", Some("/project/src/a.tsx")).await, None);
    assert_eq!(plugin.resolve_id("astro:db:seed", None).await, None);
    assert_eq!(importers.lookups.get(), 0);
}

// =============================================================================
// LOCAL CLIENT
// =============================================================================

#[tokio::test]
async fn test_local_client_ignores_importer_and_mode() {
    let importers = StaticImporters::with(&[("a.ts", "/project/src/a.ts")]);

    for mode in [BuildMode::Local, managed()] {
        let resolver = resolver(mode, &importers);
        for importer in [None, Some("a.ts"), Some("/elsewhere/b.ts")] {
            assert_eq!(
                resolver.resolve("astro:local", importer).await,
                Resolution::Module(ModuleKind::LocalClient)
            );
        }
    }
    assert_eq!(importers.lookups.get(), 0);
}

// =============================================================================
// PUBLIC ID
// =============================================================================

#[tokio::test]
async fn test_source_importer_gets_seed_only_in_local_mode() {
    let importers = StaticImporters::with(&[("a.ts", "/project/src/components/a.ts")]);

    assert_eq!(
        resolver(BuildMode::Local, &importers).resolve("astro:db", Some("a.ts")).await,
        Resolution::Module(ModuleKind::Seed)
    );
    assert_eq!(
        resolver(managed(), &importers).resolve("astro:db", Some("a.ts")).await,
        Resolution::Module(ModuleKind::PublicApi)
    );
    assert_eq!(importers.lookups.get(), 1);
}

#[tokio::test]
async fn test_unresolvable_importer_gets_public_api() {
    let importers = StaticImporters::default();
    let resolver = resolver(BuildMode::Local, &importers);

    assert_eq!(
        resolver.resolve("astro:db", Some("virtual:missing")).await,
        Resolution::Module(ModuleKind::PublicApi)
    );
    assert_eq!(importers.lookups.get(), 1);
}

#[tokio::test]
async fn test_missing_importer_is_not_canonicalized() {
    let importers = StaticImporters::default();

    let resolution = resolver(BuildMode::Local, &importers).resolve("astro:db", None).await;

    assert_eq!(resolution, Resolution::Module(ModuleKind::PublicApi));
    assert_eq!(importers.lookups.get(), 0);
}

#[tokio::test]
async fn test_importer_outside_source_gets_public_api() {
    let importers = StaticImporters::with(&[
        ("cfg", "/project/astro.config.mjs"),
        ("dep", "/project/node_modules/lib/index.js"),
        ("sibling", "/project/src-old/a.ts"),
    ]);
    let resolver = resolver(BuildMode::Local, &importers);

    for importer in ["cfg", "dep", "sibling"] {
        assert_eq!(
            resolver.resolve("astro:db", Some(importer)).await,
            Resolution::Module(ModuleKind::PublicApi),
            "importer {importer}"
        );
    }
}

#[tokio::test]
async fn test_plugin_built_from_settings_uses_src_dir() {
    let importers = StaticImporters::with(&[("p", "/project/src/p.astro")]);
    let plugin = VirtualModulePlugin::new(
        settings(BuildMode::Local),
        LateTables::default(),
        &importers,
        RecordingFactory::default(),
    );

    assert_eq!(plugin.classify("astro:db", Some("p")).await, Resolution::Module(ModuleKind::Seed));
    assert_eq!(plugin.resolve_id("astro:local", None).await.as_deref(), Some("\0astro:local"));
}
