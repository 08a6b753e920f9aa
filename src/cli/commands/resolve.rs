//! Resolve a module id

use std::path::Path;

use super::{block_on, project_root};
use devbar::adapters::{FsImporterResolver, JsonSchemaStore};
use devbar::config::DevbarConfig;
use devbar::core::models::{LateTables, VIRTUAL_PREFIX};
use devbar::core::services::VirtualModulePlugin;
use devbar::output::{OutputMode, ResolveOutput};
use devbar::paths;

/// Importer as the bundler would report it: relative files are taken from the root
fn importer_path(root: &Path, importer: &str) -> String {
    let file = Path::new(importer);
    if importer.starts_with(VIRTUAL_PREFIX) || file.is_absolute() {
        return importer.to_string();
    }
    paths::resolve(root, file).to_string_lossy().into_owned()
}

/// Print how the plugin resolves `id` requested from `importer`
pub fn resolve(
    root: &Path,
    id: &str,
    importer: Option<&str>,
    managed: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let root = project_root(root)?;
    let config = DevbarConfig::load(&root)?;
    let settings = config.plugin_settings(&root, managed)?;
    let plugin =
        VirtualModulePlugin::new(settings, LateTables::default(), FsImporterResolver, JsonSchemaStore);

    let importer_file = importer.map(|importer| importer_path(&root, importer));
    let lookup = importer_file.as_deref();
    let (resolution, resolved_id) = block_on(async {
        (plugin.classify(id, lookup).await, plugin.resolve_id(id, lookup).await)
    })?;

    ResolveOutput {
        id: id.to_string(),
        importer: importer.map(str::to_string),
        resolution,
        resolved_id,
    }
    .render(mode);
    Ok(())
}
