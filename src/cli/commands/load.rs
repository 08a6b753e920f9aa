//! Load a module

use std::path::Path;

use super::{block_on, project_root};
use devbar::adapters::{FsImporterResolver, JsonSchemaStore};
use devbar::config::DevbarConfig;
use devbar::core::models::{LateTables, VIRTUAL_PREFIX, VirtualIds};
use devbar::core::services::VirtualModulePlugin;
use devbar::output::{LoadOutput, OutputMode};
use devbar::paths;

/// Accept virtual ids without their NUL prefix and files relative to the root
fn normalize_id(ids: &VirtualIds, root: &Path, id: &str) -> String {
    if [&ids.public, &ids.local_client, &ids.seed].iter().any(|raw| raw.as_str() == id) {
        return format!("{VIRTUAL_PREFIX}{id}");
    }
    let file = Path::new(id);
    if file.is_relative() && root.join(file).is_file() {
        return paths::resolve(root, file).to_string_lossy().into_owned();
    }
    id.to_string()
}

/// Print the source the plugin produces for `id`
pub fn load(root: &Path, id: &str, managed: bool, mode: OutputMode) -> anyhow::Result<()> {
    let root = project_root(root)?;
    let config = DevbarConfig::load(&root)?;
    let settings = config.plugin_settings(&root, managed)?;
    let tables = LateTables::new(config.tables(&root)?);
    let id = normalize_id(&settings.ids, &root, id);

    let plugin = VirtualModulePlugin::new(settings, tables, FsImporterResolver, JsonSchemaStore);
    let recreated = plugin.loader().is_seed_file(&id);
    let source = block_on(plugin.load(&id))??;

    LoadOutput {
        id,
        source,
        recreated,
    }
    .render(mode);
    Ok(())
}
