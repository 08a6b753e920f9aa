//! Write a default configuration

use std::path::Path;

use devbar::config::DevbarConfig;
use devbar::output::{OperationResult, OutputMode};
use devbar::paths;

/// Write `devbar.toml` with every default spelled out
pub fn init(root: &Path, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = paths::config_file(root);

    if path.exists() && !force {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({} exists). Use --force to overwrite.",
                paths::CONFIG_FILE
            ),
        }
        .render(mode);
        return Ok(());
    }

    let written = DevbarConfig::default().save(root)?;
    OperationResult {
        success: true,
        message: format!("Created {}", written.display()),
    }
    .render(mode);
    Ok(())
}
