//! Open a source location in the editor

use super::block_on;
use devbar::adapters::editor::EditorLauncher;
use devbar::output::{OperationResult, OutputMode};

/// Ask the dev server at `server` to open `location`
pub fn open(location: &str, server: &str, mode: OutputMode) -> anyhow::Result<()> {
    let launcher = EditorLauncher::new(server)?;
    let success = block_on(launcher.open_file(location))?;

    OperationResult {
        success,
        message: if success {
            format!("Opened {location}")
        } else {
            format!("Could not reach the dev server at {server}")
        },
    }
    .render(mode);
    Ok(())
}
