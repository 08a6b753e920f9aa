//! Audit page snapshots

use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use super::{block_on, project_root};
use devbar::adapters::{MarkerBoard, SnapshotDocument};
use devbar::config::DevbarConfig;
use devbar::core::services::AuditSession;
use devbar::output::{AuditOutput, OutputMode, PageAudit};

/// Snapshot files under `path`, sorted; `path` itself when it is a file
fn snapshot_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("No such snapshot file or directory: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|file| file.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Run the effective catalog against every snapshot
pub fn audit(root: &Path, path: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let root = project_root(root)?;
    let config = DevbarConfig::load(&root)?;
    let catalog = config.catalog(&root)?;
    let root_display = root.to_string_lossy().into_owned();

    let mut pages = Vec::new();
    for file in snapshot_files(path)? {
        let document = SnapshotDocument::load(&file)?;
        let mut session = AuditSession::new(MarkerBoard::new(), root_display.as_str());
        let state = block_on(session.run(&catalog, &document))?;
        debug!("{}: {state}", file.display());

        pages.push(PageAudit {
            snapshot: file.display().to_string(),
            url: document.url().map(str::to_string),
            report: session.report(&catalog),
            markers: session.overlays().markers().cloned().collect(),
        });
    }

    AuditOutput {
        root: root_display,
        pages,
    }
    .render(mode);
    Ok(())
}
