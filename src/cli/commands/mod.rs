//! Command implementations

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Context;

mod audit;
mod init;
mod load;
#[cfg(feature = "editor")]
mod open;
mod resolve;
mod rules;

pub use audit::audit;
pub use init::init;
pub use load::load;
#[cfg(feature = "editor")]
pub use open::open;
pub use resolve::resolve;
pub use rules::rules;

/// Drive a future to completion on a single-threaded runtime
fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Absolute, canonical project root
fn project_root(root: &Path) -> anyhow::Result<PathBuf> {
    fs::canonicalize(root).with_context(|| format!("Project root not found: {}", root.display()))
}
