//! Centralized path definitions for devbar
//!
//! ## Project Layout
//!
//! ```text
//! project/
//! ├── devbar.toml            # Configuration (optional)
//! ├── audits/*.toml          # Extra audit rules (configurable)
//! ├── db/
//! │   ├── tables.toml        # Table bindings
//! │   └── seed.ts            # Seed file (seed.{ts,js,mjs,mts})
//! ├── src/                   # Importers here get the seeding module
//! └── .astro/
//!     └── content.db         # Local store
//! ```

use std::env;
use std::path::{Component, Path, PathBuf};

/// Configuration filename in the project root
pub const CONFIG_FILE: &str = "devbar.toml";

/// Directory of the local store, relative to the project root
pub const STORE_DIR: &str = ".astro";

/// Local store filename
pub const STORE_FILE: &str = "content.db";

/// Remote database used in managed mode
pub const DEFAULT_REMOTE_URL: &str = "https://db.services.astro.build";

/// App token for managed mode
pub const APP_TOKEN_ENV: &str = "ASTRO_STUDIO_APP_TOKEN";

/// Override of the remote database URL
pub const REMOTE_URL_ENV: &str = "ASTRO_STUDIO_REMOTE_DB_URL";

/// When set, every process uses a fresh store file
pub const RANDOM_DB_ENV: &str = "ASTRO_TEST_RANDOM_DB_ID";

/// Path to the configuration file of a project
#[must_use]
pub fn config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Default store path, relative to the project root
///
/// With `ASTRO_TEST_RANDOM_DB_ID` set the file name is a random UUID, so
/// parallel test runs never share a store.
#[must_use]
pub fn default_store_path() -> PathBuf {
    let file = if env::var_os(RANDOM_DB_ENV).is_some() {
        uuid::Uuid::new_v4().to_string()
    } else {
        STORE_FILE.to_string()
    };
    Path::new(STORE_DIR).join(file)
}

/// Lexically normalize a path: drop `.` and resolve `..` without touching disk
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Resolve `path` against `root` unless it is already absolute, then normalize
#[must_use]
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// Canonical form of `path` when it exists on disk, `path` unchanged otherwise
#[must_use]
pub fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
