//! Virtual module identifiers and build modes

use std::fmt;

use serde::Serialize;

/// Prefix marking a resolved id as virtual so other plugins leave it alone
pub const VIRTUAL_PREFIX: char = '\0';

/// The virtual modules served by the database plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    /// Client bound to the local store
    LocalClient,
    /// Public API that also triggers seeding
    Seed,
    /// Public API (config re-exports and table bindings)
    PublicApi,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalClient => write!(f, "local-client"),
            Self::Seed => write!(f, "seed"),
            Self::PublicApi => write!(f, "public-api"),
        }
    }
}

/// Result of resolving a requested module id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "kind", rename_all = "kebab-case")]
pub enum Resolution {
    /// One of our virtual modules
    Module(ModuleKind),
    /// Not this plugin's concern
    NotHandled,
}

impl Resolution {
    /// The module kind, if handled
    #[must_use]
    pub const fn kind(self) -> Option<ModuleKind> {
        match self {
            Self::Module(kind) => Some(kind),
            Self::NotHandled => None,
        }
    }
}

/// Whether the build targets the local store or the managed service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Local development store, seeded from seed files
    #[default]
    Local,
    /// Hosted database; seeding is never offered
    Managed {
        /// Token sent to the remote service
        app_token: String,
    },
}

impl BuildMode {
    /// Whether this is managed mode
    #[must_use]
    pub const fn is_managed(&self) -> bool {
        matches!(self, Self::Managed { .. })
    }
}

/// The identifiers the plugin answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualIds {
    /// Public module imported by application code
    pub public: String,
    /// Local client module imported by the public module
    pub local_client: String,
    /// Public module variant that triggers seeding
    pub seed: String,
}

impl Default for VirtualIds {
    fn default() -> Self {
        Self {
            public: "astro:db".to_string(),
            local_client: "astro:local".to_string(),
            seed: "astro:db:seed".to_string(),
        }
    }
}

impl VirtualIds {
    /// Unprefixed id of a module kind
    #[must_use]
    pub fn raw(&self, kind: ModuleKind) -> &str {
        match kind {
            ModuleKind::LocalClient => &self.local_client,
            ModuleKind::Seed => &self.seed,
            ModuleKind::PublicApi => &self.public,
        }
    }

    /// Resolved (prefixed) id handed back to the bundler
    #[must_use]
    pub fn resolved(&self, kind: ModuleKind) -> String {
        format!("{VIRTUAL_PREFIX}{}", self.raw(kind))
    }

    /// Module kind of a resolved id
    #[must_use]
    pub fn kind_of_resolved(&self, id: &str) -> Option<ModuleKind> {
        let raw = id.strip_prefix(VIRTUAL_PREFIX)?;
        [ModuleKind::LocalClient, ModuleKind::PublicApi, ModuleKind::Seed]
            .into_iter()
            .find(|&kind| self.raw(kind) == raw)
    }
}
