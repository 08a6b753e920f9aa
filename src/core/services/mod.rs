//! Business logic services
//!
//! Pure orchestration logic that operates on domain models through ports.
//!
//! Audit engine:
//! - [`selector`] - Match parsed selectors against a document
//! - [`auditor`] - Compute the issues of one audit pass
//! - [`session`] - Own issues and overlays across passes
//! - [`report`] - Group issues by category
//! - [`tooltip`] - Tooltip and card presentation data
//!
//! Virtual module plugin:
//! - [`module_resolver`] - Map requested ids to module kinds
//! - [`module_loader`] - Produce module source, seeding when required
//! - [`codegen`] - Source text templates
//! - [`recreation`] - Per-store serialization of schema recreation
//! - [`plugin`] - Bundler-facing `resolve_id` / `load`

pub mod auditor;
pub mod codegen;
pub mod module_loader;
pub mod module_resolver;
pub mod plugin;
pub mod recreation;
pub mod report;
pub mod selector;
pub mod session;
pub mod tooltip;

pub use auditor::{audit, is_auditable};
pub use codegen::{CodegenError, RuntimeImports};
pub use module_loader::{LoadError, ModuleLoader};
pub use module_resolver::{ModuleResolver, classify};
pub use plugin::{PLUGIN_NAME, PluginSettings, SEED_FILE_NAMES, VirtualModulePlugin, file_url};
pub use recreation::RecreationLocks;
pub use report::{AuditReport, CategorySummary};
pub use selector::{SelectorMemo, matches, select_all};
pub use session::{AuditSession, PassToken};
pub use tooltip::{build_card, build_tooltip};
