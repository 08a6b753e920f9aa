//! Built-in rule catalog
//!
//! Accessibility rules run before performance rules, so an element with both
//! kinds of problems is reported for accessibility.

pub mod a11y;
pub mod perf;

use crate::core::models::RuleCatalog;

/// The built-in catalog: accessibility, then performance
///
/// # Errors
///
/// Returns an error if a built-in rule is malformed.
pub fn builtin_catalog() -> anyhow::Result<RuleCatalog> {
    Ok(RuleCatalog::new(vec![a11y::category()?, perf::category()?])?)
}
