//! Domain models for devbar
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Rule`] - "Elements matching this selector have this problem"
//! - [`Category`] / [`RuleCatalog`] - Ordered grouping of rules for display
//! - [`Issue`] - One rule bound to one element during an audit pass
//! - [`Selector`] - Parsed CSS selector used to find rule candidates
//! - [`ModuleKind`] - The virtual modules served by the database plugin
//! - [`TableBindings`] - Table name to schema descriptor mapping

mod category;
mod geometry;
mod issue;
mod module_kind;
mod rule;
mod selector;
mod table;
mod tooltip;

pub use category::{CatalogError, Category, RuleCatalog};
pub use geometry::{ComputedStyle, Display, Position, Rect};
pub use issue::{AuditState, Issue, SourceLocation};
pub use module_kind::{BuildMode, ModuleKind, Resolution, VIRTUAL_PREFIX, VirtualIds};
pub use rule::{MatchFuture, Predicate, ResolvedRule, Rule, RuleText};
pub use selector::{
    AttributeOperator, Combinator, ComplexSelector, CompoundSelector, Selector, SelectorError,
    SimpleSelector,
};
pub use table::{
    ColumnDescriptor, ColumnSchema, ColumnType, IndexDescriptor, LateTables, TableBindings,
    TableDescriptor,
};
pub use tooltip::{AuditCard, EditorLink, Tooltip, TooltipSection};
