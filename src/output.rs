//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::adapters::Marker;
use crate::core::models::Resolution;
use crate::core::services::tooltip::display_path;
use crate::core::services::{AuditReport, build_card};

/// Shown when an audit found nothing
pub const EMPTY_AUDIT_MESSAGE: &str = "No accessibility or performance issues detected.";

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Audit result of one page snapshot
#[derive(Debug, Serialize)]
pub struct PageAudit {
    /// Snapshot file
    pub snapshot: String,
    /// Page URL, if captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Issues grouped by category
    pub report: AuditReport,
    /// Highlights that would be drawn
    pub markers: Vec<Marker>,
}

/// Result of an audit run
#[derive(Debug, Serialize)]
pub struct AuditOutput {
    /// Project root shown paths are relative to
    #[serde(skip)]
    pub root: String,
    /// Audited pages
    pub pages: Vec<PageAudit>,
}

impl AuditOutput {
    /// Total number of issues across pages
    #[must_use]
    pub fn total(&self) -> usize {
        self.pages.iter().map(|page| page.report.total()).sum()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.pages.is_empty() {
            println!("No snapshots found.");
            return;
        }

        for page in &self.pages {
            let title = page.url.as_deref().unwrap_or(&page.snapshot);
            println!("{}", title.bold());

            if page.report.state.count() == 0 {
                println!("  {}\n", EMPTY_AUDIT_MESSAGE.green());
                continue;
            }

            for category in page.report.categories.iter().filter(|c| c.count > 0) {
                println!("\n  {} ({})", category.name.bold(), category.count);
                for issue in &category.issues {
                    let card = build_card(issue);
                    println!("    [{}] <{}> {}", card.code.yellow(), card.selector_name, card.title);
                    println!("        {}", card.message);
                    if let Some(source) = &issue.source {
                        let location = source.file_with_position();
                        println!("        at {}", display_path(&location, &self.root).dimmed());
                    }
                }
            }
            println!();
        }

        let total = self.total();
        if total > 0 {
            println!("{}", format!("{total} issue(s) found").red().bold());
        }
    }
}

/// A rule in the effective catalog
#[derive(Debug, Serialize)]
pub struct RuleInfo {
    /// Rule code
    pub code: String,
    /// Selector source
    pub selector: String,
    /// Whether a match predicate refines the selector
    pub refined: bool,
}

/// A category in the effective catalog
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    /// Category code
    pub code: String,
    /// Display name
    pub name: String,
    /// Rules in audit order
    pub rules: Vec<RuleInfo>,
}

/// Result of the rules command
#[derive(Debug, Serialize)]
pub struct RuleListOutput {
    /// Categories in audit order
    pub categories: Vec<CategoryInfo>,
}

impl RuleListOutput {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        for category in &self.categories {
            println!("{} ({})", category.name.bold(), category.code);
            if category.rules.is_empty() {
                println!("  (no rules)");
            }
            for rule in &category.rules {
                let marker = if rule.refined { "*" } else { " " };
                println!("  {marker} {:<40} {}", rule.code, rule.selector.dimmed());
            }
            println!();
        }
    }
}

/// Result of the resolve command
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    /// Requested id
    pub id: String,
    /// Importer, if given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importer: Option<String>,
    /// Classification
    pub resolution: Resolution,
    /// Id handed back to the bundler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_id: Option<String>,
}

impl ResolveOutput {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => match (&self.resolution, &self.resolved_id) {
                (Resolution::Module(kind), Some(resolved)) => {
                    println!("{} -> {} ({kind})", self.id, resolved.escape_default());
                },
                _ => println!("{} is not handled", self.id),
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of the load command
#[derive(Debug, Serialize)]
pub struct LoadOutput {
    /// Requested id
    pub id: String,
    /// Generated source; `None` when the bundler loads the file itself
    pub source: Option<String>,
    /// Whether the local store schema was recreated
    pub recreated: bool,
}

impl LoadOutput {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.recreated {
                    eprintln!("{}", "Recreated local database tables".green());
                }
                match &self.source {
                    Some(source) => println!("{source}"),
                    None => println!("{} is loaded from disk", self.id.escape_default()),
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
