//! Audit report - issues grouped by category for counting and display

use serde::Serialize;

use crate::core::models::{AuditState, Issue, RuleCatalog};

/// Issues of one category
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    /// Category code
    pub code: String,
    /// Display name
    pub name: String,
    /// Icon name
    pub icon: String,
    /// Number of issues in this category
    pub count: usize,
    /// Issues in rule declaration order, then document order
    pub issues: Vec<Issue>,
}

/// Outcome of an audit pass, grouped by category
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Overall state
    #[serde(flatten)]
    pub state: AuditState,
    /// Every catalog category, in catalog order, including empty ones
    pub categories: Vec<CategorySummary>,
}

impl AuditReport {
    /// Partition `issues` by the categories of `catalog`
    ///
    /// Issues keep their relative order, so each category lists them in rule
    /// declaration order and then document order.
    pub fn summarize<'i>(
        catalog: &RuleCatalog,
        state: AuditState,
        issues: impl IntoIterator<Item = &'i Issue>,
    ) -> Self {
        let mut categories: Vec<CategorySummary> = catalog
            .categories()
            .iter()
            .map(|category| CategorySummary {
                code: category.code.clone(),
                name: category.name.clone(),
                icon: category.icon.clone(),
                count: 0,
                issues: Vec::new(),
            })
            .collect();

        for issue in issues {
            if let Some(summary) = categories.iter_mut().find(|c| c.code == issue.category) {
                summary.count += 1;
                summary.issues.push(issue.clone());
            }
        }

        Self { state, categories }
    }

    /// Total number of issues
    #[must_use]
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }

    /// Summary of one category
    #[must_use]
    pub fn category(&self, code: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.code == code)
    }
}
