//! Rule categories and the rule catalog

use thiserror::Error;

use super::Rule;

/// Errors raised while assembling a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A rule references a category that does not exist
    #[error("unknown rule category: {0}")]
    UnknownCategory(String),

    /// Two rules share a code
    #[error("duplicate rule code: {0}")]
    DuplicateRule(String),
}

/// A display group of rules
#[derive(Debug, Clone)]
pub struct Category {
    /// Stable category code (e.g. `a11y`)
    pub code: String,
    /// Display name
    pub name: String,
    /// Icon name used by the toolbar
    pub icon: String,
    rules: Vec<Rule>,
}

impl Category {
    /// Create an empty category
    pub fn new(code: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            icon: icon.into(),
            rules: Vec::new(),
        }
    }

    /// Add a rule (builder style)
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in declaration order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Ordered set of categories; the order defines audit and display order
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    categories: Vec<Category>,
}

impl RuleCatalog {
    /// Build a catalog, rejecting duplicate rule codes
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for mut category in categories {
            let rules = std::mem::take(&mut category.rules);
            let code = category.code.clone();
            catalog.add_category(category);
            for rule in rules {
                catalog.push_rule(&code, rule)?;
            }
        }
        Ok(catalog)
    }

    /// Categories in order
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by code
    #[must_use]
    pub fn category(&self, code: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.code == code)
    }

    /// Every rule with its category, in audit order
    pub fn rules(&self) -> impl Iterator<Item = (&Category, &Rule)> {
        self.categories
            .iter()
            .flat_map(|category| category.rules.iter().map(move |rule| (category, rule)))
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }

    /// Whether the catalog has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a category; an existing category with the same code is kept
    pub fn add_category(&mut self, category: Category) {
        if self.category(&category.code).is_none() {
            self.categories.push(category);
        }
    }

    /// Append a rule to an existing category
    pub fn push_rule(&mut self, category: &str, rule: Rule) -> Result<(), CatalogError> {
        if self.rules().any(|(_, existing)| existing.code() == rule.code()) {
            return Err(CatalogError::DuplicateRule(rule.code().to_string()));
        }
        let target = self
            .categories
            .iter_mut()
            .find(|c| c.code == category)
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))?;
        target.rules.push(rule);
        Ok(())
    }

    /// Drop rules by code; unknown codes are ignored
    pub fn disable<S: AsRef<str>>(&mut self, codes: &[S]) {
        for category in &mut self.categories {
            category
                .rules
                .retain(|rule| !codes.iter().any(|code| code.as_ref() == rule.code()));
        }
    }
}
