//! User rule files
//!
//! Extra audit rules declared in TOML:
//!
//! ```toml
//! [[category]]
//! code = "seo"
//! name = "SEO"
//! icon = "search"
//!
//! [[rule]]
//! category = "seo"
//! code = "seo-javascript-link"
//! selector = "a[href]"
//! title = "Link runs JavaScript"
//! message = "Use a button for actions."
//!
//! [rule.when]
//! attribute = "href"
//! matches = "^javascript:"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;

use crate::core::models::{Category, Predicate, Rule, RuleCatalog};

/// A rule file
#[derive(Debug, Default, Deserialize)]
pub struct RuleFile {
    /// Categories declared by this file
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryEntry>,

    /// Rules declared by this file
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
}

/// A category declaration
#[derive(Debug, Deserialize)]
pub struct CategoryEntry {
    /// Category code
    pub code: String,
    /// Display name
    pub name: String,
    /// Icon name
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    "gear".to_string()
}

/// A rule declaration
#[derive(Debug, Deserialize)]
pub struct RuleEntry {
    /// Code of the category the rule belongs to
    pub category: String,
    /// Rule code
    pub code: String,
    /// CSS selector
    pub selector: String,
    /// Short title
    pub title: String,
    /// Message
    pub message: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional attribute condition refining the selector
    #[serde(default)]
    pub when: Option<AttributeCondition>,
}

/// Matches elements whose attribute value matches a regular expression
#[derive(Debug, Deserialize)]
pub struct AttributeCondition {
    /// Attribute name
    pub attribute: String,
    /// Regular expression the value must match
    pub matches: String,
    /// Invert the condition
    #[serde(default)]
    pub negate: bool,
}

impl AttributeCondition {
    fn into_predicate(self) -> anyhow::Result<Predicate> {
        let pattern = Regex::new(&self.matches)
            .with_context(|| format!("Invalid pattern for attribute '{}'", self.attribute))?;
        let Self {
            attribute, negate, ..
        } = self;
        Ok(Predicate::from_fn(move |element| {
            let matched = element.attribute(&attribute).is_some_and(|value| pattern.is_match(value));
            Ok(matched != negate)
        }))
    }
}

impl RuleEntry {
    /// Build the rule
    ///
    /// # Errors
    ///
    /// Returns an error if the selector or the condition pattern is invalid.
    pub fn into_rule(self) -> anyhow::Result<Rule> {
        let mut rule = Rule::new(self.code, &self.selector, self.title, self.message)?;
        if let Some(description) = self.description {
            rule = rule.with_description(description);
        }
        if let Some(condition) = self.when {
            rule = rule.with_predicate(condition.into_predicate()?);
        }
        Ok(rule)
    }
}

/// Parse a rule file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_rule_file(path: &Path) -> anyhow::Result<RuleFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    let file: RuleFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse rule file {}", path.display()))?;
    Ok(file)
}

/// Rule files matching `patterns`, relative to `root`, sorted and deduplicated
///
/// # Errors
///
/// Returns an error if a pattern is invalid.
pub fn find_rule_files(root: &Path, patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let full = root.join(pattern);
        let entries = glob::glob(&full.to_string_lossy())
            .with_context(|| format!("Invalid rule file pattern '{pattern}'"))?;
        files.extend(entries.filter_map(Result::ok).filter(|path| path.is_file()));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Add the categories and rules of `file` to `catalog`
///
/// Categories already present are kept; rules are appended after the
/// existing rules of their category.
///
/// # Errors
///
/// Returns an error if a rule is invalid, names an unknown category or
/// reuses an existing code.
pub fn apply_rule_file(catalog: &mut RuleCatalog, file: RuleFile) -> anyhow::Result<()> {
    for entry in file.categories {
        if catalog.category(&entry.code).is_none() {
            catalog.add_category(Category::new(entry.code, entry.name, entry.icon));
        }
    }
    for entry in file.rules {
        let category = entry.category.clone();
        let code = entry.code.clone();
        let rule = entry
            .into_rule()
            .with_context(|| format!("Invalid rule '{code}'"))?;
        catalog.push_rule(&category, rule)?;
    }
    Ok(())
}

/// Load every rule file matching `patterns` into `catalog`
///
/// # Errors
///
/// Returns an error if a file cannot be loaded or applied.
pub fn extend_catalog(catalog: &mut RuleCatalog, root: &Path, patterns: &[String]) -> anyhow::Result<usize> {
    let files = find_rule_files(root, patterns)?;
    for path in &files {
        let file = load_rule_file(path)?;
        apply_rule_file(catalog, file)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?;
    }
    Ok(files.len())
}
