//! Audit pass - computes the issues of a document against a rule catalog
//!
//! This is the pure half of the audit: it never touches overlays. Rendering
//! the result is the job of [`super::session::AuditSession`].

use std::collections::HashSet;

use log::{debug, error};

use super::selector::SelectorMemo;
use crate::core::models::{Category, Display, Issue, Rule, RuleCatalog, SourceLocation};
use crate::core::ports::{Document, Element, NodeId};

/// Attribute carrying the source file an element was authored in
pub const SOURCE_FILE_ATTRIBUTE: &str = "data-astro-source-file";

/// Attribute carrying the `line:column` an element was authored at
pub const SOURCE_LOC_ATTRIBUTE: &str = "data-astro-source-loc";

/// Run every rule of `catalog` against `document`
///
/// Rules run in catalog order and predicates are awaited one element at a
/// time, in document order. An element is bound to the first rule that
/// matches it; later rules skip it. A failing predicate is logged and only
/// drops that element for that rule.
pub async fn audit(catalog: &RuleCatalog, document: &dyn Document) -> Vec<Issue> {
    let mut memo = SelectorMemo::default();
    let mut audited: HashSet<NodeId> = HashSet::new();
    let mut issues = Vec::new();

    for (category, rule) in catalog.rules() {
        let selected = memo.select(document, rule.selector());

        let matched = match rule.predicate() {
            None => selected.to_vec(),
            Some(predicate) => {
                let mut matched = Vec::new();
                for &node in selected {
                    match predicate.evaluate(Element::new(document, node)).await {
                        Ok(true) => matched.push(node),
                        Ok(false) => {},
                        Err(err) => {
                            error!(
                                "Error while running audit's match function ({}): {err:#}",
                                rule.code()
                            );
                        },
                    }
                }
                matched
            },
        };

        for node in matched {
            if audited.contains(&node) {
                continue;
            }
            if let Some(issue) = create_issue(category, rule, Element::new(document, node)) {
                audited.insert(node);
                issues.push(issue);
            }
        }
    }

    debug!("audit pass: {} issue(s), {} selector queries", issues.len(), memo.queries());
    issues
}

/// Whether an element is rendered and loaded enough to be audited
///
/// The layout check looks at the first child element when there is one,
/// matching how wrappers are highlighted. Images still loading are skipped
/// even when they are lazily loaded and would load later.
#[must_use]
pub fn is_auditable(element: Element<'_>) -> bool {
    let target = element.first_child().unwrap_or(element);
    if target.layout_box().is_none() || element.style().display == Display::None {
        return false;
    }
    !(element.is("img") && !element.image_complete())
}

fn create_issue(category: &Category, rule: &Rule, element: Element<'_>) -> Option<Issue> {
    if !is_auditable(element) {
        return None;
    }

    let source = element.attribute(SOURCE_FILE_ATTRIBUTE).map(|file| SourceLocation {
        file: file.to_string(),
        loc: element.attribute(SOURCE_LOC_ATTRIBUTE).map(str::to_string),
    });

    Some(Issue {
        node: element.node(),
        category: category.code.clone(),
        rule: rule.resolve(element),
        tag_name: element.tag_name().to_string(),
        rect: element.layout_box().unwrap_or_default(),
        is_fixed: element.is_fixed_positioned(),
        source,
    })
}
