//! Selector engine - matches parsed selectors against a document
//!
//! This module contains pure matching logic over the [`Document`] port.

use std::collections::HashMap;

use crate::core::models::{Combinator, ComplexSelector, CompoundSelector, Selector, SimpleSelector};
use crate::core::ports::{Document, NodeId};

/// Whether `node` matches any alternative of `selector`
#[must_use]
pub fn matches(document: &dyn Document, node: NodeId, selector: &Selector) -> bool {
    matches_any(document, node, selector.alternatives())
}

/// Every element matching `selector`, in document order
#[must_use]
pub fn select_all(document: &dyn Document, selector: &Selector) -> Vec<NodeId> {
    let Some(root) = document.root() else {
        return Vec::new();
    };

    let mut matched = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if matches(document, node, selector) {
            matched.push(node);
        }
        // Reverse so the first child is visited next (pre-order)
        stack.extend(document.children(node).iter().rev());
    }
    matched
}

fn matches_any(document: &dyn Document, node: NodeId, alternatives: &[ComplexSelector]) -> bool {
    alternatives
        .iter()
        .any(|complex| matches_from(document, node, &complex.parts, complex.parts.len() - 1))
}

/// Match `parts[..=index]` with `parts[index]` applied to `node`
fn matches_from(
    document: &dyn Document,
    node: NodeId,
    parts: &[(Combinator, CompoundSelector)],
    index: usize,
) -> bool {
    let (combinator, compound) = &parts[index];
    if !matches_compound(document, node, compound) {
        return false;
    }
    if index == 0 {
        return true;
    }

    match combinator {
        Combinator::Child => document
            .parent(node)
            .is_some_and(|parent| matches_from(document, parent, parts, index - 1)),
        Combinator::Descendant => {
            let mut ancestor = document.parent(node);
            while let Some(candidate) = ancestor {
                if matches_from(document, candidate, parts, index - 1) {
                    return true;
                }
                ancestor = document.parent(candidate);
            }
            false
        },
    }
}

fn matches_compound(document: &dyn Document, node: NodeId, compound: &CompoundSelector) -> bool {
    let tag_matches = compound
        .tag
        .as_ref()
        .is_none_or(|tag| document.tag_name(node).eq_ignore_ascii_case(tag));
    if !tag_matches {
        return false;
    }

    compound.filters.iter().all(|filter| match filter {
        SimpleSelector::Id(id) => document.attribute(node, "id") == Some(id.as_str()),
        SimpleSelector::Class(class) => document
            .attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)),
        SimpleSelector::Attribute { name, condition } => {
            match (document.attribute(node, name), condition) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some((operator, expected))) => operator.test(actual, expected),
            }
        },
        SimpleSelector::Not(inner) => !matches_any(document, node, inner),
    })
}

/// Selector results memoised by selector source for a single audit pass
///
/// A memo must not outlive the pass it was created for: the document may
/// change between passes.
#[derive(Debug, Default)]
pub struct SelectorMemo {
    results: HashMap<String, Vec<NodeId>>,
    queries: usize,
}

impl SelectorMemo {
    /// Elements matching `selector`, querying the document only once per source
    pub fn select(&mut self, document: &dyn Document, selector: &Selector) -> &[NodeId] {
        if !self.results.contains_key(selector.source()) {
            self.queries += 1;
            self.results
                .insert(selector.source().to_string(), select_all(document, selector));
        }
        self.results.get(selector.source()).map_or(&[], Vec::as_slice)
    }

    /// Number of document queries actually executed
    #[must_use]
    pub const fn queries(&self) -> usize {
        self.queries
    }
}
