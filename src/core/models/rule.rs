//! Audit rule model
//!
//! A rule declares: "elements matching this selector (and, optionally, this
//! predicate) have this problem". Rules are immutable once declared.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;

use super::selector::{Selector, SelectorError};
use crate::core::ports::Element;

/// Future returned by a rule predicate
pub type MatchFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<bool>> + 'a>>;

type MatchFn = dyn for<'a> Fn(Element<'a>) -> MatchFuture<'a> + Send + Sync;
type TextFn = dyn Fn(Element<'_>) -> String + Send + Sync;

/// Optional asynchronous match function refining a rule's selector
#[derive(Clone)]
pub struct Predicate(Arc<MatchFn>);

impl Predicate {
    /// Wrap an asynchronous match function
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(Element<'a>) -> MatchFuture<'a> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap a synchronous match function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Element<'_>) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Self::new(move |element| {
            let outcome = f(element);
            let future: MatchFuture<'_> = Box::pin(std::future::ready(outcome));
            future
        })
    }

    /// Evaluate the predicate against an element
    #[must_use]
    pub fn evaluate<'a>(&self, element: Element<'a>) -> MatchFuture<'a> {
        (self.0)(element)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Human-readable rule text, either fixed or computed from the matched element
#[derive(Clone)]
pub enum RuleText {
    /// Fixed text
    Static(String),
    /// Text derived from the element
    Computed(Arc<TextFn>),
}

impl RuleText {
    /// Text computed from the matched element
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(Element<'_>) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Produce the text for a given element
    #[must_use]
    pub fn resolve(&self, element: Element<'_>) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Computed(f) => f(element),
        }
    }
}

impl fmt::Debug for RuleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for RuleText {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for RuleText {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

/// An audit rule
#[derive(Debug, Clone)]
pub struct Rule {
    code: String,
    selector: Selector,
    predicate: Option<Predicate>,
    title: RuleText,
    message: RuleText,
    description: Option<RuleText>,
}

impl Rule {
    /// Declare a rule; the selector is parsed up front so a pass never fails on it
    pub fn new(
        code: impl Into<String>,
        selector: &str,
        title: impl Into<RuleText>,
        message: impl Into<RuleText>,
    ) -> Result<Self, SelectorError> {
        Ok(Self {
            code: code.into(),
            selector: Selector::parse(selector)?,
            predicate: None,
            title: title.into(),
            message: message.into(),
            description: None,
        })
    }

    /// Attach a match predicate
    #[must_use]
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Attach a longer description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<RuleText>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stable rule code (e.g. `a11y-image-missing-alt`)
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The parsed selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The match predicate, if any
    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Resolve title, message and description for a matched element
    #[must_use]
    pub fn resolve(&self, element: Element<'_>) -> ResolvedRule {
        ResolvedRule {
            code: self.code.clone(),
            title: self.title.resolve(element),
            message: self.message.resolve(element),
            description: self.description.as_ref().map(|d| d.resolve(element)),
        }
    }
}

/// Rule text resolved against one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRule {
    /// Rule code
    pub code: String,
    /// Short title
    pub title: String,
    /// Message (may contain HTML)
    pub message: String,
    /// Optional longer description (may contain HTML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
