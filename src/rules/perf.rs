//! Performance rules

use crate::core::models::{Category, Predicate, Rule, RuleText, SelectorError};
use crate::core::ports::Element;

/// Category code
pub const CODE: &str = "perf";

/// Render time above which a component is reported as slow, in milliseconds
pub const SLOW_RENDER_MS: f64 = 500.0;

/// Whether an image source is served by the project itself
fn is_local_source(src: &str) -> bool {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") || src.starts_with("//") {
        return false;
    }
    if src.contains("://") {
        return false;
    }
    let path = src.split(['?', '#']).next().unwrap_or(src);
    !path.to_ascii_lowercase().ends_with(".svg")
}

/// Whether the element starts below the initial viewport
fn below_the_fold(element: Element<'_>) -> bool {
    let viewport = element.document().viewport();
    element.layout_box().is_some_and(|rect| rect.top() >= viewport.bottom())
}

fn render_time(element: Element<'_>, attribute: &str) -> Option<f64> {
    element.attribute(attribute)?.trim().parse().ok()
}

fn slow_render(attribute: &'static str) -> Predicate {
    Predicate::from_fn(move |element| {
        Ok(render_time(element, attribute).is_some_and(|ms| ms > SLOW_RENDER_MS))
    })
}

fn render_message(attribute: &'static str, place: &'static str) -> RuleText {
    RuleText::computed(move |element| {
        let ms = render_time(element, attribute).unwrap_or_default();
        format!("This component took {ms:.0}ms to render on the {place}.")
    })
}

/// The performance category
///
/// # Errors
///
/// Returns an error if a rule selector fails to parse.
pub fn category() -> Result<Category, SelectorError> {
    Ok(Category::new(CODE, "Performance", "gauge")
        .with_rule(
            Rule::new(
                "perf-use-image-component",
                "img:not([data-image-component])",
                "Use the Image component",
                "This image could be replaced with the Image component to improve performance.",
            )?
            .with_predicate(Predicate::from_fn(|element| {
                Ok(element.attribute("src").is_some_and(is_local_source))
            })),
        )
        .with_rule(
            Rule::new(
                "perf-use-loading-lazy",
                "img:not([loading='lazy'])",
                "Unoptimized loading attribute",
                "This image is below the fold; add loading=\"lazy\" so it loads only when needed.",
            )?
            .with_predicate(Predicate::from_fn(|element| Ok(below_the_fold(element)))),
        )
        .with_rule(
            Rule::new(
                "perf-use-loading-eager",
                "img[loading='lazy']",
                "Unoptimized loading attribute",
                "This image is visible on load; lazy loading delays it. Remove loading=\"lazy\".",
            )?
            .with_predicate(Predicate::from_fn(|element| {
                Ok(element.layout_box().is_some() && !below_the_fold(element))
            })),
        )
        .with_rule(
            Rule::new(
                "perf-slow-component-server-render",
                "[server-render-time]",
                "Slow component server render",
                render_message("server-render-time", "server"),
            )?
            .with_predicate(slow_render("server-render-time")),
        )
        .with_rule(
            Rule::new(
                "perf-slow-component-client-hydration",
                "[client-render-time]",
                "Slow component client hydration",
                render_message("client-render-time", "client"),
            )?
            .with_predicate(slow_render("client-render-time")),
        ))
}
