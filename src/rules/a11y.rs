//! Accessibility rules

use crate::core::models::{Category, Predicate, Rule, RuleText, SelectorError};
use crate::core::ports::Element;

/// Category code
pub const CODE: &str = "a11y";

const LABEL_ATTRIBUTES: [&str; 3] = ["aria-label", "aria-labelledby", "title"];

/// Whether an element exposes any accessible name
fn has_accessible_name(element: Element<'_>) -> bool {
    if LABEL_ATTRIBUTES
        .iter()
        .any(|name| element.attribute(name).is_some_and(|value| !value.trim().is_empty()))
    {
        return true;
    }
    if !element.text_content().trim().is_empty() {
        return true;
    }
    element.children().any(|child| {
        (child.is("img") && child.attribute("alt").is_some_and(|alt| !alt.trim().is_empty()))
            || has_accessible_name(child)
    })
}

fn inside_dialog(element: Element<'_>) -> bool {
    let mut current = element.parent();
    while let Some(ancestor) = current {
        if ancestor.is("dialog") {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

fn is_invalid_href(href: &str) -> bool {
    let href = href.trim();
    href.is_empty() || href == "#" || href.to_ascii_lowercase().starts_with("javascript:")
}

/// The accessibility category
///
/// # Errors
///
/// Returns an error if a rule selector fails to parse.
pub fn category() -> Result<Category, SelectorError> {
    Ok(Category::new(CODE, "Accessibility", "person-arms-spread")
        .with_rule(
            Rule::new(
                "a11y-image-missing-alt",
                "img:not([alt]), area:not([alt]), input[type='image']:not([alt])",
                "Missing alt attribute",
                "The alt attribute is important for the accessibility of images. \
                 Describe the image, or use an empty alt for decorative images.",
            )?
            .with_description(
                "Screen readers read the alt text in place of the image; without it they \
                 fall back to the file name.",
            ),
        )
        .with_rule(
            Rule::new(
                "a11y-missing-content",
                "a, button, h1, h2, h3, h4, h5, h6",
                "Missing content",
                RuleText::computed(|element| {
                    format!(
                        "This &lt;{}&gt; has no content an assistive technology can announce.",
                        element.tag_name()
                    )
                }),
            )?
            .with_predicate(Predicate::from_fn(|element| Ok(!has_accessible_name(element)))),
        )
        .with_rule(Rule::new(
            "a11y-distracting-elements",
            "marquee, blink",
            "Distracting element",
            "Elements that move or blink on their own can be difficult to use and distracting.",
        )?)
        .with_rule(
            Rule::new(
                "a11y-autofocus",
                "[autofocus]",
                "Avoid autofocus",
                "Autofocus moves the page unexpectedly for keyboard and screen reader users.",
            )?
            .with_predicate(Predicate::from_fn(|element| Ok(!inside_dialog(element)))),
        )
        .with_rule(Rule::new(
            "a11y-accesskey",
            "[accesskey]",
            "Avoid accesskey",
            "Access keys conflict with screen reader and browser shortcuts.",
        )?)
        .with_rule(
            Rule::new(
                "a11y-positive-tabindex",
                "[tabindex]",
                "Avoid positive tabindex",
                "A positive tabindex changes the natural tab order of the page.",
            )?
            .with_predicate(Predicate::from_fn(|element| {
                Ok(element
                    .attribute("tabindex")
                    .and_then(|value| value.trim().parse::<i64>().ok())
                    .is_some_and(|index| index > 0))
            })),
        )
        .with_rule(Rule::new(
            "a11y-missing-lang",
            "html:not([lang])",
            "Missing lang attribute",
            "Set the page language so screen readers pronounce its content correctly.",
        )?)
        .with_rule(
            Rule::new(
                "a11y-invalid-anchor",
                "a[href]",
                "Invalid anchor",
                "This link does not navigate anywhere. Use a button for actions.",
            )?
            .with_predicate(Predicate::from_fn(|element| {
                Ok(element.attribute("href").is_some_and(is_invalid_href))
            })),
        ))
}
