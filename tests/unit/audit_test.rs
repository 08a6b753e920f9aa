//! Tests for the audit pass and the audit session

use devbar::adapters::MarkerBoard;
use devbar::core::models::{AuditState, Category, MatchFuture, Predicate, Rule, RuleCatalog};
use devbar::core::services::{AuditSession, audit};
use devbar::rules::builtin_catalog;
use serde_json::json;

use crate::common::{hidden, page, rendered};

fn a11y(rules: Vec<Rule>) -> RuleCatalog {
    let category = rules
        .into_iter()
        .fold(Category::new("a11y", "Accessibility", "person-arms-spread"), Category::with_rule);
    RuleCatalog::new(vec![category]).unwrap()
}

fn missing_alt() -> Rule {
    Rule::new("a11y-image-missing-alt", "img:not([alt])", "Missing alt", "Add alt").unwrap()
}

// =============================================================================
// END-TO-END
// =============================================================================

#[tokio::test]
async fn test_only_visible_image_without_alt_is_reported() {
    let doc = page(vec![
        rendered("img", json!({ "src": "/a.png" })),
        hidden("img", json!({ "src": "/b.png" })),
    ]);

    let issues = audit(&a11y(vec![missing_alt()]), &doc).await;

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].node, 1);
    assert_eq!(issues[0].category, "a11y");
    assert_eq!(issues[0].rule.code, "a11y-image-missing-alt");
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[tokio::test]
async fn test_rerun_without_mutation_is_deterministic() {
    let doc = page(vec![
        rendered("img", json!({})),
        rendered("a", json!({ "href": "#" })),
        rendered("marquee", json!({})),
        rendered("button", json!({})),
    ]);
    let catalog = builtin_catalog().unwrap();

    let first = audit(&catalog, &doc).await;
    let second = audit(&catalog, &doc).await;

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_element_matched_by_two_rules_gets_one_issue() {
    let doc = page(vec![rendered("img", json!({}))]);
    let catalog = RuleCatalog::new(vec![
        Category::new("a11y", "Accessibility", "a").with_rule(missing_alt()),
        Category::new("perf", "Performance", "p")
            .with_rule(Rule::new("perf-any-image", "img", "t", "m").unwrap()),
    ])
    .unwrap();

    let issues = audit(&catalog, &doc).await;

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule.code, "a11y-image-missing-alt");
}

#[tokio::test]
async fn test_loading_image_is_never_reported() {
    let doc = page(vec![json!({
        "tag": "img",
        "rect": { "width": 10, "height": 10 },
        "complete": false
    })]);

    assert!(audit(&a11y(vec![missing_alt()]), &doc).await.is_empty());
}

#[tokio::test]
async fn test_throwing_predicate_leaves_other_rules_alone() {
    let doc = page(vec![rendered("img", json!({})), rendered("a", json!({ "accesskey": "s" }))]);
    let catalog = a11y(vec![
        Rule::new("a11y-broken", "img", "t", "m")
            .unwrap()
            .with_predicate(Predicate::from_fn(|_| anyhow::bail!("predicate failed"))),
        missing_alt(),
        Rule::new("a11y-accesskey", "[accesskey]", "t", "m").unwrap(),
    ]);

    let issues = audit(&catalog, &doc).await;
    let codes: Vec<&str> = issues.iter().map(|i| i.rule.code.as_str()).collect();

    assert_eq!(codes, ["a11y-image-missing-alt", "a11y-accesskey"]);
}

#[tokio::test]
async fn test_async_predicate_is_awaited() {
    let doc = page(vec![rendered("a", json!({ "tabindex": "3" })), rendered("a", json!({ "tabindex": "0" }))]);
    let catalog = a11y(vec![Rule::new("a11y-positive-tabindex", "[tabindex]", "t", "m")
        .unwrap()
        .with_predicate(Predicate::new(|element| {
            let future: MatchFuture<'_> = Box::pin(async move {
                tokio::task::yield_now().await;
                Ok(element.attribute("tabindex").and_then(|v| v.parse::<i32>().ok()).unwrap_or(0) > 0)
            });
            future
        }))]);

    let issues = audit(&catalog, &doc).await;
    assert_eq!(issues.iter().map(|i| i.node).collect::<Vec<_>>(), [1]);
}

#[tokio::test]
async fn test_wrapper_uses_first_child_layout() {
    let doc = page(vec![json!({
        "tag": "a",
        "attributes": { "accesskey": "x" },
        "children": [ { "tag": "span" } ]
    })]);
    let catalog = a11y(vec![Rule::new("a11y-accesskey", "[accesskey]", "t", "m").unwrap()]);

    // Neither the anchor's child nor the anchor was laid out
    assert!(audit(&catalog, &doc).await.is_empty());
}

// =============================================================================
// BUILT-IN RULES
// =============================================================================

#[tokio::test]
async fn test_builtin_rules_flag_common_problems() {
    let doc = page(vec![
        rendered("img", json!({ "src": "https://cdn.example.com/a.png" })),
        json!({ "tag": "a", "attributes": { "href": "javascript:void(0)" }, "text": "Open",
                "rect": { "width": 30, "height": 10 } }),
        rendered("marquee", json!({})),
        rendered("input", json!({ "autofocus": "" })),
        rendered("astro-island", json!({ "server-render-time": "812.4" })),
        rendered("astro-island", json!({ "server-render-time": "20" })),
    ]);

    let issues = audit(&builtin_catalog().unwrap(), &doc).await;
    let codes: Vec<&str> = issues.iter().map(|i| i.rule.code.as_str()).collect();

    assert_eq!(
        codes,
        [
            "a11y-image-missing-alt",
            "a11y-distracting-elements",
            "a11y-autofocus",
            "a11y-invalid-anchor",
            "perf-slow-component-server-render",
        ]
    );
    let slow = issues.last().unwrap();
    assert_eq!(slow.rule.message, "This component took 812ms to render on the server.");
}

#[tokio::test]
async fn test_lazy_loading_above_the_fold_is_flagged() {
    let doc = page(vec![
        json!({ "tag": "img", "attributes": { "alt": "", "src": "https://x/a.png", "loading": "lazy" },
                "rect": { "y": 100, "width": 10, "height": 10 } }),
        json!({ "tag": "img", "attributes": { "alt": "", "src": "https://x/b.png" },
                "rect": { "y": 1500, "width": 10, "height": 10 } }),
    ]);

    let issues = audit(&builtin_catalog().unwrap(), &doc).await;
    let codes: Vec<&str> = issues.iter().map(|i| i.rule.code.as_str()).collect();

    assert_eq!(codes, ["perf-use-loading-lazy", "perf-use-loading-eager"]);
    assert_eq!(issues[0].node, 2);
    assert_eq!(issues[1].node, 1);
}

// =============================================================================
// SESSION
// =============================================================================

#[tokio::test]
async fn test_rerun_replaces_overlays_instead_of_duplicating() {
    let doc = page(vec![rendered("img", json!({})), rendered("img", json!({}))]);
    let catalog = a11y(vec![missing_alt()]);
    let mut session = AuditSession::new(MarkerBoard::new(), "/project");

    assert_eq!(session.state(), AuditState::NotRun);
    assert_eq!(session.run(&catalog, &doc).await, AuditState::Issues { count: 2 });
    assert_eq!(session.run(&catalog, &doc).await, AuditState::Issues { count: 2 });

    assert_eq!(session.overlays().live(), 2);
    assert_eq!(session.overlays().created(), 4);
    assert!(session.notification_active());
}

#[tokio::test]
async fn test_clean_page_reports_no_issues() {
    let doc = page(vec![rendered("img", json!({ "alt": "A cat", "src": "https://x/cat.png" }))]);
    let mut session = AuditSession::new(MarkerBoard::new(), "/project");

    assert_eq!(session.run(&builtin_catalog().unwrap(), &doc).await, AuditState::NoIssues);
    assert!(!session.notification_active());
    assert_eq!(session.report(&builtin_catalog().unwrap()).total(), 0);
}

#[tokio::test]
async fn test_refresh_moves_markers_to_new_layout() {
    let before = page(vec![rendered("img", json!({}))]);
    let after = page(vec![json!({ "tag": "img", "rect": { "x": 40, "y": 300, "width": 10, "height": 10 } })]);
    let mut session = AuditSession::new(MarkerBoard::new(), "/project");
    session.run(&a11y(vec![missing_alt()]), &before).await;

    session.refresh_positions(&after);

    let marker = session.overlays().markers().next().unwrap();
    assert!((marker.rect.y - 300.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_report_groups_by_category() {
    let doc = page(vec![rendered("img", json!({})), rendered("marquee", json!({}))]);
    let catalog = builtin_catalog().unwrap();
    let mut session = AuditSession::new(MarkerBoard::new(), "/project");
    session.run(&catalog, &doc).await;

    let report = session.report(&catalog);
    let a11y = report.category("a11y").unwrap();
    assert_eq!(a11y.count, 2);
    assert_eq!(report.category("perf").unwrap().count, 0);
    assert_eq!(report.total(), 2);
}
