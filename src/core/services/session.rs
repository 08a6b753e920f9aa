//! Audit session - owns the issues and overlays of the latest pass
//!
//! A session is the only owner of audit state. Every pass supersedes the
//! previous one: overlays created for earlier issues are released before new
//! ones are allocated, and results of a pass that was overtaken by a newer
//! one are discarded.

use log::debug;

use super::auditor::audit;
use super::report::AuditReport;
use super::tooltip::build_tooltip;
use crate::core::models::{AuditState, Issue, RuleCatalog};
use crate::core::ports::{Document, OverlayFactory, OverlayId};

/// Generation token of one audit pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassToken(u64);

#[derive(Debug)]
struct AuditEntry {
    issue: Issue,
    overlay: OverlayId,
}

/// Audit state for one page and one overlay factory
#[derive(Debug)]
pub struct AuditSession<O: OverlayFactory> {
    overlays: O,
    root: String,
    entries: Vec<AuditEntry>,
    state: AuditState,
    generation: u64,
}

impl<O: OverlayFactory> AuditSession<O> {
    /// Create a session; `root` is the project root shown paths are relative to
    pub fn new(overlays: O, root: impl Into<String>) -> Self {
        Self {
            overlays,
            root: root.into(),
            entries: Vec::new(),
            state: AuditState::NotRun,
            generation: 0,
        }
    }

    /// Start a pass, superseding any pass still in flight
    pub const fn begin_pass(&mut self) -> PassToken {
        self.generation += 1;
        PassToken(self.generation)
    }

    /// Whether `token` belongs to the newest pass
    #[must_use]
    pub const fn is_current(&self, token: PassToken) -> bool {
        token.0 == self.generation
    }

    /// Install the issues of a finished pass
    ///
    /// Returns `false` and leaves the visible state untouched when a newer
    /// pass was started after `token` was issued.
    pub fn install(&mut self, token: PassToken, issues: Vec<Issue>) -> bool {
        if !self.is_current(token) {
            debug!("discarding results of superseded audit pass {}", token.0);
            return false;
        }

        self.teardown();

        for issue in issues {
            let overlay = self.overlays.create(issue.rect, &issue.rule.code);
            if issue.is_fixed {
                self.overlays.set_fixed(overlay);
            }
            let tooltip = build_tooltip(&issue, &self.root);
            self.overlays.attach_tooltip(overlay, &tooltip);
            self.entries.push(AuditEntry { issue, overlay });
        }

        self.state = AuditState::from_count(self.entries.len());
        true
    }

    /// Run a full pass: compute issues, then replace the visible state
    pub async fn run(&mut self, catalog: &RuleCatalog, document: &dyn Document) -> AuditState {
        let token = self.begin_pass();
        let issues = audit(catalog, document).await;
        self.install(token, issues);
        self.state
    }

    /// Move every highlight to its element's current position
    pub fn refresh_positions(&mut self, document: &dyn Document) {
        for entry in &self.entries {
            if let Some(rect) = document.layout_box(entry.issue.node) {
                self.overlays.position(entry.overlay, rect);
            }
        }
    }

    /// Release every overlay and forget the issues
    pub fn teardown(&mut self) {
        for entry in self.entries.drain(..) {
            self.overlays.remove(entry.overlay);
        }
        self.state = AuditState::NotRun;
    }

    /// State of the latest installed pass
    #[must_use]
    pub const fn state(&self) -> AuditState {
        self.state
    }

    /// Whether the toolbar should show the notification dot
    #[must_use]
    pub const fn notification_active(&self) -> bool {
        matches!(self.state, AuditState::Issues { .. })
    }

    /// Issues of the latest pass, in audit order
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.entries.iter().map(|entry| &entry.issue)
    }

    /// Overlay of each issue, in audit order
    pub fn overlay_ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.entries.iter().map(|entry| entry.overlay)
    }

    /// The overlay factory
    #[must_use]
    pub const fn overlays(&self) -> &O {
        &self.overlays
    }

    /// Group the latest issues by category
    #[must_use]
    pub fn report(&self, catalog: &RuleCatalog) -> AuditReport {
        AuditReport::summarize(catalog, self.state, self.issues())
    }
}

impl<O: OverlayFactory> Drop for AuditSession<O> {
    fn drop(&mut self) {
        self.teardown();
    }
}
