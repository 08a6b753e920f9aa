//! Open-in-editor requests
//!
//! Sends the dev server's open-in-editor request for a source location.
//! The request is fire-and-forget: failures are logged, never returned.

use std::time::Duration;

use log::{debug, warn};

use crate::core::models::EditorLink;
use crate::core::services::tooltip::editor_link;

/// Default dev server address
pub const DEFAULT_SERVER: &str = "http://localhost:4321";

/// Sends open-in-editor requests to a running dev server
#[derive(Debug, Clone)]
pub struct EditorLauncher {
    server: String,
    client: reqwest::Client,
}

impl EditorLauncher {
    /// Launcher for the dev server at `server`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(server: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(Self {
            server: server.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Full URL of an editor link
    #[must_use]
    pub fn url(&self, link: &EditorLink) -> String {
        format!("{}{}", self.server, link.href)
    }

    /// Follow an editor link; returns whether the server accepted it
    pub async fn open(&self, link: &EditorLink) -> bool {
        let url = self.url(link);
        debug!("requesting {url}");
        match self.client.get(&url).send().await.and_then(reqwest::Response::error_for_status) {
            Ok(_) => true,
            Err(err) => {
                warn!("Failed to open file in editor: {err}");
                false
            },
        }
    }

    /// Open `file[:line:column]` in the editor
    pub async fn open_file(&self, file_with_position: &str) -> bool {
        self.open(&editor_link(file_with_position)).await
    }
}
