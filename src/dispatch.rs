use crate::config;
use crate::inject::{OverlayPayload, PageInjector, TabId};
use crate::menu::SEND_SELECTION_MENU_ID;
use crate::storage::StorageService;
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "error-decoder";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A click on the send-selection menu entry. Carries the selected text and
/// the originating tab; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub menu_id: String,
    pub selection: String,
    /// `None` when the tab was closed before the click was handled.
    pub tab: Option<TabId>,
}

/// Build the POST body for a selection: `t=` followed by the percent-encoded
/// text.
pub fn encode_form_body(selection: &str) -> String {
    format!("t={}", urlencoding::encode(selection))
}

pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build HTTP client")
}

/// Owns the selection flow: read the configured endpoint, POST the selection,
/// hand the response to the page injector.
pub struct Dispatcher {
    store: Arc<dyn StorageService>,
    injector: Arc<dyn PageInjector>,
    client: Client,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn StorageService>, injector: Arc<dyn PageInjector>) -> Result<Self> {
        Ok(Self::with_client(http_client()?, store, injector))
    }

    pub fn with_client(
        client: Client,
        store: Arc<dyn StorageService>,
        injector: Arc<dyn PageInjector>,
    ) -> Self {
        Self {
            store,
            injector,
            client,
        }
    }

    /// Entry point for menu click events. Events from other menu entries are
    /// ignored. Failures end here with a log line; there is no retry and the
    /// page is never touched on error.
    pub fn handle_click(&self, event: SelectionEvent) {
        if event.menu_id != SEND_SELECTION_MENU_ID {
            return;
        }
        if let Err(err) = self.send_selection(&event) {
            tracing::error!("failed to send selection: {err:#}");
        }
    }

    fn send_selection(&self, event: &SelectionEvent) -> Result<()> {
        let url = config::backend_url(self.store.as_ref())?;
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encode_form_body(&event.selection))
            .send()
            .context("send request")?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            bail!("HTTP {status}");
        }
        let body = resp.text().context("read response body")?;
        let tab = match event.tab {
            Some(tab) => tab,
            None => {
                tracing::debug!("originating tab is gone, dropping response");
                return Ok(());
            }
        };
        let seconds =
            config::resolve_dismiss_seconds(config::stored_dismiss_seconds(self.store.as_ref()));
        self.injector.inject(
            tab,
            OverlayPayload {
                response_body: body,
                dismiss_seconds: seconds,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_plain_text_unchanged() {
        assert_eq!(encode_form_body("E1234"), "t=E1234");
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_form_body("a&b=c d"), "t=a%26b%3Dc%20d");
    }

    #[test]
    fn encoding_round_trips() {
        let original = "ORA-00942: table or view \"X\" does not exist?\n\tat offset 3, took 5µs";
        let body = encode_form_body(original);
        let encoded = body.strip_prefix("t=").unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), original);
    }
}
