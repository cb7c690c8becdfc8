use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// Identifier of the page a selection came from and the overlay goes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

/// Structured message delivered to a page's overlay agent. The agent decides
/// how to render it; no code or markup crosses this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPayload {
    pub response_body: String,
    pub dismiss_seconds: i64,
}

/// Delivery capability for overlay payloads. The dispatcher calls this from
/// worker threads, so implementations must be thread-safe.
pub trait PageInjector: Send + Sync {
    fn inject(&self, tab: TabId, payload: OverlayPayload) -> Result<()>;
}

/// Production injector: queues the payload for the UI loop and wakes it.
pub struct ChannelInjector {
    tx: Sender<(TabId, OverlayPayload)>,
    ctx: eframe::egui::Context,
}

impl ChannelInjector {
    pub fn new(tx: Sender<(TabId, OverlayPayload)>, ctx: eframe::egui::Context) -> Self {
        Self { tx, ctx }
    }
}

impl PageInjector for ChannelInjector {
    fn inject(&self, tab: TabId, payload: OverlayPayload) -> Result<()> {
        self.tx
            .send((tab, payload))
            .map_err(|_| anyhow!("overlay agent is gone"))?;
        self.ctx.request_repaint();
        Ok(())
    }
}
