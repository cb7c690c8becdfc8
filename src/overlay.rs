use crate::inject::OverlayPayload;
use eframe::egui;
use scraper::{Html, Selector};
use std::time::{Duration, Instant};

/// Panel identifier; at most one overlay exists per page, and showing a new
/// one replaces the old.
pub const OVERLAY_ID: &str = "error-decoder-overlay";
/// Shown when the response has no `<pre>` element.
pub const NO_PRE_FALLBACK: &str = "No preformatted block found in response";

/// Trimmed text of the first `<pre>` element of an HTML document, or `None`
/// when the document has none. Malformed markup is parsed leniently, never
/// rejected.
pub fn extract_pre_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("pre").unwrap();
    document
        .select(&selector)
        .next()
        .map(|pre| pre.text().collect::<String>().trim().to_string())
}

#[derive(Debug, Clone)]
pub struct Overlay {
    text: String,
    deadline: Instant,
}

impl Overlay {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// The page's single overlay slot. Rendering, replacement, manual close and
/// scheduled auto-dismiss all go through here.
#[derive(Debug, Default)]
pub struct OverlayState {
    current: Option<Overlay>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a payload into the slot, replacing any overlay already there.
    /// The deadline is `dismiss_seconds` from `now`; negative values clamp
    /// to an immediate deadline, huge ones so the `Instant` math cannot
    /// overflow.
    pub fn show(&mut self, payload: OverlayPayload, now: Instant) {
        let text = extract_pre_text(&payload.response_body)
            .unwrap_or_else(|| NO_PRE_FALLBACK.to_string());
        let seconds = payload.dismiss_seconds.clamp(0, i64::from(u32::MAX)) as u64;
        self.current = Some(Overlay {
            text,
            deadline: now + Duration::from_secs(seconds),
        });
    }

    /// Manual close. Dismissing an empty slot is a no-op.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the overlay once its deadline has passed. Safe to call at any
    /// time, including after a manual dismiss.
    pub fn tick(&mut self, now: Instant) {
        if let Some(overlay) = &self.current {
            if now >= overlay.deadline {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&Overlay> {
        self.current.as_ref()
    }

    /// Draw the overlay as a fixed panel in the bottom-right corner, above
    /// all other content.
    pub fn ui(&mut self, ctx: &egui::Context) {
        let text = match &self.current {
            Some(overlay) => overlay.text.clone(),
            None => return,
        };
        let mut close = false;
        egui::Area::new(egui::Id::new(OVERLAY_ID))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(egui::Color32::WHITE)
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(204)))
                    .rounding(8.0)
                    .inner_margin(egui::Margin {
                        left: 14.0,
                        right: 14.0,
                        top: 12.0,
                        bottom: 12.0,
                    })
                    .shadow(ctx.style().visuals.window_shadow)
                    .show(ui, |ui| {
                        ui.set_max_width(1000.0);
                        ui.set_min_height(50.0);
                        ui.horizontal_top(|ui| {
                            egui::ScrollArea::both().max_height(300.0).show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(text)
                                        .color(egui::Color32::from_gray(17))
                                        .font(egui::FontId::monospace(12.0)),
                                );
                            });
                            if ui
                                .button(
                                    egui::RichText::new("x")
                                        .color(egui::Color32::from_gray(102)),
                                )
                                .clicked()
                            {
                                close = true;
                            }
                        });
                    });
            });
        if close {
            self.dismiss();
        }
    }
}
