use crate::config::{BACKEND_URL_KEY, DISMISS_SECONDS_KEY, MAX_DISMISS_SECONDS};
use crate::gui::DecoderApp;
use crate::storage::StorageService;
use eframe::egui;
use serde_json::Value;

/// Parse the dismiss-delay form field. `Some` only for integers within
/// `0..=MAX_DISMISS_SECONDS`; anything else means the stored key must go.
pub fn parse_dismiss_input(input: &str) -> Option<i64> {
    let n: i64 = input.trim().parse().ok()?;
    (0..=MAX_DISMISS_SECONDS).contains(&n).then_some(n)
}

/// Form state for the settings window. Fields hold raw user input; nothing is
/// validated or written until Save.
#[derive(Default)]
pub struct SettingsEditor {
    pub url: String,
    pub dismiss_seconds: String,
}

impl SettingsEditor {
    /// Populate the form from the store.
    pub fn new(store: &dyn StorageService) -> Self {
        let url = store
            .get(BACKEND_URL_KEY)
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();
        let dismiss_seconds = store
            .get(DISMISS_SECONDS_KEY)
            .as_ref()
            .and_then(Value::as_i64)
            .map(|n| n.to_string())
            .unwrap_or_default();
        Self {
            url,
            dismiss_seconds,
        }
    }

    /// Write both fields through to the store. Each field is handled on its
    /// own: a usable value overwrites the key, anything else deletes it, and
    /// one field never blocks the other.
    pub fn save(&self, store: &dyn StorageService) -> anyhow::Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            store.remove(BACKEND_URL_KEY)?;
            tracing::debug!("backend URL cleared");
        } else {
            store.set(BACKEND_URL_KEY, Value::from(url))?;
            tracing::debug!(url, "backend URL saved");
        }
        match parse_dismiss_input(&self.dismiss_seconds) {
            Some(seconds) => {
                store.set(DISMISS_SECONDS_KEY, Value::from(seconds))?;
                tracing::debug!(seconds, "dismiss delay saved");
            }
            None => {
                store.remove(DISMISS_SECONDS_KEY)?;
                tracing::debug!("dismiss delay cleared, default applies");
            }
        }
        Ok(())
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut DecoderApp) {
        let mut open = app.show_settings;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Backend URL");
                    ui.text_edit_singleline(&mut self.url);
                });
                ui.horizontal(|ui| {
                    ui.label("Auto-dismiss seconds");
                    ui.text_edit_singleline(&mut self.dismiss_seconds);
                });
                if ui.button("Save").clicked() {
                    if let Err(e) = self.save(app.store.as_ref()) {
                        app.error = Some(format!("Failed to save settings: {e}"));
                    }
                }
            });
        app.show_settings = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_bounds() {
        assert_eq!(parse_dismiss_input("0"), Some(0));
        assert_eq!(parse_dismiss_input("90"), Some(90));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_dismiss_input(" 45 "), Some(45));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(parse_dismiss_input("91"), None);
        assert_eq!(parse_dismiss_input("-1"), None);
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_dismiss_input("abc"), None);
        assert_eq!(parse_dismiss_input(""), None);
        assert_eq!(parse_dismiss_input("1.5"), None);
    }
}
