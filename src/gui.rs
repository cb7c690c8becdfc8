use crate::dispatch::{Dispatcher, SelectionEvent};
use crate::inject::{OverlayPayload, TabId};
use crate::menu::{MenuContext, MenuEntry, MenuService};
use crate::overlay::OverlayState;
use crate::settings_editor::SettingsEditor;
use crate::storage::StorageService;
use eframe::egui;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// The single page this shell hosts.
pub const SCRATCHPAD_TAB: TabId = TabId(1);

/// In-app context menu registry, handed to the lifecycle handler as the
/// shell's [`MenuService`].
#[derive(Default)]
pub struct MenuModel {
    entries: Vec<MenuEntry>,
}

impl MenuModel {
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selection_entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.context == MenuContext::Selection)
    }
}

impl MenuService for MenuModel {
    fn remove_all(&mut self) {
        self.entries.clear();
    }

    fn create(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }
}

pub struct DecoderApp {
    pub store: Arc<dyn StorageService>,
    dispatcher: Arc<Dispatcher>,
    menu: MenuModel,
    inbox: Receiver<(TabId, OverlayPayload)>,
    buffer: String,
    /// Byte range of the tracked selection within `buffer`.
    selection: Option<(usize, usize)>,
    overlay: OverlayState,
    settings_editor: SettingsEditor,
    pub show_settings: bool,
    pub error: Option<String>,
}

impl DecoderApp {
    pub fn new(
        store: Arc<dyn StorageService>,
        dispatcher: Arc<Dispatcher>,
        menu: MenuModel,
        inbox: Receiver<(TabId, OverlayPayload)>,
    ) -> Self {
        let settings_editor = SettingsEditor::new(store.as_ref());
        Self {
            store,
            dispatcher,
            menu,
            inbox,
            buffer: String::new(),
            selection: None,
            overlay: OverlayState::new(),
            settings_editor,
            show_settings: false,
            error: None,
        }
    }

    fn selected_text(&self) -> Option<&str> {
        self.selection
            .and_then(|(start, end)| self.buffer.get(start..end))
            .filter(|text| !text.is_empty())
    }

    /// Hand a menu click to the dispatcher off the UI thread.
    fn dispatch(&self, menu_id: String, selection: String) {
        let dispatcher = Arc::clone(&self.dispatcher);
        thread::spawn(move || {
            dispatcher.handle_click(SelectionEvent {
                menu_id,
                selection,
                tab: Some(SCRATCHPAD_TAB),
            });
        });
    }
}

impl eframe::App for DecoderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok((tab, payload)) = self.inbox.try_recv() {
            if tab == SCRATCHPAD_TAB {
                self.overlay.show(payload, Instant::now());
            } else {
                tracing::debug!(tab = tab.0, "payload for unknown tab dropped");
            }
        }
        self.overlay.tick(Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Error Decoder");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.settings_editor = SettingsEditor::new(self.store.as_ref());
                        self.show_settings = true;
                    }
                });
            });
            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error);
            }
            let resp = ui.add_sized(
                ui.available_size(),
                egui::TextEdit::multiline(&mut self.buffer)
                    .id_source("scratchpad")
                    .font(egui::FontId::monospace(13.0))
                    .hint_text("Paste an error message, select part of it, then right-click."),
            );
            // A right click must not clobber the selection it acts on.
            if !resp.secondary_clicked() {
                let state = egui::widgets::text_edit::TextEditState::load(ctx, resp.id)
                    .unwrap_or_default();
                self.selection = state
                    .cursor
                    .char_range()
                    .and_then(|range| char_range_to_byte_range(&self.buffer, range));
            }
            resp.context_menu(|ui| {
                let text = match self.selected_text() {
                    Some(text) => text.to_string(),
                    None => {
                        ui.close_menu();
                        return;
                    }
                };
                if self.menu.selection_entries().next().is_none() {
                    ui.close_menu();
                    return;
                }
                for entry in self.menu.selection_entries() {
                    let label = match &entry.icon {
                        Some(icon) => format!("{icon} {}", entry.title),
                        None => entry.title.clone(),
                    };
                    if ui.button(label).clicked() {
                        self.dispatch(entry.id.clone(), text.clone());
                        ui.close_menu();
                    }
                }
            });
        });

        if self.show_settings {
            let mut editor = std::mem::take(&mut self.settings_editor);
            editor.ui(ctx, self);
            self.settings_editor = editor;
        }

        self.overlay.ui(ctx);
        if let Some(overlay) = self.overlay.current() {
            ctx.request_repaint_after(overlay.deadline().saturating_duration_since(Instant::now()));
        }
    }
}

fn char_to_byte_index(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    match text.char_indices().nth(char_idx) {
        Some((idx, _)) => idx,
        None => text.len(),
    }
}

fn char_range_to_byte_range(text: &str, range: egui::text::CCursorRange) -> Option<(usize, usize)> {
    let [min, max] = range.sorted();
    if min.index == max.index {
        None
    } else {
        Some((
            char_to_byte_index(text, min.index),
            char_to_byte_index(text, max.index),
        ))
    }
}
