use tracing::info;

/// Menu entry id for the send-selection action. Click events carry the id of
/// the entry that fired; only this id is dispatched.
pub const SEND_SELECTION_MENU_ID: &str = "send-selection";
pub const SEND_SELECTION_TITLE: &str = "Send selection to Error Decoder";
pub const SEND_SELECTION_ICON: &str = "🔍";

/// Condition under which a menu entry is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuContext {
    /// Shown only while the user has a non-empty text selection.
    Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub context: MenuContext,
    pub icon: Option<String>,
}

/// Context-menu registry capability. The shell hands its implementation to
/// [`register_menu`] at startup; tests hand in their own.
pub trait MenuService {
    /// Remove every registered entry.
    fn remove_all(&mut self);
    /// Register a new entry.
    fn create(&mut self, entry: MenuEntry);
}

/// Ensure exactly one send-selection entry exists. Existing entries are
/// cleared first, so registering again never produces a duplicate id.
pub fn register_menu(menu: &mut dyn MenuService) {
    menu.remove_all();
    menu.create(MenuEntry {
        id: SEND_SELECTION_MENU_ID.to_string(),
        title: SEND_SELECTION_TITLE.to_string(),
        context: MenuContext::Selection,
        icon: Some(SEND_SELECTION_ICON.to_string()),
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// First run: the configuration store was just created.
    Installed,
    /// Any subsequent application start.
    Started,
}

/// Re-register the context menu on install and on every startup so the entry
/// survives resets of the menu registry.
pub fn handle_lifecycle(event: LifecycleEvent, menu: &mut dyn MenuService) {
    match event {
        LifecycleEvent::Installed => info!("installed, creating context menu"),
        LifecycleEvent::Started => info!("started up, creating context menu"),
    }
    register_menu(menu);
}
