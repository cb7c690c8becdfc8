use error_decoder::gui::MenuModel;
use error_decoder::menu::{
    handle_lifecycle, register_menu, LifecycleEvent, MenuContext, MenuEntry, MenuService,
    SEND_SELECTION_MENU_ID, SEND_SELECTION_TITLE,
};

#[test]
fn register_creates_single_selection_entry() {
    let mut menu = MenuModel::default();
    register_menu(&mut menu);

    let entries = menu.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, SEND_SELECTION_MENU_ID);
    assert_eq!(entries[0].title, SEND_SELECTION_TITLE);
    assert_eq!(entries[0].context, MenuContext::Selection);
    assert!(entries[0].icon.is_some());
}

#[test]
fn repeated_registration_never_duplicates() {
    let mut menu = MenuModel::default();
    register_menu(&mut menu);
    register_menu(&mut menu);
    handle_lifecycle(LifecycleEvent::Installed, &mut menu);
    handle_lifecycle(LifecycleEvent::Started, &mut menu);

    assert_eq!(menu.entries().len(), 1);
    assert_eq!(menu.entries()[0].id, SEND_SELECTION_MENU_ID);
}

#[test]
fn registration_clears_stale_entries() {
    let mut menu = MenuModel::default();
    menu.create(MenuEntry {
        id: "stale".into(),
        title: "Old action".into(),
        context: MenuContext::Selection,
        icon: None,
    });

    register_menu(&mut menu);
    assert_eq!(menu.entries().len(), 1);
    assert_eq!(menu.entries()[0].id, SEND_SELECTION_MENU_ID);
}

#[test]
fn selection_entries_filter_by_context() {
    let mut menu = MenuModel::default();
    register_menu(&mut menu);
    assert_eq!(menu.selection_entries().count(), 1);
}
