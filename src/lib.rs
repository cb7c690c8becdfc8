pub mod config;
pub mod dispatch;
pub mod inject;
pub mod logging;
pub mod menu;
pub mod overlay;
pub mod settings_editor;
pub mod storage;

pub mod gui;
