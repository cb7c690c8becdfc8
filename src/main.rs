use anyhow::Context;
use eframe::egui;
use error_decoder::dispatch::{self, Dispatcher};
use error_decoder::gui::{DecoderApp, MenuModel};
use error_decoder::inject::ChannelInjector;
use error_decoder::menu::{handle_lifecycle, LifecycleEvent};
use error_decoder::storage::{JsonFileStore, StorageService, StoreOpened};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

fn main() -> anyhow::Result<()> {
    error_decoder::logging::init();

    let store_path = store_path()?;
    let (store, opened) = JsonFileStore::open(&store_path)
        .with_context(|| format!("open config store {}", store_path.display()))?;
    tracing::info!("config store at {}", store.path().display());
    let store: Arc<dyn StorageService> = Arc::new(store);

    let mut menu = MenuModel::default();
    if opened == StoreOpened::Created {
        handle_lifecycle(LifecycleEvent::Installed, &mut menu);
    }
    handle_lifecycle(LifecycleEvent::Started, &mut menu);

    let client = dispatch::http_client()?;
    let (tx, rx) = mpsc::channel();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([360.0, 240.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Error Decoder",
        native_options,
        Box::new(move |cc| {
            let injector = Arc::new(ChannelInjector::new(tx, cc.egui_ctx.clone()));
            let dispatcher = Arc::new(Dispatcher::with_client(
                client,
                Arc::clone(&store),
                injector,
            ));
            Box::new(DecoderApp::new(store, dispatcher, menu, rx))
        }),
    );
    if let Err(err) = result {
        tracing::error!("ui loop failed: {err}");
    }
    Ok(())
}

fn store_path() -> anyhow::Result<PathBuf> {
    let dir = dirs_next::config_dir().context("no config directory")?;
    Ok(dir.join("error_decoder").join("config.json"))
}
