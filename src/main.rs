use shortcut_hud::gui::{HudApp, WINDOW_SIZE};
use shortcut_hud::logging;
use shortcut_hud::session::{CatalogSource, HudSession};
use shortcut_hud::settings::SettingsStore;

use eframe::egui;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    logging::init(cfg!(debug_assertions), Some(logging::default_log_path()));
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("unhandled fault: {info}");
    }));

    let session = HudSession::start(
        SettingsStore::user_default(),
        CatalogSource::ExecutableFolder,
        Instant::now(),
    );
    let settings = *session.settings();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ShortcutHUD")
            .with_inner_size(WINDOW_SIZE)
            .with_position([settings.window_left as f32, settings.window_top as f32])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "ShortcutHUD",
        native_options,
        Box::new(move |_cc| Box::new(HudApp::new(session))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the HUD window: {e}"))
}
