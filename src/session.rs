use crate::catalog::{self, CatalogLoadResult, ShortcutCatalog, ShortcutCategory, ShortcutItem};
use crate::clipboard::ClipboardSink;
use crate::filter::filter_catalog;
use crate::popup::{PopupSignal, PopupVisibilityController};
use crate::settings::{clamp_opacity, AppSettings, SettingsStore};
use crate::status::StatusLine;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const MSG_LOAD_FAILED: &str = "Failed to load shortcut data.";
pub const MSG_RELOADED: &str = "Shortcuts reloaded.";
pub const MSG_EMPTY_KEYS: &str = "Nothing to copy: keys are empty.";
pub const MSG_COPY_FAILED: &str = "Failed to copy to the clipboard.";

/// Pointer regions whose hover keeps the popups open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    CategoryPopup,
    DetailPopup,
}

/// Where the shortcut catalog is read from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    ExecutableFolder,
    Path(PathBuf),
}

impl CatalogSource {
    fn load(&self) -> CatalogLoadResult {
        match self {
            CatalogSource::ExecutableFolder => catalog::load_from_executable_folder(),
            CatalogSource::Path(path) => catalog::load_from_path(path),
        }
    }
}

/// All state of one running HUD.
///
/// The shell forwards user input here and renders from the accessors. Every
/// change to a persisted preference is written through to the store right
/// away.
pub struct HudSession {
    store: SettingsStore,
    source: CatalogSource,
    settings: AppSettings,
    catalog: ShortcutCatalog,
    catalog_error: Option<String>,
    popup: PopupVisibilityController<Region>,
    status: StatusLine,
    query: String,
    selected: Option<usize>,
}

impl HudSession {
    pub fn start(store: SettingsStore, source: CatalogSource, now: Instant) -> Self {
        let settings = store.load();
        tracing::info!(
            pinned = settings.is_pinned,
            opacity = settings.opacity,
            "settings loaded"
        );
        let mut session = Self {
            store,
            source,
            settings,
            catalog: ShortcutCatalog::default(),
            catalog_error: None,
            popup: PopupVisibilityController::new(settings.is_pinned),
            status: StatusLine::default(),
            query: String::new(),
            selected: None,
        };
        session.load_catalog(now);
        session
    }

    fn load_catalog(&mut self, now: Instant) {
        let result = self.source.load();
        self.catalog = result.data;
        self.catalog_error = result.error_message;
        self.selected = None;
        if self.catalog_error.is_some() {
            self.status.show(MSG_LOAD_FAILED, now);
        }
    }

    /// Replace the catalog with a fresh copy from disk. Load problems stay
    /// visible through [`catalog_error`](Self::catalog_error).
    pub fn reload(&mut self, now: Instant) {
        self.load_catalog(now);
        self.status.show(MSG_RELOADED, now);
    }

    fn apply(&mut self, signal: Option<PopupSignal>) -> Option<PopupSignal> {
        if signal == Some(PopupSignal::Close) {
            self.selected = None;
        }
        signal
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &ShortcutCatalog {
        &self.catalog
    }

    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.text()
    }

    pub fn is_pinned(&self) -> bool {
        self.popup.is_pinned()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup.is_open()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.selected = None;
        }
    }

    pub fn visible_categories(&self) -> Vec<ShortcutCategory> {
        filter_catalog(&self.catalog, &self.query)
    }

    /// Show `index` of [`visible_categories`](Self::visible_categories) in
    /// the detail popup.
    pub fn select_category(&mut self, index: usize) {
        self.selected = Some(index);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_category(&self) -> Option<ShortcutCategory> {
        let index = self.selected?;
        self.visible_categories().into_iter().nth(index)
    }

    pub fn on_region_enter(&mut self, region: Region) -> Option<PopupSignal> {
        let signal = self.popup.on_region_enter(region);
        self.apply(signal)
    }

    pub fn on_region_leave(&mut self, region: Region, now: Instant) {
        self.popup.on_region_leave(&region, now);
    }

    pub fn on_escape(&mut self) -> Option<PopupSignal> {
        let signal = self.popup.on_escape();
        self.apply(signal)
    }

    pub fn on_window_minimized(&mut self) -> Option<PopupSignal> {
        let signal = self.popup.on_window_minimized();
        self.apply(signal)
    }

    pub fn toggle_pin(&mut self, now: Instant) -> Option<PopupSignal> {
        let (pinned, signal) = self.popup.on_toggle_pin(now);
        self.settings.is_pinned = pinned;
        self.store.save(&self.settings);
        tracing::info!(pinned, "pin toggled");
        self.apply(signal)
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        let opacity = clamp_opacity(opacity);
        if opacity == self.settings.opacity {
            return;
        }
        self.settings.opacity = opacity;
        self.store.save(&self.settings);
    }

    /// Record the window position after a drag.
    pub fn move_window(&mut self, left: f64, top: f64) {
        self.settings.window_left = left;
        self.settings.window_top = top;
        self.settings = self.settings.sanitized();
        self.store.save(&self.settings);
    }

    pub fn copy_keys(&mut self, item: &ShortcutItem, clipboard: &mut dyn ClipboardSink, now: Instant) {
        if item.keys.trim().is_empty() {
            self.status.show(MSG_EMPTY_KEYS, now);
            return;
        }
        match clipboard.set_text(&item.keys) {
            Ok(()) => self.status.show(format!("Copied: {}", item.keys), now),
            Err(e) => {
                tracing::warn!("clipboard copy failed: {e:#}");
                self.status.show(MSG_COPY_FAILED, now);
            }
        }
    }

    /// Advance both timers. Returns a popup signal if the close timer fired.
    pub fn tick(&mut self, now: Instant) -> Option<PopupSignal> {
        self.status.tick(now);
        let signal = self.popup.tick(now);
        self.apply(signal)
    }

    /// Delay until the earliest pending timer.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match (self.popup.next_deadline(now), self.status.next_deadline(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Persist the final window state on exit.
    pub fn shutdown(&mut self, left: f64, top: f64, opacity: f64) {
        self.settings.window_left = left;
        self.settings.window_top = top;
        self.settings.opacity = opacity;
        self.settings = self.settings.sanitized();
        self.store.save(&self.settings);
        tracing::info!("session closed");
    }
}
