use eframe::egui;

/// Blocking notice shown when a frame panicked. The HUD keeps running.
#[derive(Default)]
pub struct FaultDialog {
    message: Option<String>,
}

impl FaultDialog {
    pub fn open(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.message else {
            return;
        };
        let mut close = false;
        egui::Window::new("ShortcutHUD")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("An unexpected error occurred.");
                ui.label(egui::RichText::new(message).monospace());
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.message = None;
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}
