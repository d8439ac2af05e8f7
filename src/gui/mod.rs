mod fault_dialog;

pub use fault_dialog::{panic_message, FaultDialog};

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::popup::PopupSignal;
use crate::session::{HudSession, Region};
use eframe::egui;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// Initial viewport size. The header sits at the top and the popups open
/// into the transparent space below it.
pub const WINDOW_SIZE: [f32; 2] = [540.0, 460.0];

const HEADER_ROW_HEIGHT: f32 = 24.0;
const CATEGORY_POPUP_WIDTH: f32 = 200.0;
const DETAIL_POPUP_WIDTH: f32 = 300.0;
const POPUP_MAX_HEIGHT: f32 = 360.0;
const POPUP_GAP: f32 = 4.0;

pub struct HudApp {
    session: HudSession,
    clipboard: Box<dyn ClipboardSink>,
    hovered: HashSet<Region>,
    window_pos: Option<egui::Pos2>,
    dragging: bool,
    minimized: bool,
    closing: bool,
    repaint: bool,
    fault: FaultDialog,
}

impl HudApp {
    pub fn new(session: HudSession) -> Self {
        Self {
            session,
            clipboard: Box::new(SystemClipboard),
            hovered: HashSet::new(),
            window_pos: None,
            dragging: false,
            minimized: false,
            closing: false,
            repaint: false,
            fault: FaultDialog::default(),
        }
    }

    fn fill(&self, ctx: &egui::Context) -> egui::Color32 {
        ctx.style()
            .visuals
            .window_fill()
            .gamma_multiply(self.session.settings().opacity as f32)
    }

    /// Visibility changed after parts of this frame were drawn; draw again.
    fn note(&mut self, signal: Option<PopupSignal>) {
        if signal.is_some() {
            self.repaint = true;
        }
    }

    fn frame(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let signal = self.session.tick(now);
        self.note(signal);
        self.track_viewport(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            let signal = self.session.on_escape();
            self.note(signal);
        }

        let header = self.header_ui(ctx, now);

        let pointer = ctx.pointer_hover_pos();
        let over = |rect: egui::Rect| pointer.map_or(false, |p| rect.contains(p));
        let mut regions = HashSet::new();
        if over(header) {
            regions.insert(Region::Header);
        }

        if self.session.is_popup_open() {
            let anchor = header.left_bottom() + egui::vec2(0.0, POPUP_GAP);
            let (popup, selected_row) = self.category_popup(ctx, anchor);
            if over(popup) {
                regions.insert(Region::CategoryPopup);
            }
            if let Some(row) = selected_row {
                let anchor = egui::pos2(popup.right() + POPUP_GAP, row.top());
                if let Some(detail) = self.detail_popup(ctx, anchor, now) {
                    if over(detail) {
                        regions.insert(Region::DetailPopup);
                    }
                }
            }
        }

        self.update_hover(regions, now);

        if std::mem::take(&mut self.repaint) {
            ctx.request_repaint();
        } else if let Some(delay) = self.session.next_deadline(now) {
            ctx.request_repaint_after(delay);
        }
    }

    /// Turn this frame's hovered regions into enter/leave events.
    fn update_hover(&mut self, regions: HashSet<Region>, now: Instant) {
        let entered: Vec<Region> = regions.difference(&self.hovered).copied().collect();
        for region in entered {
            let signal = self.session.on_region_enter(region);
            self.note(signal);
        }
        for region in self.hovered.difference(&regions) {
            self.session.on_region_leave(*region, now);
        }
        self.hovered = regions;
    }

    fn track_viewport(&mut self, ctx: &egui::Context) {
        let (outer, minimized, close) = ctx.input(|i| {
            let vp = i.viewport();
            (vp.outer_rect, vp.minimized, vp.close_requested())
        });
        if let Some(rect) = outer {
            self.window_pos = Some(rect.min);
        }

        let minimized = minimized.unwrap_or(false);
        if minimized && !self.minimized {
            let signal = self.session.on_window_minimized();
            self.note(signal);
        }
        self.minimized = minimized;

        if self.dragging && !ctx.input(|i| i.pointer.any_down()) {
            self.dragging = false;
            if let Some(pos) = self.window_pos {
                self.session.move_window(pos.x as f64, pos.y as f64);
            }
        }

        if close && !self.closing {
            self.closing = true;
            let settings = *self.session.settings();
            let (left, top) = self
                .window_pos
                .map(|p| (p.x as f64, p.y as f64))
                .unwrap_or((settings.window_left, settings.window_top));
            self.session.shutdown(left, top, settings.opacity);
        }
    }

    fn header_ui(&mut self, ctx: &egui::Context, now: Instant) -> egui::Rect {
        let frame = egui::Frame::none()
            .fill(self.fill(ctx))
            .rounding(6.0)
            .inner_margin(egui::Margin::symmetric(8.0, 4.0));

        egui::TopBottomPanel::top("hud_header")
            .frame(frame)
            .show_separator_line(false)
            .show(ctx, |ui| {
                // Allocated before the buttons so they sit on top of it.
                let (rect, drag) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), HEADER_ROW_HEIGHT),
                    egui::Sense::click_and_drag(),
                );
                if drag.drag_started_by(egui::PointerButton::Primary) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                    self.dragging = true;
                }
                drag.context_menu(|ui| self.menu_ui(ui, now));

                let mut row = ui.child_ui(rect, egui::Layout::left_to_right(egui::Align::Center));
                row.label(egui::RichText::new("Shortcuts").strong());
                row.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .small_button("—")
                        .on_hover_text("Minimize")
                        .clicked()
                    {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
                    }
                    let pinned = self.session.is_pinned();
                    let (label, hint) = if pinned {
                        ("📌", "Unpin")
                    } else {
                        ("📍", "Pin")
                    };
                    if ui.small_button(label).on_hover_text(hint).clicked() {
                        let signal = self.session.toggle_pin(now);
                        self.note(signal);
                    }
                });

                if let Some(text) = self.session.status_text() {
                    ui.small(text);
                }
            })
            .response
            .rect
    }

    fn menu_ui(&mut self, ui: &mut egui::Ui, now: Instant) {
        let pin_text = if self.session.is_pinned() {
            "Pin: ON"
        } else {
            "Pin: OFF"
        };
        if ui.button(pin_text).clicked() {
            let signal = self.session.toggle_pin(now);
            self.note(signal);
            ui.close_menu();
        }
        ui.horizontal(|ui| {
            ui.label("Opacity");
            let mut percent = self.session.settings().opacity * 100.0;
            if ui
                .add(egui::Slider::new(&mut percent, 20.0..=100.0).integer().suffix("%"))
                .changed()
            {
                self.session.set_opacity(percent / 100.0);
            }
        });
        if ui.button("Reload shortcuts").clicked() {
            self.session.reload(now);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Exit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            ui.close_menu();
        }
    }

    /// Returns the popup rect and the rect of the selected category row.
    fn category_popup(
        &mut self,
        ctx: &egui::Context,
        pos: egui::Pos2,
    ) -> (egui::Rect, Option<egui::Rect>) {
        let fill = self.fill(ctx);
        let mut selected_row = None;
        let area = egui::Area::new(egui::Id::new("hud_category_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                    ui.set_width(CATEGORY_POPUP_WIDTH);

                    let mut query = self.session.query().to_string();
                    if ui
                        .add(egui::TextEdit::singleline(&mut query).hint_text("Search"))
                        .changed()
                    {
                        self.session.set_query(query);
                    }

                    if let Some(err) = self.session.catalog_error() {
                        let color = ui.visuals().warn_fg_color;
                        ui.colored_label(color, err);
                    }

                    let categories = self.session.visible_categories();
                    if categories.is_empty() && self.session.catalog_error().is_none() {
                        if self.session.query().trim().is_empty() {
                            ui.weak("No categories.");
                        } else {
                            ui.weak("No matches.");
                        }
                    }

                    let selected = self.session.selected_index();
                    egui::ScrollArea::vertical()
                        .id_source("hud_categories")
                        .max_height(POPUP_MAX_HEIGHT)
                        .show(ui, |ui| {
                            for (i, category) in categories.iter().enumerate() {
                                let resp = ui.selectable_label(selected == Some(i), &category.name);
                                if resp.hovered() {
                                    self.session.select_category(i);
                                    selected_row = Some(resp.rect);
                                } else if selected == Some(i) && selected_row.is_none() {
                                    selected_row = Some(resp.rect);
                                }
                            }
                        });
                });
            });
        (area.response.rect, selected_row)
    }

    fn detail_popup(
        &mut self,
        ctx: &egui::Context,
        pos: egui::Pos2,
        now: Instant,
    ) -> Option<egui::Rect> {
        let category = self.session.selected_category()?;
        let fill = self.fill(ctx);
        let area = egui::Area::new(egui::Id::new("hud_detail_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                    ui.set_width(DETAIL_POPUP_WIDTH);
                    ui.label(egui::RichText::new(&category.name).strong());
                    ui.separator();
                    if category.items.is_empty() {
                        ui.weak("No shortcuts in this category.");
                    }
                    egui::ScrollArea::vertical()
                        .id_source("hud_items")
                        .max_height(POPUP_MAX_HEIGHT)
                        .show(ui, |ui| {
                            for item in &category.items {
                                let text = format!("{}    {}", item.name, item.keys);
                                let mut resp = ui.add(
                                    egui::Button::new(text)
                                        .min_size(egui::vec2(ui.available_width(), 0.0)),
                                );
                                if !item.note.is_empty() {
                                    ui.weak(&item.note);
                                    resp = resp.on_hover_text(&item.note);
                                }
                                if resp.clicked() {
                                    self.session.copy_keys(item, self.clipboard.as_mut(), now);
                                }
                            }
                        });
                });
            });
        Some(area.response.rect)
    }
}

impl eframe::App for HudApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(|| self.frame(ctx))) {
            let message = panic_message(payload.as_ref());
            tracing::error!("recovered from fault: {message}");
            self.fault.open(message);
        }
        self.fault.ui(ctx);
    }
}
