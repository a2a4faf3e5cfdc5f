//! egui renderer for the training log.
//!
//! The renderer only reads controller state and forwards user events back to
//! it; rows are drawn in the order the controller holds them.

pub mod fields;
pub mod style;

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::TrainingRowView;
use crate::training::FormField;
use eframe::egui::{self, Align, Align2, Frame, Layout, Margin, RichText, Ui, Vec2};
use fields::DistanceInput;

/// Smallest window that still fits the form row and the table header.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(420.0, 320.0);
/// Window size on first launch.
pub const DEFAULT_VIEWPORT_SIZE: Vec2 = Vec2::new(560.0, 520.0);

const DATE_LABEL: &str = "Дата (ДД.ММ.ГГ)";
const DISTANCE_LABEL: &str = "Пройдено км";
const ACTIONS_LABEL: &str = "Действия";
const EMPTY_STATE: &str = "Нет данных о тренировках";
const DATE_PLACEHOLDER: &str = "20.07.2019";
const DISTANCE_PLACEHOLDER: &str = "5.7";
const COLUMN_WIDTHS: [f32; 3] = [180.0, 140.0, 90.0];

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    startup_applied: bool,
}

impl EguiApp {
    /// Create the app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let mut controller = EguiController::default();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            startup_applied: false,
        }
    }

    fn apply_startup(&mut self, ctx: &egui::Context) {
        if self.startup_applied {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        if self.controller.settings().start_maximized {
            ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(true));
        }
        self.startup_applied = true;
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::NONE.fill(palette.bg_primary).inner_margin(Margin::symmetric(8, 4)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let mut submit = false;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.label(DATE_LABEL);
                let mut date = self.controller.ui.form.date.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut date)
                        .id(egui::Id::new("entry_date"))
                        .hint_text(DATE_PLACEHOLDER)
                        .desired_width(COLUMN_WIDTHS[0] - 16.0),
                );
                if self.controller.ui.focus_date_requested {
                    response.request_focus();
                    self.controller.ui.focus_date_requested = false;
                }
                if response.changed() {
                    self.controller.update_field(FormField::Date, date);
                }
                submit |= enter_pressed(ui, &response);
            });
            ui.vertical(|ui| {
                ui.label(DISTANCE_LABEL);
                let mut distance = self.controller.ui.form.distance.clone();
                let response = DistanceInput::new(&mut distance, egui::Id::new("entry_distance"))
                    .hint(DISTANCE_PLACEHOLDER)
                    .width(COLUMN_WIDTHS[1] - 16.0)
                    .show(ui);
                if response.changed() {
                    self.controller.update_field(FormField::Distance, distance);
                }
                submit |= enter_pressed(ui, &response);
            });
            ui.vertical(|ui| {
                ui.label("");
                if ui.button(RichText::new("OK").strong()).clicked() {
                    submit = true;
                }
            });
        });
        if submit {
            // Rejections surface through the alert window.
            let _ = self.controller.submit_form();
        }
    }

    fn render_table(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        Frame::NONE
            .stroke(style::outer_border())
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                egui::Grid::new("training_table")
                    .num_columns(3)
                    .min_col_width(0.0)
                    .striped(true)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for (label, width) in [DATE_LABEL, DISTANCE_LABEL, ACTIONS_LABEL]
                            .into_iter()
                            .zip(COLUMN_WIDTHS)
                        {
                            sized_cell(ui, width, RichText::new(label).color(palette.text_muted));
                        }
                        ui.end_row();
                    });
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("training_rows_scroll")
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if self.controller.ui.rows.is_empty() {
                            ui.add_space(12.0);
                            ui.vertical_centered(|ui| {
                                ui.label(RichText::new(EMPTY_STATE).color(palette.text_muted));
                            });
                            ui.add_space(12.0);
                            return;
                        }
                        if let Some(id) = render_rows(ui, &self.controller.ui.rows) {
                            self.controller.delete_training(id);
                        }
                    });
            });
    }

    /// `accept_keys` is false on the frame that raised the alert, so the Enter
    /// press that submitted the form does not also dismiss it.
    fn render_alert(&mut self, ctx: &egui::Context, accept_keys: bool) {
        let Some(alert) = self.controller.ui.alert.as_ref() else {
            return;
        };
        let message = alert.message.clone();
        let mut open = true;
        let mut acknowledged = false;
        egui::Window::new("Внимание")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.label(message);
                ui.add_space(8.0);
                ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                    acknowledged = ui.button("OK").clicked();
                });
            });
        let keys = accept_keys
            && ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));
        if acknowledged || keys || !open {
            self.controller.dismiss_alert();
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_startup(ctx);
        self.render_status(ctx);
        // A pending alert blocks the form and the table like a browser dialog.
        let blocked = self.controller.ui.alert.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                self.render_form(ui);
                ui.add_space(16.0);
                self.render_table(ui);
            });
        });
        self.render_alert(ctx, blocked);
    }
}

/// Draw data rows; returns the id whose delete button was clicked.
fn render_rows(ui: &mut Ui, rows: &[TrainingRowView]) -> Option<crate::training::TrainingId> {
    let mut deleted = None;
    egui::Grid::new("training_rows")
        .num_columns(3)
        .min_col_width(0.0)
        .striped(true)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for row in rows {
                sized_cell(ui, COLUMN_WIDTHS[0], RichText::new(&row.date_display))
                    .on_hover_text(&row.canonical_date);
                sized_cell(ui, COLUMN_WIDTHS[1], RichText::new(&row.distance_label));
                ui.push_id(row.id.to_string(), |ui| {
                    ui.allocate_ui_with_layout(
                        Vec2::new(COLUMN_WIDTHS[2], ui.spacing().interact_size.y),
                        Layout::left_to_right(Align::Center),
                        |ui| {
                            if ui.small_button("✕").on_hover_text("Удалить").clicked() {
                                deleted = Some(row.id);
                            }
                        },
                    );
                });
                ui.end_row();
            }
        });
    deleted
}

fn sized_cell(ui: &mut Ui, width: f32, text: RichText) -> egui::Response {
    let size = Vec2::new(width, ui.spacing().interact_size.y);
    ui.allocate_ui_with_layout(size, Layout::left_to_right(Align::Center), |ui| {
        ui.set_min_width(width);
        ui.label(text)
    })
    .inner
}

fn enter_pressed(ui: &Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}
