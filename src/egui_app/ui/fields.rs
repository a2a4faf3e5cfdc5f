use eframe::egui;

use crate::training::distance::step_distance_text;

/// Single-line input for distances in kilometers.
///
/// ArrowUp/ArrowDown step the value by 0.1 km without going below zero, and only
/// characters that can appear in a decimal number are accepted.
pub struct DistanceInput<'a> {
    value: &'a mut String,
    id: egui::Id,
    width: f32,
    hint: String,
}

impl<'a> DistanceInput<'a> {
    pub fn new(value: &'a mut String, id: egui::Id) -> Self {
        Self {
            value,
            id,
            width: 96.0,
            hint: String::new(),
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Display the field. The response is marked changed after typing or stepping.
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let mut adjust = 0.0;

        // Arrow keys must be consumed before TextEdit moves the cursor with them.
        if ui.memory(|m| m.has_focus(self.id)) {
            ui.input_mut(|i| {
                if i.key_pressed(egui::Key::ArrowUp) {
                    adjust = 1.0;
                } else if i.key_pressed(egui::Key::ArrowDown) {
                    adjust = -1.0;
                }
                if adjust != 0.0 {
                    i.events.retain(|e| {
                        !matches!(
                            e,
                            egui::Event::Key {
                                key: egui::Key::ArrowUp | egui::Key::ArrowDown,
                                ..
                            }
                        )
                    });
                }
            });
        }
        if adjust != 0.0 {
            *self.value = step_distance_text(self.value.as_str(), adjust);
        }

        let output = egui::TextEdit::singleline(&mut *self.value)
            .id(self.id)
            .desired_width(self.width)
            .hint_text(self.hint)
            .show(ui);
        let mut response = output.response;

        if response.changed() {
            retain_numeric_chars(&mut *self.value);
        }
        if adjust != 0.0 {
            response.mark_changed();
        }

        if (adjust != 0.0 || response.gained_focus()) && response.has_focus() {
            let mut state = output.state;
            state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::select_all(&output.galley)));
            state.store(ui.ctx(), response.id);
        }
        response
    }
}

/// Drop characters that cannot be part of a decimal number.
///
/// A decimal comma is turned into a point.
fn retain_numeric_chars(text: &mut String) {
    *text = text
        .chars()
        .map(|c| if c == ',' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .collect();
}
