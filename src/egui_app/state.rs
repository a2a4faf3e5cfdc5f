//! Shared state types for the egui UI.

use crate::egui_app::ui::style::{self, StatusTone};
use crate::training::{EntryForm, TrainingId};
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    /// Text currently typed into the entry form.
    pub form: EntryForm,
    /// Table rows in display order.
    pub rows: Vec<TrainingRowView>,
    /// Validation message waiting to be acknowledged.
    pub alert: Option<AlertState>,
    /// Move keyboard focus to the date input on the next frame.
    pub focus_date_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            form: EntryForm::default(),
            rows: Vec::new(),
            alert: None,
            focus_date_requested: true,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        let (badge_label, badge_color) = style::status_badge(StatusTone::Idle);
        Self {
            text: "Введите дату и пройденное расстояние".into(),
            badge_label,
            badge_color,
        }
    }
}

/// Display data for a single table row.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingRowView {
    pub id: TrainingId,
    pub date_display: String,
    /// `YYYY-MM-DD`, shown as hover text on the date cell.
    pub canonical_date: String,
    pub distance_label: String,
}

/// Modal message raised by a rejected submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertState {
    pub message: String,
}
