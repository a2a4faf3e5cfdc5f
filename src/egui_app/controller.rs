//! Event handlers that connect the egui renderer to the training log.
//!
//! Every handler runs to completion inside a single frame, mutates the log
//! through its own API, and then rebuilds the table rows, so the UI never sees a
//! half-applied submission.

use crate::config::{self, AppSettings, ConfigError};
use crate::egui_app::state::{AlertState, UiState};
use crate::egui_app::ui::style::{self, StatusTone};
use crate::egui_app::view_model;
use crate::training::{EntryError, FormField, SubmitOutcome, TrainingId, TrainingLog, distance};


/// Maintains app state and bridges the training log to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    log: TrainingLog,
    settings: AppSettings,
}

impl EguiController {
    pub fn new(log: TrainingLog) -> Self {
        let mut controller = Self {
            ui: UiState::default(),
            log,
            settings: AppSettings::default(),
        };
        controller.refresh_rows();
        controller
    }

    /// Load `config.toml` and apply it to the initial state.
    pub fn load_configuration(&mut self) -> Result<(), ConfigError> {
        let settings = config::load_or_default()?;
        self.apply_settings(settings);
        Ok(())
    }

    /// Apply startup settings; demo days are only seeded into an empty log.
    pub fn apply_settings(&mut self, settings: AppSettings) {
        if settings.seed_demo_entries && self.log.is_empty() {
            self.log = TrainingLog::with_demo_entries();
            tracing::info!("Seeded {} demo training entries", self.log.len());
        }
        self.settings = settings;
        self.refresh_rows();
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn log(&self) -> &TrainingLog {
        &self.log
    }

    /// Store new text for one form input, leaving the other untouched.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.ui.form.set_field(field, value);
    }

    /// Store new text for the input called `name`. Unknown names are ignored.
    pub fn update_field_by_name(&mut self, name: &str, value: impl Into<String>) -> bool {
        match FormField::from_name(name) {
            Some(field) => {
                self.update_field(field, value);
                true
            }
            None => {
                tracing::debug!("Ignoring change for unknown input {name:?}");
                false
            }
        }
    }

    /// Validate the form and commit it to the log.
    ///
    /// On success the form is cleared; on failure an alert is raised and both
    /// the log and the form stay as they were.
    pub fn submit_form(&mut self) -> Result<SubmitOutcome, EntryError> {
        match self.log.submit(&self.ui.form) {
            Ok(outcome) => {
                self.report_saved(outcome);
                self.ui.form.clear();
                self.ui.focus_date_requested = true;
                self.refresh_rows();
                Ok(outcome)
            }
            Err(err) => {
                self.raise_alert(err);
                Err(err)
            }
        }
    }

    /// Remove a row; missing ids are ignored without touching the form.
    pub fn delete_training(&mut self, id: TrainingId) {
        let label = self.log.get(id).map(|record| record.date_display.clone());
        if self.log.delete(id) {
            if let Some(label) = label {
                self.set_status(format!("Тренировка за {label} удалена"), StatusTone::Info);
            }
            self.refresh_rows();
        }
    }

    /// Close the pending alert, if any.
    pub fn dismiss_alert(&mut self) {
        if self.ui.alert.take().is_some() {
            self.ui.focus_date_requested = true;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = style::status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }

    fn report_saved(&mut self, outcome: SubmitOutcome) {
        let Some(record) = self.log.get(outcome.id()) else {
            return;
        };
        let total = distance::format_distance(record.distance);
        let text = match outcome {
            SubmitOutcome::Inserted(_) => {
                format!("Тренировка за {} добавлена: {total} км", record.date_display)
            }
            SubmitOutcome::Merged(_) => {
                format!("Дистанция за {} обновлена: {total} км", record.date_display)
            }
        };
        self.set_status(text, StatusTone::Info);
    }

    fn raise_alert(&mut self, err: EntryError) {
        let message = err.to_string();
        self.set_status(message.clone(), StatusTone::Error);
        self.ui.alert = Some(AlertState { message });
    }

    fn refresh_rows(&mut self) {
        self.ui.rows = view_model::training_rows(self.log.records());
    }
}

impl Default for EguiController {
    fn default() -> Self {
        Self::new(TrainingLog::new())
    }
}
