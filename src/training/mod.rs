use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;
use uuid::Uuid;

pub mod date;
pub mod distance;
pub mod form;
pub mod log;

pub use form::{EntryForm, FormField};
pub use self::log::{SubmitOutcome, TrainingLog};

/// Identifier for a logged training day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingId(Uuid);

impl TrainingId {
    /// Create a new unique training identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrainingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrainingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Distance covered on a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub id: TrainingId,
    /// Calendar day; orders chronologically and is unique within a log.
    pub date: Date,
    /// Date exactly as the user last typed it (`DD.MM.YYYY`).
    pub date_display: String,
    /// Kilometers, always positive.
    pub distance: f64,
}

impl TrainingRecord {
    /// Canonical `YYYY-MM-DD` form of the record date.
    pub fn canonical_date(&self) -> String {
        date::canonical_string(self.date)
    }
}

/// Reasons a form submission is rejected before any state changes.
///
/// The messages are the user-facing texts shown in the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Введите дату в формате ДД.ММ.ГГГГ")]
    InvalidDate,
    #[error("Введите корректное расстояние")]
    InvalidDistance,
}
