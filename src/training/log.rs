//! In-memory list of training days.
//!
//! The log keeps at most one record per calendar day, always ordered newest
//! first. Submissions are validated in full before anything is touched, and the
//! merged and re-sorted list is swapped in as a whole, so readers only ever see
//! a consistent, sorted list.

use tracing::{debug, info, warn};

use super::{EntryError, EntryForm, TrainingId, TrainingRecord, date, distance};

/// What a successful submission did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new day was added under this id.
    Inserted(TrainingId),
    /// The distance was added onto the existing record for that day.
    Merged(TrainingId),
}

impl SubmitOutcome {
    pub fn id(self) -> TrainingId {
        match self {
            Self::Inserted(id) | Self::Merged(id) => id,
        }
    }
}

/// Validated contents of the entry form.
#[derive(Debug, Clone, PartialEq)]
struct ValidEntry {
    date: time::Date,
    date_display: String,
    distance: f64,
}

impl ValidEntry {
    fn from_form(form: &EntryForm) -> Result<Self, EntryError> {
        let date = date::parse_display_date(&form.date).ok_or(EntryError::InvalidDate)?;
        let distance = distance::parse_distance(&form.distance).ok_or(EntryError::InvalidDistance)?;
        Ok(Self {
            date,
            date_display: form.date.clone(),
            distance,
        })
    }
}

/// Ordered collection of training records.
#[derive(Debug, Clone, Default)]
pub struct TrainingLog {
    records: Vec<TrainingRecord>,
}

impl TrainingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log preloaded with three demonstration days.
    pub fn with_demo_entries() -> Self {
        let seed = [
            (time::macros::date!(2019 - 07 - 20), 5.7),
            (time::macros::date!(2019 - 07 - 19), 14.2),
            (time::macros::date!(2019 - 07 - 18), 3.4),
        ];
        let records = seed
            .into_iter()
            .map(|(day, distance)| TrainingRecord {
                id: TrainingId::new(),
                date: day,
                date_display: date::display_string(day),
                distance,
            })
            .collect();
        Self::from_records(records)
    }

    /// Build a log from existing records, merging same-day entries and sorting.
    pub fn from_records(records: Vec<TrainingRecord>) -> Self {
        let mut merged: Vec<TrainingRecord> = Vec::with_capacity(records.len());
        for record in records {
            if record.distance <= 0.0 || !record.distance.is_finite() {
                warn!(id = %record.id, "Dropping record with non-positive distance");
                continue;
            }
            match merged.iter_mut().find(|existing| existing.date == record.date) {
                Some(existing) if (existing.distance + record.distance).is_finite() => {
                    existing.distance += record.distance;
                    existing.date_display = record.date_display;
                }
                Some(existing) => {
                    warn!(
                        id = %record.id,
                        date = %existing.canonical_date(),
                        "Dropping record whose merged distance overflows"
                    );
                }
                None => merged.push(record),
            }
        }
        sort_newest_first(&mut merged);
        Self { records: merged }
    }

    /// Records ordered newest first.
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: TrainingId) -> Option<&TrainingRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Record stored for the canonical `YYYY-MM-DD` day, if any.
    pub fn find_by_canonical_date(&self, canonical: &str) -> Option<&TrainingRecord> {
        let day = date::parse_canonical_date(canonical)?;
        self.records.iter().find(|record| record.date == day)
    }

    /// Validate the form and fold it into the log.
    ///
    /// A day already present gets the new distance added and its display text
    /// replaced; otherwise a fresh record is created. On error the log is left
    /// untouched.
    pub fn submit(&mut self, form: &EntryForm) -> Result<SubmitOutcome, EntryError> {
        let entry = ValidEntry::from_form(form).inspect_err(|err| {
            warn!(
                date = %form.date,
                distance = %form.distance,
                "Rejected training entry: {err}"
            );
        })?;
        let mut next = self.records.clone();
        let outcome = match next.iter_mut().find(|record| record.date == entry.date) {
            Some(existing) => {
                let total = existing.distance + entry.distance;
                if !total.is_finite() {
                    warn!(
                        date = %date::canonical_string(existing.date),
                        added = entry.distance,
                        "Rejected training entry: merged distance overflows"
                    );
                    return Err(EntryError::InvalidDistance);
                }
                existing.distance = total;
                existing.date_display = entry.date_display;
                info!(
                    date = %date::canonical_string(existing.date),
                    added = entry.distance,
                    total = existing.distance,
                    "Merged training entry"
                );
                SubmitOutcome::Merged(existing.id)
            }
            None => {
                let record = TrainingRecord {
                    id: TrainingId::new(),
                    date: entry.date,
                    date_display: entry.date_display,
                    distance: entry.distance,
                };
                info!(
                    date = %record.canonical_date(),
                    distance = record.distance,
                    "Added training entry"
                );
                let id = record.id;
                next.push(record);
                SubmitOutcome::Inserted(id)
            }
        };
        sort_newest_first(&mut next);
        self.records = next;
        Ok(outcome)
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: TrainingId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;
        if removed {
            info!(%id, "Deleted training entry");
        } else {
            debug!(%id, "Delete ignored; no such training entry");
        }
        removed
    }
}

/// Stable sort, so equal days keep their relative order.
fn sort_newest_first(records: &mut [TrainingRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(date: &str, distance: &str) -> EntryForm {
        EntryForm {
            date: date.into(),
            distance: distance.into(),
        }
    }

    fn canonical_dates(log: &TrainingLog) -> Vec<String> {
        log.records().iter().map(TrainingRecord::canonical_date).collect()
    }

    #[test]
    fn first_submission_creates_a_record() {
        let mut log = TrainingLog::new();
        let outcome = log.submit(&form("20.07.2019", "5.7")).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Inserted(_)));
        assert_eq!(log.len(), 1);
        let record = &log.records()[0];
        assert_eq!(record.id, outcome.id());
        assert_eq!(record.canonical_date(), "2019-07-20");
        assert_eq!(record.date_display, "20.07.2019");
        assert_eq!(record.distance, 5.7);
    }

    #[test]
    fn same_day_submission_sums_distance_and_keeps_id() {
        let mut log = TrainingLog::new();
        let first = log.submit(&form("20.07.2019", "5.7")).unwrap();
        let second = log.submit(&form("20.07.2019", "2.3")).unwrap();

        assert_eq!(second, SubmitOutcome::Merged(first.id()));
        assert_eq!(log.len(), 1);
        let record = &log.records()[0];
        assert!((record.distance - 8.0).abs() < 1e-9);
        assert_eq!(record.date_display, "20.07.2019");
        assert_eq!(distance::format_distance(record.distance), "8.0");
    }

    #[test]
    fn invalid_submissions_leave_the_log_unchanged() {
        let mut log = TrainingLog::with_demo_entries();
        let before = log.records().to_vec();

        assert_eq!(log.submit(&form("31.02.2020", "5")), Err(EntryError::InvalidDate));
        assert_eq!(log.submit(&form("1.1.2020", "5")), Err(EntryError::InvalidDate));
        for distance in ["0", "-1", "abc", ""] {
            assert_eq!(
                log.submit(&form("20.07.2019", distance)),
                Err(EntryError::InvalidDistance)
            );
        }
        assert_eq!(log.records(), before.as_slice());
    }

    #[test]
    fn merged_total_must_stay_finite() {
        let mut log = TrainingLog::new();
        log.submit(&form("20.07.2019", "1e308")).unwrap();
        let before = log.records().to_vec();

        assert_eq!(
            log.submit(&form("20.07.2019", "1e308")),
            Err(EntryError::InvalidDistance)
        );
        assert_eq!(log.records(), before.as_slice());
        assert_eq!(log.records()[0].distance, 1e308);
    }

    #[test]
    fn midpoint_distance_displays_rounded_up() {
        let mut log = TrainingLog::new();
        log.submit(&form("20.07.2019", "2.25")).unwrap();
        assert_eq!(distance::format_distance(log.records()[0].distance), "2.3");
    }

    #[test]
    fn date_is_checked_before_distance() {
        let mut log = TrainingLog::new();
        assert_eq!(log.submit(&form("abc", "abc")), Err(EntryError::InvalidDate));
    }

    #[test]
    fn records_stay_sorted_newest_first_for_any_insert_order() {
        let orders = [
            ["18.07.2019", "20.07.2019", "19.07.2019"],
            ["20.07.2019", "19.07.2019", "18.07.2019"],
            ["19.07.2019", "18.07.2019", "20.07.2019"],
        ];
        for order in orders {
            let mut log = TrainingLog::new();
            for day in order {
                log.submit(&form(day, "1")).unwrap();
            }
            assert_eq!(
                canonical_dates(&log),
                vec!["2019-07-20", "2019-07-19", "2019-07-18"]
            );
        }
    }

    #[test]
    fn sorting_spans_years_and_months() {
        let mut log = TrainingLog::new();
        for day in ["01.01.2020", "31.12.2019", "15.02.2019"] {
            log.submit(&form(day, "1")).unwrap();
        }
        assert_eq!(
            canonical_dates(&log),
            vec!["2020-01-01", "2019-12-31", "2019-02-15"]
        );
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut log = TrainingLog::with_demo_entries();
        let middle = log.records()[1].id;
        let expected: Vec<_> = log
            .records()
            .iter()
            .filter(|record| record.id != middle)
            .cloned()
            .collect();

        assert!(log.delete(middle));
        assert_eq!(log.records(), expected.as_slice());
    }

    #[test]
    fn delete_of_unknown_id_is_a_no_op() {
        let mut log = TrainingLog::with_demo_entries();
        let before = log.records().to_vec();
        assert!(!log.delete(TrainingId::new()));
        assert_eq!(log.records(), before.as_slice());
    }

    #[test]
    fn demo_entries_match_the_sample_week() {
        let log = TrainingLog::with_demo_entries();
        let rows: Vec<_> = log
            .records()
            .iter()
            .map(|record| (record.date_display.as_str(), record.distance))
            .collect();
        assert_eq!(
            rows,
            vec![("20.07.2019", 5.7), ("19.07.2019", 14.2), ("18.07.2019", 3.4)]
        );
    }

    #[test]
    fn from_records_merges_duplicate_days() {
        let day = time::macros::date!(2019 - 07 - 20);
        let log = TrainingLog::from_records(vec![
            TrainingRecord {
                id: TrainingId::new(),
                date: day,
                date_display: "20.07.2019".into(),
                distance: 1.0,
            },
            TrainingRecord {
                id: TrainingId::new(),
                date: day,
                date_display: "20.07.2019".into(),
                distance: 2.5,
            },
        ]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].distance, 3.5);
    }

    #[test]
    fn from_records_drops_duplicates_that_would_overflow() {
        let day = time::macros::date!(2019 - 07 - 20);
        let record = |distance| TrainingRecord {
            id: TrainingId::new(),
            date: day,
            date_display: "20.07.2019".into(),
            distance,
        };
        let log = TrainingLog::from_records(vec![record(1e308), record(1e308)]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].distance, 1e308);
    }

    #[test]
    fn lookup_by_canonical_date() {
        let log = TrainingLog::with_demo_entries();
        let record = log.find_by_canonical_date("2019-07-19").unwrap();
        assert_eq!(record.distance, 14.2);
        assert!(log.find_by_canonical_date("2019-07-21").is_none());
        assert!(log.find_by_canonical_date("19.07.2019").is_none());
        assert_eq!(log.get(record.id), Some(record));
    }
}
