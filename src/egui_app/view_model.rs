//! Helpers to convert domain data into egui-facing view structs.

use crate::egui_app::state::TrainingRowView;
use crate::training::{TrainingRecord, distance};

/// Convert a record into a table row.
pub fn training_row(record: &TrainingRecord) -> TrainingRowView {
    TrainingRowView {
        id: record.id,
        date_display: record.date_display.clone(),
        canonical_date: record.canonical_date(),
        distance_label: distance::format_distance(record.distance),
    }
}

/// Build table rows in the order the records are stored.
pub fn training_rows(records: &[TrainingRecord]) -> Vec<TrainingRowView> {
    records.iter().map(training_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::TrainingLog;

    #[test]
    fn rows_mirror_log_order_and_round_distances() {
        let log = TrainingLog::with_demo_entries();
        let rows = training_rows(log.records());

        let dates: Vec<_> = rows.iter().map(|row| row.date_display.as_str()).collect();
        assert_eq!(dates, vec!["20.07.2019", "19.07.2019", "18.07.2019"]);
        let distances: Vec<_> = rows.iter().map(|row| row.distance_label.as_str()).collect();
        assert_eq!(distances, vec!["5.7", "14.2", "3.4"]);
        assert_eq!(rows[0].canonical_date, "2019-07-20");
        assert_eq!(rows[0].id, log.records()[0].id);
    }

    #[test]
    fn empty_log_has_no_rows() {
        assert!(training_rows(TrainingLog::new().records()).is_empty());
    }
}
