//! Metrics for the normalization pipeline.
//!
//! Recorded through the `metrics` facade; without an installed recorder every
//! call is a no-op, so library users opt in by installing their own exporter.

use crate::domain::Level;

/// Loading raw questionnaires
pub mod ingest {
    use super::Level;

    pub fn record_loaded(level: Level) {
        ::metrics::counter!("survey_ingest_records_loaded_total", "level" => level.key())
            .increment(1);
    }

    pub fn load_failed(level: Level) {
        ::metrics::counter!("survey_ingest_load_failures_total", "level" => level.key())
            .increment(1);
    }

    pub fn file_excluded(level: Level) {
        ::metrics::counter!("survey_ingest_files_excluded_total", "level" => level.key())
            .increment(1);
    }
}

/// Turning raw questionnaires into canonical records
pub mod normalize {
    use super::Level;
    use crate::pipeline::processing::classify::ResolutionSource;

    pub fn record_normalized(level: Level) {
        ::metrics::counter!("survey_normalize_records_total", "level" => level.key())
            .increment(1);
    }

    pub fn items_emitted(level: Level, count: usize) {
        ::metrics::histogram!("survey_normalize_items_per_record", "level" => level.key())
            .record(count as f64);
    }

    /// A sub-item dropped on purpose (empty name, spreadsheet error, placeholder)
    pub fn item_filtered(level: Level, reason: &'static str) {
        ::metrics::counter!(
            "survey_normalize_items_filtered_total",
            "level" => level.key(),
            "reason" => reason
        )
        .increment(1);
    }

    pub fn department_resolved(source: ResolutionSource) {
        ::metrics::counter!(
            "survey_normalize_department_resolutions_total",
            "source" => source.as_str()
        )
        .increment(1);
    }

    pub fn batch_processed(level: Level, batch_size: usize) {
        ::metrics::histogram!("survey_normalize_batch_size", "level" => level.key())
            .record(batch_size as f64);
    }
}

/// Writing the dataset
pub mod output {
    pub fn dataset_written(bytes: usize) {
        ::metrics::counter!("survey_output_datasets_written_total").increment(1);
        ::metrics::histogram!("survey_output_dataset_bytes").record(bytes as f64);
    }
}
