//! Raw questionnaires → compact canonical records.

use tracing::debug;

use crate::domain::RawRecord;
use crate::observability::metrics;

pub mod join;
pub mod normalizers;

pub use normalizers::{L1Normalizer, L2Normalizer, L3Normalizer, LevelNormalizer, MetricsNormalizer};

/// Normalize one level's records in load order.
///
/// Record indices are 1-based positions in `records`, so the output always has
/// the same length and order as the input.
pub fn normalize_all<N: LevelNormalizer>(normalizer: &N, records: &[RawRecord]) -> Vec<N::Output> {
    debug!(
        normalizer = normalizer.name(),
        level = %normalizer.level(),
        records = records.len(),
        "normalizing batch"
    );
    let output: Vec<N::Output> = records
        .iter()
        .enumerate()
        .map(|(i, record)| normalizer.normalize(record, i + 1))
        .collect();
    metrics::normalize::batch_processed(normalizer.level(), output.len());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalRecord, Level};
    use serde_json::json;

    #[test]
    fn test_indices_follow_load_order() {
        let records = vec![
            RawRecord::new(Level::L2, "a.json", json!({"respondent": {"division": "Отдел продаж"}})),
            RawRecord::new(Level::L2, "b.json", json!({"respondent": {"department": "Маркетинг"}})),
            RawRecord::new(Level::L2, "c.json", json!({})),
        ];
        let out = normalize_all(&L2Normalizer::new(), &records);
        let ids: Vec<&str> = out.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["OPS-L2-001", "MKT-L2-002", "UNK-L2-003"]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(normalize_all(&L3Normalizer::new(), &[]).is_empty());
    }
}
