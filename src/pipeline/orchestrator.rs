use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::domain::{CanonicalRecord, Department, Level, RawRecord, Vocabulary};
use crate::error::Result;
use crate::pipeline::ingestion::{LoadFailure, RecordSource};
use crate::pipeline::output::{DatasetCounts, LevelData, NormalizedDataset};
use crate::pipeline::processing::normalize::{
    normalize_all, L1Normalizer, L2Normalizer, L3Normalizer, LevelNormalizer, MetricsNormalizer,
};

/// Runs one batch: load every level, normalize, assemble the dataset
pub struct BatchOrchestrator<S: RecordSource> {
    source: S,
}

/// Result of one batch run
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub dataset: NormalizedDataset,
    pub report: BatchReport,
}

/// Summary printed after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub counts: DatasetCounts,
    /// Records per department over all levels, most frequent first, ties by code
    pub distribution: Vec<(Department, usize)>,
    pub failures: Vec<LoadFailure>,
}

impl BatchReport {
    pub fn new(data: &LevelData, failures: Vec<LoadFailure>) -> Self {
        let mut tally: HashMap<Department, usize> = HashMap::new();
        let departments = data
            .l1
            .iter()
            .map(CanonicalRecord::department)
            .chain(data.l2.iter().map(CanonicalRecord::department))
            .chain(data.l3.iter().map(CanonicalRecord::department));
        for dep in departments {
            *tally.entry(dep).or_default() += 1;
        }

        let mut distribution: Vec<(Department, usize)> = tally.into_iter().collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.code().cmp(b.0.code())));

        Self {
            counts: DatasetCounts::of(data),
            distribution,
            failures,
        }
    }
}

impl<S: RecordSource> BatchOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn run(&self) -> Result<BatchOutcome> {
        info!("🚀 Starting survey normalization batch");

        let (l1, l2, l3) = tokio::try_join!(
            self.source.load_level(Level::L1),
            self.source.load_level(Level::L2),
            self.source.load_level(Level::L3),
        )?;

        let failures: Vec<LoadFailure> = [&l1.failures, &l2.failures, &l3.failures]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        for failure in &failures {
            warn!(level = %failure.level, file = %failure.file, reason = %failure.reason, "record excluded");
        }

        let (l1, l2, l3) = tokio::try_join!(
            normalize_level(L1Normalizer::new(), l1.records),
            normalize_level(L2Normalizer::new(), l2.records),
            normalize_level(L3Normalizer::new(), l3.records),
        )?;

        let data = LevelData { l1, l2, l3 };
        let report = BatchReport::new(&data, failures);
        let dataset = NormalizedDataset::new(data);

        info!(
            l1 = report.counts.l1,
            l2 = report.counts.l2,
            l3 = report.counts.l3,
            failed = report.failures.len(),
            "🎉 Batch complete"
        );
        Ok(BatchOutcome { dataset, report })
    }
}

/// Normalize one level off the async runtime; order and indices follow `records`
async fn normalize_level<N>(normalizer: N, records: Vec<RawRecord>) -> Result<Vec<N::Output>>
where
    N: LevelNormalizer + 'static,
{
    let output = tokio::task::spawn_blocking(move || {
        normalize_all(&MetricsNormalizer::new(normalizer), &records)
    })
    .await?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ingestion::MemoryRecordSource;
    use serde_json::json;

    fn source() -> MemoryRecordSource {
        MemoryRecordSource::new()
            .with_record(
                Level::L1,
                "a.json",
                json!({"respondent": {"department": "Финансовый департамент"}, "processes": [{"name": "P"}]}),
            )
            .with_record(Level::L2, "a.json", json!({"respondent": {"division": "Отдел продаж"}}))
            .with_record(Level::L2, "b.json", json!({"respondent": {"division": "ВИП-отдел"}}))
            .with_record(Level::L3, "a.json", json!({"respondent": {"department": "Бухгалтерия"}}))
            .with_record(Level::L3, "b.json", json!({"respondent": {"department": "Маркетинг"}}))
            .with_failure(Level::L3, "c.json", "invalid JSON")
    }

    #[tokio::test]
    async fn test_run_assembles_dataset() {
        let outcome = BatchOrchestrator::new(source()).run().await.unwrap();
        let data = &outcome.dataset.data;

        assert_eq!(data.l1[0].id.as_str(), "FIN-L1-001");
        assert_eq!(data.l2[0].id.as_str(), "OPS-L2-001");
        assert_eq!(data.l2[1].id.as_str(), "OPS-L2-002");
        assert_eq!(data.l3[1].id.as_str(), "MKT-L3-002");
        assert_eq!(outcome.dataset.meta.counts.processes_l1, 1);
        assert_eq!(outcome.report.counts, outcome.dataset.meta.counts);
    }

    #[tokio::test]
    async fn test_report_distribution_and_failures() {
        let outcome = BatchOrchestrator::new(source()).run().await.unwrap();
        let report = outcome.report;

        assert_eq!(
            report.distribution,
            vec![
                (Department::Finance, 2),
                (Department::Operations, 2),
                (Department::Marketing, 1),
            ]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "c.json");
    }

    #[tokio::test]
    async fn test_empty_source() {
        let outcome = BatchOrchestrator::new(MemoryRecordSource::new()).run().await.unwrap();
        assert_eq!(outcome.report.counts, DatasetCounts::default());
        assert!(outcome.report.distribution.is_empty());
        assert!(outcome.dataset.data.l3.is_empty());
    }
}
