// Survey pipeline: ingestion, processing, orchestration and output

pub mod ingestion;
pub mod orchestrator;
pub mod output;
pub mod processing;

pub use orchestrator::{BatchOrchestrator, BatchOutcome, BatchReport};
pub use output::{write_dataset, NormalizedDataset};
