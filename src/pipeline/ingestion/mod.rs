// Pipeline ingestion: loading raw questionnaires per survey level

pub mod fs_source;
pub mod memory_source;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Level, RawRecord};
use crate::error::Result;

pub use fs_source::{FsRecordSource, LevelLayout};
pub use memory_source::MemoryRecordSource;

/// A raw record that could not be read or decoded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub level: Level,
    pub file: String,
    pub reason: String,
}

/// Everything loaded for one level, in the order normalization must follow
#[derive(Debug, Default)]
pub struct LoadedLevel {
    pub records: Vec<RawRecord>,
    pub failures: Vec<LoadFailure>,
}

/// Port for the raw questionnaire store.
///
/// Implementations isolate per-record failures into `LoadedLevel::failures`;
/// an `Err` means the level could not be loaded at all.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load_level(&self, level: Level) -> Result<LoadedLevel>;
}
