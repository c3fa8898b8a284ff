use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::{LoadFailure, LoadedLevel, RecordSource};
use crate::domain::{Level, RawRecord};
use crate::error::Result;

/// In-memory record source for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    records: HashMap<Level, Vec<RawRecord>>,
    failures: HashMap<Level, Vec<LoadFailure>>,
}

impl MemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records are served in the order they were added
    pub fn with_record(mut self, level: Level, file: &str, record: Value) -> Self {
        self.records
            .entry(level)
            .or_default()
            .push(RawRecord::new(level, file, record));
        self
    }

    pub fn with_failure(mut self, level: Level, file: &str, reason: &str) -> Self {
        self.failures.entry(level).or_default().push(LoadFailure {
            level,
            file: file.to_string(),
            reason: reason.to_string(),
        });
        self
    }
}

#[async_trait]
impl RecordSource for MemoryRecordSource {
    async fn load_level(&self, level: Level) -> Result<LoadedLevel> {
        Ok(LoadedLevel {
            records: self.records.get(&level).cloned().unwrap_or_default(),
            failures: self.failures.get(&level).cloned().unwrap_or_default(),
        })
    }
}
