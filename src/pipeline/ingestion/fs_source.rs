use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{LoadFailure, LoadedLevel, RecordSource};
use crate::config::Config;
use crate::domain::{Level, RawRecord};
use crate::error::{NormalizerError, Result};
use crate::observability::metrics;

/// Where one level's questionnaires live and which files to skip
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub dir: PathBuf,
    /// File-name fragments; a file whose name contains any of them is skipped
    pub exclude: Vec<String>,
}

/// Loads `*.json` questionnaires from one directory per level
#[derive(Debug, Clone, Default)]
pub struct FsRecordSource {
    layouts: HashMap<Level, LevelLayout>,
}

impl FsRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Level::ALL.iter().fold(Self::new(), |source, &level| {
            let settings = config.level(level);
            source.with_level(level, config.level_dir(level), settings.exclude.clone())
        })
    }

    pub fn with_level(mut self, level: Level, dir: impl Into<PathBuf>, exclude: Vec<String>) -> Self {
        self.layouts.insert(
            level,
            LevelLayout {
                dir: dir.into(),
                exclude,
            },
        );
        self
    }

    pub fn layout(&self, level: Level) -> Option<&LevelLayout> {
        self.layouts.get(&level)
    }
}

#[async_trait]
impl RecordSource for FsRecordSource {
    async fn load_level(&self, level: Level) -> Result<LoadedLevel> {
        let Some(layout) = self.layouts.get(&level) else {
            debug!(level = %level, "no directory configured");
            return Ok(LoadedLevel::default());
        };

        let files = match list_json_files(level, layout).await {
            Ok(files) => files,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(level = %level, dir = %layout.dir.display(), "input directory not found");
                return Ok(LoadedLevel::default());
            }
            Err(e) => {
                // An unreadable directory is a load failure like any unreadable file
                warn!(level = %level, dir = %layout.dir.display(), error = %e, "cannot list input directory");
                metrics::ingest::load_failed(level);
                return Ok(LoadedLevel {
                    records: Vec::new(),
                    failures: vec![LoadFailure {
                        level,
                        file: layout.dir.display().to_string(),
                        reason: e.to_string(),
                    }],
                });
            }
        };

        // Read concurrently, then put each result back at its sorted position
        let mut tasks = JoinSet::new();
        for (position, name) in files.iter().enumerate() {
            let path = layout.dir.join(name);
            tasks.spawn(async move { (position, read_record(&path).await) });
        }

        let mut slots: Vec<Option<std::result::Result<Value, String>>> = vec![None; files.len()];
        while let Some(joined) = tasks.join_next().await {
            let (position, outcome) = joined?;
            slots[position] = Some(outcome);
        }

        let mut loaded = LoadedLevel::default();
        for (name, slot) in files.into_iter().zip(slots) {
            match slot {
                Some(Ok(record)) => {
                    metrics::ingest::record_loaded(level);
                    loaded.records.push(RawRecord::new(level, name, record));
                }
                Some(Err(reason)) => {
                    warn!(level = %level, file = %name, %reason, "skipping unreadable questionnaire");
                    metrics::ingest::load_failed(level);
                    loaded.failures.push(LoadFailure {
                        level,
                        file: name,
                        reason,
                    });
                }
                None => {
                    return Err(NormalizerError::Load {
                        file: name,
                        reason: "read task produced no result".to_string(),
                    })
                }
            }
        }

        info!(
            level = %level,
            loaded = loaded.records.len(),
            failed = loaded.failures.len(),
            "level loaded"
        );
        Ok(loaded)
    }
}

/// Names of the level's `*.json` files, exclusions removed, sorted by name
async fn list_json_files(level: Level, layout: &LevelLayout) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(&layout.dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        // Follows symlinks; a dangling link stays listed and fails at read time
        if let Ok(meta) = tokio::fs::metadata(entry.path()).await {
            if !meta.is_file() {
                continue;
            }
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".json") {
            continue;
        }
        if let Some(pattern) = layout.exclude.iter().find(|p| name.contains(p.as_str())) {
            debug!(level = %level, file = %name, pattern = %pattern, "file excluded");
            metrics::ingest::file_excluded(level);
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// Read and decode one questionnaire; the reason string is what gets reported
async fn read_record(path: &Path) -> std::result::Result<Value, String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes[..]);
    let value: Value = serde_json::from_slice(body).map_err(|e| format!("invalid JSON: {}", e))?;
    if !value.is_object() {
        return Err("top-level JSON value is not an object".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[tokio::test]
    async fn test_loads_sorted_and_isolates_failures() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.json", &json!({"respondent": {"fio": "B"}}).to_string());
        write(tmp.path(), "a.json", &json!({"respondent": {"fio": "A"}}).to_string());
        write(tmp.path(), "broken.json", "{not json");
        write(tmp.path(), "list.json", "[1, 2]");
        write(tmp.path(), "notes.txt", "ignored");

        let source = FsRecordSource::new().with_level(Level::L1, tmp.path(), Vec::new());
        let loaded = source.load_level(Level::L1).await.unwrap();

        let files: Vec<&str> = loaded.records.iter().map(|r| r.source_file.as_str()).collect();
        assert_eq!(files, vec!["a.json", "b.json"]);
        assert_eq!(loaded.records[0].respondent_text("fio"), "A");

        let failed: Vec<&str> = loaded.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(failed, vec!["broken.json", "list.json"]);
        assert!(loaded.failures[0].reason.starts_with("invalid JSON"));
        assert_eq!(loaded.failures[1].level, Level::L1);
    }

    #[tokio::test]
    async fn test_exclusion_fragments() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Иванов.json", "{}");
        write(tmp.path(), "Иванов 2.json", "{}");
        write(tmp.path(), "Петров_backup.json", "{}");

        let source = FsRecordSource::new().with_level(
            Level::L3,
            tmp.path(),
            vec![" 2.json".to_string(), "_backup.json".to_string()],
        );
        let loaded = source.load_level(Level::L3).await.unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].source_file, "Иванов.json");
        assert!(loaded.failures.is_empty());
    }

    #[tokio::test]
    async fn test_byte_order_mark_is_accepted() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bom.json"), b"\xEF\xBB\xBF{\"a\": 1}").unwrap();

        let source = FsRecordSource::new().with_level(Level::L2, tmp.path(), Vec::new());
        let loaded = source.load_level(Level::L2).await.unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].record["a"], 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_questionnaires_are_loaded() {
        let tmp = TempDir::new().unwrap();
        let shared = tmp.path().join("shared");
        let level_dir = tmp.path().join("L1_json");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::create_dir_all(level_dir.join("nested.json")).unwrap();
        write(&shared, "real.json", &json!({"respondent": {"fio": "Link"}}).to_string());
        std::os::unix::fs::symlink(shared.join("real.json"), level_dir.join("linked.json")).unwrap();
        std::os::unix::fs::symlink(shared.join("gone.json"), level_dir.join("dangling.json")).unwrap();

        let source = FsRecordSource::new().with_level(Level::L1, level_dir.clone(), Vec::new());
        let loaded = source.load_level(Level::L1).await.unwrap();

        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].source_file, "linked.json");
        assert_eq!(loaded.records[0].respondent_text("fio"), "Link");

        let failed: Vec<&str> = loaded.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(failed, vec!["dangling.json"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let source = FsRecordSource::new().with_level(Level::L2, tmp.path().join("nope"), Vec::new());
        let loaded = source.load_level(Level::L2).await.unwrap();
        assert!(loaded.records.is_empty());
        assert!(loaded.failures.is_empty());

        let unconfigured = source.load_level(Level::L1).await.unwrap();
        assert!(unconfigured.records.is_empty());
    }
}
