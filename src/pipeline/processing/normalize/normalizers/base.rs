use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::raw::array;
use crate::domain::{CanonicalRecord, Department, Level, RawRecord};
use crate::observability::metrics;
use crate::pipeline::processing::classify::resolve_department;

/// Base trait for level-specific normalizers.
///
/// Normalization never fails: missing fields become defaults and malformed
/// sub-items are skipped, so every raw record yields exactly one canonical one.
pub trait LevelNormalizer: Send + Sync {
    type Output: CanonicalRecord + Serialize + Send + 'static;

    /// The survey level this normalizer handles
    fn level(&self) -> Level;

    /// Normalize one raw record; `index` is its 1-based position in load order
    fn normalize(&self, record: &RawRecord, index: usize) -> Self::Output;

    /// Get a human-readable name for this normalizer
    fn name(&self) -> &str;
}

/// A wrapper that adds metrics to any normalizer implementation
pub struct MetricsNormalizer<N: LevelNormalizer> {
    inner: N,
}

impl<N: LevelNormalizer> MetricsNormalizer<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N: LevelNormalizer> LevelNormalizer for MetricsNormalizer<N> {
    type Output = N::Output;

    fn level(&self) -> Level {
        self.inner.level()
    }

    fn normalize(&self, record: &RawRecord, index: usize) -> Self::Output {
        let output = self.inner.normalize(record, index);
        metrics::normalize::record_normalized(self.inner.level());
        metrics::normalize::items_emitted(self.inner.level(), output.item_count());
        output
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Shared utilities for normalizers
pub struct NormalizerUtils;

impl NormalizerUtils {
    /// Trim and collapse every whitespace run to one space
    pub fn normalize_text(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// "Фамилия Имя Отчество" → "Фамилия И.О."
    pub fn shorten_fio(fio: &str) -> String {
        let parts: Vec<&str> = fio.split_whitespace().collect();
        let initial = |s: &str| s.chars().next().map(String::from).unwrap_or_default();
        match parts.as_slice() {
            [] => String::new(),
            [surname] => surname.to_string(),
            [surname, name] => format!("{} {}.", surname, initial(*name)),
            [surname, name, patronymic, ..] => {
                format!("{} {}.{}.", surname, initial(*name), initial(*patronymic))
            }
        }
    }

    /// Normalized text, or `None` when it is empty or one of `empty_markers`
    /// (compared case-insensitively)
    pub fn meaningful(text: &str, empty_markers: &[&str]) -> Option<String> {
        let normalized = Self::normalize_text(text);
        if normalized.is_empty() {
            return None;
        }
        let lower = normalized.to_lowercase();
        if empty_markers.iter().any(|m| m.to_lowercase() == lower) {
            return None;
        }
        Some(normalized)
    }

    /// Sparse attachment: an empty collection becomes an absent field
    pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }

    /// Normalize every text and drop the ones left empty
    pub fn clean_list(items: Vec<String>) -> Vec<String> {
        items
            .iter()
            .map(|s| Self::normalize_text(s))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// First non-empty candidate, or empty
    pub fn first_non_empty(candidates: &[&str]) -> String {
        candidates
            .iter()
            .find(|c| !c.trim().is_empty())
            .map(|c| c.to_string())
            .unwrap_or_default()
    }

    /// Object entries of an array field. Anything else is a malformed sub-item:
    /// it is skipped and counted, and the rest of the record is kept.
    pub fn objects<'a>(level: Level, parent: &'a Value, key: &str) -> Vec<&'a Value> {
        let all = array(parent, key);
        let kept: Vec<&Value> = all.iter().filter(|v| v.is_object()).collect();
        let skipped = all.len() - kept.len();
        if skipped > 0 {
            debug!(level = %level, field = key, skipped, "skipped malformed entries");
            for _ in 0..skipped {
                metrics::normalize::item_filtered(level, "malformed");
            }
        }
        kept
    }

    /// Resolve the department and record which rule decided it
    pub fn department(record: &RawRecord, department_text: &str, division: Option<&str>) -> Department {
        let resolution = resolve_department(department_text, division);
        metrics::normalize::department_resolved(resolution.source);
        debug!(
            file = %record.source_file,
            level = %record.level,
            department = %resolution.department,
            source = resolution.source.as_str(),
            "department resolved"
        );
        resolution.department
    }
}
