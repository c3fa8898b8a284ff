//! The normalized dataset artifact.

use indexmap::IndexMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

use crate::constants::SCHEMA_VERSION;
use crate::domain::dictionaries::all_dictionaries;
use crate::domain::{CanonicalRecord, L1Record, L2Record, L3Record};
use crate::error::Result;
use crate::observability::metrics;

type Docs = IndexMap<&'static str, &'static str>;

/// Record and sub-item totals written to `meta.counts`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub l1: usize,
    pub l2: usize,
    pub l3: usize,
    pub processes_l1: usize,
    pub items_l2: usize,
    pub items_l3: usize,
}

impl DatasetCounts {
    pub fn of(data: &LevelData) -> Self {
        fn items<R: CanonicalRecord>(records: &[R]) -> usize {
            records.iter().map(CanonicalRecord::item_count).sum()
        }
        Self {
            l1: data.l1.len(),
            l2: data.l2.len(),
            l3: data.l3.len(),
            processes_l1: items(&data.l1),
            items_l2: items(&data.l2),
            items_l3: items(&data.l3),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub version: &'static str,
    pub counts: DatasetCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelData {
    pub l1: Vec<L1Record>,
    pub l2: Vec<L2Record>,
    pub l3: Vec<L3Record>,
}

/// Self-describing output: counts, code dictionaries, field docs and records
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedDataset {
    pub meta: Meta,
    pub dictionaries: IndexMap<&'static str, IndexMap<&'static str, &'static str>>,
    pub fields_l1: Docs,
    pub fields_l2: Docs,
    pub fields_l3: Docs,
    pub data: LevelData,
}

impl NormalizedDataset {
    pub fn new(data: LevelData) -> Self {
        Self {
            meta: Meta {
                version: SCHEMA_VERSION,
                counts: DatasetCounts::of(&data),
            },
            dictionaries: all_dictionaries(),
            fields_l1: docs(FIELDS_L1),
            fields_l2: docs(FIELDS_L2),
            fields_l3: docs(FIELDS_L3),
            data,
        }
    }

    /// Pretty-printed UTF-8 JSON, non-ASCII kept literal
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Lowercase hex SHA-256 of the serialized dataset
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Serialize and write the dataset, returning its fingerprint
pub async fn write_dataset(dataset: &NormalizedDataset, path: &Path) -> Result<String> {
    let bytes = dataset.to_json_bytes()?;
    let digest = fingerprint(&bytes);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;

    metrics::output::dataset_written(bytes.len());
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        sha256 = %digest,
        "dataset written"
    );
    Ok(digest)
}

fn docs(fields: &[(&'static str, &'static str)]) -> Docs {
    fields.iter().copied().collect()
}

const FIELDS_L1: &[(&str, &str)] = &[
    ("id", "Уникальный идентификатор (DEP-L1-NNN)"),
    ("fio", "ФИО (сокращённое)"),
    ("lvl", "Уровень (1=руководитель департамента)"),
    ("dep", "Код департамента"),
    ("num", "Численность департамента"),
    ("goals", "Массив целей департамента"),
    ("goals[].id", "Номер цели"),
    ("goals[].text", "Текст цели"),
    ("goals[].tasks", "Задачи для достижения цели"),
    ("goals[].processes", "Процессы, относящиеся к цели"),
    ("processes[].n", "Название процесса"),
    ("processes[].cr", "Критичность (H/M/L)"),
    ("processes[].staff", "Количество сотрудников в процессе"),
    ("processes[].depts", "Отделы-участники"),
    ("processes[].reg", "Статус регламента (exists/draft/none)"),
    ("processes[].pb", "Описание проблем в процессе"),
    ("processes[].cs", "Причина проблем"),
    ("processes[].auto.need", "Нужна ли автоматизация (true/false)"),
    ("processes[].auto.priority", "Приоритет автоматизации (1/2/3/0)"),
    ("processes[].auto.done", "Уже автоматизировано (true если да)"),
    ("processes[].auto.reason", "Обоснование необходимости автоматизации"),
    ("processes[].auto.effect", "Ожидаемый эффект от автоматизации"),
];

const FIELDS_L2: &[(&str, &str)] = &[
    ("id", "Уникальный идентификатор (DEP-L2-NNN)"),
    ("fio", "ФИО (сокращённое)"),
    ("lvl", "Уровень (2=руководитель отдела)"),
    ("dep", "Код департамента"),
    ("div", "Название отдела"),
    ("pos", "Должность"),
    ("num", "Численность отдела"),
    ("g", "Цели отдела"),
    ("tasks", "Задачи отдела (массив разделенных задач)"),
    ("items", "Процессы отдела"),
    ("items[].n", "Название процесса"),
    ("items[].desc", "Описание процесса"),
    ("items[].tr", "Триггер процесса"),
    ("items[].rs", "Результат процесса"),
    ("items[].sy", "Используемые системы"),
    ("items[].db", "Используемые базы данных и базы знаний"),
    ("items[].stages_count", "Количество этапов в процессе"),
    ("items[].stages_desc", "Описание всех этапов процесса"),
    ("items[].delays", "Задержки на этапах"),
    ("items[].errors", "Ошибки на этапах"),
    ("items[].depts_involved", "Какие отделы вовлечены в этапы"),
    ("items[].dept_roles", "Как каждый отдел участвует в этапах"),
    ("items[].auto_needed", "Нужна ли автоматизация"),
    ("items[].auto_reason", "Обоснование необходимости автоматизации"),
];

const FIELDS_L3: &[(&str, &str)] = &[
    ("id", "Уникальный идентификатор (DEP-L3-NNN)"),
    ("fio", "ФИО (сокращённое)"),
    ("lvl", "Уровень (3=сотрудник)"),
    ("dep", "Код департамента"),
    ("div", "Название отдела"),
    ("pos", "Должность"),
    ("items", "Задачи сотрудника"),
    ("items[].n", "Название задачи"),
    ("items[].tp", "Тип задачи (R/P)"),
    ("items[].rt", "Уровень рутинности (VH/H/M/L)"),
    ("items[].fr", "Частота (D/W/M/Q/R)"),
    ("items[].tm", "Время выполнения в минутах"),
    ("items[].ch", "Характер задачи"),
    ("items[].pb", "Проблемы"),
    ("items[].cs", "Причины проблем"),
    ("items[].auto_priority", "Приоритет автоматизации (1/2/3)"),
    ("items[].interactions", "Взаимодействия с другими отделами"),
    ("items[].res_int", "Внутренние ресурсы"),
    ("items[].res_ext", "Внешние ресурсы"),
];
