use serde_json::Value;
use tracing::debug;

use super::base::{LevelNormalizer, NormalizerUtils as U};
use crate::constants::{
    DEFAULT_L3_PRIORITY, EMPTY_CAUSES, L3_EMPTY_PROBLEMS, NO_DEPARTMENT_PLACEHOLDERS,
    SPREADSHEET_ERRORS,
};
use crate::domain::raw::{field, list_or_scalar, number, scalar_text, text};
use crate::domain::{
    AutomationPriority, Interaction, L3Record, L3Task, Level, RawRecord, RecordId, Vocabulary,
};
use crate::observability::metrics;
use crate::pipeline::processing::classify::{
    canonicalize_division, classify_department, classify_frequency, classify_routine,
    classify_task_type,
};

/// Normalizer for individual-contributor (L3) questionnaires
#[derive(Debug, Default, Clone, Copy)]
pub struct L3Normalizer;

impl L3Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Why a task must not be emitted, if it must not
    fn rejection(name: &str) -> Option<&'static str> {
        if name.trim().is_empty() {
            Some("empty_name")
        } else if SPREADSHEET_ERRORS.iter().any(|e| name.contains(e)) {
            Some("spreadsheet_error")
        } else {
            None
        }
    }

    fn task(&self, task: &Value) -> L3Task {
        L3Task {
            name: U::normalize_text(&text(task, "task_name")),
            task_type: classify_task_type(&text(task, "task_type")),
            routine: classify_routine(&text(task, "routine_level")),
            frequency: classify_frequency(&text(task, "regularity")),
            minutes: number(task, "time_minutes"),
            character: U::normalize_text(&text(task, "task_character")),
            problem: U::meaningful(&text(task, "problem"), L3_EMPTY_PROBLEMS),
            cause: U::meaningful(&text(task, "problem_cause"), EMPTY_CAUSES),
            auto_priority: auto_priority(task),
            interactions: U::non_empty(self.interactions(task)),
            internal_resources: U::non_empty(U::clean_list(list_or_scalar(task, "internal_resources"))),
            external_resources: U::non_empty(U::clean_list(list_or_scalar(task, "external_resources"))),
        }
    }

    fn interactions(&self, task: &Value) -> Vec<Interaction> {
        U::objects(Level::L3, task, "interactions")
            .into_iter()
            .filter_map(|inter| {
                let Some(dept_name) = U::meaningful(&text(inter, "department"), NO_DEPARTMENT_PLACEHOLDERS) else {
                    metrics::normalize::item_filtered(Level::L3, "no_department");
                    return None;
                };
                Some(Interaction {
                    dept: classify_department(&dept_name, None),
                    desc: U::normalize_text(&text(inter, "description")),
                    dept_name,
                })
            })
            .collect()
    }
}

/// `priority` restricted to 1/2/3; a missing key counts as the default tier,
/// anything else drops the field
fn auto_priority(task: &Value) -> Option<AutomationPriority> {
    let raw = match task.get("priority") {
        None => DEFAULT_L3_PRIORITY.to_string(),
        Some(value) => scalar_text(value).trim().to_string(),
    };
    AutomationPriority::from_code(&raw).filter(|p| *p != AutomationPriority::NotNeeded)
}

impl LevelNormalizer for L3Normalizer {
    type Output = L3Record;

    fn level(&self) -> Level {
        Level::L3
    }

    fn normalize(&self, record: &RawRecord, index: usize) -> L3Record {
        let division_raw = U::normalize_text(&record.respondent_text("division"));
        let dept_text = U::first_non_empty(&[
            record.respondent_text("department").as_str(),
            division_raw.as_str(),
            record.declared_source().as_str(),
        ]);
        let dep = U::department(record, &dept_text, Some(division_raw.as_str()));

        let mut items = Vec::new();
        for task in U::objects(Level::L3, &record.record, "tasks") {
            let name = scalar_text(field(task, "task_name"));
            if let Some(reason) = Self::rejection(&name) {
                debug!(file = %record.source_file, task = %name, reason, "task filtered");
                metrics::normalize::item_filtered(Level::L3, reason);
                continue;
            }
            items.push(self.task(task));
        }

        L3Record {
            id: RecordId::new(dep, Level::L3, index),
            fio: U::shorten_fio(&record.respondent_text("fio")),
            lvl: Level::L3.number(),
            dep,
            div: canonicalize_division(&division_raw),
            pos: U::normalize_text(&record.respondent_text("position")),
            items,
        }
    }

    fn name(&self) -> &str {
        "Employee (L3) normalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, Frequency, RoutineLevel, TaskType};
    use serde_json::json;

    fn raw(record: Value) -> RawRecord {
        RawRecord::new(Level::L3, "emp.json", record)
    }

    fn sample() -> Value {
        json!({
            "respondent": {
                "fio": "Петрова Анна Сергеевна",
                "department": "Операционный департамент",
                "division": "Отдел продаж",
                "position": "Менеджер"
            },
            "tasks": [
                {
                    "task_name": "Оформление  визы",
                    "task_type": "Рутинная",
                    "routine_level": "Очень высокий",
                    "regularity": "Ежедневно",
                    "time_minutes": 40,
                    "task_character": "Заполнение анкет",
                    "problem": "Проблем нет",
                    "problem_cause": "Нет",
                    "priority": 1,
                    "interactions": [
                        {"department": "Бухгалтерия", "description": "Оплата сборов"},
                        {"department": "нет отделов", "description": ""},
                        {"department": "", "description": "x"},
                        {"department": "[Нет отдела]"}
                    ],
                    "internal_resources": ["Мастер-Тур", ""],
                    "external_resources": "Сайт посольства"
                },
                {"task_name": "#NAME?", "priority": "2"},
                {"task_name": "", "task_type": "Проблемная"},
                {"task_name": "  "},
                {
                    "task_name": "Разбор жалоб",
                    "task_type": "Проблемная задача",
                    "time_minutes": "15,5",
                    "problem": "Долгие ответы",
                    "priority": "7"
                },
                {"task_name": "Звонки"}
            ]
        })
    }

    #[test]
    fn test_normalize_l3_record() {
        let out = L3Normalizer::new().normalize(&raw(sample()), 2);

        assert_eq!(out.id.as_str(), "OPS-L3-002");
        assert_eq!(out.dep, Department::Operations);
        assert_eq!(out.div, "Отдел продаж");
        assert_eq!(out.fio, "Петрова А.С.");
        assert_eq!(out.lvl, 3);
        assert_eq!(out.pos, "Менеджер");
    }

    #[test]
    fn test_invalid_task_names_are_excluded() {
        let out = L3Normalizer::new().normalize(&raw(sample()), 1);
        let names: Vec<&str> = out.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Оформление визы", "Разбор жалоб", "Звонки"]);
    }

    #[test]
    fn test_task_fields() {
        let out = L3Normalizer::new().normalize(&raw(sample()), 1);
        let task = &out.items[0];

        assert_eq!(task.task_type, TaskType::Routine);
        assert_eq!(task.routine, RoutineLevel::VeryHigh);
        assert_eq!(task.frequency, Frequency::Daily);
        assert_eq!(task.minutes, serde_json::Number::from(40));
        assert_eq!(task.character, "Заполнение анкет");
        assert_eq!(task.problem, None);
        assert_eq!(task.cause, None);
        assert_eq!(task.auto_priority, Some(AutomationPriority::Critical));
        assert_eq!(
            task.internal_resources.as_deref(),
            Some(&["Мастер-Тур".to_string()][..])
        );
        assert_eq!(
            task.external_resources.as_deref(),
            Some(&["Сайт посольства".to_string()][..])
        );
    }

    #[test]
    fn test_interactions_skip_placeholders() {
        let out = L3Normalizer::new().normalize(&raw(sample()), 1);
        let interactions = out.items[0].interactions.as_ref().unwrap();

        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].dept, Department::Finance);
        assert_eq!(interactions[0].dept_name, "Бухгалтерия");
        assert_eq!(interactions[0].desc, "Оплата сборов");
    }

    #[test]
    fn test_priority_outside_closed_set_is_omitted() {
        let out = L3Normalizer::new().normalize(&raw(sample()), 1);

        let complaints = &out.items[1];
        assert_eq!(complaints.task_type, TaskType::Problem);
        assert_eq!(complaints.minutes.as_f64(), Some(15.5));
        assert_eq!(complaints.problem.as_deref(), Some("Долгие ответы"));
        assert_eq!(complaints.auto_priority, None);

        // Missing key takes the default tier
        assert_eq!(out.items[2].auto_priority, Some(AutomationPriority::Desirable));
        assert_eq!(out.items[2].interactions, None);
    }

    #[test]
    fn test_auto_priority() {
        assert_eq!(auto_priority(&json!({"priority": "2"})), Some(AutomationPriority::Important));
        assert_eq!(auto_priority(&json!({"priority": 3})), Some(AutomationPriority::Desirable));
        assert_eq!(auto_priority(&json!({"priority": "0"})), None);
        assert_eq!(auto_priority(&json!({"priority": null})), None);
        assert_eq!(auto_priority(&json!({})), Some(AutomationPriority::Desirable));
    }

    #[test]
    fn test_rejection() {
        assert_eq!(L3Normalizer::rejection(""), Some("empty_name"));
        assert_eq!(L3Normalizer::rejection(" \t"), Some("empty_name"));
        assert_eq!(L3Normalizer::rejection("=A1 #REF!"), Some("spreadsheet_error"));
        assert_eq!(L3Normalizer::rejection("#N/A"), Some("spreadsheet_error"));
        assert_eq!(L3Normalizer::rejection("Звонки"), None);
    }
}
