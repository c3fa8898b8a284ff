use serde_json::Value;
use std::collections::BTreeSet;

use super::base::{LevelNormalizer, NormalizerUtils as U};
use crate::constants::EMPTY_STEP_NOTES;
use crate::domain::raw::{array, list_or_scalar, scalar_text, text};
use crate::domain::{L2Item, L2Record, Level, RawRecord, RecordId};
use crate::pipeline::processing::classify::canonicalize_division;

/// Normalizer for division-head (L2) questionnaires.
///
/// Flattens division tasks → task processes → process steps into one item per
/// process, folding the steps into sparse per-field arrays.
#[derive(Debug, Default, Clone, Copy)]
pub struct L2Normalizer;

/// Per-step answers of one process, gathered before they are attached
#[derive(Debug, Default)]
struct StepAggregate {
    descriptions: Vec<String>,
    delays: Vec<String>,
    errors: Vec<String>,
    departments: BTreeSet<String>,
    roles: Vec<String>,
    automation: Vec<String>,
}

impl StepAggregate {
    fn add(&mut self, step: &Value) {
        let desc = U::normalize_text(&text(step, "step_description"));
        if !desc.is_empty() {
            self.descriptions.push(desc);
        }
        if let Some(delay) = U::meaningful(&text(step, "step_delays"), EMPTY_STEP_NOTES) {
            self.delays.push(delay);
        }
        if let Some(err) = U::meaningful(&text(step, "step_errors"), EMPTY_STEP_NOTES) {
            self.errors.push(err);
        }
        let dept = U::normalize_text(&text(step, "step_involved_departments"));
        if !dept.is_empty() {
            self.departments.insert(dept);
        }
        let role = U::normalize_text(&text(step, "step_department_roles"));
        if !role.is_empty() {
            self.roles.push(role);
        }
        let auto = U::normalize_text(&text(step, "step_needs_automation"));
        if auto.to_lowercase().contains("да") {
            self.automation.push(auto);
        }
    }

    /// Attach only the arrays that collected something
    fn attach(self, item: &mut L2Item) {
        item.stages_desc = U::non_empty(self.descriptions);
        item.delays = U::non_empty(self.delays);
        item.errors = U::non_empty(self.errors);
        item.depts_involved = U::non_empty(self.departments.into_iter().collect());
        item.dept_roles = U::non_empty(self.roles);
        if !self.automation.is_empty() {
            item.auto_needed = Some(true);
            item.auto_reason = Some(self.automation);
        }
    }
}

impl L2Normalizer {
    pub fn new() -> Self {
        Self
    }

    fn item(&self, process: &Value) -> L2Item {
        let mut item = L2Item {
            name: U::normalize_text(&text(process, "process_name")),
            desc: U::normalize_text(&text(process, "process_description")),
            trigger: U::normalize_text(&text(process, "process_trigger")),
            result: U::normalize_text(&text(process, "process_result")),
            systems: U::non_empty(U::clean_list(list_or_scalar(process, "process_systems"))),
            databases: U::non_empty(U::clean_list(list_or_scalar(process, "process_databases"))),
            stages_count: U::normalize_text(&text(process, "process_steps_count")),
            ..L2Item::default()
        };

        let mut steps = StepAggregate::default();
        for step in U::objects(Level::L2, process, "process_steps") {
            steps.add(step);
        }
        steps.attach(&mut item);
        item
    }
}

impl LevelNormalizer for L2Normalizer {
    type Output = L2Record;

    fn level(&self) -> Level {
        Level::L2
    }

    fn normalize(&self, record: &RawRecord, index: usize) -> L2Record {
        let division_raw = U::normalize_text(&record.respondent_text("division"));
        let dept_text = U::first_non_empty(&[
            record.respondent_text("department").as_str(),
            division_raw.as_str(),
            record.declared_source().as_str(),
        ]);
        let dep = U::department(record, &dept_text, Some(division_raw.as_str()));

        let goals = array(&record.record, "division_goals")
            .iter()
            .map(|g| U::normalize_text(&scalar_text(g)))
            .filter(|g| !g.is_empty())
            .collect();

        let mut tasks = Vec::new();
        let mut items = Vec::new();
        for task in U::objects(Level::L2, &record.record, "division_tasks") {
            let task_name = U::normalize_text(&text(task, "task_name"));
            if !task_name.is_empty() {
                tasks.push(task_name);
            }
            for process in U::objects(Level::L2, task, "task_processes") {
                items.push(self.item(process));
            }
        }

        L2Record {
            id: RecordId::new(dep, Level::L2, index),
            fio: U::shorten_fio(&record.respondent_text("fio")),
            lvl: Level::L2.number(),
            dep,
            div: canonicalize_division(&division_raw),
            pos: U::normalize_text(&record.respondent_text("position")),
            num: U::normalize_text(&record.respondent_text("division_size")),
            g: goals,
            tasks,
            items,
        }
    }

    fn name(&self) -> &str {
        "Division head (L2) normalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;
    use serde_json::json;

    fn raw(record: Value) -> RawRecord {
        RawRecord::new(Level::L2, "div.json", record)
    }

    fn sample() -> Value {
        json!({
            "respondent": {
                "fio": "Кузнецов Олег Игоревич",
                "department": "Маркетинг",
                "division": "Вип отдел",
                "position": "Руководитель  отдела",
                "division_size": "7"
            },
            "division_goals": ["Качество обслуживания", "", null, "Скорость"],
            "division_tasks": [
                {
                    "task_name": "Бронирование туров",
                    "task_processes": [
                        {
                            "process_name": "Подтверждение брони",
                            "process_description": "Проверка и подтверждение",
                            "process_trigger": "Заявка клиента",
                            "process_result": "Подтверждённая бронь",
                            "process_systems": ["Мастер-Тур", ""],
                            "process_databases": "База отелей",
                            "process_steps_count": 3,
                            "process_steps": [
                                {
                                    "step_description": "Проверить наличие",
                                    "step_delays": "нет",
                                    "step_errors": "Ошибки в датах",
                                    "step_involved_departments": "Отдел бронирования",
                                    "step_department_roles": "Проверка",
                                    "step_needs_automation": "Да, сверка вручную"
                                },
                                {
                                    "step_description": "Отправить подтверждение",
                                    "step_delays": "Ожидание ответа отеля",
                                    "step_errors": "Нет",
                                    "step_involved_departments": "Отдел бронирования",
                                    "step_needs_automation": "нет"
                                },
                                {
                                    "step_description": "Выставить счёт",
                                    "step_involved_departments": "Бухгалтерия"
                                }
                            ]
                        },
                        {"process_name": "Архивирование"}
                    ]
                },
                {"task_name": "", "task_processes": "not a list"}
            ]
        })
    }

    #[test]
    fn test_normalize_l2_record() {
        let out = L2Normalizer::new().normalize(&raw(sample()), 12);

        // Division map wins over the free-text "Маркетинг"
        assert_eq!(out.dep, Department::Operations);
        assert_eq!(out.id.as_str(), "OPS-L2-012");
        assert_eq!(out.div, "ВИП-отдел");
        assert_eq!(out.fio, "Кузнецов О.И.");
        assert_eq!(out.pos, "Руководитель отдела");
        assert_eq!(out.num, "7");
        assert_eq!(out.g, vec!["Качество обслуживания", "Скорость"]);
        assert_eq!(out.tasks, vec!["Бронирование туров"]);
        assert_eq!(out.items.len(), 2);
    }

    #[test]
    fn test_steps_fold_into_sparse_arrays() {
        let out = L2Normalizer::new().normalize(&raw(sample()), 1);
        let item = &out.items[0];

        assert_eq!(item.systems.as_deref(), Some(&["Мастер-Тур".to_string()][..]));
        assert_eq!(item.databases.as_deref(), Some(&["База отелей".to_string()][..]));
        assert_eq!(item.stages_count, "3");
        assert_eq!(item.stages_desc.as_ref().map(Vec::len), Some(3));
        assert_eq!(
            item.delays.as_deref(),
            Some(&["Ожидание ответа отеля".to_string()][..])
        );
        assert_eq!(item.errors.as_deref(), Some(&["Ошибки в датах".to_string()][..]));
        assert_eq!(
            item.depts_involved.as_deref(),
            Some(&["Бухгалтерия".to_string(), "Отдел бронирования".to_string()][..])
        );
        assert_eq!(item.dept_roles.as_deref(), Some(&["Проверка".to_string()][..]));
        assert_eq!(item.auto_needed, Some(true));
        assert_eq!(
            item.auto_reason.as_deref(),
            Some(&["Да, сверка вручную".to_string()][..])
        );
    }

    #[test]
    fn test_process_without_steps_has_no_step_fields() {
        let out = L2Normalizer::new().normalize(&raw(sample()), 1);
        let bare = serde_json::to_value(&out.items[1]).unwrap();
        let keys: Vec<&str> = bare.as_object().unwrap().keys().map(String::as_str).collect();
        for absent in ["sy", "db", "stages_desc", "delays", "errors", "depts_involved", "dept_roles", "auto_needed", "auto_reason"] {
            assert!(!keys.contains(&absent), "{absent} should be omitted");
        }
        assert!(keys.contains(&"stages_count"));
    }

    #[test]
    fn test_unmapped_division_uses_department_text() {
        let out = L2Normalizer::new().normalize(
            &raw(json!({"respondent": {"department": "Департамент финансов", "division": "Казначейство"}})),
            1,
        );
        assert_eq!(out.dep, Department::Finance);
        assert_eq!(out.div, "Казначейство");
    }

    #[test]
    fn test_division_text_is_used_when_department_is_blank() {
        let out = L2Normalizer::new().normalize(
            &raw(json!({"respondent": {"division": "Группа продукта Турция"}})),
            1,
        );
        assert_eq!(out.dep, Department::Revenue);
    }
}
