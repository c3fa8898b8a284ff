use serde_json::Value;

use super::base::{LevelNormalizer, NormalizerUtils as U};
use crate::constants::{EMPTY_CAUSES, EMPTY_DASH, L1_EMPTY_PROBLEMS};
use crate::domain::raw::{row, text};
use crate::domain::{AutomationInfo, AutomationPriority, Goal, L1Process, L1Record, Level, RawRecord, RecordId};
use crate::pipeline::processing::classify::{
    classify_automation_priority, classify_criticality, classify_regulation,
};
use crate::pipeline::processing::normalize::join::join_by_row;

/// Normalizer for department-head (L1) questionnaires
#[derive(Debug, Default, Clone, Copy)]
pub struct L1Normalizer;

impl L1Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// A goal with the texts of its tasks and the rows of its processes
    fn goal(&self, goal: &Value, tasks: &[&Value], processes: &[&Value]) -> Goal {
        // A goal without a row joins nothing
        let goal_row = row(goal, "row");

        let goal_tasks: Vec<String> = goal_row
            .map(|r| {
                join_by_row(r, tasks, |t| row(t, "goal_row"))
                    .map(|t| U::normalize_text(&text(t, "text")))
                    .collect()
            })
            .unwrap_or_default();

        // Processes reference the goal through `task_row`
        let goal_processes: Vec<i64> = goal_row
            .map(|r| {
                join_by_row(r, processes, |p| row(p, "task_row"))
                    .filter_map(|p| row(p, "row"))
                    .collect()
            })
            .unwrap_or_default();

        Goal {
            id: goal_row.unwrap_or(0),
            text: U::normalize_text(&text(goal, "text")),
            tasks: U::non_empty(goal_tasks),
            processes: U::non_empty(goal_processes),
        }
    }

    fn process(&self, process: &Value) -> L1Process {
        let auto_text = U::normalize_text(&text(process, "needs_automation"));
        let priority = classify_automation_priority(&auto_text);

        L1Process {
            name: U::normalize_text(&text(process, "name")),
            criticality: classify_criticality(&U::normalize_text(&text(process, "criticality"))),
            staff: U::normalize_text(&text(process, "employees_involved")),
            depts: U::normalize_text(&text(process, "departments_involved")),
            regulation: classify_regulation(&U::normalize_text(&text(process, "has_regulation"))),
            problem: U::meaningful(&text(process, "problems"), L1_EMPTY_PROBLEMS),
            cause: U::meaningful(&text(process, "causes"), EMPTY_CAUSES),
            auto: AutomationInfo {
                need: priority != AutomationPriority::NotNeeded,
                priority,
                done: is_done(&auto_text).then_some(true),
                reason: U::meaningful(&text(process, "why"), EMPTY_DASH),
                effect: U::meaningful(&text(process, "expected_effect"), EMPTY_DASH),
            },
        }
    }
}

/// "уже" anywhere, or any form of "автоматизировать"
fn is_done(auto_text: &str) -> bool {
    let lower = auto_text.to_lowercase();
    lower.contains("уже") || lower.contains("автоматизиров")
}

impl LevelNormalizer for L1Normalizer {
    type Output = L1Record;

    fn level(&self) -> Level {
        Level::L1
    }

    fn normalize(&self, record: &RawRecord, index: usize) -> L1Record {
        // No division concept at this level: department text, else the declared source
        let dept_text = U::first_non_empty(&[
            record.respondent_text("department").as_str(),
            record.declared_source().as_str(),
        ]);
        let dep = U::department(record, &dept_text, None);

        let goals = U::objects(Level::L1, &record.record, "goals");
        let tasks = U::objects(Level::L1, &record.record, "tasks");
        let processes = U::objects(Level::L1, &record.record, "processes");

        L1Record {
            id: RecordId::new(dep, Level::L1, index),
            fio: U::shorten_fio(&record.respondent_text("fio")),
            lvl: Level::L1.number(),
            dep,
            num: U::normalize_text(&record.respondent_text("division_size")),
            goals: goals.iter().map(|g| self.goal(g, &tasks, &processes)).collect(),
            processes: processes.iter().map(|p| self.process(p)).collect(),
        }
    }

    fn name(&self) -> &str {
        "Department head (L1) normalizer"
    }
}
