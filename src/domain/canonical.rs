use serde::{Deserialize, Serialize};
use std::fmt;

use super::dictionaries::{
    AutomationPriority, Criticality, Department, Frequency, RegulationStatus, RoutineLevel,
    TaskType, Vocabulary,
};
use super::Level;

/// Composite record key `<department-code>-L<level>-<NNN>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// `index` is the 1-based position of the record in its level's load order
    pub fn new(department: Department, level: Level, index: usize) -> Self {
        Self(format!(
            "{}-L{}-{:03}",
            department.code(),
            level.number(),
            index
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------- L1

/// Department-head questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L1Record {
    pub id: RecordId,
    pub fio: String,
    pub lvl: u8,
    pub dep: Department,
    /// Unit size as answered
    pub num: String,
    pub goals: Vec<Goal>,
    pub processes: Vec<L1Process>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Row number of the goal in the questionnaire
    pub id: i64,
    pub text: String,
    /// Texts of tasks whose `goal_row` points at this goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<String>>,
    /// Row numbers of processes whose `task_row` points at this goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L1Process {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "cr")]
    pub criticality: Criticality,
    pub staff: String,
    pub depts: String,
    #[serde(rename = "reg")]
    pub regulation: RegulationStatus,
    #[serde(rename = "pb", default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(rename = "cs", default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    pub auto: AutomationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationInfo {
    pub need: bool,
    pub priority: AutomationPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

// ---------------------------------------------------------------- L2

/// Division-head questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L2Record {
    pub id: RecordId,
    pub fio: String,
    pub lvl: u8,
    pub dep: Department,
    pub div: String,
    pub pos: String,
    pub num: String,
    /// Division goals
    pub g: Vec<String>,
    pub tasks: Vec<String>,
    pub items: Vec<L2Item>,
}

/// One process of a division task with its steps folded into sparse arrays
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct L2Item {
    #[serde(rename = "n")]
    pub name: String,
    pub desc: String,
    #[serde(rename = "tr")]
    pub trigger: String,
    #[serde(rename = "rs")]
    pub result: String,
    #[serde(rename = "sy", default, skip_serializing_if = "Option::is_none")]
    pub systems: Option<Vec<String>>,
    #[serde(rename = "db", default, skip_serializing_if = "Option::is_none")]
    pub databases: Option<Vec<String>>,
    pub stages_count: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages_desc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delays: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Distinct departments named across steps, sorted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depts_involved: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dept_roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_needed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reason: Option<Vec<String>>,
}

// ---------------------------------------------------------------- L3

/// Individual-contributor questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L3Record {
    pub id: RecordId,
    pub fio: String,
    pub lvl: u8,
    pub dep: Department,
    pub div: String,
    pub pos: String,
    pub items: Vec<L3Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L3Task {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "tp")]
    pub task_type: TaskType,
    #[serde(rename = "rt")]
    pub routine: RoutineLevel,
    #[serde(rename = "fr")]
    pub frequency: Frequency,
    /// Duration in minutes
    #[serde(rename = "tm")]
    pub minutes: serde_json::Number,
    #[serde(rename = "ch")]
    pub character: String,
    #[serde(rename = "pb", default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(rename = "cs", default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_priority: Option<AutomationPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<Interaction>>,
    #[serde(rename = "res_int", default, skip_serializing_if = "Option::is_none")]
    pub internal_resources: Option<Vec<String>>,
    #[serde(rename = "res_ext", default, skip_serializing_if = "Option::is_none")]
    pub external_resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub dept: Department,
    pub dept_name: String,
    pub desc: String,
}

/// Common view over the three record kinds for batch aggregation
pub trait CanonicalRecord {
    fn id(&self) -> &RecordId;
    fn department(&self) -> Department;
    /// Number of level-specific sub-items (processes for L1, items for L2/L3)
    fn item_count(&self) -> usize;
}

impl CanonicalRecord for L1Record {
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn department(&self) -> Department {
        self.dep
    }
    fn item_count(&self) -> usize {
        self.processes.len()
    }
}

impl CanonicalRecord for L2Record {
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn department(&self) -> Department {
        self.dep
    }
    fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl CanonicalRecord for L3Record {
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn department(&self) -> Department {
        self.dep
    }
    fn item_count(&self) -> usize {
        self.items.len()
    }
}
