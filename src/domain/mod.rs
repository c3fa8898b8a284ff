// Domain data shapes shared across layers

pub mod canonical;
pub mod dictionaries;
pub mod raw;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use canonical::{
    AutomationInfo, CanonicalRecord, Goal, Interaction, L1Process, L1Record, L2Item, L2Record,
    L3Record, L3Task, RecordId,
};
pub use dictionaries::{
    AutomationPriority, Criticality, Department, Frequency, RegulationStatus, RoutineLevel,
    TaskType, Vocabulary,
};
pub use raw::RawRecord;

/// Survey depth: department head, division head, individual contributor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    L1,
    L2,
    L3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::L1, Level::L2, Level::L3];

    pub fn number(self) -> u8 {
        match self {
            Level::L1 => 1,
            Level::L2 => 2,
            Level::L3 => 3,
        }
    }

    /// Lowercase key used in the output (`l1`, `l2`, `l3`) and in config tables
    pub fn key(self) -> &'static str {
        match self {
            Level::L1 => "l1",
            Level::L2 => "l2",
            Level::L3 => "l3",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.number())
    }
}
