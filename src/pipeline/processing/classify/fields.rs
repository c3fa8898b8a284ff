//! Keyword classifiers for the free-text answers of the questionnaires.
//!
//! Each classifier is independent: empty input yields its default code,
//! otherwise the lowercased text is tested against an ordered rule list and the
//! first hit wins.

use crate::domain::{
    AutomationPriority, Criticality, Frequency, RegulationStatus, RoutineLevel, TaskType,
};

/// One step of a keyword cascade: any listed substring selects `code`
pub struct KeywordRule<T: 'static> {
    pub any_of: &'static [&'static str],
    pub code: T,
}

/// First rule with a keyword contained in `text_lower`
pub fn first_match<T: Copy>(text_lower: &str, rules: &[KeywordRule<T>]) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.any_of.iter().any(|kw| text_lower.contains(kw)))
        .map(|rule| rule.code)
}

const CRITICALITY_RULES: &[KeywordRule<Criticality>] = &[
    KeywordRule { any_of: &["высок", "high"], code: Criticality::High },
    KeywordRule { any_of: &["низк", "low"], code: Criticality::Low },
];

pub fn classify_criticality(text: &str) -> Criticality {
    if text.is_empty() {
        return Criticality::Medium;
    }
    first_match(&text.to_lowercase(), CRITICALITY_RULES).unwrap_or(Criticality::Medium)
}

const ALREADY_AUTOMATED: &[&str] = &["уже есть", "уже автоматизир"];

const PRIORITY_RULES: &[KeywordRule<AutomationPriority>] = &[
    KeywordRule {
        // Substring match: "некритично" also lands here, ahead of the tier-3 rule
        any_of: &["первую очередь", "приоритет 1", "критично"],
        code: AutomationPriority::Critical,
    },
    KeywordRule {
        any_of: &["хотелось бы", "приоритет 2", "важно"],
        code: AutomationPriority::Important,
    },
    KeywordRule {
        any_of: &["можно", "приоритет 3", "некритично"],
        code: AutomationPriority::Desirable,
    },
];

/// True when the answer says the process is automated already
pub fn is_already_automated(text_lower: &str) -> bool {
    ALREADY_AUTOMATED.iter().any(|kw| text_lower.contains(kw))
}

pub fn classify_automation_priority(text: &str) -> AutomationPriority {
    if text.is_empty() {
        return AutomationPriority::NotNeeded;
    }
    let text_lower = text.to_lowercase();

    if is_already_automated(&text_lower) {
        return AutomationPriority::NotNeeded;
    }
    if text_lower.contains("нет") && !text_lower.contains("да") {
        return AutomationPriority::NotNeeded;
    }
    if let Some(code) = first_match(&text_lower, PRIORITY_RULES) {
        return code;
    }
    if text_lower.contains("да") {
        return AutomationPriority::Important;
    }
    AutomationPriority::NotNeeded
}

const REGULATION_RULES: &[KeywordRule<RegulationStatus>] = &[
    KeywordRule { any_of: &["нет", "отсутств"], code: RegulationStatus::Missing },
    KeywordRule { any_of: &["наброс", "блок-схем", "схем"], code: RegulationStatus::Draft },
    KeywordRule { any_of: &["есть", "утвержд"], code: RegulationStatus::Exists },
];

pub fn classify_regulation(text: &str) -> RegulationStatus {
    if text.is_empty() {
        return RegulationStatus::Missing;
    }
    first_match(&text.to_lowercase(), REGULATION_RULES).unwrap_or(RegulationStatus::Missing)
}

const TASK_TYPE_RULES: &[KeywordRule<TaskType>] = &[KeywordRule {
    any_of: &["проблем"],
    code: TaskType::Problem,
}];

pub fn classify_task_type(text: &str) -> TaskType {
    if text.is_empty() {
        return TaskType::Routine;
    }
    first_match(&text.to_lowercase(), TASK_TYPE_RULES).unwrap_or(TaskType::Routine)
}

const ROUTINE_RULES: &[KeywordRule<RoutineLevel>] = &[
    KeywordRule { any_of: &["очень высок"], code: RoutineLevel::VeryHigh },
    KeywordRule { any_of: &["высок"], code: RoutineLevel::High },
    KeywordRule { any_of: &["низк"], code: RoutineLevel::Low },
];

pub fn classify_routine(text: &str) -> RoutineLevel {
    if text.is_empty() {
        return RoutineLevel::Medium;
    }
    first_match(&text.to_lowercase(), ROUTINE_RULES).unwrap_or(RoutineLevel::Medium)
}

const FREQUENCY_RULES: &[KeywordRule<Frequency>] = &[
    KeywordRule { any_of: &["ежедневн", "каждый день"], code: Frequency::Daily },
    KeywordRule { any_of: &["еженедельн", "каждую неделю"], code: Frequency::Weekly },
    KeywordRule { any_of: &["ежемесячн", "каждый месяц"], code: Frequency::Monthly },
    KeywordRule { any_of: &["ежеквартальн", "квартал"], code: Frequency::Quarterly },
];

pub fn classify_frequency(text: &str) -> Frequency {
    if text.is_empty() {
        return Frequency::OnRequest;
    }
    first_match(&text.to_lowercase(), FREQUENCY_RULES).unwrap_or(Frequency::OnRequest)
}
