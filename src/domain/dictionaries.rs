//! Controlled vocabularies shared by the classifiers and the output dataset.
//!
//! Every vocabulary serializes as its short code and publishes a code → label
//! table in declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of codes with human-readable labels
pub trait Vocabulary: Copy + Sized + 'static {
    /// Key of this vocabulary in the output `dictionaries` block
    const NAME: &'static str;
    /// All members in publication order
    const ALL: &'static [Self];

    fn code(self) -> &'static str;
    fn label(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }
}

/// Code → label table for one vocabulary, in publication order
pub fn dictionary<V: Vocabulary>() -> IndexMap<&'static str, &'static str> {
    V::ALL.iter().map(|v| (v.code(), v.label())).collect()
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident as $dict:literal, default $default:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant,)+
        }

        impl Vocabulary for $name {
            const NAME: &'static str = $dict;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

vocabulary! {
    /// Organizational department; `Unknown` is the unresolved sentinel
    Department as "departments", default Unknown {
        Hr => ("HR", "Департамент HR"),
        Marketing => ("MKT", "Департамент маркетинга и рекламы"),
        Finance => ("FIN", "Департамент финансов"),
        It => ("IT", "Департамент информационных технологий"),
        Operations => ("OPS", "Операционный департамент"),
        Revenue => ("REV", "Департамент по управлению операционными доходами"),
        Agencies => ("AGN", "Департамент развития взаимодействия с агентствами"),
        Inbound => ("INB", "Департамент въездного туризма, MICE и корпоративного обслуживания"),
        Service => ("SRV", "Управление клиентского сервиса"),
        Unknown => ("UNK", "Не указан"),
    }
}

vocabulary! {
    /// Process criticality
    Criticality as "criticality", default Medium {
        High => ("H", "Высокая"),
        Medium => ("M", "Средняя"),
        Low => ("L", "Низкая"),
    }
}

vocabulary! {
    /// How urgently a process should be automated
    AutomationPriority as "automation_priority", default NotNeeded {
        Critical => ("1", "Да, в первую очередь (критично)"),
        Important => ("2", "Да, хотелось бы (важно)"),
        Desirable => ("3", "Можно, но некритично (желательно)"),
        NotNeeded => ("0", "Не нужно"),
    }
}

vocabulary! {
    /// Whether a process has a written regulation
    RegulationStatus as "regulation_status", default Missing {
        Exists => ("exists", "Есть утверждённый регламент"),
        Draft => ("draft", "Есть наброски/блок-схема"),
        Missing => ("none", "Регламента нет"),
    }
}

vocabulary! {
    TaskType as "task_type", default Routine {
        Routine => ("R", "Рутинная задача"),
        Problem => ("P", "Проблемная задача"),
    }
}

vocabulary! {
    RoutineLevel as "routine_level", default Medium {
        VeryHigh => ("VH", "Очень высокий"),
        High => ("H", "Высокий"),
        Medium => ("M", "Средний"),
        Low => ("L", "Низкий"),
    }
}

vocabulary! {
    Frequency as "frequency", default OnRequest {
        Daily => ("D", "Ежедневно"),
        Weekly => ("W", "Еженедельно"),
        Monthly => ("M", "Ежемесячно"),
        Quarterly => ("Q", "Ежеквартально"),
        OnRequest => ("R", "По запросу"),
    }
}

/// All seven dictionaries keyed by vocabulary name, as published in the dataset
pub fn all_dictionaries() -> IndexMap<&'static str, IndexMap<&'static str, &'static str>> {
    let mut out = IndexMap::new();
    out.insert(Department::NAME, dictionary::<Department>());
    out.insert(Criticality::NAME, dictionary::<Criticality>());
    out.insert(AutomationPriority::NAME, dictionary::<AutomationPriority>());
    out.insert(RegulationStatus::NAME, dictionary::<RegulationStatus>());
    out.insert(TaskType::NAME, dictionary::<TaskType>());
    out.insert(RoutineLevel::NAME, dictionary::<RoutineLevel>());
    out.insert(Frequency::NAME, dictionary::<Frequency>());
    out
}
