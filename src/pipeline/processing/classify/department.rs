use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::division::department_for_division;
use crate::domain::Department;

/// Department text patterns, evaluated first-match-wins over lowercased text.
///
/// Order matters: several patterns overlap (`операционн` triggers both REV and
/// OPS) and the earlier entry must win.
static DEPARTMENT_PATTERNS: Lazy<Vec<(Regex, Department)>> = Lazy::new(|| {
    [
        (
            r"операционн\w*\s+доход|revenue|тарификац|продукт|группа\s+стран|ближн\w+\s+восток|экзотик|юва|fit",
            Department::Revenue,
        ),
        (r"hr|эйчар|human\s*resource", Department::Hr),
        (r"маркетинг|реклам|контент", Department::Marketing),
        (r"финанс|бухгалтер", Department::Finance),
        (r"\bit\b|информац|технолог|айти", Department::It),
        (r"въезд|mice|корпоратив|бизнес.?тревел", Department::Inbound),
        (
            r"агентств|развит\w+\s+взаимо|региональн|ключев\w+\s+клиент",
            Department::Agencies,
        ),
        (r"сервис|клиентск|поддержк", Department::Service),
        (
            r"операционн|продаж|брониров|вип|vip|чартер|транспорт|виз",
            Department::Operations,
        ),
    ]
    .into_iter()
    .map(|(pattern, dep)| {
        (
            Regex::new(pattern).expect("department pattern should compile"),
            dep,
        )
    })
    .collect()
});

/// Which rule produced a department code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    DivisionMap,
    TextPattern,
    Unknown,
}

impl ResolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionSource::DivisionMap => "division_map",
            ResolutionSource::TextPattern => "text_pattern",
            ResolutionSource::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepartmentResolution {
    pub department: Department,
    pub source: ResolutionSource,
}

/// Resolve a department with explicit precedence:
///
/// 1. a non-empty `division` found in the authority map wins outright;
/// 2. empty department text is `UNK`;
/// 3. the first matching text pattern;
/// 4. otherwise `UNK`.
pub fn resolve_department(department_text: &str, division: Option<&str>) -> DepartmentResolution {
    if let Some(department) = division
        .filter(|d| !d.trim().is_empty())
        .and_then(department_for_division)
    {
        return DepartmentResolution {
            department,
            source: ResolutionSource::DivisionMap,
        };
    }

    let unknown = DepartmentResolution {
        department: Department::Unknown,
        source: ResolutionSource::Unknown,
    };
    if department_text.is_empty() {
        return unknown;
    }

    let text_lower = department_text.to_lowercase();
    DEPARTMENT_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(&text_lower))
        .map(|(_, department)| DepartmentResolution {
            department: *department,
            source: ResolutionSource::TextPattern,
        })
        .unwrap_or(unknown)
}

/// Department code for a record; see [`resolve_department`] for precedence
pub fn classify_department(department_text: &str, division: Option<&str>) -> Department {
    resolve_department(department_text, division).department
}
