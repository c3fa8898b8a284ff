//! Division names: spelling canonicalization and the curated division →
//! department authority map.

use crate::domain::Department;

/// Verified division → department assignments from the company structure
/// sheet. Takes precedence over whatever respondents typed as their department.
pub static AUTHORITY_MAP: &[(&str, Department)] = &[
    // Agencies
    ("Управление по развитию региональных офисов", Department::Agencies),
    ("Офис г. Екатеринбург", Department::Agencies),
    ("Офис г. Казань", Department::Agencies),
    ("Офис г. Краснодар", Department::Agencies),
    ("Офис г. Новосибирск", Department::Agencies),
    ("Офис г. Пятигорск", Department::Agencies),
    ("Офис г. Самара", Department::Agencies),
    ("Офис г. Санкт-Петербург", Department::Agencies),
    ("Офис г. Хабаровск", Department::Agencies),
    ("Отдел по работе с ключевыми клиентами", Department::Agencies),
    ("Группа по привлечению агентств", Department::Agencies),
    // Revenue
    ("Отдел продукта_группа стран Ближний Восток", Department::Revenue),
    ("Отдел продукта_группа стран Экзотика", Department::Revenue),
    ("Отдел продукта_группа стран FIT", Department::Revenue),
    ("Отдел продукта_группа стран_FIT", Department::Revenue),
    ("Отдел продукта_группа стран ЮВА", Department::Revenue),
    ("Группа тарификации", Department::Revenue),
    ("Чартерная группа", Department::Revenue),
    ("Группа стран FIT", Department::Revenue),
    ("Группа стран «Ближний Восток»", Department::Revenue),
    ("Группа стран «Экзотика»", Department::Revenue),
    ("Группа стран «ЮВА»", Department::Revenue),
    // Inbound, MICE and corporate
    ("Отдел MICE", Department::Inbound),
    ("Отдел группового бронирования", Department::Inbound),
    ("Отдел бизнес-тревел", Department::Inbound),
    ("Отдел въездного туризма", Department::Inbound),
    // Operations
    ("ВИП-отдел", Department::Operations),
    ("ВИП отдел", Department::Operations),
    ("Группа визового сопровождения", Department::Operations),
    ("Транспортный отдел", Department::Operations),
    ("Отдел бронирования", Department::Operations),
    ("Отдел продаж", Department::Operations),
    // Client service
    ("Отдел клиентской поддержки", Department::Service),
    ("Отдел круглосуточной работы с клиентами", Department::Service),
    // Marketing
    ("Отдел рекламы", Department::Marketing),
    ("Отдел контент-маркетинга", Department::Marketing),
    ("Отдел маркетинга", Department::Marketing),
    ("Маркетинг", Department::Marketing),
    // Finance
    ("Бухгалтерия группы компаний_Бухгалтерия", Department::Finance),
    ("Бухгалтерия группы компаний", Department::Finance),
    ("Финансовый отдел", Department::Finance),
    ("Финансовый отдел_Банковская группа", Department::Finance),
    (
        "Финансовый отдел_Группа по расчетам с иностранными поставщиками",
        Department::Finance,
    ),
    ("Банковская группа", Department::Finance),
    ("Группа по расчетам с иностранными поставщиками", Department::Finance),
    ("Бухгалтерия", Department::Finance),
];

/// Spelling variants → canonical division name
pub static DIVISION_ALIASES: &[(&str, &str)] = &[
    ("ВИП отдел", "ВИП-отдел"),
    ("Вип-отдел", "ВИП-отдел"),
    ("Вип отдел", "ВИП-отдел"),
    ("отдел рекламы", "Отдел рекламы"),
    ("отдел бронирования", "Отдел бронирования"),
    ("офис г. Санкт-Петербург", "Офис г. Санкт-Петербург"),
    ("офис г. Екатеринбург", "Офис г. Екатеринбург"),
    ("Офис в г.Санкт-Петербурге", "Офис г. Санкт-Петербург"),
    ("Офис г.Санкт-Петербурге", "Офис г. Санкт-Петербург"),
    ("Офис г.Казань", "Офис г. Казань"),
    ("Офис г.Краснодар", "Офис г. Краснодар"),
    ("Представительсто в Новосибирске", "Офис г. Новосибирск"),
    ("представительство в г. Пятигорск", "Офис г. Пятигорск"),
    (
        "Отдел круглосуочной работы с клиентами",
        "Отдел круглосуточной работы с клиентами",
    ),
    ("Группа стран «Ближний Восток»", "Отдел продукта_группа стран Ближний Восток"),
    ("Группа стран «Экзотика»", "Отдел продукта_группа стран Экзотика"),
    ("Группа стран «ЮВА»", "Отдел продукта_группа стран ЮВА"),
    ("Группа стран FIT", "Отдел продукта_группа стран FIT"),
    ("не имеется", "[Нет отдела]"),
    ("нет отделов", "[Нет отдела]"),
];

/// Exact key match first, then a case-insensitive scan in table order
fn lookup<T: Copy>(table: &[(&'static str, T)], key: &str) -> Option<T> {
    if let Some((_, value)) = table.iter().find(|(k, _)| *k == key) {
        return Some(*value);
    }
    let key_lower = key.to_lowercase();
    table
        .iter()
        .find(|(k, _)| k.to_lowercase() == key_lower)
        .map(|(_, value)| *value)
}

/// Canonical spelling of a division name. Unknown names come back trimmed but
/// otherwise unchanged, so the function never fails and is idempotent.
pub fn canonicalize_division(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    lookup(DIVISION_ALIASES, trimmed)
        .map(str::to_string)
        .unwrap_or_else(|| trimmed.to_string())
}

/// Department assigned to a division by the authority map: exact,
/// case-insensitive, then canonicalized-form lookup.
pub fn department_for_division(text: &str) -> Option<Department> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    lookup(AUTHORITY_MAP, trimmed).or_else(|| {
        let canonical = canonicalize_division(trimmed);
        AUTHORITY_MAP
            .iter()
            .find(|(k, _)| *k == canonical)
            .map(|(_, dep)| *dep)
    })
}
