use survey_normalizer::domain::{AutomationPriority, Department};
use survey_normalizer::pipeline::processing::classify::{
    classify_automation_priority, classify_department, resolve_department, ResolutionSource,
};

#[test]
fn test_division_map_overrides_free_text() {
    let resolved = resolve_department("Маркетинг", Some("ВИП-отдел"));
    assert_eq!(resolved.department, Department::Operations);
    assert_eq!(resolved.source, ResolutionSource::DivisionMap);

    // Without the division the same text is classified on its own
    assert_eq!(classify_department("Маркетинг", None), Department::Marketing);
}

#[test]
fn test_pattern_order_not_text_order_decides() {
    // "продаж" (OPS) appears first in the text, but SRV is tested earlier
    assert_eq!(
        classify_department("Отдел продаж и клиентского сервиса", None),
        Department::Service
    );
}

#[test]
fn test_unclassifiable_department_is_unknown() {
    let resolved = resolve_department("Прочее", Some("Неизвестный отдел"));
    assert_eq!(resolved.department, Department::Unknown);
    assert_eq!(resolved.source, ResolutionSource::Unknown);
    assert_eq!(classify_department("", None), Department::Unknown);
}

#[test]
fn test_automation_priority_scenarios() {
    assert_eq!(
        classify_automation_priority("Да, в первую очередь (критично)"),
        AutomationPriority::Critical
    );
    assert_eq!(
        classify_automation_priority("уже автоматизировано"),
        AutomationPriority::NotNeeded
    );
    assert_eq!(classify_automation_priority("Нет"), AutomationPriority::NotNeeded);
    assert_eq!(classify_automation_priority("Да"), AutomationPriority::Important);
}
