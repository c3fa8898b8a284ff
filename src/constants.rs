/// Schema tag written to `meta.version` of the output dataset
pub const SCHEMA_VERSION: &str = "2.0-compact";

// Default input layout, one folder of JSON questionnaires per level
pub const L1_DIR: &str = "L1_json";
pub const L2_DIR: &str = "L2_json";
pub const L3_DIR: &str = "L3_json";
pub const OUTPUT_FILE: &str = "normalized_compact.json";
pub const LOG_DIR: &str = "logs";
pub const CONFIG_FILE: &str = "survey_normalizer.toml";
pub const CONFIG_ENV: &str = "SURVEY_NORMALIZER_CONFIG";

/// File-name fragments skipped when loading L2 questionnaires
pub const L2_EXCLUDE: &[&str] = &["ID_Дата"];
/// File-name fragments skipped when loading L3 questionnaires (duplicates, backups)
pub const L3_EXCLUDE: &[&str] = &[" 2.json", "_backup.json"];

/// Spreadsheet error values that leak into exported task names
pub const SPREADSHEET_ERRORS: &[&str] = &["#NAME?", "#REF!", "#VALUE!", "#N/A", "#DIV/0!"];

/// Answers meaning "no department", compared case-insensitively
pub const NO_DEPARTMENT_PLACEHOLDERS: &[&str] = &["нет отделов", "не имеется", "[Нет отдела]"];

// Answers that carry no information for the field they appear in
pub const L1_EMPTY_PROBLEMS: &[&str] = &["нет", "-", "нет проблем"];
pub const L3_EMPTY_PROBLEMS: &[&str] = &["проблем нет", "нет", "-"];
pub const EMPTY_CAUSES: &[&str] = &["нет", "-"];
pub const EMPTY_STEP_NOTES: &[&str] = &["нет"];
pub const EMPTY_DASH: &[&str] = &["-"];

/// L3 priority applied when the questionnaire leaves it out
pub const DEFAULT_L3_PRIORITY: &str = "3";
