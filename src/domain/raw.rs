//! Raw questionnaire records and lenient accessors over their JSON.
//!
//! Questionnaires are exported from spreadsheets by hand, so any field may be
//! missing, null, a number where text was expected, or a scalar where a list
//! was expected. The accessors here never fail; they degrade to empty values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Level;

static NULL: Value = Value::Null;

/// One loaded questionnaire, before normalization
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawRecord {
    pub level: Level,
    /// File name the record was loaded from
    pub source_file: String,
    pub record: Value,
}

impl RawRecord {
    pub fn new(level: Level, source_file: impl Into<String>, record: Value) -> Self {
        Self {
            level,
            source_file: source_file.into(),
            record,
        }
    }

    /// The `respondent` block, or null when absent
    pub fn respondent(&self) -> &Value {
        field(&self.record, "respondent")
    }

    pub fn respondent_text(&self, key: &str) -> String {
        text(self.respondent(), key)
    }

    /// `source_file` as written inside the questionnaire (not the file name on disk)
    pub fn declared_source(&self) -> String {
        text(&self.record, "source_file")
    }
}

/// Field lookup that yields null for missing keys and non-object parents
pub fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&NULL)
}

/// Scalar rendered as text: strings as-is, numbers and booleans via display,
/// everything else empty
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn text(value: &Value, key: &str) -> String {
    scalar_text(field(value, key))
}

/// Array field; missing or non-array values read as empty
pub fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    field(value, key)
        .as_array()
        .map(|a| a.as_slice())
        .unwrap_or(&[])
}

/// Row number used for goal back-references; integers or integer-looking text
pub fn row(value: &Value, key: &str) -> Option<i64> {
    match field(value, key) {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A field that may hold a list or a single scalar, flattened to its raw texts
pub fn list_or_scalar(value: &Value, key: &str) -> Vec<String> {
    match field(value, key) {
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        other => {
            let single = scalar_text(other);
            if single.is_empty() {
                Vec::new()
            } else {
                vec![single]
            }
        }
    }
}

/// Numeric duration; numbers pass through, numeric text is parsed, anything else is 0
pub fn number(value: &Value, key: &str) -> serde_json::Number {
    match field(value, key) {
        Value::Number(n) => n.clone(),
        Value::String(s) => {
            let s = s.trim().replace(',', ".");
            if let Ok(int) = s.parse::<u64>() {
                int.into()
            } else {
                s.parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .unwrap_or_else(|| 0.into())
            }
        }
        _ => 0.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_degrades_to_empty() {
        let v = json!({"a": "x", "b": 5, "c": null, "d": [1]});
        assert_eq!(text(&v, "a"), "x");
        assert_eq!(text(&v, "b"), "5");
        assert_eq!(text(&v, "c"), "");
        assert_eq!(text(&v, "d"), "");
        assert_eq!(text(&v, "missing"), "");
        assert_eq!(text(&json!("not an object"), "a"), "");
    }

    #[test]
    fn test_row_accepts_numbers_and_numeric_text() {
        let v = json!({"a": 3, "b": "4", "c": 2.0, "d": "x", "e": 2.5});
        assert_eq!(row(&v, "a"), Some(3));
        assert_eq!(row(&v, "b"), Some(4));
        assert_eq!(row(&v, "c"), Some(2));
        assert_eq!(row(&v, "d"), None);
        assert_eq!(row(&v, "e"), None);
        assert_eq!(row(&v, "missing"), None);
    }

    #[test]
    fn test_list_or_scalar() {
        let v = json!({"list": ["1C", "", "Excel"], "one": "CRM", "none": "", "num": 7});
        assert_eq!(list_or_scalar(&v, "list"), vec!["1C", "", "Excel"]);
        assert_eq!(list_or_scalar(&v, "one"), vec!["CRM"]);
        assert!(list_or_scalar(&v, "none").is_empty());
        assert!(list_or_scalar(&v, "missing").is_empty());
        assert_eq!(list_or_scalar(&v, "num"), vec!["7"]);
    }

    #[test]
    fn test_number() {
        let v = json!({"a": 30, "b": "45", "c": "1,5", "d": "долго", "e": 12.5});
        assert_eq!(number(&v, "a"), serde_json::Number::from(30));
        assert_eq!(number(&v, "b"), serde_json::Number::from(45u64));
        assert_eq!(number(&v, "c").as_f64(), Some(1.5));
        assert_eq!(number(&v, "d"), serde_json::Number::from(0));
        assert_eq!(number(&v, "e").as_f64(), Some(12.5));
        assert_eq!(number(&v, "missing"), serde_json::Number::from(0));
    }

    #[test]
    fn test_respondent_accessors() {
        let raw = RawRecord::new(
            Level::L2,
            "a.json",
            json!({"respondent": {"fio": "Иванов Иван"}, "source_file": "dep.xlsx"}),
        );
        assert_eq!(raw.respondent_text("fio"), "Иванов Иван");
        assert_eq!(raw.respondent_text("division"), "");
        assert_eq!(raw.declared_source(), "dep.xlsx");
    }
}
