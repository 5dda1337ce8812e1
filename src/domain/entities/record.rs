use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// A single scalar cell of a dataset row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Lenient numeric reading: numbers as-is, text through a leading-number parse.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Null => None,
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => parse_leading_number(text),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("expected a JSON array of rows")]
    NotAnArray,
    #[error("row {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("row {index}, column {key:?}: nested values are not supported")]
    NestedValue { index: usize, key: String },
}

/// One row of a dataset: column name to scalar value. Absent keys read as null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> &CellValue {
        self.fields.get(key).unwrap_or(&NULL_CELL)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_json_row(index: usize, value: Value) -> Result<Self, IngestError> {
        let Value::Object(map) = value else {
            return Err(IngestError::NotAnObject { index });
        };

        let mut record = Record::new();
        for (key, cell) in map {
            let cell = match cell {
                Value::Null => CellValue::Null,
                Value::Bool(flag) => CellValue::Text(flag.to_string()),
                Value::Number(number) => match number.as_f64() {
                    Some(value) => CellValue::Number(value),
                    None => CellValue::Text(number.to_string()),
                },
                Value::String(text) => CellValue::Text(text),
                Value::Array(_) | Value::Object(_) => {
                    return Err(IngestError::NestedValue { index, key });
                }
            };
            record.fields.insert(key, cell);
        }
        Ok(record)
    }
}

/// Converts a JSON array of flat objects into records.
pub fn records_from_json(value: Value) -> Result<Vec<Record>, IngestError> {
    let Value::Array(rows) = value else {
        return Err(IngestError::NotAnArray);
    };
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| Record::from_json_row(index, row))
        .collect()
}

/// Parses the longest numeric prefix of `text`, ignoring leading whitespace.
/// `"12.5 kg"` reads as 12.5, `"abc"` as nothing.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn leading_number_parse_is_lenient() {
        assert_eq!(parse_leading_number("12.5 kg"), Some(12.5));
        assert_eq!(parse_leading_number("  -3"), Some(-3.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("7."), Some(7.0));
        assert_eq!(parse_leading_number("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn records_from_json_maps_scalars() {
        let records = records_from_json(json!([
            {"Name": "Alpha", "PRS": 1.5, "Active": true, "Lote": null},
            {"Name": "Beta"}
        ]))
        .expect("flat rows should ingest");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value("Name"), &CellValue::from("Alpha"));
        assert_eq!(records[0].value("PRS"), &CellValue::Number(1.5));
        assert_eq!(records[0].value("Active"), &CellValue::from("true"));
        assert!(records[0].value("Lote").is_null());
        assert!(records[1].value("PRS").is_null());
        assert!(!records[1].contains_key("PRS"));
    }

    #[test]
    fn records_from_json_rejects_nested_and_non_array_input() {
        assert_eq!(
            records_from_json(json!({"rows": []})),
            Err(IngestError::NotAnArray)
        );
        assert_eq!(
            records_from_json(json!([1])),
            Err(IngestError::NotAnObject { index: 0 })
        );
        assert_eq!(
            records_from_json(json!([{"a": 1}, {"b": [1, 2]}])),
            Err(IngestError::NestedValue {
                index: 1,
                key: "b".to_string()
            })
        );
    }

    #[test]
    fn display_matches_plain_stringification() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from("x").to_string(), "x");
    }
}
