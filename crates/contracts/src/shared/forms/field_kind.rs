//! Field kinds and the values a form field can carry

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::domain::common::RecordId;

/// Closed set of input kinds a form field may have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    ShortText,
    LongText,
    Number,
    Date,
    Boolean,
    ForeignKey,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "short-text",
            Self::LongText => "long-text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::ForeignKey => "foreign-key",
        }
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey)
    }

    /// Coerce raw user input into a value of this kind.
    ///
    /// Empty text maps to `Null` (or `false` for booleans). Foreign keys are
    /// never typed in by hand, so they only accept a bare integer id.
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, String> {
        let trimmed = raw.trim();
        match self {
            Self::ShortText | Self::LongText => {
                if raw.is_empty() {
                    Ok(FieldValue::Null)
                } else {
                    Ok(FieldValue::Text(raw.to_string()))
                }
            }
            Self::Number => {
                if trimmed.is_empty() {
                    return Ok(FieldValue::Null);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(FieldValue::Number)
                    .ok_or_else(|| format!("'{}' is not a number", trimmed))
            }
            Self::Date => {
                if trimmed.is_empty() {
                    return Ok(FieldValue::Null);
                }
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map(FieldValue::Date)
                    .map_err(|_| format!("'{}' is not a date (expected YYYY-MM-DD)", trimmed))
            }
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "" | "false" | "off" | "0" => Ok(FieldValue::Bool(false)),
                "true" | "on" | "1" => Ok(FieldValue::Bool(true)),
                other => Err(format!("'{}' is not a yes/no value", other)),
            },
            Self::ForeignKey => {
                if trimmed.is_empty() {
                    return Ok(FieldValue::Null);
                }
                trimmed
                    .parse::<RecordId>()
                    .map(FieldValue::Id)
                    .map_err(|_| format!("'{}' is not a record id", trimmed))
            }
        }
    }
}

/// A typed field value.
///
/// Dates stay calendar dates until [`FieldValue::to_json`] serializes them
/// for transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
    Id(RecordId),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value may be stored in a field of `kind`
    pub fn fits(&self, kind: FieldKind) -> bool {
        match (self, kind) {
            (Self::Null, _) => true,
            (Self::Text(_), FieldKind::ShortText | FieldKind::LongText) => true,
            (Self::Number(_), FieldKind::Number) => true,
            (Self::Date(_), FieldKind::Date) => true,
            (Self::Bool(_), FieldKind::Boolean) => true,
            (Self::Id(_), FieldKind::ForeignKey) => true,
            _ => false,
        }
    }

    /// Transport form: dates become ISO-8601 calendar dates
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Id(id) => Value::from(*id),
        }
    }

    /// Text an input widget should show for this value
    pub fn to_input_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Id(id) => id.to_string(),
        }
    }

    /// Read a stored record value back into a typed value of `kind`
    pub fn from_json(kind: FieldKind, value: &Value) -> Option<Self> {
        match (kind, value) {
            (_, Value::Null) => Some(Self::Null),
            (FieldKind::ShortText | FieldKind::LongText, Value::String(s)) => {
                Some(Self::Text(s.clone()))
            }
            (FieldKind::Number, Value::Number(n)) => n.as_f64().map(Self::Number),
            (FieldKind::Date, Value::String(s)) => {
                let date_part = s.split('T').next().unwrap_or(s);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .ok()
                    .map(Self::Date)
            }
            (FieldKind::Boolean, Value::Bool(b)) => Some(Self::Bool(*b)),
            (FieldKind::ForeignKey, Value::Number(n)) => n.as_i64().map(Self::Id),
            _ => None,
        }
    }
}
