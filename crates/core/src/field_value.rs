use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b).is_eq(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl FieldValue {
    /// Classify free-form text. Boolean words win over numbers, integers
    /// win over floats, and anything unparseable stays text.
    pub fn infer(text: &str) -> FieldValue {
        if text.eq_ignore_ascii_case("true") {
            return FieldValue::Boolean(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return FieldValue::Boolean(false);
        }
        if let Ok(n) = text.parse::<i64>() {
            return FieldValue::Integer(n);
        }
        if let Ok(f) = text.parse::<f64>() {
            return FieldValue::Float(f);
        }
        FieldValue::Text(text.to_string())
    }

    /// Parse `text` into the same variant as `self`, so an edit to an
    /// existing field keeps its type. Input that no longer parses falls
    /// back to `Text` rather than being rejected.
    pub fn reinterpret(&self, text: &str) -> FieldValue {
        match self {
            FieldValue::Boolean(_) => match text.parse::<bool>() {
                Ok(b) => FieldValue::Boolean(b),
                Err(_) => FieldValue::Text(text.to_string()),
            },
            FieldValue::Integer(_) => match text.parse::<i64>() {
                Ok(n) => FieldValue::Integer(n),
                Err(_) => FieldValue::Text(text.to_string()),
            },
            FieldValue::Float(_) => match text.parse::<f64>() {
                Ok(f) => FieldValue::Float(f),
                Err(_) => FieldValue::Text(text.to_string()),
            },
            FieldValue::Text(_) => FieldValue::Text(text.to_string()),
        }
    }

    /// Render the value the way an edit form shows it.
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean, integer, float, or string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
                Ok(FieldValue::Boolean(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
                Ok(FieldValue::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
                if v <= i64::MAX as u64 {
                    Ok(FieldValue::Integer(v as i64))
                } else {
                    Ok(FieldValue::Float(v as f64))
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
                Ok(collapse_float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
                Ok(FieldValue::infer(v))
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

// Catalogue feeds carry whole numbers as floats; fold those back to integers.
fn collapse_float(v: f64) -> FieldValue {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
        FieldValue::Integer(v as i64)
    } else {
        FieldValue::Float(v)
    }
}

/// Serialize a field map to the msgpack blob stored alongside an item.
pub fn encode_fields(fields: &BTreeMap<String, FieldValue>) -> Result<Vec<u8>, CoreError> {
    rmp_serde::to_vec(fields).map_err(|e| CoreError::FieldEncode(e.to_string()))
}

/// Deserialize a stored field blob back into a field map.
pub fn decode_fields(bytes: &[u8]) -> Result<BTreeMap<String, FieldValue>, CoreError> {
    rmp_serde::from_slice(bytes).map_err(|e| CoreError::FieldDecode(e.to_string()))
}
