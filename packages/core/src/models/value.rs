//! Property Values
//!
//! Typed property values stored on content nodes, the insertion-ordered
//! `PropertyMap` that holds them, and the `FromProperty` conversions used by
//! every typed accessor.
//!
//! Conversions are lenient in the same direction a rendering layer needs:
//! any scalar reads as a `String`, numeric strings read as numbers, a
//! multi-value property read as a scalar yields its first element, and a
//! scalar read as a list yields a one-element list. A value that cannot be
//! converted reads as absent, never as an error.

use crate::models::ValidationError;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single stored property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PropertyValue {
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    /// Homogeneous, flat sequence of scalars
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Build a multi-value property, rejecting nested or mixed-type arrays
    pub fn array(items: Vec<PropertyValue>) -> Result<Self, ValidationError> {
        if let Some(first) = items.first() {
            for item in &items {
                if matches!(item, PropertyValue::Array(_)) {
                    return Err(ValidationError::InvalidValue(
                        "arrays cannot be nested".to_string(),
                    ));
                }
                if std::mem::discriminant(item) != std::mem::discriminant(first) {
                    return Err(ValidationError::InvalidValue(format!(
                        "array mixes {} and {} values",
                        first.type_name(),
                        item.type_name()
                    )));
                }
            }
        }
        Ok(PropertyValue::Array(items))
    }

    /// Convert a JSON fixture value
    ///
    /// Strings, numbers, booleans and arrays map directly. Dates are written
    /// as `{"$date": "<rfc3339>"}`; any other object or `null` is rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(PropertyValue::String(s.clone())),
            Value::Bool(b) => Ok(PropertyValue::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(PropertyValue::Long(i)),
                None => n.as_f64().map(PropertyValue::Double).ok_or_else(|| {
                    ValidationError::InvalidValue(format!("unsupported number {}", n))
                }),
            },
            Value::Array(items) => {
                let converted = items
                    .iter()
                    .map(PropertyValue::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                PropertyValue::array(converted)
            }
            Value::Object(map) => match map.get("$date").and_then(Value::as_str) {
                Some(raw) if map.len() == 1 => DateTime::parse_from_rfc3339(raw)
                    .map(|dt| PropertyValue::Date(dt.with_timezone(&Utc)))
                    .map_err(|e| {
                        ValidationError::InvalidValue(format!("invalid date '{}': {}", raw, e))
                    }),
                _ => Err(ValidationError::InvalidValue(
                    "objects are not property values".to_string(),
                )),
            },
            Value::Null => Err(ValidationError::InvalidValue(
                "null is not a property value".to_string(),
            )),
        }
    }

    /// Short type label used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Long(_) => "long",
            PropertyValue::Double(_) => "double",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Date(_) => "date",
            PropertyValue::Array(_) => "array",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, PropertyValue::Array(_))
    }

    /// Read as `T`, absent if not convertible
    pub fn to<T: FromProperty>(&self) -> Option<T> {
        T::from_property(self)
    }

    /// Read as a list of `T`, skipping elements that do not convert
    pub fn to_list<T: FromProperty>(&self) -> Vec<T> {
        match self {
            PropertyValue::Array(items) => items.iter().filter_map(T::from_scalar).collect(),
            scalar => T::from_scalar(scalar).into_iter().collect(),
        }
    }

    /// Whether this stored value equals `expected` once converted to its type
    pub fn matches(&self, expected: &PropertyValue) -> bool {
        match expected {
            PropertyValue::String(s) => self.to::<String>().as_deref() == Some(s.as_str()),
            PropertyValue::Long(l) => self.to::<i64>() == Some(*l),
            PropertyValue::Double(d) => self.to::<f64>() == Some(*d),
            PropertyValue::Boolean(b) => self.to::<bool>() == Some(*b),
            PropertyValue::Date(d) => self.to::<DateTime<Utc>>() == Some(*d),
            PropertyValue::Array(_) => self == expected,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Long(l) => write!(f, "{}", l),
            PropertyValue::Double(d) => write!(f, "{}", d),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Date(d) => write!(f, "{}", d.to_rfc3339()),
            PropertyValue::Array(items) => {
                let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Long(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Long(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::Date(value)
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty),*) => {
        $(
            impl From<Vec<$ty>> for PropertyValue {
                fn from(values: Vec<$ty>) -> Self {
                    PropertyValue::Array(values.into_iter().map(PropertyValue::from).collect())
                }
            }
        )*
    };
}

impl_from_vec!(&str, String, i64, f64, bool, DateTime<Utc>);

/// Conversion from a stored value into a requested Rust type
pub trait FromProperty: Sized {
    /// Convert a single (non-array) value
    fn from_scalar(value: &PropertyValue) -> Option<Self>;

    /// Convert a stored value; arrays contribute their first element
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Array(items) => items.first().and_then(Self::from_scalar),
            scalar => Self::from_scalar(scalar),
        }
    }
}

impl FromProperty for String {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Array(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Doubles within `i64` bounds; `i64::MAX as f64` rounds up to 2^63, hence the open end
const I64_RANGE: std::ops::Range<f64> = -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;

impl FromProperty for i64 {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Long(l) => Some(*l),
            PropertyValue::Double(d) if d.fract() == 0.0 && I64_RANGE.contains(d) => Some(*d as i64),
            PropertyValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromProperty for i32 {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        i64::from_scalar(value).and_then(|l| i32::try_from(l).ok())
    }
}

impl FromProperty for f64 {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Double(d) => Some(*d),
            PropertyValue::Long(l) => Some(*l as f64),
            PropertyValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromProperty for bool {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Boolean(b) => Some(*b),
            PropertyValue::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            PropertyValue::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl FromProperty for DateTime<Utc> {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Date(d) => Some(*d),
            PropertyValue::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }
}

impl FromProperty for PropertyValue {
    fn from_scalar(value: &PropertyValue) -> Option<Self> {
        Some(value.clone())
    }

    fn from_property(value: &PropertyValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// Insertion-ordered mapping of property name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; replacing an existing name keeps its position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyMapVisitor;

        impl<'de> Visitor<'de> for PropertyMapVisitor {
            type Value = PropertyMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of property names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PropertyMap, A::Error> {
                let mut map = PropertyMap::new();
                while let Some((name, value)) = access.next_entry::<String, PropertyValue>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PropertyMapVisitor)
    }
}
