// ww3nml/src/field/raw.rs

//! Raw (not yet coerced) field inputs and their conversions.

use super::value::NmlValue;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use linked_hash_map::LinkedHashMap;
use serde::Deserialize;
use std::fmt;

/// Field name (or `%` path) to raw input, in the order given.
pub type RawMap = LinkedHashMap<String, RawValue>;

/// A field input as supplied by a caller or a configuration file.
///
/// Native values and legacy string forms are both accepted here; the
/// coercion layer decides what each declared field type will take.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An explicit null (`~` in YAML). Never accepted by any field.
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    List(Vec<RawValue>),
    Map(RawMap),
    #[serde(skip_deserializing)]
    DateTime(NaiveDateTime),
    /// A date-time carrying an offset. Never accepted by a date field.
    #[serde(skip_deserializing)]
    ZonedDateTime(DateTime<FixedOffset>),
}

impl RawValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Integer(_) => "integer",
            RawValue::Real(_) => "real",
            RawValue::Text(_) => "string",
            RawValue::List(_) => "list",
            RawValue::Map(_) => "map",
            RawValue::DateTime(_) => "date-time",
            RawValue::ZonedDateTime(_) => "timezone-aware date-time",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Integer(i) => write!(f, "{}", i),
            RawValue::Real(r) => write!(f, "{}", r),
            RawValue::Text(s) => write!(f, "'{}'", s),
            RawValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            RawValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            RawValue::DateTime(dt) => write!(f, "{}", dt),
            RawValue::ZonedDateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(value as i64)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Integer(value as i64)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Real(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::DateTime(value)
    }
}

// Any zoned chrono value keeps its offset so the date coercion can refuse it.
impl<Tz: TimeZone> From<DateTime<Tz>> for RawValue {
    fn from(value: DateTime<Tz>) -> Self {
        RawValue::ZonedDateTime(value.fixed_offset())
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<RawMap> for RawValue {
    fn from(map: RawMap) -> Self {
        RawValue::Map(map)
    }
}

/// Canonical values convert back to the native raw form that coerces to
/// the same canonical value.
impl From<&NmlValue> for RawValue {
    fn from(value: &NmlValue) -> Self {
        match value {
            NmlValue::Date(dt) => RawValue::DateTime(*dt),
            NmlValue::Integer(i) => RawValue::Integer(*i),
            NmlValue::Real(r) => RawValue::Real(*r),
            NmlValue::Flag(b) => RawValue::Bool(*b),
            NmlValue::Text(s) => RawValue::Text(s.clone()),
            NmlValue::Choice(c) => RawValue::Text(c.token().to_string()),
            NmlValue::Group(fields) => RawValue::Map(
                fields
                    .iter()
                    .map(|(name, v)| (name.to_string(), RawValue::from(v)))
                    .collect(),
            ),
            NmlValue::List(items) => RawValue::List(items.iter().map(RawValue::from).collect()),
        }
    }
}

impl From<NmlValue> for RawValue {
    fn from(value: NmlValue) -> Self {
        RawValue::from(&value)
    }
}

/// Set `value` at a `%`-separated path, creating intermediate maps.
///
/// Keys are matched case-insensitively; a matched key is replaced by the
/// upper-case form of the path segment.
pub fn insert_path(map: &mut RawMap, path: &str, value: RawValue) {
    let mut segments: Vec<&str> = path.split('%').map(str::trim).collect();
    let last = match segments.pop() {
        Some(last) => last,
        None => return,
    };

    let mut current = map;
    for segment in segments {
        let existing = take_key(current, segment);
        let child = match existing {
            Some(RawValue::Map(child)) => child,
            _ => RawMap::new(),
        };
        current.insert(segment.to_uppercase(), RawValue::Map(child));
        current = match current.get_mut(&segment.to_uppercase()) {
            Some(RawValue::Map(child)) => child,
            _ => return,
        };
    }
    take_key(current, last);
    current.insert(last.to_uppercase(), value);
}

/// Remove the value at a `%`-separated path, returning it if present.
pub fn remove_path(map: &mut RawMap, path: &str) -> Option<RawValue> {
    let mut segments: Vec<&str> = path.split('%').map(str::trim).collect();
    let last = segments.pop()?;

    let mut current = map;
    for segment in segments {
        let key = current
            .keys()
            .find(|k| k.eq_ignore_ascii_case(segment))?
            .clone();
        current = match current.get_mut(&key) {
            Some(RawValue::Map(child)) => child,
            _ => return None,
        };
    }
    take_key(current, last)
}

fn take_key(map: &mut RawMap, name: &str) -> Option<RawValue> {
    let key = map.keys().find(|k| k.eq_ignore_ascii_case(name))?.clone();
    map.remove(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_zoned_datetime_keeps_offset() {
        let utc = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(RawValue::from(utc), RawValue::ZonedDateTime(_)));
    }

    #[test]
    fn test_deserialize_untagged_scalars() {
        let raw: RawValue = serde_json::from_str(r#"{"winds": "H", "iostyp": 1, "flag": true, "xfr": 1.1}"#).unwrap();
        let map = match raw {
            RawValue::Map(map) => map,
            other => panic!("expected a map, got {:?}", other),
        };
        assert_eq!(map.get("winds"), Some(&RawValue::Text("H".to_string())));
        assert_eq!(map.get("iostyp"), Some(&RawValue::Integer(1)));
        assert_eq!(map.get("flag"), Some(&RawValue::Bool(true)));
        assert_eq!(map.get("xfr"), Some(&RawValue::Real(1.1)));
    }

    #[test]
    fn test_insert_path_creates_and_replaces() {
        let mut map = RawMap::new();
        map.insert("forcing".to_string(), RawValue::Map(RawMap::new()));
        insert_path(&mut map, "FORCING%WINDS", RawValue::from("T"));
        insert_path(&mut map, "forcing%winds", RawValue::from("H"));

        let forcing = match map.get("FORCING") {
            Some(RawValue::Map(forcing)) => forcing,
            other => panic!("expected a map, got {:?}", other),
        };
        assert_eq!(forcing.len(), 1);
        assert_eq!(forcing.get("WINDS"), Some(&RawValue::from("H")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_path() {
        let mut map = RawMap::new();
        insert_path(&mut map, "ASSIM%MEAN", RawValue::from("F"));
        assert_eq!(remove_path(&mut map, "assim%mean"), Some(RawValue::from("F")));
        assert_eq!(remove_path(&mut map, "assim%mean"), None);
    }
}
