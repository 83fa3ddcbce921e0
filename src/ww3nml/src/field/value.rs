// ww3nml/src/field/value.rs

//! Canonical field values.

use super::choice::Choice;
use chrono::NaiveDateTime;
use linked_hash_map::LinkedHashMap;
use std::fmt;

/// Canonical values of an entity (or nested group), in schema order.
pub type Fields = LinkedHashMap<&'static str, NmlValue>;

/// A field value after coercion; always matches the declared field type.
#[derive(Debug, Clone, PartialEq)]
pub enum NmlValue {
    /// Naive date-time, second resolution
    Date(NaiveDateTime),

    /// Integer value (also used for durations in whole seconds)
    Integer(i64),

    /// Finite real value
    Real(f64),

    /// Binary flag
    Flag(bool),

    /// Free text or file path
    Text(String),

    /// Member of a closed token set
    Choice(Choice),

    /// Nested sub-group (`PARENT%CHILD`)
    Group(Fields),

    /// Ordered sequence rendered with 1-based indices
    List(Vec<NmlValue>),
}

impl NmlValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            NmlValue::Date(_) => "date",
            NmlValue::Integer(_) => "integer",
            NmlValue::Real(_) => "real",
            NmlValue::Flag(_) => "flag",
            NmlValue::Text(_) => "text",
            NmlValue::Choice(_) => "choice",
            NmlValue::Group(_) => "group",
            NmlValue::List(_) => "list",
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            NmlValue::Date(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NmlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Reals, and integers widened to reals.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            NmlValue::Real(r) => Some(*r),
            NmlValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            NmlValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NmlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<Choice> {
        match self {
            NmlValue::Choice(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Fields> {
        match self {
            NmlValue::Group(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[NmlValue]> {
        match self {
            NmlValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for NmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_token() {
            Some(token) => f.write_str(&token),
            None => write!(f, "<{}>", self.type_name()),
        }
    }
}

/// Look up a value by `%`-separated path, case-insensitively.
pub fn lookup<'a>(fields: &'a Fields, path: &str) -> Option<&'a NmlValue> {
    let mut segments = path.split('%').map(str::trim);
    let first = segments.next()?;
    let mut current = find(fields, first)?;
    for segment in segments {
        current = find(current.as_group()?, segment)?;
    }
    Some(current)
}

fn find<'a>(fields: &'a Fields, name: &str) -> Option<&'a NmlValue> {
    fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}
