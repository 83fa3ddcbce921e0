// ww3nml/src/field/spec.rs

//! Static field declarations: semantic type, presence, default and checks.

use super::choice::ChoiceKind;
use super::raw::RawValue;

/// Declared semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// `YYYYMMDD HHMMSS`, rendered bare
    Date,
    Integer,
    Real,
    /// Duration in whole seconds, rendered as an integer
    Seconds,
    /// Binary flag, rendered `T`/`F`
    Flag,
    Text,
    Path,
    Choice(ChoiceKind),
    /// Nested sub-group with its own fields
    Group(&'static [FieldSpec]),
    /// Ordered sequence of one element kind
    List(&'static FieldKind),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Date => "date",
            FieldKind::Integer => "integer",
            FieldKind::Real => "real",
            FieldKind::Seconds => "duration in seconds",
            FieldKind::Flag => "flag",
            FieldKind::Text => "text",
            FieldKind::Path => "path",
            FieldKind::Choice(kind) => kind.name(),
            FieldKind::Group(_) => "group",
            FieldKind::List(_) => "list",
        }
    }
}

/// Range or membership check applied to numeric values after coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    None,
    Positive,
    NonNegative,
    Greater(f64),
    /// Inclusive bounds
    Range(f64, f64),
    OneOf(&'static [i64]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Real(f64),
    Flag(bool),
    Text(&'static str),
}

impl DefaultValue {
    pub fn to_raw(self) -> RawValue {
        match self {
            DefaultValue::Integer(i) => RawValue::Integer(i),
            DefaultValue::Real(r) => RawValue::Real(r),
            DefaultValue::Flag(b) => RawValue::Bool(b),
            DefaultValue::Text(s) => RawValue::Text(s.to_string()),
        }
    }
}

/// One declared field of a namelist block or nested group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Upper-case external name
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub check: Check,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            check: Check::None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            check: Check::None,
        }
    }

    pub const fn with_default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn with_check(self, check: Check) -> Self {
        Self { check, ..self }
    }
}
