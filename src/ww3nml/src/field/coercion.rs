// ww3nml/src/field/coercion.rs

//! Field Coercion Layer: raw input plus declared type to canonical value.
//!
//! Dispatch is a plain table keyed by [`FieldKind`]; each kind has exactly
//! one coercion function and the functions share no logic. Every function
//! is idempotent: a canonical value converted back with
//! `RawValue::from(&value)` coerces to itself.

use super::choice::ChoiceKind;
use super::raw::{RawMap, RawValue};
use super::spec::{Check, FieldKind, FieldSpec};
use super::value::{Fields, NmlValue};
use crate::error::{FormatError, NmlError, Result};
use chrono::{NaiveDateTime, Timelike};
use linked_hash_map::LinkedHashMap;

/// External date format used by every date field.
pub const DATE_FORMAT: &str = "%Y%m%d %H%M%S";

/// Coerce the raw fields of one block (or nested group) against its specs.
///
/// `scope` is the path prefix used in error messages (e.g. `DOMAIN`).
/// Unknown names are rejected, missing optional fields take their declared
/// default, missing required fields are an error.
pub fn coerce_fields(
    block: &str,
    specs: &'static [FieldSpec],
    scope: Option<&str>,
    raw: &RawMap,
) -> Result<Fields> {
    let mut given: LinkedHashMap<String, &RawValue> = LinkedHashMap::new();
    for (key, value) in raw {
        let name = key.trim().to_uppercase();
        if given.contains_key(&name) {
            return Err(FormatError::new(
                join_path(scope, &name),
                value.to_string(),
                "field given more than once",
            )
            .into());
        }
        if !specs.iter().any(|spec| spec.name == name) {
            return Err(NmlError::unknown_field(block, &join_path(scope, &name)));
        }
        given.insert(name, value);
    }

    let mut fields = Fields::new();
    for spec in specs {
        let path = join_path(scope, spec.name);
        match given.get(spec.name) {
            Some(value) => {
                fields.insert(spec.name, coerce_field(block, spec, &path, value)?);
            }
            None => {
                if let Some(default) = spec.default {
                    let value = coerce_field(block, spec, &path, &default.to_raw())?;
                    fields.insert(spec.name, value);
                } else if spec.required {
                    return Err(NmlError::missing_field(block, &path));
                } else if let FieldKind::Group(members) = spec.kind {
                    if group_has_defaults(members) {
                        let empty = RawValue::Map(RawMap::new());
                        fields.insert(spec.name, coerce_field(block, spec, &path, &empty)?);
                    }
                }
            }
        }
    }
    Ok(fields)
}

/// An absent optional group is built from its defaults when it has no
/// required member and at least one member (or nested group) with a default.
fn group_has_defaults(specs: &[FieldSpec]) -> bool {
    specs.iter().all(|spec| !spec.required)
        && specs.iter().any(|spec| match spec.kind {
            FieldKind::Group(members) => spec.default.is_some() || group_has_defaults(members),
            _ => spec.default.is_some(),
        })
}

/// Coerce one declared field.
pub fn coerce_field(block: &str, spec: &FieldSpec, path: &str, raw: &RawValue) -> Result<NmlValue> {
    coerce_kind(block, &spec.kind, spec.check, path, raw)
}

fn coerce_kind(
    block: &str,
    kind: &FieldKind,
    check: Check,
    path: &str,
    raw: &RawValue,
) -> Result<NmlValue> {
    if let RawValue::Null = raw {
        return Err(FormatError::new(
            path,
            raw.to_string(),
            "no value given; leave the field out to use its default",
        )
        .into());
    }
    let value = match kind {
        FieldKind::Group(specs) => match raw {
            RawValue::Map(map) => NmlValue::Group(coerce_fields(block, specs, Some(path), map)?),
            other => return Err(mismatch(path, other, "a group of named fields").into()),
        },
        FieldKind::List(inner) => match raw {
            RawValue::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}({})", path, i + 1);
                    values.push(coerce_kind(block, inner, check, &item_path, item)?);
                }
                NmlValue::List(values)
            }
            other => return Err(mismatch(path, other, "a list").into()),
        },
        scalar => {
            let value = coerce_scalar(scalar, path, raw)?;
            apply_check(check, path, &value)?;
            value
        }
    };
    Ok(value)
}

fn coerce_scalar(kind: &FieldKind, path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match kind {
        FieldKind::Date => coerce_date(path, raw),
        FieldKind::Integer => coerce_integer(path, raw),
        FieldKind::Real => coerce_real(path, raw),
        FieldKind::Seconds => coerce_seconds(path, raw),
        FieldKind::Flag => coerce_flag(path, raw),
        FieldKind::Text => coerce_text(path, raw),
        FieldKind::Path => coerce_path(path, raw),
        FieldKind::Choice(choice) => coerce_choice(*choice, path, raw),
        FieldKind::Group(_) | FieldKind::List(_) => Err(mismatch(path, raw, "a scalar")),
    }
}

// =============================================================================
// PER-KIND COERCION
// =============================================================================

/// Typed naive date-times, or strings in exactly `YYYYMMDD HHMMSS`.
///
/// Offset-carrying values and sub-second date-times are refused rather
/// than stripped. Impossible calendar dates (day `00`, February 30th) are
/// refused; there is no normalisation.
pub fn coerce_date(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::DateTime(dt) if dt.nanosecond() != 0 => Err(FormatError::new(
            path,
            raw.to_string(),
            "sub-second precision is not representable; pass whole seconds",
        )),
        RawValue::DateTime(dt) => Ok(NmlValue::Date(*dt)),
        RawValue::ZonedDateTime(_) => Err(FormatError::new(
            path,
            raw.to_string(),
            "timezone-aware date-times are not accepted; pass a naive date-time",
        )),
        RawValue::Text(s) => {
            if !has_date_shape(s) {
                return Err(FormatError::new(
                    path,
                    raw.to_string(),
                    "expected a date formatted as YYYYMMDD HHMMSS",
                ));
            }
            NaiveDateTime::parse_from_str(s, DATE_FORMAT)
                .map(NmlValue::Date)
                .map_err(|e| FormatError::new(path, raw.to_string(), format!("not a calendar date-time ({})", e)))
        }
        other => Err(mismatch(path, other, "a date")),
    }
}

fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 15
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 8 { *b == b' ' } else { b.is_ascii_digit() })
}

/// Native integers, or decimal integer strings.
pub fn coerce_integer(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::Integer(i) => Ok(NmlValue::Integer(*i)),
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(NmlValue::Integer)
            .map_err(|_| FormatError::new(path, raw.to_string(), "expected an integer")),
        other => Err(mismatch(path, other, "an integer")),
    }
}

/// Native reals or integers, or numeric strings (Fortran `d` exponents allowed).
pub fn coerce_real(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    let value = match raw {
        RawValue::Real(r) => *r,
        RawValue::Integer(i) => *i as f64,
        RawValue::Text(s) => parse_real_text(s)
            .ok_or_else(|| FormatError::new(path, raw.to_string(), "expected a real number"))?,
        other => return Err(mismatch(path, other, "a real number")),
    };
    if !value.is_finite() {
        return Err(FormatError::new(
            path,
            raw.to_string(),
            "real values must be finite",
        ));
    }
    Ok(NmlValue::Real(value))
}

fn parse_real_text(s: &str) -> Option<f64> {
    let normalized = s.trim().replace(['d', 'D'], "e");
    normalized.parse::<f64>().ok()
}

/// Whole seconds from integers, numeric strings, or durations such as `"1h"`.
pub fn coerce_seconds(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::Integer(i) => Ok(NmlValue::Integer(*i)),
        RawValue::Text(s) => {
            let s = s.trim();
            if let Ok(secs) = s.parse::<i64>() {
                return Ok(NmlValue::Integer(secs));
            }
            let duration = humantime::parse_duration(s).map_err(|e| {
                FormatError::new(path, raw.to_string(), format!("expected a duration ({})", e))
            })?;
            if duration.subsec_nanos() != 0 {
                return Err(FormatError::new(
                    path,
                    raw.to_string(),
                    "durations must be whole seconds",
                ));
            }
            i64::try_from(duration.as_secs())
                .map(NmlValue::Integer)
                .map_err(|_| FormatError::new(path, raw.to_string(), "duration is too long"))
        }
        other => Err(mismatch(path, other, "a duration in seconds")),
    }
}

/// Native booleans or the tokens `T` / `F`. Nothing else.
pub fn coerce_flag(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::Bool(b) => Ok(NmlValue::Flag(*b)),
        RawValue::Text(s) => match s.trim() {
            "T" => Ok(NmlValue::Flag(true)),
            "F" => Ok(NmlValue::Flag(false)),
            _ => Err(FormatError::new(
                path,
                raw.to_string(),
                "expected a T/F flag",
            )),
        },
        other => Err(mismatch(path, other, "a T/F flag")),
    }
}

pub fn coerce_text(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::Text(s) => Ok(NmlValue::Text(s.clone())),
        other => Err(mismatch(path, other, "a string")),
    }
}

pub fn coerce_path(path: &str, raw: &RawValue) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::Text(s) if s.trim().is_empty() => Err(FormatError::new(
            path,
            raw.to_string(),
            "file paths must not be empty",
        )),
        RawValue::Text(s) => Ok(NmlValue::Text(s.clone())),
        other => Err(mismatch(path, other, "a file path")),
    }
}

/// Members of the kind's token set only; booleans and numbers are refused.
pub fn coerce_choice(
    kind: ChoiceKind,
    path: &str,
    raw: &RawValue,
) -> std::result::Result<NmlValue, FormatError> {
    match raw {
        RawValue::Text(s) => kind.parse(s).map(NmlValue::Choice).ok_or_else(|| {
            FormatError::new(
                path,
                raw.to_string(),
                format!(
                    "not a valid {}; expected one of {}",
                    kind.name(),
                    kind.tokens().join(", ")
                ),
            )
        }),
        other => Err(FormatError::new(
            path,
            other.to_string(),
            format!(
                "a {} is not a {}; expected one of {}",
                other.type_name(),
                kind.name(),
                kind.tokens().join(", ")
            ),
        )),
    }
}

// =============================================================================
// CHECKS
// =============================================================================

fn apply_check(check: Check, path: &str, value: &NmlValue) -> std::result::Result<(), FormatError> {
    if let Check::OneOf(allowed) = check {
        return match value.as_integer() {
            Some(i) if allowed.contains(&i) => Ok(()),
            _ => Err(FormatError::new(
                path,
                value.to_string(),
                format!("expected one of {:?}", allowed),
            )),
        };
    }

    let x = match value.as_real() {
        Some(x) => x,
        None => return Ok(()),
    };
    let reason = match check {
        Check::Positive if x <= 0.0 => Some("must be > 0".to_string()),
        Check::NonNegative if x < 0.0 => Some("must be >= 0".to_string()),
        Check::Greater(min) if x <= min => Some(format!("must be > {}", min)),
        Check::Range(min, max) if x < min || x > max => {
            Some(format!("must lie within [{}, {}]", min, max))
        }
        _ => None,
    };
    match reason {
        Some(reason) => Err(FormatError::new(path, value.to_string(), reason)),
        None => Ok(()),
    }
}

fn mismatch(path: &str, raw: &RawValue, expected: &str) -> FormatError {
    FormatError::new(
        path,
        raw.to_string(),
        format!("expected {}, got a {}", expected, raw.type_name()),
    )
}

/// Join a scope and a field name with `%`.
pub fn join_path(scope: Option<&str>, name: &str) -> String {
    match scope {
        Some(scope) if !scope.is_empty() => format!("{}%{}", scope, name),
        _ => name.to_string(),
    }
}
