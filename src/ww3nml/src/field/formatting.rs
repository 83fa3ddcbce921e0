// ww3nml/src/field/formatting.rs

//! Value Renderer: canonical value to external literal token.

use super::coercion::DATE_FORMAT;
use super::value::NmlValue;

impl NmlValue {
    /// The literal token for a scalar value; `None` for groups and lists,
    /// which the serializer expands into one assignment per leaf.
    pub fn to_token(&self) -> Option<String> {
        let token = match self {
            NmlValue::Date(dt) => dt.format(DATE_FORMAT).to_string(),
            NmlValue::Integer(i) => i.to_string(),
            NmlValue::Real(r) => format_real(*r),
            NmlValue::Flag(b) => format_flag(*b).to_string(),
            NmlValue::Text(s) => quote(s),
            NmlValue::Choice(c) => quote(c.token()),
            NmlValue::Group(_) | NmlValue::List(_) => return None,
        };
        Some(token)
    }
}

/// Reals always carry a decimal point so they never read back as integers.
pub fn format_real(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

pub fn format_flag(value: bool) -> &'static str {
    if value {
        "T"
    } else {
        "F"
    }
}

/// Single-quote a string, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
