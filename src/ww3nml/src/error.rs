// ww3nml/src/error.rs

//! Error types for entity construction, rendering and composition.

use crate::composition::Finding;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for ww3nml operations.
pub type Result<T> = std::result::Result<T, NmlError>;

/// A single field's raw input could not be coerced to its declared type.
///
/// Always names the field (as a `%`-separated path) and the rejected input.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid value {value} for field {field}: {reason}")]
pub struct FormatError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl FormatError {
    pub fn new<F, V, R>(field: F, value: V, reason: R) -> Self
    where
        F: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        Self {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Completeness or consistency validation failed; carries every finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct CompositionError {
    pub findings: Vec<Finding>,
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Composition is not renderable ({} finding(s))",
            self.findings.len()
        )?;
        for finding in &self.findings {
            write!(f, "\n  - {}", finding)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum NmlError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Unknown field {field} in {block}")]
    UnknownField { block: String, field: String },

    #[error("Missing required field {field} in {block}")]
    MissingField { block: String, field: String },

    #[error("Role {role} is already registered")]
    DuplicateRole { role: String },

    #[error("Unknown program {program}")]
    UnknownProgram { program: String },

    #[error("Unknown role {role}: {reason}")]
    UnknownRole { role: String, reason: String },

    #[error("Role {role} expects {expected}, got {found}")]
    SchemaMismatch {
        role: String,
        expected: String,
        found: String,
    },

    #[error("Field {field} of {block} has no value to render")]
    Unrendered { block: String, field: String },

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl NmlError {
    pub fn unknown_field<S: Into<String>>(block: S, field: S) -> Self {
        NmlError::UnknownField {
            block: block.into(),
            field: field.into(),
        }
    }

    pub fn missing_field<S: Into<String>>(block: S, field: S) -> Self {
        NmlError::MissingField {
            block: block.into(),
            field: field.into(),
        }
    }

    pub fn unknown_role<S: Into<String>>(role: S, reason: S) -> Self {
        NmlError::UnknownRole {
            role: role.into(),
            reason: reason.into(),
        }
    }

    /// Findings carried by a composition failure, empty for any other error.
    pub fn findings(&self) -> &[Finding] {
        match self {
            NmlError::Composition(err) => &err.findings,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_field_and_value() {
        let err = FormatError::new("DOMAIN%START", "'20230100 000000'", "no such day");
        let msg = err.to_string();
        assert!(msg.contains("DOMAIN%START"));
        assert!(msg.contains("20230100 000000"));
    }

    #[test]
    fn test_composition_error_lists_every_finding() {
        let err = CompositionError {
            findings: vec![
                Finding::new("missing_role", "shel.domain is required"),
                Finding::new("resource_fraction", "sums to 0.99"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 finding(s)"));
        assert!(msg.contains("missing_role"));
        assert!(msg.contains("resource_fraction"));
    }

    #[test]
    fn test_io_error_passes_through() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = NmlError::from(io_err);
        match err {
            NmlError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
