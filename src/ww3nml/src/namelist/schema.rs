// ww3nml/src/namelist/schema.rs

//! Static block declarations.
//!
//! Schemas are declared as `static` items and compared by address, so a
//! block name is never looked up by reflection over a type.

use crate::field::FieldSpec;
use std::fmt;
use std::ptr;

/// One namelist block: canonical name, path prefix and ordered fields.
#[derive(Debug, PartialEq)]
pub struct Schema {
    /// Canonical block name, e.g. `DOMAIN_NML`
    pub block: &'static str,
    /// Leading path segment of every field, e.g. `DOMAIN`; empty for bare names
    pub prefix: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(
        block: &'static str,
        prefix: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            block,
            prefix,
            fields,
        }
    }

    /// Identity comparison: true only for the very same declaration.
    pub fn is(&self, other: &Schema) -> bool {
        ptr::eq(self, other)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    /// Scope used in field paths of error messages.
    pub fn scope(&self) -> Option<&'static str> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(self.prefix)
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block)
    }
}

/// A multi-instance block, rendered once with `PREFIX(i)%` indexing.
#[derive(Debug, PartialEq)]
pub struct CollectionSchema {
    pub instance: &'static Schema,
    /// Per-instance resource share that must partition to 1.0
    pub fraction: Option<&'static str>,
    /// Per-instance identifier that must be unique
    pub rank: Option<&'static str>,
}

impl CollectionSchema {
    pub const fn new(instance: &'static Schema) -> Self {
        Self {
            instance,
            fraction: None,
            rank: None,
        }
    }

    pub const fn with_fraction(self, path: &'static str) -> Self {
        Self {
            fraction: Some(path),
            ..self
        }
    }

    pub const fn with_rank(self, path: &'static str) -> Self {
        Self {
            rank: Some(path),
            ..self
        }
    }

    pub fn is(&self, other: &CollectionSchema) -> bool {
        ptr::eq(self, other)
    }

    pub fn block(&self) -> &'static str {
        self.instance.block
    }

    pub fn prefix(&self) -> &'static str {
        self.instance.prefix
    }
}

impl fmt::Display for CollectionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}(i))", self.instance.block, self.instance.prefix)
    }
}
