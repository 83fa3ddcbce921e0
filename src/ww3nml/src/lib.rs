// ww3nml/src/lib.rs

//! Typed, validated namelist entities for WAVEWATCH III control files.
//!
//! This library provides functionality to:
//! - Coerce raw inputs (native values or legacy string forms) into canonical
//!   typed field values at construction time
//! - Hold namelist blocks as immutable, schema-checked entities
//! - Render entities and multi-instance collections as Fortran namelist text
//! - Compose every block a set of programs needs, cross-validate them and
//!   write the control files in one step
//!
//! # Examples
//!
//! ```
//! use ww3nml::field::{FieldKind, FieldSpec};
//! use ww3nml::{render_entity, Entity, Schema};
//!
//! static DOMAIN: Schema = Schema::new(
//!     "DOMAIN_NML",
//!     "DOMAIN",
//!     &[
//!         FieldSpec::required("START", FieldKind::Date),
//!         FieldSpec::required("STOP", FieldKind::Date),
//!         FieldSpec::optional("IOSTYP", FieldKind::Integer),
//!     ],
//! );
//!
//! # fn main() -> ww3nml::Result<()> {
//! let domain = Entity::builder(&DOMAIN)
//!     .set("start", "20230101 000000")
//!     .set("stop", "20230107 000000")
//!     .set("iostyp", 1)
//!     .build()?;
//! let text = render_entity(&domain)?;
//! assert!(text.contains("DOMAIN%START = 20230101 000000"));
//! # Ok(())
//! # }
//! ```

pub mod composition;
pub mod error;
pub mod field;
pub mod findex;
pub mod namelist;

pub use composition::{
    Catalog, Composition, ConsistencyRule, DeclaredCount, Finding, Member, RoleKind, RoleSpec,
};
pub use error::{CompositionError, FormatError, NmlError, Result};
pub use field::{Choice, ChoiceKind, NmlValue, RawMap, RawValue};
pub use namelist::{
    render_collection, render_entity, Collection, CollectionSchema, Entity, EntityBuilder, Schema,
};
