// ww3nml/src/field/mod.rs

//! Typed fields: declarations, raw inputs, coercion and rendering.

pub mod choice;
pub mod coercion;
pub mod formatting;
pub mod raw;
pub mod spec;
pub mod value;


pub use choice::{
    BoundMode, Choice, ChoiceKind, Closure, Coordinate, ForcingSelector, GridType, HomogInputType,
};
pub use coercion::{coerce_field, coerce_fields, join_path, DATE_FORMAT};
pub use formatting::{format_flag, format_real, quote};
pub use raw::{insert_path, remove_path, RawMap, RawValue};
pub use spec::{Check, DefaultValue, FieldKind, FieldSpec};
pub use value::{lookup, Fields, NmlValue};
