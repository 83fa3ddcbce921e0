// ww3nml/src/namelist/mod.rs

//! Namelist blocks: static schemas, validated entities and collections, and
//! the serializer that renders them.

pub mod collection;
pub mod entity;
pub mod formatting;
pub mod schema;

pub use collection::Collection;
pub use entity::{Entity, EntityBuilder};
pub use formatting::{
    assignments, join_blocks, render_block, render_collection, render_entity, Assignment,
    FieldPath, Segment,
};
pub use schema::{CollectionSchema, Schema};
