// ww3nml/src/namelist/entity.rs

//! Typed namelist entities and their builder.

use super::schema::Schema;
use crate::error::Result;
use crate::field::{
    coerce_fields, insert_path, lookup, remove_path, Choice, Fields, NmlValue, RawMap, RawValue,
};
use chrono::NaiveDateTime;
use log::debug;

/// One validated namelist block.
///
/// Every field holds a canonical value; there is no way to assign a field
/// in place. Changes go through [`Entity::with`], [`Entity::without`] or an
/// [`EntityBuilder`], all of which coerce and validate the full entity again.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    schema: &'static Schema,
    fields: Fields,
}

impl Entity {
    /// Coerce a raw field map against `schema`.
    pub fn from_raw(schema: &'static Schema, raw: &RawMap) -> Result<Self> {
        let fields = coerce_fields(schema.block, schema.fields, schema.scope(), raw)?;
        debug!("Built {} with {} field(s)", schema.block, fields.len());
        Ok(Self { schema, fields })
    }

    pub fn builder(schema: &'static Schema) -> EntityBuilder {
        EntityBuilder::new(schema)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn block(&self) -> &'static str {
        self.schema.block
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Value at a `%`-separated path (case-insensitive), e.g. `FORCING%WINDS`.
    pub fn get(&self, path: &str) -> Option<&NmlValue> {
        lookup(&self.fields, path)
    }

    pub fn get_date(&self, path: &str) -> Option<NaiveDateTime> {
        self.get(path).and_then(NmlValue::as_date)
    }

    pub fn get_integer(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(NmlValue::as_integer)
    }

    pub fn get_real(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(NmlValue::as_real)
    }

    pub fn get_flag(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(NmlValue::as_flag)
    }

    pub fn get_text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(NmlValue::as_text)
    }

    pub fn get_choice(&self, path: &str) -> Option<Choice> {
        self.get(path).and_then(NmlValue::as_choice)
    }

    /// The canonical values as raw input; coerces back to an equal entity.
    pub fn to_raw(&self) -> RawMap {
        self.fields
            .iter()
            .map(|(name, value)| (name.to_string(), RawValue::from(value)))
            .collect()
    }

    /// A copy with one field replaced, fully re-validated.
    pub fn with<V: Into<RawValue>>(&self, path: &str, value: V) -> Result<Self> {
        let mut raw = self.to_raw();
        insert_path(&mut raw, path, value.into());
        Self::from_raw(self.schema, &raw)
    }

    /// A copy with one field removed (optional fields fall back to their
    /// default), fully re-validated.
    pub fn without(&self, path: &str) -> Result<Self> {
        let mut raw = self.to_raw();
        remove_path(&mut raw, path);
        Self::from_raw(self.schema, &raw)
    }
}

/// Collects raw field inputs; nothing is checked until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    schema: &'static Schema,
    raw: RawMap,
}

impl EntityBuilder {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            raw: RawMap::new(),
        }
    }

    /// Start from an existing entity's values.
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            schema: entity.schema,
            raw: entity.to_raw(),
        }
    }

    pub fn set<V: Into<RawValue>>(&mut self, path: &str, value: V) -> &mut Self {
        insert_path(&mut self.raw, path, value.into());
        self
    }

    pub fn unset(&mut self, path: &str) -> &mut Self {
        remove_path(&mut self.raw, path);
        self
    }

    pub fn build(&self) -> Result<Entity> {
        Entity::from_raw(self.schema, &self.raw)
    }
}
