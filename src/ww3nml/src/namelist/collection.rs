// ww3nml/src/namelist/collection.rs

//! Ordered parallel instances of one block.

use super::entity::Entity;
use super::schema::CollectionSchema;
use crate::error::{NmlError, Result};
use crate::field::RawMap;

/// Instances sharing one block name, 1-indexed in the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    schema: &'static CollectionSchema,
    instances: Vec<Entity>,
}

impl Collection {
    /// Every instance must have been built from `schema.instance`.
    pub fn new(schema: &'static CollectionSchema, instances: Vec<Entity>) -> Result<Self> {
        for (i, instance) in instances.iter().enumerate() {
            if !schema.instance.is(instance.schema()) {
                return Err(NmlError::SchemaMismatch {
                    role: format!("{}({})", schema.prefix(), i + 1),
                    expected: schema.instance.block.to_string(),
                    found: instance.block().to_string(),
                });
            }
        }
        Ok(Self { schema, instances })
    }

    pub fn from_raw(schema: &'static CollectionSchema, raws: &[RawMap]) -> Result<Self> {
        let instances = raws
            .iter()
            .map(|raw| Entity::from_raw(schema.instance, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { schema, instances })
    }

    pub fn empty(schema: &'static CollectionSchema) -> Self {
        Self {
            schema,
            instances: Vec::new(),
        }
    }

    /// A copy with one more instance at the end.
    pub fn with_instance(&self, instance: Entity) -> Result<Self> {
        let mut instances = self.instances.clone();
        instances.push(instance);
        Self::new(self.schema, instances)
    }

    pub fn schema(&self) -> &'static CollectionSchema {
        self.schema
    }

    pub fn block(&self) -> &'static str {
        self.schema.block()
    }

    pub fn instances(&self) -> &[Entity] {
        &self.instances
    }

    /// 1-based access, matching the rendered index.
    pub fn instance(&self, index: usize) -> Option<&Entity> {
        index.checked_sub(1).and_then(|i| self.instances.get(i))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldSpec, RawValue};
    use crate::namelist::Schema;

    static POINT: Schema = Schema::new(
        "POINT_NML",
        "POINT",
        &[FieldSpec::required("NAME", FieldKind::Text)],
    );
    static OTHER: Schema = Schema::new(
        "OTHER_NML",
        "POINT",
        &[FieldSpec::required("NAME", FieldKind::Text)],
    );
    static POINTS: CollectionSchema = CollectionSchema::new(&POINT);

    fn named(schema: &'static Schema, name: &str) -> Entity {
        Entity::builder(schema).set("NAME", name).build().unwrap()
    }

    #[test]
    fn test_instances_keep_order_and_one_based_access() {
        let collection =
            Collection::new(&POINTS, vec![named(&POINT, "b"), named(&POINT, "a")]).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.instance(1).unwrap().get_text("NAME"), Some("b"));
        assert_eq!(collection.instance(2).unwrap().get_text("NAME"), Some("a"));
        assert!(collection.instance(0).is_none());
        assert!(collection.instance(3).is_none());
    }

    #[test]
    fn test_foreign_schema_is_rejected() {
        let err = Collection::new(&POINTS, vec![named(&POINT, "a"), named(&OTHER, "b")])
            .unwrap_err();
        match err {
            NmlError::SchemaMismatch { role, found, .. } => {
                assert_eq!(role, "POINT(2)");
                assert_eq!(found, "OTHER_NML");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_raw_validates_each_instance() {
        let mut good = RawMap::new();
        good.insert("name".to_string(), RawValue::from("buoy"));
        let mut bad = RawMap::new();
        bad.insert("name".to_string(), RawValue::from(3));
        assert!(Collection::from_raw(&POINTS, &[good.clone()]).is_ok());
        assert!(Collection::from_raw(&POINTS, &[good, bad]).is_err());
    }

    #[test]
    fn test_with_instance_appends() {
        let collection = Collection::empty(&POINTS);
        assert!(collection.is_empty());
        let grown = collection.with_instance(named(&POINT, "a")).unwrap();
        assert_eq!(grown.len(), 1);
        assert!(collection.is_empty());
        assert!(grown.with_instance(named(&OTHER, "x")).is_err());
    }
}
