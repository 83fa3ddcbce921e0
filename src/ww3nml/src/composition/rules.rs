// ww3nml/src/composition/rules.rs

//! Cross-entity consistency rules.

use super::{Composition, Finding};

/// A check over the whole bundle. Rules only look at registered roles;
/// a role that is absent is the business of completeness validation.
pub trait ConsistencyRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, composition: &Composition) -> Vec<Finding>;
}

/// A single-block integer field declares how many instances a collection
/// role holds, e.g. `DOMAIN%NRGRD` against `MODEL(i)`.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredCount {
    pub count_role: &'static str,
    pub count_field: &'static str,
    pub collection_role: &'static str,
}

impl DeclaredCount {
    pub const fn new(
        count_role: &'static str,
        count_field: &'static str,
        collection_role: &'static str,
    ) -> Self {
        Self {
            count_role,
            count_field,
            collection_role,
        }
    }
}

impl ConsistencyRule for DeclaredCount {
    fn name(&self) -> &'static str {
        "declared_count"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let declared = match composition
            .entity(self.count_role)
            .and_then(|entity| entity.get_integer(self.count_field))
        {
            Some(declared) => declared,
            None => return Vec::new(),
        };
        let actual = composition
            .collection(self.collection_role)
            .map(|collection| collection.len())
            .unwrap_or(0);
        if declared == actual as i64 {
            return Vec::new();
        }
        vec![Finding::new(
            self.name(),
            format!(
                "{} declares {} = {}, but {} holds {} instance(s)",
                self.count_role, self.count_field, declared, self.collection_role, actual
            ),
        )]
    }
}
