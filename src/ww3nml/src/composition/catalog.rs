// ww3nml/src/composition/catalog.rs

//! Role tables: which blocks a bundle may hold and which program reads them.

use super::rules::ConsistencyRule;
use crate::namelist::{CollectionSchema, Schema};
use std::fmt;

/// Control file read by `program`, `<program>.nml`.
pub fn filename(program: &str) -> String {
    format!("{}.nml", program)
}

/// Whether a role holds a single block or a multi-instance collection.
#[derive(Debug, Clone, Copy)]
pub enum RoleKind {
    Single(&'static Schema),
    Collection(&'static CollectionSchema),
}

impl RoleKind {
    pub fn block(&self) -> &'static str {
        match self {
            RoleKind::Single(schema) => schema.block,
            RoleKind::Collection(schema) => schema.block(),
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Single(schema) => write!(f, "{}", schema),
            RoleKind::Collection(schema) => write!(f, "{}", schema),
        }
    }
}

/// One named slot of a bundle.
#[derive(Debug, Clone, Copy)]
pub struct RoleSpec {
    pub name: &'static str,
    /// Program whose control file carries this block
    pub program: &'static str,
    pub kind: RoleKind,
    pub required: bool,
}

impl RoleSpec {
    pub const fn single(
        name: &'static str,
        program: &'static str,
        schema: &'static Schema,
        required: bool,
    ) -> Self {
        Self {
            name,
            program,
            kind: RoleKind::Single(schema),
            required,
        }
    }

    pub const fn collection(
        name: &'static str,
        program: &'static str,
        schema: &'static CollectionSchema,
        required: bool,
    ) -> Self {
        Self {
            name,
            program,
            kind: RoleKind::Collection(schema),
            required,
        }
    }

    /// Output file for this role.
    pub fn filename(&self) -> String {
        filename(self.program)
    }
}

/// Static role table plus the cross-entity rules run on every bundle.
pub struct Catalog {
    roles: &'static [RoleSpec],
    rules: Vec<Box<dyn ConsistencyRule>>,
}

impl Catalog {
    pub fn new(roles: &'static [RoleSpec]) -> Self {
        Self {
            roles,
            rules: Vec::new(),
        }
    }

    pub fn with_rule<R: ConsistencyRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Roles in render order.
    pub fn roles(&self) -> &'static [RoleSpec] {
        self.roles
    }

    pub fn role(&self, name: &str) -> Option<&'static RoleSpec> {
        self.roles.iter().find(|role| role.name == name)
    }

    /// Distinct programs, in order of first appearance.
    pub fn programs(&self) -> Vec<&'static str> {
        let mut programs: Vec<&'static str> = Vec::new();
        for role in self.roles {
            if !programs.contains(&role.program) {
                programs.push(role.program);
            }
        }
        programs
    }

    pub fn rules(&self) -> &[Box<dyn ConsistencyRule>] {
        &self.rules
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|rule| rule.name()).collect();
        f.debug_struct("Catalog")
            .field("roles", &self.roles.len())
            .field("rules", &rules)
            .finish()
    }
}
