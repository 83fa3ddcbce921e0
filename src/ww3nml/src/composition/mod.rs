// ww3nml/src/composition/mod.rs

//! Composition Orchestrator.
//!
//! A [`Composition`] holds one validated entity (or collection) per role
//! for a set of target programs. Validation collects every finding; the
//! render and write operations refuse to produce anything while a single
//! finding remains.

pub mod catalog;
pub mod rules;

pub use catalog::{Catalog, RoleKind, RoleSpec};
pub use rules::{ConsistencyRule, DeclaredCount};

use crate::error::{CompositionError, NmlError, Result};
use crate::findex::check_collection;
use crate::namelist::{join_blocks, render_collection, render_entity, Collection, Entity};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One completeness or consistency problem, tagged with the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: &'static str,
    pub message: String,
}

impl Finding {
    pub fn new<S: Into<String>>(rule: &'static str, message: S) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// What a role holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Single(Entity),
    Collection(Collection),
}

impl Member {
    pub fn render(&self) -> Result<String> {
        match self {
            Member::Single(entity) => render_entity(entity),
            Member::Collection(collection) => render_collection(collection),
        }
    }

    fn describe(&self) -> String {
        match self {
            Member::Single(entity) => entity.block().to_string(),
            Member::Collection(collection) => collection.schema().to_string(),
        }
    }
}

impl From<Entity> for Member {
    fn from(entity: Entity) -> Self {
        Member::Single(entity)
    }
}

impl From<Collection> for Member {
    fn from(collection: Collection) -> Self {
        Member::Collection(collection)
    }
}

/// One configuration bundle.
#[derive(Debug)]
pub struct Composition {
    catalog: Catalog,
    programs: Vec<&'static str>,
    members: HashMap<&'static str, Member>,
}

impl Composition {
    /// Target `programs` of `catalog`; an empty list targets every program.
    pub fn new<S: AsRef<str>>(catalog: Catalog, programs: &[S]) -> Result<Self> {
        let known = catalog.programs();
        for program in programs {
            if !known.iter().any(|k| *k == program.as_ref()) {
                return Err(NmlError::UnknownProgram {
                    program: program.as_ref().to_string(),
                });
            }
        }
        let targeted: Vec<&'static str> = known
            .into_iter()
            .filter(|p| programs.is_empty() || programs.iter().any(|q| q.as_ref() == *p))
            .collect();
        debug!("New composition for {}", targeted.join(", "));
        Ok(Self {
            catalog,
            programs: targeted,
            members: HashMap::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn programs(&self) -> &[&'static str] {
        &self.programs
    }

    /// Add a member under `role`. Fails if the role is already taken.
    pub fn register<M: Into<Member>>(&mut self, role: &str, member: M) -> Result<()> {
        let member = member.into();
        let spec = self.accept(role, &member)?;
        if self.members.contains_key(spec.name) {
            return Err(NmlError::DuplicateRole {
                role: role.to_string(),
            });
        }
        info!("Registered {} ({})", spec.name, spec.kind.block());
        self.members.insert(spec.name, member);
        Ok(())
    }

    /// Swap the whole member under `role`, returning the previous one.
    pub fn replace<M: Into<Member>>(&mut self, role: &str, member: M) -> Result<Option<Member>> {
        let member = member.into();
        let spec = self.accept(role, &member)?;
        info!("Replaced {} ({})", spec.name, spec.kind.block());
        Ok(self.members.insert(spec.name, member))
    }

    fn accept(&self, role: &str, member: &Member) -> Result<&'static RoleSpec> {
        let spec = self
            .catalog
            .role(role)
            .ok_or_else(|| NmlError::unknown_role(role, "not in the catalog"))?;
        if !self.programs.contains(&spec.program) {
            return Err(NmlError::unknown_role(
                role.to_string(),
                format!("{} is not a targeted program", spec.program),
            ));
        }
        let matches = match (spec.kind, member) {
            (RoleKind::Single(schema), Member::Single(entity)) => schema.is(entity.schema()),
            (RoleKind::Collection(schema), Member::Collection(collection)) => {
                schema.is(collection.schema())
            }
            _ => false,
        };
        if !matches {
            return Err(NmlError::SchemaMismatch {
                role: role.to_string(),
                expected: spec.kind.to_string(),
                found: member.describe(),
            });
        }
        Ok(spec)
    }

    pub fn member(&self, role: &str) -> Option<&Member> {
        self.members.get(role)
    }

    pub fn entity(&self, role: &str) -> Option<&Entity> {
        match self.members.get(role) {
            Some(Member::Single(entity)) => Some(entity),
            _ => None,
        }
    }

    pub fn collection(&self, role: &str) -> Option<&Collection> {
        match self.members.get(role) {
            Some(Member::Collection(collection)) => Some(collection),
            _ => None,
        }
    }

    pub fn is_registered(&self, role: &str) -> bool {
        self.members.contains_key(role)
    }

    /// Targeted roles in catalog order.
    fn targeted_roles(&self) -> impl Iterator<Item = &'static RoleSpec> + '_ {
        self.catalog
            .roles()
            .iter()
            .filter(move |spec| self.programs.contains(&spec.program))
    }

    /// One `missing_role` finding per absent required role. An empty
    /// collection does not satisfy a required role.
    pub fn validate_completeness(&self) -> Vec<Finding> {
        let findings: Vec<Finding> = self
            .targeted_roles()
            .filter(|spec| spec.required)
            .filter(|spec| match self.members.get(spec.name) {
                None => true,
                Some(Member::Collection(collection)) => collection.is_empty(),
                Some(Member::Single(_)) => false,
            })
            .map(|spec| {
                Finding::new(
                    "missing_role",
                    format!(
                        "{} ({}) is required by {}",
                        spec.name,
                        spec.kind.block(),
                        spec.program
                    ),
                )
            })
            .collect();
        debug!("Completeness: {} finding(s)", findings.len());
        findings
    }

    /// Collection invariants of every registered collection, then every
    /// catalog rule.
    pub fn validate_consistency(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        for spec in self.targeted_roles() {
            if let Some(Member::Collection(collection)) = self.members.get(spec.name) {
                findings.extend(check_collection(spec.name, collection));
            }
        }
        for rule in self.catalog.rules() {
            let found = rule.check(self);
            debug!("Rule {}: {} finding(s)", rule.name(), found.len());
            findings.extend(found);
        }
        findings
    }

    /// Every finding, completeness first.
    pub fn validate(&self) -> Vec<Finding> {
        let mut findings = self.validate_completeness();
        findings.extend(self.validate_consistency());
        findings
    }

    /// Render one file per targeted program, keyed by file name.
    ///
    /// Nothing is rendered unless validation comes back clean.
    pub fn render_all(&self) -> Result<BTreeMap<String, String>> {
        let findings = self.validate();
        if !findings.is_empty() {
            warn!("Refusing to render: {} finding(s)", findings.len());
            return Err(CompositionError { findings }.into());
        }

        let mut files = BTreeMap::new();
        for program in &self.programs {
            let mut blocks = Vec::new();
            for spec in self.targeted_roles().filter(|spec| spec.program == *program) {
                if let Some(member) = self.members.get(spec.name) {
                    blocks.push(member.render()?);
                }
            }
            if !blocks.is_empty() {
                files.insert(catalog::filename(program), join_blocks(&blocks));
            }
        }
        Ok(files)
    }

    /// Render, then write each file under `output_dir` (created if absent).
    ///
    /// Every file is first written to a temporary file in `output_dir`;
    /// they are renamed into place only once all of them were written.
    pub fn write_all<P: AsRef<Path>>(&self, output_dir: P) -> Result<Vec<PathBuf>> {
        let files = self.render_all()?;
        let dir = output_dir.as_ref();
        fs_err::create_dir_all(dir)?;

        let mut staged = Vec::with_capacity(files.len());
        for (name, text) in &files {
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(text.as_bytes())?;
            tmp.flush()?;
            set_file_mode(tmp.as_file())?;
            staged.push((dir.join(name), tmp));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (path, tmp) in staged {
            tmp.persist(&path).map_err(|e| e.error)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Mode of every written control file: owner read-write, readable by all.
pub const FILE_MODE: u32 = 0o644;

#[cfg(unix)]
fn set_file_mode(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldSpec};
    use crate::namelist::{CollectionSchema, Schema};

    static RUN: Schema = Schema::new(
        "RUN_NML",
        "RUN",
        &[FieldSpec::required("COUNT", FieldKind::Integer)],
    );
    static ITEM: Schema = Schema::new(
        "ITEM_NML",
        "ITEM",
        &[FieldSpec::required("NAME", FieldKind::Text)],
    );
    static ITEMS: CollectionSchema = CollectionSchema::new(&ITEM);
    static NOTE: Schema = Schema::new(
        "NOTE_NML",
        "NOTE",
        &[FieldSpec::optional("TEXT", FieldKind::Text)],
    );

    static ROLES: &[RoleSpec] = &[
        RoleSpec::single("a.run", "prog_a", &RUN, true),
        RoleSpec::collection("a.items", "prog_a", &ITEMS, false),
        RoleSpec::single("b.note", "prog_b", &NOTE, true),
    ];

    fn catalog() -> Catalog {
        Catalog::new(ROLES).with_rule(DeclaredCount::new("a.run", "COUNT", "a.items"))
    }

    fn run(count: i64) -> Entity {
        Entity::builder(&RUN).set("COUNT", count).build().unwrap()
    }

    fn items(names: &[&str]) -> Collection {
        let instances = names
            .iter()
            .map(|n| Entity::builder(&ITEM).set("NAME", *n).build().unwrap())
            .collect();
        Collection::new(&ITEMS, instances).unwrap()
    }

    #[test]
    fn test_unknown_program_is_rejected() {
        let err = Composition::new(catalog(), &["prog_z"]).unwrap_err();
        assert!(matches!(err, NmlError::UnknownProgram { ref program } if program == "prog_z"));
    }

    #[test]
    fn test_empty_program_list_targets_everything() {
        let composition = Composition::new(catalog(), &[] as &[&str]).unwrap();
        assert_eq!(composition.programs(), &["prog_a", "prog_b"]);
    }

    #[test]
    fn test_duplicate_role_is_rejected() {
        let mut composition = Composition::new(catalog(), &["prog_a"]).unwrap();
        composition.register("a.run", run(0)).unwrap();
        let err = composition.register("a.run", run(1)).unwrap_err();
        assert!(matches!(err, NmlError::DuplicateRole { ref role } if role == "a.run"));
        assert_eq!(composition.entity("a.run").unwrap().get_integer("COUNT"), Some(0));
    }

    #[test]
    fn test_replace_swaps_whole_member() {
        let mut composition = Composition::new(catalog(), &["prog_a"]).unwrap();
        composition.register("a.run", run(0)).unwrap();
        let previous = composition.replace("a.run", run(2)).unwrap();
        assert_eq!(previous, Some(Member::Single(run(0))));
        assert_eq!(composition.entity("a.run").unwrap().get_integer("COUNT"), Some(2));
    }

    #[test]
    fn test_role_checks() {
        let mut composition = Composition::new(catalog(), &["prog_a"]).unwrap();
        assert!(matches!(
            composition.register("a.missing", run(0)),
            Err(NmlError::UnknownRole { .. })
        ));
        assert!(matches!(
            composition.register("b.note", Entity::builder(&NOTE).build().unwrap()),
            Err(NmlError::UnknownRole { .. })
        ));
        assert!(matches!(
            composition.register("a.items", run(0)),
            Err(NmlError::SchemaMismatch { .. })
        ));
        assert!(!composition.is_registered("a.items"));
    }

    #[test]
    fn test_completeness_lists_every_missing_role() {
        let composition = Composition::new(catalog(), &["prog_a", "prog_b"]).unwrap();
        let findings = composition.validate_completeness();
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.rule == "missing_role"));
        assert!(findings[0].message.contains("a.run"));
        assert!(findings[1].message.contains("b.note"));
    }

    #[test]
    fn test_declared_count_rule() {
        let mut composition = Composition::new(catalog(), &["prog_a"]).unwrap();
        composition.register("a.run", run(3)).unwrap();
        composition.register("a.items", items(&["x", "y"])).unwrap();
        let findings = composition.validate_consistency();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "declared_count");

        composition.replace("a.items", items(&["x", "y", "z"])).unwrap();
        assert!(composition.validate_consistency().is_empty());
    }

    #[test]
    fn test_render_all_groups_blocks_per_program() {
        let mut composition = Composition::new(catalog(), &["prog_a"]).unwrap();
        composition.register("a.items", items(&["x"])).unwrap();
        composition.register("a.run", run(1)).unwrap();
        let files = composition.render_all().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(
            files["prog_a.nml"],
            "&RUN_NML\n  RUN%COUNT = 1\n/\n\n&ITEM_NML\n  ITEM(1)%NAME = 'x'\n/\n"
        );
    }

    #[test]
    fn test_render_all_carries_every_finding() {
        let mut composition = Composition::new(catalog(), &["prog_a", "prog_b"]).unwrap();
        composition.register("a.run", run(2)).unwrap();
        let err = composition.render_all().unwrap_err();
        let rules: Vec<&str> = err.findings().iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec!["missing_role", "declared_count"]);
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::new("missing_role", "a.run is required");
        assert_eq!(finding.to_string(), "[missing_role] a.run is required");
    }
}
