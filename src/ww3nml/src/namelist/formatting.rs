// ww3nml/src/namelist/formatting.rs

//! Namelist Serializer: entities to `&BLOCK ... /` text.

use super::collection::Collection;
use super::entity::Entity;
use crate::error::{NmlError, Result};
use crate::field::{FieldKind, FieldSpec, Fields, NmlValue};
use crate::findex::index_instances;
use std::fmt;

/// Indentation of every assignment line.
pub const INDENT: &str = "  ";

/// One segment of a field path: `NAME` or `NAME(i)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub index: Option<usize>,
}

impl Segment {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed<S: Into<String>>(name: S, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}({})", self.name, i),
            None => f.write_str(&self.name),
        }
    }
}

/// Left-hand side of an assignment, e.g. `MODEL(2)%FORCING%WINDS`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(pub Vec<Segment>);

impl FieldPath {
    pub fn root(prefix: &str) -> Self {
        if prefix.is_empty() {
            Self(Vec::new())
        } else {
            Self(vec![Segment::new(prefix)])
        }
    }

    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::new(name));
        Self(segments)
    }

    /// Same path with a 1-based index on the last segment.
    pub fn at(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        if let Some(last) = segments.last_mut() {
            last.index = Some(index);
        }
        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn segments_mut(&mut self) -> &mut Vec<Segment> {
        &mut self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("%")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// One rendered line: path and literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub path: FieldPath,
    pub token: String,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path, self.token)
    }
}

/// Flatten an entity into assignments, in schema order.
///
/// Fails with [`NmlError::Unrendered`] if a required field has no value or
/// a value does not match its declaration; nothing is ever emitted as a
/// placeholder.
pub fn assignments(entity: &Entity) -> Result<Vec<Assignment>> {
    let schema = entity.schema();
    let mut out = Vec::new();
    flatten_fields(
        schema.block,
        schema.fields,
        entity.fields(),
        &FieldPath::root(schema.prefix),
        &mut out,
    )?;
    Ok(out)
}

fn flatten_fields(
    block: &str,
    specs: &[FieldSpec],
    fields: &Fields,
    parent: &FieldPath,
    out: &mut Vec<Assignment>,
) -> Result<()> {
    for spec in specs {
        let path = parent.child(spec.name);
        match fields.get(spec.name) {
            Some(value) => flatten_value(block, &spec.kind, value, path, out)?,
            None if spec.required => return Err(unrendered(block, &path)),
            None => {}
        }
    }
    Ok(())
}

fn flatten_value(
    block: &str,
    kind: &FieldKind,
    value: &NmlValue,
    path: FieldPath,
    out: &mut Vec<Assignment>,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::Group(specs), NmlValue::Group(fields)) => {
            flatten_fields(block, specs, fields, &path, out)
        }
        (FieldKind::List(inner), NmlValue::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                flatten_value(block, inner, item, path.at(i + 1), out)?;
            }
            Ok(())
        }
        (FieldKind::Group(_), _) | (FieldKind::List(_), _) => Err(unrendered(block, &path)),
        (_, scalar) => match scalar.to_token() {
            Some(token) => {
                out.push(Assignment { path, token });
                Ok(())
            }
            None => Err(unrendered(block, &path)),
        },
    }
}

fn unrendered(block: &str, path: &FieldPath) -> NmlError {
    NmlError::Unrendered {
        block: block.to_string(),
        field: path.to_string(),
    }
}

/// Frame assignments as one block; always ends with a newline.
pub fn render_block(block: &str, assignments: &[Assignment]) -> String {
    let mut out = format!("&{}\n", block);
    for assignment in assignments {
        out.push_str(INDENT);
        out.push_str(&assignment.to_string());
        out.push('\n');
    }
    out.push_str("/\n");
    out
}

pub fn render_entity(entity: &Entity) -> Result<String> {
    Ok(render_block(entity.block(), &assignments(entity)?))
}

/// All instances in one block, paths indexed `PREFIX(i)%...`.
pub fn render_collection(collection: &Collection) -> Result<String> {
    let per_instance = collection
        .instances()
        .iter()
        .map(assignments)
        .collect::<Result<Vec<_>>>()?;
    let indexed = index_instances(collection.schema().prefix(), per_instance);
    Ok(render_block(collection.block(), &indexed))
}

/// Join rendered blocks into one file, separated by a blank line.
pub fn join_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    blocks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ChoiceKind, DefaultValue, FieldKind, FieldSpec};
    use crate::namelist::{CollectionSchema, Schema};

    static EMPTY: Schema = Schema::new("EMPTY_NML", "", &[]);

    static SPECTRUM: Schema = Schema::new(
        "SPECTRUM_NML",
        "SPECTRUM",
        &[
            FieldSpec::required("XFR", FieldKind::Real),
            FieldSpec::optional("NK", FieldKind::Integer).with_default(DefaultValue::Integer(32)),
            FieldSpec::optional("LEVELS", FieldKind::List(&FieldKind::Real)),
            FieldSpec::optional("NAME", FieldKind::Text),
        ],
    );

    const FORCING: &[FieldSpec] = &[
        FieldSpec::optional("WINDS", FieldKind::Choice(ChoiceKind::Forcing)),
        FieldSpec::optional("ICE", FieldKind::Flag),
    ];

    static MODEL: Schema = Schema::new(
        "MODEL_GRID_NML",
        "MODEL",
        &[
            FieldSpec::required("NAME", FieldKind::Text),
            FieldSpec::optional("FORCING", FieldKind::Group(FORCING)),
        ],
    );
    static MODELS: CollectionSchema = CollectionSchema::new(&MODEL);

    const SELECTED: &[FieldSpec] = &[
        FieldSpec::optional("WINDS", FieldKind::Choice(ChoiceKind::Forcing))
            .with_default(DefaultValue::Text("F")),
        FieldSpec::optional("CURRENTS", FieldKind::Choice(ChoiceKind::Forcing)),
    ];

    static INPUT: Schema = Schema::new(
        "INPUT_NML",
        "INPUT",
        &[FieldSpec::optional("FORCING", FieldKind::Group(SELECTED))],
    );

    #[test]
    fn test_omitted_group_renders_member_defaults() {
        let entity = Entity::builder(&INPUT).build().unwrap();
        assert_eq!(
            render_entity(&entity).unwrap(),
            "&INPUT_NML\n  INPUT%FORCING%WINDS = 'F'\n/\n"
        );

        let entity = Entity::builder(&INPUT)
            .set("FORCING%CURRENTS", "T")
            .build()
            .unwrap();
        assert_eq!(
            render_entity(&entity).unwrap(),
            "&INPUT_NML\n  INPUT%FORCING%WINDS = 'F'\n  INPUT%FORCING%CURRENTS = 'T'\n/\n"
        );
    }

    #[test]
    fn test_empty_block_is_terminated() {
        let entity = Entity::builder(&EMPTY).build().unwrap();
        assert_eq!(render_entity(&entity).unwrap(), "&EMPTY_NML\n/\n");
    }

    #[test]
    fn test_entity_block_layout() {
        let entity = Entity::builder(&SPECTRUM)
            .set("name", "it's")
            .set("levels", vec![0.5, 1.0])
            .set("xfr", 1.1)
            .build()
            .unwrap();
        let expected = "&SPECTRUM_NML\n\
                        \x20 SPECTRUM%XFR = 1.1\n\
                        \x20 SPECTRUM%NK = 32\n\
                        \x20 SPECTRUM%LEVELS(1) = 0.5\n\
                        \x20 SPECTRUM%LEVELS(2) = 1.0\n\
                        \x20 SPECTRUM%NAME = 'it''s'\n\
                        /\n";
        assert_eq!(render_entity(&entity).unwrap(), expected);
    }

    #[test]
    fn test_list_order_is_preserved() {
        let entity = Entity::builder(&SPECTRUM)
            .set("XFR", 1.1)
            .set("LEVELS", vec![3.0, 1.0, 2.0])
            .build()
            .unwrap();
        let paths: Vec<String> = assignments(&entity)
            .unwrap()
            .into_iter()
            .filter(|a| a.path.to_string().contains("LEVELS"))
            .map(|a| a.to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "SPECTRUM%LEVELS(1) = 3.0",
                "SPECTRUM%LEVELS(2) = 1.0",
                "SPECTRUM%LEVELS(3) = 2.0"
            ]
        );
    }

    #[test]
    fn test_collection_renders_indexed_nested_paths() {
        let a = Entity::builder(&MODEL)
            .set("NAME", "outer")
            .set("FORCING%WINDS", "T")
            .set("FORCING%ICE", true)
            .build()
            .unwrap();
        let b = Entity::builder(&MODEL).set("NAME", "inner").build().unwrap();
        let collection = Collection::new(&MODELS, vec![a, b]).unwrap();
        let expected = "&MODEL_GRID_NML\n\
                        \x20 MODEL(1)%NAME = 'outer'\n\
                        \x20 MODEL(1)%FORCING%WINDS = 'T'\n\
                        \x20 MODEL(1)%FORCING%ICE = T\n\
                        \x20 MODEL(2)%NAME = 'inner'\n\
                        /\n";
        assert_eq!(render_collection(&collection).unwrap(), expected);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let entity = Entity::builder(&SPECTRUM).set("XFR", "1.1").build().unwrap();
        assert_eq!(
            render_entity(&entity).unwrap(),
            render_entity(&entity.clone()).unwrap()
        );
    }

    #[test]
    fn test_join_blocks_separates_with_blank_line() {
        let text = join_blocks(&["&A_NML\n/\n", "&B_NML\n/\n"]);
        assert_eq!(text, "&A_NML\n/\n\n&B_NML\n/\n");
    }
}
