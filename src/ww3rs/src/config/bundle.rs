// ww3rs/src/config/bundle.rs

use crate::catalog;
use anyhow::Context;
use linked_hash_map::LinkedHashMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use ww3nml::{Collection, Composition, Entity, RawMap, RawValue, RoleKind};

/// A bundle file: target programs, output directory and the raw field
/// values of every role, keyed by role name.
///
/// ```yaml
/// programs: [ww3_shel]
/// output_dir: namelists
/// namelists:
///   shel.domain: { start: "20230101 000000", stop: "20230107 000000" }
///   shel.homog_input:
///     - { name: WND, date: "20230101 000000", value1: 5.0, value2: 270.0 }
/// ```
///
/// A map is a single block; a list of maps is a multi-instance block.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    /// Programs to write control files for; empty means all of them
    #[serde(default)]
    programs: Vec<String>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    namelists: LinkedHashMap<String, RawValue>,
}

impl BundleConfig {
    pub fn programs(&self) -> &[String] {
        &self.programs
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn namelists(&self) -> &LinkedHashMap<String, RawValue> {
        &self.namelists
    }

    /// Build every entity and register it against the WW3 catalog.
    ///
    /// Field values are coerced here, so a malformed value is reported
    /// with the role it was given under.
    pub fn into_composition(&self) -> anyhow::Result<Composition> {
        let mut composition = Composition::new(catalog::catalog(), &self.programs)
            .context("Error selecting target programs")?;

        for (role, value) in &self.namelists {
            let spec = composition
                .catalog()
                .role(role)
                .with_context(|| format!("Unknown role {} in bundle", role))?;
            match (spec.kind, value) {
                (RoleKind::Single(schema), RawValue::Map(raw)) => {
                    let entity = Entity::from_raw(schema, raw)
                        .with_context(|| format!("Error building {}", role))?;
                    composition.register(role, entity)?;
                }
                (RoleKind::Collection(schema), RawValue::List(items)) => {
                    let raws = instance_maps(role, items)?;
                    let collection = Collection::from_raw(schema, &raws)
                        .with_context(|| format!("Error building {}", role))?;
                    composition.register(role, collection)?;
                }
                (RoleKind::Single(_), other) => anyhow::bail!(
                    "{} holds a single block and expects a map, got {}",
                    role,
                    other.type_name()
                ),
                (RoleKind::Collection(_), other) => anyhow::bail!(
                    "{} holds several instances and expects a list of maps, got {}",
                    role,
                    other.type_name()
                ),
            }
        }
        debug!(
            "Bundle registered {} role(s) for {}",
            self.namelists.len(),
            composition.programs().join(", ")
        );
        Ok(composition)
    }
}

fn instance_maps(role: &str, items: &[RawValue]) -> anyhow::Result<Vec<RawMap>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            RawValue::Map(raw) => Ok(raw.clone()),
            other => anyhow::bail!(
                "{}: instance {} must be a map, got {}",
                role,
                i + 1,
                other.type_name()
            ),
        })
        .collect()
}

impl TryFrom<&str> for BundleConfig {
    type Error = anyhow::Error;

    fn try_from(content: &str) -> anyhow::Result<Self> {
        serde_saphyr::from_str::<BundleConfig>(content).context("Error parsing bundle YAML")
    }
}

impl TryFrom<&Path> for BundleConfig {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs_err::read_to_string(path)
            .context(format!("Error reading {} to string.", path.display()))?;

        serde_saphyr::from_str::<BundleConfig>(&content)
            .context(format!("Error parsing YAML file: {}", path.display()))
    }
}

impl TryFrom<&PathBuf> for BundleConfig {
    type Error = anyhow::Error;

    fn try_from(path: &PathBuf) -> anyhow::Result<Self> {
        Self::try_from(path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use ww3nml::NmlValue;

    const SHEL: &str = r#"
programs: [ww3_shel]
output_dir: namelists
namelists:
  shel.domain:
    start: "20230101 000000"
    stop: "20230107 000000"
    iostyp: 1
  shel.input:
    forcing:
      winds: "H"
      currents: "T"
  shel.homog_count:
    n_wnd: 1
  shel.homog_input:
    - { name: WND, date: "20230101 000000", value1: 5.0, value2: 270.0 }
"#;

    #[test]
    fn test_parse_bundle() {
        let config = BundleConfig::try_from(SHEL).unwrap();
        assert_eq!(config.programs(), &["ww3_shel".to_string()]);
        assert_eq!(config.output_dir(), Some(Path::new("namelists")));
        let roles: Vec<&str> = config.namelists().keys().map(String::as_str).collect();
        assert_eq!(
            roles,
            vec!["shel.domain", "shel.input", "shel.homog_count", "shel.homog_input"]
        );
    }

    #[test]
    fn test_into_composition_registers_every_role() {
        let composition = BundleConfig::try_from(SHEL)
            .unwrap()
            .into_composition()
            .unwrap();
        let domain = composition.entity(catalog::SHEL_DOMAIN).unwrap();
        assert_eq!(domain.get_integer("IOSTYP"), Some(1));
        assert_eq!(
            composition
                .collection(catalog::SHEL_HOMOG_INPUT)
                .unwrap()
                .len(),
            1
        );
        let findings = composition.validate_consistency();
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_yaml_bool_is_not_a_selector() {
        let yaml = "programs: [ww3_shel]\nnamelists:\n  shel.input:\n    forcing:\n      winds: true\n";
        let err = BundleConfig::try_from(yaml)
            .unwrap()
            .into_composition()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("shel.input"));
    }

    #[test]
    fn test_yaml_null_names_the_field() {
        let yaml = "programs: [ww3_shel]\nnamelists:\n  shel.domain: { start: \"20230101 000000\", stop: ~ }\n";
        let err = BundleConfig::try_from(yaml)
            .unwrap()
            .into_composition()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("DOMAIN%STOP"), "{:#}", err);
    }

    #[test]
    fn test_collection_role_needs_a_list() {
        let yaml = "namelists:\n  multi.model: { name: grd1 }\n";
        let err = BundleConfig::try_from(yaml)
            .unwrap()
            .into_composition()
            .unwrap_err();
        assert!(err.to_string().contains("list of maps"));
    }

    #[test]
    fn test_unknown_role_and_program() {
        let yaml = "namelists:\n  shel.nothing: {}\n";
        let err = BundleConfig::try_from(yaml)
            .unwrap()
            .into_composition()
            .unwrap_err();
        assert!(err.to_string().contains("shel.nothing"));

        let yaml = "programs: [ww3_nothing]\n";
        assert!(BundleConfig::try_from(yaml)
            .unwrap()
            .into_composition()
            .is_err());
    }

    #[test]
    fn test_lists_become_list_fields() {
        let yaml = r#"
programs: [ww3_prnc]
namelists:
  prnc.file:
    filename: wind.nc
    longitude: lon
    latitude: lat
    var: [u10, v10]
"#;
        let composition = BundleConfig::try_from(yaml)
            .unwrap()
            .into_composition()
            .unwrap();
        let file = composition.entity(catalog::PRNC_FILE).unwrap();
        assert_eq!(
            file.get("VAR").and_then(NmlValue::as_list).map(|v| v.len()),
            Some(2)
        );
    }

    #[test]
    fn test_read_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bundle.yml");
        fs_err::write(&path, SHEL).unwrap();
        let config = BundleConfig::try_from(&path).unwrap();
        assert_eq!(config.namelists().len(), 4);

        let missing = tmp.path().join("missing.yml");
        let err = BundleConfig::try_from(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.yml"));
    }
}
