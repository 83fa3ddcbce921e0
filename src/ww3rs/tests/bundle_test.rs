// ww3rs/tests/bundle_test.rs

//! Whole bundles: YAML in, control files out.

use tempfile::TempDir;
use ww3rs::BundleConfig;

const GRID_AND_SHEL: &str = r#"
programs: [ww3_grid, ww3_shel]
namelists:
  grid.spectrum: { freq1: 0.035, nk: 32, nth: 24 }
  grid.run: { fldry: false, flcx: true, flcy: true, flcth: true, flck: false, flsou: true }
  grid.timesteps: { dtmax: 900.0, dtxy: 300.0, dtkth: 300.0, dtmin: 10.0 }
  grid.grid: { name: "global 1deg", type: RECT, coord: SPHE, clos: SMPL, zlim: -0.1, dmin: 2.5 }
  grid.rect: { nx: 360, ny: 181, sx: 1.0, sy: 1.0, x0: 0.0, y0: -90.0 }
  grid.depth: { sf: 0.001, filename: depth.inp, idla: 1, idfm: 1, format: "(....)" }
  shel.domain: { start: "20230101 000000", stop: "20230107 000000" }
  shel.input:
    forcing: { winds: "H", currents: "T", water_levels: "F" }
  shel.output_type:
    field: { list: "HS FP DIR" }
    point: { file: points.list }
  shel.output_date:
    field: { start: "20230101 000000", stride: 1h, stop: "20230107 000000" }
    restart: { start: "20230107 000000", stride: 0, stop: "20230107 000000" }
  shel.homog_count: { n_wnd: 1 }
  shel.homog_input:
    - { name: WND, date: "20230101 000000", value1: 10.0, value2: 270.0, value3: 0.0 }
"#;

const MULTI: &str = r#"
programs: [ww3_multi]
namelists:
  multi.domain: { nrinp: 1, nrgrd: 2, start: "20230101 000000", stop: "20230102 000000" }
  multi.input:
    - { name: wind, forcing: { winds: true } }
  multi.model:
    - { name: outer, forcing: { winds: wind }, resource: { rank_id: 1, comm_frac: 0.4 } }
    - { name: inner, forcing: { winds: wind }, resource: { rank_id: 2, comm_frac: 0.6 } }
  multi.output_type:
    field: { list: "HS" }
  multi.output_date:
    field: { start: "20230101 000000", stride: 3600, stop: "20230102 000000" }
"#;

fn files(yaml: &str) -> std::collections::BTreeMap<String, String> {
    BundleConfig::try_from(yaml)
        .unwrap()
        .into_composition()
        .unwrap()
        .render_all()
        .unwrap()
}

#[test]
fn test_grid_and_shel_render() {
    let files = files(GRID_AND_SHEL);
    assert_eq!(
        files.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["ww3_grid.nml", "ww3_shel.nml"]
    );

    let grid = &files["ww3_grid.nml"];
    assert!(grid.starts_with("&SPECTRUM_NML\n  SPECTRUM%XFR = 1.1\n"));
    assert!(grid.contains("  RUN%FLCX = T\n"));
    assert!(grid.contains("  RUN%FLDRY = F\n"));
    assert!(grid.contains("  GRID%NAME = 'global 1deg'\n"));
    assert!(grid.contains("  GRID%TYPE = 'RECT'\n"));
    assert!(grid.contains("  GRID%CLOS = 'SMPL'\n"));
    assert!(grid.contains("  RECT%NX = 360\n"));
    assert!(grid.contains("  RECT%SF = 1.0\n"));
    assert!(grid.contains("  DEPTH%FILENAME = 'depth.inp'\n"));
    let spectrum = grid.find("&SPECTRUM_NML").unwrap();
    let rect = grid.find("&RECT_NML").unwrap();
    let depth = grid.find("&DEPTH_NML").unwrap();
    assert!(spectrum < rect && rect < depth);

    let shel = &files["ww3_shel.nml"];
    assert!(shel.contains("  DOMAIN%IOSTYP = 1\n"));
    assert!(shel.contains("  DOMAIN%START = 20230101 000000\n"));
    assert!(shel.contains("  INPUT%FORCING%WINDS = 'H'\n"));
    assert!(shel.contains("  INPUT%FORCING%WATER_LEVELS = 'F'\n"));
    assert!(shel.contains("  DATE%FIELD%STRIDE = 3600\n"));
    assert!(shel.contains("  HOMOG_COUNT%N_WND = 1\n"));
    assert!(shel.contains("  HOMOG_INPUT(1)%NAME = 'WND'\n"));
    assert!(shel.contains("  HOMOG_INPUT(1)%VALUE2 = 270.0\n"));
}

#[test]
fn test_multi_renders_indexed_grids_with_flags() {
    let files = files(MULTI);
    let multi = &files["ww3_multi.nml"];
    assert!(multi.contains("  INPUT(1)%NAME = 'wind'\n"));
    assert!(multi.contains("  INPUT(1)%FORCING%WINDS = T\n"));
    assert!(multi.contains("  MODEL(2)%NAME = 'inner'\n"));
    assert!(multi.contains("  MODEL(1)%FORCING%WINDS = 'wind'\n"));
    assert!(multi.contains("  MODEL(2)%RESOURCE%COMM_FRAC = 0.6\n"));
    assert!(multi.contains("  ALLTYPE%FIELD%LIST = 'HS'\n"));
    assert!(multi.contains("  ALLDATE%FIELD%STRIDE = 3600\n"));
}

#[test]
fn test_inconsistent_multi_bundle_is_refused() {
    let yaml = MULTI
        .replace("comm_frac: 0.6", "comm_frac: 0.5")
        .replace("nrgrd: 2", "nrgrd: 3");
    let composition = BundleConfig::try_from(yaml.as_str())
        .unwrap()
        .into_composition()
        .unwrap();
    let rules: Vec<&str> = composition.validate().iter().map(|f| f.rule).collect();
    assert_eq!(rules, vec!["resource_fraction", "declared_count"]);
    assert!(composition.render_all().is_err());
}

#[test]
fn test_incomplete_bundle_lists_missing_roles() {
    let yaml = "programs: [ww3_ounf]\nnamelists:\n  ounf.file: { prefix: ww3. }\n";
    let composition = BundleConfig::try_from(yaml)
        .unwrap()
        .into_composition()
        .unwrap();
    let findings = composition.validate_completeness();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].message.contains("ounf.field"));
}

#[test]
fn test_write_bundle_files() {
    let tmp = TempDir::new().unwrap();
    let composition = BundleConfig::try_from(GRID_AND_SHEL)
        .unwrap()
        .into_composition()
        .unwrap();
    let written = composition.write_all(tmp.path()).unwrap();
    assert_eq!(
        written,
        vec![tmp.path().join("ww3_grid.nml"), tmp.path().join("ww3_shel.nml")]
    );
    let shel = std::fs::read_to_string(tmp.path().join("ww3_shel.nml")).unwrap();
    assert!(shel.starts_with("&DOMAIN_NML\n"));
    assert!(shel.ends_with("/\n"));
}
