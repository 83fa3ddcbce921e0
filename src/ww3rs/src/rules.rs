// ww3rs/src/rules.rs

//! Cross-block checks specific to WAVEWATCH III.

use crate::catalog::{
    GRID_CURV, GRID_GRID, GRID_RECT, GRID_TIMESTEPS, GRID_UNST, MULTI_DOMAIN, MULTI_OUTPUT_DATE,
    PRNC_FORCING, SHEL_DOMAIN, SHEL_HOMOG_INPUT, SHEL_INPUT, SHEL_OUTPUT_DATE,
};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use ww3nml::field::{Closure, Coordinate, ForcingSelector, GridType, HomogInputType};
use ww3nml::{Choice, Composition, ConsistencyRule, Entity, Finding};

/// Longitudinal span of a globe, in degrees.
const GLOBE_SPAN: f64 = 360.0;
const SPAN_TOLERANCE: f64 = 1e-4;
/// Upper bound on the minimum source-term time step, in seconds.
const MAX_DTMIN: f64 = 15.0;

/// Homogeneous input type fed by a `ww3_shel` forcing field.
pub fn forcing_input_type(field: &str) -> Option<HomogInputType> {
    let input = match field.to_ascii_uppercase().as_str() {
        "WATER_LEVELS" => HomogInputType::WaterLevels,
        "CURRENTS" => HomogInputType::Currents,
        "WINDS" => HomogInputType::Winds,
        "ATM_MOMENTUM" => HomogInputType::AtmMomentum,
        "AIR_DENSITY" => HomogInputType::AirDensity,
        "ICE_CONC" => HomogInputType::IceConcentration,
        "ICE_PARAM1" => HomogInputType::IceParam1,
        "ICE_PARAM2" => HomogInputType::IceParam2,
        "ICE_PARAM3" => HomogInputType::IceParam3,
        "ICE_PARAM4" => HomogInputType::IceParam4,
        "ICE_PARAM5" => HomogInputType::IceParam5,
        "MUD_DENSITY" => HomogInputType::MudDensity,
        "MUD_THICKNESS" => HomogInputType::MudThickness,
        "MUD_VISCOSITY" => HomogInputType::MudViscosity,
        _ => return None,
    };
    Some(input)
}

fn homog_inputs(composition: &Composition, role: &str) -> BTreeMap<&'static str, i64> {
    let mut counts = BTreeMap::new();
    if let Some(collection) = composition.collection(role) {
        for instance in collection.instances() {
            if let Some(Choice::HomogInput(input)) = instance.get_choice("NAME") {
                *counts.entry(input.token()).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// `HOMOG_COUNT%N_<TYPE>` must match the number of `HOMOG_INPUT(i)`
/// instances named `<TYPE>`. An undeclared count is zero.
#[derive(Debug, Clone, Copy)]
pub struct HomogCount {
    pub count_role: &'static str,
    pub input_role: &'static str,
}

impl HomogCount {
    pub const fn new(count_role: &'static str, input_role: &'static str) -> Self {
        Self {
            count_role,
            input_role,
        }
    }
}

impl ConsistencyRule for HomogCount {
    fn name(&self) -> &'static str {
        "homog_count"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let declared = composition.entity(self.count_role);
        if declared.is_none() && !composition.is_registered(self.input_role) {
            return Vec::new();
        }
        let actual = homog_inputs(composition, self.input_role);
        let mut findings = Vec::new();
        for input in HomogInputType::iter() {
            let field = format!("N_{}", input.token());
            let expected = declared
                .and_then(|entity| entity.get_integer(&field))
                .unwrap_or(0);
            let found = actual.get(input.token()).copied().unwrap_or(0);
            if expected != found {
                findings.push(Finding::new(
                    self.name(),
                    format!(
                        "HOMOG_COUNT%{} = {}, but {} holds {} {} input(s)",
                        field,
                        expected,
                        self.input_role,
                        found,
                        input.token()
                    ),
                ));
            }
        }
        findings
    }
}

/// Every `ww3_shel` forcing selector set to `H` needs a homogeneous input
/// of the matching type.
#[derive(Debug, Clone, Copy)]
pub struct HomogForcing;

impl ConsistencyRule for HomogForcing {
    fn name(&self) -> &'static str {
        "homog_forcing"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let forcing = match composition
            .entity(SHEL_INPUT)
            .and_then(|input| input.get("FORCING"))
            .and_then(|forcing| forcing.as_group())
        {
            Some(forcing) => forcing,
            None => return Vec::new(),
        };
        let available = homog_inputs(composition, SHEL_HOMOG_INPUT);
        forcing
            .iter()
            .filter(|(_, value)| {
                value.as_choice() == Some(Choice::Forcing(ForcingSelector::Homogeneous))
            })
            .filter_map(|(name, _)| forcing_input_type(name).map(|input| (name, input)))
            .filter(|(_, input)| !available.contains_key(input.token()))
            .map(|(name, input)| {
                Finding::new(
                    self.name(),
                    format!(
                        "INPUT%FORCING%{} = 'H' but no HOMOG_INPUT is named {}",
                        name,
                        input.token()
                    ),
                )
            })
            .collect()
    }
}

/// A spherical rectilinear grid spanning the globe must close periodically.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicClosure;

impl ConsistencyRule for PeriodicClosure {
    fn name(&self) -> &'static str {
        "periodic_closure"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let (grid, rect) = match (composition.entity(GRID_GRID), composition.entity(GRID_RECT)) {
            (Some(grid), Some(rect)) => (grid, rect),
            _ => return Vec::new(),
        };
        if grid.get_choice("TYPE") != Some(Choice::GridType(GridType::Rectilinear))
            || grid.get_choice("COORD") != Some(Choice::Coordinate(Coordinate::Spherical))
        {
            return Vec::new();
        }
        let (nx, sx) = match (rect.get_integer("NX"), rect.get_real("SX")) {
            (Some(nx), Some(sx)) => (nx, sx),
            _ => return Vec::new(),
        };
        let sf = rect.get_real("SF").unwrap_or(1.0);
        if sf == 0.0 {
            return Vec::new();
        }
        let span = nx as f64 * sx / sf;
        if (span - GLOBE_SPAN).abs() > SPAN_TOLERANCE {
            return Vec::new();
        }
        if grid.get_choice("CLOS") == Some(Choice::Closure(Closure::Periodic)) {
            return Vec::new();
        }
        let clos = grid.get("CLOS").map(|v| v.to_string()).unwrap_or_default();
        vec![Finding::new(
            self.name(),
            format!(
                "RECT grid spans {} degrees of longitude but GRID%CLOS is {}, expected 'SMPL'",
                span, clos
            ),
        )]
    }
}

/// `GRID%TYPE` selects exactly one of the RECT, CURV and UNST blocks.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout;

impl ConsistencyRule for GridLayout {
    fn name(&self) -> &'static str {
        "grid_layout"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let grid_type = match composition.entity(GRID_GRID).and_then(|g| g.get_choice("TYPE")) {
            Some(Choice::GridType(grid_type)) => grid_type,
            _ => return Vec::new(),
        };
        let layouts = [
            (GridType::Rectilinear, GRID_RECT),
            (GridType::Curvilinear, GRID_CURV),
            (GridType::Unstructured, GRID_UNST),
        ];
        let token: &'static str = grid_type.into();
        let mut findings = Vec::new();
        for (layout, role) in layouts {
            let registered = composition.is_registered(role);
            if layout == grid_type && !registered {
                findings.push(Finding::new(
                    self.name(),
                    format!("GRID%TYPE = '{}' requires {}", token, role),
                ));
            } else if layout != grid_type && registered {
                findings.push(Finding::new(
                    self.name(),
                    format!("{} is registered but GRID%TYPE = '{}'", role, token),
                ));
            }
        }
        findings
    }
}

/// Ratios between the four time steps of `TIMESTEPS_NML`.
#[derive(Debug, Clone, Copy)]
pub struct TimestepRatio;

impl ConsistencyRule for TimestepRatio {
    fn name(&self) -> &'static str {
        "timestep_ratio"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let steps = match composition.entity(GRID_TIMESTEPS) {
            Some(steps) => steps,
            None => return Vec::new(),
        };
        let get = |name| steps.get_real(name);
        let mut findings = Vec::new();

        if let (Some(dtmax), Some(dtxy)) = (get("DTMAX"), get("DTXY")) {
            let target = 3.0 * dtxy;
            if (dtmax - target).abs() > 0.1 * target {
                findings.push(Finding::new(
                    self.name(),
                    format!("DTMAX = {} should be about 3 x DTXY = {}", dtmax, target),
                ));
            }
        }
        if let (Some(dtmax), Some(dtkth)) = (get("DTMAX"), get("DTKTH")) {
            if dtkth < dtmax / 10.0 || dtkth > dtmax / 2.0 {
                findings.push(Finding::new(
                    self.name(),
                    format!(
                        "DTKTH = {} must lie between DTMAX/10 = {} and DTMAX/2 = {}",
                        dtkth,
                        dtmax / 10.0,
                        dtmax / 2.0
                    ),
                ));
            }
        }
        if let Some(dtmin) = get("DTMIN") {
            if dtmin <= 0.0 || dtmin > MAX_DTMIN {
                findings.push(Finding::new(
                    self.name(),
                    format!("DTMIN = {} must lie in (0, {}] seconds", dtmin, MAX_DTMIN),
                ));
            }
        }
        findings
    }
}

/// Runs end after they start; output windows do not end before they start.
#[derive(Debug, Clone, Copy)]
pub struct RunWindow;

impl RunWindow {
    fn check_domain(&self, role: &str, domain: &Entity, findings: &mut Vec<Finding>) {
        if let (Some(start), Some(stop)) = (domain.get_date("START"), domain.get_date("STOP")) {
            if stop <= start {
                findings.push(Finding::new(
                    self.name(),
                    format!("{}: STOP {} is not after START {}", role, stop, start),
                ));
            }
        }
    }

    fn check_outputs(&self, role: &str, dates: &Entity, findings: &mut Vec<Finding>) {
        for (name, value) in dates.fields().iter() {
            let window = match value.as_group() {
                Some(window) => window,
                None => continue,
            };
            let start = window.get("START").and_then(|v| v.as_date());
            let stop = window.get("STOP").and_then(|v| v.as_date());
            if let (Some(start), Some(stop)) = (start, stop) {
                if stop < start {
                    findings.push(Finding::new(
                        self.name(),
                        format!(
                            "{}: {}%STOP {} is before {}%START {}",
                            role, name, stop, name, start
                        ),
                    ));
                }
            }
        }
    }
}

impl ConsistencyRule for RunWindow {
    fn name(&self) -> &'static str {
        "run_window"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let mut findings = Vec::new();
        for role in [SHEL_DOMAIN, MULTI_DOMAIN] {
            if let Some(domain) = composition.entity(role) {
                self.check_domain(role, domain, &mut findings);
            }
        }
        for role in [SHEL_OUTPUT_DATE, MULTI_OUTPUT_DATE] {
            if let Some(dates) = composition.entity(role) {
                self.check_outputs(role, dates, &mut findings);
            }
        }
        findings
    }
}

/// `ww3_prnc` processes exactly one forcing field per run.
#[derive(Debug, Clone, Copy)]
pub struct PrncField;

impl ConsistencyRule for PrncField {
    fn name(&self) -> &'static str {
        "prnc_field"
    }

    fn check(&self, composition: &Composition) -> Vec<Finding> {
        let fields = match composition
            .entity(PRNC_FORCING)
            .and_then(|forcing| forcing.get("FIELD"))
            .and_then(|field| field.as_group())
        {
            Some(fields) => fields,
            None => return Vec::new(),
        };
        let selected: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_flag() == Some(true))
            .map(|(name, _)| *name)
            .collect();
        if selected.len() == 1 {
            return Vec::new();
        }
        vec![Finding::new(
            self.name(),
            format!(
                "FORCING%FIELD must select exactly one field, found {} ({})",
                selected.len(),
                selected.join(", ")
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, common, grid, post, shel};
    use ww3nml::{Collection, Entity};

    fn findings(composition: &Composition, rule: &str) -> Vec<Finding> {
        composition
            .validate_consistency()
            .into_iter()
            .filter(|f| f.rule == rule)
            .collect()
    }

    fn shel_input(winds: &str) -> Entity {
        Entity::builder(&shel::INPUT)
            .set("FORCING%WINDS", winds)
            .build()
            .unwrap()
    }

    fn homog(names: &[&str]) -> Collection {
        let instances = names
            .iter()
            .map(|name| {
                Entity::builder(&common::HOMOG_INPUT)
                    .set("NAME", *name)
                    .set("DATE", "20230101 000000")
                    .set("VALUE1", 5.0)
                    .build()
                    .unwrap()
            })
            .collect();
        Collection::new(&common::HOMOG_INPUTS, instances).unwrap()
    }

    fn shel_bundle() -> Composition {
        Composition::new(catalog::catalog(), &[catalog::WW3_SHEL]).unwrap()
    }

    #[test]
    fn test_forcing_input_type() {
        assert_eq!(forcing_input_type("winds"), Some(HomogInputType::Winds));
        assert_eq!(forcing_input_type("ICE_PARAM3"), Some(HomogInputType::IceParam3));
        assert_eq!(forcing_input_type("MEAN"), None);
    }

    #[test]
    fn test_homog_forcing_needs_matching_input() {
        let mut bundle = shel_bundle();
        bundle.register(SHEL_INPUT, shel_input("H")).unwrap();
        let found = findings(&bundle, "homog_forcing");
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("WND"));

        bundle.register(SHEL_HOMOG_INPUT, homog(&["WND"])).unwrap();
        assert!(findings(&bundle, "homog_forcing").is_empty());
    }

    #[test]
    fn test_external_forcing_needs_no_homog_input() {
        let mut bundle = shel_bundle();
        bundle.register(SHEL_INPUT, shel_input("T")).unwrap();
        assert!(findings(&bundle, "homog_forcing").is_empty());
    }

    #[test]
    fn test_homog_count_matches_inputs() {
        let mut bundle = shel_bundle();
        bundle
            .register(SHEL_HOMOG_INPUT, homog(&["WND", "WND", "CUR"]))
            .unwrap();
        // No counts declared at all: both types are reported.
        assert_eq!(findings(&bundle, "homog_count").len(), 2);

        let counts = Entity::builder(&common::HOMOG_COUNT)
            .set("N_WND", 2)
            .set("N_CUR", 1)
            .build()
            .unwrap();
        bundle.register(catalog::SHEL_HOMOG_COUNT, counts.clone()).unwrap();
        assert!(findings(&bundle, "homog_count").is_empty());

        bundle
            .replace(catalog::SHEL_HOMOG_COUNT, counts.with("N_ICE", 1).unwrap())
            .unwrap();
        let found = findings(&bundle, "homog_count");
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("N_ICE"));
    }

    fn grid_block(clos: &str) -> Entity {
        Entity::builder(&grid::GRID)
            .set("NAME", "global")
            .set("TYPE", "RECT")
            .set("COORD", "SPHE")
            .set("CLOS", clos)
            .build()
            .unwrap()
    }

    fn rect(nx: i64, sx: f64) -> Entity {
        Entity::builder(&grid::RECT)
            .set("NX", nx)
            .set("NY", 181)
            .set("SX", sx)
            .set("SY", 1.0)
            .set("X0", 0.0)
            .set("Y0", -90.0)
            .build()
            .unwrap()
    }

    fn grid_bundle(grid: Entity, rect: Entity) -> Composition {
        let mut bundle = Composition::new(catalog::catalog(), &[catalog::WW3_GRID]).unwrap();
        bundle.register(GRID_GRID, grid).unwrap();
        bundle.register(GRID_RECT, rect).unwrap();
        bundle
    }

    #[test]
    fn test_global_grid_needs_periodic_closure() {
        let bundle = grid_bundle(grid_block("NONE"), rect(360, 1.0));
        assert_eq!(findings(&bundle, "periodic_closure").len(), 1);

        let bundle = grid_bundle(grid_block("SMPL"), rect(360, 1.0));
        assert!(findings(&bundle, "periodic_closure").is_empty());

        let bundle = grid_bundle(grid_block("NONE"), rect(100, 1.0));
        assert!(findings(&bundle, "periodic_closure").is_empty());
    }

    #[test]
    fn test_grid_layout() {
        let mut bundle = grid_bundle(grid_block("SMPL"), rect(360, 1.0));
        assert!(findings(&bundle, "grid_layout").is_empty());

        let curv = Entity::builder(&grid::CURV)
            .set("NX", 10)
            .set("NY", 10)
            .set("XCOORD%FILENAME", "x.inp")
            .set("YCOORD%FILENAME", "y.inp")
            .build()
            .unwrap();
        bundle.register(GRID_CURV, curv).unwrap();
        assert_eq!(findings(&bundle, "grid_layout").len(), 1);

        let mut bundle = Composition::new(catalog::catalog(), &[catalog::WW3_GRID]).unwrap();
        bundle
            .register(GRID_GRID, grid_block("NONE").with("TYPE", "UNST").unwrap())
            .unwrap();
        let found = findings(&bundle, "grid_layout");
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains(GRID_UNST));
    }

    fn timesteps(dtmax: f64, dtxy: f64, dtkth: f64, dtmin: f64) -> Composition {
        let steps = Entity::builder(&grid::TIMESTEPS)
            .set("DTMAX", dtmax)
            .set("DTXY", dtxy)
            .set("DTKTH", dtkth)
            .set("DTMIN", dtmin)
            .build()
            .unwrap();
        let mut bundle = Composition::new(catalog::catalog(), &[catalog::WW3_GRID]).unwrap();
        bundle.register(GRID_TIMESTEPS, steps).unwrap();
        bundle
    }

    #[test]
    fn test_timestep_ratio() {
        assert!(findings(&timesteps(900.0, 300.0, 300.0, 10.0), "timestep_ratio").is_empty());
        assert_eq!(findings(&timesteps(900.0, 200.0, 300.0, 10.0), "timestep_ratio").len(), 1);
        assert_eq!(findings(&timesteps(900.0, 300.0, 50.0, 10.0), "timestep_ratio").len(), 1);
        assert_eq!(findings(&timesteps(900.0, 300.0, 300.0, 30.0), "timestep_ratio").len(), 1);
    }

    #[test]
    fn test_run_window() {
        let domain = Entity::builder(&shel::DOMAIN)
            .set("START", "20230107 000000")
            .set("STOP", "20230101 000000")
            .build()
            .unwrap();
        let dates = Entity::builder(&shel::OUTPUT_DATE)
            .set("FIELD%START", "20230101 000000")
            .set("FIELD%STRIDE", "1h")
            .set("FIELD%STOP", "20230107 000000")
            .set("RESTART%START", "20230107 000000")
            .set("RESTART%STRIDE", 0)
            .set("RESTART%STOP", "20230101 000000")
            .build()
            .unwrap();
        let mut bundle = shel_bundle();
        bundle.register(SHEL_DOMAIN, domain).unwrap();
        bundle.register(SHEL_OUTPUT_DATE, dates).unwrap();
        let found = findings(&bundle, "run_window");
        assert_eq!(found.len(), 2);
        assert!(found[1].message.contains("RESTART%STOP"));
    }

    #[test]
    fn test_prnc_selects_one_field() {
        let forcing = |flags: &[&str]| {
            let mut builder = Entity::builder(&post::PRNC_FORCING);
            builder.set("FIELD%WINDS", false);
            for flag in flags {
                builder.set(&format!("FIELD%{}", flag), true);
            }
            builder.build().unwrap()
        };
        let bundle_with = |entity: Entity| {
            let mut bundle = Composition::new(catalog::catalog(), &[catalog::WW3_PRNC]).unwrap();
            bundle.register(PRNC_FORCING, entity).unwrap();
            bundle
        };
        assert!(findings(&bundle_with(forcing(&["WINDS"])), "prnc_field").is_empty());
        assert_eq!(findings(&bundle_with(forcing(&[])), "prnc_field").len(), 1);
        assert_eq!(
            findings(&bundle_with(forcing(&["WINDS", "CURRENTS"])), "prnc_field").len(),
            1
        );
    }
}
