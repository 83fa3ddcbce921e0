// ww3rs/src/catalog/mod.rs

//! The WAVEWATCH III role table: every block of every supported program,
//! in the order it is written to that program's control file.

pub mod common;
pub mod grid;
pub mod multi;
pub mod post;
pub mod shel;

use crate::rules;
use ww3nml::{Catalog, DeclaredCount, RoleSpec};

pub const GRID_SPECTRUM: &str = "grid.spectrum";
pub const GRID_RUN: &str = "grid.run";
pub const GRID_TIMESTEPS: &str = "grid.timesteps";
pub const GRID_GRID: &str = "grid.grid";
pub const GRID_RECT: &str = "grid.rect";
pub const GRID_CURV: &str = "grid.curv";
pub const GRID_UNST: &str = "grid.unst";
pub const GRID_DEPTH: &str = "grid.depth";
pub const GRID_MASK: &str = "grid.mask";
pub const GRID_OBST: &str = "grid.obst";

pub const SHEL_DOMAIN: &str = "shel.domain";
pub const SHEL_INPUT: &str = "shel.input";
pub const SHEL_OUTPUT_TYPE: &str = "shel.output_type";
pub const SHEL_OUTPUT_DATE: &str = "shel.output_date";
pub const SHEL_HOMOG_COUNT: &str = "shel.homog_count";
pub const SHEL_HOMOG_INPUT: &str = "shel.homog_input";

pub const MULTI_DOMAIN: &str = "multi.domain";
pub const MULTI_INPUT: &str = "multi.input";
pub const MULTI_MODEL: &str = "multi.model";
pub const MULTI_OUTPUT_TYPE: &str = "multi.output_type";
pub const MULTI_OUTPUT_DATE: &str = "multi.output_date";
pub const MULTI_HOMOG_COUNT: &str = "multi.homog_count";
pub const MULTI_HOMOG_INPUT: &str = "multi.homog_input";

pub const PRNC_FORCING: &str = "prnc.forcing";
pub const PRNC_FILE: &str = "prnc.file";
pub const OUNF_FIELD: &str = "ounf.field";
pub const OUNF_FILE: &str = "ounf.file";
pub const OUNP_POINT: &str = "ounp.point";
pub const OUNP_FILE: &str = "ounp.file";
pub const BOUNC_BOUND: &str = "bounc.bound";

pub const WW3_GRID: &str = "ww3_grid";
pub const WW3_SHEL: &str = "ww3_shel";
pub const WW3_MULTI: &str = "ww3_multi";
pub const WW3_PRNC: &str = "ww3_prnc";
pub const WW3_OUNF: &str = "ww3_ounf";
pub const WW3_OUNP: &str = "ww3_ounp";
pub const WW3_BOUNC: &str = "ww3_bounc";

pub static ROLES: &[RoleSpec] = &[
    RoleSpec::single(GRID_SPECTRUM, WW3_GRID, &grid::SPECTRUM, true),
    RoleSpec::single(GRID_RUN, WW3_GRID, &grid::RUN, true),
    RoleSpec::single(GRID_TIMESTEPS, WW3_GRID, &grid::TIMESTEPS, true),
    RoleSpec::single(GRID_GRID, WW3_GRID, &grid::GRID, true),
    RoleSpec::single(GRID_RECT, WW3_GRID, &grid::RECT, false),
    RoleSpec::single(GRID_CURV, WW3_GRID, &grid::CURV, false),
    RoleSpec::single(GRID_UNST, WW3_GRID, &grid::UNST, false),
    RoleSpec::single(GRID_DEPTH, WW3_GRID, &grid::DEPTH, true),
    RoleSpec::single(GRID_MASK, WW3_GRID, &grid::MASK, false),
    RoleSpec::single(GRID_OBST, WW3_GRID, &grid::OBST, false),
    RoleSpec::single(SHEL_DOMAIN, WW3_SHEL, &shel::DOMAIN, true),
    RoleSpec::single(SHEL_INPUT, WW3_SHEL, &shel::INPUT, true),
    RoleSpec::single(SHEL_OUTPUT_TYPE, WW3_SHEL, &shel::OUTPUT_TYPE, true),
    RoleSpec::single(SHEL_OUTPUT_DATE, WW3_SHEL, &shel::OUTPUT_DATE, true),
    RoleSpec::single(SHEL_HOMOG_COUNT, WW3_SHEL, &common::HOMOG_COUNT, false),
    RoleSpec::collection(SHEL_HOMOG_INPUT, WW3_SHEL, &common::HOMOG_INPUTS, false),
    RoleSpec::single(MULTI_DOMAIN, WW3_MULTI, &multi::DOMAIN, true),
    RoleSpec::collection(MULTI_INPUT, WW3_MULTI, &multi::INPUT_GRIDS, false),
    RoleSpec::collection(MULTI_MODEL, WW3_MULTI, &multi::MODEL_GRIDS, true),
    RoleSpec::single(MULTI_OUTPUT_TYPE, WW3_MULTI, &multi::OUTPUT_TYPE, true),
    RoleSpec::single(MULTI_OUTPUT_DATE, WW3_MULTI, &multi::OUTPUT_DATE, true),
    RoleSpec::single(MULTI_HOMOG_COUNT, WW3_MULTI, &common::HOMOG_COUNT, false),
    RoleSpec::collection(MULTI_HOMOG_INPUT, WW3_MULTI, &common::HOMOG_INPUTS, false),
    RoleSpec::single(PRNC_FORCING, WW3_PRNC, &post::PRNC_FORCING, true),
    RoleSpec::single(PRNC_FILE, WW3_PRNC, &post::PRNC_FILE, true),
    RoleSpec::single(OUNF_FIELD, WW3_OUNF, &post::OUNF_FIELD, true),
    RoleSpec::single(OUNF_FILE, WW3_OUNF, &post::OUNF_FILE, true),
    RoleSpec::single(OUNP_POINT, WW3_OUNP, &post::OUNP_POINT, true),
    RoleSpec::single(OUNP_FILE, WW3_OUNP, &post::OUNP_FILE, true),
    RoleSpec::single(BOUNC_BOUND, WW3_BOUNC, &post::BOUND, true),
];

/// The WW3 catalog with every cross-block rule attached.
pub fn catalog() -> Catalog {
    Catalog::new(ROLES)
        .with_rule(DeclaredCount::new(MULTI_DOMAIN, "NRINP", MULTI_INPUT))
        .with_rule(DeclaredCount::new(MULTI_DOMAIN, "NRGRD", MULTI_MODEL))
        .with_rule(rules::HomogCount::new(SHEL_HOMOG_COUNT, SHEL_HOMOG_INPUT))
        .with_rule(rules::HomogCount::new(MULTI_HOMOG_COUNT, MULTI_HOMOG_INPUT))
        .with_rule(rules::HomogForcing)
        .with_rule(rules::PeriodicClosure)
        .with_rule(rules::GridLayout)
        .with_rule(rules::TimestepRatio)
        .with_rule(rules::RunWindow)
        .with_rule(rules::PrncField)
}
