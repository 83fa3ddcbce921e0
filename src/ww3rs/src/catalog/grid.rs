// ww3rs/src/catalog/grid.rs

//! `ww3_grid` blocks.

use super::common::INPUT_FILE;
use ww3nml::field::{Check, ChoiceKind, DefaultValue, FieldKind, FieldSpec};
use ww3nml::Schema;

pub static SPECTRUM: Schema = Schema::new(
    "SPECTRUM_NML",
    "SPECTRUM",
    &[
        FieldSpec::optional("XFR", FieldKind::Real)
            .with_default(DefaultValue::Real(1.1))
            .with_check(Check::Greater(1.0)),
        FieldSpec::required("FREQ1", FieldKind::Real).with_check(Check::Positive),
        FieldSpec::required("NK", FieldKind::Integer).with_check(Check::Greater(2.0)),
        FieldSpec::required("NTH", FieldKind::Integer).with_check(Check::Greater(3.0)),
    ],
);

pub static RUN: Schema = Schema::new(
    "RUN_NML",
    "RUN",
    &[
        FieldSpec::optional("FLDRY", FieldKind::Flag),
        FieldSpec::optional("FLCX", FieldKind::Flag),
        FieldSpec::optional("FLCY", FieldKind::Flag),
        FieldSpec::optional("FLCTH", FieldKind::Flag),
        FieldSpec::optional("FLCK", FieldKind::Flag),
        FieldSpec::optional("FLSOU", FieldKind::Flag),
    ],
);

/// All four steps in seconds.
pub static TIMESTEPS: Schema = Schema::new(
    "TIMESTEPS_NML",
    "TIMESTEPS",
    &[
        FieldSpec::required("DTMAX", FieldKind::Real).with_check(Check::Positive),
        FieldSpec::required("DTXY", FieldKind::Real).with_check(Check::Positive),
        FieldSpec::required("DTKTH", FieldKind::Real).with_check(Check::Positive),
        FieldSpec::required("DTMIN", FieldKind::Real).with_check(Check::Positive),
    ],
);

pub static GRID: Schema = Schema::new(
    "GRID_NML",
    "GRID",
    &[
        FieldSpec::required("NAME", FieldKind::Text),
        FieldSpec::optional("NML", FieldKind::Path),
        FieldSpec::required("TYPE", FieldKind::Choice(ChoiceKind::GridType)),
        FieldSpec::required("COORD", FieldKind::Choice(ChoiceKind::Coordinate)),
        FieldSpec::optional("CLOS", FieldKind::Choice(ChoiceKind::Closure))
            .with_default(DefaultValue::Text("NONE")),
        FieldSpec::optional("ZLIM", FieldKind::Real),
        FieldSpec::optional("DMIN", FieldKind::Real).with_check(Check::NonNegative),
    ],
);

/// `SX`/`SY` are divided by `SF`, and `X0`/`Y0` by `SF0`.
pub static RECT: Schema = Schema::new(
    "RECT_NML",
    "RECT",
    &[
        FieldSpec::required("NX", FieldKind::Integer).with_check(Check::Greater(2.0)),
        FieldSpec::required("NY", FieldKind::Integer).with_check(Check::Greater(2.0)),
        FieldSpec::required("SX", FieldKind::Real).with_check(Check::Positive),
        FieldSpec::required("SY", FieldKind::Real).with_check(Check::Positive),
        FieldSpec::optional("SF", FieldKind::Real)
            .with_default(DefaultValue::Real(1.0))
            .with_check(Check::Positive),
        FieldSpec::required("X0", FieldKind::Real),
        FieldSpec::required("Y0", FieldKind::Real),
        FieldSpec::optional("SF0", FieldKind::Real)
            .with_default(DefaultValue::Real(1.0))
            .with_check(Check::Positive),
    ],
);

const COORD_FILE: &[FieldSpec] = &[
    FieldSpec::optional("SF", FieldKind::Real),
    FieldSpec::optional("OFF", FieldKind::Real),
    FieldSpec::required("FILENAME", FieldKind::Path),
    FieldSpec::optional("IDF", FieldKind::Integer).with_check(Check::Positive),
    FieldSpec::optional("IDLA", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3, 4])),
    FieldSpec::optional("IDFM", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3])),
    FieldSpec::optional("FORMAT", FieldKind::Text),
];

pub static CURV: Schema = Schema::new(
    "CURV_NML",
    "CURV",
    &[
        FieldSpec::required("NX", FieldKind::Integer).with_check(Check::Greater(2.0)),
        FieldSpec::required("NY", FieldKind::Integer).with_check(Check::Greater(2.0)),
        FieldSpec::required("XCOORD", FieldKind::Group(COORD_FILE)),
        FieldSpec::required("YCOORD", FieldKind::Group(COORD_FILE)),
    ],
);

pub static UNST: Schema = Schema::new(
    "UNST_NML",
    "UNST",
    &[
        FieldSpec::optional("SF", FieldKind::Real),
        FieldSpec::required("FILENAME", FieldKind::Path),
        FieldSpec::optional("IDF", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("IDLA", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3, 4])),
        FieldSpec::optional("IDFM", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3])),
        FieldSpec::optional("FORMAT", FieldKind::Text),
        FieldSpec::optional("UGOBCFILE", FieldKind::Path),
    ],
);

pub static DEPTH: Schema = Schema::new("DEPTH_NML", "DEPTH", INPUT_FILE);

pub static MASK: Schema = Schema::new(
    "MASK_NML",
    "MASK",
    &[
        FieldSpec::required("FILENAME", FieldKind::Path),
        FieldSpec::optional("IDF", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("IDLA", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3, 4])),
        FieldSpec::optional("IDFM", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3])),
        FieldSpec::optional("FORMAT", FieldKind::Text),
    ],
);

pub static OBST: Schema = Schema::new("OBST_NML", "OBST", INPUT_FILE);
