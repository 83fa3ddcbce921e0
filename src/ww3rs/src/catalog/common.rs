// ww3rs/src/catalog/common.rs

//! Field groups shared by several programs.

use ww3nml::field::{Check, ChoiceKind, FieldKind, FieldSpec};
use ww3nml::{CollectionSchema, Schema};

const SELECTOR: FieldKind = FieldKind::Choice(ChoiceKind::Forcing);

/// Grid input file description (`SF`, `FILENAME`, `IDF`, `IDLA`, `IDFM`, `FORMAT`).
pub const INPUT_FILE: &[FieldSpec] = &[
    FieldSpec::optional("SF", FieldKind::Real),
    FieldSpec::required("FILENAME", FieldKind::Path),
    FieldSpec::optional("IDF", FieldKind::Integer).with_check(Check::Positive),
    FieldSpec::optional("IDLA", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3, 4])),
    FieldSpec::optional("IDFM", FieldKind::Integer).with_check(Check::OneOf(&[1, 2, 3])),
    FieldSpec::optional("FORMAT", FieldKind::Text),
];

/// `START` / `STRIDE` / `STOP` output window.
pub const DATE_WINDOW: &[FieldSpec] = &[
    FieldSpec::optional("START", FieldKind::Date),
    FieldSpec::optional("STRIDE", FieldKind::Seconds).with_check(Check::NonNegative),
    FieldSpec::optional("STOP", FieldKind::Date),
];

/// Sub-grid window of partition output.
pub const PARTITION: &[FieldSpec] = &[
    FieldSpec::optional("X0", FieldKind::Integer),
    FieldSpec::optional("XN", FieldKind::Integer),
    FieldSpec::optional("NX", FieldKind::Integer),
    FieldSpec::optional("Y0", FieldKind::Integer),
    FieldSpec::optional("YN", FieldKind::Integer),
    FieldSpec::optional("NY", FieldKind::Integer),
    FieldSpec::optional("FORMAT", FieldKind::Flag),
];

/// Forcing fields of a single-grid run, each a forcing selector.
pub const SELECTED_FORCING: &[FieldSpec] = &[
    FieldSpec::optional("WATER_LEVELS", SELECTOR),
    FieldSpec::optional("CURRENTS", SELECTOR),
    FieldSpec::optional("WINDS", SELECTOR),
    FieldSpec::optional("ATM_MOMENTUM", SELECTOR),
    FieldSpec::optional("AIR_DENSITY", SELECTOR),
    FieldSpec::optional("ICE_CONC", SELECTOR),
    FieldSpec::optional("ICE_PARAM1", SELECTOR),
    FieldSpec::optional("ICE_PARAM2", SELECTOR),
    FieldSpec::optional("ICE_PARAM3", SELECTOR),
    FieldSpec::optional("ICE_PARAM4", SELECTOR),
    FieldSpec::optional("ICE_PARAM5", SELECTOR),
    FieldSpec::optional("MUD_DENSITY", SELECTOR),
    FieldSpec::optional("MUD_THICKNESS", SELECTOR),
    FieldSpec::optional("MUD_VISCOSITY", SELECTOR),
];

pub const SELECTED_ASSIM: &[FieldSpec] = &[
    FieldSpec::optional("MEAN", SELECTOR),
    FieldSpec::optional("SPEC1D", SELECTOR),
    FieldSpec::optional("SPEC2D", SELECTOR),
];

/// Per-type counts of homogeneous inputs, `N_<TYPE>`.
pub static HOMOG_COUNT: Schema = Schema::new(
    "HOMOG_COUNT_NML",
    "HOMOG_COUNT",
    &[
        FieldSpec::optional("N_IC1", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_IC2", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_IC3", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_IC4", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_IC5", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_MDN", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_MTH", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_MVS", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_LEV", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_CUR", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_WND", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_ICE", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_TAU", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_RHO", FieldKind::Integer).with_check(Check::NonNegative),
        FieldSpec::optional("N_MOV", FieldKind::Integer).with_check(Check::NonNegative),
    ],
);

pub static HOMOG_INPUT: Schema = Schema::new(
    "HOMOG_INPUT_NML",
    "HOMOG_INPUT",
    &[
        FieldSpec::required("NAME", FieldKind::Choice(ChoiceKind::HomogInput)),
        FieldSpec::required("DATE", FieldKind::Date),
        FieldSpec::required("VALUE1", FieldKind::Real),
        FieldSpec::optional("VALUE2", FieldKind::Real),
        FieldSpec::optional("VALUE3", FieldKind::Real),
    ],
);

pub static HOMOG_INPUTS: CollectionSchema = CollectionSchema::new(&HOMOG_INPUT);
