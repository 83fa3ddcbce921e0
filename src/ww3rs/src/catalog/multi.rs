// ww3rs/src/catalog/multi.rs

//! `ww3_multi` blocks.
//!
//! Unlike `ww3_shel`, the forcing entries of an input grid are plain
//! `T`/`F` flags, and each model grid names its forcing source as text
//! (`'native'`, `'no'` or an input grid name).

use super::common::{DATE_WINDOW, PARTITION};
use ww3nml::field::{Check, DefaultValue, FieldKind, FieldSpec};
use ww3nml::{CollectionSchema, Schema};

pub static DOMAIN: Schema = Schema::new(
    "DOMAIN_NML",
    "DOMAIN",
    &[
        FieldSpec::optional("NRINP", FieldKind::Integer)
            .with_default(DefaultValue::Integer(0))
            .with_check(Check::NonNegative),
        FieldSpec::optional("NRGRD", FieldKind::Integer)
            .with_default(DefaultValue::Integer(1))
            .with_check(Check::Positive),
        FieldSpec::optional("UNIPTS", FieldKind::Flag),
        FieldSpec::optional("IOSTYP", FieldKind::Integer)
            .with_default(DefaultValue::Integer(1))
            .with_check(Check::OneOf(&[0, 1, 2, 3])),
        FieldSpec::optional("UPPROC", FieldKind::Flag),
        FieldSpec::optional("PSHARE", FieldKind::Flag),
        FieldSpec::optional("FLGHG1", FieldKind::Flag),
        FieldSpec::optional("FLGHG2", FieldKind::Flag),
        FieldSpec::required("START", FieldKind::Date),
        FieldSpec::required("STOP", FieldKind::Date),
    ],
);

const INPUT_FORCING: &[FieldSpec] = &[
    FieldSpec::optional("WATER_LEVELS", FieldKind::Flag),
    FieldSpec::optional("CURRENTS", FieldKind::Flag),
    FieldSpec::optional("WINDS", FieldKind::Flag),
    FieldSpec::optional("ATM_MOMENTUM", FieldKind::Flag),
    FieldSpec::optional("AIR_DENSITY", FieldKind::Flag),
    FieldSpec::optional("ICE_CONC", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM1", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM2", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM3", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM4", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM5", FieldKind::Flag),
    FieldSpec::optional("MUD_DENSITY", FieldKind::Flag),
    FieldSpec::optional("MUD_THICKNESS", FieldKind::Flag),
    FieldSpec::optional("MUD_VISCOSITY", FieldKind::Flag),
];

const INPUT_ASSIM: &[FieldSpec] = &[
    FieldSpec::optional("MEAN", FieldKind::Flag),
    FieldSpec::optional("SPEC1D", FieldKind::Flag),
    FieldSpec::optional("SPEC2D", FieldKind::Flag),
];

pub static INPUT_GRID: Schema = Schema::new(
    "INPUT_GRID_NML",
    "INPUT",
    &[
        FieldSpec::required("NAME", FieldKind::Text),
        FieldSpec::optional("FORCING", FieldKind::Group(INPUT_FORCING)),
        FieldSpec::optional("ASSIM", FieldKind::Group(INPUT_ASSIM)),
    ],
);

pub static INPUT_GRIDS: CollectionSchema = CollectionSchema::new(&INPUT_GRID);

const MODEL_FORCING: &[FieldSpec] = &[
    FieldSpec::optional("WATER_LEVELS", FieldKind::Text),
    FieldSpec::optional("CURRENTS", FieldKind::Text),
    FieldSpec::optional("WINDS", FieldKind::Text),
    FieldSpec::optional("ATM_MOMENTUM", FieldKind::Text),
    FieldSpec::optional("AIR_DENSITY", FieldKind::Text),
    FieldSpec::optional("ICE_CONC", FieldKind::Text),
    FieldSpec::optional("ICE_PARAM1", FieldKind::Text),
    FieldSpec::optional("ICE_PARAM2", FieldKind::Text),
    FieldSpec::optional("ICE_PARAM3", FieldKind::Text),
    FieldSpec::optional("ICE_PARAM4", FieldKind::Text),
    FieldSpec::optional("ICE_PARAM5", FieldKind::Text),
    FieldSpec::optional("MUD_DENSITY", FieldKind::Text),
    FieldSpec::optional("MUD_THICKNESS", FieldKind::Text),
    FieldSpec::optional("MUD_VISCOSITY", FieldKind::Text),
];

const MODEL_ASSIM: &[FieldSpec] = &[
    FieldSpec::optional("MEAN", FieldKind::Text),
    FieldSpec::optional("SPEC1D", FieldKind::Text),
    FieldSpec::optional("SPEC2D", FieldKind::Text),
];

const RESOURCE: &[FieldSpec] = &[
    FieldSpec::optional("RANK_ID", FieldKind::Integer).with_check(Check::Positive),
    FieldSpec::optional("GROUP_ID", FieldKind::Integer).with_check(Check::Positive),
    FieldSpec::optional("COMM_FRAC", FieldKind::Real).with_check(Check::Range(0.0, 1.0)),
    FieldSpec::optional("BOUND_FLAG", FieldKind::Flag),
];

pub static MODEL_GRID: Schema = Schema::new(
    "MODEL_GRID_NML",
    "MODEL",
    &[
        FieldSpec::required("NAME", FieldKind::Text),
        FieldSpec::optional("FORCING", FieldKind::Group(MODEL_FORCING)),
        FieldSpec::optional("ASSIM", FieldKind::Group(MODEL_ASSIM)),
        FieldSpec::optional("RESOURCE", FieldKind::Group(RESOURCE)),
    ],
);

/// Model grids: `RANK_ID` must be unique and `COMM_FRAC` must partition 1.0.
pub static MODEL_GRIDS: CollectionSchema = CollectionSchema::new(&MODEL_GRID)
    .with_fraction("RESOURCE%COMM_FRAC")
    .with_rank("RESOURCE%RANK_ID");

pub static OUTPUT_TYPE: Schema = Schema::new(
    "OUTPUT_TYPE_NML",
    "ALLTYPE",
    &[
        FieldSpec::optional(
            "FIELD",
            FieldKind::Group(&[FieldSpec::optional("LIST", FieldKind::Text)]),
        ),
        FieldSpec::optional(
            "POINT",
            FieldKind::Group(&[
                FieldSpec::optional("NAME", FieldKind::Text),
                FieldSpec::optional("FILE", FieldKind::Path),
            ]),
        ),
        FieldSpec::optional(
            "TRACK",
            FieldKind::Group(&[FieldSpec::optional("FORMAT", FieldKind::Flag)]),
        ),
        FieldSpec::optional("PARTITION", FieldKind::Group(PARTITION)),
        FieldSpec::optional(
            "RESTART",
            FieldKind::Group(&[FieldSpec::optional("EXTRA", FieldKind::Text)]),
        ),
    ],
);

pub static OUTPUT_DATE: Schema = Schema::new(
    "OUTPUT_DATE_NML",
    "ALLDATE",
    &[
        FieldSpec::optional("FIELD", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("POINT", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("TRACK", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("RESTART", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("BOUNDARY", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("PARTITION", FieldKind::Group(DATE_WINDOW)),
    ],
);
