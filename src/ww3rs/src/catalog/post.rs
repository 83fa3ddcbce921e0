// ww3rs/src/catalog/post.rs

//! Pre- and post-processor blocks: `ww3_prnc`, `ww3_ounf`, `ww3_ounp`, `ww3_bounc`.

use ww3nml::field::{Check, ChoiceKind, DefaultValue, FieldKind, FieldSpec};
use ww3nml::Schema;

/// Forcing fields `ww3_prnc` can process; exactly one must be set.
pub const PRNC_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("ICE_PARAM1", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM2", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM3", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM4", FieldKind::Flag),
    FieldSpec::optional("ICE_PARAM5", FieldKind::Flag),
    FieldSpec::optional("MUD_DENSITY", FieldKind::Flag),
    FieldSpec::optional("MUD_THICKNESS", FieldKind::Flag),
    FieldSpec::optional("MUD_VISCOSITY", FieldKind::Flag),
    FieldSpec::optional("WATER_LEVELS", FieldKind::Flag),
    FieldSpec::optional("CURRENTS", FieldKind::Flag),
    FieldSpec::optional("WINDS", FieldKind::Flag),
    FieldSpec::optional("WINDS_AST", FieldKind::Flag),
    FieldSpec::optional("ATM_MOMENTUM", FieldKind::Flag),
    FieldSpec::optional("AIR_DENSITY", FieldKind::Flag),
    FieldSpec::optional("ICE_CONC", FieldKind::Flag),
];

pub static PRNC_FORCING: Schema = Schema::new(
    "FORCING_NML",
    "FORCING",
    &[
        FieldSpec::optional("TIMESTART", FieldKind::Date),
        FieldSpec::optional("TIMESTOP", FieldKind::Date),
        FieldSpec::required("FIELD", FieldKind::Group(PRNC_FIELDS)),
        FieldSpec::optional(
            "GRID",
            FieldKind::Group(&[
                FieldSpec::optional("ASIS", FieldKind::Flag),
                FieldSpec::optional("LATLON", FieldKind::Flag),
            ]),
        ),
    ],
);

/// `TIMESHIFT` is an offset in the date layout (`'00000000 000000'` is valid),
/// so it is text rather than a date.
pub static PRNC_FILE: Schema = Schema::new(
    "FILE_NML",
    "FILE",
    &[
        FieldSpec::required("FILENAME", FieldKind::Path),
        FieldSpec::required("LONGITUDE", FieldKind::Text),
        FieldSpec::required("LATITUDE", FieldKind::Text),
        FieldSpec::required("VAR", FieldKind::List(&FieldKind::Text)),
        FieldSpec::optional("TIMESHIFT", FieldKind::Text),
    ],
);

pub static OUNF_FIELD: Schema = Schema::new(
    "FIELD_NML",
    "FIELD",
    &[
        FieldSpec::required("TIMESTART", FieldKind::Date),
        FieldSpec::required("TIMESTRIDE", FieldKind::Seconds).with_check(Check::Positive),
        FieldSpec::optional("TIMECOUNT", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("TIMESPLIT", FieldKind::Integer)
            .with_check(Check::OneOf(&[0, 4, 6, 8, 10])),
        FieldSpec::optional("LIST", FieldKind::Text),
        FieldSpec::optional("PARTITION", FieldKind::Text),
        FieldSpec::optional("SAMEFILE", FieldKind::Flag),
        FieldSpec::optional("TYPE", FieldKind::Integer).with_check(Check::OneOf(&[2, 3, 4])),
    ],
);

pub static OUNF_FILE: Schema = Schema::new(
    "FILE_NML",
    "FILE",
    &[
        FieldSpec::optional("PREFIX", FieldKind::Text).with_default(DefaultValue::Text("ww3.")),
        FieldSpec::optional("NETCDF", FieldKind::Integer).with_check(Check::OneOf(&[3, 4])),
        FieldSpec::optional("IX0", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("IXN", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("IY0", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("IYN", FieldKind::Integer).with_check(Check::Positive),
    ],
);

pub static OUNP_POINT: Schema = Schema::new(
    "POINT_NML",
    "POINT",
    &[
        FieldSpec::required("TIMESTART", FieldKind::Date),
        FieldSpec::required("TIMESTRIDE", FieldKind::Seconds).with_check(Check::Positive),
        FieldSpec::optional("TIMECOUNT", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("TIMESPLIT", FieldKind::Integer)
            .with_check(Check::OneOf(&[0, 4, 6, 8, 10])),
        FieldSpec::optional("LIST", FieldKind::Text),
        FieldSpec::optional("SAMEFILE", FieldKind::Flag),
        FieldSpec::optional("BUFFER", FieldKind::Integer).with_check(Check::Positive),
        FieldSpec::optional("TYPE", FieldKind::Integer).with_check(Check::OneOf(&[0, 1, 2, 3, 4])),
        FieldSpec::optional("DIMORDER", FieldKind::Flag),
    ],
);

pub static OUNP_FILE: Schema = Schema::new(
    "FILE_NML",
    "FILE",
    &[
        FieldSpec::optional("PREFIX", FieldKind::Text).with_default(DefaultValue::Text("ww3.")),
        FieldSpec::optional("NETCDF", FieldKind::Integer).with_check(Check::OneOf(&[3, 4])),
    ],
);

pub static BOUND: Schema = Schema::new(
    "BOUND_NML",
    "BOUND",
    &[
        FieldSpec::required("MODE", FieldKind::Choice(ChoiceKind::BoundMode)),
        FieldSpec::optional("INTERP", FieldKind::Integer).with_check(Check::OneOf(&[1, 2])),
        FieldSpec::optional("VERBOSE", FieldKind::Integer).with_check(Check::OneOf(&[0, 1, 2])),
        FieldSpec::optional("FILE", FieldKind::Path),
    ],
);
