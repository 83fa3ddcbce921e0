// ww3rs/src/catalog/shel.rs

//! `ww3_shel` blocks. Homogeneous input blocks live in [`super::common`].

use super::common::{DATE_WINDOW, PARTITION, SELECTED_ASSIM, SELECTED_FORCING};
use ww3nml::field::{Check, DefaultValue, FieldKind, FieldSpec};
use ww3nml::Schema;

pub static DOMAIN: Schema = Schema::new(
    "DOMAIN_NML",
    "DOMAIN",
    &[
        FieldSpec::optional("IOSTYP", FieldKind::Integer)
            .with_default(DefaultValue::Integer(1))
            .with_check(Check::OneOf(&[0, 1, 2, 3])),
        FieldSpec::required("START", FieldKind::Date),
        FieldSpec::required("STOP", FieldKind::Date),
    ],
);

/// Forcing and assimilation sources; every entry is a selector
/// (`F`, `T`, `H` or `C`), never a flag.
pub static INPUT: Schema = Schema::new(
    "INPUT_NML",
    "INPUT",
    &[
        FieldSpec::optional("FORCING", FieldKind::Group(SELECTED_FORCING)),
        FieldSpec::optional("ASSIM", FieldKind::Group(SELECTED_ASSIM)),
    ],
);

pub static OUTPUT_TYPE: Schema = Schema::new(
    "OUTPUT_TYPE_NML",
    "TYPE",
    &[
        FieldSpec::optional(
            "FIELD",
            FieldKind::Group(&[FieldSpec::optional("LIST", FieldKind::Text)]),
        ),
        FieldSpec::optional(
            "POINT",
            FieldKind::Group(&[FieldSpec::optional("FILE", FieldKind::Path)]),
        ),
        FieldSpec::optional(
            "TRACK",
            FieldKind::Group(&[FieldSpec::optional("FORMAT", FieldKind::Flag)]),
        ),
        FieldSpec::optional("PARTITION", FieldKind::Group(PARTITION)),
        FieldSpec::optional(
            "COUPLING",
            FieldKind::Group(&[
                FieldSpec::optional("SENT", FieldKind::Text),
                FieldSpec::optional("RECEIVED", FieldKind::Text),
            ]),
        ),
        FieldSpec::optional(
            "RESTART",
            FieldKind::Group(&[FieldSpec::optional("EXTRA", FieldKind::Text)]),
        ),
    ],
);

pub static OUTPUT_DATE: Schema = Schema::new(
    "OUTPUT_DATE_NML",
    "DATE",
    &[
        FieldSpec::optional("FIELD", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("POINT", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("TRACK", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("RESTART", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("RESTART2", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("BOUNDARY", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("PARTITION", FieldKind::Group(DATE_WINDOW)),
        FieldSpec::optional("COUPLING", FieldKind::Group(DATE_WINDOW)),
    ],
);
