// ww3nml/src/field/choice.rs

//! Closed token sets for enumerated namelist fields.
//!
//! Every multi-valued field is a sum type from the start. A forcing
//! selector is never a boolean: `T` here means "external file", and the
//! binary `T`/`F` flags live in [`FieldKind::Flag`](super::FieldKind::Flag).

use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// How a forcing input is supplied to `ww3_shel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ForcingSelector {
    #[strum(serialize = "F")]
    Disabled,
    #[strum(serialize = "T")]
    External,
    #[strum(serialize = "H")]
    Homogeneous,
    #[strum(serialize = "C")]
    Coupled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum GridType {
    #[strum(serialize = "RECT")]
    Rectilinear,
    #[strum(serialize = "CURV")]
    Curvilinear,
    #[strum(serialize = "UNST")]
    Unstructured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Coordinate {
    #[strum(serialize = "SPHE")]
    Spherical,
    #[strum(serialize = "CART")]
    Cartesian,
}

/// Longitudinal closure of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Closure {
    #[strum(serialize = "NONE")]
    Open,
    /// Simple periodic closure.
    #[strum(serialize = "SMPL")]
    Periodic,
    #[strum(serialize = "TRPL")]
    Tripole,
}

/// Field carried by a homogeneous input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum HomogInputType {
    #[strum(serialize = "IC1")]
    IceParam1,
    #[strum(serialize = "IC2")]
    IceParam2,
    #[strum(serialize = "IC3")]
    IceParam3,
    #[strum(serialize = "IC4")]
    IceParam4,
    #[strum(serialize = "IC5")]
    IceParam5,
    #[strum(serialize = "MDN")]
    MudDensity,
    #[strum(serialize = "MTH")]
    MudThickness,
    #[strum(serialize = "MVS")]
    MudViscosity,
    #[strum(serialize = "LEV")]
    WaterLevels,
    #[strum(serialize = "CUR")]
    Currents,
    #[strum(serialize = "WND")]
    Winds,
    #[strum(serialize = "ICE")]
    IceConcentration,
    #[strum(serialize = "TAU")]
    AtmMomentum,
    #[strum(serialize = "RHO")]
    AirDensity,
    #[strum(serialize = "MOV")]
    MovingGrid,
}

impl HomogInputType {
    pub fn token(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum BoundMode {
    #[strum(serialize = "READ")]
    Read,
    #[strum(serialize = "WRITE")]
    Write,
}

/// Which closed token set a `Choice` field draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceKind {
    Forcing,
    GridType,
    Coordinate,
    Closure,
    HomogInput,
    BoundMode,
}

/// A canonical enumerated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Forcing(ForcingSelector),
    GridType(GridType),
    Coordinate(Coordinate),
    Closure(Closure),
    HomogInput(HomogInputType),
    BoundMode(BoundMode),
}

fn tokens_of<E>() -> Vec<&'static str>
where
    E: IntoEnumIterator + Into<&'static str>,
{
    E::iter().map(Into::into).collect()
}

impl ChoiceKind {
    /// Parse a token of this kind; `None` when the token is not a member.
    pub fn parse(self, token: &str) -> Option<Choice> {
        let token = token.trim();
        match self {
            ChoiceKind::Forcing => ForcingSelector::from_str(token).ok().map(Choice::Forcing),
            ChoiceKind::GridType => GridType::from_str(token).ok().map(Choice::GridType),
            ChoiceKind::Coordinate => Coordinate::from_str(token).ok().map(Choice::Coordinate),
            ChoiceKind::Closure => Closure::from_str(token).ok().map(Choice::Closure),
            ChoiceKind::HomogInput => HomogInputType::from_str(token).ok().map(Choice::HomogInput),
            ChoiceKind::BoundMode => BoundMode::from_str(token).ok().map(Choice::BoundMode),
        }
    }

    /// Every valid token, in declaration order.
    pub fn tokens(self) -> Vec<&'static str> {
        match self {
            ChoiceKind::Forcing => tokens_of::<ForcingSelector>(),
            ChoiceKind::GridType => tokens_of::<GridType>(),
            ChoiceKind::Coordinate => tokens_of::<Coordinate>(),
            ChoiceKind::Closure => tokens_of::<Closure>(),
            ChoiceKind::HomogInput => tokens_of::<HomogInputType>(),
            ChoiceKind::BoundMode => tokens_of::<BoundMode>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChoiceKind::Forcing => "forcing selector",
            ChoiceKind::GridType => "grid type",
            ChoiceKind::Coordinate => "coordinate system",
            ChoiceKind::Closure => "grid closure",
            ChoiceKind::HomogInput => "homogeneous input type",
            ChoiceKind::BoundMode => "boundary mode",
        }
    }
}

impl Choice {
    /// The external token, without quotes.
    pub fn token(&self) -> &'static str {
        match *self {
            Choice::Forcing(v) => v.into(),
            Choice::GridType(v) => v.into(),
            Choice::Coordinate(v) => v.into(),
            Choice::Closure(v) => v.into(),
            Choice::HomogInput(v) => v.into(),
            Choice::BoundMode(v) => v.into(),
        }
    }

    pub fn kind(&self) -> ChoiceKind {
        match self {
            Choice::Forcing(_) => ChoiceKind::Forcing,
            Choice::GridType(_) => ChoiceKind::GridType,
            Choice::Coordinate(_) => ChoiceKind::Coordinate,
            Choice::Closure(_) => ChoiceKind::Closure,
            Choice::HomogInput(_) => ChoiceKind::HomogInput,
            Choice::BoundMode(_) => ChoiceKind::BoundMode,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forcing_tokens() {
        assert_eq!(ChoiceKind::Forcing.tokens(), vec!["F", "T", "H", "C"]);
        assert_eq!(
            ChoiceKind::Forcing.parse("h"),
            Some(Choice::Forcing(ForcingSelector::Homogeneous))
        );
        assert_eq!(ChoiceKind::Forcing.parse("X"), None);
        assert_eq!(ChoiceKind::Forcing.parse("true"), None);
    }

    #[test]
    fn test_token_is_canonical_upper_case() {
        let closure = ChoiceKind::Closure.parse("smpl").unwrap();
        assert_eq!(closure.token(), "SMPL");
        assert_eq!(closure.kind(), ChoiceKind::Closure);
    }

    #[test]
    fn test_homog_input_tokens() {
        let tokens = ChoiceKind::HomogInput.tokens();
        assert_eq!(tokens.len(), 15);
        assert!(tokens.contains(&"WND"));
        assert_eq!(HomogInputType::MovingGrid.token(), "MOV");
    }
}
