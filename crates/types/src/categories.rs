//! Closed categorical enumerations for case records.
//!
//! Every enumeration exposes:
//! - `ALL`, the full closed set in display order
//! - `as_str`, the canonical kebab-case wire string
//! - `FromStr`, strict parsing of the canonical string
//!
//! Wire encoding lives in the API layer, which renders these through `Display`.

use crate::CategoryError;
use std::fmt;
use std::str::FromStr;

fn parse_from<T: Copy>(
    kind: &'static str,
    all: &[T],
    as_str: fn(T) -> &'static str,
    input: &str,
) -> Result<T, CategoryError> {
    all.iter()
        .copied()
        .find(|candidate| as_str(*candidate) == input)
        .ok_or_else(|| CategoryError::Unknown {
            kind,
            value: input.to_string(),
        })
}

// ============================================================================
// CancerSubtype
// ============================================================================

/// Lymphoma subtype recorded against a case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CancerSubtype {
    HodgkinLymphoma,
    DiffuseLargeBCell,
    BurkittLymphoma,
    FollicularLymphoma,
    MantleCellLymphoma,
    MarginalZoneLymphoma,
    TCellLymphoma,
    Other,
}

impl CancerSubtype {
    pub const ALL: [CancerSubtype; 8] = [
        CancerSubtype::HodgkinLymphoma,
        CancerSubtype::DiffuseLargeBCell,
        CancerSubtype::BurkittLymphoma,
        CancerSubtype::FollicularLymphoma,
        CancerSubtype::MantleCellLymphoma,
        CancerSubtype::MarginalZoneLymphoma,
        CancerSubtype::TCellLymphoma,
        CancerSubtype::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CancerSubtype::HodgkinLymphoma => "hodgkin-lymphoma",
            CancerSubtype::DiffuseLargeBCell => "diffuse-large-b-cell",
            CancerSubtype::BurkittLymphoma => "burkitt-lymphoma",
            CancerSubtype::FollicularLymphoma => "follicular-lymphoma",
            CancerSubtype::MantleCellLymphoma => "mantle-cell-lymphoma",
            CancerSubtype::MarginalZoneLymphoma => "marginal-zone-lymphoma",
            CancerSubtype::TCellLymphoma => "t-cell-lymphoma",
            CancerSubtype::Other => "other",
        }
    }
}

impl FromStr for CancerSubtype {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("cancer subtype", &Self::ALL, Self::as_str, s)
    }
}

// ============================================================================
// Region
// ============================================================================

/// Geographic region a case was submitted from.
///
/// [`Region::Unknown`] is the explicit sentinel for submitters without a known region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    UsNortheast,
    UsSoutheast,
    UsMidwest,
    UsSouthwest,
    UsWest,
    Canada,
    Uk,
    Europe,
    AsiaPacific,
    Unknown,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::UsNortheast,
        Region::UsSoutheast,
        Region::UsMidwest,
        Region::UsSouthwest,
        Region::UsWest,
        Region::Canada,
        Region::Uk,
        Region::Europe,
        Region::AsiaPacific,
        Region::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::UsNortheast => "us-northeast",
            Region::UsSoutheast => "us-southeast",
            Region::UsMidwest => "us-midwest",
            Region::UsSouthwest => "us-southwest",
            Region::UsWest => "us-west",
            Region::Canada => "canada",
            Region::Uk => "uk",
            Region::Europe => "europe",
            Region::AsiaPacific => "asia-pacific",
            Region::Unknown => "unknown",
        }
    }
}

impl FromStr for Region {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("region", &Self::ALL, Self::as_str, s)
    }
}

// ============================================================================
// AgeRange
// ============================================================================

/// Decade bucket for the patient's age at admission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeRange {
    Under10,
    Teens,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    Sixties,
    Seventies,
    Eighties,
    NinetyPlus,
}

impl AgeRange {
    pub const ALL: [AgeRange; 10] = [
        AgeRange::Under10,
        AgeRange::Teens,
        AgeRange::Twenties,
        AgeRange::Thirties,
        AgeRange::Forties,
        AgeRange::Fifties,
        AgeRange::Sixties,
        AgeRange::Seventies,
        AgeRange::Eighties,
        AgeRange::NinetyPlus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeRange::Under10 => "0-9",
            AgeRange::Teens => "10-19",
            AgeRange::Twenties => "20-29",
            AgeRange::Thirties => "30-39",
            AgeRange::Forties => "40-49",
            AgeRange::Fifties => "50-59",
            AgeRange::Sixties => "60-69",
            AgeRange::Seventies => "70-79",
            AgeRange::Eighties => "80-89",
            AgeRange::NinetyPlus => "90+",
        }
    }
}

impl FromStr for AgeRange {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("age range", &Self::ALL, Self::as_str, s)
    }
}

// ============================================================================
// Sex
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sex {
    Female,
    Male,
    Intersex,
    NotStated,
}

impl Sex {
    pub const ALL: [Sex; 4] = [Sex::Female, Sex::Male, Sex::Intersex, Sex::NotStated];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Intersex => "intersex",
            Sex::NotStated => "not-stated",
        }
    }
}

impl FromStr for Sex {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("sex", &Self::ALL, Self::as_str, s)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Treatment outcome at last follow-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    CompleteRemission,
    PartialRemission,
    StableDisease,
    ProgressiveDisease,
    Relapsed,
    Deceased,
    Unknown,
}

impl Outcome {
    pub const ALL: [Outcome; 7] = [
        Outcome::CompleteRemission,
        Outcome::PartialRemission,
        Outcome::StableDisease,
        Outcome::ProgressiveDisease,
        Outcome::Relapsed,
        Outcome::Deceased,
        Outcome::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::CompleteRemission => "complete-remission",
            Outcome::PartialRemission => "partial-remission",
            Outcome::StableDisease => "stable-disease",
            Outcome::ProgressiveDisease => "progressive-disease",
            Outcome::Relapsed => "relapsed",
            Outcome::Deceased => "deceased",
            Outcome::Unknown => "unknown",
        }
    }
}

impl FromStr for Outcome {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("outcome", &Self::ALL, Self::as_str, s)
    }
}

// ============================================================================
// Shared conversions
// ============================================================================

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(CancerSubtype, Region, AgeRange, Sex, Outcome);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subtype_round_trips_through_its_wire_string() {
        for subtype in CancerSubtype::ALL {
            let parsed: CancerSubtype = subtype.as_str().parse().expect("known subtype");
            assert_eq!(parsed, subtype);
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        let err = "Hodgkin-Lymphoma"
            .parse::<CancerSubtype>()
            .expect_err("uppercase rejected");
        assert_eq!(
            err,
            CategoryError::Unknown {
                kind: "cancer subtype",
                value: "Hodgkin-Lymphoma".into()
            }
        );
    }

    #[test]
    fn unknown_region_reports_kind_and_value() {
        let err = "atlantis".parse::<Region>().expect_err("unknown region");
        assert_eq!(err.to_string(), "unknown region value: 'atlantis'");
    }

    #[test]
    fn age_range_uses_decade_strings() {
        assert_eq!("40-49".parse::<AgeRange>().unwrap(), AgeRange::Forties);
        assert_eq!("90+".parse::<AgeRange>().unwrap(), AgeRange::NinetyPlus);
        assert!("40-50".parse::<AgeRange>().is_err());
    }

    #[test]
    fn sex_parses_only_canonical_strings() {
        assert_eq!("not-stated".parse::<Sex>().unwrap(), Sex::NotStated);
        assert!("unspecified".parse::<Sex>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Region::AsiaPacific.to_string(), "asia-pacific");
        assert_eq!(CancerSubtype::DiffuseLargeBCell.to_string(), "diffuse-large-b-cell");
    }
}
