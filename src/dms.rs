//! Parsing and conversion for degrees/minutes/seconds (DMS) coordinates.
//!
//! A DMS coordinate is written as
//!
//! ```text
//! <degrees>° <minutes>' <seconds>" <N|S|E|W>
//! ```
//!
//! Coordinates copied out of mapping tools frequently use the typographic prime (`′`) and
//! double prime (`″`) instead of straight quotes, so both are accepted. The seconds mark is
//! optional, as is whitespace between the components. A mark must follow its number directly.

use crate::{impl_parse_for_enum, parse};
use derive_try_from_primitive::TryFromPrimitive;
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1, one_of, space0},
    combinator::{all_consuming, map_res, opt, recognize},
    error::context,
    sequence::{pair, preceded, terminated, tuple},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// Characters accepted as the minutes mark.
pub const MINUTE_MARKS: &str = "'\u{2032}";
/// Characters accepted as the seconds mark.
pub const SECOND_MARKS: &str = "\"\u{2033}";

/// Compass direction attached to a DMS coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    N = 0x4e, // 'N'
    S = 0x53, // 'S'
    E = 0x45, // 'E'
    W = 0x57, // 'W'
}

impl_parse_for_enum!(Direction);

impl Direction {
    /// `N` and `S` describe a latitude; `E` and `W` a longitude.
    pub fn is_latitude(&self) -> bool {
        matches!(self, Direction::N | Direction::S)
    }

    /// Southern and western coordinates are negative in decimal degrees.
    pub fn is_negative(&self) -> bool {
        matches!(self, Direction::S | Direction::W)
    }

    pub fn axis(&self) -> Axis {
        if self.is_latitude() {
            Axis::Latitude
        } else {
            Axis::Longitude
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 as char)
    }
}

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn direction(&self, negative: bool) -> Direction {
        match (self, negative) {
            (Axis::Latitude, false) => Direction::N,
            (Axis::Latitude, true) => Direction::S,
            (Axis::Longitude, false) => Direction::E,
            (Axis::Longitude, true) => Direction::W,
        }
    }
}

/// Reasons a DMS string can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DMSError {
    #[error("malformed DMS coordinate: {0:?}")]
    Malformed(String),
    #[error("degrees out of range: {0} > 180")]
    DegreesOutOfRange(u16),
    #[error("latitude degrees out of range: {0} > 90")]
    LatitudeOutOfRange(u16),
    #[error("minutes out of range: {0} >= 60")]
    MinutesOutOfRange(u8),
    #[error("seconds out of range: {0} >= 60")]
    SecondsOutOfRange(f64),
}

/// A coordinate in degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DMSCoordinate {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
    pub direction: Direction,
}

/// Between `m` and `n` ASCII digits.
fn digits<'a>(m: usize, n: usize) -> impl Fn(parse::Input<'a>) -> parse::Result<'a, parse::Input<'a>> {
    take_while_m_n(m, n, |c: char| c.is_ascii_digit())
}

impl DMSCoordinate {
    /// Check the component ranges. Latitudes (`N`/`S`) are additionally limited to 90 degrees.
    pub fn validate(&self) -> Result<(), DMSError> {
        if self.degrees > 180 {
            return Err(DMSError::DegreesOutOfRange(self.degrees));
        }
        if self.minutes >= 60 {
            return Err(DMSError::MinutesOutOfRange(self.minutes));
        }
        if !(self.seconds < 60.) {
            return Err(DMSError::SecondsOutOfRange(self.seconds));
        }
        if self.direction.is_latitude() && self.degrees > 90 {
            return Err(DMSError::LatitudeOutOfRange(self.degrees));
        }
        Ok(())
    }

    /// Parse the syntax of a DMS coordinate without checking its ranges.
    fn parse_fields(i: parse::Input) -> parse::Result<Self> {
        let degrees = terminated(
            map_res(digits(1, 3), u16::from_str),
            char('°'),
        );
        let minutes = terminated(
            map_res(digits(1, 2), u8::from_str),
            one_of(MINUTE_MARKS),
        );
        let seconds = terminated(
            map_res(
                recognize(pair(digits(1, 2), opt(pair(char('.'), digit1)))),
                f64::from_str,
            ),
            opt(one_of(SECOND_MARKS)),
        );

        let (i, (degrees, minutes, seconds, direction)) = tuple((
            context("Degrees", preceded(space0, degrees)),
            context("Minutes", preceded(space0, minutes)),
            context("Seconds", preceded(space0, seconds)),
            context("Direction", preceded(space0, Direction::parse)),
        ))(i)?;

        let dms = DMSCoordinate {
            degrees,
            minutes,
            seconds,
            direction,
        };
        Ok((i, dms))
    }

    /// Parse a DMS coordinate, rejecting components that are out of range.
    pub fn parse(i: parse::Input) -> parse::Result<Self> {
        let parser = map_res(Self::parse_fields, |dms: DMSCoordinate| dms.validate().map(|_| dms));
        context("DMS coordinate", parser)(i)
    }

    /// Convert to signed decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        let decimal =
            self.degrees as f64 + self.minutes as f64 / 60. + self.seconds / 3600.;
        if self.direction.is_negative() {
            -decimal
        } else {
            decimal
        }
    }

    /// Mechanical inverse of `to_decimal`. Seconds are rounded to two decimal places.
    ///
    /// The input is not range-checked: `from_decimal(200., Axis::Latitude)` happily produces
    /// `200° 0' 0.00" N`. Use `validate` on the result (or `validate_coordinates` on the input)
    /// when that matters.
    pub fn from_decimal(decimal: f64, axis: Axis) -> Self {
        let abs = decimal.abs();
        let degrees = abs.floor();
        let minutes_float = (abs - degrees) * 60.;
        let minutes = minutes_float.floor();
        let seconds = ((minutes_float - minutes) * 60. * 100.).round() / 100.;

        DMSCoordinate {
            degrees: degrees as u16,
            minutes: minutes as u8,
            seconds,
            direction: axis.direction(decimal < 0.),
        }
    }
}

impl FromStr for DMSCoordinate {
    type Err = DMSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (_, dms) = all_consuming(Self::parse_fields)(s)
            .map_err(|_| DMSError::Malformed(s.to_string()))?;
        dms.validate()?;
        Ok(dms)
    }
}

impl fmt::Display for DMSCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}° {}' {:.2}\" {}",
            self.degrees, self.minutes, self.seconds, self.direction
        )
    }
}

/// Parse a DMS string such as `18° 55' 18" N`. Returns `None` for malformed or out-of-range
/// input.
pub fn parse_dms_string(input: &str) -> Option<DMSCoordinate> {
    match input.parse() {
        Ok(dms) => Some(dms),
        Err(e) => {
            debug!(input, error = %e, "rejected DMS coordinate");
            None
        }
    }
}

pub fn dms_to_decimal(dms: &DMSCoordinate) -> f64 {
    dms.to_decimal()
}

/// Parse a DMS string straight into decimal degrees.
pub fn dms_string_to_decimal(input: &str) -> Option<f64> {
    parse_dms_string(input).map(|dms| dms.to_decimal())
}

pub fn decimal_to_dms(decimal: f64, is_latitude: bool) -> DMSCoordinate {
    let axis = if is_latitude {
        Axis::Latitude
    } else {
        Axis::Longitude
    };
    DMSCoordinate::from_decimal(decimal, axis)
}

pub fn format_dms_string(dms: &DMSCoordinate) -> String {
    dms.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_parse_straight_quotes() {
        let dms = parse_dms_string("18° 55' 18\" N").unwrap();
        assert_eq!(dms.degrees, 18);
        assert_eq!(dms.minutes, 55);
        assert_eq!(dms.seconds, 18.);
        assert_eq!(dms.direction, Direction::N);
    }

    #[test]
    fn test_parse_variants() {
        // Typographic marks, as copied out of mapping tools
        let dms = parse_dms_string("72° 48′ 20.99″ E").unwrap();
        assert_eq!((dms.degrees, dms.minutes, dms.seconds), (72, 48, 20.99));
        assert_eq!(dms.direction, Direction::E);

        // Missing seconds mark, lowercase direction, surrounding whitespace
        let dms = parse_dms_string("  78° 2' 32 e \n").unwrap();
        assert_eq!((dms.degrees, dms.minutes, dms.seconds), (78, 2, 32.));
        assert_eq!(dms.direction, Direction::E);

        // No whitespace at all
        let dms = parse_dms_string("33°51'54\"S").unwrap();
        assert_eq!(dms.direction, Direction::S);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let bad = [
            "",
            "18° 55' 18\"",
            "18° 55' 18\" X",
            "18 55' 18\" N",
            "1234° 5' 6\" E",
            "18° 555' 18\" N",
            "18° 55' 18\" N extra",
            "18° 55' 18.\" N",
            "18° 55\" 18' N",
            "18 ° 55 ' 18 \" N",
            "18 ° 55' 18\" N",
            "18° 55 ' 18\" N",
            "18° 55' 18 \" N",
            "18° 55′ 18 ″ N",
        ];
        for s in bad.iter() {
            assert_eq!(parse_dms_string(s), None, "{:?} should be rejected", s);
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            "181° 0' 0\" E".parse::<DMSCoordinate>(),
            Err(DMSError::DegreesOutOfRange(181))
        );
        assert_eq!(
            "10° 60' 0\" E".parse::<DMSCoordinate>(),
            Err(DMSError::MinutesOutOfRange(60))
        );
        assert_eq!(
            "10° 0' 60\" E".parse::<DMSCoordinate>(),
            Err(DMSError::SecondsOutOfRange(60.))
        );
        assert_eq!(
            "91° 0' 0\" N".parse::<DMSCoordinate>(),
            Err(DMSError::LatitudeOutOfRange(91))
        );

        // 91 degrees is a perfectly good longitude, and 180 is the boundary
        assert!(parse_dms_string("91° 0' 0\" W").is_some());
        assert!(parse_dms_string("180° 0' 0\" W").is_some());
        assert!(parse_dms_string("90° 0' 0\" S").is_some());
        assert!(parse_dms_string("10° 59' 59.999\" N").is_some());
    }

    #[test]
    fn test_nom_parser_leaves_remaining_input() {
        let (rest, dms) = DMSCoordinate::parse("27° 10' 30\" N, 78° 2' 32\" E").unwrap();
        assert_eq!(rest, ", 78° 2' 32\" E");
        assert_eq!(dms.direction, Direction::N);

        assert!(DMSCoordinate::parse("95° 0' 0\" S").is_err());
    }

    #[test]
    fn test_dms_to_decimal() {
        let lat = dms_string_to_decimal("18° 58' 3.59\" N").unwrap();
        let lon = dms_string_to_decimal("72° 48' 20.99\" E").unwrap();
        assert!(close(lat, 18.967664, 0.01));
        assert!(close(lon, 72.805831, 0.01));

        assert!(close(dms_string_to_decimal("27° 10' 30\" N").unwrap(), 27.175, 1e-9));
        assert!(close(dms_string_to_decimal("78° 2' 32\" E").unwrap(), 78.042, 0.001));

        let south = dms_string_to_decimal("33° 51' 54\" S").unwrap();
        let west = dms_string_to_decimal("151° 12' 36\" W").unwrap();
        assert!(south < 0. && close(south, -33.865, 1e-9));
        assert!(west < 0. && close(west, -151.21, 1e-9));

        assert_eq!(dms_string_to_decimal("not a coordinate"), None);
    }

    #[test]
    fn test_decimal_to_dms() {
        let dms = decimal_to_dms(-33.865, true);
        assert_eq!((dms.degrees, dms.minutes), (33, 51));
        assert!(close(dms.seconds, 54., 1e-9));
        assert_eq!(dms.direction, Direction::S);

        let dms = DMSCoordinate::from_decimal(-151.21, Axis::Longitude);
        assert_eq!((dms.degrees, dms.minutes), (151, 12));
        assert_eq!(dms.direction, Direction::W);

        assert_eq!(decimal_to_dms(0., true).direction, Direction::N);
        assert_eq!(decimal_to_dms(0., false).direction, Direction::E);

        // No range checking happens here
        let dms = decimal_to_dms(200., true);
        assert_eq!(dms.degrees, 200);
        assert!(dms.validate().is_err());
    }

    #[test]
    fn test_format() {
        let dms = parse_dms_string("18° 55′ 18″ n").unwrap();
        assert_eq!(format_dms_string(&dms), "18° 55' 18.00\" N");

        let dms = decimal_to_dms(72.805831, false);
        assert_eq!(dms.to_string(), "72° 48' 20.99\" E");

        // Formatted output parses back to the same coordinate
        assert_eq!(parse_dms_string(&dms.to_string()), Some(dms));
    }

    #[test]
    fn test_direction_axis() {
        assert_eq!(Direction::N.axis(), Axis::Latitude);
        assert_eq!(Direction::S.axis(), Axis::Latitude);
        assert_eq!(Direction::E.axis(), Axis::Longitude);
        assert_eq!(Direction::W.axis(), Axis::Longitude);

        // The direction chosen by from_decimal always lies on the requested axis
        for &axis in [Axis::Latitude, Axis::Longitude].iter() {
            for &x in [-12.5, 0., 12.5].iter() {
                assert_eq!(DMSCoordinate::from_decimal(x, axis).direction.axis(), axis);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let s = "27° 10' 30\" N";
        assert_eq!(parse_dms_string(s), parse_dms_string(s));
        assert_eq!(decimal_to_dms(27.175, true), decimal_to_dms(27.175, true));
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn latitude_round_trip(lat in -90.0f64..=90.0) {
                let back = decimal_to_dms(lat, true).to_decimal();
                prop_assert!((back - lat).abs() <= 1e-4, "{} -> {}", lat, back);
            }

            #[test]
            fn longitude_round_trip(lon in -180.0f64..=180.0) {
                let back = decimal_to_dms(lon, false).to_decimal();
                prop_assert!((back - lon).abs() <= 1e-4, "{} -> {}", lon, back);
            }

            #[test]
            fn parse_never_panics(s in "\\PC{0,24}") {
                let _ = parse_dms_string(&s);
            }

            #[test]
            fn parsed_values_are_in_range(d in 0u16..200, m in 0u8..70, s in 0.0f64..70.0) {
                let input = format!("{}° {}' {:.2}\" N", d, m, s);
                if let Some(dms) = parse_dms_string(&input) {
                    prop_assert!(dms.degrees <= 90);
                    prop_assert!(dms.minutes < 60);
                    prop_assert!(dms.seconds < 60.);
                }
            }
        }
    }
}
