//! Coordinates in signed decimal degrees.

use crate::{
    distance::calculate_distance,
    dms::{Axis, DMSCoordinate},
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_LATITUDE: f64 = 90.;
pub const MAX_LONGITUDE: f64 = 180.;

/// Returns `true` if the latitude is within [-90, 90] and the longitude within [-180, 180]. Both
/// ends of each range are inclusive; NaN is never valid.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    (-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude)
        && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimalCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl DecimalCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        DecimalCoordinate {
            latitude,
            longitude,
        }
    }

    /// Like `new`, but returns `None` if either value is out of range.
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        if validate_coordinates(latitude, longitude) {
            Some(Self::new(latitude, longitude))
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        validate_coordinates(self.latitude, self.longitude)
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_to(&self, other: &DecimalCoordinate) -> f64 {
        calculate_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Convert both halves of the coordinate to DMS.
    pub fn to_dms(&self) -> (DMSCoordinate, DMSCoordinate) {
        (
            DMSCoordinate::from_decimal(self.latitude, Axis::Latitude),
            DMSCoordinate::from_decimal(self.longitude, Axis::Longitude),
        )
    }
}

impl fmt::Display for DecimalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
