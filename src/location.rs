//! Normalization of location records coming out of the CMS.
//!
//! A record carries its coordinates either as decimal degrees or as a pair of DMS strings,
//! distinguished by `coordinateFormat`. Everything that wants a point on a map should go through
//! `process_location_coordinates`, which never fails loudly: a record that can't be turned into a
//! valid coordinate simply yields `None`.

use crate::{
    coordinates::{validate_coordinates, DecimalCoordinate},
    dms::dms_string_to_decimal,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// How the coordinates of a `LocationRecord` are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateFormat {
    Dms,
    // Unrecognized formats are treated as decimal
    #[serde(other)]
    Decimal,
}

impl Default for CoordinateFormat {
    fn default() -> Self {
        CoordinateFormat::Decimal
    }
}

/// A location as stored in the CMS. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub name: Option<String>,
    pub coordinate_format: Option<CoordinateFormat>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "latitudeDMS")]
    pub latitude_dms: Option<String>,
    #[serde(rename = "longitudeDMS")]
    pub longitude_dms: Option<String>,
}

impl LocationRecord {
    pub fn decimal(latitude: f64, longitude: f64) -> Self {
        LocationRecord {
            coordinate_format: Some(CoordinateFormat::Decimal),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }

    pub fn dms(latitude: &str, longitude: &str) -> Self {
        LocationRecord {
            coordinate_format: Some(CoordinateFormat::Dms),
            latitude_dms: Some(latitude.to_string()),
            longitude_dms: Some(longitude.to_string()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn format(&self) -> CoordinateFormat {
        self.coordinate_format.unwrap_or_default()
    }
}

/// Turn a location record into a valid decimal coordinate. Returns `None` if a field is missing,
/// a DMS string doesn't parse, or the resulting pair is out of range.
pub fn process_location_coordinates(location: &LocationRecord) -> Option<DecimalCoordinate> {
    let (latitude, longitude) = match location.format() {
        CoordinateFormat::Dms => (
            location.latitude_dms.as_deref().and_then(dms_string_to_decimal),
            location.longitude_dms.as_deref().and_then(dms_string_to_decimal),
        ),
        CoordinateFormat::Decimal => (location.latitude, location.longitude),
    };

    let (latitude, longitude) = (latitude?, longitude?);
    if validate_coordinates(latitude, longitude) {
        Some(DecimalCoordinate::new(latitude, longitude))
    } else {
        None
    }
}

fn process_logged(idx: usize, loc: &LocationRecord) -> Option<DecimalCoordinate> {
    let coord = process_location_coordinates(loc);
    if coord.is_none() {
        warn!(
            index = idx,
            location = loc.name.as_deref().unwrap_or("<unnamed>"),
            format = ?loc.format(),
            "skipping location with invalid coordinates"
        );
    }
    coord
}

/// Process a batch of records, keeping the index of every record that produced a coordinate.
/// Records that don't are logged and skipped.
pub fn process_locations(locations: &[LocationRecord]) -> Vec<(usize, DecimalCoordinate)> {
    locations
        .iter()
        .enumerate()
        .filter_map(|(idx, loc)| process_logged(idx, loc).map(|coord| (idx, coord)))
        .collect()
}

/// Decode a single raw JSON value into a `LocationRecord`. A value with badly typed fields (e.g.
/// `"latitude": "18.9"`) is logged and yields `None`.
pub fn decode_location(idx: usize, value: &Value) -> Option<LocationRecord> {
    match LocationRecord::deserialize(value) {
        Ok(loc) => Some(loc),
        Err(e) => {
            warn!(index = idx, error = %e, "skipping undecodable location record");
            None
        }
    }
}

/// Process raw JSON location values, one result per input. Values that don't decode into a
/// `LocationRecord` are treated like any other unusable record.
pub fn process_location_values(values: &[Value]) -> Vec<Option<DecimalCoordinate>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| decode_location(idx, value).and_then(|loc| process_logged(idx, &loc)))
        .collect()
}
