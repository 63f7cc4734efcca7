//! WebAssembly bindings for the `libcoords` crate.

use crate::{coordinates, distance, dms, location, LocationRecord};
use wasm_bindgen::prelude::*;

/// Convert a DMS string to decimal degrees. Returns `undefined` if the string can't be parsed.
#[wasm_bindgen]
pub fn dms_string_to_decimal(input: &str) -> Option<f64> {
    dms::dms_string_to_decimal(input)
}

/// Format a decimal coordinate as a DMS string, e.g. `18° 55' 18.00" N`.
#[wasm_bindgen]
pub fn decimal_to_dms_string(decimal: f64, is_latitude: bool) -> String {
    dms::decimal_to_dms(decimal, is_latitude).to_string()
}

#[wasm_bindgen]
pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    coordinates::validate_coordinates(latitude, longitude)
}

/// Haversine distance in kilometers.
#[wasm_bindgen]
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance::calculate_distance(lat1, lon1, lat2, lon2)
}

/// Normalize a single location record into `{latitude, longitude}`, or `null` if the record
/// doesn't carry a usable coordinate.
#[wasm_bindgen]
pub fn process_location_coordinates(record: &JsValue) -> Result<JsValue, JsValue> {
    // A record that doesn't even deserialize has no usable coordinate either
    let record: LocationRecord = match record.into_serde() {
        Ok(r) => r,
        Err(_) => return Ok(JsValue::NULL),
    };

    match location::process_location_coordinates(&record) {
        Some(coord) => JsValue::from_serde(&coord)
            .map_err(|_| JsValue::from_str("Unable to convert result to JSON!")),
        None => Ok(JsValue::NULL),
    }
}

/// Normalize an array of location records. The result has one entry per input record, `null`
/// where the record was rejected, so that callers can line results up with their inputs.
#[wasm_bindgen]
pub fn process_locations(records: &JsValue) -> Result<JsValue, JsValue> {
    let records: Vec<serde_json::Value> = records
        .into_serde()
        .map_err(|e| JsValue::from_str(&format!("Expected an array of locations: {}", e)))?;

    let results = location::process_location_values(&records);

    JsValue::from_serde(&results).map_err(|_| JsValue::from_str("Unable to convert result to JSON!"))
}
