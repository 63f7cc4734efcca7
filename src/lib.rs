#![forbid(unsafe_code)]

pub mod coordinates;
pub mod diagnostics;
pub mod distance;
pub mod dms;
pub mod location;
pub mod parse;
pub mod version;

pub use coordinates::{validate_coordinates, DecimalCoordinate};
pub use distance::calculate_distance;
pub use dms::{
    decimal_to_dms, dms_string_to_decimal, dms_to_decimal, format_dms_string, parse_dms_string,
    Axis, DMSCoordinate, DMSError, Direction,
};
pub use location::{
    process_location_coordinates, process_location_values, process_locations, CoordinateFormat,
    LocationRecord,
};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
