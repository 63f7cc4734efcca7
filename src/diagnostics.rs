//! Accuracy checks of the DMS conversion pipeline against known landmarks.

use crate::dms::dms_string_to_decimal;
use serde::Serialize;

/// Maximum absolute error (in degrees) tolerated on either axis by default.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// A reference point with a known DMS form and decimal position.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Landmark {
    pub name: &'static str,
    pub latitude_dms: &'static str,
    pub longitude_dms: &'static str,
    pub expected_latitude: f64,
    pub expected_longitude: f64,
}

pub const LANDMARKS: &[Landmark] = &[
    Landmark {
        name: "Mumbai reference point",
        latitude_dms: "18° 58' 3.59\" N",
        longitude_dms: "72° 48' 20.99\" E",
        expected_latitude: 18.967664,
        expected_longitude: 72.805831,
    },
    Landmark {
        name: "Gateway of India",
        latitude_dms: "18° 55' 18\" N",
        longitude_dms: "72° 50' 6\" E",
        expected_latitude: 18.9217,
        expected_longitude: 72.8350,
    },
    Landmark {
        name: "Taj Mahal",
        latitude_dms: "27° 10' 30\" N",
        longitude_dms: "78° 2' 32\" E",
        expected_latitude: 27.175,
        expected_longitude: 78.042,
    },
];

/// Outcome of converting a single landmark.
#[derive(Debug, Clone, Serialize)]
pub struct LandmarkCheck {
    pub name: &'static str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub latitude_error: Option<f64>,
    pub longitude_error: Option<f64>,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccuracyReport {
    pub tolerance: f64,
    pub checks: Vec<LandmarkCheck>,
}

impl AccuracyReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

pub fn check_landmark(landmark: &Landmark, tolerance: f64) -> LandmarkCheck {
    let latitude = dms_string_to_decimal(landmark.latitude_dms);
    let longitude = dms_string_to_decimal(landmark.longitude_dms);
    let latitude_error = latitude.map(|x| (x - landmark.expected_latitude).abs());
    let longitude_error = longitude.map(|x| (x - landmark.expected_longitude).abs());

    let passed = match (latitude_error, longitude_error) {
        (Some(lat), Some(lon)) => lat <= tolerance && lon <= tolerance,
        _ => false,
    };

    LandmarkCheck {
        name: landmark.name,
        latitude,
        longitude,
        latitude_error,
        longitude_error,
        passed,
    }
}

/// Run every entry of `LANDMARKS` through the conversion pipeline.
pub fn run_accuracy_check(tolerance: f64) -> AccuracyReport {
    let checks = LANDMARKS
        .iter()
        .map(|l| check_landmark(l, tolerance))
        .collect();
    AccuracyReport { tolerance, checks }
}
