//! Unit conversion utilities
//!
//! Speeds are configured in mm/s but G-code feed words are mm/min.
//! Rotation angles are stored in radians.

/// Convert a speed in mm/s to a G-code feed rate in mm/min
pub fn feed_rate(mm_per_sec: f64) -> f64 {
    mm_per_sec * 60.0
}

/// Convert degrees to radians
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert radians to degrees
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}
