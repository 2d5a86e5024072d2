pub use std::f64::consts::PI;

/// Acceleration due to gravity in m/s2.
pub const G: f64 = 9.81;

/// Density of sea water in kg/m3.
pub const SEA_WATER_DENSITY: f64 = 1025.0;
