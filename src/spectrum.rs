//! One-sided Bretschneider spectrum.
//!
//! Ref: Proceedings of the 23rd ITTC - Vol II, Table A.2, A.3.
//!
//! S(f) = (A/f^5) exp(-B/f^4)
//! A = alpha g^2 (2 PI)^-4
//! B = 4 alpha g^2 / [(2 PI)^4 H_s^2]
//! f_p = 0.946 B^(1/4)

use crate::constants::{G, PI};

/// Phillips constant.
pub const PHILLIPS_ALPHA: f64 = 0.0081;

/// Lower frequency cut-off as a multiple of the peak frequency (0.1% energy).
pub const MIN_FREQUENCY_FACTOR: f64 = 0.652;

/// Upper frequency cut-off as a multiple of the peak frequency (99.9% energy).
pub const MAX_FREQUENCY_FACTOR: f64 = 5.946;

fn coefficient_a() -> f64 {
    PHILLIPS_ALPHA * G * G * (2.0 * PI).powf(-4.0)
}

fn coefficient_b(significant_wave_height: f64) -> f64 {
    let h_s = significant_wave_height;
    4.0 * PHILLIPS_ALPHA * G * G / ((2.0 * PI).powf(4.0) * h_s * h_s)
}

/// Spectral peak frequency, in Hz, for a significant wave height in m.
pub fn peak_spectral_frequency(significant_wave_height: f64) -> f64 {
    0.946 * coefficient_b(significant_wave_height).powf(0.25)
}

/// Spectral energy density, in m2/Hz, at frequency `f`.
pub fn spectral_density(frequency: f64, significant_wave_height: f64) -> f64 {
    let a = coefficient_a();
    let b = coefficient_b(significant_wave_height);
    (a / frequency.powf(5.0)) * (-b / frequency.powf(4.0)).exp()
}

/// Amplitude of the regular wave carrying the energy of a band of width
/// `band_width` centred on `frequency`.
pub fn band_amplitude(frequency: f64, band_width: f64, significant_wave_height: f64) -> f64 {
    let s = spectral_density(frequency, significant_wave_height) * band_width;
    (2.0 * s).sqrt()
}
