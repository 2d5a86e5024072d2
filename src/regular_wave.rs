use glam::DVec3;
use serde::Serialize;

use crate::constants::{G, PI, SEA_WATER_DENSITY};
use crate::error::{check_time, Error, Result};
use crate::geometry::normalise_angle_2pi;

/// A single sinusoidal wave train.
///
/// Fields are public for reading; build a new wave with [`RegularWave::new`]
/// rather than mutating one, since the derived quantities are only computed
/// on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegularWave {
    /// Wave amplitude in m.
    pub amplitude: f64,
    /// Wave frequency in Hz.
    pub frequency: f64,
    /// Phase lag in radians.
    pub phase_lag: f64,
    /// Direction of propagation w.r.t geographic north, clockwise positive,
    /// in [0, 2PI).
    pub heading: f64,
    /// Time period in s.
    pub time_period: f64,
    /// Wave length in m.
    pub wave_length: f64,
    /// Wave number in rad/m.
    pub wave_number: f64,
}

impl RegularWave {
    pub fn new(amplitude: f64, frequency: f64, phase_lag: f64, heading: f64) -> Result<Self> {
        // `!(x > 0.0)` also catches NaN
        let bad_amplitude = !(amplitude > 0.0) || !amplitude.is_finite();
        let bad_frequency = !(frequency > 0.0) || !frequency.is_finite();
        match (bad_amplitude, bad_frequency) {
            (true, true) => Err(Error::NonPositiveAmplitudeAndFrequency { amplitude, frequency }),
            (true, false) => Err(Error::NonPositiveAmplitude(amplitude)),
            (false, true) => Err(Error::NonPositiveFrequency(frequency)),
            (false, false) => {
                let time_period = 1.0 / frequency;
                let wave_length = G * time_period * time_period / (2.0 * PI);
                let wave_number = 2.0 * PI / wave_length;
                Ok(Self {
                    amplitude,
                    frequency,
                    phase_lag,
                    heading: normalise_angle_2pi(heading),
                    time_period,
                    wave_length,
                    wave_number,
                })
            }
        }
    }

    /// Same wave observed at a different (encounter) frequency.
    pub fn with_frequency(&self, frequency: f64) -> Result<Self> {
        Self::new(self.amplitude, frequency, self.phase_lag, self.heading)
    }

    /// Crest to trough height in m.
    pub fn height(&self) -> f64 {
        2.0 * self.amplitude
    }

    /// Phase, in radians, of the wave at a location and time.
    pub fn get_phase(&self, location: DVec3, time: f64) -> Result<f64> {
        check_time(time)?;
        // Headings are measured from north (y axis), hence sin for x and cos for y.
        let a = self.wave_number * (location.x * self.heading.sin() + location.y * self.heading.cos());
        let b = 2.0 * PI * self.frequency * time;
        Ok(a - b + self.phase_lag)
    }

    /// Surface elevation, in m, at a location and time.
    pub fn get_elevation(&self, location: DVec3, time: f64) -> Result<f64> {
        let phase = self.get_phase(location, time)?;
        Ok(self.amplitude * phase.cos())
    }

    /// Linear dynamic pressure, in Pa, at a location and time.
    pub fn get_wave_pressure(&self, location: DVec3, time: f64) -> Result<f64> {
        let phase = self.get_phase(location, time)?;
        Ok(-SEA_WATER_DENSITY * G * self.amplitude * phase.cos())
    }

    /// Dynamic pressure amplitude, in Pa, at depth `z` (negative below the still water line).
    pub fn get_pressure_amplitude(&self, z: f64) -> f64 {
        SEA_WATER_DENSITY * G * self.amplitude * (self.wave_number * z).exp()
    }
}
