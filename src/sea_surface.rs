use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::constants::PI;
use crate::error::{check_time, Error, Result};
use crate::geometry::normalise_angle_2pi;
use crate::regular_wave::RegularWave;
use crate::spectrum::{self, MAX_FREQUENCY_FACTOR, MIN_FREQUENCY_FACTOR};

/// Irregular sea surface synthesised as the superposition of regular waves
/// drawn from a Bretschneider spectrum.
///
/// The spectrum is computed once on construction and never mutated, so a
/// single instance can be shared by reference between any number of vehicles
/// and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaSurface {
    significant_wave_height: f64,
    predominant_wave_heading: f64,
    random_number_seed: u64,
    num_component_waves: usize,
    peak_spectral_frequency: f64,
    min_spectral_frequency: f64,
    max_spectral_frequency: f64,
    min_spectral_wave_heading: f64,
    max_spectral_wave_heading: f64,
    component_waves: Vec<RegularWave>,
}

impl SeaSurface {
    /// Build a sea surface.
    ///
    /// `significant_wave_height` in m (0 gives a calm sea with no components),
    /// `predominant_wave_heading` in radians from north, `num_component_waves`
    /// must be odd and at least 3.
    pub fn new(
        significant_wave_height: f64,
        predominant_wave_heading: f64,
        random_number_seed: u64,
        num_component_waves: usize,
    ) -> Result<Self> {
        if !(significant_wave_height >= 0.0) || !significant_wave_height.is_finite() {
            return Err(Error::NegativeWaveHeight(significant_wave_height));
        }
        if num_component_waves % 2 == 0 || num_component_waves < 3 {
            return Err(Error::InvalidComponentCount(num_component_waves));
        }

        let heading = normalise_angle_2pi(predominant_wave_heading);
        let mut sea_surface = Self {
            significant_wave_height,
            predominant_wave_heading: heading,
            random_number_seed,
            num_component_waves,
            peak_spectral_frequency: 0.0,
            min_spectral_frequency: 0.0,
            max_spectral_frequency: 0.0,
            min_spectral_wave_heading: normalise_angle_2pi(heading - PI / 2.0),
            max_spectral_wave_heading: normalise_angle_2pi(heading + PI / 2.0),
            component_waves: Vec::new(),
        };

        if significant_wave_height == 0.0 {
            debug!(num_component_waves, "calm sea surface, no spectral components");
            return Ok(sea_surface);
        }

        let f_p = spectrum::peak_spectral_frequency(significant_wave_height);
        if !(MAX_FREQUENCY_FACTOR * f_p).is_finite() {
            return Err(Error::UnresolvableWaveHeight(significant_wave_height));
        }
        sea_surface.peak_spectral_frequency = f_p;
        sea_surface.min_spectral_frequency = MIN_FREQUENCY_FACTOR * f_p;
        sea_surface.max_spectral_frequency = MAX_FREQUENCY_FACTOR * f_p;
        // Band energies underflow to zero amplitude for vanishingly small seas.
        sea_surface.component_waves = sea_surface
            .synthesise_components()
            .map_err(|_| Error::UnresolvableWaveHeight(significant_wave_height))?;

        debug!(
            significant_wave_height,
            peak_spectral_frequency = f_p,
            num_component_waves,
            "synthesised sea surface"
        );
        Ok(sea_surface)
    }

    fn synthesise_components(&self) -> Result<Vec<RegularWave>> {
        let n = self.num_component_waves;
        let half_count = (n - 1) / 2;
        let f_min = self.min_spectral_frequency;
        let f_max = self.max_spectral_frequency;
        let f_p = self.peak_spectral_frequency;
        let h_s = self.significant_wave_height;

        // One narrow band centred on the peak, equal sub-bands either side.
        let peak_band = (f_max - f_min) / n as f64;
        let peak_band_low = f_p - peak_band / 2.0;
        let peak_band_high = f_p + peak_band / 2.0;
        let lower_band = (peak_band_low - f_min) / half_count as f64;
        let upper_band = (f_max - peak_band_high) / half_count as f64;
        let heading_increment = PI / n as f64;

        // Single generator advanced sequentially across all components.
        let mut rng = StdRng::seed_from_u64(self.random_number_seed);
        let mut component = |frequency: f64, band: f64, heading: f64| -> Result<RegularWave> {
            let amplitude = spectrum::band_amplitude(frequency, band, h_s);
            let phase = rng.gen_range(0.0..2.0 * PI);
            RegularWave::new(amplitude, frequency, phase, heading)
        };

        let mut waves = Vec::with_capacity(n);
        for i in 0..half_count {
            let frequency = f_min + i as f64 * lower_band + lower_band / 2.0;
            let mu = -PI / 2.0 + i as f64 * heading_increment + heading_increment / 2.0;
            waves.push(component(frequency, lower_band, self.predominant_wave_heading + mu)?);
        }
        waves.push(component(f_p, peak_band, self.predominant_wave_heading)?);
        for i in 0..half_count {
            let frequency = peak_band_high + i as f64 * upper_band + upper_band / 2.0;
            let mu = heading_increment + i as f64 * heading_increment;
            waves.push(component(frequency, upper_band, self.predominant_wave_heading + mu)?);
        }
        Ok(waves)
    }

    /// Surface elevation, in m, at a location and time.
    pub fn get_elevation(&self, location: DVec3, time: f64) -> Result<f64> {
        check_time(time)?;
        self.component_waves
            .iter()
            .try_fold(0.0, |sum, wave| Ok(sum + wave.get_elevation(location, time)?))
    }

    /// Arithmetic mean of the component wave numbers; 0 for a calm sea.
    pub fn get_mean_wavenumber(&self) -> f64 {
        if self.component_waves.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.component_waves.iter().map(|w| w.wave_number).sum();
        sum / self.component_waves.len() as f64
    }

    pub fn is_calm(&self) -> bool {
        self.component_waves.is_empty()
    }

    pub fn significant_wave_height(&self) -> f64 {
        self.significant_wave_height
    }

    pub fn predominant_wave_heading(&self) -> f64 {
        self.predominant_wave_heading
    }

    pub fn random_number_seed(&self) -> u64 {
        self.random_number_seed
    }

    pub fn num_component_waves(&self) -> usize {
        self.num_component_waves
    }

    pub fn peak_spectral_frequency(&self) -> f64 {
        self.peak_spectral_frequency
    }

    pub fn min_spectral_frequency(&self) -> f64 {
        self.min_spectral_frequency
    }

    pub fn max_spectral_frequency(&self) -> f64 {
        self.max_spectral_frequency
    }

    pub fn min_spectral_wave_heading(&self) -> f64 {
        self.min_spectral_wave_heading
    }

    pub fn max_spectral_wave_heading(&self) -> f64 {
        self.max_spectral_wave_heading
    }

    /// Components in construction order: below peak, peak, above peak.
    pub fn component_waves(&self) -> &[RegularWave] {
        &self.component_waves
    }

    pub fn component_wave(&self, index: usize) -> Option<&RegularWave> {
        self.component_waves.get(index)
    }
}
