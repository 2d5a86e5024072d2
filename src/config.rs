//! TOML configuration of a swarm simulation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::DVec3;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::asv::{AsvSpecification, DEFAULT_TIME_STEP};
use crate::error::Result;
use crate::rudder::RudderController;
use crate::sea_surface::SeaSurface;
use crate::simulation::{Simulation, DEFAULT_PROXIMITY_MARGIN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaStateConfig {
    /// Significant wave height in m.
    pub significant_wave_height: f64,
    /// Predominant wave heading in degrees from north.
    pub predominant_heading_deg: f64,
    pub seed: u64,
    pub num_component_waves: usize,
}

impl Default for SeaStateConfig {
    fn default() -> Self {
        Self {
            significant_wave_height: 3.5,
            predominant_heading_deg: 60.0,
            seed: 1,
            num_component_waves: 15,
        }
    }
}

impl SeaStateConfig {
    pub fn build(&self) -> Result<SeaSurface> {
        SeaSurface::new(
            self.significant_wave_height,
            self.predominant_heading_deg.to_radians(),
            self.seed,
            self.num_component_waves,
        )
    }
}

/// Launch point and mission of a vehicle. Coordinates are (x, y) in m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub position: [f64; 2],
    /// Initial heading in degrees from north.
    pub heading_deg: f64,
    pub waypoints: Vec<[f64; 2]>,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            position: [100.0, 100.0],
            heading_deg: 0.0,
            waypoints: vec![[100.0, 1100.0]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub sea_state: SeaStateConfig,
    pub hull: AsvSpecification,
    pub vehicle: VehicleConfig,
    /// Number of copies of `vehicle` to launch, spaced east of each other.
    pub vehicles: usize,
    pub vehicle_spacing: f64,
    /// Longest simulated time in s.
    pub duration: f64,
    pub time_step: f64,
    pub proximity_margin: f64,
    /// Proportional, integral and derivative rudder gains.
    pub rudder_gains: [f64; 3],
    /// Snapshots each vehicle may record before it is halted; unlimited when absent.
    pub snapshot_limit: Option<usize>,
    /// CSV output; stdout when absent.
    pub output: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let gains = RudderController::default().gains();
        Self {
            sea_state: SeaStateConfig::default(),
            hull: AsvSpecification::default(),
            vehicle: VehicleConfig::default(),
            vehicles: 1,
            vehicle_spacing: 20.0,
            duration: 600.0,
            time_step: DEFAULT_TIME_STEP,
            proximity_margin: DEFAULT_PROXIMITY_MARGIN,
            rudder_gains: [gains.x, gains.y, gains.z],
            snapshot_limit: None,
            output: None,
        }
    }
}

impl SimulationConfig {
    /// Build the simulation of every configured vehicle on `sea_surface`.
    pub fn simulation<'a>(&self, sea_surface: &'a SeaSurface) -> Result<Simulation<'a>> {
        let mut sim = Simulation::new(sea_surface, self.time_step)?.with_proximity_margin(self.proximity_margin);
        if let Some(limit) = self.snapshot_limit {
            sim = sim.with_snapshot_limit(limit);
        }
        let waypoints: Vec<DVec3> =
            self.vehicle.waypoints.iter().map(|[x, y]| DVec3::new(*x, *y, 0.0)).collect();
        let [p, i, d] = self.rudder_gains;
        for n in 0..self.vehicles {
            let [x, y] = self.vehicle.position;
            let position = DVec3::new(x + n as f64 * self.vehicle_spacing, y, 0.0);
            sim.add_vehicle(
                self.hull,
                position,
                self.vehicle.heading_deg.to_radians(),
                waypoints.clone(),
                RudderController::new(Vector3::new(p, i, d)),
            )?;
        }
        Ok(sim)
    }
}

/// Read a [`SimulationConfig`] from a TOML file; missing keys keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<SimulationConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
