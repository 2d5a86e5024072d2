//! Time synchronised simulation of a swarm of wave gliders sharing one sea.

use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::asv::{Asv, AsvSnapshot, AsvSpecification};
use crate::error::{Error, Result};
use crate::rudder::RudderController;
use crate::sea_surface::SeaSurface;
use crate::thrust::{ThrustPolicy, WaveGliderThrust};

/// Distance within which a waypoint counts as reached, in m.
pub const DEFAULT_PROXIMITY_MARGIN: f64 = 10.0;

/// One vehicle of a [`Simulation`] and its mission.
#[derive(Debug, Clone)]
pub struct SimulationNode<'a> {
    id: usize,
    asv: Asv<'a>,
    waypoints: Vec<DVec3>,
    current_waypoint_index: usize,
    controller: RudderController,
    glider: WaveGliderThrust,
    snapshots: Vec<AsvSnapshot>,
}

impl<'a> SimulationNode<'a> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn asv(&self) -> &Asv<'a> {
        &self.asv
    }

    pub fn waypoints(&self) -> &[DVec3] {
        &self.waypoints
    }

    pub fn current_waypoint_index(&self) -> usize {
        self.current_waypoint_index
    }

    /// State after every step taken so far.
    pub fn snapshots(&self) -> &[AsvSnapshot] {
        &self.snapshots
    }

    pub fn has_reached_final_waypoint(&self) -> bool {
        self.current_waypoint_index >= self.waypoints.len()
    }

    /// Step the vehicle toward its current waypoint. Returns `false` when it
    /// has no waypoint left or its snapshot buffer is full.
    fn step(&mut self, dt: f64, proximity_margin: f64, snapshot_limit: Option<usize>) -> Result<bool> {
        // A vehicle may already sit on its waypoint, where no rudder angle exists.
        self.advance_waypoints(proximity_margin);
        let Some(&waypoint) = self.waypoints.get(self.current_waypoint_index) else {
            return Ok(false);
        };
        if self.is_buffer_full(snapshot_limit) {
            return Ok(false);
        }

        let position = self.asv.position();
        self.glider.rudder_angle =
            self.controller.rudder_angle_to_waypoint(position, self.asv.attitude(), waypoint)?;
        let thrust = self.glider.thrust(self.asv.spec(), self.asv.state())?;
        self.asv.step_simulation(thrust.position, thrust.force, dt)?;
        self.snapshots.push(self.asv.snapshot());

        self.advance_waypoints(proximity_margin);
        Ok(true)
    }

    fn advance_waypoints(&mut self, proximity_margin: f64) {
        while let Some(&waypoint) = self.waypoints.get(self.current_waypoint_index) {
            let distance = (self.asv.position() - waypoint).truncate().length();
            if distance > proximity_margin {
                break;
            }
            info!(
                id = self.id,
                waypoint = self.current_waypoint_index,
                time = self.asv.time(),
                "reached waypoint"
            );
            self.current_waypoint_index += 1;
        }
    }

    fn is_buffer_full(&self, snapshot_limit: Option<usize>) -> bool {
        snapshot_limit.is_some_and(|limit| self.snapshots.len() >= limit)
    }
}

/// Outcome of [`Simulation::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    /// Simulated time in s.
    pub time: f64,
    pub steps: usize,
    pub vehicles: usize,
    /// Vehicles that reached their final waypoint.
    pub finished: usize,
    /// Vehicles halted short of their final waypoint by a full snapshot buffer.
    pub buffer_full: usize,
}

/// A swarm of wave gliders on a shared, read-only sea surface.
///
/// Every unfinished vehicle is advanced by the same time step on each call
/// to [`Simulation::step`], in parallel.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    sea_surface: &'a SeaSurface,
    time_step: f64,
    proximity_margin: f64,
    snapshot_limit: Option<usize>,
    time: f64,
    steps: usize,
    nodes: Vec<SimulationNode<'a>>,
}

impl<'a> Simulation<'a> {
    pub fn new(sea_surface: &'a SeaSurface, time_step: f64) -> Result<Self> {
        if !(time_step > 0.0) || !time_step.is_finite() {
            return Err(Error::InvalidTimeStep(time_step));
        }
        Ok(Self {
            sea_surface,
            time_step,
            proximity_margin: DEFAULT_PROXIMITY_MARGIN,
            snapshot_limit: None,
            time: 0.0,
            steps: 0,
            nodes: Vec::new(),
        })
    }

    pub fn with_proximity_margin(mut self, proximity_margin: f64) -> Self {
        self.proximity_margin = proximity_margin;
        self
    }

    /// Stop a vehicle once it has recorded `limit` snapshots.
    pub fn with_snapshot_limit(mut self, limit: usize) -> Self {
        self.snapshot_limit = Some(limit);
        self
    }

    /// Launch a vehicle at `position` with `heading` (from north, clockwise)
    /// and return its id.
    pub fn add_vehicle(
        &mut self,
        spec: AsvSpecification,
        position: DVec3,
        heading: f64,
        waypoints: Vec<DVec3>,
        controller: RudderController,
    ) -> Result<usize> {
        let id = self.nodes.len();
        let asv = Asv::new(spec, self.sea_surface, position, DVec3::new(0.0, 0.0, heading))?;
        let glider = WaveGliderThrust {
            rudder_angle: 0.0,
            significant_wave_height: self.sea_surface.significant_wave_height(),
        };
        debug!(id, waypoints = waypoints.len(), "vehicle added to simulation");
        self.nodes.push(SimulationNode {
            id,
            asv,
            waypoints,
            current_waypoint_index: 0,
            controller,
            glider,
            snapshots: Vec::new(),
        });
        Ok(id)
    }

    pub fn nodes(&self) -> &[SimulationNode<'a>] {
        &self.nodes
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn has_finished(&self) -> bool {
        self.nodes.iter().all(SimulationNode::has_reached_final_waypoint)
    }

    /// Advance every vehicle still on its mission by one time step.
    ///
    /// Returns `false` when no vehicle could move, in which case time does
    /// not advance. Every vehicle is stepped even when one fails; the first
    /// failure is returned after the clock has followed the others.
    pub fn step(&mut self) -> Result<bool> {
        let (dt, margin, limit) = (self.time_step, self.proximity_margin, self.snapshot_limit);
        let outcomes: Vec<Result<bool>> =
            self.nodes.par_iter_mut().map(|node| node.step(dt, margin, limit)).collect();

        let mut stepped = false;
        let mut failure = None;
        for outcome in outcomes {
            match outcome {
                Ok(moved) => stepped |= moved,
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
        if stepped {
            self.time += dt;
            self.steps += 1;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(stepped),
        }
    }

    /// Step until every vehicle has reached its final waypoint or filled its
    /// snapshot buffer, or `max_duration` seconds have been simulated.
    pub fn run(&mut self, max_duration: f64) -> Result<SimulationSummary> {
        crate::error::check_time(max_duration)?;
        // Half a step of slack keeps float accumulation from adding a step.
        while !self.has_finished() && self.time + 0.5 * self.time_step < max_duration {
            if !self.step()? {
                break;
            }
        }
        let summary = self.summary();
        info!(
            time = summary.time,
            steps = summary.steps,
            finished = summary.finished,
            buffer_full = summary.buffer_full,
            vehicles = summary.vehicles,
            "simulation complete"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            time: self.time,
            steps: self.steps,
            vehicles: self.nodes.len(),
            finished: self.nodes.iter().filter(|n| n.has_reached_final_waypoint()).count(),
            buffer_full: self
                .nodes
                .iter()
                .filter(|n| !n.has_reached_final_waypoint() && n.is_buffer_full(self.snapshot_limit))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asv::DEFAULT_TIME_STEP;
    use crate::constants::PI;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_bad_time_step() {
        let sea = SeaSurface::new(1.0, 0.0, 1, 15).unwrap();
        let err = Simulation::new(&sea, 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn vehicles_step_in_lockstep() {
        let sea = SeaSurface::new(1.0, PI / 3.0, 3, 15).unwrap();
        let mut sim = Simulation::new(&sea, DEFAULT_TIME_STEP).unwrap();
        let far = vec![DVec3::new(1000.0, 1000.0, 0.0)];
        for i in 0..3 {
            let position = DVec3::new(100.0 + 20.0 * i as f64, 100.0, 0.0);
            sim.add_vehicle(AsvSpecification::default(), position, 0.0, far.clone(), RudderController::default())
                .unwrap();
        }
        let summary = sim.run(2.0).unwrap();
        assert_eq!(summary.steps, 50);
        assert_eq!(summary.vehicles, 3);
        assert_eq!(summary.finished, 0);
        for node in sim.nodes() {
            assert_eq!(node.snapshots().len(), 50);
            assert!((node.asv().time() - sim.time()).abs() < 1e-9);
        }
    }

    #[test]
    fn waypoint_within_margin_is_reached() {
        let sea = SeaSurface::new(0.5, 0.0, 1, 15).unwrap();
        let mut sim = Simulation::new(&sea, DEFAULT_TIME_STEP).unwrap();
        let waypoints = vec![DVec3::new(5.0, 0.0, 0.0), DVec3::new(8.0, 3.0, 0.0)];
        sim.add_vehicle(AsvSpecification::default(), DVec3::ZERO, 0.0, waypoints, RudderController::default())
            .unwrap();
        let summary = sim.run(10.0).unwrap();
        // Both waypoints lie inside the margin at launch: nothing to steer for.
        assert_eq!(summary.finished, 1);
        assert_eq!(summary.steps, 0);
        assert!(sim.has_finished());
        assert_eq!(sim.nodes()[0].current_waypoint_index(), 2);
        assert!(sim.nodes()[0].snapshots().is_empty());
    }

    #[test]
    fn launch_on_waypoint_does_not_abort_the_swarm() {
        let sea = SeaSurface::new(1.0, 0.0, 1, 15).unwrap();
        let mut sim = Simulation::new(&sea, DEFAULT_TIME_STEP).unwrap();
        let here = DVec3::new(5.0, 5.0, 0.0);
        sim.add_vehicle(AsvSpecification::default(), here, 0.0, vec![here], RudderController::default())
            .unwrap();
        let far = vec![here, DVec3::new(500.0, 5.0, 0.0)];
        sim.add_vehicle(AsvSpecification::default(), here, 0.0, far, RudderController::default())
            .unwrap();

        let summary = sim.run(1.0).unwrap();
        assert_eq!(summary.steps, 25);
        assert_eq!(summary.finished, 1);
        assert!(sim.nodes()[0].snapshots().is_empty());
        assert_eq!(sim.nodes()[1].current_waypoint_index(), 1);
        assert_eq!(sim.nodes()[1].snapshots().len(), 25);
    }

    #[test]
    fn snapshot_limit_halts_vehicles() {
        let sea = SeaSurface::new(1.0, 0.0, 1, 15).unwrap();
        let mut sim = Simulation::new(&sea, DEFAULT_TIME_STEP).unwrap().with_snapshot_limit(10);
        let far = vec![DVec3::new(1000.0, 0.0, 0.0)];
        sim.add_vehicle(AsvSpecification::default(), DVec3::ZERO, 0.0, far, RudderController::default())
            .unwrap();
        let summary = sim.run(60.0).unwrap();
        assert_eq!(summary.steps, 10);
        assert_eq!(summary.buffer_full, 1);
        assert_eq!(summary.finished, 0);
        assert!((summary.time - 0.4).abs() < 1e-9);
        assert_eq!(sim.nodes()[0].snapshots().len(), 10);
        assert!(!sim.step().unwrap());
    }

    #[test]
    fn vehicle_without_waypoints_is_finished() {
        let sea = SeaSurface::new(0.0, 0.0, 1, 3).unwrap();
        let mut sim = Simulation::new(&sea, DEFAULT_TIME_STEP).unwrap();
        sim.add_vehicle(AsvSpecification::default(), DVec3::ZERO, 0.0, Vec::new(), RudderController::default())
            .unwrap();
        let summary = sim.run(5.0).unwrap();
        assert_eq!(summary.steps, 0);
        assert!(sim.nodes()[0].snapshots().is_empty());
    }
}
