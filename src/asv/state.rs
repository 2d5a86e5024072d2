use glam::DVec3;
use nalgebra::Vector6;
use serde::Serialize;

use crate::geometry::RigidBodyDof;

/// Dynamic state of an ASV together with the force breakdown of the last step.
///
/// Linear and angular velocity, acceleration and the forces are in the
/// body-fixed frame and ordered surge, sway, heave, roll, pitch, yaw.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsvState {
    /// Time since the start of the simulation in s.
    pub time: f64,
    /// Position of the still waterline midpoint in the world frame, m.
    pub position: DVec3,
    /// Roll, pitch and yaw in radians. Yaw is measured from the world x axis.
    pub attitude: DVec3,
    /// Depth of the keel below the local surface, clamped to [-D, 0].
    /// Zero when the hull is clear of the water.
    pub submersion_depth: f64,
    /// Mass and inertia including added mass.
    pub mass: Vector6<f64>,
    pub velocity: Vector6<f64>,
    pub acceleration: Vector6<f64>,
    pub wave_force: Vector6<f64>,
    pub damping_force: Vector6<f64>,
    pub restoring_force: Vector6<f64>,
    pub thrust: Vector6<f64>,
    pub net_force: Vector6<f64>,
}

/// Serialisable copy of every per-step output of an ASV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsvSnapshot {
    pub time: f64,
    pub position: DVec3,
    pub attitude: DVec3,
    pub submersion_depth: f64,
    pub mass: RigidBodyDof,
    pub velocity: RigidBodyDof,
    pub acceleration: RigidBodyDof,
    pub wave_force: RigidBodyDof,
    pub damping_force: RigidBodyDof,
    pub restoring_force: RigidBodyDof,
    pub thrust: RigidBodyDof,
    pub net_force: RigidBodyDof,
}

impl From<&AsvState> for AsvSnapshot {
    fn from(s: &AsvState) -> Self {
        Self {
            time: s.time,
            position: s.position,
            attitude: s.attitude,
            submersion_depth: s.submersion_depth,
            mass: s.mass.into(),
            velocity: s.velocity.into(),
            acceleration: s.acceleration.into(),
            wave_force: s.wave_force.into(),
            damping_force: s.damping_force.into(),
            restoring_force: s.restoring_force.into(),
            thrust: s.thrust.into(),
            net_force: s.net_force.into(),
        }
    }
}
