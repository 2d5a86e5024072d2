use glam::DVec3;
use nalgebra::{Vector3, Vector6};

use crate::geometry::{body_to_world, normalise_angle_pi, to_dvec3, to_vector3};

use super::state::AsvState;

/// Time integration scheme used by [`crate::Asv::step_simulation`].
///
/// Implementations read `state.acceleration` and advance velocity, attitude
/// and position by `dt`. They must not touch the force breakdown or time.
pub trait Integrator {
    /// `current` is the ocean current velocity in the world frame, m/s.
    fn integrate(&self, state: &mut AsvState, current: Vector3<f64>, dt: f64);
}

/// Forward Euler: velocity first, then the pose from the updated velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn integrate(&self, state: &mut AsvState, current: Vector3<f64>, dt: f64) {
        state.velocity += state.acceleration * dt;

        // Ocean current drifts the hull; express it in the body frame.
        let current_body = body_to_world(state.attitude).inverse() * current;
        let mut deflection: Vector6<f64> = state.velocity * dt;
        for i in 0..3 {
            deflection[i] += current_body[i] * dt;
        }

        let attitude = state.attitude;
        state.attitude = DVec3::new(
            normalise_angle_pi(attitude.x + normalise_angle_pi(deflection[3])),
            normalise_angle_pi(attitude.y + normalise_angle_pi(deflection[4])),
            normalise_angle_pi(attitude.z + normalise_angle_pi(deflection[5])),
        );

        let translation =
            body_to_world(state.attitude) * Vector3::new(deflection[0], deflection[1], deflection[2]);
        state.position = to_dvec3(&(to_vector3(state.position) + translation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_then_position() {
        let mut state = AsvState::default();
        state.acceleration = Vector6::new(1.0, 0.0, -2.0, 0.0, 0.0, 0.0);
        ExplicitEuler.integrate(&mut state, Vector3::zeros(), 0.5);
        assert_eq!(state.velocity[0], 0.5);
        assert_eq!(state.velocity[2], -1.0);
        // Position uses the updated velocity.
        assert!((state.position.x - 0.25).abs() < 1e-12);
        assert!((state.position.z + 0.5).abs() < 1e-12);
    }

    #[test]
    fn surge_follows_heading() {
        let mut state = AsvState::default();
        state.attitude = DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        state.velocity[0] = 1.0;
        ExplicitEuler.integrate(&mut state, Vector3::zeros(), 1.0);
        assert!(state.position.x.abs() < 1e-12);
        assert!((state.position.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn current_drifts_in_world_frame() {
        let mut state = AsvState::default();
        state.attitude = DVec3::new(0.0, 0.0, 1.2);
        ExplicitEuler.integrate(&mut state, Vector3::new(0.0, 0.5, 0.0), 2.0);
        assert!(state.position.x.abs() < 1e-12);
        assert!((state.position.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn attitude_stays_normalised() {
        let mut state = AsvState::default();
        state.attitude = DVec3::new(0.0, 0.0, 3.1);
        state.velocity[5] = 1.0;
        ExplicitEuler.integrate(&mut state, Vector3::zeros(), 0.1);
        assert!((state.attitude.z - (3.2 - 2.0 * std::f64::consts::PI)).abs() < 1e-12);
    }
}
