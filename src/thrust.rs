//! Propulsion models that turn vehicle state into a thrust for
//! [`crate::Asv::step_simulation`].

use glam::DVec3;

use crate::asv::{AsvSpecification, AsvState};
use crate::constants::{PI, SEA_WATER_DENSITY};
use crate::error::{Error, Result};

/// A force and its point of application in body coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thrust {
    pub position: DVec3,
    pub force: DVec3,
}

/// Source of thrust for one vehicle.
pub trait ThrustPolicy {
    fn thrust(&mut self, spec: &AsvSpecification, state: &AsvState) -> Result<Thrust>;
}

/// Drifting vehicle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrust;

impl ThrustPolicy for NoThrust {
    fn thrust(&mut self, _spec: &AsvSpecification, _state: &AsvState) -> Result<Thrust> {
        Ok(Thrust::default())
    }
}

// Wave glider hydrofoils, after Wang et al., Dynamic modeling and simulations
// of the wave glider.
const HYDROFOIL_COUNT: f64 = 6.0;
const HYDROFOIL_AREA: f64 = 0.113;
const ANGLE_OF_ATTACK: f64 = 18.0 * PI / 180.0;
const FOIL_ANGLE: f64 = 45.0 * PI / 180.0;
const SWEEPBACK_ANGLE: f64 = 7.0 * PI / 180.0;
const ASPECT_RATIO: f64 = 2.0;
const CROSS_FLOW_DRAG_COEFFICIENT: f64 = 0.6;
const ZERO_LIFT_DRAG_COEFFICIENT: f64 = 0.008;
const RUDDER_AREA: f64 = 0.4 * 0.2;

/// Lift coefficient of a swept low aspect ratio foil at the glider's angle of attack.
fn lift_coefficient() -> f64 {
    let lambda = ASPECT_RATIO;
    let chi = SWEEPBACK_ANGLE;
    let alpha = ANGLE_OF_ATTACK;
    (1.8 * PI * lambda * alpha) / (chi.cos() * (lambda * lambda / chi.cos().powi(4) + 4.0).sqrt() + 1.8)
        + CROSS_FLOW_DRAG_COEFFICIENT / lambda * alpha * alpha
}

/// Empirical correction of the foil thrust by sea state.
pub fn thrust_tuning_factor(significant_wave_height: f64) -> f64 {
    match significant_wave_height {
        h if h < 0.5 => 0.93,
        h if h < 1.0 => 0.55,
        h if h < 1.5 => 0.54,
        h if h < 2.0 => 0.2,
        _ => 0.08,
    }
}

/// Thrust of a wave glider: forward thrust from the submerged foils driven by
/// heave, side force from the rudder driven by surge. Applied at the stern.
///
/// Positive `rudder_angle` turns the vehicle to starboard.
pub fn wave_glider_thrust(
    spec: &AsvSpecification,
    state: &AsvState,
    rudder_angle: f64,
    significant_wave_height: f64,
) -> Result<Thrust> {
    if !(rudder_angle.abs() < PI / 2.0) {
        return Err(Error::InvalidRudderAngle(rudder_angle));
    }

    let c_l = lift_coefficient();
    let c_d = ZERO_LIFT_DRAG_COEFFICIENT + c_l * c_l / (0.9 * PI * ASPECT_RATIO);

    let v_heave = state.velocity[2];
    let lift = 0.5 * SEA_WATER_DENSITY * c_l * HYDROFOIL_AREA * v_heave * v_heave;
    let drag = 0.5 * SEA_WATER_DENSITY * c_d * HYDROFOIL_AREA * v_heave * v_heave;
    let per_foil = lift * FOIL_ANGLE.sin() - drag * FOIL_ANGLE.cos();
    let forward = thrust_tuning_factor(significant_wave_height) * HYDROFOIL_COUNT * per_foil;

    let v_surge = state.velocity[0];
    let rudder_lift = 0.5 * SEA_WATER_DENSITY * c_l * RUDDER_AREA * v_surge * v_surge;
    let side = (rudder_lift * rudder_angle.abs().sin()).copysign(rudder_angle);

    Ok(Thrust {
        position: DVec3::new(-spec.l_wl / 2.0, 0.0, 0.0),
        force: DVec3::new(forward, side, 0.0),
    })
}

/// Wave glider with a fixed rudder setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveGliderThrust {
    pub rudder_angle: f64,
    pub significant_wave_height: f64,
}

impl ThrustPolicy for WaveGliderThrust {
    fn thrust(&mut self, spec: &AsvSpecification, state: &AsvState) -> Result<Thrust> {
        wave_glider_thrust(spec, state, self.rudder_angle, self.significant_wave_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(surge: f64, heave: f64) -> AsvState {
        let mut state = AsvState::default();
        state.velocity[0] = surge;
        state.velocity[2] = heave;
        state
    }

    #[test]
    fn tuning_factor_bands() {
        assert_eq!(thrust_tuning_factor(0.0), 0.93);
        assert_eq!(thrust_tuning_factor(0.5), 0.55);
        assert_eq!(thrust_tuning_factor(1.2), 0.54);
        assert_eq!(thrust_tuning_factor(1.99), 0.2);
        assert_eq!(thrust_tuning_factor(3.5), 0.08);
    }

    #[test]
    fn heave_drives_forward_thrust() {
        let spec = AsvSpecification::default();
        let still = wave_glider_thrust(&spec, &AsvState::default(), 0.0, 1.0).unwrap();
        assert_eq!(still.force, DVec3::ZERO);
        assert_eq!(still.position, DVec3::new(-1.05, 0.0, 0.0));

        let up = wave_glider_thrust(&spec, &moving(0.0, 0.5), 0.0, 1.0).unwrap();
        let down = wave_glider_thrust(&spec, &moving(0.0, -0.5), 0.0, 1.0).unwrap();
        assert!(up.force.x > 0.0);
        assert_eq!(up.force.x, down.force.x);
        assert_eq!(up.force.y, 0.0);
    }

    #[test]
    fn rudder_side_force_follows_angle() {
        let spec = AsvSpecification::default();
        let state = moving(1.0, 0.0);
        let starboard = wave_glider_thrust(&spec, &state, 0.3, 1.0).unwrap();
        let port = wave_glider_thrust(&spec, &state, -0.3, 1.0).unwrap();
        assert!(starboard.force.y > 0.0);
        assert_eq!(starboard.force.y, -port.force.y);
    }

    #[test]
    fn rejects_rudder_beyond_right_angle() {
        let spec = AsvSpecification::default();
        for angle in [PI / 2.0, -2.0, f64::NAN] {
            let err = wave_glider_thrust(&spec, &AsvState::default(), angle, 1.0).unwrap_err();
            assert!(matches!(err, Error::InvalidRudderAngle(_)));
        }
    }

    #[test]
    fn policies() {
        let spec = AsvSpecification::default();
        let state = moving(1.0, 0.4);
        assert_eq!(NoThrust.thrust(&spec, &state).unwrap(), Thrust::default());
        let mut glider = WaveGliderThrust { rudder_angle: 0.1, significant_wave_height: 0.3 };
        assert_eq!(
            glider.thrust(&spec, &state).unwrap(),
            wave_glider_thrust(&spec, &state, 0.1, 0.3).unwrap()
        );
    }
}
