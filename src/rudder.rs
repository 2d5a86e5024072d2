use glam::{DVec2, DVec3};
use nalgebra::Vector3;

use crate::constants::PI;
use crate::error::{Error, Result};
use crate::geometry::normalise_angle_pi;

/// Largest rudder deflection either side of centre, in radians.
pub const MAX_RUDDER_ANGLE: f64 = PI / 6.0;

/// Rate at which past errors are forgotten by the integral term.
const FORGETTING_FACTOR: f64 = 0.7;

/// PID rudder controller steering toward a waypoint or a heading.
///
/// Angles are positive to starboard. Errors are accumulated between calls,
/// so one controller serves one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct RudderController {
    gains: Vector3<f64>,
    error: f64,
    previous_error: f64,
    cumulative_error: f64,
}

impl Default for RudderController {
    fn default() -> Self {
        Self::new(Vector3::new(1.0, 0.1, 0.5))
    }
}

impl RudderController {
    /// `gains` are the proportional, integral and derivative gains.
    pub fn new(gains: Vector3<f64>) -> Self {
        Self { gains, error: 0.0, previous_error: 0.0, cumulative_error: 0.0 }
    }

    pub fn gains(&self) -> Vector3<f64> {
        self.gains
    }

    /// Signed angle from the vehicle's heading to the waypoint, positive when
    /// the waypoint lies to starboard.
    pub fn relative_angle_to_waypoint(position: DVec3, attitude: DVec3, waypoint: DVec3) -> Result<f64> {
        let heading = DVec2::from_angle(attitude.z);
        let to_waypoint = (waypoint - position).truncate();
        if to_waypoint.length() == 0.0 {
            return Err(Error::WaypointAtPosition);
        }
        // perp_dot is positive counterclockwise, i.e. to port.
        Ok(-heading.perp_dot(to_waypoint).atan2(heading.dot(to_waypoint)))
    }

    /// Rudder angle that steers a vehicle at `position` with internal
    /// `attitude` toward `waypoint`.
    pub fn rudder_angle_to_waypoint(&mut self, position: DVec3, attitude: DVec3, waypoint: DVec3) -> Result<f64> {
        let theta = Self::relative_angle_to_waypoint(position, attitude, waypoint)?;
        Ok(self.update(theta))
    }

    /// Rudder angle that brings the vehicle onto `desired_heading`, measured
    /// from north clockwise.
    pub fn rudder_angle_to_heading(&mut self, desired_heading: f64, attitude: DVec3) -> f64 {
        let heading = PI / 2.0 - attitude.z;
        self.update(normalise_angle_pi(desired_heading - heading))
    }

    fn update(&mut self, error: f64) -> f64 {
        self.previous_error = self.error;
        self.error = error;
        self.cumulative_error = error + FORGETTING_FACTOR * self.cumulative_error;
        let delta_error = self.error - self.previous_error;
        let errors = Vector3::new(self.error, self.cumulative_error, delta_error);
        self.gains.dot(&errors).clamp(-MAX_RUDDER_ANGLE, MAX_RUDDER_ANGLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Heading east.
    const EAST: DVec3 = DVec3::new(0.0, 0.0, 0.0);

    #[test]
    fn relative_angle_sign() {
        let p = DVec3::ZERO;
        let ahead = RudderController::relative_angle_to_waypoint(p, EAST, DVec3::new(10.0, 0.0, 0.0)).unwrap();
        assert_eq!(ahead, 0.0);
        // South of an east-bound vehicle is to starboard.
        let starboard = RudderController::relative_angle_to_waypoint(p, EAST, DVec3::new(0.0, -10.0, 0.0)).unwrap();
        assert!((starboard - PI / 2.0).abs() < 1e-12);
        let port = RudderController::relative_angle_to_waypoint(p, EAST, DVec3::new(10.0, 10.0, 3.0)).unwrap();
        assert!((port + PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_waypoint_is_rejected() {
        let mut controller = RudderController::default();
        let p = DVec3::new(5.0, 5.0, 0.2);
        let err = controller.rudder_angle_to_waypoint(p, EAST, DVec3::new(5.0, 5.0, -1.0)).unwrap_err();
        assert_eq!(err, Error::WaypointAtPosition);
    }

    #[test]
    fn output_is_clamped() {
        let mut controller = RudderController::new(Vector3::new(10.0, 0.0, 0.0));
        let angle = controller.rudder_angle_to_waypoint(DVec3::ZERO, EAST, DVec3::new(0.0, -1.0, 0.0)).unwrap();
        assert_eq!(angle, MAX_RUDDER_ANGLE);
        let angle = controller.rudder_angle_to_waypoint(DVec3::ZERO, EAST, DVec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(angle, -MAX_RUDDER_ANGLE);
    }

    #[test]
    fn integral_term_forgets() {
        let mut controller = RudderController::new(Vector3::new(0.0, 0.1, 0.0));
        let first = controller.rudder_angle_to_heading(0.1, DVec3::new(0.0, 0.0, PI / 2.0));
        let second = controller.rudder_angle_to_heading(0.1, DVec3::new(0.0, 0.0, PI / 2.0));
        assert!((first - 0.01).abs() < 1e-12);
        assert!((second - 0.1 * (0.1 + 0.7 * 0.1)).abs() < 1e-12);
    }

    #[test]
    fn heading_error_wraps() {
        let mut controller = RudderController::new(Vector3::new(0.1, 0.0, 0.0));
        // Heading north, desired just west of north: small turn to port.
        let angle = controller.rudder_angle_to_heading(2.0 * PI - 0.2, DVec3::new(0.0, 0.0, PI / 2.0));
        assert!((angle + 0.02).abs() < 1e-12);
    }
}
