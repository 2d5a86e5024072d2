use glam::DVec3;
use nalgebra::{Rotation3, Vector3, Vector6};
use serde::{Deserialize, Serialize};

use crate::constants::PI;

/// Number of degrees of freedom of a rigid body in 3D space.
pub const COUNT_DOF: usize = 6;

/// A value per degree of freedom of a rigid body.
///
/// Translations along x, y, z are surge, sway and heave; rotations about the
/// same axes are roll, pitch and yaw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyDof {
    pub surge: f64,
    pub sway: f64,
    pub heave: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl RigidBodyDof {
    pub fn to_array(self) -> [f64; COUNT_DOF] {
        [self.surge, self.sway, self.heave, self.roll, self.pitch, self.yaw]
    }
}

impl From<Vector6<f64>> for RigidBodyDof {
    fn from(v: Vector6<f64>) -> Self {
        Self {
            surge: v[0],
            sway: v[1],
            heave: v[2],
            roll: v[3],
            pitch: v[4],
            yaw: v[5],
        }
    }
}

impl From<RigidBodyDof> for Vector6<f64> {
    fn from(d: RigidBodyDof) -> Self {
        Vector6::new(d.surge, d.sway, d.heave, d.roll, d.pitch, d.yaw)
    }
}

/// Normalise an angle to the range (-PI, PI].
pub fn normalise_angle_pi(angle: f64) -> f64 {
    let mut value = angle % (2.0 * PI);
    if value > PI {
        value -= 2.0 * PI;
    }
    if value <= -PI {
        value += 2.0 * PI;
    }
    value
}

/// Normalise an angle to the range [0, 2PI).
pub fn normalise_angle_2pi(angle: f64) -> f64 {
    let value = angle.rem_euclid(2.0 * PI);
    // rem_euclid rounds up to 2PI for tiny negative inputs
    if value >= 2.0 * PI {
        0.0
    } else {
        value
    }
}

/// Rotation from body frame to world frame for the attitude (roll, pitch, yaw),
/// applied as intrinsic Z-Y-X: yaw, then pitch, then roll.
pub fn body_to_world(attitude: DVec3) -> Rotation3<f64> {
    Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z)
}

pub(crate) fn to_vector3(v: DVec3) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

pub(crate) fn to_dvec3(v: &Vector3<f64>) -> DVec3 {
    DVec3::new(v.x, v.y, v.z)
}
