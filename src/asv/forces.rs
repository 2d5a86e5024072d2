use glam::DVec3;
use nalgebra::{Matrix6, Vector3, Vector6};

use crate::constants::{G, PI, SEA_WATER_DENSITY};
use crate::error::Result;
use crate::geometry::{body_to_world, normalise_angle_pi, to_dvec3, to_vector3};
use crate::sea_surface::SeaSurface;

use super::coefficients::{
    added_mass_coefficient, drag_coefficient_parallel_flow, drag_coefficient_perpendicular_flow,
    immersion, submerged_volume, Waterplane,
};
use super::specification::AsvSpecification;
use super::state::AsvState;

/// Damping ratio of the linear damping on the oscillatory modes.
pub(crate) const LINEAR_DAMPING_RATIO: f64 = 0.05;

/// Encounter frequency of a wave met at `speed` with relative heading
/// `heading` measured from the vehicle's x axis.
pub(crate) fn encounter_frequency(frequency: f64, speed: f64, heading: f64) -> f64 {
    frequency - frequency * frequency / G * speed * heading.cos()
}

/// Rigid body mass and inertia plus heave, roll and pitch added mass.
pub(crate) fn mass_matrix(spec: &AsvSpecification, sea_surface: &SeaSurface) -> Matrix6<f64> {
    let displaced_volume = submerged_volume(spec, -spec.t);
    let mass = displaced_volume * SEA_WATER_DENSITY;

    let (l, b, t) = (spec.l_wl, spec.b_wl, spec.t);
    let i_roll = mass * (b * b + t * t) / 20.0;
    let i_pitch = mass * (l * l + t * t) / 20.0;
    let i_yaw = mass * (l * l + b * b) / 20.0;

    // Added mass only accompanies the oscillatory motions.
    let c_linear = added_mass_coefficient(spec);
    let c_angular = 0.2;
    let reference_volume = PI / 6.0 * b * b * l;
    let n = sea_surface.num_component_waves() as f64;
    let (mut heave, mut roll, mut pitch) = (0.0, 0.0, 0.0);
    for wave in sea_surface.component_waves() {
        let f_e = encounter_frequency(wave.frequency, 0.0, wave.heading);
        let weight = f_e * f_e / n;
        heave += weight * c_linear * SEA_WATER_DENSITY * reference_volume;
        roll += weight * c_angular * SEA_WATER_DENSITY * displaced_volume * (b * b + t * t) / 5.0;
        pitch += weight * c_angular * SEA_WATER_DENSITY * displaced_volume * (l * l + t * t) / 5.0;
    }

    Matrix6::from_diagonal(&Vector6::new(
        mass,
        mass,
        mass + heave,
        i_roll + roll,
        i_pitch + pitch,
        i_yaw,
    ))
}

/// Quadratic drag coefficients at the current immersion.
pub(crate) fn drag_coefficients(spec: &AsvSpecification, submersion_depth: f64) -> Matrix6<f64> {
    let c = immersion(spec, submersion_depth);
    let rho = SEA_WATER_DENSITY;
    let (l, b, t) = (spec.l_wl, spec.b_wl, spec.t);

    let surge = 0.5 * rho * drag_coefficient_parallel_flow(l, b) * b * c;
    let sway = 0.5 * rho * drag_coefficient_parallel_flow(b, l) * l * c;
    // Flat plate perpendicular to the flow.
    let heave = 0.5 * rho * drag_coefficient_perpendicular_flow(l, b) * l * b;
    // Roll damping coefficient from the Handbook of Marine Craft Hydrodynamics
    // and Motion Control (p. 125), reused for pitch and yaw.
    let roll = 1.5 * rho * b.powi(3) * t;
    let pitch = 1.5 * rho * l.powi(3) * t;
    let yaw = 1.5 * rho * b.powi(3) * l;

    Matrix6::from_diagonal(&Vector6::new(surge, sway, heave, roll, pitch, yaw))
}

/// Hydrostatic stiffness of the waterplane at the current immersion.
pub(crate) fn stiffness(spec: &AsvSpecification, submersion_depth: f64) -> Matrix6<f64> {
    let waterplane = Waterplane::at(spec, submersion_depth);
    let rho_g = SEA_WATER_DENSITY * G;
    // Roll uses the pitch formula of Bhattacharyya, Dynamics of Marine Vehicles, p. 66.
    Matrix6::from_diagonal(&Vector6::new(
        0.0,
        0.0,
        waterplane.area() * rho_g,
        waterplane.i_xx() * rho_g,
        waterplane.i_yy() * rho_g,
        0.0,
    ))
}

/// Linear damping on each mode with a restoring term.
pub(crate) fn linear_damping(stiffness: &Matrix6<f64>, mass: &Matrix6<f64>) -> Matrix6<f64> {
    Matrix6::from_fn(|i, j| {
        if i == j {
            2.0 * LINEAR_DAMPING_RATIO * (stiffness[(i, i)] * mass[(i, i)]).max(0.0).sqrt()
        } else {
            0.0
        }
    })
}

/// Wave excitation from the pressure of every encountered component sampled
/// at the centre, bow, stern and both sides of the waterplane.
pub(crate) fn wave_force(
    spec: &AsvSpecification,
    sea_surface: &SeaSurface,
    state: &AsvState,
) -> Result<Vector6<f64>> {
    let mut force = Vector6::zeros();
    if state.submersion_depth >= 0.0 || sea_surface.is_calm() {
        return Ok(force);
    }

    let waterplane = Waterplane::at(spec, state.submersion_depth);
    let (a, b, c) = (waterplane.a, waterplane.b, waterplane.c);
    let area_transverse = PI / 2.0 * b * c;
    let area_profile = PI / 2.0 * a * c;
    let area_waterplane = PI / 2.0 * a * b;
    let lever_transverse = b / 8.0;
    let lever_longitudinal = a / 8.0;

    let rotation = body_to_world(state.attitude);
    let centre = to_vector3(state.position);
    let probe = |direction: Vector3<f64>, offset: f64| -> DVec3 {
        to_dvec3(&(centre + rotation * direction * offset))
    };
    let bow = probe(Vector3::x(), a / 2.0);
    let stern = probe(-Vector3::x(), a / 2.0);
    let starboard = probe(Vector3::y(), b / 2.0);
    let port = probe(-Vector3::y(), b / 2.0);

    let surge_speed = state.velocity[0];
    let time = state.time;
    let scale = 1.0 / sea_surface.component_waves().len() as f64;
    for wave in sea_surface.component_waves() {
        // Wave heading is from north; yaw is from the x axis.
        let relative_heading = normalise_angle_pi(PI / 2.0 - wave.heading - state.attitude.z);
        let f_e = encounter_frequency(wave.frequency, surge_speed, relative_heading);
        // Components overtaken by the vehicle carry no usable excitation.
        if f_e <= 0.0 {
            continue;
        }
        let encountered = wave.with_frequency(f_e)?;

        let p_centre = encountered.get_wave_pressure(state.position, time)?;
        let p_bow = encountered.get_wave_pressure(bow, time)?;
        let p_stern = encountered.get_wave_pressure(stern, time)?;
        let p_starboard = encountered.get_wave_pressure(starboard, time)?;
        let p_port = encountered.get_wave_pressure(port, time)?;

        force[0] += (p_bow - p_stern) * area_transverse * scale;
        force[1] += (p_starboard - p_port) * area_profile * scale;
        force[2] += p_centre * area_waterplane * scale;
        force[3] += (p_starboard - p_port) * area_waterplane * lever_transverse * scale;
        force[4] += (p_bow - p_stern) * area_waterplane * lever_longitudinal * scale;
    }
    Ok(force)
}

/// Force and moment of a thrust applied at `position` in body coordinates.
pub(crate) fn thrust_force(submersion_depth: f64, position: DVec3, thrust: DVec3) -> Vector6<f64> {
    if submersion_depth >= 0.0 {
        return Vector6::zeros();
    }
    let moment = position.cross(thrust);
    Vector6::new(thrust.x, thrust.y, thrust.z, moment.x, moment.y, moment.z)
}

/// Quadratic drag plus linear damping. Heave drag acts on the velocity
/// relative to the vertical velocity of the surface.
pub(crate) fn damping_force(
    spec: &AsvSpecification,
    sea_surface: &SeaSurface,
    state: &AsvState,
    mass: &Matrix6<f64>,
    dt: f64,
) -> Result<Vector6<f64>> {
    if state.submersion_depth >= 0.0 {
        return Ok(Vector6::zeros());
    }
    let drag = drag_coefficients(spec, state.submersion_depth);
    let linear = linear_damping(&stiffness(spec, state.submersion_depth), mass);
    let v = state.velocity;

    let velocity_square = v.component_mul(&v.abs());
    let mut force = -drag * velocity_square - linear * v;

    let elevation_now = sea_surface.get_elevation(state.position, state.time)?;
    let elevation_next = sea_surface.get_elevation(state.position, state.time + dt)?;
    let surface_velocity = (elevation_next - elevation_now) / dt;
    let relative_heave = v[2] - surface_velocity;
    force[2] = -drag[(2, 2)] * relative_heave * relative_heave.abs() - linear[(2, 2)] * relative_heave;
    Ok(force)
}

/// Hydrostatic restoring force: net buoyancy in heave, waterplane stiffness
/// in roll and pitch.
pub(crate) fn restoring_force(spec: &AsvSpecification, state: &AsvState) -> Vector6<f64> {
    let k = stiffness(spec, state.submersion_depth);
    let rho_g = SEA_WATER_DENSITY * G;
    let buoyancy = submerged_volume(spec, state.submersion_depth) * rho_g;
    let weight = submerged_volume(spec, -spec.t) * rho_g;
    Vector6::new(
        0.0,
        0.0,
        buoyancy - weight,
        -k[(3, 3)] * state.attitude.x,
        -k[(4, 4)] * state.attitude.y,
        0.0,
    )
}
