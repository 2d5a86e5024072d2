//! Rigid body solver for an ASV floating on a [`SeaSurface`].

mod coefficients;
mod forces;
mod integrator;
mod specification;
mod state;

pub use integrator::{ExplicitEuler, Integrator};
pub use specification::AsvSpecification;
pub use state::{AsvSnapshot, AsvState};

use glam::DVec3;
use nalgebra::{Matrix6, Vector3};
use tracing::{debug, trace, warn};

use crate::constants::PI;
use crate::error::{Error, Result};
use crate::geometry::{normalise_angle_pi, RigidBodyDof};
use crate::sea_surface::SeaSurface;

/// Time step of the bundled drivers, in s.
pub const DEFAULT_TIME_STEP: f64 = 0.04;

/// An ASV and its 6-DOF dynamics.
///
/// The vehicle borrows the sea surface it floats on, so the surface has to
/// outlive the vehicle. Several vehicles may share one surface.
#[derive(Debug, Clone)]
pub struct Asv<'a, I: Integrator = ExplicitEuler> {
    spec: AsvSpecification,
    sea_surface: &'a SeaSurface,
    /// Zonal and meridional velocity of the ocean current in m/s.
    ocean_current: (f64, f64),
    halt_surge_and_sway: bool,
    integrator: I,
    mass: Matrix6<f64>,
    state: AsvState,
}

impl<'a> Asv<'a, ExplicitEuler> {
    /// Place an ASV on the sea surface.
    ///
    /// The vertical coordinate of `position` is replaced by the local surface
    /// elevation. `attitude` is (roll, pitch, heading) with the heading
    /// measured from north, clockwise positive.
    pub fn new(
        spec: AsvSpecification,
        sea_surface: &'a SeaSurface,
        position: DVec3,
        attitude: DVec3,
    ) -> Result<Self> {
        Self::with_integrator(spec, sea_surface, position, attitude, ExplicitEuler)
    }
}

impl<'a, I: Integrator> Asv<'a, I> {
    pub fn with_integrator(
        spec: AsvSpecification,
        sea_surface: &'a SeaSurface,
        position: DVec3,
        attitude: DVec3,
        integrator: I,
    ) -> Result<Self> {
        spec.validate()?;

        let mut state = AsvState::default();
        state.position = position;
        state.position.z = sea_surface.get_elevation(position, 0.0)?;
        // Heading from north becomes yaw from the x axis for the Z-Y-X rotation sequence.
        state.attitude = DVec3::new(
            normalise_angle_pi(attitude.x),
            normalise_angle_pi(attitude.y),
            normalise_angle_pi(PI / 2.0 - attitude.z),
        );
        state.submersion_depth = -spec.t;

        let mass = forces::mass_matrix(&spec, sea_surface);
        state.mass = mass.diagonal();
        debug!(mass = mass[(0, 0)], heave_mass = mass[(2, 2)], "ASV placed on sea surface");

        Ok(Self {
            spec,
            sea_surface,
            ocean_current: (0.0, 0.0),
            halt_surge_and_sway: false,
            integrator,
            mass,
            state,
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// `thrust_position` is the point of application in body coordinates and
    /// `thrust` the force vector in N. Every force is evaluated from the state
    /// at the start of the step before velocity and pose are updated.
    pub fn step_simulation(&mut self, thrust_position: DVec3, thrust: DVec3, dt: f64) -> Result<()> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(Error::InvalidTimeStep(dt));
        }

        let now = &self.state;
        let raw_depth = (now.position.z - self.spec.t) - self.sea_surface.get_elevation(now.position, now.time)?;
        let submersion_depth = raw_depth.clamp(-self.spec.d, 0.0);
        if submersion_depth != raw_depth {
            warn!(time = now.time, raw_depth, "submersion depth clamped to hull limits");
        }

        let mut pre_step = self.state.clone();
        pre_step.submersion_depth = submersion_depth;

        let wave_force = forces::wave_force(&self.spec, self.sea_surface, &pre_step)?;
        let thrust_force = forces::thrust_force(submersion_depth, thrust_position, thrust);
        let damping_force = forces::damping_force(&self.spec, self.sea_surface, &pre_step, &self.mass, dt)?;
        let restoring_force = forces::restoring_force(&self.spec, &pre_step);

        let mut net_force = wave_force + damping_force + restoring_force + thrust_force;
        if self.halt_surge_and_sway {
            net_force[0] = 0.0;
            net_force[1] = 0.0;
        }
        let acceleration = net_force.component_div(&self.mass.diagonal());

        let state = &mut self.state;
        state.submersion_depth = submersion_depth;
        state.wave_force = wave_force;
        state.thrust = thrust_force;
        state.damping_force = damping_force;
        state.restoring_force = restoring_force;
        state.net_force = net_force;
        state.acceleration = acceleration;

        let current = Vector3::new(self.ocean_current.0, self.ocean_current.1, 0.0);
        self.integrator.integrate(state, current, dt);
        state.time += dt;

        trace!(
            time = state.time,
            z = state.position.z,
            submersion_depth,
            heave_force = net_force[2],
            "stepped ASV"
        );
        Ok(())
    }

    /// Move the vehicle to another sea state, keeping its vertical offset
    /// from the local surface.
    pub fn set_sea_state(&mut self, sea_surface: &'a SeaSurface) -> Result<()> {
        let position = self.state.position;
        let time = self.state.time;
        let offset = position.z - self.sea_surface.get_elevation(position, time)?;
        let elevation = sea_surface.get_elevation(position, time)?;
        self.sea_surface = sea_surface;
        self.state.position.z = elevation + offset;
        self.mass = forces::mass_matrix(&self.spec, sea_surface);
        self.state.mass = self.mass.diagonal();
        Ok(())
    }

    /// Ocean current as zonal (east) and meridional (north) velocity in m/s.
    pub fn set_ocean_current(&mut self, zonal: f64, meridional: f64) {
        self.ocean_current = (zonal, meridional);
    }

    /// Hold the vehicle in place horizontally; heave, roll, pitch and yaw still respond.
    pub fn set_surge_sway_halt(&mut self, halt: bool) {
        self.halt_surge_and_sway = halt;
    }

    pub fn sea_surface(&self) -> &'a SeaSurface {
        self.sea_surface
    }

    pub fn spec(&self) -> &AsvSpecification {
        &self.spec
    }

    pub fn state(&self) -> &AsvState {
        &self.state
    }

    pub fn snapshot(&self) -> AsvSnapshot {
        AsvSnapshot::from(&self.state)
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    pub fn position(&self) -> DVec3 {
        self.state.position
    }

    /// Roll, pitch and yaw, with the yaw measured from the world x axis.
    pub fn attitude(&self) -> DVec3 {
        self.state.attitude
    }

    /// Keel depth relative to the local surface: negative when immersed,
    /// zero when clear of the water.
    pub fn submersion_depth(&self) -> f64 {
        self.state.submersion_depth
    }

    pub fn mass(&self) -> RigidBodyDof {
        self.state.mass.into()
    }

    pub fn velocity(&self) -> RigidBodyDof {
        self.state.velocity.into()
    }

    pub fn acceleration(&self) -> RigidBodyDof {
        self.state.acceleration.into()
    }

    pub fn wave_force(&self) -> RigidBodyDof {
        self.state.wave_force.into()
    }

    pub fn damping_force(&self) -> RigidBodyDof {
        self.state.damping_force.into()
    }

    pub fn restoring_force(&self) -> RigidBodyDof {
        self.state.restoring_force.into()
    }

    pub fn thrust(&self) -> RigidBodyDof {
        self.state.thrust.into()
    }

    pub fn net_force(&self) -> RigidBodyDof {
        self.state.net_force.into()
    }
}
