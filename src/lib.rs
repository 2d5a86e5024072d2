// Export main modules
pub mod asv;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod regular_wave;
pub mod rudder;
pub mod sea_surface;
pub mod simulation;
pub mod spectrum;
pub mod thrust;

// Re-export everything for public use
pub use asv::{Asv, AsvSnapshot, AsvSpecification, AsvState, ExplicitEuler, Integrator};
pub use config::{load_config, SimulationConfig};
pub use error::{Error, ErrorKind, Result};
pub use geometry::RigidBodyDof;
pub use regular_wave::RegularWave;
pub use rudder::RudderController;
pub use sea_surface::SeaSurface;
pub use simulation::{Simulation, SimulationNode, SimulationSummary};
pub use thrust::{wave_glider_thrust, NoThrust, Thrust, ThrustPolicy, WaveGliderThrust};

pub mod prelude {
    pub use crate::asv::{Asv, AsvSpecification, DEFAULT_TIME_STEP};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::regular_wave::RegularWave;
    pub use crate::rudder::RudderController;
    pub use crate::sea_surface::SeaSurface;
    pub use crate::simulation::{Simulation, SimulationSummary};
    pub use crate::thrust::{NoThrust, Thrust, ThrustPolicy, WaveGliderThrust};
}
