use thiserror::Error;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A constructor received parameters that cannot describe a valid object.
    Value,
    /// A query or step received an argument outside its domain.
    InvalidArgument,
}

/// Errors reported by the wave field and the vehicle solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(
        "amplitude and frequency must be finite and > 0.0 \
         (amplitude = {amplitude}, frequency = {frequency})"
    )]
    NonPositiveAmplitudeAndFrequency { amplitude: f64, frequency: f64 },

    #[error("amplitude must be finite and > 0.0 (got {0})")]
    NonPositiveAmplitude(f64),

    #[error("frequency must be finite and > 0.0 (got {0})")]
    NonPositiveFrequency(f64),

    #[error("significant wave height should not be < 0.0 (got {0})")]
    NegativeWaveHeight(f64),

    #[error("significant wave height {0} m is too small to resolve a spectrum")]
    UnresolvableWaveHeight(f64),

    #[error("number of component waves must be an odd number >= 3 (got {0})")]
    InvalidComponentCount(usize),

    #[error("invalid hull specification: {0}")]
    InvalidHull(String),

    #[error("rudder angle must be within (-PI/2, PI/2) (got {0})")]
    InvalidRudderAngle(f64),

    #[error("time must be >= 0.0 (got {0})")]
    NegativeTime(f64),

    #[error("time step must be finite and > 0.0 (got {0})")]
    InvalidTimeStep(f64),

    #[error("waypoint coincides with the vehicle position")]
    WaypointAtPosition,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonPositiveAmplitudeAndFrequency { .. }
            | Error::NonPositiveAmplitude(_)
            | Error::NonPositiveFrequency(_)
            | Error::NegativeWaveHeight(_)
            | Error::UnresolvableWaveHeight(_)
            | Error::InvalidComponentCount(_)
            | Error::InvalidHull(_)
            | Error::InvalidRudderAngle(_) => ErrorKind::Value,
            Error::NegativeTime(_) | Error::InvalidTimeStep(_) | Error::WaypointAtPosition => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject negative or NaN query times.
pub(crate) fn check_time(time: f64) -> Result<()> {
    if !(time >= 0.0) {
        Err(Error::NegativeTime(time))
    } else {
        Ok(())
    }
}
