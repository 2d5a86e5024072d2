use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hull dimensions of an ASV, all in m. Missing fields deserialise to the
/// default hull's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsvSpecification {
    /// Length at the waterline.
    pub l_wl: f64,
    /// Breadth at the waterline.
    pub b_wl: f64,
    /// Depth of the hull.
    pub d: f64,
    /// Draught.
    pub t: f64,
}

impl Default for AsvSpecification {
    /// Wave glider sized hull.
    fn default() -> Self {
        Self { l_wl: 2.1, b_wl: 0.6, d: 0.25, t: 0.15 }
    }
}

impl AsvSpecification {
    pub fn validate(&self) -> Result<()> {
        let dims = [("L_wl", self.l_wl), ("B_wl", self.b_wl), ("D", self.d), ("T", self.t)];
        if let Some((name, value)) = dims.iter().find(|(_, v)| !(*v > 0.0) || !v.is_finite()) {
            return Err(Error::InvalidHull(format!("{name} must be finite and > 0.0 (got {value})")));
        }
        if self.t >= self.d {
            return Err(Error::InvalidHull(format!(
                "draught T ({}) must be less than depth D ({})",
                self.t, self.d
            )));
        }
        Ok(())
    }
}
