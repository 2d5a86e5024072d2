//! Hull coefficients for an elliptical waterplane hull.
//!
//! Tables are from Recommended practices DNVGL-RP-N103, Modelling and
//! analysis of marine operations, edition July 2017.

use crate::constants::PI;

use super::specification::AsvSpecification;

/// Added mass coefficient against b/a for an elliptical plate (Table A-2).
const ADDED_MASS_TABLE: [(f64, f64); 11] = [
    (1.0, 0.637),
    (1.5, 0.758),
    (2.0, 0.826),
    (3.0, 0.9),
    (4.0, 0.933),
    (5.0, 0.952),
    (6.0, 0.964),
    (7.0, 0.972),
    (10.0, 0.984),
    (12.8, 0.989),
    (14.3, 0.991),
];

/// Drag coefficient against d/l for an elliptical cylinder in parallel flow (Table B-1).
const PARALLEL_FLOW_DRAG_TABLE: [(f64, f64); 5] = [
    (0.125, 0.22),
    (0.25, 0.3),
    (0.5, 0.6),
    (1.0, 1.0),
    (2.0, 1.6),
];

/// Drag coefficient against b/h for a flat plate perpendicular to the flow (Table B-2).
const PERPENDICULAR_FLOW_DRAG_TABLE: [(f64, f64); 3] = [(1.0, 1.16), (5.0, 1.2), (10.0, 1.5)];

/// Piecewise linear lookup in an ascending table, held constant past either end.
fn interpolate(table: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = (table[0], table[table.len() - 1]);
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    table
        .windows(2)
        .find(|w| x <= w[1].0)
        .map(|w| {
            let ((x1, y1), (x2, y2)) = (w[0], w[1]);
            y1 + (y2 - y1) * (x - x1) / (x2 - x1)
        })
        .unwrap_or(last.1)
}

/// Immersed depth, positive, clamped to the hull depth.
pub(crate) fn immersion(spec: &AsvSpecification, submersion_depth: f64) -> f64 {
    -submersion_depth.clamp(-spec.d, 0.0)
}

/// Submerged volume, in m3, assuming a hemi-ellipsoid hull below the deck.
pub(crate) fn submerged_volume(spec: &AsvSpecification, submersion_depth: f64) -> f64 {
    let c = immersion(spec, submersion_depth);
    PI / 6.0 * spec.l_wl * spec.b_wl * c * (3.0 - c / spec.d)
}

pub(crate) fn added_mass_coefficient(spec: &AsvSpecification) -> f64 {
    interpolate(&ADDED_MASS_TABLE, spec.l_wl / spec.b_wl)
}

/// `l` is the dimension along the flow, `d` across it.
pub(crate) fn drag_coefficient_parallel_flow(l: f64, d: f64) -> f64 {
    interpolate(&PARALLEL_FLOW_DRAG_TABLE, d / l)
}

/// `b` is the longer edge of the plate, `h` the shorter.
pub(crate) fn drag_coefficient_perpendicular_flow(b: f64, h: f64) -> f64 {
    interpolate(&PERPENDICULAR_FLOW_DRAG_TABLE, b / h)
}

/// Elliptical waterplane at an immersion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Waterplane {
    /// Immersed depth in m.
    pub c: f64,
    /// Semi-axis along the hull in m.
    pub a: f64,
    /// Semi-axis across the hull in m.
    pub b: f64,
}

impl Waterplane {
    pub fn at(spec: &AsvSpecification, submersion_depth: f64) -> Self {
        let c = immersion(spec, submersion_depth);
        let scale = (1.0 - (spec.d - c) / spec.d).sqrt();
        Self {
            c,
            a: spec.l_wl / 2.0 * scale,
            b: spec.b_wl / 2.0 * scale,
        }
    }

    pub fn area(&self) -> f64 {
        PI * self.a * self.b
    }

    /// Second moment of area about the longitudinal axis.
    pub fn i_xx(&self) -> f64 {
        PI / 16.0 * self.a * self.b.powi(3)
    }

    /// Second moment of area about the transverse axis.
    pub fn i_yy(&self) -> f64 {
        PI / 16.0 * self.b * self.a.powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> AsvSpecification {
        AsvSpecification { l_wl: 2.1, b_wl: 0.6, d: 0.25, t: 0.15 }
    }

    #[test]
    fn interpolation_holds_ends() {
        assert_eq!(interpolate(&PARALLEL_FLOW_DRAG_TABLE, 0.01), 0.22);
        assert_eq!(interpolate(&PARALLEL_FLOW_DRAG_TABLE, 9.0), 1.6);
        assert!((interpolate(&PARALLEL_FLOW_DRAG_TABLE, 0.75) - 0.8).abs() < 1e-12);
        assert!((interpolate(&ADDED_MASS_TABLE, 3.5) - 0.9165).abs() < 1e-12);
    }

    #[test]
    fn drag_coefficients_for_reference_hull() {
        let s = spec();
        let surge = drag_coefficient_parallel_flow(s.l_wl, s.b_wl);
        let sway = drag_coefficient_parallel_flow(s.b_wl, s.l_wl);
        let heave = drag_coefficient_perpendicular_flow(s.l_wl, s.b_wl);
        assert!(surge > 0.3 && surge < 0.6);
        assert_eq!(sway, 1.6);
        assert!((heave - 1.185).abs() < 1e-12);
    }

    #[test]
    fn volume_limits() {
        let s = spec();
        assert_eq!(submerged_volume(&s, 0.0), 0.0);
        assert_eq!(submerged_volume(&s, 1.0), 0.0);
        let full = PI / 6.0 * s.l_wl * s.b_wl * s.d * 2.0;
        assert!((submerged_volume(&s, -s.d) - full).abs() < 1e-12);
        assert_eq!(submerged_volume(&s, -10.0), submerged_volume(&s, -s.d));
        assert!(submerged_volume(&s, -0.1) < submerged_volume(&s, -0.15));
    }

    #[test]
    fn waterplane_grows_with_immersion() {
        let s = spec();
        let dry = Waterplane::at(&s, 0.0);
        assert_eq!(dry.area(), 0.0);
        let deck = Waterplane::at(&s, -s.d);
        assert!((deck.a - s.l_wl / 2.0).abs() < 1e-12);
        assert!((deck.b - s.b_wl / 2.0).abs() < 1e-12);
        assert!(Waterplane::at(&s, -0.1).area() < Waterplane::at(&s, -0.2).area());
        assert!(deck.i_yy() > deck.i_xx());
    }
}
