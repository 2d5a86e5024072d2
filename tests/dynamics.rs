use asv_dynamics::constants::PI;
use asv_dynamics::prelude::*;
use asv_dynamics::thrust::wave_glider_thrust;
use glam::DVec3;

fn calm() -> SeaSurface {
    SeaSurface::new(0.0, 0.0, 1, 15).unwrap()
}

fn steps_for(seconds: f64) -> usize {
    (seconds / DEFAULT_TIME_STEP).round() as usize
}

#[test]
fn calm_sea_settles_at_equilibrium() {
    let sea = calm();
    let spec = AsvSpecification::default();
    let mut asv = Asv::new(spec, &sea, DVec3::new(100.0, 100.0, 0.0), DVec3::ZERO).unwrap();
    for _ in 0..steps_for(60.0) {
        asv.step_simulation(DVec3::ZERO, DVec3::ZERO, DEFAULT_TIME_STEP).unwrap();
    }
    assert!(asv.velocity().heave.abs() < 1e-3);
    assert!(asv.position().z.abs() < 1e-6);
    assert!((asv.submersion_depth() + spec.t).abs() < 1e-6);
}

#[test]
fn heave_disturbance_decays() {
    let sea = calm();
    let spec = AsvSpecification::default();
    let mut asv = Asv::new(spec, &sea, DVec3::ZERO, DVec3::ZERO).unwrap();

    // Push the hull down for a second, then let it ring out.
    for _ in 0..steps_for(1.0) {
        asv.step_simulation(DVec3::ZERO, DVec3::new(0.0, 0.0, -500.0), DEFAULT_TIME_STEP).unwrap();
    }
    assert!(asv.position().z < -0.01);

    for _ in 0..steps_for(60.0) {
        asv.step_simulation(DVec3::ZERO, DVec3::ZERO, DEFAULT_TIME_STEP).unwrap();
    }
    assert!(asv.velocity().heave.abs() < 1e-3, "heave velocity {}", asv.velocity().heave);
    assert!(asv.position().z.abs() < 1e-3, "heave offset {}", asv.position().z);
}

#[test]
fn identical_inputs_give_identical_trajectories() {
    let sea = SeaSurface::new(1.5, PI / 4.0, 9, 15).unwrap();
    let spec = AsvSpecification::default();
    let start = DVec3::new(100.0, 100.0, 0.0);
    let mut a = Asv::new(spec, &sea, start, DVec3::new(0.0, 0.0, PI / 3.0)).unwrap();
    let mut b = Asv::new(spec, &sea, start, DVec3::new(0.0, 0.0, PI / 3.0)).unwrap();

    for i in 0..1000 {
        let rudder = 0.3 * (i as f64 * 0.01).sin();
        let ta = wave_glider_thrust(a.spec(), a.state(), rudder, 1.5).unwrap();
        let tb = wave_glider_thrust(b.spec(), b.state(), rudder, 1.5).unwrap();
        a.step_simulation(ta.position, ta.force, DEFAULT_TIME_STEP).unwrap();
        b.step_simulation(tb.position, tb.force, DEFAULT_TIME_STEP).unwrap();
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at step {i}");
    }
}

#[test]
fn seaway_motion_stays_bounded() {
    let sea = SeaSurface::new(1.0, PI / 3.0, 1, 15).unwrap();
    let mut asv = Asv::new(AsvSpecification::default(), &sea, DVec3::new(100.0, 100.0, 0.0), DVec3::ZERO).unwrap();
    let mut moved = false;
    for _ in 0..steps_for(100.0) {
        asv.step_simulation(DVec3::ZERO, DVec3::ZERO, DEFAULT_TIME_STEP).unwrap();
        let s = asv.snapshot();
        assert!(s.position.is_finite() && s.attitude.is_finite());
        assert!(s.position.z.abs() < 10.0);
        assert!((-asv.spec().d..=0.0).contains(&s.submersion_depth));
        moved |= s.velocity.heave.abs() > 1e-3;
    }
    assert!(moved);
}

#[test]
fn glider_makes_headway_in_waves() {
    let sea = SeaSurface::new(1.0, 0.0, 4, 15).unwrap();
    let start = DVec3::new(0.0, 0.0, 0.0);
    // Heading north.
    let mut asv = Asv::new(AsvSpecification::default(), &sea, start, DVec3::ZERO).unwrap();
    for _ in 0..steps_for(60.0) {
        let thrust = wave_glider_thrust(asv.spec(), asv.state(), 0.0, 1.0).unwrap();
        asv.step_simulation(thrust.position, thrust.force, DEFAULT_TIME_STEP).unwrap();
    }
    assert!(asv.position().y > 0.0);
    assert!(asv.thrust().surge >= 0.0);
}
