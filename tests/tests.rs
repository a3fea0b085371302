use orbsim::simulation::forces::{pair_weights, MIN_DISTANCE2};
use orbsim::simulation::params::{gas_count_for, MAX_BOUNDARY_TOLERANCE};
use orbsim::simulation::random::{random_velocity, seeded};
use orbsim::{
    Activity, Body, BodyKind, Boundary, Bounce, Brownian, Canvas, CenterPull, Charge, ConfigError, Directionality,
    DragState, Force, ForceSet, Interaction, Link, LinkSpring, NVec2, Parameters, Scenario, ScenarioConfig, Surface,
    System, Viscosity,
};
use orbsim::step;

/// Build a System from explicit bodies; orbs must come first
pub fn system_of(bodies: Vec<Body>, width: f64, height: f64) -> System {
    let num_orbs = bodies.iter().take_while(|b| b.kind == BodyKind::Orb).count();
    System {
        bodies,
        links: Vec::new(),
        canvas: Canvas::new(width, height),
        num_orbs,
        tick: 0,
    }
}

pub fn orb(x: f64, y: f64, r: f64) -> Body {
    Body::orb(NVec2::new(x, y), r)
}

/// Only the force under test does anything; no friction, constant alpha
pub fn quiet_params() -> Parameters {
    Parameters {
        charge_strength: 0.0,
        link_strength: 0.0,
        center_strength: 0.0,
        velocity_decay: 1.0,
        alpha_decay: 0.0,
        ..Default::default()
    }
}

pub fn deltas<F: Force>(force: &F, sys: &System, params: &Parameters) -> Vec<NVec2> {
    let mut out = vec![NVec2::zeros(); sys.bodies.len()];
    force.apply(sys, params, 1.0, &mut out);
    out
}

/// Scenario with gas on a small canvas, built through the YAML-facing config
pub fn gas_scenario(seed: u64) -> Scenario {
    let yaml = format!(
        "seed: {seed}\n\
         canvas: {{ width: 300.0, height: 200.0 }}\n\
         parameters:\n  num_orbs: 4\n  orb_radius: 15.0\n  gas_radius: 2.0\n  gas_density: 0.001\n  temperature: 4.0\n\
         links: [[0, 1], [1, 2], [2, 3]]\n"
    );
    let cfg: ScenarioConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    Scenario::build_scenario(cfg).expect("valid scenario")
}

// ==================================================================================
// Collision ("bounce") tests
// ==================================================================================

#[test]
fn bounce_two_orbs_move_apart_along_x() {
    let mut sys = system_of(vec![orb(0.0, 0.0, 8.0), orb(10.0, 0.0, 8.0)], 100.0, 100.0);
    let mut params = quiet_params();
    params.boundary_tolerance = 50.0; // keep the clamp out of this scenario
    let forces = ForceSet::new().with(Bounce);
    let mut activity = Activity::default();
    let mut accels = Vec::new();

    let before = (sys.bodies[1].x - sys.bodies[0].x).norm();
    step(&mut sys, &forces, &params, &mut activity, &mut accels);
    let after = (sys.bodies[1].x - sys.bodies[0].x).norm();

    let (a, b) = (&sys.bodies[0], &sys.bodies[1]);
    assert_eq!(a.v.y, 0.0);
    assert_eq!(b.v.y, 0.0);
    assert_eq!(a.x.y, 0.0);
    assert_eq!(b.x.y, 0.0);
    assert!(a.v.x < 0.0 && b.v.x > 0.0);
    assert!(after > before, "distance did not grow: {} -> {}", before, after);

    let net = a.v + b.v;
    assert!(net.norm() < 1e-12, "momentum not conserved: {:?}", net);
}

#[test]
fn bounce_is_antisymmetric() {
    let sys = system_of(vec![orb(10.0, 10.0, 5.0), orb(15.0, 13.0, 5.0)], 100.0, 100.0);
    let out = deltas(&Bounce, &sys, &quiet_params());
    assert!((out[0] + out[1]).norm() < 1e-12);
    assert!(out[0].norm() > 0.0);
}

#[test]
fn bounce_never_resolves_full_overlap_in_one_tick() {
    let sys = system_of(vec![orb(50.0, 50.0, 8.0), orb(60.0, 50.0, 8.0)], 100.0, 100.0);
    let params = quiet_params();
    let out = deltas(&Bounce, &sys, &params);
    let separation_gain = out[1].x - out[0].x;
    let overlap = 16.0 - 10.0;
    assert!(separation_gain > 0.0 && separation_gain < overlap);
}

#[test]
fn bounce_pinned_body_absorbs_nothing() {
    let mut sys = system_of(vec![orb(50.0, 50.0, 8.0), orb(60.0, 50.0, 8.0)], 100.0, 100.0);
    sys.bodies[0].pin = Some(NVec2::new(50.0, 50.0));
    let params = quiet_params();
    let out = deltas(&Bounce, &sys, &params);

    assert_eq!(out[0], NVec2::zeros());
    let expected = (16.0 - 10.0) * params.collision_strength;
    assert!((out[1].x - expected).abs() < 1e-12);
    assert_eq!(pair_weights(&sys, 0, 1), (0.0, 1.0));
}

#[test]
fn bounce_coincident_centers_still_separate() {
    let sys = system_of(vec![orb(40.0, 40.0, 5.0), orb(40.0, 40.0, 5.0)], 100.0, 100.0);
    let out = deltas(&Bounce, &sys, &quiet_params());
    assert!(out.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
    assert!(out[0].x < 0.0 && out[1].x > 0.0);
}

// ==================================================================================
// Charge, link and center tests
// ==================================================================================

#[test]
fn charge_pushes_apart_and_negative_pulls_together() {
    let sys = system_of(vec![orb(20.0, 50.0, 5.0), orb(80.0, 50.0, 5.0)], 100.0, 100.0);
    let mut params = quiet_params();
    params.charge_strength = 30.0;

    let out = deltas(&Charge, &sys, &params);
    assert!(out[0].x < 0.0 && out[1].x > 0.0);
    assert!((out[0] + out[1]).norm() < 1e-12);
    // |r| * k / |r|^2
    assert!((out[1].x - 30.0 / 60.0).abs() < 1e-12);

    params.charge_strength = -30.0;
    let out = deltas(&Charge, &sys, &params);
    assert!(out[0].x > 0.0 && out[1].x < 0.0);
}

#[test]
fn charge_skips_coincident_pairs() {
    let sys = system_of(vec![orb(30.0, 30.0, 5.0), orb(30.0, 30.0, 5.0)], 100.0, 100.0);
    let mut params = quiet_params();
    params.charge_strength = 1000.0;
    let out = deltas(&Charge, &sys, &params);
    assert_eq!(out[0], NVec2::zeros());
    assert_eq!(out[1], NVec2::zeros());
    assert!(MIN_DISTANCE2 > 0.0);
}

#[test]
fn charge_stays_bounded_for_nearly_coincident_pairs() {
    let sys = system_of(vec![orb(30.0, 30.0, 5.0), orb(30.0 + 1e-4, 30.0, 5.0)], 100.0, 100.0);
    let mut params = quiet_params();
    params.charge_strength = 1000.0;
    let out = deltas(&Charge, &sys, &params);

    // |r| * k / r_min^2, far below k / r_min
    assert!(out[0].x < 0.0 && out[1].x > 0.0);
    assert!(out[1].norm() <= 1000.0 / 5.0);
    assert!((out[1].x - 1e-4 * 1000.0 / 25.0).abs() < 1e-9);
}

#[test]
fn link_spring_pulls_stretched_and_pushes_compressed() {
    let mut sys = system_of(vec![orb(100.0, 100.0, 10.0), orb(300.0, 100.0, 10.0)], 400.0, 200.0);
    sys.links.push(Link::new(0, 1));
    let mut params = quiet_params();
    params.link_distance = 100.0;
    params.link_strength = 0.1;

    // stretch 100 -> force 10 along +x, shared equally
    let out = deltas(&LinkSpring, &sys, &params);
    assert!((out[0].x - 5.0).abs() < 1e-12);
    assert!((out[1].x + 5.0).abs() < 1e-12);
    assert_eq!(out[0].y, 0.0);

    sys.bodies[1].x = NVec2::new(150.0, 100.0);
    let out = deltas(&LinkSpring, &sys, &params);
    assert!(out[0].x < 0.0 && out[1].x > 0.0);
}

#[test]
fn dormant_link_exerts_nothing() {
    let mut sys = system_of(vec![orb(100.0, 100.0, 10.0), orb(300.0, 100.0, 10.0)], 400.0, 200.0);
    sys.links.push(Link::new(0, 5));
    let mut params = quiet_params();
    params.link_strength = 0.5;
    let out = deltas(&LinkSpring, &sys, &params);
    assert!(out.iter().all(|v| *v == NVec2::zeros()));
    assert_eq!(sys.live_links().count(), 0);
}

#[test]
fn center_pull_only_moves_orbs() {
    let sys = system_of(
        vec![orb(10.0, 10.0, 5.0), Body::gas(NVec2::new(10.0, 10.0), NVec2::zeros(), 1.0)],
        100.0,
        100.0,
    );
    let mut params = quiet_params();
    params.center_strength = 0.1;
    let out = deltas(&CenterPull, &sys, &params);
    assert!((out[0] - NVec2::new(4.0, 4.0)).norm() < 1e-12);
    assert_eq!(out[1], NVec2::zeros());
}

// ==================================================================================
// Brownian and viscosity tests
// ==================================================================================

#[test]
fn brownian_jitters_free_orbs_within_range() {
    let mut sys = system_of(
        vec![orb(20.0, 20.0, 5.0), orb(60.0, 60.0, 5.0), Body::gas(NVec2::new(40.0, 40.0), NVec2::zeros(), 1.0)],
        100.0,
        100.0,
    );
    sys.bodies[1].pin = Some(NVec2::new(60.0, 60.0));
    let mut params = quiet_params();
    params.brownian_range = 0.5;

    let jitter = Brownian { seed: 9 };
    let out = deltas(&jitter, &sys, &params);
    assert!(out[0] != NVec2::zeros());
    assert!(out[0].x.abs() <= 0.5 && out[0].y.abs() <= 0.5);
    assert_eq!(out[1], NVec2::zeros());
    assert_eq!(out[2], NVec2::zeros());

    // same seed and tick: same jitter; next tick: different jitter
    assert_eq!(deltas(&jitter, &sys, &params), out);
    sys.tick += 1;
    assert!(deltas(&jitter, &sys, &params) != out);

    params.brownian_range = 0.0;
    assert!(deltas(&jitter, &sys, &params).iter().all(|v| *v == NVec2::zeros()));
}

#[test]
fn viscosity_drags_quadratically_against_velocity() {
    let mut sys = system_of(
        vec![orb(20.0, 20.0, 5.0), orb(60.0, 60.0, 5.0), Body::gas(NVec2::new(40.0, 40.0), NVec2::new(3.0, 0.0), 1.0)],
        100.0,
        100.0,
    );
    sys.bodies[0].v = NVec2::new(3.0, 4.0);
    let mut params = quiet_params();
    params.viscosity = 0.01;

    // |drag| = speed^2 * c = 25 * 0.01, along -v
    let out = deltas(&Viscosity, &sys, &params);
    assert!((out[0] - NVec2::new(-0.15, -0.2)).norm() < 1e-12);
    // body at rest: no division by a zero speed
    assert_eq!(out[1], NVec2::zeros());
    assert_eq!(out[2], NVec2::zeros());

    // strong drag stops a body but never reverses it
    params.viscosity = 10.0;
    let out = deltas(&Viscosity, &sys, &params);
    assert!((out[0] + sys.bodies[0].v).norm() < 1e-12);
}

#[test]
fn scenario_jitter_replays_from_the_seed() {
    let yaml = "seed: 17\ncanvas: { width: 400.0, height: 300.0 }\n\
                parameters: { num_orbs: 3, orb_radius: 20.0, brownian_range: 1.0, viscosity: 0.01 }\n";
    let run = || {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");
        let mut scenario = Scenario::build_scenario(cfg).expect("valid scenario");
        for _ in 0..40 {
            scenario.tick();
        }
        scenario.system.bodies
    };
    let a = run();
    assert_eq!(a, run());
    assert!(a.iter().all(|b| b.x.x.is_finite() && b.x.y.is_finite()));
}

// ==================================================================================
// Surface tests
// ==================================================================================

#[test]
fn surface_pushes_back_along_inward_normal() {
    let canvas = Canvas::new(100.0, 100.0);
    let surface = Surface { boundary: Boundary::canvas(&canvas, Directionality::TwoWay) };
    let mut sys = system_of(vec![orb(5.0, 50.0, 10.0)], 100.0, 100.0);
    let params = quiet_params();

    // 5 px into the left wall, half of it corrected
    let out = deltas(&surface, &sys, &params);
    assert!((out[0] - NVec2::new(2.5, 0.0)).norm() < 1e-12);

    // outward velocity is mirrored on top of the push
    sys.bodies[0].v = NVec2::new(-3.0, 0.0);
    let out = deltas(&surface, &sys, &params);
    assert!((out[0] - NVec2::new(8.5, 0.0)).norm() < 1e-12);
}

#[test]
fn one_way_surface_lets_escaped_bodies_go() {
    let canvas = Canvas::new(100.0, 100.0);
    let sys = system_of(vec![orb(-5.0, 50.0, 10.0)], 100.0, 100.0);
    let params = quiet_params();

    let one_way = Surface { boundary: Boundary::canvas(&canvas, Directionality::OneWay) };
    assert_eq!(deltas(&one_way, &sys, &params)[0], NVec2::zeros());

    // 15 px of penetration, half of it corrected
    let two_way = Surface { boundary: Boundary::canvas(&canvas, Directionality::TwoWay) };
    let out = deltas(&two_way, &sys, &params);
    assert!((out[0].x - 7.5).abs() < 1e-12);
}

#[test]
fn two_way_surface_ignores_bodies_far_behind_a_segment() {
    let canvas = Canvas::new(100.0, 100.0);
    let sys = system_of(vec![orb(-20.0, 50.0, 10.0)], 100.0, 100.0);
    let two_way = Surface { boundary: Boundary::canvas(&canvas, Directionality::TwoWay) };
    assert_eq!(deltas(&two_way, &sys, &quiet_params())[0], NVec2::zeros());
}

/// Square obstacle [100, 200] x [50, 150] kept clear of bodies
fn obstacle() -> Surface {
    let pts = [
        NVec2::new(100.0, 50.0),
        NVec2::new(200.0, 50.0),
        NVec2::new(200.0, 150.0),
        NVec2::new(100.0, 150.0),
    ];
    let boundary = Boundary::polygon(&pts, Directionality::TwoWay).expect("valid polygon");
    Surface { boundary: boundary.inverted() }
}

#[test]
fn inverted_obstacle_leaves_clear_bodies_alone() {
    let sys = system_of(vec![orb(250.0, 100.0, 10.0), orb(150.0, 20.0, 10.0)], 300.0, 200.0);
    let out = deltas(&obstacle(), &sys, &quiet_params());
    assert_eq!(out[0], NVec2::zeros());
    assert_eq!(out[1], NVec2::zeros());
}

#[test]
fn inverted_obstacle_pushes_touching_bodies_away() {
    // 5 px into the right face, 5 px into the top face
    let sys = system_of(vec![orb(205.0, 100.0, 10.0), orb(150.0, 45.0, 10.0)], 300.0, 200.0);
    let out = deltas(&obstacle(), &sys, &quiet_params());
    assert!((out[0] - NVec2::new(2.5, 0.0)).norm() < 1e-12);
    assert!((out[1] - NVec2::new(0.0, -2.5)).norm() < 1e-12);
}

#[test]
fn inverted_canvas_does_not_herd_orbs_to_the_center() {
    let yaml = "canvas: { width: 300.0, height: 200.0 }\n\
                boundary: { inverted: true }\n\
                parameters: { num_orbs: 1, orb_radius: 10.0, center_strength: 0.0 }\n";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");
    let mut scenario = Scenario::build_scenario(cfg).expect("valid scenario");
    scenario.system.bodies[0].x = NVec2::new(60.0, 60.0);
    scenario.system.bodies[0].v = NVec2::zeros();

    for _ in 0..200 {
        scenario.tick();
    }
    assert_eq!(scenario.system.bodies[0].x, NVec2::new(60.0, 60.0));
}

#[test]
fn degenerate_polygon_is_rejected() {
    let pts = [NVec2::new(0.0, 0.0), NVec2::new(0.0, 0.0), NVec2::new(10.0, 10.0)];
    assert_eq!(
        Boundary::polygon(&pts, Directionality::TwoWay).unwrap_err(),
        ConfigError::DegenerateBoundary
    );
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn bodies_stay_inside_canvas() {
    let mut scenario = gas_scenario(3);
    let (w, h) = (scenario.system.canvas.width, scenario.system.canvas.height);
    let eps = 1e-9;

    for _ in 0..300 {
        scenario.tick();
        for b in scenario.system.bodies.iter().filter(|b| !b.is_pinned()) {
            assert!(b.x.x >= -eps && b.x.x <= w + eps, "x out of range: {:?}", b.x);
            assert!(b.x.y >= -eps && b.x.y <= h + eps, "y out of range: {:?}", b.x);
        }
    }
}

#[test]
fn bodies_stay_inside_canvas_with_tolerance() {
    let mut scenario = gas_scenario(3);
    let p = Parameters { boundary_tolerance: MAX_BOUNDARY_TOLERANCE, ..scenario.parameters.clone() };
    scenario.apply_parameters(p).expect("valid");
    let (w, h) = (scenario.system.canvas.width, scenario.system.canvas.height);
    let tol = MAX_BOUNDARY_TOLERANCE + 1e-9;

    for _ in 0..300 {
        scenario.tick();
        for b in scenario.system.bodies.iter().filter(|b| !b.is_pinned()) {
            assert!(b.x.x >= -tol && b.x.x <= w + tol, "x out of range: {:?}", b.x);
            assert!(b.x.y >= -tol && b.x.y <= h + tol, "y out of range: {:?}", b.x);
        }
    }
}

#[test]
fn surface_brings_a_body_back_from_the_tolerance_band() {
    let canvas = Canvas::new(100.0, 100.0);
    let mut params = quiet_params();
    params.boundary_tolerance = MAX_BOUNDARY_TOLERANCE;
    params.velocity_decay = 0.6;

    let run = |forces: &ForceSet| {
        let mut sys = system_of(vec![orb(-0.5, 50.0, 10.0)], 100.0, 100.0);
        sys.bodies[0].v = NVec2::new(-4.0, 0.0);
        let mut activity = Activity::default();
        let mut accels = Vec::new();
        for _ in 0..30 {
            step(&mut sys, forces, &params, &mut activity, &mut accels);
            assert!(sys.bodies[0].x.x >= -MAX_BOUNDARY_TOLERANCE);
        }
        sys.bodies[0].x.x
    };

    // with walls the orb ends fully inside, without them it rests on the clamp
    let walls = ForceSet::new().with(Surface { boundary: Boundary::canvas(&canvas, Directionality::TwoWay) });
    assert!(run(&walls) > 5.0);
    assert_eq!(run(&ForceSet::new()), -MAX_BOUNDARY_TOLERANCE);
}

#[test]
fn boundary_tolerance_is_capped() {
    let canvas = Canvas::new(300.0, 200.0);
    let p = Parameters { boundary_tolerance: MAX_BOUNDARY_TOLERANCE, ..Default::default() };
    assert!(p.validate(&canvas).is_ok());
    let p = Parameters { boundary_tolerance: 500.0, ..Default::default() };
    assert!(matches!(
        p.validate(&canvas),
        Err(ConfigError::OutOfRange { name: "boundary_tolerance", .. })
    ));
}

#[test]
fn body_count_is_stable_across_ticks() {
    let mut scenario = gas_scenario(11);
    let n = scenario.system.bodies.len();
    let orbs = scenario.system.num_orbs;
    for _ in 0..50 {
        scenario.tick();
    }
    assert_eq!(scenario.system.bodies.len(), n);
    assert_eq!(scenario.system.num_orbs, orbs);
    assert_eq!(scenario.system.tick, 50);
}

#[test]
fn pinned_body_sits_exactly_on_pin() {
    let mut scenario = gas_scenario(5);
    let target = scenario.system.bodies[0].x;
    assert_eq!(scenario.press(target.x, target.y), Some(0));
    let pin = scenario.drag(120.0, 90.0).expect("dragging");

    for _ in 0..20 {
        scenario.tick();
        assert_eq!(scenario.system.bodies[0].x, pin);
        assert_eq!(scenario.system.bodies[0].v, NVec2::zeros());
    }
}

#[test]
fn alpha_decays_toward_target() {
    let mut params = quiet_params();
    params.alpha_target = 0.0;
    params.alpha_decay = 0.5;
    let mut activity = Activity::new(1.0);
    activity.decay(&params);
    assert!((activity.alpha - 0.5).abs() < 1e-12);
    activity.decay(&params);
    assert!((activity.alpha - 0.25).abs() < 1e-12);

    // no decay: constant activity
    params.alpha_decay = 0.0;
    activity.decay(&params);
    assert!((activity.alpha - 0.25).abs() < 1e-12);
}

#[test]
fn non_finite_velocity_never_survives_a_tick() {
    let mut sys = system_of(vec![orb(50.0, 50.0, 5.0)], 100.0, 100.0);
    sys.bodies[0].v = NVec2::new(f64::NAN, 1.0);
    let forces = ForceSet::new();
    let mut activity = Activity::default();
    let mut accels = Vec::new();
    step(&mut sys, &forces, &quiet_params(), &mut activity, &mut accels);

    assert_eq!(sys.bodies[0].v, NVec2::zeros());
    assert_eq!(sys.bodies[0].x, NVec2::new(50.0, 50.0));
}

#[test]
fn velocity_decay_damps_free_motion() {
    let mut sys = system_of(vec![orb(50.0, 50.0, 5.0)], 100.0, 100.0);
    sys.bodies[0].v = NVec2::new(2.0, 0.0);
    let mut params = quiet_params();
    params.velocity_decay = 0.5;
    let mut activity = Activity::default();
    let mut accels = Vec::new();
    let report = step(&mut sys, &ForceSet::new(), &params, &mut activity, &mut accels);

    assert_eq!(sys.bodies[0].v, NVec2::new(1.0, 0.0));
    assert_eq!(sys.bodies[0].x, NVec2::new(51.0, 50.0));
    assert_eq!(report.tick, 1);
    assert!((report.max_speed - 1.0).abs() < 1e-12);
}

// ==================================================================================
// Body store tests
// ==================================================================================

#[test]
fn gas_count_floors_density_times_area() {
    let canvas = Canvas::new(100.0, 100.0);
    assert_eq!(gas_count_for(0.001, &canvas), 10);
    assert_eq!(gas_count_for(0.00109, &canvas), 10);
    assert_eq!(gas_count_for(0.0, &canvas), 0);

    let params = Parameters { num_orbs: 1, orb_radius: 10.0, gas_density: 0.001, ..Default::default() };
    let sys = System::initialize(&params, canvas, Vec::new(), &mut seeded(1)).expect("valid");
    assert_eq!(sys.num_gas(), 10);
    assert!(sys.gas().iter().all(|b| b.kind == BodyKind::Gas));
}

#[test]
fn orbs_start_inset_and_at_rest() {
    let params = Parameters { num_orbs: 20, orb_radius: 10.0, ..Default::default() };
    let canvas = Canvas::new(200.0, 150.0);
    let sys = System::initialize(&params, canvas, Vec::new(), &mut seeded(9)).expect("valid");
    for b in sys.orbs() {
        assert!(b.x.x >= 11.0 && b.x.x <= 189.0);
        assert!(b.x.y >= 11.0 && b.x.y <= 139.0);
        assert_eq!(b.v, NVec2::zeros());
        assert!(b.pin.is_none());
    }
}

#[test]
fn gas_velocity_components_are_gaussian_with_temperature_variance() {
    let mut rng = seeded(2024);
    let n = 50_000;
    let samples: Vec<f64> = (0..n)
        .flat_map(|_| {
            let v = random_velocity(&mut rng, 4.0);
            [v.x, v.y]
        })
        .collect();

    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / count;
    assert!(mean.abs() < 0.05, "mean {}", mean);
    assert!((var.sqrt() - 2.0).abs() < 0.05, "std dev {}", var.sqrt());

    // zero temperature: gas starts at rest
    assert_eq!(random_velocity(&mut rng, 0.0), NVec2::zeros());
}

#[test]
fn set_orb_radius_reclamps_orbs_and_pins() {
    let mut sys = system_of(
        vec![
            orb(15.0, 85.0, 10.0),
            orb(50.0, 50.0, 10.0),
            Body::gas(NVec2::new(1.0, 1.0), NVec2::zeros(), 2.0),
        ],
        100.0,
        100.0,
    );
    sys.bodies[1].pin = Some(NVec2::new(95.0, 5.0));

    sys.set_orb_radius(30.0).expect("valid radius");
    assert!(sys.orbs().iter().all(|b| b.radius == 30.0));
    assert_eq!(sys.bodies[0].x, NVec2::new(30.0, 70.0));
    assert_eq!(sys.bodies[1].x, NVec2::new(50.0, 50.0));
    assert_eq!(sys.bodies[1].pin, Some(NVec2::new(70.0, 30.0)));
    // gas keeps its own radius and position
    assert_eq!(sys.bodies[2].radius, 2.0);
    assert_eq!(sys.bodies[2].x, NVec2::new(1.0, 1.0));

    assert_eq!(
        sys.set_orb_radius(0.0),
        Err(ConfigError::NonPositiveRadius { name: "orb_radius", value: 0.0 })
    );
}

#[test]
fn resize_orbs_leaves_gas_untouched() {
    let mut scenario = gas_scenario(21);
    for _ in 0..10 {
        scenario.tick();
    }
    let gas_before: Vec<Body> = scenario.system.gas().to_vec();
    let orbs_before: Vec<Body> = scenario.system.orbs().to_vec();
    let params = scenario.parameters.clone();

    scenario.system.resize_orbs(7, &params, &mut seeded(2)).expect("grow");
    assert_eq!(scenario.system.num_orbs, 7);
    assert_eq!(scenario.system.orbs().iter().filter(|b| b.kind == BodyKind::Orb).count(), 7);
    assert_eq!(scenario.system.gas(), &gas_before[..]);
    // new orbs are prepended
    assert_eq!(&scenario.system.orbs()[3..], &orbs_before[..]);

    scenario.system.resize_orbs(2, &params, &mut seeded(2)).expect("shrink");
    assert_eq!(scenario.system.num_orbs, 2);
    assert_eq!(scenario.system.gas(), &gas_before[..]);
}

#[test]
fn resize_gas_appends_and_truncates() {
    let mut scenario = gas_scenario(8);
    let before: Vec<Body> = scenario.system.gas().to_vec();
    assert_eq!(before.len(), 60);

    let mut p = scenario.parameters.clone();
    p.gas_density = 0.002;
    scenario.system.resize_gas(&p, &mut seeded(4)).expect("grow");
    assert_eq!(scenario.system.num_gas(), 120);
    assert_eq!(&scenario.system.gas()[..60], &before[..]);

    p.gas_density = 0.0005;
    scenario.system.resize_gas(&p, &mut seeded(4)).expect("shrink");
    assert_eq!(scenario.system.gas(), &before[..30]);
    assert_eq!(scenario.system.num_orbs, 4);
}

#[test]
fn apply_parameters_reacts_to_structural_keys_only() {
    let mut scenario = gas_scenario(13);
    let gas_before: Vec<Body> = scenario.system.gas().to_vec();

    let mut p = scenario.parameters.clone();
    p.charge_strength = 5.0;
    let change = scenario.apply_parameters(p.clone()).expect("valid");
    assert!(!change.is_structural());
    assert_eq!(scenario.parameters.charge_strength, 5.0);

    p.num_orbs = 6;
    let change = scenario.apply_parameters(p.clone()).expect("valid");
    assert!(change.orbs_resized && !change.gas_resized);
    assert_eq!(scenario.system.num_orbs, 6);
    assert_eq!(scenario.system.gas(), &gas_before[..]);

    p.gas_radius = 1.5;
    let change = scenario.apply_parameters(p).expect("valid");
    assert!(change.gas_resampled);
    assert!(scenario.system.gas().iter().all(|b| b.radius == 1.5));
}

#[test]
fn invalid_parameters_change_nothing() {
    let mut scenario = gas_scenario(17);
    let snapshot = scenario.system.bodies.clone();
    let old = scenario.parameters.clone();

    let mut p = old.clone();
    p.num_orbs = 9;
    p.orb_radius = -1.0;
    let err = scenario.apply_parameters(p).unwrap_err();
    assert_eq!(err, ConfigError::NonPositiveRadius { name: "orb_radius", value: -1.0 });
    assert_eq!(scenario.system.bodies, snapshot);
    assert_eq!(scenario.parameters, old);
}

// ==================================================================================
// Configuration error tests
// ==================================================================================

#[test]
fn configuration_errors_fail_fast() {
    let canvas = Canvas::new(100.0, 100.0);
    let mut rng = seeded(0);

    let p = Parameters { orb_radius: 0.0, ..Default::default() };
    assert!(matches!(
        System::initialize(&p, canvas, Vec::new(), &mut rng),
        Err(ConfigError::NonPositiveRadius { name: "orb_radius", .. })
    ));

    let p = Parameters { orb_radius: 10.0, ..Default::default() };
    assert!(matches!(
        System::initialize(&p, Canvas::new(0.0, 100.0), Vec::new(), &mut rng),
        Err(ConfigError::NonPositiveDimension { .. })
    ));

    let p = Parameters { orb_radius: 10.0, gas_density: -0.1, ..Default::default() };
    assert_eq!(
        System::initialize(&p, canvas, Vec::new(), &mut rng).unwrap_err(),
        ConfigError::NegativeDensity(-0.1)
    );

    let p = Parameters { orb_radius: 10.0, collision_strength: 1.0, ..Default::default() };
    assert!(matches!(
        System::initialize(&p, canvas, Vec::new(), &mut rng),
        Err(ConfigError::OutOfRange { name: "collision_strength", .. })
    ));

    let p = Parameters { orb_radius: 10.0, num_orbs: 2, ..Default::default() };
    assert_eq!(
        System::initialize(&p, canvas, vec![Link::new(0, 2)], &mut rng).unwrap_err(),
        ConfigError::LinkOutOfRange { source: 0, target: 2, num_orbs: 2 }
    );

    let p = Parameters { orb_radius: 60.0, ..Default::default() };
    assert!(matches!(
        System::initialize(&p, canvas, Vec::new(), &mut rng),
        Err(ConfigError::OrbDoesNotFit { .. })
    ));
}

// ==================================================================================
// Interaction tests
// ==================================================================================

#[test]
fn press_then_drag_clamps_pin_inside_canvas() {
    let mut sys = system_of(vec![orb(50.0, 50.0, 30.0)], 100.0, 100.0);
    let mut ctl = Interaction::new();

    assert_eq!(ctl.press(&mut sys, 50.0, 50.0), Some(0));
    assert_eq!(ctl.state(), DragState::Dragging { body: 0 });

    let pin = ctl.drag(&mut sys, 200.0, 50.0);
    assert_eq!(pin, Some(NVec2::new(70.0, 50.0)));
    assert_eq!(sys.bodies[0].pin, Some(NVec2::new(70.0, 50.0)));
}

#[test]
fn press_ignores_gas_and_misses() {
    let gas = Body::gas(NVec2::new(20.0, 20.0), NVec2::zeros(), 5.0);
    let mut sys = system_of(vec![orb(70.0, 70.0, 10.0), gas], 100.0, 100.0);
    let mut ctl = Interaction::new();

    assert_eq!(ctl.press(&mut sys, 20.0, 20.0), None);
    assert_eq!(ctl.state(), DragState::Idle);
    // boundary of the hit radius is a miss
    assert_eq!(ctl.press(&mut sys, 80.0, 70.0), None);
    assert!(sys.bodies.iter().all(|b| b.pin.is_none()));
}

#[test]
fn release_without_press_is_a_no_op() {
    let mut sys = system_of(vec![orb(30.0, 30.0, 10.0), orb(70.0, 70.0, 10.0)], 100.0, 100.0);
    sys.bodies[1].pin = Some(NVec2::new(70.0, 70.0));
    let pins: Vec<_> = sys.bodies.iter().map(|b| b.pin).collect();
    let mut ctl = Interaction::new();
    let mut activity = Activity::new(0.1);

    assert_eq!(ctl.release(&mut sys, &mut activity, &Parameters::default()), None);
    assert_eq!(ctl.drag(&mut sys, 10.0, 10.0), None);
    assert_eq!(sys.bodies.iter().map(|b| b.pin).collect::<Vec<_>>(), pins);
    assert_eq!(activity.alpha, 0.1);
}

#[test]
fn release_unpins_and_reheats() {
    let mut sys = system_of(vec![orb(30.0, 30.0, 10.0)], 100.0, 100.0);
    let mut ctl = Interaction::new();
    let mut activity = Activity::new(0.05);
    let params = Parameters::default();

    ctl.press(&mut sys, 31.0, 29.0);
    ctl.drag(&mut sys, 60.0, 60.0);
    assert_eq!(ctl.release(&mut sys, &mut activity, &params), Some(0));
    assert_eq!(sys.bodies[0].pin, None);
    assert_eq!(ctl.state(), DragState::Idle);
    assert_eq!(activity.alpha, params.reheat_alpha);
}

#[test]
fn shrinking_orbs_cancels_drag() {
    let mut scenario = gas_scenario(19);
    let target = scenario.system.bodies[0].x;
    scenario.press(target.x, target.y);
    let mut p = scenario.parameters.clone();
    p.num_orbs = 2;
    scenario.apply_parameters(p).expect("valid");

    assert_eq!(scenario.interaction.state(), DragState::Idle);
    assert!(scenario.system.bodies.iter().all(|b| b.pin.is_none()));
    assert_eq!(scenario.release(), None);
}
