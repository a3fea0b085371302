use std::time::Instant;

use crate::simulation::activity::Activity;
use crate::simulation::boundary::{Boundary, Directionality};
use crate::simulation::forces::{Bounce, Charge, Force, ForceSet};
use crate::simulation::integrator::step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Canvas, NVec2, System};

/// Deterministic gas cloud of `n` particles, no rand needed
fn gas_system(n: usize, canvas: Canvas, radius: f64) -> System {
    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            (0.5 + 0.45 * (i_f * 0.37).sin()) * canvas.width,
            (0.5 + 0.45 * (i_f * 0.13).cos()) * canvas.height,
        );
        let v = NVec2::new((i_f * 0.07).sin(), (i_f * 0.11).cos());
        bodies.push(Body::gas(x, v, radius));
    }
    System { bodies, links: Vec::new(), canvas, num_orbs: 0, tick: 0 }
}

/// Time the two pairwise forces alone for growing body counts
pub fn bench_forces() {
    let ns = [250, 500, 1000, 2000, 4000];
    let canvas = Canvas::new(1200.0, 800.0);
    let params = Parameters::default();

    for n in ns {
        let sys = gas_system(n, canvas, params.gas_radius);
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        Charge.apply(&sys, &params, 1.0, &mut out);
        Bounce.apply(&sys, &params, 1.0, &mut out);

        let t0 = Instant::now();
        Charge.apply(&sys, &params, 1.0, &mut out);
        let dt_charge = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        Bounce.apply(&sys, &params, 1.0, &mut out);
        let dt_bounce = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, charge = {:8.6} s, bounce = {:8.6} s", dt_charge, dt_bounce);
    }
}

/// Average cost of a full tick with every force active
pub fn bench_tick() {
    let ns = [250, 500, 1000, 2000];
    let ticks = 50;
    let canvas = Canvas::new(1200.0, 800.0);
    let params = Parameters::default();

    for n in ns {
        let mut sys = gas_system(n, canvas, params.gas_radius);
        let forces = ForceSet::standard(Boundary::canvas(&canvas, Directionality::TwoWay), 0);
        let mut activity = Activity::default();
        let mut accels = Vec::new();

        let t0 = Instant::now();
        for _ in 0..ticks {
            step(&mut sys, &forces, &params, &mut activity, &mut accels);
        }
        let per_tick = t0.elapsed().as_secs_f64() / ticks as f64;

        println!("N = {n:5}, tick = {:8.6} s", per_tick);
    }
}
