//! Per-frame integrator for the orb system
//!
//! One tick runs: accumulate forces -> integrate unpinned bodies (pinned ones
//! are snapped to their pin) -> clamp to the canvas tolerance -> decay alpha ->
//! report. Driven by a `ForceSet`, `Parameters` and `Activity`.

use super::activity::Activity;
use super::forces::ForceSet;
use super::params::Parameters;
use super::states::{NVec2, System};

/// Summary returned after every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64, // ticks completed so far
    pub alpha: f64, // alpha after decay
    pub max_speed: f64, // fastest unpinned body
}

/// Advance the system by one tick.
/// `accels` is scratch space reused between ticks; it is resized to the
/// current body count so resizes between ticks need no extra care.
pub fn step(
    sys: &mut System,
    forces: &ForceSet,
    params: &Parameters,
    activity: &mut Activity,
    accels: &mut Vec<NVec2>,
) -> TickReport {
    // Forces read the snapshot from the end of the previous tick
    forces.accumulate(&*sys, params, activity.alpha, accels);

    let decay = params.velocity_decay;
    let tol = params.boundary_tolerance;
    let (w, h) = (sys.canvas.width, sys.canvas.height);
    let mut max_speed: f64 = 0.0;

    for (b, a) in sys.bodies.iter_mut().zip(accels.iter()) {
        if let Some(pin) = b.pin {
            // pin fully overrides physics
            b.x = pin;
            b.v = NVec2::zeros();
            continue;
        }

        b.v += *a;
        b.v *= decay;
        // a NaN velocity would never recover, drop it
        if !(b.v.x.is_finite() && b.v.y.is_finite()) {
            b.v = NVec2::zeros();
        }
        b.x += b.v;

        // clamp to boundary tolerance
        b.x.x = b.x.x.max(-tol).min(w + tol);
        b.x.y = b.x.y.max(-tol).min(h + tol);

        max_speed = max_speed.max(b.v.norm());
    }

    activity.decay(params);
    sys.tick += 1;

    TickReport {
        tick: sys.tick,
        alpha: activity.alpha,
        max_speed,
    }
}
