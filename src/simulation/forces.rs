//! Force contributors for the orb engine
//!
//! Each term reads the current body snapshot and adds a velocity delta per
//! body into a shared buffer. No term sees another term's output from the same
//! tick, so the order they are registered in only affects float summation.
//!
//! - `Charge`: pairwise repulsion (attraction for negative strength)
//! - `Bounce`: soft collision between overlapping bodies
//! - `Surface`: reflection off the boundary polygon
//! - `LinkSpring`: Hooke spring along every live link
//! - `CenterPull`: weak pull of orbs toward the canvas center
//! - `Brownian`: uniform velocity jitter on free orbs
//! - `Viscosity`: quadratic drag against orb velocity

use super::boundary::{Boundary, Directionality};
use super::params::Parameters;
use super::random::{seeded, RandomSource};
use super::states::{BodyKind, NVec2, System};

/// Squared distance under which a pair has no usable direction
pub const MIN_DISTANCE2: f64 = 1e-9;

/// Collection of force terms whose contributions are summed per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Every force the simulation runs with, walls given by `boundary`.
    /// `seed` drives the Brownian jitter.
    pub fn standard(boundary: Boundary, seed: u64) -> Self {
        Self::new()
            .with(Charge)
            .with(Bounce)
            .with(Surface { boundary })
            .with(LinkSpring)
            .with(CenterPull)
            .with(Brownian { seed })
            .with(Viscosity)
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    /// Compute the total velocity delta of every body in `sys`
    /// - `out` is resized to the body count and zeroed first
    pub fn accumulate(&self, sys: &System, params: &Parameters, alpha: f64, out: &mut Vec<NVec2>) {
        out.clear();
        out.resize(sys.bodies.len(), NVec2::zeros());

        for term in &self.terms {
            term.apply(sys, params, alpha, out);
        }
    }
}

/// A force source; implementations add their contribution into `out[i]`
pub trait Force {
    fn name(&self) -> &'static str;
    fn apply(&self, sys: &System, params: &Parameters, alpha: f64, out: &mut [NVec2]);
}

/// How a pair-shared delta is split: pinned bodies take none of it
pub fn pair_weights(sys: &System, i: usize, j: usize) -> (f64, f64) {
    match (sys.bodies[i].is_pinned(), sys.bodies[j].is_pinned()) {
        (false, false) => (0.5, 0.5),
        (true, false) => (0.0, 1.0),
        (false, true) => (1.0, 0.0),
        (true, true) => (0.0, 0.0),
    }
}

/// Repulsion falling off with distance: `out[i] -= r * strength * alpha / |r|^2`.
/// `|r|^2` is floored at the smaller radius squared, so overlapping pairs get a
/// bounded push that fades to zero as the centers meet.
pub struct Charge;

impl Force for Charge {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn apply(&self, sys: &System, params: &Parameters, alpha: f64, out: &mut [NVec2]) {
        let k = params.charge_strength * alpha;
        if k == 0.0 {
            return;
        }
        let n = sys.bodies.len();
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                // r points from i to j
                let r = bj.x - bi.x;
                let d2 = r.dot(&r);
                if d2 < MIN_DISTANCE2 {
                    continue;
                }
                let d_min = bi.radius.min(bj.radius);
                let push = r * (k / d2.max(d_min * d_min));
                out[i] -= push;
                out[j] += push;
            }
        }
    }
}

/// Penetration-proportional impulse along the separation axis.
/// Only `collision_strength` (< 1) of the overlap is removed per tick.
pub struct Bounce;

impl Force for Bounce {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn apply(&self, sys: &System, params: &Parameters, _alpha: f64, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                let reach = bi.radius + bj.radius;
                let r = bj.x - bi.x;
                let d2 = r.dot(&r);
                if d2 >= reach * reach {
                    continue;
                }

                // coincident centers: separate along +x so the pair still comes apart
                let (axis, d) = if d2 < MIN_DISTANCE2 {
                    (NVec2::new(1.0, 0.0), 0.0)
                } else {
                    let d = d2.sqrt();
                    (r / d, d)
                };

                let impulse = axis * ((reach - d) * params.collision_strength);
                let (wi, wj) = pair_weights(sys, i, j);
                out[i] -= impulse * wi;
                out[j] += impulse * wj;
            }
        }
    }
}

/// Reflection off the boundary polygon.
/// A body whose edge crosses a segment is pushed back along the inward normal
/// and any outward velocity component is mirrored. Only bodies in the band
/// `-radius < s < radius` around a segment are touched; anything further
/// behind it belongs to another part of the outline.
pub struct Surface {
    pub boundary: Boundary,
}

impl Force for Surface {
    fn name(&self) -> &'static str {
        "surface"
    }

    fn apply(&self, sys: &System, params: &Parameters, _alpha: f64, out: &mut [NVec2]) {
        for seg in &self.boundary.segments {
            let normal = seg.inward_normal();
            for (b, dv) in sys.bodies.iter().zip(out.iter_mut()) {
                let s = seg.signed_distance(b.x);
                if s >= b.radius || s <= -b.radius || !seg.spans(b.x, b.radius) {
                    continue;
                }
                if seg.directionality == Directionality::OneWay && s < 0.0 {
                    continue;
                }
                let penetration = b.radius - s;

                *dv += normal * (penetration * params.surface_strength);
                let vn = b.v.dot(&normal);
                if vn < 0.0 {
                    *dv -= normal * (2.0 * vn);
                }
            }
        }
    }
}

/// Spring along each live link, `stretch * link_strength * alpha`
pub struct LinkSpring;

impl Force for LinkSpring {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&self, sys: &System, params: &Parameters, alpha: f64, out: &mut [NVec2]) {
        let k = params.link_strength * alpha;
        if k == 0.0 {
            return;
        }
        for link in sys.live_links() {
            let (s, t) = (link.source, link.target);
            let r = sys.bodies[t].x - sys.bodies[s].x;
            let d2 = r.dot(&r);
            if d2 < MIN_DISTANCE2 {
                continue;
            }
            let d = d2.sqrt();
            let stretch = d - params.link_distance;
            // positive stretch pulls the endpoints together
            let f = r * (stretch * k / d);
            let (ws, wt) = pair_weights(sys, s, t);
            out[s] += f * ws;
            out[t] -= f * wt;
        }
    }
}

/// Pull of every orb toward the canvas center
pub struct CenterPull;

impl Force for CenterPull {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(&self, sys: &System, params: &Parameters, alpha: f64, out: &mut [NVec2]) {
        let k = params.center_strength * alpha;
        if k == 0.0 {
            return;
        }
        let c = sys.canvas.center();
        for (b, dv) in sys.bodies.iter().zip(out.iter_mut()) {
            if b.kind == BodyKind::Orb {
                *dv += (c - b.x) * k;
            }
        }
    }
}

/// Uniform jitter in `[-brownian_range, brownian_range)` per axis on free orbs.
/// Samples are drawn from a generator keyed on `seed` and the tick, so a
/// replay from the same seed reproduces the same jitter.
pub struct Brownian {
    pub seed: u64,
}

impl Force for Brownian {
    fn name(&self) -> &'static str {
        "brownian"
    }

    fn apply(&self, sys: &System, params: &Parameters, _alpha: f64, out: &mut [NVec2]) {
        let range = params.brownian_range;
        if range <= 0.0 {
            return;
        }
        let mut rng = seeded(self.seed ^ sys.tick.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        for (b, dv) in sys.bodies.iter().zip(out.iter_mut()) {
            if b.kind != BodyKind::Orb || b.is_pinned() {
                continue;
            }
            *dv += NVec2::new(rng.uniform(-range, range), rng.uniform(-range, range));
        }
    }
}

/// Drag of magnitude `speed^2 * viscosity` against the velocity of free orbs.
/// Capped at the current speed so drag never reverses a body.
pub struct Viscosity;

impl Force for Viscosity {
    fn name(&self) -> &'static str {
        "viscosity"
    }

    fn apply(&self, sys: &System, params: &Parameters, _alpha: f64, out: &mut [NVec2]) {
        let c = params.viscosity;
        if c <= 0.0 {
            return;
        }
        for (b, dv) in sys.bodies.iter().zip(out.iter_mut()) {
            if b.kind != BodyKind::Orb || b.is_pinned() {
                continue;
            }
            let speed = b.v.norm();
            if speed == 0.0 {
                continue;
            }
            *dv -= b.v * (speed * c).min(1.0);
        }
    }
}
