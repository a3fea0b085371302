//! Body store: building the body collection and resizing it in place.
//!
//! Orbs always occupy the front of `System::bodies` and gas the back, so a
//! resize of one segment never touches the other.

use super::error::ConfigError;
use super::params::{Parameters, ORB_INSET};
use super::random::{random_velocity, RandomSource};
use super::states::{Body, BodyKind, Canvas, Link, NVec2, System};

impl System {
    /// Build `num_orbs` resting orbs and `floor(gas_density * area)` gas particles
    pub fn initialize<R: RandomSource + ?Sized>(
        params: &Parameters,
        canvas: Canvas,
        links: Vec<Link>,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        params.validate(&canvas)?;
        for l in &links {
            if !l.is_live(params.num_orbs) {
                return Err(ConfigError::LinkOutOfRange {
                    source: l.source,
                    target: l.target,
                    num_orbs: params.num_orbs,
                });
            }
        }

        let n_gas = params.gas_count(&canvas);
        let mut bodies = Vec::with_capacity(params.num_orbs + n_gas);
        for _ in 0..params.num_orbs {
            bodies.push(new_orb(&canvas, params.orb_radius, rng));
        }
        for _ in 0..n_gas {
            bodies.push(new_gas(&canvas, params, rng));
        }

        Ok(Self {
            bodies,
            links,
            canvas,
            num_orbs: params.num_orbs,
            tick: 0,
        })
    }

    /// Grow the orb segment by prepending fresh orbs, or shrink it by truncation.
    /// Gas bodies are left untouched.
    pub fn resize_orbs<R: RandomSource + ?Sized>(
        &mut self,
        new_count: usize,
        params: &Parameters,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        let mut p = params.clone();
        p.num_orbs = new_count;
        p.validate(&self.canvas)?;

        let old = self.num_orbs;
        if new_count > old {
            let fresh: Vec<Body> = (0..new_count - old)
                .map(|_| new_orb(&self.canvas, params.orb_radius, rng))
                .collect();
            self.bodies.splice(0..0, fresh);
        } else if new_count < old {
            self.bodies.drain(new_count..old);
        }
        self.num_orbs = new_count;
        Ok(())
    }

    /// Match the gas segment to `params.gas_density`: append new samples or truncate
    pub fn resize_gas<R: RandomSource + ?Sized>(&mut self, params: &Parameters, rng: &mut R) -> Result<(), ConfigError> {
        params.validate(&self.canvas)?;

        let target = params.gas_count(&self.canvas);
        let current = self.num_gas();
        if target > current {
            for _ in 0..target - current {
                let g = new_gas(&self.canvas, params, rng);
                self.bodies.push(g);
            }
        } else {
            self.bodies.truncate(self.num_orbs + target);
        }
        Ok(())
    }

    /// Throw away every gas particle and sample the segment again (gas radius changed)
    pub fn resample_gas<R: RandomSource + ?Sized>(&mut self, params: &Parameters, rng: &mut R) -> Result<(), ConfigError> {
        params.validate(&self.canvas)?;
        self.bodies.truncate(self.num_orbs);
        self.resize_gas(params, rng)
    }

    /// Change every orb radius in place, pulling orbs back inside the new inset
    pub fn set_orb_radius(&mut self, radius: f64) -> Result<(), ConfigError> {
        if !(radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius { name: "orb_radius", value: radius });
        }
        let canvas = self.canvas;
        for b in self.bodies.iter_mut().filter(|b| b.kind == BodyKind::Orb) {
            b.radius = radius;
            b.x = clamp_inside(b.x, radius, &canvas);
            if let Some(pin) = b.pin {
                b.pin = Some(clamp_inside(pin, radius, &canvas));
            }
        }
        Ok(())
    }
}

/// Clamp a point to `[radius, dimension - radius]` on both axes
pub fn clamp_inside(p: NVec2, radius: f64, canvas: &Canvas) -> NVec2 {
    NVec2::new(clamp_axis(p.x, radius, canvas.width), clamp_axis(p.y, radius, canvas.height))
}

fn clamp_axis(v: f64, radius: f64, extent: f64) -> f64 {
    // canvas narrower than the body: sit in the middle instead of panicking in clamp
    if extent <= 2.0 * radius {
        return 0.5 * extent;
    }
    v.max(radius).min(extent - radius)
}

fn new_orb<R: RandomSource + ?Sized>(canvas: &Canvas, radius: f64, rng: &mut R) -> Body {
    let inset = ORB_INSET * radius;
    let x = rng.uniform(inset, canvas.width - inset);
    let y = rng.uniform(inset, canvas.height - inset);
    Body::orb(NVec2::new(x, y), radius)
}

fn new_gas<R: RandomSource + ?Sized>(canvas: &Canvas, params: &Parameters, rng: &mut R) -> Body {
    let r = params.gas_radius;
    let x = rng.uniform(r, canvas.width - r);
    let y = rng.uniform(r, canvas.height - r);
    let v = random_velocity(rng, params.temperature);
    Body::gas(NVec2::new(x, y), v, r)
}
