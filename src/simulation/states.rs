//! Core state types for the orb simulation.
//!
//! Defines the 2D body/system structs:
//! - `Body` (orb or gas particle) using `NVec2`
//! - `Link` between two orbs
//! - `Canvas` extents
//! - `System` holding bodies (orbs first, then gas), links and the tick counter

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// What a body is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Orb, // interactive, linkable
    Gas, // decorative, never picked or linked
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub radius: f64, // radius (> 0)
    pub pin: Option<NVec2>, // fixed position while dragged
    pub kind: BodyKind,
}

impl Body {
    pub fn orb(x: NVec2, radius: f64) -> Self {
        Self { x, v: NVec2::zeros(), radius, pin: None, kind: BodyKind::Orb }
    }

    pub fn gas(x: NVec2, v: NVec2, radius: f64) -> Self {
        Self { x, v, radius, pin: None, kind: BodyKind::Gas }
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// Persistent relation between two orb indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

impl Link {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// A link only acts (and is drawn) while both endpoints are orbs
    pub fn is_live(&self, num_orbs: usize) -> bool {
        self.source < num_orbs && self.target < num_orbs && self.source != self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(0.5 * self.width, 0.5 * self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // orbs occupy 0..num_orbs, gas follows
    pub links: Vec<Link>,
    pub canvas: Canvas,
    pub num_orbs: usize,
    pub tick: u64, // completed ticks
}

impl System {
    pub fn orbs(&self) -> &[Body] {
        &self.bodies[..self.num_orbs]
    }

    pub fn gas(&self) -> &[Body] {
        &self.bodies[self.num_orbs..]
    }

    pub fn num_gas(&self) -> usize {
        self.bodies.len() - self.num_orbs
    }

    /// Links whose endpoints are both current orbs
    pub fn live_links(&self) -> impl Iterator<Item = &Link> + '_ {
        let n = self.num_orbs;
        self.links.iter().filter(move |l| l.is_live(n))
    }
}
