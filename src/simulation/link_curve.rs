//! Geometry of the connector drawn between two linked orbs
//!
//! Two interchangeable styles:
//! - `Lens`: a closed outline of two cubic beziers joining tangent points on
//!   both circumferences (the "eye" between two orbs)
//! - `VariableWidth`: a straight segment whose stroke width depends on the
//!   distance between the centres
//!
//! Everything here is a pure function of its inputs; nothing touches body state.

use serde::Deserialize;
use std::f64::consts::{FRAC_PI_2, PI};

use super::params::Parameters;
use super::states::NVec2;

/// Below this centre distance there is no direction to build a connector along
pub const MIN_LINK_DISTANCE: f64 = 1e-6;

/// Half of the distance window in which the semicircle profile is non-zero
pub const SEMICIRCLE_HALF_WIDTH: f64 = 5.0;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    #[serde(rename = "lens")]
    #[default]
    Lens,

    #[serde(rename = "line")]
    VariableWidth,
}

/// Stroke width as a function of centre distance, for `LinkStyle::VariableWidth`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthProfile {
    #[serde(rename = "gaussian")] // exp(-(d / 2r)^2) * r
    #[default]
    Gaussian,

    #[serde(rename = "semicircle")] // peaks at d = 2r, zero outside [2r - 5, 2r + 5]
    Semicircle,
}

/// Shape parameters read from `Parameters` once per draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkShape {
    pub style: LinkStyle,
    pub profile: WidthProfile,
    pub max_link_spread: f64, // radians
    pub spread_scaling_factor: f64,
    pub handle_size: f64,
}

impl LinkShape {
    pub fn from_parameters(p: &Parameters) -> Self {
        Self {
            style: p.link_style,
            profile: p.width_profile,
            max_link_spread: p.max_link_spread,
            spread_scaling_factor: p.spread_scaling_factor,
            handle_size: p.handle_size,
        }
    }

    /// Angular offset of the tangent points, kept inside a quarter turn
    pub fn spread(&self) -> f64 {
        (self.max_link_spread * self.spread_scaling_factor).clamp(0.0, FRAC_PI_2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: NVec2,
    pub c1: NVec2,
    pub c2: NVec2,
    pub p3: NVec2,
}

impl CubicBezier {
    pub fn point_at(&self, t: f64) -> NVec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u) + self.c1 * (3.0 * u * u * t) + self.c2 * (3.0 * u * t * t) + self.p3 * (t * t * t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkGeometry {
    /// Closed outline: `upper` runs source -> target, `lower` runs target -> source.
    /// The short gaps between them lie on the circumferences and are covered by the bodies.
    Lens { upper: CubicBezier, lower: CubicBezier },
    Line { from: NVec2, to: NVec2, width: f64 },
    /// Nothing to draw (coincident centres or zero width)
    Hidden,
}

impl LinkGeometry {
    /// Flatten into a point list; a lens comes back closed (first point repeated last)
    pub fn polyline(&self, samples: usize) -> Vec<NVec2> {
        let samples = samples.max(1);
        match self {
            LinkGeometry::Lens { upper, lower } => {
                let mut pts = Vec::with_capacity(2 * (samples + 1) + 1);
                for curve in [upper, lower] {
                    for k in 0..=samples {
                        pts.push(curve.point_at(k as f64 / samples as f64));
                    }
                }
                pts.push(upper.p0);
                pts
            }
            LinkGeometry::Line { from, to, .. } => vec![*from, *to],
            LinkGeometry::Hidden => Vec::new(),
        }
    }
}

/// Build the connector for one link according to `shape.style`
pub fn link_geometry(source: NVec2, target: NVec2, radius: f64, shape: &LinkShape) -> LinkGeometry {
    match shape.style {
        LinkStyle::Lens => lens_curve(source, target, radius, shape),
        LinkStyle::VariableWidth => variable_width_line(source, target, radius, shape.profile),
    }
}

pub fn lens_curve(source: NVec2, target: NVec2, radius: f64, shape: &LinkShape) -> LinkGeometry {
    let r = target - source;
    let d = r.norm();
    if d < MIN_LINK_DISTANCE || radius <= 0.0 {
        return LinkGeometry::Hidden;
    }

    let angle = r.y.atan2(r.x);
    let spread = shape.spread();

    // tangent angles: a1/a3 on one side of the axis, a2/a4 on the other
    let a1 = angle + spread;
    let a2 = angle - spread;
    let a3 = angle + PI - spread;
    let a4 = angle - PI + spread;

    let p1 = source + polar(a1, radius);
    let p2 = source + polar(a2, radius);
    let p3 = target + polar(a3, radius);
    let p4 = target + polar(a4, radius);

    // handles collapse as the bodies close in so the curve never loops
    let handle = radius * shape.handle_size * (d / radius).min(1.0);

    let upper = CubicBezier {
        p0: p1,
        c1: p1 + polar(a1 - FRAC_PI_2, handle),
        c2: p3 + polar(a3 + FRAC_PI_2, handle),
        p3,
    };
    let lower = CubicBezier {
        p0: p4,
        c1: p4 + polar(a4 - FRAC_PI_2, handle),
        c2: p2 + polar(a2 + FRAC_PI_2, handle),
        p3: p2,
    };

    LinkGeometry::Lens { upper, lower }
}

pub fn variable_width_line(source: NVec2, target: NVec2, radius: f64, profile: WidthProfile) -> LinkGeometry {
    let d = (target - source).norm();
    if d < MIN_LINK_DISTANCE {
        return LinkGeometry::Hidden;
    }
    let width = link_width(d, radius, profile);
    if width <= 0.0 {
        return LinkGeometry::Hidden;
    }
    LinkGeometry::Line { from: source, to: target, width }
}

/// Stroke width for a centre distance `d`; never negative
pub fn link_width(d: f64, radius: f64, profile: WidthProfile) -> f64 {
    let w = match profile {
        WidthProfile::Gaussian => gaussian_width(d, radius),
        WidthProfile::Semicircle => semicircle_width(d, radius),
    };
    if w.is_finite() { w.max(0.0) } else { 0.0 }
}

pub fn gaussian_width(d: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    let q = d / (2.0 * radius);
    (-(q * q)).exp() * radius
}

pub fn semicircle_width(d: f64, radius: f64) -> f64 {
    let off = d - 2.0 * radius;
    if off.abs() >= SEMICIRCLE_HALF_WIDTH {
        return 0.0;
    }
    (SEMICIRCLE_HALF_WIDTH * SEMICIRCLE_HALF_WIDTH - off * off).sqrt()
}

fn polar(angle: f64, len: f64) -> NVec2 {
    NVec2::new(angle.cos(), angle.sin()) * len
}
