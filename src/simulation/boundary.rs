//! Boundary polygon used by the surface force
//!
//! Segments are stored in drawing order; the side to the left of
//! `to - from` (rotated with y pointing down) is the inside.

use serde::Deserialize;

use super::error::ConfigError;
use super::states::{Canvas, NVec2};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directionality {
    /// Pushes a body back inside whichever way it got out, as long as its
    /// center is still within one radius of the segment
    #[serde(rename = "two_way")]
    #[default]
    TwoWay,

    /// Only stops bodies leaving from the inside; a body whose center is
    /// already outside passes through
    #[serde(rename = "one_way")]
    OneWay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: NVec2,
    pub to: NVec2,
    pub directionality: Directionality,
}

impl Segment {
    /// Unit normal pointing to the inside
    pub fn inward_normal(&self) -> NVec2 {
        let d = self.to - self.from;
        NVec2::new(-d.y, d.x) / d.norm()
    }

    /// Signed distance of `p` to the segment's line, positive inside
    pub fn signed_distance(&self, p: NVec2) -> f64 {
        (p - self.from).dot(&self.inward_normal())
    }

    /// Whether `p` projects onto the segment, allowing `margin` past either end
    pub fn spans(&self, p: NVec2, margin: f64) -> bool {
        let d = self.to - self.from;
        let len = d.norm();
        let along = (p - self.from).dot(&d) / len;
        along >= -margin && along <= len + margin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub segments: Vec<Segment>,
}

impl Boundary {
    /// Closed polygon through `points`; fails on repeated consecutive points
    pub fn polygon(points: &[NVec2], directionality: Directionality) -> Result<Self, ConfigError> {
        let n = points.len();
        if n < 3 {
            return Err(ConfigError::DegenerateBoundary);
        }
        let mut segments = Vec::with_capacity(n);
        for i in 0..n {
            let from = points[i];
            let to = points[(i + 1) % n];
            if (to - from).norm() <= f64::EPSILON {
                return Err(ConfigError::DegenerateBoundary);
            }
            segments.push(Segment { from, to, directionality });
        }
        Ok(Self { segments })
    }

    /// The canvas rectangle, inside facing in
    pub fn canvas(canvas: &Canvas, directionality: Directionality) -> Self {
        let (w, h) = (canvas.width, canvas.height);
        let corners = [NVec2::new(0.0, 0.0), NVec2::new(w, 0.0), NVec2::new(w, h), NVec2::new(0.0, h)];
        let segments = (0..4)
            .map(|i| Segment { from: corners[i], to: corners[(i + 1) % 4], directionality })
            .collect();
        Self { segments }
    }

    /// Same outline with every segment flipped, so the former outside becomes the inside
    pub fn inverted(&self) -> Self {
        let segments = self
            .segments
            .iter()
            .rev()
            .map(|s| Segment { from: s.to, to: s.from, directionality: s.directionality })
            .collect();
        Self { segments }
    }
}
