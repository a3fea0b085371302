//! Pointer interaction: press / drag / release mapped onto orb pins
//!
//! `Idle -> press on an orb -> Dragging(orb) -> release -> Idle`.
//! Gas is never picked. Drag and release without a preceding press are no-ops.

use super::activity::Activity;
use super::params::Parameters;
use super::states::{BodyKind, NVec2, System};
use super::store::clamp_inside;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { body: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: DragState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { body } => Some(body),
            DragState::Idle => None,
        }
    }

    /// Pick the first orb (store order) whose center is closer than its radius.
    /// The picked orb is held where it is until the first drag.
    pub fn press(&mut self, sys: &mut System, x: f64, y: f64) -> Option<usize> {
        let p = NVec2::new(x, y);
        let hit = pick_orb(sys, p)?;

        let canvas = sys.canvas;
        let b = &mut sys.bodies[hit];
        b.pin = Some(clamp_inside(b.x, b.radius, &canvas));
        b.v = NVec2::zeros();
        self.state = DragState::Dragging { body: hit };
        Some(hit)
    }

    /// Move the pin of the dragged orb, clamped to `[radius, dimension - radius]`
    pub fn drag(&mut self, sys: &mut System, x: f64, y: f64) -> Option<NVec2> {
        let body = self.dragged()?;
        if body >= sys.num_orbs {
            // the orb went away under the pointer
            self.state = DragState::Idle;
            return None;
        }
        let canvas = sys.canvas;
        let b = &mut sys.bodies[body];
        let pin = clamp_inside(NVec2::new(x, y), b.radius, &canvas);
        b.pin = Some(pin);
        Some(pin)
    }

    /// Unpin the dragged orb and reheat; does nothing while idle
    pub fn release(&mut self, sys: &mut System, activity: &mut Activity, params: &Parameters) -> Option<usize> {
        let body = self.dragged()?;
        self.state = DragState::Idle;
        if let Some(b) = sys.bodies.get_mut(body) {
            b.pin = None;
        }
        activity.reheat(params);
        Some(body)
    }

    /// Drop an active drag without reheating (used before the orb segment changes)
    pub fn cancel(&mut self, sys: &mut System) {
        if let Some(body) = self.dragged() {
            if let Some(b) = sys.bodies.get_mut(body) {
                b.pin = None;
            }
        }
        self.state = DragState::Idle;
    }
}

/// First orb whose center lies strictly within its own radius of `p`
pub fn pick_orb(sys: &System, p: NVec2) -> Option<usize> {
    sys.bodies
        .iter()
        .take(sys.num_orbs)
        .position(|b| b.kind == BodyKind::Orb && (b.x - p).norm() < b.radius)
}
