//! Simulation activity ("alpha")
//!
//! Alpha scales the soft forces (charge, link, center); it eases toward
//! `alpha_target` each tick and is bumped back up by a reheat.

use super::params::Parameters;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activity {
    pub alpha: f64, // current activity in [0, 1]
}

impl Default for Activity {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl Activity {
    pub fn new(alpha: f64) -> Self {
        Self { alpha: alpha.clamp(0.0, 1.0) }
    }

    /// alpha += (alpha_target - alpha) * alpha_decay
    pub fn decay(&mut self, params: &Parameters) {
        self.alpha += (params.alpha_target - self.alpha) * params.alpha_decay;
        self.alpha = self.alpha.clamp(0.0, 1.0);
    }

    /// Restore motion after an interaction ends
    pub fn reheat(&mut self, params: &Parameters) {
        self.alpha = params.reheat_alpha.max(params.alpha_target).clamp(0.0, 1.0);
    }
}
