//! Build a fully-initialized orb scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - parameters (`Parameters`), validated
//! - system state (`System` with orbs, gas and links at tick 0)
//! - activity state (`Activity`)
//! - active force set (`ForceSet`)
//! - pointer interaction state and the seeded random source
//!
//! The scenario is inserted into Bevy as a `Resource`; the headless runner and
//! the tests drive it through the same methods.

use bevy::prelude::Resource;
use rand::rngs::StdRng;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::activity::Activity;
use crate::simulation::boundary::Boundary;
use crate::simulation::error::ConfigError;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{step, TickReport};
use crate::simulation::interaction::Interaction;
use crate::simulation::params::{validate_canvas, Parameters};
use crate::simulation::random::seeded;
use crate::simulation::states::{Canvas, Link, NVec2, System};

/// What a call to `Scenario::apply_parameters` changed structurally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconfiguration {
    pub orbs_resized: bool,
    pub orb_radius_changed: bool,
    pub gas_resized: bool,
    pub gas_resampled: bool,
}

impl Reconfiguration {
    pub fn is_structural(&self) -> bool {
        self.orbs_resized || self.orb_radius_changed || self.gas_resized || self.gas_resampled
    }
}

/// Bevy resource representing a fully-initialized orb scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it owns the parameters, current system state, activity, forces,
/// the interaction state machine and the random source
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub activity: Activity,
    pub forces: ForceSet,
    pub interaction: Interaction,
    pub rng: StdRng,
    accels: Vec<NVec2>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let canvas = Canvas::new(cfg.canvas.width, cfg.canvas.height);
        validate_canvas(&canvas)?;

        // Parameters (runtime) from ParametersConfig
        let parameters = cfg.parameters.resolve();

        // Walls: custom polygon or the canvas rectangle
        let b_cfg = &cfg.boundary;
        let mut boundary = match &b_cfg.polygon {
            Some(points) => {
                let pts: Vec<NVec2> = points.iter().map(|p| NVec2::new(p[0], p[1])).collect();
                Boundary::polygon(&pts, b_cfg.directionality)?
            }
            None => Boundary::canvas(&canvas, b_cfg.directionality),
        };
        if b_cfg.inverted {
            boundary = boundary.inverted();
        }

        let links = cfg.links.iter().map(|l| Link::new(l[0], l[1])).collect();
        Self::new(parameters, canvas, links, ForceSet::standard(boundary, cfg.seed), cfg.seed)
    }

    /// Assemble a scenario from already-typed pieces
    pub fn new(
        parameters: Parameters,
        canvas: Canvas,
        links: Vec<Link>,
        forces: ForceSet,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut rng = seeded(seed);
        let system = System::initialize(&parameters, canvas, links, &mut rng)?;
        Ok(Self {
            parameters,
            system,
            activity: Activity::default(),
            forces,
            interaction: Interaction::new(),
            rng,
            accels: Vec::new(),
        })
    }

    /// Advance one frame
    pub fn tick(&mut self) -> TickReport {
        let Scenario { system, parameters, activity, forces, accels, .. } = self;
        step(system, forces, parameters, activity, accels)
    }

    pub fn press(&mut self, x: f64, y: f64) -> Option<usize> {
        self.interaction.press(&mut self.system, x, y)
    }

    pub fn drag(&mut self, x: f64, y: f64) -> Option<NVec2> {
        self.interaction.drag(&mut self.system, x, y)
    }

    pub fn release(&mut self) -> Option<usize> {
        self.interaction.release(&mut self.system, &mut self.activity, &self.parameters)
    }

    /// Swap in a new parameter set, resizing only the body segments whose
    /// structural keys changed. On error nothing is modified.
    pub fn apply_parameters(&mut self, new: Parameters) -> Result<Reconfiguration, ConfigError> {
        new.validate(&self.system.canvas)?;

        let old = &self.parameters;
        let mut change = Reconfiguration::default();

        let orbs_changed = new.num_orbs != old.num_orbs;
        let orb_radius_changed = new.orb_radius != old.orb_radius;
        let gas_radius_changed = new.gas_radius != old.gas_radius;
        let gas_count_changed = new.gas_count(&self.system.canvas) != old.gas_count(&self.system.canvas);

        if orbs_changed || orb_radius_changed {
            // indices shift when orbs are prepended, an ongoing drag cannot survive that
            self.interaction.cancel(&mut self.system);
        }
        if orb_radius_changed {
            self.system.set_orb_radius(new.orb_radius)?;
            change.orb_radius_changed = true;
        }
        if orbs_changed {
            self.system.resize_orbs(new.num_orbs, &new, &mut self.rng)?;
            change.orbs_resized = true;
        }
        if gas_radius_changed {
            self.system.resample_gas(&new, &mut self.rng)?;
            change.gas_resampled = true;
        } else if gas_count_changed {
            self.system.resize_gas(&new, &mut self.rng)?;
            change.gas_resized = true;
        }

        self.parameters = new;
        Ok(change)
    }
}
