//! Configuration types for loading orb scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`CanvasConfig`]     – canvas size in pixels
//! - [`BoundaryConfig`]   – wall directionality and an optional custom polygon
//! - [`ParametersConfig`] – tunables; anything omitted falls back to the default
//! - `links`              – orb index pairs drawn (and sprung) as connectors
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! seed: 7
//! canvas:
//!   width: 1200.0
//!   height: 800.0
//!
//! boundary:
//!   directionality: "two_way"   # or "one_way"
//!
//! parameters:
//!   num_orbs: 5
//!   orb_radius: 30.0
//!   gas_density: 0.0005
//!   link_style: "lens"          # or "line"
//!   width_profile: "gaussian"   # or "semicircle"
//!
//! links:
//!   - [0, 1]
//!   - [1, 2]
//! ```
//!
//! `Scenario::build_scenario` maps this into the runtime bundle after validation.

use serde::Deserialize;

use crate::simulation::boundary::Directionality;
use crate::simulation::link_curve::{LinkStyle, WidthProfile};
use crate::simulation::params::{Parameters, Rgb};

fn default_seed() -> u64 {
    42
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 1200.0, height: 800.0 }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BoundaryConfig {
    #[serde(default)]
    pub directionality: Directionality,
    #[serde(default)]
    pub inverted: bool, // flip the outline so its outside is kept clear
    pub polygon: Option<Vec<[f64; 2]>>, // defaults to the canvas rectangle
}

/// Every field is optional; missing ones take `Parameters::default()`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    pub num_orbs: Option<usize>,
    pub orb_radius: Option<f64>,
    pub gas_radius: Option<f64>,
    pub gas_density: Option<f64>,
    pub temperature: Option<f64>,
    pub charge_strength: Option<f64>,
    pub collision_strength: Option<f64>,
    pub surface_strength: Option<f64>,
    pub link_distance: Option<f64>,
    pub link_strength: Option<f64>,
    pub center_strength: Option<f64>,
    pub brownian_range: Option<f64>,
    pub viscosity: Option<f64>,
    pub velocity_decay: Option<f64>,
    pub alpha_target: Option<f64>,
    pub alpha_decay: Option<f64>,
    pub reheat_alpha: Option<f64>,
    pub boundary_tolerance: Option<f64>,
    pub link_style: Option<LinkStyle>,
    pub width_profile: Option<WidthProfile>,
    pub max_link_spread: Option<f64>,
    pub spread_scaling_factor: Option<f64>,
    pub handle_size: Option<f64>,
    pub show_orbs: Option<bool>,
    pub show_links: Option<bool>,
    pub show_gas: Option<bool>,
    pub orb_color: Option<Rgb>,
    pub link_color: Option<Rgb>,
    pub gas_color: Option<Rgb>,
    pub background_color: Option<Rgb>,
}

impl ParametersConfig {
    /// Overlay the configured values on the defaults
    pub fn resolve(&self) -> Parameters {
        let d = Parameters::default();
        Parameters {
            num_orbs: self.num_orbs.unwrap_or(d.num_orbs),
            orb_radius: self.orb_radius.unwrap_or(d.orb_radius),
            gas_radius: self.gas_radius.unwrap_or(d.gas_radius),
            gas_density: self.gas_density.unwrap_or(d.gas_density),
            temperature: self.temperature.unwrap_or(d.temperature),
            charge_strength: self.charge_strength.unwrap_or(d.charge_strength),
            collision_strength: self.collision_strength.unwrap_or(d.collision_strength),
            surface_strength: self.surface_strength.unwrap_or(d.surface_strength),
            link_distance: self.link_distance.unwrap_or(d.link_distance),
            link_strength: self.link_strength.unwrap_or(d.link_strength),
            center_strength: self.center_strength.unwrap_or(d.center_strength),
            brownian_range: self.brownian_range.unwrap_or(d.brownian_range),
            viscosity: self.viscosity.unwrap_or(d.viscosity),
            velocity_decay: self.velocity_decay.unwrap_or(d.velocity_decay),
            alpha_target: self.alpha_target.unwrap_or(d.alpha_target),
            alpha_decay: self.alpha_decay.unwrap_or(d.alpha_decay),
            reheat_alpha: self.reheat_alpha.unwrap_or(d.reheat_alpha),
            boundary_tolerance: self.boundary_tolerance.unwrap_or(d.boundary_tolerance),
            link_style: self.link_style.unwrap_or(d.link_style),
            width_profile: self.width_profile.unwrap_or(d.width_profile),
            max_link_spread: self.max_link_spread.unwrap_or(d.max_link_spread),
            spread_scaling_factor: self.spread_scaling_factor.unwrap_or(d.spread_scaling_factor),
            handle_size: self.handle_size.unwrap_or(d.handle_size),
            show_orbs: self.show_orbs.unwrap_or(d.show_orbs),
            show_links: self.show_links.unwrap_or(d.show_links),
            show_gas: self.show_gas.unwrap_or(d.show_gas),
            orb_color: self.orb_color.unwrap_or(d.orb_color),
            link_color: self.link_color.unwrap_or(d.link_color),
            gas_color: self.gas_color.unwrap_or(d.gas_color),
            background_color: self.background_color.unwrap_or(d.background_color),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default = "default_seed")]
    pub seed: u64, // makes the initial layout reproducible
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub links: Vec<[usize; 2]>,
}
