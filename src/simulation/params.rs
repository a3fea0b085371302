//! Tunable physical and visual parameters for the simulation
//!
//! `Parameters` is the strongly-typed parameter store:
//! - body counts and sizes (`num_orbs`, radii, gas density, temperature),
//! - force strengths (charge, collision, surface, link spring, center pull,
//!   brownian jitter, viscosity),
//! - activity settings (velocity decay, alpha target / decay / reheat),
//! - link curve shape and display toggles and colors
//!
//! Forces, integrator and renderer read it on every call, so a value changed
//! between two ticks takes effect on the next one

use super::error::ConfigError;
use super::link_curve::{LinkStyle, WidthProfile};
use super::states::Canvas;

/// Orbs are placed at least this many radii away from every wall
pub const ORB_INSET: f64 = 1.1;

/// Largest distance a center may end a tick past the canvas edge
pub const MAX_BOUNDARY_TOLERANCE: f64 = 1.0;

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    // bodies
    pub num_orbs: usize,
    pub orb_radius: f64,
    pub gas_radius: f64,
    pub gas_density: f64, // gas particles per unit canvas area
    pub temperature: f64, // variance of initial gas velocity components

    // forces
    pub charge_strength: f64, // > 0 pushes bodies apart
    pub collision_strength: f64, // fraction of overlap resolved per tick, in (0, 1)
    pub surface_strength: f64, // fraction of wall penetration pushed back per tick
    pub link_distance: f64, // spring rest length
    pub link_strength: f64, // spring stiffness
    pub center_strength: f64, // pull of orbs toward the canvas center, 0 disables
    pub brownian_range: f64, // per-axis velocity jitter on orbs, 0 disables
    pub viscosity: f64, // quadratic drag coefficient on orbs, 0 disables

    // activity
    pub velocity_decay: f64, // fraction of velocity kept each tick
    pub alpha_target: f64,
    pub alpha_decay: f64, // 0 = never cools
    pub reheat_alpha: f64, // alpha restored when a drag ends
    pub boundary_tolerance: f64, // how far past the canvas a center may end a tick

    // link curve
    pub link_style: LinkStyle,
    pub width_profile: WidthProfile,
    pub max_link_spread: f64,
    pub spread_scaling_factor: f64,
    pub handle_size: f64,

    // display
    pub show_orbs: bool,
    pub show_links: bool,
    pub show_gas: bool,
    pub orb_color: Rgb,
    pub link_color: Rgb,
    pub gas_color: Rgb,
    pub background_color: Rgb,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            num_orbs: 5,
            orb_radius: 30.0,
            gas_radius: 2.0,
            gas_density: 0.0,
            temperature: 1.0,

            charge_strength: 30.0,
            collision_strength: 0.5,
            surface_strength: 0.5,
            link_distance: 100.0,
            link_strength: 0.1,
            center_strength: 0.02,
            brownian_range: 0.0,
            viscosity: 0.0,

            velocity_decay: 0.6,
            alpha_target: 0.3,
            alpha_decay: 0.0228,
            reheat_alpha: 1.0,
            boundary_tolerance: 0.0,

            link_style: LinkStyle::Lens,
            width_profile: WidthProfile::Gaussian,
            max_link_spread: 0.8,
            spread_scaling_factor: 1.0,
            handle_size: 0.6,

            show_orbs: true,
            show_links: true,
            show_gas: true,
            orb_color: [255, 255, 255],
            link_color: [255, 255, 255],
            gas_color: [255, 200, 160],
            background_color: [255, 100, 50],
        }
    }
}

impl Parameters {
    /// Reject anything that would produce degenerate geometry on `canvas`
    pub fn validate(&self, canvas: &Canvas) -> Result<(), ConfigError> {
        validate_canvas(canvas)?;

        let finite = [
            ("orb_radius", self.orb_radius),
            ("gas_radius", self.gas_radius),
            ("gas_density", self.gas_density),
            ("temperature", self.temperature),
            ("charge_strength", self.charge_strength),
            ("collision_strength", self.collision_strength),
            ("surface_strength", self.surface_strength),
            ("link_distance", self.link_distance),
            ("link_strength", self.link_strength),
            ("center_strength", self.center_strength),
            ("brownian_range", self.brownian_range),
            ("viscosity", self.viscosity),
            ("velocity_decay", self.velocity_decay),
            ("alpha_target", self.alpha_target),
            ("alpha_decay", self.alpha_decay),
            ("reheat_alpha", self.reheat_alpha),
            ("boundary_tolerance", self.boundary_tolerance),
            ("max_link_spread", self.max_link_spread),
            ("spread_scaling_factor", self.spread_scaling_factor),
            ("handle_size", self.handle_size),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }

        positive("orb_radius", self.orb_radius)?;
        positive("gas_radius", self.gas_radius)?;
        if self.gas_density < 0.0 {
            return Err(ConfigError::NegativeDensity(self.gas_density));
        }

        in_range("temperature", self.temperature, 0.0, f64::MAX)?;
        in_range("velocity_decay", self.velocity_decay, 0.0, 1.0)?;
        in_range("alpha_target", self.alpha_target, 0.0, 1.0)?;
        in_range("alpha_decay", self.alpha_decay, 0.0, 1.0)?;
        in_range("reheat_alpha", self.reheat_alpha, 0.0, 1.0)?;
        in_range("surface_strength", self.surface_strength, 0.0, 1.0)?;
        in_range("link_distance", self.link_distance, 0.0, f64::MAX)?;
        in_range("boundary_tolerance", self.boundary_tolerance, 0.0, MAX_BOUNDARY_TOLERANCE)?;
        in_range("brownian_range", self.brownian_range, 0.0, f64::MAX)?;
        in_range("viscosity", self.viscosity, 0.0, f64::MAX)?;
        in_range("max_link_spread", self.max_link_spread, 0.0, f64::MAX)?;
        in_range("spread_scaling_factor", self.spread_scaling_factor, 0.0, f64::MAX)?;
        in_range("handle_size", self.handle_size, 0.0, f64::MAX)?;

        // a full correction in one tick would be a hard constraint, keep it soft
        if !(self.collision_strength > 0.0 && self.collision_strength < 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "collision_strength",
                value: self.collision_strength,
                min: 0.0,
                max: 1.0,
            });
        }

        let inset = 2.0 * ORB_INSET * self.orb_radius;
        if self.num_orbs > 0 && (canvas.width <= inset || canvas.height <= inset) {
            return Err(ConfigError::OrbDoesNotFit {
                radius: self.orb_radius,
                width: canvas.width,
                height: canvas.height,
            });
        }
        let gas_span = 2.0 * self.gas_radius;
        if self.gas_count(canvas) > 0 && (canvas.width <= gas_span || canvas.height <= gas_span) {
            return Err(ConfigError::OrbDoesNotFit {
                radius: self.gas_radius,
                width: canvas.width,
                height: canvas.height,
            });
        }

        Ok(())
    }

    /// Number of gas particles for this density: floor(density * width * height)
    pub fn gas_count(&self, canvas: &Canvas) -> usize {
        gas_count_for(self.gas_density, canvas)
    }
}

/// floor with a small tolerance so 0.001 * 100 * 100 counts as 10
pub fn gas_count_for(density: f64, canvas: &Canvas) -> usize {
    let n = density * canvas.width * canvas.height;
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    (n + 1e-9).floor() as usize
}

pub fn validate_canvas(canvas: &Canvas) -> Result<(), ConfigError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if !ok(canvas.width) || !ok(canvas.height) {
        return Err(ConfigError::NonPositiveDimension { width: canvas.width, height: canvas.height });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 {
        return Err(ConfigError::NonPositiveRadius { name, value });
    }
    Ok(())
}

fn in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { name, value, min, max });
    }
    Ok(())
}
