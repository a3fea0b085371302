//! Configuration errors.
//!
//! Every invalid configuration is rejected at the boundary (scenario build or
//! live reconfiguration) instead of being clamped.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Canvas width or height is zero, negative or not finite.
    NonPositiveDimension { width: f64, height: f64 },
    /// A body radius is zero or negative.
    NonPositiveRadius { name: &'static str, value: f64 },
    /// Gas density below zero.
    NegativeDensity(f64),
    /// A bounded parameter left its range.
    OutOfRange { name: &'static str, value: f64, min: f64, max: f64 },
    /// NaN or infinite value.
    NonFinite { name: &'static str },
    /// A configured link references the same orb twice or an orb that does not exist.
    LinkOutOfRange { source: usize, target: usize, num_orbs: usize },
    /// The inset placement region for orbs is empty.
    OrbDoesNotFit { radius: f64, width: f64, height: f64 },
    /// A boundary segment has zero length.
    DegenerateBoundary,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDimension { width, height } => {
                write!(f, "canvas must have positive size, got {}x{}", width, height)
            }
            ConfigError::NonPositiveRadius { name, value } => {
                write!(f, "{} must be positive, got {}", name, value)
            }
            ConfigError::NegativeDensity(d) => write!(f, "gas density must not be negative, got {}", d),
            ConfigError::OutOfRange { name, value, min, max } => {
                write!(f, "{} = {} is outside [{}, {}]", name, value, min, max)
            }
            ConfigError::NonFinite { name } => write!(f, "{} must be a finite number", name),
            ConfigError::LinkOutOfRange { source, target, num_orbs } => write!(
                f,
                "link ({}, {}) does not connect two distinct orbs of {}",
                source, target, num_orbs
            ),
            ConfigError::OrbDoesNotFit { radius, width, height } => write!(
                f,
                "a body of radius {} does not fit on a {}x{} canvas",
                radius, width, height
            ),
            ConfigError::DegenerateBoundary => write!(f, "boundary contains a zero-length segment"),
        }
    }
}

impl std::error::Error for ConfigError {}
