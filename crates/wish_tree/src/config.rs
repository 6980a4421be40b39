//! Scene-wide configuration constants and the validated [`SceneConfig`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transition::{FOLIAGE_SMOOTHING, ORNAMENT_SMOOTHING};

/// Number of foliage particles.
pub const FOLIAGE_COUNT: usize = 4500;
/// Number of sphere ornaments.
pub const ORNAMENT_COUNT_SPHERES: usize = 150;
/// Number of box ornaments.
pub const ORNAMENT_COUNT_BOXES: usize = 60;
/// Radius of the scattered cloud.
pub const SCATTER_RADIUS: f32 = 25.0;
/// Tree height of the default theme.
pub const TREE_HEIGHT: f32 = 12.0;
/// Base radius of the default theme.
pub const TREE_RADIUS_BASE: f32 = 4.5;
/// Spiral loop count of the default theme.
pub const TREE_SPIRAL_LOOPS: u32 = 20;
/// Rotation rate of the whole formation around the Y axis, in radians per second.
pub const GROUP_SPIN_RATE: f32 = 0.05;

/// Static configuration shared by dataset building and animation.
///
/// Counts are independent of the theme; changing them requires rebuilding every dataset.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Number of foliage particles.
    pub foliage_count: usize,
    /// Number of sphere ornaments.
    pub sphere_count: usize,
    /// Number of box ornaments.
    pub box_count: usize,
    /// Radius of the scattered cloud.
    pub scatter_radius: f32,
    /// Per-frame smoothing factor of the foliage group.
    pub foliage_smoothing: f32,
    /// Per-frame smoothing factor of the ornament groups.
    pub ornament_smoothing: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            foliage_count: FOLIAGE_COUNT,
            sphere_count: ORNAMENT_COUNT_SPHERES,
            box_count: ORNAMENT_COUNT_BOXES,
            scatter_radius: SCATTER_RADIUS,
            foliage_smoothing: FOLIAGE_SMOOTHING,
            ornament_smoothing: ORNAMENT_SMOOTHING,
        }
    }
}

impl SceneConfig {
    /// Creates a configuration with the default counts and radii.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the foliage particle count.
    pub fn with_foliage_count(mut self, foliage_count: usize) -> Self {
        self.foliage_count = foliage_count;
        self
    }

    /// Sets the sphere ornament count.
    pub fn with_sphere_count(mut self, sphere_count: usize) -> Self {
        self.sphere_count = sphere_count;
        self
    }

    /// Sets the box ornament count.
    pub fn with_box_count(mut self, box_count: usize) -> Self {
        self.box_count = box_count;
        self
    }

    /// Sets the scatter radius.
    pub fn with_scatter_radius(mut self, scatter_radius: f32) -> Self {
        self.scatter_radius = scatter_radius;
        self
    }

    /// Sets the smoothing factors of the foliage and ornament groups.
    pub fn with_smoothing(mut self, foliage: f32, ornaments: f32) -> Self {
        self.foliage_smoothing = foliage;
        self.ornament_smoothing = ornaments;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [
            ("foliage_count", self.foliage_count),
            ("sphere_count", self.sphere_count),
            ("box_count", self.box_count),
        ] {
            if count == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        if !self.scatter_radius.is_finite() || self.scatter_radius <= 0.0 {
            return Err(Error::InvalidConfig(
                "scatter_radius must be finite and > 0".into(),
            ));
        }
        for (name, alpha) in [
            ("foliage_smoothing", self.foliage_smoothing),
            ("ornament_smoothing", self.ornament_smoothing),
        ] {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::InvalidConfig(format!("{name} must be in (0, 1]")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.foliage_count, 4500);
        assert_eq!(config.sphere_count, 150);
        assert_eq!(config.box_count, 60);
        assert_eq!(config.scatter_radius, 25.0);
    }

    #[test]
    fn rejects_zero_counts() {
        let err = SceneConfig::new().with_box_count(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("box_count")));
    }

    #[test]
    fn rejects_bad_radius_and_smoothing() {
        assert!(SceneConfig::new()
            .with_scatter_radius(0.0)
            .validate()
            .is_err());
        assert!(SceneConfig::new()
            .with_scatter_radius(f32::NAN)
            .validate()
            .is_err());
        assert!(SceneConfig::new()
            .with_smoothing(0.0, 0.04)
            .validate()
            .is_err());
        assert!(SceneConfig::new()
            .with_smoothing(0.05, 1.5)
            .validate()
            .is_err());
        assert!(SceneConfig::new().with_smoothing(1.0, 1.0).validate().is_ok());
    }
}
