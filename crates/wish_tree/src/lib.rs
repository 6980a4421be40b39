#![forbid(unsafe_code)]
//! wish_tree: wish-seeded themes and a smoothed scatter/tree transition engine.
//!
//! Modules:
//! - seed: cyrb53-style string hash and the Mulberry32 generator
//! - theme: deterministic palette and geometry selection from a wish
//! - formation: sphere scatter and spiral cone position generators
//! - dataset: per-group arenas of target positions and random attributes
//! - transition: smoothed progress, cubic easing, secondary motion and render outputs
//!
//! For examples and docs, see README and docs.rs.
pub mod config;
pub mod dataset;
pub mod error;
pub mod formation;
pub mod seed;
pub mod theme;
pub mod transition;

/// Convenient re-exports for common types. Import with `use wish_tree::prelude::*;`.
pub mod prelude {
    pub use crate::config::{
        SceneConfig, FOLIAGE_COUNT, GROUP_SPIN_RATE, ORNAMENT_COUNT_BOXES,
        ORNAMENT_COUNT_SPHERES, SCATTER_RADIUS, TREE_HEIGHT, TREE_RADIUS_BASE, TREE_SPIRAL_LOOPS,
    };
    pub use crate::dataset::{
        build_foliage, build_ornaments, EntityCount, FoliageDataset, FoliageParticle,
        FormationDataset, Formations, Ornament, OrnamentDataset, OrnamentKind, OrnamentMaterial,
        OrnamentShape,
    };
    pub use crate::error::{Error, Result};
    pub use crate::formation::{scatter_position, tree_position};
    pub use crate::seed::{hash, hash53, Mulberry32};
    pub use crate::theme::{
        generate_theme, Palette, Rgb, StarParams, Theme, ThemeColors, ThemeId, TreeGeometry,
        PALETTES,
    };
    pub use crate::transition::{
        ease_in_out_cubic, evaluate_ornaments, foliage_point_size, foliage_position,
        foliage_sprite, ornament_pose, tree_group_rotation, FoliageUniforms, GroupTransition,
        MotionProfile, OrnamentPose, TransitionFrame, TreeState, FOLIAGE_SMOOTHING,
        ORNAMENT_SMOOTHING,
    };
}
