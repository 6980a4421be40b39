//! Transition controller: smoothed progress, easing and per-entity evaluation.
//!
//! Every entity group owns a [`GroupTransition`] whose progress relaxes toward the target
//! of the shared [`TreeState`] once per frame. The eased progress then drives one motion
//! law ([`motion`]) evaluated either per vertex on the GPU (foliage, see
//! [`evaluate::FoliageUniforms`]) or per instance on the CPU (ornaments, see
//! [`evaluate::evaluate_ornaments`]).
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod evaluate;
pub mod motion;

pub use evaluate::{
    evaluate_ornaments, foliage_point_size, foliage_position, foliage_sprite, ornament_pose,
    tree_group_rotation, FoliageUniforms, OrnamentPose, MAX_PIXEL_RATIO,
};
pub use motion::{breathing, floating, spin, MotionProfile};

/// Smoothing factor of the foliage group.
pub const FOLIAGE_SMOOTHING: f32 = 0.05;
/// Smoothing factor of the ornament groups.
pub const ORNAMENT_SMOOTHING: f32 = 0.04;

/// The externally selected formation. Shared by all groups and read once per frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeState {
    Scattered,
    #[default]
    TreeShape,
}

impl TreeState {
    /// Progress value this state pulls every group toward.
    #[inline]
    pub fn target_progress(self) -> f32 {
        match self {
            TreeState::Scattered => 0.0,
            TreeState::TreeShape => 1.0,
        }
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            TreeState::Scattered => TreeState::TreeShape,
            TreeState::TreeShape => TreeState::Scattered,
        }
    }
}

/// Cubic ease-in-out: `4t³` below one half, `1 - (-2t + 2)³ / 2` above.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear and eased progress of one group for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Smoothed linear progress in [0, 1].
    pub progress: f32,
    /// `ease_in_out_cubic(progress)`.
    pub eased: f32,
}

impl TransitionFrame {
    pub fn from_progress(progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            progress,
            eased: ease_in_out_cubic(progress),
        }
    }
}

/// Explicit per-group transition state.
///
/// Progress is only ever moved by [`GroupTransition::advance`]; it starts at zero
/// (scattered) unless constructed with [`GroupTransition::with_progress`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransition {
    progress: f32,
    smoothing: f32,
}

impl GroupTransition {
    /// Creates a transition at progress zero.
    ///
    /// `smoothing` is clamped into (0, 1] and NaN snaps (1.0); use
    /// [`GroupTransition::try_new`] to reject bad input instead.
    pub fn new(smoothing: f32) -> Self {
        let smoothing = if smoothing.is_nan() {
            1.0
        } else {
            smoothing.clamp(f32::MIN_POSITIVE, 1.0)
        };
        Self {
            progress: 0.0,
            smoothing,
        }
    }

    /// Creates a transition at progress zero, validating `smoothing`.
    pub fn try_new(smoothing: f32) -> Result<Self> {
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "smoothing must be in (0, 1], got {smoothing}"
            )));
        }
        Ok(Self::new(smoothing))
    }

    /// Foliage group defaults.
    pub fn foliage() -> Self {
        Self::new(FOLIAGE_SMOOTHING)
    }

    /// Ornament group defaults.
    pub fn ornaments() -> Self {
        Self::new(ORNAMENT_SMOOTHING)
    }

    /// Sets the starting progress, clamped to [0, 1]; NaN starts scattered.
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// The frame values for the current progress without advancing.
    pub fn frame(&self) -> TransitionFrame {
        TransitionFrame::from_progress(self.progress)
    }

    /// Relax progress one step toward `target` and return the new frame values.
    ///
    /// `progress <- lerp(progress, target, smoothing)` is a convex combination of two values
    /// in [0, 1]; the clamp only absorbs rounding.
    pub fn advance(&mut self, target: TreeState) -> TransitionFrame {
        self.progress =
            lerp(self.progress, target.target_progress(), self.smoothing).clamp(0.0, 1.0);
        self.frame()
    }
}
