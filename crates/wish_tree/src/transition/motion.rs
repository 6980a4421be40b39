//! Secondary motion layered on top of the formation blend.
//!
//! These functions are the single definition of the motion law. The foliage vertex stage
//! and the ornament instance update both call into them, so the two evaluation paths
//! cannot drift apart.
use glam::{EulerRot, Quat, Vec3};

use crate::transition::{lerp, TransitionFrame};

/// Breathing amplitude when fully scattered.
pub const BREATHING_SCATTERED: f32 = 0.5;
/// Breathing amplitude when fully formed.
pub const BREATHING_TREE: f32 = 0.05;
/// Floating stops once progress reaches this value.
pub const FLOAT_CUTOFF: f32 = 0.9;
/// Spinning starts damping toward upright once progress exceeds this value.
pub const SPIN_DAMP_START: f32 = 0.8;

/// Which secondary motion layers a group uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfile {
    pub breathing: bool,
    pub floating: bool,
    pub spin: bool,
}

impl MotionProfile {
    /// Particles: breathing only.
    pub const FOLIAGE: MotionProfile = MotionProfile {
        breathing: true,
        floating: false,
        spin: false,
    };

    /// Rigid ornaments: breathing, floating and spinning.
    pub const ORNAMENT: MotionProfile = MotionProfile {
        breathing: true,
        floating: true,
        spin: true,
    };

    /// Blend between formations and apply the enabled translation layers.
    ///
    /// `phase` is the entity's random attribute in [0, 1); `index` its slot in the group.
    pub fn position(
        &self,
        scatter: Vec3,
        tree: Vec3,
        phase: f32,
        index: usize,
        frame: TransitionFrame,
        time: f32,
    ) -> Vec3 {
        let mut pos = scatter.lerp(tree, frame.eased);
        if self.breathing {
            pos = breathing(pos, phase, time, frame.eased);
        }
        if self.floating {
            pos += floating(index, time, frame.progress);
        }
        pos
    }
}

/// Sinusoidal noise displacement, loud while scattered and calm once formed.
///
/// Axes are displaced in sequence (x, then z from the displaced x, then y), each driven by
/// time and the entity's own coordinates or phase so that neighbours desynchronize.
#[inline]
pub fn breathing(pos: Vec3, phase: f32, time: f32, eased: f32) -> Vec3 {
    const FREQUENCY: f32 = 2.0;
    let amplitude = lerp(BREATHING_SCATTERED, BREATHING_TREE, eased);
    let mut out = pos;
    out.x += (time * FREQUENCY + out.y).sin() * amplitude;
    out.z += (time * FREQUENCY + out.x).cos() * amplitude;
    out.y += (time * 1.5 + phase * 10.0).sin() * amplitude;
    out
}

/// Bob and sway offset for ornaments, fading out linearly and vanishing at
/// [`FLOAT_CUTOFF`].
#[inline]
pub fn floating(index: usize, time: f32, progress: f32) -> Vec3 {
    if progress >= FLOAT_CUTOFF {
        return Vec3::ZERO;
    }
    let factor = 1.0 - progress;
    let i = index as f32;
    Vec3::new(
        (time * 0.5 + i).cos() * 0.3 * factor,
        (time + i).sin() * 0.5 * factor,
        0.0,
    )
}

/// Continuous spin around the entity's own axes, damping to upright near the tree state.
///
/// Below [`SPIN_DAMP_START`] the Euler angles are `(rx, ry, rx)` with `r = speed * time`;
/// above it the x and z angles are blended toward zero by the eased progress.
#[inline]
pub fn spin(rotation_speed: Vec3, time: f32, frame: TransitionFrame) -> Quat {
    let rx = rotation_speed.x * time;
    let ry = rotation_speed.y * time;
    let tilt = if frame.progress < SPIN_DAMP_START {
        rx
    } else {
        lerp(rx, 0.0, frame.eased)
    };
    Quat::from_euler(EulerRot::XYZ, tilt, ry, tilt)
}
