//! Render-ready outputs of the transition law.
//!
//! Foliage is evaluated per vertex: the renderer only needs [`FoliageUniforms`] each frame
//! plus the static attributes of the dataset. [`foliage_position`] and friends mirror that
//! vertex and fragment stage on the CPU. Ornaments are evaluated per instance:
//! [`evaluate_ornaments`] rewrites every instance matrix each frame, since the secondary
//! motion is time driven even at rest.
use glam::{Mat4, Quat, Vec3};

use crate::config::GROUP_SPIN_RATE;
use crate::dataset::{FoliageParticle, Ornament, OrnamentDataset};
use crate::theme::ThemeColors;
use crate::transition::motion::{spin, MotionProfile};
use crate::transition::{lerp, TransitionFrame};

/// Upper bound applied to the device pixel ratio.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

const POINT_SIZE_SCATTERED: f32 = 80.0;
const POINT_SIZE_TREE: f32 = 60.0;

/// Uniform block of the foliage shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageUniforms {
    /// Smoothed linear progress; easing happens per vertex.
    pub progress: f32,
    /// Elapsed time in seconds.
    pub time: f32,
    /// Device pixel ratio clamped to [`MAX_PIXEL_RATIO`].
    pub pixel_ratio: f32,
}

impl Default for FoliageUniforms {
    fn default() -> Self {
        Self {
            progress: 0.0,
            time: 0.0,
            pixel_ratio: 1.0,
        }
    }
}

impl FoliageUniforms {
    pub fn new(frame: TransitionFrame, time: f32, device_pixel_ratio: f32) -> Self {
        Self {
            progress: frame.progress,
            time,
            pixel_ratio: device_pixel_ratio.clamp(f32::MIN_POSITIVE, MAX_PIXEL_RATIO),
        }
    }

    #[inline]
    fn frame(&self) -> TransitionFrame {
        TransitionFrame::from_progress(self.progress)
    }
}

/// Position of a foliage particle, as the vertex stage computes it.
#[inline]
pub fn foliage_position(particle: &FoliageParticle, uniforms: &FoliageUniforms) -> Vec3 {
    MotionProfile::FOLIAGE.position(
        particle.scatter,
        particle.tree,
        particle.random,
        0,
        uniforms.frame(),
        uniforms.time,
    )
}

/// Screen-space point size of a foliage particle at `view_depth` units in front of the camera.
///
/// Particles read as large dust while scattered and shrink to needles in the tree, with a
/// per-particle twinkle.
#[inline]
pub fn foliage_point_size(random: f32, uniforms: &FoliageUniforms, view_depth: f32) -> f32 {
    let base = lerp(POINT_SIZE_SCATTERED, POINT_SIZE_TREE, uniforms.frame().eased);
    let twinkle = 1.0 + (uniforms.time + random * 10.0).sin() * 0.3;
    base * twinkle * uniforms.pixel_ratio / view_depth.max(f32::EPSILON)
}

/// Color and alpha of a foliage sprite at normalized distance `dist` from its center
/// (0 at the center, 0.5 at the rim). Returns `None` outside the disc.
pub fn foliage_sprite(colors: &ThemeColors, random: f32, dist: f32) -> Option<([f32; 3], f32)> {
    if !(0.0..=0.5).contains(&dist) {
        return None;
    }
    let alpha = (1.0 - smoothstep(0.0, 0.5, dist)).powf(1.5) * 0.9;
    let base = colors.foliage_base.to_f32_array();
    let tip = colors.foliage_tip.to_f32_array();
    let t = dist * 1.5 + random * 0.2;
    let color = [
        lerp(base[0], tip[0], t),
        lerp(base[1], tip[1], t),
        lerp(base[2], tip[2], t),
    ];
    Some((color, alpha))
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Decomposed transform of one ornament instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentPose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl OrnamentPose {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }
}

/// Pose of ornament `index` for this frame.
///
/// The breathing phase is taken from the z rotation speed, which the Euler spin never
/// reads, remapped from [-1, 1) to [0, 1).
#[inline]
pub fn ornament_pose(
    ornament: &Ornament,
    index: usize,
    frame: TransitionFrame,
    time: f32,
) -> OrnamentPose {
    let profile = MotionProfile::ORNAMENT;
    let phase = ((ornament.rotation_speed.z + 1.0) * 0.5).clamp(0.0, 1.0);
    let translation = profile.position(ornament.scatter, ornament.tree, phase, index, frame, time);
    let rotation = if profile.spin {
        spin(ornament.rotation_speed, time, frame)
    } else {
        Quat::IDENTITY
    };
    OrnamentPose {
        translation,
        rotation,
        scale: ornament.scale,
    }
}

/// Write the instance matrix of every ornament in `dataset` into `out`, replacing its
/// previous contents.
pub fn evaluate_ornaments(
    dataset: &OrnamentDataset,
    frame: TransitionFrame,
    time: f32,
    out: &mut Vec<Mat4>,
) {
    out.clear();
    out.reserve(dataset.len());
    out.extend(
        dataset
            .iter()
            .enumerate()
            .map(|(i, ornament)| ornament_pose(ornament, i, frame, time).to_matrix()),
    );
}

/// Slow rotation of the whole formation around the vertical axis.
#[inline]
pub fn tree_group_rotation(time: f32) -> Quat {
    Quat::from_rotation_y(time * GROUP_SPIN_RATE)
}
