//! Foliage particles: the shader-evaluated group.
use glam::Vec3;
use rand::RngCore;
use tracing::trace;

use crate::dataset::{EntityCount, FormationDataset};
use crate::formation::{scatter_position, tree_position};
use crate::seed::rand01;
use crate::theme::Theme;

/// Full width of the per-axis jitter added to tree positions.
pub const FOLIAGE_JITTER: f32 = 0.5;

/// One foliage particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageParticle {
    /// Position in the scattered cloud.
    pub scatter: Vec3,
    /// Position in the tree, jittered off the cone surface.
    pub tree: Vec3,
    /// Phase in [0, 1) desynchronizing the breathing motion.
    pub random: f32,
}

pub type FoliageDataset = FormationDataset<FoliageParticle>;

/// Build `count` foliage particles for `theme`.
///
/// Per particle the generator is drawn for: the scatter position, the spiral ratio, the
/// jitter on x, z and y (in that order) and finally the motion phase.
pub fn build_foliage(
    theme: &Theme,
    count: EntityCount,
    scatter_radius: f32,
    rng: &mut dyn RngCore,
) -> FoliageDataset {
    let geometry = theme.geometry();
    let mut particles = Vec::with_capacity(count.get());

    for _ in 0..count.get() {
        let scatter = scatter_position(rng, scatter_radius);

        let ratio = rand01(rng);
        let mut tree = tree_position(ratio, 0.0, geometry);
        tree.x += (rand01(rng) - 0.5) * FOLIAGE_JITTER;
        tree.z += (rand01(rng) - 0.5) * FOLIAGE_JITTER;
        tree.y += (rand01(rng) - 0.5) * FOLIAGE_JITTER;

        let random = rand01(rng);

        particles.push(FoliageParticle {
            scatter,
            tree,
            random,
        });
    }

    trace!("Built {} foliage particles for {}.", particles.len(), theme.id());
    FormationDataset::new(theme.id().clone(), particles)
}

impl FormationDataset<FoliageParticle> {
    /// Scatter positions as a flat vertex attribute.
    pub fn scatter_attribute(&self) -> Vec<[f32; 3]> {
        self.iter().map(|p| p.scatter.to_array()).collect()
    }

    /// Tree positions as a flat vertex attribute.
    pub fn tree_attribute(&self) -> Vec<[f32; 3]> {
        self.iter().map(|p| p.tree.to_array()).collect()
    }

    /// Motion phases as a flat vertex attribute.
    pub fn random_attribute(&self) -> Vec<f32> {
        self.iter().map(|p| p.random).collect()
    }
}
