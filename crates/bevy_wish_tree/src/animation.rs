use bevy::prelude::*;
use wish_tree::prelude::*;

use crate::{ActiveFormations, ActiveTheme, TreeTarget, WishTreeSettings};

/// Per-group transition state. Groups converge independently toward the shared target.
#[derive(Resource, Debug, Clone, Copy)]
pub struct GroupTransitions {
    pub foliage: GroupTransition,
    pub spheres: GroupTransition,
    pub boxes: GroupTransition,
}

impl Default for GroupTransitions {
    fn default() -> Self {
        Self {
            foliage: GroupTransition::foliage(),
            spheres: GroupTransition::ornaments(),
            boxes: GroupTransition::ornaments(),
        }
    }
}

impl GroupTransitions {
    /// Transition state of the ornament group of `kind`.
    pub fn ornaments(&self, kind: OrnamentKind) -> &GroupTransition {
        match kind {
            OrnamentKind::Sphere => &self.spheres,
            OrnamentKind::Box => &self.boxes,
        }
    }
}

/// Foliage uniform block for the current frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FoliageFrame(pub FoliageUniforms);

/// Instance matrices of every ornament, refreshed each frame when this resource exists.
///
/// Insert it when rendering ornaments through custom instance buffers instead of entities.
#[derive(Resource, Debug, Clone, Default)]
pub struct OrnamentMatrices {
    pub spheres: Vec<Mat4>,
    pub boxes: Vec<Mat4>,
}

/// Entity whose [`Transform`] follows ornament `index` of the `kind` dataset.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrnamentInstance {
    pub kind: OrnamentKind,
    pub index: usize,
}

/// Entity whose translation follows foliage particle `index` (CPU evaluation path).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoliageInstance {
    pub index: usize,
}

/// Parent of the formation, slowly spun around the vertical axis.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TreeGroupRoot;

/// Star entity placed above the apex of the current theme.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TreeStar;

pub(crate) fn advance_transitions(
    time: Res<Time>,
    target: Res<TreeTarget>,
    settings: Res<WishTreeSettings>,
    mut transitions: ResMut<GroupTransitions>,
    mut foliage_frame: ResMut<FoliageFrame>,
) {
    if settings.is_changed() {
        apply_smoothing(&mut transitions, &settings.scene);
    }

    let target = target.0;
    let foliage = transitions.foliage.advance(target);
    transitions.spheres.advance(target);
    transitions.boxes.advance(target);

    foliage_frame.0 = FoliageUniforms::new(
        foliage,
        time.elapsed_secs(),
        settings.device_pixel_ratio,
    );
}

fn apply_smoothing(transitions: &mut GroupTransitions, scene: &SceneConfig) {
    let rebuilt = |current: GroupTransition, smoothing: f32| match GroupTransition::try_new(smoothing)
    {
        Ok(next) => next.with_progress(current.progress()),
        Err(err) => {
            warn!("Keeping smoothing {}: {}", current.smoothing(), err);
            current
        }
    };
    transitions.foliage = rebuilt(transitions.foliage, scene.foliage_smoothing);
    transitions.spheres = rebuilt(transitions.spheres, scene.ornament_smoothing);
    transitions.boxes = rebuilt(transitions.boxes, scene.ornament_smoothing);
}

pub(crate) fn write_ornament_transforms(
    time: Res<Time>,
    formations: Res<ActiveFormations>,
    transitions: Res<GroupTransitions>,
    matrices: Option<ResMut<OrnamentMatrices>>,
    mut ornaments: Query<(&OrnamentInstance, &mut Transform)>,
) {
    let time = time.elapsed_secs();
    let formations = &formations.0;

    for (instance, mut transform) in ornaments.iter_mut() {
        let frame = transitions.ornaments(instance.kind).frame();
        match formations.ornaments(instance.kind).entities().get(instance.index) {
            Some(ornament) => {
                let pose = ornament_pose(ornament, instance.index, frame, time);
                transform.translation = pose.translation;
                transform.rotation = pose.rotation;
                transform.scale = Vec3::splat(pose.scale);
            }
            // Dataset shrank after a config change; hide until the app respawns instances.
            None => transform.scale = Vec3::ZERO,
        }
    }

    if let Some(mut matrices) = matrices {
        let matrices = &mut *matrices;
        evaluate_ornaments(
            &formations.spheres,
            transitions.spheres.frame(),
            time,
            &mut matrices.spheres,
        );
        evaluate_ornaments(
            &formations.boxes,
            transitions.boxes.frame(),
            time,
            &mut matrices.boxes,
        );
    }
}

pub(crate) fn write_foliage_transforms(
    formations: Res<ActiveFormations>,
    foliage_frame: Res<FoliageFrame>,
    mut particles: Query<(&FoliageInstance, &mut Transform)>,
) {
    let foliage = &formations.0.foliage;
    for (instance, mut transform) in particles.iter_mut() {
        match foliage.entities().get(instance.index) {
            Some(particle) => {
                transform.translation = foliage_position(particle, &foliage_frame.0);
                transform.scale = Vec3::ONE;
            }
            None => transform.scale = Vec3::ZERO,
        }
    }
}

pub(crate) fn rotate_group_roots(
    time: Res<Time>,
    mut roots: Query<&mut Transform, With<TreeGroupRoot>>,
) {
    let rotation = tree_group_rotation(time.elapsed_secs());
    for mut transform in roots.iter_mut() {
        transform.rotation = rotation;
    }
}

pub(crate) fn place_star(
    theme: Res<ActiveTheme>,
    mut stars: Query<&mut Transform, With<TreeStar>>,
    added: Query<(), Added<TreeStar>>,
) {
    if !theme.is_changed() && added.is_empty() {
        return;
    }
    let star = theme.0.star();
    for mut transform in stars.iter_mut() {
        transform.translation = star.position;
    }
}
