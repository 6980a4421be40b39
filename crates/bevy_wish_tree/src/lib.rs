//! Bevy plugin for wish_tree providing resources, message types, rebuild jobs and animation systems.
#![forbid(unsafe_code)]

use std::sync::Arc;

pub use animation::{
    FoliageFrame, FoliageInstance, GroupTransitions, OrnamentInstance, OrnamentMatrices,
    TreeGroupRoot, TreeStar,
};
#[cfg(feature = "ron")]
pub use assets::{WishTreeConfigAsset, WishTreeConfigAssetLoader, WishTreeConfigHandle};
use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
pub use events::{ThemeApplied, WishBus, WishTreeInput};
use wish_tree::prelude::*;

mod animation;
#[cfg(feature = "ron")]
mod assets;
mod events;

/// Convenient re-exports for common types. Import with `use bevy_wish_tree::prelude::*;`.
pub mod prelude {
    pub use wish_tree::prelude::*;

    pub use crate::animation::{
        FoliageFrame, FoliageInstance, GroupTransitions, OrnamentInstance, OrnamentMatrices,
        TreeGroupRoot, TreeStar,
    };
    #[cfg(feature = "ron")]
    pub use crate::assets::{WishTreeConfigAsset, WishTreeConfigAssetLoader, WishTreeConfigHandle};
    pub use crate::events::{ThemeApplied, WishBus, WishTreeInput};
    pub use crate::{
        ActiveFormations, ActiveTheme, RebuildMode, TreeTarget, WishTreePlugin, WishTreeSettings,
        WishTreeSystems,
    };
}

/// Bevy plugin providing resources, message types, and systems.
pub struct WishTreePlugin;

/// System sets run in order every `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishTreeSystems {
    /// Drain the bus and apply wishes and toggles.
    Input,
    /// Swap in finished formation rebuilds.
    Rebuild,
    /// Advance transitions and write transforms.
    Animate,
}

/// How formation datasets are rebuilt after a wish or a config change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildMode {
    /// Build on the [`AsyncComputeTaskPool`] and swap in when done.
    #[default]
    Async,
    /// Build inside the input system, swapping in the same frame.
    Blocking,
}

/// Scene configuration used for the next rebuild.
#[derive(Resource, Debug, Clone)]
pub struct WishTreeSettings {
    pub scene: SceneConfig,
    /// Device pixel ratio forwarded into the foliage uniforms.
    pub device_pixel_ratio: f32,
    pub rebuild: RebuildMode,
}

impl Default for WishTreeSettings {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            device_pixel_ratio: 1.0,
            rebuild: RebuildMode::default(),
        }
    }
}

impl WishTreeSettings {
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f32) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    pub fn with_rebuild(mut self, rebuild: RebuildMode) -> Self {
        self.rebuild = rebuild;
        self
    }
}

/// Theme currently shown. Replaced together with [`ActiveFormations`].
#[derive(Resource, Clone, Debug)]
pub struct ActiveTheme(pub Arc<Theme>);

/// Datasets of the current theme, shared with renderers.
#[derive(Resource, Clone, Debug)]
pub struct ActiveFormations(pub Arc<Formations>);

/// Target formation, read once per frame by every group.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeTarget(pub TreeState);

/// In-flight rebuild. Replacing it drops (and cancels) the superseded task.
#[derive(Resource, Default)]
struct FormationJob {
    pending: Option<PendingFormations>,
}

impl FormationJob {
    /// Theme the scene is heading to: the pending rebuild's, else the active one.
    fn target_theme(&self, active: &ActiveTheme) -> Arc<Theme> {
        self.pending
            .as_ref()
            .map(|pending| pending.theme.clone())
            .unwrap_or_else(|| active.0.clone())
    }
}

struct PendingFormations {
    theme: Arc<Theme>,
    task: Task<wish_tree::error::Result<Formations>>,
}

impl Plugin for WishTreePlugin {
    fn build(&self, app: &mut App) {
        configure_core(app);

        #[cfg(feature = "ron")]
        app.init_asset::<WishTreeConfigAsset>()
            .init_asset_loader::<WishTreeConfigAssetLoader>()
            .add_systems(
                Update,
                assets::apply_config_assets
                    .before(handle_inputs)
                    .in_set(WishTreeSystems::Input),
            );
    }
}

/// Everything except asset registration, so headless apps without `AssetPlugin` work.
fn configure_core(app: &mut App) {
    app.add_message::<WishTreeInput>()
        .init_resource::<WishBus>()
        .init_resource::<WishTreeSettings>()
        .init_resource::<TreeTarget>()
        .init_resource::<FormationJob>()
        .init_resource::<GroupTransitions>()
        .init_resource::<FoliageFrame>();

    let (theme, formations) = initial_formations(app.world().resource::<WishTreeSettings>());
    app.insert_resource(ActiveTheme(theme))
        .insert_resource(ActiveFormations(formations));

    app.configure_sets(
        Update,
        (
            WishTreeSystems::Input,
            WishTreeSystems::Rebuild,
            WishTreeSystems::Animate,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (events::drain_wish_bus, handle_inputs)
            .chain()
            .in_set(WishTreeSystems::Input),
    )
    .add_systems(Update, poll_formation_job.in_set(WishTreeSystems::Rebuild))
    .add_systems(
        Update,
        (
            animation::advance_transitions,
            animation::write_ornament_transforms,
            animation::write_foliage_transforms,
            animation::rotate_group_roots,
            animation::place_star,
        )
            .chain()
            .in_set(WishTreeSystems::Animate),
    );
}

/// Default theme and its formations, built synchronously so the first frame has data.
fn initial_formations(settings: &WishTreeSettings) -> (Arc<Theme>, Arc<Formations>) {
    let theme = Theme::default();
    let formations = Formations::build(&theme, &settings.scene).unwrap_or_else(|err| {
        warn!("Invalid wish tree settings ({err}); using the default scene.");
        Formations::build(&theme, &SceneConfig::default())
            .unwrap_or_else(|_| unreachable!("default scene config is valid"))
    });
    (Arc::new(theme), Arc::new(formations))
}

pub(crate) fn handle_inputs(
    mut commands: Commands,
    mut inputs: MessageReader<WishTreeInput>,
    mut target: ResMut<TreeTarget>,
    mut job: ResMut<FormationJob>,
    settings: Res<WishTreeSettings>,
) {
    for input in inputs.read() {
        match input {
            WishTreeInput::Wish(wish) => {
                if wish.trim().is_empty() {
                    debug!("Ignoring blank wish.");
                    continue;
                }
                let theme = generate_theme(wish);
                info!(
                    "Wish {:?} -> palette {}, height {:.2}, radius {:.2}, loops {}.",
                    wish,
                    theme.palette_name().unwrap_or("default"),
                    theme.geometry().height,
                    theme.geometry().radius_base,
                    theme.geometry().spiral_loops
                );
                let scheduled =
                    schedule_rebuild(&mut commands, &mut job, &settings, Arc::new(theme));
                if scheduled && target.0 == TreeState::Scattered {
                    target.0 = TreeState::TreeShape;
                }
            }
            WishTreeInput::Toggle => {
                target.0 = target.0.toggled();
                debug!("Tree target toggled to {:?}.", target.0);
            }
            WishTreeInput::Set(state) => target.0 = *state,
        }
    }
}

/// Start rebuilding formations for `theme` with the current settings.
///
/// Returns `false` when the settings are rejected and nothing was scheduled.
pub(crate) fn schedule_rebuild(
    commands: &mut Commands,
    job: &mut FormationJob,
    settings: &WishTreeSettings,
    theme: Arc<Theme>,
) -> bool {
    if let Err(err) = settings.scene.validate() {
        warn!("Wish tree settings invalid, keeping current formations: {}", err);
        return false;
    }

    if job.pending.take().is_some() {
        debug!("Dropping superseded formation rebuild.");
    }

    let scene = settings.scene.clone();
    match settings.rebuild {
        RebuildMode::Blocking => match Formations::build(&theme, &scene) {
            Ok(formations) => commands.queue(SwapFormations {
                theme,
                formations: Arc::new(formations),
            }),
            Err(err) => warn!("Formation rebuild failed: {}", err),
        },
        RebuildMode::Async => {
            let pool = AsyncComputeTaskPool::get();
            let task_theme = theme.clone();
            let task = pool.spawn(async move { Formations::build(&task_theme, &scene) });
            job.pending = Some(PendingFormations { theme, task });
        }
    }
    true
}

fn poll_formation_job(mut commands: Commands, mut job: ResMut<FormationJob>) {
    let Some(pending) = job.pending.take() else {
        return;
    };
    if !pending.task.is_finished() {
        job.pending = Some(pending);
        return;
    }

    match block_on(pending.task) {
        Ok(formations) => commands.queue(SwapFormations {
            theme: pending.theme,
            formations: Arc::new(formations),
        }),
        Err(err) => warn!("Formation rebuild failed: {}", err),
    }
}

/// Replaces theme and formations in one command, then triggers [`ThemeApplied`].
struct SwapFormations {
    theme: Arc<Theme>,
    formations: Arc<Formations>,
}

impl Command for SwapFormations {
    fn apply(self, world: &mut World) {
        world.insert_resource(ActiveTheme(self.theme.clone()));
        world.insert_resource(ActiveFormations(self.formations));
        info!("Applied theme {}.", self.theme.id());
        world.trigger(ThemeApplied { theme: self.theme });
    }
}
