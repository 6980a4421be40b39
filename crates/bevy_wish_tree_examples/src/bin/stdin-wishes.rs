use std::io::BufRead;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy_wish_tree::prelude::*;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins((AssetPlugin::default(), bevy::log::LogPlugin::default()))
        .add_plugins(WishTreePlugin)
        .add_systems(Startup, spawn_stdin_reader)
        .add_systems(Update, report_progress.after(WishTreeSystems::Animate))
        .add_observer(log_theme)
        .run();
}

/// Reads lines on a background thread and forwards them through the bus.
/// `toggle`, `tree` and `scatter` control the target; anything else is a wish.
fn spawn_stdin_reader(bus: Res<WishBus>) {
    let tx = bus.sender().clone();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let input = match line.trim() {
                "toggle" => WishTreeInput::Toggle,
                "tree" => WishTreeInput::Set(TreeState::TreeShape),
                "scatter" => WishTreeInput::Set(TreeState::Scattered),
                _ => WishTreeInput::Wish(line),
            };
            if tx.send(input).is_err() {
                break;
            }
        }
    });
    info!("Type a wish, or `toggle` / `tree` / `scatter`.");
}

/// Logs progress twice a second while a group is still moving.
fn report_progress(
    time: Res<Time>,
    mut timer: Local<f32>,
    target: Res<TreeTarget>,
    transitions: Res<GroupTransitions>,
) {
    *timer += time.delta_secs();
    if *timer < 0.5 {
        return;
    }
    *timer = 0.0;

    let goal = target.0.target_progress();
    let foliage = transitions.foliage.frame();
    let spheres = transitions.spheres.frame();
    if (goal - foliage.progress).abs() > 1e-3 || (goal - spheres.progress).abs() > 1e-3 {
        info!(
            "{:?}: foliage {:.3} (eased {:.3}), ornaments {:.3} (eased {:.3})",
            target.0, foliage.progress, foliage.eased, spheres.progress, spheres.eased
        );
    }
}

fn log_theme(applied: On<ThemeApplied>, formations: Res<ActiveFormations>) {
    let theme = &applied.theme;
    let colors = theme.colors();
    info!(
        "Theme {} ({}): foliage {} -> {}, spheres {}, boxes {}, star at y={:.2}; {} particles",
        theme.id(),
        theme.palette_name().unwrap_or("default"),
        colors.foliage_base,
        colors.foliage_tip,
        colors.ornament_sphere,
        colors.ornament_box,
        theme.star().position.y,
        formations.0.foliage.len()
    );
}
