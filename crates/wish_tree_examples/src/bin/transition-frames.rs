use wish_tree::prelude::*;
use wish_tree_examples::{init_tracing, render_scene_to_png, RenderConfig, SceneFrame};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let wish = std::env::args().nth(1).unwrap_or_else(|| "peace".to_string());
    let theme = generate_theme(&wish);
    let formations = Formations::build(&theme, &SceneConfig::default())?;
    let rc = RenderConfig::new((640, 640));

    // Simulate 60 fps: gather into the tree for 4 s, then scatter again for 4 s.
    let dt = 1.0 / 60.0;
    let frames_per_phase = 240;
    let mut foliage = GroupTransition::foliage();
    let mut spheres = GroupTransition::ornaments();
    let mut boxes = GroupTransition::ornaments();

    for step in 0..frames_per_phase * 2 {
        let target = if step < frames_per_phase {
            TreeState::TreeShape
        } else {
            TreeState::Scattered
        };
        let time = step as f32 * dt;
        let foliage_frame = foliage.advance(target);
        let sphere_frame = spheres.advance(target);
        let box_frame = boxes.advance(target);

        if step % 30 == 0 {
            tracing::info!(
                "t={time:.2}s target={target:?} foliage={:.3} (eased {:.3}) ornaments={:.3}",
                foliage_frame.progress,
                foliage_frame.eased,
                sphere_frame.progress
            );
            let scene = SceneFrame {
                theme: &theme,
                formations: &formations,
                foliage: FoliageUniforms::new(foliage_frame, time, 1.0),
                spheres: sphere_frame,
                boxes: box_frame,
            };
            render_scene_to_png(&scene, &rc, format!("transition-{step:04}.png"))?;
        }
    }

    Ok(())
}
