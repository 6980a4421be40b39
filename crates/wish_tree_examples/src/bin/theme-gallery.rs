use wish_tree::prelude::*;
use wish_tree_examples::{init_tracing, render_scene_to_png, RenderConfig, SceneFrame};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Wishes from the command line, or a fixed set covering several palettes.
    let mut wishes: Vec<String> = std::env::args().skip(1).collect();
    if wishes.is_empty() {
        wishes = ["", "peace", "a", "雪", "hope", "snow day"]
            .map(String::from)
            .to_vec();
    }

    let config = SceneConfig::default();
    let rc = RenderConfig::new((800, 800));

    // Fully formed tree with no secondary motion phase offset.
    let frame = TransitionFrame::from_progress(1.0);
    let uniforms = FoliageUniforms::new(frame, 0.0, 1.0);

    for (i, wish) in wishes.iter().enumerate() {
        let theme = generate_theme(wish);
        let geometry = theme.geometry();
        tracing::info!(
            "{:?}: palette={} height={:.3} radius={:.3} loops={} star={}",
            wish,
            theme.palette_name().unwrap_or("default"),
            geometry.height,
            geometry.radius_base,
            geometry.spiral_loops,
            theme.star().color
        );

        let formations = Formations::build(&theme, &config)?;
        let scene = SceneFrame {
            theme: &theme,
            formations: &formations,
            foliage: uniforms,
            spheres: frame,
            boxes: frame,
        };
        render_scene_to_png(&scene, &rc, format!("theme-gallery-{i:02}.png"))?;
    }

    Ok(())
}
