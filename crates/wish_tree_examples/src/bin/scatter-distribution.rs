use glam::Vec3;
use wish_tree::prelude::*;
use wish_tree_examples::{init_tracing, render_points_to_png, Camera, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let radius = SCATTER_RADIUS;
    let count = 200_000usize;
    let buckets = 10usize;

    let mut rng = Mulberry32::from_text("scatter-distribution");
    let points: Vec<Vec3> = (0..count)
        .map(|_| scatter_position(&mut rng, radius))
        .collect();

    // Uniform in volume means (r / R)^3 is uniform: every bucket should hold count / buckets.
    let mut histogram = vec![0usize; buckets];
    for p in &points {
        let u = (p.length() / radius).powi(3);
        histogram[((u * buckets as f32) as usize).min(buckets - 1)] += 1;
    }
    let expected = count as f32 / buckets as f32;
    for (i, n) in histogram.iter().enumerate() {
        tracing::info!(
            "(r/R)^3 in [{:.1}, {:.1}): {n:>6} ({:+.2}%)",
            i as f32 / buckets as f32,
            (i + 1) as f32 / buckets as f32,
            (*n as f32 - expected) / expected * 100.0
        );
    }

    let polar = points
        .iter()
        .filter(|p| p.y.abs() > 0.9 * p.length())
        .count();
    tracing::info!(
        "Points within 25.8 deg of the poles: {:.2}% (uniform: 10.00%)",
        polar as f32 / count as f32 * 100.0
    );

    // Top-down view of the cloud.
    let rc = RenderConfig::new((800, 800)).with_camera(Camera {
        eye: Vec3::new(0.0, 70.0, 0.001),
        target: Vec3::ZERO,
        fov_y_degrees: 45.0,
    });
    render_points_to_png(&points, [120, 200, 255], &rc, "scatter-distribution.png")?;

    Ok(())
}
