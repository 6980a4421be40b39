use std::path::Path;

use glam::{Mat4, Vec3, Vec4};
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wish_tree::prelude::*;

/// Install a `fmt` subscriber honoring `RUST_LOG` (default: `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Perspective camera looking at `target`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 25.0),
            target: Vec3::ZERO,
            fov_y_degrees: 45.0,
        }
    }
}

/// Output image settings.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub camera: Camera,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [5, 5, 12],
            camera: Camera::default(),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }
}

/// Everything needed to draw one frame of the scene.
pub struct SceneFrame<'a> {
    pub theme: &'a Theme,
    pub formations: &'a Formations,
    pub foliage: FoliageUniforms,
    pub spheres: TransitionFrame,
    pub boxes: TransitionFrame,
}

struct Projector {
    view: Mat4,
    view_proj: Mat4,
    width: f32,
    height: f32,
    focal_px: f32,
}

impl Projector {
    fn new(rc: &RenderConfig) -> Self {
        let (w, h) = rc.image_size;
        let (width, height) = (w as f32, h as f32);
        let fov = rc.camera.fov_y_degrees.to_radians();
        let view = Mat4::look_at_rh(rc.camera.eye, rc.camera.target, Vec3::Y);
        let proj = Mat4::perspective_rh(fov, width / height, 0.1, 200.0);
        Self {
            view,
            view_proj: proj * view,
            width,
            height,
            focal_px: height * 0.5 / (fov * 0.5).tan(),
        }
    }

    /// Pixel coordinates and view depth, or `None` behind the camera.
    fn project(&self, p: Vec3) -> Option<(f32, f32, f32)> {
        let depth = -(self.view * Vec4::from((p, 1.0))).z;
        if depth <= 0.1 {
            return None;
        }
        let clip = self.view_proj * Vec4::from((p, 1.0));
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * self.width;
        let y = (1.0 - (ndc.y * 0.5 + 0.5)) * self.height;
        Some((x, y, depth))
    }
}

/// Linear accumulation buffer with additive and opaque writes.
struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let bg = background.map(|c| f32::from(c) / 255.0);
        Self {
            width,
            height,
            pixels: vec![bg; (width * height) as usize],
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn add(&mut self, x: i64, y: i64, color: [f32; 3], alpha: f32) {
        if let Some(i) = self.index(x, y) {
            for (dst, src) in self.pixels[i].iter_mut().zip(color) {
                *dst += src * alpha;
            }
        }
    }

    fn set(&mut self, x: i64, y: i64, color: [f32; 3]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn into_image(self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        for (pixel, color) in img.pixels_mut().zip(self.pixels) {
            *pixel = Rgb(color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
        }
        img
    }
}

/// Render the scene the way the realtime view composes it: additive foliage sprites, then
/// opaque ornaments back to front, then the star. The whole group is spun by
/// [`tree_group_rotation`] at the foliage uniform time.
pub fn render_scene(frame: &SceneFrame<'_>, rc: &RenderConfig) -> RgbImage {
    let projector = Projector::new(rc);
    let mut canvas = Canvas::new(rc.image_size.0, rc.image_size.1, rc.background);
    let time = frame.foliage.time;
    let group = tree_group_rotation(time);
    let colors = frame.theme.colors();

    for particle in frame.formations.foliage.iter() {
        let world = group * foliage_position(particle, &frame.foliage);
        let Some((cx, cy, depth)) = projector.project(world) else {
            continue;
        };
        let size = foliage_point_size(particle.random, &frame.foliage, depth).max(1.0);
        let half = (size * 0.5).ceil() as i64;
        for dy in -half..=half {
            for dx in -half..=half {
                let dist = ((dx as f32).hypot(dy as f32)) / size;
                if let Some((color, alpha)) = foliage_sprite(colors, particle.random, dist) {
                    canvas.add(cx as i64 + dx, cy as i64 + dy, color, alpha);
                }
            }
        }
    }

    let mut ornaments = Vec::new();
    for (kind, transition) in [
        (OrnamentKind::Sphere, frame.spheres),
        (OrnamentKind::Box, frame.boxes),
    ] {
        let base = kind.material(frame.theme).base_color.to_f32_array();
        for (i, ornament) in frame.formations.ornaments(kind).iter().enumerate() {
            let pose = ornament_pose(ornament, i, transition, time);
            let world = group * pose.translation;
            if let Some((x, y, depth)) = projector.project(world) {
                let radius = kind.mesh_size() * pose.scale * projector.focal_px / depth;
                ornaments.push((depth, x, y, radius.max(1.0), kind, base));
            }
        }
    }
    ornaments.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, x, y, radius, kind, color) in ornaments {
        let r = radius.ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                let (fx, fy) = (dx as f32 / radius, dy as f32 / radius);
                let shade = match kind {
                    OrnamentKind::Sphere => {
                        let d2 = fx * fx + fy * fy;
                        if d2 > 1.0 {
                            continue;
                        }
                        // Lambert against a light from the upper left.
                        let nz = (1.0 - d2).sqrt();
                        (0.3 + 0.7 * (-0.5 * fx - 0.5 * fy + 0.7 * nz).max(0.0)).min(1.2)
                    }
                    OrnamentKind::Box => {
                        if fx.abs() > 0.5 || fy.abs() > 0.5 {
                            continue;
                        }
                        0.8
                    }
                };
                canvas.set(
                    x as i64 + dx,
                    y as i64 + dy,
                    color.map(|c| (c * shade).min(1.0)),
                );
            }
        }
    }

    let star = frame.theme.star();
    if let Some((x, y, depth)) = projector.project(group * star.position) {
        let radius = (star.size * projector.focal_px / depth).ceil() as i64;
        let color = star.color.to_f32_array();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                // Octahedron silhouette.
                if dx.abs() + dy.abs() <= radius {
                    canvas.set(x as i64 + dx, y as i64 + dy, color);
                }
            }
        }
    }

    canvas.into_image()
}

/// Render the scene and write it to `path` as PNG.
pub fn render_scene_to_png(
    frame: &SceneFrame<'_>,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    render_scene(frame, rc).save(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Plot `points` as single pixels with additive `color`.
pub fn render_points_to_png(
    points: &[Vec3],
    color: [u8; 3],
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let projector = Projector::new(rc);
    let mut canvas = Canvas::new(rc.image_size.0, rc.image_size.1, rc.background);
    let color = color.map(|c| f32::from(c) / 255.0);
    for &p in points {
        if let Some((x, y, _)) = projector.project(p) {
            canvas.add(x as i64, y as i64, color, 0.35);
        }
    }
    canvas.into_image().save(path)?;
    info!("Wrote {} ({} points)", path.display(), points.len());
    Ok(())
}
