//! Shared helpers for the example binaries: tracing setup and a top-down
//! PNG renderer for generated tracks. Debugging aid only, not a renderer.
use anyhow::Result;
use glam::Vec2;
use image::{Rgb, RgbImage};
use track_forge::track::Track;

/// Install a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Rendering options for [render_track_to_png].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image side length in pixels.
    pub size_px: u32,
    /// World-units side length of the rendered square, centered on origin.
    pub world_extent: f32,
    pub background: [u8; 3],
    pub track_color: [u8; 3],
    pub tree_color: [u8; 3],
    pub checkpoint_color: [u8; 3],
    pub start_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_px: 1024,
            world_extent: 460.0,
            background: [26, 48, 26],
            track_color: [70, 70, 76],
            tree_color: [36, 110, 46],
            checkpoint_color: [220, 170, 40],
            start_color: [240, 240, 240],
        }
    }
}

/// Render the track polyline, trees, checkpoints, and start line into a PNG.
pub fn render_track_to_png(track: &Track, config: &RenderConfig, path: &str) -> Result<()> {
    let mut img = RgbImage::from_pixel(config.size_px, config.size_px, Rgb(config.background));

    for tree in track.trees() {
        draw_disk(
            &mut img,
            config,
            tree.position,
            tree.collision_radius.max(2.0),
            config.tree_color,
        );
    }

    let points = track.points();
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        draw_segment(&mut img, config, a, b, 4.0, config.track_color);
    }

    for cp in track.checkpoints() {
        draw_disk(&mut img, config, cp.position, 5.0, config.checkpoint_color);
    }

    let start = track.start_line_position();
    draw_disk(&mut img, config, start, 6.0, config.start_color);

    img.save(path)?;
    Ok(())
}

fn world_to_px(config: &RenderConfig, p: Vec2) -> (f32, f32) {
    let scale = config.size_px as f32 / config.world_extent;
    let half = config.size_px as f32 / 2.0;
    (half + p.x * scale, half + p.y * scale)
}

fn draw_disk(img: &mut RgbImage, config: &RenderConfig, center: Vec2, radius: f32, color: [u8; 3]) {
    let (cx, cy) = world_to_px(config, center);
    let r_px = (radius * config.size_px as f32 / config.world_extent).max(1.5);

    let x0 = (cx - r_px).floor().max(0.0) as u32;
    let x1 = ((cx + r_px).ceil() as u32).min(img.width().saturating_sub(1));
    let y0 = (cy - r_px).floor().max(0.0) as u32;
    let y1 = ((cy + r_px).ceil() as u32).min(img.height().saturating_sub(1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r_px * r_px {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

fn draw_segment(
    img: &mut RgbImage,
    config: &RenderConfig,
    a: Vec2,
    b: Vec2,
    width: f32,
    color: [u8; 3],
) {
    let length = a.distance(b);
    let steps = ((length * 2.0).ceil() as usize).max(1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        draw_disk(img, config, a.lerp(b, t), width * 0.5, color);
    }
}
