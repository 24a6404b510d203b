use rayon::prelude::*;

use crate::grid::Grid;
use crate::lorenz::Point;
use crate::view::{Camera, Rotation};

// Palette: deep violet scene background, magenta strip, white-hot where
// the strip overlaps itself.
const BACKGROUND: [u8; 4] = [3, 1, 11, 255];
const STRIP: [u8; 4] = [255, 106, 213, 255];
const HOT: [u8; 4] = [255, 236, 250, 255];

/// Density at which a pixel reaches full strip color.
const SATURATION: f32 = 1.5;

/// Segments longer than this many viewport diagonals are culled instead of
/// rasterized (blown-up orbits).
const MAX_SEGMENT_DIAGONALS: f64 = 4.0;

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

/// Rasterize the trajectory as a connected line strip into a density grid.
/// Non-finite or off-camera points break the strip. A point whose outgoing
/// segment is not drawn still gets a dot.
pub fn rasterize_strip(points: &[Point], camera: &Camera, rotation: Rotation) -> Grid<f32> {
    let mut density: Grid<f32> = Grid::new(camera.w, camera.h);
    let diag = ((camera.w * camera.w + camera.h * camera.h) as f64).sqrt();
    let max_len = diag * MAX_SEGMENT_DIAGONALS;

    let mut prev: Option<[f64; 2]> = None;
    for &p in points {
        let cur = camera.project(rotation.apply(p));
        if let (Some(a), Some(b)) = (prev, cur) {
            let dx = b[0] - a[0];
            let dy = b[1] - a[1];
            let len = dx.abs().max(dy.abs());
            if len <= max_len {
                let n = len.ceil().max(1.0) as usize;
                // Endpoint b is drawn as the start of the next segment.
                for i in 0..n {
                    let t = i as f64 / n as f64;
                    let x = (a[0] + dx * t).floor() as i64;
                    let y = (a[1] + dy * t).floor() as i64;
                    density.add(x, y, 1.0);
                }
            } else {
                splat(&mut density, a);
            }
        } else if let Some(a) = prev {
            splat(&mut density, a);
        }
        prev = cur;
    }

    if let Some(last) = prev {
        splat(&mut density, last);
    }

    density
}

#[inline]
fn splat(density: &mut Grid<f32>, p: [f64; 2]) {
    density.add(p[0].floor() as i64, p[1].floor() as i64, 1.0);
}

/// Map a density grid to RGBA.
pub fn colorize(density: &Grid<f32>) -> Vec<u8> {
    let w = density.w;
    let h = density.h;
    let mut rgba = vec![0u8; w * h * 4];
    if rgba.is_empty() {
        return rgba;
    }

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let d = density.get(x, y);
                let color = if d <= 0.0 {
                    BACKGROUND
                } else if d < SATURATION {
                    lerp_color(BACKGROUND, STRIP, d / SATURATION)
                } else {
                    // Overlapping passes glow toward white.
                    let t = 1.0 - (-(d - SATURATION) * 0.15).exp();
                    lerp_color(STRIP, HOT, t)
                };

                let out = &mut row[x * 4..x * 4 + 4];
                out.copy_from_slice(&color);
            }
        });

    rgba
}

/// Render the final preview frame.
pub fn render_trajectory(points: &[Point], camera: &Camera, rotation: Rotation) -> Vec<u8> {
    colorize(&rasterize_strip(points, camera, rotation))
}
