pub mod config;
pub mod controls;
pub mod error;
pub mod grid;
pub mod lorenz;
pub mod randomize;
pub mod render;
pub mod rng;
pub mod view;

use std::time::Instant;

use config::Params;
use lorenz::{Extent, Point};
use view::{Camera, Rotation};

pub struct Frame {
    pub w: usize,
    pub h: usize,
    pub params: Params,
    pub rotation: Rotation,
    pub points: Vec<Point>,
    pub extent: Option<Extent>,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Integrate the orbit for `params` and render it as seen `elapsed` seconds
/// into the passive rotation.
pub fn generate(params: &Params, w: usize, h: usize, elapsed: f64) -> (Frame, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Integrate
    let t = Instant::now();
    let points = lorenz::generate_trajectory(params);
    timings.push(Timing {
        name: "integrate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Bounding box for framing
    let t = Instant::now();
    let extent = Extent::of(&points);
    timings.push(Timing {
        name: "extent",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Render
    let t = Instant::now();
    let rotation = Rotation::at(elapsed, params.speed);
    let rgba = render::render_trajectory(&points, &Camera::new(w, h), rotation);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let frame = Frame {
        w,
        h,
        params: *params,
        rotation,
        points,
        extent,
        rgba,
    };

    (frame, timings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_produces_consistent_frame() {
        let params = Params {
            steps: 2000,
            ..Params::default()
        };
        let (frame, timings) = generate(&params, 64, 48, 1.0);
        assert_eq!(frame.points.len(), 2000);
        assert_eq!(frame.rgba.len(), 64 * 48 * 4);
        assert!(frame.extent.is_some());
        assert_eq!(frame.rotation, Rotation::at(1.0, params.speed));
        let names: Vec<&str> = timings.iter().map(|t| t.name).collect();
        assert_eq!(names, ["integrate", "extent", "render", "TOTAL"]);
    }
}
