use serde::Serialize;

use crate::lorenz::Point;

/// Camera sits on +z looking at the origin, vertical FOV in degrees.
pub const CAMERA_DISTANCE: f64 = 60.0;
pub const CAMERA_FOV_DEG: f64 = 55.0;
const NEAR: f64 = 0.1;

/// Accepted preview size range, per side, in pixels.
pub const MIN_VIEWPORT: usize = 16;
pub const MAX_VIEWPORT: usize = 4096;

/// Pitch turns at a fifth of the yaw rate.
const PITCH_RATIO: f64 = 0.2;

/// Passive rotation of the attractor group, radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Rotation {
    /// Advance by one frame of `delta` seconds. Only `speed` is consumed
    /// from the parameter set.
    pub fn advance(self, delta: f64, speed: f64) -> Rotation {
        Rotation {
            yaw: self.yaw + delta * speed,
            pitch: self.pitch + delta * speed * PITCH_RATIO,
        }
    }

    /// Rotation reached after `elapsed` seconds from rest.
    pub fn at(elapsed: f64, speed: f64) -> Rotation {
        Rotation::default().advance(elapsed, speed)
    }

    /// Apply yaw (about y) then pitch (about x).
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let (sy, cy) = self.yaw.sin_cos();
        let x1 = cy * p.x + sy * p.z;
        let z1 = -sy * p.x + cy * p.z;

        let (sp, cp) = self.pitch.sin_cos();
        Point {
            x: x1,
            y: cp * p.y - sp * z1,
            z: sp * p.y + cp * z1,
        }
    }
}

/// Clamp a requested preview size into the accepted range.
pub fn clamp_viewport(w: usize, h: usize) -> (usize, usize) {
    (
        w.clamp(MIN_VIEWPORT, MAX_VIEWPORT),
        h.clamp(MIN_VIEWPORT, MAX_VIEWPORT),
    )
}

/// Perspective camera fixed on the z axis.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub w: usize,
    pub h: usize,
    focal: f64,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        let half_fov = (CAMERA_FOV_DEG.to_radians() * 0.5).tan();
        Self {
            w,
            h,
            focal: 0.5 * h as f64 / half_fov,
        }
    }

    /// Pixel coordinates of a rotated point. `None` for points behind the
    /// near plane or with non-finite coordinates.
    #[inline]
    pub fn project(&self, p: Point) -> Option<[f64; 2]> {
        if !p.is_finite() {
            return None;
        }
        let depth = CAMERA_DISTANCE - p.z;
        if depth < NEAR {
            return None;
        }
        let px = 0.5 * self.w as f64 + p.x * self.focal / depth;
        let py = 0.5 * self.h as f64 - p.y * self.focal / depth;
        Some([px, py])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_rates() {
        let r = Rotation::default().advance(0.5, 0.18);
        assert_relative_eq!(r.yaw, 0.09, epsilon = 1e-12);
        assert_relative_eq!(r.pitch, 0.018, epsilon = 1e-12);

        let stepped = (0..10).fold(Rotation::default(), |r, _| r.advance(0.1, 0.3));
        let direct = Rotation::at(1.0, 0.3);
        assert_relative_eq!(stepped.yaw, direct.yaw, epsilon = 1e-12);
        assert_relative_eq!(stepped.pitch, direct.pitch, epsilon = 1e-12);
    }

    #[test]
    fn zero_speed_never_turns() {
        assert_eq!(Rotation::at(100.0, 0.0), Rotation::default());
    }

    #[test]
    fn quarter_yaw_maps_x_to_negative_z() {
        let r = Rotation {
            yaw: std::f64::consts::FRAC_PI_2,
            pitch: 0.0,
        };
        let p = r.apply(Point::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn projection_centers_origin() {
        let cam = Camera::new(800, 600);
        let [x, y] = cam.project(Point::new(0.0, 0.0, 0.0)).expect("visible");
        assert_relative_eq!(x, 400.0);
        assert_relative_eq!(y, 300.0);

        let [_, y_up] = cam.project(Point::new(0.0, 5.0, 0.0)).expect("visible");
        assert!(y_up < 300.0);
    }

    #[test]
    fn viewport_is_clamped() {
        assert_eq!(clamp_viewport(0, 0), (MIN_VIEWPORT, MIN_VIEWPORT));
        assert_eq!(clamp_viewport(1024, 100_000), (1024, MAX_VIEWPORT));
    }

    #[test]
    fn projection_culls() {
        let cam = Camera::new(100, 100);
        assert!(cam.project(Point::new(0.0, 0.0, 80.0)).is_none());
        assert!(cam.project(Point::new(f64::INFINITY, 0.0, 0.0)).is_none());
    }
}
