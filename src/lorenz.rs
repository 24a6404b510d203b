use serde::Serialize;

use crate::config::Params;

/// One sample of the trajectory in phase space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Point {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Lorenz vector field at `s`:
/// dx/dt = σ(y - x), dy/dt = x(ρ - z) - y, dz/dt = xy - βz
#[inline]
pub fn derivatives(s: Point, params: &Params) -> Point {
    Point {
        x: params.sigma * (s.y - s.x),
        y: s.x * (params.rho - s.z) - s.y,
        z: s.x * s.y - params.beta * s.z,
    }
}

/// One forward Euler step. All three components advance from the same
/// pre-update state.
#[inline]
pub fn euler_step(s: Point, params: &Params) -> Point {
    let d = derivatives(s, params);
    Point {
        x: s.x + d.x * params.dt,
        y: s.y + d.y * params.dt,
        z: s.z + d.z * params.dt,
    }
}

/// Integrate `params.steps` fixed Euler steps from `params.initial`.
///
/// Index 0 is the state after the first step, not the initial state.
/// Values are passed through as computed: no clamping and no divergence
/// check, so a blown-up orbit yields huge or non-finite points.
///
/// Panics if `dt` is not a positive finite number. Callers clamp through
/// `Params::with` / `Params::clamped` before getting here.
pub fn generate_trajectory(params: &Params) -> Vec<Point> {
    assert!(
        params.dt.is_finite() && params.dt > 0.0,
        "integration timestep must be positive and finite, got dt={}",
        params.dt
    );

    let mut state = Point::from(params.initial);
    let mut points = Vec::with_capacity(params.steps);
    for _ in 0..params.steps {
        state = euler_step(state, params);
        points.push(state);
    }
    points
}

/// Axis-aligned bounding box over the finite points of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extent {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Extent {
    /// `None` when the trajectory has no finite point.
    pub fn of(points: &[Point]) -> Option<Extent> {
        points
            .iter()
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<Extent>, p| {
                let v = [p.x, p.y, p.z];
                Some(match acc {
                    None => Extent { min: v, max: v },
                    Some(mut e) => {
                        for i in 0..3 {
                            e.min[i] = e.min[i].min(v[i]);
                            e.max[i] = e.max[i].max(v[i]);
                        }
                        e
                    }
                })
            })
    }

    pub fn center(&self) -> [f64; 3] {
        [
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
            0.5 * (self.min[2] + self.max[2]),
        ]
    }
}
