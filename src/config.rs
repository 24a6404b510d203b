use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// All tunable parameters — exposed as UI sliders in the frontend.
/// A value is never edited in place; every edit produces a new set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    // Lorenz coefficients
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,

    // Integration
    pub dt: f64,
    pub steps: usize,

    // Presentation only (passive rotation rate)
    pub speed: f64,

    pub initial: [f64; 3],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
            steps: 9000,
            speed: 0.18,
            initial: [0.01, 0.0, 0.0],
        }
    }
}

pub fn default_params() -> Params {
    Params::default()
}

/// Valid range and slider granularity for one adjustable field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bound {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    #[inline]
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// The adjustable fields of `Params`. `initial` has no bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Sigma,
    Rho,
    Beta,
    Dt,
    Steps,
    Speed,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Sigma,
        Field::Rho,
        Field::Beta,
        Field::Dt,
        Field::Steps,
        Field::Speed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Sigma => "sigma",
            Field::Rho => "rho",
            Field::Beta => "beta",
            Field::Dt => "dt",
            Field::Steps => "steps",
            Field::Speed => "speed",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ParamError::UnknownField(s.to_string()))
    }
}

const SIGMA_BOUND: Bound = Bound::new(0.0, 40.0, 0.1);
const RHO_BOUND: Bound = Bound::new(0.0, 60.0, 0.5);
const BETA_BOUND: Bound = Bound::new(0.0, 10.0, 0.05);
const DT_BOUND: Bound = Bound::new(0.001, 0.05, 0.001);
const STEPS_BOUND: Bound = Bound::new(2000.0, 20000.0, 100.0);
const SPEED_BOUND: Bound = Bound::new(0.0, 0.6, 0.01);

pub fn bounds(field: Field) -> Bound {
    match field {
        Field::Sigma => SIGMA_BOUND,
        Field::Rho => RHO_BOUND,
        Field::Beta => BETA_BOUND,
        Field::Dt => DT_BOUND,
        Field::Steps => STEPS_BOUND,
        Field::Speed => SPEED_BOUND,
    }
}

/// Lookup by name. An unknown name is a programming error and panics.
pub fn bounds_by_name(name: &str) -> Bound {
    match name.parse::<Field>() {
        Ok(field) => bounds(field),
        Err(e) => panic!("bounds lookup failed: {e}"),
    }
}

impl Params {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Sigma => self.sigma,
            Field::Rho => self.rho,
            Field::Beta => self.beta,
            Field::Dt => self.dt,
            Field::Steps => self.steps as f64,
            Field::Speed => self.speed,
        }
    }

    /// Copy with one field replaced, clamped into its bound.
    /// NaN leaves the set unchanged (same as an unparsable number input).
    pub fn with(&self, field: Field, value: f64) -> Params {
        if value.is_nan() {
            return *self;
        }
        let v = bounds(field).clamp(value);
        let mut next = *self;
        match field {
            Field::Sigma => next.sigma = v,
            Field::Rho => next.rho = v,
            Field::Beta => next.beta = v,
            Field::Dt => next.dt = v,
            Field::Steps => next.steps = v.round() as usize,
            Field::Speed => next.speed = v,
        }
        next
    }

    pub fn reset(&self) -> Params {
        Params::default()
    }

    /// Every adjustable field clamped into its bound; `initial` untouched.
    pub fn clamped(&self) -> Params {
        Field::ALL
            .into_iter()
            .fold(*self, |p, f| p.with(f, self.get(f)))
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        for field in Field::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(ParamError::NotFinite { field: field.name() });
            }
            let b = bounds(field);
            if !b.contains(value) {
                return Err(ParamError::OutOfRange {
                    field: field.name(),
                    value,
                    min: b.min,
                    max: b.max,
                });
            }
        }
        if self.initial.iter().any(|v| !v.is_finite()) {
            return Err(ParamError::NotFinite { field: "initial" });
        }
        Ok(())
    }
}
