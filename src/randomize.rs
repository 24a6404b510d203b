use crate::config::{Field, Params, bounds};
use crate::rng::Rng;

const SALT_SURPRISE: u64 = 0x5EED_5A17_0000_0001;

#[inline]
fn snap_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

#[inline]
fn round_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Draw one field: uniform in [min, max), snapped to the slider step, then
/// rounded for display. The display rounding runs after the snap, so the
/// result is not always an exact multiple of `step`.
pub fn sample_field(field: Field, rng: &mut Rng) -> f64 {
    let b = bounds(field);
    let raw = rng.range_f64(b.min, b.max);
    let snapped = snap_to_step(raw, b.step);

    if field == Field::Steps {
        snapped.round()
    } else {
        round_decimals(snapped, if b.step < 1.0 { 3 } else { 2 })
    }
}

/// New parameter set with every adjustable field resampled.
/// `initial` carries over from `previous`.
pub fn randomize(previous: &Params, rng: &mut Rng) -> Params {
    let mut next = *previous;
    for field in Field::ALL {
        let v = sample_field(field, rng);
        match field {
            Field::Sigma => next.sigma = v,
            Field::Rho => next.rho = v,
            Field::Beta => next.beta = v,
            Field::Dt => next.dt = v,
            Field::Steps => next.steps = v as usize,
            Field::Speed => next.speed = v,
        }
    }
    next
}

pub fn randomize_seeded(previous: &Params, seed: u64) -> Params {
    randomize(previous, &mut Rng::new(seed ^ SALT_SURPRISE))
}

pub fn randomize_entropy(previous: &Params) -> Params {
    randomize(previous, &mut Rng::from_entropy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_multiple(v: f64, step: f64) -> bool {
        let k = (v / step).round();
        (v - k * step).abs() < 1e-9
    }

    #[test]
    fn bounds_closure_over_many_draws() {
        let prev = Params::default();
        let mut rng = Rng::new(1);
        for _ in 0..5000 {
            let p = randomize(&prev, &mut rng);
            for f in Field::ALL {
                let b = bounds(f);
                let v = p.get(f);
                assert!(v >= b.min && v <= b.max, "{f}={v} outside [{}, {}]", b.min, b.max);
            }
            assert!(p.validate().is_ok());
        }
    }

    #[test]
    fn both_ends_of_every_bound_are_reachable() {
        // The edge values each cover half a step of the raw range, so even
        // `steps` (1/360 per edge) shows up thousands of times.
        let mut rng = Rng::new(1);
        for f in Field::ALL {
            let b = bounds(f);
            let (mut hit_min, mut hit_max) = (false, false);
            for _ in 0..200_000 {
                let v = sample_field(f, &mut rng);
                hit_min |= v == b.min;
                hit_max |= v == b.max;
            }
            assert!(hit_min, "{f} never produced min {}", b.min);
            assert!(hit_max, "{f} never produced max {}", b.max);
        }
    }

    #[test]
    fn values_land_on_step_grid() {
        let prev = Params::default();
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let p = randomize(&prev, &mut rng);
            for f in Field::ALL {
                assert!(is_multiple(p.get(f), bounds(f).step), "{f}={}", p.get(f));
            }
            assert_eq!(p.steps % 100, 0);
        }
    }

    #[test]
    fn initial_carries_over() {
        let prev = Params {
            initial: [1.5, -2.25, 7.0],
            ..Params::default()
        };
        for seed in 0..50 {
            assert_eq!(randomize_seeded(&prev, seed).initial, prev.initial);
        }
        assert_eq!(randomize_entropy(&prev).initial, prev.initial);
    }

    #[test]
    fn seeded_draw_is_reproducible() {
        let prev = Params::default();
        assert_eq!(randomize_seeded(&prev, 42), randomize_seeded(&prev, 42));
        assert_ne!(randomize_seeded(&prev, 42), randomize_seeded(&prev, 43));
    }

    #[test]
    fn snapping() {
        assert_eq!(snap_to_step(27.74, 0.5), 27.5);
        assert_eq!(snap_to_step(27.76, 0.5), 28.0);
        assert_eq!(snap_to_step(12349.0, 100.0), 12300.0);
        // 0.1 * 3 is 0.30000000000000004 until the display rounding
        assert_eq!(round_decimals(snap_to_step(0.31, 0.1), 3), 0.3);
    }

    #[test]
    fn display_rounding() {
        assert_eq!(round_decimals(2.66666, 3), 2.667);
        assert_eq!(round_decimals(0.0149999, 3), 0.015);
        assert_eq!(round_decimals(1234.5678, 2), 1234.57);
    }
}
