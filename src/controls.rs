use serde::Serialize;

use crate::config::{Bound, Field, Params, bounds};

/// Slider metadata the frontend shows next to each adjustable field.
#[derive(Clone, Debug, Serialize)]
pub struct Control {
    pub field: Field,
    pub label: &'static str,
    pub description: &'static str,
    pub suffix: Option<&'static str>,
    pub bound: Bound,
    pub default: f64,
}

fn meta(field: Field) -> (&'static str, &'static str, Option<&'static str>) {
    match field {
        Field::Sigma => (
            "σ · Prandtl number",
            "Controls velocity diffusion between fluid layers",
            None,
        ),
        Field::Rho => (
            "ρ · Rayleigh number",
            "Energy injected into the convection system",
            None,
        ),
        Field::Beta => (
            "β · Geometric factor",
            "Aspect ratio of the convection rolls",
            None,
        ),
        Field::Dt => (
            "Δt · Integration step",
            "Time resolution for the numerical solver",
            Some("s"),
        ),
        Field::Steps => (
            "Points traced",
            "Number of samples drawn on the attractor",
            None,
        ),
        Field::Speed => (
            "Orbit speed",
            "Passive rotation speed of the attractor",
            Some("x"),
        ),
    }
}

pub fn controls() -> Vec<Control> {
    let defaults = Params::default();
    Field::ALL
        .into_iter()
        .map(|field| {
            let (label, description, suffix) = meta(field);
            Control {
                field,
                label,
                description,
                suffix,
                bound: bounds(field),
                default: defaults.get(field),
            }
        })
        .collect()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Label text for a slider value, precision shrinking as magnitude grows.
pub fn format_value(field: Field, value: f64) -> String {
    let body = if field == Field::Steps {
        group_thousands(value.round().max(0.0) as u64)
    } else if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.3}")
    };

    match meta(field).2 {
        Some(suffix) => format!("{body} {suffix}"),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_control_per_field_in_order() {
        let c = controls();
        let fields: Vec<Field> = c.iter().map(|c| c.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        assert_eq!(c[4].default, 9000.0);
        assert_eq!(c[3].bound, bounds(Field::Dt));
    }

    #[test]
    fn formatting() {
        assert_eq!(format_value(Field::Sigma, 10.0), "10.00");
        assert_eq!(format_value(Field::Beta, 8.0 / 3.0), "2.667");
        assert_eq!(format_value(Field::Dt, 0.01), "0.010 s");
        assert_eq!(format_value(Field::Speed, 0.18), "0.180 x");
        assert_eq!(format_value(Field::Steps, 9000.0), "9,000");
        assert_eq!(format_value(Field::Steps, 20000.0), "20,000");
        assert_eq!(format_value(Field::Rho, 28.5), "28.50");
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
