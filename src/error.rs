use thiserror::Error;

/// Faults raised where parameter values enter from outside (server requests,
/// CLI args). The core operations themselves never return errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Unknown parameter: {0}")]
    UnknownField(String),

    #[error("Parameter {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Parameter {field} is not a finite number")]
    NotFinite { field: &'static str },
}
