use thiserror::Error;

/// Hard-input failures of the digester core.
///
/// Numerical clamps and solver non-convergence are not errors and never
/// show up here.
#[derive(Debug, Error)]
pub enum DigesterError {
    #[error("{block} must have {expected} values, found {found}")]
    ParameterSizeMismatch {
        block: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unknown parameter name: {0}")]
    UnknownParameter(String),
    #[error("reactor volume {name} must be positive, found {value}")]
    InvalidVolume { name: &'static str, value: f64 },
}

pub(crate) fn check_size(
    block: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), DigesterError> {
    if expected != found {
        return Err(DigesterError::ParameterSizeMismatch {
            block,
            expected,
            found,
        });
    }
    Ok(())
}
