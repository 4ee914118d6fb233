//! Scalar Newton-Raphson iteration shared by the pH and hydrogen solvers.
//!
//! The loop evaluates the residual at the current iterate, steps
//! `x <- x - f(x)/f'(x)` and floors non-positive iterates. It stops once the
//! residual of the last evaluated iterate is within tolerance or the
//! iteration budget is spent. Running out of iterations is not an error: the
//! last iterate stands and the report says so.

use serde::{Deserialize, Serialize};

pub const NEWTON_TOLERANCE: f64 = 1.0e-12;
pub const NEWTON_MAX_ITERATIONS: usize = 1000;
/// Replacement for non-positive iterates.
pub const CONCENTRATION_FLOOR: f64 = 1.0e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub floor: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        NewtonSettings {
            tolerance: NEWTON_TOLERANCE,
            max_iterations: NEWTON_MAX_ITERATIONS,
            floor: CONCENTRATION_FLOOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NewtonReport {
    pub iterations: usize,
    pub converged: bool,
    /// residual of the last evaluated iterate
    pub residual: f64,
    /// iterate at which that residual was evaluated
    pub evaluated_at: f64,
}

/// Runs the iteration in place on `x`. `residual_and_slope` returns `(f(x), f'(x))`.
pub fn newton_1d<F>(x: &mut f64, settings: &NewtonSettings, mut residual_and_slope: F) -> NewtonReport
where
    F: FnMut(f64) -> (f64, f64),
{
    let mut residual: f64 = 1.0;
    let mut evaluated_at = *x;
    let mut iterations = 0;
    while residual.abs() > settings.tolerance && iterations < settings.max_iterations {
        evaluated_at = *x;
        let (f, slope) = residual_and_slope(*x);
        residual = f;
        *x -= f / slope;
        if *x <= 0.0 {
            *x = settings.floor;
        }
        iterations += 1;
    }
    NewtonReport {
        iterations,
        converged: residual.abs() <= settings.tolerance,
        residual,
        evaluated_at,
    }
}
