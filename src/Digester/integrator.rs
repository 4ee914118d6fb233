//! # Fixed-step integrators for the digester ODE part
//!
//! Between two major steps the algebraic values are frozen and the 42-slot state
//! follows `dx/dt = f(t, x)`. Any explicit scheme that advances `x` from `t` to
//! `t + dt` can be plugged into the digester through [`StepIntegrator`].
//!
//! ## Main Structures
//! - `ExplicitEuler`: `x_{n+1} = x_n + h f(t_n, x_n)`, with `substeps` sub-intervals
//! - `RungeKutta4`: the classical four-stage scheme, with `substeps` sub-intervals
//! - `Integrator`: enum over the two, dispatched with `enum_dispatch`
//!
//! The stiffest remaining mode is the head-space CO₂ balance, about 1600 1/d under
//! BSM2 conditions. Explicit substeps should stay at or below 1e-3 d.

use super::parameters::StateVector;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// Right-hand side `f(t, x)` as seen by an integrator.
pub type Rhs<'a> = dyn Fn(f64, &StateVector) -> StateVector + 'a;

#[enum_dispatch]
pub trait StepIntegrator {
    /// Advances `x` in place from `t` to `t + dt`.
    fn advance(&mut self, rhs: &Rhs, t: f64, dt: f64, x: &mut StateVector);
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplicitEuler {
    pub substeps: usize,
}

impl Default for ExplicitEuler {
    fn default() -> Self {
        ExplicitEuler { substeps: 1 }
    }
}

impl StepIntegrator for ExplicitEuler {
    fn advance(&mut self, rhs: &Rhs, t: f64, dt: f64, x: &mut StateVector) {
        let n = self.substeps.max(1);
        let h = dt / n as f64;
        for k in 0..n {
            let dx = rhs(t + k as f64 * h, x);
            *x += dx * h;
        }
    }

    fn name(&self) -> &'static str {
        "explicit Euler"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RungeKutta4 {
    pub substeps: usize,
}

impl Default for RungeKutta4 {
    fn default() -> Self {
        RungeKutta4 { substeps: 1 }
    }
}

impl StepIntegrator for RungeKutta4 {
    fn advance(&mut self, rhs: &Rhs, t: f64, dt: f64, x: &mut StateVector) {
        let n = self.substeps.max(1);
        let h = dt / n as f64;
        for k in 0..n {
            let tk = t + k as f64 * h;
            let k1 = rhs(tk, x);
            let k2 = rhs(tk + 0.5 * h, &(*x + k1 * (0.5 * h)));
            let k3 = rhs(tk + 0.5 * h, &(*x + k2 * (0.5 * h)));
            let k4 = rhs(tk + h, &(*x + k3 * h));
            *x += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0);
        }
    }

    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }
}

#[enum_dispatch(StepIntegrator)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Integrator {
    ExplicitEuler,
    RungeKutta4,
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator::RungeKutta4(RungeKutta4 { substeps: 10 })
    }
}
