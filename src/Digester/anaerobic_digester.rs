//! # Anaerobic digester coordinator
//!
//! Owns the continuous digester state together with the two algebraic solvers and
//! sequences them the way the DAE scheme requires. One major step is:
//!
//! 1. the integrator advances the 42-slot state with the algebraic values frozen;
//! 2. the pH solver re-solves the charge balance on the new state;
//! 3. the hydrogen solver re-solves the H₂ balance using the fresh S_H and S_NH3.
//!
//! Between two major steps every right-hand-side evaluation sees the same
//! `AlgebraicState`. Swapping steps 2 and 3 lags S_H by one step in the H₂ balance.
//!
//! The solver outputs are mirrored into the algebraic slots of the state (S_h2 and
//! the six ion slots) so that `state()` always shows the live values. Those slots
//! have zero derivative, so the integrator leaves them alone.

use super::adm1_model::{Adm1Model, AlgebraicState};
use super::errors::DigesterError;
use super::h2_solver::HydrogenSolver;
use super::indices::*;
use super::integrator::StepIntegrator;
use super::newton::{NewtonReport, NewtonSettings};
use super::observation::DigesterObservation;
use super::parameters::{InfluentVector, InitialState, StateVector};
use super::ph_solver::{IonState, PhSolver};
use log::info;

/// Diagnostic counters of the two algebraic solvers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolverDiagnostics {
    pub ph_non_converged: usize,
    pub h2_non_converged: usize,
    pub last_ph: NewtonReport,
    pub last_h2: NewtonReport,
}

#[derive(Debug, Clone)]
pub struct AnaerobicDigester {
    model: Adm1Model,
    x: StateVector,
    ph_solver: PhSolver,
    h2_solver: HydrogenSolver,
    t: f64,
}

impl AnaerobicDigester {
    /// Digester started from `initial`; the solvers are seeded from its S_H, ion and
    /// S_h2 slots.
    pub fn new(model: Adm1Model, initial: &InitialState) -> Result<Self, DigesterError> {
        let x = initial.state_vector()?;
        let ions = IonState::from_state(initial.s_h_ion, &x);
        Ok(AnaerobicDigester {
            model,
            ph_solver: PhSolver::new(ions),
            h2_solver: HydrogenSolver::new(x[S_H2]),
            x,
            t: 0.0,
        })
    }

    /// BSM2 parameters and steady-state start.
    pub fn bsm2() -> Result<Self, DigesterError> {
        Self::new(Adm1Model::default(), &InitialState::bsm2())
    }

    pub fn model(&self) -> &Adm1Model {
        &self.model
    }

    pub fn state(&self) -> &StateVector {
        &self.x
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn ions(&self) -> &IonState {
        &self.ph_solver.ions
    }

    pub fn s_h2(&self) -> f64 {
        self.h2_solver.s_h2
    }

    pub fn set_solver_settings(&mut self, settings: NewtonSettings) {
        self.ph_solver.set_settings(settings);
        self.h2_solver.set_settings(settings);
    }

    /// Frozen algebraic values as seen by the derivative engine.
    pub fn algebraic(&self) -> AlgebraicState {
        AlgebraicState {
            ions: self.ph_solver.ions,
            s_h2: self.h2_solver.s_h2,
        }
    }

    pub fn diagnostics(&self) -> SolverDiagnostics {
        SolverDiagnostics {
            ph_non_converged: self.ph_solver.non_converged,
            h2_non_converged: self.h2_solver.non_converged,
            last_ph: self.ph_solver.last_report,
            last_h2: self.h2_solver.last_report,
        }
    }

    /// Right-hand side callback `(t, x, u) -> dx/dt` with the current algebraic values.
    pub fn rhs(&self, t: f64, x: &StateVector, u: &InfluentVector) -> StateVector {
        self.model.derivatives(t, x, u, &self.algebraic())
    }

    /// Discrete pH update on the current state.
    pub fn update_ph(&mut self) -> NewtonReport {
        let report = self.ph_solver.update(self.model.acid_base(), &self.x);
        let ions = self.ph_solver.ions;
        self.x[S_HVA] = ions.s_va_ion;
        self.x[S_HBU] = ions.s_bu_ion;
        self.x[S_HPRO] = ions.s_pro_ion;
        self.x[S_HAC] = ions.s_ac_ion;
        self.x[S_HCO3] = ions.s_hco3_ion;
        self.x[S_NH3] = ions.s_nh3;
        report
    }

    /// Discrete H₂ update on the current state. Reads the ions of the last pH update.
    pub fn update_hydrogen(&mut self, u: &InfluentVector) -> NewtonReport {
        let ions = self.ph_solver.ions;
        let report = self.h2_solver.update(&self.model, &self.x, u, &ions);
        self.x[S_H2] = self.h2_solver.s_h2;
        report
    }

    /// pH first, then H₂.
    pub fn update_algebraic(&mut self, u: &InfluentVector) {
        self.update_ph();
        self.update_hydrogen(u);
    }

    /// One major step of length `dt` under the influent `u`.
    pub fn major_step<I: StepIntegrator>(&mut self, integrator: &mut I, dt: f64, u: &InfluentVector) {
        let algebraic = self.algebraic();
        let model = &self.model;
        let rhs = |t: f64, x: &StateVector| model.derivatives(t, x, u, &algebraic);
        let mut x = self.x;
        integrator.advance(&rhs, self.t, dt, &mut x);
        self.x = x;
        self.t += dt;
        self.pass_through(u);
        self.update_algebraic(u);
    }

    /// Runs `steps` major steps under a constant influent and returns the
    /// observation after each of them.
    pub fn simulate<I: StepIntegrator>(
        &mut self,
        integrator: &mut I,
        dt: f64,
        steps: usize,
        u: &InfluentVector,
    ) -> Vec<(f64, DigesterObservation)> {
        info!(
            "digester run: {} steps of {} d with {}",
            steps,
            dt,
            integrator.name()
        );
        let mut trajectory = Vec::with_capacity(steps);
        for _ in 0..steps {
            self.major_step(integrator, dt, u);
            trajectory.push((self.t, self.observation(u)));
        }
        let diagnostics = self.diagnostics();
        info!(
            "digester run finished at t = {} d, pH = {:.4}, non-converged updates: pH {}, H2 {}",
            self.t,
            self.ph_solver.ions.ph(),
            diagnostics.ph_non_converged,
            diagnostics.h2_non_converged
        );
        trajectory
    }

    pub fn observation(&self, u: &InfluentVector) -> DigesterObservation {
        self.model.observe(&self.x, u, &self.algebraic())
    }

    // flow, temperature and dummies are carried over from the influent
    fn pass_through(&mut self, u: &InfluentVector) {
        self.x[Q_D] = u[U_Q];
        self.x[T_D] = u[U_T];
        for k in 0..5 {
            self.x[S_D1_D + k] = u[U_DUMMY + k];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Digester::h2_solver::hydrogen_balance;
    use crate::Digester::integrator::{ExplicitEuler, RungeKutta4};
    use crate::Digester::ph_solver::{AcidBaseTotals, charge_balance};

    fn reactor_feed(x: &StateVector) -> InfluentVector {
        let mut u = InfluentVector::zeros();
        for i in 0..=S_AN {
            u[i] = x[i];
        }
        u[U_Q] = 178.4674;
        u[U_T] = 35.0;
        u
    }

    #[test]
    fn one_day_run_stays_finite_and_positive() {
        let mut digester = AnaerobicDigester::bsm2().unwrap();
        let u = reactor_feed(digester.state());
        let mut rk4 = RungeKutta4 { substeps: 20 };
        let trajectory = digester.simulate(&mut rk4, 1.0 / 96.0, 96, &u);
        assert_eq!(trajectory.len(), 96);
        assert!((digester.time() - 1.0).abs() < 1e-9);
        for value in digester.state().iter() {
            assert!(value.is_finite());
        }
        for value in digester.ions().to_array() {
            assert!(value > 0.0);
        }
        assert!(digester.s_h2() > 0.0);
        let ph = trajectory.last().unwrap().1.ph();
        assert!(ph > 6.5 && ph < 8.0);
        assert_eq!(digester.diagnostics().ph_non_converged, 0);
    }

    #[test]
    fn major_step_leaves_both_balances_closed() {
        let mut digester = AnaerobicDigester::bsm2().unwrap();
        let u = reactor_feed(digester.state());
        let mut euler = ExplicitEuler { substeps: 50 };
        digester.major_step(&mut euler, 0.01, &u);

        let x = *digester.state();
        let k = digester.model().acid_base();
        let f = charge_balance(k, &AcidBaseTotals::from_state(&x), digester.ions().s_h);
        assert!(f.abs() < 1e-8);
        let (g, _) = hydrogen_balance(digester.model(), &x, &u, digester.ions(), digester.s_h2());
        assert!(g.abs() < 1e-8);
    }

    #[test]
    fn algebraic_slots_mirror_the_solvers() {
        let mut digester = AnaerobicDigester::bsm2().unwrap();
        let u = reactor_feed(digester.state());
        digester.update_algebraic(&u);
        let x = digester.state();
        assert_eq!(x[S_H2], digester.s_h2());
        assert_eq!(x[S_HAC], digester.ions().s_ac_ion);
        assert_eq!(x[S_NH3], digester.ions().s_nh3);
    }

    #[test]
    fn influent_flow_and_temperature_pass_through() {
        let mut digester = AnaerobicDigester::bsm2().unwrap();
        let mut u = reactor_feed(digester.state());
        u[U_Q] = 150.0;
        u[U_DUMMY + 2] = 3.0;
        digester.major_step(&mut ExplicitEuler::default(), 1e-3, &u);
        assert_eq!(digester.state()[Q_D], 150.0);
        assert_eq!(digester.state()[S_D3_D], 3.0);
        assert_eq!(digester.observation(&u).values()[26], 150.0);
    }
}
