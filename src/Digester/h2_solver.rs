//! # Dissolved hydrogen solver
//!
//! Dissolved H₂ reacts orders of magnitude faster than the other digester
//! states, so it is taken at its quasi steady state:
//!
//! ```text
//! g(S_h2) = Q/V_liq (S_h2,in - S_h2) + Σ_j ν_h2,j ρ_j(S_h2) - ρT_8(S_h2) = 0
//! ```
//!
//! H₂ is produced by sugar and amino acid fermentation and by the acetogenic uptakes of
//! LCFA, valerate, butyrate and propionate (the last four inhibited by H₂ itself). It is
//! consumed by the hydrogenotrophs and stripped to the head space.
//!
//! ## Ordering
//!
//! The pH inhibition terms are evaluated with the S_H that the pH solver produced
//! in the same major step. The pH update must therefore run first; the reverse order
//! feeds a one-step-old S_H into the balance.
//!
//! Inputs are read unclamped from the digester state.

use super::adm1_model::Adm1Model;
use super::indices::*;
use super::kinetics::{InhibitionFactors, hydrogen_transfer, process_rates};
use super::newton::{NewtonReport, NewtonSettings, newton_1d};
use super::parameters::{InfluentVector, StateVector};
use super::ph_solver::IonState;
use log::debug;

/// Hydrogen balance `g` and its exact derivative at `s_h2`.
pub fn hydrogen_balance(
    model: &Adm1Model,
    x: &StateVector,
    u: &InfluentVector,
    ions: &IonState,
    s_h2: f64,
) -> (f64, f64) {
    let p = model.params();
    let nu = &model.stoichiometry().nu;
    let dilution = u[U_Q] / model.volumes().v_liq;
    let factors = InhibitionFactors::evaluate(
        p,
        model.ph_inhibition(),
        ions.s_h,
        x[S_IN],
        s_h2,
        ions.s_nh3,
    );
    let inhib = factors.products();
    let rho = process_rates(p, x, s_h2, &inhib);
    let p_gas_h2 = model.head_space(x).p_gas_h2;

    let production = model.stoichiometry().component_production(S_H2, &rho);
    let transfer = hydrogen_transfer(p.k_la, model.gas(), p_gas_h2, s_h2);
    let g = dilution * (u[S_H2] - s_h2) + production - transfer;

    // ρ_j = ρ_j,0 / (1 + S_h2/K_I)  =>  dρ_j/dS_h2 = -ρ_j / (K_I + S_h2)
    let acetogens = nu[(S_H2, 6)] * rho[6] / (p.k_ih2_fa + s_h2)
        + nu[(S_H2, 7)] * rho[7] / (p.k_ih2_c4 + s_h2)
        + nu[(S_H2, 8)] * rho[8] / (p.k_ih2_c4 + s_h2)
        + nu[(S_H2, 9)] * rho[9] / (p.k_ih2_pro + s_h2);
    let k_s = p.k_s_h2;
    let uptake = p.k_m_h2 * x[X_H2] * inhib[5] * k_s / ((k_s + s_h2) * (k_s + s_h2));
    let slope = -dilution - acetogens + nu[(S_H2, 11)] * uptake - p.k_la;
    (g, slope)
}

/// Owner of the dissolved hydrogen state.
#[derive(Debug, Clone)]
pub struct HydrogenSolver {
    pub s_h2: f64,
    pub settings: NewtonSettings,
    pub last_report: NewtonReport,
    pub non_converged: usize,
}

impl HydrogenSolver {
    pub fn new(s_h2: f64) -> Self {
        HydrogenSolver {
            s_h2,
            settings: NewtonSettings::default(),
            last_report: NewtonReport::default(),
            non_converged: 0,
        }
    }

    pub fn set_settings(&mut self, settings: NewtonSettings) {
        self.settings = settings;
    }

    /// Solves the hydrogen balance seeded with the previous value. `ions` must be the
    /// pH solver output of the current step.
    pub fn update(
        &mut self,
        model: &Adm1Model,
        x: &StateVector,
        u: &InfluentVector,
        ions: &IonState,
    ) -> NewtonReport {
        let mut s_h2 = self.s_h2;
        let report = newton_1d(&mut s_h2, &self.settings, |s| {
            hydrogen_balance(model, x, u, ions, s)
        });
        self.s_h2 = s_h2;
        self.last_report = report;
        if !report.converged {
            self.non_converged += 1;
            debug!(
                "H2 solver stopped after {} iterations, residual {:e} (total {} non-converged updates)",
                report.iterations, report.residual, self.non_converged
            );
        }
        report
    }
}
