//! # pH solver
//!
//! Algebraic replacement of the stiff acid-base states of ADM1.
//!
//! ## Mathematical Model
//!
//! Given the totals of the four VFAs, inorganic carbon and inorganic nitrogen, each
//! conjugate base follows from the free proton concentration S_H:
//!
//! ```text
//! S_i- = K_a,i S_i / (K_a,i + S_H)      i = va, bu, pro, ac, co2 (-> HCO3-), IN (-> NH3)
//! ```
//!
//! S_H is the root of the charge balance
//!
//! ```text
//! f(S_H) = S_cat + (S_IN - S_NH3) + S_H - S_HCO3 - S_ac/64 - S_pro/112 - S_bu/160 - S_va/208
//!          - K_w/S_H - S_an
//! ```
//!
//! with the analytical slope
//!
//! ```text
//! f'(S_H) = 1 + K_IN S_IN/(K_IN+S_H)^2 + K_co2 S_IC/(K_co2+S_H)^2 + (1/64) K_ac S_ac/(K_ac+S_H)^2
//!           + (1/112) ... + (1/160) ... + (1/208) ... + K_w/S_H^2
//! ```
//!
//! The VFA divisors convert kg COD to kmol.
//!
//! ## Main Structures
//! - `IonState`: the seven algebraic values `[S_H, S_va-, S_bu-, S_pro-, S_ac-, S_HCO3-, S_NH3]`
//! - `AcidBaseTotals`: the inputs read from the digester state
//! - `PhSolver`: owns the `IonState` and updates it once per major step

use super::indices::*;
use super::newton::{NewtonReport, NewtonSettings, newton_1d};
use super::parameters::StateVector;
use super::thermo::AcidBaseConstants;
use log::debug;

pub const COD_PER_MOL_AC: f64 = 64.0;
pub const COD_PER_MOL_PRO: f64 = 112.0;
pub const COD_PER_MOL_BU: f64 = 160.0;
pub const COD_PER_MOL_VA: f64 = 208.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonState {
    pub s_h: f64,
    pub s_va_ion: f64,
    pub s_bu_ion: f64,
    pub s_pro_ion: f64,
    pub s_ac_ion: f64,
    pub s_hco3_ion: f64,
    pub s_nh3: f64,
}

impl IonState {
    /// Ion values taken from the ion slots of a full digester state.
    pub fn from_state(s_h: f64, x: &StateVector) -> Self {
        IonState {
            s_h,
            s_va_ion: x[S_HVA],
            s_bu_ion: x[S_HBU],
            s_pro_ion: x[S_HPRO],
            s_ac_ion: x[S_HAC],
            s_hco3_ion: x[S_HCO3],
            s_nh3: x[S_NH3],
        }
    }

    pub fn ph(&self) -> f64 {
        -self.s_h.log10()
    }

    pub fn to_array(&self) -> [f64; 7] {
        [
            self.s_h,
            self.s_va_ion,
            self.s_bu_ion,
            self.s_pro_ion,
            self.s_ac_ion,
            self.s_hco3_ion,
            self.s_nh3,
        ]
    }
}

/// Totals entering the charge balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcidBaseTotals {
    pub s_va: f64,
    pub s_bu: f64,
    pub s_pro: f64,
    pub s_ac: f64,
    pub s_ic: f64,
    pub s_in: f64,
    pub s_cat: f64,
    pub s_an: f64,
}

impl AcidBaseTotals {
    /// Raw (unclamped) values of the digester state snapshot.
    pub fn from_state(x: &StateVector) -> Self {
        AcidBaseTotals {
            s_va: x[S_VA],
            s_bu: x[S_BU],
            s_pro: x[S_PRO],
            s_ac: x[S_AC],
            s_ic: x[S_IC],
            s_in: x[S_IN],
            s_cat: x[S_CAT],
            s_an: x[S_AN],
        }
    }
}

fn dissociated(k_a: f64, total: f64, s_h: f64) -> f64 {
    k_a * total / (k_a + s_h)
}

fn dissociated_slope(k_a: f64, total: f64, s_h: f64) -> f64 {
    k_a * total / ((k_a + s_h) * (k_a + s_h))
}

/// Conjugate bases at a given S_H.
pub fn speciate(k: &AcidBaseConstants, totals: &AcidBaseTotals, s_h: f64) -> IonState {
    IonState {
        s_h,
        s_va_ion: dissociated(k.k_a_va, totals.s_va, s_h),
        s_bu_ion: dissociated(k.k_a_bu, totals.s_bu, s_h),
        s_pro_ion: dissociated(k.k_a_pro, totals.s_pro, s_h),
        s_ac_ion: dissociated(k.k_a_ac, totals.s_ac, s_h),
        s_hco3_ion: dissociated(k.k_a_co2, totals.s_ic, s_h),
        s_nh3: dissociated(k.k_a_in, totals.s_in, s_h),
    }
}

/// Charge balance residual at S_H.
pub fn charge_balance(k: &AcidBaseConstants, totals: &AcidBaseTotals, s_h: f64) -> f64 {
    let ions = speciate(k, totals, s_h);
    totals.s_cat + (totals.s_in - ions.s_nh3) + s_h
        - ions.s_hco3_ion
        - ions.s_ac_ion / COD_PER_MOL_AC
        - ions.s_pro_ion / COD_PER_MOL_PRO
        - ions.s_bu_ion / COD_PER_MOL_BU
        - ions.s_va_ion / COD_PER_MOL_VA
        - k.k_w / s_h
        - totals.s_an
}

/// Exact derivative of [`charge_balance`] with respect to S_H.
pub fn charge_balance_slope(k: &AcidBaseConstants, totals: &AcidBaseTotals, s_h: f64) -> f64 {
    1.0 + dissociated_slope(k.k_a_in, totals.s_in, s_h)
        + dissociated_slope(k.k_a_co2, totals.s_ic, s_h)
        + dissociated_slope(k.k_a_ac, totals.s_ac, s_h) / COD_PER_MOL_AC
        + dissociated_slope(k.k_a_pro, totals.s_pro, s_h) / COD_PER_MOL_PRO
        + dissociated_slope(k.k_a_bu, totals.s_bu, s_h) / COD_PER_MOL_BU
        + dissociated_slope(k.k_a_va, totals.s_va, s_h) / COD_PER_MOL_VA
        + k.k_w / (s_h * s_h)
}

/// Owner of the pH algebraic state.
#[derive(Debug, Clone)]
pub struct PhSolver {
    pub ions: IonState,
    pub settings: NewtonSettings,
    pub last_report: NewtonReport,
    /// number of updates that ended on the iteration cap
    pub non_converged: usize,
}

impl PhSolver {
    pub fn new(initial: IonState) -> Self {
        PhSolver {
            ions: initial,
            settings: NewtonSettings::default(),
            last_report: NewtonReport::default(),
            non_converged: 0,
        }
    }

    pub fn set_settings(&mut self, settings: NewtonSettings) {
        self.settings = settings;
    }

    /// Re-solves the charge balance for the given digester state, seeded with the
    /// previous S_H. The species reported are those of the last evaluated iterate.
    pub fn update(&mut self, k: &AcidBaseConstants, x: &StateVector) -> NewtonReport {
        let totals = AcidBaseTotals::from_state(x);
        let mut s_h = self.ions.s_h;
        let report = newton_1d(&mut s_h, &self.settings, |s| {
            (
                charge_balance(k, &totals, s),
                charge_balance_slope(k, &totals, s),
            )
        });
        let mut ions = speciate(k, &totals, report.evaluated_at);
        ions.s_h = s_h;
        self.ions = ions;
        self.last_report = report;
        if !report.converged {
            self.non_converged += 1;
            debug!(
                "pH solver stopped after {} iterations, residual {:e} (total {} non-converged updates)",
                report.iterations, report.residual, self.non_converged
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Digester::parameters::{DigesterParameters, InitialState};
    use approx::assert_relative_eq;

    fn at_base_temperature() -> AcidBaseConstants {
        let mut p = DigesterParameters::default();
        p.t_op = p.t_base;
        AcidBaseConstants::from_parameters(&p)
    }

    fn bsm2_solver() -> (PhSolver, StateVector, AcidBaseConstants) {
        let init = InitialState::bsm2();
        let x = init.state_vector().unwrap();
        let k = AcidBaseConstants::from_parameters(&DigesterParameters::default());
        (PhSolver::new(IonState::from_state(init.s_h_ion, &x)), x, k)
    }

    #[test]
    fn pure_water_is_neutral_at_25_degrees() {
        let k = at_base_temperature();
        let mut x = StateVector::zeros();
        x[S_CAT] = 0.01;
        x[S_AN] = 0.01;
        let mut solver = PhSolver::new(IonState::from_state(1e-4, &x));
        let report = solver.update(&k, &x);
        assert!(report.converged);
        assert_relative_eq!(solver.ions.s_h, k.k_w.sqrt(), max_relative = 1e-9);
        assert_relative_eq!(solver.ions.ph(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn acetic_acid_drives_ph_below_four() {
        let k = at_base_temperature();
        let mut x = StateVector::zeros();
        x[S_AC] = 0.1;
        let mut solver = PhSolver::new(IonState::from_state(1e-7, &x));
        solver.update(&k, &x);
        assert!(solver.ions.ph() < 4.0);
        for value in solver.ions.to_array() {
            assert!(value >= 0.0);
        }
        assert!(solver.ions.s_ac_ion > 0.0);
    }

    #[test]
    fn bsm2_state_satisfies_charge_balance() {
        let (mut solver, x, k) = bsm2_solver();
        let report = solver.update(&k, &x);
        assert!(report.converged);
        let totals = AcidBaseTotals::from_state(&x);
        assert!(charge_balance(&k, &totals, solver.ions.s_h).abs() < 1e-8);
        // benchmark steady-state pH
        assert_relative_eq!(solver.ions.ph(), 7.26, epsilon = 0.02);
        for value in solver.ions.to_array() {
            assert!(value > 0.0);
        }
    }

    #[test]
    fn repeated_update_is_idempotent() {
        let (mut solver, x, k) = bsm2_solver();
        solver.update(&k, &x);
        let first = solver.ions;
        solver.update(&k, &x);
        let second = solver.ions;
        for (a, b) in first.to_array().iter().zip(second.to_array().iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-9);
        }
    }

    #[test]
    fn slope_matches_finite_difference() {
        let (_, x, k) = bsm2_solver();
        let totals = AcidBaseTotals::from_state(&x);
        let s_h = 6.0e-8;
        let h = 1e-14;
        let numeric =
            (charge_balance(&k, &totals, s_h + h) - charge_balance(&k, &totals, s_h - h)) / (2.0 * h);
        assert_relative_eq!(
            charge_balance_slope(&k, &totals, s_h),
            numeric,
            max_relative = 1e-5
        );
    }

    #[test]
    fn recovers_from_non_positive_seed() {
        let (_, x, k) = bsm2_solver();
        let mut solver = PhSolver::new(IonState::from_state(-1.0, &x));
        let report = solver.update(&k, &x);
        assert!(report.converged);
        assert!(solver.ions.s_h > 0.0);
        assert_eq!(solver.non_converged, 0);
    }

    #[test]
    fn iteration_cap_is_not_fatal() {
        let (mut solver, x, k) = bsm2_solver();
        solver.ions.s_h = 1e-2;
        solver.set_settings(NewtonSettings {
            max_iterations: 1,
            ..NewtonSettings::default()
        });
        let report = solver.update(&k, &x);
        assert!(!report.converged);
        assert_eq!(solver.non_converged, 1);
        assert!(solver.ions.s_h > 0.0);
    }
}
