//! # ADM1 kinetics and stoichiometry
//!
//! ## Main Structures
//! - `InhibitionFactors`: individual inhibition terms and the six products used by the uptakes
//! - `process_rates`: the 19 biochemical rates ρ₁..ρ₁₉
//! - `TransferRates`: liquid to gas transfer of H₂, CH₄ and CO₂
//! - `StoichiometricMatrix`: 24 × 19 Petersen matrix built once from the parameters
//!
//! ## Process table
//!
//! | j | Process | Rate |
//! |---|---|---|
//! | 1 | disintegration | k_dis X_xc |
//! | 2-4 | hydrolysis of carbohydrates, proteins, lipids | k_hyd X |
//! | 5 | uptake of sugars | k_m S/(K_S+S) X I₀ |
//! | 6 | uptake of amino acids | k_m S/(K_S+S) X I₀ |
//! | 7 | uptake of LCFA | k_m S/(K_S+S) X I₁ |
//! | 8 | uptake of valerate | k_m S_va/(K_S+S_va) X_c4 S_va/(S_va+S_bu+ε) I₂ |
//! | 9 | uptake of butyrate | k_m S_bu/(K_S+S_bu) X_c4 S_bu/(S_va+S_bu+ε) I₂ |
//! | 10 | uptake of propionate | k_m S/(K_S+S) X I₃ |
//! | 11 | uptake of acetate | k_m S/(K_S+S) X I₄ |
//! | 12 | uptake of hydrogen | k_m S/(K_S+S) X I₅ |
//! | 13-19 | decay of the seven biomass groups | k_dec X |
//!
//! Net production of liquid component i is `reac_i = Σ_j ν_ij ρ_j` minus the gas transfer
//! rate for S_h2, S_ch4 and S_IC. The S_IC row carries `-stoich_j`, the carbon balance of
//! each process.

use super::indices::*;
use super::inhibition::{
    PhInhibitionModel, PhInhibitionSet, PhWindow, nitrogen_limitation, non_competitive,
};
use super::parameters::{DigesterParameters, StateVector};
use super::thermo::{GasPhaseConstants, HeadSpace};
use nalgebra::{SMatrix, SVector};

/// Regularisation of the valerate/butyrate competition term.
pub const C4_EPS: f64 = 1.0e-6;

pub type ProcessVector = SVector<f64, N_PROCESSES>;
pub type LiquidVector = SVector<f64, N_LIQUID>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InhibitionFactors {
    pub ph_aa: f64,
    pub ph_ac: f64,
    pub ph_h2: f64,
    pub in_lim: f64,
    pub h2_fa: f64,
    pub h2_c4: f64,
    pub h2_pro: f64,
    pub nh3: f64,
}

impl InhibitionFactors {
    pub fn evaluate(
        p: &DigesterParameters,
        shapes: &PhInhibitionSet,
        s_h: f64,
        s_in: f64,
        s_h2: f64,
        s_nh3: f64,
    ) -> Self {
        InhibitionFactors {
            ph_aa: shapes
                .acidogens
                .inhibition(s_h, PhWindow::new(p.ph_ul_aa, p.ph_ll_aa)),
            ph_ac: shapes
                .acetoclasts
                .inhibition(s_h, PhWindow::new(p.ph_ul_ac, p.ph_ll_ac)),
            ph_h2: shapes
                .hydrogenotrophs
                .inhibition(s_h, PhWindow::new(p.ph_ul_h2, p.ph_ll_h2)),
            in_lim: nitrogen_limitation(p.k_s_in, s_in),
            h2_fa: non_competitive(s_h2, p.k_ih2_fa),
            h2_c4: non_competitive(s_h2, p.k_ih2_c4),
            h2_pro: non_competitive(s_h2, p.k_ih2_pro),
            nh3: non_competitive(s_nh3, p.k_i_nh3),
        }
    }

    /// Combined factors I₀..I₅ of the uptake processes.
    pub fn products(&self) -> [f64; 6] {
        let base = self.ph_aa * self.in_lim;
        [
            base,
            base * self.h2_fa,
            base * self.h2_c4,
            base * self.h2_pro,
            self.ph_ac * self.in_lim * self.nh3,
            self.ph_h2 * self.in_lim,
        ]
    }
}

fn monod(s: f64, k_s: f64) -> f64 {
    s / (k_s + s)
}

/// Biochemical rates ρ₁..ρ₁₉ (kg COD/(m³·d)).
///
/// `x` supplies the liquid concentrations; the caller decides whether these are
/// clamped. `s_h2` replaces the slot 7 value of `x`.
pub fn process_rates(
    p: &DigesterParameters,
    x: &StateVector,
    s_h2: f64,
    inhib: &[f64; 6],
) -> ProcessVector {
    let c4_total = x[S_VA] + x[S_BU] + C4_EPS;
    let decay = p.decay_rates();
    let mut rho = ProcessVector::zeros();
    rho[0] = p.k_dis * x[X_XC];
    rho[1] = p.k_hyd_ch * x[X_CH];
    rho[2] = p.k_hyd_pr * x[X_PR];
    rho[3] = p.k_hyd_li * x[X_LI];
    rho[4] = p.k_m_su * monod(x[S_SU], p.k_s_su) * x[X_SU] * inhib[0];
    rho[5] = p.k_m_aa * monod(x[S_AA], p.k_s_aa) * x[X_AA] * inhib[0];
    rho[6] = p.k_m_fa * monod(x[S_FA], p.k_s_fa) * x[X_FA] * inhib[1];
    rho[7] = p.k_m_c4 * monod(x[S_VA], p.k_s_c4) * x[X_C4] * x[S_VA] / c4_total * inhib[2];
    rho[8] = p.k_m_c4 * monod(x[S_BU], p.k_s_c4) * x[X_C4] * x[S_BU] / c4_total * inhib[2];
    rho[9] = p.k_m_pro * monod(x[S_PRO], p.k_s_pro) * x[X_PRO] * inhib[3];
    rho[10] = p.k_m_ac * monod(x[S_AC], p.k_s_ac) * x[X_AC] * inhib[4];
    rho[11] = p.k_m_h2 * monod(s_h2, p.k_s_h2) * x[X_H2] * inhib[5];
    for (k, biomass) in (X_SU..=X_H2).enumerate() {
        rho[12 + k] = decay[k] * x[biomass];
    }
    rho
}

/// Liquid to gas transfer rates (kg COD/(m³·d) for H₂ and CH₄, kmol/(m³·d) for CO₂).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferRates {
    pub h2: f64,
    pub ch4: f64,
    pub co2: f64,
}

impl TransferRates {
    /// `s_co2` is the dissolved CO₂, i.e. S_IC minus bicarbonate.
    pub fn evaluate(
        k_la: f64,
        gas: &GasPhaseConstants,
        head: &HeadSpace,
        s_h2: f64,
        s_ch4: f64,
        s_co2: f64,
    ) -> Self {
        TransferRates {
            h2: hydrogen_transfer(k_la, gas, head.p_gas_h2, s_h2),
            ch4: k_la * (s_ch4 - 64.0 * gas.k_h_ch4 * head.p_gas_ch4),
            co2: k_la * (s_co2 - gas.k_h_co2 * head.p_gas_co2),
        }
    }
}

pub fn hydrogen_transfer(k_la: f64, gas: &GasPhaseConstants, p_gas_h2: f64, s_h2: f64) -> f64 {
    k_la * (s_h2 - 16.0 * gas.k_h_h2 * p_gas_h2)
}

/// Petersen matrix ν (liquid component × process).
#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometricMatrix {
    pub nu: SMatrix<f64, N_LIQUID, N_PROCESSES>,
}

impl StoichiometricMatrix {
    pub fn from_parameters(p: &DigesterParameters) -> Self {
        let mut nu = SMatrix::<f64, N_LIQUID, N_PROCESSES>::zeros();
        let carbon = carbon_balance(p);
        // disintegration
        nu[(S_IN, 0)] = p.n_xc - p.f_xi_xc * p.n_i - p.f_si_xc * p.n_i - p.f_pr_xc * p.n_aa;
        nu[(S_I, 0)] = p.f_si_xc;
        nu[(X_XC, 0)] = -1.0;
        nu[(X_CH, 0)] = p.f_ch_xc;
        nu[(X_PR, 0)] = p.f_pr_xc;
        nu[(X_LI, 0)] = p.f_li_xc;
        nu[(X_I, 0)] = p.f_xi_xc;
        // hydrolysis
        nu[(S_SU, 1)] = 1.0;
        nu[(X_CH, 1)] = -1.0;
        nu[(S_AA, 2)] = 1.0;
        nu[(X_PR, 2)] = -1.0;
        nu[(S_SU, 3)] = 1.0 - p.f_fa_li;
        nu[(S_FA, 3)] = p.f_fa_li;
        nu[(X_LI, 3)] = -1.0;
        // sugars
        let y = p.y_su;
        nu[(S_SU, 4)] = -1.0;
        nu[(S_BU, 4)] = (1.0 - y) * p.f_bu_su;
        nu[(S_PRO, 4)] = (1.0 - y) * p.f_pro_su;
        nu[(S_AC, 4)] = (1.0 - y) * p.f_ac_su;
        nu[(S_H2, 4)] = (1.0 - y) * p.f_h2_su;
        nu[(S_IN, 4)] = -y * p.n_bac;
        nu[(X_SU, 4)] = y;
        // amino acids
        let y = p.y_aa;
        nu[(S_AA, 5)] = -1.0;
        nu[(S_VA, 5)] = (1.0 - y) * p.f_va_aa;
        nu[(S_BU, 5)] = (1.0 - y) * p.f_bu_aa;
        nu[(S_PRO, 5)] = (1.0 - y) * p.f_pro_aa;
        nu[(S_AC, 5)] = (1.0 - y) * p.f_ac_aa;
        nu[(S_H2, 5)] = (1.0 - y) * p.f_h2_aa;
        nu[(S_IN, 5)] = p.n_aa - y * p.n_bac;
        nu[(X_AA, 5)] = y;
        // LCFA
        let y = p.y_fa;
        nu[(S_FA, 6)] = -1.0;
        nu[(S_AC, 6)] = (1.0 - y) * 0.7;
        nu[(S_H2, 6)] = (1.0 - y) * 0.3;
        nu[(S_IN, 6)] = -y * p.n_bac;
        nu[(X_FA, 6)] = y;
        // valerate
        let y = p.y_c4;
        nu[(S_VA, 7)] = -1.0;
        nu[(S_PRO, 7)] = (1.0 - y) * 0.54;
        nu[(S_AC, 7)] = (1.0 - y) * 0.31;
        nu[(S_H2, 7)] = (1.0 - y) * 0.15;
        nu[(S_IN, 7)] = -y * p.n_bac;
        nu[(X_C4, 7)] = y;
        // butyrate
        nu[(S_BU, 8)] = -1.0;
        nu[(S_AC, 8)] = (1.0 - y) * 0.8;
        nu[(S_H2, 8)] = (1.0 - y) * 0.2;
        nu[(S_IN, 8)] = -y * p.n_bac;
        nu[(X_C4, 8)] = y;
        // propionate
        let y = p.y_pro;
        nu[(S_PRO, 9)] = -1.0;
        nu[(S_AC, 9)] = (1.0 - y) * 0.57;
        nu[(S_H2, 9)] = (1.0 - y) * 0.43;
        nu[(S_IN, 9)] = -y * p.n_bac;
        nu[(X_PRO, 9)] = y;
        // acetate
        let y = p.y_ac;
        nu[(S_AC, 10)] = -1.0;
        nu[(S_CH4, 10)] = 1.0 - y;
        nu[(S_IN, 10)] = -y * p.n_bac;
        nu[(X_AC, 10)] = y;
        // hydrogen
        let y = p.y_h2;
        nu[(S_H2, 11)] = -1.0;
        nu[(S_CH4, 11)] = 1.0 - y;
        nu[(S_IN, 11)] = -y * p.n_bac;
        nu[(X_H2, 11)] = y;
        // decay
        for (k, biomass) in (X_SU..=X_H2).enumerate() {
            let j = 12 + k;
            nu[(biomass, j)] = -1.0;
            nu[(X_XC, j)] = 1.0;
            nu[(S_IN, j)] = p.n_bac - p.n_xc;
        }
        for j in 0..N_PROCESSES {
            nu[(S_IC, j)] = -carbon[j];
        }
        StoichiometricMatrix { nu }
    }

    /// Net production rates `ν ρ` minus gas transfer.
    pub fn net_production(&self, rho: &ProcessVector, transfer: &TransferRates) -> LiquidVector {
        let mut reac = self.nu * rho;
        reac[S_H2] -= transfer.h2;
        reac[S_CH4] -= transfer.ch4;
        reac[S_IC] -= transfer.co2;
        reac
    }

    /// Net biochemical production of one component, without gas transfer.
    pub fn component_production(&self, component: usize, rho: &ProcessVector) -> f64 {
        self.nu.row(component).transpose().dot(rho)
    }
}

/// Carbon released (negative) or bound (positive) per unit of each process, kmol C/kg COD.
pub fn carbon_balance(p: &DigesterParameters) -> [f64; N_PROCESSES] {
    let stoich1 = -p.c_xc
        + p.f_si_xc * p.c_si
        + p.f_ch_xc * p.c_ch
        + p.f_pr_xc * p.c_pr
        + p.f_li_xc * p.c_li
        + p.f_xi_xc * p.c_xi;
    let stoich2 = -p.c_ch + p.c_su;
    let stoich3 = -p.c_pr + p.c_aa;
    let stoich4 = -p.c_li + (1.0 - p.f_fa_li) * p.c_su + p.f_fa_li * p.c_fa;
    let stoich5 = -p.c_su
        + (1.0 - p.y_su) * (p.f_bu_su * p.c_bu + p.f_pro_su * p.c_pro + p.f_ac_su * p.c_ac)
        + p.y_su * p.c_bac;
    let stoich6 = -p.c_aa
        + (1.0 - p.y_aa)
            * (p.f_va_aa * p.c_va + p.f_bu_aa * p.c_bu + p.f_pro_aa * p.c_pro + p.f_ac_aa * p.c_ac)
        + p.y_aa * p.c_bac;
    let stoich7 = -p.c_fa + (1.0 - p.y_fa) * 0.7 * p.c_ac + p.y_fa * p.c_bac;
    let stoich8 = -p.c_va
        + (1.0 - p.y_c4) * 0.54 * p.c_pro
        + (1.0 - p.y_c4) * 0.31 * p.c_ac
        + p.y_c4 * p.c_bac;
    let stoich9 = -p.c_bu + (1.0 - p.y_c4) * 0.8 * p.c_ac + p.y_c4 * p.c_bac;
    let stoich10 = -p.c_pro + (1.0 - p.y_pro) * 0.57 * p.c_ac + p.y_pro * p.c_bac;
    let stoich11 = -p.c_ac + (1.0 - p.y_ac) * p.c_ch4 + p.y_ac * p.c_bac;
    let stoich12 = (1.0 - p.y_h2) * p.c_ch4 + p.y_h2 * p.c_bac;
    let stoich13 = -p.c_bac + p.c_xc;
    [
        stoich1, stoich2, stoich3, stoich4, stoich5, stoich6, stoich7, stoich8, stoich9, stoich10,
        stoich11, stoich12, stoich13, stoich13, stoich13, stoich13, stoich13, stoich13, stoich13,
    ]
}
