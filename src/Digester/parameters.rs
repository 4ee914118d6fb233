//! # Digester parameter blocks
//!
//! ## Main Structures
//! - `DigesterParameters`: the 100 stoichiometric, kinetic, thermodynamic and gas-phase
//!   constants of ADM1, in the fixed benchmark order
//! - `ReactorVolumes`: liquid and head-space volumes `[V_liq, V_gas]`
//! - `InitialState`: start values of the 42 continuous states plus the free proton
//!   concentration used to seed the pH solver
//!
//! All defaults correspond to the BSM2 digester operated at 35 °C.
//! Units: concentrations in kg COD/m³ or kmol/m³, rates in 1/d, pressures in bar,
//! temperatures in K, volumes in m³.

use super::errors::DigesterError;
use super::indices::*;
use crate::Utils::parameter_block::parameter_block;
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

pub type StateVector = SVector<f64, N_STATES>;
pub type InfluentVector = SVector<f64, N_INFLUENT>;

parameter_block! {
    /// ADM1 parameter block in the fixed 100-value order.
    pub struct DigesterParameters ("digester parameters", DigesterError) {
        f_si_xc = 0.1,
        f_xi_xc = 0.2,
        f_ch_xc = 0.2,
        f_pr_xc = 0.2,
        f_li_xc = 0.3,
        /// kmol N/kg COD
        n_xc = 0.0376 / 14.0,
        n_i = 0.06 / 14.0,
        n_aa = 0.007,
        /// carbon contents, kmol C/kg COD
        c_xc = 0.02786,
        c_si = 0.03,
        c_ch = 0.0313,
        c_pr = 0.03,
        c_li = 0.022,
        c_xi = 0.03,
        c_su = 0.0313,
        c_aa = 0.03,
        f_fa_li = 0.95,
        c_fa = 0.0217,
        f_h2_su = 0.19,
        f_bu_su = 0.13,
        f_pro_su = 0.27,
        f_ac_su = 0.41,
        n_bac = 0.08 / 14.0,
        c_bu = 0.025,
        c_pro = 0.0268,
        c_ac = 0.0313,
        c_bac = 0.0313,
        y_su = 0.1,
        f_h2_aa = 0.06,
        f_va_aa = 0.23,
        f_bu_aa = 0.26,
        f_pro_aa = 0.05,
        f_ac_aa = 0.40,
        c_va = 0.024,
        y_aa = 0.08,
        y_fa = 0.06,
        y_c4 = 0.06,
        y_pro = 0.04,
        c_ch4 = 0.0156,
        y_ac = 0.05,
        y_h2 = 0.06,
        k_dis = 0.5,
        k_hyd_ch = 10.0,
        k_hyd_pr = 10.0,
        k_hyd_li = 10.0,
        k_s_in = 1.0e-4,
        k_m_su = 30.0,
        k_s_su = 0.5,
        ph_ul_aa = 5.5,
        ph_ll_aa = 4.0,
        k_m_aa = 50.0,
        k_s_aa = 0.3,
        k_m_fa = 6.0,
        k_s_fa = 0.4,
        k_ih2_fa = 5.0e-6,
        k_m_c4 = 20.0,
        k_s_c4 = 0.2,
        k_ih2_c4 = 1.0e-5,
        k_m_pro = 13.0,
        k_s_pro = 0.1,
        k_ih2_pro = 3.5e-6,
        k_m_ac = 8.0,
        k_s_ac = 0.15,
        k_i_nh3 = 0.0018,
        ph_ul_ac = 7.0,
        ph_ll_ac = 6.0,
        k_m_h2 = 35.0,
        k_s_h2 = 7.0e-6,
        ph_ul_h2 = 6.0,
        ph_ll_h2 = 5.0,
        k_dec_xsu = 0.02,
        k_dec_xaa = 0.02,
        k_dec_xfa = 0.02,
        k_dec_xc4 = 0.02,
        k_dec_xpro = 0.02,
        k_dec_xac = 0.02,
        k_dec_xh2 = 0.02,
        /// bar·m³/(kmol·K)
        r = 0.083145,
        t_base = 298.15,
        t_op = 308.15,
        pk_w_base = 14.0,
        pk_a_va_base = 4.86,
        pk_a_bu_base = 4.82,
        pk_a_pro_base = 4.88,
        pk_a_ac_base = 4.76,
        pk_a_co2_base = 6.35,
        pk_a_in_base = 9.25,
        /// acid-base rate constants; inert once the ions are solved algebraically
        k_a_bva = 1.0e10,
        k_a_bbu = 1.0e10,
        k_a_bpro = 1.0e10,
        k_a_bac = 1.0e10,
        k_a_bco2 = 1.0e10,
        k_a_bin = 1.0e10,
        p_atm = 1.013,
        k_la = 200.0,
        k_h_h2o_base = 0.0313,
        k_h_co2_base = 0.035,
        k_h_ch4_base = 0.0014,
        k_h_h2_base = 7.8e-4,
        k_p = 5.0e4,
    }
}

impl DigesterParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_operating_temperature(&mut self, t_op: f64) {
        self.t_op = t_op;
    }

    /// Decay constants in biomass order X_su .. X_h2.
    pub fn decay_rates(&self) -> [f64; 7] {
        [
            self.k_dec_xsu,
            self.k_dec_xaa,
            self.k_dec_xfa,
            self.k_dec_xc4,
            self.k_dec_xpro,
            self.k_dec_xac,
            self.k_dec_xh2,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorVolumes {
    pub v_liq: f64,
    pub v_gas: f64,
}

impl Default for ReactorVolumes {
    fn default() -> Self {
        ReactorVolumes {
            v_liq: 3400.0,
            v_gas: 300.0,
        }
    }
}

impl ReactorVolumes {
    pub fn new(v_liq: f64, v_gas: f64) -> Result<Self, DigesterError> {
        if !(v_liq > 0.0) {
            return Err(DigesterError::InvalidVolume {
                name: "V_liq",
                value: v_liq,
            });
        }
        if !(v_gas > 0.0) {
            return Err(DigesterError::InvalidVolume {
                name: "V_gas",
                value: v_gas,
            });
        }
        Ok(ReactorVolumes { v_liq, v_gas })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, DigesterError> {
        super::errors::check_size("reactor volumes", 2, values.len())?;
        Self::new(values[0], values[1])
    }
}

/// Start values for a digester run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    pub states: Vec<f64>,
    /// free proton concentration, kmol/m³
    pub s_h_ion: f64,
}

impl Default for InitialState {
    fn default() -> Self {
        Self::bsm2()
    }
}

impl InitialState {
    /// Steady state of the BSM2 digester under its reference influent.
    pub fn bsm2() -> Self {
        let mut x = vec![0.0; N_STATES];
        x[S_SU] = 0.0124;
        x[S_AA] = 0.0055;
        x[S_FA] = 0.1074;
        x[S_VA] = 0.0123;
        x[S_BU] = 0.0140;
        x[S_PRO] = 0.0176;
        x[S_AC] = 0.0893;
        x[S_H2] = 2.5055e-7;
        x[S_CH4] = 0.0555;
        x[S_IC] = 0.0951;
        x[S_IN] = 0.0945;
        x[S_I] = 0.1309;
        x[X_XC] = 0.1079;
        x[X_CH] = 0.0205;
        x[X_PR] = 0.0842;
        x[X_LI] = 0.0436;
        x[X_SU] = 0.3122;
        x[X_AA] = 0.9317;
        x[X_FA] = 0.3384;
        x[X_C4] = 0.3258;
        x[X_PRO] = 0.1011;
        x[X_AC] = 0.6772;
        x[X_H2] = 0.2848;
        x[X_I] = 17.2162;
        x[S_CAT] = 3.5659e-43;
        x[S_AN] = 0.0052;
        x[S_HVA] = 0.0123;
        x[S_HBU] = 0.0140;
        x[S_HPRO] = 0.0175;
        x[S_HAC] = 0.0890;
        x[S_HCO3] = 0.0857;
        x[S_NH3] = 0.0019;
        x[S_GAS_H2] = 1.1032e-5;
        x[S_GAS_CH4] = 1.6535;
        x[S_GAS_CO2] = 0.0135;
        x[Q_D] = 178.4674;
        x[T_D] = 35.0;
        InitialState {
            states: x,
            s_h_ion: 5.4562e-8,
        }
    }

    pub fn state_vector(&self) -> Result<StateVector, DigesterError> {
        super::errors::check_size("initial state", N_STATES, self.states.len())?;
        Ok(StateVector::from_column_slice(&self.states))
    }
}

/// Influent vector from a slice of 33 values.
pub fn influent_from_slice(values: &[f64]) -> Result<InfluentVector, DigesterError> {
    super::errors::check_size("digester influent", N_INFLUENT, values.len())?;
    Ok(InfluentVector::from_column_slice(values))
}
