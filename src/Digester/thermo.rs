//! # Temperature-corrected equilibrium constants
//!
//! ## Mathematical Model
//!
//! All corrections use the van 't Hoff form with a common factor
//!
//! ```text
//! factor = (1/T_base - 1/T_op) / (100 R)
//! K(T_op) = K(T_base) * exp(dH * factor)
//! ```
//!
//! | Constant | dH (used with factor) |
//! |---|---|
//! | K_w | 55900 |
//! | K_a_co2 | 7646 |
//! | K_a_IN | 51965 |
//! | K_H_h2 | -4180 |
//! | K_H_ch4 | -14240 |
//! | K_H_co2 | -19410 |
//!
//! The VFA dissociation constants are temperature independent. The water vapour
//! pressure uses `exp(5290 (1/T_base - 1/T_op))` without the `100 R` scaling.

use super::parameters::DigesterParameters;

pub const DH_KW: f64 = 55900.0;
pub const DH_KA_CO2: f64 = 7646.0;
pub const DH_KA_IN: f64 = 51965.0;
pub const DH_KH_H2: f64 = -4180.0;
pub const DH_KH_CH4: f64 = -14240.0;
pub const DH_KH_CO2: f64 = -19410.0;
pub const DH_VAPOUR: f64 = 5290.0;

pub fn van_t_hoff_factor(t_base: f64, t_op: f64, r: f64) -> f64 {
    (1.0 / t_base - 1.0 / t_op) / (100.0 * r)
}

/// Water ion product and acid dissociation constants at the operating temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcidBaseConstants {
    pub k_w: f64,
    pub k_a_va: f64,
    pub k_a_bu: f64,
    pub k_a_pro: f64,
    pub k_a_ac: f64,
    pub k_a_co2: f64,
    pub k_a_in: f64,
}

impl AcidBaseConstants {
    pub fn from_parameters(p: &DigesterParameters) -> Self {
        let factor = van_t_hoff_factor(p.t_base, p.t_op, p.r);
        AcidBaseConstants {
            k_w: 10f64.powf(-p.pk_w_base) * (DH_KW * factor).exp(),
            k_a_va: 10f64.powf(-p.pk_a_va_base),
            k_a_bu: 10f64.powf(-p.pk_a_bu_base),
            k_a_pro: 10f64.powf(-p.pk_a_pro_base),
            k_a_ac: 10f64.powf(-p.pk_a_ac_base),
            k_a_co2: 10f64.powf(-p.pk_a_co2_base) * (DH_KA_CO2 * factor).exp(),
            k_a_in: 10f64.powf(-p.pk_a_in_base) * (DH_KA_IN * factor).exp(),
        }
    }
}

/// Henry constants (kmol/(m³·bar)) and saturated water vapour pressure (bar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasPhaseConstants {
    pub k_h_h2: f64,
    pub k_h_ch4: f64,
    pub k_h_co2: f64,
    pub p_gas_h2o: f64,
}

impl GasPhaseConstants {
    pub fn from_parameters(p: &DigesterParameters) -> Self {
        let factor = van_t_hoff_factor(p.t_base, p.t_op, p.r);
        GasPhaseConstants {
            k_h_h2: p.k_h_h2_base * (DH_KH_H2 * factor).exp(),
            k_h_ch4: p.k_h_ch4_base * (DH_KH_CH4 * factor).exp(),
            k_h_co2: p.k_h_co2_base * (DH_KH_CO2 * factor).exp(),
            p_gas_h2o: p.k_h_h2o_base * (DH_VAPOUR * (1.0 / p.t_base - 1.0 / p.t_op)).exp(),
        }
    }
}

/// Head-space partial pressures (bar) and the resulting overhead gas flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadSpace {
    pub p_gas_h2: f64,
    pub p_gas_ch4: f64,
    pub p_gas_co2: f64,
    pub p_gas: f64,
    /// m³/d at head-space pressure
    pub q_gas: f64,
}

impl HeadSpace {
    /// Gas-phase concentrations are S_gas_h2 and S_gas_ch4 in kg COD/m³ and
    /// S_gas_co2 in kmol/m³.
    pub fn new(
        p: &DigesterParameters,
        gas: &GasPhaseConstants,
        s_gas_h2: f64,
        s_gas_ch4: f64,
        s_gas_co2: f64,
    ) -> Self {
        let rt = p.r * p.t_op;
        let p_gas_h2 = s_gas_h2 * rt / 16.0;
        let p_gas_ch4 = s_gas_ch4 * rt / 64.0;
        let p_gas_co2 = s_gas_co2 * rt;
        let p_gas = p_gas_h2 + p_gas_ch4 + p_gas_co2 + gas.p_gas_h2o;
        let q_gas = (p.k_p * (p_gas - p.p_atm)).max(0.0);
        HeadSpace {
            p_gas_h2,
            p_gas_ch4,
            p_gas_co2,
            p_gas,
            q_gas,
        }
    }
}
