//! Charge contributions per unit concentration at a given digester pH.
//!
//! ```text
//! α_va  = -1/208 · 1/(1 + 10^(pKa_va - pH))        (likewise bu /160, pro /112, ac /64)
//! α_co2 = -1/(1 + 10^(pKa_co2 - pH))
//! α_IN  = 10^(pKa_IN - pH) / (1 + 10^(pKa_IN - pH))
//! α_NH  = 1/14000,  α_NO = -1/14000,  α_ALK = -0.001
//! ```
//!
//! VFA coefficients take kg COD/m³, α_co2 and α_IN take kmol/m³, the last three
//! convert the ASM1 units (g N/m³, mol HCO₃⁻/m³) to kmol/m³. pKa_co2, pKa_IN and
//! pK_w are corrected to the operating temperature; the VFA values are not.

use super::interface_parameters::InterfaceParameters;

const ALPHA_NH: f64 = 1.0 / 14000.0;
const ALPHA_NO: f64 = -1.0 / 14000.0;
const ALPHA_ALK: f64 = -0.001;

fn corrected_pk(pk_base: f64, enthalpy: f64, factor: f64) -> f64 {
    pk_base - (enthalpy * factor).exp().log10()
}

fn dissociated_fraction(pk: f64, ph: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(pk - ph))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeCoefficients {
    pub ph: f64,
    pub pk_w: f64,
    pub va: f64,
    pub bu: f64,
    pub pro: f64,
    pub ac: f64,
    pub co2: f64,
    pub inorganic_n: f64,
    pub nh: f64,
    pub no: f64,
    pub alk: f64,
}

impl ChargeCoefficients {
    pub fn at(ph: f64, p: &InterfaceParameters) -> Self {
        let factor = (1.0 / p.t_base - 1.0 / p.t_op) / (100.0 * p.r);
        let pk_w = corrected_pk(p.pk_w_base, 55900.0, factor);
        let pk_co2 = corrected_pk(p.pk_a_co2_base, 7646.0, factor);
        let pk_in = corrected_pk(p.pk_a_in_base, 51965.0, factor);
        let in_ratio = 10f64.powf(pk_in - ph);
        ChargeCoefficients {
            ph,
            pk_w,
            va: -dissociated_fraction(p.pk_a_va_base, ph) / 208.0,
            bu: -dissociated_fraction(p.pk_a_bu_base, ph) / 160.0,
            pro: -dissociated_fraction(p.pk_a_pro_base, ph) / 112.0,
            ac: -dissociated_fraction(p.pk_a_ac_base, ph) / 64.0,
            co2: -dissociated_fraction(pk_co2, ph),
            inorganic_n: in_ratio / (1.0 + in_ratio),
            nh: ALPHA_NH,
            no: ALPHA_NO,
            alk: ALPHA_ALK,
        }
    }

    /// Charge of the four VFAs (kg COD/m³).
    pub fn vfa_charge(&self, s_va: f64, s_bu: f64, s_pro: f64, s_ac: f64) -> f64 {
        s_va * self.va + s_bu * self.bu + s_pro * self.pro + s_ac * self.ac
    }

    /// `10^(pH - pK_w) - 10^(-pH)`: hydroxide minus protons.
    pub fn water_charge(&self) -> f64 {
        10f64.powf(-self.pk_w + self.ph) - 10f64.powf(-self.ph)
    }
}
