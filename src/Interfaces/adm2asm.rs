//! # ADM1 -> ASM1 interface
//!
//! Maps the 33-slot digester effluent back onto the 21-slot activated sludge stream.
//!
//! ## Conversion steps
//! 1. Biomass (X_su .. X_h2): the share `1 - frxs_as` goes to X_P, the rest to X_S. If
//!    biomass N cannot cover the X_P part, as much as possible goes to X_P. Nitrogen for
//!    the X_S part comes from the biomass, then from S_IN; if S_IN is short the
//!    conversion fails.
//! 2. X_c, X_ch, X_pr and X_li join X_S.
//! 3. X_I goes to X_I. A degradable share `fdegrade_as` goes to X_S with N from X_I,
//!    then S_IN; what lacks N stays inert.
//! 4. S_I goes to S_I with N from S_I, then S_IN; a shortage fails the conversion.
//! 5. S_S collects the soluble organics except S_h2 and S_ch4 (stripped on re-entry),
//!    S_ND and X_ND follow the N content of S_S and X_S precursors, S_NH takes the
//!    adjusted S_IN, and S_ALK closes the charge balance at the digester pH.

use super::asm_state::*;
use super::charge_balance::ChargeCoefficients;
use super::errors::{InterfaceError, InterfaceWarning};
use super::interface_parameters::InterfaceParameters;
use crate::Digester::indices::*;
use crate::Digester::parameters::InfluentVector;
use log::warn;

/// g N/m³ per kmol N/m³.
const N_MASS: f64 = 14000.0;

/// Converts the digester effluent `adm` at pH `ph_adm`. `t_ww` is the wastewater
/// temperature (°C) assigned to the returned stream.
pub fn adm2asm(
    adm: &InfluentVector,
    ph_adm: f64,
    t_ww: f64,
    p: &InterfaceParameters,
) -> Result<(AsmVector, Vec<InterfaceWarning>), InterfaceError> {
    let mut s_in = adm[S_IN];
    let mut warnings = Vec::new();

    // biomass
    let biomass = 1000.0 * (X_SU..=X_H2).map(|i| adm[i]).sum::<f64>();
    let mut biomass_nobio = biomass * (1.0 - p.frxs_as);
    let mut biomass_n = biomass * p.fnbac - biomass_nobio * p.fxni;
    let x_p;
    if biomass_n < 0.0 {
        x_p = biomass * p.fnbac / p.fxni;
        biomass_nobio = x_p;
        biomass_n = 0.0;
    } else {
        x_p = biomass_nobio;
    }
    let mut x_s_bio;
    if biomass_n / p.fnxc <= biomass - biomass_nobio {
        x_s_bio = biomass_n / p.fnxc;
        let remaining = biomass - biomass_nobio - x_s_bio;
        if s_in * N_MASS / p.fnaa >= remaining {
            x_s_bio += remaining;
        } else {
            return Err(InterfaceError::NitrogenShortage(format!(
                "S_IN cannot supply the nitrogen of {remaining} g COD/m3 biomass mapped to XS"
            )));
        }
    } else {
        x_s_bio = biomass - biomass_nobio;
    }
    s_in += (biomass * p.fnbac - x_p * p.fxni - x_s_bio * p.fnxc) / N_MASS;

    // particulate inerts
    let mut inert_x = (1.0 - p.fdegrade_as) * adm[X_I] * 1000.0;
    let mut x_s_inert = 0.0;
    if p.fdegrade_as > 0.0 {
        let mut degradable = p.fdegrade_as * adm[X_I] * 1000.0;
        if p.fxni < p.fnxc {
            x_s_inert = degradable * p.fxni / p.fnxc;
            degradable -= x_s_inert;
            if s_in * N_MASS < degradable * p.fnxc {
                x_s_inert += s_in * N_MASS / p.fnxc;
                degradable -= s_in * N_MASS / p.fnxc;
                s_in = 0.0;
                inert_x += degradable;
                let warning = InterfaceWarning::DegradableInertsKeptInert { cod: degradable };
                warn!("{}", warning);
                warnings.push(warning);
            } else {
                x_s_inert += degradable;
                s_in -= degradable * p.fnxc / N_MASS;
            }
        } else {
            x_s_inert = degradable;
            s_in += degradable * (p.fxni - p.fnxc) / N_MASS;
        }
    }

    // soluble inerts
    let inert_s;
    if p.fsni_adm < p.fsni {
        let own_n = adm[S_I] * p.fsni_adm / p.fsni;
        let lacking = adm[S_I] - own_n;
        if s_in * 14.0 < lacking * p.fsni {
            return Err(InterfaceError::NitrogenShortage(format!(
                "S_IN cannot supply the nitrogen of {} g COD/m3 SI",
                1000.0 * lacking
            )));
        }
        inert_s = adm[S_I];
        s_in -= lacking * p.fsni / 14.0;
    } else {
        inert_s = adm[S_I];
        s_in += adm[S_I] * (p.fsni_adm - p.fsni) / 14.0;
    }

    let mut y = AsmVector::zeros();
    y[SI] = inert_s * 1000.0;
    y[SS] = 1000.0 * (S_SU..=S_AC).map(|i| adm[i]).sum::<f64>();
    y[XI] = inert_x;
    y[XS] = (adm[X_XC] + adm[X_CH] + adm[X_PR] + adm[X_LI]) * 1000.0 + x_s_bio + x_s_inert;
    y[XP] = x_p;
    y[SNH] = s_in * N_MASS;
    y[SND] = p.fnaa * 1000.0 * adm[S_AA];
    y[XND] = p.fnxc * (x_s_bio + x_s_inert) + p.fnxc * 1000.0 * adm[X_XC] + p.fnaa * 1000.0 * adm[X_PR];
    y[TSS] = 0.75 * (y[XI] + y[XS] + y[XBH] + y[XBA] + y[XP]);
    y[Q] = adm[U_Q];
    y[TEMP] = t_ww;
    for k in 0..5 {
        y[SD1 + k] = adm[U_DUMMY + k];
    }

    let alpha = ChargeCoefficients::at(ph_adm, p);
    y[SALK] = (alpha.vfa_charge(adm[S_VA], adm[S_BU], adm[S_PRO], adm[S_AC])
        + adm[S_IC] * alpha.co2
        + adm[S_IN] * alpha.inorganic_n
        - y[SNO] * alpha.no
        - y[SNH] * alpha.nh)
        / alpha.alk;
    Ok((y, warnings))
}
