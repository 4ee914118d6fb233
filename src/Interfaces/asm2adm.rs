//! # ASM1 -> ADM1 interface
//!
//! Maps a 21-slot activated sludge stream onto the 33-slot digester influent while
//! conserving COD and nitrogen.
//!
//! ## Conversion steps
//! 1. The COD demand of oxygen and nitrate, `S_O + CODequiv·S_NO`, is removed from
//!    S_S, X_S, X_BH and X_BA in this order. Biomass COD removed this way releases its
//!    nitrogen to S_NH. A demand larger than all four donors is an error.
//! 2. S_S becomes amino acids as far as S_ND allows, the rest monosaccharides.
//! 3. X_S becomes proteins as far as X_ND allows, the rest lipids and carbohydrates.
//! 4. Biomass: the inert share `1 - frxs_adm` goes to X_I, the rest to proteins with
//!    biomass N first, then X_ND; what still lacks N goes to lipids and carbohydrates.
//! 5. X_I and X_P go to X_I. A degradable share `fdegrade_adm` becomes composites
//!    with N taken from X_I/X_P, X_ND, S_ND, S_NH in this order.
//! 6. S_I goes to S_I with N taken from S_I, S_ND, X_ND, S_NH in this order.
//! 7. All remaining nitrogen becomes S_IN. S_IC closes the charge balance at the
//!    digester pH; the net charge left over is split into S_cat or S_an.
//!
//! Units change from g/m³ to kg/m³ (COD) and kmol/m³ (N).

use super::asm_state::*;
use super::charge_balance::ChargeCoefficients;
use super::errors::{InterfaceError, InterfaceWarning};
use super::interface_parameters::InterfaceParameters;
use crate::Digester::indices::*;
use crate::Digester::parameters::InfluentVector;
use log::warn;

/// Removes up to `demand` from `pool`; returns the amount taken.
fn drain(pool: &mut f64, demand: &mut f64) -> f64 {
    let taken = pool.min(*demand).max(0.0);
    *pool -= taken;
    *demand -= taken;
    taken
}

/// Maps `cod` with N content `n_content`, taking the N from `donors` in order.
/// Returns the mapped COD and the COD left without nitrogen, if any.
fn map_with_nitrogen(
    w: &mut AsmVector,
    mut cod: f64,
    n_content: f64,
    donors: &[usize],
) -> (f64, Option<f64>) {
    let mut mapped = 0.0;
    for &donor in donors {
        if w[donor] < cod * n_content {
            mapped += w[donor] / n_content;
            cod -= w[donor] / n_content;
            w[donor] = 0.0;
        } else {
            w[donor] -= cod * n_content;
            return (mapped + cod, None);
        }
    }
    (mapped, Some(cod))
}

/// Converts `asm` at the digester pH `ph_adm`. Shortages resolved by reclassification
/// are returned as warnings and logged.
pub fn asm2adm(
    asm: &AsmVector,
    ph_adm: f64,
    p: &InterfaceParameters,
) -> Result<(InfluentVector, Vec<InterfaceWarning>), InterfaceError> {
    let mut w = *asm;
    let mut warnings = Vec::new();

    let mut demand = asm[SO] + p.cod_equiv * asm[SNO];
    drain(&mut w[SS], &mut demand);
    drain(&mut w[XS], &mut demand);
    let heterotrophs = drain(&mut w[XBH], &mut demand);
    let autotrophs = drain(&mut w[XBA], &mut demand);
    w[SNH] += (heterotrophs + autotrophs) * p.fnbac;
    if demand > 0.0 {
        return Err(InterfaceError::CodDemandExceedsDonors { remaining: demand });
    }

    // soluble substrate
    let s_aa;
    let sorgn = w[SND] / p.fnaa;
    if sorgn >= w[SS] {
        s_aa = w[SS];
        w[SND] -= w[SS] * p.fnaa;
        w[SS] = 0.0;
    } else {
        s_aa = sorgn;
        w[SS] -= sorgn;
        w[SND] = 0.0;
    }

    // particulate substrate
    let (mut x_pr, mut x_li, mut x_ch);
    let xorgn = w[XND] / p.fnaa;
    if xorgn >= w[XS] {
        x_pr = w[XS];
        w[XND] -= w[XS] * p.fnaa;
        x_li = 0.0;
        x_ch = 0.0;
    } else {
        x_pr = xorgn;
        x_li = p.frlixs * (w[XS] - xorgn);
        x_ch = (1.0 - p.frlixs) * (w[XS] - xorgn);
        w[XND] = 0.0;
    }
    w[XS] = 0.0;

    // biomass
    let biomass = w[XBH] + w[XBA];
    let biomass_nobio = biomass * (1.0 - p.frxs_adm);
    let biomass_n = biomass * p.fnbac - biomass_nobio * p.fxni;
    if biomass_n < 0.0 {
        return Err(InterfaceError::InsufficientBiomassNitrogen {
            deficit: -biomass_n,
        });
    }
    if biomass_n / p.fnaa <= biomass - biomass_nobio {
        let mut proteins = biomass_n / p.fnaa;
        let mut remaining = biomass - biomass_nobio - proteins;
        if w[XND] / p.fnaa > remaining {
            proteins += remaining;
            w[XND] -= remaining * p.fnaa;
            remaining = 0.0;
        } else {
            proteins += w[XND] / p.fnaa;
            remaining -= w[XND] / p.fnaa;
            w[XND] = 0.0;
        }
        x_pr += proteins;
        x_li += p.frlibac * remaining;
        x_ch += (1.0 - p.frlibac) * remaining;
    } else {
        let proteins = biomass - biomass_nobio;
        w[XND] += biomass * p.fnbac - biomass_nobio * p.fxni - proteins * p.fnaa;
        x_pr += proteins;
    }
    w[XBH] = 0.0;
    w[XBA] = 0.0;

    // particulate inerts
    let inert_x = (1.0 - p.fdegrade_adm) * (w[XI] + w[XP]);
    let mut x_c = 0.0;
    if p.fdegrade_adm > 0.0 {
        let degradable = p.fdegrade_adm * (w[XI] + w[XP]);
        if p.fxni < p.fnxc {
            let own_n = degradable * p.fxni / p.fnxc;
            let (mapped, unmapped) =
                map_with_nitrogen(&mut w, degradable - own_n, p.fnxc, &[XND, SND, SNH]);
            x_c = own_n + mapped;
            if let Some(cod) = unmapped {
                x_li += 0.5 * cod;
                x_ch += 0.5 * cod;
                let warning = InterfaceWarning::DegradableInertsToLipidsAndCarbohydrates { cod };
                warn!("{}", warning);
                warnings.push(warning);
            }
        } else {
            x_c = degradable;
            w[XND] += degradable * (p.fxni - p.fnxc);
        }
    }

    // soluble inerts
    let inert_s;
    if p.fsni < p.fsni_adm {
        let own_n = w[SI] * p.fsni / p.fsni_adm;
        let lacking = w[SI] - own_n;
        let (mapped, unmapped) = map_with_nitrogen(&mut w, lacking, p.fsni_adm, &[SND, XND, SNH]);
        inert_s = own_n + mapped;
        if let Some(cod) = unmapped {
            w[SS] += cod;
            let warning = InterfaceWarning::SolubleInertsToSugars { cod };
            warn!("{}", warning);
            warnings.push(warning);
        }
    } else {
        inert_s = w[SI];
        w[SND] += w[SI] * (p.fsni - p.fsni_adm);
    }
    w[SI] = 0.0;

    let mut y = InfluentVector::zeros();
    y[S_SU] = w[SS] / 1000.0;
    y[S_AA] = s_aa / 1000.0;
    y[S_IN] = (w[SNH] + w[SND] + w[XND]) / 14000.0;
    y[S_I] = inert_s / 1000.0;
    y[X_XC] = x_c / 1000.0;
    y[X_CH] = x_ch / 1000.0;
    y[X_PR] = x_pr / 1000.0;
    y[X_LI] = x_li / 1000.0;
    y[X_I] = (biomass_nobio + inert_x) / 1000.0;
    y[U_Q] = asm[Q];
    y[U_T] = p.t_op - 273.15;
    for k in 0..5 {
        y[U_DUMMY + k] = asm[SD1 + k];
    }

    let alpha = ChargeCoefficients::at(ph_adm, p);
    let organic_charge = alpha.vfa_charge(y[S_VA], y[S_BU], y[S_PRO], y[S_AC])
        + y[S_IN] * alpha.inorganic_n;
    y[S_IC] = ((asm[SNO] * alpha.no + asm[SNH] * alpha.nh + asm[SALK] * alpha.alk)
        - organic_charge)
        / alpha.co2;
    let cat_minus_an = organic_charge + y[S_IC] * alpha.co2 + alpha.water_charge();
    if cat_minus_an > 0.0 {
        y[S_CAT] = cat_minus_an;
    } else {
        y[S_AN] = -cat_minus_an;
    }
    Ok((y, warnings))
}

/// COD of an ADM1 influent in g COD/m³ (S_su .. S_ch4, S_I and all particulates).
pub fn adm_cod(y: &InfluentVector) -> f64 {
    let soluble: f64 = (S_SU..=S_CH4).map(|i| y[i]).sum();
    let particulate: f64 = (S_I..=X_I).map(|i| y[i]).sum();
    1000.0 * (soluble + particulate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Typical thickened primary and secondary sludge mix.
    fn sludge() -> AsmVector {
        let mut y = AsmVector::zeros();
        y[SI] = 28.0;
        y[SS] = 60.0;
        y[XI] = 10000.0;
        y[XS] = 20000.0;
        y[XBH] = 9800.0;
        y[XBA] = 580.0;
        y[XP] = 3700.0;
        y[SO] = 0.0;
        y[SNO] = 5.0;
        y[SNH] = 50.0;
        y[SND] = 2.0;
        y[XND] = 800.0;
        y[SALK] = 5.0;
        y[TSS] = 33000.0;
        y[Q] = 178.4674;
        y[TEMP] = 14.86;
        y
    }

    fn adm_nitrogen(y: &InfluentVector, p: &InterfaceParameters) -> f64 {
        14000.0 * y[S_IN]
            + 1000.0 * p.fnaa * (y[S_AA] + y[X_PR])
            + 1000.0 * p.fnxc * y[X_XC]
            + 1000.0 * p.fxni * y[X_I]
            + 1000.0 * p.fsni_adm * y[S_I]
    }

    #[test]
    fn cod_closes_after_electron_acceptor_demand() {
        let mut p = InterfaceParameters::default();
        p.cod_equiv = 4.57;
        let mut asm = AsmVector::zeros();
        asm[SS] = 100.0;
        asm[XS] = 3000.0;
        asm[XBH] = 4000.0;
        asm[XBA] = 1000.0;
        asm[XI] = 500.0;
        asm[SI] = 30.0;
        asm[SO] = 2.0;
        asm[SNO] = 10.0;
        asm[SNH] = 40.0;
        asm[SND] = 5.0;
        asm[XND] = 150.0;
        asm[SALK] = 7.0;
        asm[Q] = 100.0;
        let (y, warnings) = asm2adm(&asm, 7.0, &p).unwrap();
        assert!(warnings.is_empty());
        let expected = asm_cod(&asm) - (2.0 + 4.57 * 10.0);
        assert_relative_eq!(adm_cod(&y), expected, epsilon = 1e-6);
        assert_eq!(y[U_Q], 100.0);
        assert_relative_eq!(y[U_T], 35.0, epsilon = 1e-12);
    }

    #[test]
    fn nitrogen_is_conserved() {
        let p = InterfaceParameters::default();
        let asm = sludge();
        let (y, _) = asm2adm(&asm, 7.26, &p).unwrap();
        // nitrate N leaves with the COD demand it satisfies
        let n_in = asm_nitrogen(&asm, p.fnbac, p.fxni, p.fsni) - asm[SNO];
        assert_relative_eq!(adm_nitrogen(&y, &p), n_in, max_relative = 1e-9);
        assert_relative_eq!(adm_cod(&y), asm_cod(&asm) - p.cod_equiv * 5.0, max_relative = 1e-12);
    }

    #[test]
    fn demand_is_drained_in_order() {
        let p = InterfaceParameters::default();
        let mut asm = AsmVector::zeros();
        asm[SS] = 10.0;
        asm[XS] = 20.0;
        asm[XBH] = 100.0;
        asm[SND] = 1.0;
        asm[XND] = 5.0;
        asm[SO] = 40.0;
        let (y, _) = asm2adm(&asm, 7.0, &p).unwrap();
        // SS and XS fully used, 10 g COD taken from XBH
        assert_eq!(y[S_SU], 0.0);
        assert_eq!(y[S_AA], 0.0);
        let biomass_left = 90.0;
        assert_relative_eq!(
            adm_cod(&y),
            biomass_left,
            max_relative = 1e-12
        );
    }

    #[test]
    fn excessive_demand_is_an_error() {
        let p = InterfaceParameters::default();
        let mut asm = AsmVector::zeros();
        asm[SS] = 1.0;
        asm[XS] = 1.0;
        asm[SO] = 5.0;
        match asm2adm(&asm, 7.0, &p) {
            Err(InterfaceError::CodDemandExceedsDonors { remaining }) => {
                assert_relative_eq!(remaining, 3.0, epsilon = 1e-12)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn inert_share_larger_than_biomass_nitrogen_is_an_error() {
        let mut p = InterfaceParameters::default();
        p.frxs_adm = 0.0;
        p.fxni = 0.1;
        let mut asm = AsmVector::zeros();
        asm[XBH] = 100.0;
        assert!(matches!(
            asm2adm(&asm, 7.0, &p),
            Err(InterfaceError::InsufficientBiomassNitrogen { .. })
        ));
    }

    #[test]
    fn soluble_inerts_without_nitrogen_become_sugars() {
        let p = InterfaceParameters::default();
        let mut asm = AsmVector::zeros();
        asm[SI] = 100.0;
        asm[SNH] = 1.2;
        let (y, warnings) = asm2adm(&asm, 7.0, &p).unwrap();
        // 1.2 g N covers 20 g COD of S_I at 0.06
        assert_relative_eq!(y[S_I], 0.020, max_relative = 1e-12);
        assert_relative_eq!(y[S_SU], 0.080, max_relative = 1e-12);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            InterfaceWarning::SolubleInertsToSugars { .. }
        ));
    }

    #[test]
    fn degradable_inerts_without_nitrogen_become_lipids_and_carbohydrates() {
        let mut p = InterfaceParameters::default();
        p.fdegrade_adm = 0.5;
        p.fxni = 0.02;
        let mut asm = AsmVector::zeros();
        asm[XI] = 1000.0;
        let (y, warnings) = asm2adm(&asm, 7.0, &p).unwrap();
        assert_relative_eq!(y[X_I], 0.5, max_relative = 1e-12);
        // only the own N of X_I is available
        let x_c = 500.0 * p.fxni / p.fnxc;
        assert_relative_eq!(y[X_XC], x_c / 1000.0, max_relative = 1e-12);
        assert_relative_eq!(y[X_LI], 0.5 * (500.0 - x_c) / 1000.0, max_relative = 1e-12);
        assert_relative_eq!(y[X_LI], y[X_CH], max_relative = 1e-12);
        assert_eq!(
            warnings,
            vec![InterfaceWarning::DegradableInertsToLipidsAndCarbohydrates { cod: 500.0 - x_c }]
        );
    }

    #[test]
    fn nitrogen_rich_inerts_release_excess_to_organic_n() {
        let mut p = InterfaceParameters::default();
        p.fdegrade_adm = 0.5;
        let mut asm = AsmVector::zeros();
        asm[XI] = 1000.0;
        let (y, warnings) = asm2adm(&asm, 7.0, &p).unwrap();
        assert!(warnings.is_empty());
        assert_relative_eq!(y[X_XC], 0.5, max_relative = 1e-12);
        assert_relative_eq!(y[S_IN] * 14000.0, 500.0 * (p.fxni - p.fnxc), max_relative = 1e-9);
    }

    #[test]
    fn charge_is_split_into_non_negative_ions() {
        let p = InterfaceParameters::default();
        let (y, _) = asm2adm(&sludge(), 7.26, &p).unwrap();
        assert!(y[S_CAT] >= 0.0 && y[S_AN] >= 0.0);
        assert!(y[S_CAT] == 0.0 || y[S_AN] == 0.0);
        assert!(y[S_IC] > 0.0);
    }
}
