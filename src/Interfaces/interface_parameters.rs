//! Conversion constants of the ASM1 <-> ADM1 interfaces in the fixed 23-value order.
//!
//! Nitrogen contents are in g N/g COD. `cod_equiv` is the COD equivalent of nitrate
//! nitrogen (g COD/g N). The thermodynamic entries mirror the digester block and are
//! used for the charge balance at the digester temperature `t_op`.

use super::errors::InterfaceError;
use crate::Utils::parameter_block::parameter_block;

/// pH assumed for the first conversion before the digester has produced one.
pub const PH_ADM_INIT: f64 = 7.0;

parameter_block! {
    pub struct InterfaceParameters ("interface parameters", InterfaceError) {
        cod_equiv = 40.0 / 14.0,
        /// N content of amino acids and X_pr
        fnaa = 0.007 * 14.0,
        /// N content of composites
        fnxc = 0.0376,
        /// N content of biomass, same in AS and AD
        fnbac = 0.08,
        /// N content of X_I and X_P, same in AS and AD
        fxni = 0.06,
        /// N content of S_I in ASM1
        fsni = 0.0,
        /// N content of S_I in ADM1
        fsni_adm = 0.06,
        /// lipid share of the non-nitrogenous part of X_S
        frlixs = 0.7,
        /// lipid share of the non-nitrogenous part of biomass
        frlibac = 0.4,
        /// anaerobically degradable share of AS biomass
        frxs_adm = 0.68,
        /// share of AS X_I and X_P degradable in the digester
        fdegrade_adm = 0.0,
        /// aerobically degradable share of AD biomass
        frxs_as = 0.79,
        /// share of AD X_I degradable in the activated sludge
        fdegrade_as = 0.0,
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
    }
}
