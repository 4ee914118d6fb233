//! Positions of the named components inside the digester vectors.
//!
//! ## Continuous state (42 slots)
//!
//! | Slots | Content |
//! |---|---|
//! | 0..=23 | liquid phase: S_su .. S_I (solubles), X_xc .. X_I (particulates) |
//! | 24, 25 | S_cat, S_an |
//! | 26..=31 | ion slots: S_va-, S_bu-, S_pro-, S_ac-, S_hco3-, S_nh3 (algebraic) |
//! | 32..=34 | gas phase: S_gas_h2, S_gas_ch4, S_gas_co2 |
//! | 35, 36 | Q, T |
//! | 37..=41 | dummy states |
//!
//! Slot 7 (S_h2) and the ion slots carry zero derivative: their live values
//! are owned by the hydrogen and pH solvers.
//!
//! ## Influent (33 slots)
//! The first 26 liquid components, then Q, T and five dummies.
//!
//! ## Observation (52 slots)
//! See [`crate::Digester::observation::DigesterObservation`].

pub const N_STATES: usize = 42;
pub const N_INFLUENT: usize = 33;
pub const N_OBSERVATIONS: usize = 52;
/// Liquid components taking part in the biochemical reactions (S_su .. X_I).
pub const N_LIQUID: usize = 24;
pub const N_PROCESSES: usize = 19;

pub const S_SU: usize = 0;
pub const S_AA: usize = 1;
pub const S_FA: usize = 2;
pub const S_VA: usize = 3;
pub const S_BU: usize = 4;
pub const S_PRO: usize = 5;
pub const S_AC: usize = 6;
pub const S_H2: usize = 7;
pub const S_CH4: usize = 8;
pub const S_IC: usize = 9;
pub const S_IN: usize = 10;
pub const S_I: usize = 11;
pub const X_XC: usize = 12;
pub const X_CH: usize = 13;
pub const X_PR: usize = 14;
pub const X_LI: usize = 15;
pub const X_SU: usize = 16;
pub const X_AA: usize = 17;
pub const X_FA: usize = 18;
pub const X_C4: usize = 19;
pub const X_PRO: usize = 20;
pub const X_AC: usize = 21;
pub const X_H2: usize = 22;
pub const X_I: usize = 23;
pub const S_CAT: usize = 24;
pub const S_AN: usize = 25;
pub const S_HVA: usize = 26;
pub const S_HBU: usize = 27;
pub const S_HPRO: usize = 28;
pub const S_HAC: usize = 29;
pub const S_HCO3: usize = 30;
pub const S_NH3: usize = 31;
pub const S_GAS_H2: usize = 32;
pub const S_GAS_CH4: usize = 33;
pub const S_GAS_CO2: usize = 34;
pub const Q_D: usize = 35;
pub const T_D: usize = 36;
pub const S_D1_D: usize = 37;
pub const S_D2_D: usize = 38;
pub const S_D3_D: usize = 39;
pub const X_D4_D: usize = 40;
pub const X_D5_D: usize = 41;

// influent positions that differ from the state layout
pub const U_Q: usize = 26;
pub const U_T: usize = 27;
pub const U_DUMMY: usize = 28;

/// Component names of the 42-slot state, used in reports and config files.
pub const STATE_NAMES: [&str; N_STATES] = [
    "S_su", "S_aa", "S_fa", "S_va", "S_bu", "S_pro", "S_ac", "S_h2", "S_ch4", "S_IC", "S_IN",
    "S_I", "X_xc", "X_ch", "X_pr", "X_li", "X_su", "X_aa", "X_fa", "X_c4", "X_pro", "X_ac",
    "X_h2", "X_I", "S_cat", "S_an", "S_hva", "S_hbu", "S_hpro", "S_hac", "S_hco3", "S_nh3",
    "S_gas_h2", "S_gas_ch4", "S_gas_co2", "Q_D", "T_D", "S_D1_D", "S_D2_D", "S_D3_D", "X_D4_D",
    "X_D5_D",
];

/// Components that count as COD in the liquid phase (all organics, no S_IC/S_IN).
pub const COD_COMPONENTS: [usize; 22] = [
    S_SU, S_AA, S_FA, S_VA, S_BU, S_PRO, S_AC, S_H2, S_CH4, S_I, X_XC, X_CH, X_PR, X_LI, X_SU,
    X_AA, X_FA, X_C4, X_PRO, X_AC, X_H2, X_I,
];
