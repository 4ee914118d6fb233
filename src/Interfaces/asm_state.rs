//! The 21-slot ASM1 stream vector exchanged with the activated sludge side.
//!
//! Concentrations in g COD/m³ (organics), g N/m³ (nitrogen), mol HCO₃⁻/m³ (alkalinity),
//! g SS/m³ (TSS); flow in m³/d, temperature in °C.

use nalgebra::SVector;

pub const N_ASM: usize = 21;

pub type AsmVector = SVector<f64, N_ASM>;

pub const SI: usize = 0;
pub const SS: usize = 1;
pub const XI: usize = 2;
pub const XS: usize = 3;
pub const XBH: usize = 4;
pub const XBA: usize = 5;
pub const XP: usize = 6;
pub const SO: usize = 7;
pub const SNO: usize = 8;
pub const SNH: usize = 9;
pub const SND: usize = 10;
pub const XND: usize = 11;
pub const SALK: usize = 12;
pub const TSS: usize = 13;
pub const Q: usize = 14;
pub const TEMP: usize = 15;
pub const SD1: usize = 16;

pub const ASM_NAMES: [&str; N_ASM] = [
    "SI", "SS", "XI", "XS", "XBH", "XBA", "XP", "SO", "SNO", "SNH", "SND", "XND", "SALK", "TSS",
    "Q", "TEMP", "SD1", "SD2", "SD3", "XD4", "XD5",
];

/// COD of the organic components.
pub fn asm_cod(y: &AsmVector) -> f64 {
    y[SI] + y[SS] + y[XI] + y[XS] + y[XBH] + y[XBA] + y[XP]
}

/// Total Kjeldahl and oxidised nitrogen including the N bound in biomass and inerts.
pub fn asm_nitrogen(y: &AsmVector, fnbac: f64, fxni: f64, fsni: f64) -> f64 {
    y[SNO] + y[SNH] + y[SND] + y[XND] + fnbac * (y[XBH] + y[XBA]) + fxni * (y[XI] + y[XP])
        + fsni * y[SI]
}
