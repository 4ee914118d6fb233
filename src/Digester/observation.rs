//! # Digester observation vector
//!
//! 52 values in the benchmark output order:
//!
//! | Slots | Content | Units |
//! |---|---|---|
//! | 0..=25 | S_su .. S_an (slot 7 holds the solved S_h2) | kg COD/m³, kmol/m³ |
//! | 26 | Q | m³/d |
//! | 27 | T | °C |
//! | 28..=32 | dummies | - |
//! | 33, 34 | pH, S_H | -, kmol/m³ |
//! | 35..=39 | S_va-, S_bu-, S_pro-, S_ac-, S_hco3- | kg COD/m³, kmol/m³ |
//! | 40..=42 | S_co2, S_nh3, S_nh4+ | kmol/m³ |
//! | 43..=45 | S_gas_h2, S_gas_ch4, S_gas_co2 | kg COD/m³, kmol/m³ |
//! | 46..=49 | p_gas_h2, p_gas_ch4, p_gas_co2, P_gas | bar |
//! | 50 | q_gas normalised to atmospheric pressure | m³/d |
//! | 51 | influent S_h2 | kg COD/m³ |

use super::indices::N_OBSERVATIONS;
use super::parameters::InfluentVector;
use nalgebra::SVector;

pub type ObservationVector = SVector<f64, N_OBSERVATIONS>;

pub const OBSERVATION_NAMES: [&str; N_OBSERVATIONS] = [
    "S_su", "S_aa", "S_fa", "S_va", "S_bu", "S_pro", "S_ac", "S_h2", "S_ch4", "S_IC", "S_IN",
    "S_I", "X_xc", "X_ch", "X_pr", "X_li", "X_su", "X_aa", "X_fa", "X_c4", "X_pro", "X_ac",
    "X_h2", "X_I", "S_cat", "S_an", "Q", "T", "S_D1", "S_D2", "S_D3", "X_D4", "X_D5", "pH",
    "S_H", "S_va_ion", "S_bu_ion", "S_pro_ion", "S_ac_ion", "S_hco3_ion", "S_co2", "S_nh3",
    "S_nh4", "S_gas_h2", "S_gas_ch4", "S_gas_co2", "p_gas_h2", "p_gas_ch4", "p_gas_co2",
    "P_gas", "q_gas", "S_h2_in",
];

const OBSERVATION_UNITS: [&str; N_OBSERVATIONS] = [
    "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3",
    "kg COD/m3", "kg COD/m3", "kmol C/m3", "kmol N/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3",
    "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3",
    "kg COD/m3", "kg COD/m3", "kg COD/m3", "kmol/m3", "kmol/m3", "m3/d", "C", "-", "-", "-",
    "-", "-", "-", "kmol/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kg COD/m3", "kmol C/m3",
    "kmol C/m3", "kmol N/m3", "kmol N/m3", "kg COD/m3", "kg COD/m3", "kmol C/m3", "bar", "bar",
    "bar", "bar", "m3/d", "kg COD/m3",
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GasProduction {
    pub ch4: f64,
    pub h2: f64,
    pub co2: f64,
    pub q_gas: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DigesterObservation {
    values: ObservationVector,
}

impl DigesterObservation {
    pub fn new(values: ObservationVector) -> Self {
        DigesterObservation { values }
    }

    pub fn values(&self) -> &ObservationVector {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        OBSERVATION_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// Digester effluent in the 33-slot stream layout (slots 0..=32).
    pub fn effluent(&self) -> InfluentVector {
        InfluentVector::from_fn(|i, _| self.values[i])
    }

    pub fn ph(&self) -> f64 {
        self.values[33]
    }

    pub fn s_h(&self) -> f64 {
        self.values[34]
    }

    pub fn total_pressure(&self) -> f64 {
        self.values[49]
    }

    pub fn normalised_gas_flow(&self) -> f64 {
        self.values[50]
    }

    /// Daily mass flows of the biogas components (kg/d) and the normalised gas flow.
    /// Component shares are the partial pressure ratios, converted with the ideal gas law
    /// at atmospheric pressure.
    pub fn gas_production(&self, p_atm: f64, r: f64, t_op: f64) -> GasProduction {
        let p_gas = self.values[49];
        let q_gas = self.values[50];
        if p_gas <= 0.0 {
            return GasProduction::default();
        }
        let molar = p_atm / (r * t_op) * q_gas / p_gas;
        GasProduction {
            ch4: self.values[47] * 16.0 * molar,
            h2: self.values[46] * 2.0 * molar,
            co2: self.values[48] * 44.0 * molar,
            q_gas,
        }
    }

    /// Tabulated report of all 52 observations.
    pub fn pretty_print(&self) {
        use prettytable::{Table, row};

        println!("\n=== DIGESTER OBSERVATION ===");
        let mut table = Table::new();
        table.add_row(row!["#", "Variable", "Value", "Units"]);
        for (i, value) in self.values.iter().enumerate() {
            table.add_row(row![
                i,
                OBSERVATION_NAMES[i],
                format!("{:.6e}", value),
                OBSERVATION_UNITS[i]
            ]);
        }
        table.printstd();
    }
}
