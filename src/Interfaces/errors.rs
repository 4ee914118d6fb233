use std::fmt;
use thiserror::Error;

/// Conversions that cannot be completed without violating the COD or nitrogen balance.
#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("{block} must have {expected} values, found {found}")]
    ParameterSizeMismatch {
        block: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unknown parameter name: {0}")]
    UnknownParameter(String),
    #[error("COD demand of oxygen and nitrate exceeds SS, XS, XBH and XBA by {remaining} g COD/m3")]
    CodDemandExceedsDonors { remaining: f64 },
    #[error("biomass nitrogen is {deficit} g N/m3 short of the inert part of the biomass")]
    InsufficientBiomassNitrogen { deficit: f64 },
    #[error("nitrogen shortage: {0}")]
    NitrogenShortage(String),
}

/// Nitrogen shortages that were resolved by reclassifying COD. The conversion
/// still succeeds; COD is conserved but lands in a different component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterfaceWarning {
    /// degradable X_I/X_P COD mapped half to lipids, half to carbohydrates
    DegradableInertsToLipidsAndCarbohydrates { cod: f64 },
    /// S_I COD mapped to monosaccharides
    SolubleInertsToSugars { cod: f64 },
    /// degradable digester X_I COD kept as activated sludge X_I
    DegradableInertsKeptInert { cod: f64 },
}

impl fmt::Display for InterfaceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceWarning::DegradableInertsToLipidsAndCarbohydrates { cod } => write!(
                f,
                "nitrogen shortage converting degradable XI and XP: {cod} g COD/m3 mapped to lipids and carbohydrates"
            ),
            InterfaceWarning::SolubleInertsToSugars { cod } => write!(
                f,
                "nitrogen shortage converting SI: {cod} g COD/m3 mapped to monosaccharides"
            ),
            InterfaceWarning::DegradableInertsKeptInert { cod } => write!(
                f,
                "nitrogen shortage converting degradable X_I: {cod} g COD/m3 kept inert"
            ),
        }
    }
}
