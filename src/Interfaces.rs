//! # ASM1 <-> ADM1 interfaces
//!
//! Stream adapters between the activated sludge line (ASM1, 21 slots in g/m³) and the
//! anaerobic digester (ADM1, 33 slots in kg/m³ and kmol/m³). Both directions conserve
//! COD and nitrogen: nitrogen for every target component is taken from a fixed
//! ordered list of donors, and the charge balance is closed at the current digester pH.
//!
//! ## Example
//! ```
//! use DigesterDAE::Interfaces::asm2adm::asm2adm;
//! use DigesterDAE::Interfaces::asm_state::*;
//! use DigesterDAE::Interfaces::interface_parameters::{InterfaceParameters, PH_ADM_INIT};
//! let mut sludge = AsmVector::zeros();
//! sludge[XS] = 20000.0;
//! sludge[XBH] = 9000.0;
//! sludge[XND] = 800.0;
//! sludge[SNH] = 50.0;
//! sludge[Q] = 178.0;
//! let (influent, warnings) = asm2adm(&sludge, PH_ADM_INIT, &InterfaceParameters::default()).unwrap();
//! assert!(warnings.is_empty());
//! println!("digester feed: {:?}", influent);
//! ```

pub mod adm2asm;
pub mod asm2adm;
/// the 21-slot activated sludge stream
pub mod asm_state;
pub mod charge_balance;
pub mod errors;
pub mod interface_parameters;
