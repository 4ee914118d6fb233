//! # ADM1 anaerobic digester as a differential-algebraic system
//!
//! The IWA Anaerobic Digestion Model No. 1 in the BSM2 formulation. The stiff
//! acid-base equilibria and the dissolved hydrogen are removed from the ODE part and
//! restored as algebraic unknowns, each solved by a scalar Newton iteration once per
//! major integration step. What remains is a well-conditioned ODE for the biochemical
//! and gas-phase states.
//!
//! ## Main Structures
//! - `DigesterParameters`, `ReactorVolumes`, `InitialState`: the 100-value parameter block,
//!   `[V_liq, V_gas]` and the start values
//! - `PhSolver`: charge balance in S_H, produces S_H and six conjugate bases
//! - `HydrogenSolver`: quasi steady state of dissolved H₂
//! - `Adm1Model`: right-hand side and the 52-value observation
//! - `AnaerobicDigester`: owns the state and both solvers, enforces the
//!   integrator -> pH -> H₂ order
//!
//! ## Example
//! ```
//! use DigesterDAE::Digester::anaerobic_digester::AnaerobicDigester;
//! use DigesterDAE::Digester::indices::*;
//! use DigesterDAE::Digester::integrator::RungeKutta4;
//! use DigesterDAE::Digester::parameters::InfluentVector;
//! let mut digester = AnaerobicDigester::bsm2().unwrap();
//! let mut u = InfluentVector::zeros();
//! for i in 0..=S_AN {
//!     u[i] = digester.state()[i];
//! }
//! u[U_Q] = 178.4674;
//! u[U_T] = 35.0;
//! let mut rk4 = RungeKutta4 { substeps: 20 };
//! digester.major_step(&mut rk4, 0.01, &u);
//! println!("pH = {}", digester.observation(&u).ph());
//! ```

pub mod adm1_model;
pub mod anaerobic_digester;
pub mod errors;
/// scalar Newton-Raphson for the algebraic states
pub mod newton;
pub mod h2_solver;
pub mod indices;
pub mod inhibition;
/// host-integrator seam with two fixed-step schemes
pub mod integrator;
pub mod kinetics;
pub mod observation;
pub mod parameters;
pub mod ph_solver;
/// temperature-corrected equilibrium and Henry constants
pub mod thermo;
mod digester_tests;
