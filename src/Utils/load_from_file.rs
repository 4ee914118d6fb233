//! JSON configuration of a digester run.
//!
//! Every section is optional and falls back to the BSM2 defaults:
//!
//! ```json
//! {
//!   "digester_parameters": { "k_la": 180.0, "t_op": 305.15 },
//!   "volumes": { "v_liq": 3400.0, "v_gas": 300.0 },
//!   "interface_parameters": [ ...23 values... ],
//!   "initial_state": { "states": [ ...42 values... ], "s_h_ion": 5.4562e-8 },
//!   "ph_inhibition": { "acidogens": { "PhHill": { "exponent": 24.0 } } }
//! }
//! ```
//!
//! Parameter blocks are given either as an object of named values (unnamed
//! parameters keep their default) or as a complete array in the fixed order.

use crate::Digester::adm1_model::Adm1Model;
use crate::Digester::anaerobic_digester::AnaerobicDigester;
use crate::Digester::errors::DigesterError;
use crate::Digester::inhibition::PhInhibitionSet;
use crate::Digester::parameters::{DigesterParameters, InitialState, ReactorVolumes};
use crate::Interfaces::errors::InterfaceError;
use crate::Interfaces::interface_parameters::InterfaceParameters;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("error parsing configuration at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error(transparent)]
    Digester(#[from] DigesterError),
    #[error(transparent)]
    Interface(#[from] InterfaceError),
}

/// A parameter block as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterInput {
    Array(Vec<f64>),
    Named(BTreeMap<String, f64>),
}

/// Raw file content; `None` sections take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigesterConfig {
    pub digester_parameters: Option<ParameterInput>,
    pub volumes: Option<ReactorVolumes>,
    pub interface_parameters: Option<ParameterInput>,
    pub initial_state: Option<InitialState>,
    pub ph_inhibition: Option<PhInhibitionSet>,
}

/// Validated configuration ready to build a digester.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DigesterSetup {
    pub parameters: DigesterParameters,
    pub volumes: ReactorVolumes,
    pub interface: InterfaceParameters,
    pub initial_state: InitialState,
    pub ph_inhibition: PhInhibitionSet,
}

impl DigesterSetup {
    pub fn model(&self) -> Adm1Model {
        Adm1Model::new(self.parameters.clone(), self.volumes).with_ph_inhibition(self.ph_inhibition)
    }

    pub fn digester(&self) -> Result<AnaerobicDigester, DigesterError> {
        AnaerobicDigester::new(self.model(), &self.initial_state)
    }
}

fn digester_parameters(input: Option<ParameterInput>) -> Result<DigesterParameters, DigesterError> {
    match input {
        None => Ok(DigesterParameters::default()),
        Some(ParameterInput::Array(values)) => DigesterParameters::from_slice(&values),
        Some(ParameterInput::Named(values)) => {
            let mut p = DigesterParameters::default();
            for (name, value) in values {
                p.set(&name, value)?;
            }
            Ok(p)
        }
    }
}

fn interface_parameters(
    input: Option<ParameterInput>,
) -> Result<InterfaceParameters, InterfaceError> {
    match input {
        None => Ok(InterfaceParameters::default()),
        Some(ParameterInput::Array(values)) => InterfaceParameters::from_slice(&values),
        Some(ParameterInput::Named(values)) => {
            let mut p = InterfaceParameters::default();
            for (name, value) in values {
                p.set(&name, value)?;
            }
            Ok(p)
        }
    }
}

impl DigesterConfig {
    /// Fills the missing sections with defaults and checks sizes and volumes.
    pub fn resolve(self) -> Result<DigesterSetup, ConfigError> {
        let parameters = digester_parameters(self.digester_parameters)?;
        let volumes = match self.volumes {
            Some(v) => ReactorVolumes::new(v.v_liq, v.v_gas)?,
            None => ReactorVolumes::default(),
        };
        let interface = interface_parameters(self.interface_parameters)?;
        let initial_state = self.initial_state.unwrap_or_default();
        initial_state.state_vector()?;
        Ok(DigesterSetup {
            parameters,
            volumes,
            interface,
            initial_state,
            ph_inhibition: self.ph_inhibition.unwrap_or_default(),
        })
    }
}

/// Parses a configuration document. Syntax errors are logged with the offending line.
pub fn parse_digester_config(text: &str) -> Result<DigesterSetup, ConfigError> {
    let config: DigesterConfig = match serde_json::from_str(text) {
        Ok(config) => config,
        Err(e) => {
            let (line, column) = (e.line(), e.column());
            error!(
                "Error parsing configuration at line {}, column {}: {}",
                line, column, e
            );
            if let Some(problem_line) = text.lines().nth(line.saturating_sub(1)) {
                error!("Problematic line: {}", problem_line);
                if column >= 1 && column <= problem_line.len() {
                    error!("{}", " ".repeat(column - 1) + "^");
                }
            }
            return Err(ConfigError::Syntax {
                line,
                column,
                message: e.to_string(),
            });
        }
    };
    config.resolve()
}

pub fn load_digester_config(file_name: &str) -> Result<DigesterSetup, ConfigError> {
    let path = Path::new(file_name);
    let text = fs::read_to_string(path)?;
    let setup = parse_digester_config(&text)?;
    info!("Successfully loaded digester configuration from '{}'", file_name);
    Ok(setup)
}

/// Writes a setup as a complete configuration document.
pub fn save_digester_config(setup: &DigesterSetup, file_name: &str) -> Result<(), ConfigError> {
    let config = DigesterConfig {
        digester_parameters: Some(ParameterInput::Array(setup.parameters.to_vec())),
        volumes: Some(setup.volumes),
        interface_parameters: Some(ParameterInput::Array(setup.interface.to_vec())),
        initial_state: Some(setup.initial_state.clone()),
        ph_inhibition: Some(setup.ph_inhibition),
    };
    fs::write(file_name, serde_json::to_string_pretty(&config)?)?;
    info!("Digester configuration written to '{}'", file_name);
    Ok(())
}

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }

    pub fn load_digester_setup(&self) -> Result<DigesterSetup, ConfigError> {
        load_digester_config(&self.file_name)
    }
}
