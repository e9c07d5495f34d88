use super::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use chainfold::engine::config::EnergyEvaluation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileChainConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(rename = "bond-length", skip_serializing_if = "Option::is_none")]
    pub bond_length: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilePotentialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSimulationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(
        rename = "max-proposal-attempts",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_proposal_attempts: Option<usize>,
    #[serde(rename = "energy-evaluation", skip_serializing_if = "Option::is_none")]
    pub energy_evaluation: Option<EnergyEvaluation>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<FileChainConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential: Option<FilePotentialConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<FileSimulationConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Other(e.into()))
    }
}

impl From<&DefaultsConfig> for FileConfig {
    fn from(defaults: &DefaultsConfig) -> Self {
        Self {
            chain: Some(FileChainConfig {
                length: Some(defaults.chain_length),
                bond_length: Some(defaults.bond_length),
            }),
            potential: Some(FilePotentialConfig {
                radius: Some(defaults.potential.radius),
                m: Some(defaults.potential.m),
                n: Some(defaults.potential.n),
            }),
            simulation: Some(FileSimulationConfig {
                temperature: Some(defaults.temperature),
                steps: Some(defaults.steps),
                seed: None,
                max_proposal_attempts: Some(defaults.max_proposal_attempts),
                energy_evaluation: Some(defaults.energy_evaluation),
            }),
        }
    }
}
