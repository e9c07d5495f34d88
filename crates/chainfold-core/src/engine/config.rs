use crate::core::potentials::PotentialParams;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_CHAIN_LENGTH: usize = 2;
pub const DEFAULT_MAX_PROPOSAL_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Chain length must be at least 2, got {0}")]
    InvalidChainLength(usize),

    #[error("Parameter '{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Parameter '{name}' must be a finite number")]
    NonFinite { name: &'static str },

    #[error("The proposal retry budget must allow at least one attempt")]
    ZeroProposalBudget,

    #[error("Unknown energy evaluation mode '{0}' (expected 'full' or 'incremental')")]
    UnknownEnergyEvaluation(String),
}

/// How the engine obtains the energy of a candidate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyEvaluation {
    /// Recompute every non-bonded pair.
    #[default]
    Full,
    /// Re-sum only the pairs that straddle the perturbed joint.
    Incremental,
}

impl fmt::Display for EnergyEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Incremental => f.write_str("incremental"),
        }
    }
}

impl FromStr for EnergyEvaluation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "incremental" => Ok(Self::Incremental),
            other => Err(ConfigError::UnknownEnergyEvaluation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub length: usize,
    pub bond_length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub step_count: usize,
    pub seed: Option<u64>,
    pub max_proposal_attempts: usize,
    pub energy_evaluation: EnergyEvaluation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub chain: ChainConfig,
    pub potential: PotentialParams,
    pub sampling: SamplingConfig,
}

impl SimulationConfig {
    /// Fixed anchor of residue 0.
    pub fn origin(&self) -> Point3<f64> {
        Point3::origin()
    }

    /// A 15-residue chain at unit bond length and unit temperature, run for 200 steps
    /// with the reference potential.
    pub fn reference() -> Self {
        Self {
            chain: ChainConfig {
                length: 15,
                bond_length: 1.0,
            },
            potential: PotentialParams::REFERENCE,
            sampling: SamplingConfig {
                temperature: 1.0,
                step_count: 200,
                seed: None,
                max_proposal_attempts: DEFAULT_MAX_PROPOSAL_ATTEMPTS,
                energy_evaluation: EnergyEvaluation::Full,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.length < MIN_CHAIN_LENGTH {
            return Err(ConfigError::InvalidChainLength(self.chain.length));
        }
        require_positive("bond_length", self.chain.bond_length)?;
        require_positive("temperature", self.sampling.temperature)?;
        require_positive("potential_radius", self.potential.radius)?;
        require_positive("potential_m", self.potential.m)?;
        if !self.potential.n.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "potential_n",
            });
        }
        if self.sampling.max_proposal_attempts == 0 {
            return Err(ConfigError::ZeroProposalBudget);
        }
        Ok(())
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

/// Builder for [`SimulationConfig`].
///
/// Chain length, bond length, temperature and step count are required. The potential
/// defaults to [`PotentialParams::REFERENCE`], the proposal budget to
/// [`DEFAULT_MAX_PROPOSAL_ATTEMPTS`] and the energy evaluation to
/// [`EnergyEvaluation::Full`]. [`build`](Self::build) validates the result.
#[derive(Default)]
pub struct SimulationConfigBuilder {
    chain_length: Option<usize>,
    bond_length: Option<f64>,
    temperature: Option<f64>,
    step_count: Option<usize>,
    potential: Option<PotentialParams>,
    seed: Option<u64>,
    max_proposal_attempts: Option<usize>,
    energy_evaluation: Option<EnergyEvaluation>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_length(mut self, length: usize) -> Self {
        self.chain_length = Some(length);
        self
    }
    pub fn bond_length(mut self, length: f64) -> Self {
        self.bond_length = Some(length);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn step_count(mut self, steps: usize) -> Self {
        self.step_count = Some(steps);
        self
    }
    pub fn potential(mut self, params: PotentialParams) -> Self {
        self.potential = Some(params);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn max_proposal_attempts(mut self, attempts: usize) -> Self {
        self.max_proposal_attempts = Some(attempts);
        self
    }
    pub fn energy_evaluation(mut self, mode: EnergyEvaluation) -> Self {
        self.energy_evaluation = Some(mode);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let chain = ChainConfig {
            length: self
                .chain_length
                .ok_or(ConfigError::MissingParameter("chain_length"))?,
            bond_length: self
                .bond_length
                .ok_or(ConfigError::MissingParameter("bond_length"))?,
        };
        let sampling = SamplingConfig {
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            step_count: self
                .step_count
                .ok_or(ConfigError::MissingParameter("step_count"))?,
            seed: self.seed,
            max_proposal_attempts: self
                .max_proposal_attempts
                .unwrap_or(DEFAULT_MAX_PROPOSAL_ATTEMPTS),
            energy_evaluation: self.energy_evaluation.unwrap_or_default(),
        };
        let config = SimulationConfig {
            chain,
            potential: self.potential.unwrap_or_default(),
            sampling,
        };
        config.validate()?;
        Ok(config)
    }
}
