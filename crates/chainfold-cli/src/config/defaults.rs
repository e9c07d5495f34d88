use chainfold::core::potentials::PotentialParams;
use chainfold::engine::config::{DEFAULT_MAX_PROPOSAL_ATTEMPTS, EnergyEvaluation};

pub struct DefaultsConfig {
    pub chain_length: usize,
    pub bond_length: f64,
    pub potential: PotentialParams,
    pub temperature: f64,
    pub steps: usize,
    pub max_proposal_attempts: usize,
    pub energy_evaluation: EnergyEvaluation,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chain_length: 15,
            bond_length: 1.0,
            potential: PotentialParams::REFERENCE,
            temperature: 1.0,
            steps: 200,
            max_proposal_attempts: DEFAULT_MAX_PROPOSAL_ATTEMPTS,
            energy_evaluation: EnergyEvaluation::Full,
        }
    }
}
