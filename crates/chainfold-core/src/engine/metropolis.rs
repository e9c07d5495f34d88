use super::config::{EnergyEvaluation, SimulationConfig};
use super::error::EngineError;
use super::proposer::{ConstrainedProposer, Proposer};
use super::state::{SimulationState, StepOutcome};
use crate::core::energy::{cross_energy, total_energy};
use crate::core::models::chain::{AnglePair, ChainState};
use rand::Rng;
use tracing::{instrument, trace};

/// Metropolis criterion: downhill moves always pass, uphill moves pass with
/// probability `exp(-ΔE / T)`.
///
/// Downhill moves do not consume a random number.
pub fn metropolis_accepts<R: Rng + ?Sized>(
    current_energy: f64,
    new_energy: f64,
    temperature: f64,
    rng: &mut R,
) -> bool {
    if new_energy <= current_energy {
        return true;
    }
    let p = (-(new_energy - current_energy) / temperature).exp();
    rng.r#gen::<f64>() <= p
}

/// Single-site Metropolis engine over chain angle states.
///
/// Each step perturbs the angle pair of one residue. States are moved in and out of
/// [`step`](Self::step) by value; a rejected step hands back the previous state as it
/// was received.
pub struct MetropolisEngine<'a, P = ConstrainedProposer> {
    config: &'a SimulationConfig,
    proposer: P,
}

impl<'a> MetropolisEngine<'a, ConstrainedProposer> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self {
            config,
            proposer: ConstrainedProposer::from_config(&config.sampling),
        }
    }
}

impl<'a, P: Proposer> MetropolisEngine<'a, P> {
    pub fn with_proposer(config: &'a SimulationConfig, proposer: P) -> Self {
        Self { config, proposer }
    }

    pub fn config(&self) -> &SimulationConfig {
        self.config
    }

    pub fn energy_of(&self, chain: &ChainState) -> f64 {
        let positions = chain.positions(self.config.origin(), self.config.chain.bond_length);
        total_energy(&positions, &self.config.potential)
    }

    /// Wraps `chain` into a state with its energy computed from scratch.
    pub fn initial_state(&self, chain: ChainState) -> Result<SimulationState, EngineError> {
        if chain.len() != self.config.chain.length {
            return Err(EngineError::ChainLengthMismatch {
                expected: self.config.chain.length,
                actual: chain.len(),
            });
        }
        let energy = self.energy_of(&chain);
        Ok(SimulationState { chain, energy })
    }

    /// Runs one Metropolis step: picks a residue uniformly, draws a constrained
    /// proposal for it and accepts or rejects the resulting chain.
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: SimulationState,
        rng: &mut R,
    ) -> Result<StepOutcome, EngineError> {
        let length = state.chain.len();
        if length == 0 {
            return Err(EngineError::Internal(
                "Cannot step an empty chain".to_string(),
            ));
        }
        let index = rng.gen_range(0..length);
        let proposal = self.proposer.propose(&state.chain, index, rng)?;

        let mut outcome = self.evaluate(state, index, proposal.pair, rng)?;
        outcome.attempts = proposal.attempts;
        Ok(outcome)
    }

    /// Evaluates an externally supplied proposal for residue `index` and applies the
    /// Metropolis criterion to it.
    ///
    /// The bend constraint is not checked here; that is the proposer's job.
    #[instrument(level = "trace", skip(self, state, rng), fields(current_energy = state.energy))]
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        state: SimulationState,
        index: usize,
        proposal: AnglePair,
        rng: &mut R,
    ) -> Result<StepOutcome, EngineError> {
        let candidate = state
            .chain
            .with_angle_pair(index, proposal)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                length: state.chain.len(),
            })?;

        let new_energy = self.candidate_energy(&state, &candidate, index);
        let accepted = metropolis_accepts(
            state.energy,
            new_energy,
            self.config.sampling.temperature,
            rng,
        );
        trace!(new_energy, accepted, "Proposal evaluated.");

        let next = if accepted {
            SimulationState {
                chain: candidate,
                energy: new_energy,
            }
        } else {
            state
        };

        Ok(StepOutcome {
            state: next,
            index,
            proposal,
            proposed_energy: new_energy,
            accepted,
            attempts: 0,
        })
    }

    fn candidate_energy(
        &self,
        current: &SimulationState,
        candidate: &ChainState,
        index: usize,
    ) -> f64 {
        let origin = self.config.origin();
        let bond_length = self.config.chain.bond_length;
        let params = &self.config.potential;

        match self.config.sampling.energy_evaluation {
            EnergyEvaluation::Full => {
                total_energy(&candidate.positions(origin, bond_length), params)
            }
            EnergyEvaluation::Incremental => {
                let before = current.chain.positions(origin, bond_length);
                let after = candidate.positions(origin, bond_length);
                current.energy - cross_energy(&before, index, params)
                    + cross_energy(&after, index, params)
            }
        }
    }
}
