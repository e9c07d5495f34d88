use crate::core::models::chain::{AnglePair, ChainState};
use serde::Serialize;

/// Upper bound on the number of steps [`Trajectory::with_capacity`] reserves up front.
pub const MAX_RESERVED_STEPS: usize = 1 << 20;

/// The Markov chain state: chain angles together with their cached energy.
///
/// `energy` always equals the chain energy of `chain` for states produced by the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    pub chain: ChainState,
    pub energy: f64,
}

/// Result of a single Metropolis step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The state after the step: the candidate if accepted, otherwise the previous state.
    pub state: SimulationState,
    pub index: usize,
    pub proposal: AnglePair,
    pub proposed_energy: f64,
    pub accepted: bool,
    /// Number of proposer draws spent on this step.
    pub attempts: usize,
}

impl StepOutcome {
    pub fn is_downhill(&self, previous_energy: f64) -> bool {
        self.accepted && self.proposed_energy <= previous_energy
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AcceptanceStats {
    pub accepted: usize,
    pub rejected: usize,
    /// Accepted moves that did not raise the energy.
    pub downhill: usize,
    pub proposal_attempts: usize,
}

impl AcceptanceStats {
    pub fn steps(&self) -> usize {
        self.accepted + self.rejected
    }

    pub fn acceptance_ratio(&self) -> f64 {
        match self.steps() {
            0 => 0.0,
            n => self.accepted as f64 / n as f64,
        }
    }

    pub fn record(&mut self, outcome: &StepOutcome, previous_energy: f64) {
        if outcome.accepted {
            self.accepted += 1;
            if outcome.is_downhill(previous_energy) {
                self.downhill += 1;
            }
        } else {
            self.rejected += 1;
        }
        self.proposal_attempts += outcome.attempts;
    }
}

/// Per-step energy record of a run, with the running minimum and a snapshot of the
/// lowest-energy state seen so far.
#[derive(Debug, Clone)]
pub struct Trajectory {
    energies: Vec<f64>,
    best_energies: Vec<f64>,
    best_state: SimulationState,
}

impl Trajectory {
    /// Starts a trajectory whose best state is `initial`.
    pub fn new(initial: &SimulationState) -> Self {
        Self::with_capacity(initial, 0)
    }

    /// Like [`new`](Self::new), reserving room for `steps` records up to
    /// [`MAX_RESERVED_STEPS`]. Longer runs grow the buffers as they go.
    pub fn with_capacity(initial: &SimulationState, steps: usize) -> Self {
        let reserved = steps.min(MAX_RESERVED_STEPS);
        Self {
            energies: Vec::with_capacity(reserved),
            best_energies: Vec::with_capacity(reserved),
            best_state: initial.clone(),
        }
    }

    pub fn record(&mut self, state: &SimulationState) {
        if state.energy < self.best_state.energy {
            self.best_state = state.clone();
        }
        self.energies.push(state.energy);
        self.best_energies.push(self.best_state.energy);
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn best_energies(&self) -> &[f64] {
        &self.best_energies
    }

    pub fn best_state(&self) -> &SimulationState {
        &self.best_state
    }

    pub fn best_energy(&self) -> f64 {
        self.best_state.energy
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}
