use crate::core::models::chain::ChainState;
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::metropolis::MetropolisEngine;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{AcceptanceStats, SimulationState, Trajectory};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Number of status updates reported over a run.
const STATUS_UPDATES_PER_RUN: usize = 100;

#[derive(Debug, Clone)]
pub struct FoldResult {
    pub initial_energy: f64,
    pub final_state: SimulationState,
    /// Residue positions of `final_state`, in chain order.
    pub positions: Vec<Point3<f64>>,
    pub trajectory: Trajectory,
    pub stats: AcceptanceStats,
}

impl FoldResult {
    pub fn final_energy(&self) -> f64 {
        self.final_state.energy
    }

    pub fn energies(&self) -> &[f64] {
        self.trajectory.energies()
    }
}

/// Runs a complete folding simulation.
///
/// The run is seeded from `config.sampling.seed`
/// when set and from system entropy otherwise.
#[instrument(skip_all, name = "fold_workflow")]
pub fn run(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<FoldResult, EngineError> {
    let mut rng = match config.sampling.seed {
        Some(seed) => {
            debug!(seed, "Seeding random number generator.");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    run_with_rng(config, reporter, &mut rng)
}

/// Runs a complete folding simulation with a caller-supplied random number generator,
/// ignoring `config.sampling.seed`. The configuration is validated before anything runs.
pub fn run_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
    rng: &mut R,
) -> Result<FoldResult, EngineError> {
    config.validate()?;
    let engine = MetropolisEngine::new(config);

    // === Phase 1: Straight initial chain ===
    reporter.report(Progress::PhaseStart {
        name: "Initialization",
    });
    let initial_state = engine.initial_state(ChainState::straight(config.chain.length))?;
    let initial_energy = initial_state.energy;
    info!(
        chain_length = config.chain.length,
        temperature = config.sampling.temperature,
        steps = config.sampling.step_count,
        energy_evaluation = %config.sampling.energy_evaluation,
        initial_energy,
        "Initial straight chain prepared."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Metropolis sampling ===
    let (final_state, trajectory, stats) = sample(&engine, initial_state, reporter, rng)?;

    // === Phase 3: Results ===
    let positions = final_state
        .chain
        .positions(config.origin(), config.chain.bond_length);

    info!(
        final_energy = final_state.energy,
        best_energy = trajectory.best_energy(),
        acceptance_ratio = stats.acceptance_ratio(),
        "Folding simulation complete."
    );
    reporter.report(Progress::Message(format!(
        "Final energy {:.4}, best {:.4}, acceptance {:.1}%",
        final_state.energy,
        trajectory.best_energy(),
        stats.acceptance_ratio() * 100.0
    )));

    Ok(FoldResult {
        initial_energy,
        final_state,
        positions,
        trajectory,
        stats,
    })
}

fn sample<R: Rng + ?Sized>(
    engine: &MetropolisEngine,
    initial_state: SimulationState,
    reporter: &ProgressReporter,
    rng: &mut R,
) -> Result<(SimulationState, Trajectory, AcceptanceStats), EngineError> {
    let steps = engine.config().sampling.step_count;
    let status_interval = (steps / STATUS_UPDATES_PER_RUN).max(1);

    reporter.report(Progress::PhaseStart {
        name: "Metropolis Sampling",
    });
    reporter.report(Progress::TaskStart {
        total_steps: steps as u64,
    });

    let mut trajectory = Trajectory::with_capacity(&initial_state, steps);
    let mut stats = AcceptanceStats::default();
    let mut state = initial_state;

    for step in 0..steps {
        let previous_energy = state.energy;
        let outcome = engine.step(state, rng)?;
        stats.record(&outcome, previous_energy);
        state = outcome.state;
        trajectory.record(&state);

        reporter.report(Progress::TaskIncrement);
        if (step + 1) % status_interval == 0 {
            debug!(
                step = step + 1,
                energy = state.energy,
                best_energy = trajectory.best_energy(),
                "Sampling progress."
            );
            reporter.report(Progress::StatusUpdate {
                text: format!("Step {}/{}, E = {:.4}", step + 1, steps, state.energy),
            });
        }
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok((state, trajectory, stats))
}
