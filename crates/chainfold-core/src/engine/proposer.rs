use super::config::SamplingConfig;
use super::error::EngineError;
use crate::core::geometry::{random_angle, reduce_angle, relative_angle};
use crate::core::models::chain::{AnglePair, ChainState};
use rand::Rng;
use std::f64::consts::FRAC_PI_2;
use tracing::{instrument, trace};

/// Bend angle every joint must exceed after a proposal.
pub const MIN_BEND_ANGLE: f64 = FRAC_PI_2;

/// A candidate angle pair together with the number of draws it took to find it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proposal {
    pub pair: AnglePair,
    pub attempts: usize,
}

/// Source of candidate angle pairs for the Metropolis engine.
pub trait Proposer {
    fn propose<R: Rng + ?Sized>(
        &self,
        chain: &ChainState,
        index: usize,
        rng: &mut R,
    ) -> Result<Proposal, EngineError>;
}

/// Checks the bend angle at both joints flanking `index` if `candidate` were installed
/// there. A joint with no neighbour on one side passes on that side.
pub fn satisfies_bend_constraint(chain: &ChainState, index: usize, candidate: AnglePair) -> bool {
    let left_ok = match index.checked_sub(1).and_then(|i| chain.angle_pair(i)) {
        Some(prev) => {
            relative_angle(prev.zenith, prev.azimuth, candidate.zenith, candidate.azimuth)
                > MIN_BEND_ANGLE
        }
        None => true,
    };
    if !left_ok {
        return false;
    }

    match chain.angle_pair(index + 1) {
        Some(next) => {
            relative_angle(candidate.zenith, candidate.azimuth, next.zenith, next.azimuth)
                > MIN_BEND_ANGLE
        }
        None => true,
    }
}

/// Rejection sampler that perturbs both angles at a residue by independent uniform
/// offsets until the bend constraint holds at both flanking joints, giving up after
/// `max_attempts` draws.
#[derive(Debug, Clone, Copy)]
pub struct ConstrainedProposer {
    max_attempts: usize,
}

impl ConstrainedProposer {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::new(config.max_proposal_attempts)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[instrument(level = "trace", skip(self, chain, rng))]
    pub fn try_angles<R: Rng + ?Sized>(
        &self,
        chain: &ChainState,
        index: usize,
        rng: &mut R,
    ) -> Result<Proposal, EngineError> {
        let current = chain
            .angle_pair(index)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                length: chain.len(),
            })?;

        for attempt in 1..=self.max_attempts {
            let candidate = AnglePair {
                zenith: reduce_angle(current.zenith + random_angle(rng)),
                azimuth: reduce_angle(current.azimuth + random_angle(rng)),
            };
            if satisfies_bend_constraint(chain, index, candidate) {
                trace!(attempt, "Proposal satisfies the bend constraint.");
                return Ok(Proposal {
                    pair: candidate,
                    attempts: attempt,
                });
            }
        }

        Err(EngineError::ConstraintUnsatisfiable {
            index,
            attempts: self.max_attempts,
        })
    }
}

impl Proposer for ConstrainedProposer {
    fn propose<R: Rng + ?Sized>(
        &self,
        chain: &ChainState,
        index: usize,
        rng: &mut R,
    ) -> Result<Proposal, EngineError> {
        self.try_angles(chain, index, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use std::f64::consts::PI;

    fn folded_chain(length: usize, rng: &mut StdRng) -> ChainState {
        let proposer = ConstrainedProposer::new(10_000);
        let mut chain = ChainState::straight(length);
        for _ in 0..200 {
            let index = rng.gen_range(0..length);
            let proposal = proposer.try_angles(&chain, index, rng).unwrap();
            chain = chain.with_angle_pair(index, proposal.pair).unwrap();
        }
        chain
    }

    #[test]
    fn proposals_satisfy_both_flanking_constraints() {
        let mut rng = StdRng::seed_from_u64(2024);
        let chain = folded_chain(10, &mut rng);
        let proposer = ConstrainedProposer::new(10_000);

        for index in 0..chain.len() {
            for _ in 0..20 {
                let proposal = proposer.try_angles(&chain, index, &mut rng).unwrap();
                let pair = proposal.pair;
                if index > 0 {
                    let prev = chain.angle_pair(index - 1).unwrap();
                    assert!(
                        relative_angle(prev.zenith, prev.azimuth, pair.zenith, pair.azimuth)
                            > MIN_BEND_ANGLE
                    );
                }
                if index + 1 < chain.len() {
                    let next = chain.angle_pair(index + 1).unwrap();
                    assert!(
                        relative_angle(pair.zenith, pair.azimuth, next.zenith, next.azimuth)
                            > MIN_BEND_ANGLE
                    );
                }
                assert!(proposal.attempts >= 1);
            }
        }
    }

    #[test]
    fn proposals_are_reduced_into_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let chain = folded_chain(6, &mut rng);
        let proposer = ConstrainedProposer::new(10_000);
        for _ in 0..200 {
            let index = rng.gen_range(0..chain.len());
            let pair = proposer.try_angles(&chain, index, &mut rng).unwrap().pair;
            assert!(pair.zenith > -PI && pair.zenith <= PI);
            assert!(pair.azimuth > -PI && pair.azimuth <= PI);
        }
    }

    #[test]
    fn accepted_chains_keep_every_joint_bent() {
        let mut rng = StdRng::seed_from_u64(77);
        let chain = folded_chain(8, &mut rng);
        for (index, pair) in chain.angle_pairs().enumerate().skip(1) {
            assert!(satisfies_bend_constraint(&chain, index, pair));
        }
    }

    #[test]
    fn boundary_residues_only_check_their_existing_neighbour() {
        let chain = ChainState::straight(3);
        let backwards = AnglePair::new(0.0, PI);
        assert!(satisfies_bend_constraint(&chain, 0, backwards));
        assert!(satisfies_bend_constraint(&chain, 2, backwards));
        assert!(!satisfies_bend_constraint(&chain, 0, AnglePair::default()));
        assert!(!satisfies_bend_constraint(&chain, 2, AnglePair::default()));
    }

    #[test]
    fn two_residue_chain_proposals_respect_single_joint() {
        let mut rng = StdRng::seed_from_u64(1);
        let chain = ChainState::straight(2);
        let proposer = ConstrainedProposer::new(10_000);
        let proposal = proposer.try_angles(&chain, 1, &mut rng).unwrap();
        assert!(satisfies_bend_constraint(&chain, 1, proposal.pair));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let chain = ChainState::straight(4);
        let result = ConstrainedProposer::new(10).try_angles(&chain, 4, &mut rng);
        assert!(matches!(
            result,
            Err(EngineError::IndexOutOfRange {
                index: 4,
                length: 4
            })
        ));
    }

    #[test]
    fn exhausted_budget_reports_unsatisfiable_constraint() {
        // A constant RNG always draws an offset of -π, which maps the straight-chain
        // direction back onto itself.
        let mut rng = StepRng::new(0, 0);
        let chain = ChainState::straight(3);
        let result = ConstrainedProposer::new(25).try_angles(&chain, 1, &mut rng);
        assert!(matches!(
            result,
            Err(EngineError::ConstraintUnsatisfiable {
                index: 1,
                attempts: 25
            })
        ));
    }

    #[test]
    fn propose_delegates_to_try_angles() {
        let chain = ChainState::straight(5);
        let proposer = ConstrainedProposer::new(10_000);
        let a = proposer
            .propose(&chain, 2, &mut StdRng::seed_from_u64(4))
            .unwrap();
        let b = proposer
            .try_angles(&chain, 2, &mut StdRng::seed_from_u64(4))
            .unwrap();
        assert_eq!(a, b);
    }
}
