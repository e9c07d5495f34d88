//! # Engine Module
//!
//! The stateful layer that drives the Monte Carlo search over chain conformations.
//!
//! ## Overview
//!
//! A simulation is a Markov chain over angle states. Each step picks one residue,
//! draws a replacement angle pair that keeps both flanking joints bent by more than a
//! right angle, evaluates the chain energy of the candidate and accepts or rejects it
//! with the Metropolis criterion at a fixed temperature.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Immutable simulation parameters and their validation
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Angle Proposals** ([`proposer`]) - Constrained rejection sampling of angle pairs
//! - **Metropolis Steps** ([`metropolis`]) - Single-site accept/reject steps
//! - **State Tracking** ([`state`]) - Markov chain state, trajectory and acceptance statistics
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//!
//! ## Key Capabilities
//!
//! - **Value-typed states** moved between steps, with rejection returning the untouched
//!   previous state
//! - **Bounded proposal retries** with a typed failure when the constraint cannot be met
//! - **Full or incremental energy evaluation**, the latter only re-summing pairs that
//!   straddle the perturbed joint

pub mod config;
pub mod error;
pub mod metropolis;
pub mod progress;
pub mod proposer;
pub mod state;
