//! # chainfold Core Library
//!
//! Metropolis Monte Carlo folding of a coarse-grained polymer chain. Each residue is
//! placed by a pair of spherical angles relative to its predecessor, and the search
//! perturbs one angle pair at a time while sampling a Boltzmann ensemble at fixed
//! temperature.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless geometry (`geometry`), the pair potential
//!   (`potentials`, `energy`), the chain state model (`models`) and output formats (`io`).
//!
//! - **[`engine`]: The Logic Core.** Configuration and validation, the constrained angle
//!   proposer, the Metropolis engine, simulation state and progress reporting.
//!
//! - **[`workflows`]: The Public API.** The simulation driver that ties `engine` and `core`
//!   together: build the straight chain, run a fixed number of steps and return the final
//!   conformation together with its energy trajectory.

pub mod core;
pub mod engine;
pub mod workflows;
