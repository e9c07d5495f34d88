//! # Workflows Module
//!
//! High-level entry points that run complete simulations.
//!
//! - **Folding Workflow** ([`fold`]) - builds a straight chain, runs a fixed number of
//!   Metropolis steps and returns the final conformation, the energy trajectory and
//!   acceptance statistics.

pub mod fold;
