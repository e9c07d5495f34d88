//! # Core Module
//!
//! Stateless building blocks of the chain model.
//!
//! - **Chain Geometry** ([`geometry`]) - spherical-to-Cartesian chain construction and
//!   angle utilities
//! - **Pair Potential** ([`potentials`]) - the exponential repulsive/attractive pair term
//! - **Chain Energy** ([`energy`]) - whole-chain sums excluding bonded neighbours
//! - **Chain Models** ([`models`]) - the angle state of a chain
//! - **Output Formats** ([`io`]) - CSV and XYZ writers for downstream tooling

pub mod energy;
pub mod geometry;
pub mod io;
pub mod models;
pub mod potentials;
