use serde::{Deserialize, Serialize};

/// Shape parameters of the exponential pair potential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialParams {
    /// Repulsive length scale, in units of bond length.
    pub radius: f64,
    /// Ratio between the attractive and repulsive length scales.
    pub m: f64,
    /// Strength of the repulsive term relative to the attractive one.
    pub n: f64,
}

impl PotentialParams {
    pub const REFERENCE: Self = Self {
        radius: 0.2,
        m: 25.0,
        n: 8.0,
    };
}

impl Default for PotentialParams {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Repulsive-minus-attractive exponential pair potential,
/// `n·exp(-r/ρ) - exp(-r/(ρ·m))`.
///
/// Finite for every distance, so no short-range guard is applied.
#[inline]
pub fn potential(dist: f64, m: f64, n: f64, radius: f64) -> f64 {
    n * (-dist / radius).exp() - (-dist / (radius * m)).exp()
}

#[inline]
pub fn pair_energy(dist: f64, params: &PotentialParams) -> f64 {
    potential(dist, params.m, params.n, params.radius)
}
