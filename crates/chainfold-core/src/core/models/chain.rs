use crate::core::geometry::{positions, reduce_angle};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Spherical direction of one bond, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnglePair {
    pub zenith: f64,
    pub azimuth: f64,
}

impl AnglePair {
    pub fn new(zenith: f64, azimuth: f64) -> Self {
        Self { zenith, azimuth }
    }

    /// Returns the pair with both angles wrapped into `(-π, π]`.
    pub fn reduced(self) -> Self {
        Self {
            zenith: reduce_angle(self.zenith),
            azimuth: reduce_angle(self.azimuth),
        }
    }
}

/// Angle state of a chain of residues.
///
/// The pair stored at index `i` is the direction of the bond from residue `i` to
/// residue `i + 1`; the pair at the last index does not affect the geometry. Updates
/// never happen in place: [`ChainState::with_angle_pair`] returns a new state and
/// leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainState {
    zenith: Vec<f64>,
    azimuth: Vec<f64>,
}

impl ChainState {
    /// A chain of `length` residues with every angle zero, lying along +x.
    pub fn straight(length: usize) -> Self {
        Self {
            zenith: vec![0.0; length],
            azimuth: vec![0.0; length],
        }
    }

    /// Builds a chain from explicit angle lists, reducing every angle into `(-π, π]`.
    ///
    /// Returns `None` if the two lists differ in length.
    pub fn from_angles(zenith: Vec<f64>, azimuth: Vec<f64>) -> Option<Self> {
        if zenith.len() != azimuth.len() {
            return None;
        }
        Some(Self {
            zenith: zenith.into_iter().map(reduce_angle).collect(),
            azimuth: azimuth.into_iter().map(reduce_angle).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.zenith.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zenith.is_empty()
    }

    pub fn zenith(&self) -> &[f64] {
        &self.zenith
    }

    pub fn azimuth(&self) -> &[f64] {
        &self.azimuth
    }

    pub fn angle_pair(&self, index: usize) -> Option<AnglePair> {
        Some(AnglePair {
            zenith: *self.zenith.get(index)?,
            azimuth: *self.azimuth.get(index)?,
        })
    }

    /// Copy of this chain with the pair at `index` replaced by `pair`.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn with_angle_pair(&self, index: usize, pair: AnglePair) -> Option<Self> {
        if index >= self.len() {
            return None;
        }
        let mut next = self.clone();
        next.zenith[index] = pair.zenith;
        next.azimuth[index] = pair.azimuth;
        Some(next)
    }

    pub fn positions(&self, origin: Point3<f64>, bond_length: f64) -> Vec<Point3<f64>> {
        positions(origin, &self.zenith, &self.azimuth, bond_length)
    }

    pub fn angle_pairs(&self) -> impl Iterator<Item = AnglePair> + '_ {
        self.zenith
            .iter()
            .zip(&self.azimuth)
            .map(|(&zenith, &azimuth)| AnglePair { zenith, azimuth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn straight_chain_has_zero_angles() {
        let chain = ChainState::straight(5);
        assert_eq!(chain.len(), 5);
        assert!(chain.angle_pairs().all(|p| p == AnglePair::default()));
    }

    #[test]
    fn from_angles_rejects_mismatched_lengths() {
        assert!(ChainState::from_angles(vec![0.0; 3], vec![0.0; 2]).is_none());
    }

    #[test]
    fn from_angles_reduces_angles_into_range() {
        let chain = ChainState::from_angles(vec![PI + 0.5, 0.1], vec![-PI, -0.2]).unwrap();
        assert!((chain.zenith()[0] - (-PI + 0.5)).abs() < 1e-12);
        assert_eq!(chain.azimuth()[0], PI);
        assert_eq!(chain.zenith()[1], 0.1);
    }

    #[test]
    fn with_angle_pair_leaves_original_untouched() {
        let chain = ChainState::straight(4);
        let pair = AnglePair::new(0.3, -1.2);
        let updated = chain.with_angle_pair(2, pair).unwrap();

        assert_eq!(updated.angle_pair(2), Some(pair));
        assert_eq!(chain.angle_pair(2), Some(AnglePair::default()));
        assert_eq!(updated.angle_pair(1), chain.angle_pair(1));
    }

    #[test]
    fn with_angle_pair_out_of_range_returns_none() {
        let chain = ChainState::straight(3);
        assert!(chain.with_angle_pair(3, AnglePair::default()).is_none());
        assert!(chain.angle_pair(3).is_none());
    }

    #[test]
    fn positions_of_straight_chain_span_bond_lengths() {
        let pos = ChainState::straight(3).positions(Point3::origin(), 1.0);
        assert_eq!(pos[2], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn reduced_pair_wraps_both_angles() {
        let pair = AnglePair::new(2.0 * PI - 0.1 + PI, -PI - 0.1).reduced();
        assert!(pair.zenith > -PI && pair.zenith <= PI);
        assert!((pair.azimuth - (PI - 0.1)).abs() < 1e-12);
    }
}
