//! Node - a point in 3D space carrying restraint flags

use serde::{Deserialize, Serialize};

use super::dof::{Dof, DofSet};
use crate::math::Vec3;

/// A 3D node in the structural model
///
/// Active DOFs are not stored here; they are derived from the incident
/// elements each time the model is preprocessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// DOFs held at zero displacement
    #[serde(default)]
    pub restraints: DofSet,
}

impl Node {
    /// Create a new, unrestrained node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            restraints: DofSet::EMPTY,
        }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Position vector
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.position() - self.position()).norm()
    }

    /// Whether a DOF is restrained
    pub fn is_restrained(&self, dof: Dof) -> bool {
        self.restraints.contains(dof)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
