//! Node loads - forces and moments applied directly to nodal DOFs

use serde::{Deserialize, Serialize};

use crate::elements::Dof;

/// A scalar load on one global DOF of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Global DOF the load acts on
    pub dof: Dof,
    /// Force or moment magnitude
    pub magnitude: f64,
    /// Load case this load belongs to
    pub case: String,
}

impl NodeLoad {
    pub fn new(dof: Dof, magnitude: f64, case: &str) -> Self {
        Self {
            dof,
            magnitude,
            case: case.to_string(),
        }
    }

    /// Create a load in X direction
    pub fn fx(value: f64, case: &str) -> Self {
        Self::new(Dof::UX, value, case)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64, case: &str) -> Self {
        Self::new(Dof::UY, value, case)
    }

    /// Create a load in Z direction
    pub fn fz(value: f64, case: &str) -> Self {
        Self::new(Dof::UZ, value, case)
    }

    /// Moment about X
    pub fn mx(value: f64, case: &str) -> Self {
        Self::new(Dof::RX, value, case)
    }

    /// Moment about Y
    pub fn my(value: f64, case: &str) -> Self {
        Self::new(Dof::RY, value, case)
    }

    /// Moment about Z
    pub fn mz(value: f64, case: &str) -> Self {
        Self::new(Dof::RZ, value, case)
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            ..self.clone()
        }
    }
}
