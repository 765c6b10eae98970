//! Support conditions

use serde::{Deserialize, Serialize};

use super::dof::{Dof, DofSet};

/// Restraint pattern applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Support {
    restrained: DofSet,
}

impl Support {
    /// Create a new support with no restraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self {
            restrained: DofSet::ALL,
        }
    }

    /// Create a pinned support (translations restrained, rotations free)
    pub fn pinned() -> Self {
        Self {
            restrained: DofSet::TRANSLATIONS,
        }
    }

    /// Roller restraining Y translation only
    pub fn roller_y() -> Self {
        Self::from_dofs(&[Dof::UY])
    }

    /// Roller restraining X translation only
    pub fn roller_x() -> Self {
        Self::from_dofs(&[Dof::UX])
    }

    /// Roller restraining Z translation only
    pub fn roller_z() -> Self {
        Self::from_dofs(&[Dof::UZ])
    }

    /// Create a support restraining the listed DOFs
    pub fn from_dofs(dofs: &[Dof]) -> Self {
        Self {
            restrained: DofSet::from_dofs(dofs),
        }
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, dz: bool, rx: bool, ry: bool, rz: bool) -> Self {
        Self {
            restrained: DofSet::from_flags([dx, dy, dz, rx, ry, rz]),
        }
    }

    /// Additionally restrain one DOF
    pub fn and(mut self, dof: Dof) -> Self {
        self.restrained.insert(dof);
        self
    }

    pub fn is_restrained(&self, dof: Dof) -> bool {
        self.restrained.contains(dof)
    }

    pub fn as_dof_set(&self) -> DofSet {
        self.restrained
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restrained.len()
    }
}
