//! Degree-of-freedom labels and per-node capability sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six nodal degrees of freedom
///
/// The same index is used for local element quantities (ux..rz, or
/// Nx, Vy, Vz, Tx, My, Mz for end forces) and for global nodal quantities
/// (UX..RZ, or FX..MZ for reactions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dof {
    UX = 0,
    UY = 1,
    UZ = 2,
    RX = 3,
    RY = 4,
    RZ = 5,
}

impl Dof {
    /// All six DOFs in index order
    pub const ALL: [Dof; 6] = [Dof::UX, Dof::UY, Dof::UZ, Dof::RX, Dof::RY, Dof::RZ];

    /// Index 0..6
    pub fn index(self) -> usize {
        self as usize
    }

    /// DOF from index 0..6
    pub fn from_index(index: usize) -> Option<Dof> {
        Self::ALL.get(index).copied()
    }

    /// Whether this is a translational DOF
    pub fn is_translation(self) -> bool {
        self.index() < 3
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dof::UX => "UX",
            Dof::UY => "UY",
            Dof::UZ => "UZ",
            Dof::RX => "RX",
            Dof::RY => "RY",
            Dof::RZ => "RZ",
        };
        f.write_str(name)
    }
}

/// Element end selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    /// Start node
    I,
    /// End node
    J,
}

impl End {
    pub fn index(self) -> usize {
        match self {
            End::I => 0,
            End::J => 1,
        }
    }
}

/// Small bitset of active DOFs at a node or element end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DofSet(u8);

impl DofSet {
    /// No DOFs
    pub const EMPTY: DofSet = DofSet(0);
    /// Translations only (truss)
    pub const TRANSLATIONS: DofSet = DofSet(0b000111);
    /// Transverse translations and bending rotations (beam)
    pub const BENDING: DofSet = DofSet(0b110110);
    /// All six DOFs (frame)
    pub const ALL: DofSet = DofSet(0b111111);

    /// Build a set from a list of DOFs
    pub fn from_dofs(dofs: &[Dof]) -> Self {
        dofs.iter().fold(Self::EMPTY, |set, &dof| set.with(dof))
    }

    /// Build a set from a restraint-style flag array
    pub fn from_flags(flags: [bool; 6]) -> Self {
        let mut set = Self::EMPTY;
        for (dof, flag) in Dof::ALL.iter().zip(flags) {
            if flag {
                set.insert(*dof);
            }
        }
        set
    }

    pub fn contains(self, dof: Dof) -> bool {
        self.0 & (1 << dof.index()) != 0
    }

    pub fn insert(&mut self, dof: Dof) {
        self.0 |= 1 << dof.index();
    }

    pub fn with(mut self, dof: Dof) -> Self {
        self.insert(dof);
        self
    }

    pub fn union(self, other: DofSet) -> Self {
        DofSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of active DOFs
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Active DOFs in increasing index order
    pub fn iter(self) -> impl Iterator<Item = Dof> {
        Dof::ALL.into_iter().filter(move |dof| self.contains(*dof))
    }

    /// Position of `dof` within the set's ordering, if present
    pub fn position(self, dof: Dof) -> Option<usize> {
        if !self.contains(dof) {
            return None;
        }
        let below = self.0 & ((1u8 << dof.index()) - 1);
        Some(below.count_ones() as usize)
    }

    /// Flag array [UX, UY, UZ, RX, RY, RZ]
    pub fn as_flags(self) -> [bool; 6] {
        Dof::ALL.map(|dof| self.contains(dof))
    }
}

impl fmt::Display for DofSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|dof| dof.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
