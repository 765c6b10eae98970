//! Global DOF numbering

use crate::elements::{Dof, DofSet};

/// Dense global numbering of the active DOFs of every node
///
/// Numbering runs node by node in model order and by increasing DOF index
/// within a node. A node only owns the DOFs some incident element carries.
#[derive(Debug, Clone, Default)]
pub struct DofRegistry {
    active: Vec<DofSet>,
    offsets: Vec<usize>,
    owners: Vec<(usize, Dof)>,
    restrained_flags: Vec<bool>,
    free: Vec<usize>,
    restrained: Vec<usize>,
}

impl DofRegistry {
    /// Number the DOFs given each node's active set and restraint set
    pub fn new(active: Vec<DofSet>, restraints: &[DofSet]) -> Self {
        let mut offsets = Vec::with_capacity(active.len());
        let mut owners = Vec::new();
        let mut restrained_flags = Vec::new();
        let mut free = Vec::new();
        let mut restrained = Vec::new();

        for (node, set) in active.iter().enumerate() {
            offsets.push(owners.len());
            let fixed = restraints.get(node).copied().unwrap_or_default();
            for dof in set.iter() {
                let global = owners.len();
                owners.push((node, dof));
                let is_fixed = fixed.contains(dof);
                restrained_flags.push(is_fixed);
                if is_fixed {
                    restrained.push(global);
                } else {
                    free.push(global);
                }
            }
        }

        Self {
            active,
            offsets,
            owners,
            restrained_flags,
            free,
            restrained,
        }
    }

    /// Total number of active DOFs
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Active DOFs at a node
    pub fn active(&self, node: usize) -> DofSet {
        self.active.get(node).copied().unwrap_or_default()
    }

    /// Global index of a node DOF, `None` if no element carries it
    pub fn index(&self, node: usize, dof: Dof) -> Option<usize> {
        let position = self.active(node).position(dof)?;
        Some(self.offsets[node] + position)
    }

    /// Node and DOF that own a global index
    pub fn owner(&self, global: usize) -> (usize, Dof) {
        self.owners[global]
    }

    pub fn is_restrained(&self, global: usize) -> bool {
        self.restrained_flags[global]
    }

    /// Free global indices in increasing order
    pub fn free(&self) -> &[usize] {
        &self.free
    }

    /// Restrained global indices in increasing order
    pub fn restrained(&self) -> &[usize] {
        &self.restrained
    }

    /// Global indices for an element connecting two nodes with the given DOFs
    ///
    /// Order matches the element's local layout: i-end DOFs then j-end DOFs.
    pub fn element_indices(&self, i_node: usize, j_node: usize, dofs: DofSet) -> Option<Vec<usize>> {
        [i_node, j_node]
            .iter()
            .flat_map(|&node| dofs.iter().map(move |dof| self.index(node, dof)))
            .collect()
    }
}
