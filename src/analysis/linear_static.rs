//! Direct linear solve and recovery of displacements, reactions and end forces

use log::debug;

use super::{DofRegistry, ElementSystem};
use crate::error::{MsaError, MsaResult};
use crate::math::{self, Mat, Vec as MsaVec};

/// Full-length displacement and reaction vectors of one solve
#[derive(Debug, Clone)]
pub struct StaticResponse {
    /// Displacements, zero at restrained DOFs
    pub displacements: MsaVec,
    /// `K · D - F`, zeroed at free DOFs
    pub reactions: MsaVec,
}

/// Solve `K_ff · D_f = F_f` and back-substitute the reactions
pub fn solve(k: &Mat, f: &MsaVec, registry: &DofRegistry) -> MsaResult<StaticResponse> {
    let free = registry.free();
    let k_ff = math::submatrix(k, free, free);
    let f_f = math::subvector(f, free);

    let d_f = math::solve_linear_system(&k_ff, &f_f).ok_or(MsaError::SingularMatrix)?;
    if d_f.iter().any(|value| !value.is_finite()) {
        return Err(MsaError::AnalysisFailed(
            "linear solve produced non-finite displacements".to_string(),
        ));
    }

    let mut displacements = MsaVec::zeros(registry.len());
    for (row, &global) in free.iter().enumerate() {
        displacements[global] = d_f[row];
    }

    let mut reactions = k * &displacements - f;
    for &global in free {
        reactions[global] = 0.0;
    }

    debug!(
        "Solved {} free DOFs, max |D| = {:.6e}",
        free.len(),
        d_f.amax()
    );

    Ok(StaticResponse {
        displacements,
        reactions,
    })
}

/// Element end quantities in the element's own layout
#[derive(Debug, Clone)]
pub struct ElementResponse {
    pub local_displacements: MsaVec,
    pub local_forces: MsaVec,
    pub global_forces: MsaVec,
}

/// Recover local/global end forces of one element: `f = k · T · d + fef`
pub fn recover_element(system: &ElementSystem, displacements: &MsaVec, fef: &MsaVec) -> ElementResponse {
    let d_global = math::subvector(displacements, &system.global_indices);
    let local_displacements = &system.transform * d_global;
    let local_forces = &system.k_local * &local_displacements + fef;
    let global_forces = system.transform.transpose() * &local_forces;

    ElementResponse {
        local_displacements,
        local_forces,
        global_forces,
    }
}
