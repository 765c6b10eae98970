//! Pre-solve stability check of the free-free stiffness partition

use log::debug;
use nalgebra::SymmetricEigen;

use super::{AnalysisOptions, DofRegistry};
use crate::error::{MsaError, MsaResult};
use crate::math::Mat;

/// Number of DOFs listed when describing an unstable mode
const MODE_REPORT_LEN: usize = 3;

/// Fail with a stability error if `k_ff` is empty, has an empty row or has
/// a (near-)zero eigenvalue
///
/// `node_names` is indexed by model node order and only used for messages.
pub fn check_stability(
    k_ff: &Mat,
    registry: &DofRegistry,
    node_names: &[String],
    options: &AnalysisOptions,
) -> MsaResult<()> {
    let free = registry.free();
    if free.is_empty() {
        return Err(MsaError::Unstable(
            "model has no free degrees of freedom".to_string(),
        ));
    }

    let describe = |row: usize| {
        let (node, dof) = registry.owner(free[row]);
        let name = node_names.get(node).map(String::as_str).unwrap_or("?");
        format!("node '{name}' {dof}")
    };

    for row in 0..k_ff.nrows() {
        let largest = k_ff.row(row).amax();
        if largest < options.zero_tolerance {
            return Err(MsaError::Unstable(format!(
                "{} has no stiffness connected to it",
                describe(row)
            )));
        }
    }

    if !options.check_stability {
        return Ok(());
    }

    let eigen = SymmetricEigen::new(k_ff.clone());
    let largest = eigen.eigenvalues.amax();
    let tolerance = options
        .eigen_tolerance
        .max(options.relative_eigen_tolerance * largest);

    let (mode, smallest) = eigen
        .eigenvalues
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, value)| {
            if value < best.1 {
                (i, value)
            } else {
                best
            }
        });

    debug!(
        "Stability check: {} free DOFs, eigenvalues in [{smallest:.3e}, {largest:.3e}], tolerance {tolerance:.3e}",
        free.len()
    );

    if smallest < tolerance {
        let shape = eigen.eigenvectors.column(mode);
        let mut rows: Vec<usize> = (0..shape.len()).collect();
        rows.sort_by(|&a, &b| shape[b].abs().total_cmp(&shape[a].abs()));
        let involved: Vec<String> = rows
            .into_iter()
            .take(MODE_REPORT_LEN)
            .map(&describe)
            .collect();
        return Err(MsaError::Unstable(format!(
            "zero-energy mode (eigenvalue {smallest:.3e}) dominated by {}",
            involved.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::DofSet;

    fn free_registry(n_nodes: usize) -> DofRegistry {
        DofRegistry::new(vec![DofSet::TRANSLATIONS; n_nodes], &vec![DofSet::EMPTY; n_nodes])
    }

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("N{i}")).collect()
    }

    #[test]
    fn test_zero_row_names_dof() {
        let registry = free_registry(1);
        let k = Mat::from_diagonal(&crate::math::Vec::from_vec(vec![10.0, 0.0, 5.0]));
        let err = check_stability(&k, &registry, &names(1), &AnalysisOptions::default()).unwrap_err();
        assert!(err.to_string().contains("node 'N1' UY"), "{err}");
    }

    #[test]
    fn test_mechanism_detected_by_eigenvalues() {
        let registry = free_registry(1);
        // No stiffness against motion along (1, -1, 0)
        let k = Mat::from_row_slice(3, 3, &[5.0, 5.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 3.0]);
        let err = check_stability(&k, &registry, &names(1), &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, MsaError::Unstable(_)));
        assert!(err.to_string().contains("zero-energy mode"));
    }

    #[test]
    fn test_no_free_dofs() {
        let registry = DofRegistry::new(vec![DofSet::ALL], &[DofSet::ALL]);
        let k = Mat::zeros(0, 0);
        assert!(check_stability(&k, &registry, &names(1), &AnalysisOptions::default()).is_err());
    }

    #[test]
    fn test_positive_definite_passes() {
        let registry = free_registry(1);
        let k = Mat::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 0.0, 0.0, 0.0, 2.0]);
        assert!(check_stability(&k, &registry, &names(1), &AnalysisOptions::default()).is_ok());
    }
}
