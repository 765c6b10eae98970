//! Mathematical utilities: element stiffness, condensation and dense solvers

pub mod geometry;

use nalgebra::{DMatrix, DVector, Matrix3, Vector3};

pub use geometry::{local_axes, rotate_about, transformation_matrix, LocalAxes};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// Compute the 12×12 local stiffness matrix for a 3D frame element
///
/// Local DOF order is [ux, uy, uz, rx, ry, rz] at i followed by the same at j.
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `g` - Shear modulus
/// * `a` - Cross-sectional area
/// * `iz` - Second moment for bending about local z (strong axis)
/// * `iy` - Second moment for bending about local y (weak axis)
/// * `j` - Torsion constant
/// * `length` - Element length
pub fn frame_local_stiffness(
    e: f64,
    g: f64,
    a: f64,
    iz: f64,
    iy: f64,
    j: f64,
    length: f64,
) -> Mat {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * j / l;

    let z12 = 12.0 * e * iz / l3;
    let z6 = 6.0 * e * iz / l2;
    let z4 = 4.0 * e * iz / l;
    let z2 = 2.0 * e * iz / l;

    let y12 = 12.0 * e * iy / l3;
    let y6 = 6.0 * e * iy / l2;
    let y4 = 4.0 * e * iy / l;
    let y2 = 2.0 * e * iy / l;

    #[rustfmt::skip]
    let data = [
        ea_l,  0.0,   0.0,   0.0,   0.0,  0.0,  -ea_l, 0.0,   0.0,   0.0,   0.0,  0.0,
        0.0,   z12,   0.0,   0.0,   0.0,  z6,   0.0,   -z12,  0.0,   0.0,   0.0,  z6,
        0.0,   0.0,   y12,   0.0,   -y6,  0.0,  0.0,   0.0,   -y12,  0.0,   -y6,  0.0,
        0.0,   0.0,   0.0,   gj_l,  0.0,  0.0,  0.0,   0.0,   0.0,   -gj_l, 0.0,  0.0,
        0.0,   0.0,   -y6,   0.0,   y4,   0.0,  0.0,   0.0,   y6,    0.0,   y2,   0.0,
        0.0,   z6,    0.0,   0.0,   0.0,  z4,   0.0,   -z6,   0.0,   0.0,   0.0,  z2,
        -ea_l, 0.0,   0.0,   0.0,   0.0,  0.0,  ea_l,  0.0,   0.0,   0.0,   0.0,  0.0,
        0.0,   -z12,  0.0,   0.0,   0.0,  -z6,  0.0,   z12,   0.0,   0.0,   0.0,  -z6,
        0.0,   0.0,   -y12,  0.0,   y6,   0.0,  0.0,   0.0,   y12,   0.0,   y6,   0.0,
        0.0,   0.0,   0.0,   -gj_l, 0.0,  0.0,  0.0,   0.0,   0.0,   gj_l,  0.0,  0.0,
        0.0,   0.0,   -y6,   0.0,   y2,   0.0,  0.0,   0.0,   y6,    0.0,   y4,   0.0,
        0.0,   z6,    0.0,   0.0,   0.0,  z2,   0.0,   -z6,   0.0,   0.0,   0.0,  z4,
    ];

    Mat::from_row_slice(12, 12, &data)
}

/// Compute the 6×6 local stiffness matrix for an axial-only element
///
/// Local DOF order is [ux, uy, uz] at i followed by the same at j; only the
/// axial terms are non-zero.
pub fn truss_local_stiffness(e: f64, a: f64, length: f64) -> Mat {
    let k = e * a / length;
    let mut m = Mat::zeros(6, 6);
    m[(0, 0)] = k;
    m[(0, 3)] = -k;
    m[(3, 0)] = -k;
    m[(3, 3)] = k;
    m
}

/// Rows `rows` and columns `cols` of `m`
pub fn submatrix(m: &Mat, rows: &[usize], cols: &[usize]) -> Mat {
    Mat::from_fn(rows.len(), cols.len(), |r, c| m[(rows[r], cols[c])])
}

/// Entries `indices` of `v`
pub fn subvector(v: &Vec, indices: &[usize]) -> Vec {
    Vec::from_fn(indices.len(), |r, _| v[indices[r]])
}

/// Indices `0..n` not contained in `removed`
fn complement(n: usize, removed: &[usize]) -> std::vec::Vec<usize> {
    (0..n).filter(|i| !removed.contains(i)).collect()
}

/// Statically condense `released` DOFs out of a local stiffness matrix
///
/// Returns `k_kk - k_kr · k_rr⁻¹ · k_rk` expanded back to the original size
/// with zero rows and columns at the released positions, or `None` if
/// `k_rr` is singular.
pub fn condense_stiffness(k: &Mat, released: &[usize]) -> Option<Mat> {
    if released.is_empty() {
        return Some(k.clone());
    }
    let n = k.nrows();
    let kept = complement(n, released);

    let k_kk = submatrix(k, &kept, &kept);
    let k_kr = submatrix(k, &kept, released);
    let k_rk = submatrix(k, released, &kept);
    let k_rr_inv = submatrix(k, released, released).try_inverse()?;

    let condensed = k_kk - &k_kr * k_rr_inv * k_rk;

    let mut result = Mat::zeros(n, n);
    for (a, &ka) in kept.iter().enumerate() {
        for (b, &kb) in kept.iter().enumerate() {
            result[(ka, kb)] = condensed[(a, b)];
        }
    }
    Some(result)
}

/// Condense a fixed-end force vector consistently with [`condense_stiffness`]
///
/// Returns `fef_k - k_kr · k_rr⁻¹ · fef_r` with zeros at the released positions.
pub fn condense_fixed_end(fef: &Vec, k: &Mat, released: &[usize]) -> Option<Vec> {
    if released.is_empty() {
        return Some(fef.clone());
    }
    let n = fef.len();
    let kept = complement(n, released);

    let k_kr = submatrix(k, &kept, released);
    let k_rr_inv = submatrix(k, released, released).try_inverse()?;
    let fef_k = subvector(fef, &kept);
    let fef_r = subvector(fef, released);

    let condensed = fef_k - k_kr * k_rr_inv * fef_r;

    let mut result = Vec::zeros(n);
    for (a, &ka) in kept.iter().enumerate() {
        result[ka] = condensed[a];
    }
    Some(result)
}

/// Solve a symmetric system, trying Cholesky first and falling back to LU
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    solve_cholesky(a, b).or_else(|| solve_lu(a, b))
}

/// Solve a linear system using LU decomposition
pub fn solve_lu(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}

/// Solve a linear system using Cholesky decomposition (for symmetric positive definite)
pub fn solve_cholesky(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().cholesky().map(|chol| chol.solve(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_frame() -> Mat {
        frame_local_stiffness(200_000.0, 76_923.0, 1910.0, 12.8e6, 0.87e6, 17.7e3, 5000.0)
    }

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = sample_frame();
        assert_relative_eq!(k.clone(), k.transpose(), epsilon = 1e-9);
    }

    #[test]
    fn test_frame_bending_terms() {
        let (e, iz, l): (f64, f64, f64) = (200_000.0, 12.8e6, 5000.0);
        let k = sample_frame();
        assert_relative_eq!(k[(1, 1)], 12.0 * e * iz / l.powi(3), max_relative = 1e-12);
        assert_relative_eq!(k[(5, 11)], 2.0 * e * iz / l, max_relative = 1e-12);
        assert!(k[(2, 4)] < 0.0);
        assert!(k[(4, 8)] > 0.0);
    }

    #[test]
    fn test_rigid_body_translation_is_stress_free() {
        let k = sample_frame();
        let mut d = Vec::zeros(12);
        for i in [1, 7] {
            d[i] = 3.0;
        }
        assert_relative_eq!((k * d).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_truss_stiffness() {
        let k = truss_local_stiffness(200_000.0, 100.0, 1000.0);
        assert_relative_eq!(k[(0, 0)], 20_000.0);
        assert_relative_eq!(k[(3, 0)], -20_000.0);
        assert_eq!(k[(1, 1)], 0.0);
    }

    #[test]
    fn test_condensation_gives_propped_stiffness() {
        // Releasing rz at j leaves 3EI/L at rz_i
        let (e, iz, l) = (200_000.0, 12.8e6, 5000.0);
        let k = sample_frame();
        let kc = condense_stiffness(&k, &[11]).unwrap();
        assert_relative_eq!(kc[(5, 5)], 3.0 * e * iz / l, max_relative = 1e-10);
        assert_relative_eq!(kc[(1, 1)], 3.0 * e * iz / l.powi(3), max_relative = 1e-10);
        assert_eq!(kc[(11, 11)], 0.0);
        assert_eq!(kc[(5, 11)], 0.0);
    }

    #[test]
    fn test_condense_fixed_end_moments() {
        // Uniform load w: releasing rz_j moves its moment into the i end
        let (w, l) = (-1.0, 5000.0);
        let k = sample_frame();
        let mut fef = Vec::zeros(12);
        fef[1] = -w * l / 2.0;
        fef[5] = -w * l * l / 12.0;
        fef[7] = -w * l / 2.0;
        fef[11] = w * l * l / 12.0;
        let condensed = condense_fixed_end(&fef, &k, &[11]).unwrap();
        assert_relative_eq!(condensed[1], -5.0 * w * l / 8.0, max_relative = 1e-10);
        assert_relative_eq!(condensed[5], -w * l * l / 8.0, max_relative = 1e-10);
        assert_relative_eq!(condensed[7], -3.0 * w * l / 8.0, max_relative = 1e-10);
        assert_eq!(condensed[11], 0.0);
    }

    #[test]
    fn test_singular_release_is_rejected() {
        let k = sample_frame();
        assert!(condense_stiffness(&k, &[0, 6]).is_none());
    }

    #[test]
    fn test_solvers_agree() {
        let a = Mat::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = Vec::from_vec(vec![1.0, 2.0]);
        let x = solve_linear_system(&a, &b).unwrap();
        assert_relative_eq!(&a * &x, b.clone(), epsilon = 1e-12);
        let y = solve_lu(&a, &b).unwrap();
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }
}
