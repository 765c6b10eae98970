//! Element length, local axes and coordinate transformations

use super::{Mat, Mat3, Vec3};

/// |x·Y| above this switches the reference "up" vector from global Y to global Z
const VERTICAL_TOLERANCE: f64 = 1e-6;

/// Orthonormal element basis
///
/// `x` runs from the i-node to the j-node. For a member that is not
/// vertical, `y` starts as global Y made orthogonal to `x`; for a vertical
/// member it starts as global Z. `z = x × y`. Both are then rolled about `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAxes {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl LocalAxes {
    /// Direction cosine matrix with (x, y, z) as rows
    pub fn rotation(&self) -> Mat3 {
        Mat3::from_rows(&[self.x.transpose(), self.y.transpose(), self.z.transpose()])
    }

    /// Components of a global vector along the local axes
    pub fn to_local(&self, v: &Vec3) -> Vec3 {
        Vec3::new(self.x.dot(v), self.y.dot(v), self.z.dot(v))
    }

    /// Global vector from local components
    pub fn to_global(&self, v: &Vec3) -> Vec3 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}

/// Rotate `v` about the unit axis `k` by `angle` (Rodrigues)
pub fn rotate_about(v: &Vec3, k: &Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + k.cross(v) * sin + k * (k.dot(v) * (1.0 - cos))
}

/// Local axes of a line element from i to j with the given roll (radians)
///
/// Returns `None` when the two points coincide.
pub fn local_axes(i: &Vec3, j: &Vec3, roll: f64) -> Option<LocalAxes> {
    let span = j - i;
    let length = span.norm();
    if length <= 0.0 || !length.is_finite() {
        return None;
    }
    let x = span / length;

    let up = if (x.dot(&Vec3::y()).abs() - 1.0).abs() < VERTICAL_TOLERANCE {
        Vec3::z()
    } else {
        Vec3::y()
    };

    let y0 = (up - x * up.dot(&x)).normalize();
    let z0 = x.cross(&y0);

    if roll == 0.0 {
        return Some(LocalAxes { x, y: y0, z: z0 });
    }

    Some(LocalAxes {
        x,
        y: rotate_about(&y0, &x, roll),
        z: rotate_about(&z0, &x, roll),
    })
}

/// Transformation between local and global element quantities
///
/// The full 12×12 form is block-diagonal with four copies of `r`; this
/// returns its rows and columns at `indices` (end × 6 + dof), which is the
/// transform for an element that only carries those DOFs.
pub fn transformation_matrix(r: &Mat3, indices: &[usize]) -> Mat {
    let n = indices.len();
    let mut t = Mat::zeros(n, n);
    for (row, &gi) in indices.iter().enumerate() {
        for (col, &gj) in indices.iter().enumerate() {
            if gi / 3 == gj / 3 {
                t[(row, col)] = r[(gi % 3, gj % 3)];
            }
        }
    }
    t
}
