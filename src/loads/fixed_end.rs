//! Fixed-end forces and span contributions of member loads in local axes
//!
//! Fixed-end forces are the end reactions of the fully fixed member, laid out
//! as [ux, uy, uz, rx, ry, rz] at i followed by j. They are added to
//! `k · d` during recovery and subtracted from the global load vector during
//! assembly.
//!
//! The span contributions are the terms each load adds to the internal force
//! functions at position `x` from the i-node:
//!
//! * `Nx(x) = -(Nx_i + Σ axial(x))`
//! * `Vy(x) = Vy_i + Σ shear_y(x)`, `Vz(x) = Vz_i + Σ shear_z(x)`
//! * `Mz(x) = -(Mz_i - Vy_i·x - Σ moment_z(x))`
//! * `My(x) = My_i + Vz_i·x + Σ moment_y(x)`

use serde::{Deserialize, Serialize};

use crate::math::{Vec, Vec3};

/// A member load resolved into local components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LocalLoad {
    /// Force per unit length along local (x, y, z)
    Uniform { w: Vec3 },
    /// Force along local (x, y, z) at distance `a` from the i-node
    Point { p: Vec3, a: f64 },
}

impl LocalLoad {
    /// Local load components
    pub fn components(&self) -> Vec3 {
        match self {
            LocalLoad::Uniform { w } => *w,
            LocalLoad::Point { p, .. } => *p,
        }
    }

    /// Total force carried by the load in local axes
    pub fn resultant(&self, length: f64) -> Vec3 {
        match self {
            LocalLoad::Uniform { w } => w * length,
            LocalLoad::Point { p, .. } => *p,
        }
    }

    /// Distance from the i-node to the line of action of the resultant
    pub fn centroid(&self, length: f64) -> f64 {
        match self {
            LocalLoad::Uniform { .. } => length / 2.0,
            LocalLoad::Point { a, .. } => *a,
        }
    }

    /// Fixed-end forces in the full 12-entry local layout
    pub fn fixed_end_forces(&self, length: f64) -> Vec {
        let l = length;
        let l2 = l * l;
        let mut fef = Vec::zeros(12);

        match *self {
            LocalLoad::Uniform { w } => {
                fef[0] = -w.x * l / 2.0;
                fef[6] = -w.x * l / 2.0;

                fef[1] = -w.y * l / 2.0;
                fef[5] = -w.y * l2 / 12.0;
                fef[7] = -w.y * l / 2.0;
                fef[11] = w.y * l2 / 12.0;

                fef[2] = -w.z * l / 2.0;
                fef[4] = w.z * l2 / 12.0;
                fef[8] = -w.z * l / 2.0;
                fef[10] = -w.z * l2 / 12.0;
            }
            LocalLoad::Point { p, a } => {
                let b = l - a;
                let l3 = l2 * l;
                let shear_i = b * b * (3.0 * a + b) / l3;
                let shear_j = a * a * (a + 3.0 * b) / l3;
                let moment_i = a * b * b / l2;
                let moment_j = a * a * b / l2;

                fef[0] = -p.x * b / l;
                fef[6] = -p.x * a / l;

                fef[1] = -p.y * shear_i;
                fef[5] = -p.y * moment_i;
                fef[7] = -p.y * shear_j;
                fef[11] = p.y * moment_j;

                fef[2] = -p.z * shear_i;
                fef[4] = p.z * moment_i;
                fef[8] = -p.z * shear_j;
                fef[10] = -p.z * moment_j;
            }
        }

        fef
    }

    /// Axial force accumulated between the i-node and `x`
    pub fn axial(&self, x: f64) -> f64 {
        match self {
            LocalLoad::Uniform { w } => w.x * x,
            LocalLoad::Point { p, a } => step(x, *a, p.x),
        }
    }

    /// Local-y force accumulated between the i-node and `x`
    pub fn shear_y(&self, x: f64) -> f64 {
        match self {
            LocalLoad::Uniform { w } => w.y * x,
            LocalLoad::Point { p, a } => step(x, *a, p.y),
        }
    }

    /// Local-z force accumulated between the i-node and `x`
    pub fn shear_z(&self, x: f64) -> f64 {
        match self {
            LocalLoad::Uniform { w } => w.z * x,
            LocalLoad::Point { p, a } => step(x, *a, p.z),
        }
    }

    /// First moment of the local-y load about the section at `x`
    pub fn moment_z(&self, x: f64) -> f64 {
        match self {
            LocalLoad::Uniform { w } => 0.5 * w.y * x * x,
            LocalLoad::Point { p, a } => step(x, *a, p.y * (x - a)),
        }
    }

    /// First moment of the local-z load about the section at `x`
    pub fn moment_y(&self, x: f64) -> f64 {
        match self {
            LocalLoad::Uniform { w } => 0.5 * w.z * x * x,
            LocalLoad::Point { p, a } => step(x, *a, p.z * (x - a)),
        }
    }
}

/// `value` past the load position, zero up to and including it
fn step(x: f64, a: f64, value: f64) -> f64 {
    if x > a {
        value
    } else {
        0.0
    }
}
