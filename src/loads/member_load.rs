//! Loads applied along a member

use serde::{Deserialize, Serialize};

use super::fixed_end::LocalLoad;
use crate::error::{MsaError, MsaResult};
use crate::math::{LocalAxes, Vec3};

/// Direction of a member load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadDirection {
    /// Member's local x direction (axial)
    Fx,
    /// Member's local y direction
    Fy,
    /// Member's local z direction
    Fz,
    /// Global X direction
    FX,
    /// Global Y direction
    FY,
    /// Global Z direction
    FZ,
}

impl LoadDirection {
    /// Check if this is a local coordinate direction
    pub fn is_local(&self) -> bool {
        matches!(self, LoadDirection::Fx | LoadDirection::Fy | LoadDirection::Fz)
    }

    /// Unit vector in the direction's own frame
    fn unit(&self) -> Vec3 {
        match self {
            LoadDirection::Fx | LoadDirection::FX => Vec3::x(),
            LoadDirection::Fy | LoadDirection::FY => Vec3::y(),
            LoadDirection::Fz | LoadDirection::FZ => Vec3::z(),
        }
    }

    /// Local components of a magnitude in this direction
    fn to_local(self, magnitude: f64, axes: &LocalAxes) -> Vec3 {
        let v = self.unit() * magnitude;
        if self.is_local() {
            v
        } else {
            axes.to_local(&v)
        }
    }
}

/// A load carried by a member between its end nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberLoad {
    /// Uniform line load over the full length
    Uniform {
        w: f64,
        direction: LoadDirection,
        case: String,
    },
    /// Concentrated force at distance `a` from the i-node
    Point {
        p: f64,
        a: f64,
        direction: LoadDirection,
        case: String,
    },
    /// Gravity (global -Y) load of unit weight × area, scaled by `factor`
    SelfWeight { factor: f64, case: String },
}

impl MemberLoad {
    /// Uniform load over the full member length
    pub fn uniform(w: f64, direction: LoadDirection, case: &str) -> Self {
        MemberLoad::Uniform {
            w,
            direction,
            case: case.to_string(),
        }
    }

    /// Point load at distance `a` from the i-node
    pub fn point(p: f64, a: f64, direction: LoadDirection, case: &str) -> Self {
        MemberLoad::Point {
            p,
            a,
            direction,
            case: case.to_string(),
        }
    }

    /// Self-weight from the material unit weight
    pub fn self_weight(factor: f64, case: &str) -> Self {
        MemberLoad::SelfWeight {
            factor,
            case: case.to_string(),
        }
    }

    /// Load case name
    pub fn case(&self) -> &str {
        match self {
            MemberLoad::Uniform { case, .. }
            | MemberLoad::Point { case, .. }
            | MemberLoad::SelfWeight { case, .. } => case,
        }
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        let mut load = self.clone();
        match &mut load {
            MemberLoad::Uniform { w, .. } => *w *= factor,
            MemberLoad::Point { p, .. } => *p *= factor,
            MemberLoad::SelfWeight { factor: f, .. } => *f *= factor,
        }
        load
    }

    /// Express the load in local components for an element of the given
    /// geometry and properties
    ///
    /// `weight_per_length` is unit weight × area and only matters for
    /// self-weight.
    pub fn resolve(
        &self,
        element: &str,
        axes: &LocalAxes,
        length: f64,
        weight_per_length: f64,
    ) -> MsaResult<LocalLoad> {
        match self {
            MemberLoad::Uniform { w, direction, .. } => Ok(LocalLoad::Uniform {
                w: direction.to_local(*w, axes),
            }),
            MemberLoad::Point { p, a, direction, .. } => {
                if !(0.0..=length).contains(a) {
                    return Err(MsaError::InvalidLoad {
                        element: element.to_string(),
                        reason: format!("point load position {a} is outside [0, {length}]"),
                    });
                }
                Ok(LocalLoad::Point {
                    p: direction.to_local(*p, axes),
                    a: *a,
                })
            }
            MemberLoad::SelfWeight { factor, .. } => {
                let gravity = Vec3::new(0.0, -weight_per_length * factor, 0.0);
                Ok(LocalLoad::Uniform {
                    w: axes.to_local(&gravity),
                })
            }
        }
    }
}
