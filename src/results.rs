//! Result types for structural analysis

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::elements::{Dof, DofSet, ElementKind, End};
use crate::error::{MsaError, MsaResult};
use crate::loads::LocalLoad;

/// Relative slack allowed on span positions at the element ends
const SPAN_TOLERANCE: f64 = 1e-9;

/// Non-fatal condition found while solving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalysisWarning {
    /// A nodal load was applied to a restrained DOF; it goes straight into the reaction
    LoadOnRestrainedDof {
        node: String,
        dof: Dof,
        case: String,
        magnitude: f64,
    },
    /// Reactions and applied loads do not balance within tolerance
    StaticsResidual { force: [f64; 3], moment: [f64; 3] },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::LoadOnRestrainedDof {
                node,
                dof,
                case,
                magnitude,
            } => write!(
                f,
                "load {magnitude} in case '{case}' is applied to restrained DOF {dof} of node '{node}'"
            ),
            AnalysisWarning::StaticsResidual { force, moment } => write!(
                f,
                "global balance residual: force [{:.3e}, {:.3e}, {:.3e}], moment [{:.3e}, {:.3e}, {:.3e}]",
                force[0], force[1], force[2], moment[0], moment[1], moment[2]
            ),
        }
    }
}

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// Internal forces at a section of a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear_y: f64,
    /// Shear force in local z direction
    pub shear_z: f64,
    /// Torsion
    pub torsion: f64,
    /// Bending moment about local y axis
    pub moment_y: f64,
    /// Bending moment about local z axis
    pub moment_z: f64,
}

/// Per-node results of one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResults {
    /// DOFs that exist at this node
    pub active: DofSet,
    /// [DX, DY, DZ, RX, RY, RZ], zero where inactive
    pub displacement: [f64; 6],
    /// [FX, FY, FZ, MX, MY, MZ], zero where free or inactive
    pub reaction: [f64; 6],
}

impl NodeResults {
    /// Displacement at a DOF, `None` if the node has no such DOF
    pub fn displacement_at(&self, dof: Dof) -> Option<f64> {
        self.active
            .contains(dof)
            .then(|| self.displacement[dof.index()])
    }

    /// Reaction at a DOF, `None` if the node has no such DOF
    pub fn reaction_at(&self, dof: Dof) -> Option<f64> {
        self.active.contains(dof).then(|| self.reaction[dof.index()])
    }
}

/// Per-element results of one solve
///
/// End quantities use the 12-entry layout [ux, uy, uz, rx, ry, rz] at i then
/// j, with zeros at DOFs the element does not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementResults {
    pub kind: ElementKind,
    /// DOFs carried at each end
    pub dofs: DofSet,
    pub length: f64,
    pub area: f64,
    /// Strong-axis second moment (bending about local z)
    pub ixx: f64,
    /// Weak-axis second moment (bending about local y)
    pub iyy: f64,
    pub sx: Option<f64>,
    pub sy: Option<f64>,
    /// End displacements in local axes
    pub local_displacements: [f64; 12],
    /// End forces in local axes, `k · d + fef`
    pub local_forces: [f64; 12],
    /// End forces in global axes
    pub global_forces: [f64; 12],
    /// Member loads in local components
    pub loads: Vec<LocalLoad>,
}

impl ElementResults {
    /// Local end force component
    pub fn local_end_force(&self, end: End, dof: Dof) -> f64 {
        self.local_forces[end.index() * 6 + dof.index()]
    }

    /// Global end force component
    pub fn global_end_force(&self, end: End, dof: Dof) -> f64 {
        self.global_forces[end.index() * 6 + dof.index()]
    }

    fn check_span(&self, x: f64) -> MsaResult<f64> {
        let slack = SPAN_TOLERANCE * self.length;
        if !x.is_finite() || x < -slack || x > self.length + slack {
            return Err(MsaError::InvalidInput(format!(
                "position {x} is outside the element span [0, {}]",
                self.length
            )));
        }
        Ok(x.clamp(0.0, self.length))
    }

    /// Axial force at `x`, positive in tension
    pub fn nx(&self, x: f64) -> MsaResult<f64> {
        let x = self.check_span(x)?;
        if !self.dofs.contains(Dof::UX) {
            return Ok(0.0);
        }
        let loads: f64 = self.loads.iter().map(|load| load.axial(x)).sum();
        Ok(-(self.local_forces[0] + loads))
    }

    /// Shear force along local y at `x`
    pub fn vy(&self, x: f64) -> MsaResult<f64> {
        let x = self.check_span(x)?;
        if !self.dofs.contains(Dof::UY) {
            return Ok(0.0);
        }
        let loads: f64 = self.loads.iter().map(|load| load.shear_y(x)).sum();
        Ok(self.local_forces[1] + loads)
    }

    /// Shear force along local z at `x`
    pub fn vz(&self, x: f64) -> MsaResult<f64> {
        let x = self.check_span(x)?;
        if !self.dofs.contains(Dof::UZ) {
            return Ok(0.0);
        }
        let loads: f64 = self.loads.iter().map(|load| load.shear_z(x)).sum();
        Ok(self.local_forces[2] + loads)
    }

    /// Torsion at `x`
    pub fn tx(&self, x: f64) -> MsaResult<f64> {
        self.check_span(x)?;
        if !self.dofs.contains(Dof::RX) {
            return Ok(0.0);
        }
        Ok(-self.local_forces[3])
    }

    /// Bending moment about local y at `x`
    pub fn my(&self, x: f64) -> MsaResult<f64> {
        let x = self.check_span(x)?;
        if !self.dofs.contains(Dof::RY) {
            return Ok(0.0);
        }
        let loads: f64 = self.loads.iter().map(|load| load.moment_y(x)).sum();
        Ok(self.local_forces[4] + self.local_forces[2] * x + loads)
    }

    /// Bending moment about local z at `x`, positive when sagging
    pub fn mz(&self, x: f64) -> MsaResult<f64> {
        let x = self.check_span(x)?;
        if !self.dofs.contains(Dof::RZ) {
            return Ok(0.0);
        }
        let loads: f64 = self.loads.iter().map(|load| load.moment_z(x)).sum();
        Ok(-(self.local_forces[5] - self.local_forces[1] * x - loads))
    }

    /// All internal force components at `x`
    pub fn forces_at(&self, x: f64) -> MsaResult<MemberForces> {
        Ok(MemberForces {
            axial: self.nx(x)?,
            shear_y: self.vy(x)?,
            shear_z: self.vz(x)?,
            torsion: self.tx(x)?,
            moment_y: self.my(x)?,
            moment_z: self.mz(x)?,
        })
    }

    /// Axial stress `Nx / A` at `x`
    pub fn axial_stress(&self, x: f64) -> MsaResult<f64> {
        Ok(self.nx(x)? / positive(self.area, "area")?)
    }

    /// Normal stress from bending about local y at distance `z` from the neutral axis
    pub fn bending_stress_about_y(&self, x: f64, z: f64) -> MsaResult<f64> {
        let my = self.my(x)?;
        if my == 0.0 {
            return Ok(0.0);
        }
        Ok(my * -z / positive(self.iyy, "Iyy")?)
    }

    /// Normal stress from bending about local z at distance `y` from the neutral axis
    pub fn bending_stress_about_z(&self, x: f64, y: f64) -> MsaResult<f64> {
        let mz = self.mz(x)?;
        if mz == 0.0 {
            return Ok(0.0);
        }
        Ok(mz * -y / positive(self.ixx, "Ixx")?)
    }

    /// Combined axial and biaxial bending stress at local (x, y, z)
    pub fn normal_stress(&self, x: f64, y: f64, z: f64) -> MsaResult<f64> {
        Ok(self.axial_stress(x)?
            + self.bending_stress_about_y(x, z)?
            + self.bending_stress_about_z(x, y)?)
    }

    /// Average shear stress `Vy / A`
    pub fn shear_stress_y(&self, x: f64) -> MsaResult<f64> {
        Ok(self.vy(x)? / positive(self.area, "area")?)
    }

    /// Average shear stress `Vz / A`
    pub fn shear_stress_z(&self, x: f64) -> MsaResult<f64> {
        Ok(self.vz(x)? / positive(self.area, "area")?)
    }

    /// Extreme-fibre stress `Mz / Sx` for strong-axis bending
    pub fn extreme_fibre_stress_about_z(&self, x: f64) -> MsaResult<f64> {
        let sx = self
            .sx
            .ok_or_else(|| MsaError::InvalidInput("section has no modulus Sx".to_string()))?;
        Ok(self.mz(x)? / positive(sx, "Sx")?)
    }

    /// Extreme-fibre stress `My / Sy` for weak-axis bending
    pub fn extreme_fibre_stress_about_y(&self, x: f64) -> MsaResult<f64> {
        let sy = self
            .sy
            .ok_or_else(|| MsaError::InvalidInput("section has no modulus Sy".to_string()))?;
        Ok(self.my(x)? / positive(sy, "Sy")?)
    }
}

fn positive(value: f64, name: &str) -> MsaResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(MsaError::InvalidInput(format!(
            "section property {name} must be positive for stress recovery"
        )))
    }
}

/// Results of one load combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Load combination name
    pub combo: String,
    pub nodes: BTreeMap<String, NodeResults>,
    pub elements: BTreeMap<String, ElementResults>,
    pub warnings: Vec<AnalysisWarning>,
    /// Σ reactions + Σ applied loads in global X, Y, Z
    pub force_residual: [f64; 3],
    /// Σ moments of reactions and applied loads about the global origin
    pub moment_residual: [f64; 3],
}

impl Solution {
    /// Global force balance residual; zero for an equilibrated solution
    pub fn force_balance(&self) -> [f64; 3] {
        self.force_residual
    }

    /// Global moment balance residual about the origin
    pub fn moment_balance(&self) -> [f64; 3] {
        self.moment_residual
    }

    /// Results at a node
    pub fn node(&self, name: &str) -> MsaResult<&NodeResults> {
        self.nodes
            .get(name)
            .ok_or_else(|| MsaError::NodeNotFound(name.to_string()))
    }

    /// Results of an element
    pub fn element(&self, name: &str) -> MsaResult<&ElementResults> {
        self.elements
            .get(name)
            .ok_or_else(|| MsaError::ElementNotFound(name.to_string()))
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> MsaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum displacement
    pub max_displacement: f64,
    /// Node with maximum displacement
    pub max_disp_node: String,
    /// Maximum reaction force
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: String,
    /// Maximum member axial force
    pub max_axial: f64,
    /// Member with maximum axial
    pub max_axial_member: String,
    /// Maximum member moment
    pub max_moment: f64,
    /// Member with maximum moment
    pub max_moment_member: String,
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
}

impl AnalysisSummary {
    /// Scan a solution for extreme values
    pub fn from_solution(solution: &Solution, total_dofs: usize, free_dofs: usize) -> Self {
        let mut summary = AnalysisSummary {
            num_nodes: solution.nodes.len(),
            num_elements: solution.elements.len(),
            total_dofs,
            free_dofs,
            ..Default::default()
        };

        for (name, node) in &solution.nodes {
            let disp = NodeDisplacement::from_array(node.displacement).translation_magnitude();
            if disp > summary.max_displacement {
                summary.max_displacement = disp;
                summary.max_disp_node = name.clone();
            }
            let rxn = Reactions::from_array(node.reaction).force_magnitude();
            if rxn > summary.max_reaction {
                summary.max_reaction = rxn;
                summary.max_reaction_node = name.clone();
            }
        }

        for (name, element) in &solution.elements {
            let forces = &element.local_forces;
            let axial = forces[0].abs().max(forces[6].abs());
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_member = name.clone();
            }
            let moment = [4, 5, 10, 11]
                .iter()
                .map(|&i| forces[i].abs())
                .fold(0.0, f64::max);
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = name.clone();
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_relative_eq;

    /// Simply supported span of 10 under 2 per unit length downward
    fn simply_supported() -> ElementResults {
        let mut local_forces = [0.0; 12];
        local_forces[1] = 10.0;
        local_forces[7] = 10.0;
        ElementResults {
            kind: ElementKind::Frame,
            dofs: DofSet::ALL,
            length: 10.0,
            area: 4.0,
            ixx: 8.0,
            iyy: 2.0,
            sx: Some(4.0),
            sy: None,
            local_displacements: [0.0; 12],
            local_forces,
            global_forces: local_forces,
            loads: vec![LocalLoad::Uniform {
                w: Vec3::new(0.0, -2.0, 0.0),
            }],
        }
    }

    #[test]
    fn test_sagging_moment_is_positive() {
        let element = simply_supported();
        assert_relative_eq!(element.mz(5.0).unwrap(), 25.0);
        assert_relative_eq!(element.vy(0.0).unwrap(), 10.0);
        assert_relative_eq!(element.vy(10.0).unwrap(), -10.0);
        assert_relative_eq!(element.mz(10.0).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bending_stress_sign() {
        let element = simply_supported();
        // Bottom fibre in tension under sagging moment
        assert_relative_eq!(element.bending_stress_about_z(5.0, -2.0).unwrap(), 6.25);
        assert_relative_eq!(element.normal_stress(5.0, 2.0, 0.0).unwrap(), -6.25);
        assert_relative_eq!(element.extreme_fibre_stress_about_z(5.0).unwrap(), 6.25);
        assert!(element.extreme_fibre_stress_about_y(5.0).is_err());
    }

    #[test]
    fn test_position_outside_span() {
        let element = simply_supported();
        assert!(element.mz(10.5).is_err());
        assert!(element.nx(-1.0).is_err());
        assert!(element.nx(f64::NAN).is_err());
    }

    #[test]
    fn test_missing_dofs_give_zero() {
        let mut element = simply_supported();
        element.dofs = DofSet::TRANSLATIONS;
        assert_eq!(element.mz(5.0).unwrap(), 0.0);
        assert_eq!(element.tx(5.0).unwrap(), 0.0);
    }

    #[test]
    fn test_warning_display() {
        let warning = AnalysisWarning::LoadOnRestrainedDof {
            node: "N1".to_string(),
            dof: Dof::UY,
            case: "Dead".to_string(),
            magnitude: -5.0,
        };
        assert_eq!(
            warning.to_string(),
            "load -5 in case 'Dead' is applied to restrained DOF UY of node 'N1'"
        );
    }
}
