//! Line elements: truss, beam and frame

use serde::{Deserialize, Serialize};

use super::dof::{Dof, DofSet, End};
use super::material::Material;
use super::section::Section;
use crate::error::{MsaError, MsaResult};
use crate::math::{self, LocalAxes, Mat, Vec3};

/// |x·X| must be within this of 1 for a beam element
const BEAM_ALIGNMENT_TOLERANCE: f64 = 1e-9;

/// Element formulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Axial force only, translations at each end
    Truss,
    /// Shear and bending only, no axial or torsion DOFs
    Beam,
    /// Axial, torsion and biaxial bending
    Frame,
}

impl ElementKind {
    /// DOFs this formulation carries at each end
    pub fn dofs(self) -> DofSet {
        match self {
            ElementKind::Truss => DofSet::TRANSLATIONS,
            ElementKind::Beam => DofSet::BENDING,
            ElementKind::Frame => DofSet::ALL,
        }
    }
}

/// End releases for a frame element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberReleases {
    /// i-end releases [UX, UY, UZ, RX, RY, RZ]
    pub i_node: [bool; 6],
    /// j-end releases [UX, UY, UZ, RX, RY, RZ]
    pub j_node: [bool; 6],
}

impl MemberReleases {
    /// Create releases with no end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Moment releases at the i-end
    pub fn pin_i() -> Self {
        Self::none().release(End::I, Dof::RY).release(End::I, Dof::RZ)
    }

    /// Moment releases at the j-end
    pub fn pin_j() -> Self {
        Self::none().release(End::J, Dof::RY).release(End::J, Dof::RZ)
    }

    /// Moment releases at both ends
    pub fn pin_both() -> Self {
        Self::pin_i().release(End::J, Dof::RY).release(End::J, Dof::RZ)
    }

    /// Add a single released (end, DOF) pair
    pub fn release(mut self, end: End, dof: Dof) -> Self {
        match end {
            End::I => self.i_node[dof.index()] = true,
            End::J => self.j_node[dof.index()] = true,
        }
        self
    }

    /// Get combined releases as 12-element array
    pub fn as_array(&self) -> [bool; 12] {
        let mut arr = [false; 12];
        arr[0..6].copy_from_slice(&self.i_node);
        arr[6..12].copy_from_slice(&self.j_node);
        arr
    }

    /// Whether any DOF is released
    pub fn any(&self) -> bool {
        self.as_array().iter().any(|&r| r)
    }
}

/// A two-node line element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Formulation
    pub kind: ElementKind,
    /// Name of the i-node (start)
    pub i_node: String,
    /// Name of the j-node (end)
    pub j_node: String,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,
    /// Roll about the element's own x-axis (radians)
    pub roll: f64,
    /// End releases (frame elements only)
    pub releases: MemberReleases,
}

impl Element {
    fn new(kind: ElementKind, i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self {
            kind,
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material: material.to_string(),
            section: section.to_string(),
            roll: 0.0,
            releases: MemberReleases::none(),
        }
    }

    pub fn truss(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self::new(ElementKind::Truss, i_node, j_node, material, section)
    }

    pub fn beam(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self::new(ElementKind::Beam, i_node, j_node, material, section)
    }

    pub fn frame(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self::new(ElementKind::Frame, i_node, j_node, material, section)
    }

    /// Set the roll angle about the element axis
    pub fn with_roll(mut self, roll: f64) -> Self {
        self.roll = roll;
        self
    }

    /// Set end releases
    pub fn with_releases(mut self, releases: MemberReleases) -> Self {
        self.releases = releases;
        self
    }

    /// DOFs carried at each end
    pub fn dofs(&self) -> DofSet {
        self.kind.dofs()
    }

    /// Node name at an end
    pub fn node(&self, end: End) -> &str {
        match end {
            End::I => &self.i_node,
            End::J => &self.j_node,
        }
    }

    /// Positions in the 12-entry end layout (end × 6 + dof) this element uses
    pub fn local_indices(&self) -> Vec<usize> {
        let dofs = self.dofs();
        [End::I, End::J]
            .iter()
            .flat_map(|end| dofs.iter().map(move |dof| end.index() * 6 + dof.index()))
            .collect()
    }

    /// Positions of released DOFs within this element's local vectors
    pub(crate) fn released_positions(&self) -> Vec<usize> {
        let flags = self.releases.as_array();
        self.local_indices()
            .into_iter()
            .enumerate()
            .filter(|&(_, full)| flags[full])
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Local axes for the given end coordinates, validating element geometry
    pub fn local_axes(&self, name: &str, i: &Vec3, j: &Vec3) -> MsaResult<LocalAxes> {
        let axes = math::local_axes(i, j, self.roll).ok_or_else(|| MsaError::InvalidGeometry {
            element: name.to_string(),
            reason: "element length must be strictly positive".to_string(),
        })?;

        if self.kind == ElementKind::Beam
            && (axes.x.dot(&Vec3::x()).abs() - 1.0).abs() > BEAM_ALIGNMENT_TOLERANCE
        {
            return Err(MsaError::InvalidGeometry {
                element: name.to_string(),
                reason: "beam elements must lie along the global X axis".to_string(),
            });
        }

        Ok(axes)
    }

    /// Transformation from global to local end quantities for this element
    pub fn transformation(&self, axes: &LocalAxes) -> Mat {
        math::transformation_matrix(&axes.rotation(), &self.local_indices())
    }

    /// Local stiffness before end releases are condensed
    pub fn uncondensed_stiffness(&self, length: f64, material: &Material, section: &Section) -> Mat {
        match self.kind {
            ElementKind::Truss => math::truss_local_stiffness(material.e, section.area, length),
            ElementKind::Beam | ElementKind::Frame => {
                let full = math::frame_local_stiffness(
                    material.e,
                    material.g,
                    section.area,
                    section.ixx,
                    section.iyy,
                    section.j,
                    length,
                );
                if self.kind == ElementKind::Frame {
                    full
                } else {
                    let indices = self.local_indices();
                    math::submatrix(&full, &indices, &indices)
                }
            }
        }
    }

    /// Local stiffness with end releases condensed out
    pub fn local_stiffness(
        &self,
        name: &str,
        length: f64,
        material: &Material,
        section: &Section,
    ) -> MsaResult<Mat> {
        let k = self.uncondensed_stiffness(length, material, section);
        let released = self.released_positions();
        math::condense_stiffness(&k, &released).ok_or_else(|| {
            MsaError::ModelDefinition(format!(
                "element '{name}': end releases leave a mechanism within the element"
            ))
        })
    }
}
