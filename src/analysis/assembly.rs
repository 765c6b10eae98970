//! Element systems and global stiffness/load assembly

use log::{debug, warn};

use super::dofs::DofRegistry;
use crate::elements::{Dof, DofSet, Element, ElementKind, Material, Node, Section};
use crate::error::{MsaError, MsaResult};
use crate::loads::{LocalLoad, MemberLoad};
use crate::math::{self, LocalAxes, Mat, Vec as MsaVec, Vec3};
use crate::results::AnalysisWarning;

/// Local components below this fraction of the load magnitude count as zero
const COMPONENT_TOLERANCE: f64 = 1e-12;

/// Everything about one element that stays fixed between load combinations
#[derive(Debug, Clone)]
pub struct ElementSystem {
    /// Element name
    pub name: String,
    pub kind: ElementKind,
    /// DOFs carried at each end
    pub dofs: DofSet,
    pub length: f64,
    /// Index of the i-node in model order
    pub i_node: usize,
    /// Index of the j-node in model order
    pub j_node: usize,
    /// Position of the i-node
    pub origin: Vec3,
    pub axes: LocalAxes,
    /// Global-to-local transformation, sized to the element's DOFs
    pub transform: Mat,
    /// Local stiffness with releases condensed
    pub k_local: Mat,
    /// Local stiffness before condensation
    pub k_uncondensed: Mat,
    /// Released positions within the element's local vectors
    pub released: Vec<usize>,
    /// Positions in the 12-entry end layout
    pub local_indices: Vec<usize>,
    /// Global DOF indices in local order
    pub global_indices: Vec<usize>,
    /// Unit weight × area
    pub weight_per_length: f64,
}

impl ElementSystem {
    /// Compute length, axes, transform and local stiffness for an element
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        name: &str,
        element: &Element,
        i_node: usize,
        j_node: usize,
        i: &Node,
        j: &Node,
        material: &Material,
        section: &Section,
        registry: &DofRegistry,
    ) -> MsaResult<Self> {
        let axes = element.local_axes(name, &i.position(), &j.position())?;
        let length = i.distance_to(j);
        let dofs = element.dofs();

        let k_uncondensed = element.uncondensed_stiffness(length, material, section);
        let k_local = element.local_stiffness(name, length, material, section)?;

        let global_indices = registry
            .element_indices(i_node, j_node, dofs)
            .ok_or_else(|| {
                MsaError::AnalysisFailed(format!("element '{name}' references unnumbered DOFs"))
            })?;

        Ok(Self {
            name: name.to_string(),
            kind: element.kind,
            dofs,
            length,
            i_node,
            j_node,
            origin: i.position(),
            transform: element.transformation(&axes),
            axes,
            k_local,
            k_uncondensed,
            released: element.released_positions(),
            local_indices: element.local_indices(),
            global_indices,
            weight_per_length: material.gamma * section.area,
        })
    }

    /// Element stiffness in global axes, `Tᵀ · k · T`
    pub fn global_stiffness(&self) -> Mat {
        self.transform.transpose() * &self.k_local * &self.transform
    }

    /// Resolve factored member loads into the element's local axes
    pub fn resolve_loads(&self, loads: &[MemberLoad]) -> MsaResult<Vec<LocalLoad>> {
        if loads.is_empty() {
            return Ok(Vec::new());
        }
        if self.kind == ElementKind::Truss {
            return Err(MsaError::InvalidLoad {
                element: self.name.clone(),
                reason: "truss elements carry no member loads".to_string(),
            });
        }

        loads
            .iter()
            .map(|load| {
                let local = load.resolve(&self.name, &self.axes, self.length, self.weight_per_length)?;
                let c = local.components();
                if self.kind == ElementKind::Beam && c.x.abs() > COMPONENT_TOLERANCE * c.norm() {
                    return Err(MsaError::InvalidLoad {
                        element: self.name.clone(),
                        reason: "beam elements cannot carry loads along their axis".to_string(),
                    });
                }
                Ok(local)
            })
            .collect()
    }

    /// Fixed-end forces of all loads in the element's local layout,
    /// condensed for end releases
    pub fn fixed_end_forces(&self, loads: &[LocalLoad]) -> MsaResult<MsaVec> {
        let mut full = MsaVec::zeros(12);
        for load in loads {
            full += load.fixed_end_forces(self.length);
        }
        let fef = math::subvector(&full, &self.local_indices);
        math::condense_fixed_end(&fef, &self.k_uncondensed, &self.released).ok_or_else(|| {
            MsaError::ModelDefinition(format!(
                "element '{}': end releases leave a mechanism within the element",
                self.name
            ))
        })
    }
}

/// Scatter-add every element's global stiffness into an N×N matrix
pub fn assemble_stiffness(systems: &[ElementSystem], n: usize) -> Mat {
    let mut k = Mat::zeros(n, n);
    for system in systems {
        let k_element = system.global_stiffness();
        for (a, &ga) in system.global_indices.iter().enumerate() {
            for (b, &gb) in system.global_indices.iter().enumerate() {
                k[(ga, gb)] += k_element[(a, b)];
            }
        }
    }
    debug!("Assembled {n}x{n} stiffness from {} elements", systems.len());
    k
}

/// Add a nodal load to the global load vector
///
/// Loads on restrained DOFs are kept (they pass straight into the reaction)
/// but reported as warnings.
#[allow(clippy::too_many_arguments)]
pub fn add_nodal_load(
    f: &mut MsaVec,
    registry: &DofRegistry,
    node: usize,
    node_name: &str,
    dof: Dof,
    magnitude: f64,
    case: &str,
    warnings: &mut Vec<AnalysisWarning>,
) -> MsaResult<()> {
    let index = registry.index(node, dof).ok_or_else(|| MsaError::UndefinedDof {
        node: node_name.to_string(),
        dof,
    })?;

    if registry.is_restrained(index) && magnitude != 0.0 {
        warn!("Load of {magnitude} in case '{case}' applied to restrained DOF {dof} of node '{node_name}'");
        warnings.push(AnalysisWarning::LoadOnRestrainedDof {
            node: node_name.to_string(),
            dof,
            case: case.to_string(),
            magnitude,
        });
    }

    f[index] += magnitude;
    Ok(())
}

/// Subtract an element's fixed-end forces, in global axes, from the load vector
pub fn subtract_fixed_end_forces(f: &mut MsaVec, system: &ElementSystem, fef_local: &MsaVec) {
    let fef_global = system.transform.transpose() * fef_local;
    for (a, &ga) in system.global_indices.iter().enumerate() {
        f[ga] -= fef_global[a];
    }
}
