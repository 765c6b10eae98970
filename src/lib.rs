//! MSA Solver - Linear-elastic matrix structural analysis in Rust
//!
//! Direct-stiffness analysis of 3D structures built from:
//! - Truss elements (axial only)
//! - Beam elements (bending in two planes, aligned with global X)
//! - Frame elements (axial, torsion and biaxial bending, with end releases)
//!
//! Loads are grouped into named cases and solved per load combination.
//! Results include nodal displacements, support reactions, element end
//! forces and internal forces and stresses anywhere along an element.
//!
//! ## Example
//! ```rust
//! use msa_solver::prelude::*;
//!
//! let mut model = Model::new();
//!
//! // Add material and section (N, mm)
//! model.add_material("Steel", Material::isotropic(200_000.0, 0.3)).unwrap();
//! model.add_section("W310", Section::new(1910.0, 12.8e6, 0.87e6, 17.7e3)).unwrap();
//!
//! // Add nodes
//! model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
//! model.add_node("N2", Node::new(5000.0, 0.0, 0.0)).unwrap();
//!
//! // Add element
//! model.add_element("E1", Element::frame("N1", "N2", "Steel", "W310")).unwrap();
//!
//! // Add supports
//! model.add_support("N1", Support::fixed()).unwrap();
//!
//! // Add loads
//! model.add_node_load("N2", NodeLoad::fy(-10_000.0, "Dead")).unwrap();
//! model.add_load_combo(LoadCombination::single("ULS", "Dead")).unwrap();
//!
//! // Analyze
//! model.analyze().unwrap();
//!
//! // Get results
//! let displacement = model.node_displacement("N2", "ULS").unwrap();
//! assert!(displacement.dy < 0.0);
//! let root_moment = model.element_results("E1", "ULS").unwrap().mz(0.0).unwrap();
//! assert!(root_moment < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::elements::{
        Dof, DofSet, Element, ElementKind, End, Material, MemberReleases, Node, Section, Support,
    };
    pub use crate::error::{ErrorKind, MsaError, MsaResult};
    pub use crate::loads::{LoadCase, LoadCombination, LoadDirection, MemberLoad, NodeLoad};
    pub use crate::model::{Model, DEFAULT_COMBO};
    pub use crate::results::{
        AnalysisSummary, AnalysisWarning, ElementResults, MemberForces, NodeDisplacement,
        NodeResults, Reactions, Solution,
    };
}
