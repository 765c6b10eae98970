//! Structural model container and analysis orchestration

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::analysis::{
    assembly, linear_static, stability, AnalysisOptions, DofRegistry, ElementSystem,
};
use crate::elements::{Dof, DofSet, Element, ElementKind, Material, Node, Section, Support};
use crate::error::{MsaError, MsaResult};
use crate::loads::{LoadCase, LoadCombination, LocalLoad, MemberLoad, NodeLoad};
use crate::math::{self, Mat, Vec as MsaVec, Vec3};
use crate::results::{
    AnalysisSummary, AnalysisWarning, ElementResults, MemberForces, NodeDisplacement, NodeResults,
    Reactions, Solution,
};

/// Combination solved by [`Model::analyze`] when none are defined
pub const DEFAULT_COMBO: &str = "Combo 1";

/// State derived from the model topology by [`Model::preprocess`]
#[derive(Debug, Clone)]
struct Preprocessed {
    registry: DofRegistry,
    node_index: HashMap<String, usize>,
    systems: Vec<ElementSystem>,
    k_global: Mat,
}

/// The 3D structural model
///
/// Nodes and elements keep their insertion order, which fixes the global
/// DOF numbering. Any change to the model discards preprocessed state and
/// stored solutions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    nodes: HashMap<String, Node>,
    node_order: Vec<String>,
    materials: HashMap<String, Material>,
    sections: HashMap<String, Section>,
    elements: HashMap<String, Element>,
    element_order: Vec<String>,
    node_loads: HashMap<String, Vec<NodeLoad>>,
    member_loads: HashMap<String, Vec<MemberLoad>>,
    load_cases: BTreeMap<String, LoadCase>,
    load_combos: BTreeMap<String, LoadCombination>,
    options: AnalysisOptions,

    #[serde(skip)]
    prepared: Option<Preprocessed>,

    #[serde(skip)]
    solutions: HashMap<String, Solution>,
}

impl Model {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom analysis options
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self.invalidate();
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    fn invalidate(&mut self) {
        self.prepared = None;
        self.solutions.clear();
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, name: &str, node: Node) -> MsaResult<()> {
        if self.nodes.contains_key(name) {
            return Err(MsaError::DuplicateName(name.to_string()));
        }
        self.nodes.insert(name.to_string(), node);
        self.node_order.push(name.to_string());
        self.invalidate();
        Ok(())
    }

    /// Add a material to the model
    pub fn add_material(&mut self, name: &str, material: Material) -> MsaResult<()> {
        if self.materials.contains_key(name) {
            return Err(MsaError::DuplicateName(name.to_string()));
        }
        self.materials.insert(name.to_string(), material);
        self.invalidate();
        Ok(())
    }

    /// Add a section to the model
    pub fn add_section(&mut self, name: &str, section: Section) -> MsaResult<()> {
        if self.sections.contains_key(name) {
            return Err(MsaError::DuplicateName(name.to_string()));
        }
        self.sections.insert(name.to_string(), section);
        self.invalidate();
        Ok(())
    }

    /// Add an element to the model
    ///
    /// References to nodes, material and section are checked by
    /// [`Model::preprocess`].
    pub fn add_element(&mut self, name: &str, element: Element) -> MsaResult<()> {
        if self.elements.contains_key(name) {
            return Err(MsaError::DuplicateName(name.to_string()));
        }
        self.elements.insert(name.to_string(), element);
        self.element_order.push(name.to_string());
        self.invalidate();
        Ok(())
    }

    /// Replace the restraints of a node
    pub fn add_support(&mut self, node_name: &str, support: Support) -> MsaResult<()> {
        let node = self
            .nodes
            .get_mut(node_name)
            .ok_or_else(|| MsaError::NodeNotFound(node_name.to_string()))?;
        node.restraints = support.as_dof_set();
        self.invalidate();
        Ok(())
    }

    /// Restrain one DOF of a node, keeping existing restraints
    pub fn restrain(&mut self, node_name: &str, dof: Dof) -> MsaResult<()> {
        let node = self
            .nodes
            .get_mut(node_name)
            .ok_or_else(|| MsaError::NodeNotFound(node_name.to_string()))?;
        node.restraints.insert(dof);
        self.invalidate();
        Ok(())
    }

    /// Add a node load
    pub fn add_node_load(&mut self, node_name: &str, load: NodeLoad) -> MsaResult<()> {
        if !self.nodes.contains_key(node_name) {
            return Err(MsaError::NodeNotFound(node_name.to_string()));
        }
        self.node_loads
            .entry(node_name.to_string())
            .or_default()
            .push(load);
        self.solutions.clear();
        Ok(())
    }

    /// Add a load along an element
    pub fn add_member_load(&mut self, element_name: &str, load: MemberLoad) -> MsaResult<()> {
        if !self.elements.contains_key(element_name) {
            return Err(MsaError::ElementNotFound(element_name.to_string()));
        }
        self.member_loads
            .entry(element_name.to_string())
            .or_default()
            .push(load);
        self.solutions.clear();
        Ok(())
    }

    /// Register a load case
    pub fn add_load_case(&mut self, case: LoadCase) -> MsaResult<()> {
        if self.load_cases.contains_key(&case.name) {
            return Err(MsaError::DuplicateName(case.name));
        }
        self.load_cases.insert(case.name.clone(), case);
        Ok(())
    }

    /// Add a load combination
    ///
    /// The first user combination replaces the default one, so its stored
    /// solution is dropped.
    pub fn add_load_combo(&mut self, combo: LoadCombination) -> MsaResult<()> {
        let name = combo.name.clone();
        if self.load_combos.contains_key(&name) {
            return Err(MsaError::DuplicateName(name));
        }
        if self.load_combos.is_empty() {
            self.solutions.remove(DEFAULT_COMBO);
        }
        self.load_combos.insert(name, combo);
        Ok(())
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Validate the model, number DOFs, assemble stiffness and check stability
    pub fn preprocess(&mut self) -> MsaResult<()> {
        self.prepared = None;
        self.solutions.clear();

        if self.nodes.is_empty() {
            return Err(MsaError::ModelDefinition("model has no nodes".to_string()));
        }
        if self.elements.is_empty() {
            return Err(MsaError::ModelDefinition("model has no elements".to_string()));
        }

        let node_index: HashMap<String, usize> = self
            .node_order
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut active = vec![DofSet::EMPTY; self.node_order.len()];
        for name in &self.element_order {
            let element = self.element_entry(name)?;
            let (i, j) = self.validate_element(name, element, &node_index)?;
            active[i] = active[i].union(element.dofs());
            active[j] = active[j].union(element.dofs());
        }

        let restraints: Vec<DofSet> = self
            .node_order
            .iter()
            .map(|name| self.node_entry(name).map(|node| node.restraints))
            .collect::<MsaResult<_>>()?;

        for (i, name) in self.node_order.iter().enumerate() {
            let ignored: Vec<Dof> = restraints[i]
                .iter()
                .filter(|dof| !active[i].contains(*dof))
                .collect();
            if !ignored.is_empty() {
                debug!("Node '{name}': restraints on {ignored:?} ignored, no element carries them");
            }
        }

        let registry = DofRegistry::new(active, &restraints);
        debug!(
            "Numbered {} DOFs ({} free, {} restrained) on {} nodes",
            registry.len(),
            registry.free().len(),
            registry.restrained().len(),
            self.node_order.len()
        );

        let mut systems = Vec::with_capacity(self.element_order.len());
        for name in &self.element_order {
            let element = self.element_entry(name)?;
            let i = node_index[&element.i_node];
            let j = node_index[&element.j_node];
            systems.push(ElementSystem::build(
                name,
                element,
                i,
                j,
                self.node_entry(&element.i_node)?,
                self.node_entry(&element.j_node)?,
                self.material_entry(&element.material)?,
                self.section_entry(&element.section)?,
                &registry,
            )?);
        }

        let k_global = assembly::assemble_stiffness(&systems, registry.len());
        let k_ff = math::submatrix(&k_global, registry.free(), registry.free());
        stability::check_stability(&k_ff, &registry, &self.node_order, &self.options)?;

        self.prepared = Some(Preprocessed {
            registry,
            node_index,
            systems,
            k_global,
        });
        Ok(())
    }

    /// Check an element's references and properties, returning its node indices
    fn validate_element(
        &self,
        name: &str,
        element: &Element,
        node_index: &HashMap<String, usize>,
    ) -> MsaResult<(usize, usize)> {
        let i = *node_index
            .get(&element.i_node)
            .ok_or_else(|| MsaError::NodeNotFound(element.i_node.clone()))?;
        let j = *node_index
            .get(&element.j_node)
            .ok_or_else(|| MsaError::NodeNotFound(element.j_node.clone()))?;
        if i == j {
            return Err(MsaError::ModelDefinition(format!(
                "element '{name}' connects node '{}' to itself",
                element.i_node
            )));
        }

        let material = self.material_entry(&element.material)?;
        let section = self.section_entry(&element.section)?;
        if material.e <= 0.0 {
            return Err(MsaError::ModelDefinition(format!(
                "element '{name}': material '{}' must have a positive elastic modulus",
                element.material
            )));
        }
        if section.area <= 0.0 {
            return Err(MsaError::ModelDefinition(format!(
                "element '{name}': section '{}' must have a positive area",
                element.section
            )));
        }
        if element.kind != ElementKind::Frame && element.releases.any() {
            return Err(MsaError::ModelDefinition(format!(
                "element '{name}': end releases are only supported on frame elements"
            )));
        }
        Ok((i, j))
    }

    /// Solve one load combination and store its results
    pub fn solve(&mut self, combo_name: &str) -> MsaResult<&Solution> {
        let solution = self.run_combination(combo_name)?;
        self.solutions.insert(combo_name.to_string(), solution);
        self.solution(combo_name)
    }

    /// Preprocess and solve every load combination
    ///
    /// With no combinations defined, [`DEFAULT_COMBO`] is solved with every
    /// current load case at factor 1.0. It is rebuilt on each solve and never
    /// stored as a user combination.
    pub fn analyze(&mut self) -> MsaResult<()> {
        self.preprocess()?;
        for combo_name in self.combo_names() {
            self.solve(&combo_name)?;
        }
        Ok(())
    }

    /// Every load case at factor 1.0
    fn default_combination(&self) -> LoadCombination {
        self.load_cases()
            .iter()
            .fold(LoadCombination::new(DEFAULT_COMBO), |combo, case| {
                combo.with_case(case, 1.0)
            })
    }

    fn combination(&self, combo_name: &str) -> MsaResult<Cow<'_, LoadCombination>> {
        if self.load_combos.is_empty() && combo_name == DEFAULT_COMBO {
            let combo = self.default_combination();
            if combo.is_empty() {
                debug!("Model has no loads, solving '{DEFAULT_COMBO}' with a zero load vector");
            }
            return Ok(Cow::Owned(combo));
        }

        let combo = self
            .load_combos
            .get(combo_name)
            .ok_or_else(|| MsaError::LoadCombinationNotFound(combo_name.to_string()))?;
        if combo.is_empty() {
            return Err(MsaError::InvalidInput(format!(
                "load combination '{combo_name}' has no load cases"
            )));
        }
        Ok(Cow::Borrowed(combo))
    }

    fn run_combination(&self, combo_name: &str) -> MsaResult<Solution> {
        let prepared = self.prepared.as_ref().ok_or(MsaError::NotPreprocessed)?;
        let combo = self.combination(combo_name)?;
        let known = self.load_cases();
        if let Some(case) = combo.factors.keys().find(|case| !known.contains(*case)) {
            return Err(MsaError::LoadCaseNotFound(case.clone()));
        }

        let registry = &prepared.registry;
        let mut f = MsaVec::zeros(registry.len());
        let mut warnings = Vec::new();
        let mut applied = Vec3::zeros();
        let mut applied_moment = Vec3::zeros();

        for (node, name) in self.node_order.iter().enumerate() {
            let position = self.node_entry(name)?.position();
            for load in self.node_loads.get(name).into_iter().flatten() {
                let factor = combo.factor(&load.case);
                if factor == 0.0 {
                    continue;
                }
                let magnitude = factor * load.magnitude;
                assembly::add_nodal_load(
                    &mut f,
                    registry,
                    node,
                    name,
                    load.dof,
                    magnitude,
                    &load.case,
                    &mut warnings,
                )?;
                let mut action = Vec3::zeros();
                if load.dof.is_translation() {
                    action[load.dof.index()] = magnitude;
                    applied += action;
                    applied_moment += position.cross(&action);
                } else {
                    action[load.dof.index() - 3] = magnitude;
                    applied_moment += action;
                }
            }
        }

        let mut element_loads: Vec<(Vec<LocalLoad>, MsaVec)> = Vec::with_capacity(prepared.systems.len());
        for system in &prepared.systems {
            let factored: Vec<MemberLoad> = self
                .member_loads
                .get(&system.name)
                .into_iter()
                .flatten()
                .filter_map(|load| {
                    let factor = combo.factor(load.case());
                    (factor != 0.0).then(|| load.scaled(factor))
                })
                .collect();
            let local_loads = system.resolve_loads(&factored)?;
            let fef = system.fixed_end_forces(&local_loads)?;
            assembly::subtract_fixed_end_forces(&mut f, system, &fef);

            for load in &local_loads {
                let force = system.axes.to_global(&load.resultant(system.length));
                let point = system.origin + system.axes.x * load.centroid(system.length);
                applied += force;
                applied_moment += point.cross(&force);
            }
            element_loads.push((local_loads, fef));
        }

        let response = linear_static::solve(&prepared.k_global, &f, registry)?;

        let mut nodes = BTreeMap::new();
        let mut reaction_total = Vec3::zeros();
        let mut reaction_moment = Vec3::zeros();
        for (index, name) in self.node_order.iter().enumerate() {
            let active = registry.active(index);
            let mut displacement = [0.0; 6];
            let mut reaction = [0.0; 6];
            for dof in active.iter() {
                if let Some(global) = registry.index(index, dof) {
                    displacement[dof.index()] = response.displacements[global];
                    reaction[dof.index()] = response.reactions[global];
                }
            }
            let force = Vec3::new(reaction[0], reaction[1], reaction[2]);
            let position = self.node_entry(name)?.position();
            reaction_total += force;
            reaction_moment += position.cross(&force) + Vec3::new(reaction[3], reaction[4], reaction[5]);
            nodes.insert(
                name.clone(),
                NodeResults {
                    active,
                    displacement,
                    reaction,
                },
            );
        }

        let mut elements = BTreeMap::new();
        for (system, (loads, fef)) in prepared.systems.iter().zip(element_loads) {
            let recovered = linear_static::recover_element(system, &response.displacements, &fef);
            let element = self.element_entry(&system.name)?;
            let section = self.section_entry(&element.section)?;
            elements.insert(
                system.name.clone(),
                ElementResults {
                    kind: system.kind,
                    dofs: system.dofs,
                    length: system.length,
                    area: section.area,
                    ixx: section.ixx,
                    iyy: section.iyy,
                    sx: section.sx,
                    sy: section.sy,
                    local_displacements: expand(&recovered.local_displacements, &system.local_indices),
                    local_forces: expand(&recovered.local_forces, &system.local_indices),
                    global_forces: expand(&recovered.global_forces, &system.local_indices),
                    loads,
                },
            );
        }

        let residual = applied + reaction_total;
        let moment = applied_moment + reaction_moment;
        let force_residual = [residual.x, residual.y, residual.z];
        let moment_residual = [moment.x, moment.y, moment.z];
        if self.options.check_statics {
            let tol = self.options.statics_tolerance;
            let force_scale = applied.amax().max(reaction_total.amax()).max(1.0);
            let moment_scale = applied_moment.amax().max(reaction_moment.amax()).max(1.0);
            if residual.amax() > tol * force_scale || moment.amax() > tol * moment_scale {
                warn!(
                    "Load combination '{combo_name}': balance residual force {force_residual:?}, moment {moment_residual:?}"
                );
                warnings.push(AnalysisWarning::StaticsResidual {
                    force: force_residual,
                    moment: moment_residual,
                });
            }
        }

        info!(
            "Solved load combination '{combo_name}': {} free DOFs, {} warnings",
            registry.free().len(),
            warnings.len()
        );

        Ok(Solution {
            combo: combo_name.to_string(),
            nodes,
            elements,
            warnings,
            force_residual,
            moment_residual,
        })
    }

    // ========================
    // Lookup helpers
    // ========================

    fn node_entry(&self, name: &str) -> MsaResult<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| MsaError::NodeNotFound(name.to_string()))
    }

    fn element_entry(&self, name: &str) -> MsaResult<&Element> {
        self.elements
            .get(name)
            .ok_or_else(|| MsaError::ElementNotFound(name.to_string()))
    }

    fn material_entry(&self, name: &str) -> MsaResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| MsaError::MaterialNotFound(name.to_string()))
    }

    fn section_entry(&self, name: &str) -> MsaResult<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| MsaError::SectionNotFound(name.to_string()))
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Results of a solved load combination
    pub fn solution(&self, combo_name: &str) -> MsaResult<&Solution> {
        self.solutions
            .get(combo_name)
            .ok_or_else(|| MsaError::NotAnalyzed(combo_name.to_string()))
    }

    /// Get node displacement
    pub fn node_displacement(&self, node_name: &str, combo_name: &str) -> MsaResult<NodeDisplacement> {
        self.node_entry(node_name)?;
        let node = self.solution(combo_name)?.node(node_name)?;
        Ok(NodeDisplacement::from_array(node.displacement))
    }

    /// Get node reactions
    pub fn node_reactions(&self, node_name: &str, combo_name: &str) -> MsaResult<Reactions> {
        self.node_entry(node_name)?;
        let node = self.solution(combo_name)?.node(node_name)?;
        Ok(Reactions::from_array(node.reaction))
    }

    /// Results of one element
    pub fn element_results(&self, element_name: &str, combo_name: &str) -> MsaResult<&ElementResults> {
        self.element_entry(element_name)?;
        self.solution(combo_name)?.element(element_name)
    }

    /// Internal forces at the i-end
    pub fn member_forces_i(&self, element_name: &str, combo_name: &str) -> MsaResult<MemberForces> {
        self.element_results(element_name, combo_name)?.forces_at(0.0)
    }

    /// Internal forces at the j-end
    pub fn member_forces_j(&self, element_name: &str, combo_name: &str) -> MsaResult<MemberForces> {
        let results = self.element_results(element_name, combo_name)?;
        results.forces_at(results.length)
    }

    /// Get analysis summary
    pub fn summary(&self, combo_name: &str) -> MsaResult<AnalysisSummary> {
        let prepared = self.prepared.as_ref().ok_or(MsaError::NotPreprocessed)?;
        let solution = self.solution(combo_name)?;
        Ok(AnalysisSummary::from_solution(
            solution,
            prepared.registry.len(),
            prepared.registry.free().len(),
        ))
    }

    /// Check if the model has been preprocessed since its last change
    pub fn is_preprocessed(&self) -> bool {
        self.prepared.is_some()
    }

    /// Check if any load combination has been solved
    pub fn is_analyzed(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// DOF numbering of the last preprocess
    pub fn dof_registry(&self) -> Option<&DofRegistry> {
        self.prepared.as_ref().map(|prepared| &prepared.registry)
    }

    /// Assembled global stiffness matrix of the last preprocess
    pub fn stiffness_matrix(&self) -> Option<&Mat> {
        self.prepared.as_ref().map(|prepared| &prepared.k_global)
    }

    /// Model-order index of a node, once preprocessed
    pub fn node_index(&self, node_name: &str) -> Option<usize> {
        self.prepared
            .as_ref()
            .and_then(|prepared| prepared.node_index.get(node_name).copied())
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Node names in insertion order
    pub fn node_names(&self) -> &[String] {
        &self.node_order
    }

    /// Element names in insertion order
    pub fn element_names(&self) -> &[String] {
        &self.element_order
    }

    /// Names of the combinations [`Model::analyze`] solves
    pub fn combo_names(&self) -> Vec<String> {
        if self.load_combos.is_empty() {
            return vec![DEFAULT_COMBO.to_string()];
        }
        self.load_combos.keys().cloned().collect()
    }

    /// Registered load cases plus every case a load refers to, sorted
    pub fn load_cases(&self) -> Vec<String> {
        let mut cases: BTreeSet<String> = self.load_cases.keys().cloned().collect();
        for loads in self.node_loads.values() {
            cases.extend(loads.iter().map(|load| load.case.clone()));
        }
        for loads in self.member_loads.values() {
            cases.extend(loads.iter().map(|load| load.case().to_string()));
        }
        cases.into_iter().collect()
    }
}

/// Scatter an element-layout vector into the 12-entry end layout
fn expand(values: &MsaVec, local_indices: &[usize]) -> [f64; 12] {
    let mut full = [0.0; 12];
    for (value, &index) in values.iter().zip(local_indices) {
        full[index] = *value;
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadDirection;
    use approx::assert_relative_eq;

    fn cantilever() -> Model {
        let mut model = Model::new();
        model.add_material("Steel", Material::isotropic(200_000.0, 0.3)).unwrap();
        model
            .add_section("W", Section::new(1910.0, 12.8e6, 0.87e6, 17.7e3))
            .unwrap();
        model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
        model.add_node("N2", Node::new(5000.0, 0.0, 0.0)).unwrap();
        model.add_element("E1", Element::frame("N1", "N2", "Steel", "W")).unwrap();
        model.add_support("N1", Support::fixed()).unwrap();
        model
    }

    #[test]
    fn test_simple_cantilever() {
        let mut model = cantilever();
        model.add_node_load("N2", NodeLoad::fy(-10_000.0, "Case 1")).unwrap();
        model.analyze().unwrap();

        let disp = model.node_displacement("N2", "Combo 1").unwrap();
        let expected = -10_000.0 * 5000.0_f64.powi(3) / (3.0 * 200_000.0 * 12.8e6);
        assert_relative_eq!(disp.dy, expected, max_relative = 1e-9);

        let rxn = model.node_reactions("N1", "Combo 1").unwrap();
        assert_relative_eq!(rxn.fy, 10_000.0, max_relative = 1e-9);
        assert_relative_eq!(rxn.mz, 5.0e7, max_relative = 1e-9);
    }

    #[test]
    fn test_duplicate_names() {
        let mut model = cantilever();
        let err = model.add_node("N1", Node::new(1.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, MsaError::DuplicateName(_)));
        let err = model
            .add_element("E1", Element::frame("N1", "N2", "Steel", "W"))
            .unwrap_err();
        assert!(matches!(err, MsaError::DuplicateName(_)));
    }

    #[test]
    fn test_missing_references_found_by_preprocess() {
        let mut model = cantilever();
        model.add_element("E2", Element::frame("N2", "N3", "Steel", "W")).unwrap();
        assert!(matches!(model.preprocess(), Err(MsaError::NodeNotFound(_))));

        let mut model = cantilever();
        model.add_element("E2", Element::frame("N1", "N2", "Steel", "HEB")).unwrap();
        assert!(matches!(model.preprocess(), Err(MsaError::SectionNotFound(_))));

        let mut model = cantilever();
        model.add_element("E2", Element::frame("N2", "N2", "Steel", "W")).unwrap();
        let err = model.preprocess().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ModelDefinition);
    }

    #[test]
    fn test_releases_rejected_on_truss() {
        let mut model = cantilever();
        model.add_node("N3", Node::new(0.0, 3000.0, 0.0)).unwrap();
        model
            .add_element(
                "T1",
                Element::truss("N3", "N2", "Steel", "W").with_releases(crate::elements::MemberReleases::pin_i()),
            )
            .unwrap();
        assert!(matches!(model.preprocess(), Err(MsaError::ModelDefinition(_))));
    }

    #[test]
    fn test_solve_requires_preprocess() {
        let mut model = cantilever();
        model.add_load_combo(LoadCombination::single("C", "Case 1")).unwrap();
        model.add_node_load("N2", NodeLoad::fy(-1.0, "Case 1")).unwrap();
        assert!(matches!(model.solve("C"), Err(MsaError::NotPreprocessed)));
        model.preprocess().unwrap();
        assert!(model.solve("C").is_ok());
        assert!(matches!(model.solve("Other"), Err(MsaError::LoadCombinationNotFound(_))));
    }

    #[test]
    fn test_unknown_and_empty_combinations() {
        let mut model = cantilever();
        model.add_node_load("N2", NodeLoad::fy(-1.0, "Dead")).unwrap();
        model.add_load_combo(LoadCombination::single("Typo", "Daed")).unwrap();
        model.add_load_combo(LoadCombination::new("Empty")).unwrap();
        model.preprocess().unwrap();
        assert!(matches!(model.solve("Typo"), Err(MsaError::LoadCaseNotFound(_))));
        assert!(matches!(model.solve("Empty"), Err(MsaError::InvalidInput(_))));
    }

    #[test]
    fn test_mutation_discards_results() {
        let mut model = cantilever();
        model.add_node_load("N2", NodeLoad::fy(-1.0, "Case 1")).unwrap();
        model.analyze().unwrap();
        assert!(model.is_analyzed());
        model.add_node("N3", Node::new(0.0, 0.0, 1000.0)).unwrap();
        assert!(!model.is_preprocessed());
        assert!(matches!(
            model.node_displacement("N2", "Combo 1"),
            Err(MsaError::NotAnalyzed(_))
        ));
    }

    #[test]
    fn test_summary() {
        let mut model = cantilever();
        model
            .add_member_load("E1", MemberLoad::uniform(-1.0, LoadDirection::Fy, "Case 1"))
            .unwrap();
        model.analyze().unwrap();
        let summary = model.summary("Combo 1").unwrap();
        assert_eq!(summary.max_disp_node, "N2");
        assert_eq!(summary.max_reaction_node, "N1");
        assert_eq!(summary.total_dofs, 12);
        assert_eq!(summary.free_dofs, 6);
        assert_relative_eq!(summary.max_moment, 1.25e7, max_relative = 1e-9);
    }
}
