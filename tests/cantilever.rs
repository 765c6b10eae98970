use approx::assert_relative_eq;
use msa_solver::prelude::*;

// W310-like section in N and mm
const E: f64 = 200_000.0;
const IXX: f64 = 12.8e6;
const L: f64 = 5_000.0;

fn build_cantilever(element: Element) -> Model {
    let mut model = Model::new();
    model
        .add_material("Steel", Material::isotropic(E, 0.3).with_unit_weight(7.85e-5))
        .unwrap();
    model
        .add_section("W310", Section::new(1_910.0, IXX, 0.87e6, 17.7e3))
        .unwrap();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(L, 0.0, 0.0)).unwrap();
    model.add_element("E1", element).unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model
}

#[test]
fn cantilever_uniform_load() {
    let mut model = build_cantilever(Element::frame("N1", "N2", "Steel", "W310"));
    model
        .add_member_load("E1", MemberLoad::uniform(-1.0, LoadDirection::Fy, "Dead"))
        .unwrap();
    model.add_load_combo(LoadCombination::single("D", "Dead")).unwrap();
    model.analyze().unwrap();

    let rxn = model.node_reactions("N1", "D").unwrap();
    assert_relative_eq!(rxn.fy, 5_000.0, max_relative = 1e-9);
    assert_relative_eq!(rxn.mz, 1.25e7, max_relative = 1e-9);
    assert_relative_eq!(rxn.fx, 0.0, epsilon = 1e-6);

    // wL^4 / 8EI and wL^3 / 6EI
    let tip = model.node_displacement("N2", "D").unwrap();
    assert_relative_eq!(tip.dy, -30.517578125, max_relative = 1e-9);
    assert_relative_eq!(tip.rz, -0.008138020833333333, max_relative = 1e-9);
    assert_relative_eq!(tip.dz, 0.0, epsilon = 1e-9);

    let results = model.element_results("E1", "D").unwrap();
    assert_relative_eq!(results.mz(0.0).unwrap(), -1.25e7, max_relative = 1e-9);
    assert_relative_eq!(results.mz(2_500.0).unwrap(), -3.125e6, max_relative = 1e-9);
    assert_relative_eq!(results.mz(L).unwrap(), 0.0, epsilon = 1e-3);
    assert_relative_eq!(results.vy(0.0).unwrap(), 5_000.0, max_relative = 1e-9);
    assert_relative_eq!(results.vy(L).unwrap(), 0.0, epsilon = 1e-6);
    assert_relative_eq!(results.nx(1_000.0).unwrap(), 0.0, epsilon = 1e-6);

    // Outside the span
    assert!(results.mz(L + 1.0).is_err());
    assert!(results.vy(-1.0).is_err());

    let balance = model.solution("D").unwrap().force_balance();
    for component in balance {
        assert!(component.abs() < 1e-6, "residual {balance:?}");
    }
    let moments = model.solution("D").unwrap().moment_balance();
    for component in moments {
        assert!(component.abs() < 1e-3, "residual {moments:?}");
    }
}

#[test]
fn cantilever_tip_point_load_matches_closed_form() {
    let mut model = build_cantilever(Element::frame("N1", "N2", "Steel", "W310"));
    let p = -10_000.0;
    model.add_node_load("N2", NodeLoad::fy(p, "Live")).unwrap();
    model.analyze().unwrap();

    // Default combination covers every load case
    assert_eq!(model.combo_names(), vec!["Combo 1".to_string()]);

    let tip = model.node_displacement("N2", "Combo 1").unwrap();
    assert_relative_eq!(tip.dy, p * L.powi(3) / (3.0 * E * IXX), max_relative = 1e-9);
    assert_relative_eq!(tip.rz, p * L.powi(2) / (2.0 * E * IXX), max_relative = 1e-9);

    let forces_i = model.member_forces_i("E1", "Combo 1").unwrap();
    assert_relative_eq!(forces_i.moment_z, p * L, max_relative = 1e-9);
    let forces_j = model.member_forces_j("E1", "Combo 1").unwrap();
    assert_relative_eq!(forces_j.moment_z, 0.0, epsilon = 1e-3);
    assert_relative_eq!(forces_j.shear_y, -p, max_relative = 1e-9);
}

#[test]
fn beam_element_matches_frame_in_bending() {
    let mut model = build_cantilever(Element::beam("N1", "N2", "Steel", "W310"));
    model.add_node_load("N2", NodeLoad::fy(-10_000.0, "Case 1")).unwrap();
    model.add_node_load("N2", NodeLoad::fz(2_000.0, "Case 1")).unwrap();
    model.analyze().unwrap();

    let tip = model.node_displacement("N2", "Combo 1").unwrap();
    assert_relative_eq!(tip.dy, -10_000.0 * L.powi(3) / (3.0 * E * IXX), max_relative = 1e-9);
    assert_relative_eq!(tip.dz, 2_000.0 * L.powi(3) / (3.0 * E * 0.87e6), max_relative = 1e-9);
    assert_eq!(tip.dx, 0.0);

    // Beams carry no axial or torsion DOFs
    let node = model.solution("Combo 1").unwrap().node("N2").unwrap();
    assert_eq!(node.displacement_at(Dof::UX), None);
    assert_eq!(node.displacement_at(Dof::RX), None);

    let results = model.element_results("E1", "Combo 1").unwrap();
    assert_eq!(results.nx(0.0).unwrap(), 0.0);
    assert_eq!(results.tx(0.0).unwrap(), 0.0);
    assert_relative_eq!(results.my(0.0).unwrap(), 2_000.0 * L, max_relative = 1e-9);
}

#[test]
fn beam_element_must_lie_along_global_x() {
    let mut model = Model::new();
    model.add_material("Steel", Material::steel_mm()).unwrap();
    model.add_section("W310", Section::new(1_910.0, IXX, 0.87e6, 17.7e3)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(3_000.0, 4_000.0, 0.0)).unwrap();
    model.add_element("E1", Element::beam("N1", "N2", "Steel", "W310")).unwrap();
    model.add_support("N1", Support::fixed()).unwrap();

    let err = model.preprocess().unwrap_err();
    assert!(matches!(err, MsaError::InvalidGeometry { .. }), "{err}");
    assert_eq!(err.kind(), ErrorKind::ElementGeometry);
}

#[test]
fn coincident_nodes_are_rejected() {
    let mut model = Model::new();
    model.add_material("Steel", Material::steel_mm()).unwrap();
    model.add_section("W310", Section::new(1_910.0, IXX, 0.87e6, 17.7e3)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_element("E1", Element::frame("N1", "N2", "Steel", "W310")).unwrap();
    model.add_support("N1", Support::fixed()).unwrap();

    let err = model.preprocess().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementGeometry);
}

#[test]
fn rolled_cantilever_bends_out_of_plane() {
    let element = Element::frame("N1", "N2", "Steel", "W310").with_roll(std::f64::consts::FRAC_PI_2);
    let mut model = build_cantilever(element);
    model
        .add_member_load("E1", MemberLoad::uniform(-1.0, LoadDirection::Fy, "Dead"))
        .unwrap();
    model.analyze().unwrap();

    // Local y now points along global Z
    let tip = model.node_displacement("N2", "Combo 1").unwrap();
    assert_relative_eq!(tip.dz, -30.517578125, max_relative = 1e-6);
    assert_relative_eq!(tip.dy, 0.0, epsilon = 1e-9);

    let rxn = model.node_reactions("N1", "Combo 1").unwrap();
    assert_relative_eq!(rxn.fz, 5_000.0, max_relative = 1e-9);
}

#[test]
fn self_weight_reaction() {
    let mut model = build_cantilever(Element::frame("N1", "N2", "Steel", "W310"));
    model.add_member_load("E1", MemberLoad::self_weight(1.0, "Dead")).unwrap();
    model.analyze().unwrap();

    // gamma * A * L
    let rxn = model.node_reactions("N1", "Combo 1").unwrap();
    assert_relative_eq!(rxn.fy, 749.675, max_relative = 1e-9);
    assert_relative_eq!(rxn.mz, 749.675 * L / 2.0, max_relative = 1e-9);
}

#[test]
fn stresses_from_section_properties() {
    let mut model = Model::new();
    model.add_material("Steel", Material::steel_mm()).unwrap();
    model.add_section("Rect", Section::rectangular(100.0, 200.0)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(2_000.0, 0.0, 0.0)).unwrap();
    model.add_element("E1", Element::frame("N1", "N2", "Steel", "Rect")).unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model.add_node_load("N2", NodeLoad::fy(-1_000.0, "Case 1")).unwrap();
    model.add_node_load("N2", NodeLoad::fx(20_000.0, "Case 1")).unwrap();
    model.analyze().unwrap();

    let results = model.element_results("E1", "Combo 1").unwrap();
    assert_relative_eq!(results.axial_stress(0.0).unwrap(), 1.0, max_relative = 1e-9);

    // Hogging root moment of 2e6 over S = 100 * 200^2 / 6
    let sx = 100.0 * 200.0_f64.powi(2) / 6.0;
    assert_relative_eq!(
        results.extreme_fibre_stress_about_z(0.0).unwrap(),
        -2.0e6 / sx,
        max_relative = 1e-9
    );
    // Top fibre in tension under hogging
    let top = results.normal_stress(0.0, 100.0, 0.0).unwrap();
    assert_relative_eq!(top, 1.0 + 2.0e6 / sx, max_relative = 1e-9);
}
