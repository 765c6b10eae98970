use approx::assert_relative_eq;
use msa_solver::prelude::*;

const E: f64 = 200_000.0;
const AREA: f64 = 1_000.0;

fn truss_model() -> Model {
    let mut model = Model::new();
    model.add_material("Steel", Material::isotropic(E, 0.3)).unwrap();
    model.add_section("Rod", Section::truss(AREA)).unwrap();
    model
}

/// Apex at the origin carried by four legs to supports below it
fn tetrapod() -> Model {
    let mut model = truss_model();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    let feet = [
        ("S1", 3_000.0, 3_000.0),
        ("S2", -3_000.0, 3_000.0),
        ("S3", -3_000.0, -3_000.0),
        ("S4", 3_000.0, -3_000.0),
    ];
    for (i, (name, x, z)) in feet.iter().enumerate() {
        model.add_node(name, Node::new(*x, -4_000.0, *z)).unwrap();
        model.add_support(name, Support::pinned()).unwrap();
        model
            .add_element(&format!("L{}", i + 1), Element::truss(name, "N1", "Steel", "Rod"))
            .unwrap();
    }
    model.add_node_load("N1", NodeLoad::fy(-10_000.0, "Case 1")).unwrap();
    model
}

#[test]
fn tetrapod_shares_load_equally() {
    let mut model = tetrapod();
    model.analyze().unwrap();

    let length = 34.0e6_f64.sqrt();
    for support in ["S1", "S2", "S3", "S4"] {
        let rxn = model.node_reactions(support, "Combo 1").unwrap();
        assert_relative_eq!(rxn.fy, 2_500.0, max_relative = 1e-9);
        assert_relative_eq!(rxn.force_magnitude(), 2_500.0 * length / 4_000.0, max_relative = 1e-9);
    }

    for leg in ["L1", "L2", "L3", "L4"] {
        let results = model.element_results(leg, "Combo 1").unwrap();
        assert_relative_eq!(results.nx(0.0).unwrap(), -3_644.344, max_relative = 1e-6);
        assert_relative_eq!(results.nx(results.length).unwrap(), results.nx(0.0).unwrap());
        assert_relative_eq!(results.axial_stress(0.0).unwrap(), -3.644344, max_relative = 1e-6);
        assert_eq!(results.vy(0.0).unwrap(), 0.0);
    }

    // P / sum(EA/l cos^2)
    let cos = 4_000.0 / length;
    let stiffness = 4.0 * E * AREA / length * cos * cos;
    let apex = model.node_displacement("N1", "Combo 1").unwrap();
    assert_relative_eq!(apex.dy, -10_000.0 / stiffness, max_relative = 1e-9);
    assert_relative_eq!(apex.dx, 0.0, epsilon = 1e-12);
    assert_relative_eq!(apex.dz, 0.0, epsilon = 1e-12);
}

#[test]
fn truss_nodes_only_number_translations() {
    let mut model = tetrapod();
    model.preprocess().unwrap();

    let registry = model.dof_registry().unwrap();
    assert_eq!(registry.len(), 15);
    assert_eq!(registry.free().len(), 3);
    let apex = model.node_index("N1").unwrap();
    assert!(registry.index(apex, Dof::RZ).is_none());
}

#[test]
fn planar_truss_with_out_of_plane_restraint() {
    let mut model = truss_model();
    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(4_000.0, 0.0, 0.0)).unwrap();
    model.add_node("N3", Node::new(2_000.0, 1_500.0, 0.0)).unwrap();
    model.add_element("T1", Element::truss("N1", "N3", "Steel", "Rod")).unwrap();
    model.add_element("T2", Element::truss("N3", "N2", "Steel", "Rod")).unwrap();
    model.add_element("T3", Element::truss("N1", "N2", "Steel", "Rod")).unwrap();
    model.add_support("N1", Support::pinned()).unwrap();
    model.add_support("N2", Support::from_dofs(&[Dof::UY, Dof::UZ])).unwrap();
    model.restrain("N3", Dof::UZ).unwrap();
    model.add_node_load("N3", NodeLoad::fy(-10_000.0, "Case 1")).unwrap();
    model.analyze().unwrap();

    // Each rafter carries P / (2 sin) with sin = 0.6
    for name in ["T1", "T2"] {
        let results = model.element_results(name, "Combo 1").unwrap();
        assert_relative_eq!(results.nx(0.0).unwrap(), -10_000.0 / 1.2, max_relative = 1e-9);
    }
    // The tie takes the horizontal thrust
    let tie = model.element_results("T3", "Combo 1").unwrap();
    assert_relative_eq!(tie.nx(2_000.0).unwrap(), 10_000.0 / 1.2 * 0.8, max_relative = 1e-9);

    let r1 = model.node_reactions("N1", "Combo 1").unwrap();
    assert_relative_eq!(r1.fx, 0.0, epsilon = 1e-6);
    assert_relative_eq!(r1.fy, 5_000.0, max_relative = 1e-9);
}

#[test]
fn member_loads_on_truss_are_rejected() {
    let mut model = tetrapod();
    model
        .add_member_load("L1", MemberLoad::uniform(-1.0, LoadDirection::FY, "Case 1"))
        .unwrap();

    let err = model.analyze().unwrap_err();
    assert!(matches!(err, MsaError::InvalidLoad { .. }), "{err}");
}

#[test]
fn moment_on_truss_node_is_undefined() {
    let mut model = tetrapod();
    model.add_node_load("N1", NodeLoad::mz(1_000.0, "Case 1")).unwrap();

    let err = model.analyze().unwrap_err();
    assert!(
        matches!(&err, MsaError::UndefinedDof { node, dof: Dof::RZ } if node == "N1"),
        "{err}"
    );
    assert_eq!(err.kind(), ErrorKind::DofConsistency);
}
