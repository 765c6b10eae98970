//! MSA Solver Example - Braced Portal Frame

use anyhow::Context;
use msa_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== MSA Solver Example: Braced Portal Frame ===\n");

    // Units: N and mm
    let mut model = Model::new();

    model.add_material("Steel", Material::steel_mm())?;
    model.add_section("Column", Section::new(7_650.0, 126.0e6, 44.0e6, 0.55e6))?;
    model.add_section("Rafter", Section::rectangular(200.0, 450.0))?;
    model.add_section("Brace", Section::truss(1_200.0))?;

    //     N3 -------- N4
    //     |        /  |
    //     |     /     |
    //     |  /        |
    //     N1         N2
    //   Fixed      Pinned
    let height = 4_000.0;
    let span = 6_000.0;

    model.add_node("N1", Node::new(0.0, 0.0, 0.0))?;
    model.add_node("N2", Node::new(span, 0.0, 0.0))?;
    model.add_node("N3", Node::new(0.0, height, 0.0))?;
    model.add_node("N4", Node::new(span, height, 0.0))?;

    model.add_element("Col1", Element::frame("N1", "N3", "Steel", "Column"))?;
    model.add_element("Col2", Element::frame("N2", "N4", "Steel", "Column"))?;
    model.add_element(
        "Rafter",
        Element::frame("N3", "N4", "Steel", "Rafter").with_releases(MemberReleases::pin_j()),
    )?;
    model.add_element("Brace", Element::truss("N1", "N4", "Steel", "Brace"))?;

    model.add_support("N1", Support::fixed())?;
    model.add_support("N2", Support::pinned().and(Dof::RX).and(Dof::RY))?;

    // Dead: self weight plus 20 N/mm on the rafter
    model.add_load_case(LoadCase::dead())?;
    model.add_load_case(LoadCase::new("Wind").describe("Lateral wind at eaves"))?;
    for member in ["Col1", "Col2", "Rafter"] {
        model.add_member_load(member, MemberLoad::self_weight(1.0, "Dead"))?;
    }
    model.add_member_load(
        "Rafter",
        MemberLoad::uniform(-20.0, LoadDirection::FY, "Dead"),
    )?;
    model.add_node_load("N3", NodeLoad::fx(10_000.0, "Wind"))?;

    model.add_load_combo(LoadCombination::new("1.4D").with_case("Dead", 1.4))?;
    model.add_load_combo(
        LoadCombination::new("1.2D + 1.0W")
            .with_case("Dead", 1.2)
            .with_case("Wind", 1.0),
    )?;

    println!("Running linear analysis...\n");
    model.analyze().context("analysis failed")?;

    for combo_name in model.combo_names() {
        println!("=== Results for {} ===\n", combo_name);

        println!("Node Displacements:");
        for node_name in ["N1", "N2", "N3", "N4"] {
            let disp = model.node_displacement(node_name, &combo_name)?;
            println!(
                "  {}: DX={:.4}mm, DY={:.4}mm, RZ={:.6}rad",
                node_name, disp.dx, disp.dy, disp.rz
            );
        }

        println!("\nSupport Reactions:");
        for node_name in ["N1", "N2"] {
            let rxn = model.node_reactions(node_name, &combo_name)?;
            println!(
                "  {}: FX={:.2}kN, FY={:.2}kN, MZ={:.2}kN·m",
                node_name,
                rxn.fx / 1e3,
                rxn.fy / 1e3,
                rxn.mz / 1e6
            );
        }

        println!("\nMember Forces:");
        for member_name in ["Col1", "Col2", "Rafter", "Brace"] {
            let forces_i = model.member_forces_i(member_name, &combo_name)?;
            let forces_j = model.member_forces_j(member_name, &combo_name)?;
            println!(
                "  {}: N={:.2}kN, Vmax={:.2}kN, Mmax={:.2}kN·m",
                member_name,
                forces_i.axial / 1e3,
                forces_i.shear_y.abs().max(forces_j.shear_y.abs()) / 1e3,
                forces_i.moment_z.abs().max(forces_j.moment_z.abs()) / 1e6
            );
        }

        let rafter = model.element_results("Rafter", &combo_name)?;
        let midspan = rafter.length / 2.0;
        println!(
            "\nRafter midspan: Mz={:.2}kN·m, extreme fibre stress={:.1}MPa",
            rafter.mz(midspan)? / 1e6,
            rafter.extreme_fibre_stress_about_z(midspan)?
        );

        let solution = model.solution(&combo_name)?;
        for warning in &solution.warnings {
            println!("  Warning: {warning}");
        }

        let summary = model.summary(&combo_name)?;
        println!("\nSummary:");
        println!("  Max displacement: {:.4}mm at {}", summary.max_displacement, summary.max_disp_node);
        println!("  Max reaction: {:.2}kN at {}", summary.max_reaction / 1e3, summary.max_reaction_node);
        println!("  Max axial: {:.2}kN in {}", summary.max_axial / 1e3, summary.max_axial_member);
        println!("  Max moment: {:.2}kN·m in {}", summary.max_moment / 1e6, summary.max_moment_member);
        println!();
    }

    println!("=== Analysis Complete ===");
    Ok(())
}
