use approx::assert_relative_eq;
use stowage_core::*;

fn plan(bin: Bin, cargo: Vec<CargoSpec>, mode: PlanMode) -> PlanResult {
    let request = PlanRequest {
        bin,
        cargo,
        mode,
        order: None,
        search: SearchKind::ExtremePoint,
        grid_step: DEFAULT_GRID_STEP,
    };
    Planner::new(request).unwrap().plan().unwrap()
}

fn cube(id: &str, edge: i64, quantity: u32) -> CargoSpec {
    CargoSpec::simple(id, Dimension::new(edge, edge, edge), quantity)
}

#[test]
fn eight_cubes_fill_a_matching_bin() {
    let result = plan(
        Bin::new(800, 800, 800),
        vec![cube("Box", 400, 8)],
        PlanMode::FloorFirst,
    );

    assert_eq!(result.stats.placed, 8);
    assert_relative_eq!(result.stats.volume_efficiency, 100.0);

    let mut lattice: Vec<(i64, i64, i64)> = result
        .placed
        .iter()
        .map(|p| (p.position.x, p.position.y, p.position.z))
        .collect();
    lattice.sort_unstable();
    let mut expected = Vec::new();
    for x in [0, 400] {
        for y in [0, 400] {
            for z in [0, 400] {
                expected.push((x, y, z));
            }
        }
    }
    assert_eq!(lattice, expected);
}

#[test]
fn eight_cubes_in_a_larger_bin_stay_on_the_floor() {
    let result = plan(
        Bin::new(1200, 1200, 1200),
        vec![cube("Box", 400, 8)],
        PlanMode::FloorFirst,
    );

    assert_eq!(result.stats.placed, 8);
    assert!(result.placed.iter().all(|p| p.position.y == 0));
    assert_eq!(result.stats.max_stack_height, 400);
    assert_relative_eq!(
        result.stats.volume_efficiency,
        8.0 * 64.0 / 1728.0 * 100.0,
        epsilon = 1e-9
    );
}

#[test]
fn small_box_next_to_large_one_lands_beside_it() {
    let result = plan(
        Bin::new(1000, 1000, 1000),
        vec![cube("A", 900, 1), cube("B", 100, 1)],
        PlanMode::FloorFirst,
    );

    assert!(result.failure.is_none());
    assert_eq!(result.placed[0].position, Position::new(0, 0, 0));
    assert_eq!(result.placed[1].position, Position::new(900, 0, 0));
}

#[test]
fn box_too_large_for_the_gap_and_the_roof_is_a_capacity_failure() {
    let result = plan(
        Bin::new(1000, 1000, 1000),
        vec![cube("A", 900, 1), cube("B", 200, 1)],
        PlanMode::FloorFirst,
    );

    assert_eq!(result.placed.len(), 1);
    assert_eq!(result.placed[0].position, Position::new(0, 0, 0));
    assert_eq!(
        result.failure,
        Some(CapacityFailure {
            spec_id: "B".into(),
            spec_name: "B".into(),
            index: 0,
        })
    );
}

#[test]
fn exact_tiling_reaches_full_efficiency_in_some_strategy() {
    let result = plan(
        Bin::new(1200, 1000, 1200),
        vec![
            CargoSpec::simple("slab", Dimension::new(1200, 400, 1200), 1).with_weight(80.0),
            CargoSpec::simple("column", Dimension::new(600, 600, 400), 6).with_weight(20.0),
        ],
        PlanMode::CompareAll,
    );

    assert!(result
        .strategies
        .iter()
        .any(|s| (s.stats.volume_efficiency - 100.0).abs() < 1e-9));
    assert_relative_eq!(result.stats.volume_efficiency, 100.0);
}

#[test]
fn second_oversized_box_fails_and_first_is_kept() {
    let result = plan(
        Bin::new(1000, 1000, 1000),
        vec![cube("crate", 900, 2)],
        PlanMode::FloorFirst,
    );

    assert_eq!(result.placed.len(), 1);
    assert_eq!(result.placed[0].instance_id, "crate#1");

    let err: PackError = result.failure.unwrap().into();
    assert_eq!(
        err,
        PackError::Capacity {
            spec_id: "crate".into(),
            spec_name: "crate".into(),
            index: 1,
        }
    );
}

#[test]
fn drag_over_another_item_lands_on_top() {
    let session = PackingSession::new(Bin::new(1000, 1000, 1000))
        .unwrap()
        .add_cargo(cube("base", 500, 1))
        .unwrap()
        .session
        .add_cargo(cube("top", 300, 1))
        .unwrap()
        .session;
    assert_eq!(session.placed[1].position, Position::new(500, 0, 0));

    let (moved, outcome) = session.drag_move("top#1", 100, 100).unwrap();

    assert_eq!(outcome, DragOutcome::Moved { position: Position::new(100, 500, 100) });
    let base = &moved.placed[0];
    let top = &moved.placed[1];
    assert!(top.position.y >= base.top());
    assert!(!geometry::overlaps(top.position, top.dims, base.position, base.dims));
}

#[test]
fn drag_that_would_breach_the_ceiling_is_rejected() {
    let session = PackingSession::new(Bin::new(1000, 700, 1000))
        .unwrap()
        .add_cargo(cube("base", 500, 1))
        .unwrap()
        .session
        .add_cargo(cube("top", 300, 1))
        .unwrap()
        .session;

    let (after, outcome) = session.drag_move("top#1", 0, 0).unwrap();

    assert!(!outcome.is_moved());
    assert_eq!(after.placed, session.placed);
}

#[test]
fn compound_pallet_is_placed_as_one_unit() {
    let pallet = PalletBase {
        width: 1200,
        length: 800,
        deck_height: 144,
        max_stack_height: 1200,
    };
    let euro = CargoSpec::compound(
        "euro",
        pallet,
        vec![CargoSpec::simple("carton", Dimension::new(400, 300, 400), 12).with_weight(8.0)],
        2,
    )
    .with_weight(25.0);

    let result = plan(Bin::new(2400, 2600, 6000), vec![euro], PlanMode::FloorFirst);

    assert_eq!(result.placed.len(), 2);
    for unit in &result.placed {
        assert_eq!(unit.children.len(), 12);
        assert_relative_eq!(unit.weight, 25.0 + 12.0 * 8.0);
    }
    assert_eq!(result.placed[0].dims, Dimension::new(1200, 744, 800));
    assert_relative_eq!(result.stats.total_weight, 2.0 * (25.0 + 96.0));
}
