use super::*;

fn placed(id: &str, position: Position, dims: Dimension) -> PlacedItem {
    PlacedItem {
        instance_id: id.to_string(),
        spec_id: id.to_string(),
        spec_name: id.to_string(),
        index: 0,
        orientation: Orientation::Whl,
        dims,
        position,
        weight: 0.0,
        bin_index: 0,
        children: Vec::new(),
    }
}

#[test]
fn test_first_item_goes_to_origin() {
    let bin = Bin::new(1200, 1200, 1200);
    let strategy = ExtremePointScan::default();

    let placement = strategy
        .place(&bin, Dimension::new(400, 400, 400), &[])
        .unwrap();

    assert_eq!(placement.position, Position::new(0, 0, 0));
    assert_eq!(placement.orientation, Orientation::Whl);
}

#[test]
fn test_floor_first_fills_row_before_depth() {
    let bin = Bin::new(1200, 1200, 1200);
    let cube = Dimension::new(400, 400, 400);
    let strategy = ExtremePointScan::new(Priority::FloorFirst);
    let existing = vec![placed("a", Position::new(0, 0, 0), cube)];

    let placement = strategy.place(&bin, cube, &existing).unwrap();

    assert_eq!(placement.position, Position::new(400, 0, 0));
}

#[test]
fn test_corner_fill_prefers_depth_and_first_orientation() {
    let bin = Bin::new(600, 1000, 1000);
    let existing = vec![placed(
        "a",
        Position::new(0, 0, 0),
        Dimension::new(500, 100, 500),
    )];
    let item = Dimension::new(500, 100, 500);

    let corner = ExtremePointScan::new(Priority::CornerFill)
        .place(&bin, item, &existing)
        .unwrap();
    assert_eq!(corner.orientation, Orientation::Whl);
    assert_eq!(corner.position, Position::new(0, 100, 0));

    let floor = ExtremePointScan::new(Priority::FloorFirst)
        .place(&bin, item, &existing)
        .unwrap();
    assert_eq!(floor.orientation, Orientation::Hwl);
    assert_eq!(floor.dims, Dimension::new(100, 500, 500));
    assert_eq!(floor.position, Position::new(500, 0, 0));
}

#[test]
fn test_overhang_is_rejected() {
    let bin = Bin::new(200, 200, 100);
    let existing = vec![placed(
        "a",
        Position::new(0, 0, 0),
        Dimension::new(100, 100, 100),
    )];

    let placement = ExtremePointScan::default()
        .place(&bin, Dimension::new(150, 50, 100), &existing)
        .unwrap();

    assert_eq!(placement.position, Position::new(100, 0, 0));
    assert_eq!(placement.dims, Dimension::new(50, 150, 100));
}

#[test]
fn test_no_position_when_full() {
    let bin = Bin::new(1000, 1000, 1000);
    let big = Dimension::new(900, 900, 900);
    let existing = vec![placed("a", Position::new(0, 0, 0), big)];

    assert!(ExtremePointScan::default()
        .place(&bin, big, &existing)
        .is_none());
    assert!(GridHeightmapScan::default()
        .place(&bin, big, &existing)
        .is_none());
}

#[test]
fn test_item_larger_than_bin() {
    let bin = Bin::new(100, 100, 100);
    let item = Dimension::new(50, 50, 150);

    assert!(ExtremePointScan::default().place(&bin, item, &[]).is_none());
    assert!(GridHeightmapScan::default().place(&bin, item, &[]).is_none());
}

#[test]
fn test_heightmap_follows_scan_order() {
    let bin = Bin::new(100, 100, 100);
    let cube = Dimension::new(50, 50, 50);
    let existing = vec![placed("a", Position::new(0, 0, 0), cube)];

    let grid = GridHeightmapScan::new(25, Priority::FloorFirst)
        .place(&bin, cube, &existing)
        .unwrap();
    assert_eq!(grid.position, Position::new(0, 0, 50));

    let extreme = ExtremePointScan::default()
        .place(&bin, cube, &existing)
        .unwrap();
    assert_eq!(extreme.position, Position::new(50, 0, 0));
}

#[test]
fn test_heightmap_is_resolution_limited() {
    let bin = Bin::new(110, 50, 50);
    let cube = Dimension::new(50, 50, 50);
    let existing = vec![placed(
        "a",
        Position::new(0, 0, 0),
        Dimension::new(60, 50, 50),
    )];

    assert!(GridHeightmapScan::new(25, Priority::FloorFirst)
        .place(&bin, cube, &existing)
        .is_none());

    let extreme = ExtremePointScan::default()
        .place(&bin, cube, &existing)
        .unwrap();
    assert_eq!(extreme.position, Position::new(60, 0, 0));
}

#[test]
fn test_stacks_on_top_when_floor_is_full() {
    let bin = Bin::new(400, 800, 400);
    let cube = Dimension::new(400, 400, 400);
    let existing = vec![placed("a", Position::new(0, 0, 0), cube)];

    for strategy in [
        strategy_for(&PackingConfig::default()),
        strategy_for(&PackingConfig::default().with_search(SearchKind::GridHeightmap)),
    ] {
        let placement = strategy.place(&bin, cube, &existing).unwrap();
        assert_eq!(placement.position, Position::new(0, 400, 0));
    }
}

#[test]
fn test_grid_step_fallback() {
    assert_eq!(GridHeightmapScan::new(0, Priority::FloorFirst).step(), 25);
    assert_eq!(GridHeightmapScan::new(10, Priority::FloorFirst).step(), 10);
}
