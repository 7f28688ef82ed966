//! Support validation for batch placement.

use crate::geometry::{footprint_area, footprint_overlap};
use crate::types::{Dimension, PlacedItem, Position};

/// Batch placement accepts only fully supported candidates.
pub const REQUIRED_SUPPORT: f64 = 1.0;

/// Max distance in mm between a base and a top surface that still counts as contact.
pub const SURFACE_TOLERANCE: i64 = 1;

/// Fraction of the footprint of a box at `pos` resting on surfaces at its base height.
///
/// Anything on the floor is fully supported.
pub fn support_ratio(pos: Position, dims: Dimension, placed: &[PlacedItem]) -> f64 {
    if pos.y <= 0 {
        return 1.0;
    }

    let base_area = footprint_area(dims);
    if base_area <= 0 {
        return 0.0;
    }

    let supported: i64 = placed
        .iter()
        .filter(|item| (item.top() - pos.y).abs() <= SURFACE_TOLERANCE)
        .map(|item| footprint_overlap(pos, dims, item.position, item.dims))
        .sum();

    (supported as f64 / base_area as f64).clamp(0.0, 1.0)
}

/// Whether a candidate satisfies the batch support rule.
pub fn is_supported(pos: Position, dims: Dimension, placed: &[PlacedItem]) -> bool {
    support_ratio(pos, dims, placed) >= REQUIRED_SUPPORT
}

/// Height at which a box with footprint `dims` at `(x, z)` comes to rest:
/// the highest top among placed items under its footprint, or the floor.
pub fn resting_height(x: i64, z: i64, dims: Dimension, placed: &[PlacedItem]) -> i64 {
    let probe = Position::new(x, 0, z);
    placed
        .iter()
        .filter(|item| footprint_overlap(probe, dims, item.position, item.dims) > 0)
        .map(PlacedItem::top)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;

    fn item(id: &str, pos: Position, dims: Dimension) -> PlacedItem {
        PlacedItem {
            instance_id: id.to_string(),
            spec_id: id.to_string(),
            spec_name: id.to_string(),
            index: 0,
            orientation: Orientation::Whl,
            dims,
            position: pos,
            weight: 0.0,
            bin_index: 0,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_floor_is_full_support() {
        let dims = Dimension::new(100, 100, 100);
        assert_eq!(support_ratio(Position::new(500, 0, 500), dims, &[]), 1.0);
    }

    #[test]
    fn test_partial_support_ratio() {
        let base = item("a", Position::new(0, 0, 0), Dimension::new(100, 100, 100));
        let dims = Dimension::new(100, 50, 100);
        let ratio = support_ratio(Position::new(50, 100, 0), dims, &[base]);
        assert!((ratio - 0.5).abs() < 1e-9);
        assert!(!is_supported(Position::new(50, 100, 0), dims, &[]));
    }

    #[test]
    fn test_support_within_tolerance() {
        let base = item("a", Position::new(0, 0, 0), Dimension::new(100, 100, 100));
        let dims = Dimension::new(100, 50, 100);
        assert!(is_supported(Position::new(0, 101, 0), dims, &[base.clone()]));
        assert!(!is_supported(Position::new(0, 102, 0), dims, &[base]));
    }

    #[test]
    fn test_resting_height_takes_tallest_column() {
        let placed = vec![
            item("low", Position::new(0, 0, 0), Dimension::new(100, 100, 100)),
            item("high", Position::new(100, 0, 0), Dimension::new(100, 300, 100)),
        ];
        let dims = Dimension::new(150, 10, 100);
        assert_eq!(resting_height(0, 0, dims, &placed), 300);
        assert_eq!(resting_height(0, 0, Dimension::new(100, 10, 100), &placed), 100);
        assert_eq!(resting_height(200, 0, dims, &placed), 0);
    }
}
