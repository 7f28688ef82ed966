//! Axis-aligned box primitives shared by every search and solver.

use crate::types::{Dimension, Orientation, Position};

/// All six orientations of `dim`, in [`Orientation::ALL`] order.
///
/// Cubes and other symmetric boxes yield repeated extents; callers do not
/// deduplicate them.
pub fn orientations(dim: Dimension) -> [(Orientation, Dimension); 6] {
    Orientation::ALL.map(|orientation| (orientation, orientation.apply(dim)))
}

/// Strict AABB intersection. Boxes sharing only a face do not overlap.
#[inline]
pub fn overlaps(pos_a: Position, dims_a: Dimension, pos_b: Position, dims_b: Dimension) -> bool {
    !(pos_a.x + dims_a.width <= pos_b.x
        || pos_b.x + dims_b.width <= pos_a.x
        || pos_a.y + dims_a.height <= pos_b.y
        || pos_b.y + dims_b.height <= pos_a.y
        || pos_a.z + dims_a.length <= pos_b.z
        || pos_b.z + dims_b.length <= pos_a.z)
}

/// Area of the XZ footprint.
#[inline]
pub fn footprint_area(dims: Dimension) -> i64 {
    dims.width * dims.length
}

/// Length of the overlap of `[a1, a2)` and `[b1, b2)`, at least 0.
#[inline]
pub fn overlap_1d(a1: i64, a2: i64, b1: i64, b2: i64) -> i64 {
    (a2.min(b2) - a1.max(b1)).max(0)
}

/// Overlap area of two XZ footprints.
pub fn footprint_overlap(
    pos_a: Position,
    dims_a: Dimension,
    pos_b: Position,
    dims_b: Dimension,
) -> i64 {
    let x = overlap_1d(
        pos_a.x,
        pos_a.x + dims_a.width,
        pos_b.x,
        pos_b.x + dims_b.width,
    );
    let z = overlap_1d(
        pos_a.z,
        pos_a.z + dims_a.length,
        pos_b.z,
        pos_b.z + dims_b.length,
    );
    x * z
}

/// Whether the box lies inside `[0, bin]` on every axis.
pub fn within_bounds(pos: Position, dims: Dimension, bin: Dimension) -> bool {
    pos.x >= 0
        && pos.y >= 0
        && pos.z >= 0
        && pos.x + dims.width <= bin.width
        && pos.y + dims.height <= bin.height
        && pos.z + dims.length <= bin.length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_are_permutations() {
        let dim = Dimension::new(100, 200, 300);
        let all = orientations(dim);
        assert_eq!(all.len(), 6);

        let mut seen: Vec<[i64; 3]> = all
            .iter()
            .map(|(_, d)| {
                let mut edges = [d.width, d.height, d.length];
                edges.sort_unstable();
                assert_eq!(edges, [100, 200, 300]);
                [d.width, d.height, d.length]
            })
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 6);
        assert_eq!(all[0], (Orientation::Whl, dim));
    }

    #[test]
    fn test_cube_orientations_not_deduplicated() {
        let cube = Dimension::new(400, 400, 400);
        let all = orientations(cube);
        assert!(all.iter().all(|(_, d)| *d == cube));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let d = Dimension::new(10, 10, 10);
        let origin = Position::new(0, 0, 0);
        assert!(!overlaps(origin, d, Position::new(10, 0, 0), d));
        assert!(!overlaps(origin, d, Position::new(0, 10, 0), d));
        assert!(!overlaps(origin, d, Position::new(0, 0, 10), d));
        assert!(overlaps(origin, d, Position::new(9, 9, 9), d));
    }

    #[test]
    fn test_footprint_overlap() {
        let d = Dimension::new(10, 5, 10);
        let area = footprint_overlap(Position::new(0, 0, 0), d, Position::new(5, 50, 5), d);
        assert_eq!(area, 25);
        assert_eq!(footprint_area(d), 100);
        assert_eq!(overlap_1d(0, 3, 5, 8), 0);
    }

    #[test]
    fn test_within_bounds() {
        let bin = Dimension::new(100, 100, 100);
        let d = Dimension::new(50, 50, 50);
        assert!(within_bounds(Position::new(50, 50, 50), d, bin));
        assert!(!within_bounds(Position::new(51, 0, 0), d, bin));
        assert!(!within_bounds(Position::new(-1, 0, 0), d, bin));
    }
}
