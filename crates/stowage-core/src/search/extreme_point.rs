use super::{settle, PlacementStrategy, Score};
use crate::types::*;

/// Extreme-point scan: candidate footprints come from the bin origin and the
/// corners of every placed item.
///
/// For each placed item the scan tries the spot right of it, behind it,
/// diagonally right-behind it, and on top of it. Cost is linear in the number
/// of placed items, which makes this the default search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremePointScan {
    priority: Priority,
}

impl ExtremePointScan {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }

    /// Candidate `(x, z)` footprints in generation order.
    fn candidates(placed: &[PlacedItem]) -> Vec<(i64, i64)> {
        let mut points = Vec::with_capacity(1 + placed.len() * 4);
        points.push((0, 0));

        for item in placed {
            let Position { x, z, .. } = item.position;
            let right = x + item.dims.width;
            let back = z + item.dims.length;

            points.push((right, z));
            points.push((x, back));
            points.push((right, back));
            points.push((x, z));
        }

        points
    }

    fn score(&self, position: Position) -> Score {
        match self.priority {
            Priority::FloorFirst => [position.y, position.z, position.x],
            Priority::CornerFill => [position.z, position.y, position.x],
        }
    }
}

impl Default for ExtremePointScan {
    fn default() -> Self {
        Self::new(Priority::FloorFirst)
    }
}

impl PlacementStrategy for ExtremePointScan {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn scan(
        &self,
        bin: &Bin,
        dims: Dimension,
        placed: &[PlacedItem],
    ) -> Option<(Position, Score)> {
        let mut best: Option<(Position, Score)> = None;

        for (x, z) in Self::candidates(placed) {
            let Some(position) = settle(bin, x, z, dims, placed) else {
                continue;
            };
            let score = self.score(position);

            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((position, score)),
            }
        }

        best
    }
}
