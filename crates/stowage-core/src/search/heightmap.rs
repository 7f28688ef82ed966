use super::{settle, PlacementStrategy, Score};
use crate::types::*;

/// Grid-heightmap scan: tries every lattice column of the floor plan.
///
/// Simpler than [`super::ExtremePointScan`] but limited by the lattice step
/// and quadratic in bin area. Kept as a reference search and a fallback for
/// small loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHeightmapScan {
    step: i64,
    priority: Priority,
}

impl GridHeightmapScan {
    /// `step` must be positive; non-positive values fall back to the default.
    pub fn new(step: i64, priority: Priority) -> Self {
        let step = if step > 0 { step } else { DEFAULT_GRID_STEP };
        Self { step, priority }
    }

    pub fn step(&self) -> i64 {
        self.step
    }
}

impl Default for GridHeightmapScan {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_STEP, Priority::FloorFirst)
    }
}

impl PlacementStrategy for GridHeightmapScan {
    fn priority(&self) -> Priority {
        self.priority
    }

    /// Lowest resting column wins; ties go to scan order, x outer and z inner.
    fn scan(
        &self,
        bin: &Bin,
        dims: Dimension,
        placed: &[PlacedItem],
    ) -> Option<(Position, Score)> {
        let mut best: Option<(Position, Score)> = None;
        let mut scan_index = 0;

        let mut x = 0;
        while x + dims.width <= bin.width {
            let mut z = 0;
            while z + dims.length <= bin.length {
                if let Some(position) = settle(bin, x, z, dims, placed) {
                    let score = [position.y, scan_index, 0];
                    match best {
                        Some((_, best_score)) if score >= best_score => {}
                        _ => best = Some((position, score)),
                    }
                }
                scan_index += 1;
                z += self.step;
            }
            x += self.step;
        }

        best
    }
}
