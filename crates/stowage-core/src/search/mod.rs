//! Placement search: finds a legal resting position for one item against the
//! currently placed set.
//!
//! Both strategies derive the resting height of a candidate footprint from the
//! items underneath it, so a candidate never interpenetrates anything already
//! placed. They differ only in which footprints they try and how they rank
//! the survivors.

use crate::geometry::orientations;
use crate::support::{is_supported, resting_height};
use crate::types::*;

mod extreme_point;
mod heightmap;
#[cfg(test)]
mod tests;

pub use extreme_point::ExtremePointScan;
pub use heightmap::GridHeightmapScan;

/// Lexicographic candidate score; lower is better.
pub type Score = [i64; 3];

/// Where and how an item was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub orientation: Orientation,
    pub dims: Dimension,
    pub position: Position,
}

/// A way of searching positions for one oriented item.
pub trait PlacementStrategy {
    fn priority(&self) -> Priority;

    /// Best position for an item with extent `dims`, if any candidate survives.
    fn scan(&self, bin: &Bin, dims: Dimension, placed: &[PlacedItem])
        -> Option<(Position, Score)>;

    /// Tries all six orientations of `base`.
    ///
    /// Floor-first keeps the best score across every orientation, earlier
    /// orientations winning ties. Corner-fill stops at the first orientation
    /// that yields any position.
    fn place(&self, bin: &Bin, base: Dimension, placed: &[PlacedItem]) -> Option<Placement> {
        let mut best: Option<(Placement, Score)> = None;

        for (orientation, dims) in orientations(base) {
            let Some((position, score)) = self.scan(bin, dims, placed) else {
                continue;
            };
            let placement = Placement {
                orientation,
                dims,
                position,
            };

            if self.priority() == Priority::CornerFill {
                return Some(placement);
            }

            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((placement, score)),
            }
        }

        best.map(|(placement, _)| placement)
    }
}

/// Builds the strategy selected by `config`.
pub fn strategy_for(config: &PackingConfig) -> Box<dyn PlacementStrategy + Send + Sync> {
    match config.search {
        SearchKind::ExtremePoint => Box::new(ExtremePointScan::new(config.priority)),
        SearchKind::GridHeightmap => {
            Box::new(GridHeightmapScan::new(config.grid_step, config.priority))
        }
    }
}

/// Resting position of a footprint at `(x, z)`, if it stays inside the bin
/// and is fully supported.
pub(crate) fn settle(
    bin: &Bin,
    x: i64,
    z: i64,
    dims: Dimension,
    placed: &[PlacedItem],
) -> Option<Position> {
    if x < 0 || z < 0 || x + dims.width > bin.width || z + dims.length > bin.length {
        return None;
    }

    let y = resting_height(x, z, dims, placed);
    if y + dims.height > bin.height {
        return None;
    }

    let position = Position::new(x, y, z);
    is_supported(position, dims, placed).then_some(position)
}
