//! Interactive drag solver.
//!
//! Dragging moves an item in the floor plane and lets it drop onto whatever
//! lies underneath. Unlike batch placement it does not require full support:
//! it only keeps items from interpenetrating and from poking through the
//! ceiling, so a user can leave an item overhanging an edge.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::*;

/// Other items' footprints are shrunk by this much on every side before the
/// overlap test, so boxes that merely touch do not lift the dragged item.
pub const DRAG_EDGE_MARGIN: f64 = 0.5;

/// Result of a drag proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    Moved { position: Position },
    /// The item would rise past the ceiling; it stays where it was
    Rejected {
        kept: Position,
        required_height: i64,
    },
}

impl DragOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DragOutcome::Moved { .. })
    }

    /// Position the item ends up at.
    pub fn position(&self) -> Position {
        match *self {
            DragOutcome::Moved { position } => position,
            DragOutcome::Rejected { kept, .. } => kept,
        }
    }
}

/// Resolves a drag of `instance_id` to the floor-plan point `(x, z)`.
///
/// The point is clamped into the bin, then the item drops to the highest
/// top among the other items under its footprint, or to the floor.
pub fn resolve_drag(
    bin: &Bin,
    placed: &[PlacedItem],
    instance_id: &str,
    x: i64,
    z: i64,
) -> Result<DragOutcome> {
    let item = placed
        .iter()
        .find(|item| item.instance_id == instance_id)
        .ok_or_else(|| PackError::UnknownInstance(instance_id.to_string()))?;

    let x = x.min(bin.width - item.dims.width).max(0);
    let z = z.min(bin.length - item.dims.length).max(0);

    let y = placed
        .iter()
        .filter(|other| other.instance_id != instance_id)
        .filter(|other| footprints_touch(x, z, item.dims, other))
        .map(PlacedItem::top)
        .max()
        .unwrap_or(0);

    let required_height = y + item.dims.height;
    if required_height > bin.height {
        warn!(
            "Rejected drag of {}: top would reach {} above a {} ceiling",
            instance_id, required_height, bin.height
        );
        return Ok(DragOutcome::Rejected {
            kept: item.position,
            required_height,
        });
    }

    let position = Position::new(x, y, z);
    debug!(
        "Dragged {} to ({}, {}, {})",
        instance_id, position.x, position.y, position.z
    );
    Ok(DragOutcome::Moved { position })
}

/// Copy of `placed` with the outcome of a drag applied to `instance_id`.
pub fn apply_drag(
    placed: &[PlacedItem],
    instance_id: &str,
    outcome: DragOutcome,
) -> Vec<PlacedItem> {
    placed
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if item.instance_id == instance_id {
                item.position = outcome.position();
            }
            item
        })
        .collect()
}

fn footprints_touch(x: i64, z: i64, dims: Dimension, other: &PlacedItem) -> bool {
    let (x, z) = (x as f64, z as f64);
    let ox1 = other.position.x as f64 + DRAG_EDGE_MARGIN;
    let ox2 = (other.position.x + other.dims.width) as f64 - DRAG_EDGE_MARGIN;
    let oz1 = other.position.z as f64 + DRAG_EDGE_MARGIN;
    let oz2 = (other.position.z + other.dims.length) as f64 - DRAG_EDGE_MARGIN;

    x < ox2 && x + dims.width as f64 > ox1 && z < oz2 && z + dims.length as f64 > oz1
}
