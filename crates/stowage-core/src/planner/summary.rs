use crate::geometry::footprint_area;
use crate::types::*;

/// Computes utilization, stack height and weight statistics for a packed set.
pub fn calculate_stats(bin: &Bin, placed: &[PlacedItem], requested: u32) -> PackingStats {
    let bin_volume = bin.volume();
    let placed_volume = placed
        .iter()
        .map(PlacedItem::volume)
        .fold(0i64, i64::saturating_add);
    let volume_efficiency = if bin_volume > 0 {
        (placed_volume as f64 / bin_volume as f64) * 100.0
    } else {
        0.0
    };

    let max_stack_height = placed.iter().map(PlacedItem::top).max().unwrap_or(0);
    let total_weight: f64 = placed.iter().map(|item| item.weight).sum();
    let over_weight_limit = bin
        .max_weight
        .map(|limit| total_weight > limit)
        .unwrap_or(false);

    PackingStats {
        requested,
        placed: placed.len() as u32,
        placed_volume,
        bin_volume,
        volume_efficiency,
        max_stack_height,
        total_weight,
        over_weight_limit,
        center_of_gravity: center_of_gravity(placed),
    }
}

/// Weight-weighted centroid of the placed boxes.
///
/// When nothing carries weight the footprint area stands in for it, so an
/// unweighted load still gets a balance point.
fn center_of_gravity(placed: &[PlacedItem]) -> Option<Centroid> {
    if placed.is_empty() {
        return None;
    }

    let by_weight = placed.iter().any(|item| item.weight > 0.0);
    let mass = |item: &PlacedItem| {
        if by_weight {
            item.weight
        } else {
            footprint_area(item.dims) as f64
        }
    };

    let total: f64 = placed.iter().map(mass).sum();
    if total <= 0.0 {
        return None;
    }

    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    for item in placed {
        let m = mass(item);
        x += m * (item.position.x as f64 + item.dims.width as f64 / 2.0);
        y += m * (item.position.y as f64 + item.dims.height as f64 / 2.0);
        z += m * (item.position.z as f64 + item.dims.length as f64 / 2.0);
    }

    Some(Centroid {
        x: x / total,
        y: y / total,
        z: z / total,
    })
}
