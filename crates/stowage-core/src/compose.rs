//! Composition of pallet sub-assemblies into single rigid cargo units.
//!
//! A compound cargo is packed onto its own pallet with the same search the
//! outer bin uses. The children are then frozen in the pallet's frame (deck
//! top at `y = 0`) and the assembly travels as its bounding box: the pallet
//! footprint, and a height reaching from the bottom of the deck to the
//! tallest child top.
//!
//! Rotating the assembly during outer placement rotates only the bounding
//! box; the frozen children keep their pallet-frame coordinates.

use tracing::debug;

use crate::planner::{expand_instances, PackingRun};
use crate::types::*;

/// Effective outer shape of a cargo spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCargo {
    pub dims: Dimension,
    /// Per-instance weight, including children for compounds
    pub weight: f64,
    pub children: Vec<PlacedItem>,
}

/// Validates `spec` and folds it into one box.
pub fn resolve_cargo(spec: &CargoSpec, config: &PackingConfig) -> Result<ResolvedCargo> {
    spec.validate()?;

    match &spec.kind {
        CargoKind::Simple(dims) => Ok(ResolvedCargo {
            dims: *dims,
            weight: spec.weight,
            children: Vec::new(),
        }),
        CargoKind::Compound { pallet, children } => {
            let children = pack_pallet(pallet, children, config)?;
            let dims = bounding_box(pallet, &children);
            let weight = spec.weight + children.iter().map(|c| c.weight).sum::<f64>();

            debug!(
                "Compound '{}' resolved to {}x{}x{} with {} children",
                spec.id,
                dims.width,
                dims.height,
                dims.length,
                children.len()
            );

            Ok(ResolvedCargo {
                dims,
                weight,
                children,
            })
        }
    }
}

/// Packs the children of a compound onto its pallet. Every child must fit.
pub fn pack_pallet(
    pallet: &PalletBase,
    children: &[CargoSpec],
    config: &PackingConfig,
) -> Result<Vec<PlacedItem>> {
    let sub_bin = Bin::new(pallet.width, pallet.max_stack_height, pallet.length);
    let instances = expand_instances(children, config)?;

    PackingRun::new(&sub_bin, config)?
        .run(&instances, Vec::new())?
        .into_result()
}

/// Tight box over the pallet footprint and the tallest child.
pub fn bounding_box(pallet: &PalletBase, children: &[PlacedItem]) -> Dimension {
    let stack = children.iter().map(PlacedItem::top).max().unwrap_or(0);
    Dimension::new(pallet.width, pallet.deck_height + stack, pallet.length)
}

/// Drops every placed item derived from `spec_id`, ahead of re-inserting a
/// recomputed version of that spec.
pub fn remove_derived(placed: &[PlacedItem], spec_id: &str) -> Vec<PlacedItem> {
    placed
        .iter()
        .filter(|item| item.spec_id != spec_id)
        .cloned()
        .collect()
}
