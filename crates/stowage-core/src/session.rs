//! Explicit planning session: a bin, its cargo list and the current packed set.
//!
//! Every operation borrows the session and returns a new snapshot, so a
//! caller can keep the previous state around for undo or for discarding a
//! result that arrived after a newer request.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cancel::CancelToken;
use crate::compose::remove_derived;
use crate::planner::{
    calculate_stats, compare_strategies, expand_instances, sort_instances, PackingRun,
    StrategyResult,
};
use crate::reposition::{apply_drag, resolve_drag, DragOutcome};
use crate::support::is_supported;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingSession {
    pub bin: Bin,
    #[serde(default)]
    pub config: PackingConfig,
    #[serde(default)]
    pub specs: Vec<CargoSpec>,
    #[serde(default)]
    pub placed: Vec<PlacedItem>,
}

/// New snapshot plus the instance that could not be placed, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub session: PackingSession,
    pub failure: Option<CapacityFailure>,
}

impl PackingSession {
    pub fn new(bin: Bin) -> Result<Self> {
        bin.validate()?;
        Ok(Self {
            bin,
            config: PackingConfig::default(),
            specs: Vec::new(),
            placed: Vec::new(),
        })
    }

    pub fn with_config(mut self, config: PackingConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Number of instances across all specs.
    pub fn requested(&self) -> u32 {
        self.specs.iter().map(|spec| spec.quantity).sum()
    }

    pub fn stats(&self) -> PackingStats {
        calculate_stats(&self.bin, &self.placed, self.requested())
    }

    /// Adds `spec`, or replaces the spec with the same id, and places its
    /// instances around the items already in the bin.
    ///
    /// Replacing removes every item derived from the old spec first; a
    /// compound's sub-layout is recomputed from scratch. If that leaves
    /// anything that was resting on the old items without support, the
    /// whole set is rebuilt in spec order instead.
    pub fn add_cargo(&self, spec: CargoSpec) -> Result<SessionUpdate> {
        let instances = expand_instances(std::slice::from_ref(&spec), &self.config)?;

        let mut specs = self.specs.clone();
        match specs.iter_mut().find(|existing| existing.id == spec.id) {
            Some(existing) => *existing = spec.clone(),
            None => specs.push(spec.clone()),
        }

        let kept = remove_derived(&self.placed, &spec.id);
        if lost_support(&self.placed, &kept) {
            info!("Replacing '{}' unsettled stacked items, rebuilding", spec.id);
            return self.with_specs(specs).arrange(None, None);
        }

        let outcome = PackingRun::new(&self.bin, &self.config)?.run(&instances, kept)?;

        Ok(SessionUpdate {
            session: Self {
                bin: self.bin.clone(),
                config: self.config,
                specs,
                placed: outcome.placed,
            },
            failure: outcome.failure,
        })
    }

    /// Drops a spec and everything placed from it.
    ///
    /// Items stacked on the removed ones would be left floating, so in that
    /// case the remaining specs are re-arranged from an empty bin.
    pub fn remove_cargo(&self, spec_id: &str) -> Result<SessionUpdate> {
        let specs = self
            .specs
            .iter()
            .filter(|spec| spec.id != spec_id)
            .cloned()
            .collect();
        let kept = remove_derived(&self.placed, spec_id);

        if lost_support(&self.placed, &kept) {
            info!("Removing '{}' unsettled stacked items, rebuilding", spec_id);
            return self.with_specs(specs).arrange(None, None);
        }

        Ok(SessionUpdate {
            session: Self {
                bin: self.bin.clone(),
                config: self.config,
                specs,
                placed: kept,
            },
            failure: None,
        })
    }

    /// Discards the packed set and rebuilds it from the spec list.
    ///
    /// `order` sorts the expanded instances first; `None` keeps spec order.
    pub fn auto_arrange(&self, order: Option<SortKey>) -> Result<SessionUpdate> {
        self.arrange(order, None)
    }

    pub fn auto_arrange_with(
        &self,
        order: Option<SortKey>,
        cancel: &CancelToken,
    ) -> Result<SessionUpdate> {
        self.arrange(order, Some(cancel))
    }

    fn arrange(
        &self,
        order: Option<SortKey>,
        cancel: Option<&CancelToken>,
    ) -> Result<SessionUpdate> {
        let mut instances = expand_instances(&self.specs, &self.config)?;
        if let Some(key) = order {
            sort_instances(&mut instances, key);
        }

        let mut run = PackingRun::new(&self.bin, &self.config)?;
        if let Some(token) = cancel {
            run = run.with_cancel(token);
        }
        let outcome = run.run(&instances, Vec::new())?;

        info!(
            "Auto-arranged {} of {} instances",
            outcome.placed.len(),
            instances.len()
        );

        Ok(SessionUpdate {
            session: self.with_placed(outcome.placed),
            failure: outcome.failure,
        })
    }

    /// Ranks all orderings against an empty copy of the bin. The session
    /// itself is untouched; pick a result with [`PackingSession::apply_strategy`].
    pub fn compare_strategies(
        &self,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<StrategyResult>> {
        let instances = expand_instances(&self.specs, &self.config)?;
        compare_strategies(&self.bin, &instances, &self.config, cancel)
    }

    pub fn apply_strategy(&self, result: &StrategyResult) -> Self {
        self.with_placed(result.placed.clone())
    }

    /// Moves one placed item to the floor-plan point `(x, z)`.
    ///
    /// A rejected move returns an unchanged snapshot alongside the outcome.
    pub fn drag_move(&self, instance_id: &str, x: i64, z: i64) -> Result<(Self, DragOutcome)> {
        let outcome = resolve_drag(&self.bin, &self.placed, instance_id, x, z)?;
        let placed = apply_drag(&self.placed, instance_id, outcome);
        Ok((self.with_placed(placed), outcome))
    }

    fn with_placed(&self, placed: Vec<PlacedItem>) -> Self {
        Self {
            bin: self.bin.clone(),
            config: self.config,
            specs: self.specs.clone(),
            placed,
        }
    }

    fn with_specs(&self, specs: Vec<CargoSpec>) -> Self {
        Self {
            bin: self.bin.clone(),
            config: self.config,
            specs,
            placed: Vec::new(),
        }
    }
}

/// Whether an item of `kept` that was fully supported in `before` no longer is.
///
/// Items a drag left overhanging were never supported and are ignored.
fn lost_support(before: &[PlacedItem], kept: &[PlacedItem]) -> bool {
    kept.iter()
        .filter(|item| item.position.y > 0)
        .any(|item| rests_fully(item, before) && !rests_fully(item, kept))
}

fn rests_fully(item: &PlacedItem, set: &[PlacedItem]) -> bool {
    let others: Vec<PlacedItem> = set
        .iter()
        .filter(|other| other.instance_id != item.instance_id)
        .cloned()
        .collect();
    is_supported(item.position, item.dims, &others)
}
