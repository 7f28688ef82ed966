use std::cmp::Ordering;

use tracing::{debug, info};

use super::run::{Instance, PackingRun};
use super::summary::calculate_stats;
use crate::cancel::CancelToken;
use crate::geometry::footprint_area;
use crate::types::*;

/// Outcome of packing under one ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub key: SortKey,
    pub placed: Vec<PlacedItem>,
    pub failure: Option<CapacityFailure>,
    pub stats: PackingStats,
}

impl StrategyResult {
    pub fn report(&self, rank: usize) -> StrategyReport {
        StrategyReport {
            rank,
            key: self.key,
            stats: self.stats.clone(),
            failure: self.failure.clone(),
        }
    }
}

/// Stable sort of `instances` by `key`.
pub fn sort_instances(instances: &mut [Instance], key: SortKey) {
    match key {
        SortKey::VolumeDesc => instances.sort_by(|a, b| b.volume().cmp(&a.volume())),
        SortKey::WeightDesc => instances.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::HeightAsc => instances.sort_by(|a, b| a.base.height.cmp(&b.base.height)),
        SortKey::FootprintDesc => instances
            .sort_by(|a, b| footprint_area(b.base).cmp(&footprint_area(a.base))),
        SortKey::VolumeAsc => instances.sort_by(|a, b| a.volume().cmp(&b.volume())),
    }
}

/// Runs one independent packing run per ordering, each from an empty bin,
/// and ranks the results by volume efficiency, best first.
///
/// The ranking sort is stable: equally efficient orderings keep their
/// [`SortKey::ALL`] order.
pub fn compare_strategies(
    bin: &Bin,
    instances: &[Instance],
    config: &PackingConfig,
    cancel: Option<&CancelToken>,
) -> Result<Vec<StrategyResult>> {
    let mut run = PackingRun::new(bin, config)?;
    if let Some(token) = cancel {
        run = run.with_cancel(token);
    }

    let requested = instances.len() as u32;
    let mut results = Vec::with_capacity(SortKey::ALL.len());

    for key in SortKey::ALL {
        let mut ordered = instances.to_vec();
        sort_instances(&mut ordered, key);

        let outcome = run.run(&ordered, Vec::new())?;
        let stats = calculate_stats(bin, &outcome.placed, requested);

        debug!(
            "Strategy {}: {}/{} placed, {:.2}% efficiency",
            key.label(),
            stats.placed,
            stats.requested,
            stats.volume_efficiency
        );

        results.push(StrategyResult {
            key,
            placed: outcome.placed,
            failure: outcome.failure,
            stats,
        });
    }

    results.sort_by(|a, b| {
        b.stats
            .volume_efficiency
            .partial_cmp(&a.stats.volume_efficiency)
            .unwrap_or(Ordering::Equal)
    });

    if let Some(best) = results.first() {
        info!(
            "Best strategy: {} at {:.2}% efficiency",
            best.key.label(),
            best.stats.volume_efficiency
        );
    }

    Ok(results)
}
