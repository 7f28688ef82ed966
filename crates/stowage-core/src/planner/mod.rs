use tracing::info;

use crate::cancel::CancelToken;
use crate::types::*;

mod run;
mod strategy;
mod summary;

pub use run::{expand_instances, Instance, PackingRun, RunOutcome};
pub use strategy::{compare_strategies, sort_instances, StrategyResult};
pub use summary::calculate_stats;

/// Packs a cargo list into one bin under the mode selected by the request.
pub struct Planner {
    request: PlanRequest,
    instances: Vec<Instance>,
}

impl Planner {
    /// Validates the request and resolves compound cargo up front.
    pub fn new(request: PlanRequest) -> Result<Self> {
        request.bin.validate()?;
        request.config().validate()?;

        if request.cargo.is_empty() {
            return Err(PackError::InvalidSpec(
                "At least one cargo item must be provided".to_string(),
            ));
        }

        let instances = expand_instances(&request.cargo, &request.config())?;

        Ok(Self { request, instances })
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Executes the plan and returns the packed items with their statistics.
    pub fn plan(&self) -> Result<PlanResult> {
        self.run(None)
    }

    /// Like [`Planner::plan`], polling `cancel` between instances.
    pub fn plan_with(&self, cancel: &CancelToken) -> Result<PlanResult> {
        self.run(Some(cancel))
    }

    fn run(&self, cancel: Option<&CancelToken>) -> Result<PlanResult> {
        let config = self.request.config();
        let requested = self.instances.len() as u32;

        let result = match self.request.mode {
            PlanMode::CompareAll => {
                let ranked =
                    compare_strategies(&self.request.bin, &self.instances, &config, cancel)?;
                let strategies = ranked
                    .iter()
                    .enumerate()
                    .map(|(rank, result)| result.report(rank))
                    .collect();

                let mut ranked = ranked.into_iter();
                let Some(best) = ranked.next() else {
                    return Err(PackError::InvalidSpec(
                        "No packing strategy was evaluated".to_string(),
                    ));
                };

                PlanResult {
                    placed: best.placed,
                    stats: best.stats,
                    failure: best.failure,
                    selected_strategy: Some(best.key),
                    strategies,
                }
            }
            PlanMode::FloorFirst | PlanMode::CornerFill => {
                let mut ordered = self.instances.clone();
                if let Some(key) = self.request.order {
                    sort_instances(&mut ordered, key);
                }

                let mut run = PackingRun::new(&self.request.bin, &config)?;
                if let Some(token) = cancel {
                    run = run.with_cancel(token);
                }
                let outcome = run.run(&ordered, Vec::new())?;
                let stats = calculate_stats(&self.request.bin, &outcome.placed, requested);

                PlanResult {
                    placed: outcome.placed,
                    stats,
                    failure: outcome.failure,
                    selected_strategy: self.request.order,
                    strategies: Vec::new(),
                }
            }
        };

        info!(
            "Plan complete: {}/{} placed, {:.2}% volume efficiency",
            result.stats.placed, result.stats.requested, result.stats.volume_efficiency
        );

        Ok(result)
    }
}
