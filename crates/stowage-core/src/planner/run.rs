use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::compose::resolve_cargo;
use crate::search::{strategy_for, Placement, PlacementStrategy};
use crate::types::*;

/// One unit of cargo to place, with compound specs already folded into a
/// single rigid box.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub spec_id: String,
    pub spec_name: String,
    pub index: u32,
    /// Effective unoriented extent
    pub base: Dimension,
    pub weight: f64,
    pub children: Vec<PlacedItem>,
}

impl Instance {
    pub fn instance_id(&self) -> String {
        format!("{}#{}", self.spec_id, self.index + 1)
    }

    pub fn volume(&self) -> i64 {
        self.base.volume()
    }

    pub fn into_placed(self, placement: Placement) -> PlacedItem {
        PlacedItem {
            instance_id: self.instance_id(),
            spec_id: self.spec_id,
            spec_name: self.spec_name,
            index: self.index,
            orientation: placement.orientation,
            dims: placement.dims,
            position: placement.position,
            weight: self.weight,
            bin_index: 0,
            children: self.children,
        }
    }

    pub fn failure(&self) -> CapacityFailure {
        CapacityFailure {
            spec_id: self.spec_id.clone(),
            spec_name: self.spec_name.clone(),
            index: self.index,
        }
    }
}

/// Validates `specs` and duplicates each according to its quantity, in spec
/// order. Compound specs are packed onto their pallets here.
pub fn expand_instances(specs: &[CargoSpec], config: &PackingConfig) -> Result<Vec<Instance>> {
    let mut seen = HashSet::new();
    let mut instances = Vec::new();

    for spec in specs {
        if !seen.insert(spec.id.as_str()) {
            return Err(PackError::InvalidSpec(format!(
                "Cargo id '{}' is used more than once",
                spec.id
            )));
        }

        let resolved = resolve_cargo(spec, config)?;
        let spec_name = if spec.name.is_empty() {
            spec.id.clone()
        } else {
            spec.name.clone()
        };

        for index in 0..spec.quantity {
            instances.push(Instance {
                spec_id: spec.id.clone(),
                spec_name: spec_name.clone(),
                index,
                base: resolved.dims,
                weight: resolved.weight,
                children: resolved.children.clone(),
            });
        }
    }

    Ok(instances)
}

/// Result of one packing run.
///
/// A run stops at the first instance it cannot place. Everything placed
/// before that stays in `placed`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub placed: Vec<PlacedItem>,
    pub failure: Option<CapacityFailure>,
}

impl RunOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Placed items, or the capacity error of the failing instance.
    pub fn into_result(self) -> Result<Vec<PlacedItem>> {
        match self.failure {
            Some(failure) => Err(failure.into()),
            None => Ok(self.placed),
        }
    }
}

/// Drives the placement search instance by instance against one bin.
pub struct PackingRun<'a> {
    bin: &'a Bin,
    strategy: Box<dyn PlacementStrategy + Send + Sync>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> PackingRun<'a> {
    pub fn new(bin: &'a Bin, config: &PackingConfig) -> Result<Self> {
        bin.validate()?;
        config.validate()?;

        Ok(Self {
            bin,
            strategy: strategy_for(config),
            cancel: None,
        })
    }

    pub fn with_cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Places `instances` in order on top of `placed`.
    pub fn run(&self, instances: &[Instance], mut placed: Vec<PlacedItem>) -> Result<RunOutcome> {
        for instance in instances {
            if let Some(token) = self.cancel {
                token.check()?;
            }

            match self.strategy.place(self.bin, instance.base, &placed) {
                Some(placement) => {
                    debug!(
                        "Placed {} at ({}, {}, {}) as {:?}",
                        instance.instance_id(),
                        placement.position.x,
                        placement.position.y,
                        placement.position.z,
                        placement.orientation
                    );
                    placed.push(instance.clone().into_placed(placement));
                }
                None => {
                    warn!(
                        "No legal position for {} after {} placed items",
                        instance.instance_id(),
                        placed.len()
                    );
                    return Ok(RunOutcome {
                        placed,
                        failure: Some(instance.failure()),
                    });
                }
            }
        }

        info!("Packing run placed all {} instances", instances.len());
        Ok(RunOutcome {
            placed,
            failure: None,
        })
    }
}
