//! 3D cargo placement engine.
//!
//! Places rectangular cargo into a container or onto a pallet so that items
//! never overlap, stay inside the bin and rest on full support, packing as
//! much volume as the chosen heuristic finds.

pub mod cancel;
pub mod compose;
pub mod geometry;
pub mod planner;
pub mod reposition;
pub mod search;
pub mod session;
pub mod support;
pub mod types;

pub use cancel::{CancelToken, RunSupervisor};
pub use planner::{PackingRun, Planner, RunOutcome, StrategyResult};
pub use reposition::DragOutcome;
pub use search::{ExtremePointScan, GridHeightmapScan, PlacementStrategy};
pub use session::{PackingSession, SessionUpdate};
pub use types::*;
