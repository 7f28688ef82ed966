use serde::{Deserialize, Serialize};

/// Longest accepted edge, in millimeters. Volumes of boxes within this bound
/// fit in an `i64`.
pub const MAX_EXTENT: i64 = 1_000_000;

/// Edge lengths of a box in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: i64,
    pub height: i64,
    pub length: i64,
}

impl Dimension {
    pub const fn new(width: i64, height: i64, length: i64) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    /// Saturates instead of overflowing for extents past [`MAX_EXTENT`].
    pub fn volume(&self) -> i64 {
        self.width
            .saturating_mul(self.height)
            .saturating_mul(self.length)
    }

    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0 && self.length > 0
    }

    pub fn is_within_extent(&self) -> bool {
        self.width <= MAX_EXTENT && self.height <= MAX_EXTENT && self.length <= MAX_EXTENT
    }
}

/// Assignment of a box's three edges to the (width, height, length) axes.
///
/// Each variant names which source edge lands on the width, height and
/// length axis, in that order: `Lwh` puts the original length on the width
/// axis, the original width on the height axis and the original height on
/// the length axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Whl,
    Wlh,
    Hwl,
    Hlw,
    Lwh,
    Lhw,
}

impl Orientation {
    /// Enumeration order. Searches use it as the tie-break between orientations.
    pub const ALL: [Orientation; 6] = [
        Orientation::Whl,
        Orientation::Wlh,
        Orientation::Hwl,
        Orientation::Hlw,
        Orientation::Lwh,
        Orientation::Lhw,
    ];

    /// Oriented extent of `dim`.
    pub fn apply(self, dim: Dimension) -> Dimension {
        let Dimension {
            width: w,
            height: h,
            length: l,
        } = dim;
        match self {
            Orientation::Whl => Dimension::new(w, h, l),
            Orientation::Wlh => Dimension::new(w, l, h),
            Orientation::Hwl => Dimension::new(h, w, l),
            Orientation::Hlw => Dimension::new(h, l, w),
            Orientation::Lwh => Dimension::new(l, w, h),
            Orientation::Lhw => Dimension::new(l, h, w),
        }
    }
}

/// Minimum corner of a placed item in bin-local millimeters. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

/// Container or pallet-with-ceiling that cargo is placed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub width: i64,
    pub height: i64,
    pub length: i64,
    /// Advisory only; reported in stats, never enforced by placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
}

impl Bin {
    pub fn new(width: i64, height: i64, length: i64) -> Self {
        Self {
            width,
            height,
            length,
            max_weight: None,
        }
    }

    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    pub fn dims(&self) -> Dimension {
        Dimension::new(self.width, self.height, self.length)
    }

    pub fn volume(&self) -> i64 {
        self.dims().volume()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dims().is_positive() {
            return Err(PackError::InvalidSpec(format!(
                "Bin dimensions must be positive, got {}x{}x{}",
                self.width, self.height, self.length
            )));
        }
        if !self.dims().is_within_extent() {
            return Err(PackError::InvalidSpec(format!(
                "Bin dimensions {}x{}x{} exceed the {} mm limit",
                self.width, self.height, self.length, MAX_EXTENT
            )));
        }
        Ok(())
    }
}

/// Pallet-shaped sub-bin a compound cargo is built on: a deck footprint and
/// a stacking ceiling, without side walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletBase {
    pub width: i64,
    pub length: i64,
    /// Thickness of the pallet board; children stand on top of it
    #[serde(default)]
    pub deck_height: i64,
    /// Maximum height of the stack above the deck
    pub max_stack_height: i64,
}

/// What a cargo spec places: a plain box, or a pallet sub-assembly that is
/// packed first and then travels as one rigid unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CargoKind {
    Simple(Dimension),
    Compound {
        pallet: PalletBase,
        children: Vec<CargoSpec>,
    },
}

/// Cargo line supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    /// Per-instance weight in kilograms; advisory only
    #[serde(default)]
    pub weight: f64,
    pub kind: CargoKind,
}

impl CargoSpec {
    pub fn simple(id: impl Into<String>, dims: Dimension, quantity: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            quantity,
            weight: 0.0,
            kind: CargoKind::Simple(dims),
        }
    }

    pub fn compound(
        id: impl Into<String>,
        pallet: PalletBase,
        children: Vec<CargoSpec>,
        quantity: u32,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            quantity,
            weight: 0.0,
            kind: CargoKind::Compound { pallet, children },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Rejects degenerate input before any search runs.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(PackError::InvalidSpec(format!(
                "Cargo '{}' must have a quantity of at least 1",
                self.id
            )));
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(PackError::InvalidSpec(format!(
                "Cargo '{}' has an invalid weight ({})",
                self.id, self.weight
            )));
        }

        match &self.kind {
            CargoKind::Simple(dims) => {
                if !dims.is_positive() {
                    return Err(PackError::InvalidSpec(format!(
                        "Cargo '{}' has non-positive dimensions {}x{}x{}",
                        self.id, dims.width, dims.height, dims.length
                    )));
                }
                if !dims.is_within_extent() {
                    return Err(PackError::InvalidSpec(format!(
                        "Cargo '{}' exceeds the {} mm edge limit",
                        self.id, MAX_EXTENT
                    )));
                }
            }
            CargoKind::Compound { pallet, children } => {
                if pallet.width <= 0 || pallet.length <= 0 || pallet.max_stack_height <= 0 {
                    return Err(PackError::InvalidSpec(format!(
                        "Compound cargo '{}' has a degenerate pallet",
                        self.id
                    )));
                }
                if pallet.deck_height < 0 {
                    return Err(PackError::InvalidSpec(format!(
                        "Compound cargo '{}' has a negative deck height",
                        self.id
                    )));
                }
                if [pallet.width, pallet.length, pallet.deck_height, pallet.max_stack_height]
                    .iter()
                    .any(|&edge| edge > MAX_EXTENT)
                {
                    return Err(PackError::InvalidSpec(format!(
                        "Compound cargo '{}' exceeds the {} mm edge limit",
                        self.id, MAX_EXTENT
                    )));
                }
                if children.is_empty() {
                    return Err(PackError::InvalidSpec(format!(
                        "Compound cargo '{}' has no children",
                        self.id
                    )));
                }
                for child in children {
                    child.validate()?;
                }
            }
        }

        Ok(())
    }
}

/// A cargo instance with its final orientation and position.
///
/// Orientation, extent and identity never change after placement; only the
/// drag solver rewrites `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub instance_id: String,
    pub spec_id: String,
    pub spec_name: String,
    /// Ordinal of this instance within its spec's quantity, starting at 0
    pub index: u32,
    pub orientation: Orientation,
    /// Extent after orientation
    pub dims: Dimension,
    pub position: Position,
    pub weight: f64,
    /// Reserved for multi-bin plans; the engine always writes 0
    #[serde(default)]
    pub bin_index: u32,
    /// Frozen sub-layout of a compound cargo, in the pallet's own frame
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlacedItem>,
}

impl PlacedItem {
    pub fn top(&self) -> i64 {
        self.position.y + self.dims.height
    }

    pub fn volume(&self) -> i64 {
        self.dims.volume()
    }
}

/// Order in which the extreme-point search ranks candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Lowest, then nearest the back wall, then leftmost. Compares all orientations.
    #[default]
    FloorFirst,
    /// Deepest, then lowest, then leftmost. Takes the first orientation that fits.
    CornerFill,
}

/// Placement search implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    #[default]
    ExtremePoint,
    GridHeightmap,
}

pub const DEFAULT_GRID_STEP: i64 = 25;

fn default_grid_step() -> i64 {
    DEFAULT_GRID_STEP
}

/// Knobs of a single packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingConfig {
    #[serde(default)]
    pub search: SearchKind,
    #[serde(default)]
    pub priority: Priority,
    /// Lattice step of the grid-heightmap scan, in millimeters
    #[serde(default = "default_grid_step")]
    pub grid_step: i64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            search: SearchKind::default(),
            priority: Priority::default(),
            grid_step: DEFAULT_GRID_STEP,
        }
    }
}

impl PackingConfig {
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_search(mut self, search: SearchKind) -> Self {
        self.search = search;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_step <= 0 {
            return Err(PackError::InvalidSpec(format!(
                "Grid step must be positive, got {}",
                self.grid_step
            )));
        }
        Ok(())
    }
}

/// Top-level mode selector of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    #[default]
    FloorFirst,
    CornerFill,
    CompareAll,
}

/// Total order over expanded cargo instances, used to seed a packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    VolumeDesc,
    WeightDesc,
    HeightAsc,
    FootprintDesc,
    VolumeAsc,
}

impl SortKey {
    /// Orderings compared by the strategy engine, in evaluation order.
    pub const ALL: [SortKey; 5] = [
        SortKey::VolumeDesc,
        SortKey::WeightDesc,
        SortKey::HeightAsc,
        SortKey::FootprintDesc,
        SortKey::VolumeAsc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::VolumeDesc => "volume descending",
            SortKey::WeightDesc => "weight descending",
            SortKey::HeightAsc => "height ascending",
            SortKey::FootprintDesc => "footprint descending",
            SortKey::VolumeAsc => "volume ascending",
        }
    }
}

/// Input: what a caller provides for one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub bin: Bin,
    pub cargo: Vec<CargoSpec>,
    #[serde(default)]
    pub mode: PlanMode,
    /// Instance order of a direct run; `None` keeps the listed order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortKey>,
    #[serde(default)]
    pub search: SearchKind,
    #[serde(default = "default_grid_step")]
    pub grid_step: i64,
}

impl PlanRequest {
    /// Packing config implied by the request. `CompareAll` runs floor-first.
    pub fn config(&self) -> PackingConfig {
        let priority = match self.mode {
            PlanMode::CornerFill => Priority::CornerFill,
            PlanMode::FloorFirst | PlanMode::CompareAll => Priority::FloorFirst,
        };
        PackingConfig {
            search: self.search,
            priority,
            grid_step: self.grid_step,
        }
    }
}

/// Center of gravity in bin coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Aggregate statistics over a packed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingStats {
    pub requested: u32,
    pub placed: u32,
    pub placed_volume: i64,
    pub bin_volume: i64,
    /// Placed volume over bin volume, in percent
    pub volume_efficiency: f64,
    pub max_stack_height: i64,
    pub total_weight: f64,
    /// Set when the bin carries a weight limit and the load exceeds it
    pub over_weight_limit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_of_gravity: Option<Centroid>,
}

/// One strategy of a comparison, without its placed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub rank: usize,
    pub key: SortKey,
    pub stats: PackingStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CapacityFailure>,
}

/// Output: what a plan returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub placed: Vec<PlacedItem>,
    pub stats: PackingStats,
    /// Set when the run stopped at an unplaceable instance; `placed` keeps
    /// everything placed before it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CapacityFailure>,
    /// Ordering whose result was selected, in compare mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_strategy: Option<SortKey>,
    /// Ranked comparison, best first; empty outside compare mode
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub strategies: Vec<StrategyReport>,
}

/// Instance a packing run could not place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityFailure {
    pub spec_id: String,
    pub spec_name: String,
    pub index: u32,
}

impl From<CapacityFailure> for PackError {
    fn from(failure: CapacityFailure) -> Self {
        PackError::Capacity {
            spec_id: failure.spec_id,
            spec_name: failure.spec_name,
            index: failure.index,
        }
    }
}

/// Error type for the placement engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PackError {
    #[error("Invalid cargo specification: {0}")]
    InvalidSpec(String),

    #[error("No legal position for instance {index} of cargo '{spec_id}' ({spec_name})")]
    Capacity {
        spec_id: String,
        spec_name: String,
        index: u32,
    },

    #[error("Unknown placed instance '{0}'")]
    UnknownInstance(String),

    #[error("Packing run was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PackError>;
