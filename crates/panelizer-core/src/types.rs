use serde::{Deserialize, Serialize};

/// Orientation of a placed unit relative to the prototype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    /// Same width/height as the prototype (0°)
    #[default]
    Upright,
    /// Width and height swapped (90°)
    Quarter,
}

impl Rotation {
    /// Flips between 0° and 90°. A unit never reaches 180°.
    pub fn toggled(self) -> Self {
        match self {
            Rotation::Upright => Rotation::Quarter,
            Rotation::Quarter => Rotation::Upright,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Upright => 0,
            Rotation::Quarter => 90,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> std::result::Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Upright),
            90 => Ok(Rotation::Quarter),
            other => Err(format!("rotation must be 0 or 90, got {other}")),
        }
    }
}

/// A PCB unit: size, position on the panel and orientation.
///
/// Values are never mutated once built; `rotated` and `at` return new copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Rectangle {
    /// Builds an upright prototype at the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
            rotation: Rotation::Upright,
        }
    }

    /// Returns a copy turned by 90°.
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            rotation: self.rotation.toggled(),
            ..*self
        }
    }

    /// Returns a copy positioned at `(x, y)`.
    pub fn at(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when both rectangles share a region of non-zero area.
    /// Touching edges do not count.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Stock sheet with a non-usable border on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Panel {
    pub outer_width: f64,
    pub outer_height: f64,
    pub border: f64,
    pub usable_width: f64,
    pub usable_height: f64,
    pub usable_area: f64,
}

impl Panel {
    pub fn new(outer_width: f64, outer_height: f64, border: f64) -> Self {
        let usable_width = outer_width - 2.0 * border;
        let usable_height = outer_height - 2.0 * border;

        Self {
            outer_width,
            outer_height,
            border,
            usable_width,
            usable_height,
            usable_area: usable_width * usable_height,
        }
    }

    /// Right edge of the usable area.
    pub fn inner_right(&self) -> f64 {
        self.outer_width - self.border
    }

    /// Bottom edge of the usable area.
    pub fn inner_bottom(&self) -> f64 {
        self.outer_height - self.border
    }

    /// True when `rect` lies entirely inside the usable area.
    pub fn contains(&self, rect: &Rectangle) -> bool {
        rect.x >= self.border
            && rect.y >= self.border
            && rect.right() <= self.inner_right()
            && rect.bottom() <= self.inner_bottom()
    }
}

/// Which form of the prototype builds the primary grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Upright,
    RotatedBase,
}

/// Column or row dropped from the primary grid to make room for a rotated strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripRemoval {
    None,
    Column,
    Row,
}

/// One trial evaluated by the placement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    pub orientation: Orientation,
    pub strip_removal: StripRemoval,
}

impl Configuration {
    pub const fn new(orientation: Orientation, strip_removal: StripRemoval) -> Self {
        Self {
            orientation,
            strip_removal,
        }
    }
}

/// Units placed on one panel by a single trial or by the full search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub placements: Vec<Rectangle>,
    pub count: usize,
    pub occupied_area: f64,
    /// Trial that produced this layout, `None` when nothing was evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
}

impl PlacementResult {
    /// Wraps a placement list, deriving `count` and `occupied_area` from it.
    pub fn from_placements(placements: Vec<Rectangle>, configuration: Configuration) -> Self {
        let occupied_area = placements.iter().map(Rectangle::area).sum();
        Self {
            count: placements.len(),
            occupied_area,
            placements,
            configuration: Some(configuration),
        }
    }

    pub fn empty() -> Self {
        Self {
            placements: Vec::new(),
            count: 0,
            occupied_area: 0.0,
            configuration: None,
        }
    }
}

/// Panel size offered to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    #[serde(default)]
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// Input: what the user provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelizationRequest {
    pub pcb_width: f64,
    pub pcb_height: f64,
    /// Gap kept between adjacent units
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// Margin trimmed from every panel edge
    #[serde(default = "default_border")]
    pub border: f64,
    /// Allow mixing upright and 90° units on one panel
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    /// Number of good units required
    #[serde(default = "default_quantity")]
    pub quantity: u64,
    /// Extra production percentage to cover breakage
    #[serde(default = "default_scrap_percentage")]
    pub scrap_percentage: f64,
    /// At most four panel sizes are evaluated per request
    #[serde(default = "default_panel_sizes")]
    pub panel_sizes: Vec<PanelSize>,
}

impl PanelizationRequest {
    /// Builds a request for the given unit size with every other field at its default.
    pub fn new(pcb_width: f64, pcb_height: f64) -> Self {
        Self {
            pcb_width,
            pcb_height,
            spacing: default_spacing(),
            border: default_border(),
            allow_rotation: default_allow_rotation(),
            quantity: default_quantity(),
            scrap_percentage: default_scrap_percentage(),
            panel_sizes: default_panel_sizes(),
        }
    }
}

fn default_spacing() -> f64 {
    5.0
}

fn default_border() -> f64 {
    15.0
}

fn default_allow_rotation() -> bool {
    true
}

fn default_quantity() -> u64 {
    1
}

fn default_scrap_percentage() -> f64 {
    5.0
}

/// Stock formats offered when the request does not list any.
pub fn default_panel_sizes() -> Vec<PanelSize> {
    [(600.0, 500.0), (580.0, 510.0), (570.0, 480.0), (457.0, 300.0)]
        .iter()
        .enumerate()
        .map(|(idx, &(width, height))| PanelSize::new(format!("format_{}", idx + 1), width, height))
        .collect()
}

/// Colour band of a fill percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRating {
    /// 75% and above
    Good,
    /// 60% up to 75%
    Fair,
    Poor,
}

impl FillRating {
    pub fn from_percentage(fill_percentage: f64) -> Self {
        if fill_percentage >= 75.0 {
            FillRating::Good
        } else if fill_percentage >= 60.0 {
            FillRating::Fair
        } else {
            FillRating::Poor
        }
    }
}

/// Outcome for a single panel size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelReport {
    pub panel_id: String,
    pub panel_number: u32,
    pub outer_width: f64,
    pub outer_height: f64,
    pub border: f64,
    pub usable_width: f64,
    pub usable_height: f64,
    pub pcb_per_panel: usize,
    pub occupied_area: f64,
    pub fill_percentage: f64,
    pub fill_rating: FillRating,
    pub panels_needed: u64,
    pub produced_quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
    pub placements: Vec<Rectangle>,
}

/// Output: what the panelizer returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelizationResult {
    pub pcb_width: f64,
    pub pcb_height: f64,
    pub spacing: f64,
    /// Requested quantity inflated by the scrap percentage
    pub required_quantity: u64,
    pub reports: Vec<PanelReport>,
}

/// Error type for panelization
#[derive(Debug, thiserror::Error)]
pub enum PanelizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PanelizerError>;
