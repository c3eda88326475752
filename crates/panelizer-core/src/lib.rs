//! Packs identical PCB units onto fixed-size panels.
//!
//! [`PlacementEngine`] searches a small set of grid configurations for one
//! panel; [`Panelizer`] validates a request, runs the engine on each panel
//! size and derives fill and production figures.

pub mod panelizer;
pub mod placement;
pub mod svg;
pub mod types;

pub use panelizer::{
    fill_percentage, inflated_quantity, panels_needed, produced_quantity, Panelizer,
    MAX_PANEL_SIZES,
};
pub use placement::{grid_fill, PlacementEngine};
pub use svg::render_svg;
pub use types::*;
