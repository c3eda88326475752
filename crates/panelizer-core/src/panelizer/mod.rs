use crate::placement::PlacementEngine;
use crate::types::*;
use tracing::debug;

mod summary;

pub use summary::{fill_percentage, inflated_quantity, panels_needed, produced_quantity};

/// Most panel sizes compared in one request.
pub const MAX_PANEL_SIZES: usize = 4;

/// Runs the placement search on every requested panel size and reports yield.
pub struct Panelizer {
    request: PanelizationRequest,
}

impl Panelizer {
    /// Validates requests and builds a new panelizer instance.
    pub fn new(request: PanelizationRequest) -> Result<Self> {
        require_positive("PCB width", request.pcb_width)?;
        require_positive("PCB height", request.pcb_height)?;
        require_non_negative("Spacing", request.spacing)?;
        require_non_negative("Border", request.border)?;
        require_non_negative("Scrap percentage", request.scrap_percentage)?;

        if request.quantity == 0 {
            return Err(PanelizerError::InvalidInput(
                "Quantity must be positive".to_string(),
            ));
        }

        if request.panel_sizes.is_empty() {
            return Err(PanelizerError::InvalidInput(
                "At least one panel size must be provided".to_string(),
            ));
        }

        if request.panel_sizes.len() > MAX_PANEL_SIZES {
            return Err(PanelizerError::InvalidInput(format!(
                "At most {} panel sizes can be compared, got {}",
                MAX_PANEL_SIZES,
                request.panel_sizes.len()
            )));
        }

        for (idx, size) in request.panel_sizes.iter().enumerate() {
            let name = panel_id(idx, size);
            require_positive(&format!("Panel '{}' width", name), size.width)?;
            require_positive(&format!("Panel '{}' height", name), size.height)?;

            let panel = Panel::new(size.width, size.height, request.border);
            if panel.usable_width <= 0.0 || panel.usable_height <= 0.0 {
                return Err(PanelizerError::InvalidInput(format!(
                    "Panel '{}' becomes unusable after applying the border",
                    name
                )));
            }
        }

        Ok(Self { request })
    }

    pub fn request(&self) -> &PanelizationRequest {
        &self.request
    }

    /// Packs the unit on each panel size independently.
    pub fn run(&self) -> PanelizationResult {
        let request = &self.request;
        let prototype = Rectangle::new(request.pcb_width, request.pcb_height);
        let required_quantity = inflated_quantity(request.quantity, request.scrap_percentage);

        let reports = request
            .panel_sizes
            .iter()
            .enumerate()
            .map(|(idx, size)| {
                let panel = Panel::new(size.width, size.height, request.border);
                let engine =
                    PlacementEngine::new(panel, prototype, request.spacing, request.allow_rotation);
                let placement = engine.best_placement();

                debug!(
                    panel = %panel_id(idx, size),
                    count = placement.count,
                    configuration = ?placement.configuration,
                    "selected best placement"
                );

                self.build_report(idx, size, &panel, placement, required_quantity)
            })
            .collect();

        PanelizationResult {
            pcb_width: request.pcb_width,
            pcb_height: request.pcb_height,
            spacing: request.spacing,
            required_quantity,
            reports,
        }
    }
}

/// Falls back to the position-based name when the size carries no id.
fn panel_id(idx: usize, size: &PanelSize) -> String {
    if size.id.is_empty() {
        format!("format_{}", idx + 1)
    } else {
        size.id.clone()
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PanelizerError::InvalidInput(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PanelizerError::InvalidInput(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}
