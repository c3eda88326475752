use super::*;

/// Occupied area as a percentage of usable area, 0 for an empty panel.
pub fn fill_percentage(occupied_area: f64, usable_area: f64) -> f64 {
    if usable_area > 0.0 {
        (occupied_area / usable_area) * 100.0
    } else {
        0.0
    }
}

/// Panels to run for `total_units`, 0 when nothing fits on a panel.
pub fn panels_needed(total_units: u64, units_per_panel: usize) -> u64 {
    if units_per_panel > 0 {
        total_units.div_ceil(units_per_panel as u64)
    } else {
        0
    }
}

/// Required quantity raised by the scrap percentage, rounded up.
///
/// Computed as `q + q * scrap / 100` rather than `q * (1 + scrap / 100)` so
/// exact results such as 100 at 5% give 105, not 106 from binary rounding.
/// Saturates at `u64::MAX`.
pub fn inflated_quantity(quantity: u64, scrap_percentage: f64) -> u64 {
    let base = quantity as f64;
    let inflated = (base + base * scrap_percentage / 100.0).ceil();
    if inflated.is_finite() && inflated > 0.0 {
        inflated as u64
    } else {
        0
    }
}

/// Units produced by running `panels` panels, saturating at `u64::MAX`.
pub fn produced_quantity(units_per_panel: usize, panels: u64) -> u64 {
    (units_per_panel as u64).saturating_mul(panels)
}

impl Panelizer {
    /// Computes fill and production figures for one panel.
    pub(super) fn build_report(
        &self,
        idx: usize,
        size: &PanelSize,
        panel: &Panel,
        placement: PlacementResult,
        required_quantity: u64,
    ) -> PanelReport {
        let fill = fill_percentage(placement.occupied_area, panel.usable_area);
        let panels = panels_needed(required_quantity, placement.count);

        PanelReport {
            panel_id: panel_id(idx, size),
            panel_number: idx as u32 + 1,
            outer_width: panel.outer_width,
            outer_height: panel.outer_height,
            border: panel.border,
            usable_width: panel.usable_width,
            usable_height: panel.usable_height,
            pcb_per_panel: placement.count,
            occupied_area: placement.occupied_area,
            fill_percentage: fill,
            fill_rating: FillRating::from_percentage(fill),
            panels_needed: panels,
            produced_quantity: produced_quantity(placement.count, panels),
            configuration: placement.configuration,
            placements: placement.placements,
        }
    }
}
