use crate::types::*;
use tracing::debug;

mod grid;
mod leftover;
#[cfg(test)]
mod tests;

pub use grid::grid_fill;

const MIXED_CONFIGURATIONS: [Configuration; 6] = [
    Configuration::new(Orientation::Upright, StripRemoval::None),
    Configuration::new(Orientation::Upright, StripRemoval::Column),
    Configuration::new(Orientation::Upright, StripRemoval::Row),
    Configuration::new(Orientation::RotatedBase, StripRemoval::None),
    Configuration::new(Orientation::RotatedBase, StripRemoval::Column),
    Configuration::new(Orientation::RotatedBase, StripRemoval::Row),
];

const UPRIGHT_CONFIGURATIONS: [Configuration; 3] = [
    Configuration::new(Orientation::Upright, StripRemoval::None),
    Configuration::new(Orientation::Upright, StripRemoval::Column),
    Configuration::new(Orientation::Upright, StripRemoval::Row),
];

/// Packs copies of one prototype unit onto a single panel.
///
/// Every call to [`PlacementEngine::place`] builds a fresh result, so an
/// engine can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    panel: Panel,
    prototype: Rectangle,
    spacing: f64,
    allow_rotation: bool,
}

impl PlacementEngine {
    pub fn new(panel: Panel, prototype: Rectangle, spacing: f64, allow_rotation: bool) -> Self {
        Self {
            panel,
            prototype,
            spacing,
            allow_rotation,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Trials evaluated by [`PlacementEngine::best_placement`], in evaluation order.
    /// Without rotation only the upright orientation is tried.
    pub fn configurations(&self) -> &'static [Configuration] {
        if self.allow_rotation {
            &MIXED_CONFIGURATIONS
        } else {
            &UPRIGHT_CONFIGURATIONS
        }
    }

    /// Runs one trial: the primary grid, then the rotated leftover fill when
    /// rotation is allowed.
    pub fn place(&self, configuration: Configuration) -> PlacementResult {
        let unit = match configuration.orientation {
            Orientation::Upright => self.prototype,
            Orientation::RotatedBase => self.prototype.rotated(),
        };

        let grid = self.primary_grid(unit, configuration.strip_removal);
        let mut placements = Vec::with_capacity(grid.columns * grid.rows);
        self.push_grid(
            &unit,
            self.panel.border,
            self.panel.border,
            grid.columns,
            grid.rows,
            &mut placements,
        );

        if self.allow_rotation {
            self.fill_leftover(&grid, configuration.strip_removal, &mut placements);
        }

        PlacementResult::from_placements(placements, configuration)
    }

    /// Evaluates every configuration and keeps the best layout.
    ///
    /// A trial replaces the current best only with strictly more units, or the
    /// same number of units covering strictly more area, so the earliest
    /// configuration wins any remaining tie.
    pub fn best_placement(&self) -> PlacementResult {
        let mut best = PlacementResult::empty();

        for &configuration in self.configurations() {
            let trial = self.place(configuration);
            debug!(
                ?configuration,
                count = trial.count,
                occupied_area = trial.occupied_area,
                "evaluated placement trial"
            );

            if outranks(&trial, &best) {
                best = trial;
            }
        }

        best
    }
}

fn outranks(candidate: &PlacementResult, incumbent: &PlacementResult) -> bool {
    candidate.count > incumbent.count
        || (candidate.count == incumbent.count
            && candidate.occupied_area > incumbent.occupied_area)
}
