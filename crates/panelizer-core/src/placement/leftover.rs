use super::grid::PrimaryGrid;
use super::*;

impl PlacementEngine {
    /// Fills the space left by the primary grid with units turned by 90°.
    ///
    /// With a column or row removed, the freed strip next to the block is filled
    /// as its own grid. Otherwise the right and bottom margins are tried
    /// independently, each only when one rotated unit fits in it.
    pub(super) fn fill_leftover(
        &self,
        grid: &PrimaryGrid,
        strip_removal: StripRemoval,
        placements: &mut Vec<Rectangle>,
    ) {
        let rotated = grid.unit.rotated();
        let border = self.panel.border;
        let strip_x = border + grid.advance_x(self.spacing);
        let strip_y = border + grid.advance_y(self.spacing);

        match strip_removal {
            StripRemoval::Column => {
                let strip_width = self.panel.usable_width - grid.advance_x(self.spacing);
                let columns = grid_fill(strip_width, self.spacing, rotated.width);
                let rows = grid_fill(self.panel.usable_height, self.spacing, rotated.height);
                self.push_grid(&rotated, strip_x, border, columns, rows, placements);
            }
            StripRemoval::Row => {
                let strip_height = self.panel.usable_height - grid.advance_y(self.spacing);
                let columns = grid_fill(self.panel.usable_width, self.spacing, rotated.width);
                let rows = grid_fill(strip_height, self.spacing, rotated.height);
                self.push_grid(&rotated, border, strip_y, columns, rows, placements);
            }
            StripRemoval::None => {
                // The two margins are not checked against each other. Once the
                // edge check applies they cannot both receive units: a rotated
                // unit only fits the right margin when the grid unit is wider
                // than tall, and only fits the bottom margin in the opposite case.
                if grid.remaining_width >= rotated.width {
                    let columns = grid_fill(grid.remaining_width, self.spacing, rotated.width);
                    let rows = grid_fill(self.panel.usable_height, self.spacing, rotated.height);
                    self.push_grid(&rotated, strip_x, border, columns, rows, placements);
                }

                if grid.remaining_height >= rotated.height {
                    let columns = grid_fill(self.panel.usable_width, self.spacing, rotated.width);
                    let rows = grid_fill(grid.remaining_height, self.spacing, rotated.height);
                    self.push_grid(&rotated, border, strip_y, columns, rows, placements);
                }
            }
        }
    }
}
