use super::*;

/// Maximum number of items of length `size` that fit in `available`, with
/// `spacing` between neighbours and none after the last one.
///
/// `n` items need `n * size + (n - 1) * spacing <= available`, which gives
/// `n = floor((available + spacing) / (size + spacing))`.
pub fn grid_fill(available: f64, spacing: f64, size: f64) -> usize {
    let pitch = size + spacing;
    if pitch <= 0.0 {
        return 0;
    }

    let count = ((available + spacing) / pitch).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Primary block of one trial, anchored at the top-left usable corner.
#[derive(Debug, Clone, Copy)]
pub(super) struct PrimaryGrid {
    pub unit: Rectangle,
    pub columns: usize,
    pub rows: usize,
    /// Usable width left over to the right of the block
    pub remaining_width: f64,
    /// Usable height left over below the block
    pub remaining_height: f64,
}

impl PrimaryGrid {
    /// Width of the block including the trailing gap.
    pub fn advance_x(&self, spacing: f64) -> f64 {
        self.columns as f64 * (self.unit.width + spacing)
    }

    pub fn advance_y(&self, spacing: f64) -> f64 {
        self.rows as f64 * (self.unit.height + spacing)
    }
}

impl PlacementEngine {
    /// Sizes the primary grid, dropping one column or row when a strip is reserved.
    pub(super) fn primary_grid(&self, unit: Rectangle, strip_removal: StripRemoval) -> PrimaryGrid {
        let mut columns = grid_fill(self.panel.usable_width, self.spacing, unit.width);
        let mut rows = grid_fill(self.panel.usable_height, self.spacing, unit.height);

        match strip_removal {
            StripRemoval::Column if columns > 0 => columns -= 1,
            StripRemoval::Row if rows > 0 => rows -= 1,
            _ => {}
        }

        let occupied_width = span(columns, unit.width, self.spacing);
        let occupied_height = span(rows, unit.height, self.spacing);

        PrimaryGrid {
            unit,
            columns,
            rows,
            remaining_width: self.panel.usable_width - occupied_width,
            remaining_height: self.panel.usable_height - occupied_height,
        }
    }

    /// Appends a `columns x rows` block of `unit` starting at `(origin_x, origin_y)`,
    /// column by column. Units crossing the usable edge are skipped.
    pub(super) fn push_grid(
        &self,
        unit: &Rectangle,
        origin_x: f64,
        origin_y: f64,
        columns: usize,
        rows: usize,
        placements: &mut Vec<Rectangle>,
    ) {
        let step_x = unit.width + self.spacing;
        let step_y = unit.height + self.spacing;

        for i in 0..columns {
            for j in 0..rows {
                let rect = unit.at(origin_x + i as f64 * step_x, origin_y + j as f64 * step_y);
                if self.panel.contains(&rect) {
                    placements.push(rect);
                }
            }
        }
    }
}

/// Length covered by `count` items with gaps between them.
fn span(count: usize, size: f64, spacing: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * size + (count - 1) as f64 * spacing
}
