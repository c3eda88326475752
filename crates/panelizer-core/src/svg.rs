use crate::types::*;
use std::fmt::{self, Write};

const MARGIN: f64 = 20.0;
const PANEL_SPACING: f64 = 40.0;
const LEGEND_HEIGHT: f64 = 30.0;

/// Draws every panel report stacked vertically: outer sheet, usable area,
/// upright units in blue and turned units in green.
///
/// `scale` divides panel dimensions to obtain SVG user units.
pub fn render_svg(
    result: &PanelizationResult,
    scale: f64,
) -> std::result::Result<String, fmt::Error> {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let mut svg = String::new();

    let max_width = result
        .reports
        .iter()
        .map(|r| r.outer_width)
        .fold(0.0, f64::max);
    let total_height: f64 = result
        .reports
        .iter()
        .map(|r| r.outer_height / scale + PANEL_SPACING)
        .sum();

    let svg_width = (max_width / scale) + (2.0 * MARGIN);
    let svg_height = total_height + (2.0 * MARGIN) + LEGEND_HEIGHT;

    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )?;
    writeln!(svg, r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##)?;

    let mut y_offset = MARGIN + PANEL_SPACING / 2.0;

    for report in &result.reports {
        let x = MARGIN;

        writeln!(
            svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="14" fill="#333">Format {} : {} x {} : x{} PCB</text>"##,
            x,
            y_offset - 5.0,
            report.panel_number,
            report.outer_width,
            report.outer_height,
            report.pcb_per_panel
        )?;

        // Outer sheet
        writeln!(
            svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#d3d3d3" fill-opacity="0.3" stroke="#000" stroke-width="1"/>"##,
            x,
            y_offset,
            report.outer_width / scale,
            report.outer_height / scale
        )?;

        // Usable area
        writeln!(
            svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#000" stroke-width="1" stroke-dasharray="4 2"/>"##,
            x + report.border / scale,
            y_offset + report.border / scale,
            report.usable_width.max(0.0) / scale,
            report.usable_height.max(0.0) / scale
        )?;

        for rect in &report.placements {
            let fill = match rect.rotation {
                Rotation::Upright => "#1f4fd1",
                Rotation::Quarter => "#2e9e3a",
            };

            writeln!(
                svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="0.6" stroke="#000" stroke-width="0.5"/>"##,
                x + rect.x / scale,
                y_offset + rect.y / scale,
                rect.width / scale,
                rect.height / scale,
                fill
            )?;
        }

        y_offset += report.outer_height / scale + PANEL_SPACING;
    }

    writeln!(
        svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">PCB {} x {} | spacing {} | required {}</text>"##,
        MARGIN,
        svg_height - MARGIN,
        result.pcb_width,
        result.pcb_height,
        result.spacing,
        result.required_quantity
    )?;

    writeln!(svg, "</svg>")?;

    Ok(svg)
}
