use super::*;

fn build_engine(
    pcb: (f64, f64),
    outer: (f64, f64),
    border: f64,
    spacing: f64,
    allow_rotation: bool,
) -> PlacementEngine {
    PlacementEngine::new(
        Panel::new(outer.0, outer.1, border),
        Rectangle::new(pcb.0, pcb.1),
        spacing,
        allow_rotation,
    )
}

/// Slack for neighbours whose shared edge differs by rounding only.
const EPSILON: f64 = 1e-6;

fn assert_layout_is_valid(engine: &PlacementEngine, result: &PlacementResult, pcb: (f64, f64)) {
    let panel = engine.panel();
    let spacing = engine.spacing;

    assert_eq!(result.count, result.placements.len());
    let area: f64 = result.placements.iter().map(|r| r.width * r.height).sum();
    assert_eq!(result.occupied_area, area);

    for rect in &result.placements {
        assert!(rect.x >= panel.border, "{:?} left of border", rect);
        assert!(rect.y >= panel.border, "{:?} above border", rect);
        assert!(rect.right() <= panel.outer_width - panel.border, "{:?} past right edge", rect);
        assert!(rect.bottom() <= panel.outer_height - panel.border, "{:?} past bottom edge", rect);

        let upright = rect.width == pcb.0 && rect.height == pcb.1 && rect.rotation == Rotation::Upright;
        let turned = rect.width == pcb.1 && rect.height == pcb.0 && rect.rotation == Rotation::Quarter;
        assert!(upright || turned, "{:?} does not match prototype {:?}", rect, pcb);
    }

    for (i, a) in result.placements.iter().enumerate() {
        for b in &result.placements[i + 1..] {
            let apart_x =
                a.right() + spacing <= b.x + EPSILON || b.right() + spacing <= a.x + EPSILON;
            let apart_y =
                a.bottom() + spacing <= b.y + EPSILON || b.bottom() + spacing <= a.y + EPSILON;
            assert!(apart_x || apart_y, "{:?} overlaps or crowds {:?}", a, b);
        }
    }
}

#[test]
fn test_grid_fill_formula() {
    assert_eq!(grid_fill(575.0, 5.0, 105.0), 5);
    assert_eq!(grid_fill(570.0, 5.0, 100.0), 5);
    assert_eq!(grid_fill(10.0, 0.0, 20.0), 0);
    assert_eq!(grid_fill(100.0, 0.0, 25.0), 4);
    // no trailing gap after the last item
    assert_eq!(grid_fill(105.0, 5.0, 50.0), 2);
}

#[test]
fn test_grid_fill_degenerate_inputs() {
    assert_eq!(grid_fill(-50.0, 5.0, 10.0), 0);
    assert_eq!(grid_fill(100.0, 0.0, 0.0), 0);
    assert_eq!(grid_fill(f64::NAN, 5.0, 10.0), 0);
}

#[test]
fn test_panel_usable_dimensions() {
    let panel = Panel::new(600.0, 500.0, 15.0);
    assert_eq!(panel.usable_width, 570.0);
    assert_eq!(panel.usable_height, 470.0);
    assert_eq!(panel.usable_area, 267_900.0);
    assert_eq!(panel.inner_right(), 585.0);
    assert_eq!(panel.inner_bottom(), 485.0);
}

#[test]
fn test_rotation_flips_between_two_states() {
    let pcb = Rectangle::new(100.0, 80.0);
    let once = pcb.rotated();
    assert_eq!((once.width, once.height), (80.0, 100.0));
    assert_eq!(once.rotation, Rotation::Quarter);

    let twice = once.rotated();
    assert_eq!(twice, pcb);
    assert_eq!(twice.rotation.degrees(), 0);
}

#[test]
fn test_intersects_ignores_touching_edges() {
    let a = Rectangle::new(10.0, 10.0);
    assert!(a.intersects(&a.at(5.0, 5.0)));
    assert!(!a.intersects(&a.at(10.0, 0.0)));
    assert!(!a.intersects(&a.at(0.0, 10.0)));
}

#[test]
fn test_rotation_serializes_as_degrees() {
    let rect = Rectangle::new(10.0, 20.0).rotated().at(15.0, 15.0);
    let json = serde_json::to_value(rect).unwrap();
    assert_eq!(json["rotation"], 90);

    let back: Rectangle = serde_json::from_value(json).unwrap();
    assert_eq!(back, rect);

    let invalid = serde_json::json!({ "width": 1.0, "height": 1.0, "rotation": 180 });
    assert!(serde_json::from_value::<Rectangle>(invalid).is_err());
}

#[test]
fn test_upright_only_grid() {
    let engine = build_engine((100.0, 80.0), (600.0, 500.0), 15.0, 5.0, false);
    assert_eq!(engine.configurations().len(), 3);

    let result = engine.best_placement();

    assert_eq!(result.count, 25);
    assert_eq!(result.occupied_area, 200_000.0);
    assert_eq!(
        result.configuration,
        Some(Configuration::new(Orientation::Upright, StripRemoval::None))
    );
    assert!(result.placements.iter().all(|r| r.rotation == Rotation::Upright));

    let first = result.placements[0];
    assert_eq!((first.x, first.y), (15.0, 15.0));
    // column-major order: second unit sits below the first
    assert_eq!((result.placements[1].x, result.placements[1].y), (15.0, 100.0));
    assert_layout_is_valid(&engine, &result, (100.0, 80.0));
}

#[test]
fn test_strip_removal_without_rotation_drops_a_line() {
    let engine = build_engine((100.0, 80.0), (600.0, 500.0), 15.0, 5.0, false);

    let column = engine.place(Configuration::new(Orientation::Upright, StripRemoval::Column));
    let row = engine.place(Configuration::new(Orientation::Upright, StripRemoval::Row));

    assert_eq!(column.count, 20);
    assert_eq!(row.count, 20);
}

#[test]
fn test_mixed_mode_uses_rotated_row_strip() {
    let engine = build_engine((100.0, 80.0), (600.0, 500.0), 15.0, 5.0, true);
    assert_eq!(engine.configurations().len(), 6);

    let counts: Vec<usize> = engine
        .configurations()
        .iter()
        .map(|&c| engine.place(c).count)
        .collect();
    assert_eq!(counts, vec![25, 24, 26, 24, 25, 23]);

    let result = engine.best_placement();
    assert_eq!(result.count, 26);
    assert_eq!(result.occupied_area, 208_000.0);
    assert_eq!(
        result.configuration,
        Some(Configuration::new(Orientation::Upright, StripRemoval::Row))
    );

    let rotated: Vec<&Rectangle> = result
        .placements
        .iter()
        .filter(|r| r.rotation == Rotation::Quarter)
        .collect();
    assert_eq!(rotated.len(), 6);
    assert!(rotated.iter().all(|r| r.y == 355.0 && r.width == 80.0 && r.height == 100.0));
    assert_layout_is_valid(&engine, &result, (100.0, 80.0));
}

#[test]
fn test_right_margin_fill() {
    let engine = build_engine((100.0, 40.0), (250.0, 130.0), 0.0, 0.0, true);
    let result = engine.place(Configuration::new(Orientation::Upright, StripRemoval::None));

    assert_eq!(result.count, 7);
    let last = result.placements[6];
    assert_eq!(last, Rectangle::new(100.0, 40.0).rotated().at(200.0, 0.0));
    assert_layout_is_valid(&engine, &result, (100.0, 40.0));
}

#[test]
fn test_bottom_margin_fill() {
    let engine = build_engine((40.0, 100.0), (130.0, 250.0), 0.0, 0.0, true);
    let result = engine.place(Configuration::new(Orientation::Upright, StripRemoval::None));

    assert_eq!(result.count, 7);
    let last = result.placements[6];
    assert_eq!(last, Rectangle::new(40.0, 100.0).rotated().at(0.0, 200.0));
    assert_layout_is_valid(&engine, &result, (40.0, 100.0));
}

#[test]
fn test_margin_fill_skipped_without_rotation() {
    let engine = build_engine((100.0, 40.0), (250.0, 130.0), 0.0, 0.0, false);
    let result = engine.best_placement();

    assert_eq!(result.count, 6);
}

#[test]
fn test_unit_larger_than_panel() {
    let engine = build_engine((700.0, 700.0), (600.0, 500.0), 15.0, 5.0, true);
    let result = engine.best_placement();

    assert_eq!(result.count, 0);
    assert!(result.placements.is_empty());
    assert_eq!(result.occupied_area, 0.0);
    assert_eq!(result.configuration, None);
}

#[test]
fn test_unit_fits_only_rotated() {
    // 520 tall exceeds the 470 usable height, so only the turned unit fits
    let engine = build_engine((300.0, 520.0), (600.0, 500.0), 15.0, 5.0, true);
    let result = engine.best_placement();

    assert_eq!(result.count, 1);
    assert_eq!(result.placements[0].rotation, Rotation::Quarter);
    assert_eq!(
        result.configuration,
        Some(Configuration::new(Orientation::Upright, StripRemoval::None))
    );
    assert_layout_is_valid(&engine, &result, (300.0, 520.0));
}

#[test]
fn test_first_configuration_wins_ties() {
    let engine = build_engine((100.0, 100.0), (300.0, 300.0), 0.0, 0.0, true);

    for &configuration in engine.configurations() {
        assert_eq!(engine.place(configuration).count, 9);
    }

    let result = engine.best_placement();
    assert_eq!(
        result.configuration,
        Some(Configuration::new(Orientation::Upright, StripRemoval::None))
    );
}

#[test]
fn test_search_is_deterministic() {
    let engine = build_engine((33.0, 47.0), (580.0, 510.0), 15.0, 2.0, true);
    assert_eq!(engine.best_placement(), engine.best_placement());
}

#[test]
fn test_layout_properties_over_input_sweep() {
    let pcbs = [
        (100.0, 80.0),
        (80.0, 100.0),
        (98.0, 100.0),
        (45.0, 120.0),
        (33.0, 47.0),
        (210.0, 150.0),
        (300.0, 40.0),
        (50.0, 50.0),
    ];
    let panels = [(600.0, 500.0), (580.0, 510.0), (570.0, 480.0), (457.0, 300.0)];

    for &pcb in &pcbs {
        for &outer in &panels {
            for &spacing in &[0.0, 2.0, 5.0] {
                for &border in &[0.0, 15.0] {
                    for &allow_rotation in &[true, false] {
                        let engine = build_engine(pcb, outer, border, spacing, allow_rotation);
                        let best = engine.best_placement();
                        assert_layout_is_valid(&engine, &best, pcb);

                        for &configuration in engine.configurations() {
                            let trial = engine.place(configuration);
                            assert_layout_is_valid(&engine, &trial, pcb);
                            assert!(
                                best.count >= trial.count,
                                "{:?} beats search result for {:?} on {:?}",
                                configuration,
                                pcb,
                                outer
                            );
                        }

                        if !allow_rotation {
                            assert!(best.placements.iter().all(|r| r.rotation == Rotation::Upright));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_layout_properties_with_fractional_sizes() {
    let pcbs = [
        (236.1, 99.4667),
        (99.4667, 236.1),
        (33.3, 47.7),
        (101.25, 98.6),
        (12.7, 7.62),
    ];
    let panels = [(600.0, 500.0), (457.2, 304.8), (1000.3, 812.9)];

    for &pcb in &pcbs {
        for &outer in &panels {
            for &spacing in &[0.0, 0.1, 2.54] {
                for &border in &[0.0, 3.141, 15.0] {
                    let engine = build_engine(pcb, outer, border, spacing, true);
                    let best = engine.best_placement();
                    assert!(best.count > 0, "{:?} should fit on {:?}", pcb, outer);
                    assert_layout_is_valid(&engine, &best, pcb);

                    for &configuration in engine.configurations() {
                        let trial = engine.place(configuration);
                        assert_layout_is_valid(&engine, &trial, pcb);
                        assert!(best.count >= trial.count);
                    }
                }
            }
        }
    }
}
