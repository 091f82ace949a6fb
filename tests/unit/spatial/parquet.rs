//! Tests for parquet band planning, coverage, and ratio accounting

#[cfg(test)]
mod tests {
    use mosaictile::io::settings::{ParquetRatio, PatternKind, ResolvedSettings};
    use mosaictile::spatial::GridSpec;
    use mosaictile::spatial::grid::{CellOrientation, plan_grid};

    const TILE: u32 = 10;

    fn resolved(unit_columns: u32, unit_rows: u32, landscape: u32, portrait: u32) -> ResolvedSettings {
        ResolvedSettings {
            output_width: unit_columns * TILE,
            output_height: unit_rows * TILE,
            tile_width: TILE,
            tile_height: TILE,
            blend_weight: 0.0,
            pattern: PatternKind::Parquet(ParquetRatio {
                landscape,
                portrait,
            }),
            use_all_images: false,
            mirror_images: false,
            duplicate_spacing: 0,
        }
    }

    // Every tile unit of the covered canvas must be claimed exactly once
    fn assert_gapless(spec: &GridSpec) {
        let unit_columns = (spec.canvas_width / TILE) as usize;
        let unit_rows = (spec.canvas_height / TILE) as usize;
        let mut claimed = vec![0u32; unit_columns * unit_rows];

        for cell in &spec.cells {
            let x0 = (cell.rect.x / TILE) as usize;
            let y0 = (cell.rect.y / TILE) as usize;
            let w = (cell.rect.width / TILE) as usize;
            let h = (cell.rect.height / TILE) as usize;
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    if let Some(unit) = claimed.get_mut(y * unit_columns + x) {
                        *unit += 1;
                    }
                }
            }
        }

        assert!(
            claimed.iter().all(|&count| count == 1),
            "every unit must be covered exactly once: {claimed:?}"
        );
    }

    fn orientation_counts(spec: &GridSpec) -> (usize, usize) {
        let landscape = spec
            .cells
            .iter()
            .filter(|cell| cell.orientation == CellOrientation::Landscape)
            .count();
        let portrait = spec
            .cells
            .iter()
            .filter(|cell| cell.orientation == CellOrientation::Portrait)
            .count();
        (landscape, portrait)
    }

    // Tests exact ratio accounting when bands divide into complete groups
    // Verified by shrinking the portrait run length
    #[test]
    fn test_complete_groups_match_ratio_exactly() {
        // Ratio 1:1 gives a group four units wide (one landscape pair
        // plus two portrait columns); eight columns hold two groups
        let spec = plan_grid(&resolved(8, 4, 1, 1)).unwrap();

        assert_gapless(&spec);
        let (landscape, portrait) = orientation_counts(&spec);
        assert_eq!(landscape, 8);
        assert_eq!(portrait, 8);
    }

    // Tests area coverage with a band-end remainder
    #[test]
    fn test_remainder_band_is_filled() {
        // Six columns end mid-group: the second landscape pair fits but
        // its portrait run is cut short
        let spec = plan_grid(&resolved(6, 2, 1, 1)).unwrap();

        assert_gapless(&spec);
        let (landscape, portrait) = orientation_counts(&spec);
        assert_eq!(landscape + portrait, spec.cell_count());
        assert!(landscape >= 2);
    }

    // Tests that a single trailing unit column takes a portrait tile
    #[test]
    fn test_odd_column_remainder_takes_portrait() {
        let spec = plan_grid(&resolved(5, 2, 2, 1)).unwrap();

        assert_gapless(&spec);
        assert_eq!(spec.columns, 5);
        let (landscape, portrait) = orientation_counts(&spec);
        assert_eq!(landscape, 4);
        assert_eq!(portrait, 1);
    }

    // Tests single-height landscape coverage of an odd final row
    #[test]
    fn test_odd_final_row_covered_when_columns_even() {
        let spec = plan_grid(&resolved(4, 5, 1, 1)).unwrap();

        assert_gapless(&spec);
        assert_eq!(spec.rows, 5);
        assert_eq!(spec.canvas_height, 50);
    }

    // Tests clipping of an odd final row when columns are odd
    #[test]
    fn test_odd_final_row_clipped_when_columns_odd() {
        let spec = plan_grid(&resolved(5, 5, 1, 1)).unwrap();

        assert_gapless(&spec);
        assert_eq!(spec.rows, 4);
        assert_eq!(spec.canvas_height, 40);
    }

    // Tests the square fallback when neither tile shape fits
    #[test]
    fn test_degenerate_grid_falls_back_to_square() {
        let spec = plan_grid(&resolved(3, 1, 1, 1)).unwrap();

        assert_gapless(&spec);
        assert_eq!(spec.rows, 1);
        assert_eq!(spec.columns, 3);
        assert!(
            spec.cells
                .iter()
                .all(|cell| cell.orientation == CellOrientation::Square)
        );
    }

    #[test]
    fn test_single_row_even_columns_uses_landscape() {
        let spec = plan_grid(&resolved(4, 1, 1, 1)).unwrap();

        assert_gapless(&spec);
        let (landscape, portrait) = orientation_counts(&spec);
        assert_eq!(landscape, 2);
        assert_eq!(portrait, 0);
    }

    #[test]
    fn test_single_column_fills_with_portrait() {
        let spec = plan_grid(&resolved(1, 4, 1, 1)).unwrap();

        assert_gapless(&spec);
        let (landscape, portrait) = orientation_counts(&spec);
        assert_eq!(landscape, 0);
        assert_eq!(portrait, 2);
    }

    // Tests canonical scan order over mixed-orientation cells
    #[test]
    fn test_parquet_cells_in_row_major_order() {
        let spec = plan_grid(&resolved(8, 6, 2, 1)).unwrap();

        for (earlier, later) in spec.cells.iter().zip(spec.cells.iter().skip(1)) {
            assert!((earlier.rect.y, earlier.rect.x) < (later.rect.y, later.rect.x));
        }
    }
}
