//! Property tests for the grid, the rule and the layout policy

use conway::dimension::{Bounds, DesiredResolution, DimensionPolicy, Viewport};
use conway::grid::Grid;
use conway::rules;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<bool>(), w * h).prop_map(move |cells| {
            let mut grid = Grid::new(w, h).unwrap();
            for (i, alive) in cells.into_iter().enumerate() {
                grid.set(i % w, i / w, alive).unwrap();
            }
            grid
        })
    })
}

proptest! {
    #[test]
    fn get_wraps_by_whole_periods(grid in grid_strategy(), x in 0isize..12, y in 0isize..12, k in -3isize..3) {
        let (w, h) = (grid.width() as isize, grid.height() as isize);
        prop_assert_eq!(grid.get(x, y), grid.get(x + k * w, y + k * h));
    }

    #[test]
    fn neighbor_count_matches_wrapped_sum(grid in grid_strategy()) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let (xi, yi) = (x as isize, y as isize);
                let mut expected = 0u8;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if (dx, dy) != (0, 0) && grid.get(xi + dx, yi + dy) {
                            expected += 1;
                        }
                    }
                }
                let count = grid.alive_neighbors(x, y);
                prop_assert!(count <= 8);
                prop_assert_eq!(count, expected);
            }
        }
    }

    #[test]
    fn step_is_pure_and_keeps_dimensions(grid in grid_strategy()) {
        let snapshot = grid.clone();
        let a = rules::step(&grid);
        let b = rules::step(&grid);
        prop_assert_eq!(&grid, &snapshot);
        prop_assert_eq!(a.dimensions(), grid.dimensions());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn overlap_copy_preserves_shared_region(old in grid_strategy(), w in 1usize..12, h in 1usize..12) {
        let mut new = Grid::new(w, h).unwrap();
        new.copy_overlap_from(&old);
        for y in 0..h {
            for x in 0..w {
                let inside = x < old.width() && y < old.height();
                let expected = inside && old.row(y)[x];
                prop_assert_eq!(new.row(y)[x], expected);
            }
        }
    }

    #[test]
    fn auto_fit_respects_bounds(ww in 0.0f64..4000.0, wh in 0.0f64..3000.0, cell in 0u32..200) {
        let bounds = Bounds { max_dim: Some(400), ..Bounds::default() };
        let spec = DimensionPolicy::new(bounds).auto_fit(Viewport::new(ww, wh, 0.0), cell);
        prop_assert!((bounds.cell_min..=bounds.cell_max).contains(&spec.cell_size));
        prop_assert!(spec.columns >= bounds.min_cols && spec.columns <= 400);
        prop_assert!(spec.rows >= bounds.min_rows && spec.rows <= 400);
    }

    #[test]
    fn explicit_fit_respects_bounds(ww in 1.0f64..4000.0, wh in 1.0f64..3000.0, cols in 1usize..1000, rows in 1usize..1000) {
        let bounds = Bounds { max_dim: Some(500), ..Bounds::default() };
        let fit = DimensionPolicy::new(bounds)
            .explicit_fit(Viewport::new(ww, wh, 0.0), DesiredResolution::new(cols, rows));
        let spec = fit.spec;
        prop_assert!((bounds.cell_min..=bounds.cell_max).contains(&spec.cell_size));
        prop_assert_eq!(spec.columns, cols.clamp(bounds.min_cols, 500));
        prop_assert_eq!(spec.rows, rows.clamp(bounds.min_rows, 500));
        prop_assert_eq!(fit.clamped, cols > 500 || rows > 500);
    }
}
