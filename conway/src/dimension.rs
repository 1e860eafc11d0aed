// dimension.rs - Reconciles a cell size with the viewport to size the grid

use serde::{Deserialize, Serialize};

/// Layout limits applied by [`DimensionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub cell_min: u32,
    pub cell_max: u32,
    pub min_cols: usize,
    pub min_rows: usize,
    /// Hard cap on columns and rows, bounding memory and step cost.
    pub max_dim: Option<usize>,
    /// Fraction of the viewport width below which a height-fitted grid
    /// counts as too narrow.
    pub width_narrow_threshold: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            cell_min: 3,
            cell_max: 80,
            min_cols: 5,
            min_rows: 5,
            max_dim: Some(1000),
            width_narrow_threshold: 0.5,
        }
    }
}

/// Space available to the grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Height taken by fixed controls above or below the grid.
    pub chrome_height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, chrome_height: f64) -> Self {
        Self { width, height, chrome_height }
    }

    pub fn available_width(&self) -> f64 {
        self.width.max(0.0)
    }

    pub fn available_height(&self) -> f64 {
        (self.height - self.chrome_height).max(0.0)
    }
}

/// A user-requested grid shape that overrides auto-fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DesiredResolution {
    pub columns: usize,
    pub rows: usize,
}

impl DesiredResolution {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }
}

impl std::fmt::Display for DesiredResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// The resolved layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSpec {
    pub cell_size: u32,
    pub columns: usize,
    pub rows: usize,
    /// The viewer should fill the width and scroll vertically instead of
    /// shrinking the grid to fit the height.
    pub width_priority: bool,
}

/// Outcome of [`DimensionPolicy::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub spec: DimensionSpec,
    /// The requested resolution exceeded `max_dim` and was cut down.
    pub clamped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimensionPolicy {
    bounds: Bounds,
}

/// Whole cells of `cell` pixels that fit in `extent`, at least one.
fn cells_along(extent: f64, cell: u32) -> usize {
    ((extent / cell.max(1) as f64).floor() as usize).max(1)
}

/// Largest cell size giving `count` cells in `extent` (may be zero).
fn cell_for(extent: f64, count: usize) -> u32 {
    (extent / count.max(1) as f64).floor() as u32
}

impl DimensionPolicy {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn clamp_cell(&self, cell: u32) -> u32 {
        cell.clamp(self.bounds.cell_min, self.bounds.cell_max)
    }

    pub fn resolve(
        &self,
        viewport: Viewport,
        cell_size: u32,
        desired: Option<DesiredResolution>,
    ) -> Fit {
        match desired {
            Some(desired) => self.explicit_fit(viewport, desired),
            None => Fit {
                spec: self.auto_fit(viewport, cell_size),
                clamped: false,
            },
        }
    }

    /// Fills the viewport with as many `cell_size` cells as fit, shrinking the
    /// cell when either axis would fall below its minimum.
    pub fn auto_fit(&self, viewport: Viewport, cell_size: u32) -> DimensionSpec {
        let b = &self.bounds;
        let ww = viewport.available_width();
        let h_avail = viewport.available_height();

        let mut cell = self.clamp_cell(cell_size);
        let mut columns = cells_along(ww, cell);
        let mut rows = cells_along(h_avail, cell);

        if columns < b.min_cols || rows < b.min_rows {
            let fit_width = cell_for(ww, b.min_cols);
            let fit_height = cell_for(h_avail, b.min_rows);
            cell = self.clamp_cell(fit_width.min(fit_height));
            columns = cells_along(ww, cell);
            rows = cells_along(h_avail, cell);
        }

        // Even cell_min may not fit; the grid then overflows the viewport.
        columns = columns.max(b.min_cols);
        rows = rows.max(b.min_rows);

        if let Some(max_dim) = b.max_dim {
            columns = columns.min(max_dim);
            rows = rows.min(max_dim);
        }

        DimensionSpec {
            cell_size: cell,
            columns,
            rows,
            width_priority: false,
        }
    }

    /// Honors an exact column/row request, picking the cell size from the
    /// height unless that would leave the grid too narrow.
    pub fn explicit_fit(&self, viewport: Viewport, desired: DesiredResolution) -> Fit {
        let b = &self.bounds;
        let ww = viewport.available_width();
        let h_avail = viewport.available_height();

        let mut columns = desired.columns.max(b.min_cols);
        let mut rows = desired.rows.max(b.min_rows);
        let mut clamped = false;
        if let Some(max_dim) = b.max_dim {
            if columns > max_dim {
                columns = max_dim;
                clamped = true;
            }
            if rows > max_dim {
                rows = max_dim;
                clamped = true;
            }
        }

        let cell_by_height = cell_for(h_avail, rows);
        let cell_by_width = cell_for(ww, columns);
        let width_if_by_height = columns as f64 * cell_by_height as f64;

        let (cell, width_priority) = if width_if_by_height < ww * b.width_narrow_threshold {
            (cell_by_width, true)
        } else {
            (cell_by_height, false)
        };

        Fit {
            spec: DimensionSpec {
                cell_size: self.clamp_cell(cell),
                columns,
                rows,
                width_priority,
            },
            clamped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> DimensionPolicy {
        DimensionPolicy::new(Bounds::default())
    }

    #[test]
    fn test_auto_fit_plain() {
        let spec = policy().auto_fit(Viewport::new(1000.0, 600.0, 0.0), 20);
        assert_eq!((spec.columns, spec.rows, spec.cell_size), (50, 30, 20));
        assert!(!spec.width_priority);
    }

    #[test]
    fn test_auto_fit_subtracts_chrome() {
        let spec = policy().auto_fit(Viewport::new(1000.0, 700.0, 100.0), 20);
        assert_eq!((spec.columns, spec.rows), (50, 30));
    }

    #[test]
    fn test_auto_fit_degenerate_shrinks_cell() {
        let spec = policy().auto_fit(Viewport::new(20.0, 20.0, 0.0), 20);
        assert_eq!(spec.cell_size, 4);
        assert_eq!((spec.columns, spec.rows), (5, 5));
    }

    #[test]
    fn test_auto_fit_tiny_viewport_keeps_minimums() {
        let spec = policy().auto_fit(Viewport::new(8.0, 0.0, 0.0), 20);
        assert_eq!(spec.cell_size, 3);
        assert_eq!((spec.columns, spec.rows), (5, 5));
    }

    #[test]
    fn test_auto_fit_caps_at_max_dim() {
        let bounds = Bounds {
            max_dim: Some(100),
            ..Bounds::default()
        };
        let spec = DimensionPolicy::new(bounds).auto_fit(Viewport::new(3000.0, 200.0, 0.0), 3);
        assert_eq!(spec.columns, 100);
        assert_eq!(spec.rows, 66);
    }

    #[test]
    fn test_explicit_fits_by_height() {
        let fit = policy().explicit_fit(Viewport::new(1000.0, 600.0, 0.0), DesiredResolution::new(40, 30));
        assert_eq!(fit.spec.cell_size, 20);
        assert_eq!((fit.spec.columns, fit.spec.rows), (40, 30));
        assert!(!fit.spec.width_priority);
        assert!(!fit.clamped);
    }

    #[test]
    fn test_explicit_narrow_prefers_width() {
        // By height: 600/200 = 3px, 20 * 3 = 60px wide < 500px.
        let fit = policy().explicit_fit(Viewport::new(1000.0, 600.0, 0.0), DesiredResolution::new(20, 200));
        assert!(fit.spec.width_priority);
        assert_eq!(fit.spec.cell_size, 50);
    }

    #[test]
    fn test_explicit_applies_minimums() {
        let fit = policy().explicit_fit(Viewport::new(1000.0, 600.0, 0.0), DesiredResolution::new(1, 2));
        assert_eq!((fit.spec.columns, fit.spec.rows), (5, 5));
        assert_eq!(fit.spec.cell_size, 80);
    }

    #[test]
    fn test_explicit_clamps_to_max_dim() {
        let bounds = Bounds {
            max_dim: Some(200),
            ..Bounds::default()
        };
        let fit = DimensionPolicy::new(bounds)
            .explicit_fit(Viewport::new(1000.0, 600.0, 0.0), DesiredResolution::new(500, 100));
        assert!(fit.clamped);
        assert_eq!((fit.spec.columns, fit.spec.rows), (200, 100));
        assert_eq!(fit.spec.cell_size, 6);
    }

    #[test]
    fn test_default_bounds_cap_huge_requests() {
        let fit = policy().explicit_fit(
            Viewport::new(1000.0, 600.0, 0.0),
            DesiredResolution::new(4_294_967_296, 4_294_967_296),
        );
        assert!(fit.clamped);
        assert_eq!((fit.spec.columns, fit.spec.rows), (1000, 1000));
    }

    #[test]
    fn test_explicit_tiny_cells_clamp_to_minimum() {
        let fit = policy().explicit_fit(Viewport::new(1000.0, 600.0, 0.0), DesiredResolution::new(1000, 1000));
        assert_eq!(fit.spec.cell_size, 3);
    }

    #[test]
    fn test_resolve_dispatches_on_desired() {
        let vp = Viewport::new(1000.0, 600.0, 0.0);
        assert_eq!(policy().resolve(vp, 20, None).spec.columns, 50);
        assert_eq!(policy().resolve(vp, 20, Some(DesiredResolution::new(10, 10))).spec.columns, 10);
    }
}
