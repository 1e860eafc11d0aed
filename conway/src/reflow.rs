// reflow.rs - Rebuilding the grid after a viewport or resolution change

use rand::Rng;
use tracing::{debug, warn};

use crate::dimension::{DesiredResolution, DimensionPolicy, DimensionSpec, Viewport};
use crate::error::Result;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowOptions {
    pub preserve_state: bool,
    pub force_randomize: bool,
}

impl ReflowOptions {
    /// During a resize burst: keep whatever still fits.
    pub const LIVE: Self = Self {
        preserve_state: true,
        force_randomize: false,
    };

    /// After the burst has settled: start over with a random field.
    pub const SETTLE: Self = Self {
        preserve_state: false,
        force_randomize: true,
    };
}

/// A freshly allocated grid and the layout it was built for.
#[derive(Debug, Clone)]
pub struct Reflow {
    pub grid: Grid,
    pub spec: DimensionSpec,
    /// The desired resolution was cut down to `max_dim`.
    pub clamped: bool,
    /// Cells were randomized rather than copied; the generation restarts.
    pub randomized: bool,
}

/// Holds the sizing inputs that persist across reflows: the current cell
/// size and an optional explicit resolution.
#[derive(Debug, Clone)]
pub struct ReflowCoordinator {
    policy: DimensionPolicy,
    cell_size: u32,
    desired: Option<DesiredResolution>,
}

impl ReflowCoordinator {
    pub fn new(policy: DimensionPolicy, cell_size: u32) -> Self {
        let cell_size = policy.clamp_cell(cell_size);
        Self {
            policy,
            cell_size,
            desired: None,
        }
    }

    pub fn policy(&self) -> &DimensionPolicy {
        &self.policy
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = self.policy.clamp_cell(cell_size);
    }

    pub fn desired(&self) -> Option<DesiredResolution> {
        self.desired
    }

    pub fn set_desired(&mut self, desired: DesiredResolution) {
        self.desired = Some(desired);
    }

    pub fn clear_desired(&mut self) {
        self.desired = None;
    }

    /// Resolves the layout for `viewport` and builds the replacement grid.
    ///
    /// The overlap with `previous` is copied when state is preserved, even
    /// if every cell is dead; otherwise (or with no previous grid) every cell
    /// is randomized. A failed allocation leaves the coordinator unchanged.
    pub fn reflow<R: Rng + ?Sized>(
        &mut self,
        previous: Option<&Grid>,
        viewport: Viewport,
        options: ReflowOptions,
        rng: &mut R,
    ) -> Result<Reflow> {
        let fit = self.policy.resolve(viewport, self.cell_size, self.desired);
        let spec = fit.spec;
        let mut grid = Grid::new(spec.columns, spec.rows)?;
        self.cell_size = spec.cell_size;

        if fit.clamped {
            if let Some(desired) = self.desired {
                warn!(
                    "Requested resolution {} clamped to {}x{}",
                    desired, spec.columns, spec.rows
                );
            }
        }

        let randomized = match previous {
            Some(old) if options.preserve_state && !options.force_randomize => {
                grid.copy_overlap_from(old);
                false
            }
            _ => {
                grid.randomize(rng);
                true
            }
        };

        debug!(
            "Reflow to {}x{} cells of {}px (width priority: {}, randomized: {})",
            spec.columns, spec.rows, spec.cell_size, spec.width_priority, randomized
        );

        Ok(Reflow {
            grid,
            spec,
            clamped: fit.clamped,
            randomized,
        })
    }
}
