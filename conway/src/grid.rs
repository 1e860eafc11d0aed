// grid.rs - Toroidal cell matrix for Conway's Game of Life

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::error::{LifeError, Result};

/// Fixed-size boolean cell matrix whose edges wrap around.
///
/// Cells are stored row-major (`y * width + x`). Dimensions never change for
/// the lifetime of a `Grid`; a resize allocates a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid. Fails with `InvalidDimension` when either side is zero
    /// or the cell count does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(LifeError::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Wraps row-major cells already sized `width * height`.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(self.index(x, y))
        } else {
            Err(LifeError::IndexOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Reads a cell with toroidal wrapping, so any coordinate is valid.
    pub fn get(&self, x: isize, y: isize) -> bool {
        let wx = x.rem_euclid(self.width as isize) as usize;
        let wy = y.rem_euclid(self.height as isize) as usize;
        self.cells[self.index(wx, wy)]
    }

    /// Writes an in-range cell. No wrapping.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let idx = self.check(x, y)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Mutable access to a cell, `None` when out of range.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut bool> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Flips an in-range cell and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        let idx = self.check(x, y)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Alive count among the 8 wrapped neighbours of `(x, y)`.
    pub fn alive_neighbors(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        let neighbors = [
            (x - 1, y - 1), (x, y - 1), (x + 1, y - 1),
            (x - 1, y),                 (x + 1, y),
            (x - 1, y + 1), (x, y + 1), (x + 1, y + 1),
        ];
        neighbors.iter().filter(|&&(nx, ny)| self.get(nx, ny)).count() as u8
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Every cell independently alive with probability 0.5.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(0.5);
        }
    }

    /// Copies the overlapping top-left rectangle of `other` verbatim.
    /// Cells outside the overlap are left untouched.
    pub fn copy_overlap_from(&mut self, other: &Grid) {
        let cols = self.width.min(other.width);
        let rows = self.height.min(other.height);
        for y in 0..rows {
            let src = other.index(0, y);
            let dst = self.index(0, y);
            self.cells[dst..dst + cols].copy_from_slice(&other.cells[src..src + cols]);
        }
    }

    /// Hash of the cell contents, used for cycle detection.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.height.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Builds a grid from `(x, y)` live cells; used by tests and pattern code.
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in alive {
            grid.set(x, y, true)?;
        }
        Ok(grid)
    }

    /// Coordinates of every live cell, row-major.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&alive| if alive { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
