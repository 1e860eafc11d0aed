// patterns.rs - Catalog of well-known patterns and centered placement

use crate::error::{LifeError, Result};
use crate::grid::Grid;

/// A named set of `(x, y)` offsets. The bounding box is implied by the
/// extreme offsets.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Lightweight Spaceship",
        cells: &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (0, 5), (1, 4), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

/// Inclusive extremes of a pattern's offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

impl Pattern {
    pub fn bounding_box(&self) -> BoundingBox {
        if self.cells.is_empty() {
            return BoundingBox { min_x: 0, min_y: 0, max_x: -1, max_y: -1 };
        }
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
        for &(x, y) in self.cells {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        BoundingBox { min_x, min_y, max_x, max_y }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Finds a pattern by name, ignoring case, spaces and punctuation
/// (`"gosper glider gun"`, `"GosperGliderGun"`).
pub fn lookup(name: &str) -> Result<&'static Pattern> {
    let wanted = normalize(name);
    PATTERNS
        .iter()
        .find(|p| normalize(p.name) == wanted)
        .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|p| p.name)
}

/// Clears `grid` and writes `pattern` centered in it. Cells that land
/// outside the grid are dropped.
pub fn place(pattern: &Pattern, grid: &mut Grid) {
    grid.clear();

    let bbox = pattern.bounding_box();
    let offset_x = (grid.width() / 2) as i64 - (bbox.width() / 2) as i64;
    let offset_y = (grid.height() / 2) as i64 - (bbox.height() / 2) as i64;

    for &(x, y) in pattern.cells {
        let gx = offset_x + (x - bbox.min_x) as i64;
        let gy = offset_y + (y - bbox.min_y) as i64;
        let (Ok(gx), Ok(gy)) = (usize::try_from(gx), usize::try_from(gy)) else {
            continue;
        };
        if let Some(cell) = grid.cell_mut(gx, gy) {
            *cell = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_centered_on_10x10() {
        let mut grid = Grid::new(10, 10).unwrap();
        place(lookup("block").unwrap(), &mut grid);
        assert_eq!(grid.alive_cells(), vec![(4, 4), (5, 4), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_place_clears_first() {
        let mut grid = Grid::with_alive(10, 10, &[(0, 0), (9, 9)]).unwrap();
        place(lookup("Blinker").unwrap(), &mut grid);
        assert_eq!(grid.alive_cells(), vec![(4, 5), (5, 5), (6, 5)]);
    }

    #[test]
    fn test_oversized_pattern_is_clipped() {
        let gun = lookup("Gosper Glider Gun").unwrap();
        let mut grid = Grid::new(10, 10).unwrap();
        place(gun, &mut grid);
        assert!(grid.population() > 0);
        assert!(grid.population() < gun.cells.len());
    }

    #[test]
    fn test_clipping_on_every_edge() {
        // 3x3 glider: a 2x2 grid clips right and bottom, a 1x1 grid all sides.
        let glider = lookup("glider").unwrap();
        let mut small = Grid::new(2, 2).unwrap();
        place(glider, &mut small);
        assert_eq!(small.alive_cells(), vec![(1, 0)]);

        let mut tiny = Grid::new(1, 1).unwrap();
        place(glider, &mut tiny);
        assert_eq!(tiny.population(), 0);
    }

    #[test]
    fn test_lookup_is_forgiving() {
        assert_eq!(lookup("r pentomino").unwrap().name, "R-pentomino");
        assert_eq!(lookup("GOSPER-GLIDER-GUN").unwrap().name, "Gosper Glider Gun");
        assert!(matches!(lookup("spaceship"), Err(LifeError::UnknownPattern(_))));
    }

    #[test]
    fn test_bounding_boxes() {
        assert_eq!(lookup("pulsar").unwrap().bounding_box().width(), 13);
        let gun = lookup("gosper glider gun").unwrap().bounding_box();
        assert_eq!((gun.width(), gun.height()), (36, 9));
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut seen: Vec<String> = names().map(normalize).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), PATTERNS.len());
    }
}
