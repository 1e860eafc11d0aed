// rules.rs - The B3/S23 transition rule

use crate::grid::Grid;

/// Next state of one cell from its current state and live-neighbour count.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Computes one row of the next generation from a full snapshot.
fn process_row(grid: &Grid, y: usize) -> Vec<bool> {
    (0..grid.width())
        .map(|x| next_state(grid.row(y)[x], grid.alive_neighbors(x, y)))
        .collect()
}

/// Produces the next generation. The input is never touched, so every cell
/// sees the same generation; the caller swaps the result in.
pub fn step(grid: &Grid) -> Grid {
    let cells = (0..grid.height()).flat_map(|y| process_row(grid, y)).collect();
    Grid::from_cells(grid.width(), grid.height(), cells)
}
