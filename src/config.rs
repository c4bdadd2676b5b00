//! Fixed rules of the 5x5 skirmish variant played by the mobile client.

/// Side length of the square grid.
pub const GRID_SIZE: u8 = 5;

/// Total number of cells on the grid.
pub const GRID_CELLS: u8 = GRID_SIZE * GRID_SIZE;

/// Number of single-cell ships each player places.
pub const FLEET_SIZE: usize = 3;

/// Number of hits that decides the game.
pub const WIN_HITS: u8 = 3;

/// Flatten a (row, col) coordinate into a cell index in `[0, GRID_CELLS)`.
pub const fn cell_index(row: u8, col: u8) -> u8 {
    row * GRID_SIZE + col
}
