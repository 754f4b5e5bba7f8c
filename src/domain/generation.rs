//! Generation engine: computes the next board from the current one.
//!
//! The grid is bounded. Cells past the edge do not exist, so an edge cell
//! simply has fewer neighbours; nothing wraps around.

use super::{Board, Cell};

/// Moore neighbourhood offsets, excluding the centre cell
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count live neighbours of (row, col) without wrapping
pub fn live_neighbors(board: &Board, row: usize, col: usize) -> u8 {
    let (r, c) = (row as isize, col as isize);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| board.is_alive_at(r + dr, c + dc))
        .count() as u8
}

/// Pure functional evolution - returns a new board of the same dimensions
pub fn next_generation(board: &Board) -> Board {
    if board.is_empty() {
        return Board::default();
    }

    let (rows, cols) = board.dimensions();
    let cells: Vec<Cell> = board
        .iter_cells()
        .map(|(row, col, cell)| cell.evolve(live_neighbors(board, row, col)))
        .collect();

    Board::from_parts(rows, cols, cells)
}

/// Apply `next_generation` `steps` times, keeping only the final board
pub fn advance(board: &Board, steps: usize) -> Board {
    (0..steps).fold(board.clone(), |current, _| next_generation(&current))
}
