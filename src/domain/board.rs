use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::{BoardError, Cell, Pattern};

const ALIVE_GLYPH: char = '*';
const DEAD_GLYPH: char = '.';

/// Board is an immutable snapshot of a rectangular grid of cells.
/// Every "mutating" operation returns a new board and leaves `self` untouched.
///
/// A board with zero rows or zero columns is normalised to the canonical
/// `0x0` empty board.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell dead
    pub fn empty(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(BoardError::InvalidDimension { rows, cols })?;
        if len == 0 {
            return Ok(Self::default());
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Build a board from a list of boolean rows. All rows must have the
    /// same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, BoardError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(BoardError::RaggedRows {
                row,
                expected: cols,
                found,
            });
        }
        if cols == 0 {
            return Ok(Self::default());
        }

        let height = rows.len();
        let cells = rows.into_iter().flatten().map(Cell::from).collect();
        Ok(Self::from_parts(height, cols, cells))
    }

    /// Parse the `*` (alive) / `.` (dead) text notation, one row per line.
    /// Leading/trailing whitespace and blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, glyph)| match glyph {
                        ALIVE_GLYPH => Ok(true),
                        DEAD_GLYPH => Ok(false),
                        _ => Err(BoardError::InvalidGlyph { glyph, row, col }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }

    /// Random board where each cell is alive with probability `density`.
    /// NaN counts as zero density.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let mut board = Self::empty(rows, cols)?;
        board
            .cells
            .iter_mut()
            .for_each(|cell| *cell = Cell::from(rng.random_bool(density)));
        Ok(board)
    }

    /// Assemble a board from already validated parts
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    /// (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// True for the canonical empty board
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(BoardError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Get cell at position
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.check(row, col).map(|idx| self.cells[idx])
    }

    /// Liveness at a signed coordinate; anything off the board is dead.
    pub(crate) fn is_alive_at(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        row < self.rows && col < self.cols && self.cells[self.index(row, col)].is_alive()
    }

    /// New board with the cell at (row, col) flipped
    pub fn with_toggled(&self, row: usize, col: usize) -> Result<Self, BoardError> {
        let idx = self.check(row, col)?;
        let mut next = self.clone();
        next.cells[idx] = next.cells[idx].toggle();
        Ok(next)
    }

    /// New board with `pattern` stamped with its top-left corner at
    /// (row, col). Pattern cells falling off the board are dropped.
    pub fn with_pattern(&self, pattern: &Pattern, row: usize, col: usize) -> Self {
        let mut next = self.clone();
        for &(dr, dc) in &pattern.cells {
            let (r, c) = (row.saturating_add(dr), col.saturating_add(dc));
            if r < self.rows && c < self.cols {
                let idx = self.index(r, c);
                next.cells[idx] = Cell::Alive;
            }
        }
        next
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.cols, idx % self.cols, cell))
    }

    /// Boolean matrix view of the board
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|&cell| cell.is_alive()).collect())
            .collect()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                let glyph = if cell.is_alive() { ALIVE_GLYPH } else { DEAD_GLYPH };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_board_is_all_dead() {
        let board = Board::empty(3, 4).unwrap();
        assert_eq!(board.dimensions(), (3, 4));
        assert_eq!(board.population(), 0);
        assert!(board.iter_cells().all(|(_, _, cell)| cell == Cell::Dead));
    }

    #[test]
    fn test_zero_dimensions_normalise_to_empty() {
        assert_eq!(Board::empty(0, 5).unwrap(), Board::default());
        assert_eq!(Board::empty(5, 0).unwrap(), Board::default());
        assert!(Board::empty(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Board::empty(usize::MAX, 2),
            Err(BoardError::InvalidDimension {
                rows: usize::MAX,
                cols: 2
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Board::from_rows(vec![vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_from_rows_with_empty_rows_is_empty() {
        assert!(Board::from_rows(vec![]).unwrap().is_empty());
        assert!(Board::from_rows(vec![vec![], vec![]]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        let board = Board::parse(
            "
            *..
            .*.
            ",
        )
        .unwrap();
        assert_eq!(board.dimensions(), (2, 3));
        assert_eq!(board.get(0, 0), Ok(Cell::Alive));
        assert_eq!(board.get(1, 1), Ok(Cell::Alive));
        assert_eq!(board.get(1, 2), Ok(Cell::Dead));
        assert_eq!(board.to_string(), "*..\n.*.\n");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_rejects_unknown_glyph() {
        assert_eq!(
            Board::parse("..\n.x"),
            Err(BoardError::InvalidGlyph {
                glyph: 'x',
                row: 1,
                col: 1
            })
        );
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::empty(2, 2).unwrap();
        assert_eq!(
            board.get(2, 0),
            Err(BoardError::OutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
        assert!(board.get(0, 2).is_err());
        assert!(Board::default().get(0, 0).is_err());
    }

    #[test]
    fn test_with_toggled_leaves_input_untouched() {
        let board = Board::empty(2, 2).unwrap();
        let toggled = board.with_toggled(1, 0).unwrap();

        assert_eq!(board.population(), 0);
        assert_eq!(toggled.get(1, 0), Ok(Cell::Alive));
        assert_eq!(toggled.population(), 1);
        assert!(board.with_toggled(0, 9).is_err());
    }

    #[test]
    fn test_toggle_round_trip_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let board = Board::random(6, 9, 0.4, &mut rng).unwrap();
            for (row, col, _) in board.iter_cells() {
                let twice = board
                    .with_toggled(row, col)
                    .and_then(|b| b.with_toggled(row, col))
                    .unwrap();
                assert_eq!(twice, board);
            }
        }
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Board::random(4, 4, 0.0, &mut rng).unwrap().population(), 0);
        assert_eq!(Board::random(4, 4, 1.0, &mut rng).unwrap().population(), 16);
        assert_eq!(Board::random(4, 4, 2.5, &mut rng).unwrap().population(), 16);
    }

    #[test]
    fn test_random_nan_density_is_all_dead() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::random(3, 3, f64::NAN, &mut rng).unwrap();
        assert_eq!(board.dimensions(), (3, 3));
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn test_with_pattern_clips_at_edges() {
        let board = Board::empty(3, 3).unwrap();
        let stamped = board.with_pattern(&presets::block(), 2, 2);
        assert_eq!(stamped.population(), 1);
        assert_eq!(stamped.get(2, 2), Ok(Cell::Alive));

        let centred = board.with_pattern(&presets::blinker(), 0, 0);
        assert_eq!(centred.to_string(), "...\n***\n...\n");
    }

    #[test]
    fn test_to_rows_matches_cells() {
        let board = Board::parse("*.\n.*\n**").unwrap();
        assert_eq!(
            board.to_rows(),
            vec![vec![true, false], vec![false, true], vec![true, true]]
        );
        assert!(Board::default().to_rows().is_empty());
    }
}
