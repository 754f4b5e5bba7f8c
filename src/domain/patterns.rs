/// A named shape that can be stamped onto a board
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub height: usize,
    pub width: usize,
    pub cells: Vec<(usize, usize)>, // (row, col) of alive cells, relative to the top-left
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let height = cells.iter().map(|(r, _)| *r).max().map_or(0, |r| r + 1);
        let width = cells.iter().map(|(_, c)| *c).max().map_or(0, |c| c + 1);
        Self { name, description, height, width, cells }
    }

    /// Top-left position that centres the pattern on a board of the given size
    pub fn centred_origin(&self, rows: usize, cols: usize) -> (usize, usize) {
        (
            rows.saturating_sub(self.height) / 2,
            cols.saturating_sub(self.width) / 2,
        )
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (0, 1),
                (1, 0), (1, 1),
            ],
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![
                (1, 0), (1, 1), (1, 2),
            ],
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            vec![
                (0, 1), (0, 2), (0, 3),
                (1, 0), (1, 1), (1, 2),
            ],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            "Oscillator (period 2)",
            vec![
                (0, 0), (0, 1),
                (1, 0),
                (2, 3),
                (3, 2), (3, 3),
            ],
        )
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (0, 1),
                (1, 2),
                (2, 0), (2, 1), (2, 2),
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            "Lightweight Spaceship (period 4)",
            vec![
                (0, 1), (0, 4),
                (1, 0),
                (2, 0), (2, 4),
                (3, 0), (3, 1), (3, 2), (3, 3),
            ],
        )
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![block(), blinker(), toad(), beacon(), glider(), lwss()]
    }
}
