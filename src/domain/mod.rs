mod board;
mod cell;
mod error;
mod patterns;
pub mod generation;

pub use board::Board;
pub use cell::Cell;
pub use error::BoardError;
pub use generation::next_generation;
pub use patterns::{Pattern, presets};
