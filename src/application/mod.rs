mod autoplay;
mod config;
mod controller;

pub use config::{
    COLS_VAR, ConfigError, DEFAULT_COLS, DEFAULT_INTERVAL, DEFAULT_ROWS, INTERVAL_VAR, ROWS_VAR,
    SimulationConfig,
};
pub use controller::{CommandOutcome, IgnoreReason, RunState, SimulationController, Snapshot};
