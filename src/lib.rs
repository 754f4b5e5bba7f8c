// Domain layer - Board model and generation engine
pub mod domain;

// Application layer - Simulation controller and configuration
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Board, BoardError, Cell, Pattern, next_generation, presets};
pub use application::{
    CommandOutcome, ConfigError, IgnoreReason, RunState, SimulationConfig, SimulationController,
    Snapshot,
};
