use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use super::autoplay;
use super::config::{ConfigError, SimulationConfig};
use crate::domain::{Board, BoardError, generation};

/// Whether the auto-play timer is armed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub const fn is_running(self) -> bool {
        matches!(self, RunState::Running)
    }
}

/// Why a command was accepted but had no effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Editing commands are disabled while auto-play runs
    Playing,
    /// `advance` was asked for zero steps
    InvalidStepCount,
}

/// Result of a controller command that may be silently skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

/// Consistent view of the simulation at one instant
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub board: Arc<Board>,
    pub is_playing: bool,
    pub generation: u64,
}

/// State shared between the controller and its auto-play task.
pub(super) struct SimulationState {
    pub(super) board: Arc<Board>,
    pub(super) run_state: RunState,
    pub(super) generation: u64,
    /// Bumped every time auto-play starts or stops; a timer task only
    /// steps while its epoch is current.
    pub(super) epoch: u64,
    timer: Option<AbortHandle>,
}

impl SimulationState {
    /// Replace the board with its next generation
    pub(super) fn step(&mut self) {
        self.board = Arc::new(generation::next_generation(&self.board));
        self.generation += 1;
    }

    /// Disarm auto-play. Returns true if it was running.
    fn stop(&mut self) -> bool {
        let was_running = self.run_state.is_running();
        self.run_state = RunState::Stopped;
        if let Some(timer) = self.timer.take() {
            self.epoch += 1;
            timer.abort();
        }
        was_running
    }
}

pub(super) fn lock(state: &Mutex<SimulationState>) -> MutexGuard<'_, SimulationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// SimulationController owns the live board and drives auto-play.
///
/// Every board it publishes is a fresh `Arc<Board>`; earlier snapshots
/// handed out to callers are never modified. Commands are synchronous, the
/// only background work is the auto-play timer spawned on `runtime`.
pub struct SimulationController {
    config: SimulationConfig,
    blank: Arc<Board>,
    state: Arc<Mutex<SimulationState>>,
    runtime: Handle,
}

impl SimulationController {
    /// Create a stopped controller with an all-dead board
    pub fn new(config: SimulationConfig, runtime: Handle) -> Result<Self, ConfigError> {
        config.validate()?;
        let blank = Arc::new(Board::empty(config.rows, config.cols)?);
        info!(
            rows = config.rows,
            cols = config.cols,
            interval_ms = config.interval.as_millis() as u64,
            "simulation created"
        );

        let state = SimulationState {
            board: Arc::clone(&blank),
            run_state: RunState::Stopped,
            generation: 0,
            epoch: 0,
            timer: None,
        };

        Ok(Self {
            config,
            blank,
            state: Arc::new(Mutex::new(state)),
            runtime,
        })
    }

    /// Create a controller on the runtime the caller is running in.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn on_current_runtime(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(config, Handle::current())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current board snapshot
    pub fn board(&self) -> Arc<Board> {
        Arc::clone(&lock(&self.state).board)
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.state).run_state.is_running()
    }

    pub fn run_state(&self) -> RunState {
        lock(&self.state).run_state
    }

    /// Generations computed since construction, the last reset or load
    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = lock(&self.state);
        Snapshot {
            board: Arc::clone(&state.board),
            is_playing: state.run_state.is_running(),
            generation: state.generation,
        }
    }

    /// Flip one cell. Ignored while playing; out-of-range coordinates leave
    /// the board unchanged and return the error.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<CommandOutcome, BoardError> {
        let mut state = lock(&self.state);
        if state.run_state.is_running() {
            debug!(row, col, "toggle ignored while playing");
            return Ok(CommandOutcome::Ignored(IgnoreReason::Playing));
        }

        let toggled = state.board.with_toggled(row, col).inspect_err(|err| {
            warn!(%err, "toggle rejected");
        })?;
        state.board = Arc::new(toggled);
        debug!(row, col, "cell toggled");
        Ok(CommandOutcome::Applied)
    }

    /// Advance one generation. Always allowed, including while playing.
    pub fn step(&self) {
        let mut state = lock(&self.state);
        state.step();
        debug!(generation = state.generation, "stepped");
    }

    /// Advance `steps` generations and publish only the final board.
    pub fn advance(&self, steps: usize) -> CommandOutcome {
        let mut state = lock(&self.state);
        if state.run_state.is_running() {
            debug!(steps, "advance ignored while playing");
            return CommandOutcome::Ignored(IgnoreReason::Playing);
        }
        if steps == 0 {
            debug!("advance ignored: step count must be positive");
            return CommandOutcome::Ignored(IgnoreReason::InvalidStepCount);
        }

        state.board = Arc::new(generation::advance(&state.board, steps));
        state.generation += steps as u64;
        debug!(steps, generation = state.generation, "advanced");
        CommandOutcome::Applied
    }

    /// Start auto-play when stopped, stop it when running. Returns the new state.
    pub fn play_pause(&self) -> RunState {
        let mut state = lock(&self.state);
        if state.stop() {
            info!(generation = state.generation, "auto-play stopped");
            return RunState::Stopped;
        }

        state.epoch += 1;
        state.run_state = RunState::Running;
        let task = self.runtime.spawn(autoplay::run(
            Arc::clone(&self.state),
            state.epoch,
            self.config.interval,
        ));
        state.timer = Some(task.abort_handle());
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            "auto-play started"
        );
        RunState::Running
    }

    /// Stop auto-play and clear the board back to the configured size.
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        if state.stop() {
            info!("auto-play stopped by reset");
        }
        state.board = Arc::clone(&self.blank);
        state.generation = 0;
        info!(rows = self.config.rows, cols = self.config.cols, "board reset");
    }

    /// Replace the board wholesale, e.g. with a preset. Ignored while
    /// playing; the board must match the configured dimensions.
    pub fn load(&self, board: Board) -> Result<CommandOutcome, BoardError> {
        let mut state = lock(&self.state);
        if state.run_state.is_running() {
            debug!("load ignored while playing");
            return Ok(CommandOutcome::Ignored(IgnoreReason::Playing));
        }
        if board.dimensions() != self.blank.dimensions() {
            let (rows, cols) = board.dimensions();
            warn!(rows, cols, "load rejected: dimensions differ from configuration");
            return Err(BoardError::InvalidDimension { rows, cols });
        }

        state.board = Arc::new(board);
        state.generation = 0;
        debug!(population = state.board.population(), "board loaded");
        Ok(CommandOutcome::Applied)
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        if lock(&self.state).stop() {
            debug!("auto-play released on drop");
        }
    }
}
