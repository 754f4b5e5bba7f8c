use std::{env, time::Duration};

use thiserror::Error;

use crate::domain::BoardError;

pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 30;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

pub const ROWS_VAR: &str = "LIFE_ROWS";
pub const COLS_VAR: &str = "LIFE_COLS";
pub const INTERVAL_VAR: &str = "LIFE_INTERVAL_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("auto-play interval must be greater than zero")]
    InvalidInterval,

    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Construction parameters of a simulation: grid size and auto-play period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl SimulationConfig {
    pub fn new(rows: usize, cols: usize, interval: Duration) -> Result<Self, ConfigError> {
        let config = Self { rows, cols, interval };
        config.validate()?;
        Ok(config)
    }

    /// Same as `new`, with the period given in milliseconds
    pub fn with_interval_ms(rows: usize, cols: usize, interval_ms: u64) -> Result<Self, ConfigError> {
        Self::new(rows, cols, Duration::from_millis(interval_ms))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::InvalidInterval);
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(BoardError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }
        Ok(())
    }

    /// Read `LIFE_ROWS`, `LIFE_COLS` and `LIFE_INTERVAL_MS`, defaulting
    /// whatever is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixtures)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let rows = parse_var(&lookup, ROWS_VAR)?.unwrap_or(defaults.rows as u64);
        let cols = parse_var(&lookup, COLS_VAR)?.unwrap_or(defaults.cols as u64);
        let interval_ms = parse_var(&lookup, INTERVAL_VAR)?
            .unwrap_or(defaults.interval.as_millis() as u64);

        let rows = to_usize(ROWS_VAR, rows)?;
        let cols = to_usize(COLS_VAR, cols)?;
        Self::with_interval_ms(rows, cols, interval_ms)
    }
}

fn parse_var<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

fn to_usize(key: &'static str, value: u64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
