use serde::Deserialize;
use thiserror::Error;

use crate::shared::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_MAJORITY, DEFAULT_MIN_COMPONENT_SIZE};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("block size must be at least 1 pixel, got {0}")]
    BlockSize(u32),
    #[error("majority must be in (0, 1], got {0}")]
    Majority(f64),
}

/// Tuning for one detector run.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Side length of a block in pixels.
    pub block_size: u32,
    /// Minimum number of blocks a component needs to survive filtering.
    pub min_component_size: usize,
    /// Fraction of a block's pixels that must match its class.
    pub majority: f64,
}

impl DetectorConfig {
    pub fn new(block_size: u32, min_component_size: usize, majority: f64) -> Self {
        Self {
            block_size,
            min_component_size,
            majority,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 || self.block_size > i32::MAX as u32 {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if !(self.majority > 0.0 && self.majority <= 1.0) {
            return Err(ConfigError::Majority(self.majority));
        }
        Ok(())
    }

    /// Matching pixels a block needs: `block_size² × majority`.
    pub fn block_threshold(&self) -> f64 {
        let side = f64::from(self.block_size);
        side * side * self.majority
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE, DEFAULT_MIN_COMPONENT_SIZE, DEFAULT_MAJORITY)
    }
}
