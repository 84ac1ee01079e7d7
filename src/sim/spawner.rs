//! Spawn timing
//!
//! The interval shrinks with score down to a floor; that is the whole
//! difficulty curve apart from fall speed.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Time since the last spawn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub elapsed_ms: f64,
}

impl Spawner {
    /// Accumulate time; returns true (and resets) when a spawn is due
    pub fn advance(&mut self, dt_ms: f64, score: u64, tuning: &Tuning) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= tuning.spawn_interval_ms(score) as f64 {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}
