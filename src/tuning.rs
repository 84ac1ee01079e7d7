//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so a JSON override can
//! retune a build without recompiling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Balance constants for spawning, falling speed and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Spawn interval at score 0 (ms)
    pub spawn_base_ms: u64,
    /// Interval reduction per point of score (ms)
    pub spawn_step_ms: u64,
    /// Interval floor (ms)
    pub spawn_floor_ms: u64,

    /// Fall speed at score 0 (pixels per tick)
    pub speed_base: u64,
    /// Score needed for each +1 of fall speed
    pub speed_score_step: u64,

    /// Cumulative draw threshold below which an entity is Normal
    pub normal_threshold: f64,
    /// Cumulative draw threshold below which an entity is Harmful (else Bonus)
    pub harmful_threshold: f64,

    /// Fraction of the remaining distance the basket covers each tick
    pub basket_smoothing: f32,
    pub basket_width: f32,
    pub basket_height: f32,
    /// Gap between basket bottom and play-area bottom
    pub basket_bottom_margin: f32,

    /// Falling entities are square
    pub entity_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_base_ms: 1000,
            spawn_step_ms: 20,
            spawn_floor_ms: 300,

            speed_base: 5,
            speed_score_step: 5,

            normal_threshold: 0.7,
            harmful_threshold: 0.9,

            basket_smoothing: 0.2,
            basket_width: 100.0,
            basket_height: 50.0,
            basket_bottom_margin: 10.0,

            entity_size: 50.0,
        }
    }
}

/// Why a tuning override was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning JSON could not be parsed: {}", e),
            TuningError::Invalid(why) => write!(f, "invalid tuning: {}", why),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// LocalStorage key for developer overrides
    pub const STORAGE_KEY: &'static str = "basket_catch_tuning";

    /// Parse a (possibly partial) override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_floor_ms == 0 {
            return Err(TuningError::Invalid("spawn_floor_ms must be positive"));
        }
        if self.spawn_floor_ms > self.spawn_base_ms {
            return Err(TuningError::Invalid("spawn_floor_ms exceeds spawn_base_ms"));
        }
        if self.speed_score_step == 0 {
            return Err(TuningError::Invalid("speed_score_step must be positive"));
        }
        if !(0.0..=1.0).contains(&self.normal_threshold)
            || !(self.normal_threshold..=1.0).contains(&self.harmful_threshold)
        {
            return Err(TuningError::Invalid(
                "category thresholds must satisfy 0 <= normal <= harmful <= 1",
            ));
        }
        if !(self.basket_smoothing > 0.0 && self.basket_smoothing <= 1.0) {
            return Err(TuningError::Invalid("basket_smoothing must be in (0, 1]"));
        }
        if self.basket_width <= 0.0 || self.basket_height <= 0.0 || self.entity_size <= 0.0 {
            return Err(TuningError::Invalid("sizes must be positive"));
        }
        Ok(())
    }

    /// Spawn interval for a score: max(floor, base - step * score)
    pub fn spawn_interval_ms(&self, score: u64) -> u64 {
        self.spawn_base_ms
            .saturating_sub(self.spawn_step_ms.saturating_mul(score))
            .max(self.spawn_floor_ms)
    }

    /// Fall speed for a score: base + floor(score / step)
    pub fn fall_speed(&self, score: u64) -> f32 {
        (self.speed_base + score / self.speed_score_step) as f32
    }
}
