//! Basket Catch - A browser arcade catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catching, game state)
//! - `renderer`: HUD snapshot and DOM presentation
//! - `audio`: One-shot sound cues gated behind a user gesture
//! - `platform`: Browser/native platform abstraction (storage)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscore::HighScore;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; entity speeds are per tick)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Frame delta clamp (tab switches produce huge gaps)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;

    /// Default play area, used until the host reports the container size
    pub const DEFAULT_AREA_WIDTH: f32 = 800.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 600.0;

    /// Lives at session start, also the cap for bonus refills
    pub const MAX_LIVES: u8 = 3;
    /// Score points per level
    pub const POINTS_PER_LEVEL: u64 = 10;

    /// Sparkles per bonus catch
    pub const SPARKLE_COUNT: usize = 10;
    /// Max sparkle offset from the catch point (pixels)
    pub const SPARKLE_SPREAD: f32 = 15.0;
    /// Sparkle lifetime (ms of simulated time)
    pub const SPARKLE_LIFETIME_MS: f64 = 600.0;
}

/// Level is a pure function of score: floor(score / 10) + 1
#[inline]
pub fn level_for_score(score: u64) -> u64 {
    score / consts::POINTS_PER_LEVEL + 1
}
