//! Presentation
//!
//! `HudView` is a plain snapshot of what the player should see, computed from
//! the game state. The DOM backend (wasm only) applies it to the page.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use glam::Vec2;

use crate::consts::MAX_LIVES;
use crate::sim::{EntityKind, GameState};

/// One slot in the lives row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heart {
    Full,
    Empty,
}

impl Heart {
    pub fn image(&self) -> &'static str {
        match self {
            Heart::Full => "heart_full.png",
            Heart::Empty => "heart_empty.png",
        }
    }
}

/// Sprite for a falling object
pub fn sprite_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Normal => "object1.png",
        EntityKind::Harmful => "object2.png",
        EntityKind::Bonus => "object3.png",
    }
}

/// A sparkle ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct SparkleView {
    pub id: u32,
    pub pos: Vec2,
    pub hue: f32,
    /// 1 when born, fading to 0
    pub opacity: f32,
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub score_text: String,
    pub hearts: [Heart; MAX_LIVES as usize],
    pub sparkles: Vec<SparkleView>,
    /// Final score when the game-over overlay is up
    pub game_over: Option<u64>,
}

impl HudView {
    pub fn from_state(state: &GameState, show_sparkles: bool) -> Self {
        let mut hearts = [Heart::Empty; MAX_LIVES as usize];
        for heart in hearts.iter_mut().take(state.lives as usize) {
            *heart = Heart::Full;
        }

        let sparkles = if show_sparkles {
            state
                .sparkles
                .iter()
                .map(|s| SparkleView {
                    id: s.id,
                    pos: s.pos,
                    hue: s.hue,
                    opacity: 1.0 - s.progress(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            score_text: format!(
                "Score: {} | High Score: {} | Level: {}",
                state.score,
                state.high_score.best(),
                state.level()
            ),
            hearts,
            sparkles,
            game_over: if state.is_running() {
                None
            } else {
                Some(state.final_score.unwrap_or(state.score))
            },
        }
    }
}
