//! Game state and core simulation types
//!
//! All state for one play session lives in a single owned `GameState`.
//! It changes only through the transition methods below and `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::basket::Basket;
use super::collision::Rect;
use super::spawner::Spawner;
use crate::consts::*;
use crate::highscore::HighScore;
use crate::level_for_score;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Objects fall, basket catches
    Running,
    /// Lives ran out; waiting for restart
    GameOver,
}

/// Stable handle for a falling entity (renderer looks up visuals by this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Falling object categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Catch for a point, lose a life if missed
    Normal,
    /// Costs a life when caught, harmless when missed
    Harmful,
    /// +3 points and a life back, lose a life if missed
    Bonus,
}

impl EntityKind {
    /// Map a uniform [0, 1) draw onto a category using cumulative thresholds
    pub fn from_roll(roll: f64, tuning: &Tuning) -> Self {
        if roll < tuning.normal_threshold {
            EntityKind::Normal
        } else if roll < tuning.harmful_threshold {
            EntityKind::Harmful
        } else {
            EntityKind::Bonus
        }
    }

    /// Whether letting it fall off-screen costs a life
    pub fn penalized_on_miss(&self) -> bool {
        !matches!(self, EntityKind::Harmful)
    }
}

/// A falling object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Top-left corner; y grows downward
    pub pos: Vec2,
}

impl Entity {
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(size))
    }

    pub fn center(&self, size: f32) -> Vec2 {
        self.pos + Vec2::splat(size / 2.0)
    }
}

/// A sparkle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    pub id: u32,
    pub pos: Vec2,
    /// Hue in degrees (0-360)
    pub hue: f32,
    pub age_ms: f64,
}

impl Sparkle {
    /// 0 when born, 1 when expired
    pub fn progress(&self) -> f32 {
        (self.age_ms / SPARKLE_LIFETIME_MS).clamp(0.0, 1.0) as f32
    }

    pub fn expired(&self) -> bool {
        self.age_ms >= SPARKLE_LIFETIME_MS
    }
}

/// Container size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: DEFAULT_AREA_WIDTH,
            height: DEFAULT_AREA_HEIGHT,
        }
    }
}

/// Things that happened during a tick, drained by the host for audio,
/// persistence and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: EntityId, kind: EntityKind },
    Caught { id: EntityId, kind: EntityKind, center: Vec2 },
    Missed { id: EntityId, kind: EntityKind },
    SparkleBurst { center: Vec2 },
    GameOver { final_score: u64, new_high_score: bool },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub score: u64,
    /// Always within [0, MAX_LIVES]
    pub lives: u8,
    pub phase: GamePhase,
    /// Best score across sessions; only changes at game end
    pub high_score: HighScore,
    /// Final score of the last finished session
    pub final_score: Option<u64>,
    pub basket: Basket,
    pub spawner: Spawner,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    pub sparkles: Vec<Sparkle>,
    pub play_area: PlayArea,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session
    pub fn new(seed: u64, play_area: PlayArea, tuning: Tuning, high_score: HighScore) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: MAX_LIVES,
            phase: GamePhase::Running,
            high_score,
            final_score: None,
            basket: Basket::centered(play_area.width, tuning.basket_width),
            spawner: Spawner::default(),
            entities: Vec::new(),
            sparkles: Vec::new(),
            play_area,
            tuning,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Default play area, default tuning, no high score
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, PlayArea::default(), Tuning::default(), HighScore::default())
    }

    /// Derived from score, never stored
    pub fn level(&self) -> u64 {
        level_for_score(self.score)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Update the container size; keeps the basket inside
    pub fn resize(&mut self, width: f32, height: f32) {
        self.play_area = PlayArea { width, height };
        self.basket.clamp_to(width, self.tuning.basket_width);
    }

    /// Basket collision box (sits at the bottom of the play area)
    pub fn basket_bounds(&self) -> Rect {
        let top = self.play_area.height - self.tuning.basket_bottom_margin - self.tuning.basket_height;
        Rect::from_pos_size(
            Vec2::new(self.basket.x, top),
            Vec2::new(self.tuning.basket_width, self.tuning.basket_height),
        )
    }

    /// Put an entity at the top of the play area
    pub fn spawn_entity(&mut self, kind: EntityKind, x: f32) -> EntityId {
        self.spawn_entity_at(kind, Vec2::new(x, 0.0))
    }

    /// Put an entity at an arbitrary position
    pub fn spawn_entity_at(&mut self, kind: EntityKind, pos: Vec2) -> EntityId {
        let id = EntityId(self.next_id());
        self.entities.push(Entity { id, kind, pos });
        self.events.push(GameEvent::Spawned { id, kind });
        log::debug!("Spawned {:?} #{} at x={:.0}", kind, id.0, pos.x);
        id
    }

    /// Draw a category and a column, then spawn
    pub fn spawn_random(&mut self) -> EntityId {
        let roll: f64 = self.rng.random();
        let kind = EntityKind::from_roll(roll, &self.tuning);
        let span = (self.play_area.width - self.tuning.entity_size).max(0.0);
        let x = self.rng.random::<f32>() * span;
        self.spawn_entity(kind, x)
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Apply the catch transition for an entity already removed from the live set
    pub fn apply_catch(&mut self, entity: &Entity) {
        let center = entity.center(self.tuning.entity_size);
        match entity.kind {
            EntityKind::Normal => self.score += 1,
            EntityKind::Harmful => self.lose_life(),
            EntityKind::Bonus => {
                self.score += 3;
                self.lives = (self.lives + 1).min(MAX_LIVES);
                self.burst_sparkles(center);
            }
        }
        self.events.push(GameEvent::Caught {
            id: entity.id,
            kind: entity.kind,
            center,
        });
    }

    /// Apply the off-screen transition for an entity already removed from the live set
    pub fn apply_miss(&mut self, entity: &Entity) {
        if entity.kind.penalized_on_miss() {
            self.lose_life();
        }
        self.events.push(GameEvent::Missed {
            id: entity.id,
            kind: entity.kind,
        });
    }

    fn burst_sparkles(&mut self, center: Vec2) {
        for _ in 0..SPARKLE_COUNT {
            let dx = self.rng.random_range(-SPARKLE_SPREAD..SPARKLE_SPREAD);
            let dy = self.rng.random_range(-SPARKLE_SPREAD..SPARKLE_SPREAD);
            let hue = self.rng.random_range(0.0..360.0);
            let id = self.next_id();
            self.sparkles.push(Sparkle {
                id,
                pos: center + Vec2::new(dx, dy),
                hue,
                age_ms: 0.0,
            });
        }
        self.events.push(GameEvent::SparkleBurst { center });
    }

    /// Age sparkles and drop the expired ones
    pub fn age_sparkles(&mut self, dt_ms: f64) {
        for sparkle in &mut self.sparkles {
            sparkle.age_ms += dt_ms;
        }
        self.sparkles.retain(|s| !s.expired());
    }

    /// Running -> GameOver; records the high score
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.score);
        let new_high_score = self.high_score.record(self.score);
        log::info!(
            "Game over: score {} (level {}), high score {}{}",
            self.score,
            self.level(),
            self.high_score.best(),
            if new_high_score { " - new record!" } else { "" }
        );
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
            new_high_score,
        });
    }

    /// Back to a fresh Running session; keeps high score, tuning, play area and basket
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = MAX_LIVES;
        self.phase = GamePhase::Running;
        self.final_score = None;
        self.entities.clear();
        self.sparkles.clear();
        self.spawner.reset();
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted (high score {})", self.high_score.best());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::with_seed(1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level(), 1);
        assert!(state.is_running());
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_kind_thresholds() {
        let t = Tuning::default();
        assert_eq!(EntityKind::from_roll(0.0, &t), EntityKind::Normal);
        assert_eq!(EntityKind::from_roll(0.6999, &t), EntityKind::Normal);
        assert_eq!(EntityKind::from_roll(0.7, &t), EntityKind::Harmful);
        assert_eq!(EntityKind::from_roll(0.8999, &t), EntityKind::Harmful);
        assert_eq!(EntityKind::from_roll(0.9, &t), EntityKind::Bonus);
        assert_eq!(EntityKind::from_roll(0.9999, &t), EntityKind::Bonus);
    }

    #[test]
    fn test_spawn_random_stays_in_columns() {
        let mut state = GameState::with_seed(7);
        for _ in 0..200 {
            state.spawn_random();
        }
        let max_x = state.play_area.width - state.tuning.entity_size;
        assert!(state.entities.iter().all(|e| e.pos.x >= 0.0 && e.pos.x <= max_x));
        assert!(state.entities.iter().all(|e| e.pos.y == 0.0));
        // Distinct ids
        let mut ids: Vec<_> = state.entities.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_spawn_in_narrow_area_pins_to_left() {
        let mut state = GameState::with_seed(3);
        state.resize(30.0, 600.0);
        let id = state.spawn_random();
        let e = state.entities.iter().find(|e| e.id == id).unwrap();
        assert_eq!(e.pos.x, 0.0);
    }

    #[test]
    fn test_bonus_catch_caps_lives_and_sparkles() {
        let mut state = GameState::with_seed(1);
        let bonus = Entity {
            id: EntityId(99),
            kind: EntityKind::Bonus,
            pos: Vec2::new(100.0, 100.0),
        };
        state.apply_catch(&bonus);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 3);
        assert_eq!(state.sparkles.len(), SPARKLE_COUNT);
        let center = Vec2::new(125.0, 125.0);
        assert!(state.sparkles.iter().all(|s| (s.pos - center).abs().max_element() <= SPARKLE_SPREAD));
        assert!(state.events().contains(&GameEvent::SparkleBurst { center }));
    }

    #[test]
    fn test_sparkles_expire() {
        let mut state = GameState::with_seed(1);
        state.burst_sparkles(Vec2::ZERO);
        state.age_sparkles(SPARKLE_LIFETIME_MS / 2.0);
        assert_eq!(state.sparkles.len(), SPARKLE_COUNT);
        assert!((state.sparkles[0].progress() - 0.5).abs() < 1e-6);
        state.age_sparkles(SPARKLE_LIFETIME_MS / 2.0);
        assert!(state.sparkles.is_empty());
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let mut state = GameState::with_seed(1);
        state.score = 4;
        state.end_game();
        state.score = 9;
        state.end_game();
        assert_eq!(state.final_score, Some(4));
        assert_eq!(state.high_score.best(), 4);
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut state = GameState::with_seed(1);
        state.score = 12;
        state.lives = 0;
        state.spawn_entity(EntityKind::Normal, 10.0);
        state.end_game();
        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level(), 1);
        assert!(state.is_running());
        assert!(state.entities.is_empty());
        assert_eq!(state.final_score, None);
        assert_eq!(state.high_score.best(), 12);
    }

    #[test]
    fn test_basket_sits_on_bottom() {
        let state = GameState::with_seed(1);
        let b = state.basket_bounds();
        assert_eq!(b.bottom(), 590.0);
        assert_eq!(b.top(), 540.0);
        assert_eq!(b.left(), 350.0);
        assert_eq!(b.right(), 450.0);
    }
}
