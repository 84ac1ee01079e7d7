//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. The host
//! calls `tick` once per fixed step; nothing here touches the display clock.

use super::collision::{Rect, basket_overlap};
use super::state::{Entity, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x relative to the play area (latest mouse/touch position)
    pub pointer_x: Option<f32>,
    /// Restart the session
    pub restart: bool,
}

/// What happened to an entity this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Falling,
    Caught,
    Missed,
}

/// Decide an already-advanced entity's fate. Catch wins over miss.
pub fn classify(item: &Rect, basket: &Rect, area_height: f32) -> Fate {
    if basket_overlap(item, basket) {
        Fate::Caught
    } else if item.top() > area_height {
        Fate::Missed
    } else {
        Fate::Falling
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if input.restart {
        state.restart();
    }

    // Basket follows the pointer in every phase
    if let Some(x) = input.pointer_x {
        let width = state.play_area.width;
        let basket_width = state.tuning.basket_width;
        state.basket.set_target(x, width, basket_width);
    }
    state.basket.step(state.tuning.basket_smoothing);

    // Sparkles finish their animation even behind the game-over overlay
    state.age_sparkles(dt_ms);

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    if state.spawner.advance(dt_ms, state.score, &state.tuning) {
        state.spawn_random();
    }

    resolve_entities(state);

    if state.lives == 0 {
        state.end_game();
    }
}

/// Move every live entity, then catch, miss or keep it
fn resolve_entities(state: &mut GameState) {
    // Speed is fixed for the whole tick, even if catches raise the score
    let speed = state.tuning.fall_speed(state.score);
    let size = state.tuning.entity_size;
    let area_height = state.play_area.height;
    let basket = state.basket_bounds();

    let entities = std::mem::take(&mut state.entities);
    let mut falling: Vec<Entity> = Vec::with_capacity(entities.len());

    for mut entity in entities {
        entity.pos.y += speed;
        match classify(&entity.bounds(size), &basket, area_height) {
            Fate::Falling => falling.push(entity),
            Fate::Caught => state.apply_catch(&entity),
            Fate::Missed => state.apply_miss(&entity),
        }
    }

    state.entities = falling;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT_MS;
    use crate::sim::state::{EntityKind, GameEvent};
    use glam::Vec2;

    /// Just above the default basket (top at y=540, x 350..450); lands next tick
    const CATCH_POS: Vec2 = Vec2::new(375.0, 490.0);
    /// Far left of the basket, one tick from leaving the 600px area
    const MISS_POS: Vec2 = Vec2::new(0.0, 598.0);

    fn step(state: &mut GameState) {
        tick(state, &TickInput::default(), SIM_DT_MS);
    }

    fn catch(state: &mut GameState, kind: EntityKind) {
        state.spawn_entity_at(kind, CATCH_POS);
        step(state);
    }

    fn miss(state: &mut GameState, kind: EntityKind) {
        state.spawn_entity_at(kind, MISS_POS);
        step(state);
    }

    #[test]
    fn test_entities_fall_at_base_speed() {
        let mut state = GameState::with_seed(1);
        state.spawn_entity(EntityKind::Normal, 0.0);
        step(&mut state);
        assert_eq!(state.entities[0].pos.y, 5.0);
        step(&mut state);
        assert_eq!(state.entities[0].pos.y, 10.0);
    }

    #[test]
    fn test_speed_scales_with_score() {
        let mut state = GameState::with_seed(1);
        state.score = 12;
        state.spawn_entity(EntityKind::Normal, 0.0);
        step(&mut state);
        assert_eq!(state.entities[0].pos.y, 7.0);
    }

    #[test]
    fn test_normal_catch() {
        let mut state = GameState::with_seed(1);
        catch(&mut state, EntityKind::Normal);
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, 3);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_harmful_catch_costs_life() {
        let mut state = GameState::with_seed(1);
        catch(&mut state, EntityKind::Harmful);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_bonus_catch_at_two_lives() {
        let mut state = GameState::with_seed(1);
        state.lives = 2;
        catch(&mut state, EntityKind::Bonus);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 3);
        assert!(!state.sparkles.is_empty());
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::SparkleBurst { .. }))
        );
    }

    #[test]
    fn test_repeated_bonus_never_exceeds_three_lives() {
        let mut state = GameState::with_seed(1);
        for _ in 0..5 {
            catch(&mut state, EntityKind::Bonus);
            assert_eq!(state.lives, 3);
        }
        assert_eq!(state.score, 15);
    }

    #[test]
    fn test_misses() {
        let mut state = GameState::with_seed(1);
        miss(&mut state, EntityKind::Harmful);
        assert_eq!((state.score, state.lives), (0, 3));
        miss(&mut state, EntityKind::Normal);
        assert_eq!((state.score, state.lives), (0, 2));
        miss(&mut state, EntityKind::Bonus);
        assert_eq!((state.score, state.lives), (0, 1));
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_entity_at_bottom_edge_keeps_falling() {
        let mut state = GameState::with_seed(1);
        // Lands exactly on y == height: not yet beyond it
        state.spawn_entity_at(EntityKind::Normal, Vec2::new(0.0, 595.0));
        step(&mut state);
        assert_eq!(state.entities.len(), 1);
        step(&mut state);
        assert!(state.entities.is_empty());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_side_pass_is_not_a_catch() {
        let mut state = GameState::with_seed(1);
        // Level with the basket but entirely to its left
        state.spawn_entity_at(EntityKind::Normal, Vec2::new(250.0, 540.0));
        step(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_every_entity_processed_in_one_tick() {
        let mut state = GameState::with_seed(1);
        state.spawn_entity_at(EntityKind::Normal, CATCH_POS);
        state.spawn_entity_at(EntityKind::Normal, CATCH_POS);
        state.spawn_entity_at(EntityKind::Normal, MISS_POS);
        state.spawn_entity_at(EntityKind::Normal, Vec2::new(0.0, 100.0));
        step(&mut state);
        assert_eq!(state.score, 2);
        assert_eq!(state.lives, 2);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_scenario_to_game_over() {
        let mut state = GameState::with_seed(1);
        for _ in 0..3 {
            catch(&mut state, EntityKind::Normal);
        }
        assert_eq!((state.score, state.lives, state.level()), (3, 3, 1));

        catch(&mut state, EntityKind::Harmful);
        assert_eq!((state.score, state.lives), (3, 2));

        miss(&mut state, EntityKind::Normal);
        assert!(state.is_running());
        catch(&mut state, EntityKind::Harmful);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, Some(3));
        assert_eq!(state.high_score.best(), 3);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            final_score: 3,
            new_high_score: true,
        }));
    }

    #[test]
    fn test_game_over_freezes_play() {
        let mut state = GameState::with_seed(1);
        state.spawn_entity(EntityKind::Normal, 0.0);
        state.lives = 1;
        miss(&mut state, EntityKind::Normal);
        assert_eq!(state.phase, GamePhase::GameOver);

        let y = state.entities[0].pos.y;
        let count = state.entities.len();
        for _ in 0..200 {
            step(&mut state);
        }
        assert_eq!(state.entities.len(), count);
        assert_eq!(state.entities[0].pos.y, y);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_basket_moves_during_game_over() {
        let mut state = GameState::with_seed(1);
        state.lives = 0;
        step(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        let input = TickInput {
            pointer_x: Some(50.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT_MS);
        assert!(state.basket.x < 350.0);
        assert_eq!(state.basket.target_x, 0.0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::with_seed(1);
        catch(&mut state, EntityKind::Normal);
        state.lives = 1;
        catch(&mut state, EntityKind::Harmful);
        assert_eq!(state.phase, GamePhase::GameOver);
        state.spawner.elapsed_ms = 500.0;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT_MS);
        assert_eq!((state.score, state.lives, state.level()), (0, 3, 1));
        assert!(state.is_running());
        assert_eq!(state.high_score.best(), 1);
        assert!(state.spawner.elapsed_ms < 500.0);
    }

    #[test]
    fn test_high_score_not_lowered() {
        let mut state = GameState::with_seed(1);
        for _ in 0..4 {
            catch(&mut state, EntityKind::Normal);
        }
        state.lives = 1;
        miss(&mut state, EntityKind::Normal);
        assert_eq!(state.high_score.best(), 4);

        state.restart();
        state.lives = 1;
        miss(&mut state, EntityKind::Normal);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score.best(), 4);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            final_score: 0,
            new_high_score: false,
        }));
    }

    #[test]
    fn test_spawns_on_schedule() {
        let mut state = GameState::with_seed(5);
        // Just under one second at 60 Hz: nothing yet
        for _ in 0..59 {
            step(&mut state);
        }
        assert!(state.entities.is_empty());
        for _ in 0..2 {
            step(&mut state);
        }
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::with_seed(99999);
        let mut state2 = GameState::with_seed(99999);

        for i in 0..3000 {
            let input = TickInput {
                pointer_x: Some((i as f32 * 3.7) % 800.0),
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT_MS);
            tick(&mut state2, &input, SIM_DT_MS);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.entities, state2.entities);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
