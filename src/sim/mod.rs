//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod basket;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use basket::Basket;
pub use collision::{Rect, basket_overlap};
pub use spawner::Spawner;
pub use state::{
    Entity, EntityId, EntityKind, GameEvent, GamePhase, GameState, PlayArea, Sparkle,
};
pub use tick::{Fate, TickInput, classify, tick};
