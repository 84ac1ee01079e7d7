//! Sound cues
//!
//! Three one-shot cues. Browsers refuse playback until the user interacts
//! with the page, so every cue is dropped until `AudioGate::unlock` runs
//! from a gesture handler. Playback failures are swallowed.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{EntityKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Normal object caught
    Catch,
    /// Harmful object caught, or a needed object missed
    Miss,
    /// Bonus object caught
    Bonus,
}

impl SoundCue {
    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::Caught { kind, .. } => Some(match kind {
                EntityKind::Normal => SoundCue::Catch,
                EntityKind::Harmful => SoundCue::Miss,
                EntityKind::Bonus => SoundCue::Bonus,
            }),
            GameEvent::Missed { kind, .. } if kind.penalized_on_miss() => Some(SoundCue::Miss),
            _ => None,
        }
    }
}

/// Tracks whether a user gesture has permitted audio yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioGate {
    unlocked: bool,
}

impl AudioGate {
    /// Returns true only on the first call (the one that should resume the context)
    pub fn unlock(&mut self) -> bool {
        !std::mem::replace(&mut self.unlocked, true)
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Cues to play for a batch of events; empty while locked
    pub fn cues(&self, events: &[GameEvent]) -> Vec<SoundCue> {
        if !self.unlocked {
            return Vec::new();
        }
        events.iter().filter_map(SoundCue::for_event).collect()
    }
}
