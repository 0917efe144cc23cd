//! Non-fatal gameplay faults
//!
//! Nothing here ever ends a session. Each variant is either logged and
//! ignored, or turned into a notification by the caller.

use std::fmt;

use super::state::{GameState, ItemType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Screen change outside the usual menu/play graph (still applied)
    InvalidTransition { from: GameState, to: GameState },
    /// An action needed an item the player does not hold
    MissingItem(ItemType),
    /// Deferred callback scheduled before the last full reset
    StaleDeferred { scheduled: u64, current: u64 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidTransition { from, to } => {
                write!(f, "unexpected screen transition {from:?} -> {to:?}")
            }
            GameError::MissingItem(item) => write!(f, "missing item {}", item.as_str()),
            GameError::StaleDeferred { scheduled, current } => write!(
                f,
                "deferred callback from epoch {scheduled} dropped (now epoch {current})"
            ),
        }
    }
}

impl std::error::Error for GameError {}
