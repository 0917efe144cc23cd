//! Deferred gameplay actions
//!
//! Door delays, the jumpscare-to-game-over beat and the post-escape reset all
//! fire after a fixed wait. Each one is stamped with the epoch it was queued
//! under so a reset in between turns it into a no-op.

use serde::{Deserialize, Serialize};

/// What a deferred action does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Spend the roof key and go down into the apartments
    OpenRoofDoor,
    /// End of the jumpscare beat
    ForceGameOver,
    /// Escape celebration is over, back to the menu
    ResetAfterEscape,
}

/// A queued action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    pub id: u64,
    /// Session clock time it becomes due
    pub due_at: f64,
    /// Epoch it was scheduled under
    pub epoch: u64,
    pub action: DeferredAction,
}

/// Timer queue driven by the session clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Deferred>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: f64, delay: f64, epoch: u64, action: DeferredAction) {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Deferred {
            id,
            due_at: now + delay,
            epoch,
            action,
        });
    }

    /// Remove and return everything due at `now`, oldest deadline first.
    /// Equal deadlines keep scheduling order.
    pub fn take_due(&mut self, now: f64) -> Vec<Deferred> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|d| d.due_at <= now);
        self.pending = pending;
        due.sort_by(|a, b| {
            a.due_at
                .partial_cmp(&b.due_at)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        due
    }

    /// Whether `action` is queued under `epoch`. Leftovers from an earlier
    /// epoch do not count; they will be dropped when they fire.
    pub fn is_pending(&self, action: DeferredAction, epoch: u64) -> bool {
        self.pending
            .iter()
            .any(|d| d.action == action && d.epoch == epoch)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
