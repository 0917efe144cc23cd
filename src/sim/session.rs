//! One play session: store, scene, player, antagonists and timers
//!
//! Replaces a global store with an explicit context that every per-tick
//! system receives by `&mut`. The session clock only advances through `tick`,
//! so timers and antagonists are fully deterministic for a given input stream.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::antagonist::{AntagonistEvent, Chaser, Wanderer};
use super::error::GameError;
use super::player::Player;
use super::rolls::{RollSource, seeded};
use super::schedule::{DeferredAction, Scheduler};
use super::state::{GameState, ItemType, LevelState, Progress};
use super::world::World;
use crate::i18n::translate;
use crate::tuning::Tuning;

/// Things that happened during a tick, for audio and logging in the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemAcquired(ItemType),
    ItemSpent(ItemType),
    DoorLocked,
    DoorUnlocking,
    DoorOpened,
    DrawerEmpty,
    CableFixed { fixed: u32, required: u32 },
    FloorDescended(u32),
    LevelChanged(LevelState),
    Jumpscare,
    Caught,
    Escaped,
    GameOver,
    Reset,
}

pub struct Session<R: RollSource = Pcg32> {
    pub tuning: Tuning,
    pub progress: Progress,
    pub world: World,
    pub player: Player,
    pub chaser: Chaser,
    pub wanderer: Wanderer,
    pub scheduler: Scheduler,
    /// Simulated seconds since the session was created
    clock: f64,
    rolls: R,
    events: Vec<GameEvent>,
    /// Interact press that arrived on a descent tick, handled on the next one
    pub(crate) carried_interact: bool,
}

impl Session<Pcg32> {
    /// Session with default balance and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        log::info!("New session (seed {seed})");
        Self::with_rolls(tuning, seeded(seed))
    }
}

impl<R: RollSource> Session<R> {
    /// Session drawing its randomness from `rolls`
    pub fn with_rolls(tuning: Tuning, rolls: R) -> Self {
        let progress = Progress::new(&tuning);
        let world = World::build(progress.level_state, progress.floor, progress.epoch());
        let player = Player::new(world.spawn, world.spawn_yaw);
        let wanderer = Wanderer::new(&tuning);
        Self {
            tuning,
            progress,
            world,
            player,
            chaser: Chaser::new(),
            wanderer,
            scheduler: Scheduler::new(),
            clock: 0.0,
            rolls,
            events: Vec::new(),
            carried_interact: false,
        }
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn epoch(&self) -> u64 {
        self.progress.epoch()
    }

    pub fn game_state(&self) -> GameState {
        self.progress.game_state
    }

    pub fn rolls_mut(&mut self) -> &mut R {
        &mut self.rolls
    }

    pub(crate) fn roll(&mut self) -> f32 {
        self.rolls.roll()
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.clock += dt.max(0.0) as f64;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Translate `key` in the current language
    pub fn tr<'a>(&self, key: &'a str) -> &'a str {
        translate(key, self.progress.settings.language)
    }

    /// Show the translated text for `key`
    pub fn notify(&mut self, key: &str) {
        let text = self.tr(key).to_string();
        self.notify_text(text);
    }

    pub fn notify_text(&mut self, text: impl Into<String>) {
        self.progress.show_notification(text, self.clock);
    }

    /// Queue `action` under the current epoch
    pub fn schedule(&mut self, delay: f64, action: DeferredAction) {
        let epoch = self.progress.epoch();
        self.scheduler.schedule(self.clock, delay, epoch, action);
    }

    /// Full reset: store defaults, fresh scene, fresh antagonists.
    /// Anything still queued belongs to the old epoch and will be dropped.
    pub fn reset_game(&mut self) {
        self.progress.reset_game();
        self.carried_interact = false;
        self.chaser = Chaser::new();
        self.wanderer = Wanderer::new(&self.tuning);
        self.rebuild_world();
        self.emit(GameEvent::Reset);
    }

    /// Chapter select: fresh run straight into play
    pub fn start_chapter(&mut self) {
        self.reset_game();
        self.progress.set_game_state(GameState::Playing);
        log::info!("Chapter started");
    }

    fn rebuild_world(&mut self) {
        self.world = World::build(
            self.progress.level_state,
            self.progress.floor,
            self.progress.epoch(),
        );
        self.player.respawn(self.world.spawn, self.world.spawn_yaw);
    }

    /// Rebuild the scene if the store moved to another level or floor
    pub(crate) fn sync_world(&mut self) {
        let p = &self.progress;
        if self.world.matches(p.level_state, p.floor, p.epoch()) {
            return;
        }
        let level_changed = self.world.level != p.level_state;
        self.rebuild_world();
        if level_changed {
            let level = self.progress.level_state;
            self.emit(GameEvent::LevelChanged(level));
        }
    }

    /// Fire due timers. Timers from before the last reset are discarded.
    pub(crate) fn run_deferred(&mut self) {
        for deferred in self.scheduler.take_due(self.clock) {
            let current = self.progress.epoch();
            if deferred.epoch != current {
                log::debug!(
                    "{:?}: {}",
                    deferred.action,
                    GameError::StaleDeferred {
                        scheduled: deferred.epoch,
                        current,
                    }
                );
                continue;
            }
            self.apply_deferred(deferred.action);
        }
    }

    fn apply_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::OpenRoofDoor => {
                match self.progress.inventory.consume(ItemType::KeyRoof) {
                    Ok(()) => self.emit(GameEvent::ItemSpent(ItemType::KeyRoof)),
                    Err(e) => log::warn!("Roof door opened without its key: {e}"),
                }
                self.progress.set_level_state(LevelState::Apartment);
                self.sync_world();
            }
            DeferredAction::ForceGameOver => {
                self.progress.set_game_state(GameState::GameOver);
                self.emit(GameEvent::GameOver);
            }
            DeferredAction::ResetAfterEscape => {
                self.reset_game();
            }
        }
    }

    /// Apply an antagonist's terminal event to the store
    pub(crate) fn apply_antagonist(&mut self, event: AntagonistEvent) {
        match event {
            AntagonistEvent::Jumpscare => {
                log::info!("Jumpscare");
                self.progress.set_game_state(GameState::Jumpscare);
                self.emit(GameEvent::Jumpscare);
                self.schedule(self.tuning.jumpscare_delay, DeferredAction::ForceGameOver);
            }
            AntagonistEvent::Caught => {
                log::info!("Caught by the wanderer");
                self.progress.set_game_state(GameState::GameOver);
                self.emit(GameEvent::Caught);
                self.emit(GameEvent::GameOver);
            }
        }
    }

    /// Poll both antagonists against the player's current position
    pub(crate) fn update_antagonists(&mut self, dt: f32) {
        let player = self.player.position;
        if let Some(event) = self
            .chaser
            .update(player, dt, &self.tuning, &mut self.rolls)
        {
            self.apply_antagonist(event);
        }
        if let Some(event) = self.wanderer.update(player, dt, &self.tuning) {
            self.apply_antagonist(event);
        }
    }
}
