//! Progression store and core game types
//!
//! One `Progress` value per session holds everything the screens and the HUD
//! read: current screen, level, floor, inventory, repaired cables and the
//! active notification. Every poller in a tick mutates it in turn.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use crate::settings::{GameSettings, SettingsPatch};
use crate::tuning::Tuning;

/// Top-level screen/game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Menu,
    ChapterSelect,
    Playing,
    Settings,
    Credits,
    Exit,
    GameOver,
    Jumpscare,
}

impl GameState {
    /// Whether `next` is one of the transitions the menus and antagonists
    /// normally produce. Anything else is still allowed, only logged.
    pub fn is_expected_transition(&self, next: GameState) -> bool {
        use GameState::*;
        if *self == next {
            return true;
        }
        matches!(
            (*self, next),
            (Menu, ChapterSelect | Settings | Credits | Exit | Playing)
                | (ChapterSelect, Menu | Playing)
                | (Settings | Credits | Exit, Menu)
                | (Playing, Menu | Jumpscare | GameOver)
                | (Jumpscare, GameOver | Menu)
                | (GameOver, Menu)
        )
    }
}

/// Player's macro-location in the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelState {
    Rooftop,
    Apartment,
    Electrical,
}

/// Inventory item types (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    KeyRoof,
    KeyRoom,
    KeyNextFloor,
    Money,
    WeaponCrowbar,
    WeaponGun,
}

impl ItemType {
    pub const ALL: [ItemType; 6] = [
        ItemType::KeyRoof,
        ItemType::KeyRoom,
        ItemType::KeyNextFloor,
        ItemType::Money,
        ItemType::WeaponCrowbar,
        ItemType::WeaponGun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::KeyRoof => "KEY_ROOF",
            ItemType::KeyRoom => "KEY_ROOM",
            ItemType::KeyNextFloor => "KEY_NEXT_FLOOR",
            ItemType::Money => "MONEY",
            ItemType::WeaponCrowbar => "WEAPON_CROWBAR",
            ItemType::WeaponGun => "WEAPON_GUN",
        }
    }

    /// Translation key of the display name
    pub fn label_key(&self) -> &'static str {
        match self {
            ItemType::KeyRoof => "item_KEY_ROOF",
            ItemType::KeyRoom => "item_KEY_ROOM",
            ItemType::KeyNextFloor => "item_KEY_NEXT_FLOOR",
            ItemType::Money => "item_MONEY",
            ItemType::WeaponCrowbar => "item_WEAPON_CROWBAR",
            ItemType::WeaponGun => "item_WEAPON_GUN",
        }
    }
}

/// A stack of one item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "type")]
    pub item: ItemType,
    pub count: u32,
}

/// Item ledger, one entry per type, in pickup order.
///
/// Entries never sit at zero: the last removal deletes the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: ItemType) {
        match self.items.iter_mut().find(|i| i.item == item) {
            Some(entry) => entry.count += 1,
            None => self.items.push(InventoryItem { item, count: 1 }),
        }
    }

    /// Decrement `item`; a no-op when it is not held
    pub fn remove(&mut self, item: ItemType) {
        if let Some(entry) = self.items.iter_mut().find(|i| i.item == item) {
            entry.count = entry.count.saturating_sub(1);
        }
        self.items.retain(|i| i.count > 0);
    }

    /// Remove one `item`, failing when none is held
    pub fn consume(&mut self, item: ItemType) -> Result<(), GameError> {
        if !self.has(item) {
            return Err(GameError::MissingItem(item));
        }
        self.remove(item);
        Ok(())
    }

    pub fn has(&self, item: ItemType) -> bool {
        self.count(item) > 0
    }

    pub fn count(&self, item: ItemType) -> u32 {
        self.items
            .iter()
            .find(|i| i.item == item)
            .map(|i| i.count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// On-screen message with its clear time (session clock, seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub expires_at: f64,
}

/// The shared progression store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub game_state: GameState,
    pub level_state: LevelState,
    /// Current floor, starts at 1
    pub floor: u32,
    pub inventory: Inventory,
    /// Repaired cable boxes; only a full reset lowers it
    pub cables_fixed: u32,
    pub notification: Option<Notification>,
    pub settings: GameSettings,
    /// Bumped by every full reset; deferred work scheduled under an older
    /// epoch is discarded
    epoch: u64,
    electrical_floor: u32,
    notification_duration: f64,
}

impl Progress {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            game_state: GameState::Menu,
            level_state: LevelState::Rooftop,
            floor: 1,
            inventory: Inventory::new(),
            cables_fixed: 0,
            notification: None,
            settings: GameSettings::default(),
            epoch: 0,
            electrical_floor: tuning.electrical_floor,
            notification_duration: tuning.notification_duration,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Unconditional overwrite. Unusual jumps are logged, never refused.
    pub fn set_game_state(&mut self, next: GameState) {
        if !self.game_state.is_expected_transition(next) {
            log::debug!(
                "{}",
                GameError::InvalidTransition {
                    from: self.game_state,
                    to: next,
                }
            );
        }
        self.game_state = next;
    }

    pub fn set_level_state(&mut self, next: LevelState) {
        if self.level_state != next {
            log::info!("Level {:?} -> {:?}", self.level_state, next);
        }
        self.level_state = next;
    }

    /// Descend one floor. Landing exactly on the electrical floor enters the
    /// electrical room; every other floor is an apartment floor.
    pub fn next_floor(&mut self) {
        self.floor += 1;
        let level = if self.floor == self.electrical_floor {
            LevelState::Electrical
        } else {
            LevelState::Apartment
        };
        self.set_level_state(level);
    }

    /// Back to the menu with a fresh run. Settings and the notification are
    /// left alone.
    pub fn reset_game(&mut self) {
        self.game_state = GameState::Menu;
        self.level_state = LevelState::Rooftop;
        self.floor = 1;
        self.inventory.clear();
        self.cables_fixed = 0;
        self.epoch += 1;
        log::info!("Game reset (epoch {})", self.epoch);
    }

    pub fn add_item(&mut self, item: ItemType) {
        self.inventory.add(item);
    }

    pub fn remove_item(&mut self, item: ItemType) {
        self.inventory.remove(item);
    }

    pub fn has_item(&self, item: ItemType) -> bool {
        self.inventory.has(item)
    }

    /// No ceiling here: callers gate repeats with each box's `fixed` flag
    pub fn fix_cable(&mut self) {
        self.cables_fixed += 1;
    }

    /// Replace the current message and restart its clear timer
    pub fn show_notification(&mut self, text: impl Into<String>, now: f64) {
        let text = text.into();
        log::debug!("Notification: {text}");
        self.notification = Some(Notification {
            text,
            expires_at: now + self.notification_duration,
        });
    }

    /// Clear the message once its window has passed
    pub fn expire_notification(&mut self, now: f64) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now >= n.expires_at)
        {
            self.notification = None;
        }
    }

    pub fn notification_text(&self) -> Option<&str> {
        self.notification.as_ref().map(|n| n.text.as_str())
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.merge(patch);
    }
}
