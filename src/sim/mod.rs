//! Deterministic progression core
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time only advances through `tick`
//! - Randomness only through a `RollSource`
//! - Stable iteration order (spawn order of world objects)
//! - No rendering or platform dependencies

pub mod antagonist;
pub mod collision;
pub mod error;
pub mod interaction;
pub mod player;
pub mod rolls;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;
pub mod world;

pub use antagonist::{AntagonistEvent, Chaser, ChaserPhase, Wanderer};
pub use collision::{Aabb, Ray, ray_aabb};
pub use error::GameError;
pub use player::Player;
pub use rolls::{RollSource, ScriptedRolls, seeded};
pub use schedule::{DeferredAction, Scheduler};
pub use session::{GameEvent, Session};
pub use state::{
    GameState, Inventory, InventoryItem, ItemType, LevelState, Notification, Progress,
};
pub use tick::{TickInput, tick};
pub use world::{ObjectId, ObjectKind, RayHit, World, WorldObject};
