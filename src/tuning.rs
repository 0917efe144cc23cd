//! Data-driven game balance
//!
//! Every threshold, probability and delay the progression core uses. Defaults
//! reproduce the shipped game; a JSON document may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::{INTERACTION_DISTANCE, REFERENCE_FPS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Progression ===
    /// Floor number at which the descent lands in the electrical room
    pub electrical_floor: u32,
    /// Cable boxes that must be repaired before the exit door opens
    pub cables_required: u32,
    /// Share of room doors that need a room key (0.0 - 1.0)
    pub door_lock_chance: f32,
    /// Chance a drawer holds a room key on its first search (0.0 - 1.0)
    pub drawer_key_chance: f32,
    /// Maximum hit distance for the interaction ray
    pub interaction_distance: f32,

    // === Delays (seconds) ===
    pub roof_door_delay: f64,
    pub escape_reset_delay: f64,
    pub jumpscare_delay: f64,
    pub notification_duration: f64,

    // === Delayed chaser ===
    pub chaser_spawn_delay: f64,
    pub chaser_spawn_radius: f32,
    /// Ground speed in units/s
    pub chaser_speed: f32,
    pub chaser_catch_distance: f32,
    pub chaser_height: f32,

    // === Orbiting wanderer ===
    pub wanderer_radius: f32,
    /// Orbit speed in rad/s
    pub wanderer_angular_rate: f32,
    pub wanderer_catch_distance: f32,
    pub wanderer_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            electrical_floor: 20,
            cables_required: 4,
            door_lock_chance: 0.7,
            drawer_key_chance: 0.3,
            interaction_distance: INTERACTION_DISTANCE,

            roof_door_delay: 1.0,
            escape_reset_delay: 2.0,
            jumpscare_delay: 1.5,
            notification_duration: 3.0,

            chaser_spawn_delay: 120.0,
            chaser_spawn_radius: 12.0,
            // 0.13 units per frame at 60 Hz
            chaser_speed: 0.13 * REFERENCE_FPS,
            chaser_catch_distance: 1.0,
            chaser_height: 1.2,

            wanderer_radius: 8.0,
            wanderer_angular_rate: 0.5,
            wanderer_catch_distance: 1.5,
            wanderer_height: 1.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // A struct of plain numbers always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
