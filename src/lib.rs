//! The Apartment - a first-person horror game in an endless apartment block
//!
//! Core modules:
//! - `sim`: Deterministic progression core (store, interaction, antagonists)
//! - `router`: Screen selection and menu actions
//! - `settings`: Session-only player preferences
//! - `tuning`: Data-driven game balance
//! - `hud`: Translated HUD text
//! - `i18n`: Turkish/English string tables
//! - `audio`: Procedural Web Audio effects

pub mod audio;
pub mod hud;
pub mod i18n;
pub mod router;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use i18n::{Language, translate};
pub use settings::{GameSettings, SettingsPatch};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-frame speeds below were tuned at
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta fed to the simulation (tab switches, hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player eye heights
    pub const PLAYER_HEIGHT_STANDING: f32 = 1.7;
    pub const PLAYER_HEIGHT_CROUCHING: f32 = 0.9;
    /// Walk speed, units/s (0.08 units per frame at 60 Hz)
    pub const MOVEMENT_SPEED: f32 = 0.08 * REFERENCE_FPS;
    /// Radians of turn per unit of look input, before the sensitivity setting
    pub const LOOK_SENSITIVITY: f32 = 0.005;
    /// Keeps the camera from flipping over the poles
    pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    /// Default ray length for the interaction hit-test
    pub const INTERACTION_DISTANCE: f32 = 4.0;

    /// Apartment corridor half width (x) and half length (z)
    pub const CORRIDOR_HALF_WIDTH: f32 = 2.0;
    pub const CORRIDOR_HALF_LENGTH: f32 = 15.0;
    /// Stairwell trigger starts this far down the corridor
    pub const STAIRWELL_TRIGGER_Z: f32 = 14.0;

    /// Rooftop half extent (20 x 20 roof)
    pub const ROOF_HALF_EXTENT: f32 = 10.0;
    /// Electrical room half extent
    pub const ELECTRICAL_HALF_EXTENT: f32 = 8.0;
}

/// Vector from `from` to `to` projected on the ground plane
#[inline]
pub fn ground_delta(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z)
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    ground_delta(a, b).length()
}

/// Yaw (rotation about +Y) that makes a -Z facing object look along `dir`
#[inline]
pub fn yaw_towards(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 50.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_towards_matches_forward_convention() {
        // Yaw 0 faces -Z
        assert!(yaw_towards(Vec3::new(0.0, 0.0, -1.0)).abs() < 1e-6);
        // Facing +Z is a half turn
        let yaw = yaw_towards(Vec3::new(0.0, 0.0, 1.0));
        assert!((yaw.abs() - std::f32::consts::PI).abs() < 1e-5);
    }
}
