//! The two antagonists
//!
//! - `Chaser` (the cymbal monkey): dormant for a fixed dwell time, then appears
//!   on a ring around the player and walks straight at them. Contact starts
//!   the scripted jumpscare.
//! - `Wanderer` (the ghost): circles the level origin forever and kills on
//!   contact, no jumpscare beat.
//!
//! Both are polled once per tick and know nothing about each other.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::rolls::RollSource;
use crate::tuning::Tuning;
use crate::{ground_delta, yaw_towards};

/// Terminal outcome reported by an antagonist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AntagonistEvent {
    /// Chaser reached the player: alert screen, scream, game over later
    Jumpscare,
    /// Wanderer touched the player: game over now
    Caught,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaserPhase {
    /// Waiting out the dwell time
    Dormant,
    /// In the level and closing in
    Armed,
    /// Jumpscare fired; nothing more happens
    Triggered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chaser {
    pub phase: ChaserPhase,
    /// Simulated time since the chaser was created
    pub elapsed: f64,
    /// `None` until the first armed tick places it
    pub position: Option<Vec3>,
    pub yaw: f32,
}

impl Default for Chaser {
    fn default() -> Self {
        Self::new()
    }
}

impl Chaser {
    pub fn new() -> Self {
        Self {
            phase: ChaserPhase::Dormant,
            elapsed: 0.0,
            position: None,
            yaw: 0.0,
        }
    }

    /// Whether a renderer should draw it
    pub fn is_visible(&self) -> bool {
        self.phase == ChaserPhase::Armed && self.position.is_some()
    }

    pub fn update(
        &mut self,
        player: Vec3,
        dt: f32,
        tuning: &Tuning,
        rolls: &mut dyn RollSource,
    ) -> Option<AntagonistEvent> {
        if self.phase == ChaserPhase::Triggered {
            return None;
        }

        self.elapsed += dt as f64;
        if self.phase == ChaserPhase::Dormant {
            if self.elapsed < tuning.chaser_spawn_delay {
                return None;
            }
            log::info!("Chaser armed after {:.1}s", self.elapsed);
            self.phase = ChaserPhase::Armed;
        }

        let position = *self.position.get_or_insert_with(|| {
            let angle = rolls.roll() * TAU;
            let spawn = Vec3::new(
                player.x + angle.sin() * tuning.chaser_spawn_radius,
                tuning.chaser_height,
                player.z + angle.cos() * tuning.chaser_spawn_radius,
            );
            log::info!("Chaser spawned at {spawn}");
            spawn
        });

        let to_player = ground_delta(position, player);
        let distance = to_player.length();
        if distance <= tuning.chaser_catch_distance {
            self.phase = ChaserPhase::Triggered;
            self.position = None;
            return Some(AntagonistEvent::Jumpscare);
        }

        let dir = to_player / distance;
        let step = (tuning.chaser_speed * dt).min(distance);
        self.position = Some(position + dir * step);
        self.yaw = yaw_towards(dir);
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wanderer {
    /// Simulated time since the wanderer was created
    pub elapsed: f64,
    pub position: Vec3,
    pub yaw: f32,
}

impl Wanderer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            elapsed: 0.0,
            position: Self::orbit_point(0.0, tuning),
            yaw: 0.0,
        }
    }

    /// Point on the orbit after `elapsed` seconds
    pub fn orbit_point(elapsed: f64, tuning: &Tuning) -> Vec3 {
        let angle = (elapsed * tuning.wanderer_angular_rate as f64) as f32;
        Vec3::new(
            angle.sin() * tuning.wanderer_radius,
            tuning.wanderer_height,
            angle.cos() * tuning.wanderer_radius,
        )
    }

    pub fn update(&mut self, player: Vec3, dt: f32, tuning: &Tuning) -> Option<AntagonistEvent> {
        self.elapsed += dt as f64;
        self.position = Self::orbit_point(self.elapsed, tuning);

        let to_player = player - self.position;
        if to_player.length_squared() > 0.0 {
            self.yaw = yaw_towards(to_player);
        }

        (to_player.length() < tuning.wanderer_catch_distance).then_some(AntagonistEvent::Caught)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizontal_distance;
    use crate::sim::rolls::ScriptedRolls;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_chaser_stays_dormant_until_spawn_delay() {
        let tuning = Tuning::default();
        let mut chaser = Chaser::new();
        let mut rolls = ScriptedRolls::constant(0.0);
        let player = Vec3::new(0.0, 1.7, 0.0);

        // Just short of two minutes
        for _ in 0..(119 * 60) {
            assert!(chaser.update(player, DT, &tuning, &mut rolls).is_none());
        }
        assert_eq!(chaser.phase, ChaserPhase::Dormant);
        assert!(!chaser.is_visible());

        for _ in 0..(2 * 60) {
            chaser.update(player, DT, &tuning, &mut rolls);
        }
        assert_eq!(chaser.phase, ChaserPhase::Armed);
        assert!(chaser.is_visible());
    }

    #[test]
    fn test_chaser_spawns_on_ring_around_player() {
        let tuning = Tuning {
            chaser_spawn_delay: 0.0,
            chaser_speed: 0.0,
            ..Tuning::default()
        };
        let mut chaser = Chaser::new();
        // angle = 0.25 * TAU = 90 degrees: +X of the player
        let mut rolls = ScriptedRolls::constant(0.25);
        let player = Vec3::new(3.0, 1.7, -2.0);

        chaser.update(player, DT, &tuning, &mut rolls);
        let pos = chaser.position.unwrap();
        assert!((horizontal_distance(pos, player) - 12.0).abs() < 1e-3);
        assert!((pos.x - 15.0).abs() < 1e-3);
        assert_eq!(pos.y, tuning.chaser_height);
    }

    #[test]
    fn test_chaser_closes_in_and_triggers_once() {
        let tuning = Tuning {
            chaser_spawn_delay: 0.0,
            ..Tuning::default()
        };
        let mut chaser = Chaser::new();
        let mut rolls = ScriptedRolls::constant(0.0);
        let player = Vec3::new(0.0, 1.7, 0.0);

        let mut events = Vec::new();
        // 12 units at 7.8 u/s is about 1.5 s
        for _ in 0..(3 * 60) {
            if let Some(event) = chaser.update(player, DT, &tuning, &mut rolls) {
                events.push(event);
            }
        }
        assert_eq!(events, vec![AntagonistEvent::Jumpscare]);
        assert_eq!(chaser.phase, ChaserPhase::Triggered);
        assert!(!chaser.is_visible());
    }

    #[test]
    fn test_chaser_speed_uses_elapsed_time() {
        let tuning = Tuning {
            chaser_spawn_delay: 0.0,
            ..Tuning::default()
        };
        let player = Vec3::new(0.0, 1.7, 0.0);

        let mut coarse = Chaser::new();
        let mut fine = Chaser::new();
        let mut rolls = ScriptedRolls::constant(0.0);
        // Place both with a zero-length first tick
        coarse.update(player, 0.0, &tuning, &mut rolls);
        fine.update(player, 0.0, &tuning, &mut rolls);

        coarse.update(player, 0.5, &tuning, &mut rolls);
        for _ in 0..5 {
            fine.update(player, 0.1, &tuning, &mut rolls);
        }
        let a = coarse.position.unwrap();
        let b = fine.position.unwrap();
        assert!((a - b).length() < 1e-3);
        assert!((horizontal_distance(a, player) - (12.0 - 0.5 * 7.8)).abs() < 1e-3);
    }

    #[test]
    fn test_chaser_faces_player() {
        let tuning = Tuning {
            chaser_spawn_delay: 0.0,
            ..Tuning::default()
        };
        let mut chaser = Chaser::new();
        // angle 0: spawns at +Z of the player, must look toward -Z
        let mut rolls = ScriptedRolls::constant(0.0);
        chaser.update(Vec3::ZERO, DT, &tuning, &mut rolls);
        assert!(chaser.yaw.abs() < 1e-5);
    }

    #[test]
    fn test_wanderer_orbits_origin() {
        let tuning = Tuning::default();
        let mut ghost = Wanderer::new(&tuning);
        let far_away = Vec3::new(100.0, 1.7, 100.0);
        for _ in 0..600 {
            assert!(ghost.update(far_away, DT, &tuning).is_none());
            let r = Vec3::new(ghost.position.x, 0.0, ghost.position.z).length();
            assert!((r - tuning.wanderer_radius).abs() < 1e-3);
        }
        // 10 s at 0.5 rad/s
        let expected = Wanderer::orbit_point(10.0, &tuning);
        assert!((ghost.position - expected).length() < 1e-2);
    }

    #[test]
    fn test_wanderer_catches_player_on_its_path() {
        let tuning = Tuning::default();
        let mut ghost = Wanderer::new(&tuning);
        // Orbit starts at (0, 1.5, 8)
        let player = Vec3::new(0.0, 1.7, 8.0);
        assert_eq!(ghost.update(player, DT, &tuning), Some(AntagonistEvent::Caught));
    }
}
