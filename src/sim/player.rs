//! First-person player: look, walk, crouch
//!
//! Speeds are per second so movement does not depend on frame rate.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Ray};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Eye position
    pub position: Vec3,
    /// Rotation about +Y; 0 looks down -Z
    pub yaw: f32,
    pub pitch: f32,
    pub crouching: bool,
}

impl Player {
    pub fn new(spawn: Vec3, yaw: f32) -> Self {
        Self {
            position: spawn,
            yaw,
            pitch: 0.0,
            crouching: false,
        }
    }

    /// Put the player back at a spawn point, standing and looking level
    pub fn respawn(&mut self, spawn: Vec3, yaw: f32) {
        *self = Self::new(spawn, yaw);
    }

    pub fn eye_height(&self) -> f32 {
        if self.crouching {
            PLAYER_HEIGHT_CROUCHING
        } else {
            PLAYER_HEIGHT_STANDING
        }
    }

    /// View direction (unit length)
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Ray from the eye through the screen center
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// Turn by a look delta (mouse pixels / stick units)
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        let scale = LOOK_SENSITIVITY * sensitivity;
        self.yaw -= delta.x * scale;
        self.pitch = (self.pitch - delta.y * scale).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Walk on the ground plane. `move_dir.y` is forward, `move_dir.x` strafes
    /// right. The result is clamped to `bounds`.
    pub fn walk(&mut self, move_dir: Vec2, crouch: bool, dt: f32, bounds: &Aabb) {
        self.crouching = crouch;

        let move_dir = move_dir.clamp_length_max(1.0);
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let forward = Vec3::new(-sin_yaw, 0.0, -cos_yaw);
        let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
        let step = (forward * move_dir.y + right * move_dir.x) * MOVEMENT_SPEED * dt;

        let mut next = self.position + step;
        next.y = self.eye_height();
        let min = bounds.min();
        let max = bounds.max();
        next.x = next.x.clamp(min.x, max.x);
        next.z = next.z.clamp(min.z, max.z);
        self.position = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_floor() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::new(50.0, 5.0, 50.0))
    }

    #[test]
    fn test_forward_at_zero_yaw_is_neg_z() {
        let player = Player::new(Vec3::ZERO, 0.0);
        let f = player.forward();
        assert!(f.x.abs() < 1e-6);
        assert!((f.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_walk_is_frame_rate_independent() {
        let mut a = Player::new(Vec3::new(0.0, PLAYER_HEIGHT_STANDING, 0.0), 0.0);
        let mut b = a.clone();
        let forward = Vec2::new(0.0, 1.0);

        a.walk(forward, false, 1.0 / 30.0, &open_floor());
        for _ in 0..4 {
            b.walk(forward, false, 1.0 / 120.0, &open_floor());
        }
        assert!((a.position - b.position).length() < 1e-4);
        assert!((a.position.z + MOVEMENT_SPEED / 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_crouch_lowers_eye() {
        let mut player = Player::new(Vec3::new(0.0, PLAYER_HEIGHT_STANDING, 0.0), 0.0);
        player.walk(Vec2::ZERO, true, 0.016, &open_floor());
        assert_eq!(player.position.y, PLAYER_HEIGHT_CROUCHING);
        player.walk(Vec2::ZERO, false, 0.016, &open_floor());
        assert_eq!(player.position.y, PLAYER_HEIGHT_STANDING);
    }

    #[test]
    fn test_walk_clamped_to_bounds() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 5.0, 1.0));
        let mut player = Player::new(Vec3::ZERO, 0.0);
        player.walk(Vec2::new(0.0, 1.0), false, 10.0, &bounds);
        assert_eq!(player.position.z, -1.0);
    }

    #[test]
    fn test_look_scales_with_sensitivity_and_clamps_pitch() {
        let mut player = Player::new(Vec3::ZERO, 0.0);
        player.look(Vec2::new(100.0, 0.0), 2.0);
        assert!((player.yaw + 100.0 * LOOK_SENSITIVITY * 2.0).abs() < 1e-6);

        player.look(Vec2::new(0.0, -1.0e6), 1.0);
        assert_eq!(player.pitch, MAX_PITCH);
    }
}
