//! Per-frame simulation step
//!
//! Order within one tick:
//! 1. advance the session clock and fire due timers
//! 2. expire the notification
//! 3. (playing only) move the player
//! 4. stairwell trigger, else the interact press (a press on a descent
//!    tick carries over to the next tick)
//! 5. antagonists

use glam::Vec2;

use super::rolls::RollSource;
use super::session::Session;
use super::state::GameState;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Walk direction: `y` forward, `x` strafe right. Longer than 1 is clamped.
    pub move_dir: Vec2,
    /// Look delta since the last tick (mouse pixels)
    pub look_delta: Vec2,
    /// Crouch held
    pub crouch: bool,
    /// Interact pressed this tick
    pub interact: bool,
}

/// Advance the session by `dt` seconds
pub fn tick<R: RollSource>(session: &mut Session<R>, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    session.advance_clock(dt);
    session.run_deferred();
    let now = session.clock();
    session.progress.expire_notification(now);

    // Menus, the jumpscare and game over only let timers run
    if session.game_state() != GameState::Playing {
        return;
    }
    session.sync_world();

    let sensitivity = session.progress.settings.sensitivity;
    session.player.look(input.look_delta, sensitivity);
    session
        .player
        .walk(input.move_dir, input.crouch, dt, &session.world.bounds);

    let interact = input.interact || std::mem::take(&mut session.carried_interact);
    if session.check_stairwell() {
        // The descent takes this tick; the press waits for the next one
        session.carried_interact = interact;
    } else if interact {
        session.interact();
    }

    // An interaction can end play (escape timer, level change); only keep
    // hunting while still playing
    if session.game_state() == GameState::Playing {
        session.update_antagonists(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rolls::ScriptedRolls;
    use crate::sim::session::GameEvent;
    use crate::sim::state::LevelState;
    use crate::sim::world::{ObjectKind, World};
    use crate::tuning::Tuning;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn playing() -> Session<ScriptedRolls> {
        let mut s = Session::with_rolls(Tuning::default(), ScriptedRolls::constant(0.5));
        s.start_chapter();
        s
    }

    fn idle(s: &mut Session<ScriptedRolls>, seconds: f32) {
        let steps = (seconds / DT).round() as u32;
        for _ in 0..steps {
            tick(s, &TickInput::default(), DT);
        }
    }

    #[test]
    fn test_tick_walks_player() {
        let mut s = playing();
        let start = s.player.position;
        // Spawn looks toward +Z on the roof
        let input = TickInput {
            move_dir: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert!(s.player.position.z > start.z);
    }

    #[test]
    fn test_tick_on_menu_does_not_move() {
        let mut s = Session::with_rolls(Tuning::default(), ScriptedRolls::constant(0.5));
        let start = s.player.position;
        let input = TickInput {
            move_dir: Vec2::new(0.0, 1.0),
            interact: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.player.position, start);
        assert!((s.clock() - DT as f64).abs() < 1e-9);
    }

    #[test]
    fn test_tick_clamps_long_frames() {
        let mut s = playing();
        tick(&mut s, &TickInput::default(), 5.0);
        assert!((s.clock() - MAX_FRAME_DT as f64).abs() < 1e-6);
        tick(&mut s, &TickInput::default(), -1.0);
        assert!((s.clock() - MAX_FRAME_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_notification_expires_after_three_seconds() {
        let mut s = playing();
        s.notify("drawer_empty");
        idle(&mut s, 2.9);
        assert!(s.progress.notification.is_some());
        idle(&mut s, 0.2);
        assert!(s.progress.notification.is_none());
    }

    #[test]
    fn test_newer_notification_restarts_the_timer() {
        let mut s = playing();
        s.notify("drawer_empty");
        idle(&mut s, 2.0);
        s.notify("drawer_searched");
        idle(&mut s, 2.0);
        assert!(s.progress.notification.is_some());
        idle(&mut s, 1.1);
        assert!(s.progress.notification.is_none());
    }

    #[test]
    fn test_stairwell_beats_interact_on_the_same_tick() {
        let mut s = playing();
        s.progress.set_level_state(LevelState::Apartment);
        s.sync_world();
        s.drain_events();

        s.player.position = Vec3::new(0.0, 1.7, 14.9);
        s.player.yaw = std::f32::consts::PI;
        let input = TickInput {
            interact: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);

        assert_eq!(s.progress.floor, 2);
        assert_eq!(s.drain_events(), vec![GameEvent::FloorDescended(2)]);
    }

    #[test]
    fn test_interact_on_descent_tick_lands_on_the_next_tick() {
        let tuning = Tuning {
            wanderer_radius: 50.0,
            ..Tuning::default()
        };
        // 0.9 rolls leave room doors unlocked
        let mut s = Session::with_rolls(tuning, ScriptedRolls::constant(0.9));
        s.start_chapter();
        s.progress.set_level_state(LevelState::Apartment);
        s.sync_world();
        s.drain_events();

        s.player.position = Vec3::new(0.0, 1.7, 14.9);
        let press = TickInput {
            interact: true,
            ..Default::default()
        };
        tick(&mut s, &press, DT);
        assert_eq!(s.progress.floor, 2);

        // Face the west door of the first flat on the new floor
        s.player.position = Vec3::new(0.0, 1.7, -9.0);
        s.player.yaw = std::f32::consts::FRAC_PI_2;
        s.player.pitch = 0.0;
        tick(&mut s, &TickInput::default(), DT);

        let opened = s
            .world
            .objects_of(ObjectKind::DoorRoom)
            .filter(|d| d.is_open)
            .count();
        assert_eq!(opened, 1);
        assert!(s.drain_events().contains(&GameEvent::DoorOpened));

        // Only carried once
        s.world = World::build(LevelState::Apartment, 2, s.epoch());
        tick(&mut s, &TickInput::default(), DT);
        assert!(s.world.objects_of(ObjectKind::DoorRoom).all(|d| !d.is_open));
    }

    #[test]
    fn test_wanderer_ends_the_game_without_jumpscare() {
        let mut s = playing();
        // Stand on the start of the ghost's orbit
        s.player.position = Vec3::new(0.0, 1.7, 8.0);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.game_state(), GameState::GameOver);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::Caught));
        assert!(!events.contains(&GameEvent::Jumpscare));
    }

    #[test]
    fn test_chaser_jumpscare_then_game_over() {
        let tuning = Tuning {
            chaser_spawn_delay: 1.0,
            // Keep the ghost out of the way
            wanderer_radius: 50.0,
            ..Tuning::default()
        };
        let mut s = Session::with_rolls(tuning, ScriptedRolls::constant(0.0));
        s.start_chapter();

        let mut scared_at = None;
        for i in 0..(10 * 60) {
            tick(&mut s, &TickInput::default(), DT);
            if scared_at.is_none() && s.game_state() == GameState::Jumpscare {
                scared_at = Some(i);
            }
        }
        let scared_at = scared_at.unwrap();
        // 1 s dormant plus 11 units at 7.8 u/s
        assert!(scared_at > 60 && scared_at < 4 * 60);
        assert_eq!(s.game_state(), GameState::GameOver);
    }

    #[test]
    fn test_reset_during_jumpscare_discards_game_over() {
        let tuning = Tuning {
            chaser_spawn_delay: 0.0,
            chaser_spawn_radius: 0.5,
            wanderer_radius: 50.0,
            ..Tuning::default()
        };
        let mut s = Session::with_rolls(tuning, ScriptedRolls::constant(0.0));
        s.start_chapter();
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.game_state(), GameState::Jumpscare);

        // Keep the next chaser dormant for the rest of the test
        s.tuning.chaser_spawn_delay = 1000.0;
        s.start_chapter();
        idle(&mut s, 2.0);
        assert_eq!(s.game_state(), GameState::Playing);
    }
}
