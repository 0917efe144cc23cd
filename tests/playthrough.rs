//! Headless playthroughs of The Apartment.
//!
//! These drive the public `Session` API with fixed time steps, no browser,
//! no audio. Randomness is scripted or seeded so every run is identical.
//!
//! Run with: `cargo test --test playthrough`

use glam::Vec3;
use the_apartment::router::{MenuAction, apply_menu_action};
use the_apartment::sim::{
    GameEvent, GameState, ItemType, LevelState, ObjectId, ObjectKind, RollSource, ScriptedRolls,
    Session, TickInput, tick,
};
use the_apartment::{Language, SettingsPatch, Tuning};

const DT: f32 = 1.0 / 60.0;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// English session already past the chapter select screen
fn start<R: RollSource>(mut session: Session<R>) -> Session<R> {
    apply_menu_action(
        &mut session,
        MenuAction::ChangeSettings(SettingsPatch::language(Language::En)),
    );
    apply_menu_action(&mut session, MenuAction::Play);
    assert!(apply_menu_action(&mut session, MenuAction::SelectChapter(1)));
    assert_eq!(session.game_state(), GameState::Playing);
    session
}

fn idle<R: RollSource>(session: &mut Session<R>, seconds: f32) {
    let steps = (seconds / DT).ceil() as u32;
    for _ in 0..steps {
        tick(session, &TickInput::default(), DT);
    }
}

fn ids_of<R: RollSource>(session: &Session<R>, kind: ObjectKind) -> Vec<ObjectId> {
    session.world.objects_of(kind).map(|o| o.id).collect()
}

fn notification<R: RollSource>(session: &Session<R>) -> &str {
    session.progress.notification_text().unwrap_or("")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn full_run_from_roof_to_escape() {
    let mut s = start(Session::with_rolls(
        Tuning::default(),
        ScriptedRolls::constant(0.5),
    ));
    assert_eq!(s.progress.floor, 1);
    assert_eq!(s.progress.level_state, LevelState::Rooftop);

    // Roof key
    let key = ids_of(&s, ObjectKind::KeyRoof)[0];
    s.interact_with(key);
    assert_eq!(
        serde_json::to_string(&s.progress.inventory).unwrap(),
        r#"{"items":[{"type":"KEY_ROOF","count":1}]}"#
    );

    // Roof door opens after its delay and eats the key
    let door = ids_of(&s, ObjectKind::DoorRoof)[0];
    s.interact_with(door);
    assert_eq!(notification(&s), "DOOR OPENING...");
    idle(&mut s, 1.05);
    assert!(s.progress.inventory.is_empty());
    assert_eq!(s.progress.level_state, LevelState::Apartment);
    assert_eq!(s.world.level, LevelState::Apartment);

    // Down to floor 19 ...
    for _ in 0..18 {
        s.progress.next_floor();
    }
    assert_eq!(s.progress.floor, 19);
    assert_eq!(s.progress.level_state, LevelState::Apartment);

    // ... and one more lands in the electrical room
    s.progress.next_floor();
    assert_eq!(s.progress.floor, 20);
    assert_eq!(s.progress.level_state, LevelState::Electrical);
    tick(&mut s, &TickInput::default(), DT);
    assert_eq!(s.world.level, LevelState::Electrical);

    let boxes = ids_of(&s, ObjectKind::CableBox);
    assert_eq!(boxes.len(), 4);
    for id in boxes {
        s.interact_with(id);
    }
    assert_eq!(s.progress.cables_fixed, 4);

    let exit = ids_of(&s, ObjectKind::ExitDoorElec)[0];
    s.interact_with(exit);
    assert_eq!(notification(&s), "ESCAPE SUCCESSFUL!");
    assert!(s.drain_events().contains(&GameEvent::Escaped));

    idle(&mut s, 2.05);
    assert_eq!(s.game_state(), GameState::Menu);
    assert_eq!(s.progress.level_state, LevelState::Rooftop);
    assert_eq!(s.progress.floor, 1);
    assert!(s.progress.inventory.is_empty());
    assert_eq!(s.progress.cables_fixed, 0);
    // Settings survive the reset
    assert_eq!(s.progress.settings.language, Language::En);
}

#[test]
fn interact_press_picks_up_the_key_under_the_crosshair() {
    let mut s = start(Session::with_rolls(
        Tuning::default(),
        ScriptedRolls::default(),
    ));

    // Two units south of the key, looking down at it
    s.player.position = Vec3::new(2.0, 1.7, 4.0);
    s.player.yaw = 0.0;
    s.player.pitch = -(0.75f32).atan();

    let press = TickInput {
        interact: true,
        ..Default::default()
    };
    tick(&mut s, &press, DT);

    assert_eq!(s.progress.inventory.count(ItemType::KeyRoof), 1);
    assert_eq!(notification(&s), "KEY FOUND: ROOF DOOR");
}

#[test]
fn walking_into_the_stairwell_descends_one_floor_at_a_time() {
    let mut s = start(Session::with_rolls(
        Tuning::default(),
        ScriptedRolls::default(),
    ));
    s.progress.set_level_state(LevelState::Apartment);
    tick(&mut s, &TickInput::default(), DT);
    s.drain_events();

    for expected in 2..=4 {
        s.player.position = Vec3::new(0.0, 1.7, 14.5);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.progress.floor, expected);
        // Back at the corridor start, out of the trigger
        assert!(!s.world.in_stairwell(s.player.position));
    }
    assert_eq!(notification(&s), "DESCENDED TO FLOOR: FLOOR 4");
    let descents = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::FloorDescended(_)))
        .count();
    assert_eq!(descents, 3);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let mut s = start(Session::new(seed));
        s.progress.set_level_state(LevelState::Apartment);
        tick(&mut s, &TickInput::default(), DT);
        for id in ids_of(&s, ObjectKind::Drawer) {
            s.interact_with(id);
        }
        for id in ids_of(&s, ObjectKind::DoorRoom) {
            s.interact_with(id);
        }
        let open: Vec<bool> = s
            .world
            .objects_of(ObjectKind::DoorRoom)
            .map(|o| o.is_open)
            .collect();
        (s.progress.inventory.clone(), open)
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn chaser_jumpscare_then_try_again() {
    let tuning = Tuning {
        chaser_spawn_delay: 2.0,
        wanderer_radius: 50.0,
        ..Tuning::default()
    };
    let mut s = start(Session::with_rolls(tuning, ScriptedRolls::constant(0.5)));

    idle(&mut s, 4.0);
    assert_eq!(s.game_state(), GameState::Jumpscare);
    assert!(s.drain_events().contains(&GameEvent::Jumpscare));

    idle(&mut s, 1.6);
    assert_eq!(s.game_state(), GameState::GameOver);

    apply_menu_action(&mut s, MenuAction::TryAgain);
    assert_eq!(s.game_state(), GameState::Menu);
    assert_eq!(s.progress.floor, 1);
}
