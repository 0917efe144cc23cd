//! Screen selection and menu actions
//!
//! The router reads only `GameState`. Menu buttons are turned into
//! `MenuAction`s by the shell and applied here.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsPatch;
use crate::sim::{GameState, RollSource, Session};

/// Footer shown on the menu screens
pub const VERSION: &str = "v1.0.0 | BUILD 666";

/// People listed on the credits screen
pub const CREDITS: [&str; 3] = ["Abdullah Huzeyfe TANIR", "Arda Kaan Sonuvar", "Ataberk Karadaş"];

/// What the shell should put on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    MainMenu,
    ChapterSelect,
    Settings,
    Credits,
    Exit,
    /// 3D view plus HUD
    World,
    /// Full-screen alert between the chaser's contact and game over
    Jumpscare,
    GameOver,
}

impl Screen {
    pub fn for_state(state: GameState) -> Self {
        match state {
            GameState::Menu => Screen::MainMenu,
            GameState::ChapterSelect => Screen::ChapterSelect,
            GameState::Settings => Screen::Settings,
            GameState::Credits => Screen::Credits,
            GameState::Exit => Screen::Exit,
            GameState::Playing => Screen::World,
            GameState::Jumpscare => Screen::Jumpscare,
            GameState::GameOver => Screen::GameOver,
        }
    }
}

/// Whether the menu backdrop and version footer are drawn
pub fn shows_backdrop(state: GameState) -> bool {
    !matches!(state, GameState::Playing | GameState::GameOver)
}

/// A chapter card on the chapter select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    pub number: u8,
    pub title_key: &'static str,
    pub subtitle_key: &'static str,
    pub locked: bool,
}

pub const CHAPTERS: [Chapter; 3] = [
    Chapter {
        number: 1,
        title_key: "chapter_1_title",
        subtitle_key: "chapter_1_sub",
        locked: false,
    },
    Chapter {
        number: 2,
        title_key: "chapter_2_title",
        subtitle_key: "chapter_2_sub",
        locked: true,
    },
    Chapter {
        number: 3,
        title_key: "chapter_3_title",
        subtitle_key: "chapter_3_sub",
        locked: true,
    },
];

pub fn chapter(number: u8) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.number == number)
}

/// A button press on one of the menu screens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MenuAction {
    Play,
    OpenSettings,
    OpenCredits,
    Exit,
    Back,
    SelectChapter(u8),
    ChangeSettings(SettingsPatch),
    TryAgain,
    ReturnToMenu,
}

/// Apply a menu action. Returns false when it was ignored (locked or
/// unknown chapter).
pub fn apply_menu_action<R: RollSource>(session: &mut Session<R>, action: MenuAction) -> bool {
    log::debug!("Menu action {action:?} on {:?}", session.game_state());
    match action {
        MenuAction::Play => session.progress.set_game_state(GameState::ChapterSelect),
        MenuAction::OpenSettings => session.progress.set_game_state(GameState::Settings),
        MenuAction::OpenCredits => session.progress.set_game_state(GameState::Credits),
        MenuAction::Exit => session.progress.set_game_state(GameState::Exit),
        MenuAction::Back | MenuAction::ReturnToMenu => {
            session.progress.set_game_state(GameState::Menu)
        }
        MenuAction::SelectChapter(number) => match chapter(number) {
            Some(c) if !c.locked => session.start_chapter(),
            Some(_) => {
                log::debug!("Chapter {number} is locked");
                return false;
            }
            None => {
                log::warn!("No chapter {number}");
                return false;
            }
        },
        MenuAction::ChangeSettings(patch) => {
            session.progress.update_settings(patch);
            session.progress.settings = session.progress.settings.clamped();
        }
        MenuAction::TryAgain => {
            // Reset leaves the store on the menu
            session.reset_game();
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::sim::{ItemType, LevelState, ScriptedRolls};
    use crate::tuning::Tuning;

    fn session() -> Session<ScriptedRolls> {
        Session::with_rolls(Tuning::default(), ScriptedRolls::default())
    }

    #[test]
    fn test_every_state_has_a_screen() {
        assert_eq!(Screen::for_state(GameState::Menu), Screen::MainMenu);
        assert_eq!(Screen::for_state(GameState::Playing), Screen::World);
        assert_eq!(Screen::for_state(GameState::Jumpscare), Screen::Jumpscare);
        assert_eq!(Screen::for_state(GameState::GameOver), Screen::GameOver);
    }

    #[test]
    fn test_backdrop_hidden_in_play_and_game_over() {
        assert!(shows_backdrop(GameState::Menu));
        assert!(shows_backdrop(GameState::Credits));
        assert!(shows_backdrop(GameState::Jumpscare));
        assert!(!shows_backdrop(GameState::Playing));
        assert!(!shows_backdrop(GameState::GameOver));
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut s = session();
        assert!(apply_menu_action(&mut s, MenuAction::OpenCredits));
        assert_eq!(s.game_state(), GameState::Credits);
        apply_menu_action(&mut s, MenuAction::Back);
        assert_eq!(s.game_state(), GameState::Menu);
        apply_menu_action(&mut s, MenuAction::Exit);
        assert_eq!(s.game_state(), GameState::Exit);
        apply_menu_action(&mut s, MenuAction::ReturnToMenu);
        apply_menu_action(&mut s, MenuAction::Play);
        assert_eq!(s.game_state(), GameState::ChapterSelect);
    }

    #[test]
    fn test_locked_chapters_are_ignored() {
        let mut s = session();
        apply_menu_action(&mut s, MenuAction::Play);
        assert!(!apply_menu_action(&mut s, MenuAction::SelectChapter(2)));
        assert!(!apply_menu_action(&mut s, MenuAction::SelectChapter(9)));
        assert_eq!(s.game_state(), GameState::ChapterSelect);
    }

    #[test]
    fn test_chapter_one_starts_a_fresh_run() {
        let mut s = session();
        s.progress.add_item(ItemType::Money);
        s.progress.floor = 7;
        s.progress.level_state = LevelState::Apartment;
        let epoch = s.epoch();

        apply_menu_action(&mut s, MenuAction::Play);
        assert!(apply_menu_action(&mut s, MenuAction::SelectChapter(1)));
        assert_eq!(s.game_state(), GameState::Playing);
        assert_eq!(s.progress.floor, 1);
        assert_eq!(s.progress.level_state, LevelState::Rooftop);
        assert!(s.progress.inventory.is_empty());
        assert!(s.epoch() > epoch);
    }

    #[test]
    fn test_try_again_resets_to_menu() {
        let mut s = session();
        s.start_chapter();
        s.progress.fix_cable();
        s.progress.set_game_state(GameState::GameOver);

        apply_menu_action(&mut s, MenuAction::TryAgain);
        assert_eq!(s.game_state(), GameState::Menu);
        assert_eq!(s.progress.cables_fixed, 0);
    }

    #[test]
    fn test_settings_changes_are_clamped_and_kept_across_reset() {
        let mut s = session();
        apply_menu_action(&mut s, MenuAction::OpenSettings);
        apply_menu_action(&mut s, MenuAction::ChangeSettings(SettingsPatch::volume(1.5)));
        apply_menu_action(
            &mut s,
            MenuAction::ChangeSettings(SettingsPatch::language(Language::En)),
        );
        assert_eq!(s.progress.settings.volume, 1.0);

        s.reset_game();
        assert_eq!(s.progress.settings.language, Language::En);
    }

    #[test]
    fn test_chapter_table() {
        assert_eq!(CHAPTERS.iter().filter(|c| !c.locked).count(), 1);
        assert_eq!(chapter(1).map(|c| c.locked), Some(false));
        assert_eq!(CREDITS.len(), 3);
    }
}
