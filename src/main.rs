//! The Apartment entry point
//!
//! Browser: a DOM shell around the simulation. It feeds keyboard and mouse
//! into `TickInput`, shows the screen for the current `GameState`, fills the
//! HUD, plays audio for session events and publishes the scene as JSON for
//! the 3D view. Native: a headless walkthrough with logging.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use serde::Serialize;
    use the_apartment::audio::{AudioManager, SoundEffect};
    use the_apartment::hud::HudSnapshot;
    use the_apartment::router::{self, MenuAction, Screen};
    use the_apartment::sim::{
        Chaser, GameState, Player, Session, TickInput, Wanderer, World, tick,
    };
    use the_apartment::{Language, SettingsPatch};

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Screen containers, one per `Screen`
    const SCREENS: [(Screen, &str); 8] = [
        (Screen::MainMenu, "screen-menu"),
        (Screen::ChapterSelect, "screen-chapters"),
        (Screen::Settings, "screen-settings"),
        (Screen::Credits, "screen-credits"),
        (Screen::Exit, "screen-exit"),
        (Screen::World, "screen-world"),
        (Screen::Jumpscare, "screen-jumpscare"),
        (Screen::GameOver, "screen-game-over"),
    ];

    /// Buttons and the action they send
    const BUTTONS: [(&str, MenuAction); 14] = [
        ("btn-play", MenuAction::Play),
        ("btn-settings", MenuAction::OpenSettings),
        ("btn-credits", MenuAction::OpenCredits),
        ("btn-exit", MenuAction::Exit),
        ("btn-chapters-back", MenuAction::Back),
        ("btn-settings-back", MenuAction::Back),
        ("btn-credits-back", MenuAction::Back),
        ("btn-exit-return", MenuAction::ReturnToMenu),
        ("chapter-1", MenuAction::SelectChapter(1)),
        ("chapter-2", MenuAction::SelectChapter(2)),
        ("chapter-3", MenuAction::SelectChapter(3)),
        ("btn-try-again", MenuAction::TryAgain),
        (
            "lang-tr",
            MenuAction::ChangeSettings(SettingsPatch {
                sensitivity: None,
                volume: None,
                language: Some(Language::Tr),
            }),
        ),
        (
            "lang-en",
            MenuAction::ChangeSettings(SettingsPatch {
                sensitivity: None,
                volume: None,
                language: Some(Language::En),
            }),
        ),
    ];

    /// Static labels re-translated when the language changes
    const LABELS: [(&str, &str); 17] = [
        ("btn-play", "menu_play"),
        ("btn-settings", "menu_settings"),
        ("btn-credits", "menu_credits"),
        ("btn-exit", "menu_exit"),
        ("chapters-title", "chapter_select"),
        ("btn-chapters-back", "back"),
        ("settings-title", "settings_title"),
        ("label-sensitivity", "sensitivity"),
        ("label-volume", "volume"),
        ("label-language", "language"),
        ("btn-settings-back", "back"),
        ("credits-title", "credits_title"),
        ("btn-credits-back", "back"),
        ("exit-message", "exit_screen_msg"),
        ("btn-exit-return", "return_menu"),
        ("game-over-title", "game_over_title"),
        ("btn-try-again", "try_again"),
    ];

    /// Movement keys currently held
    #[derive(Default)]
    struct HeldKeys {
        forward: bool,
        back: bool,
        left: bool,
        right: bool,
        crouch: bool,
    }

    impl HeldKeys {
        fn move_dir(&self) -> Vec2 {
            let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
            Vec2::new(axis(self.right, self.left), axis(self.forward, self.back))
        }
    }

    /// What the 3D view draws each frame
    #[derive(Serialize)]
    struct SceneView<'a> {
        world: &'a World,
        player: &'a Player,
        chaser: &'a Chaser,
        wanderer: &'a Wanderer,
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: TickInput,
        keys: HeldKeys,
        audio: AudioManager,
        last_time: f64,
        pointer_locked: bool,
        /// Language the static labels were last written in
        labels_language: Option<Language>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(seed),
                input: TickInput::default(),
                keys: HeldKeys::default(),
                audio: AudioManager::new(),
                last_time: 0.0,
                pointer_locked: false,
                labels_language: None,
            }
        }

        /// Run one simulation tick
        fn update(&mut self, dt: f32) {
            self.input.move_dir = self.keys.move_dir();
            self.input.crouch = self.keys.crouch;

            tick(&mut self.session, &self.input, dt);

            // Clear one-shot inputs after processing
            self.input.interact = false;
            self.input.look_delta = Vec2::ZERO;

            self.audio.set_volume(self.session.progress.settings.volume);
            for event in self.session.drain_events() {
                log::debug!("{event:?}");
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        fn apply(&mut self, action: MenuAction) {
            self.audio.resume();
            if router::apply_menu_action(&mut self.session, action) {
                self.sync_sliders();
            }
        }

        fn scene_json(&self) -> String {
            let view = SceneView {
                world: &self.session.world,
                player: &self.session.player,
                chaser: &self.session.chaser,
                wanderer: &self.session.wanderer,
            };
            serde_json::to_string(&view).unwrap_or_default()
        }

        /// Show the container for the current screen, hide the rest
        fn update_screens(&self, document: &Document) {
            let state = self.session.game_state();
            let current = Screen::for_state(state);
            for (screen, id) in SCREENS {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if screen == current { "screen" } else { "screen hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
            if let Some(el) = document.get_element_by_id("backdrop") {
                let class = if router::shows_backdrop(state) { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("version") {
                el.set_text_content(
                    router::shows_backdrop(state).then_some(router::VERSION),
                );
            }
        }

        fn update_labels(&mut self, document: &Document) {
            let language = self.session.progress.settings.language;
            if self.labels_language == Some(language) {
                return;
            }
            for (id, key) in LABELS {
                set_text(document, id, self.session.tr(key));
            }
            for chapter in &router::CHAPTERS {
                let id = format!("chapter-{}-title", chapter.number);
                set_text(document, &id, self.session.tr(chapter.title_key));
                let id = format!("chapter-{}-sub", chapter.number);
                set_text(document, &id, self.session.tr(chapter.subtitle_key));
            }
            for lang in [Language::Tr, Language::En] {
                set_text(document, &format!("lang-{}", lang.as_str()), lang.native_name());
            }
            for (i, name) in router::CREDITS.iter().enumerate() {
                set_text(document, &format!("credit-{i}"), name);
            }
            self.labels_language = Some(language);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if self.session.game_state() != GameState::Playing {
                return;
            }
            let hud = HudSnapshot::capture(&self.session);
            set_text(document, "hud-location", &hud.location);
            set_text(document, "hud-task", hud.task.as_deref().unwrap_or(""));
            set_text(document, "hud-inventory-title", &hud.inventory_title);
            let items = match &hud.inventory_empty {
                Some(empty) => empty.clone(),
                None => hud.inventory_lines().join(" | "),
            };
            set_text(document, "hud-inventory", &items);
            set_text(document, "hud-interact", &hud.interact_hint);

            if let Some(el) = document.get_element_by_id("hud-notification") {
                match &hud.notification {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Put the slider thumbs and readouts where the settings are
        fn sync_sliders(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let settings = self.session.progress.settings;
            if let Some(slider) = input_element(&document, "sensitivity-slider") {
                slider.set_value_as_number(settings.sensitivity as f64);
            }
            if let Some(slider) = input_element(&document, "volume-slider") {
                slider.set_value_as_number(settings.volume as f64);
            }
            set_text(&document, "sensitivity-value", &settings.sensitivity_label());
            set_text(&document, "volume-value", &settings.volume_label());
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// JSON snapshot of the scene for the 3D view
    #[wasm_bindgen]
    pub fn scene_json() -> String {
        GAME.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|game| game.borrow().scene_json())
                .unwrap_or_default()
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("The Apartment starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);
        GAME.with(|cell| *cell.borrow_mut() = Some(game.clone()));

        setup_keyboard(&document, game.clone());
        setup_mouse(&document, game.clone());
        setup_menu_buttons(&document, game.clone());
        setup_sliders(&document, game.clone());
        game.borrow().sync_sliders();

        request_animation_frame(game);
        log::info!("The Apartment running!");
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => g.keys.forward = true,
                    "KeyS" | "ArrowDown" => g.keys.back = true,
                    "KeyA" | "ArrowLeft" => g.keys.left = true,
                    "KeyD" | "ArrowRight" => g.keys.right = true,
                    "KeyC" | "ControlLeft" => g.keys.crouch = true,
                    // Holding the key must not dispatch every frame
                    "KeyE" if !event.repeat() => g.input.interact = true,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => g.keys.forward = false,
                    "KeyS" | "ArrowDown" => g.keys.back = false,
                    "KeyA" | "ArrowLeft" => g.keys.left = false,
                    "KeyD" | "ArrowRight" => g.keys.right = false,
                    "KeyC" | "ControlLeft" => g.keys.crouch = false,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mouse(document: &Document, game: Rc<RefCell<Game>>) {
        // Pointer lock change handler
        {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let locked = doc.pointer_lock_element().is_some();
                log::info!("Pointer lock {}", if locked { "acquired" } else { "released" });
                game.borrow_mut().pointer_locked = locked;
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Mouse look while locked
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.pointer_locked {
                    g.input.look_delta +=
                        Vec2::new(event.movement_x() as f32, event.movement_y() as f32);
                }
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the world view: grab the pointer, or interact once grabbed
        if let Some(view) = document.get_element_by_id("screen-world") {
            let target = view.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                if g.pointer_locked {
                    g.input.interact = true;
                } else {
                    drop(g);
                    target.request_pointer_lock();
                }
            });
            let _ = view
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, action) in BUTTONS {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{id}");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply(action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_sliders(document: &Document, game: Rc<RefCell<Game>>) {
        let sliders: [(&str, fn(f32) -> SettingsPatch); 2] = [
            ("sensitivity-slider", SettingsPatch::sensitivity),
            ("volume-slider", SettingsPatch::volume),
        ];
        for (id, patch) in sliders {
            let Some(slider) = input_element(document, id) else {
                continue;
            };
            let game = game.clone();
            let source = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let value = source.value_as_number() as f32;
                game.borrow_mut()
                    .apply(MenuAction::ChangeSettings(patch(value)));
            });
            let _ = slider
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_labels(&document);
                g.update_screens(&document);
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("The Apartment (native) starting...");
    log::info!("The browser build is the playable one; running a headless walkthrough");

    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Roof key, roof door, one apartment floor, then straight to the
/// electrical room and out
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use glam::Vec3;
    use the_apartment::hud::HudSnapshot;
    use the_apartment::router::{MenuAction, apply_menu_action};
    use the_apartment::sim::{GameState, ObjectKind, Session, TickInput, tick};

    const DT: f32 = 1.0 / 60.0;
    let idle = |session: &mut Session, seconds: f32| {
        for _ in 0..(seconds / DT).ceil() as u32 {
            tick(session, &TickInput::default(), DT);
        }
    };
    let interact_all = |session: &mut Session, kind: ObjectKind| {
        let ids: Vec<_> = session.world.objects_of(kind).map(|o| o.id).collect();
        for id in ids {
            session.interact_with(id);
        }
    };

    let mut session = Session::new(666);
    apply_menu_action(&mut session, MenuAction::Play);
    apply_menu_action(&mut session, MenuAction::SelectChapter(1));

    interact_all(&mut session, ObjectKind::KeyRoof);
    interact_all(&mut session, ObjectKind::DoorRoof);
    let delay = session.tuning.roof_door_delay as f32;
    idle(&mut session, delay + 0.1);
    log_hud(&HudSnapshot::capture(&session));

    interact_all(&mut session, ObjectKind::Drawer);
    interact_all(&mut session, ObjectKind::DoorRoom);
    log_hud(&HudSnapshot::capture(&session));

    while session.progress.floor < session.tuning.electrical_floor
        && session.game_state() == GameState::Playing
    {
        session.player.position = Vec3::new(0.0, session.player.position.y, 14.5);
        tick(&mut session, &TickInput::default(), DT);
    }
    log_hud(&HudSnapshot::capture(&session));

    interact_all(&mut session, ObjectKind::CableBox);
    interact_all(&mut session, ObjectKind::ExitDoorElec);
    log_hud(&HudSnapshot::capture(&session));

    let delay = session.tuning.escape_reset_delay as f32;
    idle(&mut session, delay + 0.1);
    log::info!(
        "Walkthrough finished: {:?}, {} events",
        session.game_state(),
        session.drain_events().len()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn log_hud(hud: &the_apartment::hud::HudSnapshot) {
    match serde_json::to_string(hud) {
        Ok(json) => log::info!("HUD {json}"),
        Err(e) => log::warn!("HUD not serializable: {e}"),
    }
}
