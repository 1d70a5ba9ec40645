//! Quiz Quest entry point
//!
//! The windowed frontend lives outside this crate. The native binary plays a
//! scripted headless session (new game, walk to level 1, win the battle,
//! then play a freshly authored custom set) on a manual clock so the whole
//! loop can be exercised from a terminal.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use quiz_quest::audio::AudioManager;
    use quiz_quest::authoring::{QuestionSetDraft, set_name};
    use quiz_quest::battle::ActiveQuestion;
    use quiz_quest::consts::{FRAME_DT, MIN_CUSTOM_QUESTIONS};
    use quiz_quest::game::Screen;
    use quiz_quest::persistence::{GameStore, JsonStore};
    use quiz_quest::platform::{Clock, InputEvent, InputState, Key, ManualClock};
    use quiz_quest::renderer::CommandList;
    use quiz_quest::{Game, GameAction, Settings};

    /// Give up on any scripted step after this many frames
    const MAX_FRAMES: u32 = 60 * 60;
    const PLAYER: u32 = 1;

    struct Runner {
        game: Game,
        input: InputState,
        clock: ManualClock,
        canvas: CommandList,
        frames: u32,
    }

    impl Runner {
        fn frame(&mut self) {
            self.clock.advance(FRAME_DT);
            let now = self.clock.now();
            let frame = self.input.take_frame();
            self.game.update(&frame, now);
            self.canvas.clear_commands();
            self.game.draw(&mut self.canvas, self.input.text(), now);
            self.frames += 1;
        }

        fn press(&mut self, key: Key) {
            self.input.apply(InputEvent::KeyDown(key));
            self.frame();
            self.input.apply(InputEvent::KeyUp(key));
        }

        fn type_answer(&mut self, text: &str) {
            for c in text.chars() {
                self.input.apply(InputEvent::Text(c));
            }
            self.press(Key::Enter);
        }

        fn walk_to_level(&mut self) -> bool {
            self.input.apply(InputEvent::KeyDown(Key::Right));
            let start = self.frames;
            while self.frames - start < MAX_FRAMES {
                self.frame();
                if self.game.map().and_then(|m| m.active_zone()).is_some() {
                    break;
                }
            }
            self.input.apply(InputEvent::KeyUp(Key::Right));
            self.game.map().and_then(|m| m.active_zone()).is_some()
        }

        fn fight(&mut self) {
            let start = self.frames;
            while self.frames - start < MAX_FRAMES {
                let Some(session) = self.game.battle() else {
                    return;
                };
                if session.is_finished() {
                    self.frame();
                    continue;
                }
                let answer = match session.question() {
                    ActiveQuestion::Choice(q) => q.answer.to_string(),
                    ActiveQuestion::Text { question, .. } => question.answer.clone(),
                };
                log::info!("{} -> {answer}", session.question().prompt());
                self.type_answer(&answer);
            }
        }

        fn wait_for_close(&mut self) {
            let start = self.frames;
            while matches!(self.game.screen(), Screen::Battle(_))
                && self.frames - start < MAX_FRAMES
            {
                self.frame();
            }
        }

        /// Author a times-table set, then play it as a custom battle
        fn custom_round(&mut self) {
            let mut draft = QuestionSetDraft::new();
            for n in 1..=MIN_CUSTOM_QUESTIONS {
                let _ = draft.add(&format!("What is {n} x 7?"), &(n * 7).to_string());
            }
            let questions = match draft.finish(None) {
                Ok(questions) => questions,
                Err(error) => {
                    log::warn!("{error}");
                    return;
                }
            };

            let now = self.clock.now();
            let name = set_name(self.frames);
            let _ = self.game.apply(GameAction::BackToMenu, now);
            let saved = self.game.apply(
                GameAction::SaveQuestionSet {
                    name: name.clone(),
                    questions,
                },
                now,
            );
            if saved.is_err() || self.game.apply(GameAction::StartCustom(name), now).is_err() {
                return;
            }
            self.fight();
            self.wait_for_close();
            log::info!("Question sets: {:?}", self.game.question_sets());
        }
    }

    fn open_store(settings: &Settings) -> Box<dyn GameStore> {
        match JsonStore::open(&settings.save_path) {
            Ok(store) => Box::new(store),
            Err(error) => {
                log::warn!("{error}; progress will not be saved");
                Box::new(JsonStore::in_memory())
            }
        }
    }

    pub fn run() {
        let settings_path = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("quiz_quest_settings.json"));
        let settings = Settings::load(&settings_path);
        let audio = AudioManager::silent(&settings);
        let store = open_store(&settings);
        let hero = settings.default_hero;

        let mut runner = Runner {
            game: Game::new(settings, audio, store, 0x5eed),
            input: InputState::new(),
            clock: ManualClock::new(0.0),
            canvas: CommandList::new(),
            frames: 0,
        };

        let now = runner.clock.now();
        let _ = runner.game.apply(GameAction::Login(PLAYER), now);
        if runner.game.apply(GameAction::Continue, now).is_err()
            && let Err(error) = runner.game.apply(GameAction::NewGame(hero), now)
        {
            log::error!("Could not start a campaign: {error}");
            return;
        }

        if !runner.walk_to_level() {
            log::error!("Never reached a level");
            return;
        }
        runner.press(Key::Enter);
        runner.fight();
        runner.wait_for_close();

        match runner.game.store().load_progress(PLAYER) {
            Ok(Some(progress)) => log::info!(
                "Saved progress: level {} as {}",
                progress.level,
                progress.hero.as_str()
            ),
            Ok(None) => log::info!("No progress saved"),
            Err(error) => log::warn!("{error}"),
        }
        runner.custom_round();
        log::info!("Headless run finished after {} frames", runner.frames);
        let _ = runner.game.apply(GameAction::Quit, runner.clock.now());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Quiz Quest (native) starting...");
    log::info!("No window frontend in this build - running a headless session");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web frontend drives `quiz_quest::Game` directly
}
