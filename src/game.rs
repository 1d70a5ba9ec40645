//! Screen flow: menu, campus map, coin toss and battles
//!
//! [`Game`] owns every service (settings, audio, storage) and the screen
//! currently running. The window layer feeds it one [`FrameInput`] per frame
//! and forwards menu choices as [`GameAction`]s. Deadlines ("close the
//! battle two seconds after it is decided") are timestamps checked per frame.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect, Track};
use crate::battle::{
    Answer, BattleInput, BattleMode, BattleSession, CoinFace, CoinToss, CustomQuestion,
    LevelConfig, Outcome, PlayerSlot, hud,
};
use crate::consts::{BATTLE_CLOSE_SECONDS, MAX_LEVEL};
use crate::error::{QuizError, Result};
use crate::hero::Hero;
use crate::map::{MapEvent, MapState};
use crate::persistence::{GameStore, UserId};
use crate::platform::FrameInput;
use crate::renderer::shapes::banner;
use crate::renderer::{BLACK, Canvas, GOLD, WHITE};
use crate::screen_center;
use crate::settings::Settings;

/// Coin result stays on screen this long before the PvP battle starts
pub const TOSS_RESULT_SECONDS: f64 = 1.0;
/// Menu notices fade after this long
pub const NOTICE_SECONDS: f64 = 3.0;

/// Everything a menu or dialog can ask the game to do
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    Login(UserId),
    Logout,
    /// Fresh campaign with the chosen hero
    NewGame(Hero),
    /// Resume the saved campaign
    Continue,
    /// Wipe campaign progress back to level 1
    ResetProgress,
    /// Hero pick for player 1 and player 2; opens the coin toss
    StartPvp([Hero; 2]),
    /// Player 1's call on the coin toss screen
    CallCoin(CoinFace),
    /// Battle through a stored question set
    StartCustom(String),
    SaveQuestionSet {
        name: String,
        questions: Vec<CustomQuestion>,
    },
    DeleteQuestionSet(String),
    ToggleMute,
    BackToMenu,
    Quit,
}

/// A running battle and its close deadline
#[derive(Debug, Clone)]
pub struct ActiveBattle {
    pub session: BattleSession,
    /// Set when the battle is decided
    pub close_at: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    /// The campus map (kept in [`Game`] so a battle can return to it)
    Map,
    CoinToss {
        toss: CoinToss,
        heroes: [Hero; 2],
        start_at: Option<(f64, PlayerSlot)>,
    },
    Battle(Box<ActiveBattle>),
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    shown_at: f64,
}

pub struct Game {
    settings: Settings,
    audio: AudioManager,
    store: Box<dyn GameStore>,
    user: Option<UserId>,
    screen: Screen,
    map: Option<MapState>,
    notice: Option<Notice>,
    rng: Pcg32,
    running: bool,
}

impl Game {
    pub fn new(settings: Settings, audio: AudioManager, store: Box<dyn GameStore>, seed: u64) -> Self {
        let mut game = Self {
            settings,
            audio,
            store,
            user: None,
            screen: Screen::Menu,
            map: None,
            notice: None,
            rng: Pcg32::seed_from_u64(seed),
            running: true,
        };
        game.audio.play_track(Track::Menu);
        game
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn map(&self) -> Option<&MapState> {
        self.map.as_ref()
    }

    pub fn battle(&self) -> Option<&BattleSession> {
        match &self.screen {
            Screen::Battle(active) => Some(&active.session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Menu notice, while it is still showing
    pub fn notice(&self, now: f64) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now - n.shown_at < NOTICE_SECONDS)
            .map(|n| n.text.as_str())
    }

    /// Question sets the current player can pick from
    pub fn question_sets(&self) -> Vec<String> {
        self.store.list_question_sets(self.user).unwrap_or_else(|error| {
            log::warn!("Could not list question sets: {error}");
            Vec::new()
        })
    }

    /// Run a menu action. Failures are also kept as a notice for the player.
    pub fn apply(&mut self, action: GameAction, now: f64) -> Result<()> {
        if !matches!(action, GameAction::CallCoin(_) | GameAction::Quit) {
            self.audio.play(SoundEffect::Click);
        }
        let result = self.handle(action, now);
        if let Err(error) = &result {
            log::warn!("{error}");
            self.notice = Some(Notice {
                text: error.to_string(),
                shown_at: now,
            });
        }
        result
    }

    fn handle(&mut self, action: GameAction, now: f64) -> Result<()> {
        match action {
            GameAction::Login(user) => {
                log::info!("User {user} logged in");
                self.user = Some(user);
            }
            GameAction::Logout => {
                if let Some(user) = self.user.take() {
                    log::info!("User {user} logged out");
                }
            }
            GameAction::NewGame(hero) => {
                let user = self.user.ok_or(QuizError::NotLoggedIn)?;
                if let Err(error) = self.store.save_progress(user, 1, hero) {
                    log::warn!("Could not save new game: {error}");
                }
                self.enter_map(hero, 1, now);
            }
            GameAction::Continue => {
                let user = self.user.ok_or(QuizError::NotLoggedIn)?;
                let progress = self.store.load_progress(user).unwrap_or_else(|error| {
                    log::warn!("Could not load progress: {error}");
                    None
                });
                let progress = progress.ok_or(QuizError::NoSavedProgress)?;
                log::info!(
                    "Continuing at level {} as {}",
                    progress.level,
                    progress.hero.as_str()
                );
                self.enter_map(progress.hero, progress.level, now);
            }
            GameAction::ResetProgress => {
                let user = self.user.ok_or(QuizError::NotLoggedIn)?;
                let reset = self.store.reset_progress(user).unwrap_or_else(|error| {
                    log::warn!("Could not reset progress: {error}");
                    false
                });
                if !reset {
                    return Err(QuizError::NoSavedProgress);
                }
                if let Some(map) = &mut self.map {
                    map.zones_mut().reset();
                }
            }
            GameAction::StartPvp(heroes) => {
                self.screen = Screen::CoinToss {
                    toss: CoinToss::new(),
                    heroes,
                    start_at: None,
                };
            }
            GameAction::CallCoin(face) => {
                if let Screen::CoinToss { toss, .. } = &mut self.screen
                    && toss.call(face, now, &mut self.rng)
                {
                    self.audio.play(SoundEffect::CoinFlip);
                }
            }
            GameAction::StartCustom(name) => {
                let questions = self
                    .store
                    .get_question_set(&name)?
                    .ok_or_else(|| QuizError::QuestionSetMissing(name.clone()))?;
                let hero = self.current_hero();
                let session = BattleSession::custom(&name, questions, hero, self.rng.random(), now)?
                    .with_time_limit(self.settings.custom_timer_seconds, now);
                self.audio.play_track(Track::Battle(hero));
                self.start_battle(session);
            }
            GameAction::SaveQuestionSet { name, questions } => {
                if questions.is_empty() {
                    return Err(QuizError::EmptyQuestionSet);
                }
                self.store.save_question_set(&name, &questions, self.user)?;
            }
            GameAction::DeleteQuestionSet(name) => {
                if !self.store.delete_question_set(&name, self.user)? {
                    return Err(QuizError::QuestionSetMissing(name));
                }
            }
            GameAction::ToggleMute => {
                self.audio.toggle_mute();
            }
            GameAction::BackToMenu => self.back_to_menu(),
            GameAction::Quit => self.quit(),
        }
        Ok(())
    }

    /// Advance the current screen by one frame
    pub fn update(&mut self, frame: &FrameInput, now: f64) {
        if frame.quit {
            self.quit();
            return;
        }

        match self.screen {
            Screen::Menu => {}
            Screen::Map => self.update_map(frame, now),
            Screen::CoinToss { .. } => self.update_coin_toss(frame, now),
            Screen::Battle(_) => self.update_battle(frame, now),
        }
    }

    fn update_map(&mut self, frame: &FrameInput, now: f64) {
        if frame.back {
            self.back_to_menu();
            return;
        }
        let Some(map) = &mut self.map else {
            self.screen = Screen::Menu;
            return;
        };
        if frame.pause {
            map.toggle_pause();
        }
        if let Some(MapEvent::EnterZone(id)) = map.tick(frame.movement, frame.enter, now) {
            let hero = map.hero();
            let level = LevelConfig::for_level(id);
            log::info!("Entering {}", level.name());
            let session = BattleSession::campaign(&level, hero, self.rng.random(), now);
            self.audio.play_track(Track::Battle(hero));
            self.start_battle(session);
        }
    }

    fn update_coin_toss(&mut self, frame: &FrameInput, now: f64) {
        if frame.back {
            self.back_to_menu();
            return;
        }
        let Screen::CoinToss {
            toss,
            heroes,
            start_at,
        } = &mut self.screen
        else {
            return;
        };

        if let Some(pos) = frame.click
            && toss.click(pos, now, &mut self.rng)
        {
            self.audio.play(SoundEffect::CoinFlip);
        }
        if let Some(first) = toss.update(now) {
            *start_at = Some((now + TOSS_RESULT_SECONDS, first));
        }

        if let Some((at, first)) = *start_at
            && now >= at
        {
            let heroes = *heroes;
            let session = BattleSession::pvp(heroes, first, self.rng.random(), now)
                .with_time_limit(self.settings.pvp_timer_seconds, now);
            let track = Track::random_pvp(&mut self.rng);
            self.audio.play_track(track);
            self.start_battle(session);
        }
    }

    fn update_battle(&mut self, frame: &FrameInput, now: f64) {
        let Screen::Battle(active) = &mut self.screen else {
            return;
        };

        let answer = frame
            .click
            .and_then(|pos| hud::answer_at(&active.session, pos))
            .or_else(|| {
                frame
                    .submitted_text
                    .as_ref()
                    .filter(|text| !text.trim().is_empty())
                    .map(|text| Answer::Text(text.clone()))
            });
        let input = BattleInput {
            answer,
            pause: frame.pause,
            quit: frame.back,
        };

        if let Some(result) = active.session.tick(input, now)
            && result.outcome.is_terminal()
        {
            active.close_at = Some(match result.outcome {
                Outcome::Interrupted => now,
                _ => now + BATTLE_CLOSE_SECONDS,
            });
        }

        if active.close_at.is_none_or(|at| now < at) {
            return;
        }
        let Screen::Battle(active) = std::mem::replace(&mut self.screen, Screen::Menu) else {
            return;
        };
        self.close_battle(&active.session);
    }

    fn start_battle(&mut self, session: BattleSession) {
        self.screen = Screen::Battle(Box::new(ActiveBattle {
            session,
            close_at: None,
        }));
    }

    /// Apply the outcome and go back where the battle came from
    fn close_battle(&mut self, session: &BattleSession) {
        match session.mode() {
            BattleMode::Campaign { level } => {
                if session.outcome().is_victory() {
                    self.complete_level(*level, session.hero());
                }
                match &self.map {
                    Some(map) => {
                        self.audio.play_track(Track::Map(map.hero()));
                        self.screen = Screen::Map;
                    }
                    None => self.back_to_menu(),
                }
            }
            BattleMode::Pvp { .. } | BattleMode::Custom { .. } => self.back_to_menu(),
        }
    }

    /// Unlock the next level and save it for a logged in player. Replaying
    /// an earlier level never lowers the saved level.
    fn complete_level(&mut self, level: u32, hero: Hero) {
        let next = level + 1;
        if next > MAX_LEVEL {
            log::info!("Level {level} was the last one");
            return;
        }
        if let Some(map) = &mut self.map {
            map.zones_mut().unlock(next);
        }
        log::info!("Victory! Level {next} unlocked");

        let Some(user) = self.user else {
            return;
        };
        let saved = match self.store.load_progress(user) {
            Ok(progress) => progress.map_or(0, |p| p.level),
            Err(error) => {
                log::warn!("Could not read progress: {error}");
                0
            }
        };
        let best = next.max(saved);
        match self.store.save_progress(user, best, hero) {
            Ok(()) => log::info!("Saving progress: level {best}, hero {}", hero.as_str()),
            Err(error) => log::warn!("Could not save progress: {error}"),
        }
    }

    fn enter_map(&mut self, hero: Hero, level: u32, now: f64) {
        let mut map = MapState::campus(hero, now);
        map.zones_mut().unlock_through(level);
        map.obstacles_mut().debug = self.settings.debug_collision;
        self.map = Some(map);
        self.screen = Screen::Map;
        self.audio.play_track(Track::Map(hero));
    }

    fn current_hero(&self) -> Hero {
        self.map
            .as_ref()
            .map(MapState::hero)
            .unwrap_or(self.settings.default_hero)
    }

    fn back_to_menu(&mut self) {
        if let Screen::Battle(active) = &mut self.screen {
            active.session.interrupt();
        }
        self.screen = Screen::Menu;
        self.audio.play_track(Track::Menu);
    }

    fn quit(&mut self) {
        if let Screen::Battle(active) = &mut self.screen {
            active.session.interrupt();
        }
        self.running = false;
        self.audio.stop_music();
        log::info!("Exiting game");
    }

    /// Draw the current screen. `typed` is the text entry buffer.
    pub fn draw(&self, canvas: &mut dyn Canvas, typed: &str, now: f64) {
        match &self.screen {
            Screen::Menu => {
                canvas.clear(BLACK);
                let center = screen_center();
                canvas.text("Quiz Quest", center - IVec2::new(0, 200), GOLD);
                let status = match self.user {
                    Some(user) => format!("Logged in as {user}"),
                    None => "Not logged in".to_string(),
                };
                canvas.text(&status, center, WHITE);
            }
            Screen::Map => {
                if let Some(map) = &self.map {
                    map.draw(canvas);
                }
            }
            Screen::CoinToss { toss, .. } => toss.draw(canvas),
            Screen::Battle(active) => hud::draw(&active.session, canvas, typed, now),
        }
        if let Some(text) = self.notice(now) {
            banner(canvas, text, screen_center() + IVec2::new(0, 300), WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{ActiveQuestion, VictoryReason};
    use crate::consts::{MIN_CUSTOM_QUESTIONS, PLAYER_MAX_HP};
    use crate::persistence::{JsonStore, ProgressStore};
    use crate::platform::MovementKeys;
    use crate::renderer::CommandList;

    const STEP: f64 = 1.0 / 60.0;

    fn game() -> Game {
        let settings = Settings::default();
        let audio = AudioManager::silent(&settings);
        Game::new(settings, audio, Box::new(JsonStore::in_memory()), 7)
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    /// Walk right until the level 1 prompt shows up, then press enter
    fn walk_into_level_one(game: &mut Game, now: &mut f64) {
        let walk = FrameInput {
            movement: MovementKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..200 {
            *now += STEP;
            game.update(&walk, *now);
            if game.map().and_then(MapState::active_zone).is_some() {
                break;
            }
        }
        assert_eq!(game.map().and_then(MapState::active_zone), Some(1));
        *now += STEP;
        game.update(
            &FrameInput {
                enter: true,
                ..Default::default()
            },
            *now,
        );
    }

    fn answer_text(session: &BattleSession, correct: bool) -> String {
        match session.question() {
            ActiveQuestion::Choice(q) if correct => q.answer.to_string(),
            ActiveQuestion::Choice(q) => (q.answer + 1000).to_string(),
            ActiveQuestion::Text { question, .. } if correct => question.answer.clone(),
            ActiveQuestion::Text { .. } => "definitely wrong".to_string(),
        }
    }

    fn submit(game: &mut Game, correct: bool, now: f64) {
        let text = answer_text(game.battle().unwrap(), correct);
        game.update(
            &FrameInput {
                enter: true,
                submitted_text: Some(text),
                ..Default::default()
            },
            now,
        );
    }

    fn custom_set(n: usize) -> Vec<CustomQuestion> {
        (0..n)
            .map(|i| CustomQuestion::new(format!("Capital #{i}?"), format!("City {i}")))
            .collect()
    }

    #[test]
    fn test_single_player_needs_login() {
        let mut game = game();
        let err = game.apply(GameAction::NewGame(Hero::Boy), 0.0).unwrap_err();
        assert!(matches!(err, QuizError::NotLoggedIn));
        assert!(matches!(game.screen(), Screen::Menu));
        assert_eq!(game.notice(1.0), Some("no user is logged in"));
        assert_eq!(game.notice(NOTICE_SECONDS + 1.0), None);
    }

    #[test]
    fn test_campaign_victory_unlocks_and_saves() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(GameAction::Login(1), now).unwrap();
        game.apply(GameAction::NewGame(Hero::Girl), now).unwrap();
        assert_eq!(game.audio().current_track(), Some(Track::Map(Hero::Girl)));

        walk_into_level_one(&mut game, &mut now);
        assert!(matches!(game.screen(), Screen::Battle(_)));
        assert_eq!(game.audio().current_track(), Some(Track::Battle(Hero::Girl)));
        assert_eq!(game.battle().unwrap().enemy().max_hp, 5);

        for _ in 0..5 {
            now += STEP;
            submit(&mut game, true, now);
        }
        let session = game.battle().unwrap();
        assert_eq!(
            session.outcome(),
            Outcome::Victory(VictoryReason::EnemyDefeated)
        );
        assert_eq!(session.enemy().hp, 0);

        // Still on the battle screen until the close deadline
        now += 1.0;
        game.update(&idle(), now);
        assert!(matches!(game.screen(), Screen::Battle(_)));
        now += BATTLE_CLOSE_SECONDS;
        game.update(&idle(), now);
        assert!(matches!(game.screen(), Screen::Map));
        assert_eq!(game.audio().current_track(), Some(Track::Map(Hero::Girl)));

        assert!(game.map().unwrap().zones().is_unlocked(2));
        let progress = game.store().load_progress(1).unwrap().unwrap();
        assert_eq!(progress.level, 2);
        assert_eq!(progress.hero, Hero::Girl);
    }

    #[test]
    fn test_campaign_defeat_keeps_progress() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(GameAction::Login(1), now).unwrap();
        game.apply(GameAction::NewGame(Hero::Boy), now).unwrap();
        walk_into_level_one(&mut game, &mut now);

        for _ in 0..10 {
            now += STEP;
            submit(&mut game, false, now);
        }
        assert_eq!(game.battle().unwrap().outcome(), Outcome::Defeat);
        now += BATTLE_CLOSE_SECONDS;
        game.update(&idle(), now);
        assert!(matches!(game.screen(), Screen::Map));
        assert!(!game.map().unwrap().zones().is_unlocked(2));
        assert_eq!(game.store().load_progress(1).unwrap().unwrap().level, 1);
    }

    #[test]
    fn test_leaving_battle_returns_immediately() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(GameAction::Login(1), now).unwrap();
        game.apply(GameAction::NewGame(Hero::Boy), now).unwrap();
        walk_into_level_one(&mut game, &mut now);

        now += STEP;
        game.update(
            &FrameInput {
                back: true,
                ..Default::default()
            },
            now,
        );
        assert!(matches!(game.screen(), Screen::Map));
    }

    #[test]
    fn test_continue_restores_unlocked_levels() {
        let mut store = JsonStore::in_memory();
        store.save_progress(4, 6, Hero::Girl).unwrap();
        let settings = Settings::default();
        let audio = AudioManager::silent(&settings);
        let mut game = Game::new(settings, audio, Box::new(store), 1);

        assert!(matches!(
            game.apply(GameAction::Continue, 0.0),
            Err(QuizError::NotLoggedIn)
        ));
        game.apply(GameAction::Login(5), 0.0).unwrap();
        assert!(matches!(
            game.apply(GameAction::Continue, 0.0),
            Err(QuizError::NoSavedProgress)
        ));

        game.apply(GameAction::Login(4), 0.0).unwrap();
        game.apply(GameAction::Continue, 0.0).unwrap();
        let map = game.map().unwrap();
        assert_eq!(map.hero(), Hero::Girl);
        assert_eq!(map.zones().highest_unlocked(), 6);

        game.apply(GameAction::ResetProgress, 0.0).unwrap();
        assert_eq!(game.map().unwrap().zones().highest_unlocked(), 1);
        assert_eq!(game.store().load_progress(4).unwrap().unwrap().level, 1);
    }

    #[test]
    fn test_replaying_early_level_keeps_saved_level() {
        let mut store = JsonStore::in_memory();
        store.save_progress(1, 6, Hero::Boy).unwrap();
        let settings = Settings::default();
        let audio = AudioManager::silent(&settings);
        let mut game = Game::new(settings, audio, Box::new(store), 3);
        let mut now = 0.0;
        game.apply(GameAction::Login(1), now).unwrap();
        game.apply(GameAction::Continue, now).unwrap();
        walk_into_level_one(&mut game, &mut now);

        while !game.battle().unwrap().is_finished() {
            now += STEP;
            submit(&mut game, true, now);
        }
        now += BATTLE_CLOSE_SECONDS;
        game.update(&idle(), now);
        assert!(matches!(game.screen(), Screen::Map));

        let progress = game.store().load_progress(1).unwrap().unwrap();
        assert_eq!(progress.level, 6);
        assert_eq!(game.map().unwrap().zones().highest_unlocked(), 6);
    }

    #[test]
    fn test_pause_on_map_freezes_walking() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(GameAction::Login(1), now).unwrap();
        game.apply(GameAction::NewGame(Hero::Boy), now).unwrap();
        let pause = FrameInput {
            pause: true,
            ..Default::default()
        };
        now += STEP;
        game.update(&pause, now);
        assert!(game.map().unwrap().is_paused());

        let start = game.map().unwrap().character_world();
        let walk = FrameInput {
            movement: MovementKeys {
                right: true,
                ..Default::default()
            },
            enter: true,
            ..Default::default()
        };
        for _ in 0..60 {
            now += STEP;
            game.update(&walk, now);
        }
        assert!(matches!(game.screen(), Screen::Map));
        assert_eq!(game.map().unwrap().character_world(), start);

        now += STEP;
        game.update(&pause, now);
        walk_into_level_one(&mut game, &mut now);
        assert!(matches!(game.screen(), Screen::Battle(_)));
    }

    #[test]
    fn test_blank_confirm_is_not_an_answer() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(GameAction::Login(1), now).unwrap();
        game.apply(GameAction::NewGame(Hero::Boy), now).unwrap();
        walk_into_level_one(&mut game, &mut now);

        for text in ["", "   "] {
            now += STEP;
            game.update(
                &FrameInput {
                    enter: true,
                    submitted_text: Some(text.to_string()),
                    ..Default::default()
                },
                now,
            );
        }
        let session = game.battle().unwrap();
        assert_eq!(session.player().hp, PLAYER_MAX_HP);
        assert_eq!(session.outcome(), Outcome::Pending);
    }

    #[test]
    fn test_custom_set_too_small_is_refused() {
        let mut game = game();
        game.apply(
            GameAction::SaveQuestionSet {
                name: "tiny".into(),
                questions: custom_set(3),
            },
            0.0,
        )
        .unwrap();
        let err = game
            .apply(GameAction::StartCustom("tiny".into()), 0.0)
            .unwrap_err();
        assert!(matches!(
            err,
            QuizError::QuestionSetTooSmall { found: 3, .. }
        ));
        assert!(game.notice(0.5).unwrap().contains("at least 10"));
        assert!(matches!(game.screen(), Screen::Menu));

        assert!(matches!(
            game.apply(GameAction::StartCustom("missing".into()), 0.0),
            Err(QuizError::QuestionSetMissing(_))
        ));
    }

    #[test]
    fn test_custom_battle_all_correct() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(
            GameAction::SaveQuestionSet {
                name: "capitals".into(),
                questions: custom_set(MIN_CUSTOM_QUESTIONS),
            },
            now,
        )
        .unwrap();
        assert_eq!(game.question_sets(), vec!["capitals"]);

        game.apply(GameAction::StartCustom("capitals".into()), now)
            .unwrap();
        assert_eq!(game.battle().unwrap().enemy().hp, 10);

        for _ in 0..MIN_CUSTOM_QUESTIONS {
            now += STEP;
            submit(&mut game, true, now);
        }
        assert_eq!(
            game.battle().unwrap().outcome(),
            Outcome::Victory(VictoryReason::EnemyDefeated)
        );
        now += BATTLE_CLOSE_SECONDS;
        game.update(&idle(), now);
        assert!(matches!(game.screen(), Screen::Menu));
        assert_eq!(game.audio().current_track(), Some(Track::Menu));
    }

    #[test]
    fn test_pvp_coin_toss_then_battle() {
        let mut game = game();
        let mut now = 0.0;
        game.apply(GameAction::StartPvp([Hero::Boy, Hero::Girl]), now)
            .unwrap();
        assert!(matches!(game.screen(), Screen::CoinToss { .. }));

        game.apply(GameAction::CallCoin(CoinFace::Heads), now)
            .unwrap();
        for _ in 0..200 {
            now += 0.03;
            game.update(&idle(), now);
            if game.battle().is_some() {
                break;
            }
        }
        let session = game.battle().expect("battle never started");
        assert!(matches!(session.mode(), BattleMode::Pvp { .. }));
        assert_eq!(session.time_left(), game.settings().pvp_timer_seconds);
        assert!(matches!(
            game.audio().current_track(),
            Some(Track::PvpBattle(1..=3))
        ));
    }

    #[test]
    fn test_delete_question_set_owner_only() {
        let mut game = game();
        game.apply(GameAction::Login(1), 0.0).unwrap();
        game.apply(
            GameAction::SaveQuestionSet {
                name: "mine".into(),
                questions: custom_set(1),
            },
            0.0,
        )
        .unwrap();
        game.apply(GameAction::Logout, 0.0).unwrap();
        assert!(game.question_sets().is_empty());
        assert!(
            game.apply(GameAction::DeleteQuestionSet("mine".into()), 0.0)
                .is_err()
        );
        game.apply(GameAction::Login(1), 0.0).unwrap();
        game.apply(GameAction::DeleteQuestionSet("mine".into()), 0.0)
            .unwrap();
        assert!(game.question_sets().is_empty());
    }

    #[test]
    fn test_quit_stops_everything() {
        let mut game = game();
        game.update(
            &FrameInput {
                quit: true,
                ..Default::default()
            },
            0.0,
        );
        assert!(!game.is_running());
        assert_eq!(game.audio().current_track(), None);
    }

    #[test]
    fn test_draw_menu_and_notice() {
        let mut game = game();
        let _ = game.apply(GameAction::Continue, 0.0);
        let mut list = CommandList::new();
        game.draw(&mut list, "", 0.5);
        assert!(list.has_text("Quiz Quest"));
        assert!(list.has_text("no user is logged in"));
    }
}
