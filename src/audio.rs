//! Music and sound effect cues
//!
//! The game decides *what* plays; an [`AudioBackend`] decides how. Tracks
//! loop until replaced, effects are fire-and-forget.

use rand::Rng;

use crate::hero::Hero;
use crate::settings::Settings;

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Menu,
    /// Walking around the campus
    Map(Hero),
    /// Campaign and custom battles
    Battle(Hero),
    /// One of the PvP themes (1 - 3)
    PvpBattle(u8),
}

impl Track {
    pub fn asset_path(&self) -> String {
        match self {
            Track::Menu => "assets/audio/ost/menuOst.mp3".to_string(),
            Track::Map(hero) => {
                let h = hero.as_str();
                format!("assets/audio/ost/{h}/{h}_map_ost.mp3")
            }
            Track::Battle(hero) => {
                format!("assets/audio/ost/battle/{}_battle_ost.mp3", hero.as_str())
            }
            Track::PvpBattle(n) => format!("assets/audio/ost/battle/pvp_battle_ost_{n}.mp3"),
        }
    }

    /// A random PvP theme
    pub fn random_pvp(rng: &mut impl Rng) -> Self {
        Track::PvpBattle(rng.random_range(1..=3))
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Any menu button
    Click,
    /// Coin toss starts
    CoinFlip,
}

impl SoundEffect {
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::Click => "assets/audio/sfx/click_sound_button.mp3",
            SoundEffect::CoinFlip => "assets/audio/sfx/coin_flip.mp3",
        }
    }
}

/// Whatever actually makes noise
pub trait AudioBackend {
    fn play_music(&mut self, path: &str, volume: f32);
    fn stop_music(&mut self);
    fn play_sound(&mut self, path: &str, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_music(&mut self, path: &str, volume: f32) {
        log::debug!("music: {path} @ {volume:.2}");
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }

    fn play_sound(&mut self, path: &str, volume: f32) {
        log::debug!("sfx: {path} @ {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    /// Volume and mute section of the settings
    mix: Settings,
    current: Option<Track>,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mix = Settings {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            ..Settings::default()
        };
        Self {
            backend,
            mix,
            current: None,
        }
    }

    /// Headless manager
    pub fn silent(settings: &Settings) -> Self {
        Self::new(Box::new(LogBackend), settings)
    }

    pub fn current_track(&self) -> Option<Track> {
        self.current
    }

    pub fn is_muted(&self) -> bool {
        self.mix.muted
    }

    /// Switch the looping track; asking for the one already playing is a no-op
    pub fn play_track(&mut self, track: Track) {
        if self.current == Some(track) {
            return;
        }
        self.current = Some(track);
        let level = self.mix.effective_music_volume();
        self.backend.play_music(&track.asset_path(), level);
    }

    pub fn stop_music(&mut self) {
        if self.current.take().is_some() {
            self.backend.stop_music();
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let level = self.mix.effective_sfx_volume();
        if level <= 0.0 {
            return;
        }
        self.backend.play_sound(effect.asset_path(), level);
    }

    /// Flip mute; the current track keeps its place but goes silent
    pub fn toggle_mute(&mut self) -> bool {
        self.mix.muted = !self.mix.muted;
        if let Some(track) = self.current {
            let level = self.mix.effective_music_volume();
            self.backend.play_music(&track.asset_path(), level);
        }
        log::info!("Audio {}", if self.mix.muted { "muted" } else { "enabled" });
        self.mix.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl AudioBackend for Recorder {
        fn play_music(&mut self, path: &str, volume: f32) {
            self.0.borrow_mut().push(format!("music {path} {volume:.1}"));
        }
        fn stop_music(&mut self) {
            self.0.borrow_mut().push("stop".into());
        }
        fn play_sound(&mut self, path: &str, _volume: f32) {
            self.0.borrow_mut().push(format!("sfx {path}"));
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let settings = Settings {
            master_volume: 1.0,
            music_volume: 0.5,
            ..Settings::default()
        };
        let audio = AudioManager::new(Box::new(Recorder(log.clone())), &settings);
        (audio, log)
    }

    #[test]
    fn test_track_paths() {
        assert_eq!(
            Track::Map(Hero::Girl).asset_path(),
            "assets/audio/ost/girl/girl_map_ost.mp3"
        );
        assert_eq!(
            Track::Battle(Hero::Boy).asset_path(),
            "assets/audio/ost/battle/boy_battle_ost.mp3"
        );
        assert_eq!(
            Track::PvpBattle(2).asset_path(),
            "assets/audio/ost/battle/pvp_battle_ost_2.mp3"
        );
    }

    #[test]
    fn test_same_track_not_restarted() {
        let (mut audio, log) = manager();
        audio.play_track(Track::Menu);
        audio.play_track(Track::Menu);
        audio.play_track(Track::Map(Hero::Boy));
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(audio.current_track(), Some(Track::Map(Hero::Boy)));
        audio.stop_music();
        audio.stop_music();
        assert_eq!(log.borrow().last().unwrap(), "stop");
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_mute_silences_effects() {
        let (mut audio, log) = manager();
        audio.play_track(Track::Menu);
        audio.play(SoundEffect::Click);
        assert!(audio.toggle_mute());
        audio.play(SoundEffect::CoinFlip);
        let log = log.borrow();
        assert_eq!(log[1], "sfx assets/audio/sfx/click_sound_button.mp3");
        assert_eq!(log[2], "music assets/audio/ost/menuOst.mp3 0.0");
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_volumes_follow_settings() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let settings = Settings {
            master_volume: 0.5,
            music_volume: 2.0,
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())), &settings);
        assert!(audio.is_muted());
        audio.play_track(Track::Menu);
        assert!(!audio.toggle_mute());
        let log = log.borrow();
        assert_eq!(log[0], "music assets/audio/ost/menuOst.mp3 0.0");
        assert_eq!(log[1], "music assets/audio/ost/menuOst.mp3 0.5");
    }

    #[test]
    fn test_random_pvp_theme_in_range() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
        for _ in 0..50 {
            let Track::PvpBattle(n) = Track::random_pvp(&mut rng) else {
                unreachable!()
            };
            assert!((1..=3).contains(&n));
        }
    }
}
