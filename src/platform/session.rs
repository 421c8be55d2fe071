//! Game session
//!
//! Owns one [`GameState`] and wires it to storage and audio. Hosts call
//! [`Session::push`] from their input handlers and [`Session::frame`] once per
//! displayed frame; nothing else mutates the state.

use super::input::{Intent, IntentBuffer};
use super::time::FrameClock;
use crate::audio::{self, AudioSink};
use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::settings::{AudioSettings, Settings};
use crate::sim::{GameEvent, GameState, Snapshot, should_flap, tick};
use crate::tuning::Tuning;

pub struct Session<S: Storage, A: AudioSink> {
    state: GameState,
    intents: IntentBuffer,
    clock: FrameClock,
    settings: Settings,
    storage: S,
    audio: A,
    /// Events produced by the most recent frame
    last_events: Vec<GameEvent>,
    /// Let the autopilot flap (demo mode)
    autoplay: bool,
    disposed: bool,
}

impl<S: Storage, A: AudioSink> Session<S, A> {
    /// Hydrate the high score and settings from `storage` and sit in the menu
    pub fn new(seed: u64, tuning: Tuning, storage: S, mut audio: A) -> Self {
        let high = HighScore::load(&storage);
        let settings = Settings::load(&storage);

        let mut state = GameState::with_tuning(seed, tuning);
        state.score.overwrite_high(i64::from(high.best));
        state.difficulty = settings.difficulty;
        audio.apply_settings(&settings.audio);

        log::info!(
            "Session ready (seed {}, difficulty {}, high score {})",
            seed,
            state.difficulty.as_str(),
            high.best
        );

        Self {
            clock: FrameClock::new(state.tuning.max_dt),
            state,
            intents: IntentBuffer::new(),
            settings,
            storage,
            audio,
            last_events: Vec::new(),
            autoplay: false,
            disposed: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    /// Buffer an intent for the next frame
    pub fn push(&mut self, intent: Intent) {
        if !self.disposed {
            self.intents.push(intent);
        }
    }

    /// Buffer a difficulty change from its surface key; unknown keys are dropped
    pub fn select_difficulty_key(&mut self, key: &str) -> bool {
        !self.disposed && self.intents.select_difficulty_key(key)
    }

    /// Run one tick for a frame at `now_ms`. Returns `None` once disposed.
    ///
    /// Elapsed time only counts if the round was live when the frame began, so
    /// resuming from pause (or starting a game) never integrates the idle gap.
    pub fn frame(&mut self, now_ms: f64) -> Option<Snapshot<'_>> {
        if self.disposed {
            return None;
        }

        let elapsed = self.clock.advance(now_ms);
        let dt = if self.state.phase.is_simulating() {
            elapsed
        } else {
            0.0
        };

        if self.autoplay && should_flap(&self.state) {
            self.intents.push(Intent::Flap);
        }
        let input = self.intents.drain();
        let events = tick(&mut self.state, &input, dt);
        self.handle_events(&events);
        self.last_events = events;

        Some(self.state.snapshot())
    }

    /// [`Session::frame`] with the snapshot encoded as JSON for script hosts.
    /// `None` once disposed, or if encoding fails (the frame still ran).
    pub fn frame_json(&mut self, now_ms: f64) -> Option<String> {
        let snapshot = self.frame(now_ms)?;
        serde_json::to_string(&snapshot)
            .map_err(|e| log::warn!("Failed to encode snapshot: {}", e))
            .ok()
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        audio::dispatch(&mut self.audio, events);

        for event in events {
            match *event {
                GameEvent::HighScore { score } => {
                    HighScore::new(score).save(&mut self.storage);
                }
                GameEvent::DifficultyChanged { difficulty } => {
                    self.settings.difficulty = difficulty;
                    self.settings.save(&mut self.storage);
                }
                _ => {}
            }
        }
    }

    /// Replace audio preferences and persist them
    pub fn set_audio_settings(&mut self, audio: AudioSettings) {
        self.settings.audio = audio.sanitized();
        self.audio.apply_settings(&self.settings.audio);
        self.settings.save(&mut self.storage);
    }

    /// Explicitly wipe the stored high score
    pub fn reset_high_score(&mut self) {
        let cleared = HighScore::overwrite(0, &mut self.storage);
        self.state.score.overwrite_high(i64::from(cleared.best));
    }

    /// Stop the session. Later frames and intents are ignored; calling again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.intents.drain();
        log::info!("Session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::persistence::MemoryStorage;
    use crate::sim::{Difficulty, GamePhase};

    fn session(storage: MemoryStorage) -> Session<MemoryStorage, NullAudio> {
        Session::new(7, Tuning::default(), storage, NullAudio)
    }

    #[test]
    fn test_hydrates_high_score_and_difficulty() {
        let mut settings = Settings::default();
        settings.difficulty = Difficulty::Hard;
        let mut storage = MemoryStorage::new().with_entry(HighScore::STORAGE_KEY, "41");
        settings.save(&mut storage);

        let s = session(storage);
        assert_eq!(s.state().score.high, 41);
        assert_eq!(s.state().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_corrupt_high_score_hydrates_as_zero() {
        let s = session(MemoryStorage::new().with_entry(HighScore::STORAGE_KEY, "-12"));
        assert_eq!(s.state().score.high, 0);
    }

    #[test]
    fn test_start_frame_integrates_nothing() {
        let mut s = session(MemoryStorage::new());
        s.frame(0.0);
        s.push(Intent::Start);
        let y = s.state().body.y();
        // 80 ms passed in the menu; none of it reaches the body
        s.frame(80.0);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(s.state().body.y(), y);

        s.frame(96.0);
        assert!(s.state().body.y() > y);
    }

    #[test]
    fn test_resume_does_not_catch_up() {
        let mut s = session(MemoryStorage::new());
        s.frame(0.0);
        s.push(Intent::Start);
        s.frame(16.0);
        s.frame(32.0);
        s.push(Intent::TogglePause);
        s.frame(48.0);
        assert_eq!(s.state().phase, GamePhase::Paused);

        let body = s.state().body.clone();
        let round_time = s.state().round_time;
        // Long pause, then resume
        s.push(Intent::TogglePause);
        s.frame(60_000.0);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(s.state().body, body);
        assert_eq!(s.state().round_time, round_time);
    }

    #[test]
    fn test_blur_and_hidden_in_one_frame_still_pause() {
        let mut s = session(MemoryStorage::new());
        s.frame(0.0);
        s.push(Intent::Start);
        s.frame(16.0);

        // Tab switch: window blur and visibilitychange land before the next frame
        s.push(Intent::Pause);
        s.push(Intent::Pause);
        s.frame(32.0);
        assert_eq!(s.state().phase, GamePhase::Paused);

        // Coming back does not resume on its own
        s.frame(5_032.0);
        assert_eq!(s.state().phase, GamePhase::Paused);
        s.push(Intent::TogglePause);
        s.frame(5_048.0);
        assert_eq!(s.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_difficulty_change_is_saved() {
        let mut s = session(MemoryStorage::new());
        assert!(s.select_difficulty_key("easy"));
        assert!(!s.select_difficulty_key("bogus"));
        s.frame(0.0);
        assert_eq!(s.state().difficulty, Difficulty::Easy);
        assert_eq!(Settings::load(s.storage()).difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_reset_high_score() {
        let mut s = session(MemoryStorage::new().with_entry(HighScore::STORAGE_KEY, "9"));
        s.reset_high_score();
        assert_eq!(s.state().score.high, 0);
        assert_eq!(HighScore::load(s.storage()).best, 0);
    }

    #[test]
    fn test_frame_json_is_a_snapshot_or_nothing() {
        let mut s = session(MemoryStorage::new());
        let json = s.frame_json(0.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "menu");
        assert!(value["obstacles"].is_array());

        s.dispose();
        assert!(s.frame_json(16.0).is_none());
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut s = session(MemoryStorage::new());
        s.push(Intent::Start);
        s.dispose();
        s.dispose();
        assert!(s.is_disposed());
        s.push(Intent::Start);
        assert!(s.frame(16.0).is_none());
        assert_eq!(s.state().phase, GamePhase::Menu);
    }
}
