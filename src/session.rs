//! Game session
//!
//! Owns one `GameState` plus the stores behind it. Host input is queued here
//! and consumed at the next tick boundary, so commands and resizes never land
//! mid-tick.

use crate::highscores::BestScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};
use crate::snapshot::RenderSnapshot;
use crate::tuning::Tuning;

/// One player's game: the simulation plus the stores behind it.
///
/// The host forwards input through the `request_*` methods and calls
/// `advance` once per display refresh.
pub struct Session<S: KeyValueStore> {
    state: GameState,
    store: S,
    best: BestScore,
    settings: Settings,
    /// Tuning before settings were folded in
    base_tuning: Tuning,
    /// Pending one-shot input for the next tick
    input: TickInput,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(seed: u64, viewport: Viewport, store: S) -> Self {
        Self::with_tuning(seed, viewport, store, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, store: S, base_tuning: Tuning) -> Self {
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);

        let mut tuning = base_tuning.clone();
        settings.apply_to(&mut tuning);
        let mut state = GameState::with_tuning(seed, viewport, tuning);
        state.high_score = best.value();
        state.particle_budget = settings.max_particles();

        log::info!("Session ready (seed {}, best {})", seed, best.value());

        Self {
            state,
            store,
            best,
            settings,
            base_tuning,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.best.value()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace and persist settings; takes effect immediately
    pub fn set_settings(&mut self, settings: Settings) {
        let mut tuning = self.base_tuning.clone();
        settings.apply_to(&mut tuning);
        self.state.tuning = tuning;
        self.state.particle_budget = settings.max_particles();
        self.state.particles.truncate(self.state.particle_budget);
        settings.save(&mut self.store);
        self.settings = settings;
    }

    pub fn request_start(&mut self) {
        self.input.start = true;
    }

    pub fn request_restart(&mut self) {
        self.input.restart = true;
    }

    pub fn request_jump(&mut self) {
        self.input.jump = true;
    }

    /// New bounds, applied at the next tick boundary
    pub fn resize(&mut self, viewport: Viewport) {
        self.input.viewport = Some(viewport);
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Run one tick and return what happened
    pub fn advance(&mut self) -> Vec<GameEvent> {
        let next = TickInput {
            autopilot: self.input.autopilot,
            ..Default::default()
        };
        let input = std::mem::replace(&mut self.input, next);
        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::Crashed { score, .. } = *event {
                self.best.record(score, &mut self.store);
            }
        }
        events
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, !self.settings.reduced_motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::testing::BrokenStore;
    use proptest::prelude::*;

    fn session_with_best(best: u64) -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        if best > 0 {
            store
                .set(BestScore::STORAGE_KEY, &best.to_string())
                .unwrap();
        }
        Session::new(7, Viewport::new(800.0, 600.0), store)
    }

    /// Play one run that ends with `score`, then return to the start screen
    fn play_run<S: KeyValueStore>(session: &mut Session<S>, score: u64) {
        session.request_start();
        session.advance();
        assert_eq!(session.phase(), GamePhase::Playing);
        session.state.score = score;
        session.state.book.y = -50.0;
        session.advance();
        assert_eq!(session.phase(), GamePhase::GameOver);
        session.request_restart();
        session.advance();
        assert_eq!(session.phase(), GamePhase::Start);
    }

    #[test]
    fn test_loads_best_from_store() {
        let session = session_with_best(12);
        assert_eq!(session.high_score(), 12);
        assert_eq!(session.state().high_score, 12);
        assert_eq!(session.snapshot().high_score, 12);
    }

    #[test]
    fn test_commands_wait_for_tick() {
        let mut session = session_with_best(0);
        session.request_start();
        assert_eq!(session.phase(), GamePhase::Start);
        let events = session.advance();
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_request_start_mid_run_is_noop() {
        let mut session = session_with_best(0);
        session.request_start();
        session.advance();
        session.state.score = 3;
        session.request_start();
        let events = session.advance();
        assert!(!events.contains(&GameEvent::Started));
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_jump_is_one_shot() {
        let mut session = session_with_best(0);
        session.request_start();
        session.advance();
        session.request_jump();
        let events = session.advance();
        assert!(events.contains(&GameEvent::Jumped));
        let events = session.advance();
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_queued_jump_lands_before_gravity() {
        let mut session = session_with_best(0);
        session.request_start();
        session.advance();
        let tuning = session.state().tuning.clone();

        session.request_jump();
        session.advance();
        assert_eq!(
            session.state().book.velocity,
            tuning.jump_velocity + tuning.gravity
        );
        session.advance();
        assert_eq!(
            session.state().book.velocity,
            tuning.jump_velocity + tuning.gravity * 2.0
        );
    }

    #[test]
    fn test_resize_lands_on_next_tick() {
        let mut session = session_with_best(0);
        session.resize(Viewport::new(1280.0, 720.0));
        assert_eq!(session.state().viewport, Viewport::new(800.0, 600.0));
        session.advance();
        assert_eq!(session.state().viewport, Viewport::new(1280.0, 720.0));
        assert_eq!(session.snapshot().book.x, 1280.0 / 3.0);
    }

    #[test]
    fn test_new_best_persisted() {
        let mut session = session_with_best(4);
        play_run(&mut session, 9);
        assert_eq!(session.high_score(), 9);
        assert_eq!(
            session.store().get(BestScore::STORAGE_KEY).unwrap().as_deref(),
            Some("9")
        );
    }

    #[test]
    fn test_broken_store_keeps_playing() {
        let mut session = Session::new(1, Viewport::default(), BrokenStore);
        assert_eq!(session.high_score(), 0);
        play_run(&mut session, 3);
        assert_eq!(session.high_score(), 3);
    }

    #[test]
    fn test_settings_apply_and_persist() {
        let mut session = session_with_best(0);
        session.set_settings(Settings {
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        });
        assert_eq!(session.state().particle_budget, 0);
        assert_eq!(session.state().tuning.hover_amplitude, 0.0);

        for _ in 0..50 {
            session.advance();
        }
        assert!(session.state().particles.is_empty());
        assert_eq!(session.state().book.y, 300.0);

        let reloaded = Settings::load(session.store());
        assert!(reloaded.reduced_motion);
    }

    #[test]
    fn test_autopilot_survives_toggle_across_ticks() {
        let mut session = session_with_best(0);
        session.set_autopilot(true);
        session.request_start();
        session.advance();
        session.advance();
        assert!(session.autopilot());
    }

    proptest! {
        #[test]
        fn prop_best_is_max_of_runs(scores in prop::collection::vec(0u64..500, 1..8)) {
            let mut session = session_with_best(0);
            for &score in &scores {
                play_run(&mut session, score);
            }
            let max = scores.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(session.high_score(), max);
            prop_assert_eq!(session.state().high_score, max);
            let stored = session.store().get(BestScore::STORAGE_KEY).unwrap();
            if max > 0 {
                prop_assert_eq!(stored, Some(max.to_string()));
            } else {
                prop_assert_eq!(stored, None);
            }
        }
    }
}
