//! Per-tick simulation and the phase state machine
//!
//! One call to `tick` is one display refresh. Commands and viewport changes
//! are applied at the tick boundary, then the current phase's update runs,
//! then particles advance in every phase.

use glam::Vec2;

use super::collision::{self, Collision};
use super::particles::{self, ParticleKind};
use super::physics;
use super::shelves;
use super::state::{GameEvent, GamePhase, GameState, Viewport};
use crate::consts::{JUMP_BURST, SCORE_BURST};

/// Discrete commands from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// START -> PLAYING
    Start,
    /// GAME_OVER -> START
    Restart,
    /// Upward impulse while PLAYING
    Jump,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub start: bool,
    pub restart: bool,
    pub jump: bool,
    /// New viewport bounds from a host resize
    pub viewport: Option<Viewport>,
    /// Demo mode - the core decides when to jump
    pub autopilot: bool,
}

/// Apply a command if it is valid in the current phase.
///
/// Returns false (and changes nothing) for out-of-phase commands.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    match (command, state.phase) {
        (Command::Start, GamePhase::Start) => {
            state.reset_run();
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Started);
            log::info!("Run started (best {})", state.high_score);
            true
        }
        (Command::Restart, GamePhase::GameOver) => {
            state.reset_run();
            state.phase = GamePhase::Start;
            state.events.push(GameEvent::Restarted);
            log::info!("Back to start screen");
            true
        }
        (Command::Jump, GamePhase::Playing) => {
            physics::jump(&mut state.book, state.tuning.jump_velocity);
            let origin = Vec2::new(state.viewport.book_x(), state.book.y + 15.0);
            particles::burst(
                &mut state.particles,
                &mut state.rng,
                origin,
                ParticleKind::Trail,
                JUMP_BURST,
                state.particle_budget,
            );
            state.events.push(GameEvent::Jumped);
            true
        }
        _ => false,
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if let Some(viewport) = input.viewport {
        state.viewport = viewport;
    }

    if input.restart {
        apply_command(state, Command::Restart);
    }
    if input.start {
        apply_command(state, Command::Start);
    }
    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        apply_command(state, Command::Jump);
    }

    state.frame_count += 1;
    state.time_ticks += 1;

    let phase = state.phase;
    match phase {
        GamePhase::Start => update_start(state),
        GamePhase::Playing => update_playing(state),
        GamePhase::GameOver => update_game_over(state),
    }

    update_particles(state, phase == GamePhase::Playing);
}

/// Title screen: the book bobs in place
pub fn update_start(state: &mut GameState) {
    physics::hover(
        &mut state.book,
        &state.viewport,
        &state.tuning,
        state.time_ticks,
    );
}

/// Physics, shelves, scoring, then collision
pub fn update_playing(state: &mut GameState) {
    physics::integrate(&mut state.book, state.tuning.gravity);

    shelves::advance(&mut state.shelves, state.tuning.shelf_speed);
    let book_x = state.viewport.book_x();
    let newly_passed = shelves::mark_passed(&mut state.shelves, book_x);
    for _ in 0..newly_passed {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
        particles::burst(
            &mut state.particles,
            &mut state.rng,
            Vec2::new(book_x, state.book.y),
            ParticleKind::Sparkle,
            SCORE_BURST,
            state.particle_budget,
        );
    }

    if shelves::should_spawn(state.frame_count, state.tuning.spawn_interval) {
        shelves::spawn(
            &mut state.shelves,
            &mut state.rng,
            &state.tuning,
            &state.viewport,
        );
    }

    if let Some(hit) = collision::detect(
        &state.book,
        &state.shelves,
        &state.viewport,
        &state.tuning,
    ) {
        game_over(state, hit);
    }
}

/// Run over: the world stays frozen until restart
pub fn update_game_over(_state: &mut GameState) {}

fn game_over(state: &mut GameState, hit: Collision) {
    state.phase = GamePhase::GameOver;
    let new_best = state.score > state.high_score;
    if new_best {
        state.high_score = state.score;
        log::info!("New best score: {}", state.score);
    }
    log::info!("Game over ({:?}) with score {}", hit, state.score);
    state.events.push(GameEvent::Crashed {
        score: state.score,
        new_best,
    });
}

/// Ambient dust always; the trail only while a run was in progress this tick
fn update_particles(state: &mut GameState, playing: bool) {
    particles::spawn_dust(
        &mut state.particles,
        &mut state.rng,
        &state.viewport,
        &state.tuning,
        state.particle_budget,
    );

    let interval = state.tuning.trail_interval;
    if playing && interval > 0 && state.frame_count % interval == 0 {
        let book = Vec2::new(state.viewport.book_x(), state.book.y);
        particles::emit_trail(
            &mut state.particles,
            &mut state.rng,
            book,
            state.particle_budget,
        );
    }

    particles::step(&mut state.particles, state.tuning.particle_decay);
}

/// Demo AI: aim a little below the next gap's centre and jump when sinking past it
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let aim = shelves::next_unpassed(&state.shelves)
        .map(|s| s.gap_center() + s.gap_height * 0.15)
        .unwrap_or(state.viewport.height / 2.0);
    state.book.y > aim && state.book.velocity > state.tuning.jump_velocity / 2.0
}
