//! Host input mapping
//!
//! The page has a single "action" gesture (Space or a pointer press). What it
//! means depends on the phase: start a run, jump, or go back to the title
//! screen. A few extra keys flip preferences.

use crate::persistence::KeyValueStore;
use crate::session::Session;
use crate::sim::{Command, GamePhase};

/// Raw input the host forwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// `KeyboardEvent.code`, e.g. "Space"
    Key(String),
    /// Mouse, pen or touch press
    PointerDown,
}

impl InputEvent {
    /// Translate a DOM event by its type.
    ///
    /// A touch tap also fires `touchstart`, `mousedown` and `click`; only
    /// `pointerdown` counts, so one tap is one input.
    pub fn from_dom(event_type: &str, code: &str) -> Option<Self> {
        match event_type {
            "keydown" => Some(InputEvent::Key(code.to_string())),
            "pointerdown" => Some(InputEvent::PointerDown),
            _ => None,
        }
    }
}

/// What the host should do with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Command(Command),
    ToggleAutopilot,
    ToggleFps,
    CycleQuality,
    ToggleReducedMotion,
}

/// Key that acts like a tap
pub const ACTION_KEY: &str = "Space";
/// Key that toggles the demo autopilot
pub const AUTOPILOT_KEY: &str = "KeyI";
pub const FPS_KEY: &str = "KeyF";
pub const QUALITY_KEY: &str = "KeyQ";
pub const MOTION_KEY: &str = "KeyM";

/// Map an input event to a host action for the current phase
pub fn action_for(event: &InputEvent, phase: GamePhase) -> Option<HostAction> {
    if let InputEvent::Key(code) = event {
        match code.as_str() {
            ACTION_KEY => {}
            AUTOPILOT_KEY => return Some(HostAction::ToggleAutopilot),
            FPS_KEY => return Some(HostAction::ToggleFps),
            QUALITY_KEY => return Some(HostAction::CycleQuality),
            MOTION_KEY => return Some(HostAction::ToggleReducedMotion),
            _ => return None,
        }
    }
    let command = match phase {
        GamePhase::Start => Command::Start,
        GamePhase::Playing => Command::Jump,
        GamePhase::GameOver => Command::Restart,
    };
    Some(HostAction::Command(command))
}

/// Scrolling and zooming are blocked only during a run
pub fn suppress_default(event: &InputEvent, phase: GamePhase) -> bool {
    phase == GamePhase::Playing
        && matches!(
            action_for(event, phase),
            Some(HostAction::Command(Command::Jump))
        )
}

/// Route one input into the session.
///
/// Returns true when the browser default should be suppressed.
pub fn dispatch<S: KeyValueStore>(session: &mut Session<S>, event: &InputEvent) -> bool {
    let phase = session.phase();
    let Some(action) = action_for(event, phase) else {
        return false;
    };

    match action {
        HostAction::Command(Command::Start) => session.request_start(),
        HostAction::Command(Command::Jump) => session.request_jump(),
        HostAction::Command(Command::Restart) => session.request_restart(),
        HostAction::ToggleAutopilot => {
            let enabled = !session.autopilot();
            session.set_autopilot(enabled);
        }
        HostAction::ToggleFps => {
            let mut settings = session.settings().clone();
            settings.show_fps = !settings.show_fps;
            session.set_settings(settings);
        }
        HostAction::CycleQuality => {
            let mut settings = session.settings().clone();
            settings.quality = settings.quality.next();
            log::info!("Quality: {}", settings.quality.as_str());
            session.set_settings(settings);
        }
        HostAction::ToggleReducedMotion => {
            let mut settings = session.settings().clone();
            settings.reduced_motion = !settings.reduced_motion;
            log::info!("Reduced motion: {}", settings.reduced_motion);
            session.set_settings(settings);
        }
    }

    suppress_default(event, phase)
}
