//! Overlay text selection
//!
//! The DOM overlay itself is drawn by the host; this picks what it says.

use crate::sim::GamePhase;

/// Intro story shown before the first run
pub const INTRO_TEXT: [&str; 4] = [
    "You find your bulbous, frigid form in the depths of an infernal realm.",
    "For whatever reason, you are being doomed to an eternity of thermodynamic suffering, \
     to be melted and refrozen over and over again.",
    "But what's this? Graced by a compassionate force, you feel a cool wind lift you up \
     and away from the terrible, scorching ground below.",
    "Perhaps you are not doomed after all, IF you can navigate the blazing orbs \
     separating you from salvation...",
];

/// Text for the centre overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayMessage {
    pub header: String,
    pub prompt: String,
    pub show_prompt: bool,
    /// Show [`INTRO_TEXT`] under the header
    pub show_intro: bool,
}

/// Overlay for a phase, or `None` while a run is in progress
///
/// `load_progress` is the asset loader fraction; `first_run` is true until the
/// first run has started.
pub fn overlay_for(
    phase: GamePhase,
    load_progress: f32,
    first_run: bool,
    intro_enabled: bool,
) -> Option<OverlayMessage> {
    let message = match phase {
        GamePhase::Loading => OverlayMessage {
            header: "Loading...".to_string(),
            prompt: format!("{:.0}%", load_progress.clamp(0.0, 1.0) * 100.0),
            show_prompt: load_progress > 0.0,
            show_intro: false,
        },
        GamePhase::Idle => OverlayMessage {
            header: "Snowball's Chance".to_string(),
            prompt: "Press Space to begin".to_string(),
            show_prompt: true,
            show_intro: first_run && intro_enabled,
        },
        GamePhase::Running => return None,
        GamePhase::Won => OverlayMessage {
            header: "You escaped the inferno!".to_string(),
            prompt: "Press Space to restart".to_string(),
            show_prompt: true,
            show_intro: false,
        },
        GamePhase::Lost => OverlayMessage {
            header: "You melted...".to_string(),
            prompt: "Press Space to restart".to_string(),
            show_prompt: true,
            show_intro: false,
        },
    };
    Some(message)
}
