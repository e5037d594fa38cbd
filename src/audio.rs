//! Audio cues
//!
//! The simulation raises [`GameEvent`]s; this module maps them to sound cues
//! and forwards them, with volumes applied, to whatever backend the host
//! provides (Web Audio, a native mixer, or nothing).

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snowball hit a fireball
    Collision,
    /// Reached the end of the field
    Victory,
}

/// Background music commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Start the run music
    Play,
    /// Rewind the background track and play it from the beginning
    Restart,
}

/// Host audio implementation
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn music(&mut self, cue: MusicCue, volume: f32);
}

/// Which cues an event should produce
pub fn cues_for(event: GameEvent) -> (Option<SoundEffect>, Option<MusicCue>) {
    match event {
        GameEvent::Started => (None, Some(MusicCue::Play)),
        GameEvent::Collision { .. } => (Some(SoundEffect::Collision), None),
        GameEvent::Won => (Some(SoundEffect::Victory), None),
        GameEvent::Reset => (None, Some(MusicCue::Restart)),
        GameEvent::Ready => (None, None),
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    sfx_volume: f32,
    music_volume: f32,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    /// Pick up changed preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
    }

    /// Forward the cues for a batch of events (fire and forget)
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for &event in events {
            let (effect, music) = cues_for(event);
            if let Some(effect) = effect
                && self.sfx_volume > 0.0
            {
                self.backend.play_effect(effect, self.sfx_volume);
            }
            if let Some(cue) = music {
                // Restarts still rewind while muted so unmuting resumes in sync
                self.backend.music(cue, self.music_volume);
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Backend that only logs (native builds, tests)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Audio: {:?} at {:.2}", effect, volume);
    }

    fn music(&mut self, cue: MusicCue, volume: f32) {
        log::debug!("Audio: music {:?} at {:.2}", cue, volume);
    }
}
