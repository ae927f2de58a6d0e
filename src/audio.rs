//! Sound effects
//!
//! The simulation only names the effects; playback belongs to the host.
//! `AudioManager` applies volume/mute settings before handing an effect to
//! whatever backend the host plugs in.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires a shot
    LaserShot,
    /// Enemy destroyed by a shot
    Destroy,
    /// Bomb hits a shield block
    Impact,
    /// Formation reached the shields
    GameOver,
}

impl SoundEffect {
    /// Asset file the host should play
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::LaserShot => "lasershoot.wav",
            SoundEffect::Destroy => "boom.wav",
            SoundEffect::Impact => "bomb.wav",
            SoundEffect::GameOver => "gameover.wav",
        }
    }
}

/// Host-side sound playback
pub trait AudioBackend {
    /// Play an effect at the given volume (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs playback (headless runs)
#[derive(Debug, Default)]
pub struct LogAudioBackend {
    /// Number of effects played so far
    pub played: usize,
}

impl AudioBackend for LogAudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("play {} at volume {:.2}", effect.file_name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: Option<B>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: Option<B>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, vol);
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_effective_volume() {
        let mut audio = AudioManager::new(Some(Recorder::default()));
        assert!((audio.effective_volume() - 0.8).abs() < 1e-6);
        audio.set_sfx_volume(0.5);
        assert!((audio.effective_volume() - 0.4).abs() < 1e-6);
        audio.set_master_volume(3.0);
        assert!((audio.effective_volume() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_muted_suppresses_playback() {
        let mut audio = AudioManager::new(Some(Recorder::default()));
        audio.play(SoundEffect::Destroy);
        audio.set_muted(true);
        audio.play(SoundEffect::Impact);
        let played = &audio.backend().unwrap().0;
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, SoundEffect::Destroy);
    }

    #[test]
    fn test_missing_backend_is_silent() {
        let mut audio: AudioManager<Recorder> = AudioManager::new(None);
        audio.play(SoundEffect::GameOver);
        assert!(audio.backend().is_none());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(SoundEffect::LaserShot.file_name(), "lasershoot.wav");
        assert_eq!(SoundEffect::Destroy.file_name(), "boom.wav");
        assert_eq!(SoundEffect::Impact.file_name(), "bomb.wav");
    }
}
