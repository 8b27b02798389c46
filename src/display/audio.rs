/// Terminal "audio": sound effects ring the bell, music is tracked but
/// silent.

use std::io::Write;

use tracing::debug;

use crate::assets::SoundHandle;
use crate::audio::AudioPlayer;
use crate::error::{GameError, Result};

const BELL: &[u8] = b"\x07";

pub struct TerminalAudio<W: Write> {
    out: W,
    music: Option<String>,
    muted: bool,
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(out: W) -> Self {
        Self { out, music: None, muted: false }
    }

    pub fn muted(out: W) -> Self {
        Self { out, music: None, muted: true }
    }

    /// Key of the looping track, if one is playing.
    pub fn music(&self) -> Option<&str> {
        self.music.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioPlayer for TerminalAudio<W> {
    fn play_sound(&mut self, sound: &SoundHandle) -> Result<()> {
        debug!(sound = %sound.key, "play sound");
        if self.muted {
            return Ok(());
        }
        self.out
            .write_all(BELL)
            .and_then(|_| self.out.flush())
            .map_err(|e| GameError::AudioPlayback(format!("{}: {e}", sound.key)))
    }

    fn play_music_loop(&mut self, sound: &SoundHandle) -> Result<()> {
        debug!(music = %sound.key, "music loop started");
        self.music = Some(sound.key.clone());
        Ok(())
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.music.take() {
            debug!(music = %track, "music stopped");
        }
    }
}
