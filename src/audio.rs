/// Audio boundary.  Playback is fire-and-forget: a failure is logged and
/// the game carries on silently.

use tracing::warn;

use crate::assets::SoundHandle;
use crate::error::Result;

pub trait AudioPlayer {
    fn play_sound(&mut self, sound: &SoundHandle) -> Result<()>;
    fn play_music_loop(&mut self, sound: &SoundHandle) -> Result<()>;
    fn stop_music(&mut self);
}

pub fn play_sound<A: AudioPlayer + ?Sized>(audio: &mut A, sound: &SoundHandle) {
    if let Err(err) = audio.play_sound(sound) {
        warn!(sound = %sound.key, %err, "sound playback failed");
    }
}

pub fn play_music_loop<A: AudioPlayer + ?Sized>(audio: &mut A, sound: &SoundHandle) {
    if let Err(err) = audio.play_music_loop(sound) {
        warn!(music = %sound.key, %err, "could not start background music");
    }
}
