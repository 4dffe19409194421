//! Sound trigger seam.
//!
//! The engine only says *what* should happen to a named sound; decoding and
//! mixing belong to the host.  `Mixer` tracks playback state per sound and is
//! enough to run the game headless.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// Looping music while a run is in progress.
    Background,
    /// One-shot explosion on crash.
    Blast,
}

impl Sound {
    pub fn name(self) -> &'static str {
        match self {
            Sound::Background => "background",
            Sound::Blast => "blast",
        }
    }
}

pub trait Audio {
    fn play(&mut self, sound: Sound);
    fn pause(&mut self, sound: Sound);
    fn resume(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Debug, Default)]
pub struct Mixer {
    background: Playback,
    blast: Playback,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, sound: Sound) -> Playback {
        match sound {
            Sound::Background => self.background,
            Sound::Blast => self.blast,
        }
    }

    fn slot(&mut self, sound: Sound) -> &mut Playback {
        match sound {
            Sound::Background => &mut self.background,
            Sound::Blast => &mut self.blast,
        }
    }

    fn transition(&mut self, sound: Sound, to: Playback) {
        let slot = self.slot(sound);
        if *slot != to {
            tracing::debug!(sound = sound.name(), from = ?*slot, to = ?to, "audio");
            *slot = to;
        }
    }
}

impl Audio for Mixer {
    /// Always restarts from the beginning.
    fn play(&mut self, sound: Sound) {
        self.transition(sound, Playback::Playing);
    }

    fn pause(&mut self, sound: Sound) {
        if self.state(sound) == Playback::Playing {
            self.transition(sound, Playback::Paused);
        }
    }

    fn resume(&mut self, sound: Sound) {
        if self.state(sound) == Playback::Paused {
            self.transition(sound, Playback::Playing);
        }
    }

    fn stop(&mut self, sound: Sound) {
        self.transition(sound, Playback::Stopped);
    }
}
