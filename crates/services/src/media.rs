//! Forwarding layer between quiz commands and an embeddable player.

use quiz_core::model::{MediaSource, Track};
use serde::Deserialize;

pub const DEFAULT_VOLUME: f32 = 0.8;

/// Capability implemented by whatever actually plays media (a DOM element,
/// an iframe API, or nothing at all in tests).
pub trait MediaPlayer: Send {
    fn load(&mut self, source: &MediaSource);
    fn set_playing(&mut self, playing: bool);
    fn set_volume(&mut self, volume: f32);
}

impl MediaPlayer for Box<dyn MediaPlayer> {
    fn load(&mut self, source: &MediaSource) {
        (**self).load(source);
    }
    fn set_playing(&mut self, playing: bool) {
        (**self).set_playing(playing);
    }
    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }
}

/// Player that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMediaPlayer;

impl MediaPlayer for NullMediaPlayer {
    fn load(&mut self, _source: &MediaSource) {}
    fn set_playing(&mut self, _playing: bool) {}
    fn set_volume(&mut self, _volume: f32) {}
}

/// State changes reported back by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    Buffering,
    Ready,
    Playing,
    Paused,
    Ended,
    Error(String),
}

/// Envelope the YouTube iframe API posts to the host window.
#[derive(Debug, Deserialize)]
struct PlayerMessage {
    event: String,
    #[serde(default)]
    info: serde_json::Value,
}

impl MediaEvent {
    /// Translate a message posted by the YouTube iframe API.
    ///
    /// Returns `None` for anything that is not JSON or does not affect
    /// playback (progress reports, API handshakes).
    #[must_use]
    pub fn from_player_message(raw: &str) -> Option<Self> {
        let message: PlayerMessage = serde_json::from_str(raw).ok()?;
        match message.event.as_str() {
            "onReady" => Some(Self::Ready),
            "onError" => Some(Self::Error(format!("youtube player error {}", message.info))),
            // -1 unstarted, 0 ended, 1 playing, 2 paused, 3 buffering, 5 cued
            "onStateChange" => match message.info.as_i64()? {
                0 => Some(Self::Ended),
                1 => Some(Self::Playing),
                2 => Some(Self::Paused),
                3 => Some(Self::Buffering),
                5 => Some(Self::Ready),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Tracks what the shell should show for playback and forwards commands.
#[derive(Debug)]
pub struct MediaControls<P> {
    player: P,
    current: Option<MediaSource>,
    playing: bool,
    volume: f32,
    loading: bool,
}

impl<P: MediaPlayer> MediaControls<P> {
    #[must_use]
    pub fn new(player: P) -> Self {
        Self {
            player,
            current: None,
            playing: false,
            volume: DEFAULT_VOLUME,
            loading: false,
        }
    }

    #[must_use]
    pub fn playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Hand the track (or nothing) to the player.
    ///
    /// Every load starts paused. Only a source that differs from the one
    /// already cued waits for the player to report `Ready`; re-cueing the same
    /// source keeps the element and its state.
    pub fn load(&mut self, track: Option<&Track>) {
        if self.playing {
            self.playing = false;
            self.player.set_playing(false);
        }

        let Some(track) = track else {
            self.current = None;
            self.loading = false;
            return;
        };

        let source = track.media_source();
        if matches!(source, MediaSource::Unsupported) {
            log::warn!("track {}: unsupported media url {:?}", track.id(), track.media_url());
            self.current = None;
            self.loading = false;
            return;
        }

        if self.current.as_ref() == Some(&source) {
            log::debug!("track {}: media already cued", track.id());
            return;
        }

        self.loading = true;
        self.player.load(&source);
        self.current = Some(source);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.player.set_playing(playing);
    }

    /// Clamp to `[0, 1]` and forward. NaN is ignored.
    ///
    /// Returns whether the volume was accepted.
    pub fn set_volume(&mut self, volume: f32) -> bool {
        if volume.is_nan() {
            return false;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.player.set_volume(self.volume);
        true
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Buffering => self.loading = true,
            MediaEvent::Ready => {
                // A freshly mounted element starts at its own default volume.
                self.loading = false;
                self.player.set_volume(self.volume);
            }
            MediaEvent::Playing => {
                self.loading = false;
                self.playing = true;
            }
            MediaEvent::Paused | MediaEvent::Ended => self.playing = false,
            MediaEvent::Error(message) => {
                // Playback errors never block the quiz.
                log::warn!("media player error: {message}");
                self.loading = false;
                self.playing = false;
            }
        }
    }
}
