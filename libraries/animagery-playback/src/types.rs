//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Player state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// No media assigned
    Idle,

    /// Source assigned, waiting for metadata
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-episode
    Paused,

    /// Host is starved for data
    Buffering,

    /// Reached the end of the media
    Ended,
}

/// Allowed playback speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackRate {
    /// 0.5x
    Half,

    /// 1x
    #[default]
    Normal,

    /// 1.5x
    OneAndHalf,

    /// 2x
    Double,
}

impl PlaybackRate {
    /// Every rate offered by the settings overlay
    pub const ALL: [PlaybackRate; 4] = [
        PlaybackRate::Half,
        PlaybackRate::Normal,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    /// Speed multiplier handed to the media handle
    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::Half => 0.5,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }

    /// Map a multiplier back onto the allowed set
    pub fn from_f64(rate: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| (r.as_f64() - rate).abs() < f64::EPSILON)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.as_f64())
    }
}

/// Audio language choices in the settings overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioTrack {
    #[default]
    JapaneseOriginal,
    EnglishDub,
    HindiDub,
    ChineseMandarin,
}

impl AudioTrack {
    /// Every track offered by the settings overlay
    pub const ALL: [AudioTrack; 4] = [
        AudioTrack::JapaneseOriginal,
        AudioTrack::EnglishDub,
        AudioTrack::HindiDub,
        AudioTrack::ChineseMandarin,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            AudioTrack::JapaneseOriginal => "Japanese (Original)",
            AudioTrack::EnglishDub => "English (Dub)",
            AudioTrack::HindiDub => "Hindi (Dub)",
            AudioTrack::ChineseMandarin => "Chinese (Mandarin)",
        }
    }
}

/// Quality choices in the settings overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VideoQuality {
    #[default]
    P1080,
    P720,
    P480,
}

impl VideoQuality {
    /// Every quality offered by the settings overlay
    pub const ALL: [VideoQuality; 3] = [VideoQuality::P1080, VideoQuality::P720, VideoQuality::P480];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            VideoQuality::P1080 => "1080p",
            VideoQuality::P720 => "720p",
            VideoQuality::P480 => "480p",
        }
    }
}

/// Playback interval in which the "skip intro" affordance is offered
///
/// A fixed heuristic, not content-aware detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntroWindow {
    /// First second of the window (inclusive)
    pub start_secs: f64,

    /// End of the window (exclusive); skipping jumps here
    pub end_secs: f64,
}

impl IntroWindow {
    /// Whether `position` falls inside the window
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start_secs && position < self.end_secs
    }
}

impl Default for IntroWindow {
    fn default() -> Self {
        Self {
            start_secs: 60.0,
            end_secs: 150.0,
        }
    }
}

/// Mirrored playback state for one open player
///
/// Read by the UI layer; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// State machine position
    pub phase: PlayerPhase,

    /// Whether the host reports active playback
    pub is_playing: bool,

    /// Position in seconds, `<= duration_secs` once duration is known
    pub current_time_secs: f64,

    /// Media length in seconds, 0 until metadata loads
    pub duration_secs: f64,

    /// Volume in `[0, 1]`; 0 renders as muted
    pub volume: f64,

    /// Selected speed
    pub playback_rate: PlaybackRate,

    /// Whether the container is presented full screen
    pub is_fullscreen: bool,

    /// Whether the control surface is shown
    pub controls_visible: bool,

    /// Whether the settings overlay is open
    pub settings_open: bool,

    /// Whether the host is waiting for data
    pub is_buffering: bool,

    /// Whether the "skip intro" affordance is shown
    pub skip_intro_visible: bool,

    /// Selected audio language
    pub audio_track: AudioTrack,

    /// Selected quality
    pub quality: VideoQuality,

    /// Load failure message; once set, the session is terminal
    pub unplayable: Option<String>,
}

/// Media to open in the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Title being watched
    pub title_id: String,

    /// Episode being watched, if one was picked
    pub episode_id: Option<String>,

    /// Locator handed to the media handle
    pub url: String,
}

/// Configuration for the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Attempt to start playback as soon as a source is opened (default: true)
    pub autoplay: bool,

    /// Idle time before controls hide while playing (default: 3000 ms)
    pub controls_hide_ms: u64,

    /// Arrow-key seek distance in seconds (default: 10)
    pub seek_step_secs: f64,

    /// Skip-intro window (default: 60s..150s)
    pub intro: IntroWindow,

    /// Initial volume in `[0, 1]` (default: 1.0)
    pub volume: f64,
}

impl PlayerConfig {
    /// Idle delay as a `Duration`
    pub fn controls_hide_delay(&self) -> Duration {
        Duration::from_millis(self.controls_hide_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            controls_hide_ms: 3000,
            seek_step_secs: 10.0,
            intro: IntroWindow::default(),
            volume: 1.0,
        }
    }
}
