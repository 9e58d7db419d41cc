//! Player Events
//!
//! Event-based communication for UI synchronization. The controller buffers
//! one event per observable change; the host drains them after each call
//! and redraws.

use crate::types::{AudioTrack, PlaybackRate, PlayerPhase, VideoQuality};
use serde::{Deserialize, Serialize};

/// Events emitted by the player controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// State machine moved
    StateChanged {
        /// The new phase
        phase: PlayerPhase,
    },

    /// First transition into playing for an opened source
    ///
    /// Emitted once per `open`; the application records the title as
    /// watched when it sees this.
    PlaybackStarted {
        /// Title being watched
        title_id: String,
        /// Episode being watched, if any
        episode_id: Option<String>,
    },

    /// Playhead moved
    TimeUpdate {
        /// Current position in seconds
        position_secs: f64,
        /// Media length in seconds
        duration_secs: f64,
    },

    /// Media length became known
    DurationChanged {
        /// Media length in seconds
        duration_secs: f64,
    },

    /// Host started or stopped waiting for data
    BufferingChanged {
        /// Whether the spinner should show
        is_buffering: bool,
    },

    /// Volume changed
    VolumeChanged {
        /// New level (0.0-1.0)
        level: f64,
        /// Whether the level renders as muted
        is_muted: bool,
    },

    /// Playback speed changed
    RateChanged {
        /// New speed
        rate: PlaybackRate,
    },

    /// Full-screen presentation changed
    FullscreenChanged {
        /// Whether the container is full screen
        is_fullscreen: bool,
    },

    /// Control surface shown or hidden
    ControlsVisibilityChanged {
        /// Whether controls are shown
        visible: bool,
    },

    /// Skip-intro affordance shown or hidden
    SkipIntroAvailability {
        /// Whether the affordance is shown
        visible: bool,
    },

    /// Settings overlay opened or closed
    SettingsToggled {
        /// Whether the overlay is open
        open: bool,
    },

    /// Audio language selection changed
    AudioTrackChanged {
        /// Selected track
        track: AudioTrack,
    },

    /// Quality selection changed
    QualityChanged {
        /// Selected quality
        quality: VideoQuality,
    },

    /// Media failed to load; the session is terminal
    Unplayable {
        /// Message to show in place of the video
        message: String,
    },

    /// Controller released its media handle
    Closed,
}
