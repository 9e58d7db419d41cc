//! Host media capabilities
//!
//! Abstracts the platform's media element and full-screen API so the
//! controller runs unchanged in a browser, a desktop shell, or a test.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A host-provided playable object
///
/// Mirrors the subset of an HTML media element the controller needs.
/// Implementors push [`MediaEvent`]s into
/// [`PlayerController::handle_media_event`](crate::PlayerController::handle_media_event)
/// as the host reports them; the controller reads the values it needs back
/// through the getters.
pub trait PlayableMedia {
    /// Assign a new source and start loading it
    fn load(&mut self, url: &str);

    /// Ask the host to start playback
    ///
    /// # Returns
    /// * `Ok(())` - Request accepted (a `Play` event follows)
    /// * `Err(PlaybackError::PlayRefused)` - Host policy blocked playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Whether the host considers playback paused
    fn is_paused(&self) -> bool;

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move the playhead
    fn set_current_time(&mut self, seconds: f64);

    /// Media length in seconds (`NaN` or 0 before metadata loads)
    fn duration(&self) -> f64;

    /// Output volume in `[0, 1]`
    fn volume(&self) -> f64;

    /// Set output volume
    fn set_volume(&mut self, level: f64);

    /// Playback speed multiplier
    fn playback_rate(&self) -> f64;

    /// Set playback speed
    fn set_playback_rate(&mut self, rate: f64);

    /// Whether output is muted
    fn is_muted(&self) -> bool;

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool);

    /// Drop the source and any decoder resources
    ///
    /// Called once when the player is torn down.
    fn release(&mut self) {
        self.pause();
    }
}

/// Host full-screen presentation
pub trait FullscreenHost {
    /// Ask the host to present the player container full screen
    ///
    /// Denial is expected under some platform policies and is reported as
    /// `Err(PlaybackError::FullscreenDenied)`.
    fn request_fullscreen(&mut self) -> Result<()>;

    /// Leave full-screen presentation
    fn exit_fullscreen(&mut self);
}

/// Notifications from the media handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Duration and dimensions are known
    MetadataLoaded,

    /// Playhead moved
    TimeUpdate,

    /// Playback was requested
    Play,

    /// Playback paused
    Pause,

    /// Playback stalled waiting for data
    Waiting,

    /// Playback resumed after a stall or start
    Playing,

    /// Playhead reached the end
    Ended,

    /// Source could not be loaded or decoded
    Error(String),
}

/// Full-screen host that never grants the request
///
/// For embedders without a full-screen API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFullscreen;

impl FullscreenHost for NoFullscreen {
    fn request_fullscreen(&mut self) -> Result<()> {
        Err(crate::error::PlaybackError::FullscreenDenied)
    }

    fn exit_fullscreen(&mut self) {}
}
