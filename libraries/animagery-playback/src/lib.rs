//! Animagery - Player Controller
//!
//! Platform-agnostic video player control for Animagery.
//!
//! This crate provides:
//! - A playback state machine mirrored from the host media handle
//! - Seeking (fractional and relative, clamped to the media length)
//! - Volume control with mute memory
//! - Playback speed, audio language and quality selection
//! - A skip-intro affordance over a fixed time window
//! - An idle timer that hides the controls while playing
//! - A keyboard command surface
//!
//! # Architecture
//!
//! `animagery-playback` never decodes video and never touches a platform
//! timer:
//! - The host media element sits behind [`PlayableMedia`]
//! - Full-screen presentation sits behind [`FullscreenHost`]
//! - Timers are entries in a [`Scheduler`] driven by a [`Clock`]
//!
//! The host forwards media notifications into
//! [`PlayerController::handle_media_event`], calls
//! [`PlayerController::tick`] from its loop, and drains
//! [`PlayerEvent`]s to redraw.
//!
//! # Example
//!
//! ```rust,no_run
//! use animagery_playback::{
//!     MediaEvent, MediaSource, NoFullscreen, PlayableMedia, PlayerConfig, PlayerController,
//!     PlayerEvent, Result,
//! };
//!
//! struct HostVideo { /* platform handle */ }
//!
//! impl PlayableMedia for HostVideo {
//!     fn load(&mut self, _url: &str) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn is_paused(&self) -> bool { false }
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn duration(&self) -> f64 { 1440.0 }
//!     fn volume(&self) -> f64 { 1.0 }
//!     fn set_volume(&mut self, _level: f64) {}
//!     fn playback_rate(&self) -> f64 { 1.0 }
//!     fn set_playback_rate(&mut self, _rate: f64) {}
//!     fn is_muted(&self) -> bool { false }
//!     fn set_muted(&mut self, _muted: bool) {}
//! }
//!
//! let mut player = PlayerController::new(HostVideo {}, NoFullscreen, PlayerConfig::default());
//! player
//!     .open(MediaSource {
//!         title_id: "frieren".to_string(),
//!         episode_id: Some("s1e1".to_string()),
//!         url: "https://cdn.example/frieren/1.mp4".to_string(),
//!     })
//!     .ok();
//!
//! player.handle_media_event(MediaEvent::MetadataLoaded);
//! player.handle_key("ArrowRight");
//!
//! for event in player.drain_events() {
//!     if let PlayerEvent::PlaybackStarted { title_id, .. } = event {
//!         println!("now watching {}", title_id);
//!     }
//! }
//! ```

mod controller;
mod error;
pub mod events;
mod keyboard;
mod media;
pub mod timer;
pub mod types;
mod volume;

// Public exports
pub use controller::PlayerController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use keyboard::KeyCommand;
pub use media::{FullscreenHost, MediaEvent, NoFullscreen, PlayableMedia};
pub use timer::{Clock, ManualClock, Scheduler, SystemClock, TimerHandle};
pub use types::{
    AudioTrack, IntroWindow, MediaSource, PlaybackRate, PlaybackState, PlayerConfig, PlayerPhase,
    VideoQuality,
};
pub use volume::Volume;
