//! Shared fakes for player controller tests

#![allow(dead_code)]

use animagery_playback::{
    FullscreenHost, ManualClock, MediaSource, PlayableMedia, PlaybackError, PlayerConfig,
    PlayerController, Result,
};
use std::sync::Arc;

/// In-memory media handle
///
/// Behaves like a well-mannered media element: `play` unpauses unless
/// `refuse_play` is set, and every command is recorded for assertions.
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub paused: bool,
    pub time: f64,
    pub duration: f64,
    pub volume: f64,
    pub rate: f64,
    pub muted: bool,
    pub refuse_play: bool,
    pub loaded: Vec<String>,
    pub play_calls: usize,
    pub released: bool,
}

impl FakeMedia {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            paused: true,
            duration,
            volume: 1.0,
            rate: 1.0,
            ..Default::default()
        }
    }
}

impl PlayableMedia for FakeMedia {
    fn load(&mut self, url: &str) {
        self.loaded.push(url.to_string());
        self.paused = true;
        self.time = 0.0;
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.refuse_play {
            return Err(PlaybackError::PlayRefused(
                "autoplay blocked by host".to_string(),
            ));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn release(&mut self) {
        self.paused = true;
        self.released = true;
    }
}

/// Full-screen host with a switchable policy
#[derive(Debug, Default)]
pub struct FakeFullscreen {
    pub deny: bool,
    pub active: bool,
    pub requests: usize,
}

impl FullscreenHost for FakeFullscreen {
    fn request_fullscreen(&mut self) -> Result<()> {
        self.requests += 1;
        if self.deny {
            return Err(PlaybackError::FullscreenDenied);
        }
        self.active = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        self.active = false;
    }
}

pub type TestPlayer = PlayerController<FakeMedia, FakeFullscreen>;

pub fn source(title_id: &str) -> MediaSource {
    MediaSource {
        title_id: title_id.to_string(),
        episode_id: Some(format!("{}-e1", title_id)),
        url: format!("https://cdn.test/{}/1.mp4", title_id),
    }
}

/// Controller on a manual clock over a 24 minute episode
pub fn player_with(config: PlayerConfig, media: FakeMedia) -> (TestPlayer, ManualClock) {
    let clock = ManualClock::new();
    let player = PlayerController::with_clock(
        media,
        FakeFullscreen::default(),
        config,
        Arc::new(clock.clone()),
    );
    (player, clock)
}

pub fn player() -> (TestPlayer, ManualClock) {
    player_with(PlayerConfig::default(), FakeMedia::with_duration(1440.0))
}

/// Open a source and walk the handle into steady playback
pub fn playing(title_id: &str) -> (TestPlayer, ManualClock) {
    let (mut p, clock) = player();
    p.open(source(title_id)).unwrap();
    p.handle_media_event(animagery_playback::MediaEvent::MetadataLoaded);
    p.handle_media_event(animagery_playback::MediaEvent::Play);
    p.handle_media_event(animagery_playback::MediaEvent::Playing);
    p.drain_events();
    (p, clock)
}

/// Move the fake playhead and tell the controller
pub fn advance_playhead(p: &mut TestPlayer, seconds: f64) {
    p.media_mut().time = seconds;
    p.handle_media_event(animagery_playback::MediaEvent::TimeUpdate);
}
