//! Headless watch sessions
//!
//! Drives a [`PlayerController`] over a simulated media handle and wires
//! "playback started" into the signed-in user's watch history.

use crate::error::{CliError, Result};
use animagery_core::{Episode, KeyValueStore, Title};
use animagery_playback::{
    Clock, ManualClock, MediaEvent, MediaSource, NoFullscreen, PlayableMedia, PlaybackState,
    PlayerConfig, PlayerController, PlayerEvent,
};
use animagery_storage::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Source used when an episode carries no media locator
pub const DEFAULT_SAMPLE_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// Episode length assumed when the catalog gives none
pub const DEFAULT_EPISODE_SECS: f64 = 24.0 * 60.0;

/// Media handle that plays by advancing a counter
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    url: Option<String>,
    paused: bool,
    time: f64,
    duration: f64,
    volume: f64,
    rate: f64,
    muted: bool,
    released: bool,
}

impl SimulatedMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            url: None,
            paused: true,
            time: 0.0,
            duration,
            volume: 1.0,
            rate: 1.0,
            muted: false,
            released: false,
        }
    }

    /// Loaded locator
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Play `wall_secs` of wall time at the current rate
    ///
    /// Returns `true` when the end was reached.
    pub fn advance(&mut self, wall_secs: f64) -> bool {
        if self.paused || self.url.is_none() {
            return false;
        }

        self.time = (self.time + wall_secs * self.rate).min(self.duration);
        if self.time >= self.duration {
            self.paused = true;
            return true;
        }
        false
    }
}

impl PlayableMedia for SimulatedMedia {
    fn load(&mut self, url: &str) {
        self.url = Some(url.to_string());
        self.paused = true;
        self.time = 0.0;
        self.released = false;
    }

    fn play(&mut self) -> animagery_playback::Result<()> {
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
        self.time = seconds.clamp(0.0, self.duration);
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
        self.url = None;
        self.released = true;
    }
}

/// Parse a duration label such as `"24m"` or `"1h 5m"` into seconds
pub fn parse_duration_label(label: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut matched = false;

    for part in label.split_whitespace() {
        let (value, unit) = part.split_at(part.find(|c: char| !c.is_ascii_digit())?);
        let value: f64 = value.parse().ok()?;
        total += match unit {
            "h" => value * 3600.0,
            "m" | "min" => value * 60.0,
            "s" => value,
            _ => return None,
        };
        matched = true;
    }

    matched.then_some(total)
}

/// Player source for a title and optional episode
pub fn media_source(title: &Title, episode: Option<&Episode>) -> MediaSource {
    MediaSource {
        title_id: title.id.clone(),
        episode_id: episode.map(|e| e.id.clone()),
        url: episode
            .and_then(|e| e.video_url.clone())
            .unwrap_or_else(|| DEFAULT_SAMPLE_URL.to_string()),
    }
}

/// Pick an episode by id, or the first one when no id is given
pub fn pick_episode(title: &Title, episode_id: Option<&str>) -> Result<Option<Episode>> {
    let episodes = title.episodes_or_placeholder();

    match episode_id {
        Some(id) => episodes
            .into_iter()
            .find(|e| e.id == id)
            .map(Some)
            .ok_or_else(|| CliError::EpisodeNotFound {
                title: title.id.clone(),
                episode: id.to_string(),
            }),
        None => Ok(episodes.into_iter().next()),
    }
}

/// One open player bound to a session
pub struct WatchSession<'a, S: KeyValueStore> {
    player: PlayerController<SimulatedMedia, NoFullscreen>,
    session: &'a mut SessionStore<S>,
    title: Title,
    clock: ManualClock,
}

impl<'a, S: KeyValueStore> WatchSession<'a, S> {
    /// Open `title` in a fresh player and deliver the load notifications
    pub fn start(
        session: &'a mut SessionStore<S>,
        title: Title,
        episode: Option<&Episode>,
        config: PlayerConfig,
    ) -> Result<Self> {
        let duration = episode
            .and_then(|e| e.duration.as_deref())
            .and_then(parse_duration_label)
            .unwrap_or(DEFAULT_EPISODE_SECS);

        let clock = ManualClock::new();
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        let mut player =
            PlayerController::with_clock(SimulatedMedia::new(duration), NoFullscreen, config, shared);

        player.open(media_source(&title, episode))?;
        player.handle_media_event(MediaEvent::MetadataLoaded);
        if !player.media().is_paused() {
            player.handle_media_event(MediaEvent::Play);
        }

        info!(title_id = %title.id, episode_id = ?episode.map(|e| &e.id), "Watch session started");

        let mut watch = Self {
            player,
            session,
            title,
            clock,
        };
        watch.pump();
        Ok(watch)
    }

    /// Drain player events, recording the title as watched on first playback
    pub fn pump(&mut self) -> Vec<PlayerEvent> {
        let events = self.player.drain_events();

        for event in &events {
            if let PlayerEvent::PlaybackStarted { title_id, .. } = event {
                debug!(title_id = %title_id, "Playback started");
                if let Err(e) = self.session.record_watched(self.title.clone()) {
                    warn!(error = %e, "Failed to record watch history");
                }
            }
        }

        events
    }

    /// Let `seconds` of wall time pass in `step`-sized ticks
    ///
    /// Stops early at the end of the media.
    pub fn run_for(&mut self, seconds: f64, step: f64) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        let step = if step > 0.0 { step } else { 1.0 };
        let mut elapsed = 0.0;

        while elapsed < seconds {
            let slice = step.min(seconds - elapsed);
            elapsed += slice;

            self.clock.advance(Duration::from_secs_f64(slice));
            let ended = self.player.media_mut().advance(slice);
            self.player.handle_media_event(MediaEvent::TimeUpdate);
            if ended {
                self.player.handle_media_event(MediaEvent::Ended);
            }
            self.player.tick();
            events.extend(self.pump());

            if ended {
                break;
            }
        }

        events
    }

    pub fn player(&self) -> &PlayerController<SimulatedMedia, NoFullscreen> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController<SimulatedMedia, NoFullscreen> {
        &mut self.player
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Release the player and return its final state
    pub fn finish(mut self) -> PlaybackState {
        self.player.close();
        self.pump();
        self.player.snapshot()
    }
}
