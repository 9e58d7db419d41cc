//! Player controller - core orchestration
//!
//! Mirrors the host media handle into a [`PlaybackState`], owns the
//! controls-visibility timer and translates UI commands into media calls.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    keyboard::KeyCommand,
    media::{FullscreenHost, MediaEvent, PlayableMedia},
    timer::{Clock, Scheduler, SystemClock, TimerHandle},
    types::{
        AudioTrack, MediaSource, PlaybackRate, PlaybackState, PlayerConfig, PlayerPhase,
        VideoQuality,
    },
    volume::Volume,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Scheduled controller work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    HideControls,
}

/// Player controller
///
/// Single-threaded: the host calls into it from its event loop, delivers
/// media notifications through [`handle_media_event`](Self::handle_media_event)
/// and drives timers with [`tick`](Self::tick).
pub struct PlayerController<M: PlayableMedia, F: FullscreenHost> {
    media: M,
    fullscreen: F,
    config: PlayerConfig,

    phase: PlayerPhase,
    source: Option<MediaSource>,
    current_time: f64,
    duration: f64,

    volume: Volume,
    rate: PlaybackRate,
    audio_track: AudioTrack,
    quality: VideoQuality,

    is_playing: bool,
    is_fullscreen: bool,
    controls_visible: bool,
    settings_open: bool,
    is_buffering: bool,
    skip_intro_visible: bool,

    /// Load failure; terminal for the current source
    unplayable: Option<String>,

    /// Whether `PlaybackStarted` went out for the current source
    started_reported: bool,

    scheduler: Scheduler<TimerKind>,
    hide_timer: Option<TimerHandle>,
    events: VecDeque<PlayerEvent>,
    closed: bool,
}

impl<M: PlayableMedia, F: FullscreenHost> PlayerController<M, F> {
    /// Create a controller on the wall clock
    pub fn new(media: M, fullscreen: F, config: PlayerConfig) -> Self {
        Self::with_clock(media, fullscreen, config, Arc::new(SystemClock::new()))
    }

    /// Create a controller on a caller-provided clock
    pub fn with_clock(media: M, fullscreen: F, config: PlayerConfig, clock: Arc<dyn Clock>) -> Self {
        let volume = Volume::new(config.volume);

        Self {
            media,
            fullscreen,
            config,
            phase: PlayerPhase::Idle,
            source: None,
            current_time: 0.0,
            duration: 0.0,
            volume,
            rate: PlaybackRate::default(),
            audio_track: AudioTrack::default(),
            quality: VideoQuality::default(),
            is_playing: false,
            is_fullscreen: false,
            controls_visible: true,
            settings_open: false,
            is_buffering: false,
            skip_intro_visible: false,
            unplayable: None,
            started_reported: false,
            scheduler: Scheduler::new(clock),
            hide_timer: None,
            events: VecDeque::new(),
            closed: false,
        }
    }

    // ===== Lifecycle =====

    /// Assign a new source
    ///
    /// Resets position, duration and the error condition. Volume, speed and
    /// the settings selections carry over. Attempts autoplay when configured;
    /// a refusal leaves the player paused once metadata arrives.
    pub fn open(&mut self, source: MediaSource) -> Result<()> {
        if self.closed {
            return Err(PlaybackError::Closed);
        }

        debug!(title_id = %source.title_id, url = %source.url, "Opening source");

        self.current_time = 0.0;
        self.duration = 0.0;
        self.is_playing = false;
        self.is_buffering = false;
        self.settings_open = false;
        self.unplayable = None;
        self.started_reported = false;
        self.set_skip_intro_visible(false);

        self.media.load(&source.url);
        self.media.set_volume(self.volume.level());
        self.media.set_muted(self.volume.is_muted());
        self.media.set_playback_rate(self.rate.as_f64());
        self.source = Some(source);
        self.set_phase(PlayerPhase::Loading);

        if self.config.autoplay {
            if let Err(e) = self.media.play() {
                warn!(error = %e, "Autoplay refused");
            }
        }

        self.on_activity();
        Ok(())
    }

    /// Release the media handle and cancel every timer
    ///
    /// A closed controller ignores all further calls and events.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        if self.is_fullscreen {
            self.fullscreen.exit_fullscreen();
            self.is_fullscreen = false;
        }

        self.media.release();
        self.scheduler.cancel_all();
        self.hide_timer = None;
        self.is_playing = false;
        self.is_buffering = false;
        self.closed = true;

        debug!("Player closed");
        self.events.push_back(PlayerEvent::Closed);
    }

    // ===== Media notifications =====

    /// Apply a notification from the media handle
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.closed || self.unplayable.is_some() {
            return;
        }

        match event {
            MediaEvent::MetadataLoaded => {
                self.duration = sanitize_seconds(self.media.duration());
                self.events.push_back(PlayerEvent::DurationChanged {
                    duration_secs: self.duration,
                });
                self.sync_time();

                if self.phase == PlayerPhase::Loading {
                    if self.media.is_paused() {
                        self.is_playing = false;
                        self.set_phase(PlayerPhase::Paused);
                    } else {
                        self.is_playing = true;
                        self.enter_playing();
                    }
                }
            }
            MediaEvent::TimeUpdate => self.sync_time(),
            MediaEvent::Play => {
                self.is_playing = true;
                if self.phase != PlayerPhase::Buffering {
                    self.enter_playing();
                }
            }
            MediaEvent::Pause => {
                self.is_playing = false;
                self.set_buffering(false);
                self.set_phase(PlayerPhase::Paused);
                self.show_controls();
            }
            MediaEvent::Waiting => {
                self.set_buffering(true);
                if matches!(self.phase, PlayerPhase::Playing | PlayerPhase::Paused) {
                    self.set_phase(PlayerPhase::Buffering);
                }
            }
            MediaEvent::Playing => {
                self.set_buffering(false);
                self.is_playing = true;
                self.enter_playing();
            }
            MediaEvent::Ended => {
                self.is_playing = false;
                self.set_buffering(false);
                self.set_phase(PlayerPhase::Ended);
                self.show_controls();
            }
            MediaEvent::Error(message) => {
                error!(message = %message, "Media unplayable");
                self.is_playing = false;
                self.set_buffering(false);
                self.set_skip_intro_visible(false);
                self.cancel_hide_timer();
                self.show_controls();
                self.unplayable = Some(message.clone());
                self.events.push_back(PlayerEvent::Unplayable { message });
            }
        }
    }

    // ===== Playback commands =====

    /// Play if paused, pause if playing
    pub fn toggle_play(&mut self) {
        if self.is_inert() {
            return;
        }

        if self.media.is_paused() {
            if let Err(e) = self.media.play() {
                warn!(error = %e, "Play refused");
            }
        } else {
            self.media.pause();
        }

        self.is_playing = !self.media.is_paused();
    }

    /// Jump to a fraction of the duration
    ///
    /// The fraction is clamped to `[0, 1]`. Does nothing before metadata
    /// has loaded.
    pub fn seek(&mut self, fraction: f64) {
        if self.is_inert() || self.duration <= 0.0 {
            return;
        }

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.move_playhead(fraction * self.duration);
    }

    /// Move the playhead relative to the current position
    ///
    /// Clamped to `[0, duration]`; unbounded above while the duration is
    /// still unknown.
    pub fn seek_by(&mut self, delta_secs: f64) {
        if self.is_inert() || delta_secs.is_nan() {
            return;
        }

        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            f64::INFINITY
        };
        self.move_playhead((self.current_time + delta_secs).clamp(0.0, upper));
    }

    /// Jump past the intro
    ///
    /// Only acts while the affordance is visible. Lands on the intro end, or
    /// on the last frame of media shorter than that. Returns whether it did.
    pub fn skip_intro(&mut self) -> bool {
        if self.is_inert() || !self.skip_intro_visible {
            return false;
        }

        debug!(to = self.config.intro.end_secs, "Skipping intro");
        self.move_playhead(self.config.intro.end_secs);
        true
    }

    // ===== Volume and speed =====

    /// Set volume level, clamped to `[0, 1]`
    pub fn set_volume(&mut self, level: f64) {
        if self.is_inert() {
            return;
        }

        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Toggle between silence and the last audible level
    pub fn toggle_mute(&mut self) {
        if self.is_inert() {
            return;
        }

        self.volume.toggle_mute();
        self.apply_volume();
    }

    /// Change playback speed
    pub fn set_playback_rate(&mut self, rate: PlaybackRate) {
        if self.is_inert() {
            return;
        }

        self.rate = rate;
        self.media.set_playback_rate(rate.as_f64());
        self.events.push_back(PlayerEvent::RateChanged { rate });
    }

    // ===== Presentation =====

    /// Enter or leave full screen
    ///
    /// A denied request leaves the player windowed.
    pub fn toggle_fullscreen(&mut self) {
        if self.closed {
            return;
        }

        if self.is_fullscreen {
            self.fullscreen.exit_fullscreen();
            self.set_fullscreen(false);
            return;
        }

        match self.fullscreen.request_fullscreen() {
            Ok(()) => self.set_fullscreen(true),
            Err(e) => debug!(error = %e, "Fullscreen request not granted"),
        }
    }

    /// Host left full screen on its own (escape key)
    pub fn on_fullscreen_exited(&mut self) {
        if !self.closed {
            self.set_fullscreen(false);
        }
    }

    /// Open or close the settings overlay
    pub fn toggle_settings(&mut self) {
        if self.closed {
            return;
        }

        self.settings_open = !self.settings_open;
        self.events.push_back(PlayerEvent::SettingsToggled {
            open: self.settings_open,
        });
        self.on_activity();
    }

    /// Pick an audio language
    pub fn select_audio_track(&mut self, track: AudioTrack) {
        if self.closed || self.audio_track == track {
            return;
        }

        self.audio_track = track;
        self.events.push_back(PlayerEvent::AudioTrackChanged { track });
    }

    /// Pick a quality
    pub fn select_quality(&mut self, quality: VideoQuality) {
        if self.closed || self.quality == quality {
            return;
        }

        self.quality = quality;
        self.events.push_back(PlayerEvent::QualityChanged { quality });
    }

    // ===== Activity and timers =====

    /// Pointer moved, clicked or a key was pressed
    ///
    /// Shows the controls and restarts the idle countdown.
    pub fn on_activity(&mut self) {
        if self.closed {
            return;
        }

        self.show_controls();
        self.cancel_hide_timer();

        let delay = self.config.controls_hide_delay();
        self.hide_timer = Some(self.scheduler.schedule(delay, TimerKind::HideControls));
    }

    /// Dispatch a key press
    ///
    /// Every key counts as activity. Returns whether the key was bound.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.closed {
            return false;
        }

        self.on_activity();

        let Some(command) = KeyCommand::from_key(key) else {
            return false;
        };

        let step = self.config.seek_step_secs;
        match command {
            KeyCommand::TogglePlay => self.toggle_play(),
            KeyCommand::ToggleFullscreen => self.toggle_fullscreen(),
            KeyCommand::ToggleMute => self.toggle_mute(),
            KeyCommand::SeekForward => self.seek_by(step),
            KeyCommand::SeekBackward => self.seek_by(-step),
        }
        true
    }

    /// Fire due timers
    pub fn tick(&mut self) {
        if self.closed {
            return;
        }

        for (handle, kind) in self.scheduler.take_due() {
            match kind {
                TimerKind::HideControls => {
                    if self.hide_timer == Some(handle) {
                        self.hide_timer = None;
                    }
                    if self.is_playing && !self.settings_open && self.unplayable.is_none() {
                        debug!("Hiding idle controls");
                        self.set_controls_visible(false);
                    }
                }
            }
        }
    }

    /// Time until the next timer is due, for hosts that sleep between ticks
    pub fn next_timer_in(&self) -> Option<Duration> {
        let deadline = self.scheduler.next_deadline()?;
        Some(deadline.saturating_sub(self.scheduler.now()))
    }

    // ===== Observation =====

    /// Current mirrored state
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            phase: self.phase,
            is_playing: self.is_playing,
            current_time_secs: self.current_time,
            duration_secs: self.duration,
            volume: self.volume.level(),
            playback_rate: self.rate,
            is_fullscreen: self.is_fullscreen,
            controls_visible: self.controls_visible,
            settings_open: self.settings_open,
            is_buffering: self.is_buffering,
            skip_intro_visible: self.skip_intro_visible,
            audio_track: self.audio_track,
            quality: self.quality,
            unplayable: self.unplayable.clone(),
        }
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.events.drain(..).collect()
    }

    /// Terminal error for the current source, if any
    pub fn error(&self) -> Option<PlaybackError> {
        self.unplayable.clone().map(PlaybackError::Unplayable)
    }

    /// Current phase
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Current source
    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    /// Whether [`close`](Self::close) has run
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Media handle
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable media handle, for hosts that drive it directly
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Full-screen host
    pub fn fullscreen_host(&self) -> &F {
        &self.fullscreen
    }

    // ===== Internals =====

    /// Commands other than presentation are ignored once unplayable or closed
    fn is_inert(&self) -> bool {
        self.closed || self.unplayable.is_some() || self.source.is_none()
    }

    fn enter_playing(&mut self) {
        self.set_phase(PlayerPhase::Playing);

        if !self.started_reported {
            if let Some(source) = &self.source {
                self.started_reported = true;
                self.events.push_back(PlayerEvent::PlaybackStarted {
                    title_id: source.title_id.clone(),
                    episode_id: source.episode_id.clone(),
                });
            }
        }
    }

    fn set_phase(&mut self, phase: PlayerPhase) {
        if self.phase == phase {
            return;
        }

        debug!(from = ?self.phase, to = ?phase, "Player phase changed");
        self.phase = phase;
        self.events.push_back(PlayerEvent::StateChanged { phase });
    }

    fn sync_time(&mut self) {
        let mut position = sanitize_seconds(self.media.current_time());
        if self.duration > 0.0 {
            position = position.min(self.duration);
        }
        self.set_position(position);
    }

    /// Seek the handle; never past a known duration
    fn move_playhead(&mut self, position: f64) {
        let position = if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        };
        self.media.set_current_time(position);
        self.set_position(position);
    }

    /// Consecutive time updates collapse into the latest one
    fn set_position(&mut self, position: f64) {
        self.current_time = position;

        let update = PlayerEvent::TimeUpdate {
            position_secs: position,
            duration_secs: self.duration,
        };
        match self.events.back_mut() {
            Some(last @ PlayerEvent::TimeUpdate { .. }) => *last = update,
            _ => self.events.push_back(update),
        }

        let at_end = self.duration > 0.0 && position >= self.duration;
        let visible = self.config.intro.contains(position) && !at_end;
        self.set_skip_intro_visible(visible);
    }

    fn set_skip_intro_visible(&mut self, visible: bool) {
        if self.skip_intro_visible != visible {
            self.skip_intro_visible = visible;
            self.events
                .push_back(PlayerEvent::SkipIntroAvailability { visible });
        }
    }

    fn set_buffering(&mut self, is_buffering: bool) {
        if self.is_buffering != is_buffering {
            self.is_buffering = is_buffering;
            self.events
                .push_back(PlayerEvent::BufferingChanged { is_buffering });
        }
    }

    fn set_fullscreen(&mut self, is_fullscreen: bool) {
        if self.is_fullscreen != is_fullscreen {
            self.is_fullscreen = is_fullscreen;
            self.events
                .push_back(PlayerEvent::FullscreenChanged { is_fullscreen });
        }
    }

    fn show_controls(&mut self) {
        self.set_controls_visible(true);
    }

    fn set_controls_visible(&mut self, visible: bool) {
        if self.controls_visible != visible {
            self.controls_visible = visible;
            self.events
                .push_back(PlayerEvent::ControlsVisibilityChanged { visible });
        }
    }

    fn cancel_hide_timer(&mut self) {
        if let Some(handle) = self.hide_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn apply_volume(&mut self) {
        let level = self.volume.level();
        let is_muted = self.volume.is_muted();

        self.media.set_volume(level);
        self.media.set_muted(is_muted);
        self.events
            .push_back(PlayerEvent::VolumeChanged { level, is_muted });
    }
}

/// Host-reported seconds with `NaN`/negative collapsed to 0
fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::NoFullscreen;
    use crate::timer::ManualClock;

    /// Minimal handle that accepts every command
    #[derive(Default)]
    struct StubMedia {
        paused: bool,
        time: f64,
        duration: f64,
        volume: f64,
        rate: f64,
        muted: bool,
    }

    impl PlayableMedia for StubMedia {
        fn load(&mut self, _url: &str) {
            self.paused = true;
            self.time = 0.0;
        }
        fn play(&mut self) -> Result<()> {
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
    }

    fn controller() -> PlayerController<StubMedia, NoFullscreen> {
        let media = StubMedia {
            duration: 600.0,
            ..Default::default()
        };
        PlayerController::with_clock(
            media,
            NoFullscreen,
            PlayerConfig::default(),
            Arc::new(ManualClock::new()),
        )
    }

    fn source() -> MediaSource {
        MediaSource {
            title_id: "t1".to_string(),
            episode_id: None,
            url: "https://example.test/video.mp4".to_string(),
        }
    }

    #[test]
    fn idle_until_opened() {
        let mut player = controller();
        assert_eq!(player.phase(), PlayerPhase::Idle);

        // No source yet
        player.toggle_play();
        player.seek_by(10.0);
        assert!(!player.snapshot().is_playing);
        assert_eq!(player.snapshot().current_time_secs, 0.0);
    }

    #[test]
    fn open_autoplays_and_reports_start_once() {
        let mut player = controller();
        player.open(source()).unwrap();
        assert_eq!(player.phase(), PlayerPhase::Loading);
        assert!(!player.media().paused);

        player.handle_media_event(MediaEvent::MetadataLoaded);
        player.handle_media_event(MediaEvent::Play);
        player.handle_media_event(MediaEvent::Playing);

        let started = player
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlayerEvent::PlaybackStarted { .. }))
            .count();
        assert_eq!(started, 1);
        assert_eq!(player.phase(), PlayerPhase::Playing);
    }

    #[test]
    fn fullscreen_denied_stays_windowed() {
        let mut player = controller();
        player.open(source()).unwrap();
        player.toggle_fullscreen();
        assert!(!player.snapshot().is_fullscreen);
    }

    #[test]
    fn sanitize_rejects_nan_and_negative() {
        assert_eq!(sanitize_seconds(f64::NAN), 0.0);
        assert_eq!(sanitize_seconds(-3.0), 0.0);
        assert_eq!(sanitize_seconds(f64::INFINITY), 0.0);
        assert_eq!(sanitize_seconds(12.5), 12.5);
    }

    #[test]
    fn open_after_close_is_rejected() {
        let mut player = controller();
        player.close();
        assert_eq!(player.open(source()), Err(PlaybackError::Closed));
    }
}
