//! Test harness for the playback controller
//!
//! [`FakeHost`] records every call the controller makes on the host and
//! never emits events on its own; tests deliver `MediaEvent`s explicitly the
//! way a real element would after the fact.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use streampulse_config::PlayerConfig;
use streampulse_model::{MediaSource, TrustedMarkup};
use streampulse_player::domains::player::video_backend::{
    AdaptiveRuntime, FullscreenApi, MediaSurface, StreamSession, VideoError,
};
use streampulse_player::domains::player::{
    MediaEvent, PlayerController, PlayerNotice, PlayerUpdate,
};
use url::Url;

pub const PROGRESSIVE_URL: &str = "https://cdn.example.com/films/neon-horizon.mp4";
pub const ADAPTIVE_URL: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.M3U8";
pub const POSTER_URL: &str = "https://picsum.photos/id/10/800/450";

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetSource(Url),
    SetPoster(Option<Url>),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
    CreateSession,
    LoadSource(Url),
    Attach,
    Destroy,
    RequestFullscreen,
    ExitFullscreen,
}

#[derive(Debug)]
pub struct FakeState {
    pub paused: bool,
    pub duration: f64,
    pub current_time: f64,
    pub fullscreen: bool,
    pub runtime_supported: bool,
    pub native_streams: bool,
    pub reject_play: bool,
    pub fail_fullscreen: bool,
    pub calls: Vec<HostCall>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            paused: true,
            duration: f64::NAN,
            current_time: 0.0,
            fullscreen: false,
            runtime_supported: true,
            native_streams: false,
            reject_play: false,
            fail_fullscreen: false,
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(self, f: impl FnOnce(&mut FakeState)) -> Self {
        f(&mut self.state.borrow_mut());
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.state.borrow().calls.iter().filter(|c| *c == call).count()
    }

    pub fn set_duration(&self, duration: f64) {
        self.state.borrow_mut().duration = duration;
    }

    fn record(&self, call: HostCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl MediaSurface for FakeHost {
    fn set_source(&mut self, url: &Url) {
        self.record(HostCall::SetSource(url.clone()));
        self.state.borrow_mut().paused = true;
    }

    fn set_poster(&mut self, poster: Option<&Url>) {
        self.record(HostCall::SetPoster(poster.cloned()));
    }

    fn play(&mut self) -> Result<(), VideoError> {
        self.record(HostCall::Play);
        let mut state = self.state.borrow_mut();
        if state.reject_play {
            return Err(VideoError::Playback("autoplay blocked".into()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.record(HostCall::Pause);
        self.state.borrow_mut().paused = true;
    }

    fn paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    fn seek(&mut self, seconds: f64) {
        self.record(HostCall::Seek(seconds));
        self.state.borrow_mut().current_time = seconds;
    }

    fn set_volume(&mut self, volume: f64) {
        self.record(HostCall::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.record(HostCall::SetMuted(muted));
    }

    fn can_play_type(&self, mime: &str) -> bool {
        self.state.borrow().native_streams && mime == "application/vnd.apple.mpegurl"
    }
}

impl AdaptiveRuntime for FakeHost {
    fn is_supported(&self) -> bool {
        self.state.borrow().runtime_supported
    }

    fn create_session(&mut self) -> Result<Box<dyn StreamSession>, VideoError> {
        self.record(HostCall::CreateSession);
        Ok(Box::new(self.clone()))
    }
}

impl StreamSession for FakeHost {
    fn load_source(&mut self, url: &Url) -> Result<(), VideoError> {
        self.record(HostCall::LoadSource(url.clone()));
        Ok(())
    }

    fn attach(&mut self, _surface: &mut dyn MediaSurface) -> Result<(), VideoError> {
        self.record(HostCall::Attach);
        Ok(())
    }

    fn destroy(&mut self) {
        self.record(HostCall::Destroy);
    }
}

impl FullscreenApi for FakeHost {
    fn is_fullscreen(&self) -> bool {
        self.state.borrow().fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), VideoError> {
        self.record(HostCall::RequestFullscreen);
        if self.state.borrow().fail_fullscreen {
            return Err(VideoError::Fullscreen("permission denied".into()));
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), VideoError> {
        self.record(HostCall::ExitFullscreen);
        Ok(())
    }
}

/// Controller wired to a [`FakeHost`].
#[derive(Debug)]
pub struct Harness {
    pub controller: PlayerController,
    pub host: FakeHost,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(PlayerConfig::default(), FakeHost::new())
    }

    pub fn with_config(config: PlayerConfig) -> Self {
        Self::with(config, FakeHost::new())
    }

    pub fn with(config: PlayerConfig, host: FakeHost) -> Self {
        let controller = PlayerController::new(
            config,
            Box::new(host.clone()),
            Box::new(host.clone()),
            Box::new(host.clone()),
        );
        Self { controller, host }
    }

    pub fn open_progressive(&mut self) -> PlayerUpdate {
        let source = MediaSource::parse(PROGRESSIVE_URL).unwrap();
        self.controller
            .open(source, Some(Url::parse(POSTER_URL).unwrap()))
    }

    pub fn open_adaptive(&mut self) -> PlayerUpdate {
        self.controller
            .open_url(Url::parse(ADAPTIVE_URL).unwrap(), None)
    }

    /// Toggle into playback and deliver the resulting `Played` event.
    pub fn play(&mut self) -> PlayerUpdate {
        assert!(self.host.state.borrow().paused, "already playing");
        let mut update = self.controller.toggle_play();
        update.extend(self.controller.handle_media_event(MediaEvent::Played));
        update
    }

    pub fn pause(&mut self) -> PlayerUpdate {
        assert!(!self.host.state.borrow().paused, "already paused");
        let mut update = self.controller.toggle_play();
        update.extend(self.controller.handle_media_event(MediaEvent::Paused));
        update
    }

    pub fn advance_secs(&mut self, secs: u64) -> PlayerUpdate {
        self.controller.advance(Duration::from_secs(secs))
    }

    pub fn advance_ms(&mut self, ms: u64) -> PlayerUpdate {
        self.controller.advance(Duration::from_millis(ms))
    }
}

pub fn ad() -> TrustedMarkup {
    TrustedMarkup::trust("<div>ad</div>")
}

/// Countdown values announced by `update`, in order.
pub fn countdown_values(update: &PlayerUpdate) -> Vec<u32> {
    update
        .notices
        .iter()
        .filter_map(|notice| match notice {
            PlayerNotice::AdBreakChanged(state) => Some(state.countdown_remaining),
            _ => None,
        })
        .collect()
}
