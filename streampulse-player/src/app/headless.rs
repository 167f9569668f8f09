//! Logging host for running the player without a window.
//!
//! The surface, stream runtime and fullscreen primitive share one
//! [`HostState`]. Anything a real element would report asynchronously is
//! queued as a [`MediaEvent`] and handed to the controller by the driver.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use url::Url;

use crate::domains::player::MediaEvent;
use crate::domains::player::video_backend::{
    AdaptiveRuntime, FullscreenApi, MediaSurface, StreamSession, VideoError,
};

/// Simulated element state.
#[derive(Debug)]
pub struct HostState {
    pub source: Option<Url>,
    pub poster: Option<Url>,
    pub paused: bool,
    pub position_seconds: f64,
    /// Length reported once a source is attached
    pub media_duration_seconds: f64,
    pub attached: bool,
    pub volume: f64,
    pub muted: bool,
    pub fullscreen: bool,
    pub native_streams: bool,
    events: VecDeque<MediaEvent>,
}

impl HostState {
    fn new(media_duration_seconds: f64, native_streams: bool) -> Self {
        Self {
            source: None,
            poster: None,
            paused: true,
            position_seconds: 0.0,
            media_duration_seconds,
            attached: false,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            native_streams,
            events: VecDeque::new(),
        }
    }

    fn emit(&mut self, event: MediaEvent) {
        self.events.push_back(event);
    }

    fn reported_duration(&self) -> f64 {
        if self.attached {
            self.media_duration_seconds
        } else {
            f64::NAN
        }
    }
}

pub type SharedHost = Rc<RefCell<HostState>>;

/// Handle kept by the driver after the host parts move into the controller.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    state: SharedHost,
}

impl HeadlessHost {
    pub fn new(media_duration: Duration, native_streams: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState::new(
                media_duration.as_secs_f64(),
                native_streams,
            ))),
        }
    }

    pub fn surface(&self) -> Box<dyn MediaSurface> {
        Box::new(HeadlessSurface {
            host: Rc::clone(&self.state),
        })
    }

    pub fn runtime(&self, supported: bool) -> Box<dyn AdaptiveRuntime> {
        Box::new(HeadlessRuntime {
            host: Rc::clone(&self.state),
            supported,
        })
    }

    pub fn fullscreen(&self) -> Box<dyn FullscreenApi> {
        Box::new(HeadlessFullscreen {
            host: Rc::clone(&self.state),
        })
    }

    pub fn drain_events(&self) -> Vec<MediaEvent> {
        self.state.borrow_mut().events.drain(..).collect()
    }

    /// Advance the simulated playhead while playing and report progress.
    pub fn play_for(&self, elapsed: Duration) {
        let mut host = self.state.borrow_mut();
        if host.paused || !host.attached {
            return;
        }

        let duration = host.media_duration_seconds;
        host.position_seconds = (host.position_seconds + elapsed.as_secs_f64()).min(duration);
        let event = MediaEvent::TimeUpdate {
            position_seconds: host.position_seconds,
            duration_seconds: duration,
        };
        host.emit(event);

        if host.position_seconds >= duration {
            host.paused = true;
            host.emit(MediaEvent::Paused);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }
}

#[derive(Debug)]
struct HeadlessSurface {
    host: SharedHost,
}

impl MediaSurface for HeadlessSurface {
    fn set_source(&mut self, url: &Url) {
        info!("[Host] video.src = {url}");
        let mut host = self.host.borrow_mut();
        host.source = Some(url.clone());
        host.attached = true;
        // Loading a source leaves the element paused without a pause event.
        host.paused = true;
        host.position_seconds = 0.0;
        let duration = host.media_duration_seconds;
        host.emit(MediaEvent::LoadedMetadata {
            duration_seconds: duration,
        });
    }

    fn set_poster(&mut self, poster: Option<&Url>) {
        self.host.borrow_mut().poster = poster.cloned();
    }

    fn play(&mut self) -> Result<(), VideoError> {
        let mut host = self.host.borrow_mut();
        if !host.attached {
            return Err(VideoError::Playback("no source attached".to_string()));
        }
        if host.paused {
            host.paused = false;
            host.emit(MediaEvent::Played);
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut host = self.host.borrow_mut();
        if !host.paused {
            host.paused = true;
            host.emit(MediaEvent::Paused);
        }
    }

    fn paused(&self) -> bool {
        self.host.borrow().paused
    }

    fn current_time(&self) -> f64 {
        self.host.borrow().position_seconds
    }

    fn duration(&self) -> f64 {
        self.host.borrow().reported_duration()
    }

    fn seek(&mut self, seconds: f64) {
        debug!("[Host] seek to {seconds:.1}s");
        let mut host = self.host.borrow_mut();
        host.position_seconds = seconds;
        let duration = host.reported_duration();
        host.emit(MediaEvent::TimeUpdate {
            position_seconds: seconds,
            duration_seconds: duration,
        });
    }

    fn set_volume(&mut self, volume: f64) {
        self.host.borrow_mut().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.host.borrow_mut().muted = muted;
    }

    fn can_play_type(&self, mime: &str) -> bool {
        self.host.borrow().native_streams && mime.contains("mpegurl")
    }
}

#[derive(Debug)]
struct HeadlessRuntime {
    host: SharedHost,
    supported: bool,
}

impl AdaptiveRuntime for HeadlessRuntime {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create_session(&mut self) -> Result<Box<dyn StreamSession>, VideoError> {
        if !self.supported {
            return Err(VideoError::Runtime("runtime disabled".to_string()));
        }
        Ok(Box::new(HeadlessStream {
            host: Rc::clone(&self.host),
            manifest: None,
        }))
    }
}

#[derive(Debug)]
struct HeadlessStream {
    host: SharedHost,
    manifest: Option<Url>,
}

impl StreamSession for HeadlessStream {
    fn load_source(&mut self, url: &Url) -> Result<(), VideoError> {
        info!("[Host] loading manifest {url}");
        self.manifest = Some(url.clone());
        Ok(())
    }

    fn attach(&mut self, _surface: &mut dyn MediaSurface) -> Result<(), VideoError> {
        let manifest = self
            .manifest
            .clone()
            .ok_or_else(|| VideoError::Runtime("attach before load".to_string()))?;

        let mut host = self.host.borrow_mut();
        host.source = Some(manifest);
        host.attached = true;
        host.paused = true;
        host.position_seconds = 0.0;
        let duration = host.media_duration_seconds;
        host.emit(MediaEvent::LoadedMetadata {
            duration_seconds: duration,
        });
        host.emit(MediaEvent::ManifestParsed);
        Ok(())
    }

    fn destroy(&mut self) {
        info!("[Host] stream session destroyed");
        self.manifest = None;
    }
}

#[derive(Debug)]
struct HeadlessFullscreen {
    host: SharedHost,
}

impl FullscreenApi for HeadlessFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.host.borrow().fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), VideoError> {
        let mut host = self.host.borrow_mut();
        host.fullscreen = true;
        host.emit(MediaEvent::FullscreenChanged(true));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), VideoError> {
        let mut host = self.host.borrow_mut();
        host.fullscreen = false;
        host.emit(MediaEvent::FullscreenChanged(false));
        Ok(())
    }
}
