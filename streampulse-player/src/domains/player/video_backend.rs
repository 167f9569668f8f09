//! Host abstraction layer
//!
//! The controller never touches a concrete video element. A browser shell,
//! a native toolkit or a test double implements these traits:
//! - [`MediaSurface`]: the element that renders frames and reports position
//! - [`AdaptiveRuntime`] / [`StreamSession`]: manifest-driven streaming
//! - [`FullscreenApi`]: the host document's fullscreen primitive
//!
//! Asynchronous host signals (play/pause, progress, manifest parsed,
//! fullscreen change) come back to the controller as
//! [`MediaEvent`](super::messages::MediaEvent)s.

use thiserror::Error;
use url::Url;

/// Unified error type for host operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VideoError {
    #[error("no adaptive runtime available and the surface cannot play {mime}")]
    Unsupported { mime: String },

    #[error("stream runtime error: {0}")]
    Runtime(String),

    #[error("playback request rejected: {0}")]
    Playback(String),

    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
}

/// The single video element a player session renders into.
pub trait MediaSurface {
    /// Assign a URL for direct (non-adaptive) playback.
    fn set_source(&mut self, url: &Url);

    fn set_poster(&mut self, poster: Option<&Url>);

    /// Request playback. Hosts may refuse, e.g. under autoplay policies.
    fn play(&mut self) -> Result<(), VideoError>;

    fn pause(&mut self);

    fn paused(&self) -> bool;

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Total length in seconds; `NaN` or `0.0` while unknown.
    fn duration(&self) -> f64;

    fn seek(&mut self, seconds: f64);

    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    /// Whether the surface can natively decode `mime`.
    fn can_play_type(&self, mime: &str) -> bool;
}

/// One attached adaptive stream. Destroyed when the player closes.
pub trait StreamSession {
    fn load_source(&mut self, url: &Url) -> Result<(), VideoError>;

    /// Bind the session to the surface and start segment loading. The host
    /// reports `MediaEvent::ManifestParsed` once playback can start.
    fn attach(&mut self, surface: &mut dyn MediaSurface) -> Result<(), VideoError>;

    fn destroy(&mut self);
}

/// Factory for [`StreamSession`]s, e.g. an HLS library binding.
pub trait AdaptiveRuntime {
    /// Capability check for the current environment.
    fn is_supported(&self) -> bool;

    fn create_session(&mut self) -> Result<Box<dyn StreamSession>, VideoError>;
}

/// The host's fullscreen primitive for the player container.
///
/// A successful request does not mean fullscreen was entered; hosts report
/// the actual transition with `MediaEvent::FullscreenChanged`.
#[cfg_attr(test, mockall::automock)]
pub trait FullscreenApi {
    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), VideoError>;

    fn exit_fullscreen(&mut self) -> Result<(), VideoError>;
}

/// Runtime for hosts without adaptive streaming support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAdaptiveRuntime;

impl AdaptiveRuntime for NoAdaptiveRuntime {
    fn is_supported(&self) -> bool {
        false
    }

    fn create_session(&mut self) -> Result<Box<dyn StreamSession>, VideoError> {
        Err(VideoError::Runtime(
            "adaptive streaming is not available on this host".to_string(),
        ))
    }
}
