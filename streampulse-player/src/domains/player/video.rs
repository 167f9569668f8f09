//! Source resolution: map a [`MediaSource`] onto the surface.

use std::fmt;

use log::{debug, info, warn};
use streampulse_model::{MediaKind, MediaSource};

use super::video_backend::{AdaptiveRuntime, MediaSurface, StreamSession, VideoError};

/// How the open source is bound to the surface.
pub enum SourceAttachment {
    /// URL assigned directly; waits for the viewer to press play
    Progressive,
    /// Driven by a runtime session; starts on `ManifestParsed`
    Adaptive(Box<dyn StreamSession>),
    /// Stream URL assigned directly to a surface that decodes it natively
    NativeStream,
}

impl SourceAttachment {
    /// Whether playback should start without viewer input.
    pub fn autoplay_on_attach(&self) -> bool {
        matches!(self, SourceAttachment::NativeStream)
    }

    pub fn waits_for_manifest(&self) -> bool {
        matches!(self, SourceAttachment::Adaptive(_))
    }

    /// Tear down any runtime session.
    pub fn release(&mut self) {
        if let SourceAttachment::Adaptive(session) = self {
            session.destroy();
        }
    }
}

impl fmt::Debug for SourceAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceAttachment::Progressive => f.write_str("Progressive"),
            SourceAttachment::Adaptive(_) => f.write_str("Adaptive(..)"),
            SourceAttachment::NativeStream => f.write_str("NativeStream"),
        }
    }
}

/// Bind `source` to `surface`.
///
/// Adaptive sources prefer the runtime, then native decoding of
/// `native_mime`. When neither is available the source is unplayable.
pub fn attach_source(
    surface: &mut dyn MediaSurface,
    runtime: &mut dyn AdaptiveRuntime,
    source: &MediaSource,
    native_mime: &str,
) -> Result<SourceAttachment, VideoError> {
    match source.kind() {
        MediaKind::Progressive => {
            debug!("[Player] Progressive source {}", source.url());
            surface.set_source(source.url());
            Ok(SourceAttachment::Progressive)
        }
        MediaKind::AdaptiveStream if runtime.is_supported() => {
            info!("[Player] Attaching adaptive runtime for {}", source.url());
            let mut session = runtime.create_session()?;
            let attached = session
                .load_source(source.url())
                .and_then(|()| session.attach(surface));

            if let Err(err) = attached {
                warn!("[Player] Adaptive session setup failed: {err}");
                session.destroy();
                return Err(err);
            }
            Ok(SourceAttachment::Adaptive(session))
        }
        MediaKind::AdaptiveStream if surface.can_play_type(native_mime) => {
            info!("[Player] Using native stream playback for {}", source.url());
            surface.set_source(source.url());
            Ok(SourceAttachment::NativeStream)
        }
        MediaKind::AdaptiveStream => Err(VideoError::Unsupported {
            mime: native_mime.to_string(),
        }),
    }
}
