use std::fmt;
use std::time::Duration;

use log::{debug, error, info, trace, warn};
use streampulse_config::PlayerConfig;
use streampulse_model::{MediaSource, TrustedMarkup};
use url::Url;

use super::ad_break::{AdBreakError, AdBreakMachine, AdBreakPhase, AdBreakState};
use super::controls::ControlsVisibility;
use super::messages::{MediaEvent, PlayerNotice, PlayerTimer, PlayerUpdate};
use super::state::{PlaybackState, SourceStatus};
use super::video::{SourceAttachment, attach_source};
use super::video_backend::{AdaptiveRuntime, FullscreenApi, MediaSurface};
use crate::infra::timers::TimerQueue;

/// Everything that lives from `open` to `close`.
#[derive(Debug)]
struct PlaybackSession {
    source: MediaSource,
    attachment: Option<SourceAttachment>,
    status: SourceStatus,
    playback: PlaybackState,
    ad_break: AdBreakMachine,
    controls: ControlsVisibility,
    /// Set by the first `Played` event of this session. Pause events that
    /// arrive before it belong to a previous source.
    has_played: bool,
}

/// Drives one video surface.
///
/// Transport calls act on the host immediately; the resulting state changes
/// arrive later as [`MediaEvent`]s. The pause-ad cycle and the controls
/// auto-hide run on the controller's timer queue, which only moves when the
/// host calls [`PlayerController::advance`].
pub struct PlayerController {
    config: PlayerConfig,
    surface: Box<dyn MediaSurface>,
    runtime: Box<dyn AdaptiveRuntime>,
    fullscreen: Box<dyn FullscreenApi>,
    timers: TimerQueue<PlayerTimer>,
    overlay: Option<TrustedMarkup>,
    session: Option<PlaybackSession>,
}

impl fmt::Debug for PlayerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerController")
            .field("config", &self.config)
            .field("timers", &self.timers)
            .field("overlay", &self.overlay)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl PlayerController {
    pub fn new(
        config: PlayerConfig,
        surface: Box<dyn MediaSurface>,
        runtime: Box<dyn AdaptiveRuntime>,
        fullscreen: Box<dyn FullscreenApi>,
    ) -> Self {
        Self {
            config,
            surface,
            runtime,
            fullscreen,
            timers: TimerQueue::new(),
            overlay: None,
            session: None,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Resolve `url` with the configured adaptive extensions and open it.
    pub fn open_url(&mut self, url: Url, poster: Option<Url>) -> PlayerUpdate {
        let source = MediaSource::resolve(url, &self.config.adaptive_extensions);
        self.open(source, poster)
    }

    /// Start a session for `source`, replacing any open one.
    pub fn open(&mut self, source: MediaSource, poster: Option<Url>) -> PlayerUpdate {
        if self.session.is_some() {
            debug!("[Player] Re-open: tearing down previous session");
            // The new source replaces the old one on the same surface, so
            // pausing it here would only queue a stale `Paused` event.
            self.teardown(false);
        }

        let mut update = PlayerUpdate::none();
        self.surface.set_poster(poster.as_ref());

        let mut ad_break = AdBreakMachine::new(&self.config);
        ad_break.set_overlay_present(self.overlay.is_some(), &mut self.timers);

        let (attachment, status) = match attach_source(
            self.surface.as_mut(),
            self.runtime.as_mut(),
            &source,
            &self.config.native_stream_mime,
        ) {
            Ok(attachment) if attachment.waits_for_manifest() => {
                (Some(attachment), SourceStatus::Loading)
            }
            Ok(attachment) => {
                if attachment.autoplay_on_attach() {
                    request_play(self.surface.as_mut());
                }
                update.push(PlayerNotice::SourceReady);
                (Some(attachment), SourceStatus::Ready)
            }
            Err(err) => {
                warn!("[Player] Playback unavailable for {}: {err}", source.url());
                let reason = err.to_string();
                update.push(PlayerNotice::PlaybackUnavailable(reason.clone()));
                (None, SourceStatus::Unavailable(reason))
            }
        };

        info!("[Player] Opened {} ({:?})", source.url(), source.kind());
        self.session = Some(PlaybackSession {
            source,
            attachment,
            status,
            playback: PlaybackState::default(),
            ad_break,
            controls: ControlsVisibility::new(self.config.controls_idle()),
            has_played: false,
        });

        update
    }

    /// End the session. Safe to call repeatedly or without a session.
    pub fn close(&mut self) -> PlayerUpdate {
        if self.session.is_none() {
            return PlayerUpdate::none();
        }
        self.teardown(true);
        info!("[Player] Closed");
        PlayerUpdate::notice(PlayerNotice::Closed)
    }

    fn teardown(&mut self, stop_surface: bool) {
        if let Some(mut session) = self.session.take() {
            if let Some(attachment) = session.attachment.as_mut() {
                attachment.release();
            }
            session.ad_break.cancel(&mut self.timers);
            session.controls.cancel(&mut self.timers);
            if stop_surface && !self.surface.paused() {
                self.surface.pause();
            }
        }
        self.timers.clear();
    }

    /// Play if the surface is paused, pause otherwise. State follows from the
    /// resulting media events.
    pub fn toggle_play(&mut self) -> PlayerUpdate {
        let Some(session) = self.session.as_ref() else {
            return PlayerUpdate::none();
        };
        if session.status.is_unavailable() {
            debug!("[Player] Ignoring toggle: source unavailable");
            return PlayerUpdate::none();
        }

        if self.surface.paused() {
            request_play(self.surface.as_mut());
        } else {
            self.surface.pause();
        }
        PlayerUpdate::none()
    }

    /// Seek to `percentage` (0..=100) of the duration.
    pub fn seek(&mut self, percentage: f64) -> PlayerUpdate {
        let Some(session) = self.session.as_mut() else {
            return PlayerUpdate::none();
        };

        let percentage = if percentage.is_nan() {
            0.0
        } else {
            percentage.clamp(0.0, 100.0)
        };

        session.playback.record_duration(self.surface.duration());
        if !session.playback.has_known_duration() {
            debug!("[Player] Seek ignored: duration unknown");
            return PlayerUpdate::none();
        }

        let target = percentage / 100.0 * session.playback.duration_seconds;
        self.surface.seek(target);
        session.playback.position_seconds = target;

        PlayerUpdate::notice(PlayerNotice::Progress {
            position_seconds: target,
            percentage: session.playback.progress_percentage(),
        })
    }

    /// Zero mutes; anything else unmutes at that level.
    pub fn set_volume(&mut self, volume: f64) -> PlayerUpdate {
        let Some(session) = self.session.as_mut() else {
            return PlayerUpdate::none();
        };

        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        let muted = volume == 0.0;

        self.surface.set_volume(volume);
        self.surface.set_muted(muted);
        session.playback.volume = volume;
        session.playback.is_muted = muted;
        PlayerUpdate::none()
    }

    pub fn toggle_mute(&mut self) -> PlayerUpdate {
        let Some(session) = self.session.as_mut() else {
            return PlayerUpdate::none();
        };

        let muted = !session.playback.is_muted;
        self.surface.set_muted(muted);
        session.playback.is_muted = muted;
        PlayerUpdate::none()
    }

    /// Request or exit fullscreen. `is_fullscreen` only changes on
    /// [`MediaEvent::FullscreenChanged`].
    pub fn toggle_fullscreen(&mut self) -> PlayerUpdate {
        if self.session.is_none() {
            return PlayerUpdate::none();
        }

        let result = if self.fullscreen.is_fullscreen() {
            self.fullscreen.exit_fullscreen()
        } else {
            self.fullscreen.request_fullscreen()
        };

        match result {
            Ok(()) => PlayerUpdate::none(),
            Err(err) => {
                error!("[Player] Fullscreen toggle failed: {err}");
                PlayerUpdate::notice(PlayerNotice::FullscreenFailed(err.to_string()))
            }
        }
    }

    /// Close the pause ad. Only allowed once the countdown has finished.
    pub fn dismiss_ad(&mut self) -> Result<PlayerUpdate, AdBreakError> {
        let Some(session) = self.session.as_mut() else {
            return Err(AdBreakError::NotDismissible(AdBreakPhase::Idle));
        };

        session.ad_break.dismiss()?;
        debug!("[Player] Pause ad dismissed");
        Ok(PlayerUpdate::notice(PlayerNotice::AdBreakChanged(
            session.ad_break.snapshot(),
        )))
    }

    /// Replace the pause-ad payload. Empty markup counts as no overlay.
    pub fn set_ad_overlay(&mut self, overlay: Option<TrustedMarkup>) -> PlayerUpdate {
        self.overlay = overlay.filter(|markup| !markup.is_empty());

        let Some(session) = self.session.as_mut() else {
            return PlayerUpdate::none();
        };

        let before = session.ad_break.snapshot();
        session
            .ad_break
            .set_overlay_present(self.overlay.is_some(), &mut self.timers);
        ad_break_delta(before, &session.ad_break)
    }

    pub fn pointer_moved(&mut self) -> PlayerUpdate {
        let Some(session) = self.session.as_mut() else {
            return PlayerUpdate::none();
        };

        if session
            .controls
            .on_pointer_moved(session.playback.is_paused, &mut self.timers)
        {
            PlayerUpdate::notice(PlayerNotice::ControlsVisibility(true))
        } else {
            PlayerUpdate::none()
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) -> PlayerUpdate {
        let Some(session) = self.session.as_mut() else {
            trace!("[Player] Dropping {event:?}: no open session");
            return PlayerUpdate::none();
        };

        let mut update = PlayerUpdate::none();
        match event {
            MediaEvent::Played => {
                let before = session.ad_break.snapshot();
                session.playback.is_paused = false;
                session.has_played = true;
                session.ad_break.on_play(&mut self.timers);
                update.extend(ad_break_delta(before, &session.ad_break));
            }
            MediaEvent::Paused => {
                let before = session.ad_break.snapshot();
                session.playback.is_paused = true;
                if session.has_played {
                    session.ad_break.on_pause(&mut self.timers);
                } else {
                    debug!("[Player] Pause before first play, ad break stays idle");
                }
                if session.controls.on_pause(&mut self.timers) {
                    update.push(PlayerNotice::ControlsVisibility(true));
                }
                update.extend(ad_break_delta(before, &session.ad_break));
            }
            MediaEvent::TimeUpdate {
                position_seconds,
                duration_seconds,
            } => {
                session
                    .playback
                    .record_progress(position_seconds, duration_seconds);
                update.push(PlayerNotice::Progress {
                    position_seconds: session.playback.position_seconds,
                    percentage: session.playback.progress_percentage(),
                });
            }
            MediaEvent::LoadedMetadata { duration_seconds } => {
                session.playback.record_duration(duration_seconds);
            }
            MediaEvent::ManifestParsed => {
                let waiting = session
                    .attachment
                    .as_ref()
                    .is_some_and(SourceAttachment::waits_for_manifest);
                if waiting && session.status == SourceStatus::Loading {
                    debug!("[Player] Manifest parsed for {}", session.source.url());
                    session.status = SourceStatus::Ready;
                    update.push(PlayerNotice::SourceReady);
                    request_play(self.surface.as_mut());
                }
            }
            MediaEvent::FullscreenChanged(fullscreen) => {
                session.playback.is_fullscreen = fullscreen;
            }
            MediaEvent::Error(reason) => {
                warn!("[Player] Media error: {reason}");
                session.status = SourceStatus::Unavailable(reason.clone());
                update.push(PlayerNotice::PlaybackUnavailable(reason));
            }
        }
        update
    }

    /// Move the virtual clock forward by `elapsed`, firing due timers in
    /// deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> PlayerUpdate {
        let until = self.timers.now() + elapsed;
        let mut update = PlayerUpdate::none();

        while let Some((handle, kind)) = self.timers.pop_due(until) {
            let Some(session) = self.session.as_mut() else {
                self.timers.cancel(handle);
                continue;
            };

            match kind {
                PlayerTimer::AdCountdown => {
                    if session.ad_break.on_tick(handle, &mut self.timers) {
                        trace!(
                            "[Player] Ad countdown: {}",
                            session.ad_break.countdown_remaining()
                        );
                        update.push(PlayerNotice::AdBreakChanged(
                            session.ad_break.snapshot(),
                        ));
                    } else {
                        self.timers.cancel(handle);
                    }
                }
                PlayerTimer::ControlsHide => {
                    if session
                        .controls
                        .on_hide_elapsed(handle, session.playback.is_paused)
                    {
                        update.push(PlayerNotice::ControlsVisibility(false));
                    }
                }
            }
        }

        self.timers.advance_to(until);
        update
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.session.as_ref().map(|session| &session.source)
    }

    pub fn playback(&self) -> Option<&PlaybackState> {
        self.session.as_ref().map(|session| &session.playback)
    }

    pub fn ad_break(&self) -> Option<AdBreakState> {
        self.session
            .as_ref()
            .map(|session| session.ad_break.snapshot())
    }

    pub fn ad_overlay(&self) -> Option<&TrustedMarkup> {
        self.overlay.as_ref()
    }

    /// The overlay to render right now, if the ad is on screen.
    pub fn visible_ad(&self) -> Option<&TrustedMarkup> {
        let session = self.session.as_ref()?;
        if session.ad_break.is_ad_visible() {
            self.overlay.as_ref()
        } else {
            None
        }
    }

    pub fn source_status(&self) -> SourceStatus {
        self.session
            .as_ref()
            .map(|session| session.status.clone())
            .unwrap_or_default()
    }

    pub fn controls_visible(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.controls.is_visible())
    }

    pub fn show_center_play(&self) -> bool {
        self.session.as_ref().is_some_and(|session| {
            session
                .ad_break
                .center_play_visible(self.config.center_play, session.playback.is_paused)
        })
    }

    /// Timers still armed on the queue.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.teardown(true);
    }
}

fn request_play(surface: &mut dyn MediaSurface) {
    if let Err(err) = surface.play() {
        warn!("[Player] Play request rejected: {err}");
    }
}

fn ad_break_delta(before: AdBreakState, machine: &AdBreakMachine) -> PlayerUpdate {
    let after = machine.snapshot();
    if after == before {
        PlayerUpdate::none()
    } else {
        PlayerUpdate::notice(PlayerNotice::AdBreakChanged(after))
    }
}
