//! Headless demo application
//!
//! Runs a scripted viewing session against [`headless::HeadlessHost`]:
//! open, play, let the controls hide, pause into the ad break, wait out the
//! countdown, dismiss, resume, seek and close.

pub mod bootstrap;
pub mod headless;

use std::time::Duration;

use anyhow::{Context, anyhow};
use log::{debug, info};
use streampulse_core::AppStore;
use streampulse_model::{MediaKind, MediaSource, VIDEO_PAUSE_ZONE};
use url::Url;

use crate::domains::player::{
    AdBreakPhase, PlayerController, PlayerMessage, PlayerNotice, PlayerUpdate, format_time,
    update_player,
};
use headless::HeadlessHost;

pub use bootstrap::{AppConfig, MAX_SPEED, MIN_SPEED, load_env_file};

/// What the scripted session observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoReport {
    pub title: String,
    pub kind: Option<MediaKind>,
    pub source_ready: bool,
    pub unavailable: Option<String>,
    /// Countdown values in the order they were announced
    pub countdown: Vec<u32>,
    pub ad_dismissed: bool,
    pub controls_hidden: bool,
    pub position_seconds: f64,
    pub closed: bool,
}

/// Build the store, open the chosen title and play the script through.
pub async fn run(config: AppConfig) -> anyhow::Result<DemoReport> {
    let mut store = streampulse_core::seed::seed_store().context("failed to seed catalog")?;
    configure_pause_ad(&mut store, config.ad_code.as_deref())?;

    let (source, poster, title) = pick_source(&store, &config)?;
    info!("[App] Opening '{title}'");

    let host = HeadlessHost::new(config.media_duration, config.native_streams);
    let controller = PlayerController::new(
        config.player.clone(),
        host.surface(),
        host.runtime(config.adaptive_runtime),
        host.fullscreen(),
    );

    let mut driver = DemoDriver {
        controller,
        host,
        step: config.step(),
        frame_period: config.frame_period(),
        report: DemoReport {
            title,
            kind: Some(source.kind()),
            ..DemoReport::default()
        },
    };

    driver.send(PlayerMessage::SetAdOverlay(store.video_overlay()));
    driver.send(PlayerMessage::Open { source, poster });

    if driver.report.unavailable.is_some() {
        driver.send(PlayerMessage::Close);
        return Ok(driver.report);
    }

    if driver.host.is_paused() {
        driver.send(PlayerMessage::TogglePlay);
    }
    driver.send(PlayerMessage::PointerMoved);
    driver.run_for(Duration::from_secs(4)).await;

    driver.send(PlayerMessage::TogglePlay);
    if driver.controller.visible_ad().is_some() {
        let limit = config.player.countdown_tick() * (config.player.ad_countdown_secs + 1);
        driver.run_until_dismissible(limit).await;
        driver.send(PlayerMessage::DismissAd);
    } else {
        driver.run_for(Duration::from_secs(1)).await;
    }

    driver.send(PlayerMessage::TogglePlay);
    driver.run_for(Duration::from_secs(2)).await;
    driver.send(PlayerMessage::Seek(50.0));
    driver.send(PlayerMessage::SetVolume(0.0));
    driver.send(PlayerMessage::ToggleFullscreen);
    driver.run_for(Duration::from_secs(1)).await;

    if let Some(playback) = driver.controller.playback() {
        driver.report.position_seconds = playback.position_seconds;
        info!(
            "[App] Stopping at {} ({:.0}%)",
            format_time(playback.position_seconds),
            playback.progress_percentage()
        );
    }
    driver.send(PlayerMessage::Close);

    Ok(driver.report)
}

/// Turn the pause zone on with `code`, or leave it off.
fn configure_pause_ad(store: &mut AppStore, code: Option<&str>) -> anyhow::Result<()> {
    let Some(code) = code else {
        return Ok(());
    };

    store.set_ad_zone_code(VIDEO_PAUSE_ZONE, code)?;
    let enabled = store
        .ad_config()
        .zone(VIDEO_PAUSE_ZONE)
        .is_some_and(|zone| zone.enabled);
    if !enabled {
        store.toggle_ad_zone(VIDEO_PAUSE_ZONE)?;
    }
    Ok(())
}

fn pick_source(
    store: &AppStore,
    config: &AppConfig,
) -> anyhow::Result<(MediaSource, Option<Url>, String)> {
    let extensions = &config.player.adaptive_extensions;

    if let Some(url) = &config.url {
        let source = MediaSource::resolve(url.clone(), extensions);
        return Ok((source, None, url.to_string()));
    }

    let movie = match &config.movie {
        Some(wanted) => {
            let wanted = wanted.to_lowercase();
            store
                .movies()
                .iter()
                .find(|movie| movie.title.to_lowercase().contains(&wanted))
                .ok_or_else(|| anyhow!("no catalog movie matches '{wanted}'"))?
        }
        None => store
            .featured_movie()
            .ok_or_else(|| anyhow!("catalog is empty"))?,
    };

    Ok((
        movie.media_source(extensions),
        Some(movie.thumbnail.clone()),
        movie.title.clone(),
    ))
}

struct DemoDriver {
    controller: PlayerController,
    host: HeadlessHost,
    step: Duration,
    frame_period: Duration,
    report: DemoReport,
}

impl DemoDriver {
    fn send(&mut self, message: PlayerMessage) {
        let update = update_player(&mut self.controller, message);
        self.record(update);
        self.pump();
    }

    /// Feed queued host events back until the host goes quiet.
    fn pump(&mut self) {
        loop {
            let events = self.host.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                let update = update_player(&mut self.controller, PlayerMessage::Media(event));
                self.record(update);
            }
        }
    }

    fn frame(&mut self) {
        self.host.play_for(self.step);
        self.pump();
        let update = update_player(&mut self.controller, PlayerMessage::Tick(self.step));
        self.record(update);
    }

    async fn run_for(&mut self, span: Duration) {
        let mut interval = tokio::time::interval(self.frame_period);
        interval.tick().await;

        let mut elapsed = Duration::ZERO;
        while elapsed < span {
            interval.tick().await;
            self.frame();
            elapsed += self.step;
        }
    }

    async fn run_until_dismissible(&mut self, limit: Duration) {
        let mut interval = tokio::time::interval(self.frame_period);
        interval.tick().await;

        let mut elapsed = Duration::ZERO;
        while elapsed <= limit {
            let dismissible = self
                .controller
                .ad_break()
                .is_some_and(|state| state.phase == AdBreakPhase::Dismissible);
            if dismissible {
                return;
            }
            interval.tick().await;
            self.frame();
            elapsed += self.step;
        }
    }

    fn record(&mut self, update: PlayerUpdate) {
        for notice in update.notices {
            match &notice {
                PlayerNotice::SourceReady => self.report.source_ready = true,
                PlayerNotice::PlaybackUnavailable(reason) => {
                    self.report.unavailable = Some(reason.clone());
                }
                PlayerNotice::AdBreakChanged(state) => {
                    if state.is_dismissed {
                        self.report.ad_dismissed = true;
                    } else if state.is_ad_visible
                        && self.report.countdown.last() != Some(&state.countdown_remaining)
                    {
                        self.report.countdown.push(state.countdown_remaining);
                    }
                }
                PlayerNotice::ControlsVisibility(false) => self.report.controls_hidden = true,
                PlayerNotice::Closed => self.report.closed = true,
                PlayerNotice::Progress { .. } => {
                    debug!("[App] {notice:?}");
                    continue;
                }
                _ => {}
            }
            info!("[App] {notice:?}");
        }
    }
}
