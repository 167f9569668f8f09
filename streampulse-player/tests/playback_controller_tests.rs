mod common;

use std::time::Duration;

use common::{ADAPTIVE_URL, FakeHost, Harness, HostCall, POSTER_URL, PROGRESSIVE_URL};
use streampulse_config::PlayerConfig;
use streampulse_model::MediaKind;
use streampulse_player::domains::player::{
    MediaEvent, PlaybackState, PlayerMessage, PlayerNotice, SourceStatus, update_player,
};
use url::Url;

fn url(raw: &str) -> Url {
    Url::parse(raw).unwrap()
}

#[test]
fn progressive_open_assigns_source_without_autoplay() {
    let mut harness = Harness::new();
    let update = harness.open_progressive();

    assert_eq!(update.notices, vec![PlayerNotice::SourceReady]);
    assert_eq!(
        harness.host.calls(),
        vec![
            HostCall::SetPoster(Some(url(POSTER_URL))),
            HostCall::SetSource(url(PROGRESSIVE_URL)),
        ]
    );
    assert_eq!(harness.controller.source_status(), SourceStatus::Ready);
    assert_eq!(
        harness.controller.source().map(|s| s.kind()),
        Some(MediaKind::Progressive)
    );
    assert_eq!(harness.controller.playback(), Some(&PlaybackState::default()));
    assert!(harness.controller.controls_visible());
}

#[test]
fn adaptive_open_starts_once_manifest_is_parsed() {
    let mut harness = Harness::new();
    let update = harness.open_adaptive();

    assert!(update.is_empty());
    assert_eq!(
        harness.controller.source().map(|s| s.kind()),
        Some(MediaKind::AdaptiveStream)
    );
    assert_eq!(harness.controller.source_status(), SourceStatus::Loading);
    assert_eq!(
        harness.host.calls(),
        vec![
            HostCall::SetPoster(None),
            HostCall::CreateSession,
            HostCall::LoadSource(url(ADAPTIVE_URL)),
            HostCall::Attach,
        ]
    );

    let update = harness
        .controller
        .handle_media_event(MediaEvent::ManifestParsed);
    assert_eq!(update.notices, vec![PlayerNotice::SourceReady]);
    assert_eq!(harness.controller.source_status(), SourceStatus::Ready);
    assert_eq!(harness.host.count(&HostCall::Play), 1);

    harness
        .controller
        .handle_media_event(MediaEvent::ManifestParsed);
    assert_eq!(harness.host.count(&HostCall::Play), 1);
}

#[test]
fn adaptive_falls_back_to_native_playback() {
    let host = FakeHost::new().configure(|state| {
        state.runtime_supported = false;
        state.native_streams = true;
    });
    let mut harness = Harness::with(PlayerConfig::default(), host);
    let update = harness.open_adaptive();

    assert_eq!(update.notices, vec![PlayerNotice::SourceReady]);
    assert_eq!(
        harness.host.calls(),
        vec![
            HostCall::SetPoster(None),
            HostCall::SetSource(url(ADAPTIVE_URL)),
            HostCall::Play,
        ]
    );
    assert_eq!(harness.host.count(&HostCall::CreateSession), 0);
}

#[test]
fn rejected_autoplay_leaves_source_ready() {
    let host = FakeHost::new().configure(|state| {
        state.runtime_supported = false;
        state.native_streams = true;
        state.reject_play = true;
    });
    let mut harness = Harness::with(PlayerConfig::default(), host);
    harness.open_adaptive();

    assert_eq!(harness.controller.source_status(), SourceStatus::Ready);
    assert!(harness.controller.playback().unwrap().is_paused);
}

#[test]
fn unplayable_stream_reports_unavailable() {
    let host = FakeHost::new().configure(|state| state.runtime_supported = false);
    let mut harness = Harness::with(PlayerConfig::default(), host);
    let update = harness.open_adaptive();

    assert!(matches!(
        update.notices.as_slice(),
        [PlayerNotice::PlaybackUnavailable(_)]
    ));
    assert!(harness.controller.source_status().is_unavailable());
    assert!(harness.controller.is_open());

    harness.controller.toggle_play();
    assert_eq!(harness.host.count(&HostCall::Play), 0);
}

#[test]
fn reopen_tears_down_the_previous_session() {
    let mut harness = Harness::new();
    harness.open_adaptive();
    harness.open_progressive();

    assert_eq!(harness.host.count(&HostCall::Destroy), 1);
    assert_eq!(harness.controller.source_status(), SourceStatus::Ready);

    harness.controller.close();
    assert_eq!(harness.host.count(&HostCall::Destroy), 1);
}

#[test]
fn close_is_idempotent_and_safe_without_open() {
    let mut harness = Harness::new();
    assert!(harness.controller.close().is_empty());

    harness.open_adaptive();
    assert_eq!(harness.controller.close().notices, vec![PlayerNotice::Closed]);
    assert!(harness.controller.close().is_empty());
    assert_eq!(harness.host.count(&HostCall::Destroy), 1);
    assert!(!harness.controller.is_open());
    assert_eq!(harness.controller.source_status(), SourceStatus::Idle);
}

#[test]
fn close_stops_a_playing_surface() {
    let mut harness = Harness::new();
    harness.open_progressive();
    harness.play();
    harness.controller.close();
    assert_eq!(harness.host.count(&HostCall::Pause), 1);
}

#[test]
fn toggle_play_follows_the_surface() {
    let mut harness = Harness::new();
    harness.open_progressive();

    harness.controller.toggle_play();
    harness.controller.toggle_play();
    assert_eq!(
        &harness.host.calls()[2..],
        &[HostCall::Play, HostCall::Pause]
    );
    // state only moves on events
    assert!(harness.controller.playback().unwrap().is_paused);
}

#[test]
fn toggle_play_leaves_the_ad_break_to_events() {
    let mut harness = Harness::new();
    harness.controller.set_ad_overlay(Some(common::ad()));
    harness.open_progressive();
    harness.play();
    harness.pause();

    harness.controller.toggle_play();
    let state = harness.controller.ad_break().unwrap();
    assert!(state.is_ad_visible);
    assert_eq!(harness.controller.pending_timers(), 1);
}

#[test]
fn seek_without_duration_is_a_no_op() {
    let mut harness = Harness::new();
    harness.open_progressive();

    assert!(harness.controller.seek(50.0).is_empty());
    assert_eq!(harness.host.count(&HostCall::Seek(0.0)), 0);
    assert!(!harness.host.calls().iter().any(|c| matches!(c, HostCall::Seek(_))));
    assert_eq!(harness.controller.playback().unwrap().progress_percentage(), 0.0);
}

#[test]
fn seek_clamps_and_updates_progress_immediately() {
    let mut harness = Harness::new();
    harness.open_progressive();
    harness.host.set_duration(200.0);

    let update = harness.controller.seek(50.0);
    assert_eq!(
        update.notices,
        vec![PlayerNotice::Progress {
            position_seconds: 100.0,
            percentage: 50.0,
        }]
    );
    assert_eq!(harness.host.count(&HostCall::Seek(100.0)), 1);

    harness.controller.seek(150.0);
    assert_eq!(harness.host.count(&HostCall::Seek(200.0)), 1);
    assert_eq!(harness.controller.playback().unwrap().progress_percentage(), 100.0);

    harness.controller.seek(-5.0);
    assert_eq!(harness.host.count(&HostCall::Seek(0.0)), 1);
}

#[test]
fn progress_never_reports_nan() {
    let mut harness = Harness::new();
    harness.open_progressive();

    let update = harness.controller.handle_media_event(MediaEvent::TimeUpdate {
        position_seconds: 10.0,
        duration_seconds: f64::NAN,
    });
    assert_eq!(
        update.notices,
        vec![PlayerNotice::Progress {
            position_seconds: 10.0,
            percentage: 0.0,
        }]
    );

    harness.controller.handle_media_event(MediaEvent::TimeUpdate {
        position_seconds: 30.0,
        duration_seconds: 120.0,
    });
    let playback = harness.controller.playback().unwrap();
    assert_eq!(playback.progress_percentage(), 25.0);

    harness
        .controller
        .handle_media_event(MediaEvent::LoadedMetadata {
            duration_seconds: 90.0,
        });
    assert_eq!(harness.controller.playback().unwrap().duration_seconds, 90.0);
}

#[test]
fn volume_zero_mutes_and_positive_unmutes() {
    let mut harness = Harness::new();
    harness.open_progressive();

    harness.controller.set_volume(0.0);
    let playback = harness.controller.playback().unwrap();
    assert!(playback.is_muted);
    assert_eq!(playback.volume, 0.0);

    harness.controller.set_volume(0.4);
    let playback = harness.controller.playback().unwrap();
    assert!(!playback.is_muted);
    assert_eq!(playback.volume, 0.4);
    assert_eq!(harness.host.count(&HostCall::SetMuted(false)), 1);

    harness.controller.set_volume(3.0);
    assert_eq!(harness.controller.playback().unwrap().volume, 1.0);
}

#[test]
fn toggle_mute_keeps_volume() {
    let mut harness = Harness::new();
    harness.open_progressive();
    harness.controller.set_volume(0.6);

    harness.controller.toggle_mute();
    let playback = harness.controller.playback().unwrap();
    assert!(playback.is_muted);
    assert_eq!(playback.volume, 0.6);

    harness.controller.toggle_mute();
    assert!(!harness.controller.playback().unwrap().is_muted);
}

#[test]
fn fullscreen_follows_change_events() {
    let mut harness = Harness::new();
    harness.open_progressive();

    assert!(harness.controller.toggle_fullscreen().is_empty());
    assert_eq!(harness.host.count(&HostCall::RequestFullscreen), 1);
    assert!(!harness.controller.playback().unwrap().is_fullscreen);

    harness
        .controller
        .handle_media_event(MediaEvent::FullscreenChanged(true));
    assert!(harness.controller.playback().unwrap().is_fullscreen);

    harness.host.state.borrow_mut().fullscreen = true;
    harness.controller.toggle_fullscreen();
    assert_eq!(harness.host.count(&HostCall::ExitFullscreen), 1);
}

#[test]
fn fullscreen_failure_is_reported_not_applied() {
    let host = FakeHost::new().configure(|state| state.fail_fullscreen = true);
    let mut harness = Harness::with(PlayerConfig::default(), host);
    harness.open_progressive();

    let update = harness.controller.toggle_fullscreen();
    assert!(matches!(
        update.notices.as_slice(),
        [PlayerNotice::FullscreenFailed(_)]
    ));
    assert!(!harness.controller.playback().unwrap().is_fullscreen);
}

#[test]
fn media_error_marks_source_unavailable() {
    let mut harness = Harness::new();
    harness.open_progressive();

    let update = harness
        .controller
        .handle_media_event(MediaEvent::Error("decode failed".into()));
    assert_eq!(
        update.notices,
        vec![PlayerNotice::PlaybackUnavailable("decode failed".into())]
    );
    assert_eq!(
        harness.controller.source_status(),
        SourceStatus::Unavailable("decode failed".into())
    );
}

#[test]
fn transport_without_session_does_nothing() {
    let mut harness = Harness::new();
    assert!(harness.controller.toggle_play().is_empty());
    assert!(harness.controller.seek(10.0).is_empty());
    assert!(harness.controller.set_volume(0.5).is_empty());
    assert!(harness.controller.toggle_fullscreen().is_empty());
    assert!(harness.controller.pointer_moved().is_empty());
    assert!(harness.host.calls().is_empty());
}

#[test]
fn update_loop_routes_messages() {
    let mut harness = Harness::new();
    let source = streampulse_model::MediaSource::parse(PROGRESSIVE_URL).unwrap();

    let update = update_player(
        &mut harness.controller,
        PlayerMessage::Open {
            source,
            poster: None,
        },
    );
    assert_eq!(update.notices, vec![PlayerNotice::SourceReady]);

    update_player(&mut harness.controller, PlayerMessage::TogglePlay);
    update_player(
        &mut harness.controller,
        PlayerMessage::Media(MediaEvent::Played),
    );
    assert!(!harness.controller.playback().unwrap().is_paused);

    update_player(&mut harness.controller, PlayerMessage::PointerMoved);
    let update = update_player(
        &mut harness.controller,
        PlayerMessage::Tick(Duration::from_secs(3)),
    );
    assert_eq!(update.notices, vec![PlayerNotice::ControlsVisibility(false)]);
    assert_eq!(harness.controller.now(), Duration::from_secs(3));

    let update = update_player(&mut harness.controller, PlayerMessage::Close);
    assert_eq!(update.notices, vec![PlayerNotice::Closed]);
}
