use std::time::Duration;

use streampulse_model::{MediaSource, TrustedMarkup};
use url::Url;

use super::ad_break::AdBreakState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerTimer {
    AdCountdown,
    ControlsHide,
}

/// Signals reported by the host's media surface, stream runtime and
/// fullscreen primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Played,
    Paused,
    TimeUpdate {
        position_seconds: f64,
        duration_seconds: f64,
    },
    LoadedMetadata {
        duration_seconds: f64,
    },
    /// Adaptive runtime finished parsing the manifest
    ManifestParsed,
    FullscreenChanged(bool),
    Error(String),
}

#[derive(Debug, Clone)]
pub enum PlayerMessage {
    // Session
    Open {
        source: MediaSource,
        poster: Option<Url>,
    },
    Close,

    // Transport
    TogglePlay,
    Seek(f64), // Percentage of the duration, 0..=100
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,

    // Overlay / chrome
    DismissAd,
    PointerMoved,
    SetAdOverlay(Option<TrustedMarkup>),

    // Host
    Media(MediaEvent),
    Tick(Duration), // Elapsed time since the previous tick
}

impl PlayerMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "Player::Open",
            Self::Close => "Player::Close",
            Self::TogglePlay => "Player::TogglePlay",
            Self::Seek(_) => "Player::Seek",
            Self::SetVolume(_) => "Player::SetVolume",
            Self::ToggleMute => "Player::ToggleMute",
            Self::ToggleFullscreen => "Player::ToggleFullscreen",
            Self::DismissAd => "Player::DismissAd",
            Self::PointerMoved => "Player::PointerMoved",
            Self::SetAdOverlay(_) => "Player::SetAdOverlay",
            Self::Media(_) => "Player::Media",
            Self::Tick(_) => "Player::Tick",
        }
    }
}

/// Outbound notifications for the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerNotice {
    SourceReady,
    PlaybackUnavailable(String),
    AdBreakChanged(AdBreakState),
    ControlsVisibility(bool),
    FullscreenFailed(String),
    Progress {
        position_seconds: f64,
        percentage: f64,
    },
    Closed,
}

/// Result of handling one player message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerUpdate {
    pub notices: Vec<PlayerNotice>,
}

impl PlayerUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: PlayerNotice) -> Self {
        Self {
            notices: vec![notice],
        }
    }

    pub fn push(&mut self, notice: PlayerNotice) {
        self.notices.push(notice);
    }

    pub fn extend(&mut self, other: PlayerUpdate) {
        self.notices.extend(other.notices);
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Latest ad-break snapshot carried by this update, if any.
    pub fn last_ad_break(&self) -> Option<AdBreakState> {
        self.notices.iter().rev().find_map(|notice| match notice {
            PlayerNotice::AdBreakChanged(state) => Some(*state),
            _ => None,
        })
    }
}
