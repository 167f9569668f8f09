/// Transport state of the open session.
///
/// Mutated only by the controller, in response to surface events or
/// transport actions.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_paused: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    /// Level in `[0, 1]`; kept while muted
    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_paused: true,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
        }
    }
}

impl PlaybackState {
    /// Progress in `[0, 100]`, `0.0` while the duration is unknown.
    pub fn progress_percentage(&self) -> f64 {
        progress_percentage(self.position_seconds, self.duration_seconds)
    }

    pub fn has_known_duration(&self) -> bool {
        is_known_duration(self.duration_seconds)
    }

    /// Store a progress sample from the surface. Non-finite positions are
    /// dropped; a usable duration sample also refreshes the stored duration.
    pub fn record_progress(&mut self, position: f64, duration: f64) {
        if position.is_finite() {
            self.position_seconds = position.max(0.0);
        }
        self.record_duration(duration);
    }

    pub fn record_duration(&mut self, duration: f64) {
        if is_known_duration(duration) {
            self.duration_seconds = duration;
        }
    }
}

fn is_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// `position / duration * 100`, never NaN or infinite.
pub fn progress_percentage(position: f64, duration: f64) -> f64 {
    if !is_known_duration(duration) || !position.is_finite() {
        return 0.0;
    }
    (position / duration * 100.0).clamp(0.0, 100.0)
}

/// Whether the session's source can play.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceStatus {
    #[default]
    Idle,
    /// Waiting for the adaptive runtime to parse the manifest
    Loading,
    Ready,
    Unavailable(String),
}

impl SourceStatus {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceStatus::Unavailable(_))
    }
}
