//! Controls chrome: auto-hide and time formatting.

use std::time::Duration;

use super::messages::PlayerTimer;
use crate::infra::timers::{TimerHandle, TimerQueue};

/// Visibility of the transport controls.
///
/// Movement while playing shows the controls and re-arms the hide timer;
/// while paused the controls stay up.
#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    visible: bool,
    idle: Duration,
    hide_timer: Option<TimerHandle>,
}

impl ControlsVisibility {
    pub fn new(idle: Duration) -> Self {
        Self {
            visible: true,
            idle,
            hide_timer: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_some()
    }

    /// Returns whether visibility changed.
    pub fn on_pointer_moved(
        &mut self,
        paused: bool,
        timers: &mut TimerQueue<PlayerTimer>,
    ) -> bool {
        let changed = !self.visible;
        self.visible = true;
        self.cancel(timers);

        if !paused {
            self.hide_timer = Some(timers.schedule_once(self.idle, PlayerTimer::ControlsHide));
        }
        changed
    }

    /// Hide timer fired. Stale handles and a paused session keep the
    /// controls up.
    pub fn on_hide_elapsed(&mut self, handle: TimerHandle, paused: bool) -> bool {
        if self.hide_timer != Some(handle) {
            return false;
        }
        self.hide_timer = None;

        if paused || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn on_pause(&mut self, timers: &mut TimerQueue<PlayerTimer>) -> bool {
        let changed = !self.visible;
        self.visible = true;
        self.cancel(timers);
        changed
    }

    pub fn cancel(&mut self, timers: &mut TimerQueue<PlayerTimer>) {
        if let Some(handle) = self.hide_timer.take() {
            timers.cancel(handle);
        }
    }
}

/// Render a position as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Negative and non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
