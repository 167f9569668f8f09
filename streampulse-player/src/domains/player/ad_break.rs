//! Pause-ad state machine.
//!
//! Every transition into the paused state with an overlay configured starts a
//! fresh countdown. The overlay can only be closed once the countdown hits
//! zero, and any resume wipes the cycle so the next pause starts over.
//!
//! ```text
//!  play ──► Idle ──pause + overlay──► CountingDown ──0──► Dismissible
//!            ▲                                                │ dismiss
//!            └──────────────────── play ◄──── Dismissed ◄─────┘
//! ```

use std::time::Duration;

use streampulse_config::{CenterPlayPolicy, PlayerConfig};
use thiserror::Error;

use super::messages::PlayerTimer;
use crate::infra::timers::{TimerHandle, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdBreakPhase {
    /// Outside a pause cycle, or paused without an overlay
    Idle,
    CountingDown,
    /// Countdown finished; the close action is available
    Dismissible,
    Dismissed,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdBreakError {
    #[error("pause ad cannot be dismissed while {0:?}")]
    NotDismissible(AdBreakPhase),
}

/// Point-in-time view of the machine for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdBreakState {
    pub phase: AdBreakPhase,
    pub is_ad_visible: bool,
    pub countdown_remaining: u32,
    pub is_dismissed: bool,
}

#[derive(Debug, Clone)]
pub struct AdBreakMachine {
    initial_countdown: u32,
    tick: Duration,
    auto_dismiss: bool,

    countdown_remaining: u32,
    dismissed: bool,
    /// Set by pause events only; a freshly opened session has not paused
    paused: bool,
    overlay_present: bool,
    timer: Option<TimerHandle>,
}

impl AdBreakMachine {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            initial_countdown: config.ad_countdown_secs,
            tick: config.countdown_tick(),
            auto_dismiss: config.auto_dismiss_ad,
            countdown_remaining: config.ad_countdown_secs,
            dismissed: false,
            paused: false,
            overlay_present: false,
            timer: None,
        }
    }

    pub fn phase(&self) -> AdBreakPhase {
        if !self.paused || !self.overlay_present {
            AdBreakPhase::Idle
        } else if self.dismissed {
            AdBreakPhase::Dismissed
        } else if self.countdown_remaining > 0 {
            AdBreakPhase::CountingDown
        } else {
            AdBreakPhase::Dismissible
        }
    }

    pub fn snapshot(&self) -> AdBreakState {
        AdBreakState {
            phase: self.phase(),
            is_ad_visible: self.is_ad_visible(),
            countdown_remaining: self.countdown_remaining,
            is_dismissed: self.dismissed,
        }
    }

    pub fn is_ad_visible(&self) -> bool {
        self.paused && self.overlay_present && !self.dismissed
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn has_running_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether the large center play icon is shown while the surface
    /// reports `paused`.
    pub fn center_play_visible(&self, policy: CenterPlayPolicy, paused: bool) -> bool {
        match policy {
            CenterPlayPolicy::AfterDismiss => paused && self.dismissed,
            CenterPlayPolicy::Decoupled => paused && !self.is_ad_visible(),
        }
    }

    /// The surface reported that playback started.
    pub fn on_play(&mut self, timers: &mut TimerQueue<PlayerTimer>) {
        self.paused = false;
        self.cancel_timer(timers);
        self.dismissed = false;
        self.countdown_remaining = self.initial_countdown;
    }

    /// The surface reported that playback paused.
    pub fn on_pause(&mut self, timers: &mut TimerQueue<PlayerTimer>) {
        self.paused = true;
        self.dismissed = false;
        self.cancel_timer(timers);
        self.countdown_remaining = self.initial_countdown;
        if self.overlay_present {
            self.start_countdown(timers);
        }
    }

    /// The ad-zone configuration changed underneath the session.
    pub fn set_overlay_present(
        &mut self,
        present: bool,
        timers: &mut TimerQueue<PlayerTimer>,
    ) {
        if present == self.overlay_present {
            return;
        }
        self.overlay_present = present;

        if !present {
            self.cancel_timer(timers);
            self.countdown_remaining = self.initial_countdown;
        } else if self.paused && !self.dismissed {
            self.start_countdown(timers);
        }
    }

    /// Countdown timer fired. Returns `false` for handles this machine no
    /// longer owns.
    pub fn on_tick(
        &mut self,
        handle: TimerHandle,
        timers: &mut TimerQueue<PlayerTimer>,
    ) -> bool {
        if self.timer != Some(handle) {
            return false;
        }

        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        if self.countdown_remaining == 0 {
            self.cancel_timer(timers);
            self.finish_countdown();
        }
        true
    }

    pub fn dismiss(&mut self) -> Result<(), AdBreakError> {
        match self.phase() {
            AdBreakPhase::Dismissible => {
                self.dismissed = true;
                Ok(())
            }
            phase => Err(AdBreakError::NotDismissible(phase)),
        }
    }

    /// Stop the countdown for good; used when the player closes.
    pub fn cancel(&mut self, timers: &mut TimerQueue<PlayerTimer>) {
        self.cancel_timer(timers);
    }

    fn start_countdown(&mut self, timers: &mut TimerQueue<PlayerTimer>) {
        self.cancel_timer(timers);
        self.countdown_remaining = self.initial_countdown;
        if self.initial_countdown == 0 {
            self.finish_countdown();
        } else {
            self.timer =
                Some(timers.schedule_repeating(self.tick, PlayerTimer::AdCountdown));
        }
    }

    fn finish_countdown(&mut self) {
        if self.auto_dismiss {
            self.dismissed = true;
        }
    }

    fn cancel_timer(&mut self, timers: &mut TimerQueue<PlayerTimer>) {
        if let Some(handle) = self.timer.take() {
            timers.cancel(handle);
        }
    }
}
