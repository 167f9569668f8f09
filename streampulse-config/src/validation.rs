use thiserror::Error;

use crate::constants::MAX_AD_COUNTDOWN_SECS;
use crate::player::PlayerConfig;

/// Values that would leave the player in a broken or hostile state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("countdown_tick_ms must be greater than zero")]
    ZeroCountdownTick,

    #[error("controls_idle_ms must be greater than zero")]
    ZeroControlsIdle,

    #[error(
        "ad_countdown_secs = {secs} exceeds the maximum of {max} seconds"
    )]
    CountdownTooLong { secs: u32, max: u32 },

    #[error("native_stream_mime must not be blank")]
    BlankNativeStreamMime,
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        if self.countdown_tick_ms == 0 {
            return Err(ConfigGuardRailError::ZeroCountdownTick);
        }
        if self.controls_idle_ms == 0 {
            return Err(ConfigGuardRailError::ZeroControlsIdle);
        }
        if self.ad_countdown_secs > MAX_AD_COUNTDOWN_SECS {
            return Err(ConfigGuardRailError::CountdownTooLong {
                secs: self.ad_countdown_secs,
                max: MAX_AD_COUNTDOWN_SECS,
            });
        }
        if self.native_stream_mime.trim().is_empty() {
            return Err(ConfigGuardRailError::BlankNativeStreamMime);
        }
        if self.adaptive_extensions.iter().all(|ext| ext.trim().is_empty()) {
            log::warn!(
                "no adaptive stream extensions configured; every source will be treated as progressive"
            );
        }
        Ok(())
    }
}
