//! Default values and environment keys.

/// Seconds a pause ad must stay up before it can be dismissed.
pub const DEFAULT_AD_COUNTDOWN_SECS: u32 = 5;

/// Period of the ad countdown timer.
pub const DEFAULT_COUNTDOWN_TICK_MS: u64 = 1_000;

/// Idle window after the last pointer movement before controls hide.
pub const DEFAULT_CONTROLS_IDLE_MS: u64 = 3_000;

/// MIME type checked on the surface when no adaptive runtime is available.
pub const DEFAULT_NATIVE_STREAM_MIME: &str = "application/vnd.apple.mpegurl";

pub const DEFAULT_ADAPTIVE_EXTENSIONS: &[&str] = &[".m3u8"];

/// Upper bound accepted for the countdown; longer ads are a config mistake.
pub const MAX_AD_COUNTDOWN_SECS: u32 = 120;

pub const ENV_CONFIG_PATH: &str = "STREAMPULSE_PLAYER_CONFIG_PATH";
pub const ENV_CONFIG_JSON: &str = "STREAMPULSE_PLAYER_CONFIG_JSON";
pub const ENV_AUTO_DISMISS: &str = "STREAMPULSE_AUTO_DISMISS_AD";
