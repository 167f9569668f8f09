//! Shared configuration library for StreamPulse.
//!
//! Centralizes the player tuning knobs (ad-break countdown, controls idle
//! window, adaptive-stream detection) together with their defaults, loading
//! order and guard rails so the player and its tooling agree on one source
//! of truth.

pub mod constants;
pub mod player;
pub mod util;
pub mod validation;

pub use player::{
    CenterPlayPolicy, ConfigFormat, ConfigSource, PlayerConfig, SETTINGS_FILES,
};
pub use validation::ConfigGuardRailError;
