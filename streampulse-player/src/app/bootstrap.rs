use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use log::info;
use streampulse_config::{ConfigSource, PlayerConfig};
use url::Url;

/// Markup used for the pause ad when none is given.
pub const DEFAULT_DEMO_AD: &str = r#"<div class="pause-ad">Sponsored: StreamPulse Premium</div>"#;

/// Virtual time that passes per demo frame.
const DEMO_STEP: Duration = Duration::from_millis(250);

/// Accepted range for [`AppConfig::with_speed`].
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 10_000.0;

/// Load an env file into the process environment: `path` when given, else
/// the first `.env` found from the working directory upward.
///
/// Call before the logger is installed so a `RUST_LOG` in the file applies.
pub fn load_env_file(path: Option<&Path>) -> dotenvy::Result<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub player: PlayerConfig,
    pub config_source: ConfigSource,
    /// Catalog title to open; the featured movie when unset
    pub movie: Option<String>,
    /// Direct URL, takes precedence over `movie`
    pub url: Option<Url>,
    pub ad_code: Option<String>,
    /// Virtual seconds per wall-clock second
    pub speed: f64,
    pub adaptive_runtime: bool,
    pub native_streams: bool,
    pub media_duration: Duration,
}

impl AppConfig {
    pub fn new(player: PlayerConfig) -> Self {
        Self {
            player,
            config_source: ConfigSource::Default,
            movie: None,
            url: None,
            ad_code: Some(DEFAULT_DEMO_AD.to_string()),
            speed: 1.0,
            adaptive_runtime: true,
            native_streams: false,
            media_duration: Duration::from_secs(596),
        }
    }

    /// Player settings from the environment (see
    /// [`PlayerConfig::load_from_env`]) with demo defaults for the rest.
    pub fn from_environment() -> anyhow::Result<Self> {
        let (player, source) =
            PlayerConfig::load_from_env().context("failed to load player configuration")?;
        info!("[App] Player configuration from {source:?}");

        let mut config = Self::new(player);
        config.config_source = source;
        Ok(config)
    }

    pub fn with_speed(mut self, speed: f64) -> anyhow::Result<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            bail!("speed must be a positive number, got {speed}");
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            bail!("speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}");
        }
        self.speed = speed;
        Ok(self)
    }

    pub fn step(&self) -> Duration {
        DEMO_STEP
    }

    /// Wall-clock period between demo frames. Never zero; a speed set
    /// directly on the field is held to the accepted range.
    pub fn frame_period(&self) -> Duration {
        let speed = if self.speed.is_finite() {
            self.speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            MAX_SPEED
        };
        DEMO_STEP.div_f64(speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_scales_frame_period() {
        let config = AppConfig::new(PlayerConfig::default())
            .with_speed(5.0)
            .unwrap();
        assert_eq!(config.frame_period(), Duration::from_millis(50));
        assert_eq!(config.step(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let config = AppConfig::new(PlayerConfig::default());
        assert!(config.clone().with_speed(0.0).is_err());
        assert!(config.with_speed(f64::NAN).is_err());
    }

    #[test]
    fn env_file_is_loaded_into_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "STREAMPULSE_ENV_FILE_MARKER=loaded\n").unwrap();

        let loaded = load_env_file(Some(&path)).unwrap();

        assert_eq!(loaded, path);
        assert_eq!(
            std::env::var("STREAMPULSE_ENV_FILE_MARKER").as_deref(),
            Ok("loaded")
        );
        assert!(load_env_file(Some(&dir.path().join("missing.env"))).is_err());
    }

    #[test]
    fn rejects_speeds_outside_the_frame_range() {
        let config = AppConfig::new(PlayerConfig::default());
        assert!(config.clone().with_speed(1e12).is_err());
        assert!(config.clone().with_speed(1e-9).is_err());
        assert!(config.clone().with_speed(MAX_SPEED).is_ok());
        assert!(config.with_speed(MIN_SPEED).is_ok());
    }

    #[test]
    fn frame_period_stays_positive_at_the_bounds() {
        let fast = AppConfig::new(PlayerConfig::default())
            .with_speed(MAX_SPEED)
            .unwrap();
        let period = fast.frame_period();
        assert!(period > Duration::from_micros(24) && period <= Duration::from_micros(25));

        let mut raw = AppConfig::new(PlayerConfig::default());
        raw.speed = 1e300;
        assert!(!raw.frame_period().is_zero());
        raw.speed = 1e-300;
        assert!(raw.frame_period() > Duration::from_secs(24));
        raw.speed = f64::INFINITY;
        assert!(!raw.frame_period().is_zero());
    }
}
