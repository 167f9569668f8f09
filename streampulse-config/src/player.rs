use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::constants::{
    DEFAULT_AD_COUNTDOWN_SECS, DEFAULT_ADAPTIVE_EXTENSIONS,
    DEFAULT_CONTROLS_IDLE_MS, DEFAULT_COUNTDOWN_TICK_MS,
    DEFAULT_NATIVE_STREAM_MIME, ENV_AUTO_DISMISS, ENV_CONFIG_JSON,
    ENV_CONFIG_PATH,
};
use crate::util::parse_bool_var;

fn default_adaptive_extensions() -> Vec<String> {
    DEFAULT_ADAPTIVE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Source that produced the player configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// When the large center play affordance is shown over a paused video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterPlayPolicy {
    /// Only after a pause ad has been dismissed. With no ad configured the
    /// icon never appears.
    #[default]
    AfterDismiss,
    /// Whenever playback is paused and no ad is on screen.
    Decoupled,
}

/// Player tuning. Every field has a default, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting value of the pause-ad countdown, in whole seconds. The close
    /// button only becomes available once it reaches zero.
    pub ad_countdown_secs: u32,
    /// Period (ms) of the countdown timer. One tick removes one second from
    /// the countdown, so anything other than 1000 speeds it up or slows it
    /// down; useful for demos.
    pub countdown_tick_ms: u64,
    /// Idle window (ms) after the last pointer movement before the transport
    /// controls hide during playback.
    pub controls_idle_ms: u64,
    /// URL fragments that mark a source as an adaptive stream.
    #[serde(default = "default_adaptive_extensions")]
    pub adaptive_extensions: Vec<String>,
    /// MIME type checked for native stream playback when no adaptive runtime
    /// is available.
    pub native_stream_mime: String,
    pub center_play: CenterPlayPolicy,
    /// Hide the pause ad as soon as the countdown finishes instead of waiting
    /// for the viewer to close it.
    pub auto_dismiss_ad: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            ad_countdown_secs: DEFAULT_AD_COUNTDOWN_SECS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
            controls_idle_ms: DEFAULT_CONTROLS_IDLE_MS,
            adaptive_extensions: default_adaptive_extensions(),
            native_stream_mime: DEFAULT_NATIVE_STREAM_MIME.to_string(),
            center_play: CenterPlayPolicy::default(),
            auto_dismiss_ad: false,
        }
    }
}

impl PlayerConfig {
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }

    pub fn controls_idle(&self) -> Duration {
        Duration::from_millis(self.controls_idle_ms)
    }

    /// Load player configuration using environment variables.
    /// Evaluation order:
    /// 1) `$STREAMPULSE_PLAYER_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$STREAMPULSE_PLAYER_CONFIG_JSON` (inline JSON),
    /// 3) the first of [`SETTINGS_FILES`] in the working directory,
    /// 4) defaults if none of the above exist.
    ///
    /// `$STREAMPULSE_AUTO_DISMISS_AD` overrides `auto_dismiss_ad` afterwards.
    /// The result is validated before it is returned.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        let (mut config, source) = Self::load_unvalidated()?;
        config.apply_env_overrides();
        config
            .validate()
            .with_context(|| format!("player config from {source:?}"))?;
        log::debug!("player config loaded from {source:?}: {config:?}");
        Ok((config, source))
    }

    fn load_unvalidated() -> anyhow::Result<(Self, ConfigSource)> {
        if let Ok(path_str) = env::var(ENV_CONFIG_PATH)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(ENV_CONFIG_JSON)
            && !raw.trim().is_empty()
        {
            let parsed = ConfigFormat::Json
                .parse(&raw)
                .with_context(|| format!("{ENV_CONFIG_JSON} does not hold player settings"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::discover_in(Path::new(".")) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(auto_dismiss) = parse_bool_var(ENV_AUTO_DISMISS) {
            self.auto_dismiss_ad = auto_dismiss;
        }
    }

    /// Read a settings file. `.toml` and `.json` pick their format; any
    /// other name is tried as TOML, then JSON.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!("cannot read player settings at {}", path.display())
        })?;

        match ConfigFormat::for_path(path) {
            Some(format) => format.parse(&raw).with_context(|| {
                format!("{} is not a valid {format:?} settings file", path.display())
            }),
            None => Self::parse_any(&raw).with_context(|| {
                format!("unrecognised player settings in {}", path.display())
            }),
        }
    }

    /// Parse settings of unknown format.
    pub fn parse_any(raw: &str) -> anyhow::Result<Self> {
        match ConfigFormat::Toml.parse(raw) {
            Ok(config) => Ok(config),
            Err(as_toml) => ConfigFormat::Json.parse(raw).map_err(|as_json| {
                anyhow!("settings are neither TOML ({as_toml}) nor JSON ({as_json})")
            }),
        }
    }

    /// First settings file under `dir`, in [`SETTINGS_FILES`] order.
    pub fn discover_in(dir: &Path) -> Option<PathBuf> {
        SETTINGS_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Settings files looked up, relative to the working directory, when no
/// environment variable names one.
pub const SETTINGS_FILES: &[&str] = &[
    "streampulse.toml",
    "streampulse.json",
    ".streampulse/player.toml",
    ".streampulse/player.json",
];

/// On-disk encodings accepted for [`PlayerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn for_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn parse(self, raw: &str) -> anyhow::Result<PlayerConfig> {
        Ok(match self {
            Self::Toml => toml::from_str(raw)?,
            Self::Json => serde_json::from_str(raw)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_player_constants() {
        let config = PlayerConfig::default();
        assert_eq!(config.ad_countdown_secs, 5);
        assert_eq!(config.countdown_tick(), Duration::from_secs(1));
        assert_eq!(config.controls_idle(), Duration::from_secs(3));
        assert_eq!(config.adaptive_extensions, vec![".m3u8".to_string()]);
        assert_eq!(config.center_play, CenterPlayPolicy::AfterDismiss);
        assert!(!config.auto_dismiss_ad);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = ConfigFormat::Toml
            .parse("ad_countdown_secs = 10\ncenter_play = \"decoupled\"\n")
            .expect("toml");
        assert_eq!(config.ad_countdown_secs, 10);
        assert_eq!(config.center_play, CenterPlayPolicy::Decoupled);
        assert_eq!(config.controls_idle_ms, DEFAULT_CONTROLS_IDLE_MS);
    }

    #[test]
    fn unknown_format_falls_back_to_json() {
        let config = PlayerConfig::parse_any(
            r#"{"auto_dismiss_ad": true, "adaptive_extensions": [".m3u8", ".mpd"]}"#,
        )
        .expect("json");
        assert!(config.auto_dismiss_ad);
        assert_eq!(config.adaptive_extensions.len(), 2);
    }

    #[test]
    fn unknown_format_reports_both_attempts() {
        let err = PlayerConfig::parse_any("ad_countdown_secs = [")
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("settings are neither TOML ("), "{err}");
        assert!(err.contains(") nor JSON ("), "{err}");
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::for_path(Path::new("a/streampulse.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::for_path(Path::new("player.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::for_path(Path::new("player.conf")), None);
        assert_eq!(ConfigFormat::for_path(Path::new("player")), None);
    }
}
