use crate::markup::TrustedMarkup;

/// Ids of the zones every fresh configuration carries.
pub const TOP_BAR_ZONE: &str = "top_bar";
pub const BOTTOM_STICKY_ZONE: &str = "bottom_sticky";
pub const VIDEO_PAUSE_ZONE: &str = "video_pause";

/// Where a zone's markup is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AdPlacement {
    Top,
    Bottom,
    VideoOverlay,
    NavbarBottom,
}

/// A named, independently toggleable placement slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdZone {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Raw embed code as pasted into the CMS
    pub code: String,
    pub placement: AdPlacement,
}

impl AdZone {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        placement: AdPlacement,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: false,
            code: String::new(),
            placement,
        }
    }

    /// Markup to inject, if the zone is live and has code.
    pub fn payload(&self) -> Option<TrustedMarkup> {
        if !self.enabled {
            return None;
        }
        TrustedMarkup::trust_non_empty(&self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdConfig {
    pub zones: Vec<AdZone>,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                AdZone::new(TOP_BAR_ZONE, "Top Banner Bar", AdPlacement::Top),
                AdZone::new(
                    BOTTOM_STICKY_ZONE,
                    "Sticky Bottom Footer",
                    AdPlacement::Bottom,
                ),
                AdZone::new(
                    VIDEO_PAUSE_ZONE,
                    "In-Player Pause Ad",
                    AdPlacement::VideoOverlay,
                ),
            ],
        }
    }
}

impl AdConfig {
    pub fn zone(&self, id: &str) -> Option<&AdZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn zone_mut(&mut self, id: &str) -> Option<&mut AdZone> {
        self.zones.iter_mut().find(|zone| zone.id == id)
    }

    /// Payload of the first live zone at `placement`.
    pub fn payload_for(&self, placement: AdPlacement) -> Option<TrustedMarkup> {
        self.zones
            .iter()
            .filter(|zone| zone.placement == placement)
            .find_map(AdZone::payload)
    }

    /// Overlay shown by the player while paused.
    pub fn video_overlay(&self) -> Option<TrustedMarkup> {
        self.payload_for(AdPlacement::VideoOverlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zones_are_disabled() {
        let config = AdConfig::default();
        assert_eq!(config.zones.len(), 3);
        assert!(config.zones.iter().all(|zone| !zone.enabled));
        assert!(config.video_overlay().is_none());
    }

    #[test]
    fn overlay_requires_enabled_zone_with_code() {
        let mut config = AdConfig::default();
        let zone = config.zone_mut("video_pause").unwrap();
        zone.code = "<div>ad</div>".into();
        assert!(config.video_overlay().is_none());

        config.zone_mut("video_pause").unwrap().enabled = true;
        assert_eq!(
            config.video_overlay().map(|m| m.into_inner()),
            Some("<div>ad</div>".to_string())
        );

        config.zone_mut("video_pause").unwrap().code = "  ".into();
        assert!(config.video_overlay().is_none());
    }

    #[test]
    fn overlay_ignores_other_placements() {
        let mut config = AdConfig::default();
        let top = config.zone_mut("top_bar").unwrap();
        top.enabled = true;
        top.code = "<img src=banner.png>".into();
        assert!(config.video_overlay().is_none());
        assert!(config.payload_for(AdPlacement::Top).is_some());
    }
}
