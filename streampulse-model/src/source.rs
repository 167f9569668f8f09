use url::Url;

/// Extensions that mark a URL as a segmented, manifest-driven stream.
pub const DEFAULT_ADAPTIVE_EXTENSIONS: &[&str] = &[".m3u8"];

/// How a media URL has to be fed to the playback surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediaKind {
    /// A single media file assigned directly to the surface
    Progressive,
    /// Manifest plus segments, needs an adaptive runtime or native support
    AdaptiveStream,
}

impl MediaKind {
    pub fn is_adaptive(&self) -> bool {
        matches!(self, MediaKind::AdaptiveStream)
    }
}

/// A media URL together with its resolved [`MediaKind`].
///
/// The kind is fixed at construction; a playback session never re-derives it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSource {
    url: Url,
    kind: MediaKind,
}

impl MediaSource {
    /// Resolve the kind of `url` by looking for any of `adaptive_extensions`
    /// in the lowercased URL.
    pub fn resolve<S: AsRef<str>>(url: Url, adaptive_extensions: &[S]) -> Self {
        let lowered = url.as_str().to_ascii_lowercase();
        let adaptive = adaptive_extensions.iter().any(|ext| {
            let ext = ext.as_ref().trim();
            !ext.is_empty() && lowered.contains(&ext.to_ascii_lowercase())
        });

        let kind = if adaptive {
            MediaKind::AdaptiveStream
        } else {
            MediaKind::Progressive
        };

        Self { url, kind }
    }

    /// Resolve with [`DEFAULT_ADAPTIVE_EXTENSIONS`].
    pub fn from_url(url: Url) -> Self {
        Self::resolve(url, DEFAULT_ADAPTIVE_EXTENSIONS)
    }

    pub fn parse(raw: &str) -> crate::ModelResult<Self> {
        Ok(Self::from_url(Url::parse(raw)?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}
