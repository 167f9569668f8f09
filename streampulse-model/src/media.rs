use url::Url;

use crate::error::ModelError;
use crate::ids::MovieID;
use crate::source::MediaSource;

/// A catalog entry as shown on the viewer rails and edited in the CMS.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Movie {
    pub id: MovieID,
    pub title: String,
    pub description: String,
    pub thumbnail: Url,
    pub video_url: Url,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trailer_url: Option<Url>,
    pub category: String,
    /// Human readable running time, e.g. `2h 15m`
    pub duration: String,
    pub year: u16,
    pub rating: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trending: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub featured: bool,
}

impl Movie {
    /// Create a catalog entry with a fresh id and empty presentation fields.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        thumbnail: Url,
        video_url: Url,
    ) -> Self {
        Self {
            id: MovieID::new(),
            title: title.into(),
            description: String::new(),
            thumbnail,
            video_url,
            trailer_url: None,
            category: category.into(),
            duration: String::new(),
            year: 0,
            rating: String::new(),
            trending: false,
            featured: false,
        }
    }

    pub fn validate(&self) -> crate::ModelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::InvalidMedia(format!(
                "movie {} has an empty title",
                self.id
            )));
        }
        if self.category.trim().is_empty() {
            return Err(ModelError::InvalidMedia(format!(
                "movie '{}' has no category",
                self.title
            )));
        }
        Ok(())
    }

    /// Resolve the playable source for this movie.
    pub fn media_source<S: AsRef<str>>(
        &self,
        adaptive_extensions: &[S],
    ) -> MediaSource {
        MediaSource::resolve(self.video_url.clone(), adaptive_extensions)
    }
}
