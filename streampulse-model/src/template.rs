use crate::markup::TrustedMarkup;

/// Newsletter template edited in the CMS.
///
/// `subject` is plain text and `content` is HTML; both may carry the
/// `{movie_title}`, `{category}` and `{user_email}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    pub subject: String,
    /// When the template is sent, shown next to it in the editor
    pub description: String,
    /// CSS color used for the template's card
    pub accent: String,
    pub content: TrustedMarkup,
}

impl EmailTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject: impl Into<String>,
        content: TrustedMarkup,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject: subject.into(),
            description: String::new(),
            accent: String::new(),
            content,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = accent.into();
        self
    }
}
