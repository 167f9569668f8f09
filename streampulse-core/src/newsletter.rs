//! Newsletter template rendering.
//!
//! Templates are authored in the CMS and may contain `{movie_title}`,
//! `{category}` and `{user_email}` placeholders. Every occurrence is
//! replaced; placeholders without a value are left untouched so a preview
//! still shows where they sit.

use streampulse_model::{EmailTemplate, TrustedMarkup};

pub const MOVIE_TITLE: &str = "{movie_title}";
pub const CATEGORY: &str = "{category}";
pub const USER_EMAIL: &str = "{user_email}";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    pub movie_title: Option<String>,
    pub category: Option<String>,
    pub user_email: Option<String>,
}

impl TemplateVars {
    pub fn movie(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            movie_title: Some(title.into()),
            category: Some(category.into()),
            user_email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }
}

/// Subject line and body ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: TrustedMarkup,
}

pub fn render_template(
    template: &TrustedMarkup,
    vars: &TemplateVars,
) -> TrustedMarkup {
    TrustedMarkup::trust(fill(template.as_str(), vars))
}

pub fn render_email(template: &EmailTemplate, vars: &TemplateVars) -> RenderedEmail {
    RenderedEmail {
        subject: fill(&template.subject, vars),
        body: render_template(&template.content, vars),
    }
}

fn fill(text: &str, vars: &TemplateVars) -> String {
    let mut out = text.to_string();
    for (placeholder, value) in [
        (MOVIE_TITLE, &vars.movie_title),
        (CATEGORY, &vars.category),
        (USER_EMAIL, &vars.user_email),
    ] {
        if let Some(value) = value {
            out = out.replace(placeholder, value);
        }
    }
    out
}
