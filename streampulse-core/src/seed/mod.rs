//! Demo catalog the application boots with.

use chrono::NaiveDate;
use streampulse_model::{AdConfig, EmailTemplate, Movie, Subscriber, TrustedMarkup};

use crate::error::Result;
use crate::store::AppStore;

const CATALOG_JSON: &str = include_str!("catalog.json");

pub const WELCOME_TEMPLATE: &str = "welcome";
pub const NEW_MOVIE_TEMPLATE: &str = "new-movie";
pub const UNSUBSCRIBE_TEMPLATE: &str = "unsubscribe";

/// Address seeded into the subscriber list so the CMS is never empty.
pub const DEMO_SUBSCRIBER_EMAIL: &str = "demo@streampulse.com";

pub fn seed_movies() -> Result<Vec<Movie>> {
    parse_catalog(CATALOG_JSON)
}

/// Parse and validate a catalog in the seed's JSON shape.
pub fn parse_catalog(raw: &str) -> Result<Vec<Movie>> {
    let movies: Vec<Movie> = serde_json::from_str(raw)?;
    for movie in &movies {
        movie.validate()?;
    }
    Ok(movies)
}

/// The three newsletter templates the CMS starts with.
pub fn seed_templates() -> Vec<EmailTemplate> {
    vec![
        EmailTemplate::new(
            WELCOME_TEMPLATE,
            "Welcome Template",
            "Welcome to the StreamPulse Family! \u{1F37F}",
            TrustedMarkup::trust(include_str!("templates/welcome.html").trim()),
        )
        .with_description("Sent immediately after a user subscribes from the homepage.")
        .with_accent("#E50914"),
        EmailTemplate::new(
            NEW_MOVIE_TEMPLATE,
            "New Release Notification",
            "Now Playing: {movie_title} \u{1F3AC}",
            TrustedMarkup::trust(include_str!("templates/new_movie.html").trim()),
        )
        .with_description("Automatic blast sent when content is added via CMS Movies.")
        .with_accent("#E50914"),
        EmailTemplate::new(
            UNSUBSCRIBE_TEMPLATE,
            "Unsubscribe Confirmation",
            "We\u{2019}re sorry to see you go... \u{1F44B}",
            TrustedMarkup::trust(include_str!("templates/unsubscribe.html").trim()),
        )
        .with_description("Sent automatically when a user clicks the unsubscribe link.")
        .with_accent("#666"),
    ]
}

pub fn seed_store() -> Result<AppStore> {
    let movies = seed_movies()?;
    let subscribed_at =
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap_or_default();
    let subscribers = vec![Subscriber::new(DEMO_SUBSCRIBER_EMAIL, subscribed_at)?];
    Ok(AppStore::new(movies, subscribers, AdConfig::default())
        .with_templates(seed_templates()))
}
